//! Row producers attached to query expectations.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use sqlmock_error::{MockError, Result};
use sqlmock_types::DriverValue;

/// Source of result rows for a matched query.
///
/// The engine never reads from a producer; it only holds it until the
/// dispatcher takes it after a successful match.
pub trait RowProducer: fmt::Debug + Send {
    fn columns(&self) -> &[String];

    /// The next row, an error scheduled for this row, or `None` when
    /// exhausted.
    fn next_row(&mut self) -> Option<Result<Vec<DriverValue>>>;
}

/// In-memory row producer: fixed column names and a queue of rows.
#[derive(Debug, Clone, Default)]
pub struct MockRows {
    columns: Vec<String>,
    rows: VecDeque<Vec<DriverValue>>,
    row_errors: BTreeMap<usize, MockError>,
    position: usize,
}

impl MockRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a row. It must have one value per column.
    pub fn add_row<I, V>(mut self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<DriverValue>,
    {
        let row: Vec<DriverValue> = values.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(MockError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push_back(row);
        Ok(self)
    }

    /// Make reading the row at `index` (0-based) fail with `err` instead.
    #[must_use]
    pub fn row_error(mut self, index: usize, err: MockError) -> Self {
        self.row_errors.insert(index, err);
        self
    }

    /// Load rows from delimiter-separated lines.
    ///
    /// Blank lines are skipped, fields are trimmed, and a bare `NULL` field
    /// becomes [`DriverValue::Null`]. Every other field is text. Quoting is
    /// not supported.
    pub fn from_delimited<I, S>(columns: I, text: &str, delimiter: char) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = Self::new(columns);
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<DriverValue> = line
                .split(delimiter)
                .map(|field| match field.trim() {
                    "NULL" => DriverValue::Null,
                    other => DriverValue::Text(other.to_owned()),
                })
                .collect();
            if row.len() != rows.columns.len() {
                return Err(MockError::RowSource {
                    line: idx + 1,
                    detail: format!(
                        "expected {} fields, found {}",
                        rows.columns.len(),
                        row.len()
                    ),
                });
            }
            rows.rows.push_back(row);
        }
        Ok(rows)
    }

    /// Rows not yet produced.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowProducer for MockRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Option<Result<Vec<DriverValue>>> {
        let row = self.rows.pop_front()?;
        let index = self.position;
        self.position += 1;
        match self.row_errors.remove(&index) {
            Some(err) => Some(Err(err)),
            None => Some(Ok(row)),
        }
    }
}
