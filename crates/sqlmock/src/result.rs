//! Result descriptor handed back for a matched exec expectation.

use std::fmt;

/// What a mocked exec call reports back: the generated row id and the number
/// of rows touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ExecResult {
    last_insert_id: i64,
    rows_affected: u64,
}

impl ExecResult {
    /// A result reporting the given id and affected row count.
    pub const fn new(last_insert_id: i64, rows_affected: u64) -> Self {
        Self {
            last_insert_id,
            rows_affected,
        }
    }

    /// A result for statements that touch rows without generating an id.
    pub const fn affected(rows_affected: u64) -> Self {
        Self::new(0, rows_affected)
    }

    /// Row id generated by the statement.
    pub const fn last_insert_id(&self) -> i64 {
        self.last_insert_id
    }

    /// Number of rows the statement touched.
    pub const fn rows_affected(&self) -> u64 {
        self.rows_affected
    }
}

impl fmt::Display for ExecResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "last_insert_id={} rows_affected={}",
            self.last_insert_id, self.rows_affected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let r = ExecResult::new(7, 1);
        assert_eq!(r.last_insert_id(), 7);
        assert_eq!(r.rows_affected(), 1);

        let r = ExecResult::affected(3);
        assert_eq!(r.last_insert_id(), 0);
        assert_eq!(r.rows_affected(), 3);
        assert_eq!(ExecResult::default(), ExecResult::new(0, 0));
    }

    #[test]
    fn display() {
        assert_eq!(
            ExecResult::new(5, 2).to_string(),
            "last_insert_id=5 rows_affected=2"
        );
    }
}
