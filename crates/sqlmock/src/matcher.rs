//! Statement text and argument matching for query and exec expectations.

use std::fmt;

use regex::Regex;
use sqlmock_error::Result;
use sqlmock_types::{DriverValue, ValueFamily};
use tracing::trace;

use crate::options::MatchMode;

/// Compare one expected argument against the actual argument at the same
/// position.
///
/// The expected value's family picks the rule:
/// - signed integers compare as `i64`, unsigned as `u64`, floats as `f64`
///   with exact equality, text by exact string equality;
/// - anything else (NULL, booleans, blobs, timestamps) compares **only the
///   kind tag**. Two timestamps match even when they hold different instants,
///   and two blobs match regardless of their bytes.
///
/// An actual value from a different family never matches.
#[allow(clippy::float_cmp)]
pub fn value_matches(expected: &DriverValue, actual: &DriverValue) -> bool {
    match (expected.family(), actual.family()) {
        (ValueFamily::Signed, ValueFamily::Signed) => {
            matches!((expected.as_i64(), actual.as_i64()), (Some(e), Some(a)) if e == a)
        }
        (ValueFamily::Unsigned, ValueFamily::Unsigned) => {
            matches!((expected.as_u64(), actual.as_u64()), (Some(e), Some(a)) if e == a)
        }
        (ValueFamily::Float, ValueFamily::Float) => {
            matches!((expected.as_f64(), actual.as_f64()), (Some(e), Some(a)) if e == a)
        }
        (ValueFamily::Text, ValueFamily::Text) => expected.as_text() == actual.as_text(),
        (ValueFamily::Other, _) => expected.kind() == actual.kind(),
        (
            ValueFamily::Signed | ValueFamily::Unsigned | ValueFamily::Float | ValueFamily::Text,
            _,
        ) => false,
    }
}

/// Compiled statement pattern plus the ordered expected arguments.
///
/// Both are fixed at construction.
#[derive(Debug, Clone)]
pub struct StatementMatcher {
    pattern: String,
    mode: MatchMode,
    regex: Regex,
    args: Vec<DriverValue>,
}

impl StatementMatcher {
    /// Compile `pattern` in the default [`MatchMode::Search`] mode.
    pub fn new(pattern: &str, args: Vec<DriverValue>) -> Result<Self> {
        Self::with_mode(pattern, MatchMode::default(), args)
    }

    /// Compile `pattern` in the given mode. Fails on an invalid pattern.
    pub fn with_mode(pattern: &str, mode: MatchMode, args: Vec<DriverValue>) -> Result<Self> {
        let regex = mode.compile(pattern)?;
        Ok(Self {
            pattern: pattern.to_owned(),
            mode,
            regex,
            args,
        })
    }

    /// The pattern as the test author wrote it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// How the pattern is applied to statement text.
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Expected arguments, in call order.
    pub fn expected_args(&self) -> &[DriverValue] {
        &self.args
    }

    /// Whether the statement text satisfies the pattern.
    pub fn query_matches(&self, sql: &str) -> bool {
        let hit = self.regex.is_match(sql);
        if !hit {
            trace!(
                target: "sqlmock.match",
                pattern = %self.pattern,
                mode = %self.mode,
                sql,
                "statement mismatch"
            );
        }
        hit
    }

    /// Whether `actual` satisfies the expected arguments, position by
    /// position. The lengths must be equal; see [`value_matches`] for the
    /// per-position rule.
    pub fn args_matches(&self, actual: &[DriverValue]) -> bool {
        if actual.len() != self.args.len() {
            trace!(
                target: "sqlmock.match",
                expected = self.args.len(),
                actual = actual.len(),
                "argument count mismatch"
            );
            return false;
        }
        for (position, (expected, got)) in self.args.iter().zip(actual).enumerate() {
            if !value_matches(expected, got) {
                trace!(
                    target: "sqlmock.match",
                    position,
                    expected = %expected,
                    expected_kind = %expected.kind(),
                    actual = %got,
                    actual_kind = %got.kind(),
                    "argument mismatch"
                );
                return false;
            }
        }
        true
    }

    /// Both predicates at once.
    pub fn matches(&self, sql: &str, actual: &[DriverValue]) -> bool {
        self.query_matches(sql) && self.args_matches(actual)
    }
}

/// Renders as `matching 'SELECT' (search) with args [1, 'a']`.
impl fmt::Display for StatementMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matching '{}' ({}) with args [", self.pattern, self.mode)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}
