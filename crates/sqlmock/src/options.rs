//! Statement matching modes.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use sqlmock_error::{MockError, Result};

/// How an expectation's statement pattern is applied to the statement text.
///
/// `Search` is the lenient default: the pattern may match anywhere inside the
/// statement, so a fragment like `"SELECT"` matches `"SELECT * FROM t"`.
/// Authors who want full-string matching either anchor the pattern
/// themselves or pick `Anchored`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Regular expression, found anywhere in the statement.
    #[default]
    Search,
    /// Regular expression that must cover the whole statement.
    Anchored,
    /// Literal text, equal to the statement up to surrounding whitespace.
    Exact,
}

impl MatchMode {
    /// Compile `pattern` according to this mode.
    pub fn compile(self, pattern: &str) -> Result<Regex> {
        let source = match self {
            Self::Search => pattern.to_owned(),
            Self::Anchored => format!("^(?:{pattern})$"),
            Self::Exact => format!(r"^\s*{}\s*$", regex::escape(pattern.trim())),
        };
        Regex::new(&source).map_err(|e| MockError::invalid_pattern(pattern, e))
    }

    /// Name of the mode, as accepted by `from_str` and written by serde.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Anchored => "anchored",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = MockError;

    /// Parse `search`, `anchored` or `exact`, ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "search" => Ok(Self::Search),
            "anchored" => Ok(Self::Anchored),
            "exact" => Ok(Self::Exact),
            _ => Err(MockError::InvalidMatchMode {
                value: name.to_owned(),
            }),
        }
    }
}
