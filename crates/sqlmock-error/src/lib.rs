use thiserror::Error;

/// Primary error type for the sqlmock expectation engine.
///
/// Two families live here. Simulated driver failures are what a test installs
/// on an expectation via `set_error` so the mocked call fails the way a real
/// driver would. Engine errors are raised by the engine itself while building
/// expectations or handing out their payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MockError {
    // === Simulated Driver Errors ===
    /// The connection to the database was lost mid-operation.
    #[error("connection lost: {detail}")]
    ConnectionLost { detail: String },

    /// Database is busy.
    #[error("database is busy")]
    Busy,

    /// SQL syntax error reported by the server.
    #[error("near \"{token}\": syntax error")]
    SyntaxError { token: String },

    /// UNIQUE constraint violation.
    #[error("UNIQUE constraint failed: {columns}")]
    UniqueViolation { columns: String },

    /// NOT NULL constraint violation.
    #[error("NOT NULL constraint failed: {column}")]
    NotNullViolation { column: String },

    /// FOREIGN KEY constraint violation.
    #[error("FOREIGN KEY constraint failed")]
    ForeignKeyViolation,

    /// Cannot commit or roll back without an open transaction.
    #[error("cannot commit - no transaction is active")]
    NoActiveTransaction,

    /// Free-form driver error chosen by the test author.
    #[error("{0}")]
    Custom(String),

    // === Engine Errors ===
    /// The statement pattern did not compile.
    #[error("invalid statement pattern '{pattern}': {detail}")]
    InvalidPattern { pattern: String, detail: String },

    /// A match mode name that no mode answers to.
    #[error("unknown match mode: {value}")]
    InvalidMatchMode { value: String },

    /// The payload of a matched expectation was already handed out.
    #[error("payload of {what} expectation already consumed")]
    PayloadConsumed { what: &'static str },

    /// A mock row does not have as many values as there are columns.
    #[error("row has {actual} values but {expected} columns are declared")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// A delimited row source could not be loaded.
    #[error("line {line}: {detail}")]
    RowSource { line: usize, detail: String },
}

/// SQLite-style result codes used when a simulated error must be reported to
/// a caller that expects numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Successful result.
    Ok = 0,
    /// Generic error.
    Error = 1,
    /// Internal logic error.
    Internal = 2,
    /// Database file is busy.
    Busy = 5,
    /// Some kind of disk I/O error occurred.
    IoErr = 10,
    /// Abort due to constraint violation.
    Constraint = 19,
    /// Library used incorrectly.
    Misuse = 21,
}

impl MockError {
    /// Map this error to a SQLite error code for compatibility.
    #[allow(clippy::match_same_arms)]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ConnectionLost { .. } => ErrorCode::IoErr,
            Self::Busy => ErrorCode::Busy,
            Self::SyntaxError { .. } | Self::NoActiveTransaction | Self::Custom(_) => {
                ErrorCode::Error
            }
            Self::UniqueViolation { .. }
            | Self::NotNullViolation { .. }
            | Self::ForeignKeyViolation => ErrorCode::Constraint,
            Self::InvalidPattern { .. }
            | Self::InvalidMatchMode { .. }
            | Self::PayloadConsumed { .. } => ErrorCode::Misuse,
            Self::ColumnCountMismatch { .. } | Self::RowSource { .. } => ErrorCode::Internal,
        }
    }

    /// Whether this is a transient error that may succeed on retry.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Busy | Self::ConnectionLost { .. })
    }

    /// Whether the error simulates a driver failure, as opposed to a mistake
    /// in how the engine was used.
    pub const fn is_simulated(&self) -> bool {
        !matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::InvalidMatchMode { .. }
                | Self::PayloadConsumed { .. }
                | Self::ColumnCountMismatch { .. }
                | Self::RowSource { .. }
        )
    }

    /// Create a connection-lost error.
    pub fn connection_lost(detail: impl Into<String>) -> Self {
        Self::ConnectionLost {
            detail: detail.into(),
        }
    }

    /// Create a syntax error.
    pub fn syntax(token: impl Into<String>) -> Self {
        Self::SyntaxError {
            token: token.into(),
        }
    }

    /// Create a free-form driver error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid-pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, detail: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            detail: detail.to_string(),
        }
    }
}

/// Result type alias using `MockError`.
pub type Result<T> = std::result::Result<T, MockError>;
