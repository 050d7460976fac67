//! Fulfillment state shared by every expectation.

use std::fmt;

use sqlmock_error::MockError;

/// The five kinds of database operation an expectation can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Begin,
    Commit,
    Rollback,
    Query,
    Exec,
}

impl OperationKind {
    /// Name used in diagnostics, e.g. `"Query"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "Begin",
            Self::Commit => "Commit",
            Self::Rollback => "Rollback",
            Self::Query => "Query",
            Self::Exec => "Exec",
        }
    }

    /// Whether expectations of this kind carry a statement matcher.
    pub const fn has_statement(self) -> bool {
        matches!(self, Self::Query | Self::Exec)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consumed flag plus an optional override error.
///
/// The flag only ever goes from `false` to `true`. The override error is what
/// the dispatcher returns instead of the normal payload once this expectation
/// is matched.
#[derive(Debug, Clone, Default)]
pub struct Fulfillment {
    triggered: bool,
    error: Option<MockError>,
}

impl Fulfillment {
    /// Pending, with no override error.
    pub const fn new() -> Self {
        Self {
            triggered: false,
            error: None,
        }
    }

    /// Whether a call has consumed this expectation.
    #[inline]
    pub const fn fulfilled(&self) -> bool {
        self.triggered
    }

    /// Mark as consumed. Idempotent.
    #[inline]
    pub fn fulfill(&mut self) {
        self.triggered = true;
    }

    /// Replace the override error, whatever the current state.
    pub fn set_error(&mut self, err: MockError) {
        self.error = Some(err);
    }

    /// The installed override error, if any.
    pub const fn error(&self) -> Option<&MockError> {
        self.error.as_ref()
    }

    /// Move the override error out, leaving none installed.
    pub fn take_error(&mut self) -> Option<MockError> {
        self.error.take()
    }
}

/// Capability set every expectation variant exposes to the dispatcher.
///
/// Implementors only provide access to their embedded [`Fulfillment`]; the
/// lifecycle operations are shared.
pub trait Expectation: fmt::Display {
    /// Which operation this expectation stands for.
    fn kind(&self) -> OperationKind;

    /// The embedded fulfillment state.
    fn fulfillment(&self) -> &Fulfillment;

    /// Mutable access to the embedded fulfillment state.
    fn fulfillment_mut(&mut self) -> &mut Fulfillment;

    /// Whether a call has already consumed this expectation.
    fn fulfilled(&self) -> bool {
        self.fulfillment().fulfilled()
    }

    /// Install an error to be returned instead of the normal payload.
    fn set_error(&mut self, err: MockError) {
        self.fulfillment_mut().set_error(err);
    }

    /// The installed override error, if any.
    fn error(&self) -> Option<&MockError> {
        self.fulfillment().error()
    }

    /// Pending -> Fulfilled. There is no way back.
    fn fulfill(&mut self) {
        self.fulfillment_mut().fulfill();
    }
}
