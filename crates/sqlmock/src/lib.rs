//! Expectation matching engine for a mock database driver.
//!
//! A test declares the database operations it expects (begin, commit,
//! rollback, query, exec). For every call the mock driver intercepts, the
//! dispatcher that owns those expectations asks this crate whether a given
//! expectation accepts the call:
//!
//! - [`StatementMatcher::query_matches`] checks the statement text against a
//!   compiled pattern, by default anywhere in the text (see [`MatchMode`]);
//! - [`StatementMatcher::args_matches`] checks the arguments position by
//!   position (see [`value_matches`] for the per-kind rules).
//!
//! On a match the dispatcher calls `respond()` (or [`Expectation::fulfill`]
//! and reads the payload itself). An error installed with
//! [`Expectation::set_error`] takes precedence over the payload.
//!
//! Choosing which expectation to try next, ordering, and reporting unfulfilled
//! expectations are the dispatcher's job. Mutation needs `&mut`, so a
//! dispatcher shared across threads must hold its expectations behind a lock.

pub mod args;
pub mod fulfillment;
pub mod matcher;
pub mod options;
pub mod result;
pub mod rows;
pub mod variants;

pub use args::args_from_iter;
pub use fulfillment::{Expectation, Fulfillment, OperationKind};
pub use matcher::{StatementMatcher, value_matches};
pub use options::MatchMode;
pub use result::ExecResult;
pub use rows::{MockRows, RowProducer};
pub use sqlmock_error::{ErrorCode, MockError, Result};
pub use sqlmock_types::{DriverValue, ValueFamily, ValueKind};
pub use variants::{
    AnyExpectation, ExpectedBegin, ExpectedCommit, ExpectedExec, ExpectedQuery, ExpectedRollback,
};
