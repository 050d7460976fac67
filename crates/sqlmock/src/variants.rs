//! The five concrete expectation kinds and their tagged union.

use std::fmt;

use sqlmock_error::{MockError, Result};
use sqlmock_types::DriverValue;
use tracing::debug;

use crate::fulfillment::{Expectation, Fulfillment, OperationKind};
use crate::matcher::StatementMatcher;
use crate::options::MatchMode;
use crate::result::ExecResult;
use crate::rows::RowProducer;

macro_rules! transaction_expectation {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            state: Fulfillment,
        }

        impl $name {
            /// A pending expectation with no override error.
            pub const fn new() -> Self {
                Self {
                    state: Fulfillment::new(),
                }
            }

            /// Consume this expectation and report the outcome of the call:
            /// the override error if one is installed, otherwise success.
            ///
            /// Meant to be called once, while `fulfilled()` is still false.
            pub fn respond(&mut self) -> Result<()> {
                if !self.state.fulfilled() {
                    self.state.fulfill();
                    debug!(target: "sqlmock.match", kind = %OperationKind::$kind, "expectation fulfilled");
                }
                match self.state.error() {
                    Some(err) => Err(err.clone()),
                    None => Ok(()),
                }
            }
        }

        impl Expectation for $name {
            fn kind(&self) -> OperationKind {
                OperationKind::$kind
            }

            fn fulfillment(&self) -> &Fulfillment {
                &self.state
            }

            fn fulfillment_mut(&mut self) -> &mut Fulfillment {
                &mut self.state
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "expecting transaction {}", OperationKind::$kind)?;
                if let Some(err) = self.state.error() {
                    write!(f, " which should fail with: {err}")?;
                }
                Ok(())
            }
        }
    };
}

transaction_expectation! {
    /// Expected start of a transaction.
    ExpectedBegin => Begin
}

transaction_expectation! {
    /// Expected transaction commit.
    ExpectedCommit => Commit
}

transaction_expectation! {
    /// Expected transaction rollback.
    ExpectedRollback => Rollback
}

/// Expected query returning rows.
#[derive(Debug)]
pub struct ExpectedQuery {
    state: Fulfillment,
    matcher: StatementMatcher,
    rows: Option<Box<dyn RowProducer>>,
}

impl ExpectedQuery {
    /// Compile `pattern` in [`MatchMode::Search`] mode.
    pub fn new(
        pattern: &str,
        args: Vec<DriverValue>,
        rows: impl RowProducer + 'static,
    ) -> Result<Self> {
        Self::with_mode(pattern, MatchMode::default(), args, rows)
    }

    /// Compile `pattern` in the given mode. Fails on an invalid pattern.
    pub fn with_mode(
        pattern: &str,
        mode: MatchMode,
        args: Vec<DriverValue>,
        rows: impl RowProducer + 'static,
    ) -> Result<Self> {
        Ok(Self {
            state: Fulfillment::new(),
            matcher: StatementMatcher::with_mode(pattern, mode, args)?,
            rows: Some(Box::new(rows)),
        })
    }

    /// Statement pattern and expected arguments.
    pub const fn matcher(&self) -> &StatementMatcher {
        &self.matcher
    }

    /// See [`StatementMatcher::query_matches`].
    pub fn query_matches(&self, sql: &str) -> bool {
        self.matcher.query_matches(sql)
    }

    /// See [`StatementMatcher::args_matches`].
    pub fn args_matches(&self, actual: &[DriverValue]) -> bool {
        self.matcher.args_matches(actual)
    }

    /// Hand out the row producer. It can be taken once.
    pub fn take_rows(&mut self) -> Result<Box<dyn RowProducer>> {
        self.rows
            .take()
            .ok_or(MockError::PayloadConsumed { what: "query" })
    }

    /// Consume this expectation and report the outcome of the call: the
    /// override error if one is installed, otherwise the row producer.
    ///
    /// Meant to be called once, while `fulfilled()` is still false. A second
    /// call finds the rows already handed out and fails with
    /// [`MockError::PayloadConsumed`].
    pub fn respond(&mut self) -> Result<Box<dyn RowProducer>> {
        if !self.state.fulfilled() {
            self.state.fulfill();
            debug!(
                target: "sqlmock.match",
                kind = %OperationKind::Query,
                pattern = %self.matcher.pattern(),
                failing = self.state.error().is_some(),
                "expectation fulfilled"
            );
        }
        if let Some(err) = self.state.error() {
            return Err(err.clone());
        }
        self.take_rows()
    }
}

impl Expectation for ExpectedQuery {
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }

    fn fulfillment(&self) -> &Fulfillment {
        &self.state
    }

    fn fulfillment_mut(&mut self) -> &mut Fulfillment {
        &mut self.state
    }
}

impl fmt::Display for ExpectedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expecting Query {}", self.matcher)?;
        if let Some(err) = self.state.error() {
            write!(f, " which should fail with: {err}")?;
        }
        Ok(())
    }
}

/// Expected statement that modifies rows.
#[derive(Debug, Clone)]
pub struct ExpectedExec {
    state: Fulfillment,
    matcher: StatementMatcher,
    result: ExecResult,
}

impl ExpectedExec {
    /// Compile `pattern` in [`MatchMode::Search`] mode.
    pub fn new(pattern: &str, args: Vec<DriverValue>, result: ExecResult) -> Result<Self> {
        Self::with_mode(pattern, MatchMode::default(), args, result)
    }

    /// Compile `pattern` in the given mode. Fails on an invalid pattern.
    pub fn with_mode(
        pattern: &str,
        mode: MatchMode,
        args: Vec<DriverValue>,
        result: ExecResult,
    ) -> Result<Self> {
        Ok(Self {
            state: Fulfillment::new(),
            matcher: StatementMatcher::with_mode(pattern, mode, args)?,
            result,
        })
    }

    /// Statement pattern and expected arguments.
    pub const fn matcher(&self) -> &StatementMatcher {
        &self.matcher
    }

    /// See [`StatementMatcher::query_matches`].
    pub fn query_matches(&self, sql: &str) -> bool {
        self.matcher.query_matches(sql)
    }

    /// See [`StatementMatcher::args_matches`].
    pub fn args_matches(&self, actual: &[DriverValue]) -> bool {
        self.matcher.args_matches(actual)
    }

    /// The descriptor handed back on a successful match.
    pub const fn result(&self) -> ExecResult {
        self.result
    }

    /// Consume this expectation and report the outcome of the call: the
    /// override error if one is installed, otherwise the result descriptor.
    ///
    /// Meant to be called once, while `fulfilled()` is still false.
    pub fn respond(&mut self) -> Result<ExecResult> {
        if !self.state.fulfilled() {
            self.state.fulfill();
            debug!(
                target: "sqlmock.match",
                kind = %OperationKind::Exec,
                pattern = %self.matcher.pattern(),
                failing = self.state.error().is_some(),
                "expectation fulfilled"
            );
        }
        match self.state.error() {
            Some(err) => Err(err.clone()),
            None => Ok(self.result),
        }
    }
}

impl Expectation for ExpectedExec {
    fn kind(&self) -> OperationKind {
        OperationKind::Exec
    }

    fn fulfillment(&self) -> &Fulfillment {
        &self.state
    }

    fn fulfillment_mut(&mut self) -> &mut Fulfillment {
        &mut self.state
    }
}

impl fmt::Display for ExpectedExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expecting Exec {}", self.matcher)?;
        match self.state.error() {
            Some(err) => write!(f, " which should fail with: {err}"),
            None => write!(f, " returning {}", self.result),
        }
    }
}

/// Any one of the five expectation kinds.
#[derive(Debug)]
pub enum AnyExpectation {
    Begin(ExpectedBegin),
    Commit(ExpectedCommit),
    Rollback(ExpectedRollback),
    Query(ExpectedQuery),
    Exec(ExpectedExec),
}

impl AnyExpectation {
    /// The statement matcher, for the kinds that carry one.
    pub const fn statement_matcher(&self) -> Option<&StatementMatcher> {
        match self {
            Self::Query(e) => Some(e.matcher()),
            Self::Exec(e) => Some(e.matcher()),
            Self::Begin(_) | Self::Commit(_) | Self::Rollback(_) => None,
        }
    }

    /// The query expectation, if this is one.
    pub fn as_query_mut(&mut self) -> Option<&mut ExpectedQuery> {
        match self {
            Self::Query(e) => Some(e),
            _ => None,
        }
    }

    /// The exec expectation, if this is one.
    pub fn as_exec_mut(&mut self) -> Option<&mut ExpectedExec> {
        match self {
            Self::Exec(e) => Some(e),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Expectation {
        match self {
            Self::Begin(e) => e,
            Self::Commit(e) => e,
            Self::Rollback(e) => e,
            Self::Query(e) => e,
            Self::Exec(e) => e,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Expectation {
        match self {
            Self::Begin(e) => e,
            Self::Commit(e) => e,
            Self::Rollback(e) => e,
            Self::Query(e) => e,
            Self::Exec(e) => e,
        }
    }
}

impl Expectation for AnyExpectation {
    fn kind(&self) -> OperationKind {
        self.inner().kind()
    }

    fn fulfillment(&self) -> &Fulfillment {
        self.inner().fulfillment()
    }

    fn fulfillment_mut(&mut self) -> &mut Fulfillment {
        self.inner_mut().fulfillment_mut()
    }
}

impl fmt::Display for AnyExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for AnyExpectation {
                fn from(e: $ty) -> Self {
                    Self::$variant(e)
                }
            }
        )+
    };
}

impl_from_variant! {
    ExpectedBegin => Begin,
    ExpectedCommit => Commit,
    ExpectedRollback => Rollback,
    ExpectedQuery => Query,
    ExpectedExec => Exec,
}
