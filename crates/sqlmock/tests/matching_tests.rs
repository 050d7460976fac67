//! Integration tests for the expectation engine, driven the way a mock
//! driver's dispatch queue uses it.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use sqlmock::{
    AnyExpectation, DriverValue, ExecResult, Expectation, ExpectedBegin, ExpectedCommit,
    ExpectedExec, ExpectedQuery, ExpectedRollback, MatchMode, MockError, MockRows, RowProducer,
    StatementMatcher, args, value_matches,
};

// ===========================================================================
// Minimal in-order dispatcher, standing in for the driver's queue.
// ===========================================================================

#[derive(Debug, PartialEq)]
enum Outcome {
    Rows(usize),
    Exec(ExecResult),
    Tx,
}

fn dispatch(
    queue: &Mutex<Vec<AnyExpectation>>,
    kind: sqlmock::OperationKind,
    sql: &str,
    actual: &[DriverValue],
) -> Result<Outcome, String> {
    let mut queue = queue.lock().unwrap();
    let next = queue
        .iter_mut()
        .find(|e| !e.fulfilled())
        .ok_or_else(|| format!("unexpected {kind} call: all expectations were already fulfilled"))?;
    if next.kind() != kind {
        return Err(format!("call to {kind} was not expected, next is {next}"));
    }
    if let Some(m) = next.statement_matcher() {
        if !m.matches(sql, actual) {
            return Err(format!("call '{sql}' does not match {next}"));
        }
    }
    let outcome = match next {
        AnyExpectation::Query(q) => q.respond().map(|mut rows| {
            let mut n = 0;
            while let Some(Ok(_)) = rows.next_row() {
                n += 1;
            }
            Outcome::Rows(n)
        }),
        AnyExpectation::Exec(e) => e.respond().map(Outcome::Exec),
        AnyExpectation::Begin(e) => e.respond().map(|()| Outcome::Tx),
        AnyExpectation::Commit(e) => e.respond().map(|()| Outcome::Tx),
        AnyExpectation::Rollback(e) => e.respond().map(|()| Outcome::Tx),
    };
    outcome.map_err(|e| e.to_string())
}

fn unfulfilled(queue: &Mutex<Vec<AnyExpectation>>) -> Vec<String> {
    queue
        .lock()
        .unwrap()
        .iter()
        .filter(|e| !e.fulfilled())
        .map(ToString::to_string)
        .collect()
}

// ===========================================================================
// 1. SCENARIOS
// ===========================================================================

#[test]
fn anchored_select_with_one_integer_argument() {
    let q = ExpectedQuery::new(
        "^SELECT name FROM users$",
        args![1_i64],
        MockRows::new(["name"]),
    )
    .unwrap();
    assert!(q.query_matches("SELECT name FROM users"));
    assert!(q.args_matches(&args![1_i64]));
}

#[test]
fn differing_second_text_argument() {
    let m = StatementMatcher::new("INSERT", args!["a", "b"]).unwrap();
    assert!(!m.args_matches(&args!["a", "c"]));
}

#[test]
fn no_expected_arguments_but_one_supplied() {
    let m = StatementMatcher::new("SELECT", args![]).unwrap();
    assert!(!m.args_matches(&args![5_i64]));
}

#[test]
fn override_error_observed_after_fulfillment() {
    let mut q = ExpectedQuery::new("SELECT", args![], MockRows::default()).unwrap();
    assert!(!q.fulfilled());

    let e = MockError::UniqueViolation {
        columns: "users.email".to_owned(),
    };
    q.set_error(e.clone());
    q.fulfill();

    assert!(q.fulfilled());
    assert_eq!(q.error(), Some(&e));
}

// ===========================================================================
// 2. DISPATCH WALKTHROUGH
// ===========================================================================

#[test]
fn transaction_walkthrough() {
    let rows = MockRows::new(["id", "title"])
        .add_row(args![1_i64, "one"])
        .unwrap()
        .add_row(args![2_i64, "two"])
        .unwrap();
    let queue = Mutex::new(vec![
        ExpectedBegin::new().into(),
        ExpectedQuery::new("SELECT (.+) FROM articles WHERE id = ?", args![5_i32], rows)
            .unwrap()
            .into(),
        ExpectedExec::new(
            "UPDATE articles SET title",
            args!["new", 5_u64],
            ExecResult::affected(1),
        )
        .unwrap()
        .into(),
        ExpectedCommit::new().into(),
    ]);

    use sqlmock::OperationKind::*;
    assert_eq!(dispatch(&queue, Begin, "", &[]), Ok(Outcome::Tx));
    assert_eq!(
        dispatch(
            &queue,
            Query,
            "SELECT id, title FROM articles WHERE id = ?",
            &args![5_i64]
        ),
        Ok(Outcome::Rows(2))
    );
    assert_eq!(unfulfilled(&queue).len(), 2);
    assert_eq!(
        dispatch(
            &queue,
            Exec,
            "UPDATE articles SET title = ? WHERE id = ?",
            &args!["new", 5_u8]
        ),
        Ok(Outcome::Exec(ExecResult::affected(1)))
    );
    assert_eq!(dispatch(&queue, Commit, "", &[]), Ok(Outcome::Tx));
    assert!(unfulfilled(&queue).is_empty());

    let err = dispatch(&queue, Rollback, "", &[]).unwrap_err();
    assert!(err.contains("already fulfilled"), "{err}");
}

#[test]
fn failing_exec_then_rollback() {
    let mut exec = ExpectedExec::new("INSERT INTO users", args!["bob"], ExecResult::new(1, 1))
        .unwrap();
    exec.set_error(MockError::NotNullViolation {
        column: "email".to_owned(),
    });
    let queue = Mutex::new(vec![
        ExpectedBegin::new().into(),
        exec.into(),
        ExpectedRollback::new().into(),
    ]);

    use sqlmock::OperationKind::*;
    dispatch(&queue, Begin, "", &[]).unwrap();
    let err = dispatch(&queue, Exec, "INSERT INTO users (name) VALUES (?)", &args!["bob"])
        .unwrap_err();
    assert_eq!(err, "NOT NULL constraint failed: email");
    dispatch(&queue, Rollback, "", &[]).unwrap();
    assert!(unfulfilled(&queue).is_empty());
}

#[test]
fn mismatch_leaves_expectation_pending() {
    let queue = Mutex::new(vec![
        ExpectedExec::new("DELETE FROM t", args![1_i64], ExecResult::affected(1))
            .unwrap()
            .into(),
    ]);
    let err = dispatch(
        &queue,
        sqlmock::OperationKind::Exec,
        "DELETE FROM t WHERE id = ?",
        &args!["1"],
    )
    .unwrap_err();
    assert!(err.starts_with("call 'DELETE FROM t WHERE id = ?' does not match"), "{err}");
    assert_eq!(
        unfulfilled(&queue),
        ["expecting Exec matching 'DELETE FROM t' (search) with args [1] returning last_insert_id=0 rows_affected=1"]
    );
}

#[test]
fn kind_mismatch_is_reported_by_the_dispatcher() {
    let queue = Mutex::new(vec![ExpectedCommit::new().into()]);
    let err = dispatch(&queue, sqlmock::OperationKind::Rollback, "", &[]).unwrap_err();
    assert_eq!(
        err,
        "call to Rollback was not expected, next is expecting transaction Commit"
    );
}

// ===========================================================================
// 3. MATCHING PROPERTIES
// ===========================================================================

#[test]
fn other_kind_values_match_on_kind_alone() {
    let a = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();
    let b = Utc.with_ymd_and_hms(2030, 7, 8, 9, 10, 11).unwrap();
    let m = StatementMatcher::new("INSERT", args![a, vec![1_u8, 2], true]).unwrap();
    assert!(m.args_matches(&args![b, vec![9_u8], false]));
    assert!(!m.args_matches(&args![b, "blob", false]));
}

#[test]
fn pattern_is_searched_not_anchored() {
    let m = StatementMatcher::new("SELECT", args![]).unwrap();
    assert!(m.query_matches("SELECT * FROM t"));
    assert!(m.query_matches("-- SELECT inside comment"));

    let strict = StatementMatcher::with_mode("SELECT", MatchMode::Anchored, args![]).unwrap();
    assert!(!strict.query_matches("SELECT * FROM t"));
    assert!(strict.query_matches("SELECT"));
}

fn primitive_value() -> impl Strategy<Value = DriverValue> {
    prop_oneof![
        any::<i8>().prop_map(DriverValue::I8),
        any::<i64>().prop_map(DriverValue::I64),
        any::<u16>().prop_map(DriverValue::U16),
        any::<u64>().prop_map(DriverValue::U64),
        (-1.0e9_f64..1.0e9).prop_map(DriverValue::F64),
        "[a-z]{0,8}".prop_map(DriverValue::Text),
    ]
}

proptest! {
    #[test]
    fn prop_identical_lists_match(values in prop::collection::vec(primitive_value(), 0..8)) {
        let m = StatementMatcher::new("SELECT", values.clone()).unwrap();
        prop_assert!(m.args_matches(&values));
    }

    #[test]
    fn prop_length_mismatch_never_matches(
        values in prop::collection::vec(primitive_value(), 0..8),
        extra in primitive_value(),
    ) {
        let m = StatementMatcher::new("SELECT", values.clone()).unwrap();
        let mut longer = values.clone();
        longer.push(extra);
        prop_assert!(!m.args_matches(&longer));
        if let Some((_, shorter)) = values.split_last() {
            prop_assert!(!m.args_matches(shorter));
        }
    }

    #[test]
    fn prop_signed_width_is_normalized(v in any::<i8>()) {
        prop_assert!(value_matches(&DriverValue::I8(v), &DriverValue::I64(i64::from(v))));
        prop_assert!(value_matches(&DriverValue::I64(i64::from(v)), &DriverValue::I16(i16::from(v))));
    }

    #[test]
    fn prop_unsigned_width_is_normalized(v in any::<u8>()) {
        prop_assert!(value_matches(&DriverValue::U8(v), &DriverValue::U64(u64::from(v))));
    }

    #[test]
    fn prop_float_width_is_normalized(v in any::<f32>().prop_filter("not NaN", |f| !f.is_nan())) {
        prop_assert!(value_matches(&DriverValue::F32(v), &DriverValue::F64(f64::from(v))));
    }

    #[test]
    fn prop_number_never_matches_text(v in any::<i64>(), s in ".{0,8}") {
        prop_assert!(!value_matches(&DriverValue::I64(v), &DriverValue::Text(s.clone())));
        prop_assert!(!value_matches(&DriverValue::Text(s), &DriverValue::I64(v)));
    }

    #[test]
    fn prop_fulfillment_is_monotonic(ops in prop::collection::vec(0_u8..3, 0..16)) {
        let mut e = ExpectedBegin::new();
        let mut seen = false;
        for op in ops {
            match op {
                0 => e.fulfill(),
                1 => e.set_error(MockError::Busy),
                _ => {}
            }
            if seen {
                prop_assert!(e.fulfilled());
            }
            seen = e.fulfilled();
        }
    }
}
