//! Scan Access Path Tests
//!
//! Tests for single-range scan invariants:
//! - Index bounds position and terminate ordered scans
//! - Out-of-range bound literals degenerate instead of erroring
//! - A composite prefix scan equals the filtered full scan
//! - Cursors reset cleanly and re-execute
//! - Graph sources full-scan their selected namespace

use rangescan::executor::{ExecContext, ScanCursor};
use rangescan::planner::{AccessPlanSummary, ColumnRef, Comparison, RangeVariable};
use rangescan::schema::{ColumnDef, ColumnType, Row, Value};
use rangescan::source::{GraphMode, GraphView, RangeSource, Table};
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn orders(ty: ColumnType) -> (Table, usize) {
    let mut t = Table::new(
        "orders",
        vec![
            ColumnDef::new("id", ColumnType::Int),
            ColumnDef::new("customer", ty),
            ColumnDef::new("qty", ColumnType::Int),
        ],
    );
    for (id, (cust, qty)) in [(1, 5), (2, 3), (1, 8), (3, 1), (2, 9)].iter().enumerate() {
        t.insert(vec![
            Value::Int(id as i64),
            Value::Int(*cust),
            Value::Int(*qty),
        ])
        .unwrap();
    }
    let ix = t.add_index("ix_customer", vec![1]);
    (t, ix)
}

fn drain(rv: &RangeVariable) -> Vec<Row> {
    let mut ctx = ExecContext::new(1);
    let mut scan = ScanCursor::new(rv);
    let mut out = Vec::new();
    while scan.advance(&mut ctx).unwrap() {
        out.push(ctx.row(rv.range_position).unwrap().clone());
    }
    out
}

// =============================================================================
// Bound Positioning Tests
// =============================================================================

/// An equality bound visits only the matching run, in index order.
#[test]
fn test_equality_bound_visits_matching_run() {
    let (t, ix) = orders(ColumnType::Int);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::eq(ColumnRef::new(0, 1), Value::Int(2)),
        ix,
        false,
    )
    .unwrap();

    let rows = drain(&rv);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[1] == Value::Int(2)));
}

/// Lower and upper bounds on the same column combine into a band scan.
#[test]
fn test_band_scan() {
    let (t, ix) = orders(ColumnType::Int);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::gte(ColumnRef::new(0, 1), Value::Int(2)),
        ix,
        false,
    )
    .unwrap();
    rv.add_index_condition(
        Comparison::lt(ColumnRef::new(0, 1), Value::Int(3)),
        ix,
        false,
    )
    .unwrap();

    let rows = drain(&rv);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[1] == Value::Int(2)));
}

/// A float bound literal converts exactly before seeking.
#[test]
fn test_float_literal_bound_converts() {
    let (t, ix) = orders(ColumnType::Int);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::eq(ColumnRef::new(0, 1), Value::Float(3.0)),
        ix,
        false,
    )
    .unwrap();
    assert_eq!(drain(&rv).len(), 1);
}

/// An inexact float equality bound fails conversion as a type mismatch.
#[test]
fn test_inexact_float_bound_is_type_mismatch() {
    let (t, ix) = orders(ColumnType::Int);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::eq(ColumnRef::new(0, 1), Value::Float(2.5)),
        ix,
        false,
    )
    .unwrap();

    let mut ctx = ExecContext::new(1);
    let mut scan = ScanCursor::new(&rv);
    let err = scan.advance(&mut ctx).unwrap_err();
    assert!(!err.is_fatal());
}

// =============================================================================
// Bound Degeneracy Tests
// =============================================================================

/// A lower bound below the column's representable range still qualifies
/// every non-null row.
#[test]
fn test_below_range_lower_bound_scans_all() {
    let (t, ix) = orders(ColumnType::TinyInt);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::gt(ColumnRef::new(0, 1), Value::Int(-100_000)),
        ix,
        false,
    )
    .unwrap();
    assert_eq!(drain(&rv).len(), 5);
}

/// An equality bound above the column's range can match nothing.
#[test]
fn test_above_range_equality_is_empty() {
    let (t, ix) = orders(ColumnType::TinyInt);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::eq(ColumnRef::new(0, 1), Value::Int(100_000)),
        ix,
        false,
    )
    .unwrap();
    assert!(drain(&rv).is_empty());
}

/// A lower bound above the column's range can match nothing either.
#[test]
fn test_above_range_lower_bound_is_empty() {
    let (t, ix) = orders(ColumnType::TinyInt);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::gte(ColumnRef::new(0, 1), Value::Int(100_000)),
        ix,
        false,
    )
    .unwrap();
    assert!(drain(&rv).is_empty());
}

// =============================================================================
// Composite Prefix Tests
// =============================================================================

/// A two-column exact prefix scan returns the same rows as the equivalent
/// residual-filtered full scan.
#[test]
fn test_prefix_scan_equals_filtered_full_scan() {
    let mut t = Table::new(
        "t",
        vec![
            ColumnDef::new("a", ColumnType::Int),
            ColumnDef::new("b", ColumnType::Int),
            ColumnDef::new("v", ColumnType::Int),
        ],
    );
    for (a, b, v) in [(1, 1, 10), (1, 2, 20), (1, 2, 21), (2, 2, 30), (2, 3, 40)] {
        t.insert(vec![Value::Int(a), Value::Int(b), Value::Int(v)])
            .unwrap();
    }
    let ix = t.add_index("ix_ab", vec![0, 1]);
    let t = Arc::new(t);

    let mut indexed = RangeVariable::new(RangeSource::table(t.clone()), 0);
    indexed
        .add_index_conditions(
            vec![
                Comparison::eq(ColumnRef::new(0, 0), Value::Int(1)),
                Comparison::eq(ColumnRef::new(0, 1), Value::Int(2)),
            ],
            ix,
            true,
        )
        .unwrap();

    let mut filtered = RangeVariable::new(RangeSource::table(t), 0);
    filtered.add_condition(Comparison::eq(ColumnRef::new(0, 0), Value::Int(1)), false);
    filtered.add_condition(Comparison::eq(ColumnRef::new(0, 1), Value::Int(2)), false);

    let mut via_index: Vec<Value> = drain(&indexed).iter().map(|r| r[2].clone()).collect();
    let mut via_filter: Vec<Value> = drain(&filtered).iter().map(|r| r[2].clone()).collect();
    via_index.sort_by_key(|v| v.to_string());
    via_filter.sort_by_key(|v| v.to_string());
    assert_eq!(via_index, via_filter);
    assert_eq!(via_index.len(), 2);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

/// A scan re-executes identically after reset; reset is idempotent.
#[test]
fn test_reset_and_reexecute() {
    let (t, ix) = orders(ColumnType::Int);
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.add_index_condition(
        Comparison::gte(ColumnRef::new(0, 1), Value::Int(2)),
        ix,
        false,
    )
    .unwrap();

    let mut ctx = ExecContext::new(1);
    let mut scan = ScanCursor::new(&rv);
    let mut first = Vec::new();
    while scan.advance(&mut ctx).unwrap() {
        first.push(ctx.row(0).unwrap().clone());
    }
    scan.reset(&mut ctx);
    scan.reset(&mut ctx);
    let mut second = Vec::new();
    while scan.advance(&mut ctx).unwrap() {
        second.push(ctx.row(0).unwrap().clone());
    }
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

/// After exhaustion the cursor stays exhausted and the context slot is clear.
#[test]
fn test_exhausted_scan_stays_exhausted() {
    let (t, _) = orders(ColumnType::Int);
    let rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);

    let mut ctx = ExecContext::new(1);
    let mut scan = ScanCursor::new(&rv);
    while scan.advance(&mut ctx).unwrap() {}
    assert!(ctx.row(0).is_none());
    assert!(!scan.advance(&mut ctx).unwrap());
}

// =============================================================================
// Outer Row Eligibility Tests
// =============================================================================

fn null_keyed() -> (Table, usize) {
    let mut t = Table::new(
        "t",
        vec![
            ColumnDef::new("id", ColumnType::Int),
            ColumnDef::new("v", ColumnType::Int),
        ],
    );
    t.insert(vec![Value::Int(0), Value::Null]).unwrap();
    t.insert(vec![Value::Int(1), Value::Null]).unwrap();
    let ix = t.add_index("ix_v", vec![1]);
    (t, ix)
}

fn not_null_keyed() -> (Table, usize) {
    let mut t = Table::new(
        "t",
        vec![
            ColumnDef::new("id", ColumnType::Int),
            ColumnDef::new("v", ColumnType::Int),
        ],
    );
    t.insert(vec![Value::Int(0), Value::Int(7)]).unwrap();
    let ix = t.add_index("ix_v", vec![1]);
    (t, ix)
}

/// A join-classified NOT NULL bound that matches nothing keeps the
/// preserving scan's outer row: one placeholder is emitted.
#[test]
fn test_join_not_null_bound_keeps_placeholder() {
    let (t, ix) = null_keyed();
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.set_join_type(true, false);
    rv.add_index_condition(Comparison::not_null(ColumnRef::new(0, 1)), ix, true)
        .unwrap();

    let rows = drain(&rv);
    assert_eq!(rows, vec![vec![Value::Null, Value::Null]]);
}

/// The same NOT NULL bound classified from the WHERE clause suppresses the
/// placeholder: its NULL column could never satisfy the originating
/// predicate.
#[test]
fn test_where_not_null_bound_suppresses_placeholder() {
    let (t, ix) = null_keyed();
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.set_join_type(true, false);
    rv.add_index_condition(Comparison::not_null(ColumnRef::new(0, 1)), ix, false)
        .unwrap();

    assert!(drain(&rv).is_empty());
}

/// A join-classified IS NULL end bound that matches nothing keeps the
/// outer row.
#[test]
fn test_join_is_null_bound_keeps_placeholder() {
    let (t, ix) = not_null_keyed();
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.set_join_type(true, false);
    rv.add_index_condition(Comparison::is_null(ColumnRef::new(0, 1)), ix, true)
        .unwrap();

    let rows = drain(&rv);
    assert_eq!(rows, vec![vec![Value::Null, Value::Null]]);
}

/// A where-classified IS NULL end bound that matches nothing yields no
/// placeholder.
#[test]
fn test_where_is_null_bound_suppresses_placeholder() {
    let (t, ix) = not_null_keyed();
    let mut rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);
    rv.set_join_type(true, false);
    rv.add_index_condition(Comparison::is_null(ColumnRef::new(0, 1)), ix, false)
        .unwrap();

    assert!(drain(&rv).is_empty());
}

// =============================================================================
// Graph Source Tests
// =============================================================================

/// A graph range variable full-scans exactly its selected namespace.
#[test]
fn test_graph_scan_selects_one_namespace() {
    let mut g = GraphView::new(
        "net",
        vec![
            ColumnDef::new("vid", ColumnType::Int),
            ColumnDef::new("label", ColumnType::Text),
        ],
        vec![ColumnDef::new("eid", ColumnType::Int)],
        Vec::new(),
    );
    g.table_mut(GraphMode::Vertices)
        .insert(vec![Value::Int(1), Value::Text("a".into())])
        .unwrap();
    g.table_mut(GraphMode::Vertices)
        .insert(vec![Value::Int(2), Value::Text("b".into())])
        .unwrap();
    g.table_mut(GraphMode::Edges)
        .insert(vec![Value::Int(9)])
        .unwrap();
    let g = Arc::new(g);

    let vertices = RangeVariable::new(RangeSource::graph(g.clone(), GraphMode::Vertices), 0);
    assert_eq!(drain(&vertices).len(), 2);

    let edges = RangeVariable::new(RangeSource::graph(g, GraphMode::Edges), 0);
    assert_eq!(drain(&edges).len(), 1);
}

/// Residual predicates still apply to graph scans.
#[test]
fn test_graph_scan_applies_where_residual() {
    let mut g = GraphView::new(
        "net",
        vec![ColumnDef::new("vid", ColumnType::Int)],
        Vec::new(),
        Vec::new(),
    );
    for v in [1, 2, 3] {
        g.table_mut(GraphMode::Vertices)
            .insert(vec![Value::Int(v)])
            .unwrap();
    }

    let mut rv = RangeVariable::new(
        RangeSource::graph(Arc::new(g), GraphMode::Vertices),
        0,
    );
    rv.add_condition(Comparison::gt(ColumnRef::new(0, 0), Value::Int(1)), false);
    assert_eq!(drain(&rv).len(), 2);
}

// =============================================================================
// Plan Summary Tests
// =============================================================================

/// The plan summary distinguishes full scans from index-driven ones.
#[test]
fn test_plan_summary_access_kinds() {
    let (t, ix) = orders(ColumnType::Int);
    let t = Arc::new(t);

    let unbounded = RangeVariable::new(RangeSource::table(t.clone()), 0).with_alias("o");
    let summary = AccessPlanSummary::describe(&unbounded);
    assert_eq!(summary.access, "FULL SCAN");
    assert_eq!(summary.alias.as_deref(), Some("o"));

    let mut bounded = RangeVariable::new(RangeSource::table(t), 0);
    bounded
        .add_index_condition(
            Comparison::eq(ColumnRef::new(0, 1), Value::Int(2)),
            ix,
            false,
        )
        .unwrap();
    let summary = AccessPlanSummary::describe(&bounded);
    assert_eq!(summary.access, "INDEX PRED");
    assert_eq!(summary.index, "ix_customer");
    assert!(summary.to_string().contains("INDEX PRED"));
}
