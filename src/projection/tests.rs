use std::sync::Arc;

use arrow::array::Int32Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::*;

fn three_column_schema() -> Schema {
    Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new("b", DataType::Int32, false),
        Field::new("c", DataType::Int32, false),
    ])
}

fn three_column_batch() -> RecordBatch {
    RecordBatch::try_new(
        Arc::new(three_column_schema()),
        vec![
            Arc::new(Int32Array::from(vec![1, 2])),
            Arc::new(Int32Array::from(vec![10, 20])),
            Arc::new(Int32Array::from(vec![100, 200])),
        ],
    )
    .unwrap()
}

#[test]
fn test_resolve_keeps_input_order() {
    let schema = three_column_schema();
    // Allow-list order must not matter
    let projection = Projection::resolve(&["c", "a"], &schema).unwrap();

    assert_eq!(projection.indices(), &[0, 2]);
    assert_eq!(projection.column_names(), vec!["a", "c"]);
}

#[test]
fn test_resolve_ignores_absent_names() {
    let schema = three_column_schema();
    let projection = Projection::resolve(&["a", "nope", "c"], &schema).unwrap();

    assert_eq!(projection.num_columns(), 2);
    assert_eq!(projection.column_names(), vec!["a", "c"]);
}

#[test]
fn test_resolve_empty_intersection() {
    let schema = three_column_schema();
    let projection = Projection::resolve(&["x", "y"], &schema).unwrap();
    assert_eq!(projection.num_columns(), 0);
}

#[test]
fn test_project_batch() {
    let batch = three_column_batch();
    let projection = Projection::resolve(&["b"], batch.schema().as_ref()).unwrap();

    let projected = projection.project_batch(&batch).unwrap();
    assert_eq!(projected.num_columns(), 1);
    assert_eq!(projected.num_rows(), 2);
    assert_eq!(projected.schema().field(0).name(), "b");
}

#[test]
fn test_projection_is_idempotent() {
    let batch = three_column_batch();
    let first = Projection::resolve(&["a", "b"], batch.schema().as_ref()).unwrap();
    let once = first.project_batch(&batch).unwrap();

    // Re-resolving the same allow-list against the projected schema and
    // applying it again must change nothing.
    let second = Projection::resolve(&["a", "b"], once.schema().as_ref()).unwrap();
    let twice = second.project_batch(&once).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_identity_keeps_everything() {
    let batch = three_column_batch();
    let projection = Projection::identity(batch.schema().as_ref());

    let projected = projection.project_batch(&batch).unwrap();
    assert_eq!(projected, batch);
}

#[test]
fn test_read_set_unions_in_order() {
    let columns = read_set(&[&["a", "b"], &["b", "c"], &["a", "d"]]);
    assert_eq!(columns, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_read_set_of_empty_groups() {
    assert!(read_set(&[]).is_empty());
    assert!(read_set(&[&[], &[]]).is_empty());
}
