use arrow::array::{Array, BooleanArray, ListArray, UInt64Array};
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// Get a required Boolean column by name.
pub(super) fn get_boolean_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a BooleanArray, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not Boolean", name)))
}

/// Get a required UInt64 column by name.
pub(super) fn get_uint64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a UInt64Array, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<UInt64Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not UInt64", name)))
}

/// Get a required List column by name.
pub(super) fn get_list_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a ListArray, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not List", name)))
}
