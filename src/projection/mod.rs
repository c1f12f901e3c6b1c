//! # Column Projection
//!
//! Narrows the set of columns carried from input to output. A projection is
//! the intersection of a configured allow-list with the input schema, in
//! input-schema order: allow-listed names absent from the input are silently
//! ignored, and nothing is ever renamed, computed, or default-filled.
//!
//! Projecting is idempotent. Applying a resolved [`Projection`] to a batch
//! that already contains exactly its columns returns an equal batch.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::datatypes::{Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;

#[cfg(test)]
mod tests;

/// A column selection resolved against a concrete input schema.
#[derive(Debug, Clone)]
pub struct Projection {
    indices: Vec<usize>,
    schema: SchemaRef,
}

impl Projection {
    /// Resolves an allow-list against an input schema.
    ///
    /// The result keeps the allow-listed columns that exist in the input, in
    /// input-schema order. Names without a matching input column are logged
    /// at debug level and dropped.
    pub fn resolve<S: AsRef<str>>(allowlist: &[S], input: &Schema) -> Result<Self, ArrowError> {
        let mut indices = Vec::new();
        for (idx, field) in input.fields().iter().enumerate() {
            if allowlist.iter().any(|name| name.as_ref() == field.name()) {
                indices.push(idx);
            }
        }

        for name in allowlist {
            if input.field_with_name(name.as_ref()).is_err() {
                debug!(
                    "Projection ignoring '{}': not present in the input schema",
                    name.as_ref()
                );
            }
        }

        let schema = Arc::new(input.project(&indices)?);
        Ok(Self { indices, schema })
    }

    /// The projection that keeps every input column unchanged.
    pub fn identity(input: &Schema) -> Self {
        Self {
            indices: (0..input.fields().len()).collect(),
            schema: Arc::new(input.clone()),
        }
    }

    /// Schema of the projected output.
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Input-schema indices of the retained columns, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of retained columns.
    pub fn num_columns(&self) -> usize {
        self.indices.len()
    }

    /// Names of the retained columns, in output order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Applies the projection to one batch.
    ///
    /// The batch must have the schema the projection was resolved against.
    pub fn project_batch(&self, batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
        batch.project(&self.indices)
    }
}

/// Joins column groups into the set of columns one pass must read.
///
/// Duplicates are dropped; the first appearance fixes the position. The
/// output columns go first so the read order tracks the output order.
pub fn read_set(groups: &[&[&str]]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for group in groups {
        for &name in *group {
            if seen.insert(name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}
