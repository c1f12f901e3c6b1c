//! # Ntuple Reader Module
//!
//! Streams event record batches out of one or more Parquet ntuple files.
//!
//! ## Features
//!
//! - **Chaining**: an ordered list of inputs is consumed as one logical
//!   stream, the way the upstream analysis chained its per-era files.
//! - **Column Pushdown**: only the columns a pass needs are decoded.
//! - **Eager Verification**: every input's footer is checked against the
//!   requested columns before the first row is read, so a schema problem
//!   aborts the job up front rather than mid-stream.
//! - **Typed Views**: [`SelectionColumns`] and [`EventIdColumns`] downcast a
//!   batch once and hand out per-row values for the selection and
//!   deduplication stages.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ntskim::reader::NtupleReader;
//!
//! let reader = NtupleReader::open("events.parquet")?;
//! println!("{} events in {} file(s)", reader.total_rows(), reader.paths().len());
//!
//! for batch in reader.iter_batches() {
//!     let batch = batch?;
//!     println!("batch of {} events", batch.num_rows());
//! }
//! # Ok::<(), ntskim::reader::ReaderError>(())
//! ```

use std::path::PathBuf;

use arrow::datatypes::SchemaRef;

mod batches;
mod config;
mod error;
mod open;
mod utils;
mod view;

#[cfg(test)]
mod tests;

pub use batches::RecordBatchIterator;
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use view::{EventIdColumns, SelectionColumns};

/// Reader over a chain of ntuple Parquet files.
///
/// All chained files must agree on the columns being read; the constructors
/// verify this from the file footers.
pub struct NtupleReader {
    /// Resolved events files, in ingestion order
    files: Vec<PathBuf>,
    /// Full schema of the first file
    schema: SchemaRef,
    /// Schema of the batches as read, after column pushdown
    read_schema: SchemaRef,
    /// Total rows across all files, from the footers
    total_rows: u64,
    config: ReaderConfig,
}

impl NtupleReader {
    /// Full schema of the input files, ignoring column pushdown.
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Schema of the batches [`iter_batches`](Self::iter_batches) yields.
    ///
    /// Equals [`schema`](Self::schema) unless the configuration restricts
    /// the columns.
    pub fn read_schema(&self) -> SchemaRef {
        self.read_schema.clone()
    }

    /// Total number of events across the chain, taken from the footers.
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// The resolved events files, in ingestion order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}
