//! # Skim Writer Module
//!
//! This module provides the core functionality for writing skimmed event
//! tables to Parquet.
//!
//! ## Design Principles
//!
//! 1. **Streaming Architecture**: Surviving events are appended batch by
//!    batch, so a skim never holds more than a single batch in memory.
//!
//! 2. **Physics-Aware Encodings**: Run/LumiSect columns are dictionary
//!    encoded, floating-point kinematics use BYTE_STREAM_SPLIT, and unique
//!    Event numbers skip the dictionary entirely.
//!
//! 3. **Self-Contained Files**: Provenance (source files, selection, writer
//!    version) is embedded in the Parquet footer's key_value_metadata.
//!
//! 4. **Configurable Compression**: Supports ZSTD (default), Snappy, and uncompressed.

mod config;
mod error;
mod stats;
mod writer_impl;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use stats::WriterStats;
pub use writer_impl::SkimWriter;
