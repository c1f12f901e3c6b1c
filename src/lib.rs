//! # ntskim - Four-Lepton Ntuple Skimming
//!
//! `ntskim` turns large four-lepton analysis ntuples stored as Apache
//! Parquet into compact skims: it removes duplicate events, applies the
//! four-lepton category selections, prunes columns, and writes a
//! self-describing output file in a single streaming pass.
//!
//! ## Key Features
//!
//! - **Streaming One-Pass Pipeline**: Events flow through deduplication,
//!   selection, projection, and the writer batch by batch, so memory use is
//!   bounded by the batch size plus the set of seen event ids.
//!
//! - **First-Seen Deduplication**: Duplicate events, identified by the
//!   composite (run, luminosity section, event) key, keep only their first
//!   occurrence across all chained inputs.
//!
//! - **Category Selection**: The upstream Z+lepton and Z+X control-region
//!   flags plus a recomputed four-prompt test (four leptons, all tight,
//!   muons isolated) decide which events survive.
//!
//! - **Column Projection with Pushdown**: An allow-list prunes the output,
//!   and only the union of requested, selection, and id columns is ever
//!   decoded from the inputs.
//!
//! - **Physics-Aware Encodings**: Float columns use BYTE_STREAM_SPLIT,
//!   run-like identifier columns use dictionary encoding, and everything is
//!   ZSTD-compressed.
//!
//! - **Self-Contained Outputs**: Footer metadata records the format version,
//!   writer version, source files, source table, and the selection applied.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ntskim::skim::{self, SkimOptions};
//!
//! let options = SkimOptions {
//!     inputs: vec!["ntuples/Run2018A.parquet".into()],
//!     output: "skims/Run2018_4l.parquet".into(),
//!     ..SkimOptions::default()
//! };
//!
//! let report = skim::run(&options)?;
//! println!(
//!     "kept {} of {} events",
//!     report.events_written, report.events_read
//! );
//! # Ok::<(), ntskim::skim::SkimError>(())
//! ```
//!
//! ## Reading Skims
//!
//! Skim outputs are plain Parquet files, readable by any Parquet tool:
//!
//! ```python
//! # Python
//! import pyarrow.parquet as pq
//! table = pq.read_table("skims/Run2018_4l.parquet")
//! df = table.to_pandas()
//! ```
//!
//! ```r
//! # R
//! library(arrow)
//! df <- read_parquet("skims/Run2018_4l.parquet")
//! ```
//!
//! ```sql
//! -- DuckDB
//! SELECT Run, Event, mass4l FROM read_parquet('skims/Run2018_4l.parquet')
//! WHERE mass4l BETWEEN 118 AND 130;
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`schema`]: Arrow schema of the four-lepton event table
//! - [`reader`]: Parquet reader with file chaining and column pushdown
//! - [`selection`]: Per-event category classification
//! - [`dedup`]: First-seen event id tracking
//! - [`projection`]: Output column allow-list resolution
//! - [`writer`]: Streaming Parquet writer with physics-aware encodings
//! - [`skim`]: The pipeline that ties the stages together
//!
//! ## File Footer Metadata
//!
//! Every output file carries provenance in its Parquet footer:
//!
//! - `ntskim:format_version`: Event table format version
//! - `ntskim:writer_version`: Crate version that produced the file
//! - `ntskim:created`: RFC 3339 creation timestamp
//! - `ntskim:source_files`: Semicolon-separated input paths
//! - `ntskim:source_table`: Table the events were read from
//! - `ntskim:selection`: Enabled selection categories, or `pass-through`

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod dedup;
pub mod projection;
pub mod reader;
pub mod schema;
pub mod selection;
pub mod skim;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dedup::{Deduplicator, EventId};
    pub use crate::projection::{read_set, Projection};
    pub use crate::reader::{
        EventIdColumns, NtupleReader, ReaderConfig, ReaderError, SelectionColumns,
    };
    pub use crate::schema::{
        columns, create_event_schema, create_event_schema_arc, validate_event_schema,
        DATA_EVENTS_TABLE, MC_EVENTS_TABLE, NTSKIM_FORMAT_VERSION,
    };
    pub use crate::selection::{
        classify, Categories, Classification, EventRecord, SelectionConfig, SelectionCounts,
    };
    pub use crate::skim::{SkimError, SkimOptions, SkimReport};
    pub use crate::writer::{CompressionType, SkimWriter, WriterConfig, WriterError, WriterStats};
}
