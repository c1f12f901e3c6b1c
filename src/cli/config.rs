//! TOML job-file support for skim campaigns.
//!
//! A long flag list does not replay well across a multi-file campaign, so
//! the `skim` command also accepts a job file:
//!
//! ```toml
//! [input]
//! files = ["ntuples/Run2018A.parquet", "ntuples/Run2018B.parquet"]
//! is_data = true
//!
//! [output]
//! file = "skims/Run2018_4l.parquet"
//! report = "skims/Run2018_4l.json"
//!
//! [selection]
//! z1l = true
//! zxcr = true
//! four_p = true
//!
//! [dedup]
//! start_at = 0
//!
//! [projection]
//! columns = ["Run", "LumiSect", "Event", "mass4l", "lep_pt", "lep_eta"]
//!
//! [writer]
//! compression_level = 9
//! row_group_size = 100000
//! ```
//!
//! Section presence is meaningful. A job file without `[selection]` keeps
//! every non-duplicate event, one without `[dedup]` skips duplicate removal,
//! and one without `[projection]` writes every input column. Command-line
//! flags override whatever the job file says.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ntskim::selection::SelectionConfig;

/// A parsed skim job file.
#[derive(Debug, Default, Deserialize)]
pub struct JobConfig {
    /// Input files and table choice
    #[serde(default)]
    pub input: InputSection,

    /// Output file and optional JSON report
    #[serde(default)]
    pub output: OutputSection,

    /// Selection categories. Omitting the section keeps every event.
    pub selection: Option<SelectionConfig>,

    /// Duplicate removal. Omitting the section disables it.
    pub dedup: Option<DedupSection>,

    /// Column allow-list. Omitting the section writes every input column.
    pub projection: Option<ProjectionSection>,

    /// Output file tuning
    #[serde(default)]
    pub writer: WriterSection,

    /// Progress heartbeat interval, in events
    pub progress_every: Option<u64>,
}

/// `[input]` section.
#[derive(Debug, Default, Deserialize)]
pub struct InputSection {
    /// Ntuple files to skim, in order
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Explicit table name. Takes precedence over `is_data`.
    pub tree: Option<String>,

    /// `true` reads the collision-data table, `false` the Monte Carlo one
    pub is_data: Option<bool>,

    /// Rows per read batch
    pub batch_size: Option<usize>,
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output skim file
    pub file: Option<PathBuf>,

    /// JSON report sidecar
    pub report: Option<PathBuf>,
}

/// `[dedup]` section. Presence of the section enables duplicate removal.
#[derive(Debug, Default, Deserialize)]
pub struct DedupSection {
    /// Seed the duplicate set from the first N rows without writing them
    #[serde(default)]
    pub start_at: u64,
}

/// `[projection]` section.
#[derive(Debug, Deserialize)]
pub struct ProjectionSection {
    /// Columns to keep in the output, by input-schema name
    #[serde(default)]
    pub columns: Vec<String>,
}

/// `[writer]` section.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// ZSTD compression level (1-22)
    pub compression_level: Option<i32>,

    /// Rows per output row group
    pub row_group_size: Option<usize>,

    /// Toggle BYTE_STREAM_SPLIT encoding for float columns
    pub byte_stream_split: Option<bool>,
}

impl JobConfig {
    /// Loads a job file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Parses a job file from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML job file")
    }
}
