//! # Skim Pipeline
//!
//! Single-pass orchestration of the full skim: deduplicate, select,
//! project, write.
//!
//! Events stream batch by batch through four stages:
//!
//! 1. **Deduplication** drops any event whose (Run, LumiSect, Event) triple
//!    was already seen, keeping the first occurrence.
//! 2. **Selection** classifies each surviving event and keeps it if any
//!    enabled category matches.
//! 3. **Projection** restricts the output to the configured allow-list.
//! 4. **Writing** appends the surviving rows to the output Parquet file.
//!
//! Duplicates are dropped before selection, so a repeated event that would
//! also pass the selection is counted once.
//!
//! ```no_run
//! use ntskim::skim::{run, SkimOptions};
//!
//! let options = SkimOptions {
//!     inputs: vec!["data/Run2018.parquet".into()],
//!     output: "skim.parquet".into(),
//!     ..SkimOptions::default()
//! };
//! let report = run(&options)?;
//! println!("{report}");
//! # Ok::<(), ntskim::skim::SkimError>(())
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use arrow::array::{BooleanArray, RecordBatch};
use arrow::compute::filter_record_batch;
use arrow::datatypes::Schema;
use log::{debug, info, warn};

use crate::dedup::Deduplicator;
use crate::projection::{read_set, Projection};
use crate::reader::{EventIdColumns, NtupleReader, ReaderConfig, ReaderError, SelectionColumns};
use crate::schema::{
    columns, DATA_EVENTS_TABLE, KEY_CREATED, KEY_FORMAT_VERSION, KEY_SELECTION, KEY_SOURCE_FILES,
    KEY_SOURCE_TABLE, KEY_WRITER_VERSION, NTSKIM_FORMAT_VERSION,
};
use crate::selection::{classify, SelectionConfig, SelectionCounts};
use crate::writer::{SkimWriter, WriterConfig};

mod error;
mod report;


pub use error::SkimError;
pub use report::SkimReport;

/// Options controlling a single skim run.
#[derive(Debug, Clone)]
pub struct SkimOptions {
    /// Input files or dataset directories, read in order
    pub inputs: Vec<PathBuf>,
    /// Output Parquet file
    pub output: PathBuf,
    /// Events table to read from each input
    pub table: String,
    /// Rows per batch while streaming
    pub batch_size: usize,
    /// Row selection; `None` keeps every non-duplicate event
    pub selection: Option<SelectionConfig>,
    /// Drop repeated (Run, LumiSect, Event) triples
    pub dedup: bool,
    /// Skip this many leading rows, registering their ids with the
    /// deduplicator. Used to resume a partially completed skim.
    pub start_at: u64,
    /// Output column allow-list; `None` writes every input column.
    /// Names absent from the input schema are ignored.
    pub columns: Option<Vec<String>>,
    /// Parquet writer tuning
    pub writer: WriterConfig,
    /// Emit a progress line every this many events (0 disables)
    pub progress_every: u64,
    /// Write a JSON report here after the skim
    pub report_path: Option<PathBuf>,
}

impl Default for SkimOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("skim.parquet"),
            table: DATA_EVENTS_TABLE.to_string(),
            batch_size: 8192,
            selection: Some(SelectionConfig::default()),
            dedup: true,
            start_at: 0,
            columns: None,
            writer: WriterConfig::default(),
            progress_every: 1_000_000,
            report_path: None,
        }
    }
}

impl SkimOptions {
    fn validate(&self) -> Result<(), SkimError> {
        if self.inputs.is_empty() {
            return Err(SkimError::InvalidConfig("No input files were given".into()));
        }
        if self.batch_size == 0 {
            return Err(SkimError::InvalidConfig(
                "batch_size must be at least 1".into(),
            ));
        }
        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(SkimError::InvalidConfig(format!(
                "Output {} is also an input",
                self.output.display()
            )));
        }
        if let Some(config) = &self.selection {
            if !config.any_enabled() {
                warn!("Selection has no enabled categories, the skim will keep no events");
            }
        }
        Ok(())
    }

    /// Columns to read: the allow-listed output columns present in the
    /// input, plus whatever the selector and deduplicator need.
    fn read_columns(&self, schema: &Schema) -> Option<Vec<String>> {
        let allow = self.columns.as_ref()?;

        let present: Vec<&str> = allow
            .iter()
            .map(String::as_str)
            .filter(|name| schema.index_of(name).is_ok())
            .collect();

        let mut groups: Vec<&[&str]> = vec![&present];
        if self.selection.is_some() {
            groups.push(&columns::SELECTION_COLUMNS);
        }
        if self.dedup {
            groups.push(&columns::EVENT_ID_COLUMNS);
        }
        Some(read_set(&groups))
    }
}

/// Run a skim, returning the final report.
///
/// Inputs are verified up front: every file must carry the columns the
/// configured stages read, with matching types. The pass itself is
/// single-threaded and streams one batch at a time.
pub fn run(options: &SkimOptions) -> Result<SkimReport, SkimError> {
    options.validate()?;
    let started = Instant::now();

    // Probe pass over the footers: full schema, row counts, consistency.
    let probe = NtupleReader::chain(
        &options.inputs,
        ReaderConfig {
            batch_size: options.batch_size,
            table: options.table.clone(),
            columns: None,
        },
    )?;
    let schema = probe.schema();
    require_stage_columns(&schema, options)?;

    // Reopen with column pushdown when an allow-list restricts the output.
    let reader = match options.read_columns(&schema) {
        Some(read_cols) => NtupleReader::chain(
            &options.inputs,
            ReaderConfig {
                batch_size: options.batch_size,
                table: options.table.clone(),
                columns: Some(read_cols),
            },
        )?,
        None => probe,
    };

    let read_schema = reader.read_schema();
    let output = match &options.columns {
        Some(allow) => Projection::resolve(allow, &read_schema)?,
        None => Projection::identity(&read_schema),
    };

    let metadata = provenance_metadata(options, &reader);
    let mut writer = SkimWriter::create(
        &options.output,
        output.schema(),
        &options.writer,
        &metadata,
    )?;

    let mut dedup = options.dedup.then(Deduplicator::new);
    let mut counts = SelectionCounts::default();
    let mut progress = Progress {
        events_read: 0,
        total: reader.total_rows(),
        every: options.progress_every,
    };

    info!(
        "Skimming {} events from {} input file(s) into {}",
        reader.total_rows(),
        reader.paths().len(),
        options.output.display()
    );

    for batch in reader.iter_batches() {
        let batch = batch?;
        let mask = filter_batch(
            &batch,
            options.selection.as_ref(),
            dedup.as_mut(),
            &mut counts,
            &mut progress,
            options.start_at,
        )?;
        let surviving = filter_record_batch(&batch, &mask)?;
        writer.write_batch(&output.project_batch(&surviving)?)?;
    }

    let stats = writer.finish()?;
    let duplicates = dedup.as_ref().map(Deduplicator::duplicates).unwrap_or(0);
    let events_read = progress.events_read;

    let report = SkimReport {
        created: chrono::Utc::now().to_rfc3339(),
        input_files: reader
            .paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        output_file: options.output.display().to_string(),
        table: options.table.clone(),
        selection: options
            .selection
            .as_ref()
            .map(|c| c.enabled_names().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default(),
        dedup: options.dedup,
        events_read,
        duplicates,
        duplicate_percent: if events_read == 0 {
            0.0
        } else {
            duplicates as f64 / events_read as f64 * 100.0
        },
        counts,
        events_written: stats.events_written as u64,
        columns_written: output.num_columns(),
        row_groups_written: stats.row_groups_written,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };

    if let Some(path) = &options.report_path {
        report.write_json(path)?;
        debug!("Wrote skim report to {}", path.display());
    }

    info!("{}", stats);
    Ok(report)
}

/// Fail early if the input lacks a column a configured stage reads.
fn require_stage_columns(schema: &Schema, options: &SkimOptions) -> Result<(), SkimError> {
    if options.selection.is_some() {
        for name in columns::SELECTION_COLUMNS {
            if schema.index_of(name).is_err() {
                return Err(ReaderError::ColumnNotFound(name.to_string()).into());
            }
        }
    }
    if options.dedup {
        for name in columns::EVENT_ID_COLUMNS {
            if schema.index_of(name).is_err() {
                return Err(ReaderError::ColumnNotFound(name.to_string()).into());
            }
        }
    }
    Ok(())
}

fn provenance_metadata(options: &SkimOptions, reader: &NtupleReader) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        NTSKIM_FORMAT_VERSION.to_string(),
    );
    metadata.insert(
        KEY_WRITER_VERSION.to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    metadata.insert(KEY_CREATED.to_string(), chrono::Utc::now().to_rfc3339());
    metadata.insert(
        KEY_SOURCE_FILES.to_string(),
        reader
            .paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(";"),
    );
    metadata.insert(KEY_SOURCE_TABLE.to_string(), options.table.clone());
    metadata.insert(
        KEY_SELECTION.to_string(),
        match &options.selection {
            Some(config) => {
                let names = config.enabled_names();
                if names.is_empty() {
                    "none".to_string()
                } else {
                    names.join(",")
                }
            }
            None => "pass-through".to_string(),
        },
    );
    metadata
}

struct Progress {
    events_read: u64,
    total: u64,
    every: u64,
}

impl Progress {
    /// Count one event, returning its global row index.
    fn tick(&mut self) -> u64 {
        let index = self.events_read;
        self.events_read += 1;
        if self.every > 0 && self.events_read % self.every == 0 {
            info!("{}/{} events read.", self.events_read, self.total);
        }
        index
    }
}

/// Build the keep mask for one batch, updating dedup state and counts.
fn filter_batch(
    batch: &RecordBatch,
    selection: Option<&SelectionConfig>,
    mut dedup: Option<&mut Deduplicator>,
    counts: &mut SelectionCounts,
    progress: &mut Progress,
    start_at: u64,
) -> Result<BooleanArray, SkimError> {
    let ids = match dedup {
        Some(_) => Some(EventIdColumns::try_new(batch)?),
        None => None,
    };
    let view = match selection {
        Some(_) => Some(SelectionColumns::try_new(batch)?),
        None => None,
    };

    let mut keep = vec![false; batch.num_rows()];
    for (row, slot) in keep.iter_mut().enumerate() {
        let index = progress.tick();

        // Rows before the resume point only feed the dedup table.
        if index < start_at {
            if let (Some(dedup), Some(ids)) = (dedup.as_deref_mut(), ids.as_ref()) {
                dedup.register(ids.event_id(row));
            }
            continue;
        }

        if let (Some(dedup), Some(ids)) = (dedup.as_deref_mut(), ids.as_ref()) {
            if dedup.is_duplicate(ids.event_id(row)) {
                continue;
            }
        }

        match (view.as_ref(), selection) {
            (Some(view), Some(config)) => {
                let record = view.record(row)?;
                let classification = classify(&record, config);
                counts.record(&classification);
                *slot = classification.keep;
            }
            _ => *slot = true,
        }
    }

    Ok(BooleanArray::from(keep))
}
