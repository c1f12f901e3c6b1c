use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use ntskim::schema::{DATA_EVENTS_TABLE, MC_EVENTS_TABLE};
use ntskim::selection::SelectionConfig;
use ntskim::skim::{self, SkimOptions};
use ntskim::writer::{CompressionType, WriterConfig};

use super::config::JobConfig;

/// Everything the `skim` subcommand collected from the command line.
#[derive(Debug, Default)]
pub struct SkimArgs {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub mc: bool,
    pub tree: Option<String>,
    pub columns: Option<Vec<String>>,
    pub no_dedup: bool,
    pub no_selection: bool,
    pub start_at: u64,
    pub report: Option<PathBuf>,
    pub compression_level: Option<i32>,
    pub row_group_size: Option<usize>,
    pub batch_size: Option<usize>,
}

/// Runs one skim job and prints its summary.
pub fn run(args: SkimArgs) -> Result<()> {
    let job = match args.config.as_deref() {
        Some(path) => Some(JobConfig::from_file(path)?),
        None => None,
    };

    let options = build_options(args, job)?;
    let report = skim::run(&options)
        .with_context(|| format!("Skim failed for output {}", options.output.display()))?;

    println!("{}", report.format_colored());
    Ok(())
}

/// Merges command-line flags over the job file. Flags win; job sections
/// govern which stages run when no flag says otherwise.
fn build_options(args: SkimArgs, job: Option<JobConfig>) -> Result<SkimOptions> {
    let had_job = job.is_some();
    let job = job.unwrap_or_default();
    let defaults = SkimOptions::default();

    let inputs = if args.inputs.is_empty() {
        job.input.files
    } else {
        args.inputs
    };
    if inputs.is_empty() {
        bail!("No input files: pass them as arguments or in the job file's [input] section");
    }

    let table = if let Some(tree) = args.tree {
        tree
    } else if args.mc {
        MC_EVENTS_TABLE.to_string()
    } else if let Some(tree) = job.input.tree {
        tree
    } else if job.input.is_data == Some(false) {
        MC_EVENTS_TABLE.to_string()
    } else {
        DATA_EVENTS_TABLE.to_string()
    };

    let output = args
        .output
        .or(job.output.file)
        .unwrap_or_else(|| PathBuf::from("skim.parquet"));

    // Without a job file the full selection applies; with one, the presence
    // of the [selection] section decides.
    let selection = if args.no_selection {
        None
    } else if had_job {
        job.selection
    } else {
        Some(SelectionConfig::default())
    };

    let dedup = if args.no_dedup {
        false
    } else if had_job {
        job.dedup.is_some()
    } else {
        true
    };

    let start_at = if args.start_at > 0 {
        args.start_at
    } else {
        job.dedup.as_ref().map_or(0, |d| d.start_at)
    };

    let columns = args.columns.or_else(|| job.projection.map(|p| p.columns));
    if let Some(cols) = &columns {
        if cols.is_empty() {
            bail!("The column allow-list is empty; drop it to keep every column");
        }
    }

    let mut writer = WriterConfig::default();
    if let Some(level) = job.writer.compression_level {
        writer.compression = CompressionType::Zstd(level);
    }
    if let Some(size) = job.writer.row_group_size {
        writer.row_group_size = size;
    }
    if let Some(split) = job.writer.byte_stream_split {
        writer.use_byte_stream_split = split;
    }
    if let Some(level) = args.compression_level {
        writer.compression = CompressionType::Zstd(level);
    }
    if let Some(size) = args.row_group_size {
        writer.row_group_size = size;
    }

    Ok(SkimOptions {
        inputs,
        output,
        table,
        batch_size: args
            .batch_size
            .or(job.input.batch_size)
            .unwrap_or(defaults.batch_size),
        selection,
        dedup,
        start_at,
        columns,
        writer,
        progress_every: job.progress_every.unwrap_or(defaults.progress_every),
        report_path: args.report.or(job.output.report),
    })
}
