use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;

mod count;
mod demo;
mod info;
mod skim;

/// Command-line interface for the ntskim toolkit
#[derive(Parser)]
#[command(name = "ntskim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, deduplicate, and column-prune ntuples into a new file
    Skim {
        /// Input ntuple files (Parquet). Can also come from the job file
        inputs: Vec<PathBuf>,

        /// Output skim file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// TOML job file; command-line flags override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Read the Monte Carlo table ("Ana/passedEvents") instead of the data table
        #[arg(long)]
        mc: bool,

        /// Explicit table name, overriding --mc
        #[arg(long, value_name = "NAME")]
        tree: Option<String>,

        /// Comma-separated list of columns to keep in the output
        #[arg(long, value_delimiter = ',', value_name = "COLS")]
        columns: Option<Vec<String>>,

        /// Keep duplicate events instead of dropping them
        #[arg(long)]
        no_dedup: bool,

        /// Keep every event instead of applying the selection
        #[arg(long)]
        no_selection: bool,

        /// Seed the duplicate set from the first N rows without writing them
        #[arg(long, value_name = "N", default_value_t = 0)]
        start_at: u64,

        /// Write a JSON summary of the skim to this path
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// ZSTD compression level (1-22)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i32>,

        /// Rows per output row group
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,

        /// Rows per read batch
        #[arg(short = 'b', long, hide = true)]
        batch_size: Option<usize>,
    },

    /// Tally selection categories without writing output
    Count {
        /// Input ntuple files (Parquet)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Read the Monte Carlo table ("Ana/passedEvents") instead of the data table
        #[arg(long)]
        mc: bool,

        /// Explicit table name, overriding --mc
        #[arg(long, value_name = "NAME")]
        tree: Option<String>,

        /// Count duplicate events as ordinary events
        #[arg(long)]
        no_dedup: bool,
    },

    /// Display information about an ntuple Parquet file
    Info {
        /// File to inspect
        file: PathBuf,
    },

    /// Generate a synthetic ntuple for testing
    Demo {
        /// Output file
        #[arg(short, long, default_value = "demo_events.parquet")]
        output: PathBuf,

        /// Number of events to generate
        #[arg(short = 'n', long, default_value_t = 50_000)]
        events: usize,

        /// Fraction of events that repeat an earlier event id
        #[arg(long, default_value_t = 0.05)]
        duplicates: f64,
    },
}

impl Cli {
    /// Number of `-v` flags on the command line.
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Initializes env_logger from the `-v` count.
///
/// `RUST_LOG` still wins when set, so `RUST_LOG=ntskim=trace` works
/// regardless of the flag.
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Routes a parsed command line to its subcommand.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Skim {
            inputs,
            output,
            config,
            mc,
            tree,
            columns,
            no_dedup,
            no_selection,
            start_at,
            report,
            compression_level,
            row_group_size,
            batch_size,
        } => skim::run(skim::SkimArgs {
            inputs,
            output,
            config,
            mc,
            tree,
            columns,
            no_dedup,
            no_selection,
            start_at,
            report,
            compression_level,
            row_group_size,
            batch_size,
        }),
        Commands::Count {
            inputs,
            mc,
            tree,
            no_dedup,
        } => count::run(&inputs, mc, tree.as_deref(), no_dedup),
        Commands::Info { file } => info::run(file),
        Commands::Demo {
            output,
            events,
            duplicates,
        } => demo::run(output, events, duplicates),
    }
}
