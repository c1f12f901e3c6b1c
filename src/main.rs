//! # ntskim
//!
//! Command-line skimming tool for four-lepton analysis ntuples stored as
//! Apache Parquet.
//!
//! ## Usage
//!
//! ```bash
//! # Skim with the default selection and duplicate removal
//! ntskim skim ntuples/Run2018A.parquet ntuples/Run2018B.parquet -o skim.parquet
//!
//! # Campaign driven by a job file, flags still win
//! ntskim skim --config jobs/run2018.toml
//!
//! # Tally selection categories without writing anything
//! ntskim count ntuples/Run2018A.parquet
//!
//! # Generate a synthetic ntuple to play with
//! ntskim demo -o demo_events.parquet -n 100000
//! ```

use clap::Parser;

mod cli;

fn main() {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());

    if let Err(err) = cli::dispatch(cli) {
        // {:#} renders the whole context chain on one line.
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
