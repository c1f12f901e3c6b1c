use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

#[cfg(feature = "colorized_output")]
use console::style;

use super::error::SkimError;
use crate::selection::SelectionCounts;

/// Summary of a completed skim.
///
/// Returned by [`run`](super::run) and optionally written next to the
/// output file as a JSON sidecar for bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct SkimReport {
    /// RFC 3339 timestamp of when the skim finished
    pub created: String,
    /// Input files in the order they were read
    pub input_files: Vec<String>,
    /// Output Parquet file
    pub output_file: String,
    /// Events table the inputs were read from
    pub table: String,
    /// Enabled selection categories, empty for a pass-through skim
    pub selection: Vec<String>,
    /// Whether event deduplication was enabled
    pub dedup: bool,
    /// Total events read across all inputs
    pub events_read: u64,
    /// Duplicate events dropped
    pub duplicates: u64,
    /// Duplicates as a percentage of events read
    pub duplicate_percent: f64,
    /// Per-category selection counts
    pub counts: SelectionCounts,
    /// Events written to the output
    pub events_written: u64,
    /// Columns in the output schema
    pub columns_written: usize,
    /// Row groups in the output file
    pub row_groups_written: usize,
    /// Wall-clock duration of the skim in seconds
    pub elapsed_secs: f64,
}

impl SkimReport {
    /// Write the report as pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), SkimError> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Fraction of read events that survived the skim.
    pub fn kept_fraction(&self) -> f64 {
        if self.events_read == 0 {
            0.0
        } else {
            self.events_written as f64 / self.events_read as f64
        }
    }

    fn has_category(&self, name: &str) -> bool {
        self.selection.iter().any(|s| s == name)
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!(
                "{} {} events from {} input file(s) in {:.1}s\n",
                style("Skimmed").bold().cyan(),
                self.events_read,
                self.input_files.len(),
                self.elapsed_secs
            ));

            if self.has_category("z1l") {
                output.push_str(&format!(
                    "Found {} Z+L events.\n",
                    style(self.counts.z1l).green()
                ));
            }
            if self.has_category("zxcr") {
                output.push_str(&format!(
                    "Found {} Z+X control-region events.\n",
                    style(self.counts.zxcr).green()
                ));
            }
            if self.has_category("four_p") {
                output.push_str(&format!(
                    "Found {} tight, iso, 4-lep events.\n",
                    style(self.counts.four_p).green()
                ));
            }
            if self.dedup {
                output.push_str(&format!(
                    "Number of duplicates found: {}, ({:.1}% of original entries)\n",
                    style(self.duplicates).yellow(),
                    self.duplicate_percent
                ));
            }

            output.push_str(&format!(
                "{} {} events to {} in {} row groups\n",
                style("Wrote").bold().green(),
                self.events_written,
                self.output_file,
                self.row_groups_written
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}\n", self)
        }
    }
}

impl fmt::Display for SkimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Skimmed {} events from {} input file(s) in {:.1}s",
            self.events_read,
            self.input_files.len(),
            self.elapsed_secs
        )?;

        if self.has_category("z1l") {
            writeln!(f, "Found {} Z+L events.", self.counts.z1l)?;
        }
        if self.has_category("zxcr") {
            writeln!(f, "Found {} Z+X control-region events.", self.counts.zxcr)?;
        }
        if self.has_category("four_p") {
            writeln!(f, "Found {} tight, iso, 4-lep events.", self.counts.four_p)?;
        }
        if self.dedup {
            writeln!(
                f,
                "Number of duplicates found: {}, ({:.1}% of original entries)",
                self.duplicates, self.duplicate_percent
            )?;
        }

        write!(
            f,
            "Wrote {} events to {} in {} row groups",
            self.events_written, self.output_file, self.row_groups_written
        )
    }
}
