use crate::reader::ReaderError;
use crate::writer::WriterError;

/// Errors that can occur while running a skim
#[derive(Debug, thiserror::Error)]
pub enum SkimError {
    /// Error while reading the input ntuples
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// Error while writing the output file
    #[error("Writer error: {0}")]
    Writer(#[from] WriterError),

    /// Error from the Arrow library during filtering or projection
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error serializing the skim report
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The skim options are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
