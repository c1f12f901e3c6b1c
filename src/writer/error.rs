/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during encoding
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// The data handed to the writer is inconsistent
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
