use crate::schema::DATA_EVENTS_TABLE;

/// Configuration for reading ntuple files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Batch size for reading records
    pub batch_size: usize,
    /// Events table resolved inside a dataset directory (`<table>.parquet`)
    pub table: String,
    /// Columns to read; `None` reads every column
    pub columns: Option<Vec<String>>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            table: DATA_EVENTS_TABLE.to_string(),
            columns: None,
        }
    }
}
