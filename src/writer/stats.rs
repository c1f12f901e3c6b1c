use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Number of events written to the file
    pub events_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total bytes of column data written
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} events in {} row groups",
            self.events_written, self.row_groups_written
        )
    }
}
