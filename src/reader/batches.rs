use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use parquet::arrow::ProjectionMask;

use super::{NtupleReader, ReaderError};

/// Streaming iterator over record batches across a file chain
///
/// Files are opened lazily, one at a time, in ingestion order. Memory usage
/// is bounded by `batch_size * row_size` regardless of chain length.
pub struct RecordBatchIterator {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<ParquetRecordBatchReader>,
    batch_size: usize,
    columns: Option<Vec<String>>,
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reader) = self.current.as_mut() {
                match reader.next() {
                    Some(batch) => return Some(batch.map_err(ReaderError::from)),
                    None => self.current = None,
                }
            }

            let path = self.pending.next()?;
            match open_batch_reader(&path, self.batch_size, self.columns.as_deref()) {
                Ok(reader) => self.current = Some(reader),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl NtupleReader {
    /// Returns a streaming iterator over record batches from the chain.
    ///
    /// Batches carry the [`read_schema`](Self::read_schema) columns. File
    /// boundaries are invisible to the caller; rows arrive in ingestion
    /// order.
    ///
    /// # Example
    /// ```rust,no_run
    /// use ntskim::reader::NtupleReader;
    ///
    /// let reader = NtupleReader::open("events.parquet")?;
    /// for batch_result in reader.iter_batches() {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} rows", batch.num_rows());
    /// }
    /// # Ok::<(), ntskim::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> RecordBatchIterator {
        RecordBatchIterator {
            pending: self.files.clone().into_iter(),
            current: None,
            batch_size: self.config.batch_size,
            columns: self.config.columns.clone(),
        }
    }

    /// Read all record batches from the chain (eager, collects all batches)
    ///
    /// **Warning**: This loads all data into memory. For large inputs,
    /// prefer `iter_batches()`.
    pub fn read_all_batches(&self) -> Result<Vec<RecordBatch>, ReaderError> {
        self.iter_batches().collect()
    }
}

/// Opens one file's batch reader, applying column pushdown.
fn open_batch_reader(
    path: &Path,
    batch_size: usize,
    columns: Option<&[String]>,
) -> Result<ParquetRecordBatchReader, ReaderError> {
    let file = File::open(path)?;
    let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);

    if let Some(columns) = columns {
        // Column indices are resolved per file; the chain constructor has
        // already verified presence and types.
        let schema = builder.schema().clone();
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let idx = schema
                .index_of(name)
                .map_err(|_| ReaderError::ColumnNotFound(name.clone()))?;
            indices.push(idx);
        }
        let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
        builder = builder.with_projection(mask);
    }

    Ok(builder.build()?)
}
