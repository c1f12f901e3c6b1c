use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use parquet::arrow::ArrowWriter;

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Streaming writer for skimmed event tables.
///
/// Wraps a Parquet [`ArrowWriter`], applying the column encodings from
/// [`WriterConfig`] and embedding provenance key-value pairs in the file
/// footer. Batches are buffered and flushed into row groups of
/// `row_group_size` events.
pub struct SkimWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: SchemaRef,
    events_written: usize,
}

impl SkimWriter<File> {
    /// Create a writer producing a Parquet file at `path`.
    pub fn create<P: AsRef<Path>>(
        path: P,
        schema: SchemaRef,
        config: &WriterConfig,
        metadata: &HashMap<String, String>,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, schema, config, metadata)
    }
}

impl<W: Write + Send> SkimWriter<W> {
    /// Create a writer over any `Write` target.
    pub fn new(
        writer: W,
        schema: SchemaRef,
        config: &WriterConfig,
        metadata: &HashMap<String, String>,
    ) -> Result<Self, WriterError> {
        let props = config.to_writer_properties(metadata);
        let writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            schema,
            events_written: 0,
        })
    }

    /// Schema the writer emits.
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Number of events written so far.
    pub fn events_written(&self) -> usize {
        self.events_written
    }

    /// Append a batch of surviving events.
    ///
    /// The batch must carry the writer's schema. Empty batches are skipped
    /// so callers can pass filter results straight through.
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), WriterError> {
        if batch.num_rows() == 0 {
            return Ok(());
        }
        if batch.schema().fields() != self.schema.fields() {
            return Err(WriterError::InvalidData(format!(
                "Batch schema does not match the writer ({} vs {} columns)",
                batch.num_columns(),
                self.schema.fields().len()
            )));
        }
        self.writer.write(batch)?;
        self.events_written += batch.num_rows();
        Ok(())
    }

    /// Flush buffered rows and finalize the Parquet footer.
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let events_written = self.events_written;
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            events_written,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Finalize the file and return the underlying writer.
    ///
    /// Useful when writing to an in-memory buffer instead of a file.
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        Ok(self.writer.into_inner()?)
    }
}
