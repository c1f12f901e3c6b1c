use super::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Float32Array, Int64Array, RecordBatch, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::schema::columns;

fn small_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::RUN, DataType::UInt64, false),
        Field::new(columns::EVENT, DataType::UInt64, false),
        Field::new(columns::MASS4L, DataType::Float32, false),
    ]))
}

fn small_batch(runs: &[u64], events: &[u64], masses: &[f32]) -> RecordBatch {
    RecordBatch::try_new(
        small_schema(),
        vec![
            Arc::new(UInt64Array::from(runs.to_vec())),
            Arc::new(UInt64Array::from(events.to_vec())),
            Arc::new(Float32Array::from(masses.to_vec())),
        ],
    )
    .unwrap()
}

#[test]
fn test_write_event_batches() -> Result<(), WriterError> {
    let config = WriterConfig::default();
    let metadata = HashMap::new();

    let buffer = Cursor::new(Vec::new());
    let mut writer = SkimWriter::new(buffer, small_schema(), &config, &metadata)?;

    writer.write_batch(&small_batch(&[316199, 316199], &[7, 8], &[125.1, 91.2]))?;
    writer.write_batch(&small_batch(&[316200], &[9], &[250.4]))?;
    assert_eq!(writer.events_written(), 3);

    let stats = writer.finish()?;
    assert_eq!(stats.events_written, 3);
    assert_eq!(stats.row_groups_written, 1);
    assert!(stats.file_size_bytes > 0);

    Ok(())
}

#[test]
fn test_empty_batch_is_skipped() -> Result<(), WriterError> {
    let buffer = Cursor::new(Vec::new());
    let mut writer =
        SkimWriter::new(buffer, small_schema(), &WriterConfig::default(), &HashMap::new())?;

    writer.write_batch(&small_batch(&[], &[], &[]))?;
    writer.write_batch(&small_batch(&[1], &[100], &[125.0]))?;

    let stats = writer.finish()?;
    assert_eq!(stats.events_written, 1);

    Ok(())
}

#[test]
fn test_row_group_rollover() -> Result<(), WriterError> {
    let config = WriterConfig {
        row_group_size: 2,
        ..WriterConfig::default()
    };

    let buffer = Cursor::new(Vec::new());
    let mut writer = SkimWriter::new(buffer, small_schema(), &config, &HashMap::new())?;

    writer.write_batch(&small_batch(
        &[1, 1, 1, 1, 1],
        &[100, 101, 102, 103, 104],
        &[125.0, 91.2, 250.4, 172.5, 80.4],
    ))?;

    let stats = writer.finish()?;
    assert_eq!(stats.events_written, 5);
    assert_eq!(stats.row_groups_written, 3);

    Ok(())
}

#[test]
fn test_footer_metadata_embedded() -> Result<(), WriterError> {
    let mut metadata = HashMap::new();
    metadata.insert("ntskim:format_version".to_string(), "1.0.0".to_string());
    metadata.insert("ntskim:selection".to_string(), "z1l,zxcr,four_p".to_string());

    let tmp = tempfile::NamedTempFile::new()?;
    let mut writer =
        SkimWriter::create(tmp.path(), small_schema(), &WriterConfig::default(), &metadata)?;
    writer.write_batch(&small_batch(&[1], &[100], &[125.0]))?;
    writer.finish()?;

    let reader = SerializedFileReader::new(std::fs::File::open(tmp.path())?)?;
    let kv = reader
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();

    assert!(kv
        .iter()
        .any(|p| p.key == "ntskim:format_version" && p.value.as_deref() == Some("1.0.0")));
    assert!(kv.iter().any(|p| p.key == "ntskim:selection"));

    Ok(())
}

#[test]
fn test_round_trip_values() -> Result<(), WriterError> {
    let tmp = tempfile::NamedTempFile::new()?;
    {
        let mut writer = SkimWriter::create(
            tmp.path(),
            small_schema(),
            &WriterConfig::default(),
            &HashMap::new(),
        )?;
        writer.write_batch(&small_batch(&[316199, 316200], &[7, 8], &[125.1, 91.2]))?;
        writer.finish()?;
    }

    let builder = ParquetRecordBatchReaderBuilder::try_new(std::fs::File::open(tmp.path())?)?;
    let mut reader = builder.build()?;
    let batch = reader.next().unwrap()?;
    assert_eq!(batch.num_rows(), 2);

    let runs = batch
        .column(0)
        .as_any()
        .downcast_ref::<UInt64Array>()
        .unwrap();
    assert_eq!(runs.values().to_vec(), vec![316199, 316200]);

    let masses = batch
        .column(2)
        .as_any()
        .downcast_ref::<Float32Array>()
        .unwrap();
    assert_eq!(masses.value(0), 125.1);
    assert_eq!(masses.value(1), 91.2);

    Ok(())
}

#[test]
fn test_mismatched_batch_is_rejected() {
    let buffer = Cursor::new(Vec::new());
    let mut writer = SkimWriter::new(
        buffer,
        small_schema(),
        &WriterConfig::default(),
        &HashMap::new(),
    )
    .unwrap();

    let other = RecordBatch::try_new(
        Arc::new(Schema::new(vec![Field::new("x", DataType::Int64, false)])),
        vec![Arc::new(Int64Array::from(vec![1_i64]))],
    )
    .unwrap();

    let err = writer.write_batch(&other).unwrap_err();
    assert!(matches!(err, WriterError::InvalidData(_)));
    assert_eq!(writer.events_written(), 0);
}

#[test]
fn test_finish_into_inner_returns_buffer() -> Result<(), WriterError> {
    let buffer = Cursor::new(Vec::new());
    let mut writer =
        SkimWriter::new(buffer, small_schema(), &WriterConfig::default(), &HashMap::new())?;
    writer.write_batch(&small_batch(&[1], &[100], &[125.0]))?;

    let bytes = writer.finish_into_inner()?.into_inner();
    // Parquet files open and close with the same four magic bytes.
    assert!(bytes.starts_with(b"PAR1"));
    assert!(bytes.ends_with(b"PAR1"));

    Ok(())
}

#[test]
fn test_config_presets() {
    assert_eq!(CompressionType::default(), CompressionType::Zstd(3));
    assert_eq!(CompressionType::balanced(), CompressionType::default());
    assert_eq!(CompressionType::max_compression(), CompressionType::Zstd(22));
    assert_eq!(CompressionType::fast(), CompressionType::Snappy);

    assert_eq!(WriterConfig::default().row_group_size, 100_000);
    assert_eq!(
        WriterConfig::balanced().row_group_size,
        WriterConfig::default().row_group_size
    );
    assert!(matches!(
        WriterConfig::fast_write().compression,
        CompressionType::Snappy
    ));
    assert!(matches!(
        WriterConfig::max_compression().compression,
        CompressionType::Zstd(22)
    ));
}
