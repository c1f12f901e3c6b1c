use super::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{
    BooleanArray, Float32Array, Float64Array, Int32Array, ListArray, RecordBatch, UInt64Array,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use tempfile::tempdir;

use crate::dedup::EventId;
use crate::schema::{columns, MC_EVENTS_TABLE};
use crate::selection::{classify, SelectionConfig};
use crate::writer::{SkimWriter, WriterConfig};

fn list_field(name: &str, item: DataType) -> Field {
    Field::new(
        name,
        DataType::List(Arc::new(Field::new("item", item, false))),
        false,
    )
}

fn f32_list(rows: &[Vec<f32>]) -> ListArray {
    let values = Float32Array::from(rows.iter().flatten().copied().collect::<Vec<_>>());
    ListArray::new(
        Arc::new(Field::new("item", DataType::Float32, false)),
        OffsetBuffer::from_lengths(rows.iter().map(|r| r.len())),
        Arc::new(values),
        None,
    )
}

fn i32_list(rows: &[Vec<i32>]) -> ListArray {
    let values = Int32Array::from(rows.iter().flatten().copied().collect::<Vec<_>>());
    ListArray::new(
        Arc::new(Field::new("item", DataType::Int32, false)),
        OffsetBuffer::from_lengths(rows.iter().map(|r| r.len())),
        Arc::new(values),
        None,
    )
}

fn fixture_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::RUN, DataType::UInt64, false),
        Field::new(columns::LUMI_SECT, DataType::UInt64, false),
        Field::new(columns::EVENT, DataType::UInt64, false),
        Field::new(columns::PASSED_Z1L_SELECTION, DataType::Boolean, false),
        Field::new(columns::PASSED_ZXCR_SELECTION, DataType::Boolean, false),
        list_field(columns::LEP_PT, DataType::Float32),
        list_field(columns::LEP_ID, DataType::Int32),
        list_field(columns::LEP_TIGHT_ID, DataType::Int32),
        list_field(columns::LEP_REL_ISO_NO_FSR, DataType::Float32),
        Field::new(columns::MASS4L, DataType::Float32, false),
    ]))
}

/// One 4mu event per id triple, with leptons that pass every cut.
fn fixture_batch(ids: &[(u64, u64, u64)]) -> RecordBatch {
    let n = ids.len();
    RecordBatch::try_new(
        fixture_schema(),
        vec![
            Arc::new(UInt64Array::from(
                ids.iter().map(|x| x.0).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                ids.iter().map(|x| x.1).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                ids.iter().map(|x| x.2).collect::<Vec<_>>(),
            )),
            Arc::new(BooleanArray::from(vec![false; n])),
            Arc::new(BooleanArray::from(vec![false; n])),
            Arc::new(f32_list(&vec![vec![40.0, 30.0, 25.0, 20.0]; n])),
            Arc::new(i32_list(&vec![vec![13, -13, 13, -13]; n])),
            Arc::new(i32_list(&vec![vec![1, 1, 1, 1]; n])),
            Arc::new(f32_list(&vec![vec![0.1, 0.1, 0.0, 0.2]; n])),
            Arc::new(Float32Array::from(vec![125.0_f32; n])),
        ],
    )
    .unwrap()
}

fn write_batch_to(path: &std::path::Path, batch: &RecordBatch) {
    let mut writer = SkimWriter::create(
        path,
        batch.schema(),
        &WriterConfig::fast_write(),
        &HashMap::new(),
    )
    .unwrap();
    writer.write_batch(batch).unwrap();
    writer.finish().unwrap();
}

/// Batch carrying only the selection columns, with custom per-event content.
fn selection_batch(
    flags: &[(bool, bool)],
    pts: &[Vec<f32>],
    ids: &[Vec<i32>],
    tights: &[Vec<i32>],
    isos: &[Vec<f32>],
) -> RecordBatch {
    RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new(columns::PASSED_Z1L_SELECTION, DataType::Boolean, false),
            Field::new(columns::PASSED_ZXCR_SELECTION, DataType::Boolean, false),
            list_field(columns::LEP_PT, DataType::Float32),
            list_field(columns::LEP_ID, DataType::Int32),
            list_field(columns::LEP_TIGHT_ID, DataType::Int32),
            list_field(columns::LEP_REL_ISO_NO_FSR, DataType::Float32),
        ])),
        vec![
            Arc::new(BooleanArray::from(
                flags.iter().map(|f| f.0).collect::<Vec<_>>(),
            )),
            Arc::new(BooleanArray::from(
                flags.iter().map(|f| f.1).collect::<Vec<_>>(),
            )),
            Arc::new(f32_list(pts)),
            Arc::new(i32_list(ids)),
            Arc::new(i32_list(tights)),
            Arc::new(f32_list(isos)),
        ],
    )
    .unwrap()
}

#[test]
fn test_open_single_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("events.parquet");
    write_batch_to(&path, &fixture_batch(&[(1, 11, 100), (1, 11, 101), (1, 12, 100)]));

    let reader = NtupleReader::open(&path)?;
    assert_eq!(reader.total_rows(), 3);
    assert_eq!(reader.schema().fields().len(), 10);
    assert_eq!(reader.read_schema().fields().len(), 10);

    let batches = reader.read_all_batches()?;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].num_rows(), 3);

    Ok(())
}

#[test]
fn test_chain_preserves_file_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path_a = dir.path().join("a.parquet");
    let path_b = dir.path().join("b.parquet");
    write_batch_to(&path_a, &fixture_batch(&[(1, 11, 100), (1, 11, 101)]));
    write_batch_to(&path_b, &fixture_batch(&[(2, 22, 200)]));

    let reader = NtupleReader::chain(&[&path_a, &path_b], ReaderConfig::default())?;
    assert_eq!(reader.total_rows(), 3);
    assert_eq!(reader.paths().len(), 2);

    let batches = reader.read_all_batches()?;
    assert_eq!(batches.len(), 2);

    let ids_a = EventIdColumns::try_new(&batches[0])?;
    assert_eq!(ids_a.event_id(0), EventId::new(1, 11, 100));
    assert_eq!(ids_a.event_id(1), EventId::new(1, 11, 101));

    let ids_b = EventIdColumns::try_new(&batches[1])?;
    assert_eq!(ids_b.event_id(0), EventId::new(2, 22, 200));

    Ok(())
}

#[test]
fn test_column_pushdown() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("events.parquet");
    write_batch_to(&path, &fixture_batch(&[(1, 11, 100), (1, 11, 101)]));

    let config = ReaderConfig {
        columns: Some(vec![columns::RUN.to_string(), columns::EVENT.to_string()]),
        ..ReaderConfig::default()
    };
    let reader = NtupleReader::open_with_config(&path, config)?;

    // Full schema stays visible, batches carry only the requested columns
    assert_eq!(reader.schema().fields().len(), 10);
    assert_eq!(reader.read_schema().fields().len(), 2);
    assert_eq!(reader.read_schema().field(0).name(), columns::RUN);
    assert_eq!(reader.read_schema().field(1).name(), columns::EVENT);

    let batches = reader.read_all_batches()?;
    assert_eq!(batches[0].num_columns(), 2);
    assert_eq!(batches[0].num_rows(), 2);

    Ok(())
}

#[test]
fn test_batch_size_respected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("events.parquet");
    write_batch_to(
        &path,
        &fixture_batch(&[
            (1, 11, 100),
            (1, 11, 101),
            (1, 11, 102),
            (1, 11, 103),
            (1, 11, 104),
        ]),
    );

    let config = ReaderConfig {
        batch_size: 2,
        ..ReaderConfig::default()
    };
    let reader = NtupleReader::open_with_config(&path, config)?;

    let sizes: Vec<usize> = reader
        .read_all_batches()?
        .iter()
        .map(|b| b.num_rows())
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    Ok(())
}

#[test]
fn test_chain_rejects_missing_column() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path_a = dir.path().join("a.parquet");
    let path_b = dir.path().join("b.parquet");
    write_batch_to(&path_a, &fixture_batch(&[(1, 11, 100)]));

    // Second file lacks the trailing mass4l column
    let full = fixture_batch(&[(2, 22, 200)]);
    let partial = full.project(&[0, 1, 2, 3, 4, 5, 6, 7, 8])?;
    write_batch_to(&path_b, &partial);

    let err = NtupleReader::chain(&[&path_a, &path_b], ReaderConfig::default())
        .err()
        .ok_or("chain should fail")?;
    assert!(matches!(err, ReaderError::ColumnNotFound(_)));

    Ok(())
}

#[test]
fn test_chain_rejects_type_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path_a = dir.path().join("a.parquet");
    let path_b = dir.path().join("b.parquet");
    write_batch_to(&path_a, &fixture_batch(&[(1, 11, 100)]));

    // Second file stores mass4l as Float64
    let full = fixture_batch(&[(2, 22, 200)]);
    let mut fields: Vec<Field> = fixture_schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields[9] = Field::new(columns::MASS4L, DataType::Float64, false);
    let mut arrays = full.columns().to_vec();
    arrays[9] = Arc::new(Float64Array::from(vec![125.0_f64]));
    let mismatched = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    write_batch_to(&path_b, &mismatched);

    let err = NtupleReader::chain(&[&path_a, &path_b], ReaderConfig::default())
        .err()
        .ok_or("chain should fail")?;
    assert!(matches!(err, ReaderError::InvalidFormat(_)));

    Ok(())
}

#[test]
fn test_requested_column_missing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("events.parquet");
    write_batch_to(&path, &fixture_batch(&[(1, 11, 100)]));

    let config = ReaderConfig {
        columns: Some(vec![columns::RUN.to_string(), "not_a_column".to_string()]),
        ..ReaderConfig::default()
    };
    let err = NtupleReader::open_with_config(&path, config)
        .err()
        .ok_or("open should fail")?;
    match err {
        ReaderError::ColumnNotFound(name) => assert!(name.contains("not_a_column")),
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_directory_resolves_events_table() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_batch_to(
        &dir.path().join("passedEvents.parquet"),
        &fixture_batch(&[(1, 11, 100), (1, 11, 101)]),
    );

    let reader = NtupleReader::open(dir.path())?;
    assert_eq!(reader.total_rows(), 2);

    Ok(())
}

#[test]
fn test_directory_resolves_mc_table() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("Ana"))?;
    write_batch_to(
        &dir.path().join("Ana").join("passedEvents.parquet"),
        &fixture_batch(&[(1, 11, 100)]),
    );

    let config = ReaderConfig {
        table: MC_EVENTS_TABLE.to_string(),
        ..ReaderConfig::default()
    };
    let reader = NtupleReader::open_with_config(dir.path(), config)?;
    assert_eq!(reader.total_rows(), 1);

    Ok(())
}

#[test]
fn test_directory_without_table_fails() {
    let dir = tempdir().unwrap();
    let err = NtupleReader::open(dir.path()).err().unwrap();
    assert!(matches!(err, ReaderError::InvalidFormat(_)));
}

#[test]
fn test_chain_requires_input() {
    let paths: Vec<PathBuf> = Vec::new();
    let err = NtupleReader::chain(&paths, ReaderConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, ReaderError::InvalidFormat(_)));
}

#[test]
fn test_selection_columns_view() -> Result<(), Box<dyn std::error::Error>> {
    let batch = selection_batch(
        &[(true, false)],
        &[vec![40.0, 30.0, 25.0, 20.0]],
        &[vec![13, -13, 11, -11]],
        &[vec![1, 1, 1, 1]],
        &[vec![0.1, 0.2, 0.9, 0.9]],
    );

    let view = SelectionColumns::try_new(&batch)?;
    let record = view.record(0)?;

    assert!(record.passed_z1l);
    assert!(!record.passed_zxcr);
    assert_eq!(record.n_leptons, 4);
    assert_eq!(record.lep_id.to_vec(), vec![13, -13, 11, -11]);
    assert_eq!(record.lep_tight_id.to_vec(), vec![1, 1, 1, 1]);
    assert_eq!(record.lep_rel_iso.to_vec(), vec![0.1_f32, 0.2, 0.9, 0.9]);

    // The high-iso leptons here are electrons, so the event still counts
    // as 4-prompt when classified.
    let classification = classify(&record, &SelectionConfig::default());
    assert!(classification.categories.four_p);

    Ok(())
}

#[test]
fn test_view_rejects_mismatched_sequences() -> Result<(), Box<dyn std::error::Error>> {
    let batch = selection_batch(
        &[(false, false)],
        &[vec![40.0, 30.0, 25.0, 20.0]],
        &[vec![13, -13, 13]],
        &[vec![1, 1, 1, 1]],
        &[vec![0.1, 0.1, 0.1, 0.1]],
    );

    let view = SelectionColumns::try_new(&batch)?;
    let err = view.record(0).err().ok_or("record should fail")?;
    match err {
        ReaderError::InvalidFormat(msg) => assert!(msg.contains("mismatched")),
        other => panic!("expected InvalidFormat, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_event_id_columns() -> Result<(), Box<dyn std::error::Error>> {
    let batch = fixture_batch(&[(1, 11, 100), (2, 22, 200)]);
    let ids = EventIdColumns::try_new(&batch)?;

    assert_eq!(ids.event_id(0), EventId::new(1, 11, 100));
    assert_eq!(ids.event_id(1), EventId::new(2, 22, 200));

    Ok(())
}
