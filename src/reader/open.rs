use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::{Schema, SchemaRef};
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::projection::Projection;

use super::{NtupleReader, ReaderConfig, ReaderError};

impl NtupleReader {
    /// Opens a single ntuple file or dataset directory with defaults.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Opens a single ntuple file or dataset directory with custom
    /// configuration.
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        Self::chain(std::slice::from_ref(&path), config)
    }

    /// Opens an ordered list of inputs as one logical event stream.
    ///
    /// Directories are resolved to `<table>.parquet` inside them; plain
    /// paths are read as Parquet files directly. Every footer is inspected
    /// here: requested columns must exist in each file with the type they
    /// have in the first, and the total row count is summed for progress
    /// reporting.
    pub fn chain<P: AsRef<Path>>(paths: &[P], config: ReaderConfig) -> Result<Self, ReaderError> {
        if paths.is_empty() {
            return Err(ReaderError::InvalidFormat(
                "No input files were given".to_string(),
            ));
        }

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(resolve_events_file(path.as_ref(), &config.table)?);
        }

        let (schema, mut total_rows) = read_footer(&files[0])?;
        verify_columns(&schema, config.columns.as_deref(), &schema, &files[0])?;

        for file_path in &files[1..] {
            let (file_schema, rows) = read_footer(file_path)?;
            verify_columns(&schema, config.columns.as_deref(), &file_schema, file_path)?;
            total_rows += rows;
        }

        let read_schema = match &config.columns {
            Some(columns) => Projection::resolve(columns, &schema)?.schema(),
            None => schema.clone(),
        };

        debug!(
            "Opened chain of {} file(s): {} rows, reading {} of {} columns",
            files.len(),
            total_rows,
            read_schema.fields().len(),
            schema.fields().len()
        );

        Ok(Self {
            files,
            schema,
            read_schema,
            total_rows,
            config,
        })
    }
}

/// Resolves one input path to the events Parquet file it denotes.
fn resolve_events_file(path: &Path, table: &str) -> Result<PathBuf, ReaderError> {
    if path.is_dir() {
        let events_path = path.join(format!("{table}.parquet"));
        if !events_path.exists() {
            return Err(ReaderError::InvalidFormat(format!(
                "Dataset directory missing {table}.parquet: {}",
                path.display()
            )));
        }
        Ok(events_path)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Reads one file's footer: its Arrow schema and row count.
fn read_footer(path: &Path) -> Result<(SchemaRef, u64), ReaderError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let rows = builder.metadata().file_metadata().num_rows().max(0) as u64;
    Ok((builder.schema().clone(), rows))
}

/// Checks that `file_schema` carries the columns a pass will read, with the
/// types the reference schema gives them.
///
/// With no column restriction the whole reference schema is required, so a
/// chain of full-width files must agree column for column. Field metadata
/// and nullability may differ between producers and are not compared.
fn verify_columns(
    reference: &Schema,
    columns: Option<&[String]>,
    file_schema: &Schema,
    path: &Path,
) -> Result<(), ReaderError> {
    let required: Vec<&str> = match columns {
        Some(names) => names.iter().map(|n| n.as_str()).collect(),
        None => reference.fields().iter().map(|f| f.name().as_str()).collect(),
    };

    for name in required {
        let expected = match reference.field_with_name(name) {
            Ok(field) => field,
            Err(_) => return Err(ReaderError::ColumnNotFound(name.to_string())),
        };
        match file_schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != expected.data_type() {
                    return Err(ReaderError::InvalidFormat(format!(
                        "Column '{}' in {} is {:?}, but the chain reads it as {:?}",
                        name,
                        path.display(),
                        field.data_type(),
                        expected.data_type()
                    )));
                }
            }
            Err(_) => {
                return Err(ReaderError::ColumnNotFound(format!(
                    "{} (missing from {})",
                    name,
                    path.display()
                )));
            }
        }
    }

    Ok(())
}
