use anyhow::{bail, Context, Result};
use parquet::arrow::parquet_to_arrow_schema;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::schema::types::Type;
use std::fs::File;
use std::path::PathBuf;

use ntskim::schema::validate_event_schema;

/// Display information about an ntuple Parquet file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let size_bytes = std::fs::metadata(&file)
        .with_context(|| format!("Failed to stat {}", file.display()))?
        .len();

    let handle = File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;
    let reader = SerializedFileReader::new(handle)
        .with_context(|| format!("Failed to read Parquet footer of {}", file.display()))?;

    let metadata = reader.metadata();
    let file_metadata = metadata.file_metadata();

    println!("Ntuple file: {}", file.display());
    println!();
    println!("File statistics:");
    println!("  Size:       {:.2} MB", size_bytes as f64 / 1_048_576.0);
    println!("  Rows:       {}", file_metadata.num_rows());
    println!("  Row groups: {}", metadata.num_row_groups());
    println!(
        "  Columns:    {}",
        file_metadata.schema().get_fields().len()
    );
    if let Some(created_by) = file_metadata.created_by() {
        println!("  Created by: {}", created_by);
    }

    println!();
    println!("Row groups:");
    for i in 0..metadata.num_row_groups() {
        let group = metadata.row_group(i);
        println!(
            "  {:3}. {} rows, {:.2} MB compressed",
            i,
            group.num_rows(),
            group.compressed_size() as f64 / 1_048_576.0
        );
    }

    if let Some(entries) = file_metadata.key_value_metadata() {
        println!();
        println!("Footer metadata:");
        let mut entries: Vec<_> = entries.iter().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        for entry in entries {
            let value = entry.value.as_deref().unwrap_or("");
            let preview: String = value.chars().take(100).collect();
            if preview.len() < value.len() {
                println!("  {}: {}...", entry.key, preview);
            } else {
                println!("  {}: {}", entry.key, value);
            }
        }
    }

    println!();
    println!("Schema:");
    for (i, field) in file_metadata.schema().get_fields().iter().enumerate() {
        println!("  {:3}. {} ({})", i + 1, field.name(), describe_type(field));
    }

    // A file can still be skimmed without these columns (dedup-only or
    // pass-through jobs), so a failure here is informational.
    println!();
    match parquet_to_arrow_schema(
        file_metadata.schema_descr(),
        file_metadata.key_value_metadata(),
    ) {
        Ok(arrow_schema) => match validate_event_schema(&arrow_schema) {
            Ok(()) => println!("Skim compatibility: full"),
            Err(err) => println!("Skim compatibility: limited ({err})"),
        },
        Err(err) => println!("Skim compatibility: unknown ({err})"),
    }

    Ok(())
}

/// Renders a top-level Parquet field as a short type label. List columns use
/// the three-level encoding (outer group > "list" > "item").
fn describe_type(field: &Type) -> String {
    match field {
        Type::PrimitiveType { physical_type, .. } => format!("{}", physical_type),
        Type::GroupType { fields, .. } => {
            let item = fields
                .first()
                .and_then(|list| match list.as_ref() {
                    Type::GroupType { fields, .. } => fields.first(),
                    Type::PrimitiveType { .. } => None,
                })
                .map(|item| match item.as_ref() {
                    Type::PrimitiveType { physical_type, .. } => format!("{}", physical_type),
                    Type::GroupType { .. } => "group".to_string(),
                });
            match item {
                Some(item) => format!("list<{}>", item),
                None => "group".to_string(),
            }
        }
    }
}
