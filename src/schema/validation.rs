use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema can drive the skim pipeline.
///
/// Returns `Ok(())` if the schema contains the event-identifier and selection
/// columns with correct types, or an error describing the incompatibility.
/// Columns outside this required set are not constrained; the projector copes
/// with any extras.
pub fn validate_event_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let required_scalars = [
        (columns::RUN, DataType::UInt64),
        (columns::LUMI_SECT, DataType::UInt64),
        (columns::EVENT, DataType::UInt64),
        (columns::PASSED_Z1L_SELECTION, DataType::Boolean),
        (columns::PASSED_ZXCR_SELECTION, DataType::Boolean),
    ];

    for (name, expected_type) in required_scalars {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != &expected_type {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    // List columns are matched on their item type only; the item field name
    // and nullability vary between writers.
    let required_lists = [
        (columns::LEP_PT, DataType::Float32),
        (columns::LEP_ID, DataType::Int32),
        (columns::LEP_TIGHT_ID, DataType::Int32),
        (columns::LEP_REL_ISO_NO_FSR, DataType::Float32),
    ];

    for (name, item_type) in required_lists {
        match schema.field_with_name(name) {
            Ok(field) => match field.data_type() {
                DataType::List(item) if item.data_type() == &item_type => {}
                other => {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("List<{:?}>", item_type),
                        found: format!("{:?}", other),
                    });
                }
            },
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
