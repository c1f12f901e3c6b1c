use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::KEY_FORMAT_VERSION;
use super::constants::NTSKIM_FORMAT_VERSION;

/// Creates a scalar Field with a unit annotation in its metadata
fn field_with_unit(name: &str, data_type: DataType, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("unit".to_string(), unit.to_string());
    Field::new(name, data_type, false).with_metadata(metadata)
}

/// Creates a non-nullable list Field with non-nullable items
fn list_field(name: &str, item_type: DataType) -> Field {
    Field::new(
        name,
        DataType::List(Arc::new(Field::new("item", item_type, false))),
        false,
    )
}

/// Creates a list Field with a unit annotation in its metadata
fn list_field_with_unit(name: &str, item_type: DataType, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("unit".to_string(), unit.to_string());
    list_field(name, item_type).with_metadata(metadata)
}

/// Creates the canonical Arrow schema for the four-lepton event table.
///
/// Every column is non-nullable, matching the upstream ntuples where each
/// branch is filled for every event. Per-lepton quantities are stored as
/// list columns whose items are indexed in parallel across the row.
///
/// # Example
///
/// ```
/// use ntskim::schema::create_event_schema;
///
/// let schema = create_event_schema();
/// assert_eq!(schema.fields().len(), 42);
/// ```
pub fn create_event_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    // Event identifiers (the deduplication key)
    builder.push(Field::new(columns::RUN, DataType::UInt64, false));
    builder.push(Field::new(columns::LUMI_SECT, DataType::UInt64, false));
    builder.push(Field::new(columns::EVENT, DataType::UInt64, false));

    // Upstream selection flags, trusted as-is
    builder.push(Field::new(
        columns::PASSED_Z1L_SELECTION,
        DataType::Boolean,
        false,
    ));
    builder.push(Field::new(
        columns::PASSED_ZXCR_SELECTION,
        DataType::Boolean,
        false,
    ));
    builder.push(Field::new(
        columns::PASSED_FIDUCIAL_SELECTION,
        DataType::Boolean,
        false,
    ));

    // Event-level weights and k-factors
    builder.push(Field::new(columns::EVENT_WEIGHT, DataType::Float32, false));
    builder.push(Field::new(columns::K_QQZZ_QCD_M, DataType::Float32, false));
    builder.push(Field::new(columns::K_QQZZ_EWK, DataType::Float32, false));

    // Event-level kinematics
    builder.push(field_with_unit(columns::MET, DataType::Float32, "GeV"));
    builder.push(field_with_unit(columns::MASS4L, DataType::Float32, "GeV"));
    builder.push(field_with_unit(
        columns::MASS4L_NOFSR,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_ERR,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_REFIT,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_ERR_REFIT,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_VTX_BS,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_VTXFSR_BS,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_ERR_VTX_BS,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_REFIT_VTX_BS,
        DataType::Float32,
        "GeV",
    ));
    builder.push(field_with_unit(
        columns::MASS4L_ERR_REFIT_VTX_BS,
        DataType::Float32,
        "GeV",
    ));

    // Matrix-element discriminants (dimensionless, in [0, 1])
    builder.push(Field::new(columns::D_BKG_KIN, DataType::Float32, false));
    builder.push(Field::new(
        columns::D_BKG_KIN_VTX_BS,
        DataType::Float32,
        false,
    ));

    // Per-lepton integer sequences
    builder.push(list_field(columns::LEP_ID, DataType::Int32));
    builder.push(list_field(columns::LEP_TIGHT_ID, DataType::Int32));
    builder.push(list_field(columns::LEP_HINDEX, DataType::Int32));
    builder.push(list_field(columns::LEP_GENINDEX, DataType::Int32));
    builder.push(list_field(columns::LEP_MATCHED_R03_PDG_ID, DataType::Int32));
    builder.push(list_field(columns::LEP_MATCHED_R03_MOM_ID, DataType::Int32));
    builder.push(list_field(
        columns::LEP_MATCHED_R03_MOM_MOM_ID,
        DataType::Int32,
    ));

    // Per-lepton kinematics
    builder.push(list_field_with_unit(
        columns::LEP_PT,
        DataType::Float32,
        "GeV",
    ));
    builder.push(list_field(columns::LEP_ETA, DataType::Float32));
    builder.push(list_field(columns::LEP_PHI, DataType::Float32));
    builder.push(list_field_with_unit(
        columns::LEP_MASS,
        DataType::Float32,
        "GeV",
    ));
    builder.push(list_field(columns::LEP_REL_ISO_NO_FSR, DataType::Float32));

    // Per-lepton kinematics after FSR recovery
    builder.push(list_field_with_unit(
        columns::LEP_FSR_PT,
        DataType::Float32,
        "GeV",
    ));
    builder.push(list_field(columns::LEP_FSR_ETA, DataType::Float32));
    builder.push(list_field(columns::LEP_FSR_PHI, DataType::Float32));
    builder.push(list_field_with_unit(
        columns::LEP_FSR_MASS,
        DataType::Float32,
        "GeV",
    ));

    // Per-lepton kinematics from the beamspot-constrained vertex fit.
    // Stored at Float64 upstream, kept as-is.
    builder.push(list_field_with_unit(
        columns::VTX_LEP_FSR_BS_PT,
        DataType::Float64,
        "GeV",
    ));
    builder.push(list_field(columns::VTX_LEP_FSR_BS_ETA, DataType::Float64));
    builder.push(list_field(columns::VTX_LEP_FSR_BS_PHI, DataType::Float64));
    builder.push(list_field_with_unit(
        columns::VTX_LEP_FSR_BS_MASS,
        DataType::Float64,
        "GeV",
    ));

    let mut schema = builder.finish();

    // Add schema-level metadata
    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        NTSKIM_FORMAT_VERSION.to_string(),
    );
    metadata.insert(
        "ntskim:schema_description".to_string(),
        "Per-event four-lepton ntuple with parallel per-lepton list columns".to_string(),
    );

    schema = schema.with_metadata(metadata);
    schema
}

/// Returns an Arc-wrapped schema for shared ownership
pub fn create_event_schema_arc() -> Arc<Schema> {
    Arc::new(create_event_schema())
}
