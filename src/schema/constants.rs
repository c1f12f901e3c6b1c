/// ntskim table format version - follows semantic versioning
pub const NTSKIM_FORMAT_VERSION: &str = "1.0.0";

/// Events table name for collision data inside a dataset directory
pub const DATA_EVENTS_TABLE: &str = "passedEvents";

/// Events table name for simulated samples inside a dataset directory
pub const MC_EVENTS_TABLE: &str = "Ana/passedEvents";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "ntskim:format_version";

/// Metadata key for the skim creation timestamp
pub const KEY_CREATED: &str = "ntskim:created";

/// Metadata key for the writing tool and its version
pub const KEY_WRITER_VERSION: &str = "ntskim:writer_version";

/// Metadata key for the list of input files the skim was produced from
pub const KEY_SOURCE_FILES: &str = "ntskim:source_files";

/// Metadata key for the events table name the inputs were read from
pub const KEY_SOURCE_TABLE: &str = "ntskim:source_table";

/// Metadata key for the selection categories enabled during the skim
pub const KEY_SELECTION: &str = "ntskim:selection";
