use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::columns;

/// Compression options for skim output files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        // ZSTD level 3 is a good balance of speed and compression
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Configuration for the skim writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of events per group)
    /// Smaller = better random access, larger = better compression
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Dictionary page size limit in bytes
    pub dictionary_page_size_limit: usize,

    /// Enable BYTE_STREAM_SPLIT encoding for floating-point columns.
    /// Grouping bytes of similar magnitude together improves compression
    /// for kinematic quantities (masses, momenta, discriminants).
    /// Default: true
    pub use_byte_stream_split: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            // ZSTD level 9: skim outputs are archival, write speed is secondary
            compression: CompressionType::Zstd(9),
            // 100k events per row group
            row_group_size: 100_000,
            // 1MB data pages
            data_page_size: 1024 * 1024,
            write_statistics: true,
            // 1MB dictionary page limit
            dictionary_page_size_limit: 1024 * 1024,
            use_byte_stream_split: true,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::Zstd(22),
            row_group_size: 500_000, // Larger row groups = better compression
            data_page_size: 2 * 1024 * 1024, // 2MB pages
            write_statistics: true,
            dictionary_page_size_limit: 2 * 1024 * 1024,
            use_byte_stream_split: true,
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::Snappy,
            row_group_size: 50_000,
            data_page_size: 512 * 1024,
            write_statistics: true,
            dictionary_page_size_limit: 512 * 1024,
            use_byte_stream_split: true,
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or(ZstdLevel::default()))
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_dictionary_page_size_limit(self.dictionary_page_size_limit)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Run and LumiSect repeat in long stretches within a file, so dictionary
        // encoding + RLE compresses them to almost nothing.
        // Note: Parquet automatically uses RLE for dictionary-encoded data.
        let dict_columns = [columns::RUN, columns::LUMI_SECT];

        for col in dict_columns {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), true);
        }

        // Event numbers are unique per row: a dictionary would only add overhead.
        builder = builder.set_column_dictionary_enabled(
            ColumnPath::new(vec![columns::EVENT.to_string()]),
            false,
        );

        // Scalar floating-point columns: high cardinality, disable dictionary.
        let float_scalar_columns = [
            columns::EVENT_WEIGHT,
            columns::K_QQZZ_QCD_M,
            columns::K_QQZZ_EWK,
            columns::MET,
            columns::MASS4L,
            columns::MASS4L_NOFSR,
            columns::MASS4L_ERR,
            columns::MASS4L_REFIT,
            columns::MASS4L_ERR_REFIT,
            columns::MASS4L_VTX_BS,
            columns::MASS4L_VTXFSR_BS,
            columns::MASS4L_ERR_VTX_BS,
            columns::MASS4L_REFIT_VTX_BS,
            columns::MASS4L_ERR_REFIT_VTX_BS,
            columns::D_BKG_KIN,
            columns::D_BKG_KIN_VTX_BS,
        ];

        // Per-lepton floating-point list columns. Their leaf lives under the
        // three-level Parquet list encoding, so the path is name.list.item.
        let float_list_columns = [
            columns::LEP_PT,
            columns::LEP_ETA,
            columns::LEP_PHI,
            columns::LEP_MASS,
            columns::LEP_REL_ISO_NO_FSR,
            columns::LEP_FSR_PT,
            columns::LEP_FSR_ETA,
            columns::LEP_FSR_PHI,
            columns::LEP_FSR_MASS,
            columns::VTX_LEP_FSR_BS_PT,
            columns::VTX_LEP_FSR_BS_ETA,
            columns::VTX_LEP_FSR_BS_PHI,
            columns::VTX_LEP_FSR_BS_MASS,
        ];

        for col in float_scalar_columns {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), false);
        }
        for col in float_list_columns {
            builder = builder.set_column_dictionary_enabled(list_item_path(col), false);
        }

        // BYTE_STREAM_SPLIT groups the bytes of each float (exponents together,
        // mantissas together), which compresses correlated kinematics well.
        if self.use_byte_stream_split {
            for col in float_scalar_columns {
                builder = builder.set_column_encoding(
                    ColumnPath::new(vec![col.to_string()]),
                    Encoding::BYTE_STREAM_SPLIT,
                );
            }
            for col in float_list_columns {
                builder =
                    builder.set_column_encoding(list_item_path(col), Encoding::BYTE_STREAM_SPLIT);
            }
        }

        // Add key-value metadata
        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}

/// Column path for the item leaf of a List column.
fn list_item_path(col: &str) -> ColumnPath {
    ColumnPath::new(vec![
        col.to_string(),
        "list".to_string(),
        "item".to_string(),
    ])
}
