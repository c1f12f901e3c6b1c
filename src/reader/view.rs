use arrow::array::{Array, BooleanArray, Float32Array, Int32Array, ListArray, UInt64Array};
use arrow::record_batch::RecordBatch;

use crate::dedup::EventId;
use crate::schema::columns;
use crate::selection::EventRecord;

use super::utils::{get_boolean_column, get_list_column, get_uint64_column};
use super::ReaderError;

/// Selection inputs of one batch, downcast once.
///
/// Per-row [`EventRecord`]s borrow straight from the batch's child arrays,
/// so classifying a batch allocates nothing.
pub struct SelectionColumns<'a> {
    passed_z1l: &'a BooleanArray,
    passed_zxcr: &'a BooleanArray,
    pt_offsets: &'a [i32],
    id_offsets: &'a [i32],
    tight_offsets: &'a [i32],
    iso_offsets: &'a [i32],
    id_values: &'a Int32Array,
    tight_values: &'a Int32Array,
    iso_values: &'a Float32Array,
}

impl<'a> SelectionColumns<'a> {
    /// Borrows the selection columns out of a batch.
    pub fn try_new(batch: &'a RecordBatch) -> Result<Self, ReaderError> {
        let passed_z1l = get_boolean_column(batch, columns::PASSED_Z1L_SELECTION)?;
        let passed_zxcr = get_boolean_column(batch, columns::PASSED_ZXCR_SELECTION)?;

        let lep_pt = get_list_column(batch, columns::LEP_PT)?;
        let lep_id = get_list_column(batch, columns::LEP_ID)?;
        let lep_tight = get_list_column(batch, columns::LEP_TIGHT_ID)?;
        let lep_iso = get_list_column(batch, columns::LEP_REL_ISO_NO_FSR)?;

        Ok(Self {
            passed_z1l,
            passed_zxcr,
            pt_offsets: lep_pt.value_offsets(),
            id_offsets: lep_id.value_offsets(),
            tight_offsets: lep_tight.value_offsets(),
            iso_offsets: lep_iso.value_offsets(),
            id_values: int32_items(lep_id, columns::LEP_ID)?,
            tight_values: int32_items(lep_tight, columns::LEP_TIGHT_ID)?,
            iso_values: float32_items(lep_iso, columns::LEP_REL_ISO_NO_FSR)?,
        })
    }

    /// Builds the borrowed selection record for one row.
    ///
    /// The parallel per-lepton sequences must agree in length for the row;
    /// a mismatch means the input is malformed and aborts the pass.
    pub fn record(&self, row: usize) -> Result<EventRecord<'a>, ReaderError> {
        let n_leptons = range_len(self.pt_offsets, row);
        let n_id = range_len(self.id_offsets, row);
        let n_tight = range_len(self.tight_offsets, row);
        let n_iso = range_len(self.iso_offsets, row);

        if n_id != n_leptons || n_tight != n_leptons || n_iso != n_leptons {
            return Err(ReaderError::InvalidFormat(format!(
                "Row {} has mismatched lepton sequences: {}={}, {}={}, {}={}, {}={}",
                row,
                columns::LEP_PT,
                n_leptons,
                columns::LEP_ID,
                n_id,
                columns::LEP_TIGHT_ID,
                n_tight,
                columns::LEP_REL_ISO_NO_FSR,
                n_iso
            )));
        }

        Ok(EventRecord {
            passed_z1l: self.passed_z1l.value(row),
            passed_zxcr: self.passed_zxcr.value(row),
            lep_id: slice_values(self.id_values.values(), self.id_offsets, row),
            lep_tight_id: slice_values(self.tight_values.values(), self.tight_offsets, row),
            lep_rel_iso: slice_values(self.iso_values.values(), self.iso_offsets, row),
            n_leptons,
        })
    }
}

/// Event identifier columns of one batch, downcast once.
pub struct EventIdColumns<'a> {
    run: &'a UInt64Array,
    lumi_sect: &'a UInt64Array,
    event: &'a UInt64Array,
}

impl<'a> EventIdColumns<'a> {
    /// Borrows the identifier columns out of a batch.
    pub fn try_new(batch: &'a RecordBatch) -> Result<Self, ReaderError> {
        Ok(Self {
            run: get_uint64_column(batch, columns::RUN)?,
            lumi_sect: get_uint64_column(batch, columns::LUMI_SECT)?,
            event: get_uint64_column(batch, columns::EVENT)?,
        })
    }

    /// The composite identifier of one row.
    pub fn event_id(&self, row: usize) -> EventId {
        EventId::new(
            self.run.value(row),
            self.lumi_sect.value(row),
            self.event.value(row),
        )
    }
}

fn range_len(offsets: &[i32], row: usize) -> usize {
    (offsets[row + 1] - offsets[row]) as usize
}

fn slice_values<'a, T>(values: &'a [T], offsets: &[i32], row: usize) -> &'a [T] {
    &values[offsets[row] as usize..offsets[row + 1] as usize]
}

fn int32_items<'a>(list: &'a ListArray, name: &str) -> Result<&'a Int32Array, ReaderError> {
    list.values()
        .as_any()
        .downcast_ref::<Int32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} items are not Int32", name)))
}

fn float32_items<'a>(list: &'a ListArray, name: &str) -> Result<&'a Float32Array, ReaderError> {
    list.values()
        .as_any()
        .downcast_ref::<Float32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} items are not Float32", name)))
}
