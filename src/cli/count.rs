use anyhow::{Context, Result};
use std::path::PathBuf;

use ntskim::dedup::Deduplicator;
use ntskim::projection::read_set;
use ntskim::reader::{EventIdColumns, NtupleReader, ReaderConfig, SelectionColumns};
use ntskim::schema::columns::{EVENT_ID_COLUMNS, SELECTION_COLUMNS};
use ntskim::schema::{DATA_EVENTS_TABLE, MC_EVENTS_TABLE};
use ntskim::selection::{classify, SelectionConfig, SelectionCounts};

/// Tallies selection categories across the inputs without writing a skim.
///
/// Reads only the selection and id columns, so it is much cheaper than a
/// full skim over wide ntuples.
pub fn run(inputs: &[PathBuf], mc: bool, tree: Option<&str>, no_dedup: bool) -> Result<()> {
    let table = match tree {
        Some(name) => name.to_string(),
        None if mc => MC_EVENTS_TABLE.to_string(),
        None => DATA_EVENTS_TABLE.to_string(),
    };

    let mut groups: Vec<&[&str]> = vec![&SELECTION_COLUMNS];
    if !no_dedup {
        groups.push(&EVENT_ID_COLUMNS);
    }

    let config = ReaderConfig {
        table: table.clone(),
        columns: Some(read_set(&groups)),
        ..ReaderConfig::default()
    };
    let reader = NtupleReader::chain(inputs, config).context("Failed to open input ntuples")?;

    let selection = SelectionConfig::default();
    let mut counts = SelectionCounts::new();
    let mut dedup = (!no_dedup).then(Deduplicator::new);
    let mut events_read: u64 = 0;

    for batch in reader.iter_batches() {
        let batch = batch?;
        let view = SelectionColumns::try_new(&batch)?;
        let ids = match &dedup {
            Some(_) => Some(EventIdColumns::try_new(&batch)?),
            None => None,
        };

        for row in 0..batch.num_rows() {
            events_read += 1;
            if let (Some(dedup), Some(ids)) = (dedup.as_mut(), ids.as_ref()) {
                if dedup.is_duplicate(ids.event_id(row)) {
                    continue;
                }
            }
            counts.record(&classify(&view.record(row)?, &selection));
        }
    }

    println!(
        "Event counts ({} input file(s), table '{}'):",
        inputs.len(),
        table
    );
    println!("  Events read:        {}", events_read);
    if let Some(dedup) = &dedup {
        println!("  Duplicates dropped: {}", dedup.duplicates());
    }
    println!("  Z+L events:         {}", counts.z1l);
    println!("  Z+X CR events:      {}", counts.zxcr);
    println!("  Four-prompt events: {}", counts.four_p);
    println!("  In any category:    {}", counts.kept);

    Ok(())
}
