use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{EmptyInput, FlowTagError, RecordError, Result};
use crate::models::domain::{FlowCounts, FlowRecord, TagTable};
use crate::parser::load_flow_records;
use crate::protocols::ProtocolTable;
use crate::tags::load_tag_table;

/// Tag assigned to recognized records with no tag table entry.
pub const UNTAGGED: &str = "untagged";

/// Counts `records` by tag and by `"<port>,<protocol>"`.
///
/// Fails with [`FlowTagError::EmptyInput`] when either input is empty. Records whose
/// protocol number is not in `protocols` are logged and left out of both counters.
pub fn aggregate<I>(records: I, tags: &TagTable, protocols: &ProtocolTable) -> Result<FlowCounts>
where
    I: IntoIterator<Item = FlowRecord>,
{
    let mut records = records.into_iter().peekable();
    if records.peek().is_none() {
        return Err(FlowTagError::EmptyInput(EmptyInput::FlowLogs));
    }
    if tags.is_empty() {
        return Err(FlowTagError::EmptyInput(EmptyInput::Tags));
    }

    let mut counts = FlowCounts::default();
    for record in records {
        if let Err(e) = count_record(&mut counts, &record, tags, protocols) {
            match e {
                RecordError::UnknownProtocol { .. } => {
                    warn!("{}", e);
                    counts.unrecognized += 1;
                }
                other => return Err(FlowTagError::Aggregation(other)),
            }
        }
    }

    debug!(
        tags = counts.tags.len(),
        port_protocols = counts.port_protocols.len(),
        unrecognized = counts.unrecognized,
        "aggregation finished"
    );
    Ok(counts)
}

fn count_record(
    counts: &mut FlowCounts,
    record: &FlowRecord,
    tags: &TagTable,
    protocols: &ProtocolTable,
) -> std::result::Result<(), RecordError> {
    let protocol = protocols
        .lookup(&record.protocol_number)
        .ok_or_else(|| RecordError::UnknownProtocol {
            protocol: record.protocol_number.clone(),
        })?;

    let key = format!("{},{}", record.dst_port, protocol);
    counts.port_protocols.increment(&key)?;
    counts.tags.increment(tags.get(&key).unwrap_or(UNTAGGED))?;
    Ok(())
}

/// Loads both inputs and aggregates them against the IANA protocol table.
pub fn generate_counts(logs_file: &Path, tags_file: &Path) -> Result<FlowCounts> {
    let records = load_flow_records(logs_file);
    let tags = load_tag_table(tags_file);
    info!(
        records = records.len(),
        tags = tags.len(),
        "inputs loaded"
    );

    aggregate(records, &tags, ProtocolTable::iana())
}
