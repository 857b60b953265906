// flow log lines are positional: only the field count is validated,
// never the content of the fields we keep

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, error, warn};

use crate::error::RecordError;
use crate::models::domain::FlowRecord;

pub const MIN_FIELDS: usize = 14;
pub const DST_PORT_FIELD: usize = 6;
pub const PROTOCOL_FIELD: usize = 7;

pub fn parse_flow_line(line: &str) -> Result<FlowRecord, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(RecordError::MalformedRecord {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok(FlowRecord {
        dst_port: fields[DST_PORT_FIELD].to_string(),
        protocol_number: fields[PROTOCOL_FIELD].to_string(),
    })
}

/// Reads every line, keeping valid records in input order and logging the rest.
pub fn read_flow_records<R: BufRead>(reader: R) -> io::Result<Vec<FlowRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        match parse_flow_line(&line?) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("{}", e);
                skipped += 1;
            }
        }
    }

    debug!(records = records.len(), skipped, "flow log parsed");
    Ok(records)
}

/// Loads flow records from `path`. Open and read failures are logged and give an empty list.
pub fn load_flow_records(path: &Path) -> Vec<FlowRecord> {
    let result = File::open(path).and_then(|file| read_flow_records(BufReader::new(file)));
    match result {
        Ok(records) => records,
        Err(e) => {
            error!("Error occurred while loading flow logs from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
