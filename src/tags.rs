//! Tag lookup table loading.
//!
//! The lookup file is a CSV with a header row and at least the columns
//! `port,protocol,tag`. Rows are keyed as `"<port>,<protocol>"`.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, warn};

use crate::error::RecordError;
use crate::models::domain::TagTable;

const REQUIRED_COLUMNS: usize = 3;

/// Validates one data row and returns its lookup key and tag.
pub fn parse_tag_row(row: &csv::StringRecord) -> Result<(String, String), RecordError> {
    let columns: Vec<&str> = row.iter().take(REQUIRED_COLUMNS).map(str::trim).collect();
    if columns.len() < REQUIRED_COLUMNS || columns.iter().any(|c| c.is_empty()) {
        return Err(RecordError::MalformedTagRow {
            row: row.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok((format!("{},{}", columns[0], columns[1]), columns[2].to_string()))
}

pub fn read_tag_table<R: Read>(reader: R) -> Result<TagTable, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut table = TagTable::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                warn!("Invalid tag lookup: {}", e);
                skipped += 1;
                continue;
            }
        };

        match parse_tag_row(&row) {
            Ok((key, tag)) => table.insert(key, tag),
            Err(e) => {
                warn!("{}", e);
                skipped += 1;
            }
        }
    }

    debug!(entries = table.len(), skipped, "tag table parsed");
    Ok(table)
}

/// Loads the tag table from `path`. Open and read failures are logged and give an empty table.
pub fn load_tag_table(path: &Path) -> TagTable {
    let loaded = File::open(path)
        .map_err(csv::Error::from)
        .and_then(read_tag_table);
    match loaded {
        Ok(table) => table,
        Err(e) => {
            error!("Error occurred while loading the tags from {}: {}", path.display(), e);
            TagTable::new()
        }
    }
}
