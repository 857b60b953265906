pub mod domain {
    use indexmap::IndexMap;
    use std::collections::HashMap;

    use crate::error::RecordError;

    /// The two fields of a flow log line that classification looks at.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FlowRecord {
        pub dst_port: String,
        pub protocol_number: String,
    }

    /// `"<port>,<protocol>"` to tag name. Later rows overwrite earlier ones.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct TagTable {
        entries: HashMap<String, String>,
    }

    impl TagTable {
        pub fn new() -> Self {
            TagTable {
                entries: HashMap::new(),
            }
        }

        pub fn insert(&mut self, key: String, tag: String) {
            self.entries.insert(key, tag);
        }

        pub fn get(&self, key: &str) -> Option<&str> {
            self.entries.get(key).map(String::as_str)
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }

    impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagTable {
        fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
            let mut table = TagTable::new();
            for (key, tag) in iter {
                table.insert(key.into(), tag.into());
            }
            table
        }
    }

    /// Occurrence counts keyed by string, kept in first-seen order.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Counter {
        counts: IndexMap<String, u64>,
    }

    impl Counter {
        pub fn new() -> Self {
            Counter {
                counts: IndexMap::new(),
            }
        }

        pub fn increment(&mut self, key: &str) -> Result<u64, RecordError> {
            if !self.counts.contains_key(key) {
                self.counts.insert(key.to_string(), 0);
            }
            let count = &mut self.counts[key];
            *count = count
                .checked_add(1)
                .ok_or_else(|| RecordError::CounterOverflow { key: key.to_string() })?;
            Ok(*count)
        }

        pub fn get(&self, key: &str) -> u64 {
            self.counts.get(key).copied().unwrap_or(0)
        }

        pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
            self.counts.iter().map(|(key, count)| (key.as_str(), *count))
        }

        pub fn total(&self) -> u64 {
            self.counts.values().sum()
        }

        pub fn len(&self) -> usize {
            self.counts.len()
        }

        pub fn is_empty(&self) -> bool {
            self.counts.is_empty()
        }

        /// Order-independent comparison.
        pub fn same_counts(&self, other: &Counter) -> bool {
            self.len() == other.len() && self.iter().all(|(key, count)| other.get(key) == count)
        }
    }

    /// Result of one aggregation run.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct FlowCounts {
        pub tags: Counter,
        pub port_protocols: Counter,
        /// Records dropped because their protocol number was not recognized.
        pub unrecognized: u64,
    }

    impl FlowCounts {
        pub fn is_empty(&self) -> bool {
            self.tags.is_empty() || self.port_protocols.is_empty()
        }
    }
}

pub mod dto {
    use serde::Serialize;

    use super::domain::FlowCounts;

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct TagCountDTO {
        pub tag: String,
        pub count: u64,
    }

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct PortProtocolCountDTO {
        pub port: String,
        pub protocol: String,
        pub count: u64,
    }

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct CountsReportDTO {
        pub tag_counts: Vec<TagCountDTO>,
        pub port_protocol_counts: Vec<PortProtocolCountDTO>,
    }

    impl From<&FlowCounts> for CountsReportDTO {
        fn from(counts: &FlowCounts) -> Self {
            CountsReportDTO {
                tag_counts: counts
                    .tags
                    .iter()
                    .map(|(tag, count)| TagCountDTO {
                        tag: tag.to_string(),
                        count,
                    })
                    .collect(),
                port_protocol_counts: counts
                    .port_protocols
                    .iter()
                    .map(|(key, count)| {
                        // protocol keywords never contain a comma, ports might
                        let (port, protocol) = key.rsplit_once(',').unwrap_or((key, ""));
                        PortProtocolCountDTO {
                            port: port.to_string(),
                            protocol: protocol.to_string(),
                            count,
                        }
                    })
                    .collect(),
            }
        }
    }
}
