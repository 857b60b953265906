pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod protocols;
pub mod report;
pub mod tags;

pub use aggregate::{aggregate, generate_counts, UNTAGGED};
pub use error::{EmptyInput, FlowTagError, RecordError, ReportError};
pub use models::domain::{Counter, FlowCounts, FlowRecord, TagTable};
pub use protocols::ProtocolTable;
pub use report::ReportFormat;
