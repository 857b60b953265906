//! Report rendering and output.

use chrono::Local;
use clap::ValueEnum;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::ReportError;
use crate::models::domain::FlowCounts;
use crate::models::dto::CountsReportDTO;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Two CSV-style sections
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

pub fn format_text(counts: &FlowCounts) -> String {
    let mut out = String::new();

    out.push_str("Tag Counts:\n");
    out.push_str("Tag,Count\n");
    for (tag, count) in counts.tags.iter() {
        let _ = writeln!(out, "{},{}", tag, count);
    }

    out.push_str("\nPort/Protocol Combination Counts:\n");
    out.push_str("Port,Protocol,Count\n");
    for (key, count) in counts.port_protocols.iter() {
        let _ = writeln!(out, "{},{}", key, count);
    }
    out
}

pub fn format_json(counts: &FlowCounts) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CountsReportDTO::from(counts))
}

pub fn render(counts: &FlowCounts, format: ReportFormat) -> Result<String, ReportError> {
    Ok(match format {
        ReportFormat::Text => format_text(counts),
        ReportFormat::Json => format_json(counts)?,
    })
}

/// `<dir>/counts_<YYYYmmdd-HHMMSS>.<ext>` in local time.
pub fn timestamped_path(dir: &Path, format: ReportFormat) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("counts_{}.{}", timestamp, format.extension()))
}

/// Renders the report and writes it in one go, creating parent directories first.
pub fn write_report(path: &Path, counts: &FlowCounts, format: ReportFormat) -> Result<(), ReportError> {
    let content = render(counts, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the report and logs the outcome. Returns whether the report was written.
pub fn generate_report(path: &Path, counts: &FlowCounts, format: ReportFormat) -> bool {
    match write_report(path, counts, format) {
        Ok(()) => {
            info!("Report generated successfully at {}", path.display());
            true
        }
        Err(e) => {
            error!("Error while generating report: {}", e);
            false
        }
    }
}
