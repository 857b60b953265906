//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::report::{timestamped_path, ReportFormat};

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Count flow log records per tag and per port/protocol combination.
#[derive(Parser, Debug)]
#[command(name = "flowtag")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the flow logs file
    #[arg(long = "logs-file", alias = "logs_file", value_name = "FILE")]
    pub logs_file: PathBuf,

    /// Path to the tag lookup CSV
    #[arg(long = "tags-file", alias = "tags_file", value_name = "FILE")]
    pub tags_file: PathBuf,

    /// Directory for timestamped reports
    #[arg(long = "output-dir", env = "FLOWTAG_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write the report to this exact path instead
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn report_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| timestamped_path(&self.output_dir, self.format))
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
