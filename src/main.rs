use std::process::exit;

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flowtag::config::Args;
use flowtag::generate_counts;
use flowtag::report::generate_report;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(err) => {
            eprintln!("flowtag error: {err:#}");
            exit(1);
        }
    }
}

fn run() -> Result<bool> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let counts = generate_counts(&args.logs_file, &args.tags_file)?;
    info!(
        tags = counts.tags.len(),
        port_protocols = counts.port_protocols.len(),
        unrecognized = counts.unrecognized,
        "counts generated"
    );

    if counts.is_empty() {
        warn!("No recognized flow records, report not generated");
        return Ok(true);
    }

    Ok(generate_report(&args.report_path(), &counts, args.format))
}
