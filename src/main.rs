// Command-line entry point: `pixel_census <image_path>`.
//
// Logging goes to stderr (filter with RUST_LOG, default `warn`) so stdout carries
// nothing but the report. Any error ends the run with exit status 1.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use env_logger::Env;
use pixel_census::{CensusConfig, CensusError, CensusPipeline};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // --- 1. Argument Parsing ---
    // Paths need not be UTF-8, so arguments stay as OsString.
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    if args.len() != 1 {
        eprintln!("Usage: pixel_census <image_path>");
        return Err(CensusError::Usage { got: args.len() }.into());
    }
    let path = PathBuf::from(&args[0]);

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "Processing image '{}'", path.display())?;
    out.flush()?;

    // --- 2. Census ---
    let pipeline = CensusPipeline::new(CensusConfig::default());
    let report = pipeline
        .process_file(&path)
        .with_context(|| format!("failed to process '{}'", path.display()))?;
    if let Some(format) = report.format {
        log::debug!("'{}' decoded as {format}", path.display());
    }

    // --- 3. Output ---
    report.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
