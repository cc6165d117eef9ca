// BIN Lookup - command line tool
// Offline lookups against the same CSV dataset the server uses

use anyhow::{bail, Context, Result};
use bin_lookup::config::DEFAULT_DATA_PATH;
use bin_lookup::logging::init_logging;
use bin_lookup::{
    find_many, find_one, load_bins, parse_bin_list, results_to_csv, BinRecord, DatasetStats,
    Limits, EXPORT_FILENAME,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "bin-lookup", version, about = "Look up card BIN metadata from a CSV dataset")]
struct Cli {
    /// BIN dataset (CSV with number,country,flag,vendor,type,level,bank_name)
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a single BIN (at least 6 digits)
    Lookup { bin: String },

    /// Look up up to 50 BINs; separators may be spaces, commas or newlines
    Bulk {
        #[arg(required = true)]
        bins: Vec<String>,
    },

    /// Record, country and bank counts
    Stats,

    /// Bulk lookup written as CSV
    Export {
        #[arg(required = true)]
        bins: Vec<String>,

        /// Output file; "-" for stdout
        #[arg(long, short, default_value = EXPORT_FILENAME)]
        out: String,
    },
}

#[derive(Serialize)]
struct BulkOutput<'a> {
    results: Vec<&'a BinRecord>,
}

fn main() -> Result<()> {
    init_logging("bin_lookup=warn");

    let cli = Cli::parse();
    let limits = Limits::default();

    match cli.command {
        Command::Lookup { bin } => run_lookup(&cli.data, &limits, &bin),
        Command::Bulk { bins } => run_bulk(&cli.data, &limits, &bins),
        Command::Stats => run_stats(&cli.data),
        Command::Export { bins, out } => run_export(&cli.data, &limits, &bins, &out),
    }
}

/// Arguments may each hold several BINs ("411111,511111")
fn collect_bins(limits: &Limits, args: &[String]) -> Result<Vec<String>> {
    let bins = limits.usable_bins(&parse_bin_list(&args.join(" "), limits.min_bin_length));

    if bins.is_empty() {
        bail!(
            "No valid BINs found. BINs should be at least {} digits",
            limits.min_bin_length
        );
    }

    limits.check_bulk(&bins)?;
    Ok(bins)
}

fn run_lookup(data: &Path, limits: &Limits, bin: &str) -> Result<()> {
    let bin = limits.check_bin(bin)?;
    let records = load_bins(data)?;

    match find_one(&records, bin) {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(record)?);
            Ok(())
        }
        None => bail!("BIN not found: {}", bin),
    }
}

fn run_bulk(data: &Path, limits: &Limits, args: &[String]) -> Result<()> {
    let bins = collect_bins(limits, args)?;
    let records = load_bins(data)?;

    let results = find_many(&records, &bins);
    info!(requested = bins.len(), found = results.len(), "bulk lookup");

    println!("{}", serde_json::to_string_pretty(&BulkOutput { results })?);
    Ok(())
}

fn run_stats(data: &Path) -> Result<()> {
    let records = load_bins(data)?;
    let stats = DatasetStats::compute(&records);

    println!("📊 {}", stats.summary());
    Ok(())
}

fn run_export(data: &Path, limits: &Limits, args: &[String], out: &str) -> Result<()> {
    let bins = collect_bins(limits, args)?;
    let records = load_bins(data)?;

    let results = find_many(&records, &bins);
    let csv = results_to_csv(results.iter().copied())?;

    if out == "-" {
        print!("{}", csv);
    } else {
        fs::write(out, csv).with_context(|| format!("Failed to write export file: {}", out))?;
        eprintln!("✓ Exported {} of {} BINs to {}", results.len(), bins.len(), out);
    }

    Ok(())
}
