use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_limits::domain::payment::Payment;
use payment_limits::interfaces::config::limits_file::load_limits_file;
use payment_limits::interfaces::csv::payment_reader::PaymentReader;
use payment_limits::interfaces::csv::verdict_writer::{Verdict, VerdictWriter};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV snapshot of already registered payments
    registered: PathBuf,

    /// CSV of candidate payments to check against the snapshot
    candidates: PathBuf,

    /// JSON file defining the limits to enforce
    #[arg(long)]
    limits: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let limits = load_limits_file(&cli.limits).into_diagnostic()?;
    info!(count = limits.len(), "limits loaded");

    // Load the registered snapshot, skipping rows that fail to parse
    let file = File::open(&cli.registered).into_diagnostic()?;
    let mut registered: Vec<Payment> = Vec::new();
    for payment in PaymentReader::new(file).payments() {
        match payment {
            Ok(payment) => registered.push(payment),
            Err(e) => {
                warn!(error = %e, "skipping registered payment");
            }
        }
    }
    info!(count = registered.len(), "registered payments loaded");

    let stdout = io::stdout();
    let mut writer = VerdictWriter::new(stdout.lock());

    let file = File::open(&cli.candidates).into_diagnostic()?;
    for candidate in PaymentReader::new(file).payments() {
        match candidate {
            Ok(candidate) => {
                let exceeded = limits
                    .first_exceeded(&candidate, &registered)
                    .into_diagnostic()?;
                writer
                    .write(&Verdict::new(&candidate, exceeded))
                    .into_diagnostic()?;
            }
            Err(e) => {
                warn!(error = %e, "skipping candidate payment");
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
