use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use audit_sink::cli::{handle_audit_command, AuditCommands};
use audit_sink::config::{SinkConfig, SinkPaths};

#[derive(Parser)]
#[command(
    name = "audit-sink",
    version,
    about = "Rotating CSV audit trail writer",
    long_about = "audit-sink appends model change records to CSV files, rotating \
                  to a new file once per day or hour when configured to."
)]
struct Cli {
    /// Path to a JSON or YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: AuditCommands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_path = cli
        .config
        .unwrap_or_else(|| SinkPaths::new().config_file());
    let config = SinkConfig::load_or_default(&config_path)?;

    handle_audit_command(&config, &config_path, cli.command)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
