//! Audit CLI commands
//!
//! Write a change record by hand, inspect the active file, or dump the
//! effective configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde_json::{Map, Value};

use crate::audit::{AuditChange, AuditDriver, AuditOutcome, FilesystemSink};
use crate::config::SinkConfig;

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// Append one change record to the active audit file
    Write {
        /// Previous values as a JSON object
        #[arg(long)]
        old: String,
        /// New values as a JSON object
        #[arg(long)]
        new: String,
        /// Extra column as key=value (value parsed as JSON if possible)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Print the file the next record would be written to
    Path,
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Handle an audit command
pub fn handle_audit_command(
    config: &SinkConfig,
    config_path: &Path,
    cmd: AuditCommands,
) -> Result<()> {
    match cmd {
        AuditCommands::Write { old, new, fields } => {
            let mut change = AuditChange::new(
                parse_object("--old", &old)?,
                parse_object("--new", &new)?,
            );
            for (key, value) in fields {
                change = change.with_field(key, value);
            }

            let sink = FilesystemSink::new(config.clone());
            let receipt = sink.audit(&change)?;
            println!("{}", receipt.id());
        }
        AuditCommands::Path => {
            let sink = FilesystemSink::new(config.clone());
            println!("{}", sink.current_path().display());
        }
        AuditCommands::Config { save } => {
            println!("Audit Sink Configuration");
            println!("========================");
            println!("Config file:    {}", config_path.display());
            println!("Storage root:   {}", config.disk.display());
            println!("Directory:      {:?}", config.directory);
            println!("Filename:       {}", config.filename);
            println!("Logging type:   {}", config.logging_type);
            println!("Failure policy: {:?}", config.failure_policy);

            if save {
                config.save(config_path)?;
                println!();
                println!("Configuration saved to {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn parse_object(flag: &str, raw: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(raw).with_context(|| format!("{} is not valid JSON", flag))?;

    match value {
        Value::Object(map) => Ok(map),
        other => bail!("{} must be a JSON object, got {}", flag, other),
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
