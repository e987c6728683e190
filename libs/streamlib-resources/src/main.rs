// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! StreamLib resources CLI
//!
//! Lints and lists the resource declarations of a pipeline config.

// stdout is the user output channel for this binary.
#![allow(clippy::disallowed_macros)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use streamlib_resources::{ResourceKind, ResourcesConfig};

#[derive(Parser)]
#[command(name = "streamlib-resources")]
#[command(author, version, about = "Inspect StreamLib resource declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check resource labels for empty or duplicate values
    Lint {
        /// Pipeline config file (YAML)
        #[arg(value_name = "CONFIG_FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List declared resource labels per kind
    List {
        /// Pipeline config file (YAML)
        #[arg(value_name = "CONFIG_FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint { file, format } => {
            let clean = lint(&file, format)?;
            if !clean {
                std::process::exit(1);
            }
        }
        Commands::List { file } => list(&file)?,
    }

    Ok(())
}

fn read_config(path: &Path) -> Result<(String, ResourcesConfig)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = ResourcesConfig::from_yaml_str(&source)?;
    Ok((source, config))
}

/// Print lints for `path`. Returns whether the config is clean.
fn lint(path: &Path, format: Format) -> Result<bool> {
    let (source, config) = read_config(path)?;
    let lints = config.lint(&source);

    match format {
        Format::Text => {
            for lint in &lints {
                println!(
                    "{}:{}:{}: {}",
                    path.display(),
                    lint.line,
                    lint.column,
                    lint.message
                );
            }
        }
        Format::Json => {
            let report = serde_json::json!({
                "file": path.display().to_string(),
                "lints": lints,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    tracing::debug!(
        "Linted {} resource declarations in {}, {} lint(s)",
        config.len(),
        path.display(),
        lints.len()
    );

    Ok(lints.is_empty())
}

fn list(path: &Path) -> Result<()> {
    let (_, config) = read_config(path)?;

    if config.is_empty() {
        println!("No resources declared.");
        return Ok(());
    }

    for kind in ResourceKind::ALL {
        let declarations = config.declarations(kind);
        if declarations.is_empty() {
            continue;
        }

        println!("{} ({}):", kind.config_field(), declarations.len());
        for declaration in &declarations {
            let label = match declaration.label() {
                "" => "<missing label>",
                label => label,
            };
            match declaration.component_type() {
                Some(component_type) => println!("  - {} ({})", label, component_type),
                None => println!("  - {}", label),
            }
        }
    }

    Ok(())
}
