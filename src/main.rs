//! Sqlscan CLI - scan source workspaces for SQL string candidates

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlscan::adapter;
use sqlscan::conf;
use sqlscan::extract::{self, SqlCandidate};
use sqlscan::workspace;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "sqlscan")]
#[command(version)]
#[command(about = "Find SQL string candidates in source workspaces")]
#[command(long_about = r#"
Sqlscan walks a multi-project source workspace and reconstructs string
values that look like SQL statements:
  • variables whose name contains "sql" (case-insensitive)
  • literal text reassembled across concatenated fragments
  • first-match sqlcheck.conf connection-string discovery

Example usage:
  sqlscan scan --path ./workspace
  sqlscan conn --path ./workspace
  sqlscan check --path ./workspace
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reconstructed SQL candidates
    Scan {
        /// Workspace root directory
        #[arg(short, long)]
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the workspace connection string
    Conn {
        /// Workspace root directory
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Resolve the connection string, then scan; fails without a connection string
    Check {
        /// Workspace root directory
        #[arg(short, long)]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Scan { path, format } => {
            let registry = adapter::default_registry();
            let ws = workspace::load_workspace(&path, &registry)
                .with_context(|| format!("loading workspace {}", path.display()))?;

            println!("🔍 Scanning workspace: {}", ws.root.display());
            let candidates = extract::scan_workspace(&ws, &registry)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                print_candidates(&candidates);
            }
        }

        Commands::Conn { path } => {
            let registry = adapter::default_registry();
            let ws = workspace::load_workspace(&path, &registry)
                .with_context(|| format!("loading workspace {}", path.display()))?;

            let connection_string = conf::resolve_connection_string(&ws)?;
            println!("{connection_string}");
        }

        Commands::Check { path } => {
            let registry = adapter::default_registry();
            let ws = workspace::load_workspace(&path, &registry)
                .with_context(|| format!("loading workspace {}", path.display()))?;

            // Connection string first: its absence is fatal for a check run
            let connection_string = conf::resolve_connection_string(&ws)?;
            println!("🔌 Connection string: {}", connection_string.trim_end());

            let candidates = extract::scan_workspace(&ws, &registry)?;
            print_candidates(&candidates);
        }
    }

    Ok(())
}

fn print_candidates(candidates: &[SqlCandidate]) {
    if candidates.is_empty() {
        println!("∅ No SQL candidates found.");
        return;
    }
    for candidate in candidates {
        println!(
            "- {}:{} [{}] {:?}",
            candidate.document, candidate.line, candidate.variable, candidate.text
        );
    }
    println!();
    println!("📊 {} candidate(s) found.", candidates.len());
}
