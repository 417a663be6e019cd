use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use freightmatch::models::load::{LoadRecord, MatchQuery};
use freightmatch::store::StoreError;
use freightmatch::{MatchResponse, ReportAck, Service};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "freightmatch",
    about = "Match carrier requests against the load board and summarize negotiation calls"
)]
struct Cli {
    /// Path to configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the best catalog load for a carrier's request
    Match {
        #[arg(long)]
        origin: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        equipment_type: Option<String>,
        /// Desired pickup time, e.g. 2025-08-05T09:00:00Z
        #[arg(long)]
        pickup: Option<String>,
        /// Number of loads to return. Defaults to `matching.max_results`.
        #[arg(long)]
        top: Option<usize>,
        /// Include each load's score in the output
        #[arg(long)]
        with_scores: bool,
    },
    /// Record a completed negotiation call (JSON body on stdin or --input)
    Report {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Summarize the report log as dashboard metrics and chart series
    Summary,
}

fn init_tracing(format: LogFormat) {
    // Respects RUST_LOG
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

fn read_body(input: Option<&PathBuf>) -> Result<String> {
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = freightmatch::load_config(cli.config.as_deref())?;
    if !matches!(cli.command, Command::Match { .. }) {
        freightmatch::ensure_persistent_store(&config.store)?;
    }
    let service = Service::from_config(&config).context("Failed to build service")?;

    match cli.command {
        Command::Match {
            origin,
            destination,
            equipment_type,
            pickup,
            top,
            with_scores,
        } => {
            let query = MatchQuery {
                origin,
                destination,
                equipment_type,
                pickup_datetime: pickup,
            };
            let matches = service.find_matches(&query, top.unwrap_or(service.max_results()));
            if with_scores {
                print_json(&MatchResponse { data: matches }, cli.pretty)?;
            } else {
                let data: Vec<&LoadRecord> = matches.into_iter().map(|m| m.load).collect();
                print_json(&MatchResponse { data }, cli.pretty)?;
            }
        }
        Command::Report { input } => {
            let body = read_body(input.as_ref())?;
            match service.submit_report(&body, chrono::Utc::now()) {
                Ok(_) => print_json(&ReportAck::success(), cli.pretty)?,
                Err(e @ StoreError::InvalidReport(_)) => {
                    print_json(&ReportAck::error(e.to_string()), cli.pretty)?;
                    return Err(anyhow::anyhow!("Report rejected: {e}"));
                }
                Err(e) => return Err(e).context("Failed to append report"),
            }
        }
        Command::Summary => {
            let summary = service.summary().context("Failed to read report log")?;
            print_json(&summary, cli.pretty)?;
        }
    }

    Ok(())
}
