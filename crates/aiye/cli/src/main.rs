//! Aiye CLI - terminal front end for the ecosystem organ monitor
//!
//! Lets a supporter or field operator:
//! - Inspect organ health, funding and payment history
//! - Run diagnostic scans
//! - Open funding payments and submit restoration evidence
//! - Watch the organs live while the gateway is polled

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use aiye_gateway::HttpGateway;
use aiye_runtime::{config::LoggingConfig, AiyeConfig};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;
mod panel;

use commands::{actions, organs, watch, Context};

/// Aiye CLI application
#[derive(Parser)]
#[command(name = "aiye")]
#[command(about = "Aiye - Living ecosystem organ monitor", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AIYE_CONFIG")]
    config: Option<String>,

    /// Aiye gateway endpoint (overrides the configured base URL)
    #[arg(short, long, env = "AIYE_ENDPOINT")]
    endpoint: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Check gateway connectivity
    Status,

    /// List all organs
    #[command(alias = "ls")]
    Organs,

    /// Show one organ
    Organ {
        /// Organ ID
        id: String,
    },

    /// Show the diagnostic quota
    Quota,

    /// Run a diagnostic scan
    Diagnose {
        /// Organ ID
        #[arg(required_unless_present = "all")]
        organ_id: Option<String>,

        /// Scan every organ
        #[arg(long, conflicts_with = "organ_id")]
        all: bool,
    },

    /// Show payment history for an organ
    Vials {
        /// Organ ID
        organ_id: String,
    },

    /// Fund an organ's restoration
    Pay {
        /// Organ ID
        organ_id: String,

        /// Amount to pay (defaults to the configured amount)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Payment currency (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,

        /// Payer email
        #[arg(long)]
        email: String,

        /// Payer name
        #[arg(long)]
        name: String,
    },

    /// Submit restoration evidence for verification
    Verify {
        /// Organ ID
        organ_id: String,

        /// Evidence photo (jpg, png or webp)
        #[arg(short, long)]
        image: PathBuf,

        /// Reporting NGO
        #[arg(long, default_value = "")]
        ngo: String,

        /// What was done
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Poll the gateway and animate the organs until interrupted
    Watch {
        /// Polling interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Organ to highlight
        #[arg(long)]
        select: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config =
        AiyeConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.api.base_url = endpoint;
    }

    init_tracing(&config.logging, cli.verbose, cli.log_json);

    let gateway = Arc::new(HttpGateway::new(config.api.gateway_options())?);
    let ctx = Context {
        config,
        gateway,
        format: cli.output,
    };

    match cli.command {
        Commands::Status => organs::status(&ctx).await,
        Commands::Organs => organs::list(&ctx).await,
        Commands::Organ { id } => organs::get(&ctx, &id).await,
        Commands::Quota => organs::quota(&ctx).await,
        Commands::Diagnose { organ_id, .. } => actions::diagnose(&ctx, organ_id).await,
        Commands::Vials { organ_id } => organs::vials(&ctx, &organ_id).await,
        Commands::Pay {
            organ_id,
            amount,
            currency,
            email,
            name,
        } => actions::pay(&ctx, &organ_id, amount, currency, email, name).await,
        Commands::Verify {
            organ_id,
            image,
            ngo,
            description,
        } => actions::verify(&ctx, &organ_id, &image, ngo, description).await,
        Commands::Watch {
            interval_ms,
            select,
        } => watch::run(&ctx, interval_ms, select).await,
        Commands::Config => {
            output::print_json(&ctx.config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = json || logging.json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().without_time().with_writer(std::io::stderr)))
        .init();
}
