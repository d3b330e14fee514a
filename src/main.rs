//! Epidemiological dashboard API entry point.

use clap::{Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use epi_dash_api::api::{AppState, CorsPolicy};
use epi_dash_api::config::Config;
use epi_dash_api::generators::{self, Metric};
use epi_dash_api::metrics;
use epi_dash_api::reference::{gene_label, resolve_gene};
use epi_dash_api::rng::SeededRng;
use epi_dash_api::server;

/// Epidemiological dashboard API serving seeded mock data.
#[derive(Parser, Debug)]
#[command(name = "epi-dash-api")]
#[command(about = "Read-only JSON API for the epidemiological dashboard")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Random source seed (overrides RNG_SEED).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Random source seed (overrides RNG_SEED).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print one generated payload as pretty JSON.
    Sample {
        /// Which endpoint's payload to generate.
        #[arg(value_enum)]
        endpoint: Endpoint,

        /// Metric for the time series.
        #[arg(long)]
        metric: Option<String>,

        /// Gene for the mutation sample.
        #[arg(long)]
        gene: Option<String>,

        /// Random source seed (overrides RNG_SEED).
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Endpoint {
    Overview,
    Timeseries,
    Lineages,
    Genes,
    Mutations,
    Geography,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so LOG_JSON / RUST_LOG apply
    let loaded = Config::load();
    let log_json = loaded.as_ref().map(|c| c.log_json).unwrap_or(false);
    let log_level = loaded
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("epi_dash_api=debug,info")
    } else {
        EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let (plain, json) = if log_json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Sample {
            endpoint,
            metric,
            gene,
            seed,
        }) => cmd_sample(config, endpoint, metric, gene, seed),
        Some(Command::Serve { port, seed }) => cmd_serve(config, port, seed).await,
        None => cmd_serve(config, args.port, args.seed).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("EPI DASHBOARD API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  RNG Seed: {}", config.rng_seed);
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("  Allowed Origins:");
    for origin in config.allowed_origins() {
        println!("    - {}", origin);
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print one payload generated from a fresh seeded source.
fn cmd_sample(
    config: Config,
    endpoint: Endpoint,
    metric: Option<String>,
    gene: Option<String>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut rng = SeededRng::new(seed.unwrap_or(config.rng_seed));
    let today = OffsetDateTime::now_utc().date();

    let json = match endpoint {
        Endpoint::Overview => serde_json::to_string_pretty(&generators::overview(&mut rng, today))?,
        Endpoint::Timeseries => {
            let (metric, _) = Metric::resolve(metric.as_deref());
            serde_json::to_string_pretty(&generators::timeseries(&mut rng, metric, today))?
        }
        Endpoint::Lineages => serde_json::to_string_pretty(&generators::frequencies(&mut rng))?,
        Endpoint::Genes => serde_json::to_string_pretty(&generators::genes())?,
        Endpoint::Mutations => {
            let (window, _) = resolve_gene(gene.as_deref());
            let label = gene_label(gene.as_deref());
            serde_json::to_string_pretty(&generators::mutations(&mut rng, window, label))?
        }
        Endpoint::Geography => serde_json::to_string_pretty(&generators::points())?,
    };

    println!("{}", json);
    Ok(())
}

/// Serve the API until shutdown.
async fn cmd_serve(
    mut config: Config,
    port_override: Option<u16>,
    seed_override: Option<u64>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(seed) = seed_override {
        config.rng_seed = seed;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("RNG seed: {}", config.rng_seed);
    info!("Allowed origins: {}", config.allowed_origins().join(", "));

    // Initialize metrics
    let handle = metrics::init_metrics()?;

    let state = AppState::new(
        config.rng_seed,
        CorsPolicy::new(config.allowed_origins().as_slice()),
    )
    .with_metrics(handle);

    server::serve(&config, state).await?;
    Ok(())
}
