//! Kraken triangular arbitrage monitor entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kraken_tri_arb::api::{create_router, AppState};
use kraken_tri_arb::arbitrage::overall_fee_factor;
use kraken_tri_arb::config::Config;
use kraken_tri_arb::error::BotError;
use kraken_tri_arb::market::{KrakenClient, Pair};
use kraken_tri_arb::metrics;
use kraken_tri_arb::poller::{Poller, Scheduler};
use kraken_tri_arb::utils::{shutdown_channel, wait_for_shutdown};

/// LTC/XBT/USD triangular arbitrage monitor.
#[derive(Parser, Debug)]
#[command(name = "kraken-tri-arb")]
#[command(about = "Reports forward and reverse triangular arbitrage factors on Kraken")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll and report until interrupted (default).
    Run {
        /// Seconds between cycles (overrides POLL_INTERVAL_SECS).
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Run a single cycle and exit.
    Once,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let filter = if args.verbose || config.verbose {
        EnvFilter::new("kraken_tri_arb=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Once) => cmd_once(&config).await,
        Some(Command::Run { interval }) => cmd_run(config, interval).await,
        None => cmd_run(config, None).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("KRAKEN TRIANGLE MONITOR - CONFIGURATION CHECK");
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
    println!("  Depth URL: {}", config.kraken_depth_url);
    println!("  Poll Interval: {}s", config.poll_interval_secs);
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Overall Fee Factor: {:.6}", overall_fee_factor());
    println!("  Pairs:");
    for pair in Pair::registry() {
        println!("    {} -> {}", pair, pair.exchange_id());
    }
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            format!("Enabled (port {})", config.metrics_port)
        } else {
            "Disabled".to_string()
        }
    );
    println!(
        "  Status API: {}",
        if config.api_enabled {
            format!("Enabled (port {})", config.port)
        } else {
            "Disabled".to_string()
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run one cycle and exit non-zero if it was skipped.
async fn cmd_once(config: &Config) -> anyhow::Result<()> {
    config.validate().map_err(BotError::InvalidConfig)?;
    metrics::init_metrics();

    let client = KrakenClient::new(config)?;
    let poller = Poller::new(Arc::new(client));

    match poller.poll_once().await {
        Some(_) => Ok(()),
        None => Err(anyhow::anyhow!("cycle skipped")),
    }
}

/// Run the poll loop until a shutdown signal arrives.
async fn cmd_run(mut config: Config, interval_override: Option<u64>) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(interval) = interval_override {
        config.poll_interval_secs = interval;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    if config.metrics_enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        info!("Metrics exporter listening on {}", addr);
    }
    metrics::init_metrics();

    let shutdown = shutdown_channel();
    let app_state = AppState::new();

    if config.api_enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await?;
        info!("HTTP server listening on {}", addr);

        let router = create_router(app_state.clone());
        let server_shutdown = wait_for_shutdown(shutdown.clone());

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(server_shutdown)
                .await
            {
                error!("HTTP server error: {}", e);
            }
        });
    }

    let client = KrakenClient::new(&config)?;
    let poller = Poller::new(Arc::new(client)).with_state(app_state);

    info!("Depth endpoint: {}", config.kraken_depth_url);
    info!(
        "Polling {} every {}s",
        Pair::registry()
            .map(|p| p.symbol())
            .collect::<Vec<_>>()
            .join(", "),
        config.poll_interval_secs
    );

    Scheduler::new(config.poll_interval())
        .run(shutdown, move || {
            let poller = poller.clone();
            async move {
                poller.poll_once().await;
            }
        })
        .await;

    info!("Shutdown complete");

    Ok(())
}
