//! Wager calculator entry point.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wager_calc::api::{create_router, AppState};
use wager_calc::config::Config;
use wager_calc::ingest::{extract_embedded_json, settlement_inputs, transform_picks};
use wager_calc::metrics;
use wager_calc::settlement::compute_settlement;
use wager_calc::utils::shutdown_signal;
use wager_calc::wager::{effective_odds, odds_from_stake_payout, payout_from_odds, stake_from_odds};

/// American odds, payout and settlement calculator.
#[derive(Parser, Debug)]
#[command(name = "wager-calc")]
#[command(about = "Convert between odds, stake and payout, and settle graded wagers")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines (also enabled by LOG_JSON).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Payout for a stake at the given odds.
    Payout {
        /// American odds, e.g. +150 or -200.
        #[arg(allow_hyphen_values = true)]
        odds: String,
        /// Amount wagered.
        stake: Decimal,
    },

    /// Stake needed to reach a payout at the given odds.
    Stake {
        /// American odds, e.g. +150 or -200.
        #[arg(allow_hyphen_values = true)]
        odds: String,
        /// Desired total payout.
        payout: Decimal,
    },

    /// Odds at which a stake returns the given payout.
    Odds {
        /// Amount wagered.
        stake: Decimal,
        /// Desired total payout.
        payout: Decimal,
    },

    /// Odds after a fee on profit.
    Effective {
        /// American odds, e.g. +150 or -200.
        #[arg(allow_hyphen_values = true)]
        odds: String,
        /// Fee on profit in [0, 1) (defaults to DEFAULT_FEE).
        #[arg(long, allow_hyphen_values = true)]
        fee: Option<Decimal>,
    },

    /// Settle a saved picks payload (JSON, or HTML with --html).
    Settle {
        /// File containing the payload.
        file: PathBuf,
        /// Treat the file as a page with embedded JSON.
        #[arg(long)]
        html: bool,
        /// Only settle games scheduled at or after this RFC 3339 time.
        #[arg(long)]
        since: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; stdout is reserved for command output.
    // Config errors are reported once logging is up.
    let log_config = Config::load().unwrap_or_default();
    let filter = EnvFilter::try_new(log_config.log_directive(args.verbose))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs || log_config.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::Payout { odds, stake }) => cmd_payout(&odds, stake),
        Some(Command::Stake { odds, payout }) => cmd_stake(&odds, payout),
        Some(Command::Odds { stake, payout }) => cmd_odds(stake, payout),
        Some(Command::Effective { odds, fee }) => cmd_effective(&odds, fee),
        Some(Command::Settle { file, html, since }) => cmd_settle(&file, html, since.as_deref()),
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(None).await,
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Run the HTTP API until shutdown.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Default fee: {}", config.default_fee);

    // Initialize metrics
    let handle = metrics::install_recorder().context("failed to install metrics recorder")?;
    let app_state = AppState::new(config.default_fee).with_metrics(handle);

    // Start HTTP server
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Print the payout for a stake.
fn cmd_payout(odds: &str, stake: Decimal) -> anyhow::Result<()> {
    let quote = payout_from_odds(odds, stake)?;

    println!("Odds:   {}", quote.odds);
    println!("Stake:  ${}", quote.stake);
    println!("Payout: ${}", quote.payout);
    println!("Profit: ${}", quote.profit);

    Ok(())
}

/// Print the stake needed for a payout.
fn cmd_stake(odds: &str, payout: Decimal) -> anyhow::Result<()> {
    let quote = stake_from_odds(odds, payout)?;

    println!("Odds:   {}", quote.odds);
    println!("Payout: ${}", quote.total_payout);
    println!("Stake:  ${}", quote.stake);
    println!("Profit: ${}", quote.profit);

    Ok(())
}

/// Print the odds implied by a stake and payout.
fn cmd_odds(stake: Decimal, payout: Decimal) -> anyhow::Result<()> {
    let quote = odds_from_stake_payout(stake, payout)?;

    println!("Odds:         {}", quote.odds);
    println!("Decimal odds: {}", quote.decimal_odds);
    println!("Profit:       ${}", quote.profit);

    Ok(())
}

/// Print fee-adjusted odds.
fn cmd_effective(odds: &str, fee: Option<Decimal>) -> anyhow::Result<()> {
    let fee = match fee {
        Some(fee) => fee,
        None => load_config()?.default_fee,
    };

    let effective = effective_odds(odds, fee)?;

    println!("Odds:           {}", odds.trim());
    println!("Fee on profit:  {}", fee);
    println!("Effective odds: {}", effective);

    Ok(())
}

/// Settle a saved picks payload.
fn cmd_settle(file: &Path, html: bool, since: Option<&str>) -> anyhow::Result<()> {
    let config = load_config()?;
    let mapping = config.field_mapping()?;

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payload = if html {
        extract_embedded_json(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };

    let since = since
        .map(|s| OffsetDateTime::parse(s, &Rfc3339))
        .transpose()
        .context("--since must be an RFC 3339 timestamp")?;

    let picks = transform_picks(&payload, &mapping)?;
    let inputs = settlement_inputs(&picks, &mapping, since)?;
    info!("Settling {} of {} picks", inputs.len(), picks.len());

    let result = compute_settlement(&inputs)?;

    println!("======================================================================");
    println!("SETTLEMENT");
    println!("======================================================================");
    println!("  Graded:      {}", result.record.total());
    println!(
        "  Record:      {}-{}-{}",
        result.record.wins, result.record.losses, result.record.draws
    );
    println!("  Net result:  {:+.4} units", result.net_result);
    println!("  Units:       {:.2}", result.total_units);
    println!("  ROI:         {:.2}%", result.roi * Decimal::ONE_HUNDRED);
    println!("======================================================================");

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("WAGER CALC - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Check field mapping
    print!("Loading field mapping... ");
    match config.field_mapping() {
        Ok(mapping) => {
            println!("OK");
            println!("  Records path: {}", mapping.records_path);
            println!("  Fields: {}", mapping.fields.len());
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Field mapping invalid"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.bind_address, config.port);
    println!("  Default Fee: {}", config.default_fee);
    println!("  Log Level: {}", config.rust_log);
    println!("  JSON Logs: {}", config.log_json);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
