//! Embassy Checker - audits the embassies of a NationStates region
//!
//! Fetches every embassy region of a region from the NationStates API and
//! reports inactive, newly founded and unwantedly tagged regions.
//!
//! Exit codes:
//!   0 - Success (no findings, or no --fail-on-findings set)
//!   1 - Runtime error (configuration, API, region not found, etc.)
//!   2 - Regions flagged and --fail-on-findings set

mod cli;
mod config;
mod progress;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use embassy_checker::report::{render_json, render_text};
use embassy_checker::{EmbassyChecker, NationStatesClient};
use progress::ProgressListener;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read before logging so its verbose setting applies
    let (config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("Embassy Checker v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config_source);
    debug!("Arguments: {:?}", args);

    match run_check(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Embassy check failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .embassycheck.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Set api.user_agent to something that identifies you to NationStates.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the embassy check. Returns exit code (0 or 2).
async fn run_check(args: Args, mut config: Config) -> Result<i32> {
    let start_time = Instant::now();
    config.merge_with_args(&args);

    let query = config.query();
    let client = NationStatesClient::new(config.client_config())
        .context("Failed to initialize NationStates client")?;

    let mut checker = EmbassyChecker::new(client).with_concurrency(config.api.concurrency);
    let progress = Arc::new(if args.quiet {
        ProgressListener::hidden()
    } else {
        ProgressListener::new()
    });
    checker.add_listener(progress.clone());

    // Ctrl-C stops the run between two region fetches
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current region");
            ctrl_c_token.cancel();
        }
    });

    if !args.quiet {
        eprintln!("🔎 Checking the embassies of {}...", query.region());
    }

    let result = checker.run_until_cancelled(&query, &cancel).await;
    progress.finish();
    let report = result?;

    let output = match args.format {
        OutputFormat::Json => render_json(&report).context("Failed to serialize report")?,
        OutputFormat::Text => render_text(&report),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path))?;
            info!("Report saved to {}", path);
        }
        None => print!("{}", output),
    }

    if !args.quiet {
        eprintln!("\n📊 Summary:");
        eprintln!("   Region: {}", report.region);
        eprintln!(
            "   Embassies checked: {} ({} retrieved)",
            report.embassies_checked, report.regions_retrieved
        );
        eprintln!("   Regions flagged: {}", report.total_findings());
        eprintln!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
    }

    if args.fail_on_findings && report.has_findings() {
        eprintln!("\n⛔ Regions were flagged. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Returns the configuration and a description of where it came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, DEFAULT_CONFIG_FILE.to_string())),
        Ok(None) => Ok((Config::default(), "defaults".to_string())),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", DEFAULT_CONFIG_FILE, e);
            Ok((Config::default(), "defaults".to_string()))
        }
    }
}
