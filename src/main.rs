//! Paddle Watch entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paddle_watch::api::{create_router, AppState};
use paddle_watch::config::Config;
use paddle_watch::metrics;
use paddle_watch::registry::default_registry;
use paddle_watch::upstream::RiverClient;
use paddle_watch::utils::shutdown_signal;
use paddle_watch::web::Templates;

/// River-level dashboard gateway for local paddle spots.
#[derive(Parser, Debug)]
#[command(name = "paddle-watch")]
#[command(about = "Dashboard and JSON API for river levels at local paddle spots")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print the configured pages and rivers.
    ListPages,

    /// Fetch one page's river data and print it as JSON.
    Fetch {
        /// Page id, e.g. `little-river-canyon`.
        page_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("paddle_watch=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::ListPages) => cmd_list_pages(),
        Some(Command::Fetch { page_id }) => cmd_fetch(&config, &page_id).await,
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PADDLE WATCH - CONFIGURATION CHECK");
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

    print!("Validating page registry... ");
    let registry = default_registry()?;
    Templates::new()?.check(&registry)?;
    println!("OK");

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Upstream: {}", config.river_api_base);
    println!("  Timeout: {}ms", config.upstream_timeout_ms);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Pages: {}", registry.pages().len());
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the configured pages and rivers.
fn cmd_list_pages() -> anyhow::Result<()> {
    let registry = default_registry()?;

    for page in registry.pages() {
        println!("{} ({})", page.title, page.id);
        for river in &page.rivers {
            println!("  {:<8} {:<22} {}  {}", river.key, river.name, river.color, river.api_path);
        }
    }

    Ok(())
}

/// Fetch one page's river data and print it.
async fn cmd_fetch(config: &Config, page_id: &str) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let registry = default_registry()?;
    let page = registry.page(page_id)?;
    let client = RiverClient::new(config)?;

    let results = client.rivers_for_page(page).await;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}

/// Run the HTTP server.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let registry = default_registry()?;
    let templates = Templates::new()?;
    templates.check(&registry)?;

    info!(
        pages = registry.pages().len(),
        upstream = %config.river_api_base,
        timeout_ms = config.upstream_timeout_ms,
        "Configuration loaded"
    );

    let client = RiverClient::new(&config)?;
    let mut app_state = AppState::new(registry, client, templates);

    if config.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => {
                metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
                app_state = app_state.with_metrics(handle);
            }
            Err(e) => warn!(error = %e, "Failed to install metrics recorder, /metrics disabled"),
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
