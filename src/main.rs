//! Organization console gateway.
//!
//! Validates job and member writes from the management console and proxies
//! them to the backend service.
//!
//! ```text
//!  Console ──▶ ┌─────────────────────────────────────────────┐
//!              │  request id → trace → body limit → metrics   │
//!              │        │                                     │
//!              │        ▼                                     │
//!              │  handlers: path ids + schema check           │──▶ 400 {errors: {field: msg}}
//!              │        │                                     │
//!              │        ▼                                     │
//!              │  upstream client (one call) ──▶ relay        │──▶ upstream status / 500
//!              └─────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use org_gateway::config::load_config;
use org_gateway::lifecycle::startup;
use org_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "org-gateway")]
#[command(about = "Validation-and-proxy gateway for the organization console", long_about = None)]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("org-gateway: configuration error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
