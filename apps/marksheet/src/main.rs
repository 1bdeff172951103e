//! # Marksheet - Student Records Server
//!
//! The main binary for the Marksheet student registry.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for record operations
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/marksheet (THE BINARY)       │
//! │                                              │
//! │   ┌─────────────┐        ┌─────────────┐     │
//! │   │    CLI      │        │  HTTP API   │     │
//! │   │   (clap)    │        │   (axum)    │     │
//! │   └──────┬──────┘        └──────┬──────┘     │
//! │          └───────────┬──────────┘            │
//! │                      ▼                       │
//! │             ┌────────────────┐               │
//! │             │ marksheet-core │               │
//! │             │  (THE LOGIC)   │               │
//! │             └────────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! marksheet server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! marksheet status
//! marksheet create -f student.json
//! marksheet update-marks --id 1 --marks1 40 --marks2 50 --marks3 36
//! ```

use clap::Parser;
use marksheet::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // MARKSHEET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MARKSHEET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marksheet=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
