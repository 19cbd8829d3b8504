//! # hato - Livestock Herd Client
//!
//! The main binary for the hato livestock client.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                apps/hato (THE BINARY)              │
//! │                                                    │
//! │   ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//! │   │   CLI    │──▶│ HerdStore  │──▶│ HttpGateway│  │
//! │   │  (clap)  │   │  (tokio)   │   │ (reqwest)  │  │
//! │   └──────────┘   └─────┬──────┘   └────────────┘  │
//! │                        ▼                           │
//! │                 ┌─────────────┐                    │
//! │                 │  hato-core  │                    │
//! │                 │ (THE LOGIC) │                    │
//! │                 └─────────────┘                    │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # List the herd
//! hato list --status healthy --sort-by name
//!
//! # Record a treatment
//! hato add-event -f treatment.json
//!
//! # Vaccinations due in the next 30 days
//! hato vaccinations --upcoming 30
//! ```

use clap::Parser;
use hato::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — HATO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("HATO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hato=info".into());

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

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the hato startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗  ██╗ █████╗ ████████╗ ██████╗
  ██║  ██║██╔══██╗╚══██╔══╝██╔═══██╗
  ███████║███████║   ██║   ██║   ██║
  ██╔══██║██╔══██║   ██║   ██║   ██║
  ██║  ██║██║  ██║   ██║   ╚██████╔╝
  ╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝    ╚═════╝

  Livestock Herd Client v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
