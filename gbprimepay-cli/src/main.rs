//! GB Prime Pay command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Validate the configured secret key against the sandbox
//! gbprimepay --sandbox validate secret-key
//!
//! # Create a WeChat Pay payment
//! gbprimepay create wechat --amount 100 --reference-no ORDER-1 \
//!     --background-url https://shop.example/notify --detail "Latte"
//!
//! # Configure logging level
//! RUST_LOG=debug gbprimepay merchant-info
//! ```
//!
//! # Environment Variables
//!
//! - `GBPRIMEPAY_CONFIG` - Path to TOML configuration file (default: `gbprimepay.toml`)
//! - `GBPRIMEPAY_TOKEN`, `GBPRIMEPAY_PUBLIC_KEY`, `GBPRIMEPAY_SECRET_KEY` - Credentials
//! - `GBPRIMEPAY_SANDBOX`, `GBPRIMEPAY_RAW` - Mode flags
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gbprimepay_cli::cli::{Cli, run};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Failed to load .env: {e}");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            print_output(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}
