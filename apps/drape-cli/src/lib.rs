//! # Drape Quote CLI
//!
//! Command-line front end for pricing quotations and writing them as PDF.
//!
//! ## Module Organization
//! ```text
//! drape_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig: defaults → file → environment
//! ├── request.rs      ◄─── Quote request files (TOML)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared quote loading
//! │   ├── price.rs    ◄─── Terminal preview
//! │   ├── generate.rs ◄─── PDF output
//! │   └── config.rs   ◄─── config init / show
//! └── error.rs        ◄─── AppError and exit codes
//! ```
//!
//! The CLI holds no pricing or layout logic; it wires request files and
//! configuration to `drape-core` and `drape-render`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod request;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction};
use config::AppConfig;
use error::AppResult;

/// Runs one command and returns what it prints on success.
///
/// ## Dispatch
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  config init  ──► write defaults (no config load)                       │
/// │  everything else:                                                       │
/// │     AppConfig::load(--config) ──► price | generate | config show         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> AppResult<String> {
    let load_config = || AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => {
            let path = commands::config::init(cli.config.as_deref(), force)?;
            Ok(format!("Wrote {}", path.display()))
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => commands::config::show(&load_config()?),
        Commands::Price { request } => commands::price::run(&request, &load_config()?),
        Commands::Generate {
            request,
            output,
            tax_rate,
        } => {
            let config = load_config()?;
            let path = commands::generate::run(&request, output.as_deref(), tax_rate, &config)?;
            Ok(format!("Quotation saved to {}", path.display()))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=drape_render=trace` - Trace layout only
/// - Default: `info` globally, `debug` for the `drape_*` crates
///
/// Logs go to stderr so command output stays clean on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,drape=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting drape-quote");
}
