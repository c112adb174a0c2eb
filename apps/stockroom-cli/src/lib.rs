//! # Stockroom CLI Library
//!
//! Text front end for the Stockroom engine.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs      ◄─── You are here (logging setup & run)
//! ├── config.rs   ◄─── Environment configuration
//! ├── catalog.rs  ◄─── Built-in / JSON catalog → Store
//! └── menu.rs     ◄─── Interactive loop
//! ```
//!
//! ## Startup Sequence
//! 1. Load configuration from the environment
//! 2. Initialize tracing (stderr, `RUST_LOG` or `STOCKROOM_LOG`)
//! 3. Load the catalog and build the store
//! 4. Run the menu on stdin/stdout

pub mod catalog;
pub mod config;
pub mod menu;

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::CliConfig;
use menu::Menu;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured filter applies.
/// Logs go to stderr so they never interleave with menu output parsing.
pub fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Runs the interactive store on stdin/stdout.
pub fn run() -> anyhow::Result<()> {
    let config = CliConfig::load().context("loading configuration")?;
    init_tracing(&config);

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    let mut store = catalog.build().context("building store from catalog")?;
    info!(store_name = %config.store_name, products = store.len(), "Store ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut store, config.store_name.as_str(), stdin.lock(), stdout.lock())
        .run()
        .context("menu I/O failed")?;

    Ok(())
}
