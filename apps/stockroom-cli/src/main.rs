//! # Stockroom Entry Point
//!
//! ```text
//! main.rs ────► stockroom_cli::run()
//!                 ├── config  (environment)
//!                 ├── tracing (stderr)
//!                 ├── catalog (built-in or STOCKROOM_CATALOG)
//!                 └── menu    (stdin/stdout)
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    stockroom_cli::run()
}
