//! # Shopline CLI Library
//!
//! Runs a demo checkout end to end and prints what a till would print.
//!
//! ## Module Organization
//! ```text
//! shopline_cli/
//! ├── lib.rs          ◄─── You are here (setup & run)
//! ├── args.rs         ◄─── Command-line parsing
//! ├── demo.rs         ◄─── Demo catalog and scenarios
//! └── console.rs      ◄─── Stdout NoticeSink
//! ```
//!
//! ## Output Streams
//! ```text
//! stdout ◄── shipment notice, receipt, groceries balance line (or JSON with --json)
//! stderr ◄── tracing diagnostics (RUST_LOG)
//! ```

pub mod args;
pub mod console;
pub mod demo;

use anyhow::Result;
use shopline_core::{product::today, CheckoutConfig, MemorySink};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::{Args, USAGE};
use console::ConsoleSink;
use demo::run_scenario;

/// Runs the CLI with the process arguments.
///
/// ## Startup Sequence
/// 1. Initialize logging
/// 2. Parse arguments
/// 3. Load [`CheckoutConfig`] from `SHOPLINE_*` environment variables
/// 4. Run the chosen scenario and print the result
pub fn run() -> Result<()> {
    init_tracing();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = CheckoutConfig::from_env()?;
    info!(
        store = %config.store_name,
        rate_per_kg = %config.shipping_rate_per_kg,
        grouping = %config.shipment_grouping,
        "Configuration loaded"
    );

    if args.json {
        let mut sink = MemorySink::new();
        let outcome = run_scenario(args.scenario, &config, &mut sink, today())?;
        for line in sink.take() {
            debug!(%line, "notice line");
        }
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let outcome = run_scenario(args.scenario, &config, ConsoleSink, today())?;
        if let Some(line) = outcome.balance_line() {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Quiet runs
/// - `RUST_LOG=shopline_core=trace` - Core only
/// - Default: INFO, DEBUG for shopline crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopline=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
