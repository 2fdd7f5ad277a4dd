//! # Shopline Demo Entry Point
//!
//! ```bash
//! shopline            # groceries checkout
//! shopline mixed      # cheese, TV and a scratch card
//! shopline --json     # receipt as JSON
//! ```
//!
//! Failures print `Error: <message>` and exit with status 1.

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    match shopline_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
