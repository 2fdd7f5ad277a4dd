//! Command-line arguments.
//!
//! ## Usage
//! ```bash
//! shopline                  # groceries scenario, text output
//! shopline mixed            # cheese + TV + scratch card
//! shopline groceries --json # receipt as JSON
//! ```

use anyhow::{bail, Result};

use crate::demo::Scenario;

pub const USAGE: &str = "usage: shopline [groceries|mixed] [--json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args {
    pub scenario: Scenario,
    pub json: bool,
    pub help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            scenario: Scenario::Groceries,
            json: false,
            help: false,
        }
    }
}

impl Args {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Args::default();
        let mut scenario_seen = false;

        for arg in args {
            match arg.as_ref() {
                "--json" => parsed.json = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') => bail!("unknown flag '{}'\n{}", flag, USAGE),
                name => {
                    if scenario_seen {
                        bail!("more than one scenario given\n{}", USAGE);
                    }
                    parsed.scenario = name.parse()?;
                    scenario_seen = true;
                }
            }
        }

        Ok(parsed)
    }
}
