//! Stdout notice sink.

use shopline_core::NoticeSink;

/// Prints every emitted line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NoticeSink for ConsoleSink {
    fn emit_line(&mut self, line: &str) {
        println!("{}", line);
    }
}
