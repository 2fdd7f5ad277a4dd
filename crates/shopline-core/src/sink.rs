//! # Notice Sink
//!
//! Where shipment notices and receipts are written. The core never prints;
//! the application supplies a sink (stdout in the CLI, memory in tests).

use std::fmt::Display;

/// Line-oriented text output.
///
/// Emission cannot fail from the checkout's point of view: the commit stage
/// has no way to undo a printed receipt, so a sink that can fail must handle
/// the failure itself.
pub trait NoticeSink {
    fn emit_line(&mut self, line: &str);
}

impl<T: NoticeSink + ?Sized> NoticeSink for &mut T {
    fn emit_line(&mut self, line: &str) {
        (**self).emit_line(line);
    }
}

/// Writes every line of `block`'s `Display` output to `sink`.
pub fn emit_block<S: NoticeSink + ?Sized>(sink: &mut S, block: &impl Display) {
    for line in block.to_string().lines() {
        sink.emit_line(line);
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drains the collected lines.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl NoticeSink for MemorySink {
    fn emit_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_block_splits_lines() {
        let mut sink = MemorySink::new();
        emit_block(&mut sink, &"first\nsecond");

        assert_eq!(sink.lines(), ["first", "second"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_to<S: NoticeSink>(mut sink: S) {
            sink.emit_line("via reference");
        }

        let mut sink = MemorySink::new();
        write_to(&mut sink);
        assert_eq!(sink.lines(), ["via reference"]);
    }
}
