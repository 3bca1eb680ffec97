//! In-memory log writer

use std::error::Error;
use std::fmt;

use parking_lot::RwLock;

use super::traits::{error_chain, LogWriter};
use crate::error::LogResult;
use crate::format::{console_line, render_template, strip_markup};
use crate::types::{CallerLocation, LogObjectContext, LogVerbosity, LogWriterType};

/// One captured message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEntry {
    pub verbosity: LogVerbosity,
    pub context: String,
    pub message: String,
    pub caller: CallerLocation,
}

impl CapturedEntry {
    /// Console-style rendering of the entry
    pub fn line(&self) -> String {
        format!("[{}] {}: {}", self.verbosity, self.context, self.message)
    }
}

/// Log writer that keeps entries in memory
///
/// Useful for tests and for hosts that display recent log output themselves.
/// Entries are lost when the writer is dropped.
#[derive(Debug, Default)]
pub struct MemoryLogWriter {
    entries: RwLock<Vec<CapturedEntry>>,
    exceptions: RwLock<Vec<String>>,
}

impl MemoryLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured entries
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.read().clone()
    }

    /// Captured entries rendered as lines
    pub fn lines(&self) -> Vec<String> {
        self.entries.read().iter().map(CapturedEntry::line).collect()
    }

    /// Captured exceptions, one line each
    pub fn exceptions(&self) -> Vec<String> {
        self.exceptions.read().clone()
    }

    /// Number of captured entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogWriter for MemoryLogWriter {
    fn kind(&self) -> LogWriterType {
        LogWriterType::Memory
    }

    fn write(
        &self,
        context: &LogObjectContext,
        verbosity: LogVerbosity,
        caller: &CallerLocation,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()> {
        let entry = CapturedEntry {
            verbosity,
            context: context.name().to_string(),
            message: strip_markup(&render_template(template, args)),
            caller: caller.clone(),
        };
        self.entries.write().push(entry);
        Ok(())
    }

    fn write_exception(&self, context: &LogObjectContext, error: &dyn Error) -> LogResult<()> {
        let message = error_chain(error).join(" | caused by: ");
        let line = console_line(context, LogVerbosity::Error, &message);
        self.exceptions.write().push(line);
        Ok(())
    }

    fn clear(&self) -> LogResult<()> {
        self.entries.write().clear();
        self.exceptions.write().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_writer_captures() {
        let writer = MemoryLogWriter::new();
        let ctx = LogObjectContext::named("Inventory").unwrap();
        let caller = CallerLocation::new("src/inventory.rs", "add", 12);

        assert!(writer.is_empty());
        writer
            .write(&ctx, LogVerbosity::Warning, &caller, "<b>{0}</b> slots left", &[&2])
            .unwrap();

        assert_eq!(writer.len(), 1);
        let entry = &writer.entries()[0];
        assert_eq!(entry.message, "2 slots left");
        assert_eq!(entry.caller.function, "add");
        assert_eq!(writer.lines(), vec!["[Warning] Inventory: 2 slots left".to_string()]);
    }

    #[test]
    fn test_memory_writer_exceptions_and_clear() {
        let writer = MemoryLogWriter::new();
        let ctx = LogObjectContext::named("Inventory").unwrap();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "corrupt save");

        writer.write_exception(&ctx, &err).unwrap();
        writer.write(&ctx, LogVerbosity::Info, &CallerLocation::unknown(), "x", &[]).unwrap();
        assert_eq!(writer.exceptions(), vec!["[Error] Inventory: corrupt save".to_string()]);

        writer.clear().unwrap();
        assert!(writer.is_empty());
        assert!(writer.exceptions().is_empty());
    }
}
