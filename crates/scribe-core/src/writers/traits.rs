//! Log writer trait definition

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::error::LogResult;
use crate::types::{CallerLocation, LogObjectContext, LogVerbosity, LogWriterType};

/// Destination for rendered log messages
///
/// Implementations:
/// - `ConsoleLogWriter`: stdout/stderr
/// - `FileLogWriter`: appends to a log file with a header
/// - `MemoryLogWriter`: keeps lines in memory for inspection
///
/// Writers never filter by verbosity; the [`Logger`](crate::Logger) does
/// that once before fan-out.
pub trait LogWriter: Send + Sync {
    /// Kind of this writer
    fn kind(&self) -> LogWriterType;

    /// Render `template` with `args` and emit it
    fn write(
        &self,
        context: &LogObjectContext,
        verbosity: LogVerbosity,
        caller: &CallerLocation,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()>;

    /// Record an error and its source chain
    fn write_exception(&self, context: &LogObjectContext, error: &dyn Error) -> LogResult<()>;

    /// Drop everything written so far, where the destination allows it
    fn clear(&self) -> LogResult<()>;
}

/// Type alias for a shared writer
pub type SharedLogWriter = Arc<dyn LogWriter>;

/// Messages of an error and each of its sources, outermost first
pub fn error_chain(error: &dyn Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}
