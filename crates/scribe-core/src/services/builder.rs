//! Fluent builder for the writer collection

use std::path::PathBuf;

use super::collection::{LoggingServices, ServiceCollection};
use crate::error::{LogError, LogResult};
use crate::types::LogWriterType;
use crate::writers::{LogWriterFactory, SharedLogWriter};

/// Accumulates log writers and hands them over as [`LoggingServices`]
///
/// # Example
///
/// ```
/// use scribe_core::{LoggingServiceBuilder, ServiceCollection};
///
/// let services = LoggingServiceBuilder::new()
///     .with_console_logger()
///     .with_memory_logger()
///     .build()
///     .unwrap();
/// assert_eq!(services.services().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LoggingServiceBuilder {
    services: LoggingServices,
}

impl LoggingServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a writer built by the factory
    pub fn with_writer(mut self, kind: LogWriterType, output_path: Option<PathBuf>) -> Self {
        self.services.add_service(LogWriterFactory::create(kind, output_path));
        self
    }

    /// Add a console writer
    pub fn with_console_logger(self) -> Self {
        self.with_writer(LogWriterType::Console, None)
    }

    /// Add a file writer; `None` uses `<cwd>/Logs/<product>-Logs.txt`
    pub fn with_file_logger(self, output_path: Option<PathBuf>) -> Self {
        self.with_writer(LogWriterType::File, output_path)
    }

    /// Add an in-memory writer
    pub fn with_memory_logger(self) -> Self {
        self.with_writer(LogWriterType::Memory, None)
    }

    /// Add an already-built writer
    pub fn with_service(mut self, writer: SharedLogWriter) -> Self {
        self.services.add_service(writer);
        self
    }

    /// Number of writers added so far
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Finish, failing if no writer was added
    pub fn build(self) -> LogResult<LoggingServices> {
        if self.services.is_empty() {
            return Err(LogError::NoWriters);
        }
        Ok(self.services)
    }
}
