//! Logger facade
//!
//! A [`Logger`] speaks for one [`LogObjectContext`]. It filters each message
//! against its verbosity threshold once, then hands it to every writer in
//! registration order.

use std::error::Error;
use std::fmt;

use crate::error::{LogError, LogResult, Thrown};
use crate::services::{LoggingServices, ServiceCollection};
use crate::types::{CallerLocation, LogObjectContext, LogVerbosity};
use crate::writers::SharedLogWriter;

/// Verbosity-filtering front end over a set of writers
#[derive(Clone)]
pub struct Logger {
    threshold: LogVerbosity,
    writers: Vec<SharedLogWriter>,
    context: LogObjectContext,
}

impl Logger {
    /// Create a logger over the writers in `services`
    ///
    /// Fails with [`LogError::NoWriters`] if the collection is empty.
    pub fn new(
        services: &LoggingServices,
        context: LogObjectContext,
        threshold: LogVerbosity,
    ) -> LogResult<Self> {
        Self::from_writers(services.services().to_vec(), context, threshold)
    }

    /// Create a logger over an explicit writer list
    pub fn from_writers(
        writers: Vec<SharedLogWriter>,
        context: LogObjectContext,
        threshold: LogVerbosity,
    ) -> LogResult<Self> {
        if writers.is_empty() {
            return Err(LogError::NoWriters);
        }
        Ok(Self {
            threshold,
            writers,
            context,
        })
    }

    /// Same writers and threshold, speaking for another context
    pub fn for_context(&self, context: LogObjectContext) -> Self {
        Self {
            threshold: self.threshold,
            writers: self.writers.clone(),
            context,
        }
    }

    pub fn with_threshold(mut self, threshold: LogVerbosity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> LogVerbosity {
        self.threshold
    }

    pub fn context(&self) -> &LogObjectContext {
        &self.context
    }

    pub fn writers(&self) -> &[SharedLogWriter] {
        &self.writers
    }

    /// Whether a message at `verbosity` would reach the writers
    pub fn is_enabled(&self, verbosity: LogVerbosity) -> bool {
        verbosity.passes(self.threshold)
    }

    /// Log a message, recording the caller's file and line
    ///
    /// The first writer error stops the fan-out and is returned.
    #[track_caller]
    pub fn log(&self, verbosity: LogVerbosity, template: &str, args: &[&dyn fmt::Display]) -> LogResult<()> {
        if !self.is_enabled(verbosity) {
            return Ok(());
        }
        self.dispatch(&CallerLocation::here(), verbosity, template, args)
    }

    /// Log a message with an explicit caller location
    pub fn log_at(
        &self,
        caller: &CallerLocation,
        verbosity: LogVerbosity,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()> {
        if !self.is_enabled(verbosity) {
            return Ok(());
        }
        self.dispatch(caller, verbosity, template, args)
    }

    fn dispatch(
        &self,
        caller: &CallerLocation,
        verbosity: LogVerbosity,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()> {
        for writer in &self.writers {
            writer.write(&self.context, verbosity, caller, template, args)?;
        }
        Ok(())
    }

    #[track_caller]
    pub fn log_assertion(&self, template: &str, args: &[&dyn fmt::Display]) -> LogResult<()> {
        self.log(LogVerbosity::Assertion, template, args)
    }

    #[track_caller]
    pub fn log_info(&self, template: &str, args: &[&dyn fmt::Display]) -> LogResult<()> {
        self.log(LogVerbosity::Info, template, args)
    }

    #[track_caller]
    pub fn log_warning(&self, template: &str, args: &[&dyn fmt::Display]) -> LogResult<()> {
        self.log(LogVerbosity::Warning, template, args)
    }

    #[track_caller]
    pub fn log_error(&self, template: &str, args: &[&dyn fmt::Display]) -> LogResult<()> {
        self.log(LogVerbosity::Error, template, args)
    }

    /// Send an error to every writer without raising it
    ///
    /// Exceptions bypass the verbosity threshold.
    pub fn report_exception(&self, error: &dyn Error) -> LogResult<()> {
        for writer in &self.writers {
            writer.write_exception(&self.context, error)?;
        }
        Ok(())
    }

    /// Log `error` to every writer, then hand it back as an `Err`
    ///
    /// Logging is not a substitute for propagation: the caller always gets the
    /// original error. A writer failure is attached, never swallowed.
    ///
    /// ```
    /// use scribe_core::{Logger, LogObjectContext, LogVerbosity, LoggingServiceBuilder};
    ///
    /// fn load(logger: &Logger) -> Result<u32, scribe_core::Thrown<std::num::ParseIntError>> {
    ///     match "x".parse::<u32>() {
    ///         Ok(v) => Ok(v),
    ///         Err(e) => logger.throw_exception(e),
    ///     }
    /// }
    ///
    /// let services = LoggingServiceBuilder::new().with_memory_logger().build().unwrap();
    /// let ctx = LogObjectContext::named("Loader").unwrap();
    /// let logger = Logger::new(&services, ctx, LogVerbosity::Info).unwrap();
    /// assert!(load(&logger).is_err());
    /// ```
    pub fn throw_exception<T, E>(&self, error: E) -> Result<T, Thrown<E>>
    where
        E: Error,
    {
        match self.report_exception(&error) {
            Ok(()) => Err(Thrown::Raised(error)),
            Err(logging) => Err(Thrown::LoggingFailed {
                original: error,
                logging,
            }),
        }
    }

    /// Clear every writer's output
    pub fn clear_log_entries(&self) -> LogResult<()> {
        if self.writers.is_empty() {
            return Err(LogError::NoWriters);
        }
        for writer in &self.writers {
            writer.clear()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("context", &self.context)
            .field("writers", &self.writers.iter().map(|w| w.kind()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LoggingServiceBuilder;
    use crate::types::LogWriterType;
    use crate::writers::{LogWriter, MemoryLogWriter};
    use std::sync::Arc;

    /// Writer that always fails, to check propagation
    struct BrokenWriter;

    impl LogWriter for BrokenWriter {
        fn kind(&self) -> LogWriterType {
            LogWriterType::File
        }

        fn write(
            &self,
            _context: &LogObjectContext,
            _verbosity: LogVerbosity,
            _caller: &CallerLocation,
            _template: &str,
            _args: &[&dyn fmt::Display],
        ) -> LogResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
        }

        fn write_exception(&self, _context: &LogObjectContext, _error: &dyn Error) -> LogResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
        }

        fn clear(&self) -> LogResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
        }
    }

    fn ctx() -> LogObjectContext {
        LogObjectContext::named("Player").unwrap()
    }

    fn two_memory(threshold: LogVerbosity) -> (Logger, Arc<MemoryLogWriter>, Arc<MemoryLogWriter>) {
        let a = Arc::new(MemoryLogWriter::new());
        let b = Arc::new(MemoryLogWriter::new());
        let services = LoggingServiceBuilder::new()
            .with_service(a.clone())
            .with_service(b.clone())
            .build()
            .unwrap();
        let logger = Logger::new(&services, ctx(), threshold).unwrap();
        (logger, a, b)
    }

    #[test]
    fn test_requires_writers() {
        let result = Logger::from_writers(Vec::new(), ctx(), LogVerbosity::Info);
        assert!(matches!(result, Err(LogError::NoWriters)));
    }

    #[test]
    fn test_threshold_filters_below() {
        let (logger, a, b) = two_memory(LogVerbosity::Warning);

        logger.log(LogVerbosity::Info, "ignored", &[]).unwrap();
        assert!(a.is_empty());
        assert!(b.is_empty());

        logger.log(LogVerbosity::Error, "reported", &[]).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_threshold_matrix() {
        for threshold in LogVerbosity::ALL {
            for verbosity in LogVerbosity::ALL {
                let (logger, a, _) = two_memory(threshold);
                logger.log(verbosity, "m", &[]).unwrap();
                let expected = if verbosity >= threshold { 1 } else { 0 };
                assert_eq!(a.len(), expected, "threshold={} verbosity={}", threshold, verbosity);
            }
        }
    }

    #[test]
    fn test_shorthands_and_caller() {
        let (logger, a, _) = two_memory(LogVerbosity::Assertion);

        let line = line!() + 1;
        logger.log_assertion("a", &[]).unwrap();
        logger.log_info("i {0}", &[&1]).unwrap();
        logger.log_warning("w", &[]).unwrap();
        logger.log_error("e", &[]).unwrap();

        let entries = a.entries();
        let levels: Vec<_> = entries.iter().map(|e| e.verbosity).collect();
        assert_eq!(levels, LogVerbosity::ALL.to_vec());
        assert_eq!(entries[1].message, "i 1");
        // #[track_caller] points at the call above, not into the logger
        assert_eq!(entries[0].caller.file_name, "logger.rs");
        assert_eq!(entries[0].caller.line, line);
    }

    #[test]
    fn test_log_at_uses_given_caller() {
        let (logger, a, _) = two_memory(LogVerbosity::Info);
        let caller = CallerLocation::new("src/ai/enemy.rs", "think", 7);

        logger.log_at(&caller, LogVerbosity::Info, "thinking", &[]).unwrap();
        assert_eq!(a.entries()[0].caller, caller);
    }

    #[test]
    fn test_writer_error_propagates() {
        let memory = Arc::new(MemoryLogWriter::new());
        let broken: SharedLogWriter = Arc::new(BrokenWriter);
        let captured: SharedLogWriter = memory.clone();
        let writers = vec![broken, captured];
        let logger = Logger::from_writers(writers, ctx(), LogVerbosity::Info).unwrap();

        let result = logger.log_info("x", &[]);
        assert!(matches!(result, Err(LogError::Io(_))));
        // fan-out stops at the failing writer
        assert!(memory.is_empty());
    }

    #[test]
    fn test_throw_exception_returns_original() {
        let (logger, a, b) = two_memory(LogVerbosity::Error);

        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "save missing");
        let result: Result<(), _> = logger.throw_exception(err);

        let thrown = result.unwrap_err();
        assert!(thrown.logging_error().is_none());
        let original = thrown.into_original();
        assert_eq!(original.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(original.to_string(), "save missing");

        assert_eq!(a.exceptions().len(), 1);
        assert_eq!(b.exceptions().len(), 1);
    }

    #[test]
    fn test_throw_exception_with_failing_writer() {
        let broken: SharedLogWriter = Arc::new(BrokenWriter);
        let writers = vec![broken];
        let logger = Logger::from_writers(writers, ctx(), LogVerbosity::Info).unwrap();

        let result: Result<u8, _> = logger.throw_exception(LogError::ServiceNotFound);
        let thrown = result.unwrap_err();
        assert!(matches!(thrown.logging_error(), Some(LogError::Io(_))));
        assert!(matches!(thrown.into_original(), LogError::ServiceNotFound));
    }

    #[test]
    fn test_clear_log_entries() {
        let (logger, a, b) = two_memory(LogVerbosity::Info);
        logger.log_info("x", &[]).unwrap();

        logger.clear_log_entries().unwrap();
        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_for_context_shares_writers() {
        let (logger, a, _) = two_memory(LogVerbosity::Info);
        let enemy = logger.for_context(LogObjectContext::named("Enemy").unwrap());

        enemy.log_info("spotted", &[]).unwrap();
        assert_eq!(a.entries()[0].context, "Enemy");
        assert_eq!(enemy.threshold(), LogVerbosity::Info);
        assert_eq!(logger.context().name(), "Player");
    }
}
