//! Scribe Core
//!
//! Pluggable logging pipeline for applications and game hosts.
//! A [`Logger`] fans each message out to a collection of [`LogWriter`]s
//! (console, file, in-memory, or anything registered by name) once it
//! clears the logger's verbosity threshold.
//!
//! ## Wiring
//!
//! ```
//! use scribe_core::{LoggingServiceBuilder, LogObjectContext, LogVerbosity, Logger};
//!
//! let services = LoggingServiceBuilder::new()
//!     .with_console_logger()
//!     .with_memory_logger()
//!     .build()
//!     .unwrap();
//!
//! let logger = Logger::new(&services, LogObjectContext::named("Player").unwrap(), LogVerbosity::Info)
//!     .unwrap();
//!
//! logger.log_warning("low health: {0}", &[&12]).unwrap();
//! // below the threshold, nothing is written
//! logger.log_assertion("ignored", &[]).unwrap();
//! ```
//!
//! Settings can also come from a YAML or JSON file via [`LoggingConfig`],
//! with `SCRIBE_LOG_VERBOSITY` and `SCRIBE_LOG_FILE` overriding it.

pub mod types;
pub mod error;
pub mod format;
pub mod writers;
pub mod services;
pub mod logger;
pub mod registry;
pub mod config;
mod macros;

// Re-export commonly used types
pub use types::{
    verbosity_color, CallerLocation, Color32, ColorRef, LogFileFormatTemplate, LogObjectContext,
    LogVerbosity, LogWriterType, MarkupColor, ProductInfo, RichText,
};

pub use error::{LogError, LogResult, Thrown};

pub use writers::{
    register_log_writer, list_log_writers, has_log_writer, unregister_log_writer,
    ConsoleLogWriter, ConsoleMarkup, FileLogWriter, LogWriter, LogWriterFactory,
    MemoryLogWriter, SharedLogWriter,
};

pub use services::{LoggingServiceBuilder, LoggingServices, ServiceCollection};

pub use logger::Logger;

pub use registry::{global_logger, init_global_logger, require_global_logger, shutdown_global_logger};

pub use config::LoggingConfig;
