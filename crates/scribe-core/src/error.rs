//! Logging error types

use thiserror::Error;

/// Errors that can occur while configuring or driving the log pipeline
#[derive(Error, Debug)]
pub enum LogError {
    /// A required argument was missing or empty
    #[error("Argument cannot be empty: {0}")]
    NullArgument(&'static str),

    /// No log writers were configured
    #[error("No log writers have been added. Add at least one log writer first.")]
    NoWriters,

    /// Unrecognized writer type tag
    #[error("Invalid log writer type: {0}")]
    InvalidWriterType(String),

    /// Unrecognized verbosity name
    #[error("Invalid log verbosity: {0}")]
    InvalidVerbosity(String),

    /// Writer is not part of the service collection
    #[error("Service value not found in the collection")]
    ServiceNotFound,

    /// Filesystem error from a writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LogError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid writer type error
    pub fn invalid_writer_type(tag: impl Into<String>) -> Self {
        Self::InvalidWriterType(tag.into())
    }
}

pub type LogResult<T> = Result<T, LogError>;

/// An error raised through [`Logger::throw_exception`](crate::Logger::throw_exception)
///
/// The original error always travels back to the caller. When a writer
/// fails while recording it, the logging failure rides along with it.
#[derive(Error, Debug)]
pub enum Thrown<E> {
    /// Error was logged by every writer and re-raised
    #[error("{0}")]
    Raised(E),

    /// A writer failed while logging the error
    #[error("{original} (logging failed: {logging})")]
    LoggingFailed {
        original: E,
        #[source]
        logging: LogError,
    },
}

impl<E> Thrown<E> {
    /// Get the original error back, dropping any logging failure
    pub fn into_original(self) -> E {
        match self {
            Thrown::Raised(e) => e,
            Thrown::LoggingFailed { original, .. } => original,
        }
    }

    /// Borrow the original error
    pub fn original(&self) -> &E {
        match self {
            Thrown::Raised(e) => e,
            Thrown::LoggingFailed { original, .. } => original,
        }
    }

    /// The writer failure, if one happened
    pub fn logging_error(&self) -> Option<&LogError> {
        match self {
            Thrown::Raised(_) => None,
            Thrown::LoggingFailed { logging, .. } => Some(logging),
        }
    }
}
