//! Logging macros that capture the call site
//!
//! ```
//! use scribe_core::{log_info, log_error, Logger, LogObjectContext, LogVerbosity, LoggingServiceBuilder};
//!
//! let services = LoggingServiceBuilder::new().with_memory_logger().build().unwrap();
//! let logger = Logger::new(&services, LogObjectContext::named("Player").unwrap(), LogVerbosity::Info).unwrap();
//!
//! log_info!(logger, "spawned at {0},{1}", 3, 4).unwrap();
//! log_error!(logger, "no args").unwrap();
//! ```

/// Log through a [`Logger`](crate::Logger) with file, function and line filled in
#[macro_export]
macro_rules! scribe_log {
    ($logger:expr, $verbosity:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            &$crate::caller_location!(),
            $verbosity,
            $template,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

#[macro_export]
macro_rules! log_assertion {
    ($logger:expr, $($rest:tt)+) => {
        $crate::scribe_log!($logger, $crate::LogVerbosity::Assertion, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::scribe_log!($logger, $crate::LogVerbosity::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::scribe_log!($logger, $crate::LogVerbosity::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::scribe_log!($logger, $crate::LogVerbosity::Error, $($rest)+)
    };
}
