//! Global logger slot
//!
//! The host installs one [`Logger`] at start-up and tears it down at
//! shutdown. Nothing is initialized implicitly.

use std::sync::Arc;

use super::singleton;
use crate::error::{LogError, LogResult};
use crate::logger::Logger;

/// Install `logger` as the process-wide logger
///
/// Clears the writers' previous output first, so every run starts with a
/// fresh log. Returns the logger it replaced, if any.
pub fn init_global_logger(logger: Logger) -> LogResult<Option<Arc<Logger>>> {
    logger.clear_log_entries()?;
    Ok(singleton::install(logger))
}

/// The installed logger, if any
pub fn global_logger() -> Option<Arc<Logger>> {
    singleton::get::<Logger>()
}

/// The installed logger, or `NoWriters` if logging was never initialized
pub fn require_global_logger() -> LogResult<Arc<Logger>> {
    global_logger().ok_or(LogError::NoWriters)
}

/// Remove the installed logger and hand it back
pub fn shutdown_global_logger() -> Option<Arc<Logger>> {
    singleton::remove::<Logger>()
}
