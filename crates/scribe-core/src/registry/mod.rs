//! Process-wide registry with explicit init and teardown

pub mod singleton;
mod global;

pub use global::{global_logger, init_global_logger, require_global_logger, shutdown_global_logger};
