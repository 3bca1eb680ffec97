//! Log writers and the factory that builds them

mod traits;
mod console;
mod file;
mod memory;
mod factory;

pub use traits::{error_chain, LogWriter, SharedLogWriter};
pub use console::{ConsoleLogWriter, ConsoleMarkup, ConsoleStream};
pub use file::{default_log_path, default_log_path_in, FileLogWriter, LOG_FOLDER_NAME};
pub use memory::{CapturedEntry, MemoryLogWriter};
pub use factory::{
    has_custom_log_writer, has_log_writer, list_log_writers, register_log_writer,
    unregister_log_writer, validate_writer_name, LogWriterFactory, WriterDefinition,
    WriterFactory,
};
