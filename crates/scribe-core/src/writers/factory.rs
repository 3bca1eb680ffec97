//! Log writer factory and name registry
//!
//! [`LogWriterFactory::create`] builds the built-in writers from a
//! [`LogWriterType`]. Hosts can also register extra writer kinds by name, so
//! tags coming from configuration resolve through [`LogWriterFactory::create_by_name`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::console::ConsoleLogWriter;
use super::file::FileLogWriter;
use super::memory::MemoryLogWriter;
use super::traits::SharedLogWriter;
use crate::error::LogResult;
use crate::types::LogWriterType;

/// Factory function type for creating log writers
///
/// Receives the output path the caller asked for, if any.
pub type WriterFactory = Box<dyn Fn(Option<&Path>) -> SharedLogWriter + Send + Sync>;

/// Definition of a registered log writer kind
pub struct WriterDefinition {
    /// Unique name for this writer kind
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: WriterFactory,
    /// Shipped with the crate rather than registered by the host
    pub builtin: bool,
}

impl std::fmt::Debug for WriterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("builtin", &self.builtin)
            .finish()
    }
}

fn builtin(kind: LogWriterType, description: &str) -> (String, WriterDefinition) {
    let name = kind.as_str().to_string();
    let definition = WriterDefinition {
        name: name.clone(),
        description: description.to_string(),
        factory: Box::new(move |path: Option<&Path>| -> SharedLogWriter {
            LogWriterFactory::create(kind, path.map(Path::to_path_buf))
        }),
        builtin: true,
    };
    (name, definition)
}

/// Global registry of writer kinds
static REGISTRY: Lazy<RwLock<HashMap<String, WriterDefinition>>> = Lazy::new(|| {
    let map = HashMap::from([
        builtin(LogWriterType::Console, "Write to stdout/stderr"),
        builtin(LogWriterType::File, "Append to a log file with a header block"),
        builtin(LogWriterType::Memory, "Keep entries in memory"),
    ]);
    RwLock::new(map)
});

/// Builds log writers
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWriterFactory;

impl LogWriterFactory {
    /// Create a built-in writer
    ///
    /// `output_path` is only used by the file writer.
    pub fn create(kind: LogWriterType, output_path: Option<PathBuf>) -> SharedLogWriter {
        match kind {
            LogWriterType::Console => Arc::new(ConsoleLogWriter::new()),
            LogWriterType::File => Arc::new(FileLogWriter::new(output_path)),
            LogWriterType::Memory => Arc::new(MemoryLogWriter::new()),
        }
    }

    /// Create a writer from a tag such as `"console"` or `"FileWriter"`
    ///
    /// Registered names win; otherwise the tag is parsed as a [`LogWriterType`].
    pub fn create_by_name(name: &str, output_path: Option<&Path>) -> LogResult<SharedLogWriter> {
        {
            let registry = REGISTRY.read();
            if let Some(def) = registry.get(&name.trim().to_lowercase()) {
                return Ok((def.factory)(output_path));
            }
        }
        let kind: LogWriterType = name.parse()?;
        Ok(Self::create(kind, output_path.map(Path::to_path_buf)))
    }
}

/// Register a new writer kind under `name`
///
/// Names are case-insensitive. Registering an existing name replaces it.
pub fn register_log_writer(name: &str, description: &str, factory: WriterFactory) {
    let key = name.trim().to_lowercase();
    let mut registry = REGISTRY.write();
    registry.insert(
        key.clone(),
        WriterDefinition {
            name: key,
            description: description.to_string(),
            factory,
            builtin: false,
        },
    );
}

/// Unregister a writer kind (mainly for testing)
pub fn unregister_log_writer(name: &str) -> bool {
    REGISTRY.write().remove(&name.trim().to_lowercase()).is_some()
}

/// Check if a writer kind is registered
pub fn has_log_writer(name: &str) -> bool {
    REGISTRY.read().contains_key(&name.trim().to_lowercase())
}

/// Check if the host registered its own writer under `name`
///
/// True when a host registration replaced a built-in kind too.
pub fn has_custom_log_writer(name: &str) -> bool {
    REGISTRY
        .read()
        .get(&name.trim().to_lowercase())
        .map(|def| !def.builtin)
        .unwrap_or(false)
}

/// List all registered writer kinds as (name, description) pairs
pub fn list_log_writers() -> Vec<(String, String)> {
    let mut kinds: Vec<_> = REGISTRY
        .read()
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    kinds.sort();
    kinds
}

/// Resolve a tag without building anything
pub fn validate_writer_name(name: &str) -> LogResult<()> {
    if has_log_writer(name) {
        return Ok(());
    }
    name.parse::<LogWriterType>().map(|_| ())
}
