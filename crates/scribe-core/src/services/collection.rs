//! Ordered service collections

use std::fmt;
use std::sync::Arc;

use crate::error::{LogError, LogResult};
use crate::writers::{LogWriter, SharedLogWriter};

/// An insertion-ordered collection of shared services
///
/// Services are compared by identity (`Arc::ptr_eq`), never by value.
pub trait ServiceCollection<T: ?Sized> {
    /// Append a service
    fn add_service(&mut self, service: Arc<T>);

    /// Remove one service
    ///
    /// Returns `Err(LogError::ServiceNotFound)` if it isn't in the collection.
    fn remove_service(&mut self, service: &Arc<T>) -> LogResult<()>;

    /// Services in insertion order
    fn services(&self) -> &[Arc<T>];

    /// Remove every service
    fn clear_services(&mut self);

    /// Number of services
    fn len(&self) -> usize {
        self.services().len()
    }

    fn is_empty(&self) -> bool {
        self.services().is_empty()
    }

    /// Check whether this exact instance is present
    fn contains_service(&self, service: &Arc<T>) -> bool {
        self.services().iter().any(|s| Arc::ptr_eq(s, service))
    }
}

/// The configured log writers
#[derive(Clone, Default)]
pub struct LoggingServices {
    writers: Vec<SharedLogWriter>,
}

impl LoggingServices {
    /// Create a collection holding `writers`
    pub fn new(writers: Vec<SharedLogWriter>) -> Self {
        Self { writers }
    }

    /// Iterate writers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SharedLogWriter> {
        self.writers.iter()
    }
}

impl ServiceCollection<dyn LogWriter> for LoggingServices {
    fn add_service(&mut self, service: SharedLogWriter) {
        self.writers.push(service);
    }

    fn remove_service(&mut self, service: &SharedLogWriter) -> LogResult<()> {
        let pos = self
            .writers
            .iter()
            .position(|w| Arc::ptr_eq(w, service))
            .ok_or(LogError::ServiceNotFound)?;
        self.writers.remove(pos);
        Ok(())
    }

    fn services(&self) -> &[SharedLogWriter] {
        &self.writers
    }

    fn clear_services(&mut self) {
        self.writers.clear();
    }
}

impl fmt::Debug for LoggingServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.writers.iter().map(|w| w.kind()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogWriterType;
    use crate::writers::{ConsoleLogWriter, MemoryLogWriter};

    fn memory() -> SharedLogWriter {
        Arc::new(MemoryLogWriter::new())
    }

    #[test]
    fn test_add_keeps_order() {
        let mut services = LoggingServices::default();
        assert!(services.is_empty());

        services.add_service(Arc::new(ConsoleLogWriter::new()));
        services.add_service(memory());

        let kinds: Vec<_> = services.iter().map(|w| w.kind()).collect();
        assert_eq!(kinds, vec![LogWriterType::Console, LogWriterType::Memory]);
        assert_eq!(services.len(), 2);
    }

    #[test]
    fn test_remove_present_service() {
        let first = memory();
        let second = memory();
        let mut services = LoggingServices::new(vec![first.clone(), second.clone()]);

        services.remove_service(&first).unwrap();
        assert_eq!(services.len(), 1);
        assert!(!services.contains_service(&first));
        assert!(services.contains_service(&second));
    }

    #[test]
    fn test_remove_missing_service() {
        let mut services = LoggingServices::new(vec![memory()]);
        // same type, different instance
        let stranger = memory();

        let result = services.remove_service(&stranger);
        assert!(matches!(result, Err(LogError::ServiceNotFound)));
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn test_duplicates_removed_one_at_a_time() {
        let writer = memory();
        let mut services = LoggingServices::new(vec![writer.clone(), writer.clone()]);

        services.remove_service(&writer).unwrap();
        assert_eq!(services.len(), 1);
        services.remove_service(&writer).unwrap();
        assert!(services.is_empty());
    }

    #[test]
    fn test_clear_services() {
        let mut services = LoggingServices::new(vec![memory(), memory()]);
        services.clear_services();
        assert!(services.is_empty());
    }
}
