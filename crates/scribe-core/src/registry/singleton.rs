//! Process-wide typed singletons
//!
//! One instance per type, installed and torn down explicitly by the host.
//! Installing over an existing instance replaces it and hands the old one back.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

type Instances = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

static INSTANCES: Lazy<RwLock<Instances>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Install `value` as the instance of `T`
///
/// Returns the instance it displaced, if any.
pub fn install<T: Any + Send + Sync>(value: T) -> Option<Arc<T>> {
    install_shared(Arc::new(value))
}

/// Install an already shared instance of `T`
pub fn install_shared<T: Any + Send + Sync>(value: Arc<T>) -> Option<Arc<T>> {
    INSTANCES
        .write()
        .insert(TypeId::of::<T>(), value)
        .and_then(|old| old.downcast::<T>().ok())
}

/// Current instance of `T`
pub fn get<T: Any + Send + Sync>() -> Option<Arc<T>> {
    INSTANCES
        .read()
        .get(&TypeId::of::<T>())
        .cloned()
        .and_then(|any| any.downcast::<T>().ok())
}

/// Current instance of `T`, installing `init()` first if there is none
///
/// `init` runs without the registry lock held, so it may use other
/// singletons. If another thread installs `T` first, its instance wins and
/// the freshly built value is dropped.
pub fn get_or_install<T, F>(init: F) -> Arc<T>
where
    T: Any + Send + Sync,
    F: FnOnce() -> T,
{
    if let Some(existing) = get::<T>() {
        return existing;
    }
    let value = Arc::new(init());

    let mut instances = INSTANCES.write();
    if let Some(existing) = instances
        .get(&TypeId::of::<T>())
        .cloned()
        .and_then(|any| any.downcast::<T>().ok())
    {
        return existing;
    }
    instances.insert(TypeId::of::<T>(), value.clone());
    value
}

/// Remove and return the instance of `T`
pub fn remove<T: Any + Send + Sync>() -> Option<Arc<T>> {
    INSTANCES
        .write()
        .remove(&TypeId::of::<T>())
        .and_then(|old| old.downcast::<T>().ok())
}

/// Whether an instance of `T` is installed
pub fn is_installed<T: Any + Send + Sync>() -> bool {
    INSTANCES.read().contains_key(&TypeId::of::<T>())
}
