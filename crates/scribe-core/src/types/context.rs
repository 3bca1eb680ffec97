//! Log source context and caller location

use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LogError, LogResult};

/// Identifies the component a logger speaks for
///
/// Pairs a readable name with an opaque owner handle. Immutable once built.
#[derive(Clone)]
pub struct LogObjectContext {
    name: String,
    owner: Arc<dyn Any + Send + Sync>,
}

impl LogObjectContext {
    /// Create a context owned by `owner`
    pub fn new<T: Any + Send + Sync>(name: impl Into<String>, owner: Arc<T>) -> LogResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LogError::NullArgument("context_name"));
        }
        Ok(Self { name, owner })
    }

    /// Create a context whose owner is just its name
    pub fn named(name: impl Into<String>) -> LogResult<Self> {
        let name = name.into();
        let owner = Arc::new(name.clone());
        Self::new(name, owner)
    }

    /// Human-readable source name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque owner handle
    pub fn owner(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.owner
    }

    /// Borrow the owner as a concrete type
    pub fn owner_as<T: Any>(&self) -> Option<&T> {
        self.owner.downcast_ref::<T>()
    }
}

impl fmt::Debug for LogObjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogObjectContext")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LogObjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where a log call came from
///
/// Every field is best-effort; [`CallerLocation::unknown`] leaves them empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerLocation {
    /// Source path as the compiler saw it
    pub file_path: String,
    /// Final component of `file_path`
    pub file_name: String,
    /// Enclosing function, if known
    pub function: String,
    /// 1-based line, 0 when unknown
    pub line: u32,
}

impl CallerLocation {
    pub fn new(file_path: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        let file_path = file_path.into();
        let file_name = Path::new(&file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_path,
            file_name,
            function: function.into(),
            line,
        }
    }

    /// Location with every field empty
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Location of the caller of the enclosing `#[track_caller]` chain
    ///
    /// The function name isn't available this way; use
    /// [`caller_location!`](crate::caller_location) when it matters.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    pub fn is_unknown(&self) -> bool {
        self.file_path.is_empty() && self.function.is_empty() && self.line == 0
    }
}

impl From<&Location<'_>> for CallerLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), "", location.line())
    }
}

/// Strip the helper suffix left by the `caller_location!` type-name trick
#[doc(hidden)]
pub fn __function_name(raw: &'static str) -> &'static str {
    let name = raw.strip_suffix("::__f").unwrap_or(raw);
    name.trim_end_matches("::{{closure}}")
}

/// Capture file, enclosing function and line at the call site
#[macro_export]
macro_rules! caller_location {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::types::CallerLocation::new(
            file!(),
            $crate::types::context::__function_name(__type_name_of(__f)),
            line!(),
        )
    }};
}
