//! Product metadata stamped into log file headers

use serde::{Deserialize, Serialize};

/// Product metadata
///
/// Supplied by the host application. Missing fields fall back to
/// [`ProductInfo::detect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfo {
    /// Product name, also used for the default log file name
    pub name: String,
    pub company: String,
    pub version: String,
    /// Platform the product runs on
    pub platform: String,
    /// Version of the host engine or runtime
    pub engine_version: String,
}

impl Default for ProductInfo {
    fn default() -> Self {
        Self::detect()
    }
}

impl ProductInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::detect()
        }
    }

    /// Metadata from the running executable and this build
    pub fn detect() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Application".to_string());

        Self {
            name,
            company: String::new(),
            version: String::new(),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            engine_version: format!("scribe {}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_engine_version(mut self, engine_version: impl Into<String>) -> Self {
        self.engine_version = engine_version.into();
        self
    }

    /// `<name>-Logs.txt`
    pub fn log_file_name(&self) -> String {
        format!("{}-Logs.txt", self.name)
    }
}
