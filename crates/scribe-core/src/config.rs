//! File-based logging configuration (YAML or JSON)
//!
//! The user-level file lives at `<config_dir>/scribe/logging.yaml`. Any path
//! can be loaded directly; `.json` files are parsed as JSON, everything else
//! as YAML. `SCRIBE_LOG_VERBOSITY` and `SCRIBE_LOG_FILE` override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::format::{validate_time_format, DEFAULT_HEADER_DATE_FORMAT, DEFAULT_TIMESTAMP_FORMAT};
use crate::logger::Logger;
use crate::services::{LoggingServiceBuilder, LoggingServices};
use crate::types::{LogFileFormatTemplate, LogObjectContext, LogVerbosity, LogWriterType, ProductInfo};
use crate::writers::{
    has_custom_log_writer, validate_writer_name, ConsoleLogWriter, ConsoleMarkup, FileLogWriter,
    LogWriterFactory, SharedLogWriter,
};

/// Environment variable overriding the verbosity threshold
pub const ENV_VERBOSITY: &str = "SCRIBE_LOG_VERBOSITY";

/// Environment variable overriding the log file path
pub const ENV_LOG_FILE: &str = "SCRIBE_LOG_FILE";

/// Console writer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Emit engine rich-text markup instead of plain lines
    pub rich_text: bool,
}

/// File writer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Log file path; `<cwd>/Logs/<product>-Logs.txt` when unset
    pub path: Option<PathBuf>,
    /// Entry layout
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub template: LogFileFormatTemplate,
    /// `strftime` layout of entry timestamps
    pub timestamp_format: String,
    /// `strftime` layout of the header date
    pub header_date_format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            path: None,
            template: LogFileFormatTemplate::Default,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            header_date_format: DEFAULT_HEADER_DATE_FORMAT.to_string(),
        }
    }
}

/// Logging configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Threshold: messages below it are dropped
    pub verbosity: LogVerbosity,
    /// Writer tags, in fan-out order
    pub writers: Vec<String>,
    pub console: ConsoleSettings,
    pub file: FileSettings,
    /// Metadata for file headers and the default file name
    pub product: ProductInfo,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: LogVerbosity::Assertion,
            writers: vec![
                LogWriterType::Console.as_str().to_string(),
                LogWriterType::File.as_str().to_string(),
            ],
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
            product: ProductInfo::detect(),
        }
    }
}

impl LoggingConfig {
    /// Path of the user-level config file
    pub fn user_config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("scribe").join("logging.yaml")
    }

    /// Load the user-level config, with environment overrides applied
    pub fn load_user() -> LogResult<Self> {
        Self::load(Self::user_config_path())?.with_env_overrides()
    }

    /// Load config from a file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = if is_json(path) {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> LogResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| LogError::config(format!("Failed to parse YAML: {}", e)))
    }

    pub fn from_json_str(content: &str) -> LogResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| LogError::config(format!("Failed to parse JSON: {}", e)))
    }

    pub fn to_yaml_string(&self) -> LogResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LogError::config(format!("Failed to serialize YAML: {}", e)))
    }

    /// Save config to a file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)
                .map_err(|e| LogError::config(format!("Failed to serialize JSON: {}", e)))?
        } else {
            self.to_yaml_string()?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `SCRIBE_LOG_VERBOSITY` and `SCRIBE_LOG_FILE`
    pub fn with_env_overrides(self) -> LogResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> LogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_VERBOSITY).filter(|v| !v.trim().is_empty()) {
            self.verbosity = value.parse()?;
        }
        if let Some(value) = lookup(ENV_LOG_FILE).filter(|v| !v.trim().is_empty()) {
            self.file.path = Some(PathBuf::from(value));
        }
        Ok(self)
    }

    /// Check writer tags and time layouts
    pub fn validate(&self) -> LogResult<()> {
        if self.writers.is_empty() {
            return Err(LogError::NoWriters);
        }
        for tag in &self.writers {
            validate_writer_name(tag)?;
        }
        validate_time_format(&self.file.timestamp_format)?;
        validate_time_format(&self.file.header_date_format)?;
        Ok(())
    }

    /// Build one writer from its tag
    ///
    /// A writer the host registered under the tag wins, even over a built-in
    /// kind. Otherwise built-in kinds are built from these settings.
    pub fn build_writer(&self, tag: &str) -> LogResult<SharedLogWriter> {
        if has_custom_log_writer(tag) {
            return LogWriterFactory::create_by_name(tag, self.file.path.as_deref());
        }
        match tag.parse::<LogWriterType>() {
            Ok(LogWriterType::Console) => {
                let markup = if self.console.rich_text {
                    ConsoleMarkup::RichText
                } else {
                    ConsoleMarkup::Plain
                };
                Ok(Arc::new(ConsoleLogWriter::with_markup(markup)))
            }
            Ok(LogWriterType::File) => {
                let writer = FileLogWriter::new(self.file.path.clone())
                    .with_product(self.product.clone())
                    .with_template(self.file.template.clone())
                    .with_timestamp_format(self.file.timestamp_format.clone())?
                    .with_header_date_format(self.file.header_date_format.clone())?;
                Ok(Arc::new(writer))
            }
            Ok(LogWriterType::Memory) | Err(_) => {
                LogWriterFactory::create_by_name(tag, self.file.path.as_deref())
            }
        }
    }

    /// Build the configured writers in order
    pub fn build_services(&self) -> LogResult<LoggingServices> {
        self.writers
            .iter()
            .try_fold(LoggingServiceBuilder::new(), |builder, tag| {
                Ok::<_, LogError>(builder.with_service(self.build_writer(tag)?))
            })?
            .build()
    }

    /// Build a logger speaking for `context`
    pub fn build_logger(&self, context: LogObjectContext) -> LogResult<Logger> {
        Logger::new(&self.build_services()?, context, self.verbosity)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
