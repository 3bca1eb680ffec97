//! Verbosity levels, writer kinds and file templates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Log verbosity levels
///
/// Ordinal order is the filtering order: a logger with threshold `T`
/// lets a message at `V` through when `V >= T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogVerbosity {
    /// Checks that should always hold
    #[default]
    Assertion = 0,
    /// General information about the application's state
    Info = 1,
    /// Something that might need attention
    Warning = 2,
    /// Failures that impact functionality
    Error = 3,
}

impl LogVerbosity {
    /// All levels in ordinal order
    pub const ALL: [LogVerbosity; 4] = [
        LogVerbosity::Assertion,
        LogVerbosity::Info,
        LogVerbosity::Warning,
        LogVerbosity::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogVerbosity::Assertion => "Assertion",
            LogVerbosity::Info => "Info",
            LogVerbosity::Warning => "Warning",
            LogVerbosity::Error => "Error",
        }
    }

    /// Whether a message at this level passes `threshold`
    pub fn passes(self, threshold: LogVerbosity) -> bool {
        self >= threshold
    }
}

impl fmt::Display for LogVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogVerbosity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assertion" | "assert" => Ok(LogVerbosity::Assertion),
            "info" => Ok(LogVerbosity::Info),
            "warning" | "warn" => Ok(LogVerbosity::Warning),
            "error" | "err" => Ok(LogVerbosity::Error),
            _ => Err(LogError::InvalidVerbosity(s.to_string())),
        }
    }
}

/// Kind of log writer the factory can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWriterType {
    /// Writes to stdout/stderr
    Console,
    /// Appends to a log file
    File,
    /// Keeps rendered lines in memory
    Memory,
}

impl LogWriterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogWriterType::Console => "console",
            LogWriterType::File => "file",
            LogWriterType::Memory => "memory",
        }
    }
}

impl fmt::Display for LogWriterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogWriterType {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "consolewriter" => Ok(LogWriterType::Console),
            "file" | "filewriter" => Ok(LogWriterType::File),
            "memory" | "memorywriter" => Ok(LogWriterType::Memory),
            _ => Err(LogError::invalid_writer_type(s)),
        }
    }
}

/// Layout used for file log entries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFileFormatTemplate {
    /// `[ts] [Level]: message` with a `[Trace]` and `[Directory]` line
    #[default]
    Default,
    /// `[ts] Level: [message]` with bracketed trace fields
    Standard,
    /// User layout with `{timestamp}`, `{verbosity}`, `{message}`, `{context}`,
    /// `{file}`, `{function}`, `{line}` and `{path}` placeholders
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(LogVerbosity::Assertion < LogVerbosity::Info);
        assert!(LogVerbosity::Info < LogVerbosity::Warning);
        assert!(LogVerbosity::Warning < LogVerbosity::Error);
        assert_eq!(LogVerbosity::Error as u8, 3);
    }

    #[test]
    fn test_verbosity_passes() {
        assert!(!LogVerbosity::Info.passes(LogVerbosity::Warning));
        assert!(LogVerbosity::Warning.passes(LogVerbosity::Warning));
        assert!(LogVerbosity::Error.passes(LogVerbosity::Warning));
        for v in LogVerbosity::ALL {
            assert!(v.passes(LogVerbosity::Assertion));
        }
    }

    #[test]
    fn test_verbosity_parse() {
        assert_eq!("INFO".parse::<LogVerbosity>().unwrap(), LogVerbosity::Info);
        assert_eq!("warn".parse::<LogVerbosity>().unwrap(), LogVerbosity::Warning);
        assert_eq!(" Error ".parse::<LogVerbosity>().unwrap(), LogVerbosity::Error);
        assert!(matches!(
            "verbose".parse::<LogVerbosity>(),
            Err(LogError::InvalidVerbosity(_))
        ));
        assert_eq!(LogVerbosity::Warning.to_string(), "Warning");
    }

    #[test]
    fn test_writer_type_parse() {
        assert_eq!("ConsoleWriter".parse::<LogWriterType>().unwrap(), LogWriterType::Console);
        assert_eq!("file".parse::<LogWriterType>().unwrap(), LogWriterType::File);
        assert!(matches!(
            "ScreenWriter".parse::<LogWriterType>(),
            Err(LogError::InvalidWriterType(tag)) if tag == "ScreenWriter"
        ));
    }

    #[test]
    fn test_template_serde() {
        let t: LogFileFormatTemplate = serde_yaml::from_str("standard").unwrap();
        assert_eq!(t, LogFileFormatTemplate::Standard);

        let t: LogFileFormatTemplate =
            serde_json::from_str(r#"{"custom": "{verbosity} {message}"}"#).unwrap();
        assert_eq!(t, LogFileFormatTemplate::Custom("{verbosity} {message}".to_string()));
    }
}
