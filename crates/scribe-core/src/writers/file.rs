//! File log writer
//!
//! Appends one entry per message to a text log. A fresh file starts with a
//! header block describing the product; clearing the writer deletes the file
//! so the next write starts over with a new header.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use super::traits::{error_chain, LogWriter};
use crate::error::LogResult;
use crate::format::{
    file_entry, file_header, format_timestamp, render_template, strip_markup,
    validate_time_format, EntryFields, DEFAULT_HEADER_DATE_FORMAT, DEFAULT_TIMESTAMP_FORMAT,
};
use crate::types::{
    CallerLocation, LogFileFormatTemplate, LogObjectContext, LogVerbosity, LogWriterType,
    ProductInfo,
};

/// Folder under the working directory that holds default log files
pub const LOG_FOLDER_NAME: &str = "Logs";

/// Default log path under `base`: `<base>/Logs/<product>-Logs.txt`
///
/// Creates the `Logs` folder if it is missing.
pub fn default_log_path_in(base: &Path, product: &ProductInfo) -> LogResult<PathBuf> {
    let folder = base.join(LOG_FOLDER_NAME);
    fs::create_dir_all(&folder)?;
    Ok(folder.join(product.log_file_name()))
}

/// Default log path under the current working directory
pub fn default_log_path(product: &ProductInfo) -> LogResult<PathBuf> {
    let cwd = std::env::current_dir()?;
    default_log_path_in(&cwd, product)
}

/// A log writer that appends to a file
pub struct FileLogWriter {
    requested_path: Option<PathBuf>,
    output_path: OnceCell<PathBuf>,
    product: ProductInfo,
    template: LogFileFormatTemplate,
    timestamp_format: String,
    header_date_format: String,
    // serializes create-with-header and append within this process
    lock: Mutex<()>,
}

impl FileLogWriter {
    /// Create a file writer
    ///
    /// With no path, `<cwd>/Logs/<product>-Logs.txt` is resolved on first use.
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            requested_path: output_path.filter(|p| !p.as_os_str().is_empty()),
            output_path: OnceCell::new(),
            product: ProductInfo::detect(),
            template: LogFileFormatTemplate::Default,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            header_date_format: DEFAULT_HEADER_DATE_FORMAT.to_string(),
            lock: Mutex::new(()),
        }
    }

    /// Create a file writer for a specific path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(Some(path.into()))
    }

    /// Use this product metadata in headers and the default file name
    pub fn with_product(mut self, product: ProductInfo) -> Self {
        self.product = product;
        self
    }

    pub fn with_template(mut self, template: LogFileFormatTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the entry timestamp layout (`strftime` syntax)
    pub fn with_timestamp_format(mut self, layout: impl Into<String>) -> LogResult<Self> {
        let layout = layout.into();
        validate_time_format(&layout)?;
        self.timestamp_format = layout;
        Ok(self)
    }

    /// Set the header date layout (`strftime` syntax)
    pub fn with_header_date_format(mut self, layout: impl Into<String>) -> LogResult<Self> {
        let layout = layout.into();
        validate_time_format(&layout)?;
        self.header_date_format = layout;
        Ok(self)
    }

    pub fn product(&self) -> &ProductInfo {
        &self.product
    }

    pub fn template(&self) -> &LogFileFormatTemplate {
        &self.template
    }

    /// Path entries go to, resolving the default on first call
    pub fn output_path(&self) -> LogResult<&Path> {
        self.output_path
            .get_or_try_init(|| match &self.requested_path {
                Some(path) => Ok(path.clone()),
                None => default_log_path(&self.product),
            })
            .map(PathBuf::as_path)
    }

    fn append_entry(
        &self,
        context: &str,
        verbosity: LogVerbosity,
        caller: &CallerLocation,
        message: &str,
    ) -> LogResult<()> {
        let path = self.output_path()?;
        let timestamp = format_timestamp(&Local::now(), &self.timestamp_format)?;
        let entry = file_entry(
            &self.template,
            &EntryFields {
                timestamp: &timestamp,
                verbosity,
                message,
                context,
                caller,
            },
        );

        let _guard = self.lock.lock();
        let mut file = self.open_for_append(path)?;
        file.write_all(entry.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Open the log for appending, creating it with a header if missing
    fn open_for_append(&self, path: &Path) -> LogResult<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let date = format_timestamp(&Local::now(), &self.header_date_format)?;
        let header = file_header(&self.product, &date);

        create_or_append(path, |file| {
            writeln!(file, "{}", header)?;
            file.flush()
        })
    }
}

/// Open `path` for appending, running `write_header` if the file is new
///
/// A new file whose header can't be written is removed again, so the next
/// attempt starts from scratch.
fn create_or_append<F>(path: &Path, write_header: F) -> LogResult<File>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => match write_header(&mut file) {
            Ok(()) => Ok(file),
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(path);
                Err(e.into())
            }
        },
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Ok(OpenOptions::new().append(true).open(path)?)
        }
        Err(e) => Err(e.into()),
    }
}

impl fmt::Debug for FileLogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLogWriter")
            .field("requested_path", &self.requested_path)
            .field("output_path", &self.output_path.get())
            .field("template", &self.template)
            .finish()
    }
}

impl LogWriter for FileLogWriter {
    fn kind(&self) -> LogWriterType {
        LogWriterType::File
    }

    fn write(
        &self,
        context: &LogObjectContext,
        verbosity: LogVerbosity,
        caller: &CallerLocation,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()> {
        let message = strip_markup(&render_template(template, args));
        self.append_entry(context.name(), verbosity, caller, &message)
    }

    fn write_exception(&self, context: &LogObjectContext, error: &dyn Error) -> LogResult<()> {
        let message = format!("Exception: {}", error_chain(error).join(" | caused by: "));
        self.append_entry(
            context.name(),
            LogVerbosity::Error,
            &CallerLocation::unknown(),
            &strip_markup(&message),
        )
    }

    fn clear(&self) -> LogResult<()> {
        let path = self.output_path()?;
        let _guard = self.lock.lock();
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use tempfile::tempdir;

    fn product() -> ProductInfo {
        ProductInfo::new("Game")
            .with_company("Studio")
            .with_version("1.0")
    }

    fn ctx() -> LogObjectContext {
        LogObjectContext::named("Player").unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_default_path_layout() {
        let dir = tempdir().unwrap();
        let path = default_log_path_in(dir.path(), &product()).unwrap();
        assert_eq!(path, dir.path().join("Logs").join("Game-Logs.txt"));
        assert!(dir.path().join("Logs").is_dir());
    }

    #[test]
    fn test_first_write_creates_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path).with_product(product());

        assert!(!path.exists());
        writer
            .write(&ctx(), LogVerbosity::Info, &CallerLocation::here(), "spawned at {0}", &[&"(1, 2)"])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[Log File] ["));
        assert!(content.contains("Product: Game"));
        assert!(content.contains("[Info]: spawned at (1, 2)"));
        assert!(content.contains("GameObject=Player Class=file.rs"));
    }

    #[test]
    fn test_n_writes_one_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path).with_product(product());
        let caller = CallerLocation::unknown();

        for i in 0..7 {
            writer.write(&ctx(), LogVerbosity::Warning, &caller, "tick {0}", &[&i]).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(count(&content, "[Log File]"), 1);
        assert_eq!(count(&content, "[Trace]"), 7);
        assert!(content.contains("tick 6"));
    }

    #[test]
    fn test_clear_then_write_resets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path).with_product(product());
        let caller = CallerLocation::unknown();

        for _ in 0..3 {
            writer.write(&ctx(), LogVerbosity::Info, &caller, "old", &[]).unwrap();
        }
        writer.clear().unwrap();
        assert!(!path.exists());

        // clearing a missing file is fine
        writer.clear().unwrap();

        writer.write(&ctx(), LogVerbosity::Info, &caller, "new", &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(count(&content, "[Log File]"), 1);
        assert_eq!(count(&content, "[Trace]"), 1);
        assert!(!content.contains("old"));
    }

    #[test]
    fn test_markup_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path);

        writer
            .write(&ctx(), LogVerbosity::Error, &CallerLocation::unknown(), "<color=red><b>{0}</b></color>", &[&"dead"])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[Error]: dead "));
        assert!(!content.contains("<color"));
    }

    #[test]
    fn test_standard_template_and_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path)
            .with_template(LogFileFormatTemplate::Standard)
            .with_timestamp_format("T%Y")
            .unwrap();

        writer.write(&ctx(), LogVerbosity::Info, &CallerLocation::unknown(), "hi", &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("] Info: [hi]\n"));
        assert!(content.contains("[T2"));
    }

    #[test]
    fn test_invalid_time_format_rejected() {
        let result = FileLogWriter::at("unused.log").with_timestamp_format("%Q");
        assert!(matches!(result, Err(LogError::Config(_))));
    }

    #[test]
    fn test_write_exception_appends_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = FileLogWriter::at(&path);

        let err = LogError::Io(std::io::Error::new(ErrorKind::Other, "disk full"));
        writer.write_exception(&ctx(), &err).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[Error]: Exception: IO error: disk full | caused by: disk full"));
    }

    #[test]
    fn test_io_failure_propagates() {
        let dir = tempdir().unwrap();
        // a directory where the file should be
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        let writer = FileLogWriter::at(&path);

        let result = writer.write(&ctx(), LogVerbosity::Info, &CallerLocation::unknown(), "x", &[]);
        assert!(matches!(result, Err(LogError::Io(_))));
    }

    #[test]
    fn test_failed_header_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");

        let result = create_or_append(&path, |_| {
            Err(std::io::Error::new(ErrorKind::Other, "disk full"))
        });
        assert!(matches!(result, Err(LogError::Io(_))));
        assert!(!path.exists());

        // the next write still gets its header
        let writer = FileLogWriter::at(&path).with_product(product());
        writer.write(&ctx(), LogVerbosity::Info, &CallerLocation::unknown(), "x", &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(count(&content, "[Log File]"), 1);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("game.log");
        let writer = FileLogWriter::at(&path);

        writer.write(&ctx(), LogVerbosity::Info, &CallerLocation::unknown(), "x", &[]).unwrap();
        assert!(path.exists());
        assert_eq!(writer.output_path().unwrap(), path.as_path());
    }

    #[test]
    fn test_concurrent_writes_share_one_header() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempdir().unwrap();
        let path = dir.path().join("game.log");
        let writer = Arc::new(FileLogWriter::at(&path));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let writer = Arc::clone(&writer);
                thread::spawn(move || {
                    let ctx = LogObjectContext::named(format!("Worker{}", i)).unwrap();
                    writer.write(&ctx, LogVerbosity::Info, &CallerLocation::unknown(), "up", &[]).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(count(&content, "[Log File]"), 1);
        assert_eq!(count(&content, "[Trace]"), 8);
    }
}
