//! Console log writer

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::io::{self, Write};

use super::traits::{error_chain, LogWriter};
use crate::error::LogResult;
use crate::format::{console_line, console_rich_line, render_template};
use crate::types::{CallerLocation, LogObjectContext, LogVerbosity, LogWriterType};

/// Output stream a message is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    /// Info goes to stdout, everything else to stderr
    pub fn for_verbosity(verbosity: LogVerbosity) -> Self {
        match verbosity {
            LogVerbosity::Info => ConsoleStream::Stdout,
            LogVerbosity::Assertion | LogVerbosity::Warning | LogVerbosity::Error => {
                ConsoleStream::Stderr
            }
        }
    }
}

/// How console lines are decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMarkup {
    /// `[Info] Player: message`
    #[default]
    Plain,
    /// Engine rich-text tags around level, message and context
    RichText,
}

/// A log writer that outputs to the console (stdout/stderr)
///
/// Never fails: output to a closed stream is dropped instead of panicking.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogWriter {
    markup: ConsoleMarkup,
}

impl ConsoleLogWriter {
    /// Create a plain-text console writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console writer with the given markup
    pub fn with_markup(markup: ConsoleMarkup) -> Self {
        Self { markup }
    }

    pub fn markup(&self) -> ConsoleMarkup {
        self.markup
    }

    /// Line as it would be printed
    pub fn render(
        &self,
        context: &LogObjectContext,
        verbosity: LogVerbosity,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> String {
        let message = render_template(template, args);
        match self.markup {
            ConsoleMarkup::Plain => console_line(context, verbosity, &message),
            ConsoleMarkup::RichText => console_rich_line(context, verbosity, &message),
        }
    }

    /// Exception message, its causes and a captured backtrace
    fn write_chain(
        out: &mut impl Write,
        context: &LogObjectContext,
        error: &dyn Error,
    ) -> io::Result<()> {
        let mut chain = error_chain(error).into_iter();
        if let Some(message) = chain.next() {
            writeln!(out, "[Exception] {}: {}", context.name(), message)?;
        }
        for cause in chain {
            writeln!(out, "    caused by: {}", cause)?;
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            writeln!(out, "{}", backtrace)?;
        }
        Ok(())
    }

    /// Write one line; a closed or broken stream drops it
    fn emit(stream: ConsoleStream, line: &str) {
        let _ = match stream {
            ConsoleStream::Stdout => writeln!(io::stdout().lock(), "{}", line),
            ConsoleStream::Stderr => writeln!(io::stderr().lock(), "{}", line),
        };
    }
}

impl LogWriter for ConsoleLogWriter {
    fn kind(&self) -> LogWriterType {
        LogWriterType::Console
    }

    fn write(
        &self,
        context: &LogObjectContext,
        verbosity: LogVerbosity,
        _caller: &CallerLocation,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> LogResult<()> {
        let line = self.render(context, verbosity, template, args);
        Self::emit(ConsoleStream::for_verbosity(verbosity), &line);
        Ok(())
    }

    fn write_exception(&self, context: &LogObjectContext, error: &dyn Error) -> LogResult<()> {
        let _ = Self::write_chain(&mut io::stderr().lock(), context, error);
        Ok(())
    }

    fn clear(&self) -> LogResult<()> {
        // consoles can't be cleared
        Ok(())
    }
}
