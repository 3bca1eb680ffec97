//! Log formatting helpers
//!
//! Turns (verbosity, message, context, caller) into console lines,
//! file entries and file headers.

use std::fmt::{self, Write as _};

use chrono::{DateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LogError, LogResult};
use crate::types::{
    verbosity_color, CallerLocation, ColorRef, LogFileFormatTemplate, LogObjectContext,
    LogVerbosity, ProductInfo, RichText,
};

/// Default `strftime` layout for entry timestamps
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Default `strftime` layout for the header date (long date)
pub const DEFAULT_HEADER_DATE_FORMAT: &str = "%A, %B %-d, %Y";

const RULE: &str = "________________________________________________";

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?(?:b|i)>|<color=[^>]*>|</color>").expect("markup pattern is valid")
});

/// Render an indexed message template
///
/// `{0}`, `{1}`, ... are replaced by the matching argument; `{{` and `}}`
/// are literal braces. Placeholders without a matching argument stay as written.
pub fn render_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                let arg = tail[1..end]
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index));
                if let Some(arg) = arg {
                    let _ = write!(out, "{}", arg);
                    rest = &tail[end + 1..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Remove rich-text tags (`<b>`, `<i>`, `<color=...>`) from a message
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Format a timestamp, rejecting invalid `strftime` layouts
pub fn format_timestamp<Tz>(time: &DateTime<Tz>, layout: &str) -> LogResult<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", time.format(layout))
        .map_err(|_| LogError::config(format!("Invalid time format: {}", layout)))?;
    Ok(out)
}

/// Check a `strftime` layout without formatting anything real
pub fn validate_time_format(layout: &str) -> LogResult<()> {
    format_timestamp(&chrono::Local::now(), layout).map(|_| ())
}

/// Plain console line: `[Info] Player: message`
pub fn console_line(context: &LogObjectContext, verbosity: LogVerbosity, message: &str) -> String {
    format!("[{}] {}: {}", verbosity, context.name(), message)
}

/// Console line with rich-text markup for engine consoles
pub fn console_rich_line(context: &LogObjectContext, verbosity: LogVerbosity, message: &str) -> String {
    format!(
        "Log: [{}] Message: {} Root: {}",
        verbosity.as_str().rich(verbosity_color(verbosity), true),
        message.rich(ColorRef::White, true),
        context.name().rich(ColorRef::Magenta, true),
    )
}

/// Header block written once at the top of a fresh log file
pub fn file_header(product: &ProductInfo, date: &str) -> String {
    format!(
        "[Log File] [{date}]\n{RULE}\n\n\
         [Runtime Info] - Product: {}\n\t\t Company: {}\n\t\t Version: {}\n\t\t Platform: {}\n\n\
         Tip - Trace: [GameObject][Class][Method][Line]\n{RULE}\n\n\
         [Logs generated from engine version: {}]\n\n",
        product.name,
        product.company,
        product.version,
        product.platform,
        product.engine_version,
    )
}

/// Fill `{name}` placeholders in one pass over `layout`
///
/// Inserted values are never rescanned. Unknown names stay as written.
fn render_named<'v, F>(layout: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'v str>,
{
    let mut out = String::with_capacity(layout.len());
    let mut rest = layout;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(end) = tail.find('}') {
            if let Some(value) = lookup(&tail[1..end]) {
                out.push_str(value);
                rest = &tail[end + 1..];
                continue;
            }
        }

        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Everything a file entry is built from
#[derive(Debug, Clone)]
pub struct EntryFields<'a> {
    pub timestamp: &'a str,
    pub verbosity: LogVerbosity,
    pub message: &'a str,
    pub context: &'a str,
    pub caller: &'a CallerLocation,
}

/// One file entry, newline-terminated
pub fn file_entry(template: &LogFileFormatTemplate, fields: &EntryFields<'_>) -> String {
    let EntryFields { timestamp, verbosity, message, context, caller } = fields;
    let mut entry = match template {
        LogFileFormatTemplate::Default => format!(
            "[{}] [{}]: {} \n\t   [Trace]: GameObject={} Class={} Function={} Line=({})\n\t   [Directory]: {}\n",
            timestamp, verbosity, message, context, caller.file_name, caller.function, caller.line, caller.file_path,
        ),
        LogFileFormatTemplate::Standard => format!(
            "[{}] {}: [{}]\n\t   Trace: [{}][{}][{}][{}]\n\t   File Path: [{}]\n",
            timestamp, verbosity, message, context, caller.file_name, caller.function, caller.line, caller.file_path,
        ),
        LogFileFormatTemplate::Custom(layout) => {
            let line = caller.line.to_string();
            render_named(layout, |name| match name {
                "timestamp" => Some(*timestamp),
                "verbosity" => Some(verbosity.as_str()),
                "message" => Some(*message),
                "context" => Some(*context),
                "file" => Some(caller.file_name.as_str()),
                "function" => Some(caller.function.as_str()),
                "line" => Some(line.as_str()),
                "path" => Some(caller.file_path.as_str()),
                _ => None,
            })
        }
    };
    if !entry.ends_with('\n') {
        entry.push('\n');
    }
    entry
}
