//! Core types shared by writers, formatting and the logger facade

pub mod context;
mod color;
mod product;
mod verbosity;

pub use color::{verbosity_color, Color32, ColorRef, MarkupColor, RichText};
pub use context::{CallerLocation, LogObjectContext};
pub use product::ProductInfo;
pub use verbosity::{LogFileFormatTemplate, LogVerbosity, LogWriterType};
