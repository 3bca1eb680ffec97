//! Colours and rich-text helpers
//!
//! Rich text here is the `<b>`/`<color=...>` markup understood by engine
//! consoles. File output strips it again with [`strip_markup`](crate::format::strip_markup).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::verbosity::LogVerbosity;

/// Named colours usable in rich-text markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRef {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Gray,
    Grey,
    White,
    Black,
    Clear,
}

impl ColorRef {
    /// Markup name of the colour
    pub fn name(&self) -> &'static str {
        match self {
            ColorRef::Red => "red",
            ColorRef::Green => "green",
            ColorRef::Blue => "blue",
            ColorRef::Yellow => "yellow",
            ColorRef::Cyan => "cyan",
            ColorRef::Magenta => "magenta",
            ColorRef::Gray => "gray",
            ColorRef::Grey => "grey",
            ColorRef::White => "white",
            ColorRef::Black => "black",
            ColorRef::Clear => "clear",
        }
    }

    /// RGBA value of the colour
    pub fn rgba(&self) -> Color32 {
        match self {
            ColorRef::Red => Color32::RED,
            ColorRef::Green => Color32::GREEN,
            ColorRef::Blue => Color32::BLUE,
            ColorRef::Yellow => Color32::YELLOW,
            ColorRef::Cyan => Color32::CYAN,
            ColorRef::Magenta => Color32::MAGENTA,
            ColorRef::Gray | ColorRef::Grey => Color32::GRAY,
            ColorRef::White => Color32::WHITE,
            ColorRef::Black => Color32::BLACK,
            ColorRef::Clear => Color32::CLEAR,
        }
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const RED: Color32 = Color32::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color32 = Color32::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Color32 = Color32::rgb(0x00, 0x00, 0xFF);
    pub const WHITE: Color32 = Color32::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color32 = Color32::rgb(0x00, 0x00, 0x00);
    pub const YELLOW: Color32 = Color32::rgb(0xFF, 0xFF, 0x00);
    pub const CYAN: Color32 = Color32::rgb(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Color32 = Color32::rgb(0xFF, 0x00, 0xFF);
    pub const GRAY: Color32 = Color32::rgb(0x80, 0x80, 0x80);
    pub const LIGHT_GRAY: Color32 = Color32::rgb(0xD3, 0xD3, 0xD3);
    pub const DARK_GRAY: Color32 = Color32::rgb(0xA9, 0xA9, 0xA9);
    pub const ORANGE: Color32 = Color32::rgb(0xFF, 0xA5, 0x00);
    pub const PURPLE: Color32 = Color32::rgb(0x80, 0x00, 0x80);
    pub const PINK: Color32 = Color32::rgb(0xFF, 0xC0, 0xCB);
    pub const BROWN: Color32 = Color32::rgb(0xA5, 0x2A, 0x2A);
    pub const CLEAR: Color32 = Color32::new(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// `#RRGGBBAA` form used in markup
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Colour a verbosity is highlighted with
pub fn verbosity_color(verbosity: LogVerbosity) -> ColorRef {
    match verbosity {
        LogVerbosity::Info => ColorRef::Cyan,
        LogVerbosity::Warning => ColorRef::Yellow,
        LogVerbosity::Error => ColorRef::Red,
        LogVerbosity::Assertion => ColorRef::White,
    }
}

/// Anything that can stand in a `<color=...>` tag
pub trait MarkupColor {
    fn markup_value(&self) -> String;
}

impl MarkupColor for ColorRef {
    fn markup_value(&self) -> String {
        self.name().to_string()
    }
}

impl MarkupColor for Color32 {
    fn markup_value(&self) -> String {
        self.to_hex()
    }
}

/// Rich-text formatting for strings
pub trait RichText {
    /// Wrap in a colour tag, optionally bold
    fn rich<C: MarkupColor>(&self, color: C, bold: bool) -> String;
}

impl RichText for str {
    fn rich<C: MarkupColor>(&self, color: C, bold: bool) -> String {
        if bold {
            format!("<color={}><b>{}</b></color>", color.markup_value(), self)
        } else {
            format!("<color={}>{}</color>", color.markup_value(), self)
        }
    }
}
