//! Table styling
//!
//! A `TableStyle` is the flat option set a host hands to a table: colors as
//! names, hex strings or channel tuples, plus fonts and metrics. It is
//! resolved once, at table construction, into a `ResolvedStyle` holding
//! concrete colors.

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, StyleError> {
        let digits = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| StyleError::InvalidColor(s.to_string()))
        };
        match digits.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(StyleError::InvalidColor(s.to_string())),
        }
    }

    /// Look up a named color.
    ///
    /// Names are case-insensitive and ignore spaces, so `"Gray 80"` and
    /// `"gray80"` are the same color. `grayN`/`greyN` for N in 0..=100 map
    /// linearly onto 0..=255.
    pub fn from_name(name: &str) -> Result<Self, StyleError> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if let Some(level) = key
            .strip_prefix("gray")
            .or_else(|| key.strip_prefix("grey"))
            .filter(|rest| !rest.is_empty())
        {
            return match level.parse::<u32>() {
                Ok(n) if n <= 100 => {
                    let v = ((n * 255 + 49) / 100) as u8;
                    Ok(Color::rgb(v, v, v))
                }
                _ => Err(StyleError::UnknownColor(name.to_string())),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| StyleError::UnknownColor(name.to_string()))
    }

    /// Parse a color string: hex if it starts with `#`, a name otherwise
    pub fn parse(s: &str) -> Result<Self, StyleError> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            Color::from_hex(trimmed)
        } else {
            Color::from_name(trimmed)
        }
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("white", Color::rgb(255, 255, 255)),
    ("black", Color::rgb(0, 0, 0)),
    ("gray", Color::rgb(190, 190, 190)),
    ("grey", Color::rgb(190, 190, 190)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("red", Color::rgb(255, 0, 0)),
    ("darkred", Color::rgb(139, 0, 0)),
    ("green", Color::rgb(0, 255, 0)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("navy", Color::rgb(0, 0, 128)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(160, 32, 240)),
    ("brown", Color::rgb(165, 42, 42)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gold", Color::rgb(255, 215, 0)),
    ("steelblue", Color::rgb(70, 130, 180)),
    ("dodgerblue", Color::rgb(30, 144, 255)),
    ("transparent", Color::rgba(0, 0, 0, 0)),
];

/// A color as written in configuration: a name or hex string, or an
/// explicit `[r, g, b]` / `[r, g, b, a]` tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Name(String),
    Channels(Vec<u8>),
}

impl ColorSpec {
    pub fn resolve(&self) -> Result<Color, StyleError> {
        match self {
            ColorSpec::Name(name) => Color::parse(name),
            ColorSpec::Channels(channels) => match channels.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                _ => Err(StyleError::InvalidColor(format!("{:?}", channels))),
            },
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Channels(vec![color.r, color.g, color.b, color.a])
    }
}

/// Style options for a sortable table.
///
/// Every option has a default, so a config file only needs to list what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub bg_color: ColorSpec,
    pub line_color: ColorSpec,
    pub line_weight: i32,
    pub light_field_bg: ColorSpec,
    pub dark_field_bg: ColorSpec,
    /// Font name for cell values (`None` = the typesetter's default font)
    pub field_text_font: Option<String>,
    pub field_text_size: u32,
    pub field_text_color: ColorSpec,
    /// Font name for header labels (`None` = the typesetter's default font)
    pub header_text_font: Option<String>,
    pub header_text_size: u32,
    pub header_text_color: ColorSpec,
    pub field_height: i32,
    pub header_height: i32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            bg_color: "gray90".into(),
            line_color: "gray40".into(),
            line_weight: 1,
            light_field_bg: "gray90".into(),
            dark_field_bg: "gray 80".into(),
            field_text_font: None,
            field_text_size: 16,
            field_text_color: "gray5".into(),
            header_text_font: None,
            header_text_size: 24,
            header_text_color: "gray5".into(),
            field_height: 30,
            header_height: 48,
        }
    }
}

/// Font, size and color for one kind of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Option<String>,
    pub size: u32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Option<String>, size: u32, color: Color) -> Self {
        Self { font, size, color }
    }
}

/// Table style with every color resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub bg_color: Color,
    pub line_color: Color,
    pub line_weight: i32,
    pub light_field_bg: Color,
    pub dark_field_bg: Color,
    pub field_text: TextStyle,
    pub header_text: TextStyle,
    pub field_height: i32,
    pub header_height: i32,
}

impl TableStyle {
    /// Resolve colors and validate metrics
    pub fn resolve(&self) -> Result<ResolvedStyle, StyleError> {
        if self.line_weight < 0 {
            return Err(StyleError::InvalidMetric {
                option: "line_weight",
                expected: "zero or positive",
                value: self.line_weight as i64,
            });
        }
        if self.field_height <= 0 {
            return Err(StyleError::InvalidMetric {
                option: "field_height",
                expected: "positive",
                value: self.field_height as i64,
            });
        }
        if self.header_height <= 0 {
            return Err(StyleError::InvalidMetric {
                option: "header_height",
                expected: "positive",
                value: self.header_height as i64,
            });
        }

        Ok(ResolvedStyle {
            bg_color: self.bg_color.resolve()?,
            line_color: self.line_color.resolve()?,
            line_weight: self.line_weight,
            light_field_bg: self.light_field_bg.resolve()?,
            dark_field_bg: self.dark_field_bg.resolve()?,
            field_text: TextStyle::new(
                self.field_text_font.clone(),
                self.field_text_size,
                self.field_text_color.resolve()?,
            ),
            header_text: TextStyle::new(
                self.header_text_font.clone(),
                self.header_text_size,
                self.header_text_color.resolve()?,
            ),
            field_height: self.field_height,
            header_height: self.header_height,
        })
    }
}
