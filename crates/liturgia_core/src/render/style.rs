//! Render style for the paginated formats and its flat option form.
//!
//! # Responsibility
//! - Map the flat option keys accepted from the shell (`font_family`,
//!   `font_size`, `page_size`, `margins`, `title_size`, `include_header`,
//!   `include_footer`, `liturgical_color`) onto a validated `RenderStyle`.
//!
//! # Invariants
//! - Defaults: Times-Roman, 12pt, A4, 72pt margins, 18pt title, header and
//!   footer on, green accent.
//! - Unknown page sizes fall back to A4; every other unparseable value is an
//!   `OptionError`.

use crate::model::celebration::LiturgicalColor;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_FONT_SIZE: u32 = 12;
pub const DEFAULT_MARGINS: u32 = 72;
pub const DEFAULT_TITLE_SIZE: u32 = 18;

const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 6..=48;
const TITLE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=72;
const MARGIN_RANGE: std::ops::RangeInclusive<u32> = 0..=144;

/// Invalid value for a recognized render option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    InvalidOption { key: String, value: String },
}

impl Display for OptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOption { key, value } => {
                write!(f, "invalid value `{value}` for option `{key}`")
            }
        }
    }
}

impl Error for OptionError {}

fn invalid(key: &str, value: impl Into<String>) -> OptionError {
    OptionError::InvalidOption {
        key: key.to_string(),
        value: value.into(),
    }
}

/// Standard PDF font families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFamily {
    #[default]
    TimesRoman,
    Helvetica,
    Courier,
}

impl FontFamily {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "times-roman" | "times" | "times new roman" => Some(Self::TimesRoman),
            "helvetica" | "arial" | "sans-serif" => Some(Self::Helvetica),
            "courier" | "monospace" => Some(Self::Courier),
            _ => None,
        }
    }

    pub fn regular_face(self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Roman",
            Self::Helvetica => "Helvetica",
            Self::Courier => "Courier",
        }
    }

    pub fn bold_face(self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Bold",
            Self::Helvetica => "Helvetica-Bold",
            Self::Courier => "Courier-Bold",
        }
    }

    /// Average glyph advance as a fraction of the font size.
    ///
    /// Approximate for the proportional faces; exact for Courier.
    pub fn average_advance(self, bold: bool) -> f32 {
        let regular = match self {
            Self::TimesRoman => 0.47,
            Self::Helvetica => 0.53,
            Self::Courier => 0.60,
        };
        if bold && self != Self::Courier {
            regular * 1.06
        } else {
            regular
        }
    }
}

/// Named page presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    A5,
}

impl PageSize {
    /// Lenient lookup; unknown names fall back to A4.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "letter" => Self::Letter,
            "a5" => Self::A5,
            _ => Self::A4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "Letter",
            Self::A5 => "A5",
        }
    }

    /// `(width, height)` in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A4 => (595.28, 841.89),
            Self::Letter => (612.0, 792.0),
            Self::A5 => (419.53, 595.28),
        }
    }
}

/// Validated style for PDF output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub font_family: FontFamily,
    pub base_font_size: f32,
    pub page_size: PageSize,
    pub margin_points: f32,
    pub title_font_size: f32,
    pub include_header: bool,
    pub include_footer: bool,
    pub liturgical_color: LiturgicalColor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            base_font_size: DEFAULT_FONT_SIZE as f32,
            page_size: PageSize::default(),
            margin_points: DEFAULT_MARGINS as f32,
            title_font_size: DEFAULT_TITLE_SIZE as f32,
            include_header: true,
            include_footer: true,
            liturgical_color: LiturgicalColor::Green,
        }
    }
}

impl RenderStyle {
    /// Heading color derived from the liturgical color.
    pub fn accent_color(&self) -> (f32, f32, f32) {
        self.liturgical_color.accent_rgb()
    }

    pub fn heading_font_size(&self) -> f32 {
        self.base_font_size + 2.0
    }

    pub fn footer_font_size(&self) -> f32 {
        self.base_font_size - 2.0
    }
}

/// Flat option set as submitted by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub font_family: String,
    pub font_size: u32,
    pub page_size: String,
    pub margins: u32,
    pub title_size: u32,
    pub include_header: bool,
    pub include_footer: bool,
    pub liturgical_color: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default().regular_face().to_string(),
            font_size: DEFAULT_FONT_SIZE,
            page_size: PageSize::default().name().to_string(),
            margins: DEFAULT_MARGINS,
            title_size: DEFAULT_TITLE_SIZE,
            include_header: true,
            include_footer: true,
            liturgical_color: LiturgicalColor::Green.name().to_string(),
        }
    }
}

impl PdfOptions {
    /// Reads recognized keys from form pairs; other keys are ignored.
    ///
    /// Missing keys keep their defaults. Checkbox-style booleans accept
    /// `on|true|1|yes` and `off|false|0|no`.
    ///
    /// # Errors
    /// - Returns [`OptionError`] for numbers or booleans that do not parse.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, OptionError> {
        let mut options = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            match key {
                "font_family" => options.font_family = value.to_string(),
                "font_size" => options.font_size = parse_number(key, value)?,
                "page_size" => options.page_size = value.to_string(),
                "margins" => options.margins = parse_number(key, value)?,
                "title_size" => options.title_size = parse_number(key, value)?,
                "include_header" => options.include_header = parse_flag(key, value)?,
                "include_footer" => options.include_footer = parse_flag(key, value)?,
                "liturgical_color" => options.liturgical_color = value.to_string(),
                _ => {}
            }
        }
        Ok(options)
    }

    /// Validates the options into a `RenderStyle`.
    ///
    /// # Errors
    /// - Returns [`OptionError`] for unknown fonts or colors and for sizes
    ///   outside their supported range.
    pub fn to_style(&self) -> Result<RenderStyle, OptionError> {
        let font_family = FontFamily::parse(&self.font_family)
            .ok_or_else(|| invalid("font_family", self.font_family.as_str()))?;
        let liturgical_color = LiturgicalColor::parse(&self.liturgical_color)
            .ok_or_else(|| invalid("liturgical_color", self.liturgical_color.as_str()))?;
        check_range("font_size", self.font_size, FONT_SIZE_RANGE)?;
        check_range("title_size", self.title_size, TITLE_SIZE_RANGE)?;
        check_range("margins", self.margins, MARGIN_RANGE)?;

        Ok(RenderStyle {
            font_family,
            base_font_size: self.font_size as f32,
            page_size: PageSize::parse_or_default(&self.page_size),
            margin_points: self.margins as f32,
            title_font_size: self.title_size as f32,
            include_header: self.include_header,
            include_footer: self.include_footer,
            liturgical_color,
        })
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, OptionError> {
    value.parse::<u32>().map_err(|_| invalid(key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, OptionError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn check_range(
    key: &str,
    value: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<(), OptionError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{FontFamily, OptionError, PageSize, PdfOptions, RenderStyle};
    use crate::model::celebration::LiturgicalColor;

    #[test]
    fn default_options_produce_default_style() {
        let style = PdfOptions::default().to_style().expect("defaults are valid");
        assert_eq!(style, RenderStyle::default());
        assert_eq!(style.page_size.dimensions(), (595.28, 841.89));
    }

    #[test]
    fn from_pairs_reads_recognized_keys() {
        let options = PdfOptions::from_pairs([
            ("font_family", "Helvetica"),
            ("font_size", "11"),
            ("page_size", "A5"),
            ("margins", "36"),
            ("include_footer", "off"),
            ("liturgical_color", "roxo"),
            ("celebration_name", "ignored"),
        ])
        .expect("valid options");
        let style = options.to_style().expect("valid style");

        assert_eq!(style.font_family, FontFamily::Helvetica);
        assert_eq!(style.base_font_size, 11.0);
        assert_eq!(style.page_size, PageSize::A5);
        assert_eq!(style.margin_points, 36.0);
        assert!(style.include_header);
        assert!(!style.include_footer);
        assert_eq!(style.liturgical_color, LiturgicalColor::Purple);
    }

    #[test]
    fn unparseable_number_is_reported_with_key() {
        let err = PdfOptions::from_pairs([("font_size", "doze")]).expect_err("must fail");
        assert_eq!(
            err,
            OptionError::InvalidOption {
                key: "font_size".to_string(),
                value: "doze".to_string()
            }
        );
    }

    #[test]
    fn unknown_page_size_falls_back_to_a4() {
        let options = PdfOptions {
            page_size: "Tabloid".to_string(),
            ..PdfOptions::default()
        };
        assert_eq!(options.to_style().expect("valid").page_size, PageSize::A4);
    }

    #[test]
    fn unknown_font_and_out_of_range_sizes_are_rejected() {
        let bad_font = PdfOptions {
            font_family: "Comic Sans".to_string(),
            ..PdfOptions::default()
        };
        assert!(bad_font.to_style().is_err());

        let tiny = PdfOptions {
            font_size: 2,
            ..PdfOptions::default()
        };
        assert!(tiny.to_style().is_err());
    }

    #[test]
    fn json_options_fill_missing_keys_with_defaults() {
        let options: PdfOptions =
            serde_json::from_str(r#"{"font_size": 14, "include_header": false}"#)
                .expect("valid json");
        assert_eq!(options.font_size, 14);
        assert!(!options.include_header);
        assert_eq!(options.margins, 72);
        assert_eq!(options.font_family, "Times-Roman");
    }
}
