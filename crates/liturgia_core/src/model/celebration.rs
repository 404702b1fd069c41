//! Celebration domain model.
//!
//! # Responsibility
//! - Define the liturgical event attached to a Mass or a daily liturgy.
//! - Own date parsing/formatting shared by every liturgical text.
//!
//! # Invariants
//! - Dates are calendar dates (`YYYY-MM-DD` on input, `dd/mm/yyyy` on output).
//! - A celebration is replaced as a whole, never partially mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Date string that could not be parsed as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateFormat {
    pub input: String,
}

impl Display for InvalidDateFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date `{}`; expected format YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for InvalidDateFormat {}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
/// - Returns [`InvalidDateFormat`] when the input is not a valid calendar date.
pub fn parse_liturgical_date(value: &str) -> Result<NaiveDate, InvalidDateFormat> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).map_err(|_| InvalidDateFormat {
        input: value.to_string(),
    })
}

/// Formats a date the way every printed liturgical text shows it.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Symbolic color of a celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiturgicalColor {
    Green,
    White,
    Red,
    Purple,
    Rose,
}

impl LiturgicalColor {
    pub const ALL: [LiturgicalColor; 5] = [
        Self::Green,
        Self::White,
        Self::Red,
        Self::Purple,
        Self::Rose,
    ];

    /// Liturgical (Portuguese) name used in every rendered text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "verde",
            Self::White => "branco",
            Self::Red => "vermelho",
            Self::Purple => "roxo",
            Self::Rose => "rosa",
        }
    }

    /// Short description of what the color expresses.
    pub fn meaning(self) -> &'static str {
        match self {
            Self::Green => "Tempo Comum - Esperança e crescimento",
            Self::White => "Natal e Páscoa - Pureza e alegria",
            Self::Red => "Pentecostes e mártires - Fogo do Espírito Santo",
            Self::Purple => "Advento e Quaresma - Penitência e preparação",
            Self::Rose => "Gaudete e Laetare - Alegria na preparação",
        }
    }

    /// Parses a Portuguese or English color name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "verde" | "green" => Some(Self::Green),
            "branco" | "white" => Some(Self::White),
            "vermelho" | "red" => Some(Self::Red),
            "roxo" | "purple" | "violet" => Some(Self::Purple),
            "rosa" | "rose" | "pink" => Some(Self::Rose),
            _ => None,
        }
    }

    /// Accent color as RGB components in `0.0..=1.0`.
    ///
    /// White vestments print as gold; pure white is invisible on paper.
    pub fn accent_rgb(self) -> (f32, f32, f32) {
        match self {
            Self::Green => (0.180, 0.490, 0.196),
            Self::White => (0.722, 0.525, 0.043),
            Self::Red => (0.776, 0.157, 0.157),
            Self::Purple => (0.416, 0.106, 0.604),
            Self::Rose => (0.847, 0.106, 0.376),
        }
    }
}

impl Display for LiturgicalColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rank of a celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    Solemnity,
    Feast,
    Memorial,
    /// Ordinary weekday or Sunday.
    Ordinary,
}

impl CelebrationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Solemnity => "solenidade",
            Self::Feast => "festa",
            Self::Memorial => "memória",
            Self::Ordinary => "feria",
        }
    }

    /// Parses a Portuguese or English rank name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "solenidade" | "solemnity" => Some(Self::Solemnity),
            "festa" | "feast" => Some(Self::Feast),
            "memória" | "memoria" | "memorial" => Some(Self::Memorial),
            "feria" | "férias" | "domingo" | "ordinary" | "weekday" | "sunday" => {
                Some(Self::Ordinary)
            }
            _ => None,
        }
    }
}

impl Display for CelebrationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Named liturgical event assigned to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub name: String,
    pub date: NaiveDate,
    pub kind: CelebrationKind,
    pub color: LiturgicalColor,
    /// Free-form season label, e.g. `Tempo do Natal`.
    pub season: String,
}

impl Celebration {
    /// Builds a celebration from a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    /// - Returns [`InvalidDateFormat`] when `date` cannot be parsed.
    pub fn from_date_str(
        name: impl Into<String>,
        date: &str,
        kind: CelebrationKind,
        color: LiturgicalColor,
        season: impl Into<String>,
    ) -> Result<Self, InvalidDateFormat> {
        Ok(Self {
            name: name.into(),
            date: parse_liturgical_date(date)?,
            kind,
            color,
            season: season.into(),
        })
    }

    /// Date in `dd/mm/yyyy` form.
    pub fn display_date(&self) -> String {
        format_display_date(self.date)
    }
}

impl Display for Celebration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
