//! Liturgy of the Hours formatter.
//!
//! # Responsibility
//! - Name the seven canonical hours and their stable keys.
//! - Render one hour, or all of them for a date, as plain text.
//!
//! # Invariants
//! - Hour templates are fixed and read-only; the date is validated but does
//!   not change the content.
//! - Sections without content are omitted, never emitted as empty headers.
//! - `format_all` keeps the liturgical order of `HourKind::ALL`.

use crate::model::celebration::{format_display_date, parse_liturgical_date, InvalidDateFormat};
use crate::model::texts::{Prayer, Psalm};
use std::fmt::{Display, Formatter};

mod templates;

const HEADER_RULE_WIDTH: usize = 80;
const SEPARATOR_WIDTH: usize = 80;

/// Canonical hour, in liturgical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourKind {
    OfficeReadings,
    Laudes,
    Terca,
    Sexta,
    Nona,
    Vesperas,
    Completas,
}

impl HourKind {
    pub const ALL: [HourKind; 7] = [
        Self::OfficeReadings,
        Self::Laudes,
        Self::Terca,
        Self::Sexta,
        Self::Nona,
        Self::Vesperas,
        Self::Completas,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::OfficeReadings => "office_readings",
            Self::Laudes => "laudes",
            Self::Terca => "terca",
            Self::Sexta => "sexta",
            Self::Nona => "nona",
            Self::Vesperas => "vesperas",
            Self::Completas => "completas",
        }
    }

    /// Parses a stable key; accents and case are tolerated.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "office_readings" | "oficio" | "ofício" => Some(Self::OfficeReadings),
            "laudes" => Some(Self::Laudes),
            "terca" | "terça" => Some(Self::Terca),
            "sexta" => Some(Self::Sexta),
            "nona" => Some(Self::Nona),
            "vesperas" | "vésperas" => Some(Self::Vesperas),
            "completas" => Some(Self::Completas),
            _ => None,
        }
    }

    /// Shell lookup: unknown or missing keys select Laudes.
    pub fn parse_or_laudes(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or(Self::Laudes)
    }
}

impl Display for HourKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Antiphon paired with the psalm it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsalmodyEntry {
    /// Empty when the psalm is prayed without an antiphon.
    pub antiphon: String,
    pub psalm: Psalm,
}

impl PsalmodyEntry {
    pub fn new(antiphon: impl Into<String>, psalm: Psalm) -> Self {
        Self {
            antiphon: antiphon.into(),
            psalm,
        }
    }
}

/// Fixed text of one canonical hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hour {
    pub kind: HourKind,
    pub name: String,
    pub time: String,
    pub hymn: Option<String>,
    pub psalmody: Vec<PsalmodyEntry>,
    pub reading: Option<String>,
    pub canticle: Option<String>,
    pub prayers: Vec<Prayer>,
}

/// Returns the template of `kind` for a `YYYY-MM-DD` date.
///
/// # Errors
/// - Returns [`InvalidDateFormat`] when `date` cannot be parsed.
pub fn hour_for(kind: HourKind, date: &str) -> Result<Hour, InvalidDateFormat> {
    parse_liturgical_date(date)?;
    Ok(templates::template(kind))
}

/// Renders one hour as plain text.
pub fn format_hour(hour: &Hour) -> String {
    let rule = "=".repeat(HEADER_RULE_WIDTH);
    let mut lines = vec![
        format!("\n{rule}"),
        hour.name.to_uppercase(),
        format!("Hora: {}", hour.time),
        format!("{rule}\n"),
    ];

    if let Some(hymn) = non_empty(&hour.hymn) {
        lines.extend(["HINO".to_string(), hymn.to_string(), String::new()]);
    }

    if !hour.psalmody.is_empty() {
        lines.push("SALMODIA".to_string());
        for (index, entry) in hour.psalmody.iter().enumerate() {
            if !entry.antiphon.is_empty() {
                lines.push(format!("\nAnt. {}: {}", index + 1, entry.antiphon));
            }
            lines.push(entry.psalm.to_string());
        }
        lines.push(String::new());
    }

    if let Some(reading) = non_empty(&hour.reading) {
        lines.extend(["LEITURA BREVE".to_string(), reading.to_string(), String::new()]);
    }

    if let Some(canticle) = non_empty(&hour.canticle) {
        lines.extend(["CÂNTICO".to_string(), canticle.to_string(), String::new()]);
    }

    for prayer in &hour.prayers {
        lines.push(prayer.to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Renders all seven hours for a `YYYY-MM-DD` date.
///
/// # Errors
/// - Returns [`InvalidDateFormat`] when `date` cannot be parsed.
pub fn format_all(date: &str) -> Result<String, InvalidDateFormat> {
    let parsed = parse_liturgical_date(date)?;
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut blocks = vec![format!("LITURGIA DAS HORAS - {}", format_display_date(parsed))];
    for kind in HourKind::ALL {
        blocks.push(separator.clone());
        blocks.push(format_hour(&templates::template(kind)));
    }
    Ok(blocks.join("\n"))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{format_all, format_hour, hour_for, Hour, HourKind, PsalmodyEntry};
    use crate::model::texts::{Prayer, Psalm};

    fn bare_hour() -> Hour {
        Hour {
            kind: HourKind::Sexta,
            name: "Sexta".to_string(),
            time: "Por volta das 12h".to_string(),
            hymn: None,
            psalmody: Vec::new(),
            reading: None,
            canticle: None,
            prayers: Vec::new(),
        }
    }

    #[test]
    fn empty_sections_are_omitted() {
        let text = format_hour(&bare_hour());
        let rule = "=".repeat(80);
        assert_eq!(text, format!("\n{rule}\nSEXTA\nHora: Por volta das 12h\n{rule}\n"));
    }

    #[test]
    fn antiphon_labels_keep_position_and_skip_empty_antiphons() {
        let mut hour = bare_hour();
        hour.psalmody = vec![
            PsalmodyEntry::new("", Psalm::new(119, "Sl 118(119)")),
            PsalmodyEntry::new("Guardai-me, Senhor", Psalm::new(120, "Sl 119(120)")),
        ];
        hour.prayers = vec![Prayer::new("Oração Final", "Deus eterno...")];

        let text = format_hour(&hour);
        assert!(!text.contains("Ant. 1:"));
        assert!(text.contains("SALMODIA\nSalmo 119 (Sl 118(119))\n\nAnt. 2: Guardai-me, Senhor\nSalmo 120"));
        assert!(text.ends_with("Oração Final\n\nDeus eterno...\n"));
    }

    #[test]
    fn laudes_template_renders_every_section_in_order() {
        let text = format_hour(&hour_for(HourKind::Laudes, "2026-01-06").expect("valid date"));
        let positions = ["HINO", "SALMODIA", "Ant. 1:", "LEITURA BREVE", "CÂNTICO", "Preces"]
            .map(|needle| text.find(needle).expect(needle));
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.contains("LAUDES (ORAÇÃO DA MANHÃ)"));
    }

    #[test]
    fn hour_for_rejects_bad_dates() {
        assert!(hour_for(HourKind::Nona, "06/01/2026").is_err());
    }

    #[test]
    fn format_all_has_seven_separated_hours_in_liturgical_order() {
        let text = format_all("2026-01-06").expect("valid date");
        let separator = "-".repeat(80);
        assert!(text.starts_with("LITURGIA DAS HORAS - 06/01/2026\n"));
        assert_eq!(text.matches(&separator).count(), 7);
        assert_eq!(text.matches("Hora: ").count(), 7);

        let names = ["OFÍCIO DAS LEITURAS", "LAUDES", "TERÇA", "SEXTA", "NONA", "VÉSPERAS", "COMPLETAS"];
        let positions = names.map(|name| text.find(name).expect(name));
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn parse_or_laudes_falls_back() {
        assert_eq!(HourKind::parse_or_laudes(Some("vésperas")), HourKind::Vesperas);
        assert_eq!(HourKind::parse_or_laudes(Some("matinas")), HourKind::Laudes);
        assert_eq!(HourKind::parse_or_laudes(None), HourKind::Laudes);
        assert!(HourKind::ALL.iter().all(|kind| HourKind::parse(kind.key()) == Some(*kind)));
    }
}
