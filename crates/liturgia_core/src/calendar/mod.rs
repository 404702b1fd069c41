//! Daily liturgy lookup over an explicit calendar store.
//!
//! # Responsibility
//! - Define the calendar entry shape and the store contract.
//! - Resolve a date into a `DailyLiturgy`, falling back to a ferial day.
//!
//! # Invariants
//! - Stores are populated at startup and only read by lookups.
//! - A missing entry is not an error: the lookup yields a generic ferial day.
//! - Dates enter as `YYYY-MM-DD`; anything else is `CalendarError::InvalidDate`.

use crate::db::DbError;
use crate::model::celebration::{
    format_display_date, parse_liturgical_date, Celebration, CelebrationKind, InvalidDateFormat,
    LiturgicalColor,
};
use crate::model::texts::{Prayer, Psalm, Reading};
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::InMemoryCalendarStore;
pub use sqlite::SqliteCalendarStore;

const HEADER_RULE_WIDTH: usize = 80;
const FERIAL_SEASON: &str = "Tempo Comum";

static PSALM_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid psalm number regex"));

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Calendar lookup or persistence failure.
#[derive(Debug)]
pub enum CalendarError {
    InvalidDate(InvalidDateFormat),
    Db(DbError),
    InvalidData(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid calendar data: {message}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<InvalidDateFormat> for CalendarError {
    fn from(value: InvalidDateFormat) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<DbError> for CalendarError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CalendarError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Celebration and reading references recorded for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub name: String,
    pub kind: CelebrationKind,
    pub color: LiturgicalColor,
    pub season: String,
    #[serde(default)]
    pub first_reading: Option<String>,
    #[serde(default)]
    pub psalm: Option<String>,
    #[serde(default)]
    pub second_reading: Option<String>,
    #[serde(default)]
    pub gospel: Option<String>,
}

impl CalendarEntry {
    pub fn new(
        name: impl Into<String>,
        kind: CelebrationKind,
        color: LiturgicalColor,
        season: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
            season: season.into(),
            first_reading: None,
            psalm: None,
            second_reading: None,
            gospel: None,
        }
    }

    pub fn with_readings(
        mut self,
        first_reading: Option<&str>,
        psalm: Option<&str>,
        second_reading: Option<&str>,
        gospel: Option<&str>,
    ) -> Self {
        self.first_reading = first_reading.map(str::to_string);
        self.psalm = psalm.map(str::to_string);
        self.second_reading = second_reading.map(str::to_string);
        self.gospel = gospel.map(str::to_string);
        self
    }
}

/// Date-keyed source of calendar entries.
pub trait CalendarStore {
    fn get(&self, date: NaiveDate) -> CalendarResult<Option<CalendarEntry>>;
    /// Inserts or replaces the entry for `date`.
    fn put(&mut self, date: NaiveDate, entry: CalendarEntry) -> CalendarResult<()>;
    /// All dates with an entry, ascending.
    fn dates(&self) -> CalendarResult<Vec<NaiveDate>>;
}

/// Entries shipped with the binary for demos and tests.
pub fn sample_entries() -> Vec<(NaiveDate, CalendarEntry)> {
    let entries = [
        (
            (2026, 1, 6),
            CalendarEntry::new(
                "Solenidade da Epifania do Senhor",
                CelebrationKind::Solemnity,
                LiturgicalColor::White,
                "Tempo do Natal",
            )
            .with_readings(
                Some("Is 60,1-6"),
                Some("Sl 71(72)"),
                Some("Ef 3,2-3a.5-6"),
                Some("Mt 2,1-12"),
            ),
        ),
        (
            (2026, 1, 18),
            CalendarEntry::new(
                "Domingo Ordinário - 2ª Semana",
                CelebrationKind::Ordinary,
                LiturgicalColor::Green,
                FERIAL_SEASON,
            )
            .with_readings(
                Some("Is 49,3.5-6"),
                Some("Sl 39(40)"),
                Some("1Cor 1,1-3"),
                Some("Jo 1,29-34"),
            ),
        ),
        (
            (2026, 5, 24),
            CalendarEntry::new(
                "Pentecostes",
                CelebrationKind::Solemnity,
                LiturgicalColor::Red,
                "Páscoa",
            )
            .with_readings(
                Some("At 2,1-11"),
                Some("Sl 103(104)"),
                Some("1Cor 12,3b-7.12-13"),
                Some("Jo 20,19-23"),
            ),
        ),
    ];

    entries
        .into_iter()
        .filter_map(|((year, month, day), entry)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, entry))
        })
        .collect()
}

/// Liturgy of one day: celebration plus its texts.
///
/// Serializes to the JSON shape served for a date lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyLiturgy {
    pub celebration: Celebration,
    pub first_reading: Option<Reading>,
    pub psalm: Option<Psalm>,
    pub second_reading: Option<Reading>,
    pub gospel: Option<Reading>,
    pub collect_prayer: Option<Prayer>,
    pub offertory_prayer: Option<Prayer>,
    pub communion_prayer: Option<Prayer>,
}

impl DailyLiturgy {
    /// Day without proper texts: the generic ferial record.
    pub fn ferial(date: NaiveDate) -> Self {
        Self::bare(Celebration {
            name: format!("Feria - {}", format_display_date(date)),
            date,
            kind: CelebrationKind::Ordinary,
            color: LiturgicalColor::Green,
            season: FERIAL_SEASON.to_string(),
        })
    }

    pub fn from_entry(date: NaiveDate, entry: CalendarEntry) -> Self {
        let mut liturgy = Self::bare(Celebration {
            name: entry.name,
            date,
            kind: entry.kind,
            color: entry.color,
            season: entry.season,
        });
        liturgy.first_reading = non_blank(entry.first_reading).map(Reading::new);
        liturgy.psalm = non_blank(entry.psalm).map(|reference| {
            let number = psalm_number(&reference);
            Psalm::new(number, reference)
        });
        liturgy.second_reading = non_blank(entry.second_reading).map(Reading::new);
        liturgy.gospel = non_blank(entry.gospel).map(Reading::new);
        liturgy
    }

    fn bare(celebration: Celebration) -> Self {
        Self {
            celebration,
            first_reading: None,
            psalm: None,
            second_reading: None,
            gospel: None,
            collect_prayer: None,
            offertory_prayer: None,
            communion_prayer: None,
        }
    }

    /// Plain-text rendering: header, then each present section in order.
    pub fn full_text(&self) -> String {
        let rule = "=".repeat(HEADER_RULE_WIDTH);
        let mut lines = vec![
            format!("\n{rule}"),
            format!("LITURGIA DIÁRIA - {}", self.celebration.name.to_uppercase()),
            format!("Data: {}", self.celebration.display_date()),
            format!("Cor Litúrgica: {}", self.celebration.color),
            format!("Tempo: {}", self.celebration.season),
            format!("{rule}\n"),
        ];

        let sections: [(&str, Option<String>); 5] = [
            ("ORAÇÃO DO DIA", self.collect_prayer.as_ref().map(ToString::to_string)),
            ("PRIMEIRA LEITURA", self.first_reading.as_ref().map(ToString::to_string)),
            ("SALMO RESPONSORIAL", self.psalm.as_ref().map(ToString::to_string)),
            ("SEGUNDA LEITURA", self.second_reading.as_ref().map(ToString::to_string)),
            ("EVANGELHO", self.gospel.as_ref().map(ToString::to_string)),
        ];
        for (heading, body) in sections {
            if let Some(body) = body {
                lines.push(format!("\n{heading}"));
                lines.push(body);
            }
        }

        lines.join("\n")
    }
}

/// Resolves the liturgy of a `YYYY-MM-DD` date from `store`.
///
/// # Errors
/// - Returns [`CalendarError::InvalidDate`] for malformed dates.
/// - Propagates store failures.
pub fn daily_liturgy<S>(store: &S, date: &str) -> CalendarResult<DailyLiturgy>
where
    S: CalendarStore + ?Sized,
{
    let parsed = parse_liturgical_date(date)?;
    match store.get(parsed)? {
        Some(entry) => {
            debug!("event=daily_lookup module=calendar status=ok source=entry date={date}");
            Ok(DailyLiturgy::from_entry(parsed, entry))
        }
        None => {
            debug!("event=daily_lookup module=calendar status=ok source=ferial date={date}");
            Ok(DailyLiturgy::ferial(parsed))
        }
    }
}

/// First number in a psalm reference (`Sl 71(72)` is 71); 0 when absent.
fn psalm_number(reference: &str) -> u32 {
    PSALM_NUMBER_RE
        .find(reference)
        .and_then(|found| found.as_str().parse().ok())
        .unwrap_or(0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
