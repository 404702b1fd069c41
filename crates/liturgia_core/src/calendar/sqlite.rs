//! SQLite-backed calendar store over `calendar_entries`.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD` text and form the primary key.
//! - Colors reference `liturgical_colors(name)`.
//! - Rows that no longer parse are reported as `InvalidData`, never skipped.

use super::{sample_entries, CalendarEntry, CalendarError, CalendarResult, CalendarStore};
use crate::model::celebration::{parse_liturgical_date, CelebrationKind, LiturgicalColor};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    name,
    kind,
    color,
    season,
    first_reading,
    psalm,
    second_reading,
    gospel
FROM calendar_entries";

/// Calendar store reading and writing a migrated connection.
pub struct SqliteCalendarStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCalendarStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads `sample_entries()` when the table is empty.
    ///
    /// Returns the number of inserted entries.
    pub fn seed_sample_data_if_empty(&mut self) -> CalendarResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM calendar_entries;", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let samples = sample_entries();
        let inserted = samples.len();
        for (date, entry) in samples {
            self.put(date, entry)?;
        }
        info!("event=calendar_seed module=calendar status=ok entries={inserted}");
        Ok(inserted)
    }
}

impl CalendarStore for SqliteCalendarStore<'_> {
    fn get(&self, date: NaiveDate) -> CalendarResult<Option<CalendarEntry>> {
        let sql = format!("{ENTRY_SELECT_SQL} WHERE date = ?1;");
        let row = self
            .conn
            .query_row(&sql, [date_to_db(date)], parse_entry_row)
            .optional()?;
        row.transpose()
    }

    fn put(&mut self, date: NaiveDate, entry: CalendarEntry) -> CalendarResult<()> {
        self.conn.execute(
            "INSERT INTO calendar_entries (
                date,
                name,
                kind,
                color,
                season,
                first_reading,
                psalm,
                second_reading,
                gospel
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(date) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                color = excluded.color,
                season = excluded.season,
                first_reading = excluded.first_reading,
                psalm = excluded.psalm,
                second_reading = excluded.second_reading,
                gospel = excluded.gospel;",
            params![
                date_to_db(date),
                entry.name.as_str(),
                entry.kind.name(),
                entry.color.name(),
                entry.season.as_str(),
                entry.first_reading.as_deref(),
                entry.psalm.as_deref(),
                entry.second_reading.as_deref(),
                entry.gospel.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn dates(&self) -> CalendarResult<Vec<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date FROM calendar_entries ORDER BY date ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for row in rows {
            let raw = row?;
            let date = parse_liturgical_date(&raw)
                .map_err(|_| CalendarError::InvalidData(format!("invalid date `{raw}`")))?;
            dates.push(date);
        }
        Ok(dates)
    }
}

fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<CalendarResult<CalendarEntry>> {
    let kind_raw: String = row.get(1)?;
    let color_raw: String = row.get(2)?;

    let Some(kind) = CelebrationKind::parse(&kind_raw) else {
        return Ok(Err(CalendarError::InvalidData(format!(
            "unknown celebration kind `{kind_raw}`"
        ))));
    };
    let Some(color) = LiturgicalColor::parse(&color_raw) else {
        return Ok(Err(CalendarError::InvalidData(format!(
            "unknown liturgical color `{color_raw}`"
        ))));
    };

    Ok(Ok(CalendarEntry {
        name: row.get(0)?,
        kind,
        color,
        season: row.get(3)?,
        first_reading: row.get(4)?,
        psalm: row.get(5)?,
        second_reading: row.get(6)?,
        gospel: row.get(7)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::SqliteCalendarStore;
    use crate::calendar::{daily_liturgy, CalendarEntry, CalendarError, CalendarStore};
    use crate::db::open_db_in_memory;
    use crate::model::celebration::{CelebrationKind, LiturgicalColor};
    use chrono::NaiveDate;

    #[test]
    fn put_then_get_round_trips_entry() {
        let conn = open_db_in_memory().expect("open db");
        let mut store = SqliteCalendarStore::new(&conn);
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).expect("valid date");
        let entry = CalendarEntry::new(
            "Quarta-feira de Cinzas",
            CelebrationKind::Ordinary,
            LiturgicalColor::Purple,
            "Quaresma",
        )
        .with_readings(Some("Jl 2,12-18"), Some("Sl 50(51)"), Some("2Cor 5,20-6,2"), Some("Mt 6,1-6.16-18"));

        store.put(date, entry.clone()).expect("put");
        assert_eq!(store.get(date).expect("get"), Some(entry));
        assert_eq!(store.dates().expect("dates"), vec![date]);
    }

    #[test]
    fn seeding_only_happens_once() {
        let conn = open_db_in_memory().expect("open db");
        let mut store = SqliteCalendarStore::new(&conn);

        assert_eq!(store.seed_sample_data_if_empty().expect("seed"), 3);
        assert_eq!(store.seed_sample_data_if_empty().expect("seed again"), 0);

        let liturgy = daily_liturgy(&store, "2026-05-24").expect("lookup");
        assert_eq!(liturgy.celebration.color, LiturgicalColor::Red);
    }

    #[test]
    fn corrupted_kind_is_reported() {
        let conn = open_db_in_memory().expect("open db");
        conn.execute(
            "INSERT INTO calendar_entries (date, name, kind, color, season)
             VALUES ('2026-08-15', 'Assunção', 'vigil', 'branco', 'Tempo Comum');",
            [],
        )
        .expect("raw insert");

        let store = SqliteCalendarStore::new(&conn);
        let date = NaiveDate::from_ymd_opt(2026, 8, 15).expect("valid date");
        let err = store.get(date).expect_err("invalid kind must fail");
        assert!(matches!(err, CalendarError::InvalidData(_)));
    }
}
