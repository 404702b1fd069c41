//! In-process calendar store.

use super::{sample_entries, CalendarEntry, CalendarResult, CalendarStore};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Calendar held in a date-ordered map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarStore {
    entries: BTreeMap<NaiveDate, CalendarEntry>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `sample_entries()`.
    pub fn with_sample_data() -> Self {
        Self {
            entries: sample_entries().into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CalendarStore for InMemoryCalendarStore {
    fn get(&self, date: NaiveDate) -> CalendarResult<Option<CalendarEntry>> {
        Ok(self.entries.get(&date).cloned())
    }

    fn put(&mut self, date: NaiveDate, entry: CalendarEntry) -> CalendarResult<()> {
        self.entries.insert(date, entry);
        Ok(())
    }

    fn dates(&self) -> CalendarResult<Vec<NaiveDate>> {
        Ok(self.entries.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryCalendarStore;
    use crate::calendar::{CalendarEntry, CalendarStore};
    use crate::model::celebration::{CelebrationKind, LiturgicalColor};
    use chrono::NaiveDate;

    #[test]
    fn put_replaces_existing_entry() {
        let mut store = InMemoryCalendarStore::with_sample_data();
        let epiphany = NaiveDate::from_ymd_opt(2026, 1, 6).expect("valid date");
        let before = store.len();

        store
            .put(
                epiphany,
                CalendarEntry::new(
                    "Epifania do Senhor",
                    CelebrationKind::Solemnity,
                    LiturgicalColor::White,
                    "Natal",
                ),
            )
            .expect("put");

        assert_eq!(store.len(), before);
        let entry = store.get(epiphany).expect("get").expect("entry present");
        assert_eq!(entry.name, "Epifania do Senhor");
        assert_eq!(entry.gospel, None);
    }

    #[test]
    fn dates_are_ascending() {
        let store = InMemoryCalendarStore::with_sample_data();
        let dates = store.dates().expect("dates");
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(InMemoryCalendarStore::new().get(dates[0]).expect("get").is_none());
    }
}
