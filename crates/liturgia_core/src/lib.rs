//! Core domain logic for Liturgia: custom Mass builder, Liturgy of the Hours
//! and daily liturgy lookup.
//! This crate is the single source of truth for liturgical text invariants.

pub mod calendar;
pub mod db;
pub mod hours;
pub mod logging;
pub mod mass;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use calendar::{
    daily_liturgy, CalendarEntry, CalendarError, CalendarStore, DailyLiturgy,
    InMemoryCalendarStore, SqliteCalendarStore,
};
pub use hours::{format_all, format_hour, hour_for, Hour, HourKind};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use mass::document::{MassDocument, MassSnapshot, DEFAULT_CUSTOM_POSITION};
pub use mass::registry::{canonical_parts, PartCatalog, Section};
pub use model::celebration::{Celebration, CelebrationKind, InvalidDateFormat, LiturgicalColor};
pub use model::part::Part;
pub use render::style::{OptionError, PdfOptions, RenderStyle};
pub use render::RenderError;
pub use repo::mass_repo::{MassId, MassRepository, RepoError, SqliteMassRepository};
pub use service::mass_service::{ExportTargets, MassForm, MassService, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Output formats compiled into this build.
pub fn available_formats() -> Vec<&'static str> {
    let mut formats = vec!["text"];
    if cfg!(feature = "pdf") {
        formats.push("pdf");
    }
    if cfg!(feature = "docx") {
        formats.push("docx");
    }
    formats
}

#[cfg(test)]
mod tests {
    use super::{available_formats, core_version};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn text_export_is_always_available() {
        assert_eq!(available_formats().first(), Some(&"text"));
    }
}
