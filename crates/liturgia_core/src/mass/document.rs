//! Customizable Mass document.
//!
//! # Responsibility
//! - Hold the part mapping and the optional celebration of one Mass.
//! - Offer targeted edits (by key, antiphons, readings, custom parts).
//! - Expose the single ordered query every renderer consumes.
//!
//! # Invariants
//! - No two parts share a key; custom keys get a numeric suffix on collision.
//! - Canonical parts are never renumbered.
//! - Render order is `(order, sequence)` ascending; parts with empty content
//!   are skipped.
//! - Unknown keys passed to `set_part_content` leave the document unchanged.

use crate::mass::registry::{build_default_parts, PartCatalog};
use crate::model::celebration::{Celebration, CelebrationKind, InvalidDateFormat, LiturgicalColor};
use crate::model::part::Part;
use crate::model::texts::Antiphon;
use crate::render::style::RenderStyle;
use crate::render::{docx, pdf, text, RenderError};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

/// Order used by `add_custom_part` callers that do not pick a position.
pub const DEFAULT_CUSTOM_POSITION: u32 = 14;

const FALLBACK_CUSTOM_KEY: &str = "custom_part";

static NON_KEY_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid part key regex"));

/// Serializable copy of a document, used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassSnapshot {
    pub celebration: Option<Celebration>,
    /// Parts in render order.
    pub parts: Vec<Part>,
}

/// Snapshot that violates document invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    DuplicateKey(String),
    EmptyKey,
    /// A part carries the largest sequence value, leaving no room for more.
    SequenceOverflow(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "duplicate part key in snapshot: `{key}`"),
            Self::EmptyKey => write!(f, "snapshot contains a part with an empty key"),
            Self::SequenceOverflow(key) => {
                write!(f, "part `{key}` has an out-of-range insertion sequence")
            }
        }
    }
}

impl Error for SnapshotError {}

/// A Mass under construction: parts plus optional celebration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassDocument {
    celebration: Option<Celebration>,
    parts: BTreeMap<String, Part>,
    next_sequence: u32,
}

impl Default for MassDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MassDocument {
    /// Creates a document with the complete 77-part catalog.
    pub fn new() -> Self {
        Self::with_catalog(PartCatalog::Complete)
    }

    /// Creates a document from the chosen catalog slice.
    pub fn with_catalog(catalog: PartCatalog) -> Self {
        let parts = build_default_parts(catalog);
        let next_sequence = next_sequence_after(parts.values());
        Self {
            celebration: None,
            parts,
            next_sequence,
        }
    }

    /// Rebuilds a document from a persisted snapshot.
    ///
    /// # Errors
    /// - Returns [`SnapshotError`] when keys are empty or duplicated.
    pub fn from_snapshot(snapshot: MassSnapshot) -> Result<Self, SnapshotError> {
        let mut parts = BTreeMap::new();
        for part in snapshot.parts {
            if part.key.is_empty() {
                return Err(SnapshotError::EmptyKey);
            }
            if parts.contains_key(&part.key) {
                return Err(SnapshotError::DuplicateKey(part.key));
            }
            if part.sequence() == u32::MAX {
                return Err(SnapshotError::SequenceOverflow(part.key));
            }
            parts.insert(part.key.clone(), part);
        }
        let next_sequence = next_sequence_after(parts.values());
        Ok(Self {
            celebration: snapshot.celebration,
            parts,
            next_sequence,
        })
    }

    /// Copies the document into its serializable form.
    pub fn snapshot(&self) -> MassSnapshot {
        MassSnapshot {
            celebration: self.celebration.clone(),
            parts: self.parts().into_iter().cloned().collect(),
        }
    }

    /// Replaces the celebration header.
    ///
    /// # Errors
    /// - Returns [`InvalidDateFormat`] when `date` is not `YYYY-MM-DD`; the
    ///   previous celebration is kept.
    pub fn set_celebration(
        &mut self,
        name: impl Into<String>,
        date: &str,
        kind: CelebrationKind,
        color: LiturgicalColor,
        season: impl Into<String>,
    ) -> Result<(), InvalidDateFormat> {
        let celebration = Celebration::from_date_str(name, date, kind, color, season)?;
        self.celebration = Some(celebration);
        Ok(())
    }

    /// Replaces the celebration with an already-built value.
    pub fn replace_celebration(&mut self, celebration: Option<Celebration>) {
        self.celebration = celebration;
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Sets the content of an existing part.
    ///
    /// Returns `false` and changes nothing when `key` is unknown.
    pub fn set_part_content(&mut self, key: &str, text: impl Into<String>) -> bool {
        match self.parts.get_mut(key) {
            Some(part) => {
                part.content = text.into();
                true
            }
            None => {
                debug!("event=part_set module=mass status=ignored reason=unknown_key key={key}");
                false
            }
        }
    }

    /// Stores the entrance antiphon under `entrance_antiphon`.
    pub fn set_entrance_antiphon(&mut self, text: &str, reference: &str) {
        let antiphon = Antiphon::new("Entrada", text, reference);
        self.set_part_content("entrance_antiphon", antiphon.to_string());
    }

    /// Stores the communion antiphon under `communion_antiphon`.
    pub fn set_communion_antiphon(&mut self, text: &str, reference: &str) {
        let antiphon = Antiphon::new("Comunhão", text, reference);
        self.set_part_content("communion_antiphon", antiphon.to_string());
    }

    /// Sets reading references; blank arguments keep the current content.
    pub fn set_readings(&mut self, first: &str, psalm: &str, second: &str, gospel: &str) {
        let readings = [
            ("first_reading", "Leitura", first),
            ("psalm", "Salmo", psalm),
            ("second_reading", "Leitura", second),
            ("gospel", "Evangelho", gospel),
        ];
        for (key, label, value) in readings {
            if !value.is_empty() {
                self.set_part_content(key, format!("{label}: {value}"));
            }
        }
    }

    /// Inserts a custom part and returns its derived key.
    ///
    /// Canonical parts are not renumbered: the new part renders after every
    /// existing part with an `order` lower than or equal to `position`.
    pub fn add_custom_part(&mut self, title: &str, text: &str, position: u32) -> String {
        let key = self.unique_key(&derive_part_key(title));
        let part = Part::new(key.clone(), title, text, position, self.next_sequence);
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.parts.insert(key.clone(), part);
        debug!("event=part_add module=mass status=ok key={key} order={position}");
        key
    }

    pub fn part(&self, key: &str) -> Option<&Part> {
        self.parts.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.parts.contains_key(key)
    }

    /// Number of parts, empty or not.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// All parts in render order, including empty ones.
    pub fn parts(&self) -> Vec<&Part> {
        let mut parts = self.parts.values().collect::<Vec<_>>();
        parts.sort_by(|left, right| left.render_cmp(right));
        parts
    }

    /// Parts with content in render order. Each call starts a fresh pass.
    pub fn ordered_non_empty_parts(&self) -> impl Iterator<Item = &Part> + '_ {
        self.parts().into_iter().filter(|part| part.has_content())
    }

    /// Complete plain-text rendering.
    pub fn full_text(&self) -> String {
        text::render(self)
    }

    /// Writes `full_text()` to `path` as UTF-8.
    pub fn export_to_text(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.export("text", path.as_ref(), |document| {
            Ok(document.full_text().into_bytes())
        })
    }

    /// Writes a paginated PDF to `path`.
    pub fn export_to_pdf(
        &self,
        path: impl AsRef<Path>,
        style: &RenderStyle,
    ) -> Result<(), RenderError> {
        self.export("pdf", path.as_ref(), |document| pdf::render(document, style))
    }

    /// Writes a DOCX document to `path`.
    pub fn export_to_docx(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.export("docx", path.as_ref(), |document| {
            let mut buffer = Cursor::new(Vec::new());
            docx::render(document).write_to(&mut buffer)?;
            Ok(buffer.into_inner())
        })
    }

    /// Renders in memory first; `path` is only touched once rendering
    /// succeeded, and a failed write removes the partial file.
    fn export(
        &self,
        format: &'static str,
        path: &Path,
        render: impl FnOnce(&Self) -> Result<Vec<u8>, RenderError>,
    ) -> Result<(), RenderError> {
        let started_at = Instant::now();
        let parts = self.ordered_non_empty_parts().count();
        info!("event=mass_export module=mass status=start format={format} parts={parts}");

        let result = render(self).and_then(|bytes| {
            fs::write(path, &bytes).map_err(|err| {
                let _ = fs::remove_file(path);
                RenderError::from(err)
            })
        });

        match &result {
            Ok(()) => info!(
                "event=mass_export module=mass status=ok format={format} parts={parts} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=mass_export module=mass status=error format={format} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn unique_key(&self, base: &str) -> String {
        if !self.parts.contains_key(base) {
            return base.to_string();
        }
        (1u32..)
            .map(|counter| format!("{base}_{counter}"))
            .find(|candidate| !self.parts.contains_key(candidate))
            .unwrap_or_else(|| format!("{base}_{}", self.next_sequence))
    }
}

/// Derives a stable part key from a display title.
///
/// Lowercases, folds Portuguese diacritics and collapses every run of other
/// characters into `_`.
pub fn derive_part_key(title: &str) -> String {
    let folded = title
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .collect::<String>();
    let key = NON_KEY_CHARS_RE.replace_all(&folded, "_");
    let key = key.trim_matches('_');
    if key.is_empty() {
        FALLBACK_CUSTOM_KEY.to_string()
    } else {
        key.to_string()
    }
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn next_sequence_after<'a>(parts: impl Iterator<Item = &'a Part>) -> u32 {
    parts
        .map(|part| part.sequence().saturating_add(1))
        .max()
        .unwrap_or(0)
}
