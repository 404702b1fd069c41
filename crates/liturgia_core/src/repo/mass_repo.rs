//! Saved custom-mass repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist whole `MassDocument` snapshots under a stable id.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - A stored row always holds a snapshot that rebuilds a valid document.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Celebration columns mirror the snapshot and exist only for listing.

use crate::db::DbError;
use crate::mass::document::{MassDocument, MassSnapshot};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a saved mass.
pub type MassId = Uuid;

const MASS_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    snapshot,
    created_at,
    updated_at
FROM custom_masses";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for saved-mass persistence.
#[derive(Debug)]
pub enum RepoError {
    EmptyName,
    Db(DbError),
    NotFound(MassId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "saved mass name cannot be empty"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "saved mass not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted mass data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::EmptyName | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A saved mass with its rebuilt document.
#[derive(Debug, Clone)]
pub struct SavedMass {
    pub id: MassId,
    pub name: String,
    pub document: MassDocument,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub updated_at: i64,
}

/// Listing row; the document itself is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMassSummary {
    pub id: MassId,
    pub name: String,
    pub celebration_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub celebration_date: Option<String>,
    pub updated_at: i64,
}

/// Repository interface for saved masses.
pub trait MassRepository {
    fn save(&self, name: &str, document: &MassDocument) -> RepoResult<MassId>;
    fn update(&self, id: MassId, document: &MassDocument) -> RepoResult<()>;
    fn get(&self, id: MassId) -> RepoResult<Option<SavedMass>>;
    /// Most recently updated first.
    fn list(&self) -> RepoResult<Vec<SavedMassSummary>>;
    fn delete(&self, id: MassId) -> RepoResult<()>;
}

/// SQLite-backed saved-mass repository.
pub struct SqliteMassRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMassRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

/// Row values derived from a document.
struct MassColumns {
    celebration_name: Option<String>,
    celebration_date: Option<String>,
    color: Option<&'static str>,
    snapshot: String,
}

impl MassColumns {
    fn from_document(document: &MassDocument) -> RepoResult<Self> {
        let snapshot = serde_json::to_string(&document.snapshot())
            .map_err(|err| RepoError::InvalidData(format!("snapshot encoding failed: {err}")))?;
        let celebration = document.celebration();
        Ok(Self {
            celebration_name: celebration.map(|celebration| celebration.name.clone()),
            celebration_date: celebration
                .map(|celebration| celebration.date.format("%Y-%m-%d").to_string()),
            color: celebration.map(|celebration| celebration.color.name()),
            snapshot,
        })
    }
}

impl MassRepository for SqliteMassRepository<'_> {
    fn save(&self, name: &str, document: &MassDocument) -> RepoResult<MassId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::EmptyName);
        }

        let id = Uuid::new_v4();
        let columns = MassColumns::from_document(document)?;
        self.conn.execute(
            "INSERT INTO custom_masses (
                uuid,
                name,
                celebration_name,
                celebration_date,
                color,
                snapshot,
                created_at,
                updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
            );",
            params![
                id.to_string(),
                name,
                columns.celebration_name,
                columns.celebration_date,
                columns.color,
                columns.snapshot,
            ],
        )?;

        info!("event=mass_save module=repo status=ok parts={}", document.len());
        Ok(id)
    }

    fn update(&self, id: MassId, document: &MassDocument) -> RepoResult<()> {
        let columns = MassColumns::from_document(document)?;
        let changed = self.conn.execute(
            "UPDATE custom_masses
             SET
                celebration_name = ?1,
                celebration_date = ?2,
                color = ?3,
                snapshot = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                columns.celebration_name,
                columns.celebration_date,
                columns.color,
                columns.snapshot,
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: MassId) -> RepoResult<Option<SavedMass>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MASS_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_mass_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<SavedMassSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, celebration_name, celebration_date, updated_at
             FROM custom_masses
             ORDER BY updated_at DESC, name ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(SavedMassSummary {
                id: parse_uuid(row)?,
                name: row.get("name")?,
                celebration_name: row.get("celebration_name")?,
                celebration_date: row.get("celebration_date")?,
                updated_at: row.get("updated_at")?,
            });
        }
        Ok(summaries)
    }

    fn delete(&self, id: MassId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM custom_masses WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_uuid(row: &Row<'_>) -> RepoResult<MassId> {
    let uuid_text: String = row.get("uuid")?;
    Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in custom_masses.uuid"
        ))
    })
}

fn parse_mass_row(row: &Row<'_>) -> RepoResult<SavedMass> {
    let id = parse_uuid(row)?;
    let snapshot_text: String = row.get("snapshot")?;
    let snapshot: MassSnapshot = serde_json::from_str(&snapshot_text).map_err(|err| {
        RepoError::InvalidData(format!("undecodable snapshot for {id}: {err}"))
    })?;
    let document = MassDocument::from_snapshot(snapshot)
        .map_err(|err| RepoError::InvalidData(format!("snapshot for {id}: {err}")))?;

    Ok(SavedMass {
        id,
        name: row.get("name")?,
        document,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
