//! Ordered schema migrations tracked through `PRAGMA user_version`.
//!
//! # Invariants
//! - Versions start at 1 and increase by exactly one per entry.
//! - Each migration commits together with its `user_version` bump, so a
//!   failure leaves the database at the last fully applied version.
//! - Up-to-date databases are left untouched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "calendar",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "custom_masses",
        sql: include_str!("0002_custom_masses.sql"),
    },
];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Brings `conn` up to [`latest_version`] and returns the versions applied.
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file was written by a
///   newer build.
/// - SQLite failures; earlier migrations stay committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<Vec<u32>> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let mut applied = Vec::new();
    for migration in MIGRATIONS.iter().filter(|migration| migration.version > from) {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;

        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
        applied.push(migration.version);
    }
    Ok(applied)
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version, MIGRATIONS};
    use crate::db::DbError;
    use crate::model::celebration::LiturgicalColor;
    use rusqlite::Connection;

    #[test]
    fn fresh_database_reaches_latest_version_and_seeds_colors() {
        let mut conn = Connection::open_in_memory().expect("open");
        assert_eq!(apply_migrations(&mut conn).expect("migrate"), vec![1, 2]);

        assert_eq!(schema_version(&conn).expect("version"), latest_version());
        let mut stmt = conn
            .prepare("SELECT name, meaning FROM liturgical_colors ORDER BY name;")
            .expect("prepare");
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .expect("query")
            .collect::<Result<Vec<_>, _>>()
            .expect("rows");
        assert_eq!(rows.len(), LiturgicalColor::ALL.len());
        for color in LiturgicalColor::ALL {
            assert!(rows
                .iter()
                .any(|(name, meaning)| name == color.name() && meaning == color.meaning()));
        }
    }

    #[test]
    fn rerunning_migrations_is_a_no_op() {
        let mut conn = Connection::open_in_memory().expect("open");
        apply_migrations(&mut conn).expect("first run");
        assert!(apply_migrations(&mut conn).expect("second run").is_empty());

        let colors: i64 = conn
            .query_row("SELECT COUNT(*) FROM liturgical_colors;", [], |row| row.get(0))
            .expect("count");
        assert_eq!(colors, 5);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let mut conn = Connection::open_in_memory().expect("open");
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .expect("bump version");

        let err = apply_migrations(&mut conn).expect_err("must reject newer schema");
        assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
    }

    #[test]
    fn partially_migrated_database_only_gets_missing_steps() {
        let mut conn = Connection::open_in_memory().expect("open");
        conn.execute_batch(MIGRATIONS[0].sql).expect("first step");
        conn.pragma_update(None, "user_version", 1).expect("mark version");

        assert_eq!(apply_migrations(&mut conn).expect("migrate"), vec![2]);
        assert_eq!(schema_version(&conn).expect("version"), 2);
    }

    #[test]
    fn versions_are_contiguous() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1);
        }
    }
}
