use liturgia_core::db::migrations::latest_version;
use liturgia_core::db::{open_db, open_db_in_memory, DbError};
use liturgia_core::{
    CalendarStore, MassDocument, MassForm, MassRepository, MassService, SqliteCalendarStore,
    SqliteMassRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "liturgical_colors");
    assert_table_exists(&conn, "calendar_entries");
    assert_table_exists(&conn, "custom_masses");
}

#[test]
fn liturgical_colors_are_seeded() {
    let conn = open_db_in_memory().unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM liturgical_colors;", [], |row| row.get(0))
        .unwrap();

    assert_eq!(count, 5);
}

#[test]
fn opening_same_database_twice_keeps_saved_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("liturgia.db");

    let form = MassForm::from_pairs([
        ("celebration_name", "Epifania do Senhor"),
        ("celebration_date", "2026-01-06"),
        ("celebration_color", "branco"),
        ("gospel", "Mt 2,1-12"),
    ]);
    let document = MassService::<SqliteMassRepository<'_>>::build(&form).unwrap();

    let conn_first = open_db(&path).unwrap();
    let mut calendar = SqliteCalendarStore::new(&conn_first);
    calendar.seed_sample_data_if_empty().unwrap();
    let id = SqliteMassRepository::new(&conn_first)
        .save("Epifania 2026", &document)
        .unwrap();
    drop(calendar);
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(SqliteCalendarStore::new(&conn_second).dates().unwrap().len(), 3);

    let service = MassService::new(SqliteMassRepository::new(&conn_second));
    let saved = service.load(id).unwrap();
    assert_eq!(saved.name, "Epifania 2026");
    assert_eq!(saved.document.full_text(), document.full_text());
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn saved_mass_keeps_custom_part_order() {
    let conn = open_db_in_memory().unwrap();
    let service = MassService::new(SqliteMassRepository::new(&conn));
    let mut document = MassDocument::new();
    document.set_readings("", "", "", "Mt 2,1-12");
    document.add_custom_part("Comentário", "Antes.", 20);
    document.add_custom_part("Comentário", "Depois.", 20);

    let id = service.save("Ordem", &document).unwrap();
    let mut loaded = service.load(id).unwrap().document;

    let keys = |document: &MassDocument| {
        document
            .ordered_non_empty_parts()
            .map(|part| part.key.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&loaded), keys(&document));
    assert_eq!(loaded.add_custom_part("Comentário", "", 20), "comentario_2");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
