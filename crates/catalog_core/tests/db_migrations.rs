use catalog_core::db::migrations::latest_version;
use catalog_core::db::{open_db, open_db_in_memory, DbError};
use catalog_core::{EntityManager, SqliteRepository, Town};
use rusqlite::Connection;

const CATALOG_TABLES: [&str; 6] = ["products", "books", "movies", "plants", "contacts", "towns"];

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in CATALOG_TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn in_memory_databases_are_isolated() {
    let first = open_db_in_memory().unwrap();
    let second = open_db_in_memory().unwrap();

    EntityManager::new(SqliteRepository::<Town>::try_new(&first).unwrap())
        .add(&Town::new("Sofia", 1_200_000))
        .unwrap();

    let other = EntityManager::new(SqliteRepository::<Town>::try_new(&second).unwrap());
    assert_eq!(other.get_all().unwrap_err().to_string(), "No town found.");
}

#[test]
fn reopened_file_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let conn_first = open_db(&path).unwrap();
    EntityManager::new(SqliteRepository::<Town>::try_new(&conn_first).unwrap())
        .add(&Town::new("Varna", 330_000))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let manager = EntityManager::new(SqliteRepository::<Town>::try_new(&conn_second).unwrap());
    assert_eq!(manager.get_specific("Varna").unwrap().population, 330_000);
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
        DbError::SchemaTooNew {
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
