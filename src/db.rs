use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS czesci_budzetowe (
    kod TEXT PRIMARY KEY,
    nazwa TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS dzialy (
    kod TEXT PRIMARY KEY,
    nazwa TEXT NOT NULL,
    pkd TEXT DEFAULT ''
);

CREATE TABLE IF NOT EXISTS rozdzialy (
    kod TEXT PRIMARY KEY,
    nazwa TEXT NOT NULL,
    dzial_kod TEXT NOT NULL,
    FOREIGN KEY (dzial_kod) REFERENCES dzialy(kod)
);

CREATE TABLE IF NOT EXISTS paragrafy (
    kod TEXT PRIMARY KEY,
    tresc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS zrodla_finansowania (
    kod TEXT PRIMARY KEY,
    nazwa TEXT NOT NULL,
    opis TEXT
);

CREATE TABLE IF NOT EXISTS grupy_wydatkow (
    id INTEGER PRIMARY KEY,
    nazwa TEXT NOT NULL,
    paragrafy TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS kody_zadaniowe (
    kod TEXT PRIMARY KEY,
    kod_krotki TEXT NOT NULL,
    nazwa TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS komorki_organizacyjne (
    id INTEGER PRIMARY KEY,
    nazwa TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS planowanie_budzetu (
    id INTEGER PRIMARY KEY,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS rok_budzetowy (
    id INTEGER PRIMARY KEY,
    planowanie_budzetu_id INTEGER NOT NULL,
    rok INTEGER NOT NULL,
    FOREIGN KEY (planowanie_budzetu_id) REFERENCES planowanie_budzetu(id)
);

CREATE TABLE IF NOT EXISTS versioned_string_fields (
    id INTEGER PRIMARY KEY,
    entity_type TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    field_name TEXT NOT NULL,
    value TEXT,
    timestamp TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS versioned_numeric_fields (
    id INTEGER PRIMARY KEY,
    entity_type TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    field_name TEXT NOT NULL,
    value REAL NOT NULL,
    timestamp TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS versioned_fk_fields (
    id INTEGER PRIMARY KEY,
    entity_type TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    field_name TEXT NOT NULL,
    value_string TEXT,
    value_int INTEGER,
    timestamp TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_versioned_string ON versioned_string_fields (entity_type, entity_id, field_name);
CREATE INDEX IF NOT EXISTS idx_versioned_numeric ON versioned_numeric_fields (entity_type, entity_id, field_name);
CREATE INDEX IF NOT EXISTS idx_versioned_fk ON versioned_fk_fields (entity_type, entity_id, field_name);

CREATE TABLE IF NOT EXISTS catalog_loads (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    kind TEXT NOT NULL,
    checksum TEXT NOT NULL,
    record_count INTEGER,
    loaded_at TEXT DEFAULT (datetime('now'))
);
";

// (kod, nazwa, opis) — the fixed national funding-source list. Codes 1, 2 and
// 5-9 are the ones accepted for dynamic expense groups.
const DEFAULT_ZRODLA: &[(&str, &str, Option<&str>)] = &[
    ("1", "Budżet państwa", None),
    ("2", "Budżet środków europejskich", Some("Środki z funduszy strukturalnych UE")),
    ("3", "Państwowe fundusze celowe", None),
    ("4", "Środki własne jednostek", None),
    ("5", "Współfinansowanie krajowe projektów UE", None),
    ("6", "Mechanizm Finansowy EOG", None),
    ("7", "Norweski Mechanizm Finansowy", None),
    ("8", "Środki z pomocy zagranicznej", Some("Bezzwrotna pomoc państw obcych")),
    ("9", "Inne środki bezzwrotne", None),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM zrodla_finansowania", [], |row| row.get(0))?;
    if count == 0 {
        for zrodlo in DEFAULT_ZRODLA {
            conn.execute(
                "INSERT INTO zrodla_finansowania (kod, nazwa, opis) VALUES (?1, ?2, ?3)",
                rusqlite::params![zrodlo.0, zrodlo.1, zrodlo.2],
            )?;
        }
    }
    Ok(())
}
