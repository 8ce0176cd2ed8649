//! Append-only versioned-field store. A row record itself holds nothing but
//! an id; every field lives as a chain of versions in one of three version
//! tables, and the current value of a field is its newest version. Creation
//! writes the first version of every field, a patch appends one more.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Result, SkarbnikError};
use crate::models::{CellValue, RocznySegment};

pub const ENTITY_PLANOWANIE: &str = "planowanie_budzetu";
pub const ENTITY_ROK: &str = "rok_budzetowy";

pub const STRING_FIELDS: &[&str] = &[
    "nazwa_projektu",
    "nazwa_zadania",
    "szczegolowe_uzasadnienie_realizacji",
    "budzet",
];
pub const FK_STRING_FIELDS: &[&str] = &[
    "czesc_budzetowa_kod",
    "dzial_kod",
    "rozdzial_kod",
    "paragraf_kod",
    "zrodlo_finansowania_kod",
];
pub const FK_INT_FIELDS: &[&str] = &["grupa_wydatkow_id", "komorka_organizacyjna_id"];

pub const SEGMENT_NUMERIC_FIELDS: &[&str] = &["potrzeba", "limit", "kwota_umowy"];
pub const SEGMENT_STRING_FIELDS: &[&str] = &["numer_umowy"];

#[derive(Debug, Clone)]
pub struct CreatePayload {
    pub nazwa_projektu: Option<String>,
    pub nazwa_zadania: Option<String>,
    pub szczegolowe_uzasadnienie_realizacji: Option<String>,
    pub budzet: Option<String>,
    pub czesc_budzetowa_kod: String,
    pub dzial_kod: String,
    pub rozdzial_kod: String,
    pub paragraf_kod: String,
    pub zrodlo_finansowania_kod: String,
    pub grupa_wydatkow_id: i64,
    pub komorka_organizacyjna_id: i64,
}

/// Current values of one row, read back from the newest versions.
#[derive(Debug, Clone)]
pub struct RowRecord {
    pub id: i64,
    pub nazwa_projektu: Option<String>,
    pub nazwa_zadania: Option<String>,
    pub szczegolowe_uzasadnienie_realizacji: Option<String>,
    pub budzet: Option<String>,
    pub czesc_budzetowa_kod: Option<String>,
    pub dzial_kod: Option<String>,
    pub rozdzial_kod: Option<String>,
    pub paragraf_kod: Option<String>,
    pub zrodlo_finansowania_kod: Option<String>,
    pub grupa_wydatkow_id: Option<i64>,
    pub komorka_organizacyjna_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SegmentRecord {
    pub id: i64,
    pub planowanie_budzetu_id: i64,
    pub rok: i32,
    pub potrzeba: Option<f64>,
    pub limit: Option<f64>,
    pub kwota_umowy: Option<f64>,
    pub numer_umowy: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VersionEntry {
    pub value: CellValue,
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Version appenders
// ---------------------------------------------------------------------------

fn append_string(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
    field: &str,
    value: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO versioned_string_fields (entity_type, entity_id, field_name, value) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![entity_type, entity_id, field, value],
    )?;
    Ok(())
}

fn append_numeric(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
    field: &str,
    value: f64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO versioned_numeric_fields (entity_type, entity_id, field_name, value) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![entity_type, entity_id, field, value],
    )?;
    Ok(())
}

fn append_fk(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
    field: &str,
    value_string: Option<&str>,
    value_int: Option<i64>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO versioned_fk_fields (entity_type, entity_id, field_name, value_string, value_int) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![entity_type, entity_id, field, value_string, value_int],
    )?;
    Ok(())
}

fn row_exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn
        .prepare("SELECT 1 FROM planowanie_budzetu WHERE id = ?1")?
        .exists([id])?)
}

fn segment_exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn
        .prepare("SELECT 1 FROM rok_budzetowy WHERE id = ?1")?
        .exists([id])?)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

pub fn create_row(conn: &Connection, payload: &CreatePayload) -> Result<i64> {
    conn.execute("INSERT INTO planowanie_budzetu DEFAULT VALUES", [])?;
    let id = conn.last_insert_rowid();

    append_string(conn, ENTITY_PLANOWANIE, id, "nazwa_projektu", payload.nazwa_projektu.as_deref())?;
    append_string(conn, ENTITY_PLANOWANIE, id, "nazwa_zadania", payload.nazwa_zadania.as_deref())?;
    append_string(
        conn,
        ENTITY_PLANOWANIE,
        id,
        "szczegolowe_uzasadnienie_realizacji",
        payload.szczegolowe_uzasadnienie_realizacji.as_deref(),
    )?;
    append_string(conn, ENTITY_PLANOWANIE, id, "budzet", payload.budzet.as_deref())?;

    append_fk(conn, ENTITY_PLANOWANIE, id, "czesc_budzetowa_kod", Some(&payload.czesc_budzetowa_kod), None)?;
    append_fk(conn, ENTITY_PLANOWANIE, id, "dzial_kod", Some(&payload.dzial_kod), None)?;
    append_fk(conn, ENTITY_PLANOWANIE, id, "rozdzial_kod", Some(&payload.rozdzial_kod), None)?;
    append_fk(conn, ENTITY_PLANOWANIE, id, "paragraf_kod", Some(&payload.paragraf_kod), None)?;
    append_fk(
        conn,
        ENTITY_PLANOWANIE,
        id,
        "zrodlo_finansowania_kod",
        Some(&payload.zrodlo_finansowania_kod),
        None,
    )?;
    append_fk(conn, ENTITY_PLANOWANIE, id, "grupa_wydatkow_id", None, Some(payload.grupa_wydatkow_id))?;
    append_fk(
        conn,
        ENTITY_PLANOWANIE,
        id,
        "komorka_organizacyjna_id",
        None,
        Some(payload.komorka_organizacyjna_id),
    )?;

    Ok(id)
}

pub fn create_segment(conn: &Connection, planowanie_id: i64, segment: &RocznySegment) -> Result<i64> {
    if !row_exists(conn, planowanie_id)? {
        return Err(SkarbnikError::RowNotFound(planowanie_id));
    }
    conn.execute(
        "INSERT INTO rok_budzetowy (planowanie_budzetu_id, rok) VALUES (?1, ?2)",
        rusqlite::params![planowanie_id, segment.rok],
    )?;
    let id = conn.last_insert_rowid();

    append_numeric(conn, ENTITY_ROK, id, "potrzeba", segment.potrzeba)?;
    append_numeric(conn, ENTITY_ROK, id, "limit", segment.limit)?;
    append_numeric(conn, ENTITY_ROK, id, "kwota_umowy", segment.kwota_umowy)?;
    append_string(conn, ENTITY_ROK, id, "numer_umowy", Some(&segment.numer_umowy))?;

    Ok(id)
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

fn cell_as_text(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Null => None,
        CellValue::Text(s) => Some(s.clone()),
        CellValue::Int(i) => Some(i.to_string()),
        CellValue::Float(f) => Some(f.to_string()),
    }
}

fn cell_as_int(field: &str, value: &CellValue) -> Result<i64> {
    match value {
        CellValue::Int(i) => Ok(*i),
        CellValue::Float(f) => Ok(*f as i64),
        CellValue::Text(s) => s
            .parse()
            .map_err(|_| SkarbnikError::Other(format!("Field {field} expects an integer id"))),
        CellValue::Null => Err(SkarbnikError::NullField(field.to_string())),
    }
}

fn cell_as_f64(field: &str, value: &CellValue) -> Result<f64> {
    match value {
        CellValue::Int(i) => Ok(*i as f64),
        CellValue::Float(f) => Ok(*f),
        CellValue::Text(s) => s
            .parse()
            .map_err(|_| SkarbnikError::Other(format!("Field {field} expects a number"))),
        CellValue::Null => Err(SkarbnikError::NullField(field.to_string())),
    }
}

/// Append one version of a row field. The field name must belong to one of
/// the known classes; anything else is a hard error, not a silent write.
pub fn update_cell(conn: &Connection, id: i64, field: &str, value: &CellValue) -> Result<CellValue> {
    if !row_exists(conn, id)? {
        return Err(SkarbnikError::RowNotFound(id));
    }

    if STRING_FIELDS.contains(&field) {
        append_string(conn, ENTITY_PLANOWANIE, id, field, cell_as_text(value).as_deref())?;
    } else if FK_STRING_FIELDS.contains(&field) {
        let kod = cell_as_text(value).ok_or_else(|| SkarbnikError::NullField(field.to_string()))?;
        append_fk(conn, ENTITY_PLANOWANIE, id, field, Some(&kod), None)?;
    } else if FK_INT_FIELDS.contains(&field) {
        let fk = cell_as_int(field, value)?;
        append_fk(conn, ENTITY_PLANOWANIE, id, field, None, Some(fk))?;
    } else {
        return Err(SkarbnikError::UnknownField(field.to_string()));
    }

    Ok(value.clone())
}

pub fn update_segment_cell(
    conn: &Connection,
    id: i64,
    field: &str,
    value: &CellValue,
) -> Result<CellValue> {
    if !segment_exists(conn, id)? {
        return Err(SkarbnikError::SegmentNotFound(id));
    }

    if SEGMENT_NUMERIC_FIELDS.contains(&field) {
        append_numeric(conn, ENTITY_ROK, id, field, cell_as_f64(field, value)?)?;
    } else if SEGMENT_STRING_FIELDS.contains(&field) {
        append_string(conn, ENTITY_ROK, id, field, cell_as_text(value).as_deref())?;
    } else {
        return Err(SkarbnikError::UnknownField(field.to_string()));
    }

    Ok(value.clone())
}

// ---------------------------------------------------------------------------
// History and current values
// ---------------------------------------------------------------------------

enum FieldClass {
    Str,
    Fk,
    Numeric,
}

fn classify(entity_type: &str, field: &str) -> Result<FieldClass> {
    match entity_type {
        ENTITY_PLANOWANIE => {
            if STRING_FIELDS.contains(&field) {
                Ok(FieldClass::Str)
            } else if FK_STRING_FIELDS.contains(&field) || FK_INT_FIELDS.contains(&field) {
                Ok(FieldClass::Fk)
            } else {
                Err(SkarbnikError::UnknownField(field.to_string()))
            }
        }
        ENTITY_ROK => {
            if SEGMENT_NUMERIC_FIELDS.contains(&field) {
                Ok(FieldClass::Numeric)
            } else if SEGMENT_STRING_FIELDS.contains(&field) {
                Ok(FieldClass::Str)
            } else {
                Err(SkarbnikError::UnknownField(field.to_string()))
            }
        }
        other => Err(SkarbnikError::Other(format!("Unknown entity type: {other}"))),
    }
}

/// Full change history of one field, newest first. The oldest entry is the
/// creation value.
pub fn field_history(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
    field: &str,
) -> Result<Vec<VersionEntry>> {
    if entity_type == ENTITY_PLANOWANIE && !row_exists(conn, entity_id)? {
        return Err(SkarbnikError::RowNotFound(entity_id));
    }
    if entity_type == ENTITY_ROK && !segment_exists(conn, entity_id)? {
        return Err(SkarbnikError::SegmentNotFound(entity_id));
    }

    // Same-second edits are disambiguated by insert order.
    let entries = match classify(entity_type, field)? {
        FieldClass::Str => conn
            .prepare(
                "SELECT value, timestamp FROM versioned_string_fields \
                 WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
                 ORDER BY timestamp DESC, id DESC",
            )?
            .query_map(rusqlite::params![entity_type, entity_id, field], |row| {
                let value: Option<String> = row.get(0)?;
                Ok(VersionEntry {
                    value: value.map(CellValue::Text).unwrap_or(CellValue::Null),
                    timestamp: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?,
        FieldClass::Numeric => conn
            .prepare(
                "SELECT value, timestamp FROM versioned_numeric_fields \
                 WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
                 ORDER BY timestamp DESC, id DESC",
            )?
            .query_map(rusqlite::params![entity_type, entity_id, field], |row| {
                Ok(VersionEntry {
                    value: CellValue::Float(row.get(0)?),
                    timestamp: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?,
        FieldClass::Fk => conn
            .prepare(
                "SELECT value_string, value_int, timestamp FROM versioned_fk_fields \
                 WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
                 ORDER BY timestamp DESC, id DESC",
            )?
            .query_map(rusqlite::params![entity_type, entity_id, field], |row| {
                let value_string: Option<String> = row.get(0)?;
                let value_int: Option<i64> = row.get(1)?;
                let value = match (value_string, value_int) {
                    (Some(s), _) => CellValue::Text(s),
                    (None, Some(i)) => CellValue::Int(i),
                    (None, None) => CellValue::Null,
                };
                Ok(VersionEntry { value, timestamp: row.get(2)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };

    Ok(entries)
}

fn latest_string(conn: &Connection, entity_type: &str, id: i64, field: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM versioned_string_fields \
             WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
            rusqlite::params![entity_type, id, field],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten())
}

fn latest_numeric(conn: &Connection, entity_type: &str, id: i64, field: &str) -> Result<Option<f64>> {
    Ok(conn
        .query_row(
            "SELECT value FROM versioned_numeric_fields \
             WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
            rusqlite::params![entity_type, id, field],
            |row| row.get(0),
        )
        .optional()?)
}

fn latest_fk_string(conn: &Connection, id: i64, field: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value_string FROM versioned_fk_fields \
             WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
            rusqlite::params![ENTITY_PLANOWANIE, id, field],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten())
}

fn latest_fk_int(conn: &Connection, id: i64, field: &str) -> Result<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT value_int FROM versioned_fk_fields \
             WHERE entity_type = ?1 AND entity_id = ?2 AND field_name = ?3 \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
            rusqlite::params![ENTITY_PLANOWANIE, id, field],
            |row| row.get::<_, Option<i64>>(0),
        )
        .optional()?
        .flatten())
}

fn read_row(conn: &Connection, id: i64) -> Result<RowRecord> {
    Ok(RowRecord {
        id,
        nazwa_projektu: latest_string(conn, ENTITY_PLANOWANIE, id, "nazwa_projektu")?,
        nazwa_zadania: latest_string(conn, ENTITY_PLANOWANIE, id, "nazwa_zadania")?,
        szczegolowe_uzasadnienie_realizacji: latest_string(
            conn,
            ENTITY_PLANOWANIE,
            id,
            "szczegolowe_uzasadnienie_realizacji",
        )?,
        budzet: latest_string(conn, ENTITY_PLANOWANIE, id, "budzet")?,
        czesc_budzetowa_kod: latest_fk_string(conn, id, "czesc_budzetowa_kod")?,
        dzial_kod: latest_fk_string(conn, id, "dzial_kod")?,
        rozdzial_kod: latest_fk_string(conn, id, "rozdzial_kod")?,
        paragraf_kod: latest_fk_string(conn, id, "paragraf_kod")?,
        zrodlo_finansowania_kod: latest_fk_string(conn, id, "zrodlo_finansowania_kod")?,
        grupa_wydatkow_id: latest_fk_int(conn, id, "grupa_wydatkow_id")?,
        komorka_organizacyjna_id: latest_fk_int(conn, id, "komorka_organizacyjna_id")?,
    })
}

pub fn get_row(conn: &Connection, id: i64) -> Result<RowRecord> {
    if !row_exists(conn, id)? {
        return Err(SkarbnikError::RowNotFound(id));
    }
    read_row(conn, id)
}

pub fn list_rows(conn: &Connection) -> Result<Vec<RowRecord>> {
    let ids: Vec<i64> = conn
        .prepare("SELECT id FROM planowanie_budzetu ORDER BY id")?
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    ids.into_iter().map(|id| read_row(conn, id)).collect()
}

fn read_segment(conn: &Connection, id: i64, planowanie_id: i64, rok: i32) -> Result<SegmentRecord> {
    Ok(SegmentRecord {
        id,
        planowanie_budzetu_id: planowanie_id,
        rok,
        potrzeba: latest_numeric(conn, ENTITY_ROK, id, "potrzeba")?,
        limit: latest_numeric(conn, ENTITY_ROK, id, "limit")?,
        kwota_umowy: latest_numeric(conn, ENTITY_ROK, id, "kwota_umowy")?,
        numer_umowy: latest_string(conn, ENTITY_ROK, id, "numer_umowy")?,
    })
}

pub fn get_segment(conn: &Connection, id: i64) -> Result<SegmentRecord> {
    let found: Option<(i64, i32)> = conn
        .query_row(
            "SELECT planowanie_budzetu_id, rok FROM rok_budzetowy WHERE id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    match found {
        Some((planowanie_id, rok)) => read_segment(conn, id, planowanie_id, rok),
        None => Err(SkarbnikError::SegmentNotFound(id)),
    }
}

pub fn get_segments(conn: &Connection, planowanie_id: i64) -> Result<Vec<SegmentRecord>> {
    let raw: Vec<(i64, i32)> = conn
        .prepare("SELECT id, rok FROM rok_budzetowy WHERE planowanie_budzetu_id = ?1 ORDER BY rok")?
        .query_map([planowanie_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    raw.into_iter()
        .map(|(id, rok)| read_segment(conn, id, planowanie_id, rok))
        .collect()
}

pub fn list_segments(conn: &Connection) -> Result<Vec<SegmentRecord>> {
    let raw: Vec<(i64, i64, i32)> = conn
        .prepare("SELECT id, planowanie_budzetu_id, rok FROM rok_budzetowy ORDER BY planowanie_budzetu_id, rok")?
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    raw.into_iter()
        .map(|(id, planowanie_id, rok)| read_segment(conn, id, planowanie_id, rok))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::models::upcoming_years;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn payload() -> CreatePayload {
        CreatePayload {
            nazwa_projektu: Some("Program mieszkaniowy".into()),
            nazwa_zadania: Some("Obsługa urzędu Prezydenta RP".into()),
            szczegolowe_uzasadnienie_realizacji: None,
            budzet: Some("WI/2026/04".into()),
            czesc_budzetowa_kod: "27".into(),
            dzial_kod: "700".into(),
            rozdzial_kod: "70001".into(),
            paragraf_kod: "4210".into(),
            zrodlo_finansowania_kod: "1".into(),
            grupa_wydatkow_id: 3,
            komorka_organizacyjna_id: 1,
        }
    }

    #[test]
    fn test_create_and_read_back() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        let row = get_row(&conn, id).unwrap();
        assert_eq!(row.dzial_kod.as_deref(), Some("700"));
        assert_eq!(row.rozdzial_kod.as_deref(), Some("70001"));
        assert_eq!(row.grupa_wydatkow_id, Some(3));
        assert_eq!(row.budzet.as_deref(), Some("WI/2026/04"));
        assert!(row.szczegolowe_uzasadnienie_realizacji.is_none());
    }

    #[test]
    fn test_patch_updates_current_value() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        let stored = update_cell(&conn, id, "dzial_kod", &CellValue::Text("720".into())).unwrap();
        assert_eq!(stored, CellValue::Text("720".into()));
        let row = get_row(&conn, id).unwrap();
        assert_eq!(row.dzial_kod.as_deref(), Some("720"));
    }

    #[test]
    fn test_history_newest_first_oldest_is_creation() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        update_cell(&conn, id, "paragraf_kod", &CellValue::Text("4220".into())).unwrap();
        update_cell(&conn, id, "paragraf_kod", &CellValue::Text("4300".into())).unwrap();

        let history = field_history(&conn, ENTITY_PLANOWANIE, id, "paragraf_kod").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].value, CellValue::Text("4300".into()));
        assert_eq!(history[2].value, CellValue::Text("4210".into()));
    }

    #[test]
    fn test_unknown_field_is_hard_error() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        let err = update_cell(&conn, id, "dzial", &CellValue::Text("720".into())).unwrap_err();
        assert!(matches!(err, SkarbnikError::UnknownField(_)));
    }

    #[test]
    fn test_fk_fields_reject_null() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        let err = update_cell(&conn, id, "dzial_kod", &CellValue::Null).unwrap_err();
        assert!(matches!(err, SkarbnikError::NullField(_)));
        let err = update_cell(&conn, id, "grupa_wydatkow_id", &CellValue::Null).unwrap_err();
        assert!(matches!(err, SkarbnikError::NullField(_)));
    }

    #[test]
    fn test_string_fields_accept_null() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        update_cell(&conn, id, "nazwa_projektu", &CellValue::Null).unwrap();
        let row = get_row(&conn, id).unwrap();
        assert!(row.nazwa_projektu.is_none());
    }

    #[test]
    fn test_missing_row_reported() {
        let (_dir, conn) = test_db();
        let err = update_cell(&conn, 99, "dzial_kod", &CellValue::Text("720".into())).unwrap_err();
        assert!(matches!(err, SkarbnikError::RowNotFound(99)));
        assert!(matches!(get_row(&conn, 99).unwrap_err(), SkarbnikError::RowNotFound(99)));
    }

    #[test]
    fn test_segments_roundtrip() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        for rok in upcoming_years(2025) {
            create_segment(&conn, id, &RocznySegment::empty(rok)).unwrap();
        }
        let segments = get_segments(&conn, id).unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].rok, 2026);
        assert_eq!(segments[0].limit, Some(0.0));

        let seg_id = segments[1].id;
        update_segment_cell(&conn, seg_id, "limit", &CellValue::Float(150000.0)).unwrap();
        let seg = get_segment(&conn, seg_id).unwrap();
        assert_eq!(seg.limit, Some(150000.0));

        let history = field_history(&conn, ENTITY_ROK, seg_id, "limit").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, CellValue::Float(150000.0));
        assert_eq!(history[1].value, CellValue::Float(0.0));
    }

    #[test]
    fn test_segment_requires_existing_row() {
        let (_dir, conn) = test_db();
        let err = create_segment(&conn, 7, &RocznySegment::empty(2026)).unwrap_err();
        assert!(matches!(err, SkarbnikError::RowNotFound(7)));
    }

    #[test]
    fn test_segment_numeric_parses_text() {
        let (_dir, conn) = test_db();
        let id = create_row(&conn, &payload()).unwrap();
        let seg_id = create_segment(&conn, id, &RocznySegment::empty(2026)).unwrap();
        update_segment_cell(&conn, seg_id, "potrzeba", &CellValue::Text("2500.5".into())).unwrap();
        assert_eq!(get_segment(&conn, seg_id).unwrap().potrzeba, Some(2500.5));

        let err = update_segment_cell(&conn, seg_id, "potrzeba", &CellValue::Text("dużo".into()))
            .unwrap_err();
        assert!(matches!(err, SkarbnikError::Other(_)));
    }

    #[test]
    fn test_list_rows() {
        let (_dir, conn) = test_db();
        create_row(&conn, &payload()).unwrap();
        create_row(&conn, &payload()).unwrap();
        let rows = list_rows(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].id < rows[1].id);
    }
}
