use colored::Colorize;

use crate::db::get_connection;
use crate::error::Result;
use crate::models::CellValue;
use crate::settings::db_path;
use crate::{field_map, store};

pub fn set(id: i64, field: &str, value_raw: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let backend = field_map::segment_backend_name(field);

    // Numbers are numbers, everything else stays text; the store parses
    // numeric text for the numeric fields itself.
    let value = match value_raw.parse::<f64>() {
        Ok(n) if store::SEGMENT_NUMERIC_FIELDS.contains(&backend) => CellValue::Float(n),
        _ => CellValue::Text(value_raw.to_string()),
    };

    let stored = store::update_segment_cell(&conn, id, backend, &value)?;
    let segment = store::get_segment(&conn, id)?;
    println!(
        "{} {} = {stored} (rok {})",
        "Updated".green(),
        field_map::display_label(backend),
        segment.rok
    );
    Ok(())
}
