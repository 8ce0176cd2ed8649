use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::models::CellValue;
use crate::settings::db_path;
use crate::store::{field_history, ENTITY_PLANOWANIE, ENTITY_ROK};
use crate::field_map;

pub fn run(id: i64, field: &str, segment: bool) -> Result<()> {
    let conn = get_connection(&db_path())?;

    let (entity, backend) = if segment {
        (ENTITY_ROK, field_map::segment_backend_name(field))
    } else {
        (ENTITY_PLANOWANIE, field_map::to_backend_name(field))
    };

    let entries = field_history(&conn, entity, id, backend)?;
    if entries.is_empty() {
        println!("Brak historii zmian dla tego pola.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Kiedy", "Zdarzenie", "Wartość"]);
    let last = entries.len() - 1;
    for (i, entry) in entries.iter().enumerate() {
        // Oldest entry is the creation value.
        let event = if i == last { "Utworzono" } else { "Edytowano" };
        let value = match &entry.value {
            CellValue::Null => "Puste".to_string(),
            other => textwrap::fill(&other.to_string(), 60),
        };
        table.add_row(vec![Cell::new(&entry.timestamp), Cell::new(event), Cell::new(value)]);
    }

    println!("Historia zmian - {}\n{table}", field_map::display_label(backend));
    Ok(())
}
