use crate::db::get_connection;
use crate::error::Result;
use crate::settings::db_path;
use crate::store;

pub fn rows(output: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let rows = store::list_rows(&conn)?;

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "id",
        "czesc_budzetowa_kod",
        "dzial_kod",
        "rozdzial_kod",
        "paragraf_kod",
        "zrodlo_finansowania_kod",
        "grupa_wydatkow_id",
        "komorka_organizacyjna_id",
        "nazwa_projektu",
        "nazwa_zadania",
        "budzet",
        "szczegolowe_uzasadnienie_realizacji",
    ])?;
    for row in &rows {
        writer.write_record([
            row.id.to_string(),
            row.czesc_budzetowa_kod.clone().unwrap_or_default(),
            row.dzial_kod.clone().unwrap_or_default(),
            row.rozdzial_kod.clone().unwrap_or_default(),
            row.paragraf_kod.clone().unwrap_or_default(),
            row.zrodlo_finansowania_kod.clone().unwrap_or_default(),
            row.grupa_wydatkow_id.map(|v| v.to_string()).unwrap_or_default(),
            row.komorka_organizacyjna_id.map(|v| v.to_string()).unwrap_or_default(),
            row.nazwa_projektu.clone().unwrap_or_default(),
            row.nazwa_zadania.clone().unwrap_or_default(),
            row.budzet.clone().unwrap_or_default(),
            row.szczegolowe_uzasadnienie_realizacji.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!("Exported {} rows to {output}", rows.len());
    Ok(())
}

pub fn segments(output: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let segments = store::list_segments(&conn)?;

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "id",
        "planowanie_budzetu_id",
        "rok",
        "potrzeba",
        "limit",
        "kwota_umowy",
        "numer_umowy",
    ])?;
    for seg in &segments {
        writer.write_record([
            seg.id.to_string(),
            seg.planowanie_budzetu_id.to_string(),
            seg.rok.to_string(),
            seg.potrzeba.map(|v| v.to_string()).unwrap_or_default(),
            seg.limit.map(|v| v.to_string()).unwrap_or_default(),
            seg.kwota_umowy.map(|v| v.to_string()).unwrap_or_default(),
            seg.numer_umowy.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!("Exported {} segments to {output}", segments.len());
    Ok(())
}
