use chrono::Datelike;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::Catalogs;
use crate::db::get_connection;
use crate::error::{Result, SkarbnikError};
use crate::fmt::{money, truncate};
use crate::models::{CandidateRow, CellValue};
use crate::settings::{db_path, load_settings};
use crate::validator::{validate, FieldErrors};
use crate::{field_map, reconciler, store};

pub struct AddArgs {
    pub czesc: Option<String>,
    pub dzial: Option<String>,
    pub rozdzial: Option<String>,
    pub paragraf: Option<String>,
    pub zrodlo: Option<String>,
    pub grupa: Option<i64>,
    pub zadanie: Option<String>,
    pub program: Option<String>,
    pub plan_wi: Option<String>,
    pub uzasadnienie: Option<String>,
}

fn print_field_errors(errors: &FieldErrors) {
    let mut table = Table::new();
    table.set_header(vec!["Pole", "Błąd"]);
    for (field, messages) in errors.iter() {
        let label = field_map::display_label(field_map::to_backend_name(field));
        for message in messages {
            table.add_row(vec![Cell::new(label), Cell::new(message)]);
        }
    }
    println!("{table}");
}

pub fn add(args: AddArgs) -> Result<()> {
    let settings = load_settings();
    let komorka = settings
        .komorka_organizacyjna_id
        .ok_or(SkarbnikError::NoSession)?;

    let conn = get_connection(&db_path())?;
    let catalogs = Catalogs::load(&conn)?;

    let mut row = CandidateRow::new(chrono::Local::now().year());
    row.czesc_budzetowa = args.czesc;
    row.dzial = args.dzial;
    row.rozdzial = args.rozdzial;
    row.paragraf = args.paragraf;
    row.zrodlo_finansowania = args.zrodlo;
    row.grupa_wydatkow = args.grupa;
    row.kod_zadaniowy = args.zadanie;
    row.nazwa_programu = args.program;
    row.plan_wi = args.plan_wi;
    row.uzasadnienie = args.uzasadnienie;

    match validate(&row, &catalogs) {
        Err(errors) => {
            print_field_errors(&errors);
            Err(SkarbnikError::Validation(errors.len()))
        }
        Ok(valid) => {
            let payload = valid.to_payload(komorka);
            let id = store::create_row(&conn, &payload)?;
            for segment in &valid.segmenty {
                store::create_segment(&conn, id, segment)?;
            }
            println!(
                "{} row {id} ({}, {}/{}/{})",
                "Added".green(),
                valid.nazwa_programu,
                valid.dzial.kod,
                valid.rozdzial.kod,
                valid.paragraf.kod
            );
            Ok(())
        }
    }
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let rows = store::list_rows(&conn)?;

    let mut table = Table::new();
    table.set_header(vec![
        "Id", "Część", "Dział", "Rozdział", "Paragraf", "Źródło", "Grupa", "Nazwa programu", "Plan WI",
    ]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.czesc_budzetowa_kod.as_deref().unwrap_or_default()),
            Cell::new(row.dzial_kod.as_deref().unwrap_or_default()),
            Cell::new(row.rozdzial_kod.as_deref().unwrap_or_default()),
            Cell::new(row.paragraf_kod.as_deref().unwrap_or_default()),
            Cell::new(row.zrodlo_finansowania_kod.as_deref().unwrap_or_default()),
            Cell::new(row.grupa_wydatkow_id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(truncate(row.nazwa_projektu.as_deref().unwrap_or_default(), 40)),
            Cell::new(row.budzet.as_deref().unwrap_or_default()),
        ]);
    }
    println!("Wiersze planowania budżetu\n{table}");
    Ok(())
}

pub fn show(id: i64) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let row = store::get_row(&conn, id)?;
    let segments = store::get_segments(&conn, id)?;

    println!("Wiersz {}", row.id);
    let fields = [
        ("czesc_budzetowa_kod", row.czesc_budzetowa_kod.clone()),
        ("dzial_kod", row.dzial_kod.clone()),
        ("rozdzial_kod", row.rozdzial_kod.clone()),
        ("paragraf_kod", row.paragraf_kod.clone()),
        ("zrodlo_finansowania_kod", row.zrodlo_finansowania_kod.clone()),
        ("grupa_wydatkow_id", row.grupa_wydatkow_id.map(|v| v.to_string())),
        ("komorka_organizacyjna_id", row.komorka_organizacyjna_id.map(|v| v.to_string())),
        ("nazwa_projektu", row.nazwa_projektu.clone()),
        ("nazwa_zadania", row.nazwa_zadania.clone()),
        ("budzet", row.budzet.clone()),
        ("szczegolowe_uzasadnienie_realizacji", row.szczegolowe_uzasadnienie_realizacji.clone()),
    ];
    for (field, value) in fields {
        println!(
            "  {:36} {}",
            format!("{}:", field_map::display_label(field)),
            value.as_deref().unwrap_or("—")
        );
    }

    let mut table = Table::new();
    table.set_header(vec!["Rok", "Potrzeby finansowe", "Limit wydatków", "Kwota umowy", "Nr umowy"]);
    for seg in &segments {
        table.add_row(vec![
            Cell::new(seg.rok),
            Cell::new(money(seg.potrzeba.unwrap_or(0.0))),
            Cell::new(money(seg.limit.unwrap_or(0.0))),
            Cell::new(money(seg.kwota_umowy.unwrap_or(0.0))),
            Cell::new(seg.numer_umowy.as_deref().unwrap_or_default()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn set(id: i64, field: &str, value_raw: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let catalogs = Catalogs::load(&conn)?;

    let backend = field_map::to_backend_name(field);

    // A bare string that is not valid JSON is taken as text.
    let parsed: serde_json::Value = serde_json::from_str(value_raw)
        .unwrap_or_else(|_| serde_json::Value::String(value_raw.to_string()));
    let scalar = reconciler::extract_scalar(&parsed, &catalogs.grupy_wydatkow);

    if scalar.is_null() && !parsed.is_null() {
        // Unresolvable value: drop the update, keep the stored value.
        println!(
            "{} value has no resolvable identifier; update dropped.",
            "Warning:".yellow()
        );
        return Ok(());
    }

    let stored = store::update_cell(&conn, id, backend, &scalar)?;
    let shown = match &stored {
        CellValue::Null => "—".to_string(),
        other => other.to_string(),
    };
    println!("{} {} = {shown}", "Updated".green(), field_map::display_label(backend));
    Ok(())
}
