use chrono::Datelike;
use colored::Colorize;

use crate::catalog::Catalogs;
use crate::db::{get_connection, init_db};
use crate::error::{Result, SkarbnikError};
use crate::models::{CandidateRow, CellValue};
use crate::settings::db_path;
use crate::validator::validate;
use crate::store;

// Sample classification slices: enough of each catalog to build and edit a
// few consistent rows.
const CZESCI: &[(&str, &str)] = &[
    ("27", "Informatyzacja"),
    ("34", "Rozwój regionalny"),
];

const DZIALY: &[(&str, &str, &str)] = &[
    ("700", "Gospodarka mieszkaniowa", "68"),
    ("720", "Informatyka", "62"),
    ("750", "Administracja publiczna", "84"),
    ("801", "Oświata i wychowanie", "85"),
];

const ROZDZIALY: &[(&str, &str, &str)] = &[
    ("70001", "Zakłady gospodarki mieszkaniowej", "700"),
    ("72095", "Pozostała działalność", "720"),
    ("75001", "Urzędy naczelnych i centralnych organów administracji rządowej", "750"),
    ("80101", "Szkoły podstawowe", "801"),
];

const PARAGRAFY: &[(&str, &str)] = &[
    ("4010", "Wynagrodzenia osobowe pracowników"),
    ("4110", "Składki na ubezpieczenia społeczne"),
    ("4210", "Zakup materiałów i wyposażenia"),
    ("4220", "Zakup środków żywności"),
    ("4300", "Zakup usług pozostałych"),
    ("6050", "Wydatki inwestycyjne jednostek budżetowych"),
    ("6060", "Wydatki na zakupy inwestycyjne jednostek budżetowych"),
];

// (id, nazwa, paragrafy as stored JSON)
const GRUPY: &[(i64, &str, &str)] = &[
    (1, "Wynagrodzenia i pochodne", r#"["4010","4110"]"#),
    (3, "Rzeczowe", r#"["4210","4220","4300"]"#),
    (4, "Wydatki majątkowe", r#""605x""#),
];

const KODY_ZADANIOWE: &[(&str, &str, &str)] = &[
    ("1.1.1.1", "1.1", "Obsługa urzędu Prezydenta RP"),
    ("1.3.1.1", "1.3", "Obsługa Prezesa Rady Ministrów i Rady Ministrów"),
    ("16.1.1.2", "16.1", "Utrzymanie i rozwój systemów teleinformatycznych"),
];

const KOMORKI: &[(i64, &str)] = &[
    (1, "Biuro Budżetowo-Finansowe"),
    (2, "Departament Utrzymania i Rozwoju Systemów"),
];

pub fn run() -> Result<()> {
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;

    for (kod, nazwa) in CZESCI {
        conn.execute(
            "INSERT OR REPLACE INTO czesci_budzetowe (kod, nazwa) VALUES (?1, ?2)",
            rusqlite::params![kod, nazwa],
        )?;
    }
    for (kod, nazwa, pkd) in DZIALY {
        conn.execute(
            "INSERT OR REPLACE INTO dzialy (kod, nazwa, pkd) VALUES (?1, ?2, ?3)",
            rusqlite::params![kod, nazwa, pkd],
        )?;
    }
    for (kod, nazwa, dzial) in ROZDZIALY {
        conn.execute(
            "INSERT OR REPLACE INTO rozdzialy (kod, nazwa, dzial_kod) VALUES (?1, ?2, ?3)",
            rusqlite::params![kod, nazwa, dzial],
        )?;
    }
    for (kod, tresc) in PARAGRAFY {
        conn.execute(
            "INSERT OR REPLACE INTO paragrafy (kod, tresc) VALUES (?1, ?2)",
            rusqlite::params![kod, tresc],
        )?;
    }
    for (id, nazwa, paragrafy) in GRUPY {
        conn.execute(
            "INSERT OR REPLACE INTO grupy_wydatkow (id, nazwa, paragrafy) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, nazwa, paragrafy],
        )?;
    }
    for (kod, kod_krotki, nazwa) in KODY_ZADANIOWE {
        conn.execute(
            "INSERT OR REPLACE INTO kody_zadaniowe (kod, kod_krotki, nazwa) VALUES (?1, ?2, ?3)",
            rusqlite::params![kod, kod_krotki, nazwa],
        )?;
    }
    for (id, nazwa) in KOMORKI {
        conn.execute(
            "INSERT OR REPLACE INTO komorki_organizacyjne (id, nazwa) VALUES (?1, ?2)",
            rusqlite::params![id, nazwa],
        )?;
    }

    let catalogs = Catalogs::load(&conn)?;
    let base_year = chrono::Local::now().year();

    // Two consistent rows: an explicit-group one and a dynamic-group one.
    let mut first = CandidateRow::new(base_year);
    first.czesc_budzetowa = Some("27".into());
    first.dzial = Some("720".into());
    first.rozdzial = Some("72095".into());
    first.paragraf = Some("4300".into());
    first.zrodlo_finansowania = Some("1".into());
    first.grupa_wydatkow = Some(3);
    first.kod_zadaniowy = Some("16.1.1.2".into());
    first.nazwa_programu = Some("Utrzymanie systemu e-Doręczeń".into());
    first.plan_wi = Some("WI/2026/04".into());

    let mut second = CandidateRow::new(base_year);
    second.czesc_budzetowa = Some("27".into());
    second.dzial = Some("750".into());
    second.rozdzial = Some("75001".into());
    second.paragraf = Some("6050".into());
    second.zrodlo_finansowania = Some("2".into());
    second.grupa_wydatkow = Some(4);
    second.kod_zadaniowy = Some("1.3.1.1".into());
    second.nazwa_programu = Some("Modernizacja infrastruktury serwerowej".into());
    second.plan_wi = Some("WI/2026/11".into());
    second.uzasadnienie = Some("Wymiana serwerów po zakończeniu wsparcia producenta.".into());

    let mut created = 0;
    for (i, candidate) in [first, second].into_iter().enumerate() {
        let valid = validate(&candidate, &catalogs)
            .map_err(|e| SkarbnikError::Other(format!("demo row failed validation:\n{e}")))?;
        let id = store::create_row(&conn, &valid.to_payload(1))?;
        for segment in &valid.segmenty {
            store::create_segment(&conn, id, segment)?;
        }
        created += 1;

        // Give the first row some history to browse.
        if i == 0 {
            store::update_cell(&conn, id, "paragraf_kod", &CellValue::Text("4210".into()))?;
            let segments = store::get_segments(&conn, id)?;
            if let Some(seg) = segments.first() {
                store::update_segment_cell(&conn, seg.id, "limit", &CellValue::Float(250000.0))?;
            }
        }
    }

    println!("{}", "Demo data loaded.".green());
    println!("Catalogs: {} działy, {} rozdziały, {} paragrafy, {} grupy wydatków",
        DZIALY.len(), ROZDZIALY.len(), PARAGRAFY.len(), GRUPY.len());
    println!("Rows created: {created}");
    println!();
    println!("Try:");
    println!("  skarbnik rows list");
    println!("  skarbnik rows show 1");
    println!("  skarbnik history 1 --field paragraf");
    println!("  skarbnik catalog list grupy_wydatkow");
    Ok(())
}
