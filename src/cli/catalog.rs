use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::{load_fixture, CatalogKind, Catalogs};
use crate::db::get_connection;
use crate::error::{Result, SkarbnikError};
use crate::fmt::truncate;
use crate::models::Paragrafy;
use crate::settings::db_path;

pub fn list(kind: &str) -> Result<()> {
    let kind = CatalogKind::from_key(kind)
        .ok_or_else(|| SkarbnikError::UnknownCatalog(kind.to_string()))?;
    let conn = get_connection(&db_path())?;
    let catalogs = Catalogs::load(&conn)?;

    let mut table = Table::new();
    match kind {
        CatalogKind::CzesciBudzetowe => {
            table.set_header(vec!["Kod", "Nazwa"]);
            for c in &catalogs.czesci_budzetowe {
                table.add_row(vec![Cell::new(&c.kod), Cell::new(truncate(&c.nazwa, 60))]);
            }
        }
        CatalogKind::Dzialy => {
            table.set_header(vec!["Kod", "Nazwa", "PKD"]);
            for d in &catalogs.dzialy {
                table.add_row(vec![
                    Cell::new(&d.kod),
                    Cell::new(truncate(&d.nazwa, 60)),
                    Cell::new(&d.pkd),
                ]);
            }
        }
        CatalogKind::Rozdzialy => {
            table.set_header(vec!["Kod", "Nazwa", "Dział"]);
            for r in &catalogs.rozdzialy {
                table.add_row(vec![
                    Cell::new(&r.kod),
                    Cell::new(truncate(&r.nazwa, 60)),
                    Cell::new(&r.dzial),
                ]);
            }
        }
        CatalogKind::Paragrafy => {
            table.set_header(vec!["Kod", "Treść"]);
            for p in &catalogs.paragrafy {
                table.add_row(vec![Cell::new(&p.kod), Cell::new(truncate(&p.tresc, 60))]);
            }
        }
        CatalogKind::ZrodlaFinansowania => {
            table.set_header(vec!["Kod", "Nazwa", "Opis"]);
            for z in &catalogs.zrodla_finansowania {
                table.add_row(vec![
                    Cell::new(&z.kod),
                    Cell::new(truncate(&z.nazwa, 60)),
                    Cell::new(z.opis.as_deref().unwrap_or_default()),
                ]);
            }
        }
        CatalogKind::GrupyWydatkow => {
            table.set_header(vec!["Id", "Nazwa", "Paragrafy"]);
            for g in &catalogs.grupy_wydatkow {
                let paragrafy = match &g.paragrafy {
                    Paragrafy::Lista(kody) => kody.join(", "),
                    Paragrafy::Dynamiczne(s) => format!("{s} (dynamiczna końcówka)"),
                };
                table.add_row(vec![
                    Cell::new(g.id),
                    Cell::new(truncate(&g.nazwa, 50)),
                    Cell::new(truncate(&paragrafy, 50)),
                ]);
            }
        }
        CatalogKind::KodyZadaniowe => {
            table.set_header(vec!["Kod", "Kod krótki", "Nazwa"]);
            for k in &catalogs.kody_zadaniowe {
                table.add_row(vec![
                    Cell::new(&k.kod),
                    Cell::new(&k.kod_krotki),
                    Cell::new(truncate(&k.nazwa, 50)),
                ]);
            }
        }
        CatalogKind::KomorkiOrganizacyjne => {
            table.set_header(vec!["Id", "Nazwa"]);
            for k in &catalogs.komorki_organizacyjne {
                table.add_row(vec![Cell::new(k.id), Cell::new(truncate(&k.nazwa, 60))]);
            }
        }
    }

    println!("{}\n{table}", kind.name());
    Ok(())
}

pub fn load(file: &str, kind: &str) -> Result<()> {
    let kind = CatalogKind::from_key(kind)
        .ok_or_else(|| SkarbnikError::UnknownCatalog(kind.to_string()))?;
    let conn = get_connection(&db_path())?;

    let outcome = load_fixture(&conn, kind, Path::new(file))?;
    if outcome.skipped {
        println!("{} already loaded (same checksum), skipping.", kind.name());
        return Ok(());
    }
    for warning in &outcome.warnings {
        println!("{} {warning}", "Warning:".yellow());
    }
    println!("Loaded {} records into {}.", outcome.records, kind.name());
    Ok(())
}
