use std::path::Path;

use regex::Regex;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::{
    CzescBudzetowa, Dzial, GrupaWydatkow, KodZadaniowy, KomorkaOrganizacyjna, Paragraf, Rozdzial,
    ZrodloFinansowania,
};

/// Read-only snapshot of the reference catalogs, valid for the duration of
/// one validation run.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub czesci_budzetowe: Vec<CzescBudzetowa>,
    pub dzialy: Vec<Dzial>,
    pub rozdzialy: Vec<Rozdzial>,
    pub paragrafy: Vec<Paragraf>,
    pub zrodla_finansowania: Vec<ZrodloFinansowania>,
    pub grupy_wydatkow: Vec<GrupaWydatkow>,
    pub kody_zadaniowe: Vec<KodZadaniowy>,
    pub komorki_organizacyjne: Vec<KomorkaOrganizacyjna>,
}

impl Catalogs {
    pub fn load(conn: &Connection) -> Result<Self> {
        let czesci_budzetowe = conn
            .prepare("SELECT kod, nazwa FROM czesci_budzetowe ORDER BY kod")?
            .query_map([], |row| {
                Ok(CzescBudzetowa { kod: row.get(0)?, nazwa: row.get(1)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let dzialy = conn
            .prepare("SELECT kod, nazwa, pkd FROM dzialy ORDER BY kod")?
            .query_map([], |row| {
                Ok(Dzial { kod: row.get(0)?, nazwa: row.get(1)?, pkd: row.get(2)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let rozdzialy = conn
            .prepare("SELECT kod, nazwa, dzial_kod FROM rozdzialy ORDER BY kod")?
            .query_map([], |row| {
                Ok(Rozdzial { kod: row.get(0)?, nazwa: row.get(1)?, dzial: row.get(2)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let paragrafy = conn
            .prepare("SELECT kod, tresc FROM paragrafy ORDER BY kod")?
            .query_map([], |row| Ok(Paragraf { kod: row.get(0)?, tresc: row.get(1)? }))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let zrodla_finansowania = conn
            .prepare("SELECT kod, nazwa, opis FROM zrodla_finansowania ORDER BY kod")?
            .query_map([], |row| {
                Ok(ZrodloFinansowania { kod: row.get(0)?, nazwa: row.get(1)?, opis: row.get(2)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // `paragrafy` is stored as its JSON form; parse after the query so
        // serde errors surface as crate errors, not rusqlite ones.
        let raw_grupy: Vec<(i64, String, String)> = conn
            .prepare("SELECT id, nazwa, paragrafy FROM grupy_wydatkow ORDER BY id")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut grupy_wydatkow = Vec::with_capacity(raw_grupy.len());
        for (id, nazwa, paragrafy) in raw_grupy {
            grupy_wydatkow.push(GrupaWydatkow {
                id,
                nazwa,
                paragrafy: serde_json::from_str(&paragrafy)?,
            });
        }

        let kody_zadaniowe = conn
            .prepare("SELECT kod, kod_krotki, nazwa FROM kody_zadaniowe ORDER BY kod")?
            .query_map([], |row| {
                Ok(KodZadaniowy { kod: row.get(0)?, kod_krotki: row.get(1)?, nazwa: row.get(2)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let komorki_organizacyjne = conn
            .prepare("SELECT id, nazwa FROM komorki_organizacyjne ORDER BY id")?
            .query_map([], |row| Ok(KomorkaOrganizacyjna { id: row.get(0)?, nazwa: row.get(1)? }))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            czesci_budzetowe,
            dzialy,
            rozdzialy,
            paragrafy,
            zrodla_finansowania,
            grupy_wydatkow,
            kody_zadaniowe,
            komorki_organizacyjne,
        })
    }

    pub fn find_czesc(&self, kod: &str) -> Option<&CzescBudzetowa> {
        self.czesci_budzetowe.iter().find(|c| c.kod == kod)
    }

    pub fn find_dzial(&self, kod: &str) -> Option<&Dzial> {
        self.dzialy.iter().find(|d| d.kod == kod)
    }

    pub fn find_rozdzial(&self, kod: &str) -> Option<&Rozdzial> {
        self.rozdzialy.iter().find(|r| r.kod == kod)
    }

    pub fn find_paragraf(&self, kod: &str) -> Option<&Paragraf> {
        self.paragrafy.iter().find(|p| p.kod == kod)
    }

    pub fn find_zrodlo(&self, kod: &str) -> Option<&ZrodloFinansowania> {
        self.zrodla_finansowania.iter().find(|z| z.kod == kod)
    }

    pub fn find_grupa(&self, id: i64) -> Option<&GrupaWydatkow> {
        self.grupy_wydatkow.iter().find(|g| g.id == id)
    }

    pub fn find_kod_zadaniowy(&self, kod: &str) -> Option<&KodZadaniowy> {
        self.kody_zadaniowe.iter().find(|k| k.kod == kod)
    }

    pub fn find_komorka(&self, id: i64) -> Option<&KomorkaOrganizacyjna> {
        self.komorki_organizacyjne.iter().find(|k| k.id == id)
    }
}

// ---------------------------------------------------------------------------
// Fixture loading — enum dispatch per catalog kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogKind {
    CzesciBudzetowe,
    Dzialy,
    Rozdzialy,
    Paragrafy,
    ZrodlaFinansowania,
    GrupyWydatkow,
    KodyZadaniowe,
    KomorkiOrganizacyjne,
}

impl CatalogKind {
    pub fn all() -> &'static [CatalogKind] {
        &[
            Self::CzesciBudzetowe,
            Self::Dzialy,
            Self::Rozdzialy,
            Self::Paragrafy,
            Self::ZrodlaFinansowania,
            Self::GrupyWydatkow,
            Self::KodyZadaniowe,
            Self::KomorkiOrganizacyjne,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::CzesciBudzetowe => "czesci_budzetowe",
            Self::Dzialy => "dzialy",
            Self::Rozdzialy => "rozdzialy",
            Self::Paragrafy => "paragrafy",
            Self::ZrodlaFinansowania => "zrodla_finansowania",
            Self::GrupyWydatkow => "grupy_wydatkow",
            Self::KodyZadaniowe => "kody_zadaniowe",
            Self::KomorkiOrganizacyjne => "komorki_organizacyjne",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CzesciBudzetowe => "Części budżetowe",
            Self::Dzialy => "Działy",
            Self::Rozdzialy => "Rozdziały",
            Self::Paragrafy => "Paragrafy",
            Self::ZrodlaFinansowania => "Źródła finansowania",
            Self::GrupyWydatkow => "Grupy wydatków",
            Self::KodyZadaniowe => "Kody zadaniowe",
            Self::KomorkiOrganizacyjne => "Komórki organizacyjne",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.key() == key)
    }

    /// Expected digit width of this kind's classification codes, if it has one.
    fn code_width(&self) -> Option<usize> {
        match self {
            Self::Dzialy => Some(3),
            Self::Rozdzialy => Some(5),
            Self::Paragrafy => Some(4),
            _ => None,
        }
    }

    fn insert_all(&self, conn: &Connection, json: &str) -> Result<(usize, Vec<String>)> {
        let mut warnings = Vec::new();
        let count = match self {
            Self::CzesciBudzetowe => {
                let records: Vec<CzescBudzetowa> = serde_json::from_str(json)?;
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO czesci_budzetowe (kod, nazwa) VALUES (?1, ?2)",
                        rusqlite::params![r.kod, r.nazwa],
                    )?;
                }
                records.len()
            }
            Self::Dzialy => {
                let records: Vec<Dzial> = serde_json::from_str(json)?;
                self.check_codes(records.iter().map(|r| r.kod.as_str()), &mut warnings);
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO dzialy (kod, nazwa, pkd) VALUES (?1, ?2, ?3)",
                        rusqlite::params![r.kod, r.nazwa, r.pkd],
                    )?;
                }
                records.len()
            }
            Self::Rozdzialy => {
                let records: Vec<Rozdzial> = serde_json::from_str(json)?;
                self.check_codes(records.iter().map(|r| r.kod.as_str()), &mut warnings);
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO rozdzialy (kod, nazwa, dzial_kod) VALUES (?1, ?2, ?3)",
                        rusqlite::params![r.kod, r.nazwa, r.dzial],
                    )?;
                }
                records.len()
            }
            Self::Paragrafy => {
                let records: Vec<Paragraf> = serde_json::from_str(json)?;
                self.check_codes(records.iter().map(|r| r.kod.as_str()), &mut warnings);
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO paragrafy (kod, tresc) VALUES (?1, ?2)",
                        rusqlite::params![r.kod, r.tresc],
                    )?;
                }
                records.len()
            }
            Self::ZrodlaFinansowania => {
                let records: Vec<ZrodloFinansowania> = serde_json::from_str(json)?;
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO zrodla_finansowania (kod, nazwa, opis) VALUES (?1, ?2, ?3)",
                        rusqlite::params![r.kod, r.nazwa, r.opis],
                    )?;
                }
                records.len()
            }
            Self::GrupyWydatkow => {
                let records: Vec<GrupaWydatkow> = serde_json::from_str(json)?;
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO grupy_wydatkow (id, nazwa, paragrafy) VALUES (?1, ?2, ?3)",
                        rusqlite::params![r.id, r.nazwa, serde_json::to_string(&r.paragrafy)?],
                    )?;
                }
                records.len()
            }
            Self::KodyZadaniowe => {
                let records: Vec<KodZadaniowy> = serde_json::from_str(json)?;
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO kody_zadaniowe (kod, kod_krotki, nazwa) VALUES (?1, ?2, ?3)",
                        rusqlite::params![r.kod, r.kod_krotki, r.nazwa],
                    )?;
                }
                records.len()
            }
            Self::KomorkiOrganizacyjne => {
                let records: Vec<KomorkaOrganizacyjna> = serde_json::from_str(json)?;
                for r in &records {
                    conn.execute(
                        "INSERT OR REPLACE INTO komorki_organizacyjne (id, nazwa) VALUES (?1, ?2)",
                        rusqlite::params![r.id, r.nazwa],
                    )?;
                }
                records.len()
            }
        };
        Ok((count, warnings))
    }

    fn check_codes<'a>(&self, codes: impl Iterator<Item = &'a str>, warnings: &mut Vec<String>) {
        let Some(width) = self.code_width() else {
            return;
        };
        let Ok(re) = Regex::new(&format!(r"^\d{{{width}}}$")) else {
            return;
        };
        for kod in codes {
            if !re.is_match(kod) {
                warnings.push(format!("{}: kod '{}' is not {} digits", self.name(), kod, width));
            }
        }
    }
}

pub struct LoadOutcome {
    pub records: usize,
    pub skipped: bool,
    pub warnings: Vec<String>,
}

/// Load a JSON fixture file into a catalog. A file already loaded into the
/// same catalog (by checksum) is skipped rather than re-imported.
pub fn load_fixture(conn: &Connection, kind: CatalogKind, path: &Path) -> Result<LoadOutcome> {
    let data = std::fs::read(path)?;
    let checksum = hex::encode(Sha256::digest(&data));

    let already = conn
        .prepare("SELECT 1 FROM catalog_loads WHERE kind = ?1 AND checksum = ?2")?
        .exists(rusqlite::params![kind.key(), checksum])?;
    if already {
        return Ok(LoadOutcome { records: 0, skipped: true, warnings: Vec::new() });
    }

    let json = String::from_utf8_lossy(&data);
    let (records, warnings) = kind.insert_all(conn, &json)?;

    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    conn.execute(
        "INSERT INTO catalog_loads (filename, kind, checksum, record_count) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![filename, kind.key(), checksum, records as i64],
    )?;

    Ok(LoadOutcome { records, skipped: false, warnings })
}
