//! Validates a candidate budget row before submission: required fields plus
//! the cross-referencing rules between classification codes. All rules run
//! independently and their errors are unioned, so the caller can surface
//! every offending field at once.

use std::collections::BTreeMap;

use crate::catalog::Catalogs;
use crate::models::{
    CandidateRow, CzescBudzetowa, Dzial, GrupaWydatkow, KodZadaniowy, Paragraf, Paragrafy,
    RocznySegment, Rozdzial, ZrodloFinansowania,
};
use crate::store::CreatePayload;

/// Funding-source codes accepted for expense groups with a dynamic final digit.
pub const DYNAMIC_GROUP_SOURCES: &[&str] = &["1", "2", "5", "6", "7", "8", "9"];

pub const MSG_REQUIRED: &str = "Pole jest wymagane.";
pub const MSG_OUT_OF_CATALOG: &str = "Wartość spoza słownika.";
pub const MSG_ROZDZIAL_DZIAL: &str = "Rozdział nie należy do wybranego działu.";
pub const MSG_PARAGRAF_GRUPA: &str = "Paragraf nie należy do wybranej grupy wydatków.";
pub const MSG_ZRODLO_GRUPA: &str = "Źródło finansowania nie jest zgodne z wybraną grupą wydatków.";

/// Validation errors keyed by grid field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[allow(dead_code)]
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.0 {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// A row that passed validation, with every selection resolved to its full
/// catalog record. The create payload is built from this, never from the
/// candidate directly.
#[derive(Debug, Clone)]
pub struct ValidatedRow {
    pub czesc_budzetowa: CzescBudzetowa,
    pub dzial: Dzial,
    pub rozdzial: Rozdzial,
    pub paragraf: Paragraf,
    pub zrodlo_finansowania: ZrodloFinansowania,
    pub grupa_wydatkow: GrupaWydatkow,
    pub kod_zadaniowy: KodZadaniowy,
    pub nazwa_programu: String,
    pub plan_wi: String,
    pub uzasadnienie: Option<String>,
    pub segmenty: Vec<RocznySegment>,
}

impl ValidatedRow {
    /// The task name is derived from the selected task code; the Plan WI text
    /// lands in the `budzet` field.
    pub fn to_payload(&self, komorka_organizacyjna_id: i64) -> CreatePayload {
        CreatePayload {
            nazwa_projektu: Some(self.nazwa_programu.clone()),
            nazwa_zadania: Some(self.kod_zadaniowy.nazwa.clone()),
            szczegolowe_uzasadnienie_realizacji: self.uzasadnienie.clone(),
            budzet: Some(self.plan_wi.clone()),
            czesc_budzetowa_kod: self.czesc_budzetowa.kod.clone(),
            dzial_kod: self.dzial.kod.clone(),
            rozdzial_kod: self.rozdzial.kod.clone(),
            paragraf_kod: self.paragraf.kod.clone(),
            zrodlo_finansowania_kod: self.zrodlo_finansowania.kod.clone(),
            grupa_wydatkow_id: self.grupa_wydatkow.id,
            komorka_organizacyjna_id,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(s) => s.trim().is_empty(),
    }
}

fn resolve<T>(
    errors: &mut FieldErrors,
    field: &str,
    selection: &Option<String>,
    find: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let kod = selection.as_deref()?.trim();
    if kod.is_empty() {
        return None;
    }
    match find(kod) {
        Some(record) => Some(record),
        None => {
            errors.add(field, MSG_OUT_OF_CATALOG);
            None
        }
    }
}

/// Validate a candidate row against the catalogs.
///
/// Pure over its inputs: no I/O, no side effects, never panics. Failures come
/// back as the full field-keyed error map, never just the first violation.
pub fn validate(row: &CandidateRow, catalogs: &Catalogs) -> Result<ValidatedRow, FieldErrors> {
    let mut errors = FieldErrors::default();

    // Required-field pass: one entry per missing field.
    if is_blank(&row.czesc_budzetowa) {
        errors.add("czescBudzetowa", MSG_REQUIRED);
    }
    if is_blank(&row.dzial) {
        errors.add("dzial", MSG_REQUIRED);
    }
    if is_blank(&row.rozdzial) {
        errors.add("rozdzial", MSG_REQUIRED);
    }
    if is_blank(&row.paragraf) {
        errors.add("paragraf", MSG_REQUIRED);
    }
    if is_blank(&row.zrodlo_finansowania) {
        errors.add("zrodloFinansowania", MSG_REQUIRED);
    }
    if row.grupa_wydatkow.is_none() {
        errors.add("grupaWydatkow", MSG_REQUIRED);
    }
    if is_blank(&row.kod_zadaniowy) {
        errors.add("kodZadaniowy", MSG_REQUIRED);
    }
    if is_blank(&row.nazwa_programu) {
        errors.add("nazwaProgramu", MSG_REQUIRED);
    }
    if is_blank(&row.plan_wi) {
        errors.add("planWI", MSG_REQUIRED);
    }

    // Resolution pass: selections are identifiers, looked up here. A code
    // outside its catalog is an error on that field; cross-field rules only
    // run over resolved records.
    let czesc = resolve(&mut errors, "czescBudzetowa", &row.czesc_budzetowa, |k| {
        catalogs.find_czesc(k).cloned()
    });
    let dzial = resolve(&mut errors, "dzial", &row.dzial, |k| {
        catalogs.find_dzial(k).cloned()
    });
    let rozdzial = resolve(&mut errors, "rozdzial", &row.rozdzial, |k| {
        catalogs.find_rozdzial(k).cloned()
    });
    let paragraf = resolve(&mut errors, "paragraf", &row.paragraf, |k| {
        catalogs.find_paragraf(k).cloned()
    });
    let zrodlo = resolve(&mut errors, "zrodloFinansowania", &row.zrodlo_finansowania, |k| {
        catalogs.find_zrodlo(k).cloned()
    });
    let grupa = match row.grupa_wydatkow {
        None => None,
        Some(id) => match catalogs.find_grupa(id) {
            Some(g) => Some(g.clone()),
            None => {
                errors.add("grupaWydatkow", MSG_OUT_OF_CATALOG);
                None
            }
        },
    };
    let zadanie = resolve(&mut errors, "kodZadaniowy", &row.kod_zadaniowy, |k| {
        catalogs.find_kod_zadaniowy(k).cloned()
    });

    // Rozdział must belong to the selected dział.
    if let (Some(dz), Some(rz)) = (&dzial, &rozdzial) {
        if rz.dzial != dz.kod {
            errors.add("rozdzial", MSG_ROZDZIAL_DZIAL);
        }
    }

    // Group consistency, two branches: explicit groups constrain the
    // paragraph, dynamic groups constrain the funding source.
    if let (Some(par), Some(gr), Some(zr)) = (&paragraf, &grupa, &zrodlo) {
        match &gr.paragrafy {
            Paragrafy::Lista(kody) => {
                if !kody.contains(&par.kod) {
                    errors.add("paragraf", MSG_PARAGRAF_GRUPA);
                }
            }
            Paragrafy::Dynamiczne(_) => {
                if !DYNAMIC_GROUP_SOURCES.contains(&zr.kod.as_str()) {
                    errors.add("zrodloFinansowania", MSG_ZRODLO_GRUPA);
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match (czesc, dzial, rozdzial, paragraf, zrodlo, grupa, zadanie) {
        (Some(czesc), Some(dzial), Some(rozdzial), Some(paragraf), Some(zrodlo), Some(grupa), Some(zadanie)) => {
            Ok(ValidatedRow {
                czesc_budzetowa: czesc,
                dzial,
                rozdzial,
                paragraf,
                zrodlo_finansowania: zrodlo,
                grupa_wydatkow: grupa,
                kod_zadaniowy: zadanie,
                nazwa_programu: row.nazwa_programu.clone().unwrap_or_default(),
                plan_wi: row.plan_wi.clone().unwrap_or_default(),
                uzasadnienie: row.uzasadnienie.clone(),
                segmenty: row.segmenty.clone(),
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KomorkaOrganizacyjna;

    fn catalogs() -> Catalogs {
        Catalogs {
            czesci_budzetowe: vec![CzescBudzetowa {
                kod: "27".into(),
                nazwa: "Informatyzacja".into(),
            }],
            dzialy: vec![
                Dzial { kod: "700".into(), nazwa: "Gospodarka mieszkaniowa".into(), pkd: "".into() },
                Dzial { kod: "720".into(), nazwa: "Informatyka".into(), pkd: "".into() },
            ],
            rozdzialy: vec![
                Rozdzial {
                    kod: "70001".into(),
                    nazwa: "Zakłady gospodarki mieszkaniowej".into(),
                    dzial: "700".into(),
                },
                Rozdzial {
                    kod: "72095".into(),
                    nazwa: "Pozostała działalność".into(),
                    dzial: "720".into(),
                },
            ],
            paragrafy: vec![
                Paragraf { kod: "4210".into(), tresc: "Zakup materiałów i wyposażenia".into() },
                Paragraf { kod: "4220".into(), tresc: "Zakup środków żywności".into() },
                Paragraf { kod: "4300".into(), tresc: "Zakup usług pozostałych".into() },
                Paragraf { kod: "6050".into(), tresc: "Wydatki inwestycyjne jednostek budżetowych".into() },
            ],
            zrodla_finansowania: vec![
                ZrodloFinansowania { kod: "1".into(), nazwa: "Budżet państwa".into(), opis: None },
                ZrodloFinansowania { kod: "2".into(), nazwa: "Budżet środków europejskich".into(), opis: None },
                ZrodloFinansowania { kod: "3".into(), nazwa: "Państwowe fundusze celowe".into(), opis: None },
                ZrodloFinansowania { kod: "4".into(), nazwa: "Środki własne jednostek".into(), opis: None },
            ],
            grupy_wydatkow: vec![
                GrupaWydatkow {
                    id: 3,
                    nazwa: "Rzeczowe".into(),
                    paragrafy: Paragrafy::Lista(vec!["4210".into(), "4220".into()]),
                },
                GrupaWydatkow {
                    id: 4,
                    nazwa: "Wydatki majątkowe".into(),
                    paragrafy: Paragrafy::Dynamiczne("605x".into()),
                },
            ],
            kody_zadaniowe: vec![KodZadaniowy {
                kod: "1.1.1.1".into(),
                kod_krotki: "1.1".into(),
                nazwa: "Obsługa urzędu Prezydenta RP".into(),
            }],
            komorki_organizacyjne: vec![KomorkaOrganizacyjna {
                id: 1,
                nazwa: "Biuro Budżetowo-Finansowe".into(),
            }],
        }
    }

    fn full_row() -> CandidateRow {
        let mut row = CandidateRow::new(2025);
        row.czesc_budzetowa = Some("27".into());
        row.dzial = Some("700".into());
        row.rozdzial = Some("70001".into());
        row.paragraf = Some("4210".into());
        row.zrodlo_finansowania = Some("1".into());
        row.grupa_wydatkow = Some(3);
        row.kod_zadaniowy = Some("1.1.1.1".into());
        row.nazwa_programu = Some("Program mieszkaniowy".into());
        row.plan_wi = Some("WI/2026/04".into());
        row
    }

    #[test]
    fn test_fully_populated_consistent_row_passes() {
        let valid = validate(&full_row(), &catalogs()).unwrap();
        assert_eq!(valid.dzial.kod, "700");
        assert_eq!(valid.rozdzial.dzial, "700");
        assert_eq!(valid.kod_zadaniowy.nazwa, "Obsługa urzędu Prezydenta RP");
        assert_eq!(valid.segmenty.len(), 4);
    }

    #[test]
    fn test_empty_row_reports_every_required_field() {
        let errors = validate(&CandidateRow::new(2025), &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 9);
        for field in [
            "czescBudzetowa",
            "dzial",
            "rozdzial",
            "paragraf",
            "zrodloFinansowania",
            "grupaWydatkow",
            "kodZadaniowy",
            "nazwaProgramu",
            "planWI",
        ] {
            assert_eq!(
                errors.get(field).map(|m| m[0].as_str()),
                Some(MSG_REQUIRED),
                "missing required error on {field}"
            );
        }
    }

    #[test]
    fn test_one_error_entry_per_empty_field() {
        let mut row = full_row();
        row.dzial = None;
        row.nazwa_programu = Some("  ".into());
        row.plan_wi = Some(String::new());
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("dzial").is_some());
        assert!(errors.get("nazwaProgramu").is_some());
        assert!(errors.get("planWI").is_some());
    }

    #[test]
    fn test_rozdzial_outside_dzial_reports_only_rozdzial() {
        let mut row = full_row();
        row.dzial = Some("720".into());
        row.rozdzial = Some("70001".into());
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("rozdzial").map(|m| m[0].as_str()), Some(MSG_ROZDZIAL_DZIAL));
        assert!(errors.get("dzial").is_none());
    }

    #[test]
    fn test_paragraf_outside_explicit_group() {
        let mut row = full_row();
        row.paragraf = Some("4300".into());
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.get("paragraf").map(|m| m[0].as_str()), Some(MSG_PARAGRAF_GRUPA));

        // Switching back to a member of the group clears exactly that error.
        row.paragraf = Some("4220".into());
        assert!(validate(&row, &catalogs()).is_ok());
    }

    #[test]
    fn test_dynamic_group_checks_funding_source() {
        let mut row = full_row();
        row.grupa_wydatkow = Some(4);
        row.paragraf = Some("6050".into());
        row.zrodlo_finansowania = Some("3".into());
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("zrodloFinansowania").map(|m| m[0].as_str()), Some(MSG_ZRODLO_GRUPA));

        row.zrodlo_finansowania = Some("2".into());
        assert!(validate(&row, &catalogs()).is_ok());
    }

    #[test]
    fn test_group_rule_skipped_when_member_missing() {
        // Paragraph absent: only the required-field error, no group error.
        let mut row = full_row();
        row.paragraf = None;
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("paragraf").map(|m| m[0].as_str()), Some(MSG_REQUIRED));
    }

    #[test]
    fn test_unknown_code_is_out_of_catalog() {
        let mut row = full_row();
        row.dzial = Some("999".into());
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.get("dzial").map(|m| m[0].as_str()), Some(MSG_OUT_OF_CATALOG));
    }

    #[test]
    fn test_errors_union_across_rules() {
        let mut row = full_row();
        row.rozdzial = Some("72095".into()); // wrong dział
        row.paragraf = Some("4300".into()); // outside group
        row.nazwa_programu = None; // missing
        let errors = validate(&row, &catalogs()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("rozdzial").is_some());
        assert!(errors.get("paragraf").is_some());
        assert!(errors.get("nazwaProgramu").is_some());
    }

    #[test]
    fn test_payload_derives_task_name_and_budget_text() {
        let valid = validate(&full_row(), &catalogs()).unwrap();
        let payload = valid.to_payload(1);
        assert_eq!(payload.nazwa_zadania.as_deref(), Some("Obsługa urzędu Prezydenta RP"));
        assert_eq!(payload.budzet.as_deref(), Some("WI/2026/04"));
        assert_eq!(payload.dzial_kod, "700");
        assert_eq!(payload.grupa_wydatkow_id, 3);
        assert_eq!(payload.komorka_organizacyjna_id, 1);
    }
}
