use serde::{Deserialize, Serialize};

/// Część budżetowa: the budget part a row is planned under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CzescBudzetowa {
    pub kod: String,
    pub nazwa: String,
}

/// Dział, the top-level budget classification unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dzial {
    pub kod: String,
    pub nazwa: String,
    #[serde(rename = "PKD", default)]
    pub pkd: String,
}

/// Rozdział, second-level classification; `dzial` is the owning dział's code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rozdzial {
    pub kod: String,
    pub nazwa: String,
    pub dzial: String,
}

/// Paragraf, the leaf-level expense-type code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraf {
    pub kod: String,
    pub tresc: String,
}

/// Either an explicit set of paragraph codes, or a sentinel string marking a
/// family of codes with a dynamic final digit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paragrafy {
    Lista(Vec<String>),
    Dynamiczne(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrupaWydatkow {
    pub id: i64,
    pub nazwa: String,
    pub paragrafy: Paragrafy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZrodloFinansowania {
    pub kod: String,
    pub nazwa: String,
    #[serde(default)]
    pub opis: Option<String>,
}

/// Kod zadaniowy, task-based budget coding. Many codes share one `kod_krotki`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KodZadaniowy {
    pub kod: String,
    pub kod_krotki: String,
    pub nazwa: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KomorkaOrganizacyjna {
    pub id: i64,
    pub nazwa: String,
}

/// One future year's figures attached to a budget row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocznySegment {
    pub rok: i32,
    pub potrzeba: f64,
    pub limit: f64,
    pub kwota_umowy: f64,
    pub numer_umowy: String,
}

impl RocznySegment {
    pub fn empty(rok: i32) -> Self {
        Self {
            rok,
            potrzeba: 0.0,
            limit: 0.0,
            kwota_umowy: 0.0,
            numer_umowy: String::new(),
        }
    }
}

/// The four consecutive planning years starting the year after `base`.
pub fn upcoming_years(base: i32) -> [i32; 4] {
    [base + 1, base + 2, base + 3, base + 4]
}

/// A row under construction. Selections are stored as catalog identifiers and
/// resolved against the catalogs at validation time, never denormalized.
#[derive(Debug, Clone, Default)]
pub struct CandidateRow {
    pub czesc_budzetowa: Option<String>,
    pub dzial: Option<String>,
    pub rozdzial: Option<String>,
    pub paragraf: Option<String>,
    pub zrodlo_finansowania: Option<String>,
    pub grupa_wydatkow: Option<i64>,
    pub kod_zadaniowy: Option<String>,
    pub nazwa_programu: Option<String>,
    pub plan_wi: Option<String>,
    pub uzasadnienie: Option<String>,
    pub segmenty: Vec<RocznySegment>,
}

impl CandidateRow {
    /// An empty row carrying the 4 planning-year segments for `base_year`.
    pub fn new(base_year: i32) -> Self {
        Self {
            segmenty: upcoming_years(base_year)
                .iter()
                .map(|&rok| RocznySegment::empty(rok))
                .collect(),
            ..Default::default()
        }
    }
}

/// Scalar cell value exchanged with the store: the patch payload's value type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    #[allow(dead_code)]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Int(i) => serde_json::Value::from(*i),
            CellValue::Float(f) => serde_json::Value::from(*f),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
        }
    }
}
