use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkarbnikError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} cannot be null")]
    NullField(String),

    #[error("Row not found: {0}")]
    RowNotFound(i64),

    #[error("Budget year not found: {0}")]
    SegmentNotFound(i64),

    #[error("No active session. Run `skarbnik session login` first")]
    NoSession,

    #[error("Row failed validation with {0} error(s)")]
    Validation(usize),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SkarbnikError>;
