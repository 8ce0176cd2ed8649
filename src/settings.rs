use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkarbnikError};

pub const ROLE_KEYS: &[&str] = &["kierownictwo", "bbf", "ko"];

/// Settings plus the explicit editing session: who is working, in which role,
/// on behalf of which organizational unit. Set at login, cleared at logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub rola: String,
    #[serde(default)]
    pub komorka_organizacyjna_id: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            user_name: String::new(),
            rola: String::new(),
            komorka_organizacyjna_id: None,
        }
    }
}

impl Settings {
    pub fn has_session(&self) -> bool {
        !self.user_name.is_empty() && self.komorka_organizacyjna_id.is_some()
    }

    pub fn clear_session(&mut self) {
        self.user_name.clear();
        self.rola.clear();
        self.komorka_organizacyjna_id = None;
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("skarbnik")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("skarbnik")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SkarbnikError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn db_path() -> PathBuf {
    get_data_dir().join("skarbnik.db")
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            user_name: "Beata Fąk".to_string(),
            rola: "bbf".to_string(),
            komorka_organizacyjna_id: Some(2),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.user_name, "Beata Fąk");
        assert_eq!(loaded.rola, "bbf");
        assert_eq!(loaded.komorka_organizacyjna_id, Some(2));
    }

    #[test]
    fn test_defaults_have_no_session() {
        let s = Settings::default();
        assert!(!s.has_session());
        assert!(s.rola.is_empty());
        assert!(!s.data_dir.is_empty());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test", "user_name": "Joanna Kowalska"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.user_name, "Joanna Kowalska");
        assert!(s.komorka_organizacyjna_id.is_none());
    }

    #[test]
    fn test_clear_session() {
        let mut s = Settings {
            data_dir: "/tmp".into(),
            user_name: "Karolina Olycz".into(),
            rola: "ko".into(),
            komorka_organizacyjna_id: Some(1),
        };
        assert!(s.has_session());
        s.clear_session();
        assert!(!s.has_session());
        assert_eq!(s.data_dir, "/tmp");
    }
}
