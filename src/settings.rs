use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClientbookError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the workbook: an .xlsx file or a directory of per-sheet CSVs.
    #[serde(default)]
    pub workbook: String,
    #[serde(default = "default_summary_sheet")]
    pub summary_sheet: String,
    #[serde(default = "default_history_sheet")]
    pub history_sheet: String,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_summary_sheet() -> String {
    "요약".to_string()
}

fn default_history_sheet() -> String {
    "거래내역".to_string()
}

fn default_cache_ttl() -> u64 {
    120
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: String::new(),
            summary_sheet: default_summary_sheet(),
            history_sheet: default_history_sheet(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clientbook")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
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
        .map_err(|e| ClientbookError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Resolve the workbook path for this run: the --workbook flag wins, then
/// the configured path. An unconfigured workbook is a setup error.
pub fn resolve_workbook(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        return Ok(PathBuf::from(shellexpand_path(p)));
    }
    let settings = load_settings();
    if settings.workbook.is_empty() {
        return Err(ClientbookError::Settings(
            "no workbook configured; run `clientbook init <path>`".to_string(),
        ));
    }
    Ok(PathBuf::from(shellexpand_path(&settings.workbook)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            workbook: "/tmp/book.xlsx".to_string(),
            summary_sheet: "summary".to_string(),
            history_sheet: "history".to_string(),
            cache_ttl_secs: 30,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let loaded: Settings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.workbook, "/tmp/book.xlsx");
        assert_eq!(loaded.cache_ttl_secs, 30);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.workbook.is_empty());
        assert_eq!(s.summary_sheet, "요약");
        assert_eq!(s.history_sheet, "거래내역");
        assert_eq!(s.cache_ttl_secs, 120);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"workbook": "/tmp/book.xlsx"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.workbook, "/tmp/book.xlsx");
        assert_eq!(s.summary_sheet, "요약");
        assert_eq!(s.cache_ttl_secs, 120);
    }

    #[test]
    fn test_resolve_workbook_prefers_flag() {
        let path = resolve_workbook(Some("/tmp/override.xlsx")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/override.xlsx"));
    }
}
