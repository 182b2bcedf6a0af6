use crate::config::types::{Config, SETTINGS_FILE_NAME, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

impl Config {
    /// 從目前工作目錄的 settings.json 載入，讀取失敗時使用預設值
    #[must_use]
    pub fn new() -> Self {
        let settings = load_settings_from(Path::new(SETTINGS_FILE_NAME)).unwrap_or_else(|e| {
            warn!("無法載入設定，使用預設值: {e:#}");
            UserSettings::default()
        });
        Self { settings }
    }
}

pub fn load_settings_from(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(UserSettings::default());
    }

    let settings: UserSettings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}
