use crate::config::types::{MAX_RECENT_PATHS, SETTINGS_FILE_NAME, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    save_settings_to(Path::new(SETTINGS_FILE_NAME), settings)
}

pub fn save_settings_to(path: &Path, settings: &UserSettings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的路徑
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_path(settings: &mut UserSettings, path: &str) {
    settings.recent_paths.retain(|p| p != path);
    settings.recent_paths.insert(0, path.to_string());
    settings.recent_paths.truncate(MAX_RECENT_PATHS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load::load_settings_from;
    use crate::config::types::Language;
    use tempfile::TempDir;

    #[test]
    fn test_add_recent_path_moves_to_front() {
        let mut settings = UserSettings::default();
        add_recent_path(&mut settings, "/a");
        add_recent_path(&mut settings, "/b");
        add_recent_path(&mut settings, "/a");

        assert_eq!(settings.recent_paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_add_recent_path_is_capped() {
        let mut settings = UserSettings::default();
        for i in 0..(MAX_RECENT_PATHS + 5) {
            add_recent_path(&mut settings, &format!("/dir{i}"));
        }

        assert_eq!(settings.recent_paths.len(), MAX_RECENT_PATHS);
        assert_eq!(settings.recent_paths[0], format!("/dir{}", MAX_RECENT_PATHS + 4));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = UserSettings::default();
        settings.language = Language::ZhTw;
        settings.workers = 3;
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }
}
