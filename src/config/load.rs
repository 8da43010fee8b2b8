use crate::config::types::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl Settings {
    /// 讀取設定檔；檔案不存在時使用預設值
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        settings.validate()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BATCH_SIZE;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(settings.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(settings.ffmpeg_path, Path::new("ffmpeg"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "ffmpeg_path": "/opt/ffmpeg/bin/ffmpeg", "batch_size": 10 }"#)
            .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.ffmpeg_path, Path::new("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(settings.ffprobe_path, Path::new("ffprobe"));
        assert_eq!(settings.batch_size, 10);
        assert_eq!(settings.video_extensions.len(), 6);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(Settings::load(&path).is_err());

        fs::write(&path, r#"{ "batch_size": 0 }"#).unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
