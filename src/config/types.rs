use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 單次 ffmpeg 呼叫最多擷取的縮圖數量
pub const DEFAULT_BATCH_SIZE: usize = 40;

pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 6] = ["mkv", "avi", "mp4", "mov", "webm", "wmv"];

/// 使用者設定（可由 settings.json 覆寫）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub batch_size: usize,
    pub video_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            batch_size: DEFAULT_BATCH_SIZE,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch_size 必須大於 0");
        }
        if self.video_extensions.is_empty() {
            bail!("video_extensions 不可為空");
        }
        Ok(())
    }

    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect()
    }

    /// 副檔名比對不分大小寫
    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&ext.to_lowercase()))
    }
}

/// 一次批次擷取的執行參數
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 影片來源資料夾
    pub directory: PathBuf,
    /// 截圖間隔（秒）
    pub interval: u32,
    /// 輸出資料夾；相對路徑以來源資料夾為基準
    pub output_directory: PathBuf,
    /// 同時處理的影片數上限
    pub concurrency: usize,
}

impl RunOptions {
    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            bail!("截圖間隔必須大於 0 秒");
        }
        if self.concurrency == 0 {
            bail!("並行數必須大於 0");
        }
        Ok(())
    }
}
