use crate::config::{DEFAULT_SETTINGS_FILE, RunOptions, Settings};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "video_thumbnail_extractor",
    version,
    about = "從資料夾中的影片依固定間隔擷取縮圖"
)]
pub struct Cli {
    /// 影片來源資料夾
    pub path: PathBuf,

    /// 截圖間隔（秒）
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub interval: u32,

    /// 縮圖輸出資料夾（相對路徑以來源資料夾為基準）
    #[arg(long, default_value = "Thumbnails")]
    pub output_directory: PathBuf,

    /// 同時處理的影片數上限
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// ffmpeg 執行檔路徑
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe 執行檔路徑
    #[arg(long)]
    pub ffprobe: Option<PathBuf>,

    /// 單次 ffmpeg 呼叫最多擷取的縮圖數量
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_size: Option<u32>,

    /// 設定檔路徑
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// 不顯示進度列
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            directory: self.path.clone(),
            interval: self.interval,
            output_directory: self.output_directory.clone(),
            concurrency: self.threads as usize,
        }
    }

    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.ffmpeg_path.clone_from(ffmpeg);
        }
        if let Some(ffprobe) = &self.ffprobe {
            settings.ffprobe_path.clone_from(ffprobe);
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size as usize;
        }
    }
}
