use super::command_builder::{build_extraction_args, has_hours};
use super::duration_probe::probe_duration;
use super::error::ExtractError;
use super::timestamp_planner::{into_batches, plan_timestamps};
use crate::config::Settings;
use crate::signal::CancelToken;
use crate::tools::ProcessRunner;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 單一影片的擷取工作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    pub source_path: PathBuf,
    /// 輸出檔名前綴（輸出資料夾 + 原始檔名主幹）
    pub output_base_name: PathBuf,
    pub interval: u32,
}

impl ExtractionJob {
    #[must_use]
    pub fn new(source_path: &Path, output_directory: &Path, interval: u32) -> Self {
        let file_stem = source_path.file_stem().unwrap_or(source_path.as_os_str());
        Self {
            source_path: source_path.to_path_buf(),
            output_base_name: output_directory.join(file_stem),
            interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    pub duration: Duration,
    pub thumbnails: usize,
    pub batches: usize,
}

/// 單一影片的擷取結果
#[derive(Debug)]
pub struct ExtractionResult {
    pub source_path: PathBuf,
    pub outcome: Result<ExtractionStats, ExtractError>,
    pub elapsed: Duration,
}

impl ExtractionResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// 依序執行單一影片的所有批次，任一批次失敗即停止該影片
pub struct FileExtractor {
    runner: Arc<dyn ProcessRunner>,
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
    batch_size: usize,
}

impl FileExtractor {
    #[must_use]
    pub fn new(runner: Arc<dyn ProcessRunner>, settings: &Settings) -> Self {
        Self {
            runner,
            ffmpeg_path: settings.ffmpeg_path.clone(),
            ffprobe_path: settings.ffprobe_path.clone(),
            batch_size: settings.batch_size,
        }
    }

    /// 每個影片使用自己的子取消標記，結束後即丟棄，
    /// 之後的中斷信號不會影響已完成的影片。
    pub fn extract(&self, job: &ExtractionJob, shutdown_signal: &CancelToken) -> ExtractionResult {
        let started = Instant::now();
        let file_token = shutdown_signal.child();

        info!("開始擷取: {}", job.source_path.display());
        let outcome = self.run_batches(job, &file_token);
        drop(file_token);

        ExtractionResult {
            source_path: job.source_path.clone(),
            outcome,
            elapsed: started.elapsed(),
        }
    }

    fn run_batches(
        &self,
        job: &ExtractionJob,
        cancel: &CancelToken,
    ) -> Result<ExtractionStats, ExtractError> {
        // 中斷後才輪到的影片不再啟動任何外部程序
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        let duration =
            probe_duration(self.runner.as_ref(), &self.ffprobe_path, &job.source_path, cancel)?;

        let timestamps = plan_timestamps(duration, job.interval);
        let batches = into_batches(&timestamps, self.batch_size);
        let hours = has_hours(duration);

        debug!(
            "{}: 長度 {:.1}s, {} 個時間點, {} 批",
            job.source_path.display(),
            duration.as_secs_f64(),
            timestamps.len(),
            batches.len()
        );

        for (batch_index, batch) in batches.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(ExtractError::Cancelled);
            }

            let args =
                build_extraction_args(batch, &job.source_path, &job.output_base_name, hours);
            debug!(
                "執行批次擷取: {} {}",
                self.ffmpeg_path.display(),
                args.iter()
                    .map(|a| a.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            );

            let output = self.runner.run(&self.ffmpeg_path, &args, cancel)?;
            if !output.success() {
                let last_error_line = output.last_error_line().map_or_else(
                    || format!("ffmpeg 結束碼 {:?}", output.exit_code),
                    ToString::to_string,
                );
                return Err(ExtractError::ExtractionFailed {
                    batch_index,
                    timestamps: batch.to_vec(),
                    last_error_line,
                });
            }
        }

        Ok(ExtractionStats {
            duration,
            thumbnails: timestamps.len(),
            batches: batches.len(),
        })
    }
}
