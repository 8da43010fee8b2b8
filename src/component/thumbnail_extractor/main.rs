use super::error::ExtractError;
use super::file_extractor::{ExtractionJob, ExtractionResult, FileExtractor};
use crate::config::{RunOptions, Settings};
use crate::signal::CancelToken;
use crate::tools::{
    ProcessRunner, prepare_output_directory, scan_video_files, validate_directory_exists,
};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 批次擷取摘要
#[derive(Debug)]
pub struct RunSummary {
    pub output_directory: PathBuf,
    /// 依檔名排序，與完成順序無關
    pub results: Vec<ExtractionResult>,
    pub elapsed: Duration,
}

impl RunSummary {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// 批次縮圖擷取器
///
/// 掃描資料夾中的影片，以固定大小的執行緒池同時處理多個影片；
/// 單一影片失敗不會中止其他影片。
pub struct BatchOrchestrator {
    settings: Settings,
    runner: Arc<dyn ProcessRunner>,
    shutdown_signal: CancelToken,
    show_progress: bool,
}

impl BatchOrchestrator {
    #[must_use]
    pub fn new(
        settings: Settings,
        runner: Arc<dyn ProcessRunner>,
        shutdown_signal: CancelToken,
    ) -> Self {
        Self {
            settings,
            runner,
            shutdown_signal,
            show_progress: false,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        options.validate()?;
        self.settings.validate()?;
        validate_directory_exists(&options.directory)?;

        let started = Instant::now();

        let output_directory =
            prepare_output_directory(&options.output_directory, &options.directory)?;
        let files = scan_video_files(&options.directory, &self.settings)?;

        info!(
            "開始從 {} 個檔案擷取縮圖，輸出至 {}",
            files.len(),
            output_directory.display()
        );

        let jobs: Vec<ExtractionJob> = files
            .iter()
            .map(|file| ExtractionJob::new(file, &output_directory, options.interval))
            .collect();

        let pool = ThreadPoolBuilder::new()
            .num_threads(options.concurrency)
            .thread_name(|index| format!("extractor-{index}"))
            .build()
            .context("無法建立擷取執行緒池")?;

        let extractor = FileExtractor::new(Arc::clone(&self.runner), &self.settings);
        let progress_bar = self.create_progress_bar(jobs.len());

        let results: Vec<ExtractionResult> = pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    let result = extractor.extract(job, &self.shutdown_signal);
                    Self::log_result(&result);
                    progress_bar.inc(1);
                    result
                })
                .collect()
        });

        progress_bar.finish_and_clear();

        let elapsed = started.elapsed();
        info!("全部完成，耗時 {elapsed:.2?}");

        Ok(RunSummary {
            output_directory,
            results,
            elapsed,
        })
    }

    fn create_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.set_message("擷取縮圖中...");
        progress_bar
    }

    fn log_result(result: &ExtractionResult) {
        let path = result.source_path.display();
        match &result.outcome {
            Ok(stats) => info!(
                "完成擷取 {path}: {} 張縮圖, {} 批, 耗時 {:.2?}",
                stats.thumbnails, stats.batches, result.elapsed
            ),
            Err(ExtractError::Cancelled) => warn!("已取消 {path}"),
            Err(e) => error!("擷取失敗 {path}: {e}"),
        }
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("=== 縮圖擷取摘要 ===").cyan().bold());
    println!("  輸出資料夾: {}", summary.output_directory.display());
    println!("  總計: {} 個影片", summary.results.len());
    println!("  成功: {} 個", style(summary.succeeded()).green());

    if summary.failed() > 0 {
        println!("  失敗: {} 個", style(summary.failed()).red());
        for result in summary.results.iter().filter(|r| !r.is_success()) {
            if let Err(e) = &result.outcome {
                println!(
                    "    {} {}: {}",
                    style("✗").red(),
                    result.source_path.display(),
                    e
                );
            }
        }
    }

    println!("  耗時: {:.2?}", summary.elapsed);

    info!(
        "縮圖擷取完成 - 成功: {}, 失敗: {}",
        summary.succeeded(),
        summary.failed()
    );
}
