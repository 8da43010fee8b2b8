//! 影片縮圖批次擷取元件
//!
//! 流程：
//! A. 以 ffprobe 取得影片長度
//! B. 依間隔產生時間點並分批
//! C. 每批以單一 ffmpeg 程序擷取
//! D. 多個影片以固定上限並行處理

mod command_builder;
mod duration_probe;
mod error;
mod file_extractor;
mod main;
mod timestamp_planner;

pub use command_builder::{
    THUMBNAIL_EXTENSION, build_extraction_args, format_timestamp, has_hours, thumbnail_path,
};
pub use duration_probe::{build_probe_args, parse_duration, probe_duration};
pub use error::ExtractError;
pub use file_extractor::{ExtractionJob, ExtractionResult, ExtractionStats, FileExtractor};
pub use main::{BatchOrchestrator, RunSummary, print_summary};
pub use timestamp_planner::{into_batches, plan_timestamps};
