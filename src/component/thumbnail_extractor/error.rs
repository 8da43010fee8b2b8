use crate::tools::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

/// 單一影片的擷取錯誤；只影響該檔案，不會中止整批作業
#[derive(Debug, Error)]
pub enum ExtractError {
    /// ffprobe 輸出中沒有 `duration=` 這一行
    #[error("無法取得影片長度: {path}")]
    DurationUnavailable { path: PathBuf },

    #[error("無法解析影片長度: {value:?}")]
    MalformedDuration { value: String },

    /// ffmpeg 回傳非零結束碼，後續批次不再執行
    #[error("第 {} 批擷取失敗 ({}s..{}s): {last_error_line}",
        .batch_index + 1,
        .timestamps.first().copied().unwrap_or_default(),
        .timestamps.last().copied().unwrap_or_default())]
    ExtractionFailed {
        batch_index: usize,
        timestamps: Vec<u32>,
        last_error_line: String,
    },

    #[error(transparent)]
    Process(ProcessError),

    #[error("擷取已取消")]
    Cancelled,
}

impl From<ProcessError> for ExtractError {
    fn from(error: ProcessError) -> Self {
        match error {
            ProcessError::Cancelled { .. } => Self::Cancelled,
            other => Self::Process(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_process_cancel_maps_to_cancelled() {
        let error: ExtractError = ProcessError::Cancelled {
            program: "ffmpeg".to_string(),
        }
        .into();
        assert!(matches!(error, ExtractError::Cancelled));

        let error: ExtractError = ProcessError::Launch {
            program: "ffmpeg".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
        .into();
        assert!(matches!(error, ExtractError::Process(_)));
    }

    #[test]
    fn test_extraction_failed_message() {
        let error = ExtractError::ExtractionFailed {
            batch_index: 1,
            timestamps: vec![205, 210],
            last_error_line: "Conversion failed!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("205s..210s"));
        assert!(message.contains("Conversion failed!"));
    }
}
