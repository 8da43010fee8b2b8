use super::error::ExtractError;
use crate::signal::CancelToken;
use crate::tools::ProcessRunner;
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

const DURATION_KEY: &str = "duration=";

/// ffprobe 參數：以 ini 格式輸出容器資訊
#[must_use]
pub fn build_probe_args(source_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-loglevel", "error", "-print_format", "ini", "-show_format"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(source_path.as_os_str().to_owned());
    args
}

/// 呼叫一次 ffprobe 取得影片長度，不重試
pub fn probe_duration(
    runner: &dyn ProcessRunner,
    ffprobe_path: &Path,
    source_path: &Path,
    cancel: &CancelToken,
) -> Result<Duration, ExtractError> {
    let output = runner.run(ffprobe_path, &build_probe_args(source_path), cancel)?;

    if !output.success() {
        debug!(
            "ffprobe 結束碼 {:?}: {}",
            output.exit_code,
            output.last_error_line().unwrap_or_default()
        );
    }

    parse_duration(&output.stdout_lines, source_path)
}

/// 從 ffprobe 輸出中找出 `duration=` 並解析成秒數
pub fn parse_duration<S: AsRef<str>>(
    lines: &[S],
    source_path: &Path,
) -> Result<Duration, ExtractError> {
    let raw = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .find_map(|line| line.strip_prefix(DURATION_KEY))
        .ok_or_else(|| ExtractError::DurationUnavailable {
            path: source_path.to_path_buf(),
        })?;

    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ExtractError::MalformedDuration {
            value: raw.to_string(),
        })?;

    Duration::try_from_secs_f64(seconds).map_err(|_| ExtractError::MalformedDuration {
        value: raw.to_string(),
    })
}
