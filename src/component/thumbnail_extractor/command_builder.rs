use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const THUMBNAIL_EXTENSION: &str = "jpg";

const SECONDS_PER_HOUR: u64 = 3600;

/// 影片長度滿一小時以上時，檔名改用 `HH-MM-SS`
#[must_use]
pub const fn has_hours(duration: Duration) -> bool {
    duration.as_secs() >= SECONDS_PER_HOUR
}

/// 將秒數格式化為檔名用的時間字串（`MM-SS` 或 `HH-MM-SS`）
#[must_use]
pub fn format_timestamp(seconds: u32, has_hours: bool) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if has_hours {
        format!("{h:02}-{m:02}-{s:02}")
    } else {
        format!("{m:02}-{s:02}")
    }
}

/// 縮圖輸出路徑：`<output_base_name> <時間>.jpg`
#[must_use]
pub fn thumbnail_path(output_base_name: &Path, timestamp: u32, has_hours: bool) -> PathBuf {
    let mut name = output_base_name.as_os_str().to_owned();
    name.push(" ");
    name.push(format_timestamp(timestamp, has_hours));
    name.push(".");
    name.push(THUMBNAIL_EXTENSION);
    PathBuf::from(name)
}

/// 建立單次 ffmpeg 呼叫的參數，一次擷取整批時間點
///
/// 每個時間點各自開一個預先 seek 的輸入（`-hwaccel auto -ss t -i source`），
/// 再依相同順序以 `-map i:v -frames:v 1` 對應到各自的輸出檔。
#[must_use]
pub fn build_extraction_args(
    batch: &[u32],
    source_path: &Path,
    output_base_name: &Path,
    has_hours: bool,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]
        .into_iter()
        .map(OsString::from)
        .collect();

    // 輸入選項只作用於下一個 -i，因此每個輸入都要帶 -hwaccel
    for &timestamp in batch {
        args.push("-hwaccel".into());
        args.push("auto".into());
        args.push("-ss".into());
        args.push(timestamp.to_string().into());
        args.push("-i".into());
        args.push(source_path.as_os_str().to_owned());
    }

    for (index, &timestamp) in batch.iter().enumerate() {
        args.push("-map".into());
        args.push(format!("{index}:v").into());
        args.push("-frames:v".into());
        args.push("1".into());
        args.push(thumbnail_path(output_base_name, timestamp, has_hours).into_os_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn to_strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(125, false), "02-05");
        assert_eq!(format_timestamp(3725, true), "01-02-05");
        assert_eq!(format_timestamp(5, false), "00-05");
        assert_eq!(format_timestamp(5, true), "00-00-05");
    }

    #[test]
    fn test_has_hours() {
        assert!(!has_hours(Duration::from_secs_f64(3599.9)));
        assert!(has_hours(Duration::from_secs(3600)));
    }

    #[test]
    fn test_thumbnail_path() {
        let base = Path::new("/out/My Movie");
        assert_eq!(
            thumbnail_path(base, 10, false),
            PathBuf::from("/out/My Movie 00-10.jpg")
        );
        assert_eq!(
            thumbnail_path(base, 3725, true),
            PathBuf::from("/out/My Movie 01-02-05.jpg")
        );
    }

    #[test]
    fn test_build_two_timestamps() {
        let args = build_extraction_args(
            &[5, 10],
            Path::new("/videos/clip.mkv"),
            Path::new("/out/clip"),
            false,
        );
        let args = to_strings(&args);

        let inputs: Vec<_> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .map(|(i, _)| args[i + 1].clone())
            .collect();
        assert_eq!(inputs, vec!["/videos/clip.mkv", "/videos/clip.mkv"]);

        let maps: Vec<_> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-map")
            .map(|(i, _)| args[i + 1].clone())
            .collect();
        assert_eq!(maps, vec!["0:v", "1:v"]);

        let outputs: HashSet<_> = args.iter().filter(|a| a.ends_with(".jpg")).collect();
        assert_eq!(outputs.len(), 2);
        assert!(outputs.contains(&"/out/clip 00-05.jpg".to_string()));
        assert!(outputs.contains(&"/out/clip 00-10.jpg".to_string()));
    }

    #[test]
    fn test_build_ordering_and_flags() {
        let args = to_strings(&build_extraction_args(
            &[40, 45],
            Path::new("in.mp4"),
            Path::new("out/in"),
            false,
        ));

        assert_eq!(
            args,
            vec![
                "-hide_banner",
                "-nostdin",
                "-loglevel",
                "error",
                "-y",
                "-hwaccel",
                "auto",
                "-ss",
                "40",
                "-i",
                "in.mp4",
                "-hwaccel",
                "auto",
                "-ss",
                "45",
                "-i",
                "in.mp4",
                "-map",
                "0:v",
                "-frames:v",
                "1",
                "out/in 00-40.jpg",
                "-map",
                "1:v",
                "-frames:v",
                "1",
                "out/in 00-45.jpg",
            ]
        );
    }

    #[test]
    fn test_build_empty_batch_has_no_inputs() {
        let args = to_strings(&build_extraction_args(
            &[],
            Path::new("in.mp4"),
            Path::new("out/in"),
            false,
        ));
        assert!(!args.iter().any(|a| a == "-i" || a == "-map"));
    }
}
