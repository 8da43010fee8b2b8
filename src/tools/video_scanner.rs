use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 列出資料夾第一層中符合影片副檔名的檔案（不遞迴），依檔名排序
pub fn scan_video_files(directory: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut video_files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("無法讀取資料夾內容: {}", directory.display()))?;
        if entry.file_type().is_file() && settings.is_video_file(entry.path()) {
            video_files.push(entry.into_path());
        }
    }

    Ok(video_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_is_non_recursive_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.MKV"), "").unwrap();
        fs::write(root.join("a.mp4"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("c.mkv"), "").unwrap();
        fs::create_dir(root.join("folder.mkv")).unwrap();

        let files = scan_video_files(root, &Settings::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.mp4", "b.MKV"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = scan_video_files(dir.path(), &Settings::default()).unwrap();
        assert!(files.is_empty());
    }
}
