use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("無法建立資料夾: {}", path.display()))?;
    }
    Ok(())
}

/// 相對路徑以 `base` 為基準，絕對路徑原樣回傳
#[must_use]
pub fn resolve_relative_to(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// 解析輸出資料夾、必要時建立，並回傳正規化後的絕對路徑
pub fn prepare_output_directory(output: &Path, base: &Path) -> Result<PathBuf> {
    let resolved = resolve_relative_to(output, base);
    ensure_directory_exists(&resolved)?;
    resolved
        .canonicalize()
        .with_context(|| format!("無法解析輸出資料夾: {}", resolved.display()))
}
