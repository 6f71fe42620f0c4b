use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 確認目錄存在且為目錄
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("目錄不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是目錄: {}", path.display());
    }
    Ok(())
}

/// 確認檔案存在且為一般檔案
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("檔案不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

/// 確保目錄存在，不存在則建立
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("無法建立目錄: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_directory_exists() {
        let dir = tempdir().unwrap();
        assert!(validate_directory_exists(dir.path()).is_ok());
        assert!(validate_directory_exists(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_validate_file_exists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(validate_file_exists(&file).is_ok());
        assert!(validate_file_exists(dir.path()).is_err());
    }

    #[test]
    fn test_ensure_directory_exists_creates() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
