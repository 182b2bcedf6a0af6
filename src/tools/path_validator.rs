use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

pub fn classify_path(path: &Path) -> Result<PathKind> {
    if path.as_os_str().is_empty() {
        bail!("路徑為空");
    }
    let metadata =
        fs::metadata(path).with_context(|| format!("無法存取路徑: {}", path.display()))?;
    if metadata.is_dir() {
        Ok(PathKind::Directory)
    } else if metadata.is_file() {
        Ok(PathKind::File)
    } else {
        bail!("不是一般檔案或資料夾: {}", path.display())
    }
}

/// 兩個路徑必須同為檔案或同為資料夾
pub fn validate_same_kind(first: &Path, second: &Path) -> Result<PathKind> {
    let first_kind = classify_path(first)?;
    let second_kind = classify_path(second)?;
    if first_kind != second_kind {
        bail!(
            "路徑類型不相同: {} 與 {} 必須同為檔案或資料夾",
            first.display(),
            second.display()
        );
    }
    Ok(first_kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a.txt");
        fs::write(&file_path, "a").unwrap();

        assert_eq!(classify_path(temp_dir.path()).unwrap(), PathKind::Directory);
        assert_eq!(classify_path(&file_path).unwrap(), PathKind::File);
        assert!(classify_path(&temp_dir.path().join("missing")).is_err());
        assert!(classify_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_same_kind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a.txt");
        let dir_path = temp_dir.path().join("sub");
        fs::write(&file_path, "a").unwrap();
        fs::create_dir(&dir_path).unwrap();

        assert_eq!(
            validate_same_kind(temp_dir.path(), &dir_path).unwrap(),
            PathKind::Directory
        );
        assert_eq!(
            validate_same_kind(&file_path, &file_path).unwrap(),
            PathKind::File
        );
        assert!(validate_same_kind(&file_path, &dir_path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_special_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let fifo = temp_dir.path().join("pipe");
        let created = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .is_ok_and(|status| status.success());
        if !created {
            println!("跳過測試：無法建立 FIFO");
            return;
        }

        assert!(classify_path(&fifo).is_err());
        assert!(validate_same_kind(&fifo, &fifo).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_character_device_is_rejected() {
        let null = Path::new("/dev/null");
        if !null.exists() {
            return;
        }
        assert!(classify_path(null).is_err());
    }
}
