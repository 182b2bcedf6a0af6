//! 指紋建立過程中的錯誤類型

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 建立 `FingerprintSet` 時可能發生的錯誤
///
/// 任何一個錯誤都會讓整次建立失敗，不會回傳部分結果。
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// 根路徑不存在、無法讀取，或走訪途中遇到無法存取的項目
    #[error("cannot traverse '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 一般檔案無法完整讀取
    #[error("cannot hash '{}': {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 無法計算相對於根路徑的路徑
    #[error("cannot compute path of '{}' relative to '{}'", path.display(), root.display())]
    Path { path: PathBuf, root: PathBuf },

    /// 收到中斷信號
    #[error("fingerprinting cancelled")]
    Cancelled,
}

impl FingerprintError {
    /// 出錯的檔案或目錄路徑
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Traversal { path, .. } | Self::Hash { path, .. } | Self::Path { path, .. } => {
                Some(path)
            }
            Self::Cancelled => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FingerprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_contains_path() {
        let err = FingerprintError::Hash {
            path: PathBuf::from("/data/a.bin"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/data/a.bin"));
        assert!(message.contains("denied"));
        assert_eq!(err.path(), Some(std::path::Path::new("/data/a.bin")));
    }

    #[test]
    fn test_cancelled_has_no_path() {
        assert!(FingerprintError::Cancelled.path().is_none());
    }
}
