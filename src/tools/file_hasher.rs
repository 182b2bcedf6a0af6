use super::error::{FingerprintError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUFFER_SIZE: usize = 256 * 1024; // 256KB buffer

/// 以串流方式計算檔案的 SHA-256，回傳 64 字元小寫十六進位字串
///
/// 檔案在函式結束時關閉，成功或失敗皆然。
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let to_hash_error = |source| FingerprintError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(to_hash_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(to_hash_error(e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
