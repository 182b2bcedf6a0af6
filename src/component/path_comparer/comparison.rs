use crate::tools::{
    DiffResult, FingerprintBuilder, FingerprintSet, PathKind, calculate_file_hash, diff,
    validate_same_kind,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDigest {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootSummary {
    pub path: String,
    pub files: usize,
}

/// 兩個路徑的比較結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    Files {
        identical: bool,
        first: FileDigest,
        second: FileDigest,
    },
    Directories {
        identical: bool,
        first: RootSummary,
        second: RootSummary,
        #[serde(flatten)]
        diff: DiffResult,
    },
}

impl Comparison {
    #[must_use]
    pub const fn is_identical(&self) -> bool {
        match self {
            Self::Files { identical, .. } | Self::Directories { identical, .. } => *identical,
        }
    }

    /// 檔案比較不一致時為 1；資料夾為三種差異的總數
    #[must_use]
    pub fn total_differences(&self) -> usize {
        match self {
            Self::Files { identical, .. } => usize::from(!identical),
            Self::Directories { diff, .. } => diff.total_differences(),
        }
    }
}

/// 比較兩個路徑；兩者必須同為檔案或同為資料夾
///
/// 檔案直接比較 digest（檔名不影響結果），資料夾則各自建立指紋後做差集。
pub fn compare_paths(
    builder: &FingerprintBuilder,
    first: &Path,
    second: &Path,
) -> Result<Comparison> {
    match validate_same_kind(first, second)? {
        PathKind::File => {
            let first = file_digest(first)?;
            let second = file_digest(second)?;
            Ok(Comparison::Files {
                identical: first.sha256 == second.sha256,
                first,
                second,
            })
        }
        PathKind::Directory => {
            let first_set = build_with_context(builder, first)?;
            let second_set = build_with_context(builder, second)?;
            let diff = diff(&first_set, &second_set);
            Ok(Comparison::Directories {
                identical: diff.is_identical(),
                first: RootSummary {
                    path: first.display().to_string(),
                    files: first_set.len(),
                },
                second: RootSummary {
                    path: second.display().to_string(),
                    files: second_set.len(),
                },
                diff,
            })
        }
    }
}

fn file_digest(path: &Path) -> Result<FileDigest> {
    let sha256 = calculate_file_hash(path)
        .with_context(|| format!("計算雜湊失敗: {}", path.display()))?;
    Ok(FileDigest {
        path: path.display().to_string(),
        sha256,
    })
}

fn build_with_context(builder: &FingerprintBuilder, root: &Path) -> Result<FingerprintSet> {
    builder
        .build(root)
        .with_context(|| format!("建立指紋失敗: {}", root.display()))
}
