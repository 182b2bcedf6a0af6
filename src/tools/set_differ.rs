use super::fingerprint::FingerprintSet;
use serde::Serialize;

/// 兩份指紋的差異，三個列表皆以字典序由小到大排列且互不重疊
///
/// 相同路徑且相同 digest 的檔案不會出現在任何列表中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// 兩邊都有但 digest 不同
    pub modified: Vec<String>,
    /// 只存在於第一份
    pub only_in_first: Vec<String>,
    /// 只存在於第二份
    pub only_in_second: Vec<String>,
}

impl DiffResult {
    /// 三個列表皆為空代表內容完全一致
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.modified.is_empty() && self.only_in_first.is_empty() && self.only_in_second.is_empty()
    }

    #[must_use]
    pub fn total_differences(&self) -> usize {
        self.modified.len() + self.only_in_first.len() + self.only_in_second.len()
    }
}

/// 比較兩份指紋
///
/// 沒有改名偵測：搬移的檔案會同時出現在 `only_in_first` 與 `only_in_second`。
#[must_use]
pub fn diff(first: &FingerprintSet, second: &FingerprintSet) -> DiffResult {
    let mut result = DiffResult::default();

    for (path, first_digest) in first.iter() {
        match second.get(path) {
            None => result.only_in_first.push(path.to_string()),
            Some(second_digest) if second_digest != first_digest => {
                result.modified.push(path.to_string());
            }
            Some(_) => {}
        }
    }

    result.only_in_second = second
        .paths()
        .filter(|path| !first.contains(path))
        .map(str::to_string)
        .collect();

    // HashMap 走訪順序不固定，排序讓輸出穩定
    result.modified.sort_unstable();
    result.only_in_first.sort_unstable();
    result.only_in_second.sort_unstable();

    result
}
