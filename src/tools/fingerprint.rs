use std::collections::HashMap;

/// 單一檔案的指紋：相對路徑與內容的 SHA-256
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub relative_path: String,
    pub digest: String,
}

impl Fingerprint {
    #[must_use]
    pub const fn new(relative_path: String, digest: String) -> Self {
        Self {
            relative_path,
            digest,
        }
    }
}

/// 一個根路徑下所有一般檔案的指紋，Key 是相對路徑（以 `/` 分隔），Value 是 digest
///
/// 由 `FingerprintBuilder` 一次建立完成，之後不再變動。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintSet {
    entries: HashMap<String, String>,
}

impl FingerprintSet {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, fingerprint: Fingerprint) -> Option<String> {
        self.entries
            .insert(fingerprint.relative_path, fingerprint.digest)
    }

    #[must_use]
    pub fn get(&self, relative_path: &str) -> Option<&str> {
        self.entries.get(relative_path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, relative_path: &str) -> bool {
        self.entries.contains_key(relative_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依內部順序（無序）走訪所有項目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut set = FingerprintSet::new();
        assert!(set.is_empty());

        set.insert(Fingerprint::new("sub/a.txt".to_string(), "h1".to_string()));
        assert_eq!(set.len(), 1);
        assert!(set.contains("sub/a.txt"));
        assert_eq!(set.get("sub/a.txt"), Some("h1"));
        assert_eq!(set.get("a.txt"), None);
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut set = FingerprintSet::new();
        set.insert(Fingerprint::new("a".to_string(), "h1".to_string()));
        let previous = set.insert(Fingerprint::new("a".to_string(), "h2".to_string()));

        assert_eq!(previous.as_deref(), Some("h1"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a"), Some("h2"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let set: FingerprintSet = [("a", "h1"), ("b", "h2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut paths: Vec<&str> = set.paths().collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["a", "b"]);
    }
}
