//! Set Differ 的性質測試

use std::collections::BTreeSet;

use dirhash::tools::{FingerprintSet, diff};
use proptest::collection::hash_map;
use proptest::prelude::*;

fn fingerprint_set() -> impl Strategy<Value = FingerprintSet> {
    // 小字母表讓兩邊的 key 與 digest 容易重疊
    hash_map("[a-d]{1,2}(/[a-d]{1,2})?", "[0-2]", 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

fn strictly_ascending(paths: &[String]) -> bool {
    paths.windows(2).all(|pair| pair[0] < pair[1])
}

proptest! {
    #[test]
    fn diff_is_symmetric(a in fingerprint_set(), b in fingerprint_set()) {
        let forward = diff(&a, &b);
        let backward = diff(&b, &a);
        prop_assert_eq!(&forward.only_in_first, &backward.only_in_second);
        prop_assert_eq!(&forward.only_in_second, &backward.only_in_first);
        prop_assert_eq!(&forward.modified, &backward.modified);
    }

    #[test]
    fn diff_accounts_for_every_key(a in fingerprint_set(), b in fingerprint_set()) {
        let result = diff(&a, &b);
        let equal = a.iter().filter(|(path, digest)| b.get(path) == Some(*digest)).count();
        let union: BTreeSet<&str> = a.paths().chain(b.paths()).collect();

        prop_assert_eq!(
            result.modified.len() + result.only_in_first.len() + result.only_in_second.len() + equal,
            union.len()
        );
    }

    #[test]
    fn diff_lists_are_sorted_and_disjoint(a in fingerprint_set(), b in fingerprint_set()) {
        let result = diff(&a, &b);
        prop_assert!(strictly_ascending(&result.modified));
        prop_assert!(strictly_ascending(&result.only_in_first));
        prop_assert!(strictly_ascending(&result.only_in_second));

        let mut seen = BTreeSet::new();
        for path in result.modified.iter().chain(&result.only_in_first).chain(&result.only_in_second) {
            prop_assert!(seen.insert(path.as_str()), "path reported twice: {}", path);
            // 內容相同的檔案不應出現
            prop_assert!(!(a.get(path).is_some() && a.get(path) == b.get(path)));
        }
    }

    #[test]
    fn diff_with_itself_is_empty(a in fingerprint_set()) {
        prop_assert!(diff(&a, &a).is_identical());
    }
}
