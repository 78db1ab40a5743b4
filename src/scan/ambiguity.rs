//! Substring ambiguity detector.
//!
//! A tag whose name is a literal substring of another tag's name is a hazard
//! for naive find/replace refactors: a text search for `[START foo]` also
//! hits `[START foo_bar]`. Comparison is exact-string containment with no
//! case-folding and no word-boundary awareness, deliberately mirroring the
//! failure mode the tool exists to warn about.
//!
//! The scan is quadratic in the number of distinct tags. Snippet identifier
//! vocabularies are small, so this is not a performance-critical path; a
//! trie-based containment index could replace it without changing the pairs
//! reported or their grouping.

use std::collections::{BTreeMap, BTreeSet};

use super::AmbiguityGroup;

/// Distinct tag names mapped to the files each occurs in.
///
/// BTree keying keeps the census and everything derived from it
/// deterministic regardless of scan order.
pub type TagCensus = BTreeMap<String, BTreeSet<String>>;

/// Find every tag that is a proper substring of another tag.
///
/// Returns one group per colliding substring, its superstrings sorted,
/// groups ordered by collision count descending with ties broken by tag
/// name. Tags that participate in no collision produce no group.
pub fn detect(census: &TagCensus) -> Vec<AmbiguityGroup> {
    let mut groups = Vec::new();

    for (tag, files) in census {
        let superstrings: Vec<String> = census
            .keys()
            .filter(|other| *other != tag && other.contains(tag.as_str()))
            .cloned()
            .collect();

        if superstrings.is_empty() {
            continue;
        }

        groups.push(AmbiguityGroup {
            substring: tag.clone(),
            superstrings,
            files: files.iter().cloned().collect(),
        });
    }

    // Most ambiguous first.
    groups.sort_by(|a, b| {
        b.collision_count()
            .cmp(&a.collision_count())
            .then_with(|| a.substring.cmp(&b.substring))
    });

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census(entries: &[(&str, &[&str])]) -> TagCensus {
        entries
            .iter()
            .map(|(tag, files)| {
                (
                    tag.to_string(),
                    files.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_detect_single_pair() {
        let census = census(&[
            ("foo", &["a.txt"]),
            ("foo_bar", &["a.txt"]),
            ("baz", &["b.txt"]),
        ]);
        let groups = detect(&census);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].substring, "foo");
        assert_eq!(groups[0].superstrings, vec!["foo_bar".to_string()]);
        assert!(!groups.iter().any(|g| g.substring == "baz"));
    }

    #[test]
    fn test_detect_no_collisions() {
        let census = census(&[("alpha", &["a.txt"]), ("beta", &["a.txt"])]);
        assert!(detect(&census).is_empty());
    }

    #[test]
    fn test_detect_ranked_by_collision_count() {
        let census = census(&[
            ("a", &["f.txt"]),
            ("ab", &["f.txt"]),
            ("abc", &["f.txt"]),
            ("b", &["f.txt"]),
        ]);
        let groups = detect(&census);

        // "a" collides with ab, abc; "b" with ab, abc; "ab" with abc.
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].collision_count(), 2);
        assert_eq!(groups[1].collision_count(), 2);
        assert_eq!(groups[2].substring, "ab");
        // Equal counts tie-break by name.
        assert_eq!(groups[0].substring, "a");
        assert_eq!(groups[1].substring, "b");
    }

    #[test]
    fn test_detect_case_sensitive() {
        let census = census(&[("Foo", &["a.txt"]), ("foo_bar", &["b.txt"])]);
        // "Foo" is not contained in "foo_bar"; no normalization happens.
        assert!(detect(&census).is_empty());
    }

    #[test]
    fn test_detect_mid_string_containment() {
        let census = census(&[("io", &["a.txt"]), ("region_io_setup", &["b.txt"])]);
        let groups = detect(&census);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].substring, "io");
    }

    #[test]
    fn test_detect_identical_tag_not_self_pair() {
        // The same tag appearing in several files is one census entry and
        // never pairs with itself.
        let census = census(&[("shared", &["a.py", "a.rs", "a.js"])]);
        assert!(detect(&census).is_empty());
    }

    #[test]
    fn test_files_carried_for_locating() {
        let census = census(&[("foo", &["b.txt", "a.txt"]), ("foo_bar", &["c.txt"])]);
        let groups = detect(&census);
        assert_eq!(groups[0].files, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }
}
