//! Domain resolver.
//!
//! Splits a domain name into eTLD, registered domain and subdomain by
//! walking the rule trie from the TLD inward.

use std::borrow::Cow;

use crate::trie::TrieNode;
use crate::types::DomainProperties;

/// Per-depth outcome of the trie walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthMatch {
    /// No node visited at this depth
    Undetermined,
    /// Matched a rule (or the implicit `*` rule at depth 1)
    Suffix,
    /// Matched an exception rule
    Exception,
}

impl DepthMatch {
    fn from_node(node: &TrieNode) -> Self {
        if node.is_exception {
            DepthMatch::Exception
        } else {
            DepthMatch::Suffix
        }
    }
}

/// Classify `domain` against the trie rooted at `root`.
///
/// Returns `None` when the domain is empty, or when its apparent public
/// suffix comes only from the implicit `*` rule and no label is left for a
/// registered domain (e.g. a bare unknown TLD).
pub fn resolve(root: &TrieNode, domain: &str) -> Option<DomainProperties> {
    if domain.is_empty() {
        return None;
    }

    // Fold case the same way normalize_domain_name does. ASCII names only
    // allocate when they hold uppercase bytes.
    let needs_folding = if domain.is_ascii() {
        domain.bytes().any(|b| b.is_ascii_uppercase())
    } else {
        true
    };
    let domain: Cow<'_, str> = if needs_folding {
        Cow::Owned(domain.to_lowercase())
    } else {
        Cow::Borrowed(domain)
    };

    let labels: Vec<&str> = domain.split('.').collect();
    let label_count = labels.len();

    // matches[d - 1] holds the outcome for depth d (depth 1 = rightmost label).
    // "If no rules match, the prevailing rule is *."
    let mut matches = vec![DepthMatch::Undetermined; label_count];
    matches[0] = DepthMatch::Suffix;

    let mut walked_depth = 0;
    let mut node = root;
    for (depth, label) in (1..=label_count).zip(labels.iter().rev()) {
        let Some(next) = node.matching_child(label) else {
            break;
        };
        matches[depth - 1] = DepthMatch::from_node(next);
        walked_depth = depth;
        node = next;
    }

    // Longest suffix whose matching rule is not an exception.
    let hit = (1..=label_count)
        .rev()
        .find(|&depth| matches[depth - 1] == DepthMatch::Suffix)?;

    let suffix_start = label_count - hit;
    let effective_top_level_domain = labels[suffix_start..].join(".");

    if suffix_start == 0 {
        if hit > walked_depth {
            // Only the implicit rule applied and nothing is registrable.
            return None;
        }
        return Some(DomainProperties {
            effective_top_level_domain,
            registered_domain: String::new(),
            subdomain: String::new(),
        });
    }

    Some(DomainProperties {
        effective_top_level_domain,
        registered_domain: labels[suffix_start - 1..].join("."),
        subdomain: labels[..suffix_start - 1].join("."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(etld: &str, registered: &str, subdomain: &str) -> Option<DomainProperties> {
        Some(DomainProperties {
            effective_top_level_domain: etld.to_string(),
            registered_domain: registered.to_string(),
            subdomain: subdomain.to_string(),
        })
    }

    #[test]
    fn test_exact_rule() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(resolve(&root, "example.com"), props("com", "example.com", ""));
    }

    #[test]
    fn test_deep_subdomain() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(
            resolve(&root, "a.b.c.example.com"),
            props("com", "example.com", "a.b.c")
        );
    }

    #[test]
    fn test_wildcard_rule() {
        let root = TrieNode::from_rules(["*.jp"]);
        assert_eq!(resolve(&root, "foo.bar.jp"), props("bar.jp", "foo.bar.jp", ""));
    }

    #[test]
    fn test_exception_overrides_wildcard() {
        let root = TrieNode::from_rules(["*.kawasaki.jp", "!city.kawasaki.jp"]);
        assert_eq!(
            resolve(&root, "city.kawasaki.jp"),
            props("kawasaki.jp", "city.kawasaki.jp", "")
        );
        assert_eq!(
            resolve(&root, "sub.city.kawasaki.jp"),
            props("kawasaki.jp", "city.kawasaki.jp", "sub")
        );
        assert_eq!(
            resolve(&root, "other.kawasaki.jp"),
            props("other.kawasaki.jp", "", "")
        );
    }

    #[test]
    fn test_empty_trie_uses_prevailing_rule() {
        let root = TrieNode::from_rules(Vec::<String>::new());
        assert_eq!(resolve(&root, "example.com"), props("com", "example.com", ""));
        assert_eq!(
            resolve(&root, "www.example.com"),
            props("com", "example.com", "www")
        );
    }

    #[test]
    fn test_bare_unknown_tld_is_unclassified() {
        let root = TrieNode::from_rules(Vec::<String>::new());
        assert_eq!(resolve(&root, "com"), None);

        let root = TrieNode::from_rules(["com"]);
        assert_eq!(resolve(&root, "localhost"), None);
    }

    #[test]
    fn test_bare_listed_suffix_has_empty_registered_domain() {
        let root = TrieNode::from_rules(["com", "co.uk"]);
        assert_eq!(resolve(&root, "com"), props("com", "", ""));
        assert_eq!(resolve(&root, "co.uk"), props("co.uk", "", ""));
    }

    #[test]
    fn test_unknown_tld_with_spare_label() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(
            resolve(&root, "b.example.local"),
            props("local", "example.local", "b")
        );
    }

    #[test]
    fn test_exact_child_preferred_over_wildcard() {
        // "www" exists as an exact child; the wildcard branch is not taken.
        let root = TrieNode::from_rules(["*.ck", "!www.ck"]);
        assert_eq!(resolve(&root, "www.ck"), props("ck", "www.ck", ""));
        assert_eq!(resolve(&root, "a.www.ck"), props("ck", "www.ck", "a"));
        assert_eq!(resolve(&root, "b.c.ck"), props("c.ck", "b.c.ck", ""));
    }

    #[test]
    fn test_intermediate_path_counts_as_suffix() {
        let root = TrieNode::from_rules(["foo.bar.com"]);
        assert_eq!(
            resolve(&root, "x.bar.com"),
            props("bar.com", "x.bar.com", "")
        );
    }

    #[test]
    fn test_case_folding() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(
            resolve(&root, "WWW.Example.COM"),
            props("com", "example.com", "www")
        );
    }

    #[test]
    fn test_case_folding_non_ascii() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(
            resolve(&root, "Ü.Example.com"),
            props("com", "example.com", "ü")
        );
        assert_eq!(
            resolve(&root, "Ü.example.com"),
            resolve(&root, &crate::parser::normalize_domain_name("Ü.example.com"))
        );
    }

    #[test]
    fn test_empty_domain() {
        let root = TrieNode::from_rules(["com"]);
        assert_eq!(resolve(&root, ""), None);
    }

    #[test]
    fn test_determinism() {
        let root = TrieNode::from_rules(["*.kawasaki.jp", "!city.kawasaki.jp", "jp"]);
        let first = resolve(&root, "a.b.city.kawasaki.jp");
        for _ in 0..10 {
            assert_eq!(resolve(&root, "a.b.city.kawasaki.jp"), first);
        }
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let root = TrieNode::from_rules(["com", "co.uk", "*.kawasaki.jp", "!city.kawasaki.jp"]);
        for domain in [
            "example.com",
            "a.b.example.com",
            "www.example.co.uk",
            "x.y.city.kawasaki.jp",
            "foo.bar.kawasaki.jp",
        ] {
            let props = resolve(&root, domain).unwrap();
            assert_eq!(props.full_name(), domain);
            assert!(props
                .registered_domain
                .ends_with(&props.effective_top_level_domain));
        }
    }
}
