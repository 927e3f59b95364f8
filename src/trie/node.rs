//! Label trie node and its batch builder.
//!
//! Rules are inserted TLD first, one node per label. The wildcard label `*`
//! is stored as an ordinary key; its meaning is applied only by the resolver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Rule, WILDCARD_LABEL};

/// A node of the public suffix trie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    /// Label this node represents (empty for the root)
    pub label: String,
    /// Set when the rule ending here is an exception rule
    pub is_exception: bool,
    /// Child nodes keyed by label
    pub children: HashMap<String, TrieNode>,
}

impl TrieNode {
    fn with_label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Build a trie from normalized rule lines.
    ///
    /// Performs no validation: empty patterns or empty labels produce
    /// degenerate nodes. When a path is declared twice the last rule's
    /// exception flag wins.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Self::default();
        for rule in rules {
            root.insert(Rule::parse(rule.as_ref()));
        }
        root
    }

    fn insert(&mut self, rule: Rule<'_>) {
        let mut node = self;
        for label in rule.labels() {
            node = node
                .children
                .entry(label.to_string())
                .or_insert_with(|| TrieNode::with_label(label));
        }
        node.is_exception = rule.is_exception;
    }

    /// Child for an exact label.
    #[inline]
    pub fn child(&self, label: &str) -> Option<&TrieNode> {
        self.children.get(label)
    }

    /// Child for `label`, falling back to the wildcard child.
    #[inline]
    pub fn matching_child(&self, label: &str) -> Option<&TrieNode> {
        self.children
            .get(label)
            .or_else(|| self.children.get(WILDCARD_LABEL))
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one, excluding itself.
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Number of leaf paths below this node.
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|child| if child.is_leaf() { 1 } else { child.leaf_count() })
            .sum()
    }

    /// Whether the path of labels (TLD first) exists below this node.
    pub fn contains_path<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for label in labels {
            match node.child(label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rules() {
        let root = TrieNode::from_rules(Vec::<String>::new());
        assert!(root.is_leaf());
        assert_eq!(root.label, "");
        assert!(!root.is_exception);
    }

    #[test]
    fn test_rules_are_inserted_tld_first() {
        let root = TrieNode::from_rules(["com", "co.uk"]);

        let com = root.child("com").unwrap();
        assert_eq!(com.label, "com");
        assert!(com.is_leaf());

        let uk = root.child("uk").unwrap();
        let co = uk.child("co").unwrap();
        assert_eq!(co.label, "co");
        assert!(!co.is_exception);
        assert!(root.child("co").is_none());
    }

    #[test]
    fn test_shared_prefix_nodes() {
        let root = TrieNode::from_rules(["jp", "ac.jp", "kyoto.jp", "ide.kyoto.jp"]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.child("jp").unwrap().children.len(), 2);
        assert_eq!(root.descendant_count(), 4);
        assert_eq!(root.leaf_count(), 2);
    }

    #[test]
    fn test_exception_flag_on_terminal_only() {
        let root = TrieNode::from_rules(["*.kawasaki.jp", "!city.kawasaki.jp"]);
        let kawasaki = root.child("jp").unwrap().child("kawasaki").unwrap();
        assert!(!kawasaki.is_exception);
        assert!(!kawasaki.child("*").unwrap().is_exception);
        assert!(kawasaki.child("city").unwrap().is_exception);
    }

    #[test]
    fn test_wildcard_is_ordinary_key() {
        let root = TrieNode::from_rules(["*.ck"]);
        let ck = root.child("ck").unwrap();
        assert_eq!(ck.child("*").unwrap().label, "*");
        assert!(ck.child("www").is_none());
        assert_eq!(ck.matching_child("www").unwrap().label, "*");
    }

    #[test]
    fn test_matching_child_prefers_exact() {
        let root = TrieNode::from_rules(["*.ck", "!www.ck"]);
        let ck = root.child("ck").unwrap();
        let www = ck.matching_child("www").unwrap();
        assert_eq!(www.label, "www");
        assert!(www.is_exception);
    }

    #[test]
    fn test_last_declaration_wins() {
        let root = TrieNode::from_rules(["!a.example", "a.example"]);
        assert!(!root.child("example").unwrap().child("a").unwrap().is_exception);

        let root = TrieNode::from_rules(["a.example", "!a.example"]);
        assert!(root.child("example").unwrap().child("a").unwrap().is_exception);
    }

    #[test]
    fn test_degenerate_rules_do_not_panic() {
        let root = TrieNode::from_rules(["", "a..b", "!"]);
        assert!(root.child("").is_some());
        assert!(root.contains_path(["b", "", "a"]));
    }

    #[test]
    fn test_construction_is_idempotent() {
        let rules = ["com", "*.jp", "!city.kawasaki.jp", "*.kawasaki.jp", "co.uk"];
        let first = TrieNode::from_rules(rules);
        let second = TrieNode::from_rules(rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_contains_path() {
        let root = TrieNode::from_rules(["k12.ak.us"]);
        assert!(root.contains_path(["us", "ak", "k12"]));
        assert!(root.contains_path(["us", "ak"]));
        assert!(!root.contains_path(["us", "k12"]));
    }
}
