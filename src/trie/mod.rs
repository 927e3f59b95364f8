//! Public suffix trie.
//!
//! The trie is built once from the full rule set and is immutable
//! afterwards, so a single instance can be shared across threads and
//! queried without locking.
//!
//! ## Example
//!
//! ```
//! use public_suffix::PublicSuffixTrie;
//!
//! let trie = PublicSuffixTrie::from_rules(["com", "*.kawasaki.jp", "!city.kawasaki.jp"]);
//!
//! let props = trie.get_domain_properties("www.example.com").unwrap();
//! assert_eq!(props.effective_top_level_domain, "com");
//! assert_eq!(props.registered_domain, "example.com");
//! assert_eq!(props.subdomain, "www");
//!
//! let props = trie.get_domain_properties("city.kawasaki.jp").unwrap();
//! assert_eq!(props.effective_top_level_domain, "kawasaki.jp");
//! ```

mod node;

pub use node::TrieNode;

use std::path::Path;

use tracing::debug;

use crate::error::{PslError, Result};
use crate::list::ListSource;
use crate::parser::{
    domain_to_ascii, normalize_domain_name, parse_rules, parse_rules_from_file,
    validate_domain_name,
};
use crate::resolver;
use crate::types::DomainProperties;

/// Public suffix list held as a label trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicSuffixTrie {
    root: TrieNode,
    rule_count: Option<usize>,
}

impl PublicSuffixTrie {
    /// Wrap an already built root node.
    pub fn new(root: TrieNode) -> Self {
        Self {
            root,
            rule_count: None,
        }
    }

    /// Build from normalized rule lines (no comments or blank lines).
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rule_count = 0;
        let root = TrieNode::from_rules(rules.into_iter().inspect(|_| rule_count += 1));
        debug!(
            rules = rule_count,
            nodes = root.descendant_count(),
            "built public suffix trie"
        );
        Self {
            root,
            rule_count: Some(rule_count),
        }
    }

    /// Build from raw list text in the public suffix list format.
    pub fn from_list_text(text: &str) -> Self {
        Self::from_rules(parse_rules(text))
    }

    /// Build from a list file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_rules(parse_rules_from_file(path)?))
    }

    /// Build from any list source.
    pub fn from_source(source: &dyn ListSource) -> Result<Self> {
        let text = source.load_list()?;
        Ok(Self::from_list_text(&text))
    }

    /// Classify a domain name.
    ///
    /// The name is expected to be case-folded ASCII (punycode for
    /// internationalized labels); `None` means no rule applies and nothing
    /// is registrable.
    pub fn get_domain_properties(&self, domain: &str) -> Option<DomainProperties> {
        resolver::resolve(&self.root, domain)
    }

    /// Validate, normalize and classify a domain name.
    ///
    /// Unicode labels are converted to punycode first.
    pub fn classify(&self, domain: &str) -> Result<DomainProperties> {
        let ascii = domain_to_ascii(domain.trim())?;
        validate_domain_name(&ascii)?;
        let name = normalize_domain_name(&ascii);
        self.get_domain_properties(&name)
            .ok_or(PslError::UnknownSuffix(name))
    }

    /// Root node of the trie.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Number of nodes, excluding the root.
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    /// Number of rules the trie was built from.
    ///
    /// `None` for a trie wrapped with [`PublicSuffixTrie::new`], whose rules
    /// are unknown.
    pub fn rule_count(&self) -> Option<usize> {
        self.rule_count
    }

    /// Dump the trie as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    /// Dump the trie as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

impl From<TrieNode> for PublicSuffixTrie {
    fn from(root: TrieNode) -> Self {
        Self::new(root)
    }
}
