//! Public Suffix - domain classification with the Public Suffix List
//!
//! This library splits a domain name into three parts:
//! - Effective top-level domain (eTLD), the longest public suffix
//! - Registered domain, the eTLD plus one label
//! - Subdomain, whatever is left
//!
//! The list is held as a label trie read from the TLD inward, with support
//! for wildcard (`*.ck`) and exception (`!www.ck`) rules.
//!
//! # Example
//!
//! ```rust
//! use public_suffix::PublicSuffixTrie;
//!
//! let list = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! uk
//! co.uk
//! *.kawasaki.jp
//! !city.kawasaki.jp
//! ";
//!
//! let trie = PublicSuffixTrie::from_list_text(list);
//!
//! let props = trie.get_domain_properties("www.example.co.uk").unwrap();
//! assert_eq!(props.effective_top_level_domain, "co.uk");
//! assert_eq!(props.registered_domain, "example.co.uk");
//! assert_eq!(props.subdomain, "www");
//!
//! // Unknown single-label names are not classified
//! assert!(trie.get_domain_properties("localhost").is_none());
//! ```
//!
//! # Rule Syntax
//!
//! | Rule | Example | Meaning |
//! |------|---------|---------|
//! | Plain | `co.uk` | The suffix is public |
//! | Wildcard | `*.kawasaki.jp` | Any single label under the suffix is public |
//! | Exception | `!city.kawasaki.jp` | Carves a name out of a wildcard |
//!
//! Lines starting with `//` are comments. When no rule matches, the
//! rightmost label alone is treated as the public suffix.

pub mod error;
pub mod list;
pub mod parser;
pub mod resolver;
pub mod trie;
pub mod types;

// Re-export commonly used items
pub use error::{ListErrorKind, PslError, Result};
pub use parser::{
    domain_to_ascii, normalize_domain_name, normalize_rule, parse_domain_names, parse_rules,
    parse_rules_from_file, validate_domain_name,
};
pub use resolver::resolve;
pub use trie::{PublicSuffixTrie, TrieNode};
pub use types::{DomainProperties, Rule};

// Re-export list source types
#[cfg(feature = "async")]
pub use list::{download_public_suffix_list_async, AsyncListSource};
pub use list::{
    download_public_suffix_list, AutoListSource, FileListSource, ListSource, MemoryListSource,
    NilListSource, DEFAULT_UPDATE_INTERVAL, PUBLIC_SUFFIX_LIST_URL,
};
