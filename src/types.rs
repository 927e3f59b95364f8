use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker prefix of an exception rule
pub const EXCEPTION_MARKER: char = '!';

/// Label that matches any single label during lookup
pub const WILDCARD_LABEL: &str = "*";

/// A single list rule, borrowed from its source line.
///
/// Consumed during trie construction and not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<'a> {
    /// Dot-separated pattern without the exception marker
    pub pattern: &'a str,
    /// Whether the rule carves a name out of a wildcard
    pub is_exception: bool,
}

impl<'a> Rule<'a> {
    /// Split a normalized rule line into its pattern and exception flag.
    pub fn parse(line: &'a str) -> Self {
        match line.strip_prefix(EXCEPTION_MARKER) {
            Some(pattern) => Self {
                pattern,
                is_exception: true,
            },
            None => Self {
                pattern: line,
                is_exception: false,
            },
        }
    }

    /// Labels of the pattern, TLD first.
    pub fn labels(&self) -> impl Iterator<Item = &'a str> {
        self.pattern.rsplit('.')
    }
}

/// Classification of a domain name against the list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainProperties {
    /// Longest public suffix matched, e.g. "co.uk"
    pub effective_top_level_domain: String,
    /// Public suffix plus one label, e.g. "example.co.uk"; empty when the
    /// domain is itself a public suffix
    pub registered_domain: String,
    /// Labels left of the registered domain, e.g. "www"
    pub subdomain: String,
}

impl DomainProperties {
    /// Whether the classified name is a public suffix with nothing registrable.
    pub fn is_public_suffix(&self) -> bool {
        self.registered_domain.is_empty()
    }

    /// Rejoin subdomain and registered domain (or the bare eTLD).
    pub fn full_name(&self) -> String {
        match (
            self.subdomain.is_empty(),
            self.registered_domain.is_empty(),
        ) {
            (_, true) => self.effective_top_level_domain.clone(),
            (true, false) => self.registered_domain.clone(),
            (false, false) => format!("{}.{}", self.subdomain, self.registered_domain),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 3] {
        [
            (
                "Effective top-level domain (eTLD)",
                self.effective_top_level_domain.as_str(),
            ),
            ("Registered domain", self.registered_domain.as_str()),
            ("Subdomain", self.subdomain.as_str()),
        ]
    }

    /// Same lines as `Display`, with the values aligned after the colons.
    pub fn to_aligned_string(&self) -> String {
        let fields = self.fields();
        let width = fields.iter().map(|(name, _)| name.len() + 1).max().unwrap_or(0);
        fields
            .iter()
            .map(|(name, value)| format!("{:<width$} {}", format!("{}:", name), value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for DomainProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .fields()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}
