use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{PslError, Result};
use crate::types::EXCEPTION_MARKER;

/// Characters accepted in a domain name handed to the resolver
static DOMAIN_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+$").expect("DOMAIN_NAME_PATTERN: hardcoded regex is invalid")
});

/// Comment prefix in the public suffix list format
const COMMENT_PREFIX: &str = "//";

/// Convert a domain name or rule pattern to its ASCII form.
///
/// ASCII labels are lower-cased; other labels go through IDNA (UTS 46) and
/// come out as punycode, e.g. `公司.cn` becomes `xn--55qx5d.cn`.
pub fn domain_to_ascii(name: &str) -> Result<String> {
    if name.is_ascii() {
        return Ok(name.to_ascii_lowercase());
    }

    let labels = name
        .split('.')
        .map(|label| {
            if label.is_ascii() {
                return Ok(label.to_ascii_lowercase());
            }
            idna::domain_to_ascii(label).map_err(|e| {
                PslError::InvalidDomainName(format!(
                    "cannot convert '{}' to punycode: {:?}",
                    name, e
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(labels.join("."))
}

/// Normalize one list line into a rule.
///
/// Returns `None` for blank and comment lines. A rule is read only up to the
/// first whitespace, then converted with [`domain_to_ascii`]. Rules that
/// cannot be converted are skipped.
pub fn normalize_rule(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return None;
    }
    let rule = line.split_whitespace().next()?;

    let (marker, pattern) = match rule.strip_prefix(EXCEPTION_MARKER) {
        Some(pattern) => (Some(EXCEPTION_MARKER), pattern),
        None => (None, rule),
    };

    match domain_to_ascii(pattern) {
        Ok(ascii) => Some(match marker {
            Some(marker) => format!("{}{}", marker, ascii),
            None => ascii,
        }),
        Err(e) => {
            warn!(rule, error = %e, "skipping unconvertible rule");
            None
        }
    }
}

/// Parse public suffix list text into normalized rule strings.
pub fn parse_rules(text: &str) -> Vec<String> {
    text.lines().filter_map(normalize_rule).collect()
}

/// Parse public suffix list rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        PslError::ParseError(format!(
            "Failed to read list file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_rules(&text))
}

/// Trim, drop one trailing root dot and lower-case a domain name.
pub fn normalize_domain_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix('.').unwrap_or(name);
    name.to_lowercase()
}

/// Check that a domain name is fit for classification.
pub fn validate_domain_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if !DOMAIN_NAME_PATTERN.is_match(trimmed) {
        return Err(PslError::InvalidDomainName(format!(
            "not in the correct format: {}",
            name
        )));
    }

    let normalized = normalize_domain_name(trimmed);
    if normalized.split('.').any(str::is_empty) {
        return Err(PslError::InvalidDomainName(format!(
            "empty label in: {}",
            name
        )));
    }

    Ok(())
}

/// Parse a newline-separated list of domain names.
///
/// Blank lines are skipped and duplicates dropped, keeping first occurrence.
pub fn parse_domain_names(text: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let name = domain_to_ascii(line)
            .and_then(|ascii| validate_domain_name(&ascii).map(|_| ascii))
            .map_err(|e| PslError::ParseErrorAtLine {
                line: line_num,
                message: e.to_string(),
            })?;

        let name = normalize_domain_name(&name);
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    Ok(names)
}
