//! Name filter: the text pattern applied to file entries.
//!
//! A pattern is compiled as a case-insensitive regular expression when it
//! parses; otherwise the raw text is matched as a case-insensitive literal
//! substring. A pattern is therefore never invalid, and the empty pattern
//! matches everything.

use regex::RegexBuilder;

/// Compiled form of the active filter pattern.
#[derive(Debug, Clone)]
enum Matcher {
    /// Empty pattern: every name matches.
    All,
    /// Pattern compiled as a case-insensitive regex.
    Regex(regex::Regex),
    /// Fallback for unparseable patterns: lowercased literal substring.
    Substring(String),
}

/// A filter over entry display names.
#[derive(Debug, Clone)]
pub struct NameFilter {
    raw: String,
    matcher: Matcher,
}

impl NameFilter {
    /// Build a filter from a raw pattern string. Never fails.
    pub fn new(pattern: &str) -> Self {
        let matcher = if pattern.is_empty() {
            Matcher::All
        } else {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(re) => Matcher::Regex(re),
                Err(_) => Matcher::Substring(pattern.to_lowercase()),
            }
        };
        Self {
            raw: pattern.to_string(),
            matcher,
        }
    }

    /// The raw pattern as entered by the user.
    pub fn pattern(&self) -> &str {
        &self.raw
    }

    /// Whether this filter accepts every name (empty pattern).
    pub fn is_match_all(&self) -> bool {
        matches!(self.matcher, Matcher::All)
    }

    /// Test a display name against the filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::All => true,
            Matcher::Regex(re) => re.is_match(name),
            Matcher::Substring(needle) => name.to_lowercase().contains(needle),
        }
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::new("")
    }
}
