//! Keyword-adjacent quoted identifier extraction
//!
//! Handles references such as:
//! - SELECT * FROM `project.dataset.orders`
//! - LEFT JOIN "schema.customers"
//! - INSERT INTO `schema.summary`

use once_cell::sync::Lazy;
use regex::Regex;
use sqldep_core::Artifact;
use std::collections::HashSet;

/// Keywords that precede an artifact reference
pub const DEPENDENCY_KEYWORDS: [&str; 6] = ["FROM", "TABLE", "INTO", "JOIN", "UPDATE", "DELETE"];

// The delimiters must pair up, so each quoting style is its own alternative.
static DEPENDENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r#"(?i)\b(?:{})\s+(?:"([^"`\r\n]+)"|`([^"`\r\n]+)`)"#,
        DEPENDENCY_KEYWORDS.join("|")
    );
    Regex::new(&pattern).expect("dependency pattern is valid")
});

/// Extracts artifact references from SQL
pub struct DependencyExtractor;

impl DependencyExtractor {
    /// Extract all distinct artifacts referenced in the SQL
    ///
    /// Artifacts are returned in order of first occurrence.
    pub fn extract(sql: &str) -> Vec<Artifact> {
        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for captures in DEPENDENCY_PATTERN.captures_iter(sql) {
            let Some(identifier) = captures.get(1).or_else(|| captures.get(2)) else {
                continue;
            };

            if seen.insert(identifier.as_str()) {
                dependencies.push(identifier.as_str().to_string());
            }
        }

        dependencies
    }
}
