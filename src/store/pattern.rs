//! Path search patterns
//!
//! A pattern without wildcards matches any path containing it. `*` and `%`
//! match any run of characters and `?` matches exactly one; a pattern with
//! wildcards must match the whole path.

use crate::error::StorageError;
use regex::{Regex, RegexBuilder};

const WILDCARDS: [char; 3] = ['*', '%', '?'];

/// Compiled path pattern
#[derive(Debug, Clone)]
pub enum PathPattern {
    Substring(String),
    Wildcard(Regex),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, StorageError> {
        if pattern.is_empty() {
            return Err(StorageError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }

        if !pattern.contains(WILDCARDS) {
            return Ok(PathPattern::Substring(pattern.to_string()));
        }

        let mut expr = String::with_capacity(pattern.len() * 2 + 2);
        expr.push('^');
        for c in pattern.chars() {
            match c {
                '*' | '%' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
            }
        }
        expr.push('$');

        // File names may contain newlines
        let regex = RegexBuilder::new(&expr)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| StorageError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(PathPattern::Wildcard(regex))
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Substring(needle) => path.contains(needle.as_str()),
            PathPattern::Wildcard(regex) => regex.is_match(path),
        }
    }
}
