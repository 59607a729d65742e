//! SQL-style catalog filter patterns (`SHOW TABLES LIKE 't_order%'`).
//!
//! `%` matches any run of characters, the configured single-character marker
//! matches exactly one. Matching is whole-string: `t_order` does not match
//! candidates merely containing it.

use regex::Regex;

use prism_common::{CatalogFilterConfig, MergeError, PrismResult};

/// Filter `candidates` through `pattern`, preserving their original order.
///
/// An absent or empty pattern keeps every candidate. A pattern that matches
/// nothing yields an empty list: a valid result, not an error.
pub fn filter(
    candidates: &[String],
    pattern: Option<&str>,
    config: &CatalogFilterConfig,
) -> PrismResult<Vec<String>> {
    let pattern = match pattern {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(candidates.to_vec()),
    };
    let regex = compile(pattern, config)?;
    Ok(candidates
        .iter()
        .filter(|name| regex.is_match(name))
        .cloned()
        .collect())
}

/// Compile a wildcard pattern to an anchored regex. Every non-wildcard
/// character is escaped, so regex metacharacters in the pattern match
/// themselves instead of leaking regex syntax into the filter.
pub fn compile(pattern: &str, config: &CatalogFilterConfig) -> PrismResult<Regex> {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for ch in pattern.chars() {
        if ch == '%' {
            translated.push_str(".*");
        } else if ch == config.single_char_wildcard {
            translated.push('.');
        } else {
            translated.push_str(&regex::escape(&ch.to_string()));
        }
    }
    translated.push('$');
    Regex::new(&translated).map_err(|e| {
        MergeError::BadPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
