//! The search bar query language
//!
//! A query is a whitespace separated list of terms. A term is either
//! `key:value` for one of the [`FIELDS`], or a bare value that matches
//! anywhere. Values containing whitespace are quoted with `"` or `'`.
//!
//! ```text
//! tag:biology user:jim "cell membrane" quote:'the "lipid" layer'
//! ```

use crate::multidict::MultiDict;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keys understood as facets; everything else is a free-text term
pub const FIELDS: &[&str] = &["group", "quote", "tag", "text", "uri", "user"];

/// Key under which free-text terms are stored
pub const ANY: &str = "any";

static TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:(?P<key>\w+):)?(?P<value>"[^"]*"|'[^']*'|\S+)"#)
        .expect("term pattern is valid")
});

/// Parse a query string into an ordered multi-dict of terms
pub fn parse(q: &str) -> MultiDict {
    let mut result = MultiDict::new();

    for captures in TERM_RE.captures_iter(q) {
        let raw = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
        let value = captures.name("value").map(|m| m.as_str()).unwrap_or_default();
        let key = captures
            .name("key")
            .map(|m| m.as_str().to_lowercase())
            .filter(|key| FIELDS.contains(&key.as_str()));

        match key {
            Some(key) => {
                let value = unquote(value);
                if !value.is_empty() {
                    result.add(key, value);
                }
            }
            None if captures.name("key").is_some() => result.add(ANY, raw),
            None => {
                let value = unquote(value);
                if !value.is_empty() {
                    result.add(ANY, value);
                }
            }
        }
    }

    result
}

/// Serialize terms back into a query string
pub fn unparse(query: &MultiDict) -> String {
    query
        .iter()
        .map(|(key, value)| {
            if key == ANY {
                escape_term(value)
            } else {
                format!("{}:{}", key, escape_term(value))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn escape_term(term: &str) -> String {
    if !term.chars().any(char::is_whitespace) {
        return term.to_string();
    }
    if term.contains('"') {
        format!("'{}'", term)
    } else {
        format!("\"{}\"", term)
    }
}
