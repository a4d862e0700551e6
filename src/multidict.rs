//! Ordered multi-valued map
//!
//! Used for parsed search queries (`tag:a tag:b`) and for request query /
//! form parameters, where keys repeat and order must survive a round trip
//! through a redirect URL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiDict {
    items: Vec<(String, String)>,
}

impl MultiDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in insertion order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|(k, _)| k == key)
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push((key.into(), value.into()));
    }

    /// Replace every value of `key` with a single value appended at the end
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.remove_all(&key);
        self.items.push((key, value.into()));
    }

    /// Remove every value of `key`, returning them in order
    pub fn remove_all(&mut self, key: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.items.retain(|(k, v)| {
            if k == key {
                removed.push(v.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Pop `key` if and only if it has exactly one value
    pub fn pop_single(&mut self, key: &str) -> Option<String> {
        if self.get_all(key).len() != 1 {
            return None;
        }
        self.remove_all(key).pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse an `application/x-www-form-urlencoded` string, keeping order and repeats
    pub fn from_urlencoded(input: &str) -> Self {
        url::form_urlencoded::parse(input.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// `application/x-www-form-urlencoded` rendering of all pairs
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.items {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl From<Vec<(String, String)>> for MultiDict {
    fn from(items: Vec<(String, String)>) -> Self {
        Self { items }
    }
}

impl FromIterator<(String, String)> for MultiDict {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
