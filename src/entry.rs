//! SFM entries
//!
//! An entry is one record of an SFM file, stored as the ordered list of its
//! `(marker, value)` pairs. Markers may repeat.

use crate::marker::marker_split;
use std::collections::HashMap;
use std::fmt;

/// One record: an ordered list of `(marker, value)` pairs
///
/// Entries built through [`Entry::from_text`] never hold empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pairs: Vec<(String, String)>,
}

impl Entry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already tokenized pairs without further processing
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Parse one block of SFM text.
    ///
    /// Values are stripped and pairs whose value ends up empty are dropped.
    pub fn from_text(block: &str) -> Self {
        let pairs = marker_split(block.trim())
            .filter_map(|(marker, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| (marker.to_string(), value.to_string()))
            })
            .collect();
        Self { pairs }
    }

    /// Append a pair
    pub fn push(&mut self, marker: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((marker.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.pairs.iter()
    }

    /// Consume the entry, returning its pairs
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Number of occurrences of each marker
    pub fn marker_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for (marker, _) in &self.pairs {
            *counts.entry(marker.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Value of the first pair with the given marker
    pub fn get(&self, marker: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Entry::get`], falling back to `default` when the marker is absent
    pub fn get_or<'a>(&'a self, marker: &str, default: &'a str) -> &'a str {
        self.get(marker).unwrap_or(default)
    }

    /// All values for the given marker, in entry order
    pub fn get_all(&self, marker: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(m, _)| m == marker)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Render the entry in canonical form: one `\marker value` line per pair
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (marker, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "\\{} {}", marker, value)?;
        }
        Ok(())
    }
}

impl From<Vec<(String, String)>> for Entry {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl FromIterator<(String, String)> for Entry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Entry {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl IntoIterator for Entry {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pairs: &[(&str, &str)]) -> Entry {
        pairs.iter().map(|(m, v)| (m.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_text_basic() {
        let e = Entry::from_text("\\lx foo\nbar\n\\ps n");
        assert_eq!(e, entry(&[("lx", "foo\nbar"), ("ps", "n")]));
    }

    #[test]
    fn test_from_text_drops_header_and_empty_values() {
        let e = Entry::from_text("\\_sh v3.0\n\\lx foo\n\\ge\n\\ps   \n");
        assert_eq!(e, entry(&[("lx", "foo")]));
    }

    #[test]
    fn test_from_text_strips_inner_values() {
        let e = Entry::from_text("\n\n\\lx foo\n\n\\ps n\n");
        assert_eq!(e, entry(&[("lx", "foo"), ("ps", "n")]));
    }

    #[test]
    fn test_get_first_match() {
        let e = entry(&[("lx", "a"), ("sn", "1"), ("sn", "2")]);
        assert_eq!(e.get("sn"), Some("1"));
        assert_eq!(e.get("xx"), None);
        assert_eq!(e.get_or("xx", "none"), "none");
        assert_eq!(e.get_or("lx", "none"), "a");
    }

    #[test]
    fn test_get_all_and_counts() {
        let e = entry(&[("lx", "a"), ("sn", "1"), ("ge", "g"), ("sn", "2")]);
        assert_eq!(e.get_all("sn"), vec!["1", "2"]);
        assert!(e.get_all("xx").is_empty());

        let counts = e.marker_counts();
        assert_eq!(counts["sn"], 2);
        assert_eq!(counts["lx"], 1);
        assert_eq!(counts.len(), 3);
        for (marker, count) in &counts {
            assert_eq!(e.get_all(marker).len(), *count);
        }
    }

    #[test]
    fn test_to_text() {
        let e = entry(&[("lx", "foo"), ("ps", "n")]);
        assert_eq!(e.to_text(), "\\lx foo\n\\ps n");
        assert_eq!(Entry::new().to_text(), "");
    }

    #[test]
    fn test_round_trip() {
        let e = Entry::from_text("\\lx foo\n\\ps n\n\\ge bar");
        assert_eq!(Entry::from_text(&e.to_text()), e);
    }

    #[test]
    fn test_push_and_iterate() {
        let mut e = Entry::new();
        e.push("lx", "foo");
        e.push("ps".to_string(), "n");
        assert_eq!(e.len(), 2);
        let markers: Vec<&str> = e.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(markers, vec!["lx", "ps"]);
        assert_eq!(e.into_pairs()[1], ("ps".to_string(), "n".to_string()));
    }
}
