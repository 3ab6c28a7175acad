//! Marker tokenizer
//!
//! Splits a block of SFM text into `(marker, value)` pairs. A marker is a
//! backslash-prefixed token at the start of a line; its value runs on over any
//! following unmarked lines until the next marker or the end of the block.

use regex::Regex;
use std::str::Split;
use std::sync::LazyLock;

/// Matches a marker at the start of a (stripped) line, including the
/// whitespace separating it from the value.
pub static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\(?P<marker>[A-Za-z1-3][A-Za-z_]*)(?:\s+|$)").expect("Invalid marker regex")
});

static MARKER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z1-3][A-Za-z_]*$").expect("Invalid marker name regex"));

/// Lines starting with this sequence are SFM header fields and are skipped.
pub const HEADER_ESCAPE: &str = "\\_";

/// Check whether `name` is a valid marker name (without the backslash)
pub fn is_marker_name(name: &str) -> bool {
    MARKER_NAME.is_match(name)
}

/// Generate `(marker, value)` pairs from a block of `\n` separated lines.
///
/// Values of markers closed by a following marker are joined but not stripped;
/// the value of the last marker in the block is stripped. Callers that need
/// clean values (see [`crate::Entry::from_text`]) strip and filter themselves.
pub fn marker_split(block: &str) -> MarkerSplit<'_> {
    MarkerSplit {
        lines: block.split('\n'),
        marker: None,
        value: Vec::new(),
    }
}

/// Lazy iterator returned by [`marker_split`]
#[derive(Debug)]
pub struct MarkerSplit<'a> {
    lines: Split<'a, char>,
    marker: Option<&'a str>,
    value: Vec<&'a str>,
}

impl<'a> Iterator for MarkerSplit<'a> {
    type Item = (&'a str, String);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = line.trim();
            if line.starts_with(HEADER_ESCAPE) {
                continue;
            }

            match MARKER_PATTERN.captures(line) {
                Some(caps) => {
                    let end = caps.get(0).map_or(0, |m| m.end());
                    let name = caps.name("marker").map_or("", |m| m.as_str());
                    let closed = self.marker.replace(name);
                    let value = std::mem::replace(&mut self.value, vec![&line[end..]]);
                    if let Some(marker) = closed {
                        return Some((marker, value.join("\n")));
                    }
                }
                // Lines before the first marker end up in a value nobody emits.
                None => self.value.push(line),
            }
        }

        let marker = self.marker.take()?;
        let value = std::mem::take(&mut self.value).join("\n");
        Some((marker, value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(block: &str) -> Vec<(&str, String)> {
        marker_split(block).collect()
    }

    #[test]
    fn test_single_marker() {
        assert_eq!(pairs("\\lx foo"), vec![("lx", "foo".to_string())]);
    }

    #[test]
    fn test_continuation_lines() {
        assert_eq!(
            pairs("\\lx foo\nbar\n\\ps n"),
            vec![("lx", "foo\nbar".to_string()), ("ps", "n".to_string())]
        );
    }

    #[test]
    fn test_header_lines_skipped() {
        assert_eq!(pairs("\\_sh v3.0\n\\lx foo"), vec![("lx", "foo".to_string())]);
        assert_eq!(
            pairs("\\lx foo\n\\_DateStampHasFourDigitYear\nbar"),
            vec![("lx", "foo\nbar".to_string())]
        );
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        assert!(pairs("just some text\nand more").is_empty());
        assert!(pairs("").is_empty());
    }

    #[test]
    fn test_leading_text_discarded() {
        assert_eq!(pairs("stray\n\\lx foo"), vec![("lx", "foo".to_string())]);
    }

    #[test]
    fn test_inner_values_not_stripped() {
        assert_eq!(
            pairs("\\lx foo\n\n\\ps n\n\n"),
            vec![("lx", "foo\n".to_string()), ("ps", "n".to_string())]
        );
    }

    #[test]
    fn test_interior_blank_lines_kept() {
        assert_eq!(pairs("\\dt a\n\nb"), vec![("dt", "a\n\nb".to_string())]);
    }

    #[test]
    fn test_marker_without_value() {
        assert_eq!(
            pairs("\\lx\n\\ps n"),
            vec![("lx", String::new()), ("ps", "n".to_string())]
        );
    }

    #[test]
    fn test_marker_requires_separator() {
        // `\lx-foo` is not a marker, so it continues the open value
        assert_eq!(pairs("\\ge a\n\\lx-foo"), vec![("ge", "a\n\\lx-foo".to_string())]);
    }

    #[test]
    fn test_marker_first_char_digits() {
        assert_eq!(pairs("\\1s x"), vec![("1s", "x".to_string())]);
        assert!(pairs("\\4s x").is_empty());
    }

    #[test]
    fn test_inline_backslash_is_value() {
        assert_eq!(pairs("\\lx foo\\ps n"), vec![("lx", "foo\\ps n".to_string())]);
    }

    #[test]
    fn test_restartable() {
        let block = "\\lx a\n\\lx b";
        assert_eq!(marker_split(block).count(), 2);
        assert_eq!(marker_split(block).count(), 2);
    }

    #[test]
    fn test_is_marker_name() {
        assert!(is_marker_name("lx"));
        assert!(is_marker_name("sn_x"));
        assert!(is_marker_name("2a"));
        assert!(!is_marker_name(""));
        assert!(!is_marker_name("_sh"));
        assert!(!is_marker_name("l x"));
    }
}
