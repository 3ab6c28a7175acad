//! Block segmentation
//!
//! Splits the content of an SFM file into one text block per entry.

use std::borrow::Cow;
use std::str::Split;

/// Default entry separator: a blank line
pub const DEFAULT_ENTRY_SEP: &str = "\n\n";

/// Split `content` on every occurrence of `entry_sep`.
///
/// Blocks that are blank are skipped; every other block gets `entry_prefix`
/// prepended, restoring the marker text consumed by the separator.
/// `entry_sep` must not be empty.
pub fn blocks<'a>(content: &'a str, entry_sep: &'a str, entry_prefix: &'a str) -> Blocks<'a> {
    Blocks {
        parts: content.split(entry_sep),
        prefix: entry_prefix,
    }
}

/// Lazy iterator returned by [`blocks`]
#[derive(Debug)]
pub struct Blocks<'a> {
    parts: Split<'a, &'a str>,
    prefix: &'a str,
}

impl Iterator for Blocks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.parts
            .by_ref()
            .find(|part| !part.trim().is_empty())
            .map(|part| format!("{}{}", self.prefix, part))
    }
}

/// Convert `\r\n` and lone `\r` line breaks to `\n`
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
