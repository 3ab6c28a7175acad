//! Reading and writing whole SFM files
//!
//! A [`Collection`] holds the entries of one file. Simple usage to normalize
//! a file:
//!
//! ```no_run
//! use sfmx::{Collection, ReadOptions};
//!
//! # fn main() -> sfmx::Result<()> {
//! let options = ReadOptions::default().with_marker("lexeme", "lx");
//! let sfm = Collection::from_file("dict.db", &options)?;
//! sfm.write_file("dict.db", "utf-8")?;
//! # Ok(())
//! # }
//! ```

use crate::encoding;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::marker::is_marker_name;
use crate::segment::{DEFAULT_ENTRY_SEP, blocks, normalize_newlines};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// How to split, decode and rename while reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Encoding label of the input
    pub encoding: String,
    /// Source marker name -> replacement marker name
    pub marker_map: HashMap<String, String>,
    /// Separator between entries
    pub entry_sep: String,
    /// Text prepended to every block; the separator when `None` or empty
    pub entry_prefix: Option<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: encoding::DEFAULT_ENCODING.to_string(),
            marker_map: HashMap::new(),
            entry_sep: DEFAULT_ENTRY_SEP.to_string(),
            entry_prefix: None,
        }
    }
}

impl ReadOptions {
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Replace the marker map.
    ///
    /// Keys and values must be valid marker names (`[A-Za-z1-3][A-Za-z_]*`);
    /// reading rejects targets such as `"lx2"` with [`Error::InvalidOption`].
    pub fn with_marker_map(mut self, marker_map: HashMap<String, String>) -> Self {
        self.marker_map = marker_map;
        self
    }

    /// Rename `from` to `to` while reading.
    ///
    /// Both must be valid marker names, as for [`ReadOptions::with_marker_map`].
    pub fn with_marker(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.marker_map.insert(from.into(), to.into());
        self
    }

    pub fn with_entry_sep(mut self, entry_sep: impl Into<String>) -> Self {
        self.entry_sep = entry_sep.into();
        self
    }

    pub fn with_entry_prefix(mut self, entry_prefix: impl Into<String>) -> Self {
        self.entry_prefix = Some(entry_prefix.into());
        self
    }

    /// The prefix actually prepended to blocks; an unset or empty prefix
    /// falls back to the separator
    pub fn effective_prefix(&self) -> &str {
        self.entry_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(&self.entry_sep)
    }

    /// Map a marker through the marker map, leaving unmapped markers alone
    pub fn map_marker<'a>(&'a self, marker: &'a str) -> &'a str {
        self.marker_map.get(marker).map_or(marker, String::as_str)
    }

    /// Reject options no file could be read with
    pub fn validate(&self) -> Result<()> {
        if self.entry_sep.is_empty() {
            return Err(Error::InvalidOption("entry separator must not be empty".to_string()));
        }
        for (from, to) in &self.marker_map {
            if !is_marker_name(from) || !is_marker_name(to) {
                return Err(Error::InvalidOption(format!(
                    "invalid marker mapping: {} -> {}",
                    from, to
                )));
            }
        }
        Ok(())
    }
}

/// The entries of one SFM file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<Entry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a new collection from a file
    pub fn from_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let mut sfm = Self::new();
        sfm.read_file(path, options)?;
        Ok(sfm)
    }

    /// Extend the collection with the entries of a file.
    ///
    /// Returns the number of entries appended.
    pub fn read_file(&mut self, path: impl AsRef<Path>, options: &ReadOptions) -> Result<usize> {
        let path = path.as_ref();
        options.validate()?;
        let encoding = encoding::resolve(&options.encoding)?;

        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = encoding::decode(&bytes, encoding)?;

        let added = self.read_str(&text, options)?;
        debug!(path = %path.display(), entries = added, "read sfm file");
        Ok(added)
    }

    /// Extend the collection with the entries read from `reader`
    pub fn read_from<R: Read>(&mut self, mut reader: R, options: &ReadOptions) -> Result<usize> {
        options.validate()?;
        let encoding = encoding::resolve(&options.encoding)?;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = encoding::decode(&bytes, encoding)?;

        self.read_str(&text, options)
    }

    /// Extend the collection with the entries of already decoded text
    pub fn read_str(&mut self, text: &str, options: &ReadOptions) -> Result<usize> {
        self.read_str_with(text, options, Entry::from_pairs)
    }

    /// Like [`Collection::read_str`], building each entry with `make_entry`.
    ///
    /// `make_entry` receives the cleaned and renamed pairs of one block.
    /// Entries it returns empty are not added.
    pub fn read_str_with<F>(
        &mut self,
        text: &str,
        options: &ReadOptions,
        mut make_entry: F,
    ) -> Result<usize>
    where
        F: FnMut(Vec<(String, String)>) -> Entry,
    {
        options.validate()?;
        let text = normalize_newlines(text);
        let before = self.entries.len();

        for block in blocks(&text, &options.entry_sep, options.effective_prefix()) {
            let pairs: Vec<(String, String)> = Entry::from_text(&block)
                .into_iter()
                .map(|(marker, value)| (options.map_marker(&marker).to_string(), value))
                .collect();
            if pairs.is_empty() {
                trace!(block = %block.trim(), "skipping block without markers");
                continue;
            }

            let entry = make_entry(pairs);
            if !entry.is_empty() {
                self.entries.push(entry);
            }
        }

        let added = self.entries.len() - before;
        debug!(entries = added, total = self.entries.len(), "parsed sfm text");
        Ok(added)
    }

    /// Replace each entry with the visitor's result, keeping it when the
    /// visitor returns `None` or an empty entry
    pub fn visit<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&Entry) -> Option<Entry>,
    {
        for i in 0..self.entries.len() {
            if let Some(replacement) = visitor(&self.entries[i]).filter(|e| !e.is_empty()) {
                self.entries[i] = replacement;
            }
        }
    }

    /// Render the whole collection: every entry followed by a blank line
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.to_text());
            text.push_str("\n\n");
        }
        text
    }

    /// Write the collection to `writer` in the given encoding
    pub fn write_to<W: Write>(&self, mut writer: W, encoding: &str) -> Result<()> {
        let encoding = encoding::resolve(encoding)?;
        let text = self.to_text();
        let bytes = encoding::encode(&text, encoding)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        debug!(entries = self.entries.len(), encoding = encoding.name(), "wrote sfm text");
        Ok(())
    }

    /// Write the collection to a file, replacing its contents
    pub fn write_file(&self, path: impl AsRef<Path>, encoding: &str) -> Result<()> {
        let path = path.as_ref();
        let encoding = encoding::resolve(encoding)?;
        let text = self.to_text();
        let bytes = encoding::encode(&text, encoding)?;

        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        debug!(path = %path.display(), entries = self.entries.len(), encoding = encoding.name(), "wrote sfm file");
        Ok(())
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Collection {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
