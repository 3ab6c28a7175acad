//! sfmx: SIL Standard Format (SFM) files
//!
//! SFM is the record format of Toolbox and of SFM exports from FLEx and ELAN.
//! Each entry is a sequence of `\marker value` fields; values may run on over
//! several lines, and entries are usually separated by blank lines.
//!
//! This implementation supports
//! - multiline values
//! - custom entry separators and prefixes
//! - marker renaming on read
//! - lossless rewriting of files without header fields

pub mod collection;
pub mod config;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod logger;
pub mod marker;
pub mod segment;

// Re-export commonly used types for convenience
pub use collection::{Collection, ReadOptions};
pub use config::{Config, load_config};
pub use entry::Entry;
pub use error::{Error, Result};
pub use marker::marker_split;
pub use segment::blocks;
