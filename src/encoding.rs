//! Character encoding at the read/write boundary
//!
//! Encoding labels follow the WHATWG names understood by `encoding_rs`
//! ("utf-8", "utf8", "latin1", "windows-1252", "utf-16le", ...).
//!
//! WHATWG maps "latin1" and "iso-8859-1" to windows-1252, not ISO-8859-1:
//! bytes 0x80-0x9F decode to typographic characters (0x93 is U+201C) instead
//! of C1 controls, and C1 controls cannot be encoded.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::borrow::Cow;

/// Default encoding for reading and writing SFM files
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Look up an encoding by label
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode `bytes`, dropping a leading BOM that matches `encoding`.
///
/// Malformed input is an error rather than being replaced.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, str>> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(Error::Decode {
            encoding: encoding.name(),
        });
    }
    Ok(text)
}

/// Encode `text` for output.
///
/// Characters the encoding cannot represent are an error.
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding) -> Result<Cow<'a, [u8]>> {
    // encoding_rs only decodes UTF-16; its encoder falls back to UTF-8
    if encoding == UTF_16LE {
        return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect()));
    }
    if encoding == UTF_16BE {
        return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect()));
    }

    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(Error::Encode {
            encoding: encoding.name(),
        });
    }
    Ok(bytes)
}
