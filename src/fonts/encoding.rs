//! Byte-level text decoding for PDF strings.
//!
//! # Fallback chain
//!
//! A font's declared encoding is not always the encoding its strings are
//! actually written in. Decoding therefore walks an ordered list of
//! candidate strategies and keeps the first one that accepts the bytes:
//!
//! | Declared | Candidates |
//! |---|---|
//! | single-byte legacy | legacy, then UTF-16BE |
//! | UTF-16BE | UTF-16BE, then legacy |
//! | sparse table | table only (cannot fail) |
//!
//! # PDFDocEncoding
//!
//! Native strings handed to the decoder are first turned back into bytes
//! using PDFDocEncoding (ISO 32000-1:2008, Annex D.2), so they travel the
//! same path as raw operand bytes.

use std::collections::HashMap;

use super::charmap::{ByteEncoding, NamedEncoding};
use crate::error::{Error, Result};

/// One way of turning bytes into a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeStrategy<'a> {
    /// Each byte is the code point of the same value
    Latin1,
    /// Big-endian UTF-16 code units; fails only on an odd byte count
    Utf16Be,
    /// Table lookup per byte, Latin-1 for unmapped bytes
    Table(&'a HashMap<u8, String>),
}

impl DecodeStrategy<'_> {
    /// Decode `bytes`, failing when they do not fit this strategy.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16Be => decode_utf16be(bytes),
            Self::Table(table) => {
                let mut out = String::with_capacity(bytes.len());
                for &b in bytes.iter() {
                    match table.get(&b) {
                        Some(mapped) => out.push_str(mapped),
                        None => out.push(char::from(b)),
                    }
                }
                Ok(out)
            },
        }
    }

    /// Short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => NamedEncoding::Latin1.name(),
            Self::Utf16Be => NamedEncoding::Utf16Be.name(),
            Self::Table(_) => "table",
        }
    }
}

impl From<NamedEncoding> for DecodeStrategy<'_> {
    fn from(encoding: NamedEncoding) -> Self {
        match encoding {
            NamedEncoding::Latin1 => Self::Latin1,
            NamedEncoding::Utf16Be => Self::Utf16Be,
        }
    }
}

/// Ordered candidate strategies for `encoding`.
pub fn candidates(encoding: &ByteEncoding) -> Vec<DecodeStrategy<'_>> {
    match encoding {
        ByteEncoding::Named(named) => vec![(*named).into(), named.alternate().into()],
        ByteEncoding::Table(table) => vec![DecodeStrategy::Table(table)],
    }
}

/// Decode operand bytes under `encoding`, trying each candidate in turn.
///
/// Only when every candidate fails is the last error returned.
///
/// # Examples
///
/// ```
/// use pdf_textflow::fonts::{decode_bytes, ByteEncoding, NamedEncoding};
///
/// // Three bytes cannot be UTF-16BE; the legacy decoder takes over.
/// let enc = ByteEncoding::Named(NamedEncoding::Utf16Be);
/// assert_eq!(decode_bytes(b"abc", &enc).unwrap(), "abc");
/// ```
pub fn decode_bytes(bytes: &[u8], encoding: &ByteEncoding) -> Result<String> {
    let mut last_error = None;
    for (attempt, strategy) in candidates(encoding).into_iter().enumerate() {
        match strategy.decode(bytes) {
            Ok(text) => {
                if attempt > 0 {
                    log::debug!(
                        "Decoded {} bytes with fallback encoding {}",
                        bytes.len(),
                        strategy.name()
                    );
                }
                return Ok(text);
            },
            Err(e) => {
                log::trace!("Encoding {} rejected operand: {}", strategy.name(), e);
                last_error = Some(e);
            },
        }
    }
    Err(last_error.unwrap_or_else(|| Error::Decode("no decoding strategy available".to_string())))
}

fn decode_utf16be(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Decode(format!(
            "utf-16-be needs an even number of bytes, got {}",
            bytes.len()
        )));
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    // Lone surrogates cannot live in a `String`; they become U+FFFD and the
    // rest of the operand is kept.
    Ok(char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

/// Look up a byte in PDFDocEncoding.
///
/// Codes 0-127 are ASCII except the accent block at 0x18-0x1F; codes
/// 128-160 hold typographic punctuation; the rest is ISO Latin-1.
///
/// Returns `None` for the undefined codes 0x7F, 0x9F and 0xAD.
pub fn pdfdoc_encoding_lookup(code: u8) -> Option<char> {
    let ch = match code {
        0x18 => '\u{02D8}', // breve
        0x19 => '\u{02C7}', // caron
        0x1A => '\u{02C6}', // circumflex
        0x1B => '\u{02D9}', // dotaccent
        0x1C => '\u{02DD}', // hungarumlaut
        0x1D => '\u{02DB}', // ogonek
        0x1E => '\u{02DA}', // ring
        0x1F => '\u{02DC}', // tilde
        0x7F | 0x9F | 0xAD => return None,
        0x80 => '\u{2022}', // bullet
        0x81 => '\u{2020}', // dagger
        0x82 => '\u{2021}', // daggerdbl
        0x83 => '\u{2026}', // ellipsis
        0x84 => '\u{2014}', // emdash
        0x85 => '\u{2013}', // endash
        0x86 => '\u{0192}', // florin
        0x87 => '\u{2044}', // fraction
        0x88 => '\u{2039}', // guilsinglleft
        0x89 => '\u{203A}', // guilsinglright
        0x8A => '\u{2212}', // minus
        0x8B => '\u{2030}', // perthousand
        0x8C => '\u{201E}', // quotedblbase
        0x8D => '\u{201C}', // quotedblleft
        0x8E => '\u{201D}', // quotedblright
        0x8F => '\u{2018}', // quoteleft
        0x90 => '\u{2019}', // quoteright
        0x91 => '\u{201A}', // quotesinglbase
        0x92 => '\u{2122}', // trademark
        0x93 => '\u{FB01}', // fi
        0x94 => '\u{FB02}', // fl
        0x95 => '\u{0141}', // Lslash
        0x96 => '\u{0152}', // OE
        0x97 => '\u{0160}', // Scaron
        0x98 => '\u{0178}', // Ydieresis
        0x99 => '\u{017D}', // Zcaron
        0x9A => '\u{0131}', // dotlessi
        0x9B => '\u{0142}', // lslash
        0x9C => '\u{0153}', // oe
        0x9D => '\u{0161}', // scaron
        0x9E => '\u{017E}', // zcaron
        0xA0 => '\u{20AC}', // Euro
        other => char::from(other),
    };
    Some(ch)
}

fn pdfdoc_encoding_reverse(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    if code <= 0xFF {
        let byte = code as u8;
        if pdfdoc_encoding_lookup(byte) == Some(ch) {
            return Some(byte);
        }
    }
    (0x18..=0xA0u8).find(|&b| pdfdoc_encoding_lookup(b) == Some(ch))
}

/// Encode a native string as PDFDocEncoding bytes.
///
/// # Errors
///
/// Returns [`Error::Encode`] for the first character PDFDocEncoding cannot
/// represent.
///
/// # Examples
///
/// ```
/// use pdf_textflow::fonts::encode_pdfdoc;
///
/// assert_eq!(encode_pdfdoc("A\u{2022}").unwrap(), vec![0x41, 0x80]);
/// assert!(encode_pdfdoc("\u{05D0}").is_err());
/// ```
pub fn encode_pdfdoc(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| {
            pdfdoc_encoding_reverse(ch).ok_or_else(|| {
                Error::Encode(format!(
                    "U+{:04X} has no PDFDocEncoding byte",
                    u32::from(ch)
                ))
            })
        })
        .collect()
}
