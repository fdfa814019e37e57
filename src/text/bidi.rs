//! Operand decoding and right-to-left run assembly.
//!
//! Decoded characters are classified one at a time (see
//! [`RtlConfig::classify`]) and placed into pending text so that pending
//! text is always in reading order for the current direction:
//!
//! - left-to-right units are appended;
//! - right-to-left units are prepended, so a run stored as `C B A` reads
//!   correctly when the glyphs were shown in the order `A B C`;
//! - neutral units follow the current direction.
//!
//! A direction change flushes the finished run to the output first.

use std::borrow::Cow;
use std::sync::Arc;

use crate::content::orientation::Orientations;
use crate::error::Result;
use crate::fonts::{decode_bytes, encode_pdfdoc, CharMap};

use super::rtl::{BidiClass, RtlConfig};
use super::sink::TextSink;
use super::state::TextState;

/// Operand of a text-showing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    /// String that was already decoded by the caller
    Text(&'a str),
    /// Raw string bytes as they appear in the content stream
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Operand<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

/// Decode an operand into characters using `charmap`'s byte encoding.
///
/// Native strings are first encoded back to PDFDocEncoding bytes so that
/// both operand forms share one decoding path. Substitutions are not
/// applied here.
pub fn decode_operand(operand: Operand<'_>, charmap: &CharMap) -> Result<String> {
    let bytes: Cow<'_, [u8]> = match operand {
        Operand::Text(text) => Cow::Owned(encode_pdfdoc(text)?),
        Operand::Bytes(bytes) => Cow::Borrowed(bytes),
    };
    decode_bytes(&bytes, charmap.encoding())
}

/// Decode `operand` and place its characters into `sink`.
///
/// `in_array` must be set while processing the strings of a TJ array; each
/// run flushed then advances the state's offset correction by the number of
/// characters flushed.
///
/// Returns `Ok(false)` without touching anything when the current run's
/// orientation is not accepted.
///
/// # Errors
///
/// Decoding errors, when no candidate encoding accepts the operand.
///
/// # Examples
///
/// ```
/// use pdf_textflow::content::Orientations;
/// use pdf_textflow::text::{show_text, Operand, RtlConfig, TextSink, TextState};
///
/// let mut st = TextState::default();
/// let mut sink = TextSink::new();
/// let rtl = RtlConfig::default();
/// show_text(&mut sink, &mut st, Operand::Bytes(b"Hi"), Orientations::ALL, &rtl, false)?;
/// assert_eq!(sink.pending(), "Hi");
/// # Ok::<(), pdf_textflow::error::Error>(())
/// ```
pub fn show_text(
    sink: &mut TextSink<'_>,
    state: &mut TextState,
    operand: Operand<'_>,
    orientations: Orientations,
    rtl: &RtlConfig,
    in_array: bool,
) -> Result<bool> {
    let orientation = state.orientation();
    if !orientations.accepts(orientation) {
        log::trace!("Skipping text shown at unaccepted orientation {}", orientation);
        return Ok(false);
    }

    let charmap = Arc::clone(&state.charmap);
    let decoded = decode_operand(operand, &charmap)?;
    let mut buf = [0u8; 4];
    for ch in decoded.chars() {
        let unit = match charmap.substitution(ch) {
            Some(replacement) => replacement,
            None => &*ch.encode_utf8(&mut buf),
        };
        place_unit(sink, state, unit, rtl, in_array);
    }
    Ok(true)
}

/// Place text that is neutral by construction (e.g. an inferred space)
/// according to the current direction.
pub fn push_neutral(sink: &mut TextSink<'_>, state: &TextState, text: &str) {
    if state.rtl {
        sink.push_front(text);
    } else {
        sink.push_back(text);
    }
}

fn place_unit(
    sink: &mut TextSink<'_>,
    state: &mut TextState,
    unit: &str,
    rtl: &RtlConfig,
    in_array: bool,
) {
    match rtl.classify(unit) {
        BidiClass::Neutral => push_neutral(sink, state, unit),
        BidiClass::RightToLeft => {
            if !state.rtl {
                state.rtl = true;
                flush_run(sink, state, in_array);
            }
            sink.push_front(unit);
        },
        BidiClass::LeftToRight => {
            if state.rtl {
                state.rtl = false;
                flush_run(sink, state, in_array);
            }
            sink.push_back(unit);
        },
    }
}

fn flush_run(sink: &mut TextSink<'_>, state: &mut TextState, in_array: bool) {
    let flushed = sink.flush("", state);
    if in_array {
        state.text_offset += flushed as f64;
    }
}
