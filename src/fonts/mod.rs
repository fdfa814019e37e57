//! Font-side inputs to text decoding.
//!
//! Resolving font dictionaries and embedded CMaps happens elsewhere; this
//! module defines the immutable [`CharMap`] those collaborators produce and
//! the byte decoders that consume it.

pub mod charmap;
pub mod encoding;

pub use charmap::{ByteEncoding, CharMap, NamedEncoding, DEFAULT_SPACE_WIDTH};
pub use encoding::{decode_bytes, encode_pdfdoc, pdfdoc_encoding_lookup, DecodeStrategy};
