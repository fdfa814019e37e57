//! Text extraction from PDF content streams.
//!
//! Drives the text engine over the operators of one page.

pub mod text;

pub use text::{extract_text, extract_text_with_visitor, CharMapResolver, TextExtractor};
