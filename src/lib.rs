// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]

//! # PDF Textflow
//!
//! Reading-order text reconstruction from PDF content stream operators.
//!
//! Simple PDF text carries positions, not lines or words. This crate takes
//! the already-tokenized text operators of a page and rebuilds readable
//! text from them:
//!
//! - **Geometry**: PDF affine matrices, orientation quadrants and the
//!   device-space origin of each run
//! - **Layout**: line breaks and word gaps inferred from how far the origin
//!   moved relative to the glyph height
//! - **Decoding**: per-font byte encodings with a fallback chain
//!   (Latin-1 and UTF-16BE), sparse code tables, and per-character
//!   substitutions
//! - **Bidi**: right-to-left runs (Hebrew, Arabic, or a custom range)
//!   assembled in reading order and flushed on direction changes
//! - **Delivery**: every flushed fragment can be handed to a visitor with
//!   an independent snapshot of the text state
//!
//! Parsing PDF files, fonts and content streams is left to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use pdf_textflow::{extract_text, CharMap, ExtractionConfig, NamedEncoding, Operator};
//!
//! let mut fonts = HashMap::new();
//! fonts.insert(
//!     "F1".to_string(),
//!     Arc::new(CharMap::new(NamedEncoding::Latin1, HashMap::new(), "F1")),
//! );
//!
//! let ops = vec![
//!     Operator::BeginText,
//!     Operator::Tf { font: "F1".to_string(), size: 12.0 },
//!     Operator::Td { tx: 72.0, ty: 720.0 },
//!     Operator::Tj { text: b"Hello".to_vec() },
//!     Operator::Td { tx: 0.0, ty: -14.0 },
//!     Operator::Tj { text: b"World".to_vec() },
//!     Operator::EndText,
//! ];
//!
//! let text = extract_text(&ops, &fonts, &ExtractionConfig::default())?;
//! assert_eq!(text, "Hello\nWorld");
//! # Ok::<(), pdf_textflow::Error>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or
//!   <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry
pub mod content;
pub mod geometry;

// Fonts and decoding
pub mod fonts;

// Text reconstruction
pub mod text;

// Page driver
pub mod extractors;

// Configuration
pub mod config;

// Re-exports
pub use config::ExtractionConfig;
pub use content::{Matrix, Operator, Orientation, Orientations, TextElement};
pub use error::{Error, Result};
pub use extractors::{extract_text, extract_text_with_visitor, CharMapResolver, TextExtractor};
pub use fonts::{ByteEncoding, CharMap, NamedEncoding};
pub use geometry::Point;
pub use text::{set_custom_rtl, RtlConfig, TextSink, TextSnapshot, TextState, TextVisitor};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
