//! Content stream geometry and operators.
//!
//! This module holds the matrix algebra and orientation classifier used to
//! place glyphs, plus the tokenized text operators consumed by the
//! extractor.

pub mod matrix;
pub mod operators;
pub mod orientation;

pub use matrix::{apply, compose, Matrix};
pub use operators::{Operator, TextElement};
pub use orientation::{orient, Orientation, Orientations};
