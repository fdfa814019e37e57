//! Text state carried through one page's text-showing sequence.

use std::ops::Deref;
use std::sync::Arc;

use crate::content::matrix::{apply, Matrix};
use crate::content::orientation::{orient, Orientation};
use crate::fonts::CharMap;
use crate::geometry::Point;

/// Mutable state of the text run being reconstructed.
///
/// One instance is owned by a page extraction. Every field is a plain value
/// or a shared immutable [`CharMap`], so a clone is a complete, independent
/// snapshot.
#[derive(Debug, Clone)]
pub struct TextState {
    /// Current transformation matrix (user space → device space)
    pub ctm: Matrix,
    /// Text matrix (text space → user space)
    pub text_matrix: Matrix,
    /// Character map of the selected font
    pub charmap: Arc<CharMap>,
    /// Font size (Tf)
    pub font_size: f64,
    /// Horizontal character scale (Tz / 100)
    pub char_scale: f64,
    /// Word-spacing scale (1 + Tw)
    pub word_scale: f64,
    /// Width of the font's space glyph in font units
    pub raw_space_width: f64,
    /// Text leading (TL)
    pub leading: f64,
    /// Horizontal drift, in characters, accumulated by flushes inside a TJ array
    pub text_offset: f64,
    /// Whether the current run is right-to-left
    pub rtl: bool,
}

impl TextState {
    /// Create a state with identity matrices and `charmap` selected.
    pub fn new(charmap: Arc<CharMap>) -> Self {
        Self {
            ctm: Matrix::identity(),
            text_matrix: Matrix::identity(),
            raw_space_width: charmap.space_width(),
            charmap,
            font_size: 12.0,
            char_scale: 1.0,
            word_scale: 1.0,
            leading: 0.0,
            text_offset: 0.0,
            rtl: false,
        }
    }

    /// Select a font: its character map, space width and size.
    pub fn set_font(&mut self, charmap: Arc<CharMap>, size: f64) {
        self.raw_space_width = charmap.space_width();
        self.charmap = charmap;
        self.font_size = size;
    }

    /// Space-glyph width normalized to text space (raw width / 1000).
    pub fn space_width(&self) -> f64 {
        self.raw_space_width / 1000.0
    }

    /// Text matrix composed with the CTM.
    pub fn composed(&self) -> Matrix {
        self.text_matrix.then(&self.ctm)
    }

    /// Quadrant of the current run.
    pub fn orientation(&self) -> Orientation {
        orient(&self.composed())
    }

    /// Device-space origin of the next glyph.
    ///
    /// Inside a TJ array the offset correction approximates the width of
    /// text already flushed, one font size per character along x.
    pub fn origin(&self) -> Point {
        let mut p = apply(
            Point::new(self.text_matrix.e, self.text_matrix.f),
            &self.ctm,
        );
        if self.text_offset != 0.0 {
            let k = self.composed().scale_factor();
            p.x += self.text_offset * (self.font_size * k);
        }
        p
    }

    /// Drop the offset correction (start or end of a TJ array).
    pub fn reset_offset(&mut self) {
        self.text_offset = 0.0;
    }

    /// Independent copy for delivery to a visitor.
    pub fn snapshot(&self) -> TextSnapshot {
        TextSnapshot(self.clone())
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new(Arc::new(CharMap::default()))
    }
}

/// Read-only copy of a [`TextState`] taken when text was flushed.
///
/// Later changes to the live state never show up here.
#[derive(Debug, Clone)]
pub struct TextSnapshot(TextState);

impl TextSnapshot {
    /// Owned copy of the captured state.
    pub fn to_state(&self) -> TextState {
        self.0.clone()
    }
}

impl Deref for TextSnapshot {
    type Target = TextState;

    fn deref(&self) -> &TextState {
        &self.0
    }
}
