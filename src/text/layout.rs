//! Line-break and word-space inference from glyph placement.
//!
//! Simple PDF text carries no line or word markers, only positions. Between
//! two placements the heuristic looks at how far the origin moved along the
//! reading axis (advance) and across it:
//!
//! - moving back against the reading direction by more than 0.8 of the
//!   glyph height starts a new line;
//! - staying on the line (advance under 0.3 of the glyph height) while
//!   jumping more than 15 space widths sideways separates two words.
//!
//! Smaller movements are treated as kerning jitter and ignored.

use crate::content::matrix::Matrix;
use crate::content::orientation::{orient, Orientation, Orientations};
use crate::error::{Error, Result};

use super::sink::TextSink;
use super::state::TextState;

/// Fraction of the glyph height that separates two lines.
pub const LINE_BREAK_RATIO: f64 = 0.8;
/// Maximum advance, as a fraction of the glyph height, for a same-line jump.
pub const SAME_LINE_RATIO: f64 = 0.3;
/// Sideways jump, in space widths, that separates two words.
pub const WORD_GAP_SPACES: f64 = 15.0;

/// A (CTM, text matrix) pair recorded at one glyph placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatrixPair {
    /// Current transformation matrix
    pub ctm: Matrix,
    /// Text matrix
    pub text_matrix: Matrix,
}

impl MatrixPair {
    /// Pair from its two matrices.
    pub fn new(ctm: Matrix, text_matrix: Matrix) -> Self {
        Self { ctm, text_matrix }
    }

    /// Pair currently held by `state`.
    pub fn of(state: &TextState) -> Self {
        Self::new(state.ctm, state.text_matrix)
    }

    /// Text matrix composed with the CTM.
    pub fn composed(&self) -> Matrix {
        self.text_matrix.then(&self.ctm)
    }
}

/// Outcome of one heuristic decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
    /// Pending text was flushed with a trailing newline
    LineBreak,
    /// A single space was appended to pending text
    Space,
    /// Nothing changed
    None,
}

/// Movement of the origin split into reading-axis components.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisDelta {
    /// Movement along the line-advance axis, positive towards the next line
    advance: f64,
    /// Movement along the baseline
    cross: f64,
}

impl AxisDelta {
    fn new(orientation: Orientation, dx: f64, dy: f64) -> Self {
        match orientation {
            Orientation::Upright => Self { advance: -dy, cross: dx },
            Orientation::Rotated180 => Self { advance: dy, cross: dx },
            Orientation::Rotated90 => Self { advance: dx, cross: dy },
            Orientation::Rotated270 => Self { advance: -dx, cross: dy },
        }
    }
}

/// Decide whether the move from `prev` to the placement in `state` breaks
/// the line or separates a word, updating `sink` accordingly.
///
/// Returns the new baseline, which is the placement in `state`.
///
/// # Errors
///
/// [`Error::UnsupportedOrientation`] when the current run's quadrant is not
/// in `orientations`. The buffers are untouched in that case.
pub fn check_line_break(
    sink: &mut TextSink<'_>,
    state: &TextState,
    prev: &MatrixPair,
    orientations: Orientations,
) -> Result<(MatrixPair, LayoutAction)> {
    let m_prev = prev.composed();
    let m = state.composed();
    let orientation = orient(&m);
    if !orientations.accepts(orientation) {
        log::trace!("Orientation {} not accepted, skipping layout check", orientation);
        return Err(Error::UnsupportedOrientation(orientation));
    }

    let f = state.font_size * m.scale_factor();
    let delta = AxisDelta::new(orientation, m.e - m_prev.e, m.f - m_prev.f);
    let action = decide(sink, state, delta, f);
    Ok((MatrixPair::of(state), action))
}

fn decide(sink: &mut TextSink<'_>, state: &TextState, delta: AxisDelta, f: f64) -> LayoutAction {
    // Nothing to terminate or separate yet.
    let Some(last) = sink.last_char() else {
        return LayoutAction::None;
    };

    if delta.advance > LINE_BREAK_RATIO * f {
        if last == '\n' {
            return LayoutAction::None;
        }
        sink.flush("\n", state);
        return LayoutAction::LineBreak;
    }

    if delta.advance.abs() < SAME_LINE_RATIO * f
        && delta.cross.abs() > WORD_GAP_SPACES * state.space_width() * f
        && last != ' '
    {
        sink.push_back(" ");
        return LayoutAction::Space;
    }

    LayoutAction::None
}
