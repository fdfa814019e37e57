//! Reading-order text reconstruction.
//!
//! The pieces, leaves first:
//!
//! - [`rtl`]: direction classification and the custom right-to-left range
//! - [`state`]: the per-page text state and its snapshots
//! - [`sink`]: pending/output buffers and visitor delivery
//! - [`layout`]: line-break and word-space inference from geometry
//! - [`bidi`]: operand decoding and right-to-left run assembly

pub mod bidi;
pub mod layout;
pub mod rtl;
pub mod sink;
pub mod state;

pub use bidi::{decode_operand, push_neutral, show_text, Operand};
pub use layout::{check_line_break, LayoutAction, MatrixPair};
pub use rtl::{set_custom_rtl, BidiClass, CodePoint, RtlConfig, Specials};
pub use sink::{CollectingVisitor, TextSink, TextVisitor};
pub use state::{TextSnapshot, TextState};
