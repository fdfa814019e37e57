//! Error types for text reconstruction.
//!
//! This module defines all error types that can occur while decoding text
//! operands and ordering the resulting characters.

use crate::content::orientation::Orientation;

/// Result type alias for text reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during text reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The current run is rotated into a quadrant the caller did not accept.
    ///
    /// Raised only by the line/space heuristic; the caller decides whether
    /// to skip the run or abort.
    #[error("Unsupported text orientation: {0}")]
    UnsupportedOrientation(Orientation),

    /// Every candidate decoding strategy rejected the operand bytes
    #[error("Text decoding error: {0}")]
    Decode(String),

    /// A native string could not be mapped back to document bytes
    #[error("Text encoding error: {0}")]
    Encode(String),

    /// Font resource name that the resolver does not know
    #[error("Unknown font resource: {0}")]
    UnknownFont(String),

    /// Operator operand that cannot be used (e.g. non-finite number)
    #[error("Invalid operand for {operator}: {reason}")]
    InvalidOperand {
        /// Operator name as written in the content stream
        operator: String,
        /// Reason the operand was rejected
        reason: String,
    },
}
