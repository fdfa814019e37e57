//! Text-related content stream operators.
//!
//! Tokenizing a content stream is the caller's job; this module only defines
//! the already-tokenized operators the text extractor understands. Anything
//! else arrives as [`Operator::Other`] and is ignored.

/// A content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    // Text object operators
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,

    // Text positioning operators
    /// Move text position (Td)
    Td {
        /// Horizontal offset
        tx: f64,
        /// Vertical offset
        ty: f64,
    },
    /// Move text position and set leading (TD)
    TD {
        /// Horizontal offset
        tx: f64,
        /// Vertical offset
        ty: f64,
    },
    /// Set text matrix (Tm)
    Tm {
        /// Matrix element a
        a: f64,
        /// Matrix element b
        b: f64,
        /// Matrix element c
        c: f64,
        /// Matrix element d
        d: f64,
        /// Matrix element e (x translation)
        e: f64,
        /// Matrix element f (y translation)
        f: f64,
    },
    /// Move to start of next line (T*)
    TStar,

    // Text showing operators
    /// Show text string (Tj)
    Tj {
        /// Text to show (byte array)
        text: Vec<u8>,
    },
    /// Show text with individual glyph positioning (TJ)
    TJ {
        /// Array of text strings and positioning adjustments
        array: Vec<TextElement>,
    },
    /// Move to next line and show text (')
    Quote {
        /// Text to show
        text: Vec<u8>,
    },
    /// Set spacing, move to next line and show text (")
    DoubleQuote {
        /// Word spacing
        word_space: f64,
        /// Character spacing
        char_space: f64,
        /// Text to show
        text: Vec<u8>,
    },

    // Text state operators
    /// Set character spacing (Tc)
    Tc {
        /// Character spacing
        char_space: f64,
    },
    /// Set word spacing (Tw)
    Tw {
        /// Word spacing
        word_space: f64,
    },
    /// Set horizontal scaling (Tz)
    Tz {
        /// Horizontal scaling percentage
        scale: f64,
    },
    /// Set text leading (TL)
    TL {
        /// Text leading
        leading: f64,
    },
    /// Set font and size (Tf)
    Tf {
        /// Font resource name
        font: String,
        /// Font size
        size: f64,
    },

    // Graphics state operators
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Modify current transformation matrix (cm)
    Cm {
        /// Matrix element a
        a: f64,
        /// Matrix element b
        b: f64,
        /// Matrix element c
        c: f64,
        /// Matrix element d
        d: f64,
        /// Matrix element e
        e: f64,
        /// Matrix element f
        f: f64,
    },

    /// Operator without a text meaning
    Other {
        /// Operator name
        name: String,
    },
}

/// Element in a TJ array (text showing with positioning).
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// Text string to show
    String(Vec<u8>),
    /// Positioning adjustment (in thousandths of a unit of text space)
    Offset(f64),
}

impl Operator {
    /// Operator name as written in a content stream.
    pub fn name(&self) -> &str {
        match self {
            Self::BeginText => "BT",
            Self::EndText => "ET",
            Self::Td { .. } => "Td",
            Self::TD { .. } => "TD",
            Self::Tm { .. } => "Tm",
            Self::TStar => "T*",
            Self::Tj { .. } => "Tj",
            Self::TJ { .. } => "TJ",
            Self::Quote { .. } => "'",
            Self::DoubleQuote { .. } => "\"",
            Self::Tc { .. } => "Tc",
            Self::Tw { .. } => "Tw",
            Self::Tz { .. } => "Tz",
            Self::TL { .. } => "TL",
            Self::Tf { .. } => "Tf",
            Self::SaveState => "q",
            Self::RestoreState => "Q",
            Self::Cm { .. } => "cm",
            Self::Other { name } => name,
        }
    }
}
