//! Per-font character maps.
//!
//! A [`CharMap`] tells the decoder how to turn the bytes of a text-showing
//! operand into characters and which characters to substitute afterwards
//! (typically the result of a `/ToUnicode` CMap or a `/Differences` array).
//! Building one from font dictionaries is the font resolver's job; once built
//! it is never mutated and is shared through an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Raw space-glyph width used when a font does not report one (font units).
pub const DEFAULT_SPACE_WIDTH: f64 = 250.0;

/// Byte encodings with a fixed, named decoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedEncoding {
    /// Single-byte legacy decoding: every byte is the code point of the same value
    Latin1,
    /// Two bytes per code unit, big-endian (CID fonts with Identity-H and similar)
    Utf16Be,
}

impl NamedEncoding {
    /// The encoding tried when this one rejects the bytes.
    ///
    /// Producers regularly mislabel single-byte text as two-byte and the
    /// other way around, so the two legacy encodings fall back to each other.
    pub fn alternate(self) -> Self {
        match self {
            Self::Latin1 => Self::Utf16Be,
            Self::Utf16Be => Self::Latin1,
        }
    }

    /// Canonical codec name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "charmap",
            Self::Utf16Be => "utf-16-be",
        }
    }
}

impl fmt::Display for NamedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "charmap" | "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            "utf-16-be" | "utf16-be" | "utf-16be" => Ok(Self::Utf16Be),
            other => Err(Error::Decode(format!("unknown encoding name '{}'", other))),
        }
    }
}

/// How operand bytes become characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ByteEncoding {
    /// A fixed codec, with fallback to its alternate
    Named(NamedEncoding),
    /// Sparse byte table; unmapped bytes decode as themselves
    Table(HashMap<u8, String>),
}

impl Default for ByteEncoding {
    fn default() -> Self {
        Self::Named(NamedEncoding::Latin1)
    }
}

impl From<NamedEncoding> for ByteEncoding {
    fn from(encoding: NamedEncoding) -> Self {
        Self::Named(encoding)
    }
}

impl From<HashMap<u8, String>> for ByteEncoding {
    fn from(table: HashMap<u8, String>) -> Self {
        Self::Table(table)
    }
}

/// Immutable decoding descriptor for one font resource.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use pdf_textflow::fonts::{CharMap, NamedEncoding};
///
/// let mut subs = HashMap::new();
/// subs.insert('\u{FB01}', "fi".to_string());
///
/// let cmap = CharMap::new(NamedEncoding::Latin1, subs, "F1").with_space_width(278.0);
/// assert_eq!(cmap.substitution('\u{FB01}'), Some("fi"));
/// assert_eq!(cmap.to_string(), "F1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CharMap {
    encoding: ByteEncoding,
    substitutions: HashMap<char, String>,
    resource_name: String,
    space_width: f64,
    description: Option<String>,
}

impl CharMap {
    /// Create a character map for the font resource `resource_name`.
    pub fn new(
        encoding: impl Into<ByteEncoding>,
        substitutions: HashMap<char, String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            encoding: encoding.into(),
            substitutions,
            resource_name: resource_name.into(),
            space_width: DEFAULT_SPACE_WIDTH,
            description: None,
        }
    }

    /// Set the raw width of the font's space glyph (font units).
    pub fn with_space_width(mut self, width: f64) -> Self {
        self.space_width = width;
        self
    }

    /// Attach a human-readable description of the font (base font name etc.).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Decoding strategy for operand bytes.
    pub fn encoding(&self) -> &ByteEncoding {
        &self.encoding
    }

    /// Replacement for `ch`, if the font remaps it.
    pub fn substitution(&self, ch: char) -> Option<&str> {
        self.substitutions.get(&ch).map(String::as_str)
    }

    /// Number of substitution entries.
    pub fn substitution_count(&self) -> usize {
        self.substitutions.len()
    }

    /// Font resource name (e.g. `F1`), not the real font name.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Raw space-glyph width in font units.
    pub fn space_width(&self) -> f64 {
        self.space_width
    }

    /// Optional description of the font.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Default for CharMap {
    /// Latin-1 decoding, no substitutions, unnamed resource.
    fn default() -> Self {
        Self::new(ByteEncoding::default(), HashMap::new(), "")
    }
}

impl fmt::Display for CharMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name)
    }
}
