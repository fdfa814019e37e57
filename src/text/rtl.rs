//! Direction classification for decoded characters.
//!
//! Classification is a code-point range heuristic, not the Unicode
//! Bidirectional Algorithm. Hebrew, Arabic, Syriac and their presentation
//! forms are right-to-left; ASCII punctuation and the general punctuation,
//! currency, letterlike and arrow blocks are neutral; everything else is
//! left-to-right. Digits are left-to-right.
//!
//! Callers can widen the right-to-left set with a custom code-point range
//! and force individual code points to neutral through [`RtlConfig`]. The
//! value is threaded explicitly through decoding; [`set_custom_rtl`] keeps a
//! process-wide default for call sites that do not pass one.

use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Value meaning "no custom bound" for [`RtlConfig::min`]/[`RtlConfig::max`].
pub const CUSTOM_RTL_DISABLED: i64 = -1;

lazy_static! {
    static ref CUSTOM_RTL: RwLock<RtlConfig> = RwLock::new(RtlConfig::default());
}

/// Direction class of one decoded unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidiClass {
    /// Follows whatever direction is current
    Neutral,
    /// Starts or continues a right-to-left run
    RightToLeft,
    /// Starts or continues a left-to-right run
    LeftToRight,
}

/// A code point given either as a number or as a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePoint(pub i64);

impl From<i64> for CodePoint {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for CodePoint {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl From<u32> for CodePoint {
    fn from(value: u32) -> Self {
        Self(i64::from(value))
    }
}

impl From<char> for CodePoint {
    fn from(ch: char) -> Self {
        Self(i64::from(u32::from(ch)))
    }
}

/// Replacement list of special (always neutral) code points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Specials(pub Vec<i64>);

impl From<Vec<i64>> for Specials {
    fn from(codes: Vec<i64>) -> Self {
        Self(codes)
    }
}

impl From<&[i64]> for Specials {
    fn from(codes: &[i64]) -> Self {
        Self(codes.to_vec())
    }
}

impl From<&str> for Specials {
    fn from(chars: &str) -> Self {
        Self(chars.chars().map(|c| CodePoint::from(c).0).collect())
    }
}

/// Custom right-to-left range and neutral code points.
///
/// The range is inclusive and disabled while either bound is negative
/// (no valid code point lies in `-1..=-1`).
///
/// # Examples
///
/// ```
/// use pdf_textflow::text::rtl::{BidiClass, RtlConfig};
///
/// let config = RtlConfig::default().with_range('a', 'z').with_specials("x");
/// assert_eq!(config.classify_char('q'), BidiClass::RightToLeft);
/// assert_eq!(config.classify_char('x'), BidiClass::Neutral);
/// assert_eq!(config.classify_char('Q'), BidiClass::LeftToRight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlConfig {
    /// Lowest code point of the custom right-to-left range
    pub min: i64,
    /// Highest code point of the custom right-to-left range
    pub max: i64,
    /// Code points always treated as neutral
    pub specials: Vec<i64>,
}

impl Default for RtlConfig {
    fn default() -> Self {
        Self {
            min: CUSTOM_RTL_DISABLED,
            max: CUSTOM_RTL_DISABLED,
            specials: Vec::new(),
        }
    }
}

impl RtlConfig {
    /// Create a configuration from its three values.
    pub fn new(
        min: impl Into<CodePoint>,
        max: impl Into<CodePoint>,
        specials: impl Into<Specials>,
    ) -> Self {
        Self {
            min: min.into().0,
            max: max.into().0,
            specials: specials.into().0,
        }
    }

    /// Set the custom right-to-left range.
    pub fn with_range(mut self, min: impl Into<CodePoint>, max: impl Into<CodePoint>) -> Self {
        self.min = min.into().0;
        self.max = max.into().0;
        self
    }

    /// Replace the special code points.
    pub fn with_specials(mut self, specials: impl Into<Specials>) -> Self {
        self.specials = specials.into().0;
        self
    }

    /// Copy of this configuration with the given values replaced; `None`
    /// keeps the current value.
    pub fn updated(
        &self,
        min: Option<CodePoint>,
        max: Option<CodePoint>,
        specials: Option<Specials>,
    ) -> Self {
        Self {
            min: min.map_or(self.min, |c| c.0),
            max: max.map_or(self.max, |c| c.0),
            specials: specials.map_or_else(|| self.specials.clone(), |s| s.0),
        }
    }

    /// The values as a `(min, max, specials)` triple.
    pub fn as_tuple(&self) -> (i64, i64, &[i64]) {
        (self.min, self.max, &self.specials)
    }

    /// Snapshot of the process-wide default.
    pub fn global() -> Self {
        CUSTOM_RTL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn in_custom_range(&self, code: i64) -> bool {
        self.min <= code && code <= self.max
    }

    fn is_special(&self, code: i64) -> bool {
        self.specials.contains(&code)
    }

    /// Classify a single character.
    pub fn classify_char(&self, ch: char) -> BidiClass {
        let cp = u32::from(ch);
        let code = i64::from(cp);
        if cp <= 0x2F
            || (0x3A..=0x40).contains(&cp)
            || (0x2000..=0x206F).contains(&cp)
            || (0x20A0..=0x21FF).contains(&cp)
            || self.is_special(code)
        {
            BidiClass::Neutral
        } else if (0x0590..=0x08FF).contains(&cp)
            || (0xFB1D..=0xFDFF).contains(&cp)
            || (0xFE70..=0xFEFF).contains(&cp)
            || self.in_custom_range(code)
        {
            BidiClass::RightToLeft
        } else {
            BidiClass::LeftToRight
        }
    }

    /// Classify a decoded unit, which may be a multi-character substitution.
    ///
    /// Anything other than exactly one character is neutral.
    pub fn classify(&self, unit: &str) -> BidiClass {
        let mut chars = unit.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.classify_char(ch),
            _ => BidiClass::Neutral,
        }
    }
}

/// Change the process-wide custom right-to-left parameters.
///
/// Each argument is optional; `None` leaves the stored value unchanged.
/// Code points may be given as integers or characters, and the special list
/// as integers or as a string of characters. Returns the resulting values.
///
/// Writes race with extractions that read the default concurrently; set it
/// once before extraction starts, or pass an explicit [`RtlConfig`] instead.
///
/// # Examples
///
/// ```
/// use pdf_textflow::text::rtl::{set_custom_rtl, Specials};
///
/// let config = set_custom_rtl(Some('a'.into()), Some('z'.into()), Some(Specials::from("XY")));
/// assert_eq!(config.as_tuple(), (97, 122, &[88, 89][..]));
/// # set_custom_rtl(Some((-1i64).into()), Some((-1i64).into()), Some(Specials::default()));
/// ```
pub fn set_custom_rtl(
    min: Option<CodePoint>,
    max: Option<CodePoint>,
    specials: Option<Specials>,
) -> RtlConfig {
    let mut guard = CUSTOM_RTL.write().unwrap_or_else(PoisonError::into_inner);
    *guard = guard.updated(min, max, specials);
    log::debug!(
        "Custom RTL range set to {}..={} with {} special code points",
        guard.min,
        guard.max,
        guard.specials.len()
    );
    guard.clone()
}
