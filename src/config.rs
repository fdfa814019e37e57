//! Configuration for text extraction.

use serde::{Deserialize, Serialize};

use crate::content::orientation::Orientations;
use crate::text::rtl::RtlConfig;

/// Text extraction configuration.
///
/// # Examples
///
/// ```
/// use pdf_textflow::config::ExtractionConfig;
/// use pdf_textflow::content::Orientations;
///
/// let config = ExtractionConfig::new()
///     .with_orientations(Orientations::UPRIGHT)
///     .with_tj_space_insertion(false);
/// assert!(!config.tj_space_insertion);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Orientations whose text is extracted.
    pub orientations: Orientations,

    /// Custom right-to-left parameters; `None` uses the process-wide default
    /// captured when extraction starts.
    pub rtl: Option<RtlConfig>,

    /// Insert a space for TJ adjustments at least one space glyph wide.
    pub tj_space_insertion: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            orientations: Orientations::ALL,
            rtl: None,
            tj_space_insertion: true,
        }
    }

    /// Restrict extraction to `orientations`.
    pub fn with_orientations(mut self, orientations: Orientations) -> Self {
        self.orientations = orientations;
        self
    }

    /// Use an explicit right-to-left configuration.
    pub fn with_rtl(mut self, rtl: RtlConfig) -> Self {
        self.rtl = Some(rtl);
        self
    }

    /// Enable TJ adjustment spaces.
    pub fn with_tj_space_insertion(mut self, enable: bool) -> Self {
        self.tj_space_insertion = enable;
        self
    }

    /// The right-to-left configuration extraction will use.
    pub fn resolved_rtl(&self) -> RtlConfig {
        self.rtl.clone().unwrap_or_else(RtlConfig::global)
    }
}
