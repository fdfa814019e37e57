//! Quadrant classification of text direction.
//!
//! Only the reading axis matters to the line/space heuristic, so every
//! rotation is forced into one of four buckets.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::matrix::Matrix;

/// Threshold below which the `d` component counts as zero.
const ORIENTATION_EPSILON: f64 = 1e-6;

/// Device-space reading direction of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Upright text, baseline along +x
    Upright,
    /// Rotated a quarter turn counter-clockwise, baseline along +y
    Rotated90,
    /// Upside down, baseline along -x
    Rotated180,
    /// Rotated a quarter turn clockwise, baseline along -y
    Rotated270,
}

impl Orientation {
    /// Angle of this bucket in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Self::Upright => 0,
            Self::Rotated90 => 90,
            Self::Rotated180 => 180,
            Self::Rotated270 => 270,
        }
    }

    /// Set flag for this orientation.
    pub fn flag(self) -> Orientations {
        match self {
            Self::Upright => Orientations::UPRIGHT,
            Self::Rotated90 => Orientations::ROTATED_90,
            Self::Rotated180 => Orientations::ROTATED_180,
            Self::Rotated270 => Orientations::ROTATED_270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl TryFrom<i32> for Orientation {
    type Error = i32;

    fn try_from(degrees: i32) -> std::result::Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Upright),
            90 => Ok(Self::Rotated90),
            180 => Ok(Self::Rotated180),
            270 => Ok(Self::Rotated270),
            other => Err(other),
        }
    }
}

bitflags! {
    /// Set of orientations a caller accepts for extraction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Orientations: u8 {
        /// 0°
        const UPRIGHT = 1 << 0;
        /// 90°
        const ROTATED_90 = 1 << 1;
        /// 180°
        const ROTATED_180 = 1 << 2;
        /// 270°
        const ROTATED_270 = 1 << 3;
        /// Every quadrant
        const ALL = Self::UPRIGHT.bits()
            | Self::ROTATED_90.bits()
            | Self::ROTATED_180.bits()
            | Self::ROTATED_270.bits();
    }
}

impl Orientations {
    /// Whether `orientation` is in this set.
    pub fn accepts(&self, orientation: Orientation) -> bool {
        self.contains(orientation.flag())
    }

    /// Build a set from angles in degrees; angles that are not a quadrant
    /// are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_textflow::content::{Orientation, Orientations};
    ///
    /// let set = Orientations::from_degrees(&[0, 90, 45]);
    /// assert!(set.accepts(Orientation::Rotated90));
    /// assert!(!set.accepts(Orientation::Rotated180));
    /// ```
    pub fn from_degrees(degrees: &[i32]) -> Self {
        degrees
            .iter()
            .filter_map(|&d| Orientation::try_from(d).ok())
            .fold(Self::empty(), |set, o| set | o.flag())
    }
}

impl Default for Orientations {
    fn default() -> Self {
        Self::ALL
    }
}

/// Classify a composed matrix into its quadrant.
///
/// The sign of `d` decides upright versus upside down; when `d` is zero
/// the sign of `b` decides between the two quarter turns.
pub fn orient(m: &Matrix) -> Orientation {
    if m.d > ORIENTATION_EPSILON {
        Orientation::Upright
    } else if m.d < -ORIENTATION_EPSILON {
        Orientation::Rotated180
    } else if m.b > 0.0 {
        Orientation::Rotated90
    } else {
        Orientation::Rotated270
    }
}
