//! Core types for the codec

use num_traits::{Bounded, NumCast, ToPrimitive};
use std::fmt;

/// Image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Numeric sample type that can be loaded into or extracted from a grid
///
/// Values keep their native scale: an 8-bit sample of 200 becomes `200.0`.
/// Integer samples round on the way back from `f64` and saturate at their bounds.
pub trait Sample: Copy + NumCast + Bounded + PartialOrd {
    fn into_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    fn from_f64(value: f64) -> Self;
}

/// Cast saturating at the bounds of `T`; NaN maps to the lower bound
fn saturating_cast<T: NumCast + Bounded>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(|| {
        if value > 0.0 {
            T::max_value()
        } else {
            T::min_value()
        }
    })
}

impl Sample for u8 {
    fn from_f64(value: f64) -> Self {
        saturating_cast(value.round())
    }
}

impl Sample for u16 {
    fn from_f64(value: f64) -> Self {
        saturating_cast(value.round())
    }
}

impl Sample for f32 {
    fn from_f64(value: f64) -> Self {
        saturating_cast(value)
    }
}

impl Sample for f64 {
    fn into_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}
