//! Inclusive threshold band with a membership test.

use crate::error::{Error, Result};

/// An immutable inclusive interval `[min, max]`.
///
/// Constructed once at startup from the validated configuration; `min > max`
/// (or a non-finite bound) is a configuration error and is rejected rather
/// than producing a band that can never match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f32,
    max: f32,
}

impl Range {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        // `!(min <= max)` also rejects NaN bounds.
        if !(min <= max) {
            return Err(Error::Config("range min must be <= max"));
        }
        Ok(Self { min, max })
    }

    /// Whether `value` lies inside the band.  Both bounds are inclusive.
    ///
    /// NaN is never in range — a garbage reading must not switch an
    /// actuator on.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}
