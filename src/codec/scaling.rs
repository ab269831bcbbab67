//! Min/max affine scaling for continuous fields

use crate::dataset::FlowField;
use serde::{Deserialize, Serialize};

/// Offset added after scaling, keeps encoded values away from 0
pub const SCALE_OFFSET: f64 = 0.05;

/// Observed range of a continuous field, frozen at fit time
///
/// Encodes `x` as `0.05 + (x - min) / (1 + (max - min))`. Any value in
/// `[min, max]` lands in `[0.05, 1.05)`, clear of the sigmoid's
/// saturating ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingStats {
    pub field: FlowField,
    pub min: f64,
    pub max: f64,
}

impl ScalingStats {
    /// Range of the observed values; `None` when there are none
    pub fn fit<I>(field: FlowField, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values.into_iter().fold(None, |acc: Option<(f64, f64)>, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })?;
        Some(Self { field, min, max })
    }

    /// Divisor of the affine map
    pub fn span(&self) -> f64 {
        1.0 + (self.max - self.min)
    }

    pub fn scale(&self, x: f64) -> f64 {
        SCALE_OFFSET + (x - self.min) / self.span()
    }

    pub fn unscale(&self, z: f64) -> f64 {
        self.min + (z - SCALE_OFFSET) * self.span()
    }
}
