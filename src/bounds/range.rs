use crate::bounds::{BoundsError, Intersect, ValueIntersect};
use crate::geom::{DEFAULT_PRECISION, Point, round_num};

// ─────────────────────────────────────────────────────────────────────────────
// RangeBounds
// ─────────────────────────────────────────────────────────────────────────────

/// A 1D interval bound. `None` on either side means unbounded in that
/// direction.
///
/// Scalar queries are the primary interface; the point forms apply the
/// same interval to each component, which is how independent per-axis
/// motion uses a shared range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    min: Option<f64>,
    max: Option<f64>,
    precision: u32,
}

impl RangeBounds {
    pub fn new(min: Option<f64>, max: Option<f64>, precision: u32) -> Result<Self, BoundsError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(BoundsError::InvertedRange { min: lo, max: hi });
            }
        }
        Ok(Self {
            min,
            max,
            precision,
        })
    }

    pub fn from_min_max(min: Option<f64>, max: Option<f64>) -> Result<Self, BoundsError> {
        Self::new(min, max, DEFAULT_PRECISION)
    }

    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// False when both sides are unbounded.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    #[must_use]
    pub fn contains_value(&self, value: f64) -> bool {
        let v = round_num(value, self.precision);
        if let Some(min) = self.min {
            if v < round_num(min, self.precision) {
                return false;
            }
        }
        if let Some(max) = self.max {
            if v > round_num(max, self.precision) {
                return false;
            }
        }
        true
    }

    /// Apply the interval to each component of a point.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains_value(p.x) && self.contains_value(p.y) && self.contains_value(p.z)
    }

    #[must_use]
    pub fn clip_value(&self, value: f64) -> f64 {
        let mut clipped = value;
        if let Some(min) = self.min {
            if clipped < min {
                clipped = min;
            }
        }
        if let Some(max) = self.max {
            if clipped > max {
                clipped = max;
            }
        }
        clipped
    }

    #[must_use]
    pub fn clip_point(&self, p: Point) -> Point {
        Point::new(
            self.clip_value(p.x),
            self.clip_value(p.y),
            self.clip_value(p.z),
        )
    }

    /// Intersect a value moving along `direction` (any positive value means
    /// +1, any negative -1) with the interval edge it is heading toward.
    ///
    /// The value is clipped into the interval first. An unbounded side
    /// yields no intersect and passes the direction through; a bounded side
    /// yields the edge, the distance to it (zero when already there), and
    /// the flipped direction as the reflection.
    #[must_use]
    pub fn intersect_value(&self, value: f64, direction: f64) -> ValueIntersect {
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        let value = self.clip_value(value);
        if direction > 0.0 {
            match self.max {
                None => Intersect {
                    intersect: None,
                    distance: 0.0,
                    reflection: direction,
                },
                Some(max) => Intersect {
                    intersect: Some(max),
                    distance: (max - value).abs(),
                    reflection: -1.0,
                },
            }
        } else {
            match self.min {
                None => Intersect {
                    intersect: None,
                    distance: 0.0,
                    reflection: direction,
                },
                Some(min) => Intersect {
                    intersect: Some(min),
                    distance: (value - min).abs(),
                    reflection: 1.0,
                },
            }
        }
    }
}
