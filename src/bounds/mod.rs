use std::fmt;

use thiserror::Error;

use crate::geom::{LineError, Point, Transform, TransformComponentKind};

mod def;
mod line;
mod range;
mod rect;
mod transform;

pub use def::{
    BoundsDef, LineBoundsDef, LineDef, PointDef, RangeBoundsDef, RectBoundsDef,
    TransformBoundsDef, get_bounds, get_bounds_for_transform,
};
pub use line::LineBounds;
pub use range::RangeBounds;
pub use rect::{RectBounds, RectBoundsOptions};
pub use transform::{TransformBounds, TransformBoundsSlot};

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Intersect
// ─────────────────────────────────────────────────────────────────────────────

/// Result of intersecting a trajectory with a boundary.
///
/// `intersect` is the boundary hit, or `None` when the trajectory heads
/// toward an unbounded side and never meets a boundary. `distance` runs
/// from the query position to the hit, and `reflection` is the direction
/// of travel after bouncing there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersect<T> {
    pub intersect: Option<T>,
    pub distance: f64,
    pub reflection: T,
}

/// Intersection of scalar motion with range bounds.
pub type ValueIntersect = Intersect<f64>;

/// Intersection of point motion with rect or line bounds.
pub type PointIntersect = Intersect<Point>;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Discriminant of a [`Bounds`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsKind {
    Range,
    Rect,
    Line,
    Transform,
}

impl fmt::Display for BoundsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range => f.write_str("range"),
            Self::Rect => f.write_str("rect"),
            Self::Line => f.write_str("line"),
            Self::Transform => f.write_str("transform"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("rect {side} side is negative ({value})")]
    NegativeSide { side: &'static str, value: f64 },
    #[error("rect has no area (width {width}, height {height})")]
    DegenerateRect { width: f64, height: f64 },
    #[error("rect {axis} axis has zero length")]
    ZeroAxis { axis: &'static str },
    #[error("rect axes are not mutually perpendicular")]
    AxesNotPerpendicular,
    #[error("transform bounds cannot hold transform bounds in a slot")]
    NestedTransformBounds,
    #[error("rotation slots only accept range bounds")]
    RotationSlotNotRange,
    #[error("transform bounds have no {kind} slot at occurrence index {index}")]
    MissingSlot {
        kind: TransformComponentKind,
        index: usize,
    },
    #[error("transform shapes differ: expected {expected}, got {got}")]
    TransformShapeMismatch { expected: String, got: String },
    #[error("ends count must be 0, 1 or 2, got {count}")]
    InvalidEnds { count: u8 },
    #[error("bounds definition cannot be resolved: {reason}")]
    UnresolvedDefinition { reason: String },
    #[error("{kind} bounds do not support {query} queries")]
    UnsupportedQuery {
        kind: BoundsKind,
        query: &'static str,
    },
    #[error(transparent)]
    Line(#[from] LineError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Any bound: a scalar range, a rect in a plane, a line, or per-component
/// transform bounds.
///
/// Each query applies to the variants that can answer it; the rest fail
/// with [`BoundsError::UnsupportedQuery`] rather than passing silently.
/// Scalar queries need range bounds, trajectory intersection needs rect or
/// line bounds, and transform queries need transform bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    Range(RangeBounds),
    Rect(RectBounds),
    Line(LineBounds),
    Transform(TransformBounds),
}

impl Bounds {
    #[must_use]
    pub const fn kind(&self) -> BoundsKind {
        match self {
            Self::Range(_) => BoundsKind::Range,
            Self::Rect(_) => BoundsKind::Rect,
            Self::Line(_) => BoundsKind::Line,
            Self::Transform(_) => BoundsKind::Transform,
        }
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        match self {
            Self::Range(b) => b.precision(),
            Self::Rect(b) => b.precision(),
            Self::Line(b) => b.precision(),
            Self::Transform(b) => b.precision(),
        }
    }

    /// False only for range bounds open on both sides; such bounds accept
    /// everything and never produce an intersection.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        match self {
            Self::Range(b) => b.is_defined(),
            Self::Rect(b) => b.is_defined(),
            Self::Line(b) => b.is_defined(),
            Self::Transform(b) => b.is_defined(),
        }
    }

    pub fn contains_value(&self, value: f64) -> Result<bool, BoundsError> {
        match self {
            Self::Range(b) => Ok(b.contains_value(value)),
            _ => Err(self.unsupported("contains_value")),
        }
    }

    pub fn clip_value(&self, value: f64) -> Result<f64, BoundsError> {
        match self {
            Self::Range(b) => Ok(b.clip_value(value)),
            _ => Err(self.unsupported("clip_value")),
        }
    }

    pub fn intersect_value(
        &self,
        value: f64,
        direction: f64,
    ) -> Result<ValueIntersect, BoundsError> {
        match self {
            Self::Range(b) => Ok(b.intersect_value(value, direction)),
            _ => Err(self.unsupported("intersect_value")),
        }
    }

    pub fn contains_point(&self, p: Point) -> Result<bool, BoundsError> {
        match self {
            Self::Range(b) => Ok(b.contains_point(p)),
            Self::Rect(b) => Ok(b.contains_point(p)),
            Self::Line(b) => Ok(b.contains_point(p)),
            Self::Transform(_) => Err(self.unsupported("contains_point")),
        }
    }

    pub fn clip_point(&self, p: Point) -> Result<Point, BoundsError> {
        match self {
            Self::Range(b) => Ok(b.clip_point(p)),
            Self::Rect(b) => Ok(b.clip_point(p)),
            Self::Line(b) => Ok(b.clip_point(p)),
            Self::Transform(_) => Err(self.unsupported("clip_point")),
        }
    }

    /// Intersect a point trajectory with the boundary. Range bounds
    /// constrain components independently and have no single boundary to
    /// intersect, so they reject this query.
    pub fn intersect_point(
        &self,
        p: Point,
        direction: Point,
    ) -> Result<PointIntersect, BoundsError> {
        match self {
            Self::Rect(b) => Ok(b.intersect_point(p, direction)),
            Self::Line(b) => Ok(b.intersect_point(p, direction)),
            Self::Range(_) | Self::Transform(_) => Err(self.unsupported("intersect_point")),
        }
    }

    pub fn contains_transform(&self, transform: &Transform) -> Result<bool, BoundsError> {
        match self {
            Self::Transform(b) => b.contains_transform(transform),
            _ => Err(self.unsupported("contains_transform")),
        }
    }

    pub fn clip_transform(&self, transform: &Transform) -> Result<Transform, BoundsError> {
        match self {
            Self::Transform(b) => b.clip_transform(transform),
            _ => Err(self.unsupported("clip_transform")),
        }
    }

    /// Constrain a velocity to directions the bound permits. Line bounds
    /// project velocity onto the line; every other bound leaves it
    /// unchanged.
    #[must_use]
    pub fn clip_velocity(&self, velocity: Point) -> Point {
        match self {
            Self::Line(b) => b.clip_velocity(velocity),
            _ => velocity,
        }
    }

    fn unsupported(&self, query: &'static str) -> BoundsError {
        BoundsError::UnsupportedQuery {
            kind: self.kind(),
            query,
        }
    }
}

impl From<RangeBounds> for Bounds {
    fn from(bounds: RangeBounds) -> Self {
        Self::Range(bounds)
    }
}

impl From<RectBounds> for Bounds {
    fn from(bounds: RectBounds) -> Self {
        Self::Rect(bounds)
    }
}

impl From<LineBounds> for Bounds {
    fn from(bounds: LineBounds) -> Self {
        Self::Line(bounds)
    }
}

impl From<TransformBounds> for Bounds {
    fn from(bounds: TransformBounds) -> Self {
        Self::Transform(bounds)
    }
}
