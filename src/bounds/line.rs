use crate::bounds::{BoundsError, Intersect, PointIntersect};
use crate::geom::{DEFAULT_PRECISION, Line, LineEnds, Point, round_num};

// ─────────────────────────────────────────────────────────────────────────────
// LineBounds
// ─────────────────────────────────────────────────────────────────────────────

/// A bound constraining motion to a line: a segment, a ray, or an
/// infinite line.
///
/// Velocity clips onto the line direction so constrained motion never
/// leaves the line. An infinite line never intersects; a ray bounds at
/// `p1` only; a segment bounds at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    boundary: Line,
    precision: u32,
}

impl LineBounds {
    #[must_use]
    pub const fn new(boundary: Line, precision: u32) -> Self {
        Self {
            boundary,
            precision,
        }
    }

    pub fn from_points(p1: Point, p2: Point, ends: LineEnds) -> Result<Self, BoundsError> {
        Ok(Self::new(Line::new(p1, p2, ends)?, DEFAULT_PRECISION))
    }

    #[must_use]
    pub const fn boundary(&self) -> &Line {
        &self.boundary
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub const fn is_defined(&self) -> bool {
        true
    }

    /// True when `p` lies on the bounded extent of the line.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        self.boundary.has_point_on(p, self.precision)
    }

    /// Project `p` onto the line and clamp to the bounded extent.
    #[must_use]
    pub fn clip_point(&self, p: Point) -> Point {
        self.boundary.clip_point(p, self.precision)
    }

    /// Component of `velocity` along the line direction. Motion bound to a
    /// line keeps only this component.
    #[must_use]
    pub fn clip_velocity(&self, velocity: Point) -> Point {
        let unit = self.boundary.unit_direction();
        unit.scale(velocity.dot(unit))
    }

    /// Intersect motion from `p` along `direction` with the endpoint it is
    /// heading toward.
    ///
    /// An infinite line never intersects. Moving from `p1` toward `p2`
    /// only a segment bounds (at `p2`); moving the other way both rays and
    /// segments bound at `p1`. The reflection runs back along the line.
    #[must_use]
    pub fn intersect_point(&self, p: Point, direction: Point) -> PointIntersect {
        let no_intersect = Intersect {
            intersect: None,
            distance: 0.0,
            reflection: direction,
        };
        if self.boundary.ends == LineEnds::Infinite {
            return no_intersect;
        }

        let p = self.clip_point(p);
        let unit = self.boundary.unit_direction();
        let heading = round_num(direction.dot(unit), self.precision);

        if heading > 0.0 {
            if self.boundary.ends != LineEnds::Segment {
                return no_intersect;
            }
            let p2 = self.boundary.p2;
            Intersect {
                intersect: Some(p2),
                distance: p.distance_to(p2),
                reflection: unit.neg(),
            }
        } else if heading < 0.0 {
            let p1 = self.boundary.p1;
            Intersect {
                intersect: Some(p1),
                distance: p.distance_to(p1),
                reflection: unit,
            }
        } else {
            no_intersect
        }
    }
}
