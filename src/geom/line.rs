use thiserror::Error;

use crate::geom::point::{Point, round_num};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineError {
    #[error("line endpoints are coincident at ({x}, {y}, {z})")]
    CoincidentPoints { x: f64, y: f64, z: f64 },
    #[error("line direction has zero length")]
    ZeroDirection,
    #[error("line length rounds to zero")]
    ZeroLength,
    #[error("offset direction is parallel to the line")]
    OffsetAlongLine,
}

// ─────────────────────────────────────────────────────────────────────────────
// LineEnds
// ─────────────────────────────────────────────────────────────────────────────

/// How many ends of a line bound it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnds {
    /// Unbounded in both directions.
    Infinite,
    /// Bounded at `p1` only; extends past `p2` forever.
    Ray,
    /// Bounded at both endpoints.
    #[default]
    Segment,
}

impl LineEnds {
    /// Numeric form: 0 = infinite, 1 = ray, 2 = segment.
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Infinite => 0,
            Self::Ray => 1,
            Self::Segment => 2,
        }
    }

    #[must_use]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Self::Infinite),
            1 => Some(Self::Ray),
            2 => Some(Self::Segment),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line
// ─────────────────────────────────────────────────────────────────────────────

/// A line through two points: a finite segment, a ray bounded at `p1`, or
/// an infinite line, depending on `ends`.
///
/// `p1` and `p2` must be distinct; construction rejects coincident points
/// rather than letting degenerate directions produce NaN downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
    pub ends: LineEnds,
}

/// Result of intersecting two lines.
///
/// `intersect` is the intersection on the infinite extensions when one
/// exists (skew and parallel non-collinear pairs have none). `on_lines`
/// reports whether that point lies on both lines' bounded extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersect {
    pub intersect: Option<Point>,
    pub collinear: bool,
    pub on_lines: bool,
}

impl Line {
    pub fn new(p1: Point, p2: Point, ends: LineEnds) -> Result<Self, LineError> {
        if p1.is_equal_to(p2, crate::geom::point::DEFAULT_PRECISION) {
            return Err(LineError::CoincidentPoints {
                x: p1.x,
                y: p1.y,
                z: p1.z,
            });
        }
        Ok(Self { p1, p2, ends })
    }

    /// Finite segment between two points.
    pub fn segment(p1: Point, p2: Point) -> Result<Self, LineError> {
        Self::new(p1, p2, LineEnds::Segment)
    }

    /// Line in the z = 0 plane from a point, an angle from +x, and a length.
    pub fn from_point_angle_length(
        p1: Point,
        angle: f64,
        length: f64,
        ends: LineEnds,
    ) -> Result<Self, LineError> {
        if round_num(length, crate::geom::point::DEFAULT_PRECISION) == 0.0 {
            return Err(LineError::ZeroLength);
        }
        let p2 = p1.add(Point::new(angle.cos() * length, angle.sin() * length, 0.0));
        Self::new(p1, p2, ends)
    }

    /// Line from a point along a direction vector.
    pub fn from_point_direction_length(
        p1: Point,
        direction: Point,
        length: f64,
        ends: LineEnds,
    ) -> Result<Self, LineError> {
        let unit = direction.normalized().ok_or(LineError::ZeroDirection)?;
        if round_num(length, crate::geom::point::DEFAULT_PRECISION) == 0.0 {
            return Err(LineError::ZeroLength);
        }
        Self::new(p1, p1.add(unit.scale(length)), ends)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.p1.distance_to(self.p2)
    }

    /// Unit vector from `p1` toward `p2`.
    #[must_use]
    pub fn unit_direction(&self) -> Point {
        let d = self.p2.sub(self.p1);
        d.scale(1.0 / d.length())
    }

    /// Angle of the direction's xy projection from the +x axis.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.p2.sub(self.p1).angle_xy()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.p1.add(self.p2).scale(0.5)
    }

    /// Perpendicular projection of `p` onto the infinite line.
    #[must_use]
    pub fn point_projection(&self, p: Point) -> Point {
        let unit = self.unit_direction();
        let along = p.sub(self.p1).dot(unit);
        self.p1.add(unit.scale(along))
    }

    /// Perpendicular distance from `p` to the infinite line.
    #[must_use]
    pub fn distance_to_point(&self, p: Point) -> f64 {
        p.distance_to(self.point_projection(p))
    }

    /// True when `p` lies on the infinite extension, ignoring `ends`.
    #[must_use]
    pub fn has_point_along(&self, p: Point, precision: u32) -> bool {
        round_num(self.distance_to_point(p), precision) == 0.0
    }

    /// True when `p` lies on the line respecting `ends`.
    #[must_use]
    pub fn has_point_on(&self, p: Point, precision: u32) -> bool {
        if !self.has_point_along(p, precision) {
            return false;
        }
        let along = round_num(p.sub(self.p1).dot(self.unit_direction()), precision);
        match self.ends {
            LineEnds::Infinite => true,
            LineEnds::Ray => along >= 0.0,
            LineEnds::Segment => along >= 0.0 && along <= round_num(self.length(), precision),
        }
    }

    /// Project `p` onto the line, then clamp the projection to the bounded
    /// extent.
    #[must_use]
    pub fn clip_point(&self, p: Point, precision: u32) -> Point {
        let projection = self.point_projection(p);
        let along = round_num(projection.sub(self.p1).dot(self.unit_direction()), precision);
        match self.ends {
            LineEnds::Infinite => projection,
            LineEnds::Ray => {
                if along < 0.0 {
                    self.p1
                } else {
                    projection
                }
            }
            LineEnds::Segment => {
                if along < 0.0 {
                    self.p1
                } else if along > round_num(self.length(), precision) {
                    self.p2
                } else {
                    projection
                }
            }
        }
    }

    #[must_use]
    pub fn is_parallel_to(&self, other: &Self, precision: u32) -> bool {
        let cross = self.p2.sub(self.p1).cross(other.p2.sub(other.p1));
        round_num(cross.length(), precision) == 0.0
    }

    #[must_use]
    pub fn is_collinear_to(&self, other: &Self, precision: u32) -> bool {
        self.is_parallel_to(other, precision) && self.has_point_along(other.p1, precision)
    }

    /// Shortest distance between the infinite extensions of two lines.
    #[must_use]
    pub fn distance_to_line(&self, other: &Self, precision: u32) -> f64 {
        let d1 = self.p2.sub(self.p1);
        let d2 = other.p2.sub(other.p1);
        let cross = d1.cross(d2);
        let cross_len = cross.length();
        if round_num(cross_len, precision) == 0.0 {
            return self.distance_to_point(other.p1);
        }
        (other.p1.sub(self.p1).dot(cross) / cross_len).abs()
    }

    /// Shift the line perpendicular to itself by `dist` toward the side
    /// indicated by `toward`. Fails when `toward` has no component
    /// perpendicular to the line.
    pub fn offset(&self, toward: Point, dist: f64) -> Result<Self, LineError> {
        let unit = self.unit_direction();
        let perpendicular = toward.sub(unit.scale(toward.dot(unit)));
        let normal = perpendicular
            .normalized()
            .ok_or(LineError::OffsetAlongLine)?;
        let shift = normal.scale(dist);
        Ok(Self {
            p1: self.p1.add(shift),
            p2: self.p2.add(shift),
            ends: self.ends,
        })
    }

    /// Intersect with another line.
    ///
    /// Non-parallel, coplanar lines intersect on their infinite extensions;
    /// `on_lines` reports whether the point is on both bounded extents.
    /// Skew and parallel (non-collinear) pairs yield no intersection.
    /// Collinear overlapping lines report the calling line's `p1`;
    /// collinear disjoint lines report the midpoint of the gap between the
    /// nearest bounded endpoints.
    #[must_use]
    pub fn intersects_with(&self, other: &Self, precision: u32) -> LineIntersect {
        let d1 = self.p2.sub(self.p1);
        let d2 = other.p2.sub(other.p1);
        let cross = d1.cross(d2);
        let cross_len = cross.length();

        if round_num(cross_len, precision) == 0.0 {
            if !self.has_point_along(other.p1, precision) {
                // Parallel with an offset between the lines.
                return LineIntersect {
                    intersect: None,
                    collinear: false,
                    on_lines: false,
                };
            }
            return self.collinear_intersect(other, precision);
        }

        let w = other.p1.sub(self.p1);
        // Coplanarity: the connecting vector must have no component along
        // the common normal, otherwise the lines are skew.
        if round_num(w.dot(cross) / cross_len, precision) != 0.0 {
            return LineIntersect {
                intersect: None,
                collinear: false,
                on_lines: false,
            };
        }

        let t = w.cross(d2).dot(cross) / (cross_len * cross_len);
        let intersect = self.p1.add(d1.scale(t));
        let on_lines =
            self.has_point_on(intersect, precision) && other.has_point_on(intersect, precision);
        LineIntersect {
            intersect: Some(intersect),
            collinear: false,
            on_lines,
        }
    }

    fn collinear_intersect(&self, other: &Self, precision: u32) -> LineIntersect {
        let overlap = self.has_point_on(other.p1, precision)
            || self.has_point_on(other.p2, precision)
            || other.has_point_on(self.p1, precision)
            || other.has_point_on(self.p2, precision);
        if overlap {
            return LineIntersect {
                intersect: Some(self.p1),
                collinear: true,
                on_lines: true,
            };
        }

        // Disjoint: midpoint of the gap between the nearest bounded
        // endpoints. Only bounded ends count (a ray is bounded at p1 only;
        // an infinite line always overlaps and never reaches here).
        let mut nearest: Option<(f64, Point, Point)> = None;
        for a in self.bounded_endpoints() {
            for b in other.bounded_endpoints() {
                let dist = a.distance_to(b);
                if nearest.is_none_or(|(best, _, _)| dist < best) {
                    nearest = Some((dist, a, b));
                }
            }
        }
        match nearest {
            Some((_, a, b)) => LineIntersect {
                intersect: Some(a.add(b).scale(0.5)),
                collinear: true,
                on_lines: false,
            },
            None => LineIntersect {
                intersect: Some(self.p1),
                collinear: true,
                on_lines: true,
            },
        }
    }

    fn bounded_endpoints(&self) -> Vec<Point> {
        match self.ends {
            LineEnds::Infinite => Vec::new(),
            LineEnds::Ray => vec![self.p1],
            LineEnds::Segment => vec![self.p1, self.p2],
        }
    }

    /// Round both endpoints to `precision` decimal digits.
    #[must_use]
    pub fn round(&self, precision: u32) -> Self {
        Self {
            p1: self.p1.round(precision),
            p2: self.p2.round(precision),
            ends: self.ends,
        }
    }

    /// Rounding-based equality of endpoints and ends.
    #[must_use]
    pub fn is_equal_to(&self, other: &Self, precision: u32) -> bool {
        self.ends == other.ends
            && self.p1.is_equal_to(other.p1, precision)
            && self.p2.is_equal_to(other.p2, precision)
    }
}
