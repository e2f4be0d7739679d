use crate::bounds::{BoundsError, Intersect, PointIntersect};
use crate::geom::{DEFAULT_PRECISION, Line, LineEnds, Point, round_num};

// ─────────────────────────────────────────────────────────────────────────────
// RectBoundsOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Options for constructing a [`RectBounds`].
///
/// The plane frame may be given as a normal, as one axis plus the normal,
/// or as both axes. Whatever is omitted is derived; whatever is supplied
/// must be mutually perpendicular. Side magnitudes are measured from
/// `position` along the axis directions and must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBoundsOptions {
    /// Reference position the side magnitudes are measured from.
    pub position: Point,
    /// Plane normal. Defaults to +z when no frame input is given.
    pub normal: Option<Point>,
    /// In-plane direction the `right` magnitude runs along.
    pub right_direction: Option<Point>,
    /// In-plane direction the `top` magnitude runs along.
    pub top_direction: Option<Point>,
    /// Extent along `-right_direction`.
    pub left: f64,
    /// Extent along `+right_direction`.
    pub right: f64,
    /// Extent along `+top_direction`.
    pub top: f64,
    /// Extent along `-top_direction`.
    pub bottom: f64,
    /// Decimal digits for rounded comparisons.
    pub precision: u32,
}

impl RectBoundsOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            normal: None,
            right_direction: None,
            top_direction: None,
            left: 1.0,
            right: 1.0,
            top: 1.0,
            bottom: 1.0,
            precision: DEFAULT_PRECISION,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn with_normal(mut self, normal: Point) -> Self {
        self.normal = Some(normal);
        self
    }

    #[must_use]
    pub const fn with_right_direction(mut self, direction: Point) -> Self {
        self.right_direction = Some(direction);
        self
    }

    #[must_use]
    pub const fn with_top_direction(mut self, direction: Point) -> Self {
        self.top_direction = Some(direction);
        self
    }

    /// Set all four side magnitudes at once.
    #[must_use]
    pub const fn with_sides(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Square extent: every side set to `half_size`.
    #[must_use]
    pub const fn with_half_size(self, half_size: f64) -> Self {
        self.with_sides(half_size, half_size, half_size, half_size)
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for RectBoundsOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RectBounds
// ─────────────────────────────────────────────────────────────────────────────

/// A rectangle lying in an arbitrary 3D plane.
///
/// The frame is orthonormal: `normal = right_direction × top_direction`.
/// Containment and clipping work on the in-plane projections of a point;
/// intersection reflects trajectories off the four boundary segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBounds {
    position: Point,
    right_direction: Point,
    top_direction: Point,
    normal: Point,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    left_boundary: Line,
    right_boundary: Line,
    top_boundary: Line,
    bottom_boundary: Line,
    precision: u32,
}

impl RectBounds {
    pub fn new(options: RectBoundsOptions) -> Result<Self, BoundsError> {
        let precision = options.precision;
        let (right_direction, top_direction, normal) = resolve_axes(&options)?;

        for (side, value) in [
            ("left", options.left),
            ("right", options.right),
            ("top", options.top),
            ("bottom", options.bottom),
        ] {
            if value < 0.0 {
                return Err(BoundsError::NegativeSide { side, value });
            }
        }
        let width = options.left + options.right;
        let height = options.top + options.bottom;
        if round_num(width, precision) == 0.0 || round_num(height, precision) == 0.0 {
            return Err(BoundsError::DegenerateRect { width, height });
        }

        let position = options.position;
        let bottom_left = position
            .sub(right_direction.scale(options.left))
            .sub(top_direction.scale(options.bottom));
        let bottom_right = position
            .add(right_direction.scale(options.right))
            .sub(top_direction.scale(options.bottom));
        let top_left = position
            .sub(right_direction.scale(options.left))
            .add(top_direction.scale(options.top));
        let top_right = position
            .add(right_direction.scale(options.right))
            .add(top_direction.scale(options.top));

        Ok(Self {
            position,
            right_direction,
            top_direction,
            normal,
            left: options.left,
            right: options.right,
            top: options.top,
            bottom: options.bottom,
            left_boundary: Line::segment(bottom_left, top_left)?,
            right_boundary: Line::segment(bottom_right, top_right)?,
            top_boundary: Line::segment(top_left, top_right)?,
            bottom_boundary: Line::segment(bottom_left, bottom_right)?,
            precision,
        })
    }

    /// Axis-aligned rectangle in the z = 0 plane, `half_size` out from
    /// `position` on every side.
    pub fn square(position: Point, half_size: f64) -> Result<Self, BoundsError> {
        Self::new(
            RectBoundsOptions::new()
                .with_position(position)
                .with_half_size(half_size),
        )
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub const fn right_direction(&self) -> Point {
        self.right_direction
    }

    #[must_use]
    pub const fn top_direction(&self) -> Point {
        self.top_direction
    }

    #[must_use]
    pub const fn normal(&self) -> Point {
        self.normal
    }

    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    #[must_use]
    pub const fn left_boundary(&self) -> &Line {
        &self.left_boundary
    }

    #[must_use]
    pub const fn right_boundary(&self) -> &Line {
        &self.right_boundary
    }

    #[must_use]
    pub const fn top_boundary(&self) -> &Line {
        &self.top_boundary
    }

    #[must_use]
    pub const fn bottom_boundary(&self) -> &Line {
        &self.bottom_boundary
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub const fn is_defined(&self) -> bool {
        true
    }

    /// Perpendicular projection of `p` onto the rectangle's plane.
    #[must_use]
    pub fn project_to_plane(&self, p: Point) -> Point {
        let off_plane = p.sub(self.position).dot(self.normal);
        p.sub(self.normal.scale(off_plane))
    }

    /// Signed in-plane offsets of `p` from the position along the right and
    /// top directions.
    fn plane_offsets(&self, p: Point) -> (f64, f64) {
        let relative = self.project_to_plane(p).sub(self.position);
        (
            relative.dot(self.right_direction),
            relative.dot(self.top_direction),
        )
    }

    /// Containment of the plane projection of `p`, boundary inclusive.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        let (right_offset, top_offset) = self.plane_offsets(p);
        let r = round_num(right_offset, self.precision);
        let t = round_num(top_offset, self.precision);
        r >= round_num(-self.left, self.precision)
            && r <= round_num(self.right, self.precision)
            && t >= round_num(-self.bottom, self.precision)
            && t <= round_num(self.top, self.precision)
    }

    /// Strict containment: points off the plane are rejected instead of
    /// projected.
    #[must_use]
    pub fn contains_point_on_plane(&self, p: Point) -> bool {
        let off_plane = p.sub(self.position).dot(self.normal);
        if round_num(off_plane, self.precision) != 0.0 {
            return false;
        }
        self.contains_point(p)
    }

    /// Project to the plane, then clamp the two in-plane offsets to their
    /// side ranges.
    #[must_use]
    pub fn clip_point(&self, p: Point) -> Point {
        let (right_offset, top_offset) = self.plane_offsets(p);
        let r = right_offset.clamp(-self.left, self.right);
        let t = top_offset.clamp(-self.bottom, self.top);
        self.position
            .add(self.right_direction.scale(r))
            .add(self.top_direction.scale(t))
    }

    /// Intersect a trajectory from `p` along `direction` with the boundary
    /// it is heading toward.
    ///
    /// The start point is clipped into the rectangle and the direction is
    /// projected into the plane. Each axis contributes at most one
    /// candidate wall (the one the direction points toward); the nearer
    /// candidate wins. Equal distances at the working precision mean a
    /// corner hit: the trajectory reflects straight back. A single-wall
    /// hit mirrors the direction about the wall's perpendicular axis.
    #[must_use]
    pub fn intersect_point(&self, p: Point, direction: Point) -> PointIntersect {
        let no_intersect = Intersect {
            intersect: None,
            distance: 0.0,
            reflection: direction,
        };

        let p = self.clip_point(p);
        let in_plane = direction.sub(self.normal.scale(direction.dot(self.normal)));
        if in_plane.is_zero(self.precision) {
            return no_intersect;
        }
        let Some(unit) = in_plane.normalized() else {
            return no_intersect;
        };

        let right_heading = round_num(unit.dot(self.right_direction), self.precision);
        let top_heading = round_num(unit.dot(self.top_direction), self.precision);

        let right_candidate = if right_heading > 0.0 {
            self.boundary_hit(p, unit, &self.right_boundary)
        } else if right_heading < 0.0 {
            self.boundary_hit(p, unit, &self.left_boundary)
        } else {
            None
        };
        let top_candidate = if top_heading > 0.0 {
            self.boundary_hit(p, unit, &self.top_boundary)
        } else if top_heading < 0.0 {
            self.boundary_hit(p, unit, &self.bottom_boundary)
        } else {
            None
        };

        match (right_candidate, top_candidate) {
            (None, None) => no_intersect,
            (Some((hit, distance)), None) => Intersect {
                intersect: Some(hit),
                distance,
                reflection: self.mirror(unit, self.right_direction),
            },
            (None, Some((hit, distance))) => Intersect {
                intersect: Some(hit),
                distance,
                reflection: self.mirror(unit, self.top_direction),
            },
            (Some((right_hit, right_distance)), Some((top_hit, top_distance))) => {
                let r = round_num(right_distance, self.precision);
                let t = round_num(top_distance, self.precision);
                if r == t {
                    // Corner: both walls at once, so reflect straight back.
                    Intersect {
                        intersect: Some(right_hit),
                        distance: right_distance,
                        reflection: unit.neg(),
                    }
                } else if right_distance < top_distance {
                    Intersect {
                        intersect: Some(right_hit),
                        distance: right_distance,
                        reflection: self.mirror(unit, self.right_direction),
                    }
                } else {
                    Intersect {
                        intersect: Some(top_hit),
                        distance: top_distance,
                        reflection: self.mirror(unit, self.top_direction),
                    }
                }
            }
        }
    }

    /// Ray from `p` along `unit` against one wall segment.
    ///
    /// The wall is only consulted when the heading points toward it, so a
    /// start point already on the wall is an immediate hit at distance 0.
    fn boundary_hit(&self, p: Point, unit: Point, boundary: &Line) -> Option<(Point, f64)> {
        if boundary.has_point_on(p, self.precision) {
            return Some((p, 0.0));
        }
        let ray = Line::new(p, p.add(unit), LineEnds::Ray).ok()?;
        let result = ray.intersects_with(boundary, self.precision);
        match result.intersect {
            Some(hit) if result.on_lines => Some((hit, p.distance_to(hit))),
            _ => None,
        }
    }

    /// Mirror reflection of `unit` about a wall whose perpendicular axis in
    /// the plane is `axis`.
    fn mirror(&self, unit: Point, axis: Point) -> Point {
        let reflected = unit.sub(axis.scale(2.0 * unit.dot(axis)));
        reflected.normalized().unwrap_or(reflected)
    }
}

/// Resolve the orthonormal frame from whichever axes the options supply.
fn resolve_axes(options: &RectBoundsOptions) -> Result<(Point, Point, Point), BoundsError> {
    let precision = options.precision;
    let normalize = |v: Point, axis: &'static str| {
        v.normalized().ok_or(BoundsError::ZeroAxis { axis })
    };

    let normal = options.normal.map(|n| normalize(n, "normal")).transpose()?;
    let right = options
        .right_direction
        .map(|r| normalize(r, "rightDirection"))
        .transpose()?;
    let top = options
        .top_direction
        .map(|t| normalize(t, "topDirection"))
        .transpose()?;

    let perpendicular = |a: Point, b: Point| round_num(a.dot(b), precision) == 0.0;

    match (right, top, normal) {
        (Some(right), Some(top), normal) => {
            if !perpendicular(right, top) {
                return Err(BoundsError::AxesNotPerpendicular);
            }
            let computed = right.cross(top);
            if let Some(normal) = normal {
                if !normal.is_equal_to(computed, precision) {
                    return Err(BoundsError::AxesNotPerpendicular);
                }
            }
            Ok((right, top, computed))
        }
        (Some(right), None, Some(normal)) => {
            if !perpendicular(right, normal) {
                return Err(BoundsError::AxesNotPerpendicular);
            }
            Ok((right, normal.cross(right), normal))
        }
        (None, Some(top), Some(normal)) => {
            if !perpendicular(top, normal) {
                return Err(BoundsError::AxesNotPerpendicular);
            }
            Ok((top.cross(normal), top, normal))
        }
        (None, None, normal) => {
            let normal = normal.unwrap_or(Point::Z);
            let (right, top) = axes_from_normal(normal);
            Ok((right, top, normal))
        }
        // A single in-plane axis: complete the frame against the world z
        // axis, matching the z = 0 default plane.
        (Some(right), None, None) => {
            if !perpendicular(right, Point::Z) {
                return Err(BoundsError::AxesNotPerpendicular);
            }
            Ok((right, Point::Z.cross(right), Point::Z))
        }
        (None, Some(top), None) => {
            if !perpendicular(top, Point::Z) {
                return Err(BoundsError::AxesNotPerpendicular);
            }
            Ok((top.cross(Point::Z), top, Point::Z))
        }
    }
}

/// Derive in-plane right/top axes from a bare normal.
///
/// The world x axis projected into the plane gives a stable right
/// direction; when the normal is along x, the world y axis takes over.
fn axes_from_normal(normal: Point) -> (Point, Point) {
    let project = |axis: Point| axis.sub(normal.scale(axis.dot(normal))).normalized();
    let right = project(Point::X)
        .or_else(|| project(Point::Y))
        .unwrap_or(Point::X);
    let top = normal.cross(right);
    (right, top)
}
