use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::geom::matrix::Matrix;

/// Default number of decimal digits used for rounded comparisons.
pub const DEFAULT_PRECISION: u32 = 8;

/// Round a value to `precision` decimal digits.
///
/// All boundary comparisons in this crate go through this function rather
/// than raw float equality, so that values a hair past a boundary from
/// floating-point noise still count as on it.
#[must_use]
pub fn round_num(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // Collapse -0.0 so rounded values compare and serialize cleanly.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Clip a value to zero when it rounds to zero at `precision` digits.
#[must_use]
pub fn clip_value(value: f64, precision: u32) -> f64 {
    if round_num(value, precision) == 0.0 {
        0.0
    } else {
        value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point
// ─────────────────────────────────────────────────────────────────────────────

/// A position or free vector in 3D space.
///
/// One type serves both roles: positions of moving elements and directions
/// or velocities acting on them. Methods never mutate; each returns a new
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// The origin (0, 0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point in the z = 0 plane.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub const fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub const fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Length of the vector from the origin to this point.
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        other.sub(self).length()
    }

    /// Unit vector in this direction, or `None` for a zero-length vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(Self::new(self.x / len, self.y / len, self.z / len))
        } else {
            None
        }
    }

    /// Angle between this vector and another, in radians.
    ///
    /// `None` when either vector has zero length. The cosine is clamped to
    /// [-1, 1] before `acos` so collinear vectors survive float noise.
    #[must_use]
    pub fn angle_to(self, other: Self) -> Option<f64> {
        let len_product = self.length() * other.length();
        if len_product == 0.0 || !len_product.is_finite() {
            return None;
        }
        Some((self.dot(other) / len_product).clamp(-1.0, 1.0).acos())
    }

    /// Scalar projection of this vector onto `other`.
    ///
    /// `|self| * cos(angle)`, signed. `None` when `other` has zero length.
    #[must_use]
    pub fn project_on(self, other: Self) -> Option<f64> {
        let len = other.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(self.dot(other) / len)
    }

    /// Vector projection of this vector onto `other`.
    ///
    /// `None` when `other` has zero length.
    #[must_use]
    pub fn component_along(self, other: Self) -> Option<Self> {
        let len_squared = other.length_squared();
        if len_squared == 0.0 || !len_squared.is_finite() {
            return None;
        }
        Some(other.scale(self.dot(other) / len_squared))
    }

    /// Rotate about the z axis by `angle` radians, around `center` when
    /// given (the origin otherwise).
    #[must_use]
    pub fn rotate(self, angle: f64, center: Option<Self>) -> Self {
        let rotation = Matrix::rotation_z(angle);
        match center {
            Some(c) => rotation.transform_point(self.sub(c)).add(c),
            None => rotation.transform_point(self),
        }
    }

    /// Apply a homogeneous transform matrix to this point.
    #[must_use]
    pub fn transform_by(self, m: &Matrix) -> Self {
        m.transform_point(self)
    }

    /// Angle of the xy projection measured from the +x axis, in [0, 2π).
    #[must_use]
    pub fn angle_xy(self) -> f64 {
        let angle = self.y.atan2(self.x);
        if angle < 0.0 {
            angle + std::f64::consts::TAU
        } else {
            angle
        }
    }

    /// Round each component to `precision` decimal digits.
    #[must_use]
    pub fn round(self, precision: u32) -> Self {
        Self::new(
            round_num(self.x, precision),
            round_num(self.y, precision),
            round_num(self.z, precision),
        )
    }

    /// Rounding-based equality: both points rounded to `precision` digits
    /// must match exactly.
    #[must_use]
    pub fn is_equal_to(self, other: Self, precision: u32) -> bool {
        self.round(precision) == other.round(precision)
    }

    /// Delta-based equality: each component within `delta` of the other.
    #[must_use]
    pub fn is_within_delta(self, other: Self, delta: f64) -> bool {
        (self.x - other.x).abs() <= delta
            && (self.y - other.y).abs() <= delta
            && (self.z - other.z).abs() <= delta
    }

    /// True when every component rounds to zero at `precision` digits.
    #[must_use]
    pub fn is_zero(self, precision: u32) -> bool {
        self.round(precision) == Self::ORIGIN
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 3]> for Point {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;
    fn mul(self, rhs: Point) -> Self::Output {
        Point::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}
