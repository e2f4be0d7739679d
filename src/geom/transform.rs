use std::fmt;

use thiserror::Error;

use crate::geom::matrix::Matrix;
use crate::geom::point::Point;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("transform has no {kind} component at occurrence index {index}")]
    MissingComponent {
        kind: TransformComponentKind,
        index: usize,
    },
    #[error("transform shapes differ: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform components
// ─────────────────────────────────────────────────────────────────────────────

/// One operation in a transform chain.
///
/// Rotation is about the z axis; arbitrary-axis rotation stays with
/// [`Matrix`] directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformComponent {
    Translation(Point),
    Rotation(f64),
    Scale(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformComponentKind {
    Translation,
    Rotation,
    Scale,
}

impl TransformComponent {
    #[must_use]
    pub const fn kind(&self) -> TransformComponentKind {
        match self {
            Self::Translation(_) => TransformComponentKind::Translation,
            Self::Rotation(_) => TransformComponentKind::Rotation,
            Self::Scale(_) => TransformComponentKind::Scale,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Matrix {
        match *self {
            Self::Translation(offset) => Matrix::translation(offset),
            Self::Rotation(angle) => Matrix::rotation_z(angle),
            Self::Scale(factors) => Matrix::scaling(factors.x, factors.y, factors.z),
        }
    }

    #[must_use]
    pub fn round(&self, precision: u32) -> Self {
        match *self {
            Self::Translation(offset) => Self::Translation(offset.round(precision)),
            Self::Rotation(angle) => Self::Rotation(crate::geom::point::round_num(angle, precision)),
            Self::Scale(factors) => Self::Scale(factors.round(precision)),
        }
    }
}

impl fmt::Display for TransformComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::Rotation => write!(f, "rotation"),
            Self::Scale => write!(f, "scale"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered chain of translate/rotate/scale operations.
///
/// The first component in the chain is the first applied to a point.
/// Builders append; indexed getters and updaters address the Nth occurrence
/// of a kind, so a chain may hold the same kind more than once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    components: Vec<TransformComponent>,
}

impl Transform {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_components(components: Vec<TransformComponent>) -> Self {
        Self { components }
    }

    /// Standard scale-rotate-translate chain.
    #[must_use]
    pub fn srt(scale: Point, rotation: f64, translation: Point) -> Self {
        Self::new()
            .scale_point(scale)
            .rotate(rotation)
            .translate_point(translation)
    }

    #[must_use]
    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.translate_point(Point::new(x, y, z))
    }

    #[must_use]
    pub fn translate_point(mut self, offset: Point) -> Self {
        self.components.push(TransformComponent::Translation(offset));
        self
    }

    #[must_use]
    pub fn rotate(mut self, angle: f64) -> Self {
        self.components.push(TransformComponent::Rotation(angle));
        self
    }

    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, sz: f64) -> Self {
        self.scale_point(Point::new(sx, sy, sz))
    }

    #[must_use]
    pub fn scale_point(mut self, factors: Point) -> Self {
        self.components.push(TransformComponent::Scale(factors));
        self
    }

    #[must_use]
    pub fn components(&self) -> &[TransformComponent] {
        &self.components
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Kinds of each component in chain order.
    #[must_use]
    pub fn shape(&self) -> Vec<TransformComponentKind> {
        self.components.iter().map(TransformComponent::kind).collect()
    }

    /// True when both chains hold the same kinds in the same order.
    #[must_use]
    pub fn has_same_shape_as(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    fn nth_of_kind(&self, kind: TransformComponentKind, index: usize) -> Option<&TransformComponent> {
        self.components
            .iter()
            .filter(|c| c.kind() == kind)
            .nth(index)
    }

    fn nth_of_kind_mut(
        &mut self,
        kind: TransformComponentKind,
        index: usize,
    ) -> Option<&mut TransformComponent> {
        self.components
            .iter_mut()
            .filter(|c| c.kind() == kind)
            .nth(index)
    }

    /// The `index`th translation in the chain.
    #[must_use]
    pub fn translation(&self, index: usize) -> Option<Point> {
        match self.nth_of_kind(TransformComponentKind::Translation, index) {
            Some(TransformComponent::Translation(offset)) => Some(*offset),
            _ => None,
        }
    }

    /// The `index`th rotation in the chain.
    #[must_use]
    pub fn rotation(&self, index: usize) -> Option<f64> {
        match self.nth_of_kind(TransformComponentKind::Rotation, index) {
            Some(TransformComponent::Rotation(angle)) => Some(*angle),
            _ => None,
        }
    }

    /// The `index`th scale in the chain.
    #[must_use]
    pub fn scaling(&self, index: usize) -> Option<Point> {
        match self.nth_of_kind(TransformComponentKind::Scale, index) {
            Some(TransformComponent::Scale(factors)) => Some(*factors),
            _ => None,
        }
    }

    pub fn update_translation(&mut self, index: usize, offset: Point) -> Result<(), TransformError> {
        match self.nth_of_kind_mut(TransformComponentKind::Translation, index) {
            Some(component) => {
                *component = TransformComponent::Translation(offset);
                Ok(())
            }
            None => Err(TransformError::MissingComponent {
                kind: TransformComponentKind::Translation,
                index,
            }),
        }
    }

    pub fn update_rotation(&mut self, index: usize, angle: f64) -> Result<(), TransformError> {
        match self.nth_of_kind_mut(TransformComponentKind::Rotation, index) {
            Some(component) => {
                *component = TransformComponent::Rotation(angle);
                Ok(())
            }
            None => Err(TransformError::MissingComponent {
                kind: TransformComponentKind::Rotation,
                index,
            }),
        }
    }

    pub fn update_scale(&mut self, index: usize, factors: Point) -> Result<(), TransformError> {
        match self.nth_of_kind_mut(TransformComponentKind::Scale, index) {
            Some(component) => {
                *component = TransformComponent::Scale(factors);
                Ok(())
            }
            None => Err(TransformError::MissingComponent {
                kind: TransformComponentKind::Scale,
                index,
            }),
        }
    }

    /// Compose the chain into one matrix. The first component in the chain
    /// is applied to a point first, so later components multiply on the
    /// left.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.components
            .iter()
            .fold(Matrix::identity(), |acc, component| {
                component.matrix().multiply(acc)
            })
    }

    /// Apply the whole chain to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        self.matrix().transform_point(p)
    }

    #[must_use]
    pub fn round(&self, precision: u32) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|c| c.round(precision))
                .collect(),
        }
    }

    /// Rounding-based equality: same shape and every component value equal
    /// at `precision` digits.
    #[must_use]
    pub fn is_equal_to(&self, other: &Self, precision: u32) -> bool {
        self.round(precision) == other.round(precision)
    }
}
