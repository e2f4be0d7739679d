use serde::{Deserialize, Serialize};

use crate::bounds::{
    Bounds, BoundsError, LineBounds, RangeBounds, RectBounds, RectBoundsOptions, TransformBounds,
    TransformBoundsSlot,
};
use crate::geom::{
    DEFAULT_PRECISION, Line, LineEnds, Point, Transform, TransformComponentKind,
};
use crate::state::BoundsState;

// ─────────────────────────────────────────────────────────────────────────────
// Declarative definitions
// ─────────────────────────────────────────────────────────────────────────────

/// A point in a declarative definition: `[x, y]` or `[x, y, z]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PointDef {
    Xy([f64; 2]),
    Xyz([f64; 3]),
}

impl From<PointDef> for Point {
    fn from(def: PointDef) -> Self {
        match def {
            PointDef::Xy([x, y]) => Point::xy(x, y),
            PointDef::Xyz([x, y, z]) => Point::new(x, y, z),
        }
    }
}

impl From<Point> for PointDef {
    fn from(p: Point) -> Self {
        Self::Xyz([p.x, p.y, p.z])
    }
}

/// A line in a declarative definition: two points, optionally followed by
/// an ends count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LineDef {
    Points([PointDef; 2]),
    PointsEnds(PointDef, PointDef, u8),
}

/// `{min?, max?, precision?}` — a 1D interval. A missing side is
/// unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct RangeBoundsDef {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: Option<u32>,
}

/// `{left?, right?, top?, bottom?, position?, normal?, rightDirection?,
/// topDirection?, precision?}` — a rectangle in a plane. Sides default to
/// 1, position to the origin, the plane to z = 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct RectBoundsDef {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub position: Option<PointDef>,
    pub normal: Option<PointDef>,
    pub right_direction: Option<PointDef>,
    pub top_direction: Option<PointDef>,
    pub precision: Option<u32>,
}

/// `{line?, p1?, p2?, length?, angle?, ends?, precision?}` — a line bound.
/// Either a full line, two points, or a point with length and angle;
/// `ends` defaults to 2 (segment).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct LineBoundsDef {
    pub line: Option<LineDef>,
    pub p1: Option<PointDef>,
    pub p2: Option<PointDef>,
    pub length: Option<f64>,
    pub angle: Option<f64>,
    pub ends: Option<u8>,
    pub precision: Option<u32>,
}

/// `{translation?, rotation?, scale?, precision?}` — per-kind sub-bounds
/// for a transform chain. The rotation sub-definition must resolve to
/// range bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct TransformBoundsDef {
    pub translation: Option<Box<BoundsDef>>,
    pub rotation: Option<Box<BoundsDef>>,
    pub scale: Option<Box<BoundsDef>>,
    pub precision: Option<u32>,
}

/// A declarative bounds definition, dispatched on which keys are present:
/// an `f1Type` tag means recorded state, `min`/`max` a range, side/plane
/// keys a rect, point/line keys a line bound, and transform component keys
/// a transform bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BoundsDef {
    State(BoundsState),
    Range(RangeBoundsDef),
    Rect(RectBoundsDef),
    Line(LineBoundsDef),
    Transform(TransformBoundsDef),
}

// ─────────────────────────────────────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────────────────────────────────────

/// Build bounds from a declarative definition.
///
/// A transform definition is aligned to the standard
/// scale-rotate-translate chain; use [`get_bounds_for_transform`] to align
/// with a different chain.
pub fn get_bounds(def: &BoundsDef) -> Result<Bounds, BoundsError> {
    match def {
        BoundsDef::State(state) => state.restore(),
        BoundsDef::Range(d) => Ok(Bounds::Range(range_from_def(d)?)),
        BoundsDef::Rect(d) => Ok(Bounds::Rect(rect_from_def(d)?)),
        BoundsDef::Line(d) => Ok(Bounds::Line(line_bounds_from_def(d)?)),
        BoundsDef::Transform(d) => {
            let shape = [
                TransformComponentKind::Scale,
                TransformComponentKind::Rotation,
                TransformComponentKind::Translation,
            ];
            Ok(Bounds::Transform(transform_bounds_from_def(d, &shape)?))
        }
    }
}

/// Build transform bounds aligned to an existing transform chain.
pub fn get_bounds_for_transform(
    def: &TransformBoundsDef,
    transform: &Transform,
) -> Result<TransformBounds, BoundsError> {
    transform_bounds_from_def(def, &transform.shape())
}

fn range_from_def(def: &RangeBoundsDef) -> Result<RangeBounds, BoundsError> {
    RangeBounds::new(
        def.min,
        def.max,
        def.precision.unwrap_or(DEFAULT_PRECISION),
    )
}

fn rect_from_def(def: &RectBoundsDef) -> Result<RectBounds, BoundsError> {
    let mut options = RectBoundsOptions::new()
        .with_precision(def.precision.unwrap_or(DEFAULT_PRECISION));
    if let Some(position) = def.position {
        options = options.with_position(position.into());
    }
    if let Some(normal) = def.normal {
        options = options.with_normal(normal.into());
    }
    if let Some(right_direction) = def.right_direction {
        options = options.with_right_direction(right_direction.into());
    }
    if let Some(top_direction) = def.top_direction {
        options = options.with_top_direction(top_direction.into());
    }
    options.left = def.left.unwrap_or(options.left);
    options.right = def.right.unwrap_or(options.right);
    options.top = def.top.unwrap_or(options.top);
    options.bottom = def.bottom.unwrap_or(options.bottom);
    RectBounds::new(options)
}

fn line_bounds_from_def(def: &LineBoundsDef) -> Result<LineBounds, BoundsError> {
    let precision = def.precision.unwrap_or(DEFAULT_PRECISION);
    let ends = match def.ends {
        None => LineEnds::Segment,
        Some(count) => {
            LineEnds::from_count(count).ok_or(BoundsError::InvalidEnds { count })?
        }
    };

    let line = if let Some(line_def) = def.line {
        match line_def {
            LineDef::Points([p1, p2]) => Line::new(p1.into(), p2.into(), ends)?,
            LineDef::PointsEnds(p1, p2, count) => {
                let ends =
                    LineEnds::from_count(count).ok_or(BoundsError::InvalidEnds { count })?;
                Line::new(p1.into(), p2.into(), ends)?
            }
        }
    } else if let Some(p2) = def.p2 {
        let p1 = def.p1.map_or(Point::ORIGIN, Into::into);
        Line::new(p1, p2.into(), ends)?
    } else if let (Some(length), Some(angle)) = (def.length, def.angle) {
        let p1 = def.p1.map_or(Point::ORIGIN, Into::into);
        Line::from_point_angle_length(p1, angle, length, ends)?
    } else {
        return Err(BoundsError::UnresolvedDefinition {
            reason: "line bounds need a line, two points, or a length and angle".to_string(),
        });
    };

    Ok(LineBounds::new(line, precision))
}

impl From<&Bounds> for BoundsDef {
    /// Describe existing bounds as a definition that resolves back to an
    /// equal value.
    fn from(bounds: &Bounds) -> Self {
        match bounds {
            Bounds::Range(b) => Self::Range(RangeBoundsDef {
                min: b.min(),
                max: b.max(),
                precision: Some(b.precision()),
            }),
            Bounds::Rect(b) => Self::Rect(RectBoundsDef {
                left: Some(b.left()),
                right: Some(b.right()),
                top: Some(b.top()),
                bottom: Some(b.bottom()),
                position: Some(b.position().into()),
                right_direction: Some(b.right_direction().into()),
                top_direction: Some(b.top_direction().into()),
                precision: Some(b.precision()),
                ..Self::default_rect()
            }),
            Bounds::Line(b) => Self::Line(LineBoundsDef {
                line: Some(LineDef::PointsEnds(
                    b.boundary().p1.into(),
                    b.boundary().p2.into(),
                    b.boundary().ends.count(),
                )),
                precision: Some(b.precision()),
                ..LineBoundsDef::default()
            }),
            Bounds::Transform(b) => {
                let sub = |bounds: Option<&Bounds>| bounds.map(|b| Box::new(Self::from(b)));
                Self::Transform(TransformBoundsDef {
                    translation: sub(b.translation_bounds(0)),
                    rotation: sub(b.rotation_bounds(0)),
                    scale: sub(b.scale_bounds(0)),
                    precision: Some(b.precision()),
                })
            }
        }
    }
}

impl BoundsDef {
    fn default_rect() -> RectBoundsDef {
        RectBoundsDef::default()
    }
}

fn transform_bounds_from_def(
    def: &TransformBoundsDef,
    shape: &[TransformComponentKind],
) -> Result<TransformBounds, BoundsError> {
    let precision = def.precision.unwrap_or(DEFAULT_PRECISION);
    let sub_bounds = |sub: &Option<Box<BoundsDef>>| -> Result<Option<Bounds>, BoundsError> {
        sub.as_deref().map(get_bounds).transpose()
    };
    let translation = sub_bounds(&def.translation)?;
    let rotation = sub_bounds(&def.rotation)?;
    let scale = sub_bounds(&def.scale)?;

    let slots = shape
        .iter()
        .map(|&kind| {
            let bounds = match kind {
                TransformComponentKind::Translation => translation.clone(),
                TransformComponentKind::Rotation => rotation.clone(),
                TransformComponentKind::Scale => scale.clone(),
            };
            TransformBoundsSlot::new(kind, bounds)
        })
        .collect();
    TransformBounds::new(slots, precision)
}
