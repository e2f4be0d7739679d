use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::{
    Bounds, BoundsError, LineBounds, RangeBounds, RectBounds, RectBoundsOptions, TransformBounds,
    TransformBoundsSlot,
};
use crate::geom::{
    Line, LineEnds, Point, Transform, TransformComponent, TransformComponentKind, round_num,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("state holds {got}, not {expected}")]
    WrongKind {
        expected: &'static str,
        got: &'static str,
    },
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

// ─────────────────────────────────────────────────────────────────────────────
// State payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Line payload: both endpoints and the ends count (0 infinite, 1 ray,
/// 2 segment).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineState {
    pub p1: [f64; 3],
    pub p2: [f64; 3],
    pub ends: u8,
}

/// One transform component, tagged by kind: `{"t": [x, y, z]}`,
/// `{"r": angle}` or `{"s": [x, y, z]}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum TransformComponentState {
    #[serde(rename = "t")]
    Translation([f64; 3]),
    #[serde(rename = "r")]
    Rotation(f64),
    #[serde(rename = "s")]
    Scale([f64; 3]),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeBoundsState {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: u32,
}

/// Rect payload. The axis directions are unit vectors and serialize at
/// full precision: rounding them would leave the pair no longer
/// perpendicular at the very precision the restore validates with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RectBoundsState {
    pub position: [f64; 3],
    pub right_direction: [f64; 3],
    pub top_direction: [f64; 3],
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub precision: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineBoundsState {
    pub line: LineState,
    pub precision: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SlotKindState {
    Translation,
    Rotation,
    Scale,
}

impl From<TransformComponentKind> for SlotKindState {
    fn from(kind: TransformComponentKind) -> Self {
        match kind {
            TransformComponentKind::Translation => Self::Translation,
            TransformComponentKind::Rotation => Self::Rotation,
            TransformComponentKind::Scale => Self::Scale,
        }
    }
}

impl From<SlotKindState> for TransformComponentKind {
    fn from(kind: SlotKindState) -> Self {
        match kind {
            SlotKindState::Translation => Self::Translation,
            SlotKindState::Rotation => Self::Rotation,
            SlotKindState::Scale => Self::Scale,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformBoundsSlotState {
    pub kind: SlotKindState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Box<BoundsState>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformBoundsState {
    pub slots: Vec<TransformBoundsSlotState>,
    pub precision: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tagged state forms
// ─────────────────────────────────────────────────────────────────────────────

/// Recoverable form of any bounds, tagged under `f1Type` with the payload
/// under `state`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "f1Type", content = "state")]
pub enum BoundsState {
    #[serde(rename = "rangeBounds")]
    Range(RangeBoundsState),
    #[serde(rename = "rectBounds")]
    Rect(RectBoundsState),
    #[serde(rename = "lineBounds")]
    Line(LineBoundsState),
    #[serde(rename = "transformBounds")]
    Transform(TransformBoundsState),
}

impl BoundsState {
    /// Capture bounds with numeric fields rounded to `precision` decimals.
    #[must_use]
    pub fn capture(bounds: &Bounds, precision: u32) -> Self {
        match bounds {
            Bounds::Range(b) => Self::Range(RangeBoundsState {
                min: b.min().map(|v| round_num(v, precision)),
                max: b.max().map(|v| round_num(v, precision)),
                precision: b.precision(),
            }),
            Bounds::Rect(b) => Self::Rect(RectBoundsState {
                position: point_array(b.position(), precision),
                right_direction: raw_array(b.right_direction()),
                top_direction: raw_array(b.top_direction()),
                left: round_num(b.left(), precision),
                right: round_num(b.right(), precision),
                top: round_num(b.top(), precision),
                bottom: round_num(b.bottom(), precision),
                precision: b.precision(),
            }),
            Bounds::Line(b) => Self::Line(LineBoundsState {
                line: line_state(b.boundary(), precision),
                precision: b.precision(),
            }),
            Bounds::Transform(b) => Self::Transform(TransformBoundsState {
                slots: b
                    .slots()
                    .iter()
                    .map(|slot| TransformBoundsSlotState {
                        kind: slot.kind().into(),
                        bounds: slot
                            .bounds()
                            .map(|inner| Box::new(Self::capture(inner, precision))),
                    })
                    .collect(),
                precision: b.precision(),
            }),
        }
    }

    /// Rebuild the bounds this state was captured from.
    pub fn restore(&self) -> Result<Bounds, BoundsError> {
        match self {
            Self::Range(state) => {
                let bounds = RangeBounds::new(state.min, state.max, state.precision)?;
                Ok(Bounds::Range(bounds))
            }
            Self::Rect(state) => {
                let options = RectBoundsOptions::new()
                    .with_position(state.position.into())
                    .with_right_direction(state.right_direction.into())
                    .with_top_direction(state.top_direction.into())
                    .with_sides(state.left, state.right, state.top, state.bottom)
                    .with_precision(state.precision);
                Ok(Bounds::Rect(RectBounds::new(options)?))
            }
            Self::Line(state) => {
                let line = restore_line(&state.line)?;
                Ok(Bounds::Line(LineBounds::new(line, state.precision)))
            }
            Self::Transform(state) => {
                let slots = state
                    .slots
                    .iter()
                    .map(|slot| {
                        let bounds = slot.bounds.as_deref().map(Self::restore).transpose()?;
                        Ok(TransformBoundsSlot::new(slot.kind.into(), bounds))
                    })
                    .collect::<Result<Vec<_>, BoundsError>>()?;
                let bounds = TransformBounds::new(slots, state.precision)?;
                Ok(Bounds::Transform(bounds))
            }
        }
    }
}

/// Recoverable form of any serializable object in the crate, tagged under
/// `f1Type` with the payload under `state`.
///
/// Tags: `"p"` point, `"l"` line, `"tf"` transform, and the four bounds
/// tags shared with [`BoundsState`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "f1Type", content = "state")]
pub enum ObjectState {
    #[serde(rename = "p")]
    Point([f64; 3]),
    #[serde(rename = "l")]
    Line(LineState),
    #[serde(rename = "tf")]
    Transform(Vec<TransformComponentState>),
    #[serde(rename = "rangeBounds")]
    RangeBounds(RangeBoundsState),
    #[serde(rename = "rectBounds")]
    RectBounds(RectBoundsState),
    #[serde(rename = "lineBounds")]
    LineBounds(LineBoundsState),
    #[serde(rename = "transformBounds")]
    TransformBounds(TransformBoundsState),
}

impl ObjectState {
    #[must_use]
    pub fn from_point(p: Point, precision: u32) -> Self {
        Self::Point(point_array(p, precision))
    }

    #[must_use]
    pub fn from_line(line: &Line, precision: u32) -> Self {
        Self::Line(line_state(line, precision))
    }

    #[must_use]
    pub fn from_transform(transform: &Transform, precision: u32) -> Self {
        let components = transform
            .components()
            .iter()
            .map(|component| match *component {
                TransformComponent::Translation(offset) => {
                    TransformComponentState::Translation(point_array(offset, precision))
                }
                TransformComponent::Rotation(angle) => {
                    TransformComponentState::Rotation(round_num(angle, precision))
                }
                TransformComponent::Scale(factors) => {
                    TransformComponentState::Scale(point_array(factors, precision))
                }
            })
            .collect();
        Self::Transform(components)
    }

    #[must_use]
    pub fn from_bounds(bounds: &Bounds, precision: u32) -> Self {
        BoundsState::capture(bounds, precision).into()
    }

    /// Tag this state serializes under.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Point(_) => "p",
            Self::Line(_) => "l",
            Self::Transform(_) => "tf",
            Self::RangeBounds(_) => "rangeBounds",
            Self::RectBounds(_) => "rectBounds",
            Self::LineBounds(_) => "lineBounds",
            Self::TransformBounds(_) => "transformBounds",
        }
    }

    pub fn to_point(&self) -> Result<Point, StateError> {
        match self {
            Self::Point(coords) => Ok((*coords).into()),
            _ => Err(self.wrong_kind("p")),
        }
    }

    pub fn to_line(&self) -> Result<Line, StateError> {
        match self {
            Self::Line(state) => Ok(restore_line(state)?),
            _ => Err(self.wrong_kind("l")),
        }
    }

    pub fn to_transform(&self) -> Result<Transform, StateError> {
        let Self::Transform(components) = self else {
            return Err(self.wrong_kind("tf"));
        };
        let components = components
            .iter()
            .map(|component| match *component {
                TransformComponentState::Translation(offset) => {
                    TransformComponent::Translation(offset.into())
                }
                TransformComponentState::Rotation(angle) => TransformComponent::Rotation(angle),
                TransformComponentState::Scale(factors) => {
                    TransformComponent::Scale(factors.into())
                }
            })
            .collect();
        Ok(Transform::from_components(components))
    }

    pub fn to_bounds(&self) -> Result<Bounds, StateError> {
        let state: BoundsState = self.clone().try_into()?;
        Ok(state.restore()?)
    }

    fn wrong_kind(&self, expected: &'static str) -> StateError {
        StateError::WrongKind {
            expected,
            got: self.tag(),
        }
    }
}

impl From<BoundsState> for ObjectState {
    fn from(state: BoundsState) -> Self {
        match state {
            BoundsState::Range(s) => Self::RangeBounds(s),
            BoundsState::Rect(s) => Self::RectBounds(s),
            BoundsState::Line(s) => Self::LineBounds(s),
            BoundsState::Transform(s) => Self::TransformBounds(s),
        }
    }
}

impl TryFrom<ObjectState> for BoundsState {
    type Error = StateError;

    fn try_from(state: ObjectState) -> Result<Self, StateError> {
        match state {
            ObjectState::RangeBounds(s) => Ok(Self::Range(s)),
            ObjectState::RectBounds(s) => Ok(Self::Rect(s)),
            ObjectState::LineBounds(s) => Ok(Self::Line(s)),
            ObjectState::TransformBounds(s) => Ok(Self::Transform(s)),
            other => Err(StateError::WrongKind {
                expected: "bounds",
                got: other.tag(),
            }),
        }
    }
}

fn point_array(p: Point, precision: u32) -> [f64; 3] {
    let rounded = p.round(precision);
    [rounded.x, rounded.y, rounded.z]
}

fn raw_array(p: Point) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn line_state(line: &Line, precision: u32) -> LineState {
    LineState {
        p1: point_array(line.p1, precision),
        p2: point_array(line.p2, precision),
        ends: line.ends.count(),
    }
}

fn restore_line(state: &LineState) -> Result<Line, BoundsError> {
    let ends = LineEnds::from_count(state.ends)
        .ok_or(BoundsError::InvalidEnds { count: state.ends })?;
    let line = Line::new(state.p1.into(), state.p2.into(), ends)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::get_bounds;

    #[test]
    fn point_state_serializes_tagged() {
        let state = ObjectState::from_point(Point::new(1.0, 2.5, 0.0), 8);
        let json = serde_json::to_string(&state).expect("serialize");
        assert_eq!(json, r#"{"f1Type":"p","state":[1.0,2.5,0.0]}"#);
        let parsed: ObjectState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.to_point().expect("point"), Point::new(1.0, 2.5, 0.0));
    }

    #[test]
    fn point_capture_rounds_to_precision() {
        let state = ObjectState::from_point(Point::new(1.123456789, 0.0, 0.0), 8);
        assert_eq!(
            state.to_point().expect("point"),
            Point::new(1.12345679, 0.0, 0.0)
        );
    }

    #[test]
    fn line_state_round_trips() {
        let line = Line::new(Point::xy(0.0, 0.0), Point::xy(10.0, 5.0), LineEnds::Ray)
            .expect("line");
        let state = ObjectState::from_line(&line, 8);
        let json = serde_json::to_string(&state).expect("serialize");
        let parsed: ObjectState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.to_line().expect("line"), line);
    }

    #[test]
    fn transform_state_tags_components() {
        let transform = Transform::new()
            .scale(2.0, 2.0, 1.0)
            .rotate(0.5)
            .translate(1.0, -1.0, 0.0);
        let state = ObjectState::from_transform(&transform, 8);
        let json = serde_json::to_string(&state).expect("serialize");
        assert_eq!(
            json,
            r#"{"f1Type":"tf","state":[{"s":[2.0,2.0,1.0]},{"r":0.5},{"t":[1.0,-1.0,0.0]}]}"#
        );
        let parsed: ObjectState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.to_transform().expect("transform"), transform);
    }

    #[test]
    fn range_bounds_state_round_trips() {
        let bounds = Bounds::Range(RangeBounds::new(Some(-10.0), Some(10.0), 8).expect("range"));
        let state = BoundsState::capture(&bounds, 8);
        let json = serde_json::to_string(&state).expect("serialize");
        let parsed: BoundsState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.restore().expect("restore"), bounds);
    }

    #[test]
    fn half_open_range_state_keeps_open_side() {
        let bounds = Bounds::Range(RangeBounds::new(None, Some(4.5), 8).expect("range"));
        let state = BoundsState::capture(&bounds, 8);
        let parsed: BoundsState =
            serde_json::from_str(&serde_json::to_string(&state).expect("serialize"))
                .expect("deserialize");
        assert_eq!(parsed.restore().expect("restore"), bounds);
    }

    #[test]
    fn rect_bounds_state_round_trips() {
        let rect = RectBounds::square(Point::xy(1.0, 2.0), 10.0).expect("rect");
        let bounds = Bounds::Rect(rect);
        let state = BoundsState::capture(&bounds, 8);
        let parsed: BoundsState =
            serde_json::from_str(&serde_json::to_string(&state).expect("serialize"))
                .expect("deserialize");
        assert_eq!(parsed.restore().expect("restore"), bounds);
    }

    #[test]
    fn line_bounds_state_round_trips() {
        let line = Line::new(Point::ORIGIN, Point::xy(10.0, 0.0), LineEnds::Segment)
            .expect("line");
        let bounds = Bounds::Line(LineBounds::new(line, 8));
        let state = BoundsState::capture(&bounds, 8);
        let parsed: BoundsState =
            serde_json::from_str(&serde_json::to_string(&state).expect("serialize"))
                .expect("deserialize");
        assert_eq!(parsed.restore().expect("restore"), bounds);
    }

    #[test]
    fn transform_bounds_state_round_trips() {
        let mut bounds = TransformBounds::srt();
        bounds
            .set_translation(Some(Bounds::Rect(
                RectBounds::square(Point::ORIGIN, 5.0).expect("rect"),
            )))
            .expect("set translation");
        bounds.set_rotation(Some(
            RangeBounds::new(Some(-1.0), Some(1.0), 8).expect("range"),
        ));
        let bounds = Bounds::Transform(bounds);
        let state = BoundsState::capture(&bounds, 8);
        let json = serde_json::to_string(&state).expect("serialize");
        let parsed: BoundsState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.restore().expect("restore"), bounds);
    }

    #[test]
    fn bounds_state_feeds_the_factory() {
        let bounds = Bounds::Range(RangeBounds::new(Some(0.0), Some(1.0), 8).expect("range"));
        let json = serde_json::to_string(&BoundsState::capture(&bounds, 8)).expect("serialize");
        let def = serde_json::from_str(&json).expect("deserialize def");
        assert_eq!(get_bounds(&def).expect("factory"), bounds);
    }

    #[test]
    fn mismatched_state_kind_is_an_error() {
        let state = ObjectState::from_point(Point::ORIGIN, 8);
        let error = state.to_line().expect_err("must reject");
        assert_eq!(
            error,
            StateError::WrongKind {
                expected: "l",
                got: "p"
            }
        );
    }
}
