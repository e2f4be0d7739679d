use thiserror::Error;

use crate::bounds::{Bounds, BoundsError, RangeBounds};
use crate::geom::{
    DEFAULT_PRECISION, Point, Transform, TransformComponent, TransformError, round_num,
};

/// Deceleration floor applied once a boundary can be hit, so bounded
/// motion always runs down in finite time.
const MIN_DECELERATION: f64 = 1e-7;

/// Hard cap on resolved bounces per call.
const MAX_BOUNCES: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("deceleration must be non-negative, got {value}")]
    InvalidDeceleration { value: f64 },
    #[error("bounce loss must lie in [0, 1], got {value}")]
    InvalidBounceLoss { value: f64 },
    #[error("boundary intersect at distance {distance} exceeds the step distance {step}")]
    IntersectBeyondStep { distance: f64, step: f64 },
    #[error("bounce resolution exceeded {max} iterations")]
    BounceOverflow { max: usize },
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

// ─────────────────────────────────────────────────────────────────────────────
// DecelerationOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Options for the deceleration integrators.
#[derive(Debug, Clone, PartialEq)]
pub struct DecelerationOptions {
    /// Rate the speed decays at, per unit time. Must be non-negative.
    pub deceleration: f64,
    /// Time to advance the motion by. `None` runs it until it stops.
    pub delta_time: Option<f64>,
    /// Boundary the motion bounces inside, if any.
    pub bounds: Option<Bounds>,
    /// Fraction of speed lost at each bounce: 0 is elastic, 1 absorbs the
    /// motion at the boundary.
    pub bounce_loss: f64,
    /// Speed at or below which the motion counts as stopped.
    pub zero_velocity_threshold: f64,
    /// Decimal digits for rounded comparisons.
    pub precision: u32,
}

impl DecelerationOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deceleration: 1.0,
            delta_time: None,
            bounds: None,
            bounce_loss: 0.0,
            zero_velocity_threshold: 0.0,
            precision: DEFAULT_PRECISION,
        }
    }

    #[must_use]
    pub const fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration;
        self
    }

    #[must_use]
    pub const fn with_delta_time(mut self, delta_time: f64) -> Self {
        self.delta_time = Some(delta_time);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub const fn with_bounce_loss(mut self, bounce_loss: f64) -> Self {
        self.bounce_loss = bounce_loss;
        self
    }

    #[must_use]
    pub const fn with_zero_velocity_threshold(mut self, threshold: f64) -> Self {
        self.zero_velocity_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for DecelerationOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────────────────

/// Scalar motion after deceleration.
///
/// `duration` is the time actually simulated: the requested step, or less
/// when the motion stopped first. `None` means the motion never ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDeceleration {
    pub value: f64,
    pub velocity: f64,
    pub duration: Option<f64>,
}

/// Point motion after deceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDeceleration {
    pub position: Point,
    pub velocity: Point,
    pub duration: Option<f64>,
}

/// Transform-chain motion after deceleration, slot for slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformDeceleration {
    pub transform: Transform,
    pub velocity: Transform,
    pub duration: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scalar deceleration
// ─────────────────────────────────────────────────────────────────────────────

/// Decelerate a scalar moving at `velocity`, bouncing inside range bounds
/// when the options carry them.
///
/// With `delta_time: None` the motion runs until the speed falls to the
/// zero-velocity threshold and `duration` reports the total time; with a
/// delta time it advances by at most that much. Zero deceleration with
/// nothing to stop against reports `duration: None` and leaves the inputs
/// untouched.
pub fn decelerate_value(
    value: f64,
    velocity: f64,
    options: &DecelerationOptions,
) -> Result<ValueDeceleration, MotionError> {
    validate(options)?;
    let precision = options.precision;
    let threshold = options.zero_velocity_threshold;
    let bounds = defined_bounds(options);

    if round_num(velocity.abs(), precision) <= round_num(threshold, precision) {
        let value = match bounds {
            Some(b) => b.clip_value(value)?,
            None => value,
        };
        return Ok(ValueDeceleration {
            value,
            velocity: 0.0,
            duration: Some(0.0),
        });
    }

    if never_stops(options, bounds.is_some()) {
        return Ok(ValueDeceleration {
            value,
            velocity,
            duration: None,
        });
    }

    let deceleration = floored_deceleration(options, bounds.is_some());
    let mut position = value;
    let mut speed = velocity.abs();
    let mut direction = if velocity >= 0.0 { 1.0 } else { -1.0 };
    let mut remaining = options.delta_time.map(|t| t.max(0.0));
    let mut elapsed = 0.0;

    for _ in 0..MAX_BOUNCES {
        if round_num(speed, precision) <= round_num(threshold, precision) {
            return Ok(ValueDeceleration {
                value: position,
                velocity: 0.0,
                duration: Some(elapsed),
            });
        }

        let step = leg_step(speed, threshold, deceleration, remaining);
        let distance = speed * step - 0.5 * deceleration * step * step;
        let tentative = position + direction * distance;

        let hit = match bounds {
            Some(b) if !b.contains_value(tentative)? => {
                let hit = b.intersect_value(position, direction)?;
                hit.intersect
                    .map(|boundary| (boundary, hit.distance, hit.reflection))
            }
            _ => None,
        };

        let Some((boundary, hit_distance, reflection)) = hit else {
            let mut new_speed = speed - deceleration * step;
            if round_num(new_speed, precision) <= round_num(threshold, precision) {
                new_speed = 0.0;
            }
            return Ok(ValueDeceleration {
                value: tentative,
                velocity: direction * new_speed,
                duration: Some(elapsed + step),
            });
        };

        if round_num(hit_distance, precision) > round_num(distance, precision) {
            return Err(MotionError::IntersectBeyondStep {
                distance: hit_distance,
                step: distance,
            });
        }

        let time_to_hit = time_to_distance(speed, deceleration, hit_distance);
        let speed_at_hit = (speed - deceleration * time_to_hit).max(0.0);
        elapsed += time_to_hit;

        if options.bounce_loss >= 1.0 {
            return Ok(ValueDeceleration {
                value: boundary,
                velocity: 0.0,
                duration: Some(elapsed),
            });
        }

        position = boundary;
        speed = speed_at_hit * (1.0 - options.bounce_loss);
        direction = reflection;
        remaining = remaining.map(|left| (left - time_to_hit).max(0.0));
    }
    Err(MotionError::BounceOverflow { max: MAX_BOUNCES })
}

// ─────────────────────────────────────────────────────────────────────────────
// Point deceleration
// ─────────────────────────────────────────────────────────────────────────────

/// Decelerate a point along its velocity, bouncing off rect or line
/// bounds.
///
/// Line bounds first project the velocity onto the line. Range bounds
/// constrain each component independently and delegate to
/// [`decelerate_independent_point`] with the same range on every axis.
pub fn decelerate_point(
    position: Point,
    velocity: Point,
    options: &DecelerationOptions,
) -> Result<PointDeceleration, MotionError> {
    validate(options)?;
    let precision = options.precision;
    let threshold = options.zero_velocity_threshold;
    let bounds = defined_bounds(options);

    if let Some(Bounds::Range(range)) = bounds {
        return decelerate_independent_point(position, velocity, options, [Some(*range); 3]);
    }

    let velocity = match bounds {
        Some(b) => b.clip_velocity(velocity),
        None => velocity,
    };

    let stopped = |position: Point| -> Result<PointDeceleration, MotionError> {
        let position = match bounds {
            Some(b) => b.clip_point(position)?,
            None => position,
        };
        Ok(PointDeceleration {
            position,
            velocity: Point::ORIGIN,
            duration: Some(0.0),
        })
    };

    if round_num(velocity.length(), precision) <= round_num(threshold, precision) {
        return stopped(position);
    }

    if never_stops(options, bounds.is_some()) {
        return Ok(PointDeceleration {
            position,
            velocity,
            duration: None,
        });
    }

    let Some(mut unit) = velocity.normalized() else {
        return stopped(position);
    };
    let deceleration = floored_deceleration(options, bounds.is_some());
    let mut current = position;
    let mut speed = velocity.length();
    let mut remaining = options.delta_time.map(|t| t.max(0.0));
    let mut elapsed = 0.0;

    for bounce in 0..MAX_BOUNCES {
        if round_num(speed, precision) <= round_num(threshold, precision) {
            return Ok(PointDeceleration {
                position: current,
                velocity: Point::ORIGIN,
                duration: Some(elapsed),
            });
        }

        let step = leg_step(speed, threshold, deceleration, remaining);
        let distance = speed * step - 0.5 * deceleration * step * step;
        let tentative = current.add(unit.scale(distance));

        let hit = match bounds {
            Some(b) if !b.contains_point(tentative)? => {
                let hit = b.intersect_point(current, unit)?;
                hit.intersect
                    .map(|boundary| (boundary, hit.distance, hit.reflection))
            }
            _ => None,
        };

        let Some((boundary, hit_distance, reflection)) = hit else {
            let mut new_speed = speed - deceleration * step;
            if round_num(new_speed, precision) <= round_num(threshold, precision) {
                new_speed = 0.0;
            }
            return Ok(PointDeceleration {
                position: tentative,
                velocity: unit.scale(new_speed),
                duration: Some(elapsed + step),
            });
        };

        if round_num(hit_distance, precision) > round_num(distance, precision) {
            return Err(MotionError::IntersectBeyondStep {
                distance: hit_distance,
                step: distance,
            });
        }

        let time_to_hit = time_to_distance(speed, deceleration, hit_distance);
        let speed_at_hit = (speed - deceleration * time_to_hit).max(0.0);
        elapsed += time_to_hit;

        if options.bounce_loss >= 1.0 {
            return Ok(PointDeceleration {
                position: boundary,
                velocity: Point::ORIGIN,
                duration: Some(elapsed),
            });
        }

        log::debug!(
            "bounce {} at ({}, {}, {}), speed {}",
            bounce,
            boundary.x,
            boundary.y,
            boundary.z,
            speed_at_hit
        );
        current = boundary;
        speed = speed_at_hit * (1.0 - options.bounce_loss);
        unit = reflection;
        remaining = remaining.map(|left| (left - time_to_hit).max(0.0));
    }
    Err(MotionError::BounceOverflow { max: MAX_BOUNCES })
}

/// Decelerate each component of a point independently against its own
/// optional range.
///
/// Each axis runs the scalar integrator with its own bounds; the options'
/// own `bounds` field is not consulted. The combined duration is the
/// longest axis duration, or `None` when any axis never stops.
pub fn decelerate_independent_point(
    position: Point,
    velocity: Point,
    options: &DecelerationOptions,
    axis_bounds: [Option<RangeBounds>; 3],
) -> Result<PointDeceleration, MotionError> {
    let axis = |value: f64,
                velocity: f64,
                bounds: Option<RangeBounds>|
     -> Result<ValueDeceleration, MotionError> {
        let sub = DecelerationOptions {
            bounds: bounds.map(Bounds::Range),
            ..options.clone()
        };
        decelerate_value(value, velocity, &sub)
    };
    let x = axis(position.x, velocity.x, axis_bounds[0])?;
    let y = axis(position.y, velocity.y, axis_bounds[1])?;
    let z = axis(position.z, velocity.z, axis_bounds[2])?;

    let duration = match (x.duration, y.duration, z.duration) {
        (Some(x), Some(y), Some(z)) => Some(x.max(y).max(z)),
        _ => None,
    };
    Ok(PointDeceleration {
        position: Point::new(x.value, y.value, z.value),
        velocity: Point::new(x.velocity, y.velocity, z.velocity),
        duration,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform deceleration
// ─────────────────────────────────────────────────────────────────────────────

/// Decelerate a transform chain slot for slot against optional transform
/// bounds.
///
/// `velocity` must have the same shape as `transform`; each slot's value
/// moves at the matching slot's velocity. Translation and scale slots run
/// the point integrator, rotation slots the scalar one. The combined
/// duration is the longest slot duration, or `None` when any slot never
/// stops.
pub fn decelerate_transform(
    transform: &Transform,
    velocity: &Transform,
    options: &DecelerationOptions,
) -> Result<TransformDeceleration, MotionError> {
    validate(options)?;
    if !transform.has_same_shape_as(velocity) {
        return Err(TransformError::ShapeMismatch {
            expected: shape_label(transform),
            got: shape_label(velocity),
        }
        .into());
    }
    let bounds = match &options.bounds {
        None => None,
        Some(Bounds::Transform(b)) => {
            b.check_shape(transform)?;
            Some(b)
        }
        Some(other) => {
            return Err(BoundsError::UnsupportedQuery {
                kind: other.kind(),
                query: "decelerate_transform",
            }
            .into());
        }
    };

    let mut components = Vec::with_capacity(transform.len());
    let mut velocities = Vec::with_capacity(transform.len());
    let mut duration = Some(0.0_f64);

    for (index, (component, velocity_component)) in transform
        .components()
        .iter()
        .zip(velocity.components())
        .enumerate()
    {
        let slot_bounds = bounds
            .and_then(|b| b.slots().get(index))
            .and_then(|slot| slot.bounds());
        let sub = DecelerationOptions {
            bounds: slot_bounds.cloned(),
            ..options.clone()
        };
        match (*component, *velocity_component) {
            (TransformComponent::Translation(offset), TransformComponent::Translation(v)) => {
                let moved = decelerate_point(offset, v, &sub)?;
                components.push(TransformComponent::Translation(moved.position));
                velocities.push(TransformComponent::Translation(moved.velocity));
                duration = combine_durations(duration, moved.duration);
            }
            (TransformComponent::Rotation(angle), TransformComponent::Rotation(v)) => {
                let moved = decelerate_value(angle, v, &sub)?;
                components.push(TransformComponent::Rotation(moved.value));
                velocities.push(TransformComponent::Rotation(moved.velocity));
                duration = combine_durations(duration, moved.duration);
            }
            (TransformComponent::Scale(factors), TransformComponent::Scale(v)) => {
                let moved = decelerate_point(factors, v, &sub)?;
                components.push(TransformComponent::Scale(moved.position));
                velocities.push(TransformComponent::Scale(moved.velocity));
                duration = combine_durations(duration, moved.duration);
            }
            _ => {
                return Err(TransformError::ShapeMismatch {
                    expected: shape_label(transform),
                    got: shape_label(velocity),
                }
                .into());
            }
        }
    }

    Ok(TransformDeceleration {
        transform: Transform::from_components(components),
        velocity: Transform::from_components(velocities),
        duration,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared leg math
// ─────────────────────────────────────────────────────────────────────────────

fn validate(options: &DecelerationOptions) -> Result<(), MotionError> {
    if options.deceleration < 0.0 {
        return Err(MotionError::InvalidDeceleration {
            value: options.deceleration,
        });
    }
    if !(0.0..=1.0).contains(&options.bounce_loss) {
        return Err(MotionError::InvalidBounceLoss {
            value: options.bounce_loss,
        });
    }
    Ok(())
}

/// Bounds worth consulting: present and constraining at least one side.
fn defined_bounds(options: &DecelerationOptions) -> Option<&Bounds> {
    options.bounds.as_ref().filter(|b| b.is_defined())
}

/// Zero deceleration with no time limit and no energy sink: the motion
/// carries on forever.
fn never_stops(options: &DecelerationOptions, bounded: bool) -> bool {
    round_num(options.deceleration, options.precision) == 0.0
        && options.delta_time.is_none()
        && (options.bounce_loss == 0.0 || !bounded)
}

fn floored_deceleration(options: &DecelerationOptions, bounded: bool) -> f64 {
    if bounded {
        options.deceleration.max(MIN_DECELERATION)
    } else {
        options.deceleration
    }
}

/// Time this leg runs for: the remaining budget, capped at the natural
/// stop time.
fn leg_step(speed: f64, threshold: f64, deceleration: f64, remaining: Option<f64>) -> f64 {
    let to_stop = if deceleration > 0.0 {
        (speed - threshold) / deceleration
    } else {
        f64::INFINITY
    };
    match remaining {
        None => to_stop,
        Some(left) => left.min(to_stop),
    }
}

/// Smaller positive root of `d = v·t − a·t²/2`, with the discriminant
/// clamped at zero against rounding noise.
fn time_to_distance(speed: f64, deceleration: f64, distance: f64) -> f64 {
    let discriminant = (speed * speed - 2.0 * deceleration * distance).max(0.0);
    (speed - discriminant.sqrt()) / deceleration
}

fn combine_durations(total: Option<f64>, slot: Option<f64>) -> Option<f64> {
    match (total, slot) {
        (Some(total), Some(slot)) => Some(total.max(slot)),
        _ => None,
    }
}

fn shape_label(transform: &Transform) -> String {
    transform
        .shape()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{LineBounds, RectBounds, TransformBounds};
    use crate::geom::{Line, LineEnds};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }

    fn assert_point_close(p: Point, x: f64, y: f64, z: f64) {
        assert_close(p.x, x);
        assert_close(p.y, y);
        assert_close(p.z, z);
    }

    #[test]
    fn scalar_closed_form_single_step() {
        let options = DecelerationOptions::new().with_delta_time(1.0);
        let result = decelerate_value(0.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 4.5);
        assert_close(result.velocity, 4.0);
        assert_close(result.duration.expect("duration"), 1.0);
    }

    #[test]
    fn scalar_runs_to_stop() {
        let options = DecelerationOptions::new();
        let result = decelerate_value(0.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 12.5);
        assert_close(result.velocity, 0.0);
        assert_close(result.duration.expect("duration"), 5.0);
    }

    #[test]
    fn scalar_step_past_stop_clamps() {
        let at_stop = decelerate_value(0.0, 5.0, &DecelerationOptions::new().with_delta_time(5.0))
            .expect("decelerate");
        let past_stop =
            decelerate_value(0.0, 5.0, &DecelerationOptions::new().with_delta_time(10.0))
                .expect("decelerate");
        assert_close(at_stop.value, 12.5);
        assert_close(at_stop.velocity, 0.0);
        assert_eq!(at_stop.value, past_stop.value);
        assert_eq!(at_stop.velocity, past_stop.velocity);
        assert_close(past_stop.duration.expect("duration"), 5.0);
    }

    #[test]
    fn scalar_bounces_elastically() {
        let range = RangeBounds::new(Some(-4.5), Some(4.5), 8).expect("range");
        let options = DecelerationOptions::new()
            .with_delta_time(2.0)
            .with_bounds(Bounds::Range(range));
        let result = decelerate_value(0.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 1.0);
        assert_close(result.velocity, -3.0);
        assert_close(result.duration.expect("duration"), 2.0);
    }

    #[test]
    fn scalar_bounce_loses_half() {
        let range = RangeBounds::new(Some(-4.5), Some(4.5), 8).expect("range");
        let options = DecelerationOptions::new()
            .with_delta_time(2.0)
            .with_bounds(Bounds::Range(range))
            .with_bounce_loss(0.5);
        let result = decelerate_value(0.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 3.0);
        assert_close(result.velocity, -1.0);
    }

    #[test]
    fn scalar_full_loss_stops_at_boundary() {
        let range = RangeBounds::new(Some(-4.5), Some(4.5), 8).expect("range");
        let options = DecelerationOptions::new()
            .with_delta_time(2.0)
            .with_bounds(Bounds::Range(range))
            .with_bounce_loss(1.0);
        let result = decelerate_value(0.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 4.5);
        assert_close(result.velocity, 0.0);
        assert_close(result.duration.expect("duration"), 1.0);
    }

    #[test]
    fn scalar_zero_deceleration_never_ends() {
        let options = DecelerationOptions::new().with_deceleration(0.0);
        let result = decelerate_value(2.0, 5.0, &options).expect("decelerate");
        assert_eq!(result.duration, None);
        assert_close(result.value, 2.0);
        assert_close(result.velocity, 5.0);
    }

    #[test]
    fn scalar_zero_deceleration_with_step_advances() {
        let options = DecelerationOptions::new()
            .with_deceleration(0.0)
            .with_delta_time(3.0);
        let result = decelerate_value(2.0, 5.0, &options).expect("decelerate");
        assert_close(result.value, 17.0);
        assert_close(result.velocity, 5.0);
        assert_close(result.duration.expect("duration"), 3.0);
    }

    #[test]
    fn scalar_below_threshold_is_stopped() {
        let range = RangeBounds::new(Some(-1.0), Some(1.0), 8).expect("range");
        let options = DecelerationOptions::new()
            .with_zero_velocity_threshold(0.5)
            .with_bounds(Bounds::Range(range));
        let result = decelerate_value(3.0, 0.2, &options).expect("decelerate");
        assert_close(result.value, 1.0);
        assert_close(result.velocity, 0.0);
        assert_close(result.duration.expect("duration"), 0.0);
    }

    #[test]
    fn rejects_negative_deceleration() {
        let options = DecelerationOptions::new().with_deceleration(-1.0);
        let error = decelerate_value(0.0, 5.0, &options).expect_err("must reject");
        assert_eq!(error, MotionError::InvalidDeceleration { value: -1.0 });
    }

    #[test]
    fn rejects_bounce_loss_above_one() {
        let options = DecelerationOptions::new().with_bounce_loss(1.5);
        let error = decelerate_value(0.0, 5.0, &options).expect_err("must reject");
        assert_eq!(error, MotionError::InvalidBounceLoss { value: 1.5 });
    }

    #[test]
    fn point_runs_to_stop_inside_rect() {
        let rect = RectBounds::square(Point::ORIGIN, 10.0).expect("rect");
        let options = DecelerationOptions::new().with_bounds(Bounds::Rect(rect));
        let result =
            decelerate_point(Point::ORIGIN, Point::xy(3.0, 0.0), &options).expect("decelerate");
        assert_point_close(result.position, 4.5, 0.0, 0.0);
        assert_point_close(result.velocity, 0.0, 0.0, 0.0);
        assert_close(result.duration.expect("duration"), 3.0);
    }

    #[test]
    fn point_bounces_off_rect_wall() {
        let rect = RectBounds::square(Point::ORIGIN, 2.0).expect("rect");
        let options = DecelerationOptions::new().with_bounds(Bounds::Rect(rect));
        let result =
            decelerate_point(Point::ORIGIN, Point::xy(3.0, 0.0), &options).expect("decelerate");
        // Hits x = 2 with speed sqrt(5), reflects, and runs down 2.5 more.
        assert_point_close(result.position, -0.5, 0.0, 0.0);
        assert_point_close(result.velocity, 0.0, 0.0, 0.0);
        assert_close(result.duration.expect("duration"), 3.0);
    }

    #[test]
    fn point_velocity_clips_onto_line() {
        let line = Line::new(Point::ORIGIN, Point::xy(10.0, 0.0), LineEnds::Segment)
            .expect("line");
        let options =
            DecelerationOptions::new().with_bounds(Bounds::Line(LineBounds::new(line, 8)));
        let result = decelerate_point(Point::xy(1.0, 0.0), Point::new(2.0, 5.0, 0.0), &options)
            .expect("decelerate");
        assert_point_close(result.position, 3.0, 0.0, 0.0);
        assert_point_close(result.velocity, 0.0, 0.0, 0.0);
        assert_close(result.duration.expect("duration"), 2.0);
    }

    #[test]
    fn point_bounces_at_segment_end() {
        let line = Line::new(Point::ORIGIN, Point::xy(10.0, 0.0), LineEnds::Segment)
            .expect("line");
        let options =
            DecelerationOptions::new().with_bounds(Bounds::Line(LineBounds::new(line, 8)));
        let result = decelerate_point(Point::xy(8.0, 0.0), Point::xy(3.0, 0.0), &options)
            .expect("decelerate");
        assert_point_close(result.position, 7.5, 0.0, 0.0);
        assert_close(result.duration.expect("duration"), 3.0);
    }

    #[test]
    fn point_range_bounds_decelerate_each_axis() {
        let range = RangeBounds::new(Some(-10.0), Some(10.0), 8).expect("range");
        let options = DecelerationOptions::new()
            .with_delta_time(1.0)
            .with_bounds(Bounds::Range(range));
        let result = decelerate_point(Point::ORIGIN, Point::xy(5.0, 3.0), &options)
            .expect("decelerate");
        assert_point_close(result.position, 4.5, 2.5, 0.0);
        assert_point_close(result.velocity, 4.0, 2.0, 0.0);
    }

    #[test]
    fn independent_axes_combine_longest_duration() {
        let result = decelerate_independent_point(
            Point::ORIGIN,
            Point::xy(5.0, 2.0),
            &DecelerationOptions::new(),
            [None, None, None],
        )
        .expect("decelerate");
        assert_point_close(result.position, 12.5, 2.0, 0.0);
        assert_close(result.duration.expect("duration"), 5.0);
    }

    #[test]
    fn transform_chain_decelerates_per_slot() {
        let transform = Transform::new().translate(0.0, 0.0, 0.0).rotate(0.0);
        let velocity = Transform::new().translate(5.0, 0.0, 0.0).rotate(2.0);
        let result = decelerate_transform(&transform, &velocity, &DecelerationOptions::new())
            .expect("decelerate");
        let translation = result.transform.translation(0).expect("translation");
        assert_point_close(translation, 12.5, 0.0, 0.0);
        assert_close(result.transform.rotation(0).expect("rotation"), 2.0);
        assert_close(result.duration.expect("duration"), 5.0);
    }

    #[test]
    fn transform_rotation_bounces_in_range() {
        let transform = Transform::new().rotate(0.0);
        let velocity = Transform::new().rotate(2.0);
        let mut bounds = TransformBounds::for_transform(&transform, 8);
        bounds.set_rotation(Some(
            RangeBounds::new(Some(-1.0), Some(1.0), 8).expect("range"),
        ));
        let options = DecelerationOptions::new().with_bounds(Bounds::Transform(bounds));
        let result =
            decelerate_transform(&transform, &velocity, &options).expect("decelerate");
        // Bounces off 1 with speed sqrt(2) and runs back down to 0.
        assert_close(result.transform.rotation(0).expect("rotation"), 0.0);
        assert_close(result.duration.expect("duration"), 2.0);
    }

    #[test]
    fn transform_velocity_shape_must_match() {
        let transform = Transform::new().rotate(0.0);
        let velocity = Transform::new().translate(1.0, 0.0, 0.0);
        let error = decelerate_transform(&transform, &velocity, &DecelerationOptions::new())
            .expect_err("must reject");
        assert!(matches!(error, MotionError::Transform(_)));
    }
}
