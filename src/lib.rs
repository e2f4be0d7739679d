#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod geom;
pub mod motion;
pub mod state;

use std::fmt;

use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

pub use bounds::{
    Bounds, BoundsDef, BoundsError, Intersect, LineBounds, PointIntersect, RangeBounds,
    RectBounds, RectBoundsOptions, TransformBounds, ValueIntersect, get_bounds,
};
pub use geom::{DEFAULT_PRECISION, Line, LineEnds, Matrix, Point, Transform, round_num};
pub use motion::{
    DecelerationOptions, MotionError, PointDeceleration, TransformDeceleration,
    ValueDeceleration, decelerate_independent_point, decelerate_point, decelerate_transform,
    decelerate_value,
};
pub use state::{BoundsState, ObjectState};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct IntersectExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    intersect: Option<[f64; 3]>,
    distance: f64,
    reflection: [f64; 3],
}

#[derive(Debug, Serialize)]
struct DecelerationExport {
    position: [f64; 3],
    velocity: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
}

/// Public entry point for consumers.
///
/// Holds the bounds the motion is constrained by and the deceleration
/// options, and answers per-tick queries from the animation layer. Points
/// cross the boundary as `[x, y, z]` arrays.
#[wasm_bindgen]
pub struct MotionEngine {
    bounds: Option<Bounds>,
    options: DecelerationOptions,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MotionEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> MotionEngine {
        MotionEngine {
            bounds: None,
            options: DecelerationOptions::new(),
        }
    }

    /// Configure bounds from a declarative definition object.
    #[wasm_bindgen]
    pub fn set_bounds(&mut self, def: JsValue) -> Result<(), JsValue> {
        let def: BoundsDef = serde_wasm_bindgen::from_value(def).map_err(to_js_error)?;
        let bounds = get_bounds(&def).map_err(to_js_error)?;
        debug_log!("bounds configured: {:?}", bounds.kind());
        self.bounds = Some(bounds);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn has_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    /// Whether the configured bounds constrain anything at all.
    #[wasm_bindgen]
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.bounds.as_ref().is_some_and(Bounds::is_defined)
    }

    #[wasm_bindgen]
    pub fn set_deceleration(&mut self, deceleration: f64) {
        self.options.deceleration = deceleration;
    }

    #[wasm_bindgen]
    pub fn set_bounce_loss(&mut self, bounce_loss: f64) {
        self.options.bounce_loss = bounce_loss;
    }

    #[wasm_bindgen]
    pub fn set_zero_velocity_threshold(&mut self, threshold: f64) {
        self.options.zero_velocity_threshold = threshold;
    }

    /// Containment of a point in the configured bounds.
    #[wasm_bindgen]
    pub fn contains(&self, x: f64, y: f64, z: f64) -> Result<bool, JsValue> {
        let bounds = self.require_bounds()?;
        bounds.contains_point(Point::new(x, y, z)).map_err(to_js_error)
    }

    /// Clip a point into the configured bounds.
    #[wasm_bindgen]
    pub fn clip(&self, x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
        let bounds = self.require_bounds()?;
        let clipped = bounds.clip_point(Point::new(x, y, z)).map_err(to_js_error)?;
        Ok(clipped.to_array().to_vec())
    }

    /// Intersect a trajectory with the configured bounds.
    #[wasm_bindgen]
    pub fn intersect(&self, position: Vec<f64>, direction: Vec<f64>) -> Result<JsValue, JsValue> {
        let bounds = self.require_bounds()?;
        let hit = bounds
            .intersect_point(read_point(&position)?, read_point(&direction)?)
            .map_err(to_js_error)?;
        let export = IntersectExport {
            intersect: hit.intersect.map(Point::to_array),
            distance: hit.distance,
            reflection: hit.reflection.to_array(),
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Advance a decelerating point by `delta_time` seconds, or run it to a
    /// stop when `delta_time` is omitted.
    #[wasm_bindgen]
    pub fn decelerate(
        &self,
        position: Vec<f64>,
        velocity: Vec<f64>,
        delta_time: Option<f64>,
    ) -> Result<JsValue, JsValue> {
        let options = DecelerationOptions {
            delta_time,
            bounds: self.bounds.clone(),
            ..self.options.clone()
        };
        let moved = decelerate_point(read_point(&position)?, read_point(&velocity)?, &options)
            .map_err(to_js_error)?;
        let export = DecelerationExport {
            position: moved.position.to_array(),
            velocity: moved.velocity.to_array(),
            duration: moved.duration,
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Capture the configured bounds as recoverable tagged state.
    #[wasm_bindgen]
    pub fn bounds_state(&self, precision: u32) -> Result<JsValue, JsValue> {
        let bounds = self.require_bounds()?;
        let state = BoundsState::capture(bounds, precision);
        serde_wasm_bindgen::to_value(&state).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Restore bounds captured by [`MotionEngine::bounds_state`].
    #[wasm_bindgen]
    pub fn restore_bounds(&mut self, state: JsValue) -> Result<(), JsValue> {
        let state: BoundsState = serde_wasm_bindgen::from_value(state).map_err(to_js_error)?;
        self.bounds = Some(state.restore().map_err(to_js_error)?);
        Ok(())
    }
}

impl MotionEngine {
    fn require_bounds(&self) -> Result<&Bounds, JsValue> {
        self.bounds
            .as_ref()
            .ok_or_else(|| js_error("no bounds configured"))
    }
}

fn read_point(coords: &[f64]) -> Result<Point, JsValue> {
    match *coords {
        [x, y] => Ok(Point::xy(x, y)),
        [x, y, z] => Ok(Point::new(x, y, z)),
        _ => Err(js_error("points must have 2 or 3 coordinates")),
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
