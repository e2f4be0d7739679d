mod line;
mod matrix;
mod point;
mod transform;

pub use line::{Line, LineEnds, LineError, LineIntersect};
pub use matrix::Matrix;
pub use point::{DEFAULT_PRECISION, Point, clip_value, round_num};
pub use transform::{
    Transform, TransformComponent, TransformComponentKind, TransformError,
};

#[cfg(test)]
mod tests;
