use std::f64::consts::FRAC_PI_2;

use crate::geom::{Point, Transform, TransformComponentKind, TransformError};

fn assert_point_close(p: Point, x: f64, y: f64, z: f64) {
    assert!((p.x - x).abs() < 1e-9, "x: {} vs {x}", p.x);
    assert!((p.y - y).abs() < 1e-9, "y: {} vs {y}", p.y);
    assert!((p.z - z).abs() < 1e-9, "z: {} vs {z}", p.z);
}

#[test]
fn builders_append_in_order() {
    let transform = Transform::new()
        .scale(2.0, 2.0, 1.0)
        .rotate(0.5)
        .translate(1.0, 0.0, 0.0);
    assert_eq!(
        transform.shape(),
        vec![
            TransformComponentKind::Scale,
            TransformComponentKind::Rotation,
            TransformComponentKind::Translation,
        ]
    );
    assert_eq!(transform.len(), 3);
    assert!(!transform.is_empty());
}

#[test]
fn srt_matches_explicit_chain() {
    let srt = Transform::srt(Point::new(2.0, 2.0, 1.0), 0.5, Point::xy(1.0, 0.0));
    let explicit = Transform::new()
        .scale(2.0, 2.0, 1.0)
        .rotate(0.5)
        .translate(1.0, 0.0, 0.0);
    assert_eq!(srt, explicit);
}

#[test]
fn first_component_applies_first() {
    // Rotate a quarter turn, then translate: x-hat ends up at (1, 1).
    let transform = Transform::new().rotate(FRAC_PI_2).translate(1.0, 0.0, 0.0);
    assert_point_close(transform.apply(Point::X), 1.0, 1.0, 0.0);

    // Translate first, then rotate: (2, 0) rotates onto the y axis.
    let reversed = Transform::new().translate(1.0, 0.0, 0.0).rotate(FRAC_PI_2);
    assert_point_close(reversed.apply(Point::X), 0.0, 2.0, 0.0);
}

#[test]
fn indexed_getters_count_per_kind() {
    let transform = Transform::new()
        .translate(1.0, 0.0, 0.0)
        .rotate(0.5)
        .translate(0.0, 2.0, 0.0);
    assert_eq!(transform.translation(0), Some(Point::xy(1.0, 0.0)));
    assert_eq!(transform.translation(1), Some(Point::xy(0.0, 2.0)));
    assert_eq!(transform.translation(2), None);
    assert_eq!(transform.rotation(0), Some(0.5));
    assert_eq!(transform.scaling(0), None);
}

#[test]
fn updates_address_the_nth_occurrence() {
    let mut transform = Transform::new()
        .translate(1.0, 0.0, 0.0)
        .translate(0.0, 2.0, 0.0);
    transform
        .update_translation(1, Point::xy(0.0, 5.0))
        .expect("update");
    assert_eq!(transform.translation(0), Some(Point::xy(1.0, 0.0)));
    assert_eq!(transform.translation(1), Some(Point::xy(0.0, 5.0)));

    let error = transform.update_rotation(0, 1.0).expect_err("must reject");
    assert_eq!(
        error,
        TransformError::MissingComponent {
            kind: TransformComponentKind::Rotation,
            index: 0,
        }
    );
}

#[test]
fn shape_comparison() {
    let a = Transform::new().rotate(0.1).translate(1.0, 0.0, 0.0);
    let b = Transform::new().rotate(2.0).translate(0.0, 0.0, 5.0);
    let c = Transform::new().translate(1.0, 0.0, 0.0).rotate(0.1);
    assert!(a.has_same_shape_as(&b));
    assert!(!a.has_same_shape_as(&c));
}

#[test]
fn rounded_equality_of_chains() {
    let a = Transform::new().rotate(0.5).translate(1.0, 0.0, 0.0);
    let b = Transform::new()
        .rotate(0.5 + 1e-10)
        .translate(1.0 - 1e-10, 0.0, 0.0);
    assert!(a.is_equal_to(&b, 8));
    assert!(!a.is_equal_to(&b, 12));
}
