use std::f64::consts::FRAC_PI_2;

use crate::geom::{Matrix, Point};

fn assert_point_close(p: Point, x: f64, y: f64, z: f64) {
    assert!((p.x - x).abs() < 1e-9, "x: {} vs {x}", p.x);
    assert!((p.y - y).abs() < 1e-9, "y: {} vs {y}", p.y);
    assert!((p.z - z).abs() < 1e-9, "z: {} vs {z}", p.z);
}

#[test]
fn identity_leaves_points_alone() {
    let p = Point::new(1.0, -2.0, 3.0);
    assert_eq!(Matrix::identity().transform_point(p), p);
}

#[test]
fn translation_moves_points_not_vectors() {
    let m = Matrix::translation(Point::new(1.0, 2.0, 3.0));
    assert_eq!(m.transform_point(Point::ORIGIN), Point::new(1.0, 2.0, 3.0));
    assert_eq!(m.transform_vector(Point::X), Point::X);
}

#[test]
fn scaling_is_per_axis() {
    let m = Matrix::scaling(2.0, 3.0, 4.0);
    assert_eq!(
        m.transform_point(Point::new(1.0, 1.0, 1.0)),
        Point::new(2.0, 3.0, 4.0)
    );
}

#[test]
fn rotation_z_quarter_turn() {
    let m = Matrix::rotation_z(FRAC_PI_2);
    assert_point_close(m.transform_point(Point::X), 0.0, 1.0, 0.0);
    assert_point_close(m.transform_point(Point::Y), -1.0, 0.0, 0.0);
}

#[test]
fn rotation_about_x_and_y_axes() {
    assert_point_close(
        Matrix::rotation_x(FRAC_PI_2).transform_point(Point::Y),
        0.0,
        0.0,
        1.0,
    );
    assert_point_close(
        Matrix::rotation_y(FRAC_PI_2).transform_point(Point::Z),
        1.0,
        0.0,
        0.0,
    );
}

#[test]
fn axis_rotation_matches_rotation_z() {
    let about_axis = Matrix::rotation_axis(Point::Z, 0.7).expect("axis");
    let about_z = Matrix::rotation_z(0.7);
    let p = Point::new(1.0, 2.0, 3.0);
    let a = about_axis.transform_point(p);
    let b = about_z.transform_point(p);
    assert_point_close(a, b.x, b.y, b.z);
}

#[test]
fn axis_rotation_rejects_zero_axis() {
    assert!(Matrix::rotation_axis(Point::ORIGIN, 1.0).is_none());
}

#[test]
fn multiply_applies_right_matrix_first() {
    let rotate = Matrix::rotation_z(FRAC_PI_2);
    let translate = Matrix::translation(Point::new(1.0, 0.0, 0.0));
    // translate * rotate: rotate first, then translate.
    let p = (translate * rotate).transform_point(Point::X);
    assert_point_close(p, 1.0, 1.0, 0.0);
    // rotate * translate: translate first, then rotate.
    let q = (rotate * translate).transform_point(Point::X);
    assert_point_close(q, 0.0, 2.0, 0.0);
}

#[test]
fn inverse_round_trips() {
    let m = Matrix::translation(Point::new(1.0, 2.0, 3.0))
        * Matrix::rotation_z(0.4)
        * Matrix::scaling(2.0, 2.0, 2.0);
    let inv = m.inverse().expect("inverse");
    let p = Point::new(-3.0, 5.0, 1.0);
    let back = inv.transform_point(m.transform_point(p));
    assert_point_close(back, p.x, p.y, p.z);
}

#[test]
fn singular_matrix_has_no_inverse() {
    let m = Matrix::scaling(1.0, 1.0, 0.0);
    assert_eq!(m.determinant(), 0.0);
    assert!(m.inverse().is_none());
}

#[test]
fn determinant_of_scaling() {
    let m = Matrix::scaling(2.0, 3.0, 4.0);
    assert!((m.determinant() - 24.0).abs() < 1e-9);
}
