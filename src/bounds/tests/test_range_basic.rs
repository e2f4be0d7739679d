use crate::bounds::{Bounds, BoundsError, RangeBounds};
use crate::geom::Point;

fn range(min: f64, max: f64) -> RangeBounds {
    RangeBounds::new(Some(min), Some(max), 8).expect("range")
}

#[test]
fn construction_rejects_inverted_interval() {
    let error = RangeBounds::new(Some(2.0), Some(1.0), 8).expect_err("must reject");
    assert_eq!(error, BoundsError::InvertedRange { min: 2.0, max: 1.0 });
}

#[test]
fn containment_is_boundary_inclusive() {
    let bounds = range(-10.0, 10.0);
    assert!(bounds.contains_value(0.0));
    assert!(bounds.contains_value(10.0));
    assert!(bounds.contains_value(-10.0));
    assert!(!bounds.contains_value(10.1));
    assert!(!bounds.contains_value(-10.1));
}

#[test]
fn containment_rounds_before_comparing() {
    let bounds = range(-10.0, 10.0);
    assert!(bounds.contains_value(10.0 + 1e-10));
    assert!(!bounds.contains_value(10.0 + 1e-7));
}

#[test]
fn open_sides_are_unbounded() {
    let no_max = RangeBounds::new(Some(0.0), None, 8).expect("range");
    assert!(no_max.contains_value(1e12));
    assert!(!no_max.contains_value(-1.0));
    assert!(no_max.is_defined());

    let open = RangeBounds::new(None, None, 8).expect("range");
    assert!(open.contains_value(f64::MAX));
    assert!(!open.is_defined());
}

#[test]
fn clip_clamps_into_the_interval() {
    let bounds = range(-10.0, 10.0);
    assert_eq!(bounds.clip_value(3.0), 3.0);
    assert_eq!(bounds.clip_value(12.0), 10.0);
    assert_eq!(bounds.clip_value(-12.0), -10.0);
}

#[test]
fn clip_is_idempotent_and_lands_inside() {
    let bounds = range(-10.0, 10.0);
    for value in [-100.0, -10.0, 0.0, 9.999, 10.0, 55.5] {
        let clipped = bounds.clip_value(value);
        assert!(bounds.contains_value(clipped));
        assert_eq!(bounds.clip_value(clipped), clipped);
    }
}

#[test]
fn point_forms_apply_per_component() {
    let bounds = range(-1.0, 1.0);
    assert!(bounds.contains_point(Point::new(0.5, -1.0, 1.0)));
    assert!(!bounds.contains_point(Point::new(0.5, -1.5, 0.0)));
    assert_eq!(
        bounds.clip_point(Point::new(2.0, -3.0, 0.5)),
        Point::new(1.0, -1.0, 0.5)
    );
}

#[test]
fn intersect_heads_toward_the_directed_edge() {
    let bounds = range(-10.0, 10.0);

    let up = bounds.intersect_value(3.0, 1.0);
    assert_eq!(up.intersect, Some(10.0));
    assert_eq!(up.distance, 7.0);
    assert_eq!(up.reflection, -1.0);

    let down = bounds.intersect_value(3.0, -1.0);
    assert_eq!(down.intersect, Some(-10.0));
    assert_eq!(down.distance, 13.0);
    assert_eq!(down.reflection, 1.0);
}

#[test]
fn intersect_at_the_boundary_has_zero_distance() {
    let bounds = range(-10.0, 10.0);
    let at_edge = bounds.intersect_value(10.0, 1.0);
    assert_eq!(at_edge.intersect, Some(10.0));
    assert_eq!(at_edge.distance, 0.0);
    assert_eq!(at_edge.reflection, -1.0);
}

#[test]
fn intersect_toward_an_open_side_never_hits() {
    let bounds = RangeBounds::new(Some(-10.0), None, 8).expect("range");
    let result = bounds.intersect_value(11.0, 1.0);
    assert_eq!(result.intersect, None);
    assert_eq!(result.distance, 0.0);
    assert_eq!(result.reflection, 1.0);
}

#[test]
fn intersect_clips_an_outside_value_first() {
    let bounds = range(-10.0, 10.0);
    let result = bounds.intersect_value(15.0, 1.0);
    assert_eq!(result.intersect, Some(10.0));
    assert_eq!(result.distance, 0.0);
    assert_eq!(result.reflection, -1.0);
}

#[test]
fn enum_routes_scalar_queries_to_range_only() {
    let bounds = Bounds::Range(range(-1.0, 1.0));
    assert!(bounds.contains_value(0.5).expect("supported"));
    assert!(bounds.intersect_point(Point::ORIGIN, Point::X).is_err());
}
