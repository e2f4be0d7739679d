use crate::bounds::{
    Bounds, BoundsError, LineBounds, RangeBounds, RectBounds, TransformBounds,
    TransformBoundsSlot,
};
use crate::geom::{Line, LineEnds, Point, Transform, TransformComponentKind};

fn range(min: f64, max: f64) -> RangeBounds {
    RangeBounds::new(Some(min), Some(max), 8).expect("range")
}

fn srt_transform(scale: f64, rotation: f64, x: f64, y: f64) -> Transform {
    Transform::srt(Point::new(scale, scale, scale), rotation, Point::xy(x, y))
}

#[test]
fn unconstrained_bounds_accept_everything() {
    let bounds = TransformBounds::srt();
    assert!(!bounds.is_defined());
    let transform = srt_transform(100.0, -50.0, 1e6, -1e6);
    assert!(bounds.contains_transform(&transform).expect("shape"));
    assert_eq!(bounds.clip_transform(&transform).expect("shape"), transform);
}

#[test]
fn each_slot_constrains_its_component() {
    let mut bounds = TransformBounds::srt();
    bounds
        .set_translation(Some(Bounds::Rect(
            RectBounds::square(Point::ORIGIN, 10.0).expect("rect"),
        )))
        .expect("set translation");
    bounds.set_rotation(Some(range(-1.0, 1.0)));
    bounds
        .set_scale(Some(Bounds::Range(range(0.5, 2.0))))
        .expect("set scale");
    assert!(bounds.is_defined());

    assert!(bounds
        .contains_transform(&srt_transform(1.0, 0.5, 3.0, -3.0))
        .expect("shape"));
    assert!(!bounds
        .contains_transform(&srt_transform(1.0, 2.0, 3.0, -3.0))
        .expect("shape"));
    assert!(!bounds
        .contains_transform(&srt_transform(3.0, 0.5, 3.0, -3.0))
        .expect("shape"));
    assert!(!bounds
        .contains_transform(&srt_transform(1.0, 0.5, 30.0, -3.0))
        .expect("shape"));
}

#[test]
fn clip_rebuilds_the_chain_slot_by_slot() {
    let mut bounds = TransformBounds::srt();
    bounds
        .set_translation(Some(Bounds::Rect(
            RectBounds::square(Point::ORIGIN, 10.0).expect("rect"),
        )))
        .expect("set translation");
    bounds.set_rotation(Some(range(-1.0, 1.0)));

    let clipped = bounds
        .clip_transform(&srt_transform(7.0, 2.5, 15.0, 3.0))
        .expect("shape");
    // Scale is unconstrained, rotation and translation clamp.
    assert_eq!(clipped.scaling(0), Some(Point::new(7.0, 7.0, 7.0)));
    assert_eq!(clipped.rotation(0), Some(1.0));
    assert_eq!(clipped.translation(0), Some(Point::xy(10.0, 3.0)));
    assert!(bounds.contains_transform(&clipped).expect("shape"));
}

#[test]
fn line_bounds_can_constrain_translation() {
    let line = Line::new(Point::ORIGIN, Point::xy(10.0, 0.0), LineEnds::Segment).expect("line");
    let mut bounds = TransformBounds::unconstrained(&[TransformComponentKind::Translation], 8);
    bounds
        .set_translation(Some(Bounds::Line(LineBounds::new(line, 8))))
        .expect("set translation");

    let transform = Transform::new().translate(5.0, 2.0, 0.0);
    assert!(!bounds.contains_transform(&transform).expect("shape"));
    let clipped = bounds.clip_transform(&transform).expect("shape");
    assert_eq!(clipped.translation(0), Some(Point::xy(5.0, 0.0)));
}

#[test]
fn updates_address_the_nth_slot_of_a_kind() {
    let shape = [
        TransformComponentKind::Translation,
        TransformComponentKind::Rotation,
        TransformComponentKind::Translation,
    ];
    let mut bounds = TransformBounds::unconstrained(&shape, 8);
    bounds
        .update_translation(1, Some(Bounds::Range(range(-1.0, 1.0))))
        .expect("update");
    assert!(bounds.translation_bounds(0).is_none());
    assert!(bounds.translation_bounds(1).is_some());

    let error = bounds
        .update_translation(2, Some(Bounds::Range(range(-1.0, 1.0))))
        .expect_err("must reject");
    assert_eq!(
        error,
        BoundsError::MissingSlot {
            kind: TransformComponentKind::Translation,
            index: 2,
        }
    );

    let transform = Transform::new()
        .translate(9.0, 0.0, 0.0)
        .rotate(0.0)
        .translate(9.0, 0.0, 0.0);
    let clipped = bounds.clip_transform(&transform).expect("shape");
    assert_eq!(clipped.translation(0), Some(Point::xy(9.0, 0.0)));
    assert_eq!(clipped.translation(1), Some(Point::xy(1.0, 0.0)));
}

#[test]
fn rotation_slots_only_take_range_bounds() {
    let slot = TransformBoundsSlot::new(
        TransformComponentKind::Rotation,
        Some(Bounds::Rect(RectBounds::square(Point::ORIGIN, 1.0).expect("rect"))),
    );
    let error = TransformBounds::new(vec![slot], 8).expect_err("must reject");
    assert_eq!(error, BoundsError::RotationSlotNotRange);
}

#[test]
fn slots_cannot_nest_transform_bounds() {
    let slot = TransformBoundsSlot::new(
        TransformComponentKind::Translation,
        Some(Bounds::Transform(TransformBounds::srt())),
    );
    let error = TransformBounds::new(vec![slot], 8).expect_err("must reject");
    assert_eq!(error, BoundsError::NestedTransformBounds);
}

#[test]
fn shape_mismatch_is_an_error() {
    let bounds = TransformBounds::srt();
    let transform = Transform::new().rotate(0.0);
    assert!(matches!(
        bounds.contains_transform(&transform),
        Err(BoundsError::TransformShapeMismatch { .. })
    ));
    assert!(matches!(
        bounds.clip_transform(&transform),
        Err(BoundsError::TransformShapeMismatch { .. })
    ));
}
