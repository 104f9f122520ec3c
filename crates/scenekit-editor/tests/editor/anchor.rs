use proptest::prelude::*;
use scenekit_editor::math::transform_point;
use scenekit_editor::{AnchorPreset, Entity, Point, Rect, Visual};

fn corners(entity: &Entity) -> Vec<Point> {
    let b = entity.local_bounds();
    let m = entity.local_matrix();
    [
        Point::new(b.x, b.y),
        Point::new(b.right(), b.y),
        Point::new(b.right(), b.bottom()),
        Point::new(b.x, b.bottom()),
    ]
    .into_iter()
    .map(|p| transform_point(&m, p))
    .collect()
}

proptest! {
    #[test]
    fn anchor_change_keeps_entity_in_place(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        rotation in -6.3f64..6.3,
        scale_x in 0.1f64..5.0,
        scale_y in 0.1f64..5.0,
        anchor_x in -0.5f64..1.5,
        anchor_y in -0.5f64..1.5,
    ) {
        let mut entity = Entity::new(Visual::rectangle(120.0, 80.0));
        entity.set_position(x, y);
        entity.set_rotation(rotation);
        entity.set_scale_x(scale_x);
        entity.set_scale_y(scale_y);

        let before = corners(&entity);
        entity.set_anchor(anchor_x, anchor_y);
        let after = corners(&entity);

        for (a, b) in before.iter().zip(&after) {
            prop_assert!(a.distance_to(b) < 1e-6, "{:?} moved to {:?}", a, b);
        }
    }
}

proptest! {
    #[test]
    fn anchor_there_and_back_restores_position(
        rotation in -6.3f64..6.3,
        scale in 0.1f64..5.0,
        anchor_x in 0.0f64..1.0,
        anchor_y in 0.0f64..1.0,
    ) {
        let mut entity = Entity::new(Visual::square());
        entity.set_position(40.0, -60.0);
        entity.set_rotation(rotation);
        entity.set_scale_x(scale);
        entity.set_scale_y(scale);

        entity.set_anchor(anchor_x, anchor_y);
        entity.set_anchor(0.0, 0.0);
        prop_assert!(entity.position().distance_to(&Point::new(40.0, -60.0)) < 1e-9);
    }
}

#[test]
fn test_pivot_follows_anchor() {
    let mut entity = Entity::new(Visual::rectangle(200.0, 100.0));
    entity.set_anchor(0.25, 0.5);
    assert_eq!(entity.pivot(), Point::new(50.0, 50.0));
    assert_eq!(entity.position(), Point::new(50.0, 50.0));
}

#[test]
fn test_same_anchor_is_noop() {
    let mut entity = Entity::new(Visual::square());
    entity.set_anchor(0.5, 0.5);
    let state = entity.state();
    entity.set_anchor(0.5, 0.5);
    assert_eq!(entity.state(), state);
}

#[test]
fn test_center_anchor_pivots_on_circle_center() {
    let mut entity = Entity::new(Visual::circle(50.0));
    assert_eq!(entity.local_bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    entity.set_anchor(0.5, 0.5);
    assert_eq!(entity.pivot(), Point::new(50.0, 50.0));
    // The outline did not move, so the position lands on the circle center
    assert_eq!(entity.position(), Point::new(50.0, 50.0));
    assert!(entity.contains_point(Point::new(0.0, 0.0)));
    assert!(entity.contains_point(Point::new(99.0, 99.0)));
}

#[test]
fn test_preset_roundtrip() {
    for preset in AnchorPreset::ALL {
        assert_eq!(AnchorPreset::nearest(preset.anchor()), preset);
    }
    assert_eq!(
        AnchorPreset::nearest(Point::new(0.9, 0.1)),
        AnchorPreset::TopRight
    );
}
