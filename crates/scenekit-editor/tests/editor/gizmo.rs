use std::sync::Arc;

use nalgebra::{Matrix3, Vector2};
use scenekit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, Modifiers};
use scenekit_core::TransformEvent;
use scenekit_editor::math::{rotate_vector, scaling, transform_point};
use scenekit_editor::{Entity, GizmoState, HandleKind, Point, TransformGizmo, Visual};
use scenekit_settings::GizmoSettings;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn gizmo(bus: &Arc<EventBus>) -> TransformGizmo {
    TransformGizmo::new(Arc::clone(bus), GizmoSettings::default())
}

/// Drags `handle` by `delta` in a single move, starting at the handle.
fn drag(
    gizmo: &mut TransformGizmo,
    entity: &mut Entity,
    handle: HandleKind,
    delta: (f64, f64),
    modifiers: Modifiers,
) {
    let parent = Matrix3::identity();
    gizmo.update(entity, &parent);
    let start = Point::new(entity.x(), entity.y());
    assert!(gizmo.begin_drag(handle, entity, start));
    let end = Point::new(start.x + delta.0, start.y + delta.1);
    assert!(gizmo.drag_to(entity, &parent, end, modifiers));
    gizmo.end_drag();
}

fn local_to_parent(entity: &Entity, local: Point) -> Point {
    transform_point(&entity.local_matrix(), local)
}

#[test]
fn test_bottom_right_scale() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::square());

    drag(&mut gizmo, &mut entity, HandleKind::ScaleBottomRight, (50.0, 50.0), Modifiers::NONE);

    assert!(approx(entity.scale_x(), 1.5));
    assert!(approx(entity.scale_y(), 1.5));
    assert_eq!(entity.position(), Point::new(0.0, 0.0));
}

#[test]
fn test_top_left_scale_moves_position() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::square());

    drag(&mut gizmo, &mut entity, HandleKind::ScaleTopLeft, (50.0, 50.0), Modifiers::NONE);

    assert!(approx(entity.scale_x(), 0.5));
    assert!(approx(entity.scale_y(), 0.5));
    assert!(approx(entity.x(), 50.0) && approx(entity.y(), 50.0));
    // Bottom-right corner stays put
    let corner = local_to_parent(&entity, Point::new(100.0, 100.0));
    assert!(approx(corner.x, 100.0) && approx(corner.y, 100.0));
}

#[test]
fn test_aspect_lock_on_every_corner_keeps_opposite_corner() {
    let corners = [
        (HandleKind::ScaleTopLeft, Point::new(100.0, 50.0), (-40.0, -5.0)),
        (HandleKind::ScaleTopRight, Point::new(0.0, 50.0), (40.0, -5.0)),
        (HandleKind::ScaleBottomRight, Point::new(0.0, 0.0), (40.0, 5.0)),
        (HandleKind::ScaleBottomLeft, Point::new(100.0, 0.0), (-40.0, 5.0)),
    ];

    for (handle, opposite, delta) in corners {
        let bus = Arc::new(EventBus::new());
        let mut gizmo = gizmo(&bus);
        let mut entity = Entity::new(Visual::rectangle(100.0, 50.0));
        entity.set_anchor(0.3, 0.7);
        entity.set_position(200.0, 150.0);
        entity.set_rotation(0.4);

        let fixed = local_to_parent(&entity, opposite);
        // Express the local-axis delta in parent space
        let parent_delta = rotate_vector(Vector2::new(delta.0, delta.1), entity.rotation());
        drag(
            &mut gizmo,
            &mut entity,
            handle,
            (parent_delta.x, parent_delta.y),
            Modifiers::SHIFT,
        );

        assert!(
            (entity.scale_x() - entity.scale_y()).abs() < 1e-9,
            "{}: {} vs {}",
            handle,
            entity.scale_x(),
            entity.scale_y()
        );
        assert!(approx(entity.scale_x(), 1.4), "{}: {}", handle, entity.scale_x());
        let after = local_to_parent(&entity, opposite);
        assert!(fixed.distance_to(&after) < 1e-9, "{}: {:?} -> {:?}", handle, fixed, after);
    }
}

#[test]
fn test_aspect_lock_height_dominant_keeps_opposite_corner() {
    // Vertical motion dominates, so height drives the locked width
    let corners = [
        (HandleKind::ScaleTopLeft, Point::new(200.0, 100.0), (3.0, 40.0), 0.6),
        (HandleKind::ScaleTopRight, Point::new(0.0, 100.0), (-3.0, -40.0), 1.4),
        (HandleKind::ScaleBottomRight, Point::new(0.0, 0.0), (3.0, 40.0), 1.4),
        (HandleKind::ScaleBottomLeft, Point::new(200.0, 0.0), (3.0, -40.0), 0.6),
    ];

    for (handle, opposite, delta, expected) in corners {
        let bus = Arc::new(EventBus::new());
        let mut gizmo = gizmo(&bus);
        let mut entity = Entity::new(Visual::rectangle(200.0, 100.0));
        entity.set_anchor(0.3, 0.7);
        entity.set_position(120.0, 80.0);
        entity.set_rotation(-0.3);

        let fixed = local_to_parent(&entity, opposite);
        let parent_delta = rotate_vector(Vector2::new(delta.0, delta.1), entity.rotation());
        drag(
            &mut gizmo,
            &mut entity,
            handle,
            (parent_delta.x, parent_delta.y),
            Modifiers::SHIFT,
        );

        assert!(approx(entity.scale_x(), expected), "{}: {}", handle, entity.scale_x());
        assert!(approx(entity.scale_y(), expected), "{}: {}", handle, entity.scale_y());
        let after = local_to_parent(&entity, opposite);
        assert!(fixed.distance_to(&after) < 1e-9, "{}: {:?} -> {:?}", handle, fixed, after);
    }
}

#[test]
fn test_height_dominant_left_corners_without_rotation() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);

    let mut entity = Entity::new(Visual::rectangle(200.0, 100.0));
    drag(&mut gizmo, &mut entity, HandleKind::ScaleTopLeft, (3.0, 40.0), Modifiers::SHIFT);
    assert!(approx(entity.scale_x(), 0.6) && approx(entity.scale_y(), 0.6));
    assert!(approx(entity.x(), 80.0) && approx(entity.y(), 40.0));

    let mut entity = Entity::new(Visual::rectangle(200.0, 100.0));
    drag(&mut gizmo, &mut entity, HandleKind::ScaleBottomLeft, (3.0, 40.0), Modifiers::SHIFT);
    assert!(approx(entity.scale_x(), 1.4) && approx(entity.scale_y(), 1.4));
    assert!(approx(entity.x(), -80.0) && approx(entity.y(), 0.0));
}

#[test]
fn test_circle_edges_keep_opposite_edge() {
    let edges = [
        (HandleKind::ScaleRight, Point::new(0.0, 50.0), (20.0, 0.0)),
        (HandleKind::ScaleLeft, Point::new(100.0, 50.0), (-20.0, 0.0)),
        (HandleKind::ScaleBottom, Point::new(50.0, 0.0), (0.0, 20.0)),
        (HandleKind::ScaleTop, Point::new(50.0, 100.0), (0.0, -20.0)),
    ];

    for anchor in [Point::new(0.0, 0.0), Point::new(0.5, 0.5)] {
        for (handle, opposite, delta) in edges {
            let bus = Arc::new(EventBus::new());
            let mut gizmo = gizmo(&bus);
            let mut entity = Entity::new(Visual::circle(50.0));
            entity.set_anchor(anchor.x, anchor.y);
            entity.set_rotation(0.25);

            let fixed = local_to_parent(&entity, opposite);
            let parent_delta = rotate_vector(Vector2::new(delta.0, delta.1), entity.rotation());
            drag(
                &mut gizmo,
                &mut entity,
                handle,
                (parent_delta.x, parent_delta.y),
                Modifiers::NONE,
            );

            let grown = entity.scale_x().max(entity.scale_y());
            assert!(approx(grown, 1.2), "{} at {:?}: {}", handle, anchor, grown);
            let after = local_to_parent(&entity, opposite);
            assert!(
                fixed.distance_to(&after) < 1e-9,
                "{} at {:?}: {:?} -> {:?}",
                handle,
                anchor,
                fixed,
                after
            );
        }
    }
}

#[test]
fn test_edge_handles_leave_other_axis_alone() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::rectangle(100.0, 50.0));

    // Shift has no effect on edge handles
    drag(&mut gizmo, &mut entity, HandleKind::ScaleRight, (25.0, 40.0), Modifiers::SHIFT);
    assert!(approx(entity.scale_x(), 1.25));
    assert_eq!(entity.scale_y(), 1.0);

    drag(&mut gizmo, &mut entity, HandleKind::ScaleTop, (99.0, -25.0), Modifiers::NONE);
    assert!(approx(entity.scale_y(), 1.5));
    assert!(approx(entity.scale_x(), 1.25));
    assert!(approx(entity.y(), -25.0));
}

#[test]
fn test_resize_is_reversible() {
    let handles = [
        HandleKind::ScaleTopLeft,
        HandleKind::ScaleTop,
        HandleKind::ScaleRight,
        HandleKind::ScaleBottomLeft,
    ];

    for handle in handles {
        let bus = Arc::new(EventBus::new());
        let mut gizmo = gizmo(&bus);
        let mut entity = Entity::new(Visual::rectangle(100.0, 50.0));
        entity.set_anchor(0.5, 0.5);
        entity.set_rotation(-0.7);
        let original = entity.state();

        drag(&mut gizmo, &mut entity, handle, (12.0, -7.0), Modifiers::NONE);
        // Dragging back by the opposite delta undoes the resize
        drag(&mut gizmo, &mut entity, handle, (-12.0, 7.0), Modifiers::NONE);

        let t = entity.transform();
        assert!(t.position.distance_to(&original.transform.position) < 1e-9, "{}", handle);
        assert!(approx(t.scale_x, 1.0) && approx(t.scale_y, 1.0), "{}", handle);
        assert_eq!(t.rotation, original.transform.rotation);
    }
}

#[test]
fn test_opposite_edges_translate_by_delta() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::rectangle(100.0, 50.0));
    entity.set_position(10.0, 20.0);

    drag(&mut gizmo, &mut entity, HandleKind::ScaleRight, (30.0, 0.0), Modifiers::NONE);
    drag(&mut gizmo, &mut entity, HandleKind::ScaleLeft, (30.0, 0.0), Modifiers::NONE);
    assert!(approx(entity.scale_x(), 1.0));
    assert!(approx(entity.x(), 40.0) && approx(entity.y(), 20.0));

    drag(&mut gizmo, &mut entity, HandleKind::ScaleBottom, (0.0, -10.0), Modifiers::NONE);
    drag(&mut gizmo, &mut entity, HandleKind::ScaleTop, (0.0, -10.0), Modifiers::NONE);
    assert!(approx(entity.scale_y(), 1.0));
    assert!(approx(entity.x(), 40.0) && approx(entity.y(), 10.0));
}

#[test]
fn test_rotate_drag() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::square());
    entity.set_anchor(0.5, 0.5);
    let parent = Matrix3::identity();
    gizmo.update(&entity, &parent);

    // Pointer starts straight above the pivot and swings a quarter turn right
    assert!(gizmo.begin_drag(HandleKind::Rotate, &entity, Point::new(50.0, -20.0)));
    assert_eq!(gizmo.state(), GizmoState::Dragging(HandleKind::Rotate));
    gizmo.drag_to(&mut entity, &parent, Point::new(120.0, 50.0), Modifiers::NONE);

    assert!(approx(entity.rotation(), std::f64::consts::FRAC_PI_2));
    assert_eq!(entity.position(), Point::new(50.0, 50.0));
    assert!(approx(gizmo.rotation(), entity.rotation()));
}

#[test]
fn test_move_snaps_to_grid() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    gizmo.set_snap_enabled(true);
    let mut entity = Entity::new(Visual::square());

    drag(&mut gizmo, &mut entity, HandleKind::Move, (123.0, 77.0), Modifiers::NONE);
    assert_eq!(entity.position(), Point::new(100.0, 100.0));

    gizmo.set_grid_size(30.0, 40.0).unwrap();
    drag(&mut gizmo, &mut entity, HandleKind::Move, (14.0, 19.0), Modifiers::NONE);
    assert_eq!(entity.position(), Point::new(120.0, 120.0));
}

#[test]
fn test_inverse_scale_from_parent() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let entity = Entity::new(Visual::square());

    gizmo.update(&entity, &scaling(2.0, 2.0));
    assert!(approx(gizmo.inverse_scale(), 0.5));
    let layout = gizmo.layout().unwrap();
    assert!(approx(layout.marker_size, 4.0));

    gizmo.update(&entity, &scaling(0.0, 0.0));
    assert_eq!(gizmo.inverse_scale(), 1.0);
}

#[test]
fn test_drag_publishes_transform_changes() {
    let bus = Arc::new(EventBus::new());
    let changes = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    bus.subscribe(EventFilter::only(EventCategory::Transform), move |event| {
        if let AppEvent::Transform(TransformEvent::Changed { x, y, .. }) = event {
            sink.lock().push((x, y));
        }
    });

    let mut gizmo = gizmo(&bus);
    let mut entity = Entity::new(Visual::square());
    drag(&mut gizmo, &mut entity, HandleKind::Move, (10.0, 5.0), Modifiers::NONE);

    assert_eq!(*changes.lock(), vec![(10.0, 5.0)]);
}

#[test]
fn test_destroy_removes_pointer_subscription() {
    let bus = Arc::new(EventBus::new());
    let gizmo = gizmo(&bus);
    assert!(gizmo.is_attached());
    assert_eq!(bus.subscriber_count(), 1);

    gizmo.destroy();
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_rebinding_abandons_drag() {
    let bus = Arc::new(EventBus::new());
    let mut gizmo = gizmo(&bus);
    let a = Entity::new(Visual::square());
    let b = Entity::new(Visual::square());
    let parent = Matrix3::identity();

    gizmo.update(&a, &parent);
    gizmo.begin_drag(HandleKind::Move, &a, Point::new(50.0, 50.0));
    gizmo.update(&b, &parent);
    assert_eq!(gizmo.state(), GizmoState::BoundIdle);
    assert_eq!(gizmo.target(), Some(b.id()));
}
