use std::sync::Arc;

use parking_lot::Mutex;
use scenekit_core::event_bus::{
    AppEvent, EventBus, EventFilter, Modifiers, PlaybackEvent, PointerEvent, PointerPhase,
};
use scenekit_core::EditorError;
use scenekit_editor::{EditorSession, HandleKind, Point, Visual, VisualKind};
use scenekit_settings::Config;

fn session_with_bus() -> (Arc<EventBus>, EditorSession) {
    let bus = Arc::new(EventBus::new());
    let session = EditorSession::new(Arc::clone(&bus), Config::default(), 1024.0, 768.0);
    (bus, session)
}

fn record(bus: &EventBus) -> Arc<Mutex<Vec<AppEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    bus.subscribe(EventFilter::All, move |event| sink.lock().push(event));
    events
}

fn publish_pointer(bus: &EventBus, phase: PointerPhase, x: f64, y: f64, modifiers: Modifiers) {
    bus.publish(AppEvent::Pointer(
        PointerEvent::new(phase, x, y).with_modifiers(modifiers),
    ))
    .expect("gizmo is subscribed");
}

#[test]
fn test_pointer_events_from_bus_drive_a_resize() {
    let (bus, mut session) = session_with_bus();
    let id = session.add_entity(VisualKind::Square).unwrap();
    session.select(id).unwrap();

    // Bottom-right handle sits at (105, 105) on a 100x100 square
    publish_pointer(&bus, PointerPhase::Down, 105.0, 105.0, Modifiers::NONE);
    assert_eq!(session.pump_events(), 1);
    assert_eq!(session.gizmo().active_handle(), Some(HandleKind::ScaleBottomRight));

    publish_pointer(&bus, PointerPhase::Move, 155.0, 155.0, Modifiers::NONE);
    // Released outside the canvas still ends the drag
    publish_pointer(&bus, PointerPhase::UpOutside, 2000.0, 2000.0, Modifiers::NONE);
    assert_eq!(session.pump_events(), 2);

    let entity = session.entity(id).unwrap();
    assert!((entity.scale_x() - 1.5).abs() < 1e-9);
    assert!((entity.scale_y() - 1.5).abs() < 1e-9);
    assert!(!session.gizmo().is_dragging());
}

#[test]
fn test_shift_locks_aspect_through_session() {
    let (_bus, mut session) = session_with_bus();
    let id = session.add_visual(Visual::rectangle(200.0, 100.0)).unwrap();
    session.select(id).unwrap();

    session.handle_pointer(PointerEvent::new(PointerPhase::Down, 205.0, 105.0));
    session.handle_pointer(
        PointerEvent::new(PointerPhase::Move, 305.0, 115.0).with_modifiers(Modifiers::SHIFT),
    );
    session.handle_pointer(PointerEvent::new(PointerPhase::Up, 305.0, 115.0));

    let entity = session.entity(id).unwrap();
    assert!((entity.scale_x() - 1.5).abs() < 1e-9);
    assert!((entity.scale_y() - 1.5).abs() < 1e-9);
}

#[test]
fn test_play_hides_gizmo_and_stop_restores() {
    let (bus, mut session) = session_with_bus();
    let events = record(&bus);
    let id = session.add_entity(VisualKind::Square).unwrap();
    session.set_anchor(id, 0.5, 0.5).unwrap();
    session.set_position(id, 300.0, 200.0).unwrap();
    session.select(id).unwrap();
    let saved = session.entity(id).unwrap().state();

    session.play();
    assert!(!session.gizmo().is_visible());
    for _ in 0..30 {
        session.frame(1.0 / 60.0);
    }
    let spun = session.entity(id).unwrap().rotation();
    assert!((spun - 0.3).abs() < 1e-6, "rotation = {}", spun);

    session.stop();
    assert_eq!(session.entity(id).unwrap().state(), saved);
    assert!(session.gizmo().is_visible());

    let events = events.lock();
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Playback(PlaybackEvent::Started))));
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Playback(PlaybackEvent::Stopped { restored: 1 }))));
}

#[test]
fn test_edits_are_refused_while_playing() {
    let (_bus, mut session) = session_with_bus();
    let id = session.add_entity(VisualKind::Rectangle).unwrap();
    session.play();

    assert_eq!(session.set_x(id, 10.0), Err(EditorError::PlayModeActive));
    assert_eq!(session.select(id), Err(EditorError::PlayModeActive));
    assert_eq!(session.remove_entity(id), Err(EditorError::PlayModeActive));
    assert_eq!(session.entity(id).unwrap().x(), 0.0);
}

#[test]
fn test_grid_size_rejection_keeps_config() {
    let (_bus, mut session) = session_with_bus();
    assert_eq!(
        session.set_grid_size(0.0, 25.0),
        Err(EditorError::InvalidGridSize { x: 0.0, y: 25.0 })
    );
    assert_eq!(session.config().grid.size_x, 50.0);
    assert_eq!(session.config().grid.size_y, 50.0);
}

#[test]
fn test_snapped_move_through_session() {
    let (_bus, mut session) = session_with_bus();
    let id = session.add_entity(VisualKind::Square).unwrap();
    session.select(id).unwrap();
    session.set_snap_enabled(true);

    session.handle_pointer(PointerEvent::new(PointerPhase::Down, 50.0, 50.0));
    session.handle_pointer(PointerEvent::new(PointerPhase::Move, 173.0, 127.0));
    session.handle_pointer(PointerEvent::new(PointerPhase::Cancel, 173.0, 127.0));

    assert_eq!(session.entity(id).unwrap().position(), Point::new(100.0, 100.0));
}

#[test]
fn test_close_removes_subscription() {
    let (bus, session) = session_with_bus();
    assert_eq!(bus.subscriber_count(), 1);
    session.close();
    assert_eq!(bus.subscriber_count(), 0);
}
