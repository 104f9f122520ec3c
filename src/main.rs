//! Headless SceneKit demo.
//!
//! Builds a small scene, drives the gizmo through the event bus the way a
//! host canvas would, then runs a short play session.
//!
//! Usage: `scenekit [config.toml|config.json]`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use scenekit::{
    init_logging, AnchorPreset, AppEvent, Config, EditorSession, EventBus, Modifiers,
    PointerEvent, PointerPhase, SettingsPersistence, TransformEvent, VisualKind, BUILD_DATE,
    VERSION,
};
use tokio::sync::broadcast::error::TryRecvError;

const CANVAS_WIDTH: f64 = 1280.0;
const CANVAS_HEIGHT: f64 = 720.0;
const DEMO_FRAMES: usize = 90;

fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let persistence = SettingsPersistence::load_from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            Ok(persistence.config().clone())
        }
        None => Ok(Config::default()),
    }
}

fn pointer(bus: &EventBus, phase: PointerPhase, x: f64, y: f64, modifiers: Modifiers) {
    let event = PointerEvent::new(phase, x, y).with_modifiers(modifiers);
    if let Err(e) = bus.publish(AppEvent::Pointer(event)) {
        tracing::warn!("Pointer event dropped: {}", e);
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("SceneKit {} (built {})", VERSION, BUILD_DATE);

    let config = load_config()?;
    let bus = Arc::new(EventBus::new());
    // Observes the session the way a property panel would
    let mut changes = bus.receiver();
    let mut session = EditorSession::new(Arc::clone(&bus), config, CANVAS_WIDTH, CANVAS_HEIGHT);

    let square = session.add_entity(VisualKind::Square)?;
    let rectangle = session.add_entity(VisualKind::Rectangle)?;
    session.set_position(rectangle, 400.0, 300.0)?;
    session.set_anchor_preset(square, AnchorPreset::Center)?;
    session.set_position(square, 200.0, 200.0)?;

    // Click the square, then drag its bottom-right handle with shift held
    pointer(&bus, PointerPhase::Down, 200.0, 200.0, Modifiers::NONE);
    pointer(&bus, PointerPhase::Up, 200.0, 200.0, Modifiers::NONE);
    session.pump_events();

    pointer(&bus, PointerPhase::Down, 255.0, 255.0, Modifiers::NONE);
    pointer(&bus, PointerPhase::Move, 305.0, 285.0, Modifiers::SHIFT);
    pointer(&bus, PointerPhase::Up, 305.0, 285.0, Modifiers::SHIFT);
    session.pump_events();

    if let Some(entity) = session.entity(square) {
        tracing::info!(
            "{} at ({:.1}, {:.1}) scale {:.2}x{:.2}",
            entity.name(),
            entity.x(),
            entity.y(),
            entity.scale_x(),
            entity.scale_y()
        );
    }

    session.wheel(-1.0);
    tracing::info!("Viewport: {}", session.viewport());

    session.play();
    for _ in 0..DEMO_FRAMES {
        session.frame(1.0 / 60.0);
    }
    if let Some(entity) = session.entity(square) {
        tracing::info!("{} spun to {:.1} degrees", entity.name(), entity.rotation_degrees());
    }
    session.stop();

    session.close();

    let mut transform_changes = 0;
    let mut selections = 0;
    let mut missed = 0;
    loop {
        match changes.try_recv() {
            Ok(AppEvent::Transform(TransformEvent::Changed { .. })) => transform_changes += 1,
            Ok(AppEvent::Selection(_)) => selections += 1,
            Ok(_) => {}
            Err(TryRecvError::Lagged(n)) => missed += n,
            Err(_) => break,
        }
    }
    tracing::info!(
        "Observed {} transform changes and {} selection events ({} missed)",
        transform_changes,
        selections,
        missed
    );
    Ok(())
}
