use std::sync::Arc;

use scenekit_core::EventBus;
use scenekit_editor::{EditorSession, VisualKind};
use scenekit_settings::SettingsPersistence;
use tempfile::TempDir;

#[test]
fn test_session_uses_persisted_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");

    let mut persistence = SettingsPersistence::new();
    let config = persistence.config_mut();
    config.grid.size_x = 20.0;
    config.grid.size_y = 10.0;
    config.grid.snap_enabled = true;
    config.viewport.max_zoom = 4.0;
    persistence.save_to_file(&path).unwrap();

    let loaded = SettingsPersistence::load_from_file(&path).unwrap();
    let mut session = EditorSession::new(
        Arc::new(EventBus::new()),
        loaded.config().clone(),
        800.0,
        600.0,
    );

    assert!(session.gizmo().snap_enabled());
    assert_eq!(session.gizmo().grid_size().x, 20.0);
    assert_eq!(session.gizmo().grid_size().y, 10.0);

    session.set_zoom(100.0);
    assert_eq!(session.viewport().zoom(), 4.0);

    let id = session.add_entity(VisualKind::Circle).unwrap();
    session.select(id).unwrap();
    assert_eq!(session.gizmo().target(), Some(id));
    session.close();
}
