use ostap::types::errors::*;

// === SurfaceError Tests ===

#[test]
fn surface_error_rejected_display() {
    let err = SurfaceError::Rejected("bad rect".to_string());
    assert_eq!(err.to_string(), "Surface command rejected: bad rect");
}

#[test]
fn surface_error_unavailable_display() {
    let err = SurfaceError::Unavailable("event loop closed".to_string());
    assert_eq!(err.to_string(), "Surface host unavailable: event loop closed");
}

#[test]
fn surface_error_transport_display() {
    let err = SurfaceError::Transport("broken pipe".to_string());
    assert_eq!(err.to_string(), "Surface transport error: broken pipe");
}

#[test]
fn surface_error_is_comparable() {
    assert_eq!(
        SurfaceError::Rejected("x".to_string()),
        SurfaceError::Rejected("x".to_string()).clone()
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_io_display() {
    let err = SettingsError::IoError("permission denied".to_string());
    assert_eq!(err.to_string(), "Settings I/O error: permission denied");
}

#[test]
fn settings_error_serialization_display() {
    let err = SettingsError::SerializationError("expected value".to_string());
    assert_eq!(err.to_string(), "Settings serialization error: expected value");
}

#[test]
fn settings_error_invalid_key_display() {
    let err = SettingsError::InvalidKey("window.depth".to_string());
    assert_eq!(err.to_string(), "Invalid settings key: window.depth");
}

#[test]
fn settings_error_invalid_value_display() {
    let err = SettingsError::InvalidValue("-1".to_string());
    assert_eq!(err.to_string(), "Invalid settings value: -1");
}

// === ShortcutError Tests ===

#[test]
fn shortcut_error_not_found_display() {
    let err = ShortcutError::NotFound("zoom_in".to_string());
    assert_eq!(err.to_string(), "Shortcut not found for action: zoom_in");
}

#[test]
fn shortcut_error_conflict_display() {
    let err = ShortcutError::Conflict("Ctrl+T".to_string());
    assert_eq!(err.to_string(), "Shortcut conflict: Ctrl+T");
}

#[test]
fn shortcut_error_invalid_keys_display() {
    let err = ShortcutError::InvalidKeys("".to_string());
    assert_eq!(err.to_string(), "Invalid shortcut keys: ");
}

// === ShellError Tests ===

#[test]
fn shell_error_closed_display() {
    assert_eq!(ShellError::Closed.to_string(), "Shell is closed");
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(SettingsError::IoError("x".to_string()));
    assert!(err.source().is_none());
    let err: Box<dyn std::error::Error> = Box::new(SurfaceError::Transport("x".to_string()));
    assert!(err.source().is_none());
}
