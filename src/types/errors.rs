use thiserror::Error;

// === SurfaceError ===

/// Failures of commands dispatched to the host rendering-surface service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    /// The host refused the command.
    #[error("Surface command rejected: {0}")]
    Rejected(String),
    /// The host service is not reachable or has shut down.
    #[error("Surface host unavailable: {0}")]
    Unavailable(String),
    /// The command could not be encoded or delivered.
    #[error("Surface transport error: {0}")]
    Transport(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    #[error("Shortcut not found for action: {0}")]
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The provided key combination is invalid.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
}

// === ShellError ===

/// Errors returned by a `ShellHandle`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShellError {
    /// The shell loop has stopped and no longer accepts intents.
    #[error("Shell is closed")]
    Closed,
}
