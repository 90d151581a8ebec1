//! Shortcut Manager for Ostap.
//!
//! Keyboard shortcut bindings with conflict detection and platform-specific
//! modifier adaptation, plus the mapping from the host's global shortcut
//! notifications onto shell intents.

use std::collections::HashMap;

use crate::types::errors::ShortcutError;

/// Shell-level action a shortcut resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    NewTab,
    CloseTab,
    Reload,
}

impl ShortcutAction {
    /// Maps a binding name (`new_tab`) onto an action.
    pub fn from_binding(action: &str) -> Option<Self> {
        match action {
            "new_tab" => Some(Self::NewTab),
            "close_tab" => Some(Self::CloseTab),
            "reload" => Some(Self::Reload),
            _ => None,
        }
    }

    /// Maps a global shortcut notification from the host (`new-tab`).
    /// These bypass widget focus because the content surface may own it.
    pub fn from_notification(name: &str) -> Option<Self> {
        match name {
            "new-tab" => Some(Self::NewTab),
            "close-tab" => Some(Self::CloseTab),
            "reload" => Some(Self::Reload),
            _ => None,
        }
    }
}

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: &str) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<String, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String>;
    fn resolve_keys(&self, keys: &str) -> Option<ShortcutAction>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<String, String>,
    defaults: HashMap<String, String>,
}

impl ShortcutManager {
    /// Creates a manager whose defaults are `bindings` (action -> keys).
    pub fn new(bindings: &HashMap<String, String>) -> Self {
        let defaults: HashMap<String, String> = bindings
            .iter()
            .map(|(a, k)| (a.clone(), Self::adapt_for_platform(k)))
            .collect();
        Self {
            shortcuts: defaults.clone(),
            defaults,
        }
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError> {
        if keys.is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        if let Some(conflicting_action) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting_action
            )));
        }

        self.shortcuts
            .insert(action.to_string(), Self::adapt_for_platform(keys));
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError> {
        self.shortcuts
            .remove(action)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(action.to_string()))
    }

    fn get_shortcut(&self, action: &str) -> Option<&str> {
        self.shortcuts.get(action).map(|s| s.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<String, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = self.defaults.clone();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(action, bound)| **bound == adapted && Some(action.as_str()) != exclude_action)
            .map(|(action, _)| action.clone())
    }

    /// Resolves a pressed key combination to its bound action.
    fn resolve_keys(&self, keys: &str) -> Option<ShortcutAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(_, bound)| **bound == adapted)
            .and_then(|(action, _)| ShortcutAction::from_binding(action))
    }
}
