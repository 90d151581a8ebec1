use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Top-level shell configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub surface: SurfaceSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default = "ShellSettings::default_shortcuts")]
    pub shortcuts: HashMap<String, String>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            navigation: NavigationSettings::default(),
            surface: SurfaceSettings::default(),
            window: WindowSettings::default(),
            shortcuts: Self::default_shortcuts(),
        }
    }
}

impl ShellSettings {
    /// Returns the default keyboard shortcuts.
    pub fn default_shortcuts() -> HashMap<String, String> {
        let mut shortcuts = HashMap::new();
        shortcuts.insert("new_tab".to_string(), "Ctrl+T".to_string());
        shortcuts.insert("close_tab".to_string(), "Ctrl+W".to_string());
        shortcuts.insert("reload".to_string(), "Ctrl+R".to_string());
        shortcuts
    }
}

/// How raw address-bar input becomes a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationSettings {
    /// Query address prefix; the percent-encoded input is appended.
    pub search_url: String,
    /// Scheme prefixed to bare host-like input.
    pub default_scheme: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.com/search?q=".to_string(),
            default_scheme: "https".to_string(),
        }
    }
}

/// Surface coordination timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceSettings {
    pub navigate_debounce_ms: u64,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            navigate_debounce_ms: 50,
        }
    }
}

impl SurfaceSettings {
    pub fn navigate_debounce(&self) -> Duration {
        Duration::from_millis(self.navigate_debounce_ms)
    }
}

/// Initial window geometry for the GUI host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub sidebar_width: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            sidebar_width: 240,
        }
    }
}
