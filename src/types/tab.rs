use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved location of the locally rendered new-tab page.
pub const NEW_TAB_LOCATION: &str = "ostap://newtab";

/// Title given to every freshly created tab.
pub const DEFAULT_TAB_TITLE: &str = "New Tab";

/// Scheme prefix of internal pages that never get a rendering surface.
pub const INTERNAL_SCHEME: &str = "ostap://";

/// Opaque tab identifier, stable for the tab's lifetime and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One logical browsing context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub location: String,
    pub favicon: Option<String>,
}

impl Tab {
    /// Builds a default tab overlaid with any fields present in `patch`.
    pub fn with_defaults(id: TabId, patch: TabPatch) -> Self {
        let mut tab = Self {
            id,
            title: DEFAULT_TAB_TITLE.to_string(),
            location: NEW_TAB_LOCATION.to_string(),
            favicon: None,
        };
        tab.apply(patch);
        tab
    }

    /// Merges the present fields of `patch` into this tab.
    pub fn apply(&mut self, patch: TabPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(favicon) = patch.favicon {
            self.favicon = Some(favicon);
        }
    }

    /// True when the tab shows the locally rendered new-tab page.
    pub fn is_new_tab_page(&self) -> bool {
        is_sentinel(&self.location)
    }

    /// Location as shown in the address bar; internal pages show nothing.
    pub fn display_location(&self) -> &str {
        if self.location.starts_with(INTERNAL_SCHEME) {
            ""
        } else {
            &self.location
        }
    }
}

/// Returns true if `location` is the new-tab sentinel.
pub fn is_sentinel(location: &str) -> bool {
    location == NEW_TAB_LOCATION
}

/// Partial tab fields used for creation overrides and updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "url")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl TabPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.location.is_none() && self.favicon.is_none()
    }
}
