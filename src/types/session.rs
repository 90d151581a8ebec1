use serde::{Deserialize, Serialize};

use super::tab::{Tab, TabId};

/// The ordered tabs plus the active tab id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub tabs: Vec<Tab>,
    pub active_id: TabId,
}

impl SessionSnapshot {
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.id == self.active_id)
            .or_else(|| self.tabs.first())
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == id)
    }
}

/// Everything the chrome needs to render one frame of the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    pub session: SessionSnapshot,
    pub loading: bool,
    pub onboarding_completed: bool,
}
