use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use super::geometry::SurfaceRect;
use super::session::ShellView;
use super::tab::{TabId, TabPatch};

/// Tab Store actions in reducer form.
#[derive(Debug, Clone, PartialEq)]
pub enum TabAction {
    Add(TabPatch),
    Close(TabId),
    SetActive(TabId),
    Update(TabId, TabPatch),
    Reorder { from: usize, to: usize },
}

/// Intents dispatched into the shell by the chrome, shortcuts or transports.
#[derive(Debug)]
pub enum ShellIntent {
    /// Append a tab built from defaults plus `overrides` and activate it.
    /// The new id is sent back on `reply` when one is given.
    AddTab {
        overrides: TabPatch,
        reply: Option<oneshot::Sender<TabId>>,
    },
    CloseTab(TabId),
    CloseActiveTab,
    SelectTab(TabId),
    /// Raw address-bar input for the active tab.
    Navigate { input: String },
    UpdateTab { id: TabId, patch: TabPatch },
    ReorderTab { from: usize, to: usize },
    /// Re-issue navigation of the active tab to its current location.
    Reload,
    /// New placement of the content region.
    LayoutChanged(SurfaceRect),
    /// Global shortcut notification from the host, e.g. `new-tab`.
    Shortcut(String),
    /// Key combination pressed in the chrome, e.g. `Ctrl+T`.
    KeyCombo(String),
    CompleteOnboarding,
    /// Reply with the view once every earlier intent has been applied.
    Query(oneshot::Sender<ShellView>),
    Shutdown,
}

/// Asynchronous, tab-scoped status events emitted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    #[serde(rename_all = "camelCase")]
    TabUpdated {
        tab_id: TabId,
        #[serde(default, alias = "url")]
        location: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
}

impl HostEvent {
    pub fn tab_id(&self) -> &TabId {
        match self {
            HostEvent::TabUpdated { tab_id, .. } => tab_id,
        }
    }
}
