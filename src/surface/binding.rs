use serde::Serialize;

use crate::types::tab::TabId;

/// Lifecycle of one tab's link to a host rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingState {
    /// No surface is shown for this tab.
    Unbound,
    /// A navigation was requested and no status event has confirmed it yet.
    Pending,
    /// The host reported content for this tab's surface.
    Bound,
    /// Torn down by navigating back to the new-tab page. Terminal.
    Released,
}

/// Coordinator-side record of a tab's surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub tab_id: TabId,
    pub state: BindingState,
    /// Location the surface was last asked to show.
    pub target: Option<String>,
    /// Location the host last reported for this tab.
    pub reported: Option<String>,
    /// Whether the debounced navigate for `target` reached the dispatcher.
    pub navigate_issued: bool,
    /// The host may hold a surface for this tab: a navigate was sent and no
    /// close has followed.
    pub surface_open: bool,
}

impl Binding {
    pub fn new(tab_id: TabId) -> Self {
        Self {
            tab_id,
            state: BindingState::Unbound,
            target: None,
            reported: None,
            navigate_issued: false,
            surface_open: false,
        }
    }

    /// Unbound/Pending/Bound -> Pending for a new target.
    pub fn begin_navigation(&mut self, location: &str) {
        self.state = BindingState::Pending;
        self.target = Some(location.to_string());
        self.reported = None;
        self.navigate_issued = false;
    }

    pub fn mark_issued(&mut self) {
        self.navigate_issued = true;
        self.surface_open = true;
    }

    /// Clears `surface_open`, returning whether a close must be sent.
    pub fn take_surface(&mut self) -> bool {
        std::mem::replace(&mut self.surface_open, false)
    }

    /// Folds a host status event in. Only an issued navigate is confirmed;
    /// a pending target that has not been sent yet keeps precedence.
    pub fn confirm(&mut self, location: Option<&str>) {
        if let Some(location) = location {
            self.reported = Some(location.to_string());
        }
        if !self.navigate_issued {
            return;
        }
        if let Some(location) = location {
            self.target = Some(location.to_string());
        }
        if self.state == BindingState::Pending {
            self.state = BindingState::Bound;
        }
    }

    /// The tab stopped being the active one; its surface is closed.
    pub fn detach(&mut self) {
        if matches!(self.state, BindingState::Pending | BindingState::Bound) {
            self.state = BindingState::Unbound;
        }
        self.navigate_issued = false;
    }

    /// A navigate command failed: back to Unbound, no retry. The host may
    /// still have created the surface, so `surface_open` is kept.
    pub fn fail(&mut self) {
        self.state = BindingState::Unbound;
        self.navigate_issued = false;
    }

    pub fn release(&mut self) {
        self.state = BindingState::Released;
        self.target = None;
        self.reported = None;
        self.navigate_issued = false;
    }

    /// True if `location` is what this surface shows or is about to show.
    pub fn tracks(&self, location: &str) -> bool {
        self.target.as_deref() == Some(location) || self.reported.as_deref() == Some(location)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, BindingState::Pending | BindingState::Bound)
    }
}
