//! Surface Coordinator.
//!
//! A synchronous state machine owned by the shell loop. It never awaits the
//! host: commands are queued to the dispatcher, debounce firings and command
//! outcomes come back through the loop's channels.
//!
//! At most one surface exists on the host at a time: a tab that stops being
//! active, returns to the new-tab page or is closed gets its surface closed.
//! `visible` records which tab's surface the host was last told to show, and
//! `hide_visible` is the only place a `hideAll` command is issued.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::binding::{Binding, BindingState};
use super::debounce::{DebounceTicket, Debouncer};
use super::dispatcher::CommandOutcome;
use super::host::SurfaceCommand;
use super::resize_gate::ResizeGate;
use crate::managers::tab_store::TabStoreTrait;
use crate::types::geometry::SurfaceRect;
use crate::types::intent::HostEvent;
use crate::types::session::SessionSnapshot;
use crate::types::settings::SurfaceSettings;
use crate::types::tab::{is_sentinel, Tab, TabId, TabPatch};

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub navigate_debounce: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::from(&SurfaceSettings::default())
    }
}

impl From<&SurfaceSettings> for CoordinatorConfig {
    fn from(settings: &SurfaceSettings) -> Self {
        Self {
            navigate_debounce: settings.navigate_debounce(),
        }
    }
}

pub struct SurfaceCoordinator {
    config: CoordinatorConfig,
    bindings: HashMap<TabId, Binding>,
    /// Active tab as of the last `sync`.
    active: Option<TabId>,
    visible: Option<TabId>,
    content_rect: Option<SurfaceRect>,
    /// Navigate that came due before any usable content rect was known.
    held_navigate: Option<TabId>,
    debouncer: Debouncer<TabId>,
    timers: mpsc::UnboundedSender<DebounceTicket<TabId>>,
    commands: mpsc::UnboundedSender<SurfaceCommand>,
    resize: ResizeGate,
}

impl SurfaceCoordinator {
    /// `commands` feeds the dispatcher; debounce firings are sent on `timers`
    /// and must be handed back through `on_navigate_due`.
    pub fn new(
        config: CoordinatorConfig,
        commands: mpsc::UnboundedSender<SurfaceCommand>,
        timers: mpsc::UnboundedSender<DebounceTicket<TabId>>,
    ) -> Self {
        Self {
            config,
            bindings: HashMap::new(),
            active: None,
            visible: None,
            content_rect: None,
            held_navigate: None,
            debouncer: Debouncer::new(),
            timers,
            commands,
            resize: ResizeGate::new(),
        }
    }

    pub fn binding(&self, tab_id: &TabId) -> Option<&Binding> {
        self.bindings.get(tab_id)
    }

    pub fn binding_state(&self, tab_id: &TabId) -> BindingState {
        self.bindings
            .get(tab_id)
            .map(|b| b.state)
            .unwrap_or(BindingState::Unbound)
    }

    pub fn visible_surface(&self) -> Option<&TabId> {
        self.visible.as_ref()
    }

    pub fn content_rect(&self) -> Option<SurfaceRect> {
        self.content_rect
    }

    pub fn is_navigate_pending(&self, tab_id: &TabId) -> bool {
        self.debouncer.is_pending(tab_id) || self.held_navigate.as_ref() == Some(tab_id)
    }

    /// Loading indicator: the active tab waits for its first status event.
    pub fn is_loading(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|id| self.binding_state(id) == BindingState::Pending)
    }

    /// Reconciles with the session after any store mutation.
    pub fn sync(&mut self, session: &SessionSnapshot) {
        let vanished: Vec<TabId> = self
            .bindings
            .keys()
            .filter(|id| !session.contains(id))
            .cloned()
            .collect();
        for tab_id in vanished {
            self.release_tab(&tab_id);
        }
        if self.active.as_ref().is_some_and(|id| !session.contains(id)) {
            self.active = None;
        }

        let Some(active) = session.active_tab() else {
            return;
        };

        if self.active.as_ref() == Some(&active.id) {
            self.follow_location(active);
            return;
        }

        // A surface for a closed tab may still be showing.
        self.hide_visible();
        if let Some(previous) = self.active.take() {
            self.deactivate(&previous);
        }
        self.active = Some(active.id.clone());
        debug!(tab_id = %active.id, "active tab changed");

        if !active.is_new_tab_page() {
            self.schedule_navigate(&active.id, &active.location);
        }
    }

    /// Explicit (re)navigation of `tab_id`, even if its location is unchanged.
    pub fn request_navigate(&mut self, tab_id: &TabId, location: &str) {
        if is_sentinel(location) {
            return;
        }
        if self.active.as_ref().is_some_and(|id| id != tab_id) {
            debug!(tab_id = %tab_id, "ignoring navigate for inactive tab");
            return;
        }
        self.schedule_navigate(tab_id, location);
    }

    /// A debounce timer fired.
    pub fn on_navigate_due(&mut self, ticket: DebounceTicket<TabId>) {
        if !self.debouncer.complete(&ticket) {
            debug!(tab_id = %ticket.key, "dropping superseded navigate");
            return;
        }
        let tab_id = ticket.key;
        if self.active.as_ref() != Some(&tab_id) {
            return;
        }
        if !self
            .bindings
            .get(&tab_id)
            .is_some_and(|b| b.state == BindingState::Pending)
        {
            return;
        }

        match self.content_rect.filter(|r| !r.is_empty()) {
            Some(rect) => self.issue_navigate(&tab_id, rect),
            None => {
                debug!(tab_id = %tab_id, "navigate held until the content region is laid out");
                self.held_navigate = Some(tab_id);
            }
        }
    }

    /// The content region moved or changed size.
    pub fn on_layout(&mut self, rect: SurfaceRect) {
        self.content_rect = Some(rect);
        if rect.is_empty() {
            return;
        }

        if let Some(tab_id) = self.held_navigate.take() {
            let still_wanted = self.active.as_ref() == Some(&tab_id)
                && self
                    .bindings
                    .get(&tab_id)
                    .is_some_and(|b| b.state == BindingState::Pending);
            if still_wanted {
                self.issue_navigate(&tab_id, rect);
            }
            return;
        }

        let Some(tab_id) = self.visible.clone() else {
            return;
        };
        let resizable = self
            .bindings
            .get(&tab_id)
            .is_some_and(|b| b.is_live() && b.navigate_issued);
        if resizable {
            if let Some((id, rect)) = self.resize.request(tab_id, rect) {
                self.issue(SurfaceCommand::Resize { tab_id: id, rect });
            }
        }
    }

    /// Folds a host status event into the store. Returns false when the event
    /// was discarded: its tab no longer exists, or the tab has no live surface
    /// (never navigated, switched away, or back on the new-tab page).
    pub fn on_host_event<S>(&mut self, event: HostEvent, store: &mut S) -> bool
    where
        S: TabStoreTrait + ?Sized,
    {
        let HostEvent::TabUpdated {
            tab_id,
            location,
            title,
        } = event;

        if !store.contains(&tab_id) {
            debug!(tab_id = %tab_id, "discarding status event for unknown tab");
            return false;
        }
        if !self.bindings.get(&tab_id).is_some_and(Binding::is_live) {
            debug!(tab_id = %tab_id, "discarding status event from a closed surface");
            return false;
        }

        let location = location.filter(|l| !l.is_empty() && !is_sentinel(l));
        if let Some(binding) = self.bindings.get_mut(&tab_id) {
            let was_pending = binding.state == BindingState::Pending;
            binding.confirm(location.as_deref());
            if was_pending && binding.state == BindingState::Bound {
                info!(tab_id = %tab_id, "surface bound");
            }
        }

        let patch = TabPatch {
            title: title.filter(|t| !t.is_empty()),
            location,
            favicon: None,
        };
        if !patch.is_empty() {
            store.update_tab(&tab_id, patch);
        }
        true
    }

    /// A host command finished.
    pub fn on_outcome(&mut self, outcome: CommandOutcome) {
        match (outcome.command, outcome.result) {
            (SurfaceCommand::Navigate { tab_id, location, .. }, Err(e)) => {
                if let Some(binding) = self.bindings.get_mut(&tab_id) {
                    let current = binding.state == BindingState::Pending
                        && binding.navigate_issued
                        && binding.target.as_deref() == Some(location.as_str());
                    if current {
                        binding.fail();
                        warn!(tab_id = %tab_id, location = %location, error = %e, "navigation failed");
                    }
                }
            }
            (SurfaceCommand::Resize { .. }, _) => {
                if let Some((tab_id, rect)) = self.resize.complete() {
                    self.issue(SurfaceCommand::Resize { tab_id, rect });
                }
            }
            _ => {}
        }
    }

    /// Closes every surface the host may hold and cancels pending navigates.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel_all();
        self.held_navigate = None;
        let open: Vec<TabId> = self
            .bindings
            .drain()
            .filter_map(|(id, mut binding)| binding.take_surface().then_some(id))
            .collect();
        for tab_id in open {
            self.issue(SurfaceCommand::Close { tab_id });
        }
        self.visible = None;
        self.active = None;
    }

    fn follow_location(&mut self, active: &Tab) {
        if active.is_new_tab_page() {
            self.hide_visible();
            let releasable = self
                .bindings
                .get(&active.id)
                .is_some_and(|b| b.state != BindingState::Released);
            if releasable {
                self.close_surface(&active.id);
                if let Some(binding) = self.bindings.get_mut(&active.id) {
                    binding.release();
                }
                debug!(tab_id = %active.id, "surface released for new-tab page");
            }
            return;
        }

        let tracked = self
            .bindings
            .get(&active.id)
            .is_some_and(|b| b.state != BindingState::Released && b.tracks(&active.location));
        if !tracked {
            self.schedule_navigate(&active.id, &active.location);
        }
    }

    fn schedule_navigate(&mut self, tab_id: &TabId, location: &str) {
        let binding = self
            .bindings
            .entry(tab_id.clone())
            .or_insert_with(|| Binding::new(tab_id.clone()));
        if binding.state == BindingState::Released {
            *binding = Binding::new(tab_id.clone());
        }
        binding.begin_navigation(location);
        self.drop_held(tab_id);
        self.debouncer
            .schedule(tab_id.clone(), self.config.navigate_debounce, &self.timers);
        debug!(tab_id = %tab_id, location = %location, "navigate scheduled");
    }

    fn issue_navigate(&mut self, tab_id: &TabId, rect: SurfaceRect) {
        let Some(location) = self.bindings.get_mut(tab_id).and_then(|b| {
            b.mark_issued();
            b.target.clone()
        }) else {
            return;
        };
        if self.visible.as_ref().is_some_and(|id| id != tab_id) {
            self.hide_visible();
        }
        self.visible = Some(tab_id.clone());
        info!(tab_id = %tab_id, location = %location, "navigating surface");
        self.issue(SurfaceCommand::Navigate {
            tab_id: tab_id.clone(),
            location,
            rect,
        });
    }

    fn deactivate(&mut self, tab_id: &TabId) {
        self.close_surface(tab_id);
        if let Some(binding) = self.bindings.get_mut(tab_id) {
            binding.detach();
        }
    }

    /// Closed tab: close its surface and forget it.
    fn release_tab(&mut self, tab_id: &TabId) {
        self.close_surface(tab_id);
        self.bindings.remove(tab_id);
    }

    /// Cancels everything queued for `tab_id` and closes its host surface,
    /// if one may exist.
    fn close_surface(&mut self, tab_id: &TabId) {
        self.debouncer.cancel(tab_id);
        self.drop_held(tab_id);
        self.resize.discard(tab_id);
        if self.visible.as_ref() == Some(tab_id) {
            self.visible = None;
        }
        let open = self
            .bindings
            .get_mut(tab_id)
            .is_some_and(Binding::take_surface);
        if open {
            info!(tab_id = %tab_id, "closing surface");
            self.issue(SurfaceCommand::Close {
                tab_id: tab_id.clone(),
            });
        }
    }

    fn hide_visible(&mut self) {
        if let Some(tab_id) = self.visible.take() {
            debug!(tab_id = %tab_id, "hiding visible surface");
            self.issue(SurfaceCommand::HideAll);
        }
    }

    fn drop_held(&mut self, tab_id: &TabId) {
        if self.held_navigate.as_ref() == Some(tab_id) {
            self.held_navigate = None;
        }
    }

    fn issue(&self, command: SurfaceCommand) {
        if self.commands.send(command).is_err() {
            warn!("surface dispatcher is gone, command dropped");
        }
    }
}
