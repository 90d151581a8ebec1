//! Shell runtime for Ostap.
//!
//! `Shell` owns the tab store, the surface coordinator, shortcut bindings and
//! the onboarding flag. It runs as one tokio task: intents, host status
//! events, debounce firings and command outcomes are all handled on that task,
//! one at a time, so the session is never mutated concurrently.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::managers::shortcut_manager::{ShortcutAction, ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_store::{TabStore, TabStoreTrait};
use crate::services::onboarding_store::OnboardingStore;
use crate::services::url_normalizer::normalize_input;
use crate::surface::{
    spawn_dispatcher, CommandOutcome, CoordinatorConfig, DebounceTicket, HostEventSender,
    SurfaceCoordinator, SurfaceHost,
};
use crate::types::errors::ShellError;
use crate::types::geometry::SurfaceRect;
use crate::types::intent::{HostEvent, ShellIntent};
use crate::types::session::ShellView;
use crate::types::settings::{NavigationSettings, ShellSettings};
use crate::types::tab::{is_sentinel, TabId, TabPatch, DEFAULT_TAB_TITLE};

/// Cloneable front door to a running shell.
#[derive(Clone)]
pub struct ShellHandle {
    intents: mpsc::UnboundedSender<ShellIntent>,
    host_events: HostEventSender,
    view: watch::Receiver<ShellView>,
}

impl ShellHandle {
    pub fn send(&self, intent: ShellIntent) -> Result<(), ShellError> {
        self.intents.send(intent).map_err(|_| ShellError::Closed)
    }

    /// Adds a tab and waits for its id.
    pub async fn add_tab(&self, overrides: TabPatch) -> Result<TabId, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.send(ShellIntent::AddTab {
            overrides,
            reply: Some(reply),
        })?;
        rx.await.map_err(|_| ShellError::Closed)
    }

    pub fn close_tab(&self, tab_id: TabId) -> Result<(), ShellError> {
        self.send(ShellIntent::CloseTab(tab_id))
    }

    pub fn select_tab(&self, tab_id: TabId) -> Result<(), ShellError> {
        self.send(ShellIntent::SelectTab(tab_id))
    }

    pub fn navigate(&self, input: impl Into<String>) -> Result<(), ShellError> {
        self.send(ShellIntent::Navigate {
            input: input.into(),
        })
    }

    pub fn update_tab(&self, id: TabId, patch: TabPatch) -> Result<(), ShellError> {
        self.send(ShellIntent::UpdateTab { id, patch })
    }

    pub fn reorder_tab(&self, from: usize, to: usize) -> Result<(), ShellError> {
        self.send(ShellIntent::ReorderTab { from, to })
    }

    pub fn reload(&self) -> Result<(), ShellError> {
        self.send(ShellIntent::Reload)
    }

    pub fn layout_changed(&self, rect: SurfaceRect) -> Result<(), ShellError> {
        self.send(ShellIntent::LayoutChanged(rect))
    }

    pub fn shortcut(&self, name: impl Into<String>) -> Result<(), ShellError> {
        self.send(ShellIntent::Shortcut(name.into()))
    }

    pub fn complete_onboarding(&self) -> Result<(), ShellError> {
        self.send(ShellIntent::CompleteOnboarding)
    }

    pub fn shutdown(&self) -> Result<(), ShellError> {
        self.send(ShellIntent::Shutdown)
    }

    /// Delivers a host status event to the shell.
    pub fn host_event(&self, event: HostEvent) -> Result<(), ShellError> {
        self.host_events.send(event).map_err(|_| ShellError::Closed)
    }

    /// Sender for host transports that push status events directly.
    pub fn host_events(&self) -> HostEventSender {
        self.host_events.clone()
    }

    /// View after every intent sent before this call has been applied.
    pub async fn query_view(&self) -> Result<ShellView, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.send(ShellIntent::Query(reply))?;
        rx.await.map_err(|_| ShellError::Closed)
    }

    /// Latest published view. Intents still queued are not reflected yet.
    pub fn view(&self) -> ShellView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShellView> {
        self.view.clone()
    }
}

/// Shell state, moved into its task by `spawn`.
pub struct Shell {
    store: TabStore,
    shortcuts: ShortcutManager,
    navigation: NavigationSettings,
    coordinator_config: CoordinatorConfig,
    onboarding: OnboardingStore,
    onboarding_completed: bool,
}

impl Shell {
    /// Builds a shell around `store`. The onboarding flag is read here, once.
    pub fn new(store: TabStore, settings: &ShellSettings, onboarding: OnboardingStore) -> Self {
        let onboarding_completed = onboarding.is_completed();
        Self {
            store,
            shortcuts: ShortcutManager::new(&settings.shortcuts),
            navigation: settings.navigation.clone(),
            coordinator_config: CoordinatorConfig::from(&settings.surface),
            onboarding,
            onboarding_completed,
        }
    }

    /// Starts the dispatcher and the shell loop on the current runtime.
    /// The returned task finishes after `Shutdown` once every queued host
    /// command has been delivered.
    pub fn spawn(self, host: Arc<dyn SurfaceHost>) -> (ShellHandle, JoinHandle<()>) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let dispatcher = spawn_dispatcher(host, command_rx, outcome_tx);
        let coordinator =
            SurfaceCoordinator::new(self.coordinator_config.clone(), command_tx, timer_tx);

        let (view_tx, view_rx) = watch::channel(self.view(&coordinator));
        let handle = ShellHandle {
            intents: intent_tx,
            host_events: host_tx,
            view: view_rx,
        };

        let channels = LoopChannels {
            intents: intent_rx,
            host_events: host_rx,
            timers: timer_rx,
            outcomes: outcome_rx,
        };
        let task = tokio::spawn(self.run(coordinator, channels, view_tx, dispatcher));
        (handle, task)
    }

    async fn run(
        mut self,
        mut coordinator: SurfaceCoordinator,
        mut channels: LoopChannels,
        view_tx: watch::Sender<ShellView>,
        dispatcher: JoinHandle<()>,
    ) {
        info!(tabs = self.store.tab_count(), "shell started");
        coordinator.sync(&self.store.snapshot());

        loop {
            let mut query = None;
            tokio::select! {
                intent = channels.intents.recv() => match intent {
                    Some(ShellIntent::Shutdown) | None => break,
                    Some(ShellIntent::Query(reply)) => query = Some(reply),
                    Some(intent) => self.handle_intent(intent, &mut coordinator),
                },
                Some(event) = channels.host_events.recv() => {
                    coordinator.on_host_event(event, &mut self.store);
                }
                Some(ticket) = channels.timers.recv() => {
                    coordinator.on_navigate_due(ticket);
                }
                Some(outcome) = channels.outcomes.recv() => {
                    coordinator.on_outcome(outcome);
                }
            }

            coordinator.sync(&self.store.snapshot());
            let view = self.view(&coordinator);
            if let Some(reply) = query {
                let _ = reply.send(view.clone());
            }
            view_tx.send_if_modified(|current| {
                if *current == view {
                    false
                } else {
                    *current = view;
                    true
                }
            });
        }

        info!("shell shutting down");
        coordinator.shutdown();
        drop(coordinator);
        if let Err(e) = dispatcher.await {
            warn!(error = %e, "surface dispatcher ended abnormally");
        }
    }

    fn handle_intent(&mut self, intent: ShellIntent, coordinator: &mut SurfaceCoordinator) {
        match intent {
            ShellIntent::AddTab { overrides, reply } => {
                let tab_id = self.store.add_tab(overrides);
                debug!(tab_id = %tab_id, "tab added");
                if let Some(reply) = reply {
                    let _ = reply.send(tab_id);
                }
            }
            ShellIntent::CloseTab(tab_id) => self.store.close_tab(&tab_id),
            ShellIntent::CloseActiveTab => self.close_active_tab(),
            ShellIntent::SelectTab(tab_id) => self.store.set_active(&tab_id),
            ShellIntent::Navigate { input } => self.navigate(&input, coordinator),
            ShellIntent::UpdateTab { id, patch } => self.store.update_tab(&id, patch),
            ShellIntent::ReorderTab { from, to } => self.store.reorder_tab(from, to),
            ShellIntent::Reload => self.reload(coordinator),
            ShellIntent::LayoutChanged(rect) => coordinator.on_layout(rect),
            ShellIntent::Shortcut(name) => match ShortcutAction::from_notification(&name) {
                Some(action) => self.run_shortcut(action, coordinator),
                None => debug!(shortcut = %name, "ignoring unknown shortcut notification"),
            },
            ShellIntent::KeyCombo(keys) => match self.shortcuts.resolve_keys(&keys) {
                Some(action) => self.run_shortcut(action, coordinator),
                None => debug!(keys = %keys, "no shortcut bound"),
            },
            ShellIntent::CompleteOnboarding => self.complete_onboarding(),
            ShellIntent::Query(_) | ShellIntent::Shutdown => {}
        }
    }

    /// Normalizes address-bar input and points the active tab at it.
    fn navigate(&mut self, input: &str, coordinator: &mut SurfaceCoordinator) {
        let location = normalize_input(input, &self.navigation);
        let tab_id = self.store.active_id().clone();
        let title = if is_sentinel(&location) {
            DEFAULT_TAB_TITLE.to_string()
        } else {
            location.clone()
        };
        self.store.update_tab(
            &tab_id,
            TabPatch {
                title: Some(title),
                location: Some(location.clone()),
                favicon: None,
            },
        );
        coordinator.request_navigate(&tab_id, &location);
    }

    fn reload(&mut self, coordinator: &mut SurfaceCoordinator) {
        let tab = self.store.active_tab();
        if !tab.is_new_tab_page() {
            let (tab_id, location) = (tab.id.clone(), tab.location.clone());
            coordinator.request_navigate(&tab_id, &location);
        }
    }

    fn close_active_tab(&mut self) {
        let tab_id = self.store.active_id().clone();
        self.store.close_tab(&tab_id);
    }

    fn run_shortcut(&mut self, action: ShortcutAction, coordinator: &mut SurfaceCoordinator) {
        match action {
            ShortcutAction::NewTab => {
                self.store.add_tab(TabPatch::default());
            }
            ShortcutAction::CloseTab => self.close_active_tab(),
            ShortcutAction::Reload => self.reload(coordinator),
        }
    }

    fn complete_onboarding(&mut self) {
        if self.onboarding_completed {
            return;
        }
        if let Err(e) = self.onboarding.mark_completed() {
            warn!(error = %e, "could not persist onboarding flag");
        }
        self.onboarding_completed = true;
    }

    fn view(&self, coordinator: &SurfaceCoordinator) -> ShellView {
        ShellView {
            session: self.store.snapshot(),
            loading: coordinator.is_loading(),
            onboarding_completed: self.onboarding_completed,
        }
    }
}

struct LoopChannels {
    intents: mpsc::UnboundedReceiver<ShellIntent>,
    host_events: mpsc::UnboundedReceiver<HostEvent>,
    timers: mpsc::UnboundedReceiver<DebounceTicket<TabId>>,
    outcomes: mpsc::UnboundedReceiver<CommandOutcome>,
}
