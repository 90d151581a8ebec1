//! WebView-based browser window using `wry` + `tao`.
//!
//! Architecture:
//! - The chrome page (`resources/ui/chrome.html`) fills the window and draws
//!   the sidebar, the address bar and the new-tab page.
//! - The shell runs on a tokio runtime next to the UI thread. Surface commands
//!   and view updates reach the UI thread as `UserEvent`s.
//! - The active tab gets a child WebView, created on its navigate and
//!   destroyed once the tab is switched away from, closed or sent back to the
//!   new-tab page. Load and title changes go back as host events.
//! - IPC from JS → Rust via `window.ipc.postMessage()`.

use std::collections::HashMap;
use std::sync::Arc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, error, info, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use super::webview_host::{UserEvent, WebviewHost};
use crate::app::{Shell, ShellHandle};
use crate::managers::tab_store::TabStore;
use crate::services::onboarding_store::OnboardingStore;
use crate::services::settings_engine::SettingsEngine;
use crate::surface::{HostEventSender, SurfaceCommand};
use crate::types::errors::SurfaceError;
use crate::types::geometry::SurfaceRect;
use crate::types::intent::{HostEvent, ShellIntent};
use crate::types::tab::{TabId, TabPatch};

const CHROME_HTML: &str = include_str!("../../resources/ui/chrome.html");

/// Forwards modifier shortcuts pressed inside a page, since the page's
/// WebView owns keyboard focus.
const CONTENT_KEYS_JS: &str = r#"
window.addEventListener('keydown', function (e) {
  if (!(e.ctrlKey || e.metaKey)) return;
  var key = e.key.length === 1 ? e.key.toUpperCase() : e.key;
  var combo = (e.metaKey ? 'Cmd+' : 'Ctrl+') + (e.shiftKey ? 'Shift+' : '') + key;
  window.ipc.postMessage(JSON.stringify({ cmd: 'key', keys: combo }));
}, true);
"#;

// ─── IPC ───

/// Maps a chrome IPC message onto a shell intent.
fn chrome_message_to_intent(message: &str) -> Option<ShellIntent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;
    let tab_id = || msg.get("id").and_then(|v| v.as_str()).map(TabId::from);

    match cmd {
        "new_tab" => Some(ShellIntent::AddTab {
            overrides: TabPatch::default(),
            reply: None,
        }),
        "close_tab" => tab_id().map(ShellIntent::CloseTab),
        "select_tab" => tab_id().map(ShellIntent::SelectTab),
        "navigate" => msg.get("url").and_then(|v| v.as_str()).map(|input| ShellIntent::Navigate {
            input: input.to_string(),
        }),
        "reload" => Some(ShellIntent::Reload),
        "reorder" => {
            let from = msg.get("from")?.as_u64()? as usize;
            let to = msg.get("to")?.as_u64()? as usize;
            Some(ShellIntent::ReorderTab { from, to })
        }
        "layout" => {
            let rect: SurfaceRect = serde_json::from_value(msg.get("rect")?.clone()).ok()?;
            Some(ShellIntent::LayoutChanged(rect))
        }
        "key" => content_message_to_intent(message),
        "onboarding_complete" => Some(ShellIntent::CompleteOnboarding),
        _ => None,
    }
}

/// The chrome page finished loading and wants the current view.
fn is_ready_message(message: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(message)
        .ok()
        .and_then(|msg| msg.get("cmd").and_then(|c| c.as_str()).map(|c| c == "ready"))
        .unwrap_or(false)
}

/// Pages may only report key combinations.
fn content_message_to_intent(message: &str) -> Option<ShellIntent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    match msg.get("cmd")?.as_str()? {
        "key" => msg
            .get("keys")
            .and_then(|v| v.as_str())
            .map(|keys| ShellIntent::KeyCombo(keys.to_string())),
        _ => None,
    }
}

fn to_bounds(rect: SurfaceRect) -> Rect {
    Rect {
        position: LogicalPosition::new(rect.x, rect.y).into(),
        size: LogicalSize::new(rect.width, rect.height).into(),
    }
}

fn window_bounds(window: &Window) -> Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    to_bounds(SurfaceRect::new(0.0, 0.0, size.width, size.height))
}

fn render_script(handle: &ShellHandle) -> Option<String> {
    let json = serde_json::to_string(&handle.view()).ok()?;
    Some(format!("window.__ostap_render && window.__ostap_render({})", json))
}

// ─── Surfaces ───

/// Child WebViews keyed by tab.
struct Surfaces {
    views: HashMap<TabId, WebView>,
    host_events: HostEventSender,
    intents: ShellHandle,
}

impl Surfaces {
    /// Applies one host command. Errors go back to the dispatcher, which
    /// reports them to the coordinator.
    fn apply(&mut self, window: &Window, command: SurfaceCommand) -> Result<(), SurfaceError> {
        match command {
            SurfaceCommand::Navigate { tab_id, location, rect } => {
                if let Some(view) = self.views.get(&tab_id) {
                    return view
                        .set_bounds(to_bounds(rect))
                        .and_then(|_| view.set_visible(true))
                        .and_then(|_| view.load_url(&location))
                        .map_err(|e| SurfaceError::Rejected(e.to_string()));
                }
                let view = self.build(window, &tab_id, &location, rect).map_err(|e| {
                    error!(tab_id = %tab_id, error = %e, "could not create surface");
                    SurfaceError::Rejected(e.to_string())
                })?;
                self.views.insert(tab_id, view);
                Ok(())
            }
            SurfaceCommand::Resize { tab_id, rect } => match self.views.get(&tab_id) {
                Some(view) => view
                    .set_bounds(to_bounds(rect))
                    .map_err(|e| SurfaceError::Rejected(e.to_string())),
                None => Ok(()),
            },
            SurfaceCommand::Close { tab_id } => {
                if self.views.remove(&tab_id).is_some() {
                    debug!(tab_id = %tab_id, "surface destroyed");
                }
                Ok(())
            }
            SurfaceCommand::HideAll => {
                for view in self.views.values() {
                    if let Err(e) = view.set_visible(false) {
                        warn!(error = %e, "could not hide surface");
                    }
                }
                Ok(())
            }
        }
    }

    fn build(&self, window: &Window, tab_id: &TabId, location: &str, rect: SurfaceRect) -> wry::Result<WebView> {
        let load_events = self.host_events.clone();
        let load_id = tab_id.clone();
        let title_events = self.host_events.clone();
        let title_id = tab_id.clone();
        let keys = self.intents.clone();

        WebViewBuilder::new()
            .with_url(location)
            .with_bounds(to_bounds(rect))
            .with_initialization_script(CONTENT_KEYS_JS)
            .with_on_page_load_handler(move |event, url| {
                if matches!(event, PageLoadEvent::Finished) {
                    let _ = load_events.send(HostEvent::TabUpdated {
                        tab_id: load_id.clone(),
                        location: Some(url),
                        title: None,
                    });
                }
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_events.send(HostEvent::TabUpdated {
                    tab_id: title_id.clone(),
                    location: None,
                    title: Some(title),
                });
            })
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                if let Some(intent) = content_message_to_intent(msg.body()) {
                    let _ = keys.send(intent);
                }
            })
            .with_devtools(cfg!(debug_assertions))
            .build_as_child(window)
    }
}

// ─── Main entry point ───

pub fn run() {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "could not start runtime");
            return;
        }
    };

    let settings = SettingsEngine::new(None).load_or_default();
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let (handle, shell_task) = {
        let _guard = runtime.enter();
        let shell = Shell::new(TabStore::new(), &settings, OnboardingStore::new(None));
        shell.spawn(Arc::new(WebviewHost::new(proxy.clone())))
    };

    let mut views = handle.subscribe();
    let view_proxy = proxy.clone();
    runtime.spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if view_proxy.send_event(UserEvent::View(view)).is_err() {
                break;
            }
        }
    });

    let window = match WindowBuilder::new()
        .with_title("Ostap")
        .with_inner_size(tao::dpi::LogicalSize::new(
            settings.window.width as f64,
            settings.window.height as f64,
        ))
        .build(&event_loop)
    {
        Ok(w) => w,
        Err(e) => {
            error!(error = %e, "could not create window");
            return;
        }
    };

    let ipc_handle = handle.clone();
    let ready_proxy = proxy.clone();
    let chrome = WebViewBuilder::new()
        .with_html(CHROME_HTML)
        .with_bounds(window_bounds(&window))
        .with_initialization_script(&format!(
            "window.__OSTAP_SIDEBAR_WIDTH = {};",
            settings.window.sidebar_width
        ))
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!(message = %body.chars().take(200).collect::<String>(), "chrome ipc");
            if is_ready_message(body) {
                let _ = ready_proxy.send_event(UserEvent::View(ipc_handle.view()));
                return;
            }
            if let Some(intent) = chrome_message_to_intent(body) {
                let _ = ipc_handle.send(intent);
            }
        })
        .with_devtools(cfg!(debug_assertions))
        .build_as_child(&window);
    let chrome = match chrome {
        Ok(wv) => wv,
        Err(e) => {
            error!(error = %e, "could not create chrome webview");
            return;
        }
    };

    // The loop exits once the shell has closed every surface.
    let exit_proxy = proxy.clone();
    runtime.spawn(async move {
        if let Err(e) = shell_task.await {
            warn!(error = %e, "shell task ended abnormally");
        }
        let _ = exit_proxy.send_event(UserEvent::ShellStopped);
    });

    let mut surfaces = Surfaces {
        views: HashMap::new(),
        host_events: handle.host_events(),
        intents: handle.clone(),
    };
    info!("window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                window.set_visible(false);
                if handle.shutdown().is_err() {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::UserEvent(UserEvent::ShellStopped) => {
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                let _ = chrome.set_bounds(window_bounds(&window));
            }

            Event::UserEvent(UserEvent::Surface(command, reply)) => {
                let _ = reply.send(surfaces.apply(&window, command));
            }

            Event::UserEvent(UserEvent::View(_)) => {
                if let Some(js) = render_script(&handle) {
                    let _ = chrome.evaluate_script(&js);
                }
            }

            _ => {}
        }
    });
}
