//! `SurfaceHost` backed by the tao event loop.
//!
//! WebViews live on the UI thread, so commands are forwarded through the
//! event loop proxy and applied in `webview_app`'s loop. Each command carries
//! a reply channel; the host call resolves once the UI thread has applied it.

use std::sync::Mutex;

use async_trait::async_trait;
use tao::event_loop::EventLoopProxy;
use tokio::sync::oneshot;

use crate::surface::{SurfaceCommand, SurfaceHost};
use crate::types::errors::SurfaceError;
use crate::types::geometry::SurfaceRect;
use crate::types::session::ShellView;
use crate::types::tab::TabId;

#[derive(Debug)]
pub enum UserEvent {
    /// A host command plus where to report how applying it went.
    Surface(SurfaceCommand, oneshot::Sender<Result<(), SurfaceError>>),
    /// New view to render in the chrome.
    View(ShellView),
    /// The shell loop finished its shutdown.
    ShellStopped,
}

/// The proxy is `Send` on every platform but not always `Sync`.
pub struct WebviewHost {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl WebviewHost {
    pub fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }

    async fn forward(&self, command: SurfaceCommand) -> Result<(), SurfaceError> {
        round_trip(command, |event| {
            let proxy = self
                .proxy
                .lock()
                .map_err(|_| SurfaceError::Transport("event loop proxy poisoned".to_string()))?;
            proxy
                .send_event(event)
                .map_err(|_| SurfaceError::Unavailable("event loop closed".to_string()))
        })
        .await
    }
}

/// Hands `command` to `send` and waits for the UI thread's verdict.
async fn round_trip<F>(command: SurfaceCommand, send: F) -> Result<(), SurfaceError>
where
    F: FnOnce(UserEvent) -> Result<(), SurfaceError>,
{
    let (reply, verdict) = oneshot::channel();
    send(UserEvent::Surface(command, reply))?;
    verdict
        .await
        .map_err(|_| SurfaceError::Unavailable("event loop dropped the command".to_string()))?
}

#[async_trait]
impl SurfaceHost for WebviewHost {
    async fn navigate(&self, tab_id: &TabId, location: &str, rect: SurfaceRect) -> Result<(), SurfaceError> {
        self.forward(SurfaceCommand::Navigate {
            tab_id: tab_id.clone(),
            location: location.to_string(),
            rect,
        })
        .await
    }

    async fn resize(&self, tab_id: &TabId, rect: SurfaceRect) -> Result<(), SurfaceError> {
        self.forward(SurfaceCommand::Resize {
            tab_id: tab_id.clone(),
            rect,
        })
        .await
    }

    async fn close(&self, tab_id: &TabId) -> Result<(), SurfaceError> {
        self.forward(SurfaceCommand::Close {
            tab_id: tab_id.clone(),
        })
        .await
    }

    async fn hide_all(&self) -> Result<(), SurfaceError> {
        self.forward(SurfaceCommand::HideAll).await
    }
}
