use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::types::errors::SurfaceError;
use crate::types::geometry::SurfaceRect;
use crate::types::intent::HostEvent;
use crate::types::tab::TabId;

/// Sender half the host transport uses to deliver status events.
pub type HostEventSender = mpsc::UnboundedSender<HostEvent>;

/// The host's rendering-surface manager. Transport is up to the implementation.
#[async_trait]
pub trait SurfaceHost: Send + Sync + 'static {
    /// Binds or re-points the surface for `tab_id` to `location`, placed at `rect`.
    async fn navigate(
        &self,
        tab_id: &TabId,
        location: &str,
        rect: SurfaceRect,
    ) -> Result<(), SurfaceError>;

    /// Repositions the existing surface for `tab_id`.
    async fn resize(&self, tab_id: &TabId, rect: SurfaceRect) -> Result<(), SurfaceError>;

    /// Releases the surface for `tab_id`.
    async fn close(&self, tab_id: &TabId) -> Result<(), SurfaceError>;

    /// Hides whatever surface is currently visible.
    async fn hide_all(&self) -> Result<(), SurfaceError>;
}

/// One command for the host, as queued by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SurfaceCommand {
    #[serde(rename_all = "camelCase")]
    Navigate {
        tab_id: TabId,
        location: String,
        rect: SurfaceRect,
    },
    #[serde(rename_all = "camelCase")]
    Resize { tab_id: TabId, rect: SurfaceRect },
    #[serde(rename_all = "camelCase")]
    Close { tab_id: TabId },
    HideAll,
}

impl SurfaceCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceCommand::Navigate { .. } => "navigate",
            SurfaceCommand::Resize { .. } => "resize",
            SurfaceCommand::Close { .. } => "close",
            SurfaceCommand::HideAll => "hideAll",
        }
    }

    pub fn tab_id(&self) -> Option<&TabId> {
        match self {
            SurfaceCommand::Navigate { tab_id, .. }
            | SurfaceCommand::Resize { tab_id, .. }
            | SurfaceCommand::Close { tab_id } => Some(tab_id),
            SurfaceCommand::HideAll => None,
        }
    }

    /// Performs this command against `host`.
    pub async fn send_to<H: SurfaceHost + ?Sized>(&self, host: &H) -> Result<(), SurfaceError> {
        match self {
            SurfaceCommand::Navigate {
                tab_id,
                location,
                rect,
            } => host.navigate(tab_id, location, *rect).await,
            SurfaceCommand::Resize { tab_id, rect } => host.resize(tab_id, *rect).await,
            SurfaceCommand::Close { tab_id } => host.close(tab_id).await,
            SurfaceCommand::HideAll => host.hide_all().await,
        }
    }
}
