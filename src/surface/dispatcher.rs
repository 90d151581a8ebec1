use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::host::{SurfaceCommand, SurfaceHost};
use crate::types::errors::SurfaceError;

/// Result of one host command, reported back to the shell loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub command: SurfaceCommand,
    pub result: Result<(), SurfaceError>,
}

/// Starts the task that forwards queued commands to `host`, one at a time and
/// in queue order. The task ends once every command sender is dropped and the
/// queue is drained.
pub fn spawn_dispatcher(
    host: Arc<dyn SurfaceHost>,
    mut commands: mpsc::UnboundedReceiver<SurfaceCommand>,
    outcomes: mpsc::UnboundedSender<CommandOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            let result = command.send_to(host.as_ref()).await;
            match &result {
                Ok(()) => debug!(command = command.kind(), tab_id = ?command.tab_id(), "surface command done"),
                Err(e) => warn!(command = command.kind(), tab_id = ?command.tab_id(), error = %e, "surface command failed"),
            }
            // The shell loop may already be gone during shutdown.
            let _ = outcomes.send(CommandOutcome { command, result });
        }
        debug!("surface dispatcher stopped");
    })
}
