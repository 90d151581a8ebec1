//! RPC method handler for the Ostap JSON-lines protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` maps requests onto shell intents; `JsonLineHost` is the
//! host side of the same protocol, emitting surface commands as JSON events.
//!
//! Mutating methods reply once their intent is queued. Intents are applied in
//! arrival order and `session.get` / `onboarding.status` queue a query behind
//! them, so a read always reflects every earlier request on the connection.
//! `host.tab_updated` travels on the host event channel and is not ordered
//! against intents.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::app::ShellHandle;
use crate::surface::SurfaceHost;
use crate::types::errors::SurfaceError;
use crate::types::geometry::SurfaceRect;
use crate::types::intent::{HostEvent, ShellIntent};
use crate::types::tab::{TabId, TabPatch};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn index_param(params: &Value, key: &str) -> Result<usize, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| format!("missing {}", key))
}

fn patch_param(params: &Value) -> Result<TabPatch, String> {
    if params.is_null() {
        return Ok(TabPatch::default());
    }
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid tab fields: {}", e))
}

fn ok() -> Result<Value, String> {
    Ok(json!({"ok": true}))
}

/// Dispatch one request to the shell.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Intents are queued; except for `tab.add` the reply does not wait for them.
pub async fn handle_method(shell: &ShellHandle, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Tabs ───
        "tab.add" => {
            let overrides = patch_param(params)?;
            let id = shell.add_tab(overrides).await.map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "tab.close" => {
            let id = str_param(params, "id")?;
            shell.close_tab(TabId::from(id)).map_err(|e| e.to_string())?;
            ok()
        }
        "tab.close_active" => {
            shell
                .send(ShellIntent::CloseActiveTab)
                .map_err(|e| e.to_string())?;
            ok()
        }
        "tab.select" => {
            let id = str_param(params, "id")?;
            shell.select_tab(TabId::from(id)).map_err(|e| e.to_string())?;
            ok()
        }
        "tab.navigate" => {
            let input = str_param(params, "url")?;
            shell.navigate(input).map_err(|e| e.to_string())?;
            ok()
        }
        "tab.update" => {
            let id = str_param(params, "id")?;
            let patch = patch_param(params)?;
            if patch.is_empty() {
                return Err("nothing to update".to_string());
            }
            shell
                .update_tab(TabId::from(id), patch)
                .map_err(|e| e.to_string())?;
            ok()
        }
        "tab.reorder" => {
            let from = index_param(params, "from")?;
            let to = index_param(params, "to")?;
            shell.reorder_tab(from, to).map_err(|e| e.to_string())?;
            ok()
        }
        "tab.reload" => {
            shell.reload().map_err(|e| e.to_string())?;
            ok()
        }

        // ─── Layout & input ───
        "layout.update" => {
            let rect: SurfaceRect = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid rect: {}", e))?;
            shell.layout_changed(rect).map_err(|e| e.to_string())?;
            ok()
        }
        "shortcut" => {
            let name = str_param(params, "name")?;
            shell.shortcut(name).map_err(|e| e.to_string())?;
            ok()
        }
        "key" => {
            let keys = str_param(params, "keys")?;
            shell
                .send(ShellIntent::KeyCombo(keys.to_string()))
                .map_err(|e| e.to_string())?;
            ok()
        }

        // ─── Host status events ───
        "host.tab_updated" => {
            let mut event = params.clone();
            if let Some(map) = event.as_object_mut() {
                map.insert("event".to_string(), json!("tabUpdated"));
            }
            let event: HostEvent = serde_json::from_value(event)
                .map_err(|e| format!("invalid host event: {}", e))?;
            shell.host_event(event).map_err(|e| e.to_string())?;
            ok()
        }

        // ─── Session & onboarding ───
        "session.get" => {
            let view = shell.query_view().await.map_err(|e| e.to_string())?;
            serde_json::to_value(view).map_err(|e| e.to_string())
        }
        "onboarding.status" => {
            let view = shell.query_view().await.map_err(|e| e.to_string())?;
            Ok(json!({"completed": view.onboarding_completed}))
        }
        "onboarding.complete" => {
            shell.complete_onboarding().map_err(|e| e.to_string())?;
            ok()
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// `SurfaceHost` that writes each command as a JSON event line for the
/// process on the other end of the pipe. Status events come back as
/// `host.tab_updated` requests.
pub struct JsonLineHost {
    out: mpsc::UnboundedSender<Value>,
}

impl JsonLineHost {
    pub fn new(out: mpsc::UnboundedSender<Value>) -> Self {
        Self { out }
    }

    fn emit(&self, event: Value) -> Result<(), SurfaceError> {
        self.out
            .send(event)
            .map_err(|_| SurfaceError::Unavailable("output closed".to_string()))
    }
}

#[async_trait]
impl SurfaceHost for JsonLineHost {
    async fn navigate(&self, tab_id: &TabId, location: &str, rect: SurfaceRect) -> Result<(), SurfaceError> {
        self.emit(json!({"event": "surface.navigate", "tabId": tab_id, "url": location, "rect": rect}))
    }

    async fn resize(&self, tab_id: &TabId, rect: SurfaceRect) -> Result<(), SurfaceError> {
        self.emit(json!({"event": "surface.resize", "tabId": tab_id, "rect": rect}))
    }

    async fn close(&self, tab_id: &TabId) -> Result<(), SurfaceError> {
        self.emit(json!({"event": "surface.close", "tabId": tab_id}))
    }

    async fn hide_all(&self) -> Result<(), SurfaceError> {
        self.emit(json!({"event": "surface.hide_all"}))
    }
}
