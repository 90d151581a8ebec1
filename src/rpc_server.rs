//! Ostap RPC Server — JSON-lines over stdin/stdout for an external chrome process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.navigate", "params":{"url":"example.com"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"surface.navigate", ...} and {"event":"session","view":{...}}

use std::sync::Arc;
use std::time::Instant;

use ostap::app::Shell;
use ostap::logging;
use ostap::managers::tab_store::TabStore;
use ostap::rpc_handler::{handle_method, JsonLineHost};
use ostap::services::onboarding_store::OnboardingStore;
use ostap::services::settings_engine::SettingsEngine;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// Single writer so responses and events never interleave mid-line.
async fn write_lines(mut rx: mpsc::UnboundedReceiver<Value>) {
    let mut stdout = tokio::io::stdout();
    while let Some(line) = rx.recv().await {
        let mut text = line.to_string();
        text.push('\n');
        if stdout.write_all(text.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            break;
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init(None);

    let settings = SettingsEngine::new(None).load_or_default();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_lines(out_rx));

    let host = Arc::new(JsonLineHost::new(out_tx.clone()));
    let shell = Shell::new(TabStore::new(), &settings, OnboardingStore::new(None));
    let (handle, shell_task) = shell.spawn(host);

    // Forward every published view as a session event.
    let mut views = handle.subscribe();
    let view_out = out_tx.clone();
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if view_out.send(json!({"event": "session", "view": view})).is_err() {
                break;
            }
        }
    });

    let _ = out_tx.send(json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    info!("rpc server ready");

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let _ = out_tx.send(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let _ = out_tx.send(json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let method = req.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(Value::Null);

        if method == "shutdown" {
            let _ = out_tx.send(json!({"id": id, "result": {"ok": true}}));
            break;
        }

        let response = match handle_method(&handle, method, &params).await {
            Ok(result) => json!({"id": id, "result": result}),
            Err(e) => json!({"id": id, "error": e}),
        };
        let _ = out_tx.send(response);
    }

    let _ = handle.shutdown();
    if let Err(e) = shell_task.await {
        warn!(error = %e, "shell task ended abnormally");
    }
    drop(handle);
    drop(out_tx);
    let _ = writer.await;
}
