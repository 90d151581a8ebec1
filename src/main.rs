//! Ostap — a minimal desktop browser shell.
//!
//! Entry point: opens the browser window when built with the `gui` feature.
//! Without it, runs a console demo of the tab session against a host that
//! only logs the surface commands it receives.

#[cfg(feature = "gui")]
fn main() {
    ostap::logging::init(None);
    ostap::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    ostap::logging::init(None);

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Ostap v{} — Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("  ❌ could not start runtime: {}", e);
            std::process::exit(1);
        }
    };
    runtime.block_on(demo::run());

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Tab session demonstrated. Build with --features gui for the window.");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
mod demo {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use ostap::app::{Shell, ShellHandle};
    use ostap::managers::tab_store::TabStore;
    use ostap::services::onboarding_store::OnboardingStore;
    use ostap::services::settings_engine::SettingsEngine;
    use ostap::surface::SurfaceHost;
    use ostap::types::errors::SurfaceError;
    use ostap::types::geometry::SurfaceRect;
    use ostap::types::intent::HostEvent;
    use ostap::types::tab::{TabId, TabPatch};

    /// Prints each command and reports the page as loaded right away.
    struct ConsoleHost {
        events: tokio::sync::OnceCell<ostap::surface::HostEventSender>,
    }

    #[async_trait]
    impl SurfaceHost for ConsoleHost {
        async fn navigate(&self, tab_id: &TabId, location: &str, rect: SurfaceRect) -> Result<(), SurfaceError> {
            println!("     → navigate {} to {} at {}x{}", tab_id, location, rect.width, rect.height);
            if let Some(events) = self.events.get() {
                let _ = events.send(HostEvent::TabUpdated {
                    tab_id: tab_id.clone(),
                    location: Some(location.to_string()),
                    title: Some(format!("Page at {}", location)),
                });
            }
            Ok(())
        }

        async fn resize(&self, tab_id: &TabId, rect: SurfaceRect) -> Result<(), SurfaceError> {
            println!("     → resize {} to {}x{}", tab_id, rect.width, rect.height);
            Ok(())
        }

        async fn close(&self, tab_id: &TabId) -> Result<(), SurfaceError> {
            println!("     → close {}", tab_id);
            Ok(())
        }

        async fn hide_all(&self) -> Result<(), SurfaceError> {
            println!("     → hide all");
            Ok(())
        }
    }

    fn section(name: &str) {
        println!("───────────────────────────────────────────────────────────────");
        println!("  📦 {}", name);
        println!("───────────────────────────────────────────────────────────────");
    }

    async fn settle(handle: &ShellHandle) {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let view = handle.view();
        for tab in &view.session.tabs {
            let marker = if tab.id == view.session.active_id { "*" } else { " " };
            println!("   {} [{}] {} — {}", marker, tab.id, tab.title, tab.location);
        }
        println!("     loading: {}", view.loading);
        println!();
    }

    pub async fn run() {
        let settings = SettingsEngine::new(None).load_or_default();
        let host = Arc::new(ConsoleHost {
            events: tokio::sync::OnceCell::new(),
        });
        // Demo state lives in a scratch dir so the real onboarding flag stays untouched.
        let scratch = std::env::temp_dir().join("ostap-demo");
        let onboarding = OnboardingStore::new(Some(scratch.join("local_storage.json")));
        let shell = Shell::new(TabStore::new(), &settings, onboarding);
        let (handle, task) = shell.spawn(host.clone());
        let _ = host.events.set(handle.host_events());

        section("Startup");
        settle(&handle).await;

        section("Layout + Navigate");
        let _ = handle.layout_changed(SurfaceRect::new(240.0, 48.0, 1040.0, 752.0));
        let _ = handle.navigate("example.com");
        settle(&handle).await;

        section("Second Tab + Search");
        if let Ok(id) = handle
            .add_tab(TabPatch {
                title: None,
                location: Some("https://rust-lang.org".to_string()),
                favicon: None,
            })
            .await
        {
            println!("   added {}", id);
        }
        settle(&handle).await;
        let _ = handle.navigate("tab session coordination");
        settle(&handle).await;

        section("Switch Back + Close");
        let first = handle.view().session.tabs[0].id.clone();
        let _ = handle.select_tab(first.clone());
        settle(&handle).await;
        let _ = handle.close_tab(first);
        settle(&handle).await;

        section("Shortcut");
        let _ = handle.shortcut("new-tab");
        settle(&handle).await;

        let _ = handle.shutdown();
        let _ = task.await;
    }
}
