//! Property-based tests for the session JSON the chrome and RPC peers read.
//!
//! Whatever state the store reaches, the serialized view names its active
//! tab, uses camelCase keys and deserializes back to the same value.

use ostap::managers::tab_store::{TabStore, TabStoreTrait};
use ostap::types::intent::HostEvent;
use ostap::types::session::{SessionSnapshot, ShellView};
use ostap::types::tab::{TabPatch, NEW_TAB_LOCATION};
use proptest::prelude::*;
use serde_json::{json, Value};

type TabSeed = (Option<String>, Option<String>, usize);

fn arb_seeds() -> impl Strategy<Value = Vec<TabSeed>> {
    prop::collection::vec(
        (
            prop::option::of("[A-Za-z ]{1,12}"),
            prop::option::of("https://[a-z]{1,8}\\.com"),
            0..4usize,
        ),
        0..8,
    )
}

/// Adds a tab per seed; a zero in the last slot also closes the first tab.
fn build_store(seeds: Vec<TabSeed>) -> TabStore {
    let mut store = TabStore::new();
    for (title, location, close_at) in seeds {
        store.add_tab(TabPatch {
            title,
            location,
            favicon: None,
        });
        if close_at == 0 {
            let first = store.tabs()[0].id.clone();
            store.close_tab(&first);
        }
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn view_json_names_active_tab(seeds in arb_seeds(), loading in any::<bool>()) {
        let store = build_store(seeds);
        let view = ShellView {
            session: store.snapshot(),
            loading,
            onboarding_completed: false,
        };
        let value = serde_json::to_value(&view).unwrap();

        let active = value["session"]["activeId"].as_str().unwrap().to_string();
        let tabs = value["session"]["tabs"].as_array().unwrap();
        prop_assert!(tabs.iter().any(|t| t["id"] == active.as_str()));
        prop_assert_eq!(&value["loading"], &Value::Bool(loading));
        prop_assert!(value.get("onboardingCompleted").is_some());

        let back: ShellView = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back, view);
    }
}

#[test]
fn snapshot_layout() {
    let store = TabStore::new();
    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(
        value,
        json!({
            "tabs": [{"id": "tab-1", "title": "New Tab", "location": NEW_TAB_LOCATION, "favicon": null}],
            "activeId": "tab-1"
        })
    );
    let back: SessionSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(back, store.snapshot());
}

#[test]
fn host_event_accepts_url_alias() {
    let event: HostEvent =
        serde_json::from_value(json!({"event": "tabUpdated", "tabId": "tab-3", "url": "https://a.com"}))
            .unwrap();
    assert_eq!(
        event,
        HostEvent::TabUpdated {
            tab_id: "tab-3".into(),
            location: Some("https://a.com".to_string()),
            title: None,
        }
    );
}
