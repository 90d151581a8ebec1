use ostap::managers::tab_store::{IdGenerator, TabStore, TabStoreTrait};
use ostap::types::intent::TabAction;
use ostap::types::tab::{TabId, TabPatch, DEFAULT_TAB_TITLE, NEW_TAB_LOCATION};

/// Store with `n` tabs in total; returns their ids in order.
fn store_with(n: usize) -> (TabStore, Vec<TabId>) {
    let mut store = TabStore::new();
    let mut ids = vec![store.active_id().clone()];
    for _ in 1..n {
        ids.push(store.add_tab(TabPatch::default()));
    }
    (store, ids)
}

fn order(store: &TabStore) -> Vec<TabId> {
    store.tabs().iter().map(|t| t.id.clone()).collect()
}

#[test]
fn test_new_store_has_one_sentinel_tab() {
    let store = TabStore::new();
    assert_eq!(store.tab_count(), 1);
    let tab = store.active_tab();
    assert_eq!(tab.location, NEW_TAB_LOCATION);
    assert_eq!(tab.title, DEFAULT_TAB_TITLE);
    assert!(tab.favicon.is_none());
    assert_eq!(&tab.id, store.active_id());
}

#[test]
fn test_add_then_close_returns_to_first_tab() {
    let mut store = TabStore::new();
    let t1 = store.active_id().clone();
    let t2 = store.add_tab(TabPatch::default());
    assert_eq!(store.tab_count(), 2);
    assert_eq!(store.active_id(), &t2);

    store.close_tab(&t2);
    assert_eq!(order(&store), vec![t1.clone()]);
    assert_eq!(store.active_id(), &t1);
}

#[test]
fn test_add_tab_applies_overrides() {
    let mut store = TabStore::new();
    let id = store.add_tab(TabPatch {
        title: Some("Docs".to_string()),
        location: Some("https://docs.rs".to_string()),
        favicon: None,
    });
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(tab.title, "Docs");
    assert_eq!(tab.location, "https://docs.rs");
    assert_eq!(store.tabs().last().unwrap().id, id);
}

#[test]
fn test_close_only_tab_synthesizes_fresh_one() {
    let mut store = TabStore::new();
    let t1 = store.active_id().clone();
    store.close_tab(&t1);
    assert_eq!(store.tab_count(), 1);
    assert_ne!(store.active_id(), &t1);
    assert!(store.active_tab().is_new_tab_page());
}

#[test]
fn test_close_active_activates_last_remaining() {
    let (mut store, ids) = store_with(4);
    store.set_active(&ids[1]);
    store.close_tab(&ids[1]);
    assert_eq!(store.active_id(), &ids[3]);
}

#[test]
fn test_close_inactive_keeps_active() {
    let (mut store, ids) = store_with(3);
    store.set_active(&ids[0]);
    store.close_tab(&ids[2]);
    assert_eq!(store.active_id(), &ids[0]);
    assert_eq!(order(&store), vec![ids[0].clone(), ids[1].clone()]);
}

#[test]
fn test_close_unknown_is_noop() {
    let (mut store, ids) = store_with(2);
    let before = store.snapshot();
    store.close_tab(&TabId::from("missing"));
    assert_eq!(store.snapshot(), before);
    assert_eq!(order(&store), ids);
}

#[test]
fn test_set_active_unknown_is_noop() {
    let (mut store, ids) = store_with(2);
    store.set_active(&TabId::from("missing"));
    assert_eq!(store.active_id(), &ids[1]);
}

#[test]
fn test_update_merges_fields() {
    let mut store = TabStore::new();
    let id = store.active_id().clone();
    store.update_tab(&id, TabPatch::location("https://a.com"));
    store.update_tab(&id, TabPatch::title("A"));
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(tab.location, "https://a.com");
    assert_eq!(tab.title, "A");
}

#[test]
fn test_update_unknown_is_noop() {
    let mut store = TabStore::new();
    let before = store.snapshot();
    store.update_tab(&TabId::from("ghost"), TabPatch::title("boo"));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_reorder_moves_tab() {
    let (mut store, ids) = store_with(3);
    store.reorder_tab(0, 2);
    assert_eq!(order(&store), vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    assert_eq!(store.active_id(), &ids[2]);
}

#[test]
fn test_reorder_same_index_is_noop() {
    let (mut store, ids) = store_with(3);
    store.reorder_tab(1, 1);
    assert_eq!(order(&store), ids);
}

#[test]
fn test_reorder_out_of_range_clamps() {
    let (mut store, ids) = store_with(3);
    store.reorder_tab(10, 0);
    assert_eq!(order(&store), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
}

#[test]
fn test_apply_reducer_actions() {
    let mut store = TabStore::new();
    let t1 = store.active_id().clone();
    let t2 = store.apply(TabAction::Add(TabPatch::default())).unwrap();
    assert!(store.apply(TabAction::SetActive(t1.clone())).is_none());
    assert_eq!(store.active_id(), &t1);
    store.apply(TabAction::Update(t2.clone(), TabPatch::title("Two")));
    assert_eq!(store.get_tab(&t2).unwrap().title, "Two");
    store.apply(TabAction::Reorder { from: 1, to: 0 });
    assert_eq!(store.tabs()[0].id, t2);
    store.apply(TabAction::Close(t2));
    assert_eq!(order(&store), vec![t1]);
}

#[test]
fn test_snapshot_reflects_state() {
    let (store, ids) = store_with(2);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.active_id, ids[1]);
    assert_eq!(snapshot.active_tab().unwrap().id, ids[1]);
    assert!(snapshot.contains(&ids[0]));
}

struct FixedIds(Vec<&'static str>);

impl IdGenerator for FixedIds {
    fn next_id(&mut self) -> TabId {
        TabId::from(self.0.remove(0))
    }
}

#[test]
fn test_injected_id_generator() {
    let mut store = TabStore::with_id_generator(Box::new(FixedIds(vec!["home", "second"])));
    assert_eq!(store.active_id().as_str(), "home");
    assert_eq!(store.add_tab(TabPatch::default()).as_str(), "second");
}
