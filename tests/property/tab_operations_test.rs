//! Property-based tests for Tab Store operations.
//!
//! For any sequence of add/close/select/update/reorder actions the session
//! stays non-empty, the active id always names a tab, and ids are never
//! repeated. Close and reorder are also checked against their exact rules.

use std::collections::HashSet;

use ostap::managers::tab_store::{TabStore, TabStoreTrait};
use ostap::types::intent::TabAction;
use ostap::types::tab::{TabId, TabPatch};
use proptest::prelude::*;

/// Operations on the store; indices are taken modulo the current tab count
/// (`Reorder` uses them raw so out-of-range values get exercised).
#[derive(Debug, Clone)]
enum TabOp {
    Add,
    Close(usize),
    CloseUnknown,
    Select(usize),
    Update(usize, String),
    Reorder(usize, usize),
}

fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(TabOp::Add),
            3 => (0..20usize).prop_map(TabOp::Close),
            1 => Just(TabOp::CloseUnknown),
            2 => (0..20usize).prop_map(TabOp::Select),
            1 => (0..20usize, "[a-z]{1,8}").prop_map(|(i, t)| TabOp::Update(i, t)),
            2 => (0..25usize, 0..25usize).prop_map(|(f, t)| TabOp::Reorder(f, t)),
        ],
        1..80,
    )
}

fn ids(store: &TabStore) -> Vec<TabId> {
    store.tabs().iter().map(|t| t.id.clone()).collect()
}

fn pick(store: &TabStore, idx: usize) -> TabId {
    store.tabs()[idx % store.tab_count()].id.clone()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn session_invariants_hold(ops in arb_tab_ops()) {
        let mut store = TabStore::new();
        let mut issued: HashSet<TabId> = ids(&store).into_iter().collect();

        for op in ops {
            let before = ids(&store);
            let active_before = store.active_id().clone();

            match op {
                TabOp::Add => {
                    let id = store.apply(TabAction::Add(TabPatch::default())).unwrap();
                    prop_assert!(issued.insert(id.clone()), "id {} reused", id);
                    prop_assert_eq!(store.active_id(), &id);
                    prop_assert_eq!(&store.tabs().last().unwrap().id, &id);
                }
                TabOp::Close(idx) => {
                    let target = pick(&store, idx);
                    store.apply(TabAction::Close(target.clone()));
                    prop_assert!(!store.contains(&target));
                    if before.len() == 1 {
                        let fresh = store.active_id().clone();
                        prop_assert!(issued.insert(fresh.clone()), "id {} reused", fresh);
                        prop_assert!(store.active_tab().is_new_tab_page());
                    } else if target == active_before {
                        prop_assert_eq!(store.active_id(), &store.tabs().last().unwrap().id);
                    } else {
                        prop_assert_eq!(store.active_id(), &active_before);
                    }
                }
                TabOp::CloseUnknown => {
                    store.apply(TabAction::Close(TabId::from("never-issued")));
                    prop_assert_eq!(ids(&store), before.clone());
                    prop_assert_eq!(store.active_id(), &active_before);
                }
                TabOp::Select(idx) => {
                    let target = pick(&store, idx);
                    store.apply(TabAction::SetActive(target.clone()));
                    prop_assert_eq!(store.active_id(), &target);
                }
                TabOp::Update(idx, title) => {
                    let target = pick(&store, idx);
                    store.apply(TabAction::Update(target.clone(), TabPatch::title(title.clone())));
                    prop_assert_eq!(&store.get_tab(&target).unwrap().title, &title);
                    prop_assert_eq!(ids(&store), before.clone());
                }
                TabOp::Reorder(from, to) => {
                    let last = before.len() - 1;
                    let moved = before[from.min(last)].clone();
                    store.apply(TabAction::Reorder { from, to });
                    let after = ids(&store);
                    let mut sorted_before = before.clone();
                    let mut sorted_after = after.clone();
                    sorted_before.sort();
                    sorted_after.sort();
                    prop_assert_eq!(sorted_before, sorted_after);
                    prop_assert_eq!(&after[to.min(last)], &moved);
                    prop_assert_eq!(store.active_id(), &active_before);
                }
            }

            prop_assert!(store.tab_count() >= 1);
            prop_assert!(store.contains(store.active_id()));
            let unique: HashSet<&TabId> = store.tabs().iter().map(|t| &t.id).collect();
            prop_assert_eq!(unique.len(), store.tab_count());
        }
    }
}
