use uuid::Uuid;

use crate::types::intent::TabAction;
use crate::types::session::SessionSnapshot;
use crate::types::tab::{Tab, TabId, TabPatch};

/// Source of fresh tab identifiers. Implementations must never repeat an id.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> TabId;
}

/// Counter owned by the store that created it: `tab-1`, `tab-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TabId {
        self.next += 1;
        TabId::new(format!("tab-{}", self.next))
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> TabId {
        TabId::new(Uuid::new_v4().to_string())
    }
}

/// Trait defining the tab store interface.
///
/// Every operation is total: unknown ids and out-of-range indices never fail.
pub trait TabStoreTrait {
    fn add_tab(&mut self, overrides: TabPatch) -> TabId;
    fn close_tab(&mut self, tab_id: &TabId);
    fn set_active(&mut self, tab_id: &TabId);
    fn update_tab(&mut self, tab_id: &TabId, patch: TabPatch);
    fn reorder_tab(&mut self, from_index: usize, to_index: usize);
    fn apply(&mut self, action: TabAction) -> Option<TabId>;
    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab>;
    fn tabs(&self) -> &[Tab];
    fn active_id(&self) -> &TabId;
    fn active_tab(&self) -> &Tab;
    fn contains(&self, tab_id: &TabId) -> bool;
    fn tab_count(&self) -> usize;
    fn snapshot(&self) -> SessionSnapshot;
}

/// Single-writer container of the ordered tabs and the active tab id.
pub struct TabStore {
    tabs: Vec<Tab>,
    active_id: TabId,
    ids: Box<dyn IdGenerator>,
}

impl TabStore {
    /// Creates a store seeded with one new-tab page, using sequential ids.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::default()))
    }

    /// Creates a store seeded with one new-tab page, drawing ids from `ids`.
    pub fn with_id_generator(mut ids: Box<dyn IdGenerator>) -> Self {
        let first = Tab::with_defaults(ids.next_id(), TabPatch::default());
        Self {
            active_id: first.id.clone(),
            tabs: vec![first],
            ids,
        }
    }

    fn find_tab_index(&self, tab_id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == tab_id)
    }

    fn fresh_tab(&mut self, overrides: TabPatch) -> Tab {
        Tab::with_defaults(self.ids.next_id(), overrides)
    }
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStoreTrait for TabStore {
    /// Appends a tab built from defaults plus `overrides` and makes it active.
    fn add_tab(&mut self, overrides: TabPatch) -> TabId {
        let tab = self.fresh_tab(overrides);
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active_id = id.clone();
        id
    }

    /// Removes a tab. Closing the active tab activates the last remaining tab;
    /// closing the only tab replaces it with a fresh new-tab page.
    fn close_tab(&mut self, tab_id: &TabId) {
        let Some(idx) = self.find_tab_index(tab_id) else {
            return;
        };
        self.tabs.remove(idx);

        if self.tabs.is_empty() {
            let tab = self.fresh_tab(TabPatch::default());
            self.active_id = tab.id.clone();
            self.tabs.push(tab);
            return;
        }

        if &self.active_id == tab_id {
            if let Some(last) = self.tabs.last() {
                self.active_id = last.id.clone();
            }
        }
    }

    fn set_active(&mut self, tab_id: &TabId) {
        if self.contains(tab_id) {
            self.active_id = tab_id.clone();
        }
    }

    fn update_tab(&mut self, tab_id: &TabId, patch: TabPatch) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| &t.id == tab_id) {
            tab.apply(patch);
        }
    }

    /// Moves the tab at `from_index` to `to_index`. Both indices are clamped
    /// to the last position.
    fn reorder_tab(&mut self, from_index: usize, to_index: usize) {
        let last = self.tabs.len() - 1;
        let from = from_index.min(last);
        let to = to_index.min(last);
        if from == to {
            return;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
    }

    /// Reducer entry point. Returns the new id for `TabAction::Add`.
    fn apply(&mut self, action: TabAction) -> Option<TabId> {
        match action {
            TabAction::Add(overrides) => return Some(self.add_tab(overrides)),
            TabAction::Close(id) => self.close_tab(&id),
            TabAction::SetActive(id) => self.set_active(&id),
            TabAction::Update(id, patch) => self.update_tab(&id, patch),
            TabAction::Reorder { from, to } => self.reorder_tab(from, to),
        }
        None
    }

    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == tab_id)
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn active_id(&self) -> &TabId {
        &self.active_id
    }

    /// The active tab, or the first tab should the active id ever dangle.
    fn active_tab(&self) -> &Tab {
        self.get_tab(&self.active_id).unwrap_or(&self.tabs[0])
    }

    fn contains(&self, tab_id: &TabId) -> bool {
        self.find_tab_index(tab_id).is_some()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: self.tabs.clone(),
            active_id: self.active_id.clone(),
        }
    }
}
