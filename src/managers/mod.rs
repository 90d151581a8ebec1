// Ostap state managers
// Managers handle in-memory state: the tab session and shortcut bindings.

pub mod shortcut_manager;
pub mod tab_store;
