//! Rendering-surface coordination.
//!
//! Keeps exactly one host-managed rendering surface bound to the active tab:
//! navigation is debounced per tab, resizes are coalesced, every host command
//! goes through a single FIFO dispatcher, and host status events are folded
//! back into the tab store.

pub mod binding;
pub mod coordinator;
pub mod debounce;
pub mod dispatcher;
pub mod host;
pub mod resize_gate;

pub use binding::{Binding, BindingState};
pub use coordinator::{CoordinatorConfig, SurfaceCoordinator};
pub use debounce::{DebounceTicket, Debouncer};
pub use dispatcher::{spawn_dispatcher, CommandOutcome};
pub use host::{HostEventSender, SurfaceCommand, SurfaceHost};
pub use resize_gate::ResizeGate;
