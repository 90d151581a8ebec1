use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled firing. A ticket whose generation no longer
/// matches the key's slot was superseded or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTicket<K> {
    pub key: K,
    pub generation: u64,
}

struct Slot {
    generation: u64,
    handle: JoinHandle<()>,
}

/// At most one pending delayed task per key. Scheduling again for a key
/// aborts the previous task, so only the latest request fires.
///
/// Firings are delivered as tickets on a channel rather than run in place, so
/// the owner handles them on its own thread of control. A ticket may already
/// sit in the channel when its task is cancelled; `complete` rejects it.
pub struct Debouncer<K> {
    slots: HashMap<K, Slot>,
    next_generation: u64,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Cancels any pending firing for `key` and schedules a new one after `delay`.
    /// Must be called inside a tokio runtime.
    pub fn schedule(
        &mut self,
        key: K,
        delay: Duration,
        fire: &mpsc::UnboundedSender<DebounceTicket<K>>,
    ) -> DebounceTicket<K> {
        self.cancel(&key);
        self.next_generation += 1;
        let ticket = DebounceTicket {
            key: key.clone(),
            generation: self.next_generation,
        };

        let fire = fire.clone();
        let sent = ticket.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fire.send(sent);
        });

        self.slots.insert(
            key,
            Slot {
                generation: ticket.generation,
                handle,
            },
        );
        ticket
    }

    /// True if `ticket` is the latest firing scheduled for its key.
    pub fn is_current(&self, ticket: &DebounceTicket<K>) -> bool {
        self.slots
            .get(&ticket.key)
            .is_some_and(|slot| slot.generation == ticket.generation)
    }

    /// Consumes a fired ticket. Returns false for superseded or cancelled tickets.
    pub fn complete(&mut self, ticket: &DebounceTicket<K>) -> bool {
        if self.is_current(ticket) {
            self.slots.remove(&ticket.key);
            true
        } else {
            false
        }
    }

    /// Cancels the pending firing for `key`, if any.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(slot) => {
                slot.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.handle.abort();
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.slots.len()
    }
}

impl<K> Default for Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.handle.abort();
        }
    }
}
