use crate::types::geometry::SurfaceRect;
use crate::types::tab::TabId;

/// Coalesces resize requests: one resize in flight, plus a single pending
/// slot that later requests overwrite.
#[derive(Debug, Default)]
pub struct ResizeGate {
    in_flight: bool,
    pending: Option<(TabId, SurfaceRect)>,
}

impl ResizeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resize to send now, or `None` if one is already in flight
    /// and this request was parked in the pending slot.
    pub fn request(&mut self, tab_id: TabId, rect: SurfaceRect) -> Option<(TabId, SurfaceRect)> {
        if self.in_flight {
            self.pending = Some((tab_id, rect));
            None
        } else {
            self.in_flight = true;
            Some((tab_id, rect))
        }
    }

    /// Marks the in-flight resize finished and returns the parked one, which
    /// becomes the new in-flight resize.
    pub fn complete(&mut self) -> Option<(TabId, SurfaceRect)> {
        match self.pending.take() {
            Some(next) => Some(next),
            None => {
                self.in_flight = false;
                None
            }
        }
    }

    /// Drops a parked resize for `tab_id`.
    pub fn discard(&mut self, tab_id: &TabId) {
        if self.pending.as_ref().is_some_and(|(id, _)| id == tab_id) {
            self.pending = None;
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending(&self) -> Option<&(TabId, SurfaceRect)> {
        self.pending.as_ref()
    }
}
