//! Request sequencing.
//!
//! Every outgoing request gets a monotonically increasing id. A slice keeps
//! the id of the request it is waiting for; completions carrying any other id
//! are stale and must not touch state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Default)]
pub struct RequestSeq {
    next: u64,
}

impl RequestSeq {
    pub fn next_id(&mut self) -> RequestId {
        self.next = self.next.wrapping_add(1);
        RequestId(self.next)
    }
}

/// The in-flight request a slice is waiting for, if any.
#[derive(Debug, Default, Clone)]
pub struct RequestState {
    pub active: Option<RequestId>,
}

impl RequestState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    /// Starts waiting for `id`, superseding whatever was in flight.
    pub fn start(&mut self, id: RequestId) {
        self.active = Some(id);
    }

    /// Returns true (and stops waiting) only if `id` is the awaited request.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        let ok = self.is_active(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
