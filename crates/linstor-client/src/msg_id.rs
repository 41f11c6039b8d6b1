use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing `msg_id` allocator (§4.C), one per session.
///
/// Starts at 1 so `0` stays free for callers that want a sentinel.
#[derive(Debug)]
pub struct MsgIdAllocator(AtomicU64);

impl Default for MsgIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgIdAllocator {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}
