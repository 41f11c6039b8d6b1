use std::{
    collections::HashMap,
    sync::{Condvar, Mutex},
    time::Duration,
};

use linstor_proto::ReplyBody;

/// How often a blocked `wait` re-checks the table even without a wake-up.
/// Exists only to bound how long a `disconnect()` broadcast can take to be
/// observed; it is not a per-call timeout (spec §4.D, §5: "no per-call
/// timeout beyond the socket's idle behavior — disconnection is the
/// completion signal for stuck calls").
const POLL_INTERVAL: Duration = Duration::from_secs(2);

struct State {
    replies: HashMap<u64, Vec<ReplyBody>>,
    live: bool,
}

/// Correlates outstanding requests to the bodies their `msg_id` eventually
/// collects (§4.C, §4.D).
///
/// A request can receive more than one reply sub-message across more than
/// one frame before it is complete — the table accumulates them under the
/// same `msg_id` until the caller's wait is satisfied or the session ends.
pub struct ReplyTable {
    state: Mutex<State>,
    cond: Condvar,
}

impl Default for ReplyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyTable {
    pub fn new() -> Self {
        Self { state: Mutex::new(State { replies: HashMap::new(), live: true }), cond: Condvar::new() }
    }

    /// Registers a `msg_id` as awaiting replies. Must be called before the
    /// request is sent so the receiver thread can never deposit into a slot
    /// nobody is watching for yet.
    pub fn register(&self, msg_id: u64) {
        self.state.lock().unwrap().replies.entry(msg_id).or_default();
    }

    /// Called by the receiver thread when a frame addressed to `msg_id`
    /// arrives. Wakes any waiter.
    pub fn deposit(&self, msg_id: u64, body: ReplyBody) {
        let mut state = self.state.lock().unwrap();
        if let Some(replies) = state.replies.get_mut(&msg_id) {
            replies.push(body);
            self.cond.notify_all();
        }
    }

    /// Blocks until at least one reply has been deposited for `msg_id` or
    /// the session is torn down (`disconnect`/`abort_all`). Removes and
    /// returns whatever accumulated; an empty vec means the session ended
    /// with nothing ever deposited (§8 scenario S4). There is no per-call
    /// timeout (§4.D, §5) — the wait re-checks every `POLL_INTERVAL` only
    /// so a disconnect broadcast is observed promptly even if it is
    /// somehow missed, not to give up on the call.
    pub fn wait(&self, msg_id: u64) -> Vec<ReplyBody> {
        let mut state = self.state.lock().unwrap();
        loop {
            match state.replies.get(&msg_id) {
                Some(replies) if !replies.is_empty() => return state.replies.remove(&msg_id).unwrap_or_default(),
                _ if !state.live => return state.replies.remove(&msg_id).unwrap_or_default(),
                _ => {}
            }
            let (guard, _) = self.cond.wait_timeout(state, POLL_INTERVAL).unwrap();
            state = guard;
        }
    }

    /// Whether the session is still considered connected (§7 `connected`
    /// predicate).
    pub fn is_live(&self) -> bool {
        self.state.lock().unwrap().live
    }

    /// Drops a registration the caller no longer cares about, e.g. after a
    /// `wait` returns a partial reply deemed sufficient.
    pub fn forget(&self, msg_id: u64) {
        self.state.lock().unwrap().replies.remove(&msg_id);
    }

    /// Called once by the receiver thread when the connection drops or a
    /// protocol violation ends the session (§4.G step 4, §8 scenario S4):
    /// every outstanding waiter is woken with whatever it has, which may be
    /// nothing.
    pub fn abort_all(&self) {
        self.state.lock().unwrap().live = false;
        self.cond.notify_all();
    }
}
