use std::{
    io::{ErrorKind, Read},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::JoinHandle,
    time::Duration,
};

use linstor_proto::{consts, frame, registry};
use tracing::{debug, error, trace, warn};

use crate::{reply_table::ReplyTable, transport::Transport};

/// How long a single blocking read blocks for before the receiver checks
/// `running` and re-acquires the transport lock. Keeps a `disconnect()`
/// call from blocking behind an idle read.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Accumulates bytes for one frame: first the fixed-size header, then
/// exactly `payload_len` bytes of varint-delimited sub-messages (§4.A, §4.B).
///
/// Structurally grounded in the header-then-payload accumulate state machine
/// of a non-blocking TCP reader, adapted here to blocking reads with a
/// timeout instead of mio readiness events, since `native_tls::TlsStream`
/// cannot be polled directly.
enum RxState {
    Header { buf: Vec<u8> },
    Payload { payload_len: usize, buf: Vec<u8> },
}

impl Default for RxState {
    fn default() -> Self {
        Self::Header { buf: Vec::with_capacity(frame::HEADER_SIZE) }
    }
}

/// Drives one session's receive side on a dedicated background thread
/// (§4.G step 3). Reads frames off the transport, parses them via the
/// registry, and deposits reply bodies into the shared `ReplyTable`. On EOF
/// or any protocol violation it aborts every outstanding waiter and exits.
pub struct Receiver {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl Receiver {
    pub fn spawn(transport: Arc<Mutex<Transport>>, replies: Arc<ReplyTable>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let handle = std::thread::spawn(move || run(transport, replies, thread_running));
        Self { handle: Some(handle), running }
    }

    /// Signals the loop to stop. Does not join; `Session::disconnect`
    /// shuts the socket down first so a blocked read unblocks promptly.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for Receiver {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(transport: Arc<Mutex<Transport>>, replies: Arc<ReplyTable>, running: Arc<AtomicBool>) {
    let mut state = RxState::default();
    let mut chunk = [0u8; 4096];

    while running.load(Ordering::SeqCst) {
        let read_result = {
            let mut guard = transport.lock().unwrap();
            if let Err(err) = guard.set_read_timeout(Some(POLL_INTERVAL)) {
                warn!(%err, "failed to set read timeout, ending receiver");
                break;
            }
            guard.read(&mut chunk)
        };

        let n = match read_result {
            Ok(0) => {
                debug!("controller closed connection");
                break;
            }
            Ok(n) => n,
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => continue,
            Err(err) => {
                warn!(%err, "transport read failed, ending receiver");
                break;
            }
        };

        let mut offset = 0;
        let mut fatal = false;
        while offset < n && !fatal {
            let (consumed, hit_fatal) = feed(&mut state, &chunk[offset..n], &replies);
            offset += consumed;
            fatal = hit_fatal;
        }
        if fatal {
            break;
        }
    }

    replies.abort_all();
}

/// Feeds as much of `bytes` as completes the current state transition,
/// returning how many bytes were consumed and whether the frame it
/// completed was a fatal protocol violation (§4.B: `API_VERSION` observed
/// again after the handshake). Called repeatedly until a chunk is fully
/// consumed so one `read()` can satisfy more than one frame.
fn feed(state: &mut RxState, bytes: &[u8], replies: &ReplyTable) -> (usize, bool) {
    match state {
        RxState::Header { buf } => {
            let need = frame::HEADER_SIZE - buf.len();
            let take = need.min(bytes.len());
            buf.extend_from_slice(&bytes[..take]);
            if buf.len() == frame::HEADER_SIZE {
                match frame::decode_payload_len(buf) {
                    Ok(payload_len) => {
                        *state = RxState::Payload { payload_len: payload_len as usize, buf: Vec::new() };
                    }
                    Err(err) => {
                        warn!(%err, "malformed frame header, resyncing");
                        *state = RxState::default();
                    }
                }
            }
            (take, false)
        }
        RxState::Payload { payload_len, buf } => {
            let need = *payload_len - buf.len();
            let take = need.min(bytes.len());
            buf.extend_from_slice(&bytes[..take]);
            let fatal = if buf.len() == *payload_len {
                let fatal = dispatch(buf, replies);
                *state = RxState::default();
                fatal
            } else {
                false
            };
            (take, fatal)
        }
    }
}

/// Parses and demultiplexes one complete frame payload. Returns `true` if
/// the frame was a fatal protocol violation that should end the session.
fn dispatch(payload: &[u8], replies: &ReplyTable) -> bool {
    let submessages = match frame::split_submessages(payload) {
        Ok(submessages) => submessages,
        Err(err) => {
            warn!(%err, "malformed frame payload, dropping frame");
            return false;
        }
    };

    let Some((header_bytes, bodies)) = submessages.split_first() else {
        warn!("empty frame, dropping");
        return false;
    };

    let header = match registry::parse_header(header_bytes) {
        Ok(header) => header,
        Err(err) => {
            warn!(%err, "malformed header sub-message, dropping frame");
            return false;
        }
    };

    if header.api_call == consts::API_VERSION {
        error!("received ApiVersion frame after handshake, ending session");
        return true;
    }

    match registry::parse_reply_body(&header.api_call, bodies) {
        Some(Ok(body)) => replies.deposit(header.msg_id, body),
        Some(Err(err)) => warn!(%err, api_call = %header.api_call, "malformed reply body, dropping frame"),
        None => trace!(api_call = %header.api_call, "unrecognized api-call tag, dropping frame"),
    }
    false
}
