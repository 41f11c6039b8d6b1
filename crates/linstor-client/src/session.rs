use std::{
    io::{Read, Write},
    sync::{Arc, Mutex},
    time::Duration,
};

use linstor_proto::{consts, registry, ReplyBody};
use tracing::{debug, info};

use crate::{
    error::LinstorError, msg_id::MsgIdAllocator, receiver::Receiver, reply_table::ReplyTable, transport::Transport,
    uri,
};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A live connection to a controller (§4.G).
///
/// Owns the transport, the background receiver thread, the `msg_id`
/// allocator, and the reply table the receiver deposits into. Not `Clone` —
/// share one across threads behind an `Arc<Session>`; every public method
/// takes `&self`.
pub struct Session {
    transport: Arc<Mutex<Transport>>,
    replies: Arc<ReplyTable>,
    msg_ids: MsgIdAllocator,
    receiver: Receiver,
    peer: String,
    api_version: i64,
}

impl Session {
    /// Connects to `uri`, performs the blocking API-version handshake, and
    /// spawns the background receiver (§4.G steps 1-5).
    pub fn connect(uri: &str) -> Result<Self, LinstorError> {
        Self::connect_with_timeout(uri, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn connect_with_timeout(uri: &str, connect_timeout: Duration) -> Result<Self, LinstorError> {
        let target = self::uri::parse(uri)?;
        let mut transport = Transport::connect(&target, connect_timeout)?;
        transport.set_read_timeout(Some(connect_timeout))?;

        let version = read_api_version_blocking(&mut transport, connect_timeout)?;
        info!(host = %target.host, port = target.port, tls = target.tls, version, "connected to controller");

        let transport = Arc::new(Mutex::new(transport));
        let replies = Arc::new(ReplyTable::new());
        let receiver = Receiver::spawn(Arc::clone(&transport), Arc::clone(&replies));

        Ok(Self {
            transport,
            replies,
            msg_ids: MsgIdAllocator::new(),
            receiver,
            peer: format!("{}:{}", target.host, target.port),
            api_version: version,
        })
    }

    /// The version the controller advertised during the handshake (§3
    /// Session state, §8 scenario S1).
    pub fn api_version(&self) -> i64 {
        self.api_version
    }

    /// Whether the session still believes its socket is usable. Goes false
    /// once the receiver thread observes a close, EOF, or protocol
    /// violation; callers use this to tell "call failed because the
    /// session died" apart from "call legitimately returned nothing" (§7).
    pub fn connected(&self) -> bool {
        self.replies.is_live()
    }

    /// Sends a request and does not wait for a reply (§4.D fire-and-forget
    /// calls such as list requests a caller intends to poll for later).
    pub fn send(&self, api_call: &str, body: Option<Vec<u8>>) -> Result<u64, LinstorError> {
        if !self.connected() {
            return Err(LinstorError::NotConnected);
        }
        let msg_id = self.msg_ids.next();
        self.replies.register(msg_id);
        let frame = registry::build_frame(api_call, msg_id, body)?;
        self.write_frame(&frame)?;
        Ok(msg_id)
    }

    /// Sends a request and blocks for its reply (§4.D, §8 scenarios S2-S3).
    ///
    /// There is no per-call timeout: per §4.G/§5, disconnection is the only
    /// completion signal for a request the controller never answers. A
    /// caller that needs an upper bound should race this against its own
    /// timer.
    pub fn call(&self, api_call: &str, body: Option<Vec<u8>>) -> Result<Vec<ReplyBody>, LinstorError> {
        let msg_id = self.send(api_call, body)?;
        Ok(self.replies.wait(msg_id))
    }

    fn write_frame(&self, frame: &[u8]) -> Result<(), LinstorError> {
        let mut guard = self.transport.lock().unwrap();
        guard.write_all(frame)?;
        guard.flush()?;
        Ok(())
    }

    /// Closes the connection (§4.G step 6). Outstanding `call`s in other
    /// threads are released by the receiver thread observing the shutdown
    /// and aborting the reply table; they do not receive drained replies.
    pub fn disconnect(&self) {
        debug!(peer = %self.peer, "disconnecting");
        self.receiver.stop();
        let _ = self.transport.lock().unwrap().shutdown();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Reads the fixed `ApiVersion` handshake frame with the transport's read
/// timeout set to `connect_timeout` for the duration of the handshake window
/// (§4.G step 4, §6, §7 `Timeout`).
fn read_api_version_blocking(transport: &mut Transport, connect_timeout: Duration) -> Result<i64, LinstorError> {
    let mut header = [0u8; linstor_proto::frame::HEADER_SIZE];
    read_exact_or_eof(transport, &mut header, connect_timeout)?;
    let payload_len = linstor_proto::frame::decode_payload_len(&header)? as usize;

    let mut payload = vec![0u8; payload_len];
    read_exact_or_eof(transport, &mut payload, connect_timeout)?;

    let submessages = linstor_proto::frame::split_submessages(&payload)?;
    let (header_bytes, bodies) = submessages
        .split_first()
        .ok_or_else(|| LinstorError::Handshake("empty handshake frame".into()))?;

    let msg_header = registry::parse_header(header_bytes)?;
    if msg_header.api_call != consts::API_VERSION {
        return Err(LinstorError::Handshake(format!(
            "expected {} as first frame, got {}",
            consts::API_VERSION,
            msg_header.api_call
        )));
    }

    let body = bodies
        .first()
        .ok_or_else(|| LinstorError::Handshake("ApiVersion frame carried no body".into()))?;
    let version = registry::parse_api_version(body)?;
    Ok(version.version)
}

fn read_exact_or_eof(transport: &mut Transport, buf: &mut [u8], connect_timeout: Duration) -> Result<(), LinstorError> {
    transport.read_exact(buf).map_err(|err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => LinstorError::Handshake("connection closed during handshake".into()),
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => LinstorError::Timeout(connect_timeout),
        _ => LinstorError::Network(err),
    })
}
