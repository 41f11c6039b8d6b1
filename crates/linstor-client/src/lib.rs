//! Synchronous client for a distributed block-storage cluster controller:
//! connect/handshake/disconnect lifecycle, the request/reply session, and
//! one thin method per api call (§4.G, §4.H).
//!
//! The wire format and message bodies live in `linstor-proto`; this crate
//! owns sockets, threads, and the reply-correlation machinery built on top
//! of them.

mod error;
mod msg_id;
mod ops;
mod receiver;
mod reply_table;
mod session;
mod transport;
mod uri;

pub use error::LinstorError;
pub use session::Session;
pub use uri::ControllerUri;

pub use linstor_proto::{ApiCallResponse, ReplyBody};
