use thiserror::Error;

/// Everything that can go wrong with a session (§7).
///
/// Errors during `connect` surface synchronously to the caller. Errors in
/// the receiver loop are terminal for the session instead: the socket is
/// closed, waiters are released with empty reply lists, and subsequent
/// `send` calls fail with `NotConnected`.
#[derive(Error, Debug)]
pub enum LinstorError {
    #[error("invalid controller uri: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("tls error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("handshake failed: {0}")]
    Handshake(String),

    #[error(transparent)]
    Malformed(#[from] linstor_proto::ProtoError),

    #[error("timed out connecting after {0:?}")]
    Timeout(std::time::Duration),

    #[error("session is not connected")]
    NotConnected,

    #[error("call {0} got no reply before the session ended")]
    EmptyReply(&'static str),

    #[error("call {0} got a reply of the wrong kind")]
    UnexpectedReply(&'static str),
}
