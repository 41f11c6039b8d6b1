use thiserror::Error;

/// Errors that can arise while decoding frames or sub-messages (§7).
///
/// Framing errors are always fatal to the session they occurred on; there is
/// no way to resynchronize a stream once a length field has been
/// misinterpreted.
#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("malformed outer header: {0}")]
    MalformedHeader(&'static str),
    #[error("malformed inner payload: {0}")]
    MalformedPayload(&'static str),
    #[error("failed to (de)serialize message body: {0}")]
    Codec(#[from] bitcode::Error),
}
