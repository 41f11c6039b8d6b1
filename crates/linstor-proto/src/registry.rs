//! The message registry (§4.B): maps a reply api-call tag to the concrete
//! message type(s) its body sub-messages decode as, plus the mechanical
//! encode/decode helpers the header sub-message and request bodies share.

use serde::Serialize;

use crate::{
    consts,
    error::ProtoError,
    frame,
    messages::{
        MsgApiCallResponse, MsgApiVersion, MsgHeader, MsgLstNode, MsgLstRsc, MsgLstRscDfn, MsgLstStorPool,
        MsgLstStorPoolDfn,
    },
};

/// Wraps the generic reply envelope with the category-mask predicates
/// (§3 Reply classification mask, §6 Reply-code masking).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCallResponse(MsgApiCallResponse);

impl ApiCallResponse {
    pub fn ret_code(&self) -> u64 {
        self.0.ret_code
    }

    pub fn message_format(&self) -> Option<&str> {
        self.0.message_format.as_deref()
    }

    pub fn details_format(&self) -> Option<&str> {
        self.0.details_format.as_deref()
    }

    /// Tested first: error wins over warning and info (§3).
    pub fn is_error(&self) -> bool {
        self.ret_code() & consts::MASK_ERROR == consts::MASK_ERROR
    }

    pub fn is_warning(&self) -> bool {
        !self.is_error() && self.ret_code() & consts::MASK_WARN == consts::MASK_WARN
    }

    pub fn is_info(&self) -> bool {
        !self.is_error() && !self.is_warning() && self.ret_code() & consts::MASK_INFO == consts::MASK_INFO
    }

    /// None of error, warning, or info is set.
    pub fn is_success(&self) -> bool {
        !self.is_error() && !self.is_warning() && !self.is_info()
    }
}

/// The closed set of reply bodies a caller can receive, keyed by api-call
/// tag. `API_VERSION` is excluded — it is only ever parsed during the
/// handshake (§4.B, §4.G).
#[derive(Debug, Clone)]
pub enum ReplyBody {
    ApiCallResponses(Vec<ApiCallResponse>),
    Nodes(MsgLstNode),
    StorPoolDfns(MsgLstStorPoolDfn),
    StorPools(MsgLstStorPool),
    RscDfns(MsgLstRscDfn),
    Rscs(MsgLstRsc),
}

/// Parses the body sub-messages (everything after the header sub-message)
/// of a reply frame according to its api-call tag.
///
/// Returns `None` for a tag the registry doesn't recognize; per §4.B and §8
/// scenario S6 that is not an error — the receiver logs it and drops the
/// frame without disturbing other in-flight requests.
pub fn parse_reply_body(api_call: &str, bodies: &[&[u8]]) -> Option<Result<ReplyBody, ProtoError>> {
    Some(match api_call {
        consts::API_REPLY => parse_many::<MsgApiCallResponse>(bodies)
            .map(|replies| ReplyBody::ApiCallResponses(replies.into_iter().map(ApiCallResponse).collect())),
        consts::API_LST_NODE => parse_one::<MsgLstNode>(bodies).map(ReplyBody::Nodes),
        consts::API_LST_STOR_POOL_DFN => parse_one::<MsgLstStorPoolDfn>(bodies).map(ReplyBody::StorPoolDfns),
        consts::API_LST_STOR_POOL => parse_one::<MsgLstStorPool>(bodies).map(ReplyBody::StorPools),
        consts::API_LST_RSC_DFN => parse_one::<MsgLstRscDfn>(bodies).map(ReplyBody::RscDfns),
        consts::API_LST_RSC => parse_one::<MsgLstRsc>(bodies).map(ReplyBody::Rscs),
        _ => return None,
    })
}

fn parse_many<T: for<'de> serde::Deserialize<'de>>(bodies: &[&[u8]]) -> Result<Vec<T>, ProtoError> {
    bodies.iter().map(|raw| bitcode::deserialize(raw).map_err(ProtoError::from)).collect()
}

fn parse_one<T: for<'de> serde::Deserialize<'de>>(bodies: &[&[u8]]) -> Result<T, ProtoError> {
    let raw = bodies
        .first()
        .ok_or(ProtoError::MalformedPayload("expected at least one body sub-message"))?;
    bitcode::deserialize(raw).map_err(ProtoError::from)
}

/// Parses the mandatory header sub-message (§3, §4.B).
pub fn parse_header(raw: &[u8]) -> Result<MsgHeader, ProtoError> {
    bitcode::deserialize(raw).map_err(ProtoError::from)
}

/// Parses the handshake body (§4.G step 5, §6).
pub fn parse_api_version(raw: &[u8]) -> Result<MsgApiVersion, ProtoError> {
    bitcode::deserialize(raw).map_err(ProtoError::from)
}

/// Encodes a single sub-message body.
pub fn encode_body<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtoError> {
    bitcode::serialize(msg).map_err(ProtoError::from)
}

/// Builds a complete on-wire frame for an outbound request: the header
/// sub-message followed by an optional single body sub-message (§4.A
/// Encode frame, §4.F).
pub fn build_frame(api_call: &str, msg_id: u64, body: Option<Vec<u8>>) -> Result<Vec<u8>, ProtoError> {
    let header = encode_body(&MsgHeader { api_call: api_call.to_string(), msg_id })?;
    let mut submessages = vec![header];
    if let Some(body) = body {
        submessages.push(body);
    }
    Ok(frame::encode_frame(&submessages))
}
