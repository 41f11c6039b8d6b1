//! Constants defined by the external controller wire protocol.
//!
//! These are not invented by this crate — they mirror the fixed set of
//! api-call tags, default ports, and reply-code bit masks the controller and
//! all its clients agree on out of band. An implementer of this crate is
//! expected to keep exact bit/tag compatibility with that external
//! definition; nothing here is free to change independently.

/// Handshake-only tag. Must never appear again after `connect` completes.
pub const API_VERSION: &str = "ApiVersion";
/// Generic reply envelope carrying a return code and optional messages.
pub const API_REPLY: &str = "ApiCallResponse";

pub const API_CRT_NODE: &str = "CrtNode";
pub const API_MOD_NODE: &str = "ModNode";
pub const API_DEL_NODE: &str = "DelNode";
pub const API_LST_NODE: &str = "LstNode";

pub const API_CRT_NET_IF: &str = "CrtNetIf";
pub const API_MOD_NET_IF: &str = "ModNetIf";
pub const API_DEL_NET_IF: &str = "DelNetIf";

pub const API_CRT_STOR_POOL_DFN: &str = "CrtStorPoolDfn";
pub const API_MOD_STOR_POOL_DFN: &str = "ModStorPoolDfn";
pub const API_DEL_STOR_POOL_DFN: &str = "DelStorPoolDfn";
pub const API_LST_STOR_POOL_DFN: &str = "LstStorPoolDfn";

pub const API_CRT_STOR_POOL: &str = "CrtStorPool";
pub const API_MOD_STOR_POOL: &str = "ModStorPool";
pub const API_DEL_STOR_POOL: &str = "DelStorPool";
pub const API_LST_STOR_POOL: &str = "LstStorPool";

pub const API_CRT_RSC_DFN: &str = "CrtRscDfn";
pub const API_MOD_RSC_DFN: &str = "ModRscDfn";
pub const API_DEL_RSC_DFN: &str = "DelRscDfn";
pub const API_LST_RSC_DFN: &str = "LstRscDfn";

pub const API_CRT_RSC: &str = "CrtRsc";
pub const API_MOD_RSC: &str = "ModRsc";
pub const API_DEL_RSC: &str = "DelRsc";
pub const API_LST_RSC: &str = "LstRsc";

pub const API_CRT_VLM_DFN: &str = "CrtVlmDfn";
pub const API_MOD_VLM_DFN: &str = "ModVlmDfn";
pub const API_DEL_VLM_DFN: &str = "DelVlmDfn";

/// Node roles; only relevant here as default-port selectors (§6).
pub const VAL_NODE_TYPE_CTRL: &str = "CONTROLLER";
pub const VAL_NODE_TYPE_STLT: &str = "SATELLITE";

/// Network communication types for a node's network interface.
pub const VAL_NETCOM_TYPE_PLAIN: &str = "PLAIN";
pub const VAL_NETCOM_TYPE_SSL: &str = "SSL";

pub const DFLT_CTRL_PORT_PLAIN: u16 = 3376;
pub const DFLT_CTRL_PORT_SSL: u16 = 3377;
pub const DFLT_STLT_PORT_PLAIN: u16 = 3366;

/// Reply-code bit masks (§3, §6). Tested in this priority order: error,
/// then warning, then info; none of the three set means success.
pub const MASK_ERROR: u64 = 0xC000_0000_0000_0000;
pub const MASK_WARN: u64 = 0x8000_0000_0000_0000;
pub const MASK_INFO: u64 = 0x4000_0000_0000_0000;
