//! Concrete message bodies carried by api-call frames (§3, §4.H).
//!
//! The wire schema for individual operation messages is normally owned by
//! an external message-definition system (spec.md §1); this module models
//! the closed set this client actually drives. Every type derives
//! `serde::{Serialize, Deserialize}` and is encoded with `bitcode` (§2
//! ambient stack).

use serde::{Deserialize, Serialize};

/// The header sub-message every frame begins with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgHeader {
    pub api_call: String,
    pub msg_id: u64,
}

/// Handshake payload (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgApiVersion {
    pub version: i64,
}

/// Generic reply envelope; carries the reply-classification return code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgApiCallResponse {
    pub ret_code: u64,
    pub message_format: Option<String>,
    pub details_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetInterface {
    pub name: String,
    pub address: String,
    pub stlt_port: Option<u16>,
    pub stlt_encryption_type: Option<String>,
}

// --- Node ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtNode {
    pub node_name: String,
    pub node_type: String,
    pub net_interfaces: Vec<NetInterface>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModNode {
    pub node_name: String,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelNode {
    pub node_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub name: String,
    pub node_type: String,
    pub net_interfaces: Vec<NetInterface>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLstNode {
    pub nodes: Vec<NodeEntry>,
}

// --- Net interface ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtNetInterface {
    pub node_name: String,
    pub net_if: NetInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModNetInterface {
    pub node_name: String,
    pub net_if: NetInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelNetInterface {
    pub node_name: String,
    pub net_if_name: String,
}

// --- Storage pool definition ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtStorPoolDfn {
    pub stor_pool_name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModStorPoolDfn {
    pub stor_pool_name: String,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelStorPoolDfn {
    pub stor_pool_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorPoolDfnEntry {
    pub name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLstStorPoolDfn {
    pub stor_pool_dfns: Vec<StorPoolDfnEntry>,
}

// --- Storage pool ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtStorPool {
    pub node_name: String,
    pub stor_pool_name: String,
    pub driver: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModStorPool {
    pub node_name: String,
    pub stor_pool_name: String,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelStorPool {
    pub node_name: String,
    pub stor_pool_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorPoolEntry {
    pub stor_pool_name: String,
    pub node_name: String,
    pub driver: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLstStorPool {
    pub stor_pools: Vec<StorPoolEntry>,
}

// --- Resource definition ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtRscDfn {
    pub rsc_name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModRscDfn {
    pub rsc_name: String,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelRscDfn {
    pub rsc_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RscDfnEntry {
    pub name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLstRscDfn {
    pub rsc_dfns: Vec<RscDfnEntry>,
}

// --- Resource ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtRsc {
    pub rsc_name: String,
    pub node_name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModRsc {
    pub rsc_name: String,
    pub node_name: String,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelRsc {
    pub rsc_name: String,
    pub node_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RscEntry {
    pub name: String,
    pub node_name: String,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLstRsc {
    pub rscs: Vec<RscEntry>,
}

// --- Volume definition ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCrtVlmDfn {
    pub rsc_name: String,
    pub vlm_nr: Option<i32>,
    pub size_kib: u64,
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgModVlmDfn {
    pub rsc_name: String,
    pub vlm_nr: i32,
    pub size_kib: Option<u64>,
    pub override_props: Vec<Property>,
    pub delete_prop_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelVlmDfn {
    pub rsc_name: String,
    pub vlm_nr: i32,
}
