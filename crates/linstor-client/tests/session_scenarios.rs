//! End-to-end scenarios driven against a bare loopback `TcpListener` that
//! speaks the wire protocol by hand (no real controller needed), the same
//! shape as an upstream `tcp_roundtrip` integration test.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    thread,
    time::Duration,
};

use linstor_client::Session;
use linstor_proto::{
    consts, frame,
    messages::{MsgApiVersion, MsgLstNode, NodeEntry},
    registry,
};

/// A scripted fake controller: one accepted connection, read/write at the
/// frame level.
struct FakeController {
    stream: TcpStream,
}

impl FakeController {
    fn accept(listener: &TcpListener) -> Self {
        let (stream, _) = listener.accept().unwrap();
        Self { stream }
    }

    fn send_handshake(&mut self, version: i64) {
        let body = registry::encode_body(&MsgApiVersion { version }).unwrap();
        let frame = registry::build_frame(consts::API_VERSION, 0, Some(body)).unwrap();
        self.stream.write_all(&frame).unwrap();
    }

    /// Reads one full frame and returns its header and raw body sub-messages.
    fn read_request(&mut self) -> (linstor_proto::messages::MsgHeader, Vec<Vec<u8>>) {
        let mut header = [0u8; frame::HEADER_SIZE];
        self.stream.read_exact(&mut header).unwrap();
        let n = frame::decode_payload_len(&header).unwrap() as usize;
        let mut payload = vec![0u8; n];
        self.stream.read_exact(&mut payload).unwrap();
        let submessages = frame::split_submessages(&payload).unwrap();
        let (header_bytes, bodies) = submessages.split_first().unwrap();
        let msg_header = registry::parse_header(header_bytes).unwrap();
        (msg_header, bodies.iter().map(|b| b.to_vec()).collect())
    }

    fn send_reply(&mut self, api_call: &str, msg_id: u64, body: Option<Vec<u8>>) {
        let frame = registry::build_frame(api_call, msg_id, body).unwrap();
        self.stream.write_all(&frame).unwrap();
    }

    fn close(self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}

fn listen() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, format!("plain-controller://127.0.0.1:{}", addr.port()))
}

/// S1 — handshake: after `connect`, the negotiated version and connected
/// state are observable on the session.
#[test]
fn handshake_negotiates_api_version() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);
        thread::sleep(Duration::from_millis(200));
        ctrl.close();
    });

    let session = Session::connect(&uri).unwrap();
    assert_eq!(session.api_version(), 1);
    assert!(session.connected());

    server.join().unwrap();
}

/// S2 — single call: a list-style api call round-trips through send/await.
#[test]
fn single_call_round_trips() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);
        let (header, _bodies) = ctrl.read_request();
        assert_eq!(header.api_call, consts::API_LST_NODE);
        assert_eq!(header.msg_id, 1);

        let list = MsgLstNode {
            nodes: vec![NodeEntry { name: "node1".into(), node_type: "SATELLITE".into(), net_interfaces: vec![] }],
        };
        let body = registry::encode_body(&list).unwrap();
        ctrl.send_reply(consts::API_LST_NODE, 1, Some(body));
        thread::sleep(Duration::from_millis(200));
        ctrl.close();
    });

    let session = Session::connect(&uri).unwrap();
    let nodes = session.node_list().unwrap();
    assert_eq!(nodes.nodes.len(), 1);
    assert_eq!(nodes.nodes[0].name, "node1");

    server.join().unwrap();
}

/// S3 — interleaved calls: two concurrent callers get their own replies
/// even when the controller answers them out of order.
#[test]
fn interleaved_calls_demultiplex_correctly() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);

        let (h1, _) = ctrl.read_request();
        let (h2, _) = ctrl.read_request();
        assert_ne!(h1.msg_id, h2.msg_id);

        // Reply to the second request first.
        let resp = registry::encode_body(&linstor_proto::messages::MsgApiCallResponse {
            ret_code: 0,
            message_format: None,
            details_format: None,
        })
        .unwrap();
        ctrl.send_reply(consts::API_REPLY, h2.msg_id, Some(resp.clone()));
        ctrl.send_reply(consts::API_REPLY, h1.msg_id, Some(resp));
        thread::sleep(Duration::from_millis(200));
        ctrl.close();
    });

    let session = std::sync::Arc::new(Session::connect(&uri).unwrap());

    let s_a = std::sync::Arc::clone(&session);
    let a = thread::spawn(move || s_a.call(consts::API_DEL_NODE, None).unwrap());
    let s_b = std::sync::Arc::clone(&session);
    let b = thread::spawn(move || s_b.call(consts::API_DEL_NODE, None).unwrap());

    let replies_a = a.join().unwrap();
    let replies_b = b.join().unwrap();
    assert_eq!(replies_a.len(), 1);
    assert_eq!(replies_b.len(), 1);

    server.join().unwrap();
}

/// S4 — disconnect while waiting: a caller blocked in `call` is released
/// with an empty list once another thread disconnects the session.
#[test]
fn disconnect_releases_waiting_caller() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);
        let _ = ctrl.read_request();
        // Never reply.
        thread::sleep(Duration::from_millis(500));
        ctrl.close();
    });

    let session = std::sync::Arc::new(Session::connect(&uri).unwrap());

    let waiter_session = std::sync::Arc::clone(&session);
    let waiter = thread::spawn(move || waiter_session.call(consts::API_DEL_NODE, None).unwrap());

    thread::sleep(Duration::from_millis(50));
    session.disconnect();

    let replies = waiter.join().unwrap();
    assert!(replies.is_empty());
    assert!(!session.connected());

    server.join().unwrap();
}

/// S5 — malformed frame: a truncated payload followed by socket close
/// tears the session down cleanly instead of hanging.
#[test]
fn truncated_frame_disconnects_session() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);
        let _ = ctrl.read_request();

        // Claims 100 bytes of payload, sends 50, then closes.
        let mut header = [0u8; frame::HEADER_SIZE];
        header[4..8].copy_from_slice(&100u32.to_be_bytes());
        ctrl.stream.write_all(&header).unwrap();
        ctrl.stream.write_all(&[0u8; 50]).unwrap();
        ctrl.close();
    });

    let session = Session::connect(&uri).unwrap();
    let replies = session.call(consts::API_DEL_NODE, None).unwrap();
    assert!(replies.is_empty());
    assert!(!session.connected());

    server.join().unwrap();
}

/// S6 — unknown tag: an unrecognized api-call tag is dropped without
/// disturbing a subsequent well-formed reply for a still-pending call.
#[test]
fn unknown_tag_is_dropped_without_disturbing_pending_calls() {
    let (listener, uri) = listen();
    let server = thread::spawn(move || {
        let mut ctrl = FakeController::accept(&listener);
        ctrl.send_handshake(1);
        let (header, _) = ctrl.read_request();

        ctrl.send_reply("BOGUS_TAG", 999, None);

        let resp = registry::encode_body(&linstor_proto::messages::MsgApiCallResponse {
            ret_code: 0,
            message_format: None,
            details_format: None,
        })
        .unwrap();
        ctrl.send_reply(consts::API_REPLY, header.msg_id, Some(resp));
        thread::sleep(Duration::from_millis(200));
        ctrl.close();
    });

    let session = Session::connect(&uri).unwrap();
    let responses = session.node_delete("node1").unwrap();
    assert_eq!(responses.len(), 1);
    assert!(responses[0].is_success());

    server.join().unwrap();
}
