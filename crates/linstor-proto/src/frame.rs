//! The 16-byte outer header and the varint-delimited inner message stream
//! (§3 Frame, §4.A Frame codec).

use crate::{error::ProtoError, varint};

/// Size of the fixed outer header: 4 reserved, 4 payload length, 8 reserved.
pub const HEADER_SIZE: usize = 16;

/// Reads the payload length `N` out of a 16-byte outer header.
///
/// The 4 leading and 8 trailing reserved bytes are read but never
/// interpreted; a non-zero reserved region is accepted (§9 Open Questions).
pub fn decode_payload_len(header: &[u8]) -> Result<u32, ProtoError> {
    if header.len() < HEADER_SIZE {
        return Err(ProtoError::MalformedHeader("need at least 16 bytes to read payload length"));
    }
    let n = u32::from_be_bytes(header[4..8].try_into().expect("slice is exactly 4 bytes"));
    Ok(n)
}

/// Splits an inner payload of exactly `N` bytes into its varint-delimited
/// sub-messages.
///
/// At least one sub-message (the header sub-message) is required; an empty
/// payload is malformed rather than "zero sub-messages".
pub fn split_submessages(payload: &[u8]) -> Result<Vec<&[u8]>, ProtoError> {
    if payload.is_empty() {
        return Err(ProtoError::MalformedPayload("payload is empty, header sub-message required"));
    }

    let mut submessages = Vec::new();
    let mut pos = 0usize;
    while pos < payload.len() {
        let (len, after_len) = varint::decode(payload, pos)?;
        let len = usize::try_from(len)
            .map_err(|_| ProtoError::MalformedPayload("sub-message length doesn't fit in usize"))?;
        let end = after_len
            .checked_add(len)
            .ok_or(ProtoError::MalformedPayload("sub-message length overflows"))?;
        if end > payload.len() {
            return Err(ProtoError::MalformedPayload("sub-message length exceeds remaining bytes"));
        }
        submessages.push(&payload[after_len..end]);
        pos = end;
    }

    Ok(submessages)
}

/// Encodes a complete frame from already-serialized sub-message bodies: the
/// header sub-message must be `submessages[0]`.
pub fn encode_frame(submessages: &[Vec<u8>]) -> Vec<u8> {
    let mut inner = Vec::new();
    for msg in submessages {
        varint::encode(msg.len() as u64, &mut inner);
        inner.extend_from_slice(msg);
    }

    let mut frame = Vec::with_capacity(HEADER_SIZE + inner.len());
    frame.extend_from_slice(&0u32.to_be_bytes()); // reserved type
    frame.extend_from_slice(&(inner.len() as u32).to_be_bytes());
    frame.extend_from_slice(&0u64.to_be_bytes()); // reserved
    frame.extend_from_slice(&inner);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_payload_len_requires_16_bytes() {
        assert!(decode_payload_len(&[0u8; 15]).is_err());
        assert!(decode_payload_len(&[0u8; 16]).is_ok());
    }

    #[test]
    fn decode_payload_len_reads_bytes_4_to_8() {
        let mut header = [0u8; 16];
        header[4..8].copy_from_slice(&42u32.to_be_bytes());
        assert_eq!(decode_payload_len(&header).unwrap(), 42);
    }

    #[test]
    fn decode_payload_len_ignores_nonzero_reserved_bytes() {
        let mut header = [0xFFu8; 16];
        header[4..8].copy_from_slice(&7u32.to_be_bytes());
        assert_eq!(decode_payload_len(&header).unwrap(), 7);
    }

    #[test]
    fn empty_payload_is_malformed() {
        assert!(split_submessages(&[]).is_err());
    }

    #[test]
    fn split_submessages_consumes_exactly_n_bytes() {
        let mut payload = Vec::new();
        varint::encode(3, &mut payload);
        payload.extend_from_slice(b"abc");
        varint::encode(2, &mut payload);
        payload.extend_from_slice(b"de");

        let parts = split_submessages(&payload).unwrap();
        assert_eq!(parts, vec![b"abc".as_slice(), b"de".as_slice()]);
    }

    #[test]
    fn length_exceeding_remaining_bytes_is_malformed() {
        let mut payload = Vec::new();
        varint::encode(100, &mut payload);
        payload.extend_from_slice(b"short");
        assert!(split_submessages(&payload).is_err());
    }

    #[test]
    fn frame_wire_size_matches_header_plus_payload() {
        let submessages = vec![b"hdr".to_vec(), b"body".to_vec()];
        let wire = encode_frame(&submessages);
        let n = decode_payload_len(&wire[..HEADER_SIZE]).unwrap() as usize;
        assert_eq!(wire.len(), HEADER_SIZE + n);
    }

    #[test]
    fn encode_then_split_round_trips() {
        let submessages = vec![b"header".to_vec(), b"one".to_vec(), b"two".to_vec()];
        let wire = encode_frame(&submessages);
        let n = decode_payload_len(&wire[..HEADER_SIZE]).unwrap() as usize;
        let parts = split_submessages(&wire[HEADER_SIZE..HEADER_SIZE + n]).unwrap();
        assert_eq!(parts, submessages.iter().map(Vec::as_slice).collect::<Vec<_>>());
    }

    #[test]
    fn split_one_byte_at_a_time_still_parses_as_whole() {
        // Simulates delivering the header one byte at a time (§8 boundary
        // behavior): decode_payload_len only runs once 16 bytes have
        // accumulated, regardless of how many reads it took to get there.
        let submessages = vec![b"hdr".to_vec()];
        let wire = encode_frame(&submessages);
        let mut accumulated = Vec::new();
        let mut parsed_len = None;
        for &byte in &wire[..HEADER_SIZE] {
            accumulated.push(byte);
            if accumulated.len() == HEADER_SIZE {
                parsed_len = Some(decode_payload_len(&accumulated).unwrap());
            } else {
                assert!(decode_payload_len(&accumulated).is_err());
            }
        }
        assert_eq!(parsed_len.unwrap() as usize, wire.len() - HEADER_SIZE);
    }
}
