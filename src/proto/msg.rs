//! NMP request and response messages.
//!
//! A request is an envelope header plus an opaque payload. A response is the
//! same envelope followed by a one-byte result code, then the payload; the
//! result code is the peer's verdict on the command (0 = OK), distinct from
//! transport-level failure.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::core::{HDR_SIZE, RSP_HDR_SIZE};

use super::hdr::{DecodeError, NmpHdr, Op};

static NEXT_SEQ: AtomicU8 = AtomicU8::new(0);

/// Allocate the next sequence number, wrapping at 255.
///
/// Sequence numbers are process-wide; avoiding reuse while a request is still
/// outstanding on the same session is the caller's responsibility.
pub fn next_seq() -> u8 {
    NEXT_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// An NMP request message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmpMsg {
    /// Envelope header. `seq` and `len` are filled by the constructors.
    pub hdr: NmpHdr,
    /// Opaque command payload.
    pub payload: Vec<u8>,
}

impl NmpMsg {
    /// Create a request with a freshly allocated sequence number.
    pub fn new(op: Op, group: u16, id: u8, payload: Vec<u8>) -> Self {
        let mut hdr = NmpHdr::new(op, group, id);
        hdr.seq = next_seq();
        hdr.len = payload.len() as u16;
        Self { hdr, payload }
    }

    /// Build a read request with flags cleared and an empty payload.
    pub fn read_req(group: u16, id: u8) -> Self {
        Self::new(Op::ReadReq, group, id, Vec::new())
    }

    /// Build a write request carrying the given payload.
    pub fn write_req(group: u16, id: u8, payload: Vec<u8>) -> Self {
        Self::new(Op::WriteReq, group, id, payload)
    }

    /// Sequence number of this request.
    pub fn seq(&self) -> u8 {
        self.hdr.seq
    }

    /// Serialize the message for transmission. The header `len` field is
    /// rewritten from the actual payload length.
    pub fn encode(&self) -> Vec<u8> {
        let mut hdr = self.hdr;
        hdr.len = self.payload.len() as u16;

        let mut buf = Vec::with_capacity(HDR_SIZE + self.payload.len());
        buf.extend_from_slice(&hdr.to_bytes());
        buf.extend_from_slice(&self.payload);
        buf
    }
}

/// An NMP response message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmpRsp {
    /// Envelope header.
    pub hdr: NmpHdr,
    /// Result code reported by the peer. 0 means the command succeeded.
    pub rc: u8,
    /// Command payload.
    pub payload: Vec<u8>,
}

impl NmpRsp {
    /// Fabricate a response. Used by tests and loopback transports.
    pub fn new(op: Op, group: u16, id: u8, seq: u8, rc: u8, payload: Vec<u8>) -> Self {
        let mut hdr = NmpHdr::new(op.response(), group, id);
        hdr.seq = seq;
        hdr.len = payload.len() as u16;
        Self { hdr, rc, payload }
    }

    /// Check the peer's result code.
    pub fn is_ok(&self) -> bool {
        self.rc == 0
    }

    /// Serialize the response as it appears on the wire.
    pub fn encode(&self) -> Vec<u8> {
        let mut hdr = self.hdr;
        hdr.len = self.payload.len() as u16;

        let mut buf = Vec::with_capacity(RSP_HDR_SIZE + self.payload.len());
        buf.extend_from_slice(&hdr.to_bytes());
        buf.push(self.rc);
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Decode a response from bytes received from the peer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < RSP_HDR_SIZE {
            return Err(DecodeError::TooShort {
                expected: RSP_HDR_SIZE,
                actual: data.len(),
            });
        }

        let hdr = NmpHdr::from_bytes(data)?;
        let rc = data[HDR_SIZE];
        let payload = &data[RSP_HDR_SIZE..];

        if payload.len() != hdr.len as usize {
            return Err(DecodeError::LengthMismatch {
                declared: hdr.len as usize,
                actual: payload.len(),
            });
        }

        Ok(Self {
            hdr,
            rc,
            payload: payload.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GROUP_IMAGE, IMAGE_ID_LIST};

    #[test]
    fn test_read_req_shape() {
        let msg = NmpMsg::read_req(GROUP_IMAGE, IMAGE_ID_LIST);

        assert_eq!(msg.hdr.op, Op::ReadReq);
        assert_eq!(msg.hdr.flags, 0);
        assert_eq!(msg.hdr.group, GROUP_IMAGE);
        assert_eq!(msg.hdr.id, IMAGE_ID_LIST);
        assert_eq!(msg.hdr.len, 0);
        assert!(msg.payload.is_empty());
    }

    #[test]
    fn test_encode_fixes_len() {
        let mut msg = NmpMsg::write_req(0, 0, b"abc".to_vec());
        msg.hdr.len = 0; // stale

        let bytes = msg.encode();
        assert_eq!(bytes.len(), HDR_SIZE + 3);
        assert_eq!(NmpHdr::from_bytes(&bytes).unwrap().len, 3);
        assert_eq!(&bytes[HDR_SIZE..], b"abc");
    }

    #[test]
    fn test_rsp_round_trip() {
        let rsp = NmpRsp::new(Op::ReadReq, GROUP_IMAGE, IMAGE_ID_LIST, 17, 0, vec![1, 2, 3]);
        assert_eq!(rsp.hdr.op, Op::ReadRsp);
        assert!(rsp.is_ok());

        let decoded = NmpRsp::decode(&rsp.encode()).unwrap();
        assert_eq!(decoded, rsp);
        assert_eq!(decoded.hdr.seq, 17);
    }

    #[test]
    fn test_rsp_nonzero_rc() {
        let rsp = NmpRsp::new(Op::WriteReq, 0, 0, 1, 8, Vec::new());
        assert!(!rsp.is_ok());

        let decoded = NmpRsp::decode(&rsp.encode()).unwrap();
        assert_eq!(decoded.rc, 8);
    }

    #[test]
    fn test_rsp_too_short() {
        let err = NmpRsp::decode(&[0u8; 8]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                expected: RSP_HDR_SIZE,
                actual: 8
            }
        );
    }

    #[test]
    fn test_rsp_length_mismatch() {
        let mut bytes = NmpRsp::new(Op::ReadReq, 0, 0, 1, 0, vec![9, 9]).encode();
        bytes.truncate(bytes.len() - 1);

        let err = NmpRsp::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LengthMismatch {
                declared: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_seq_allocation_distinct() {
        let a = NmpMsg::read_req(0, 0);
        let b = NmpMsg::read_req(0, 0);
        assert_ne!(a.seq(), b.seq());
    }
}
