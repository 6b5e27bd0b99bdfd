//! Echo command.
//!
//! The simplest command in the default group: the peer writes back whatever
//! text it was sent. Used to probe liveness and round-trip time.

use crate::core::{DEFAULT_ID_ECHO, GROUP_DEFAULT};

use super::hdr::DecodeError;
use super::msg::NmpMsg;

/// Build an echo request carrying `text`.
pub fn echo_request(text: &str) -> NmpMsg {
    NmpMsg::write_req(GROUP_DEFAULT, DEFAULT_ID_ECHO, text.as_bytes().to_vec())
}

/// Decode an echo response payload back into text.
pub fn decode_echo_rsp(payload: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(payload.to_vec())
        .map_err(|e| DecodeError::InvalidText(e.to_string()))
}
