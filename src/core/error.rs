//! Error types for the NMP session layer.
//!
//! Every error value carries a classification ([`ErrorKind`]) that the
//! transaction engine consults to decide whether an attempt may be retried.
//! Classification is independent of the layer that produced the error: a
//! transport-level timeout wrapped in [`NmpError::Xport`] classifies the same
//! as a session-level [`NmpError::Timeout`].

use std::io;

use thiserror::Error;

use crate::proto::DecodeError;
use crate::xport::XportError;

/// Retry-relevant classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request sent, no matching response before the deadline. Retryable.
    Timeout,
    /// The connection to the peer is gone. Fatal; the caller must reopen.
    Disconnect,
    /// Anything else (decode failures, argument errors, transport faults).
    /// Fatal to the current transaction.
    Other,
}

/// Errors produced by sessions and the transaction engine.
#[derive(Debug, Error)]
pub enum NmpError {
    /// Request sent, but no response received before the deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The underlying connection was lost.
    #[error("disconnect: {0}")]
    Disconnect(String),

    /// A pending receive was cancelled via abort.
    #[error("receive aborted for seq {seq}")]
    RxAborted {
        /// Sequence number of the cancelled request.
        seq: u8,
    },

    /// The sequence number already has an outstanding request.
    #[error("seq {seq} already has an outstanding request")]
    SeqInUse {
        /// The conflicting sequence number.
        seq: u8,
    },

    /// Message decode failure.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error from the underlying transport.
    #[error("transport error: {0}")]
    Xport(#[from] XportError),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl NmpError {
    /// Create a timeout error with a diagnostic message.
    pub fn timeout(text: impl Into<String>) -> Self {
        NmpError::Timeout(text.into())
    }

    /// Create a disconnect error with a diagnostic message.
    pub fn disconnect(text: impl Into<String>) -> Self {
        NmpError::Disconnect(text.into())
    }

    /// Classify this error, regardless of which layer raised it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NmpError::Timeout(_) => ErrorKind::Timeout,
            NmpError::Disconnect(_) => ErrorKind::Disconnect,
            NmpError::Xport(e) => e.kind(),
            _ => ErrorKind::Other,
        }
    }

    /// Check whether this error is a timeout at any layer.
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    /// Check whether this error signals a lost connection at any layer.
    pub fn is_disconnect(&self) -> bool {
        self.kind() == ErrorKind::Disconnect
    }
}

/// Result type for session operations.
pub type NmpResult<T> = Result<T, NmpError>;
