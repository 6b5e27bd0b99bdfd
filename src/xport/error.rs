//! Transport layer error boundary.
//!
//! Concrete transports (serial link, radio stack, network socket) live
//! outside this crate; what they share with the session layer is this error
//! type and its classification. The transaction engine never inspects a
//! transport error's origin, only its [`ErrorKind`].

use std::io;

use thiserror::Error;

use crate::core::ErrorKind;

/// Errors raised below the session layer.
#[derive(Debug, Error)]
pub enum XportError {
    /// The transport gave up waiting for the peer.
    #[error("transport timeout: {0}")]
    Timeout(String),

    /// The link to the peer is gone.
    #[error("transport disconnected: {0}")]
    Disconnected(String),

    /// The transport delivered bytes the session cannot frame.
    #[error("invalid frame: {0}")]
    Frame(String),

    /// I/O error from the underlying device or socket.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl XportError {
    /// Create a transport timeout with a diagnostic message.
    pub fn timeout(text: impl Into<String>) -> Self {
        XportError::Timeout(text.into())
    }

    /// Create a transport disconnect with a diagnostic message.
    pub fn disconnected(text: impl Into<String>) -> Self {
        XportError::Disconnected(text.into())
    }

    /// Classify this error for the retry decision.
    pub fn kind(&self) -> ErrorKind {
        match self {
            XportError::Timeout(_) => ErrorKind::Timeout,
            XportError::Disconnected(_) => ErrorKind::Disconnect,
            _ => ErrorKind::Other,
        }
    }

    /// Check whether this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    /// Check whether this error signals a lost link.
    pub fn is_disconnect(&self) -> bool {
        self.kind() == ErrorKind::Disconnect
    }
}

/// Result type for transport operations.
pub type XportResult<T> = Result<T, XportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        assert!(XportError::timeout("no bytes in 100ms").is_timeout());
        assert!(!XportError::timeout("no bytes in 100ms").is_disconnect());
    }

    #[test]
    fn test_disconnect_classification() {
        assert!(XportError::disconnected("peer reset").is_disconnect());
        assert!(!XportError::disconnected("peer reset").is_timeout());
    }

    #[test]
    fn test_other_errors_are_other() {
        assert_eq!(XportError::Frame("bad sync".to_string()).kind(), ErrorKind::Other);

        let io_err = XportError::from(io::Error::new(io::ErrorKind::PermissionDenied, "tty"));
        assert_eq!(io_err.kind(), ErrorKind::Other);
    }
}
