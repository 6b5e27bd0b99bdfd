//! NMP Protocol - Transport Boundary
//!
//! The contract concrete transports must satisfy to plug into the session
//! layer. Only the error classification lives here; transport
//! implementations themselves are out of crate.

mod error;

pub use error::*;
