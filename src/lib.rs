//! # NMP Protocol
//!
//! NMP is a request/response management protocol for controlling remote
//! embedded devices over heterogeneous transports (serial link, radio,
//! network socket). This crate provides the transport-independent core:
//!
//! - **Envelope & codecs**: the generic message header plus the image and
//!   echo command codecs
//! - **Error taxonomy**: timeout/disconnect classification that works the
//!   same whichever layer raised the error
//! - **Session contract**: the capability set every transport-bound session
//!   implements, with a reply dispatcher for correlation and cross-task abort
//! - **Transaction engine**: the bounded-retry loop that turns single
//!   attempts into one logical request
//!
//! Concrete transports implement [`session::Sesn`] out of crate and plug
//! into [`session::tx_nmp`].
//!
//! ## Modules
//!
//! - [`core`]: Protocol constants and error types
//! - [`proto`]: Message envelope and command codecs
//! - [`session`]: Session contract, dispatcher, transaction engine
//! - [`xport`]: Transport error boundary
//!
//! ## Example
//!
//! Decoding an image list response payload:
//!
//! ```rust
//! use nmp_protocol::proto::{ImageList, ImageVersion};
//!
//! let mut payload = Vec::new();
//! payload.extend_from_slice(&ImageVersion { major: 1, minor: 2, revision: 300, build: 4 }.to_bytes());
//! payload.extend_from_slice(&ImageVersion::NOT_SET.to_bytes());
//!
//! let list = ImageList::decode(&payload);
//! assert_eq!(list.images, vec!["1.2.300.4".to_string(), "Not set".to_string()]);
//! ```
//!
//! Driving a transaction (any `Sesn` implementation):
//!
//! ```ignore
//! use std::time::Duration;
//! use nmp_protocol::prelude::*;
//!
//! let msg = ImageList::request();
//! let opt = TxOptions::new(Duration::from_millis(100), 3);
//! let rsp = tx_nmp(&sesn, &msg, opt).await?;
//! let list = ImageList::decode(&rsp.payload);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod proto;
pub mod session;
pub mod xport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::proto::*;
    pub use crate::session::*;
    pub use crate::xport::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{ErrorKind, NmpError, NmpResult};
pub use crate::proto::{ImageList, ImageVersion, NmpHdr, NmpMsg, NmpRsp, Op};
pub use crate::session::{NmpDispatcher, NmpListener, Sesn, TxOptions, tx_nmp};
pub use crate::xport::{XportError, XportResult};
