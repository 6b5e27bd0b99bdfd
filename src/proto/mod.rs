//! NMP Protocol - Message Layer
//!
//! The generic envelope every NMP message shares, plus the per-command
//! codecs:
//!
//! - **Envelope**: [`NmpHdr`], [`Op`], and the request/response containers
//!   [`NmpMsg`] / [`NmpRsp`]
//! - **Image management**: [`ImageList`], [`ImageVersion`], [`boot_request`]
//! - **Echo**: [`echo_request`], [`decode_echo_rsp`]

mod echo;
mod hdr;
mod image;
mod msg;

pub use echo::*;
pub use hdr::*;
pub use image::*;
pub use msg::*;
