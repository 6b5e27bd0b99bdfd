//! NMP Protocol - Session Layer
//!
//! The capability contract transport-bound sessions implement, the reply
//! dispatcher they build on, and the transaction engine that drives them:
//!
//! - **Contract**: [`Sesn`], [`TxOptions`]
//! - **Reply correlation**: [`NmpDispatcher`], [`NmpListener`]
//! - **Transactions**: [`tx_nmp`]

mod dispatch;
#[allow(clippy::module_inception)]
mod session;
mod xact;

pub use dispatch::*;
pub use session::*;
pub use xact::*;
