//! The session capability contract.
//!
//! A session is a stateful conversation handle with one peer over one
//! transport. The particulars vary by transport (serial link, radio stack,
//! network socket); the transaction engine drives every implementation
//! through this trait alone.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::{DEFAULT_TX_TIMEOUT, DEFAULT_TX_TRIES, NmpError};
use crate::proto::{NmpMsg, NmpRsp};

/// Options governing one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    /// Per-attempt response deadline. Zero means wait indefinitely; the
    /// engine never imposes an implicit ceiling in that case.
    pub timeout: Duration,
    /// Total attempts budget. A budget of 0 still performs one attempt.
    pub tries: u32,
}

impl TxOptions {
    /// Create options with the given deadline and attempts budget.
    pub fn new(timeout: Duration, tries: u32) -> Self {
        Self { timeout, tries }
    }
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TX_TIMEOUT,
            tries: DEFAULT_TX_TRIES,
        }
    }
}

/// A communication session with a specific peer.
///
/// Implementations are not safe for concurrent transactions: sequence
/// numbers and partial state would collide. The one sanctioned cross-task
/// interaction is [`abort_rx`](Sesn::abort_rx) while another task is blocked
/// inside [`tx_once`](Sesn::tx_once); methods take `&self` so the borrow
/// checker permits exactly that.
#[async_trait]
pub trait Sesn: Send + Sync {
    /// Initiate communication with the peer. For connection-oriented
    /// transports this opens a connection. Opening an already-open session
    /// must return a deterministic error, not corrupt state.
    async fn open(&self) -> Result<(), NmpError>;

    /// End communication with the peer. For connection-oriented transports
    /// this closes the connection. Any receive blocked on this session must
    /// be released with a disconnect-kind error.
    async fn close(&self) -> Result<(), NmpError>;

    /// Maximum payload size for outgoing requests.
    fn mtu_out(&self) -> usize;

    /// Maximum payload size for incoming responses.
    fn mtu_in(&self) -> usize;

    /// Transmit one request and block until the matching response arrives,
    /// the deadline in `opt` expires (timeout-kind error), the connection
    /// drops (disconnect-kind error), or a protocol failure occurs (any
    /// other error). Exactly one attempt; retry lives in [`tx_nmp`].
    ///
    /// [`tx_nmp`]: crate::session::tx_nmp
    async fn tx_once(&self, msg: &NmpMsg, opt: TxOptions) -> Result<NmpRsp, NmpError>;

    /// Cancel the receive blocked on `seq`. Must be called from a different
    /// task than the one inside [`tx_once`](Sesn::tx_once); it is the only
    /// way to unblock a pending receive without closing the session.
    fn abort_rx(&self, seq: u8) -> Result<(), NmpError>;
}
