//! The bounded-retry transaction engine.

use tracing::{debug, trace};

use crate::core::NmpError;
use crate::proto::{NmpMsg, NmpRsp};

use super::session::{Sesn, TxOptions};

/// Drive one logical request through a session, retrying on timeout.
///
/// With `tries = N`, up to `N` attempts are made; only timeout-kind errors
/// (from the session or the transport beneath it) consume retry budget.
/// A disconnect or any other error is terminal immediately, surfaced
/// verbatim. Exhausting the budget surfaces the last timeout error rather
/// than a synthesized one.
///
/// `tries = 0` still performs exactly one attempt, whose failure is always
/// terminal; it behaves identically to `tries = 1`.
pub async fn tx_nmp(
    sesn: &dyn Sesn,
    msg: &NmpMsg,
    opt: TxOptions,
) -> Result<NmpRsp, NmpError> {
    let retries = i64::from(opt.tries) - 1;
    let mut attempt: i64 = 0;

    loop {
        match sesn.tx_once(msg, opt).await {
            Ok(rsp) => {
                debug!(seq = msg.seq(), attempt, "transaction succeeded");
                return Ok(rsp);
            }
            Err(err) => {
                if !err.is_timeout() || attempt >= retries {
                    debug!(seq = msg.seq(), attempt, %err, "transaction failed");
                    return Err(err);
                }
                trace!(seq = msg.seq(), attempt, "attempt timed out, retrying");
                attempt += 1;
            }
        }
    }
}
