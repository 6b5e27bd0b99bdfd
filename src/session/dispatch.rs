//! Reply correlation for session implementations.
//!
//! Every transport-bound session faces the same problem: one task blocks
//! waiting for a response while the transport's receive path, or an abort
//! from another task, decides how that wait ends. [`NmpDispatcher`] holds a
//! listener per in-flight sequence number; the receive path routes decoded
//! responses in, [`abort`](NmpDispatcher::abort) injects a cancellation, and
//! [`fail_all`](NmpDispatcher::fail_all) releases every waiter when the
//! connection dies.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::NmpError;
use crate::proto::NmpRsp;

enum ListenEvent {
    Rsp(NmpRsp),
    Err(NmpError),
}

/// The receiving half of one in-flight request.
#[derive(Debug)]
pub struct NmpListener {
    seq: u8,
    rx: mpsc::UnboundedReceiver<ListenEvent>,
}

impl NmpListener {
    /// Wait for the response, an abort, or the deadline.
    ///
    /// A zero `timeout` waits indefinitely. A non-zero `timeout` is a hard
    /// deadline; expiry yields a timeout-kind error.
    pub async fn recv(&mut self, timeout: Duration) -> Result<NmpRsp, NmpError> {
        if timeout.is_zero() {
            self.next().await
        } else {
            match tokio::time::timeout(timeout, self.next()).await {
                Ok(result) => result,
                Err(_) => Err(NmpError::timeout(format!(
                    "no response for seq {} within {:?}",
                    self.seq, timeout
                ))),
            }
        }
    }

    async fn next(&mut self) -> Result<NmpRsp, NmpError> {
        match self.rx.recv().await {
            Some(ListenEvent::Rsp(rsp)) => Ok(rsp),
            Some(ListenEvent::Err(err)) => Err(err),
            // Dispatcher dropped out from under us; the session is gone.
            None => Err(NmpError::disconnect("session closed")),
        }
    }
}

/// Routes decoded responses and cancellations to per-seq listeners.
#[derive(Default)]
pub struct NmpDispatcher {
    listeners: Mutex<HashMap<u8, mpsc::UnboundedSender<ListenEvent>>>,
}

impl NmpDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<u8, mpsc::UnboundedSender<ListenEvent>>> {
        self.listeners.lock().expect("listener table poisoned")
    }

    /// Register a listener for `seq`. Fails if `seq` already has an
    /// outstanding request; one sequence number identifies at most one
    /// in-flight request at a time.
    pub fn listen(&self, seq: u8) -> Result<NmpListener, NmpError> {
        let (tx, rx) = mpsc::unbounded_channel();

        match self.table().entry(seq) {
            Entry::Occupied(_) => return Err(NmpError::SeqInUse { seq }),
            Entry::Vacant(slot) => {
                slot.insert(tx);
            }
        }

        Ok(NmpListener { seq, rx })
    }

    /// Drop the listener for `seq` without waking it. Sessions call this
    /// after a receive returns, successfully or not, so a stale entry never
    /// captures a later request's reply.
    pub fn unlisten(&self, seq: u8) -> bool {
        self.table().remove(&seq).is_some()
    }

    /// Decode `data` as a response and hand it to the matching listener,
    /// consuming the listener. Returns whether a listener was woken;
    /// undecodable bytes and unmatched responses are dropped.
    pub fn dispatch(&self, data: &[u8]) -> bool {
        let rsp = match NmpRsp::decode(data) {
            Ok(rsp) => rsp,
            Err(err) => {
                debug!(%err, "dropping undecodable response");
                return false;
            }
        };

        let seq = rsp.hdr.seq;
        let Some(tx) = self.table().remove(&seq) else {
            debug!(seq, "dropping response with no listener");
            return false;
        };

        debug!(seq, rc = rsp.rc, "routing response");
        tx.send(ListenEvent::Rsp(rsp)).is_ok()
    }

    /// Cancel the receive blocked on `seq`, waking it with an
    /// [`NmpError::RxAborted`]. Safe to call from any task. Aborting a
    /// sequence number with no listener is a no-op.
    pub fn abort(&self, seq: u8) -> Result<(), NmpError> {
        match self.table().remove(&seq) {
            Some(tx) => {
                debug!(seq, "aborting receive");
                let _ = tx.send(ListenEvent::Err(NmpError::RxAborted { seq }));
                Ok(())
            }
            None => {
                debug!(seq, "abort for unknown seq");
                Ok(())
            }
        }
    }

    /// Release every blocked receive with a disconnect-kind error carrying
    /// `text`. Sessions call this on close and on fatal transport failure.
    pub fn fail_all(&self, text: &str) {
        let listeners = std::mem::take(&mut *self.table());
        for (seq, tx) in listeners {
            debug!(seq, "failing receive: {text}");
            let _ = tx.send(ListenEvent::Err(NmpError::disconnect(text)));
        }
    }

    /// Number of in-flight requests.
    pub fn pending(&self) -> usize {
        self.table().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::proto::{NmpRsp, Op};

    fn rsp_bytes(seq: u8) -> Vec<u8> {
        NmpRsp::new(Op::ReadReq, 1, 0, seq, 0, vec![0xab]).encode()
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_seq() {
        let dispatcher = NmpDispatcher::new();
        let mut listener = dispatcher.listen(5).unwrap();

        assert!(dispatcher.dispatch(&rsp_bytes(5)));

        let rsp = listener.recv(Duration::from_secs(1)).await.unwrap();
        assert_eq!(rsp.hdr.seq, 5);
        assert_eq!(rsp.payload, vec![0xab]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_listen_rejected() {
        let dispatcher = NmpDispatcher::new();
        let _listener = dispatcher.listen(5).unwrap();

        match dispatcher.listen(5) {
            Err(NmpError::SeqInUse { seq: 5 }) => {}
            other => panic!("expected SeqInUse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unmatched_response_dropped() {
        let dispatcher = NmpDispatcher::new();
        assert!(!dispatcher.dispatch(&rsp_bytes(9)));
    }

    #[tokio::test]
    async fn test_undecodable_bytes_dropped() {
        let dispatcher = NmpDispatcher::new();
        let _listener = dispatcher.listen(1).unwrap();
        assert!(!dispatcher.dispatch(&[0xff; 4]));
        assert_eq!(dispatcher.pending(), 1);
    }

    #[tokio::test]
    async fn test_recv_deadline_expires_as_timeout() {
        let dispatcher = NmpDispatcher::new();
        let mut listener = dispatcher.listen(2).unwrap();

        let err = listener.recv(Duration::from_millis(10)).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_abort_unblocks_receive_from_another_task() {
        let dispatcher = Arc::new(NmpDispatcher::new());
        let mut listener = dispatcher.listen(7).unwrap();

        let aborter = Arc::clone(&dispatcher);
        let waiter = tokio::spawn(async move {
            // Zero timeout: wait forever until the abort lands.
            listener.recv(Duration::ZERO).await
        });

        tokio::task::yield_now().await;
        aborter.abort(7).unwrap();

        let err = waiter.await.unwrap().unwrap_err();
        match err {
            NmpError::RxAborted { seq: 7 } => {}
            other => panic!("expected RxAborted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_abort_unknown_seq_is_noop() {
        let dispatcher = NmpDispatcher::new();
        assert!(dispatcher.abort(42).is_ok());
    }

    #[tokio::test]
    async fn test_fail_all_releases_every_waiter() {
        let dispatcher = NmpDispatcher::new();
        let mut first = dispatcher.listen(1).unwrap();
        let mut second = dispatcher.listen(2).unwrap();

        dispatcher.fail_all("link lost");

        assert!(first.recv(Duration::from_secs(1)).await.unwrap_err().is_disconnect());
        assert!(second.recv(Duration::from_secs(1)).await.unwrap_err().is_disconnect());
        assert_eq!(dispatcher.pending(), 0);
    }

    #[tokio::test]
    async fn test_unlisten_forgets_seq() {
        let dispatcher = NmpDispatcher::new();
        let _listener = dispatcher.listen(3).unwrap();

        assert!(dispatcher.unlisten(3));
        assert!(!dispatcher.unlisten(3));
        assert!(!dispatcher.dispatch(&rsp_bytes(3)));
    }
}
