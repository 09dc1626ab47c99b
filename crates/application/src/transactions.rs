//! The transaction table: engine-assigned identifiers mapped to one-shot
//! settlement channels. Every registered transaction settles exactly once,
//! through `resolve`, `reject`, or a `clear` that drops its sender.

use crate::ports::{EngineResult, EngineStatus, TransactionId};
use sable_dns_domain::ResolveError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{oneshot, Mutex};

type QueryOutcome = Result<String, ResolveError>;

/// Caller-facing handle for a not-yet-settled transaction. Yields the
/// serialized response payload on success. A handle whose table entry was
/// cleared by cancellation settles as `Err(Cancelled)`.
#[derive(Debug)]
pub struct PendingQuery {
    rx: oneshot::Receiver<QueryOutcome>,
}

impl Future for PendingQuery {
    type Output = QueryOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ResolveError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Result of settling an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Done,
    /// The identifier was not in the table: a late callback for an entry
    /// already cleared by cancellation.
    Unknown,
}

#[derive(Debug, Default)]
pub struct TransactionTable {
    entries: Mutex<HashMap<TransactionId, oneshot::Sender<QueryOutcome>>>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a submission and register its transaction id in one step. The
    /// table lock is held across the submission, so a completion event
    /// cannot be dispatched for the id before its entry exists.
    ///
    /// Panics if the engine hands out an id that is still open.
    pub async fn register_with<F>(&self, submit: F) -> Result<PendingQuery, EngineStatus>
    where
        F: Future<Output = EngineResult<TransactionId>>,
    {
        let mut entries = self.entries.lock().await;
        let id = submit.await?;
        let (tx, rx) = oneshot::channel();
        let previous = entries.insert(id, tx);
        assert!(
            previous.is_none(),
            "engine reused transaction id {id} while it was still open"
        );
        Ok(PendingQuery { rx })
    }

    /// Fulfill an identifier's handle with the serialized payload and
    /// remove the entry.
    pub async fn resolve(&self, id: TransactionId, payload: String) -> Settled {
        self.settle(id, Ok(payload)).await
    }

    /// Fail an identifier's handle and remove the entry.
    pub async fn reject(&self, id: TransactionId, error: ResolveError) -> Settled {
        self.settle(id, Err(error)).await
    }

    async fn settle(&self, id: TransactionId, outcome: QueryOutcome) -> Settled {
        let Some(entry) = self.entries.lock().await.remove(&id) else {
            return Settled::Unknown;
        };
        // The receiver may already be dropped; settlement still counts.
        let _ = entry.send(outcome);
        Settled::Done
    }

    /// Identifiers currently registered.
    pub async fn snapshot(&self) -> Vec<TransactionId> {
        self.entries.lock().await.keys().copied().collect()
    }

    /// Remove every entry. Dropping the senders settles the corresponding
    /// handles as `Err(Cancelled)`.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
