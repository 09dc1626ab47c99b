//! The completion dispatcher: consumes engine events and drives the
//! transaction table. Each event settles its transaction at most once; an
//! event for an identifier no longer in the table is a late callback after
//! cancellation and is ignored.

use crate::ports::{EngineEvent, ResponsePayload, TransactionId};
use crate::transactions::{Settled, TransactionTable};
use sable_dns_domain::{CallbackKind, ResolveError, ResponseStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub(crate) struct CompletionDispatcher {
    transactions: Arc<TransactionTable>,
}

impl CompletionDispatcher {
    pub(crate) fn spawn(
        transactions: Arc<TransactionTable>,
        mut events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> JoinHandle<()> {
        let dispatcher = Self { transactions };
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                dispatcher.dispatch(event).await;
            }
            debug!("engine event channel closed");
        })
    }

    /// Handle one completion. The response payload is owned by the event
    /// and dropped on every exit path.
    async fn dispatch(&self, event: EngineEvent) {
        let EngineEvent { id, kind, response } = event;

        if let Some(error) = ResolveError::from_callback(kind) {
            debug!(id = %id, kind = %kind, "transaction failed in transport");
            let settled = self.transactions.reject(id, error).await;
            self.log_late(id, kind, settled);
            return;
        }

        let response = match response {
            Some(response) => response,
            None => panic!("COMPLETE callback for transaction {id} carried no response payload"),
        };
        self.dispatch_complete(id, response).await;
    }

    async fn dispatch_complete(&self, id: TransactionId, response: ResponsePayload) {
        let code = match response.status_code() {
            Some(code) => code,
            None => panic!("response payload for transaction {id} carries no status"),
        };
        let status = match ResponseStatus::from_code(code) {
            Some(status) => status,
            // Engine contract violation; never a silent success.
            None => panic!("engine reported unknown response status {code} for transaction {id}"),
        };

        match ResolveError::from_status(status) {
            None => {
                debug!(id = %id, "transaction resolved");
                let settled = self.transactions.resolve(id, response.to_json()).await;
                self.log_late(id, CallbackKind::Complete, settled);
            }
            Some(error) => {
                debug!(id = %id, status = %status, "transaction rejected by response status");
                let settled = self.transactions.reject(id, error).await;
                self.log_late(id, CallbackKind::Complete, settled);
            }
        }
    }

    fn log_late(&self, id: TransactionId, kind: CallbackKind, settled: Settled) {
        if settled == Settled::Unknown {
            debug!(id = %id, kind = %kind, "late callback for an already-cleared transaction");
        }
    }
}
