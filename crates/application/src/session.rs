//! The caller-facing resolution session: owns the engine handle, the
//! transaction table, and the dispatcher task.

use crate::dispatcher::CompletionDispatcher;
use crate::ports::{EngineEvent, EngineStatus, ResolverEngine};
use crate::transactions::{PendingQuery, TransactionTable};
use sable_dns_domain::{
    ParsedAddress, QueryDescriptor, RecordType, ResolveError, ResolverConfig, Transport,
    UpstreamSpec,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One resolution session over an engine context. Submission methods return
/// a [`PendingQuery`] immediately; each settles exactly once.
pub struct DnsSession {
    engine: Arc<dyn ResolverEngine>,
    transactions: Arc<TransactionTable>,
    dispatcher: JoinHandle<()>,
}

impl DnsSession {
    /// Open a session over an engine context: apply the configured
    /// transport order and upstream list, then start dispatching the
    /// engine's completion events.
    pub async fn open(
        engine: Arc<dyn ResolverEngine>,
        events: mpsc::UnboundedReceiver<EngineEvent>,
        config: ResolverConfig,
    ) -> Result<Self, ResolveError> {
        let transactions = Arc::new(TransactionTable::new());
        let session = Self {
            engine,
            dispatcher: CompletionDispatcher::spawn(Arc::clone(&transactions), events),
            transactions,
        };

        if !config.transports.is_empty() {
            session.set_transport_order(&config.transports).await?;
        }
        if !config.upstreams.is_empty() {
            session.set_upstream_servers(&config.upstreams).await?;
        }
        Ok(session)
    }

    /// Forward address lookup. Settles with the serialized address records.
    pub async fn get_addresses(&self, name: &str) -> Result<PendingQuery, ResolveError> {
        self.submit(QueryDescriptor::Address { name: name.into() })
            .await
    }

    /// Service lookup for a name.
    pub async fn get_services(&self, name: &str) -> Result<PendingQuery, ResolveError> {
        self.submit(QueryDescriptor::Service { name: name.into() })
            .await
    }

    /// Reverse hostname lookup. Fails synchronously with `InvalidAddress`
    /// when `address` is neither valid IPv4 nor IPv6; no transaction is
    /// created in that case.
    pub async fn get_hostnames(&self, address: &str) -> Result<PendingQuery, ResolveError> {
        let address = ParsedAddress::parse(address)?;
        self.submit(QueryDescriptor::Hostname { address }).await
    }

    /// Lookup of an arbitrary record type by its registered code.
    pub async fn get_general(
        &self,
        name: &str,
        record_type: u16,
    ) -> Result<PendingQuery, ResolveError> {
        self.submit(QueryDescriptor::General {
            name: name.into(),
            record_type,
        })
        .await
    }

    /// Typed convenience over [`get_general`](Self::get_general).
    pub async fn get_record(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<PendingQuery, ResolveError> {
        self.get_general(name, record_type.to_u16()).await
    }

    async fn submit(&self, query: QueryDescriptor) -> Result<PendingQuery, ResolveError> {
        debug!(kind = query.kind(), name = query.name().unwrap_or("-"), "submitting query");
        self.transactions
            .register_with(self.engine.submit(&query))
            .await
            .map_err(|status| self.engine_error(status))
    }

    /// Replace the engine's upstream server list. Every entry is validated
    /// before the engine sees any of them: one bad address abandons the
    /// whole call and leaves the previous list in place.
    pub async fn set_upstream_servers(&self, specs: &[UpstreamSpec]) -> Result<(), ResolveError> {
        let entries = specs
            .iter()
            .map(UpstreamSpec::to_entry)
            .collect::<Result<Vec<_>, _>>()?;
        self.engine
            .set_upstream_servers(&entries)
            .await
            .map_err(|status| self.engine_error(status))
    }

    /// The engine's current upstream list, serialized to JSON text.
    pub async fn upstream_servers(&self) -> Result<String, ResolveError> {
        let entries = self
            .engine
            .upstream_servers()
            .await
            .map_err(|status| self.engine_error(status))?;
        Ok(serde_json::to_string(&entries).expect("server entries always serialize"))
    }

    /// Replace the engine's transport preference order; passed through
    /// verbatim, length and order preserved.
    pub async fn set_transport_order(&self, transports: &[Transport]) -> Result<(), ResolveError> {
        self.engine
            .set_transport_order(transports)
            .await
            .map_err(|status| self.engine_error(status))
    }

    /// Request cancellation of every open transaction and clear the table
    /// eagerly. Cleared handles settle as `Err(Cancelled)`; any CANCEL
    /// events the engine still delivers afterwards are ignored.
    pub async fn cancel_all(&self) {
        let ids = self.transactions.snapshot().await;
        debug!(count = ids.len(), "cancelling all transactions");
        for id in &ids {
            // Best-effort: the engine may have already completed this one.
            if let Err(status) = self.engine.cancel(*id).await {
                warn!(id = %id, status = %status, "engine refused cancellation");
            }
        }
        self.transactions.clear().await;
    }

    /// Number of transactions currently awaiting completion.
    pub async fn open_transactions(&self) -> usize {
        self.transactions.len().await
    }

    /// Destroy the engine context. Callable only once the session is idle:
    /// panics if transactions are still open or the engine still holds
    /// allocated bytes.
    pub async fn shutdown(self) -> Result<(), ResolveError> {
        let open = self.transactions.len().await;
        assert_eq!(open, 0, "session torn down with {open} transactions still open");
        let held = self.engine.memory_in_use();
        assert_eq!(held, 0, "engine context torn down with {held} bytes still allocated");

        let result = self
            .engine
            .shutdown()
            .await
            .map_err(|status| self.engine_error(status));
        self.dispatcher.abort();
        result
    }

    fn engine_error(&self, status: EngineStatus) -> ResolveError {
        ResolveError::Engine {
            code: status.code(),
            message: self.engine.error_string(status),
        }
    }
}

impl Drop for DnsSession {
    fn drop(&mut self) {
        self.dispatcher.abort();
    }
}
