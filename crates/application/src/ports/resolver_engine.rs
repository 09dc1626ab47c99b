use crate::allocator::TrackingAllocator;
use async_trait::async_trait;
use sable_dns_domain::{
    CallbackKind, QueryDescriptor, ResolverConfig, ServerEntry, TlsAuthPolicy, Transport,
};
use std::fmt;

/// Opaque identifier the engine assigns to a submitted query. Unique among
/// concurrently open transactions; may be reused after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric failure code from an engine call, translated to text through
/// [`ResolverEngine::error_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus(u32);

impl EngineStatus {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type EngineResult<T> = Result<T, EngineStatus>;

/// Inputs an engine adapter needs when creating its context.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub tls_auth: TlsAuthPolicy,
    /// All engine allocations are routed through this capability so the
    /// session can verify nothing is outstanding at teardown.
    pub allocator: TrackingAllocator,
}

impl ContextOptions {
    pub fn new(tls_auth: TlsAuthPolicy) -> Self {
        Self {
            tls_auth,
            allocator: TrackingAllocator::new(),
        }
    }

    /// Context inputs for a session driven by `config`.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.tls_auth)
    }
}

/// Response dictionary delivered with a COMPLETE callback.
#[derive(Debug, Clone)]
pub struct ResponsePayload(serde_json::Value);

impl ResponsePayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The application-level `status` field, if the payload carries one.
    pub fn status_code(&self) -> Option<u32> {
        self.0
            .get("status")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Canonical text form of the full payload. Keys serialize in a stable
    /// order, so equal payloads produce equal text.
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}

/// One completion notification from the engine, delivered out-of-band on
/// the session's event channel. `response` is present for COMPLETE.
#[derive(Debug)]
pub struct EngineEvent {
    pub id: TransactionId,
    pub kind: CallbackKind,
    pub response: Option<ResponsePayload>,
}

/// Port to the external resolver engine, which performs all wire-format,
/// caching, DNSSEC, and transport work. Submission methods return quickly;
/// completions arrive as [`EngineEvent`]s in engine completion order, which
/// need not match submission order.
#[async_trait]
pub trait ResolverEngine: Send + Sync {
    /// Submit a query with no extension options. On success the returned id
    /// will receive exactly one completion event, unless it is cancelled
    /// and the engine elects not to deliver one.
    async fn submit(&self, query: &QueryDescriptor) -> EngineResult<TransactionId>;

    /// Request cancellation of an in-flight transaction. Best-effort: the
    /// engine decides whether a CANCEL event still fires.
    async fn cancel(&self, id: TransactionId) -> EngineResult<()>;

    /// Replace the upstream recursive server list.
    async fn set_upstream_servers(&self, servers: &[ServerEntry]) -> EngineResult<()>;

    /// The currently configured upstream list.
    async fn upstream_servers(&self) -> EngineResult<Vec<ServerEntry>>;

    /// Replace the transport preference order; consumed verbatim.
    async fn set_transport_order(&self, transports: &[Transport]) -> EngineResult<()>;

    /// Destroy the engine context. Called exactly once, after all
    /// transactions have settled.
    async fn shutdown(&self) -> EngineResult<()>;

    /// Human-readable text for an engine failure code.
    fn error_string(&self, status: EngineStatus) -> String;

    /// Bytes currently held through the context allocator.
    fn memory_in_use(&self) -> usize;
}
