#![allow(dead_code)]

use async_trait::async_trait;
use sable_dns_application::ports::{
    ContextOptions, EngineEvent, EngineResult, EngineStatus, ResolverEngine, ResponsePayload,
    TransactionId,
};
use sable_dns_domain::{CallbackKind, QueryDescriptor, ServerEntry, TlsAuthPolicy, Transport};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Bytes the fake engine allocates per open transaction, freed when the
/// transaction completes or is cancelled.
pub const RESPONSE_ALLOCATION: usize = 64;

/// A COMPLETE payload with the given status code and reply marker.
pub fn good_payload(status: u32, canonical_name: &str) -> Value {
    json!({
        "status": status,
        "answer_type": 800,
        "canonical_name": canonical_name,
        "replies_tree": [],
    })
}

/// Scriptable engine double. Records everything the session asks of it and
/// emits completion events on demand.
pub struct MockEngine {
    options: ContextOptions,
    next_id: AtomicU64,
    open: Mutex<HashSet<TransactionId>>,
    submissions: Mutex<Vec<QueryDescriptor>>,
    cancelled: Mutex<Vec<TransactionId>>,
    upstreams: Mutex<Vec<ServerEntry>>,
    transports: Mutex<Vec<Transport>>,
    fail_next: Mutex<Option<EngineStatus>>,
    deliver_cancel_events: AtomicBool,
    shutdowns: AtomicUsize,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl MockEngine {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        Self::with_options(ContextOptions::default())
    }

    pub fn with_options(
        options: ContextOptions,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Self {
            options,
            next_id: AtomicU64::new(1),
            open: Mutex::new(HashSet::new()),
            submissions: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            upstreams: Mutex::new(Vec::new()),
            transports: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            deliver_cancel_events: AtomicBool::new(false),
            shutdowns: AtomicUsize::new(0),
            events: tx,
        });
        (engine, rx)
    }

    /// Deliver a COMPLETE callback for `id` with the given payload dict.
    pub fn complete(&self, id: TransactionId, payload: Value) {
        self.release(id);
        let _ = self.events.send(EngineEvent {
            id,
            kind: CallbackKind::Complete,
            response: Some(ResponsePayload::new(payload)),
        });
    }

    /// Deliver a payload-less callback (CANCEL, TIMEOUT, ERROR) for `id`.
    pub fn emit(&self, id: TransactionId, kind: CallbackKind) {
        self.release(id);
        let _ = self.events.send(EngineEvent {
            id,
            kind,
            response: None,
        });
    }

    /// Whether `cancel` also delivers a CANCEL callback, as a real engine
    /// may do asynchronously.
    pub fn deliver_cancel_events(&self, deliver: bool) {
        self.deliver_cancel_events.store(deliver, Ordering::Release);
    }

    pub fn fail_next_submission(&self, code: u32) {
        *self.fail_next.lock().unwrap() = Some(EngineStatus::new(code));
    }

    /// Simulate memory the engine allocated and never released.
    pub fn leak(&self, bytes: usize) {
        self.options.allocator.on_alloc(bytes);
    }

    pub fn submissions(&self) -> Vec<QueryDescriptor> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<TransactionId> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn upstream_list(&self) -> Vec<ServerEntry> {
        self.upstreams.lock().unwrap().clone()
    }

    pub fn transport_order(&self) -> Vec<Transport> {
        self.transports.lock().unwrap().clone()
    }

    pub fn tls_auth(&self) -> TlsAuthPolicy {
        self.options.tls_auth
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::Acquire)
    }

    fn release(&self, id: TransactionId) {
        if self.open.lock().unwrap().remove(&id) {
            self.options.allocator.on_free(RESPONSE_ALLOCATION);
        }
    }
}

#[async_trait]
impl ResolverEngine for MockEngine {
    async fn submit(&self, query: &QueryDescriptor) -> EngineResult<TransactionId> {
        if let Some(status) = self.fail_next.lock().unwrap().take() {
            return Err(status);
        }
        let id = TransactionId(self.next_id.fetch_add(1, Ordering::AcqRel));
        self.submissions.lock().unwrap().push(query.clone());
        self.open.lock().unwrap().insert(id);
        self.options.allocator.on_alloc(RESPONSE_ALLOCATION);
        Ok(id)
    }

    async fn cancel(&self, id: TransactionId) -> EngineResult<()> {
        self.cancelled.lock().unwrap().push(id);
        if self.deliver_cancel_events.load(Ordering::Acquire) {
            self.emit(id, CallbackKind::Cancel);
        } else {
            self.release(id);
        }
        Ok(())
    }

    async fn set_upstream_servers(&self, servers: &[ServerEntry]) -> EngineResult<()> {
        *self.upstreams.lock().unwrap() = servers.to_vec();
        Ok(())
    }

    async fn upstream_servers(&self) -> EngineResult<Vec<ServerEntry>> {
        Ok(self.upstreams.lock().unwrap().clone())
    }

    async fn set_transport_order(&self, transports: &[Transport]) -> EngineResult<()> {
        *self.transports.lock().unwrap() = transports.to_vec();
        Ok(())
    }

    async fn shutdown(&self) -> EngineResult<()> {
        self.shutdowns.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn error_string(&self, status: EngineStatus) -> String {
        match status.code() {
            300 => "Bad domain name".to_string(),
            310 => "Out of memory".to_string(),
            code => format!("Engine failure (code {code})"),
        }
    }

    fn memory_in_use(&self) -> usize {
        self.options.allocator.in_use()
    }
}
