//! Sable DNS Application Layer
//!
//! The resolution core: the engine port, the transaction table bridging
//! engine completions to caller futures, the completion dispatcher, and the
//! caller-facing [`DnsSession`].
pub mod allocator;
pub mod ports;
pub mod session;
pub mod transactions;

mod dispatcher;

pub use allocator::{AllocationCounter, TrackingAllocator};
pub use ports::{
    ContextOptions, EngineEvent, EngineResult, EngineStatus, ResolverEngine, ResponsePayload,
    TransactionId,
};
pub use session::DnsSession;
pub use transactions::{PendingQuery, Settled, TransactionTable};
