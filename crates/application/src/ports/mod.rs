mod resolver_engine;

pub use resolver_engine::{
    ContextOptions, EngineEvent, EngineResult, EngineStatus, ResolverEngine, ResponsePayload,
    TransactionId,
};

// Re-export for convenience
pub use sable_dns_domain::QueryDescriptor;
