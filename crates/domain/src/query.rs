use crate::addr::ParsedAddress;
use std::sync::Arc;

/// One query as handed to the resolver engine. Built per call, not retained
/// past submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDescriptor {
    /// Forward address lookup for a name.
    Address { name: Arc<str> },
    /// Service lookup for a name.
    Service { name: Arc<str> },
    /// Reverse hostname lookup for a parsed address.
    Hostname { address: ParsedAddress },
    /// Lookup of an arbitrary record type for a name.
    General { name: Arc<str>, record_type: u16 },
}

impl QueryDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryDescriptor::Address { .. } => "address",
            QueryDescriptor::Service { .. } => "service",
            QueryDescriptor::Hostname { .. } => "hostname",
            QueryDescriptor::General { .. } => "general",
        }
    }

    /// The queried name, absent for reverse lookups.
    pub fn name(&self) -> Option<&str> {
        match self {
            QueryDescriptor::Address { name }
            | QueryDescriptor::Service { name }
            | QueryDescriptor::General { name, .. } => Some(name),
            QueryDescriptor::Hostname { .. } => None,
        }
    }
}
