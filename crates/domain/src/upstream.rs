use crate::addr::ParsedAddress;
use crate::errors::ResolveError;
use serde::{Deserialize, Serialize};

/// Caller-facing upstream server input: a textual address, a port, and an
/// optional TLS authentication hostname. The presence of the hostname
/// decides whether the entry becomes a plain or a TLS endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpstreamSpec {
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u32,

    #[serde(default)]
    pub tls_auth_name: Option<String>,
}

impl UpstreamSpec {
    pub fn new(address: impl Into<String>, port: u32) -> Self {
        Self {
            address: address.into(),
            port,
            tls_auth_name: None,
        }
    }

    pub fn with_tls_auth(mut self, hostname: impl Into<String>) -> Self {
        self.tls_auth_name = Some(hostname.into());
        self
    }

    /// Validate the textual address and build the typed entry the engine
    /// consumes. A parse failure surfaces as `InvalidAddress`.
    pub fn to_entry(&self) -> Result<ServerEntry, ResolveError> {
        let address = ParsedAddress::parse(&self.address)?;
        let endpoint = match &self.tls_auth_name {
            Some(hostname) => ServerEndpoint::Tls {
                tls_port: self.port,
                tls_auth_name: hostname.clone(),
            },
            None => ServerEndpoint::Plain { port: self.port },
        };
        Ok(ServerEntry { address, endpoint })
    }
}

fn default_port() -> u32 {
    53
}

/// One upstream resolver target in the typed form the engine consumes.
/// Serializes to the engine's dict shape: `address_type`/`address_data`
/// plus either `port` or `tls_port`+`tls_auth_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    #[serde(flatten)]
    pub address: ParsedAddress,

    #[serde(flatten)]
    pub endpoint: ServerEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServerEndpoint {
    Plain { port: u32 },
    Tls { tls_port: u32, tls_auth_name: String },
}
