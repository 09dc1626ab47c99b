use serde::{Deserialize, Serialize};

use crate::transport::{TlsAuthPolicy, Transport};
use crate::upstream::UpstreamSpec;

/// Resolution session settings applied to the engine at open time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub tls_auth: TlsAuthPolicy,

    /// Transport preference order, consumed by the engine verbatim.
    #[serde(default = "default_transports")]
    pub transports: Vec<Transport>,

    /// Upstream recursive servers. Empty means the engine's own defaults.
    #[serde(default)]
    pub upstreams: Vec<UpstreamSpec>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tls_auth: TlsAuthPolicy::default(),
            transports: default_transports(),
            upstreams: vec![],
        }
    }
}

fn default_transports() -> Vec<Transport> {
    vec![Transport::Udp, Transport::Tcp]
}
