use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One transport the engine may use to reach an upstream server. The engine
/// consumes the configured list verbatim; length and order matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Udp,
    Tcp,
    Tls,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "UDP",
            Transport::Tcp => "TCP",
            Transport::Tls => "TLS",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "udp" => Ok(Transport::Udp),
            "tcp" => Ok(Transport::Tcp),
            "tls" => Ok(Transport::Tls),
            _ => Err(format!("Unknown transport: {}", s)),
        }
    }
}

/// TLS authentication requirement for upstream connections, fixed at
/// context creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TlsAuthPolicy {
    /// Upstream certificates must authenticate; queries fail otherwise.
    #[default]
    Required,
    /// Authenticate when possible, fall back to unauthenticated TLS.
    Opportunistic,
}

impl TlsAuthPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsAuthPolicy::Required => "required",
            TlsAuthPolicy::Opportunistic => "opportunistic",
        }
    }
}
