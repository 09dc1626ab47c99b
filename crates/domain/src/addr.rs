use crate::errors::ResolveError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family tag carried alongside the binary form of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpFamily::V4 => "IPv4",
            IpFamily::V6 => "IPv6",
        }
    }

    /// Length of the binary address form: 4 octets for IPv4, 16 for IPv6.
    pub fn octet_len(&self) -> usize {
        match self {
            IpFamily::V4 => 4,
            IpFamily::V6 => 16,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated IP address in the typed binary form the resolver engine
/// consumes, used both for reverse lookups and upstream server entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedAddress {
    ip: IpAddr,
}

impl ParsedAddress {
    /// Parse a textual address, trying the IPv4 form first and the IPv6
    /// form second. Anything else is `ResolveError::InvalidAddress`.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        if let Ok(v4) = text.parse::<Ipv4Addr>() {
            return Ok(Self {
                ip: IpAddr::V4(v4),
            });
        }
        if let Ok(v6) = text.parse::<Ipv6Addr>() {
            return Ok(Self {
                ip: IpAddr::V6(v6),
            });
        }
        Err(ResolveError::InvalidAddress(text.to_string()))
    }

    pub fn family(&self) -> IpFamily {
        match self.ip {
            IpAddr::V4(_) => IpFamily::V4,
            IpAddr::V6(_) => IpFamily::V6,
        }
    }

    /// Binary address form, 4 or 16 octets depending on family.
    pub fn octets(&self) -> Vec<u8> {
        match self.ip {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }
}

impl From<IpAddr> for ParsedAddress {
    fn from(ip: IpAddr) -> Self {
        Self { ip }
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

// Serialized with the engine's dict keys so server entries flatten into the
// `address_type`/`address_data` wire shape.
impl Serialize for ParsedAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ParsedAddress", 2)?;
        state.serialize_field("address_type", self.family().as_str())?;
        state.serialize_field("address_data", &self.ip.to_string())?;
        state.end()
    }
}
