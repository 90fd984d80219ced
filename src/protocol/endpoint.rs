use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TCP endpoint of an exported object or listener
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parses `host:port`. The last colon separates the port, so bracket-less
/// IPv6 hosts still parse.
impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("endpoint '{s}' must have the form host:port"))?;

        if host.is_empty() {
            return Err(format!("endpoint '{s}' has an empty host"));
        }

        let port = port
            .parse::<u16>()
            .map_err(|e| format!("invalid port in endpoint '{s}': {e}"))?;

        Ok(Endpoint::new(host, port))
    }
}
