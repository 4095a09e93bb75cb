//! Liveness check configuration.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::{LivenessError, Result};

/// Port used when a resolver is given without one.
pub const DNS_PORT: u16 = 53;

/// Configuration for a liveness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Independent resolvers, as `ip` or `ip:port` (default: 1.1.1.1, 8.8.8.8).
    #[serde(default = "default_resolvers")]
    pub resolvers: Vec<String>,

    /// Per-query timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Consecutive NXDOMAIN runs before a domain becomes a removal candidate.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Maximum domains checked at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            resolvers: default_resolvers(),
            timeout_ms: default_timeout_ms(),
            threshold: default_threshold(),
            concurrency: default_concurrency(),
        }
    }
}

impl LivenessConfig {
    /// Per-query timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parsed resolver addresses.
    pub fn nameservers(&self) -> Result<Vec<SocketAddr>> {
        self.resolvers
            .iter()
            .map(|s| parse_nameserver(s))
            .collect()
    }

    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.resolvers.is_empty() {
            return Err(LivenessError::Config("no resolvers configured".into()));
        }
        if self.timeout_ms == 0 {
            return Err(LivenessError::Config("timeout_ms must be positive".into()));
        }
        if self.threshold == 0 {
            return Err(LivenessError::Config("threshold must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(LivenessError::Config("concurrency must be positive".into()));
        }
        self.nameservers().map(|_| ())
    }
}

/// Parse `ip`, `ip:port` or `[v6]:port`.
pub fn parse_nameserver(s: &str) -> Result<SocketAddr> {
    let s = s.trim();
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }
    s.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| LivenessError::InvalidResolver(s.to_string()))
}

// Default value functions for serde.
fn default_resolvers() -> Vec<String> {
    vec![String::from("1.1.1.1"), String::from("8.8.8.8")]
}

const fn default_timeout_ms() -> u64 {
    1500
}

const fn default_threshold() -> u32 {
    3
}

const fn default_concurrency() -> usize {
    20
}
