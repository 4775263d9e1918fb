// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

use crate::error::Error;

/// Transport tuning for the underlying HTTP client.
///
/// The platform API is served over public TLS, so there is nothing to
/// configure beyond the request timeout. Connection reuse is whatever
/// `reqwest` provides; the client makes no pooling guarantees of its own.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("productsup-api/0.1.0")
            .build()
            .map_err(Error::Transport)
    }
}
