// Runtime connection configuration
//
// Describes *how* to reach the platform: base URL, credentials, transport
// tuning. Constructed by the caller and handed to `PlatformClient::new` --
// the client never reads global state or config files.

use url::Url;

use crate::auth::Credentials;
use crate::transport::TransportConfig;

/// Root of the platform API, version included.
pub const DEFAULT_BASE_URL: &str = "https://platform-api.productsup.io/platform/v2";

/// Configuration for connecting to the Productsup platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API root. Endpoint paths (`projects`, `sites/{id}`, ...) are joined
    /// onto this. Overridable for test doubles and staging environments.
    pub base_url: Url,
    /// API credentials.
    pub credentials: Credentials,
    /// Transport tuning.
    pub transport: TransportConfig,
}

impl PlatformConfig {
    /// Config pointing at the production platform with default transport.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            credentials,
            transport: TransportConfig::default(),
        }
    }

    /// Replace the base URL (staging, mock server).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}
