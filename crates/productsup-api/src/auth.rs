// Authentication material
//
// The platform uses a single custom header, `X-Auth-Token`, carrying
// `"{client_id}:{client_secret}"` verbatim. This is not a bearer scheme;
// the token string must be reproduced exactly for wire compatibility.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Name of the platform's authorization header.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// API credentials: client identifier plus secret.
///
/// Immutable once constructed. The secret is held behind
/// [`SecretString`] and only materialized into a header value marked
/// sensitive, so it stays out of debug output and logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
        }
    }

    /// The client identifier (non-secret half of the credential).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Build the `X-Auth-Token` header value: `"{client_id}:{client_secret}"`.
    ///
    /// Pure: no side effects, no network. Fails only if the credential
    /// contains bytes that cannot appear in an HTTP header.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let token = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        let mut value =
            HeaderValue::from_str(&token).map_err(|e| Error::InvalidCredentials(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}
