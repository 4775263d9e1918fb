// Platform HTTP client
//
// Wraps `reqwest::Client` with platform URL construction, the fixed
// status-code table, and envelope decoding. Endpoint modules (projects,
// sites) are implemented as inherent methods via separate files to keep
// this module focused on transport mechanics.

use reqwest::header::HeaderValue;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::{AUTH_HEADER, Credentials};
use crate::config::PlatformConfig;
use crate::error::{ApiErrorKind, Error};
use crate::models::Envelope;

/// HTTP method for a platform request.
///
/// The platform accepts exactly these four. Anything else is
/// unrepresentable here rather than a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw HTTP client for the Productsup platform API.
///
/// Attaches the `X-Auth-Token` header, issues exactly one network call per
/// request, and translates results uniformly: 2xx bodies decode into an
/// [`Envelope`], non-2xx statuses classify through the platform's status
/// table into [`Error::Api`]. No retries.
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
    auth_header: HeaderValue,
}

impl PlatformClient {
    /// Create a new client from a [`PlatformConfig`].
    pub fn new(config: &PlatformConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth_header: config.credentials.header_value()?,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this to share a connection pool, or to point the client at a
    /// test double.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: &Credentials,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url,
            auth_header: credentials.header_value()?,
        })
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid API URL")
    }

    // ── Request dispatch ─────────────────────────────────────────────

    /// Issue a single authenticated request and decode the envelope.
    ///
    /// - 2xx: the decoded [`Envelope`] (its `success` flag still reflects
    ///   body-level failures -- callers check it per operation);
    /// - non-2xx: [`Error::Api`] classified by the status table, carrying
    ///   the status code and the server-supplied message when present.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Envelope, Error> {
        debug!("{} {}", method, url);

        let mut builder = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        };
        builder = builder.header(AUTH_HEADER, self.auth_header.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        parse_envelope(resp).await
    }

    pub(crate) async fn get(&self, url: Url) -> Result<Envelope, Error> {
        self.request(Method::Get, url, None).await
    }

    pub(crate) async fn post(&self, url: Url, body: &Value) -> Result<Envelope, Error> {
        self.request(Method::Post, url, Some(body)).await
    }

    pub(crate) async fn put(&self, url: Url, body: &Value) -> Result<Envelope, Error> {
        self.request(Method::Put, url, Some(body)).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<Envelope, Error> {
        self.request(Method::Delete, url, None).await
    }
}

/// Translate a transport response: classify non-2xx statuses through the
/// fixed table, decode 2xx bodies into the envelope.
async fn parse_envelope(resp: reqwest::Response) -> Result<Envelope, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        return Err(Error::Api {
            kind: ApiErrorKind::from_status(status.as_u16()),
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

/// Server-supplied failure text from a non-2xx body: the JSON `message`
/// field, then `error`, then a raw snippet.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let text = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str));
        if let Some(text) = text {
            return text.to_owned();
        }
    }
    body[..body.len().min(200)].to_owned()
}
