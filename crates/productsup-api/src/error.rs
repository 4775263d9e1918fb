use std::fmt;

use thiserror::Error;

/// Classification of a non-2xx platform response by status code.
///
/// The platform documents a fixed set of failure statuses; anything outside
/// the table maps to [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400 -- the request was malformed.
    BadRequest,
    /// 401 -- invalid authentication token.
    Unauthorized,
    /// 403 -- the entity requested is hidden for administrators only.
    Forbidden,
    /// 404 -- the specified entity could not be found.
    NotFound,
    /// 405 -- the entity was accessed with an invalid method.
    MethodNotAllowed,
    /// 406 -- a format other than JSON was requested.
    NotAcceptable,
    /// 410 -- the entity requested has been removed from the servers.
    Gone,
    /// 500 -- temporarily offline for maintenance.
    InternalServer,
    /// Any other non-2xx status.
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status code using the platform's documented table.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            406 => Self::NotAcceptable,
            410 => Self::Gone,
            500 => Self::InternalServer,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::NotAcceptable => "not acceptable",
            Self::Gone => "gone",
            Self::InternalServer => "internal server error",
            Self::Other => "unexpected status",
        };
        f.write_str(text)
    }
}

/// Top-level error type for the `productsup-api` crate.
///
/// Transport-level failures carry the HTTP status and the server-supplied
/// message; body-level failures (`success: false` under a 2xx status) are a
/// distinct variant so callers can branch on them programmatically.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-2xx response, classified by the platform's status table.
    #[error("{kind} (HTTP {status}): {message}")]
    Api {
        kind: ApiErrorKind,
        status: u16,
        message: String,
    },

    /// 2xx response whose body signalled `success: false`.
    #[error("platform rejected the request: {message}")]
    Platform { message: String },

    /// Site lookup hit a 404.
    #[error("site {site_id} not found")]
    SiteNotFound { site_id: u64 },

    /// Site lookup returned 2xx with an empty `Sites` payload.
    /// Distinct from [`SiteNotFound`](Self::SiteNotFound): the entity
    /// nominally exists but the platform returned nothing for it.
    #[error("site {site_id} returned an empty payload")]
    EmptySite { site_id: u64 },

    /// Project lookup returned 2xx with an empty `Projects` payload.
    #[error("project {project_id} not found")]
    ProjectNotFound { project_id: u64 },

    /// Credentials contain bytes that cannot appear in an HTTP header.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status code behind this error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error, at either the
    /// transport or the domain level.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api {
                kind: ApiErrorKind::NotFound,
                ..
            }
            | Self::SiteNotFound { .. }
            | Self::ProjectNotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
