// productsup-api: Async Rust client for the Productsup platform API

pub mod auth;
pub mod client;
pub mod config;
mod datetime;
pub mod error;
pub mod models;
pub mod projects;
pub mod sites;
pub mod transport;

pub use auth::{AUTH_HEADER, Credentials};
pub use client::{Method, PlatformClient};
pub use config::{DEFAULT_BASE_URL, PlatformConfig};
pub use error::{ApiErrorKind, Error};
pub use models::{
    Envelope, Project, ProjectRef, Site, SiteChannel, SiteChannelHistory, SiteError, SiteImport,
    SiteProcessingStatus, SiteStatus,
};
pub use sites::{ImportSchedule, NewSite, SiteUpdate};
pub use transport::TransportConfig;
