// Platform API response types
//
// Every endpoint wraps its payload in the same envelope; the resource key
// (`Projects`, `Sites`, `Channels`, `Importhistory`, `Errors`) varies per
// endpoint. Fields use `#[serde(default)]` liberally because the API is
// inconsistent about field presence across resources.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datetime::{de_flexible, de_flexible_opt};
use crate::error::Error;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard platform response envelope.
///
/// ```json
/// { "success": true, "Projects": [ ... ], "error": "optional", "message": "optional" }
/// ```
///
/// The resource collection lives under a per-endpoint key, captured in
/// [`payload`](Self::payload) via `#[serde(flatten)]`. A 2xx response with
/// `success: false` is a body-level failure, distinct from transport errors.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Everything else in the body, keyed by resource name.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Envelope {
    /// The server-supplied failure text: `error` first, then `message`.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request was not successful".into())
    }

    /// Fail with [`Error::Platform`] if the body signalled `success: false`.
    pub fn ensure_success(&self) -> Result<(), Error> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Platform {
                message: self.failure_message(),
            })
        }
    }

    /// Decode the record collection under `resource`.
    ///
    /// An absent or null key is an empty collection, not an error -- the
    /// platform omits the key when there is nothing to return.
    pub fn records<T: for<'de> Deserialize<'de>>(
        &mut self,
        resource: &str,
    ) -> Result<Vec<T>, Error> {
        match self.payload.remove(resource) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Vec::<T>::deserialize(&value).map_err(|e| Error::Deserialization {
                message: format!("invalid {resource} payload: {e}"),
                body: value.to_string(),
            }),
        }
    }
}

// ── Project ──────────────────────────────────────────────────────────

/// Project record from `/projects`.
///
/// Projects are the top-level grouping entity; sites live beneath them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "id")]
    pub project_id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "de_flexible")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// A site's owning project: a bare id in shallow listings, the fully
/// resolved record after a deep fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProjectRef {
    Id(u64),
    Full(Project),
}

impl ProjectRef {
    /// The project id, regardless of resolution depth.
    pub fn id(&self) -> u64 {
        match self {
            Self::Id(id) => *id,
            Self::Full(project) => project.project_id,
        }
    }
}

// ── Site enums ───────────────────────────────────────────────────────

/// Operational status of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    /// Fully operational; data can be pushed via the API and the site
    /// will both import and export.
    Active,
    /// Accepts and imports data, but will not export.
    PausedUpload,
    /// Blocks any data sent via the API; neither imports nor exports run.
    Disabled,
}

impl SiteStatus {
    /// The wire representation of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PausedUpload => "paused_upload",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state reported for a site and for channel export runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteProcessingStatus {
    Running,
    Done,
}

// ── Site wire record ─────────────────────────────────────────────────

/// Raw site record as returned under the `Sites` key.
///
/// Shared by the shallow listing and the deep fetch; the deep fetch
/// resolves `project_id` and attaches the nested collections afterwards.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SiteRecord {
    pub id: u64,
    pub title: String,
    pub status: SiteStatus,
    pub project_id: u64,
    #[serde(default)]
    pub import_schedule: String,
    #[serde(default)]
    pub id_column: String,
    pub processing_status: SiteProcessingStatus,
    #[serde(default, deserialize_with = "de_flexible")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub links: Vec<Value>,
}

// ── Site aggregate ───────────────────────────────────────────────────

/// A site, the smallest entity below projects on the platform.
///
/// Deep fetches ([`get_site`](crate::PlatformClient::get_site)) return this
/// fully assembled: project resolved, channels (with export history), import
/// history, and errors embedded. Shallow listings leave `project` as a bare
/// id and the nested collections empty. Treat as an immutable value object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub site_id: u64,
    pub title: String,
    pub status: SiteStatus,
    pub project: ProjectRef,
    pub import_schedule: String,
    pub id_column: String,
    pub processing_status: SiteProcessingStatus,
    pub created_at: NaiveDateTime,
    pub import_history: Vec<SiteImport>,
    pub errors: Vec<SiteError>,
    pub channels: Vec<SiteChannel>,
    pub links: Vec<Value>,
}

impl Site {
    /// Build a shallow site from a listing record: project stays a bare
    /// reference, nested collections stay empty.
    pub(crate) fn shallow(record: SiteRecord) -> Self {
        Self {
            site_id: record.id,
            title: record.title,
            status: record.status,
            project: ProjectRef::Id(record.project_id),
            import_schedule: record.import_schedule,
            id_column: record.id_column,
            processing_status: record.processing_status,
            created_at: record.created_at,
            import_history: Vec::new(),
            errors: Vec::new(),
            channels: Vec::new(),
            links: record.links,
        }
    }
}

// ── Site sub-resources ───────────────────────────────────────────────

/// One row of a site's import history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteImport {
    #[serde(rename = "id")]
    pub import_id: u64,
    #[serde(default)]
    pub site_id: u64,
    #[serde(default, deserialize_with = "de_flexible")]
    pub import_time: NaiveDateTime,
    #[serde(default, deserialize_with = "de_flexible")]
    pub import_time_utc: NaiveDateTime,
    #[serde(default)]
    pub product_count: i64,
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// One export run of a site channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteChannelHistory {
    #[serde(rename = "id")]
    pub history_id: u64,
    #[serde(default)]
    pub site_id: u64,
    #[serde(default)]
    pub site_channel_id: u64,
    #[serde(default, deserialize_with = "de_flexible")]
    pub export_time: NaiveDateTime,
    #[serde(default, deserialize_with = "de_flexible")]
    pub export_start: NaiveDateTime,
    #[serde(default)]
    pub product_count: i64,
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub product_count_new: i64,
    #[serde(default)]
    pub product_count_modified: i64,
    #[serde(default)]
    pub product_count_deleted: i64,
    #[serde(default)]
    pub product_count_unchanged: i64,
    #[serde(default)]
    pub uploaded: i64,
    #[serde(default)]
    pub product_count_now: i64,
    #[serde(default)]
    pub product_count_previous: i64,
    #[serde(default)]
    pub product_count_skipped: i64,
    pub process_status: SiteProcessingStatus,
}

/// An export channel attached to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteChannel {
    #[serde(rename = "id")]
    pub entity_id: u64,
    #[serde(default)]
    pub site_id: u64,
    #[serde(default)]
    pub channel_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub export_name: String,
    #[serde(default)]
    pub feed_destinations: Vec<Value>,
    /// Filled by a dependent call during deep assembly; the channels
    /// endpoint itself does not include it.
    #[serde(default)]
    pub export_history: Vec<SiteChannelHistory>,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// Page wrapper of the channel history endpoint: the history rows sit
/// inside the first element of a `Channels` collection.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChannelHistoryPage {
    #[serde(default)]
    pub history: Vec<SiteChannelHistory>,
}

/// One error record attached to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteError {
    #[serde(rename = "id")]
    pub error_id: u64,
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub error: i64,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub site_id: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "de_flexible_opt")]
    pub datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub links: Vec<Value>,
}
