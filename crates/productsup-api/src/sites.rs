// Site endpoints and aggregate assembly
//
// A deep site fetch is a multi-call composition: the base record, the
// owning project, import history, channels (plus one history call per
// channel), and errors, assembled into one immutable `Site`. The shallow
// listing deliberately skips all of that and leaves references bare.

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::models::{
    ChannelHistoryPage, Envelope, ProjectRef, Site, SiteChannel, SiteChannelHistory, SiteError,
    SiteImport, SiteRecord, SiteStatus,
};

// ── Request types ────────────────────────────────────────────────────

/// A site's import schedule, as supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSchedule {
    /// Already in the platform's wire format.
    Preformatted(String),
    /// Structured schedule; serialized as `"{timezone}\n{cron}"` with the
    /// timezone defaulting to UTC.
    Cron {
        timezone: Option<String>,
        cron: String,
    },
}

impl ImportSchedule {
    /// The wire representation sent to the platform.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Preformatted(raw) => raw.clone(),
            Self::Cron { timezone, cron } => {
                format!("{}\n{cron}", timezone.as_deref().unwrap_or("UTC"))
            }
        }
    }
}

/// Fields for creating a site. Only supplied optionals are sent.
#[derive(Debug, Clone)]
pub struct NewSite {
    pub title: String,
    pub import_schedule: ImportSchedule,
    pub reference: Option<String>,
    pub id_column: Option<String>,
    pub status: Option<SiteStatus>,
}

impl NewSite {
    pub fn new(title: impl Into<String>, import_schedule: ImportSchedule) -> Self {
        Self {
            title: title.into(),
            import_schedule,
            reference: None,
            id_column: None,
            status: None,
        }
    }
}

/// Merge-patch for editing a site: `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct SiteUpdate {
    pub title: Option<String>,
    pub reference: Option<String>,
    pub project_id: Option<u64>,
    pub id_column: Option<String>,
    pub status: Option<SiteStatus>,
    pub import_schedule: Option<ImportSchedule>,
}

// ── Endpoints ────────────────────────────────────────────────────────

impl PlatformClient {
    /// Fetch a site with everything attached: resolved project, import
    /// history, channels with per-channel export history, and errors.
    ///
    /// `GET /sites/{id}` plus the dependent sub-resource calls. A 404 on
    /// the base record fails with [`Error::SiteNotFound`]; a 2xx with an
    /// empty `Sites` payload fails with [`Error::EmptySite`]. Any dependent
    /// call failure aborts the whole assembly -- a partial `Site` is never
    /// returned.
    pub async fn get_site(&self, site_id: u64) -> Result<Site, Error> {
        let url = self.api_url(&format!("sites/{site_id}"));
        debug!(site_id, "fetching site");
        let mut envelope = match self.get(url).await {
            Ok(envelope) => envelope,
            Err(err) if err.is_not_found() => return Err(Error::SiteNotFound { site_id }),
            Err(err) => return Err(err),
        };
        let record = envelope
            .records::<SiteRecord>("Sites")?
            .into_iter()
            .next()
            .ok_or(Error::EmptySite { site_id })?;
        self.assemble_site(record).await
    }

    /// Resolve a base record into a fully populated `Site`.
    ///
    /// Call order is fixed: project, import history, channels (which pulls
    /// history per channel), errors.
    async fn assemble_site(&self, record: SiteRecord) -> Result<Site, Error> {
        let project = self.get_project(record.project_id).await?;
        let import_history = self.import_history(record.id).await?;
        let channels = self.site_channels(record.id).await?;
        let errors = self.site_errors(record.id).await?;
        Ok(Site {
            site_id: record.id,
            title: record.title,
            status: record.status,
            project: ProjectRef::Full(project),
            import_schedule: record.import_schedule,
            id_column: record.id_column,
            processing_status: record.processing_status,
            created_at: record.created_at,
            import_history,
            errors,
            channels,
            links: record.links,
        })
    }

    /// List all sites, shallow: `project` stays a bare id and the nested
    /// collections stay empty. Use [`get_site`](Self::get_site) for the
    /// deep variant.
    ///
    /// `GET /sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.api_url("sites");
        debug!("listing sites");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        let records: Vec<SiteRecord> = envelope.records("Sites")?;
        Ok(records.into_iter().map(Site::shallow).collect())
    }

    /// A site's import history, oldest-to-newest as the platform returns
    /// it. An absent payload is an empty history, not an error.
    ///
    /// `GET /sites/{id}/importhistory`
    pub async fn import_history(&self, site_id: u64) -> Result<Vec<SiteImport>, Error> {
        let url = self.api_url(&format!("sites/{site_id}/importhistory"));
        debug!(site_id, "fetching import history");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        envelope.records("Importhistory")
    }

    /// A site's export channels, each with its export history embedded
    /// (one extra call per channel).
    ///
    /// `GET /sites/{id}/channels`
    pub async fn site_channels(&self, site_id: u64) -> Result<Vec<SiteChannel>, Error> {
        let url = self.api_url(&format!("sites/{site_id}/channels"));
        debug!(site_id, "fetching channels");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        let records: Vec<SiteChannel> = envelope.records("Channels")?;
        let mut channels = Vec::with_capacity(records.len());
        for mut channel in records {
            channel.export_history = self.channel_history(site_id, channel.entity_id).await?;
            channels.push(channel);
        }
        Ok(channels)
    }

    /// Export history of one channel. The platform nests the rows inside
    /// the first element of a `Channels` collection; an empty collection
    /// is an empty history.
    ///
    /// `GET /sites/{id}/channels/{channel_id}/history`
    pub async fn channel_history(
        &self,
        site_id: u64,
        channel_id: u64,
    ) -> Result<Vec<SiteChannelHistory>, Error> {
        let url = self.api_url(&format!("sites/{site_id}/channels/{channel_id}/history"));
        debug!(site_id, channel_id, "fetching channel history");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        let pages: Vec<ChannelHistoryPage> = envelope.records("Channels")?;
        Ok(pages
            .into_iter()
            .next()
            .map(|page| page.history)
            .unwrap_or_default())
    }

    /// Error records attached to a site.
    ///
    /// `GET /sites/{id}/errors`
    pub async fn site_errors(&self, site_id: u64) -> Result<Vec<SiteError>, Error> {
        let url = self.api_url(&format!("sites/{site_id}/errors"));
        debug!(site_id, "fetching site errors");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        envelope.records("Errors")
    }

    /// Create a site under a project, returning the raw response envelope.
    /// Optional fields are only included when supplied.
    ///
    /// `POST /{project_id}/sites`
    pub async fn create_site(&self, project_id: u64, site: &NewSite) -> Result<Envelope, Error> {
        let url = self.api_url(&format!("{project_id}/sites"));
        debug!(project_id, title = %site.title, "creating site");

        let mut body = Map::new();
        body.insert("title".into(), Value::String(site.title.clone()));
        body.insert(
            "import_schedule".into(),
            Value::String(site.import_schedule.to_wire()),
        );
        if let Some(reference) = &site.reference {
            body.insert("reference".into(), Value::String(reference.clone()));
        }
        if let Some(id_column) = &site.id_column {
            body.insert("id_column".into(), Value::String(id_column.clone()));
        }
        if let Some(status) = site.status {
            body.insert("status".into(), Value::String(status.as_str().into()));
        }

        self.post(url, &Value::Object(body)).await
    }

    /// Edit a site with merge-patch semantics: the current site is
    /// deep-fetched first, supplied fields overlay the current values, and
    /// the merged document is PUT back. Returns the re-assembled `Site`
    /// from the response.
    ///
    /// `reference` is only sent when supplied -- the aggregate carries no
    /// current value to merge it against.
    ///
    /// `PUT /sites/{id}`
    pub async fn edit_site(&self, site_id: u64, update: &SiteUpdate) -> Result<Site, Error> {
        let current = self.get_site(site_id).await?;

        let mut body = Map::new();
        body.insert(
            "title".into(),
            Value::String(update.title.clone().unwrap_or(current.title)),
        );
        if let Some(reference) = &update.reference {
            body.insert("reference".into(), Value::String(reference.clone()));
        }
        body.insert(
            "project_id".into(),
            Value::from(update.project_id.unwrap_or_else(|| current.project.id())),
        );
        body.insert(
            "id_column".into(),
            Value::String(update.id_column.clone().unwrap_or(current.id_column)),
        );
        body.insert(
            "status".into(),
            Value::String(update.status.unwrap_or(current.status).as_str().into()),
        );
        body.insert(
            "import_schedule".into(),
            Value::String(
                update
                    .import_schedule
                    .as_ref()
                    .map_or(current.import_schedule, ImportSchedule::to_wire),
            ),
        );

        let url = self.api_url(&format!("sites/{site_id}"));
        debug!(site_id, "editing site");
        let mut envelope = self.put(url, &Value::Object(body)).await?;
        envelope.ensure_success()?;
        let record = envelope
            .records::<SiteRecord>("Sites")?
            .into_iter()
            .next()
            .ok_or(Error::EmptySite { site_id })?;
        self.assemble_site(record).await
    }

    /// Delete a site.
    ///
    /// `DELETE /sites/{id}`
    pub async fn delete_site(&self, site_id: u64) -> Result<(), Error> {
        let url = self.api_url(&format!("sites/{site_id}"));
        debug!(site_id, "deleting site");
        let envelope = self.delete(url).await?;
        envelope.ensure_success()
    }
}

#[cfg(test)]
mod tests {
    use super::ImportSchedule;

    #[test]
    fn cron_schedule_serializes_timezone_then_cron() {
        let schedule = ImportSchedule::Cron {
            timezone: Some("CET".into()),
            cron: "0 5 * * *".into(),
        };
        assert_eq!(schedule.to_wire(), "CET\n0 5 * * *");
    }

    #[test]
    fn cron_schedule_defaults_to_utc() {
        let schedule = ImportSchedule::Cron {
            timezone: None,
            cron: "0 5 * * *".into(),
        };
        assert_eq!(schedule.to_wire(), "UTC\n0 5 * * *");
    }

    #[test]
    fn preformatted_schedule_passes_through() {
        let schedule = ImportSchedule::Preformatted("UTC\n30 2 * * *".into());
        assert_eq!(schedule.to_wire(), "UTC\n30 2 * * *");
    }
}
