//! Job model and job-specific operations.
//!
//! A job is one analysis run over an observable or a file. Jobs are created
//! through [`AnalysisService`](crate::AnalysisService), read and deleted
//! through the generic service, and controlled with the operations below.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::Result;
use crate::models::analysis::Tlp;
use crate::models::tag::Tag;
use crate::pagination::{Page, PageEnvelope};
use crate::request::ApiRequest;
use crate::service::ResourceService;
use crate::traits::{Deletable, Resource};

/// Default page size for job listing.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// Lifecycle state of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    ReportedWithoutFails,
    ReportedWithFails,
    Killed,
    Failed,
    /// A status this client does not know yet.
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Returns true once the job will not change any more.
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

/// State of a single plugin run within a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pending,
    Running,
    Success,
    Failed,
    Killed,
    #[serde(other)]
    Unknown,
}

/// The user that submitted a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobUser {
    pub username: String,
}

/// Output of one analyzer or connector within a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginReport {
    pub name: String,
    pub status: ReportStatus,
    /// Plugin-specific report body.
    #[serde(default)]
    pub report: serde_json::Value,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub process_time: Option<f64>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub runtime_configuration: serde_json::Value,
}

/// An analysis job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    #[serde(default)]
    pub user: JobUser,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Seconds the whole analysis took, once finished.
    #[serde(default)]
    pub process_time: Option<f64>,
    /// True for file submissions.
    #[serde(default)]
    pub is_sample: bool,
    #[serde(default)]
    pub md5: String,
    #[serde(default)]
    pub observable_name: String,
    #[serde(default)]
    pub observable_classification: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_mimetype: String,
    pub status: JobStatus,
    #[serde(default)]
    pub analyzers_requested: Vec<String>,
    #[serde(default)]
    pub connectors_requested: Vec<String>,
    #[serde(default)]
    pub analyzers_to_execute: Vec<String>,
    #[serde(default)]
    pub connectors_to_execute: Vec<String>,
    #[serde(default)]
    pub playbook_requested: Option<String>,
    #[serde(default)]
    pub received_request_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_analysis_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tlp: Tlp,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub analyzer_reports: Vec<PluginReport>,
    #[serde(default)]
    pub connector_reports: Vec<PluginReport>,
}

impl Job {
    /// The analysed observable name, or the file name for samples.
    pub fn subject(&self) -> &str {
        if self.is_sample {
            &self.file_name
        } else {
            &self.observable_name
        }
    }
}

impl Resource for Job {
    type Id = u64;
    const COLLECTION: &'static str = "api/jobs";
}

impl Deletable for Job {}

/// Service for `api/jobs`.
pub type JobService = ResourceService<Job>;

/// Plugin family addressed by per-plugin job controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluginKind {
    Analyzer,
    Connector,
}

impl PluginKind {
    fn segment(self) -> &'static str {
        match self {
            Self::Analyzer => "analyzer",
            Self::Connector => "connector",
        }
    }
}

impl ResourceService<Job> {
    /// Fetch one page of jobs (1-indexed).
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_page(&self, ctx: &Context, page: u32, page_size: u32) -> Result<Page<Job>> {
        let request = ApiRequest::get(Job::COLLECTION)
            .query("page", page)
            .query("page_size", page_size);
        let envelope: PageEnvelope<Job> = self.client().fetch(ctx, request).await?;
        Ok(Page::from_envelope(envelope, page, page_size))
    }

    /// Fetch every job, following pages until none are left.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_all(&self, ctx: &Context) -> Result<Vec<Job>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = self.list_page(ctx, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more;
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }

    /// Stop a running job. Returns `true` on `204 No Content`.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn kill(&self, ctx: &Context, id: u64) -> Result<bool> {
        let request = ApiRequest::patch(format!("{}/kill", Job::item_path(&id)))
            .expect(&[StatusCode::NO_CONTENT]);
        self.client().no_content(ctx, request).await
    }

    /// Download the file a sample job analysed.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn download_sample(&self, ctx: &Context, id: u64) -> Result<Vec<u8>> {
        let request = ApiRequest::get(format!("{}/download_sample", Job::item_path(&id)));
        Ok(self.client().execute(ctx, request).await?.into_body())
    }

    /// Stop one analyzer within a job.
    pub async fn kill_analyzer(&self, ctx: &Context, id: u64, name: &str) -> Result<bool> {
        self.plugin_action(ctx, id, PluginKind::Analyzer, name, "kill").await
    }

    /// Re-run one failed analyzer within a job.
    pub async fn retry_analyzer(&self, ctx: &Context, id: u64, name: &str) -> Result<bool> {
        self.plugin_action(ctx, id, PluginKind::Analyzer, name, "retry").await
    }

    /// Stop one connector within a job.
    pub async fn kill_connector(&self, ctx: &Context, id: u64, name: &str) -> Result<bool> {
        self.plugin_action(ctx, id, PluginKind::Connector, name, "kill").await
    }

    /// Re-run one failed connector within a job.
    pub async fn retry_connector(&self, ctx: &Context, id: u64, name: &str) -> Result<bool> {
        self.plugin_action(ctx, id, PluginKind::Connector, name, "retry").await
    }

    #[tracing::instrument(skip(self, ctx))]
    async fn plugin_action(
        &self,
        ctx: &Context,
        id: u64,
        kind: PluginKind,
        name: &str,
        action: &str,
    ) -> Result<bool> {
        let path = format!(
            "{}/{}/{}/{}",
            Job::item_path(&id),
            kind.segment(),
            urlencoding::encode(name),
            action
        );
        let request = ApiRequest::patch(path).expect(&[StatusCode::NO_CONTENT]);
        self.client().no_content(ctx, request).await
    }
}
