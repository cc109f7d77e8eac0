//! Mock server state management.
//!
//! Provides the in-memory data store for the mock IntelOwl API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Analyzer, Connector, Job, JobStatus, Playbook, Tag, TagParams, UserAccess};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Ordered maps keep
/// list responses in insertion (id) order.
#[derive(Debug, Default)]
pub struct MockState {
    /// Tags indexed by id.
    pub tags: BTreeMap<u64, Tag>,

    /// Jobs indexed by id.
    pub jobs: BTreeMap<u64, Job>,

    /// Analyzers indexed by name.
    pub analyzers: BTreeMap<String, Analyzer>,

    /// Connectors indexed by name.
    pub connectors: BTreeMap<String, Connector>,

    /// Playbooks indexed by name.
    pub playbooks: BTreeMap<String, Playbook>,

    /// Plugin names whose health check reports `false`.
    pub unhealthy: Vec<String>,

    /// Uploaded file contents indexed by job id.
    pub samples: BTreeMap<u64, Vec<u8>>,

    /// Submission counters returned by `api/me/access`.
    pub access: UserAccess,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a tag to the state.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag.id, tag);
        self
    }

    /// Add a job to the state.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.insert(job.id, job);
        self
    }

    /// Add an analyzer to the state.
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzers.insert(analyzer.name.clone(), analyzer);
        self
    }

    /// Add a connector to the state.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.insert(connector.name.clone(), connector);
        self
    }

    /// Add a playbook to the state.
    pub fn with_playbook(mut self, playbook: Playbook) -> Self {
        self.playbooks.insert(playbook.name.clone(), playbook);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Create a tag, rejecting duplicate labels.
    ///
    /// Returns the new tag, or `None` if the label is taken.
    pub fn create_tag(&mut self, params: TagParams) -> Option<Tag> {
        if self.label_taken(&params.label, None) {
            return None;
        }
        let id = self.tags.keys().next_back().map_or(1, |last| last + 1);
        let tag = Tag {
            id,
            label: params.label,
            color: params.color,
        };
        self.tags.insert(id, tag.clone());
        Some(tag)
    }

    /// Replace a tag's fields.
    ///
    /// `Err(())` means the new label belongs to another tag; `Ok(None)` means
    /// no tag has this id.
    #[allow(clippy::result_unit_err)]
    pub fn update_tag(&mut self, id: u64, params: TagParams) -> Result<Option<Tag>, ()> {
        if !self.tags.contains_key(&id) {
            return Ok(None);
        }
        if self.label_taken(&params.label, Some(id)) {
            return Err(());
        }
        let tag = Tag {
            id,
            label: params.label,
            color: params.color,
        };
        self.tags.insert(id, tag.clone());
        Ok(Some(tag))
    }

    fn label_taken(&self, label: &str, except: Option<u64>) -> bool {
        self.tags
            .values()
            .any(|t| t.label == label && Some(t.id) != except)
    }

    /// Resolve tag labels to tags, skipping unknown labels.
    pub fn tags_by_label(&self, labels: &[String]) -> Vec<Tag> {
        self.tags
            .values()
            .filter(|t| labels.contains(&t.label))
            .cloned()
            .collect()
    }

    /// Insert a job and return its id.
    pub fn insert_job(&mut self, mut job: Job) -> u64 {
        let id = self.jobs.keys().next_back().map_or(1, |last| last + 1);
        job.id = id;
        self.jobs.insert(id, job);
        self.access.total_submissions += 1;
        self.access.month_submissions += 1;
        id
    }

    /// Mark a running job as killed.
    ///
    /// Returns `None` if the job does not exist and `Some(false)` if it had
    /// already finished.
    pub fn kill_job(&mut self, id: u64) -> Option<bool> {
        let job = self.jobs.get_mut(&id)?;
        if job.status.is_finished() {
            return Some(false);
        }
        job.status = JobStatus::Killed;
        Some(true)
    }

    /// Health of a plugin; `None` if no analyzer or connector has that name.
    pub fn plugin_health(&self, name: &str) -> Option<bool> {
        if !self.analyzers.contains_key(name) && !self.connectors.contains_key(name) {
            return None;
        }
        Some(!self.unhealthy.iter().any(|n| n == name))
    }
}
