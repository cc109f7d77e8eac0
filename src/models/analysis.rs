//! Analysis submission.
//!
//! Submitting an observable or a file creates a [`Job`](crate::Job) on the
//! server; the response carries the new job's id.

use std::collections::HashMap;
use std::fmt;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::context::Context;
use crate::error::Result;
use crate::request::ApiRequest;

/// Traffic Light Protocol level restricting which plugins may see the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tlp {
    #[default]
    #[serde(alias = "WHITE")]
    Clear,
    Green,
    Amber,
    Red,
}

impl fmt::Display for Tlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Clear => "CLEAR",
            Self::Green => "GREEN",
            Self::Amber => "AMBER",
            Self::Red => "RED",
        };
        f.write_str(s)
    }
}

/// Fields shared by observable and file submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicAnalysisParams {
    pub tlp: Tlp,
    /// Per-plugin parameter overrides, keyed by plugin name.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub runtime_configuration: HashMap<String, serde_json::Value>,
    /// Analyzers to run. Empty means every compatible analyzer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analyzers_requested: Vec<String>,
    /// Connectors to run. Empty means every enabled connector.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connectors_requested: Vec<String>,
    /// Labels of existing tags to attach to the job.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags_labels: Vec<String>,
}

/// Parameters for `POST api/analyze_observable`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservableAnalysisParams {
    #[serde(flatten)]
    pub basic: BasicAnalysisParams,
    /// The observable itself (IP, domain, URL, hash, ...).
    pub observable_name: String,
    /// Classification such as `ip` or `domain`. Left empty, the server
    /// classifies the observable itself.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub observable_classification: String,
}

impl ObservableAnalysisParams {
    pub fn new(observable_name: impl Into<String>) -> Self {
        Self {
            observable_name: observable_name.into(),
            ..Default::default()
        }
    }
}

/// Parameters for `POST api/analyze_file`.
#[derive(Clone, Default, PartialEq)]
pub struct FileAnalysisParams {
    pub basic: BasicAnalysisParams,
    pub file_name: String,
    pub file: Vec<u8>,
}

impl fmt::Debug for FileAnalysisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAnalysisParams")
            .field("basic", &self.basic)
            .field("file_name", &self.file_name)
            .field("file_len", &self.file.len())
            .finish()
    }
}

impl FileAnalysisParams {
    pub fn new(file_name: impl Into<String>, file: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            file,
            ..Default::default()
        }
    }

    /// Build the multipart form the upload endpoint expects.
    ///
    /// List fields are sent as repeated parts; the runtime configuration is
    /// a JSON-encoded text part.
    fn to_form(&self) -> Result<Form> {
        let file = Part::bytes(self.file.clone()).file_name(self.file_name.clone());
        let mut form = Form::new()
            .part("file", file)
            .text("file_name", self.file_name.clone())
            .text("tlp", self.basic.tlp.to_string());

        for name in &self.basic.analyzers_requested {
            form = form.text("analyzers_requested", name.clone());
        }
        for name in &self.basic.connectors_requested {
            form = form.text("connectors_requested", name.clone());
        }
        for label in &self.basic.tags_labels {
            form = form.text("tags_labels", label.clone());
        }
        if !self.basic.runtime_configuration.is_empty() {
            let encoded = serde_json::to_string(&self.basic.runtime_configuration)
                .map_err(crate::IntelOwlError::Encode)?;
            form = form.text("runtime_configuration", encoded);
        }
        Ok(form)
    }
}

/// Server answer to an analysis submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub job_id: u64,
    pub status: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub analyzers_running: Vec<String>,
    #[serde(default)]
    pub connectors_running: Vec<String>,
}

/// Submits observables and files for analysis.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    client: ApiClient,
}

impl AnalysisService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submit an observable.
    #[tracing::instrument(skip(self, ctx, params), fields(observable = %params.observable_name))]
    pub async fn observable(
        &self,
        ctx: &Context,
        params: &ObservableAnalysisParams,
    ) -> Result<AnalysisResponse> {
        let request = ApiRequest::post("api/analyze_observable").json(params)?;
        self.client.fetch(ctx, request).await
    }

    /// Upload a file.
    #[tracing::instrument(skip(self, ctx, params), fields(file_name = %params.file_name))]
    pub async fn file(&self, ctx: &Context, params: &FileAnalysisParams) -> Result<AnalysisResponse> {
        let request = ApiRequest::post("api/analyze_file").multipart(params.to_form()?);
        self.client.fetch(ctx, request).await
    }
}
