//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{
    Analyzer, AnalyzerType, Connector, ExecutionConfig, Job, JobStatus, JobUser, Playbook, Tag,
    Tlp,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Tag Fixtures
    // =========================================================================

    /// Create a tag.
    pub fn tag(id: u64, label: &str, color: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    // =========================================================================
    // Job Fixtures
    // =========================================================================

    /// Create a job for an observable with the given status.
    pub fn observable_job(id: u64, observable: &str, status: JobStatus) -> Job {
        Job {
            id,
            user: JobUser {
                username: "analyst".to_string(),
            },
            tags: vec![],
            process_time: None,
            is_sample: false,
            md5: String::new(),
            observable_name: observable.to_string(),
            observable_classification: "domain".to_string(),
            file_name: String::new(),
            file_mimetype: String::new(),
            status,
            analyzers_requested: vec![],
            connectors_requested: vec![],
            analyzers_to_execute: vec!["Classic_DNS".to_string()],
            connectors_to_execute: vec![],
            playbook_requested: None,
            received_request_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single(),
            finished_analysis_time: None,
            tlp: Tlp::Clear,
            errors: vec![],
            analyzer_reports: vec![],
            connector_reports: vec![],
        }
    }

    /// Create a finished job for an uploaded file.
    pub fn sample_job(id: u64, file_name: &str) -> Job {
        let mut job = Self::observable_job(id, "", JobStatus::ReportedWithoutFails);
        job.is_sample = true;
        job.observable_classification = String::new();
        job.file_name = file_name.to_string();
        job.file_mimetype = "application/octet-stream".to_string();
        job.analyzers_to_execute = vec!["File_Info".to_string()];
        job.finished_analysis_time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 30).single();
        job.process_time = Some(30.0);
        job
    }

    // =========================================================================
    // Plugin Fixtures
    // =========================================================================

    /// Create an observable analyzer.
    pub fn analyzer(name: &str, supported: &[&str]) -> Analyzer {
        Analyzer {
            name: name.to_string(),
            description: format!("{name} analyzer"),
            python_module: format!("{}.{}", name.to_lowercase(), name),
            disabled: false,
            analyzer_type: AnalyzerType::Observable,
            observable_supported: supported.iter().map(|s| s.to_string()).collect(),
            supported_filetypes: vec![],
            not_supported_filetypes: vec![],
            run_hash: false,
            maximum_tlp: Tlp::Amber,
            config: ExecutionConfig {
                queue: "default".to_string(),
                soft_time_limit: 60,
            },
        }
    }

    /// Create a connector.
    pub fn connector(name: &str) -> Connector {
        Connector {
            name: name.to_string(),
            description: format!("{name} connector"),
            python_module: format!("{}.{}", name.to_lowercase(), name),
            disabled: false,
            maximum_tlp: Tlp::Clear,
            run_on_failure: true,
            config: ExecutionConfig::default(),
        }
    }

    /// Create a playbook.
    pub fn playbook(name: &str, analyzers: &[&str]) -> Playbook {
        Playbook {
            name: name.to_string(),
            description: format!("{name} playbook"),
            supported_types: vec!["ip".to_string(), "domain".to_string()],
            analyzers: analyzers.iter().map(|s| s.to_string()).collect(),
            connectors: vec![],
            runtime_configuration: serde_json::Value::Null,
            disabled: false,
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The data a default mock server starts with.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            tags: vec![
                Self::tag(1, "TEST1", "#1c71d8"),
                Self::tag(2, "TEST2", "#1c71d7"),
                Self::tag(3, "TEST3", "#1c71d6"),
            ],
            jobs: vec![
                Self::observable_job(1, "google.com", JobStatus::ReportedWithoutFails),
                Self::observable_job(2, "8.8.8.8", JobStatus::Running),
                Self::sample_job(3, "invoice.pdf"),
            ],
            analyzers: vec![
                Self::analyzer("Classic_DNS", &["ip", "domain", "url"]),
                Self::analyzer("Robtex", &["ip", "domain"]),
            ],
            connectors: vec![Self::connector("MISP"), Self::connector("OpenCTI")],
            playbooks: vec![Self::playbook("FREE_TO_USE_ANALYZERS", &["Classic_DNS"])],
        }
    }
}

/// A set of fixtures loaded into a fresh [`MockState`](super::MockState).
pub struct DefaultScenario {
    pub tags: Vec<Tag>,
    pub jobs: Vec<Job>,
    pub analyzers: Vec<Analyzer>,
    pub connectors: Vec<Connector>,
    pub playbooks: Vec<Playbook>,
}
