//! Analyzer, connector and playbook configurations.
//!
//! These are read-only from the client's point of view: they can be listed,
//! fetched by name and (for analyzers and connectors) health-checked.

use serde::{Deserialize, Serialize};

use crate::models::analysis::Tlp;
use crate::service::ResourceService;
use crate::traits::{HealthChecked, Listable, Resource};

/// Celery execution settings of a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub queue: String,
    #[serde(default)]
    pub soft_time_limit: u64,
}

/// What an analyzer accepts as input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerType {
    File,
    #[default]
    Observable,
}

/// An analyzer configured on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analyzer {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub python_module: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "type")]
    pub analyzer_type: AnalyzerType,
    /// Observable classifications accepted (for observable analyzers).
    #[serde(default)]
    pub observable_supported: Vec<String>,
    /// MIME types accepted (for file analyzers). Empty means all.
    #[serde(default)]
    pub supported_filetypes: Vec<String>,
    #[serde(default)]
    pub not_supported_filetypes: Vec<String>,
    /// Whether the analyzer runs on the file hash instead of the file.
    #[serde(default)]
    pub run_hash: bool,
    #[serde(default)]
    pub maximum_tlp: Tlp,
    #[serde(default)]
    pub config: ExecutionConfig,
}

impl Analyzer {
    /// Returns true if this analyzer accepts the given observable classification.
    pub fn supports_observable(&self, classification: &str) -> bool {
        self.analyzer_type == AnalyzerType::Observable
            && self
                .observable_supported
                .iter()
                .any(|c| c.eq_ignore_ascii_case(classification))
    }
}

impl Resource for Analyzer {
    type Id = String;
    const COLLECTION: &'static str = "api/analyzer";
}

impl Listable for Analyzer {}

impl HealthChecked for Analyzer {}

/// Service for `api/analyzer`.
pub type AnalyzerService = ResourceService<Analyzer>;

/// A connector configured on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub python_module: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub maximum_tlp: Tlp,
    /// Whether the connector also runs for jobs that failed.
    #[serde(default)]
    pub run_on_failure: bool,
    #[serde(default)]
    pub config: ExecutionConfig,
}

impl Resource for Connector {
    type Id = String;
    const COLLECTION: &'static str = "api/connector";
}

impl Listable for Connector {}

impl HealthChecked for Connector {}

/// Service for `api/connector`.
pub type ConnectorService = ResourceService<Connector>;

/// A named set of analyzers and connectors run together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Input kinds the playbook accepts (`file`, `ip`, `domain`, ...).
    #[serde(rename = "type", default)]
    pub supported_types: Vec<String>,
    #[serde(default)]
    pub analyzers: Vec<String>,
    #[serde(default)]
    pub connectors: Vec<String>,
    #[serde(default)]
    pub runtime_configuration: serde_json::Value,
    #[serde(default)]
    pub disabled: bool,
}

impl Resource for Playbook {
    type Id = String;
    const COLLECTION: &'static str = "api/playbook";
}

impl Listable for Playbook {}

/// Service for `api/playbook`.
pub type PlaybookService = ResourceService<Playbook>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_deserialize() {
        let analyzer: Analyzer = serde_json::from_value(serde_json::json!({
            "name": "Classic_DNS",
            "description": "Retrieve current domain resolution",
            "python_module": "dns.dns_resolvers.classic_dns_resolver.ClassicDNSResolver",
            "disabled": false,
            "type": "observable",
            "observable_supported": ["ip", "domain", "url"],
            "maximum_tlp": "CLEAR",
            "config": {"queue": "default", "soft_time_limit": 30}
        }))
        .unwrap();

        assert_eq!(analyzer.analyzer_type, AnalyzerType::Observable);
        assert!(analyzer.supports_observable("DOMAIN"));
        assert!(!analyzer.supports_observable("hash"));
        assert_eq!(analyzer.config.soft_time_limit, 30);
    }

    #[test]
    fn test_file_analyzer_never_supports_observables() {
        let analyzer: Analyzer = serde_json::from_value(serde_json::json!({
            "name": "File_Info",
            "type": "file",
            "observable_supported": ["ip"]
        }))
        .unwrap();
        assert!(!analyzer.supports_observable("ip"));
    }

    #[test]
    fn test_plugin_name_is_path_encoded() {
        assert_eq!(
            Analyzer::item_path(&"My Analyzer".to_string()),
            "api/analyzer/My%20Analyzer"
        );
    }

    #[test]
    fn test_playbook_deserialize() {
        let playbook: Playbook = serde_json::from_value(serde_json::json!({
            "name": "FREE_TO_USE_ANALYZERS",
            "type": ["ip", "domain"],
            "analyzers": ["Classic_DNS"],
            "connectors": []
        }))
        .unwrap();
        assert_eq!(playbook.supported_types, vec!["ip", "domain"]);
        assert!(!playbook.disabled);
    }
}
