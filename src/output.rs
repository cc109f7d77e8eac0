//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Analyzer, Connector, Job, Playbook, Tag};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

impl PrettyPrint for Tag {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Tag #{}", self.id));
        lines.push(format!("Label:          {}", self.label));
        lines.push(format!("Color:          {}", self.color));
        lines.join("\n")
    }
}

impl PrettyPrint for Job {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Job #{}", self.id));
        lines.push(format!("Subject:        {}", self.subject()));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("TLP:            {}", self.tlp));

        if !self.user.username.is_empty() {
            lines.push(format!("User:           {}", self.user.username));
        }

        if let Some(ref received) = self.received_request_time {
            lines.push(format!("Received:       {}", received.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(secs) = self.process_time {
            lines.push(format!("Process time:   {secs:.2}s"));
        }

        lines.push(format!("Analyzers:      {}", join_or_dash(&self.analyzers_to_execute)));
        lines.push(format!("Connectors:     {}", join_or_dash(&self.connectors_to_execute)));

        if !self.tags.is_empty() {
            let labels: Vec<String> = self.tags.iter().map(|t| t.label.clone()).collect();
            lines.push(format!("Tags:           {}", labels.join(", ")));
        }

        for error in &self.errors {
            lines.push(format!("Error:          {error}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Analyzer {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Analyzer: {}", self.name));
        lines.push(format!("Type:           {:?}", self.analyzer_type));
        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }
        if !self.observable_supported.is_empty() {
            lines.push(format!("Observables:    {}", self.observable_supported.join(", ")));
        }
        lines.push(format!("Maximum TLP:    {}", self.maximum_tlp));
        if self.disabled {
            lines.push("State:          disabled".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Connector {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Connector: {}", self.name));
        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }
        lines.push(format!("Maximum TLP:    {}", self.maximum_tlp));
        lines.push(format!(
            "Run on failure: {}",
            if self.run_on_failure { "yes" } else { "no" }
        ));
        if self.disabled {
            lines.push("State:          disabled".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Playbook {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Playbook: {}", self.name));
        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }
        lines.push(format!("Types:          {}", join_or_dash(&self.supported_types)));
        lines.push(format!("Analyzers:      {}", join_or_dash(&self.analyzers)));
        lines.push(format!("Connectors:     {}", join_or_dash(&self.connectors)));
        lines.join("\n")
    }
}
