//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `intelowl` binary.

use clap::{Parser, Subcommand, ValueEnum};

/// IntelOwl API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "intelowl", about = "IntelOwl API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Per-request timeout in seconds (overrides INTELOWL_TIMEOUT_SECS).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by id or name.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Numeric id (tags, jobs) or name (analyzers, connectors, playbooks).
        id: String,
    },

    /// List all entities of a type.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number for jobs (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Page size for jobs.
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Create a tag.
    Create {
        /// The type of entity to create (only tags).
        entity: Entity,

        /// Tag label.
        #[arg(long)]
        label: String,

        /// Tag colour, e.g. "#1c71d8".
        #[arg(long)]
        color: String,
    },

    /// Update a tag.
    Update {
        /// The type of entity to update (only tags).
        entity: Entity,

        /// The id of the entity to update.
        id: u64,

        /// New label.
        #[arg(long)]
        label: Option<String>,

        /// New colour.
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a tag or job.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The id of the entity to delete.
        id: u64,
    },

    /// Check whether an analyzer or connector is healthy.
    HealthCheck {
        /// Analyzer or connector.
        entity: Entity,

        /// Plugin name.
        name: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A job tag.
    #[value(alias = "tags")]
    Tag,
    /// An analysis job.
    #[value(alias = "jobs")]
    Job,
    /// An analyzer plugin.
    #[value(alias = "analyzers")]
    Analyzer,
    /// A connector plugin.
    #[value(alias = "connectors")]
    Connector,
    /// A playbook.
    #[value(alias = "playbooks")]
    Playbook,
}
