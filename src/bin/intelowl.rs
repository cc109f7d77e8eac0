//! IntelOwl API CLI binary.
//!
//! A command-line interface for interacting with the IntelOwl API.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use intelowl::cli::{Cli, Command, Entity};
use intelowl::output::PrettyPrint;
use intelowl::{
    Analyzer, ClientOptions, Connector, Context, IntelOwlClient, IntelOwlError, Job, Page,
    Playbook, Tag, TagParams,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match build_client(cli.timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set INTELOWL_TOKEN (and INTELOWL_URL) environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(IntelOwlError::Unsupported(message)) => {
            eprintln!("Error: {message}");
            eprintln!("Hint: Run 'intelowl --help' for the supported entity and command pairs");
            ExitCode::FAILURE
        }
        Err(IntelOwlError::Client(e)) => {
            eprintln!("Error: server answered {}", e.status_code);
            eprintln!("{}", e.message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(timeout: Option<u64>) -> intelowl::Result<IntelOwlClient> {
    let mut options = ClientOptions::from_env()?;
    if let Some(secs) = timeout {
        options = options.timeout(Duration::from_secs(secs));
    }
    IntelOwlClient::new(options)
}

fn unsupported(message: &str) -> IntelOwlError {
    IntelOwlError::Unsupported(message.to_string())
}

fn parse_id(id: &str) -> intelowl::Result<u64> {
    id.parse()
        .map_err(|_| unsupported(&format!("'{id}' is not a numeric id")))
}

async fn run(client: &IntelOwlClient, cli: Cli) -> intelowl::Result<()> {
    let ctx = Context::background();
    match cli.command {
        Command::Get { entity, id } => handle_get(client, &ctx, entity, &id, cli.json).await,
        Command::List {
            entity,
            page,
            page_size,
        } => handle_list(client, &ctx, entity, page, page_size, cli.json).await,
        Command::Create {
            entity,
            label,
            color,
        } => {
            if entity != Entity::Tag {
                return Err(unsupported("only tags can be created via CLI"));
            }
            let tag = client.tags.create(&ctx, &TagParams::new(label, color)).await?;
            output_single(&tag, cli.json)
        }
        Command::Update {
            entity,
            id,
            label,
            color,
        } => {
            if entity != Entity::Tag {
                return Err(unsupported("only tags can be updated via CLI"));
            }
            // PUT replaces the whole tag, so unspecified fields keep their current value.
            let current = client.tags.get(&ctx, id).await?;
            let params = TagParams {
                label: label.unwrap_or(current.label),
                color: color.unwrap_or(current.color),
            };
            let tag = client.tags.update(&ctx, id, &params).await?;
            output_single(&tag, cli.json)
        }
        Command::Delete { entity, id } => {
            let deleted = match entity {
                Entity::Tag => client.tags.delete(&ctx, id).await?,
                Entity::Job => client.jobs.delete(&ctx, id).await?,
                _ => return Err(unsupported("only tags and jobs can be deleted via CLI")),
            };
            println!("{}", if deleted { "deleted" } else { "not deleted" });
            Ok(())
        }
        Command::HealthCheck { entity, name } => {
            let healthy = match entity {
                Entity::Analyzer => client.analyzers.health_check(&ctx, &name).await?,
                Entity::Connector => client.connectors.health_check(&ctx, &name).await?,
                _ => return Err(unsupported("health checks exist for analyzers and connectors")),
            };
            if cli.json {
                println!("{}", serde_json::json!({ "name": name, "status": healthy }));
            } else {
                println!("{name}: {}", if healthy { "healthy" } else { "unhealthy" });
            }
            Ok(())
        }
    }
}

async fn handle_get(
    client: &IntelOwlClient,
    ctx: &Context,
    entity: Entity,
    id: &str,
    json: bool,
) -> intelowl::Result<()> {
    match entity {
        Entity::Tag => output_single(&client.tags.get(ctx, parse_id(id)?).await?, json),
        Entity::Job => output_single(&client.jobs.get(ctx, parse_id(id)?).await?, json),
        Entity::Analyzer => output_single(&client.analyzers.get(ctx, id.to_string()).await?, json),
        Entity::Connector => {
            output_single(&client.connectors.get(ctx, id.to_string()).await?, json)
        }
        Entity::Playbook => output_single(&client.playbooks.get(ctx, id.to_string()).await?, json),
    }
}

async fn handle_list(
    client: &IntelOwlClient,
    ctx: &Context,
    entity: Entity,
    page: Option<u32>,
    page_size: Option<u32>,
    json: bool,
) -> intelowl::Result<()> {
    match entity {
        Entity::Tag => output_list(&client.tags.list(ctx).await?, json, |t| TagRow::from(t)),
        Entity::Job => {
            let page = page.unwrap_or(1);
            let page_size = page_size.unwrap_or(20);
            let jobs = client.jobs.list_page(ctx, page, page_size).await?;
            output_page(&jobs, json)
        }
        Entity::Analyzer => {
            output_list(&client.analyzers.list(ctx).await?, json, |a| AnalyzerRow::from(a))
        }
        Entity::Connector => {
            output_list(&client.connectors.list(ctx).await?, json, |c| ConnectorRow::from(c))
        }
        Entity::Playbook => {
            output_list(&client.playbooks.list(ctx).await?, json, |p| PlaybookRow::from(p))
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> intelowl::Result<()> {
    if json {
        println!("{}", to_json(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> intelowl::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page(page: &Page<Job>, json: bool) -> intelowl::Result<()> {
    if json {
        println!("{}", to_json(&page.items)?);
    } else {
        let rows: Vec<JobRow> = page.items.iter().map(|j| JobRow::from(j)).collect();
        println!("{}", Table::new(rows));
        println!(
            "\nPage {}/{} ({} total jobs)",
            page.page,
            page.total_pages.max(1),
            page.total
        );
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> intelowl::Result<String> {
    serde_json::to_string_pretty(value).map_err(IntelOwlError::Encode)
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct TagRow {
    id: u64,
    label: String,
    color: String,
}

impl From<&Tag> for TagRow {
    fn from(t: &Tag) -> Self {
        Self {
            id: t.id,
            label: t.label.clone(),
            color: t.color.clone(),
        }
    }
}

#[derive(Tabled)]
struct JobRow {
    id: u64,
    subject: String,
    status: String,
    tlp: String,
}

impl From<&Job> for JobRow {
    fn from(j: &Job) -> Self {
        Self {
            id: j.id,
            subject: j.subject().to_string(),
            status: format!("{:?}", j.status),
            tlp: j.tlp.to_string(),
        }
    }
}

#[derive(Tabled)]
struct AnalyzerRow {
    name: String,
    #[tabled(rename = "type")]
    analyzer_type: String,
    disabled: bool,
}

impl From<&Analyzer> for AnalyzerRow {
    fn from(a: &Analyzer) -> Self {
        Self {
            name: a.name.clone(),
            analyzer_type: format!("{:?}", a.analyzer_type).to_lowercase(),
            disabled: a.disabled,
        }
    }
}

#[derive(Tabled)]
struct ConnectorRow {
    name: String,
    maximum_tlp: String,
    disabled: bool,
}

impl From<&Connector> for ConnectorRow {
    fn from(c: &Connector) -> Self {
        Self {
            name: c.name.clone(),
            maximum_tlp: c.maximum_tlp.to_string(),
            disabled: c.disabled,
        }
    }
}

#[derive(Tabled)]
struct PlaybookRow {
    name: String,
    analyzers: usize,
    connectors: usize,
}

impl From<&Playbook> for PlaybookRow {
    fn from(p: &Playbook) -> Self {
        Self {
            name: p.name.clone(),
            analyzers: p.analyzers.len(),
            connectors: p.connectors.len(),
        }
    }
}
