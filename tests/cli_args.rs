//! CLI argument parsing tests.

use clap::Parser;
use intelowl::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["intelowl", "get", "analyzer", "Classic_DNS"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Analyzer);
            assert_eq!(id, "Classic_DNS");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_plural_alias() {
    let cli = Cli::parse_from(["intelowl", "list", "tags"]);

    match cli.command {
        Command::List { entity, page, page_size } => {
            assert_eq!(entity, Entity::Tag);
            assert_eq!(page, None);
            assert_eq!(page_size, None);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_create_subcommand() {
    let cli = Cli::parse_from([
        "intelowl", "create", "tag", "--label", "phishing", "--color", "#ff0000",
    ]);

    match cli.command {
        Command::Create { entity, label, color } => {
            assert_eq!(entity, Entity::Tag);
            assert_eq!(label, "phishing");
            assert_eq!(color, "#ff0000");
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from(["intelowl", "update", "tag", "4", "--label", "renamed"]);

    match cli.command {
        Command::Update {
            entity,
            id,
            label,
            color,
        } => {
            assert_eq!(entity, Entity::Tag);
            assert_eq!(id, 4);
            assert_eq!(label, Some("renamed".to_string()));
            assert_eq!(color, None);
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_update_requires_numeric_id() {
    let result = Cli::try_parse_from(["intelowl", "update", "tag", "abc", "--label", "x"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_delete_and_health_check() {
    let cli = Cli::parse_from(["intelowl", "delete", "job", "12"]);
    assert!(matches!(
        cli.command,
        Command::Delete {
            entity: Entity::Job,
            id: 12
        }
    ));

    let cli = Cli::parse_from(["intelowl", "health-check", "connector", "MISP"]);
    match cli.command {
        Command::HealthCheck { entity, name } => {
            assert_eq!(entity, Entity::Connector);
            assert_eq!(name, "MISP");
        }
        _ => panic!("Expected HealthCheck command"),
    }
}

#[test]
fn test_global_flags() {
    // --json before subcommand
    let cli = Cli::parse_from(["intelowl", "--json", "list", "jobs"]);
    assert!(cli.json);

    // --json and --timeout after subcommand (global flags)
    let cli = Cli::parse_from(["intelowl", "list", "jobs", "--json", "--timeout", "5"]);
    assert!(cli.json);
    assert_eq!(cli.timeout, Some(5));
}

#[test]
fn test_list_pagination_args() {
    let cli = Cli::parse_from([
        "intelowl",
        "list",
        "jobs",
        "--page",
        "2",
        "--page-size",
        "50",
    ]);

    match cli.command {
        Command::List {
            page, page_size, ..
        } => {
            assert_eq!(page, Some(2));
            assert_eq!(page_size, Some(50));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_entity_variants() {
    for (arg, expected) in [
        ("tag", Entity::Tag),
        ("job", Entity::Job),
        ("analyzer", Entity::Analyzer),
        ("connector", Entity::Connector),
        ("playbook", Entity::Playbook),
        ("playbooks", Entity::Playbook),
    ] {
        let cli = Cli::parse_from(["intelowl", "list", arg]);
        assert!(matches!(cli.command, Command::List { entity, .. } if entity == expected));
    }
}
