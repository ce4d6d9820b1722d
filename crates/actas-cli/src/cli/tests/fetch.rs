//! Tests for run and status subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run() {
    let cli = parse(&["actas", "run"]);
    assert!(matches!(cli.command, CliCommand::Run));
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_run_with_config() {
    let cli = parse(&["actas", "run", "--config", "/tmp/actas.toml"]);
    assert!(matches!(cli.command, CliCommand::Run));
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/actas.toml")));
}

#[test]
fn cli_parse_config_before_subcommand() {
    let cli = parse(&["actas", "--config", "eg2025.toml", "status"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("eg2025.toml")));
    match cli.command {
        CliCommand::Status { list_pending } => assert!(!list_pending),
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_status_list_pending() {
    match parse(&["actas", "status", "--list-pending"]).command {
        CliCommand::Status { list_pending } => assert!(list_pending),
        _ => panic!("expected Status with --list-pending"),
    }
}

#[test]
fn cli_run_takes_no_positional_args() {
    assert!(crate::cli::Cli::try_parse_from(["actas", "run", "100"]).is_err());
}
