// crates/imagewall-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Tests for argument parsing and decision rendering.
// Purpose: Keep the CLI surface and output labels stable.
// Dependencies: clap, imagewall-config
// ============================================================================

//! ## Overview
//! Unit tests for the `imagewall` CLI definition and output helpers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test fixtures use explicit asserts, unwraps, and debug output."
)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::CommandFactory;
use clap::Parser;
use imagewall_config::DenyReason;
use imagewall_config::OriginDecision;
use tempfile::NamedTempFile;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::command_check;
use super::decision_label;
use super::run;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn parses_check_command() {
    let cli = Cli::parse_from(["imagewall", "check", "https://example.com/a.png"]);
    match cli.command {
        Commands::Check(command) => {
            assert_eq!(command.url, "https://example.com/a.png");
            assert_eq!(command.config, None);
        }
        Commands::Config { .. } => panic!("expected check command"),
    }
}

#[test]
fn parses_config_validate_with_path() {
    let cli = Cli::parse_from(["imagewall", "config", "validate", "--config", "custom.toml"]);
    match cli.command {
        Commands::Config {
            command: ConfigCommand::Validate(command),
        } => {
            assert_eq!(command.config, Some(PathBuf::from("custom.toml")));
        }
        _ => panic!("expected config validate command"),
    }
}

#[test]
fn rejects_missing_subcommand() {
    assert!(Cli::try_parse_from(["imagewall"]).is_err());
}

#[test]
fn decision_labels_are_stable() {
    assert_eq!(
        decision_label(&OriginDecision::AllowedByPattern {
            index: 2
        }),
        "allowed: images.remote_patterns[2]"
    );
    assert_eq!(
        decision_label(&OriginDecision::AllowedByDomain {
            index: 0
        }),
        "allowed: images.domains[0] (deprecated domain allow-list)"
    );
    assert_eq!(
        decision_label(&OriginDecision::Denied {
            reason: DenyReason::NoRuleMatched
        }),
        "denied: no allow-list rule matched"
    );
    assert_eq!(
        decision_label(&OriginDecision::Denied {
            reason: DenyReason::UnsupportedScheme
        }),
        "denied: unsupported url scheme"
    );
}

#[test]
fn check_denies_url_outside_allow_list() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[[images.remote_patterns]]
protocol = "https"
hostname = "images.unsplash.com"
"#,
    )
    .unwrap();
    file.flush().unwrap();
    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::parse_from([
        "imagewall",
        "check",
        "https://cdn.attacker.example/a.png",
        "--config",
        path.as_str(),
    ]);
    let code = run(cli).unwrap();
    assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
}

#[test]
fn check_fails_on_invalid_config() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[[images.remote_patterns]]
protocol = "https"
hostname = "evil.com/../x"
"#,
    )
    .unwrap();
    file.flush().unwrap();
    let command = super::CheckCommand {
        url: "https://example.com/a.png".to_string(),
        config: Some(file.path().to_path_buf()),
    };
    let result = command_check(&command);
    assert!(result.is_err());
}
