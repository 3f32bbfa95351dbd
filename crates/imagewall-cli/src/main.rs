// crates/imagewall-cli/src/main.rs
// ============================================================================
// Module: Imagewall CLI Entry Point
// Description: Command-line tooling for the image origin allow-list.
// Purpose: Validate configs, generate artifacts, and evaluate URLs.
// Dependencies: clap, imagewall-config, serde_json, url
// ============================================================================

//! ## Overview
//! The `imagewall` binary validates `imagewall.toml` files, prints the config
//! schema and canonical example, keeps the generated reference docs in sync,
//! and evaluates URLs against the configured origin policy. Exit codes are
//! meaningful: `check` exits non-zero when a URL is denied.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use imagewall_config::DenyReason;
use imagewall_config::ImagewallConfig;
use imagewall_config::OriginDecision;
use imagewall_config::OriginPolicy;
use imagewall_config::config_schema;
use imagewall_config::config_toml_example;
use imagewall_config::verify_config_docs;
use imagewall_config::write_config_docs;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "imagewall", version, about = "Remote image origin allow-list tooling")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Evaluate a URL against the configured origin policy.
    Check(CheckCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigValidateCommand),
    /// Print the configuration JSON schema.
    Schema,
    /// Print the canonical example configuration.
    Example,
    /// Configuration reference docs utilities.
    Docs {
        /// Selected docs subcommand.
        #[command(subcommand)]
        command: DocsCommand,
    },
}

/// Docs subcommands.
#[derive(Subcommand, Debug)]
enum DocsCommand {
    /// Generate the configuration reference docs.
    Generate(DocsOutputCommand),
    /// Verify the configuration reference docs are up to date.
    Check(DocsOutputCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Arguments for docs generation and verification.
#[derive(Args, Debug)]
struct DocsOutputCommand {
    /// Output path for the generated docs.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Arguments for URL evaluation.
#[derive(Args, Debug)]
struct CheckCommand {
    /// URL to evaluate.
    url: String,
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates a CLI error from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for CLI command handlers.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("error: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed CLI to command handlers.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Config { command } => command_config(command),
        Commands::Check(command) => command_check(&command),
    }
}

// ============================================================================
// SECTION: Command Handlers
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Schema => command_config_schema(),
        ConfigCommand::Example => command_config_example(),
        ConfigCommand::Docs { command } => command_config_docs(&command),
    }
}

/// Loads and validates a configuration file.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = ImagewallConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let summary = format!(
        "config ok: {} domains, {} remote patterns",
        config.images.domains.len(),
        config.images.remote_patterns.len()
    );
    write_stdout_line(&summary).map_err(output_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the configuration JSON schema.
fn command_config_schema() -> CliResult<ExitCode> {
    let schema = serde_json::to_string_pretty(&config_schema())
        .map_err(|err| CliError::new(format!("schema render failed: {err}")))?;
    write_stdout_line(&schema).map_err(output_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the canonical example configuration.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_line(config_toml_example().trim_end()).map_err(output_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Generates or verifies the configuration reference docs.
fn command_config_docs(command: &DocsCommand) -> CliResult<ExitCode> {
    match command {
        DocsCommand::Generate(args) => {
            write_config_docs(args.out.as_deref())
                .map_err(|err| CliError::new(err.to_string()))?;
            write_stdout_line("docs generated").map_err(output_error)?;
        }
        DocsCommand::Check(args) => {
            verify_config_docs(args.out.as_deref())
                .map_err(|err| CliError::new(err.to_string()))?;
            write_stdout_line("docs ok").map_err(output_error)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Evaluates a URL against the configured origin policy.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let config = ImagewallConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let policy = OriginPolicy::from_config(&config.images)
        .map_err(|err| CliError::new(err.to_string()))?;
    let url =
        Url::parse(&command.url).map_err(|err| CliError::new(format!("invalid url: {err}")))?;
    let decision = policy.evaluate(&url);
    write_stdout_line(&decision_label(&decision)).map_err(output_error)?;
    if decision.is_allowed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Renders an origin decision as a stable one-line label.
fn decision_label(decision: &OriginDecision) -> String {
    match decision {
        OriginDecision::AllowedByPattern { index } => {
            format!("allowed: images.remote_patterns[{index}]")
        }
        OriginDecision::AllowedByDomain { index } => {
            format!("allowed: images.domains[{index}] (deprecated domain allow-list)")
        }
        OriginDecision::Denied { reason } => match reason {
            DenyReason::UnsupportedScheme => "denied: unsupported url scheme".to_string(),
            DenyReason::MissingHost => "denied: url has no hostname".to_string(),
            DenyReason::NoRuleMatched => "denied: no allow-list rule matched".to_string(),
        },
    }
}

/// Writes a line to stdout.
fn write_stdout_line(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(line.as_bytes())?;
    stdout.write_all(b"\n")
}

/// Writes a line to stderr.
fn write_stderr_line(line: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    stderr.write_all(line.as_bytes())?;
    stderr.write_all(b"\n")
}

/// Maps an output stream failure to a CLI error.
fn output_error(err: io::Error) -> CliError {
    CliError::new(format!("failed to write output: {err}"))
}
