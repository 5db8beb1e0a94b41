// crates/tfcrd-cli/src/main.rs
// ============================================================================
// Module: tfcrd CLI Entry Point
// Description: Command dispatcher for type builds and log diagnosis.
// Purpose: Provide a thin, fail-closed front end over the tfcrd libraries.
// Dependencies: clap, serde, serde_json, thiserror, tfcrd-*
// ============================================================================

//! ## Overview
//! The `tfcrd` binary loads a provider schema document and a resource
//! configuration, builds the parameter and observation types, and prints them
//! as struct declarations or JSON. It also classifies JSON-formatted
//! operation logs. Inputs are untrusted: file reads are size-bounded and all
//! failures are reported on stderr with a non-zero exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use tfcrd_config::ResourceConfig;
use tfcrd_config::config_toml_example;
use tfcrd_diagnostics::Operation;
use tfcrd_diagnostics::OperationFailed;
use tfcrd_diagnostics::classify;
use tfcrd_schema::SchemaDocument;
use tfcrd_types::BuildAuditSink;
use tfcrd_types::BuildFileAuditSink;
use tfcrd_types::BuildNoopAuditSink;
use tfcrd_types::BuildStderrAuditSink;
use tfcrd_types::Builder;
use tfcrd_types::Generated;
use tfcrd_types::render::render_types;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of an operation log accepted by `diagnose`.
const MAX_LOG_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: CLI Definitions
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tfcrd", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build parameter and observation types for one resource.
    Build(BuildCommand),
    /// Classify an operation log into a failure report.
    Diagnose(DiagnoseCommand),
    /// Print an example resource configuration.
    ConfigExample,
}

/// Arguments for the `build` command.
#[derive(Args, Debug)]
struct BuildCommand {
    /// Provider schema document (JSON).
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
    /// Resource configuration (TOML); falls back to `TFCRD_CONFIG`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Destination for build audit events.
    #[arg(long, value_enum, default_value_t = AuditMode::None)]
    audit: AuditMode,
    /// Audit log path used with `--audit file`.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
}

/// Arguments for the `diagnose` command.
#[derive(Args, Debug)]
struct DiagnoseCommand {
    /// Operation that produced the log.
    #[arg(long, value_enum)]
    operation: OperationArg,
    /// JSON-lines operation log.
    #[arg(long, value_name = "PATH")]
    logs: PathBuf,
}

/// Output formats for `build`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Struct declarations with field documentation.
    Text,
    /// Generated model plus the updated resource configuration.
    Json,
}

/// Audit sink selection for `build`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AuditMode {
    /// Discard audit events.
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `--audit-log`.
    File,
}

/// Operations accepted by `diagnose`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OperationArg {
    /// Apply.
    Apply,
    /// Plan.
    Plan,
    /// Refresh.
    Refresh,
    /// Destroy.
    Destroy,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(command) => command_build(&command),
        Commands::Diagnose(command) => command_diagnose(&command),
        Commands::ConfigExample => command_config_example(),
    }
}

// ============================================================================
// SECTION: Build Command
// ============================================================================

/// JSON report emitted by `build --format json`.
#[derive(Debug, Serialize)]
struct BuildReport<'a> {
    /// Generated types and handles.
    generated: &'a Generated,
    /// Resource configuration after the builder's registry writes.
    config: &'a ResourceConfig,
}

/// Executes the `build` command.
fn command_build(command: &BuildCommand) -> CliResult<ExitCode> {
    let output = build_output(command)?;
    write_stdout_line(output.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads inputs, runs the builder, and formats the result.
fn build_output(command: &BuildCommand) -> CliResult<String> {
    let document = SchemaDocument::load(&command.schema).map_err(|err| {
        CliError::new(format!("failed to load schema {}: {err}", command.schema.display()))
    })?;
    let mut config = ResourceConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load resource config: {err}")))?;
    let schema = document.resource(&config.name).ok_or_else(|| {
        CliError::new(format!("resource {} not found in schema document", config.name))
    })?;
    let sink = audit_sink(command.audit, command.audit_log.as_deref())?;
    let generated = Builder::new(sink)
        .build(schema, &mut config)
        .map_err(|err| CliError::new(err.to_string()))?;
    match command.format {
        OutputFormat::Text => Ok(render_types(&generated)),
        OutputFormat::Json => {
            let report = BuildReport {
                generated: &generated,
                config: &config,
            };
            serde_json::to_string_pretty(&report)
                .map_err(|err| CliError::new(format!("failed to serialize build report: {err}")))
        }
    }
}

/// Resolves the audit sink for a build.
fn audit_sink(mode: AuditMode, path: Option<&Path>) -> CliResult<Arc<dyn BuildAuditSink>> {
    match mode {
        AuditMode::None => Ok(Arc::new(BuildNoopAuditSink)),
        AuditMode::Stderr => Ok(Arc::new(BuildStderrAuditSink)),
        AuditMode::File => {
            let path = path.ok_or_else(|| {
                CliError::new("--audit-log is required with --audit file".to_string())
            })?;
            let sink = BuildFileAuditSink::new(path).map_err(|err| {
                CliError::new(format!("failed to open audit log {}: {err}", path.display()))
            })?;
            Ok(Arc::new(sink))
        }
    }
}

// ============================================================================
// SECTION: Diagnose Command
// ============================================================================

/// Executes the `diagnose` command.
fn command_diagnose(command: &DiagnoseCommand) -> CliResult<ExitCode> {
    let operation = operation_from_arg(command.operation);
    match diagnose(command)? {
        Some(failure) => Ok(emit_error(&failure.to_string())),
        None => {
            write_stdout_line(&format!("{operation}: no errors reported"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Reads the log file and classifies it.
fn diagnose(command: &DiagnoseCommand) -> CliResult<Option<OperationFailed>> {
    let bytes = read_bytes_with_limit(&command.logs, MAX_LOG_BYTES)
        .map_err(|err| CliError::new(read_limit_message(&command.logs, &err)))?;
    Ok(classify(operation_from_arg(command.operation), &bytes))
}

/// Maps the CLI operation to the classifier operation.
const fn operation_from_arg(arg: OperationArg) -> Operation {
    match arg {
        OperationArg::Apply => Operation::Apply,
        OperationArg::Plan => Operation::Plan,
        OperationArg::Refresh => Operation::Refresh,
        OperationArg::Destroy => Operation::Destroy,
    }
}

// ============================================================================
// SECTION: Config Example Command
// ============================================================================

/// Executes the `config-example` command.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_line(config_toml_example().trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Formats a bounded-read failure for display.
fn read_limit_message(path: &Path, error: &ReadLimitError) -> String {
    match error {
        ReadLimitError::Io(err) => format!("failed to read {}: {err}", path.display()),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => format!("{} is {size} bytes, exceeding the {limit} byte limit", path.display()),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
