mod agent;
mod commands;
mod mode;
mod operator;
mod output;

use std::path::PathBuf;

use clap::{error::ErrorKind, Parser, Subcommand, ValueEnum};
use eip681_core::qr::MIN_QR_DIMENSION;
use eip681_core::Eip681Error;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use commands::IntentArgs;
use mode::Mode;
use output::{CommandOutput, ErrorReport, OutputHandler};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "eip681", version, about = "EIP-681 payment request and QR code builder")]
struct Cli {
    #[arg(long = "output", value_enum, global = true, env = "EIP681_OUTPUT")]
    output_format: Option<OutputFormat>,

    #[arg(long, global = true)]
    quiet: bool,

    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Validate a payment intent and print its canonical request URI
    Uri {
        #[command(flatten)]
        intent: IntentArgs,
    },
    /// Validate a payment intent and render its request as a PNG QR code
    Qr {
        #[command(flatten)]
        intent: IntentArgs,
        /// Write the PNG here instead of printing a data URI
        #[arg(long)]
        out: Option<PathBuf>,
        /// Minimum image edge in pixels
        #[arg(long, default_value_t = MIN_QR_DIMENSION)]
        size: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    ValidationError = 1,
    ConfigError = 2,
    IoError = 3,
    InternalError = 4,
}

impl ExitCode {
    const fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug)]
pub(crate) enum CliError {
    Core(Eip681Error),
    Usage(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Internal(String),
}

impl From<Eip681Error> for CliError {
    fn from(value: Eip681Error) -> Self {
        Self::Core(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl CliError {
    fn message(&self) -> String {
        match self {
            CliError::Core(err) => err.to_string(),
            CliError::Usage(message) | CliError::Internal(message) => message.clone(),
            CliError::Io(err) => err.to_string(),
            CliError::Json(err) => format!("invalid intent JSON: {err}"),
        }
    }

    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Core(Eip681Error::InvalidInput { .. }) => ExitCode::ValidationError,
            CliError::Core(Eip681Error::RenderFailure(_)) => ExitCode::InternalError,
            CliError::Usage(_) | CliError::Json(_) => ExitCode::ConfigError,
            CliError::Io(_) => ExitCode::IoError,
            CliError::Internal(_) => ExitCode::InternalError,
        }
    }

    fn to_error_report(&self) -> ErrorReport {
        match self {
            CliError::Core(core) => ErrorReport {
                code: core.code(),
                name: core.name().to_string(),
                message: core.to_string(),
                details: match core {
                    Eip681Error::InvalidInput {
                        field,
                        value,
                        reason,
                    } => Some(json!({
                        "field": field,
                        "value": value,
                        "reason": reason,
                    })),
                    Eip681Error::RenderFailure(_) => None,
                },
            },
            CliError::Usage(message) => ErrorReport {
                code: 2001,
                name: "INVALID_ARGUMENTS".to_string(),
                message: message.clone(),
                details: None,
            },
            CliError::Json(err) => ErrorReport {
                code: 2005,
                name: "INVALID_JSON_INPUT".to_string(),
                message: self.message(),
                details: Some(json!({ "line": err.line(), "column": err.column() })),
            },
            CliError::Io(_) => ErrorReport {
                code: 3001,
                name: "IO_ERROR".to_string(),
                message: self.message(),
                details: None,
            },
            CliError::Internal(message) => ErrorReport {
                code: 9999,
                name: "INTERNAL_ERROR".to_string(),
                message: message.clone(),
                details: None,
            },
        }
    }
}

fn build_output_handler(mode: Mode, quiet: bool, no_color: bool) -> Box<dyn OutputHandler> {
    match mode {
        Mode::Operator => Box::new(operator::OperatorOutput::new(quiet, no_color)),
        Mode::Agent => Box::<agent::AgentOutputHandler>::default(),
    }
}

fn command_label(command: &Commands) -> &'static str {
    match command {
        Commands::Uri { .. } => "uri",
        Commands::Qr { .. } => "qr",
    }
}

fn detect_mode_from_raw_args(args: &[String]) -> Mode {
    let mut output_json = std::env::var("EIP681_OUTPUT")
        .is_ok_and(|value| value.eq_ignore_ascii_case("json"));

    let mut index = 1;
    while index < args.len() {
        let arg = &args[index];
        if arg == "--output" {
            if args
                .get(index + 1)
                .is_some_and(|value| value.eq_ignore_ascii_case("json"))
            {
                output_json = true;
            }
            index += 2;
            continue;
        }
        if arg.eq_ignore_ascii_case("--output=json") {
            output_json = true;
        }
        index += 1;
    }

    mode::detect_mode(output_json)
}

fn infer_operation_from_raw_args(args: &[String]) -> &'static str {
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "uri" => return "uri",
            "qr" => return "qr",
            _ => {}
        }
    }
    "uri"
}

fn output_from_error(err: &CliError, command: &str) -> CommandOutput {
    CommandOutput::failure(command, err.to_error_report())
}

async fn dispatch(
    command: &Commands,
    output: &mut dyn OutputHandler,
) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Uri { intent } => commands::uri::run(intent, output),
        Commands::Qr { intent, out, size } => {
            commands::qr::run(intent, out.as_deref(), *size, output).await
        }
    }
}

async fn run(cli: Cli) -> ExitCode {
    let output_json = matches!(cli.output_format, Some(OutputFormat::Json));
    let mode = mode::detect_mode(output_json);
    let mut output = build_output_handler(mode, cli.quiet, cli.no_color);
    let command = command_label(&cli.command);
    tracing::debug!(command, mode = mode.as_str(), "starting");

    output.start_operation(command);
    match dispatch(&cli.command, output.as_mut()).await {
        Ok(result) => {
            output.complete(&result);
            ExitCode::Success
        }
        Err(err) => {
            output.complete(&output_from_error(&err, command));
            err.exit_code()
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let raw_args: Vec<String> = std::env::args().collect();
    let detected_mode = detect_mode_from_raw_args(&raw_args);
    let cli = match Cli::try_parse_from(&raw_args) {
        Ok(parsed) => parsed,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                let _ = err.print();
                std::process::exit(0);
            }

            if detected_mode == Mode::Agent {
                let cli_error = CliError::Usage(err.to_string().trim().to_string());
                let operation = infer_operation_from_raw_args(&raw_args);
                let mut output = agent::AgentOutputHandler::default();
                output.complete(&output_from_error(&cli_error, operation));
                std::process::exit(cli_error.exit_code().as_i32());
            }

            let _ = err.print();
            std::process::exit(ExitCode::ConfigError.as_i32());
        }
    };
    let code = run(cli).await;
    std::process::exit(code.as_i32());
}
