mod commands;

use clap::Parser;
use toughgen_core::domain::{DeckError, DeckKind};
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let deck_error = error.as_deck_error();
            eprintln!("{}", deck_error.diagnostic_line());
            if let Some(summary_line) = deck_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            deck_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("toughgen".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// `RUST_LOG` wins unless `-v` asks for debug output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // already installed when run more than once in one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "toughgen",
    version,
    about = "Fixed-column TOUGHREACT input deck generator"
)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Write MESH, flow.inp, INCON and solute.inp from one source deck
    Generate(commands::GenerateArgs),
    /// Write the MESH deck
    Mesh(commands::SourceDeckArgs),
    /// Write flow.inp
    Flow(commands::SourceDeckArgs),
    /// Write the INCON deck
    Incon(commands::SourceDeckArgs),
    /// Write solute.inp from configuration
    Solute(commands::ConfigDeckArgs),
    /// Write chemical.inp from configuration
    Chemical(commands::ConfigDeckArgs),
    /// Report the rock types used by the mesh and any missing from ROCKS
    Rocks(commands::RocksArgs),
    /// Print the output-time schedule
    Schedule(commands::ScheduleArgs),
    /// Convert a tecplot result table to CSV
    Convert(commands::ConvertArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Generate(args) => commands::run_generate_command(args),
        CliCommand::Mesh(args) => commands::run_source_deck_command(DeckKind::Mesh, args),
        CliCommand::Flow(args) => commands::run_source_deck_command(DeckKind::Flow, args),
        CliCommand::Incon(args) => commands::run_source_deck_command(DeckKind::Incon, args),
        CliCommand::Solute(args) => commands::run_config_deck_command(DeckKind::Solute, args),
        CliCommand::Chemical(args) => commands::run_config_deck_command(DeckKind::Chemical, args),
        CliCommand::Rocks(args) => commands::run_rocks_command(args),
        CliCommand::Schedule(args) => commands::run_schedule_command(args),
        CliCommand::Convert(args) => commands::run_convert_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(DeckError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DeckError> for CliError {
    fn from(error: DeckError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_deck_error(&self) -> DeckError {
        match self {
            Self::Usage(message) => DeckError::config("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => DeckError::io("IO.CLI", format!("{error:#}")),
        }
    }
}
