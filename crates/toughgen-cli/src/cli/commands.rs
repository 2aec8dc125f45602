use super::CliError;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use toughgen_core::config::{DeckConfig, load_deck_config};
use toughgen_core::domain::{DeckArtifact, DeckError, DeckKind, GenerateRequest};
use toughgen_core::fixed_width::encode_ten;
use toughgen_core::modules::rock_scan::{render_rock_report, scan_rock_types};
use toughgen_core::modules::tecplot::{convert_tecplot_file, default_csv_path};
use toughgen_core::modules::{SIMULATOR_DECKS, SourceDeck, execute_deck, generate_decks};

#[derive(clap::Args)]
pub(super) struct ConfigFlag {
    /// JSON deck configuration; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConfigFlag {
    fn load(&self) -> Result<DeckConfig, CliError> {
        load_deck_config(self.config.as_deref())
            .map_err(|error| CliError::Compute(DeckError::from(error)))
    }
}

#[derive(clap::Args)]
pub(super) struct GenerateArgs {
    /// Source deck holding the ELEME/CONNE (and optional ROCKS/SELEC) blocks
    #[arg(long)]
    source: PathBuf,

    /// Directory receiving the decks
    #[arg(long, default_value = "OUTPUT")]
    output: PathBuf,

    /// Also write chemical.inp
    #[arg(long)]
    chemical: bool,

    #[command(flatten)]
    config: ConfigFlag,
}

#[derive(clap::Args)]
pub(super) struct SourceDeckArgs {
    /// Source deck holding the ELEME/CONNE (and optional ROCKS/SELEC) blocks
    #[arg(long)]
    source: PathBuf,

    /// Directory receiving the deck
    #[arg(long, default_value = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    config: ConfigFlag,
}

#[derive(clap::Args)]
pub(super) struct ConfigDeckArgs {
    /// Directory receiving the deck
    #[arg(long, default_value = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    config: ConfigFlag,
}

#[derive(clap::Args)]
pub(super) struct RocksArgs {
    /// Source deck to scan
    #[arg(long)]
    source: PathBuf,

    #[command(flatten)]
    config: ConfigFlag,
}

#[derive(clap::Args)]
pub(super) struct ScheduleArgs {
    #[command(flatten)]
    config: ConfigFlag,
}

#[derive(clap::Args)]
pub(super) struct ConvertArgs {
    /// Tecplot result table, e.g. co2d_conc.tec
    #[arg(long)]
    input: PathBuf,

    /// CSV destination; `<input stem>_paraview.csv` beside the input by default
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_generate_command(args: GenerateArgs) -> Result<i32, CliError> {
    let config = args.config.load()?;
    let mut decks = SIMULATOR_DECKS.to_vec();
    if args.chemical {
        decks.push(DeckKind::Chemical);
    }

    let artifacts = generate_decks(&args.source, &args.output, &config, &decks)?;
    print_artifacts(&args.output, &artifacts)?;
    Ok(0)
}

pub(super) fn run_source_deck_command(
    deck: DeckKind,
    args: SourceDeckArgs,
) -> Result<i32, CliError> {
    let config = args.config.load()?;
    let request = GenerateRequest::new(deck, args.source, &args.output);
    let artifacts = execute_deck(&request, &config)?;
    print_artifacts(&args.output, &artifacts)?;
    Ok(0)
}

pub(super) fn run_config_deck_command(
    deck: DeckKind,
    args: ConfigDeckArgs,
) -> Result<i32, CliError> {
    let config = args.config.load()?;
    let request = GenerateRequest::new(deck, PathBuf::new(), &args.output);
    let artifacts = execute_deck(&request, &config)?;
    print_artifacts(&args.output, &artifacts)?;
    Ok(0)
}

pub(super) fn run_rocks_command(args: RocksArgs) -> Result<i32, CliError> {
    let config = args.config.load()?;
    let source = SourceDeck::load(&args.source, &config.mesh)?;
    let scan = scan_rock_types(&source, &config.rocks);

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render_rock_report(&scan)).context("failed to write rock report")?;
    Ok(0)
}

pub(super) fn run_schedule_command(args: ScheduleArgs) -> Result<i32, CliError> {
    let config = args.config.load()?;
    let times = config.schedule.output_times()?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{} output times", times.len()).context("failed to write schedule")?;
    for time in &times {
        writeln!(stdout, "{}", encode_ten(*time)?).context("failed to write schedule")?;
    }
    Ok(0)
}

pub(super) fn run_convert_command(args: ConvertArgs) -> Result<i32, CliError> {
    let output = args
        .output
        .unwrap_or_else(|| default_csv_path(&args.input));
    let table = convert_tecplot_file(&args.input, &output)?;
    println!(
        "Converted {} rows from {} to {}.",
        table.rows.len(),
        args.input.display(),
        output.display()
    );
    Ok(0)
}

fn print_artifacts(output_dir: &Path, artifacts: &[DeckArtifact]) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    for artifact in artifacts {
        writeln!(
            stdout,
            "wrote {}",
            output_dir.join(&artifact.relative_path).display()
        )
        .context("failed to write artifact list")?;
    }
    Ok(())
}
