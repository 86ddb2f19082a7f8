use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use anyhow::{Result, Context};
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use log::{debug, error, info};
use simple_logger::SimpleLogger;

use colortest::core::config::{ColorChoice, ReporterConfig, VERBOSITY_DOTS, VERBOSITY_QUIET};
use colortest::core::aggregator::RunState;
use colortest::core::runner::SuiteRunner;
use colortest::replay::read_cases;
use colortest::reporters::palette::Palette;
use colortest::reporters::text::TextReporter;


#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-lines file of recorded outcomes ("-" or absent for stdin)
    file: Option<PathBuf>,

    /// Print one aligned line per test (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print nothing per test, only the summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show test names only, never their descriptions
    #[arg(long)]
    no_descriptions: bool,

    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Stop after the first failure or error
    #[arg(short, long)]
    failfast: bool,

    /// Reporter config file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stderr
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the final counts as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
}


#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(state) => {
            if !state.was_successful() {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}: {:#}", "error".red().bold(), e);
            process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<RunState> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
        .context("Failed to initialize logger")?;

    debug!("Colortest v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => ReporterConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReporterConfig::default(),
    };
    update_config_from_args(&mut config, cli);

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stderr()),
    };

    let input: Box<dyn BufRead> = match cli.file.as_ref().filter(|p| p.as_os_str() != "-") {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stderr_is_terminal = io::stderr().is_terminal();
    let palette = Palette::new(config.color, cli.output.is_none() && stderr_is_terminal);
    colored::control::set_override(Palette::new(config.color, stderr_is_terminal).is_enabled());

    let reporter = TextReporter::with_palette(sink, &config, palette);
    let mut runner = SuiteRunner::new(reporter).failfast(config.failfast);
    runner.install_interrupt_handler()?;

    let state = runner.try_run(read_cases(input)).context("Failed to report run")?;

    let counts = state.counts();
    info!(
        "{} tests: {} passed, {} failed, {} errors",
        counts.tests_run, counts.passed, counts.failed, counts.errors
    );

    if let Some(path) = &cli.summary_json {
        let json = serde_json::to_string_pretty(&counts)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(state)
}


fn update_config_from_args(config: &mut ReporterConfig, cli: &Cli) {
    if cli.quiet {
        config.verbosity = VERBOSITY_QUIET;
    } else if cli.verbose > 0 {
        config.verbosity = VERBOSITY_DOTS.saturating_add(cli.verbose);
    }

    if cli.no_descriptions {
        config.show_descriptions = false;
    }

    if let Some(color) = cli.color {
        config.color = color.into();
    }

    if cli.failfast {
        config.failfast = true;
    }
}
