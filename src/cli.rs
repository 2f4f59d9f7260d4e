//! CLI definition and dispatch.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{pair_file_stem, parse_timestamp, CsvAdapter};
use crate::adapters::csv_signal_writer::CsvSignalWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bbrsi::BbRsiHyperopt;
use crate::domain::column::SignalKind;
use crate::domain::error::HyperoptError;
use crate::domain::param_config::{load_params, BUY_SECTION, SELL_SECTION};
use crate::domain::params::{EntryParams, ExitParams};
use crate::domain::rule::Rule;
use crate::domain::signal_builder::{entry_conditions, exit_conditions};
use crate::domain::space::{space_size, Dimension, ParamSet};
use crate::domain::table::{BarTable, PairMetadata};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::hyperopt_port::HyperoptPort;
use crate::ports::report_port::SignalReportPort;

#[derive(Parser, Debug)]
#[command(name = "bbrsi", about = "Bollinger band / RSI hyperopt strategy")]
pub struct Cli {
    /// Log debug detail (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the entry and exit search spaces
    Space,
    /// Validate the [buy] and [sell] parameter sections of a config
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Annotate a pair's bars and write entry/exit signals
    Signals {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pair: Option<String>,
    },
    /// List pairs available in the data directory
    ListPairs {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// `[data]` section of the config.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub dir: PathBuf,
    pub pair: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Parameter sets for one trial, read from `[buy]` and `[sell]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialParams {
    pub buy: ParamSet,
    pub sell: ParamSet,
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Space => run_space(&BbRsiHyperopt),
        Command::Validate { config } => run_validate(&config),
        Command::Signals {
            config,
            output,
            pair,
        } => run_signals(&config, output.as_deref(), pair.as_deref()),
        Command::ListPairs { config } => run_list_pairs(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, HyperoptError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn build_data_settings(config: &dyn ConfigPort) -> Result<DataSettings, HyperoptError> {
    let dir = required(config, "data", "dir")?;
    let pair = required(config, "data", "pair")?;
    let start = optional_timestamp(config, "data", "start_date")?;
    let end = optional_timestamp(config, "data", "end_date")?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(HyperoptError::ConfigInvalid {
                section: "data".into(),
                key: "end_date".into(),
                reason: "end_date is before start_date".into(),
            });
        }
    }

    Ok(DataSettings {
        dir: PathBuf::from(dir),
        pair,
        start,
        end,
    })
}

/// Reads `[buy]` and `[sell]` against the strategy's spaces.
pub fn build_trial_params(
    config: &dyn ConfigPort,
    strategy: &dyn HyperoptPort,
) -> Result<TrialParams, HyperoptError> {
    Ok(TrialParams {
        buy: load_params(config, BUY_SECTION, &strategy.indicator_space())?,
        sell: load_params(config, SELL_SECTION, &strategy.sell_indicator_space())?,
    })
}

/// Output path: CLI override, then `[output] path`, then `{pair}_signals.csv`.
pub fn resolve_output_path(
    output_override: Option<&Path>,
    config: &dyn ConfigPort,
    pair: &str,
) -> PathBuf {
    if let Some(path) = output_override {
        return path.to_path_buf();
    }
    config
        .get_string("output", "path")
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}_signals.csv", pair_file_stem(pair))))
}

/// Load, annotate, signal and report one pair.
pub fn run_signals_pipeline(
    data_port: &dyn DataPort,
    strategy: &dyn HyperoptPort,
    report: &dyn SignalReportPort,
    settings: &DataSettings,
    params: &TrialParams,
    output_path: &Path,
) -> Result<BarTable, HyperoptError> {
    let metadata = PairMetadata::new(settings.pair.clone());

    // Stage 1: build rules, so bad parameters fail before any data work
    let entry = strategy.buy_strategy_generator(&params.buy)?;
    let exit = strategy.sell_strategy_generator(&params.sell)?;

    // Stage 2: load bars
    let table = data_port.load_table(&settings.pair, settings.start, settings.end)?;
    tracing::info!(pair = %metadata.pair, rows = table.len(), "loaded bars");

    // Stage 3: annotate
    let table = strategy.populate_indicators(table, &metadata)?;

    // Stage 4: signals
    let table = entry(table, &metadata)?;
    let table = exit(table, &metadata)?;
    tracing::info!(
        pair = %metadata.pair,
        buy = table.signal_count(SignalKind::Buy),
        sell = table.signal_count(SignalKind::Sell),
        "signals populated"
    );

    // Stage 5: report
    report.write(&table, &metadata, &output_path.to_string_lossy())?;
    Ok(table)
}

fn run_space(strategy: &dyn HyperoptPort) -> Result<(), HyperoptError> {
    print_space("Entry space", &strategy.indicator_space());
    print_space("Exit space", &strategy.sell_indicator_space());
    Ok(())
}

fn print_space(title: &str, space: &[Dimension]) {
    println!("{} ({} combinations):", title, space_size(space));
    for dim in space {
        println!("  {}", dim);
    }
}

fn run_validate(config_path: &Path) -> Result<(), HyperoptError> {
    let config = load_config(config_path)?;
    let params = build_trial_params(&config, &BbRsiHyperopt)?;

    let entry = EntryParams::from_params(&params.buy)?;
    let exit = ExitParams::from_params(&params.sell)?;

    println!("Entry rule: {}", Rule::And(entry_conditions(&entry)));
    println!("Exit rule:  {}", Rule::And(exit_conditions(&exit)));
    eprintln!("Parameter configuration is valid.");
    Ok(())
}

fn run_signals(
    config_path: &Path,
    output_override: Option<&Path>,
    pair_override: Option<&str>,
) -> Result<(), HyperoptError> {
    let config = load_config(config_path)?;
    let mut settings = build_data_settings(&config)?;
    if let Some(pair) = pair_override {
        settings.pair = pair.to_string();
    }
    let params = build_trial_params(&config, &BbRsiHyperopt)?;
    let output_path = resolve_output_path(output_override, &config, &settings.pair);

    let data_port = CsvAdapter::new(settings.dir.clone());
    let writer = CsvSignalWriter::new().signals_only(config.get_bool("output", "signals_only", false));

    run_signals_pipeline(
        &data_port,
        &BbRsiHyperopt,
        &writer,
        &settings,
        &params,
        &output_path,
    )?;
    eprintln!("Signals written to {}", output_path.display());
    Ok(())
}

fn run_list_pairs(config_path: &Path) -> Result<(), HyperoptError> {
    let config = load_config(config_path)?;
    let dir = required(&config, "data", "dir")?;
    let pairs = CsvAdapter::new(PathBuf::from(dir)).list_pairs()?;

    if pairs.is_empty() {
        eprintln!("No pairs found");
    } else {
        for pair in &pairs {
            println!("{}", pair);
        }
        eprintln!("{} pairs found", pairs.len());
    }
    Ok(())
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, HyperoptError> {
    config
        .get_string(section, key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HyperoptError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn optional_timestamp(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDateTime>, HyperoptError> {
    let Some(raw) = config.get_string(section, key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| HyperoptError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("invalid date '{}'", raw.trim()),
        })
}
