//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvPanelAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    parse_date, validate_data_config, validate_strategy_config,
};
use crate::domain::error::QuantmomError;
use crate::domain::pipeline::run_pipeline;
use crate::domain::schedule::{Frequency, RebalanceSchedule};
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PanelPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "quantmom", about = "Cross-sectional momentum strategy pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline and write the weight and return matrices
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        codes: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List available symbols in a data directory
    ListSymbols {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        exchange: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            output,
            codes,
        } => run_strategy(&config, output.as_deref(), codes.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data_dir, exchange } => run_list_symbols(&data_dir, &exchange),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantmomError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_strategy(
    config_path: &PathBuf,
    output_dir: Option<&std::path::Path>,
    codes_override: Option<&str>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match prepare_run(&config, codes_override) {
        Ok((codes, exchange, csv_dir, start, end, params)) => {
            let adapter = CsvPanelAdapter::new(csv_dir);
            execute(&adapter, &codes, &exchange, start, end, &params, output_dir)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

type RunInputs = (
    Vec<String>,
    String,
    PathBuf,
    NaiveDate,
    NaiveDate,
    StrategyParams,
);

fn prepare_run(
    config: &dyn ConfigPort,
    codes_override: Option<&str>,
) -> Result<RunInputs, QuantmomError> {
    validate_data_config(config)?;
    validate_strategy_config(config)?;

    let codes_str = match codes_override {
        Some(s) => s.to_string(),
        None => config.get_string("data", "codes").unwrap_or_default(),
    };
    let codes = parse_codes(&codes_str)?;

    let exchange = config
        .get_string("data", "exchange")
        .ok_or_else(|| QuantmomError::ConfigMissing {
            section: "data".to_string(),
            key: "exchange".to_string(),
        })?;
    let csv_dir = config
        .get_string("data", "csv_dir")
        .ok_or_else(|| QuantmomError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        })?;

    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;
    let params = build_strategy_params(config);

    Ok((codes, exchange, PathBuf::from(csv_dir), start, end, params))
}

fn execute(
    data: &dyn PanelPort,
    codes: &[String],
    exchange: &str,
    start: NaiveDate,
    end: NaiveDate,
    params: &StrategyParams,
    output_dir: Option<&std::path::Path>,
) -> ExitCode {
    eprintln!(
        "Fetching panel for {} codes on {} ({} to {})",
        codes.len(),
        exchange,
        start,
        end
    );
    let prices = match data.fetch_panel(codes, exchange, start, end) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Panel loaded: {} dates x {} securities",
        prices.close.n_dates(),
        prices.close.n_securities()
    );

    let result = match run_pipeline(&prices, params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let last = result.signals.n_dates().saturating_sub(1);
    if result.signals.n_dates() > 0 {
        eprintln!(
            "Eligible securities on {}: {}",
            result.signals.dates()[last],
            result.signals.count_true(last)
        );
    }

    if let Some(dir) = output_dir {
        if let Err(e) = std::fs::create_dir_all(dir).map_err(QuantmomError::from) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        let report = CsvReportAdapter;
        if let Err(e) = report
            .write_weights(&result.weights, dir)
            .and_then(|()| report.write_gross_returns(&result.gross_returns, dir))
        {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Wrote target_weights.csv and gross_returns.csv to {}", dir.display());
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let checks = validate_data_config(&config).and_then(|()| validate_strategy_config(&config));
    match checks {
        Ok(()) => {
            eprintln!("Config OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(data_dir: &PathBuf, exchange: &str) -> ExitCode {
    let adapter = CsvPanelAdapter::new(data_dir.clone());
    match adapter.list_symbols(exchange) {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Build pipeline parameters from config, falling back to the strategy
/// defaults for anything unset. Percent thresholds in the file become
/// fractions here.
pub fn build_strategy_params(config: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    let frequency = match config
        .get_string("strategy", "rebalance_frequency")
        .map(|f| f.to_lowercase())
        .as_deref()
    {
        Some("month") => Frequency::MonthEnd,
        _ => Frequency::QuarterEnd,
    };
    StrategyParams {
        dollar_volume_window: config.get_usize(
            "strategy",
            "dollar_volume_window",
            defaults.dollar_volume_window,
        ),
        dollar_volume_top_fraction: config.get_f64(
            "strategy",
            "dollar_volume_top_pct",
            defaults.dollar_volume_top_fraction * 100.0,
        ) / 100.0,
        momentum_window: config.get_usize("strategy", "momentum_window", defaults.momentum_window),
        momentum_skip: config.get_usize(
            "strategy",
            "momentum_exclude_recent",
            defaults.momentum_skip,
        ),
        momentum_top_fraction: config.get_f64(
            "strategy",
            "momentum_top_pct",
            defaults.momentum_top_fraction * 100.0,
        ) / 100.0,
        smoothness_top_fraction: config.get_f64(
            "strategy",
            "smoothness_top_pct",
            defaults.smoothness_top_fraction * 100.0,
        ) / 100.0,
        rebalance: RebalanceSchedule {
            frequency,
            fiscal_year_end_month: config.get_u32(
                "strategy",
                "fiscal_year_end_month",
                defaults.rebalance.fiscal_year_end_month,
            ),
        },
    }
}

/// Parse a comma-separated code list; uppercased, deduplicated, no blanks.
pub fn parse_codes(input: &str) -> Result<Vec<String>, QuantmomError> {
    let mut codes = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(QuantmomError::ConfigInvalid {
                section: "data".to_string(),
                key: "codes".to_string(),
                reason: "empty token in code list".to_string(),
            });
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(QuantmomError::ConfigInvalid {
                section: "data".to_string(),
                key: "codes".to_string(),
                reason: format!("duplicate code: {}", code),
            });
        }
        codes.push(code);
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn parse_codes_basic() {
        assert_eq!(
            parse_codes("aapl, MSFT ,nvda").unwrap(),
            vec!["AAPL", "MSFT", "NVDA"]
        );
    }

    #[test]
    fn parse_codes_rejects_empty_token() {
        assert!(parse_codes("AAPL,,MSFT").is_err());
        assert!(parse_codes("").is_err());
    }

    #[test]
    fn parse_codes_rejects_duplicates() {
        assert!(matches!(
            parse_codes("AAPL,MSFT,aapl"),
            Err(QuantmomError::ConfigInvalid { reason, .. }) if reason.contains("AAPL")
        ));
    }

    #[test]
    fn build_params_uses_defaults_when_unset() {
        let config = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        let params = build_strategy_params(&config);
        assert_eq!(params, StrategyParams::default());
    }

    #[test]
    fn build_params_converts_percent_to_fraction() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\n\
             momentum_top_pct = 25\n\
             smoothness_top_pct = 75\n\
             momentum_window = 126\n\
             rebalance_frequency = month\n\
             fiscal_year_end_month = 12\n",
        )
        .unwrap();
        let params = build_strategy_params(&config);
        assert_eq!(params.momentum_top_fraction, 0.25);
        assert_eq!(params.smoothness_top_fraction, 0.75);
        assert_eq!(params.momentum_window, 126);
        assert_eq!(params.rebalance.frequency, Frequency::MonthEnd);
        assert_eq!(params.rebalance.fiscal_year_end_month, 12);
    }
}
