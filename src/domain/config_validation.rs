//! Configuration validation.
//!
//! Checks every config field (with defaults applied) before a run starts,
//! so a bad window or fraction fails fast instead of producing a silently
//! empty eligibility matrix.

use crate::domain::error::QuantmomError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), QuantmomError> {
    validate_window(config, "dollar_volume_window", 90)?;
    validate_window(config, "momentum_window", 252)?;
    validate_top_pct(config, "dollar_volume_top_pct", 60.0)?;
    validate_top_pct(config, "momentum_top_pct", 10.0)?;
    validate_top_pct(config, "smoothness_top_pct", 50.0)?;
    validate_momentum_skip(config)?;
    validate_rebalance(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), QuantmomError> {
    require_string(config, "data", "csv_dir")?;
    require_string(config, "data", "exchange")?;
    require_string(config, "data", "codes")?;
    validate_dates(config)?;
    Ok(())
}

fn validate_window(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<(), QuantmomError> {
    let value = config.get_usize("strategy", key, default);
    if value == 0 {
        return Err(QuantmomError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{} must be at least 1", key),
        });
    }
    Ok(())
}

fn validate_top_pct(config: &dyn ConfigPort, key: &str, default: f64) -> Result<(), QuantmomError> {
    let value = config.get_f64("strategy", key, default);
    if value <= 0.0 || value > 100.0 {
        return Err(QuantmomError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{} must be in (0, 100]", key),
        });
    }
    Ok(())
}

fn validate_momentum_skip(config: &dyn ConfigPort) -> Result<(), QuantmomError> {
    let window = config.get_usize("strategy", "momentum_window", 252);
    let skip = config.get_usize("strategy", "momentum_exclude_recent", 22);
    if skip >= window {
        return Err(QuantmomError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "momentum_exclude_recent".to_string(),
            reason: "momentum_exclude_recent must be smaller than momentum_window".to_string(),
        });
    }
    Ok(())
}

fn validate_rebalance(config: &dyn ConfigPort) -> Result<(), QuantmomError> {
    if let Some(freq) = config.get_string("strategy", "rebalance_frequency") {
        match freq.to_lowercase().as_str() {
            "quarter" | "month" => {}
            other => {
                return Err(QuantmomError::ConfigInvalid {
                    section: "strategy".to_string(),
                    key: "rebalance_frequency".to_string(),
                    reason: format!("unknown frequency '{}', expected quarter or month", other),
                });
            }
        }
    }
    let month = config.get_u32("strategy", "fiscal_year_end_month", 11);
    if !(1..=12).contains(&month) {
        return Err(QuantmomError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fiscal_year_end_month".to_string(),
            reason: "fiscal_year_end_month must be between 1 and 12".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), QuantmomError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;
    if start >= end {
        return Err(QuantmomError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

pub fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, QuantmomError> {
    match config.get_string("data", key) {
        None => Err(QuantmomError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| QuantmomError::ConfigInvalid {
                section: "data".to_string(),
                key: key.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", key),
            })
        }
    }
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), QuantmomError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuantmomError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}
