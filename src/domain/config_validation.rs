//! Configuration validation.
//!
//! Every key is optional; present keys must hold a usable value.

use crate::domain::admin::AdminDefaults;
use crate::domain::display::DisplayMode;
use crate::domain::error::TrancheError;
use crate::domain::tranche::{AggregationRule, OracleSource};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), TrancheError> {
    validate_display(config)?;
    validate_market(config)?;
    validate_admin(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TrancheError {
    TrancheError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_display(config: &dyn ConfigPort) -> Result<(), TrancheError> {
    if let Some(mode) = config.get_string("display", "mode") {
        mode.parse::<DisplayMode>()
            .map_err(|reason| invalid("display", "mode", reason))?;
    }
    Ok(())
}

fn validate_market(config: &dyn ConfigPort) -> Result<(), TrancheError> {
    if let Some(seed) = config.get_string("market", "seed") {
        seed.trim()
            .parse::<u64>()
            .map_err(|_| invalid("market", "seed", "seed must be a non-negative integer"))?;
    }
    Ok(())
}

fn validate_admin(config: &dyn ConfigPort) -> Result<(), TrancheError> {
    validate_number(config, "premium", |v| v >= 0.0, "premium must be non-negative")?;
    validate_number(config, "total_cap", |v| v > 0.0, "total_cap must be positive")?;
    validate_number(config, "min_per_user", |v| v >= 0.0, "min_per_user must be non-negative")?;
    validate_number(config, "max_per_user", |v| v > 0.0, "max_per_user must be positive")?;

    let caps = AdminDefaults::default().caps;
    let min = config.get_double("admin", "min_per_user", caps.min_per_user);
    let max = config.get_double("admin", "max_per_user", caps.max_per_user);
    if min > max {
        return Err(invalid(
            "admin",
            "min_per_user",
            "min_per_user must not exceed max_per_user",
        ));
    }

    let primary = match config.get_string("admin", "oracle_primary") {
        Some(s) => Some(
            s.parse::<OracleSource>()
                .map_err(|reason| invalid("admin", "oracle_primary", reason))?,
        ),
        None => None,
    };

    if let Some(list) = config.get_string("admin", "oracle_fallbacks") {
        let fallbacks = parse_sources(&list)
            .map_err(|reason| invalid("admin", "oracle_fallbacks", reason))?;
        if let Some(primary) = primary {
            if fallbacks.contains(&primary) {
                return Err(invalid(
                    "admin",
                    "oracle_fallbacks",
                    format!("fallbacks must not repeat the primary source '{primary}'"),
                ));
            }
        }
    }

    if let Some(rule) = config.get_string("admin", "oracle_rule") {
        rule.parse::<AggregationRule>()
            .map_err(|reason| invalid("admin", "oracle_rule", reason))?;
    }
    Ok(())
}

/// Numeric keys are read as strings so a typo is reported instead of defaulted.
fn validate_number(
    config: &dyn ConfigPort,
    key: &str,
    accept: impl Fn(f64) -> bool,
    reason: &str,
) -> Result<(), TrancheError> {
    let Some(raw) = config.get_string("admin", key) else {
        return Ok(());
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("admin", key, format!("{key} must be a number")))?;
    if !value.is_finite() || !accept(value) {
        return Err(invalid("admin", key, reason));
    }
    Ok(())
}

/// Comma-separated oracle list; empty entries are skipped.
pub fn parse_sources(list: &str) -> Result<Vec<OracleSource>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
