//! Configuration validation.
//!
//! Checks every tracker key before a comparison runs, so a bad value fails
//! with the section and key that caused it.

use crate::domain::date_label::MonthYear;
use crate::domain::error::TrackerError;
use crate::domain::report::MAX_CHOSEN_ITEMS;
use crate::ports::config_port::ConfigPort;
use std::path::Path;

pub fn validate_tracker_config(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    validate_ceiling(config)?;
    validate_annual_rate(config)?;
    validate_basket(config)?;
    validate_selection_months(config)?;
    validate_items(config)?;
    Ok(())
}

/// The data path, from `[data] path` or the command line, after merging.
pub fn validate_data_path(path: Option<&Path>) -> Result<&Path, TrackerError> {
    match path {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        _ => Err(TrackerError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

pub fn validate_item_count(count: usize) -> Result<(), TrackerError> {
    if count > MAX_CHOSEN_ITEMS {
        return Err(TrackerError::ConfigInvalid {
            section: "selection".to_string(),
            key: "items".to_string(),
            reason: format!("at most {} items, found {}", MAX_CHOSEN_ITEMS, count),
        });
    }
    Ok(())
}

pub fn validate_window(start: MonthYear, end: MonthYear) -> Result<(), TrackerError> {
    if start > end {
        return Err(TrackerError::ConfigInvalid {
            section: "selection".to_string(),
            key: "start".to_string(),
            reason: "start must not be after end".to_string(),
        });
    }
    Ok(())
}

/// Parse an optional `YYYY-MM` value, reporting the key on failure.
pub fn parse_month(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<MonthYear>, TrackerError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => MonthYear::parse_iso(&s)
            .map(Some)
            .ok_or_else(|| TrackerError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM", key),
            }),
    }
}

/// Split a comma-separated item list, dropping empty entries.
pub fn parse_item_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn validate_ceiling(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    parse_month(config, "data", "ceiling").map(|_| ())
}

fn validate_annual_rate(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    let value = config.get_double("reference", "annual_rate_pct", 2.0);
    if !value.is_finite() || value <= -100.0 {
        return Err(TrackerError::ConfigInvalid {
            section: "reference".to_string(),
            key: "annual_rate_pct".to_string(),
            reason: "annual_rate_pct must be greater than -100".to_string(),
        });
    }
    Ok(())
}

fn validate_basket(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    let value = config.get_double("report", "basket", 1000.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackerError::ConfigInvalid {
            section: "report".to_string(),
            key: "basket".to_string(),
            reason: "basket must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_selection_months(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    let start = parse_month(config, "selection", "start")?;
    let end = parse_month(config, "selection", "end")?;

    match (start, end) {
        (Some(start), Some(end)) => validate_window(start, end),
        _ => Ok(()),
    }
}

fn validate_items(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    let Some(items) = config.get_string("selection", "items") else {
        return Ok(());
    };
    validate_item_count(parse_item_list(&items).len())
}
