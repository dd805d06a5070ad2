//! Minimal TOML parser for device configuration
//!
//! Handles only the subset `device.toml` uses, not the full TOML grammar.
//!
//! Supported features:
//! - [section] headers
//! - key = integer (underscores allowed: `10_000`)
//! - Comments (# ...), whole-line and trailing
//!
//! Unknown keys are ignored so newer config files still load; unknown
//! sections are an error.

use super::types::AlertConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value is not a valid integer for its field
    InvalidValue,
    /// Key/value pair before any section header
    MissingSection,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Detector,
    Button,
    Alert,
    Modem,
}

/// Parse TOML configuration into AlertConfig
///
/// Fields not present keep their [`Default`] value.
pub fn parse_config(input: &str) -> Result<AlertConfig, ParseError> {
    let mut config = AlertConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "detector" => Ok(Section::Detector),
        "button" => Ok(Section::Button),
        "alert" => Ok(Section::Alert),
        "modem" => Ok(Section::Modem),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse an integer that must be non-zero
fn parse_nonzero<T: core::str::FromStr + Default + PartialEq>(value: &str) -> Result<T, ParseError> {
    let parsed: T = parse_int(value)?;
    if parsed == T::default() {
        return Err(ParseError::InvalidValue);
    }
    Ok(parsed)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut AlertConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::MissingSection),
        Section::Detector => {
            let d = &mut config.detector;
            match key {
                "tilt_threshold_deg" => d.tilt_threshold_deg = parse_int(value)?,
                "impact_delta_raw" => d.impact_delta_raw = parse_int(value)?,
                "full_scale_lsb_per_g" => d.full_scale_lsb_per_g = parse_nonzero(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Button => {
            let b = &mut config.button;
            match key {
                "debounce_ms" => b.debounce_ms = parse_int(value)?,
                "click_window_ms" => b.click_window_ms = parse_nonzero(value)?,
                _ => {}
            }
        }
        Section::Alert => {
            let a = &mut config.alert;
            match key {
                "countdown_ms" => a.countdown_ms = parse_nonzero(value)?,
                "blink_half_period_ms" => a.blink_half_period_ms = parse_nonzero(value)?,
                "tick_ms" => a.tick_ms = parse_nonzero(value)?,
                _ => {}
            }
        }
        Section::Modem => {
            let m = &mut config.modem;
            match key {
                "baud_rate" => m.baud_rate = parse_nonzero(value)?,
                "prompt_timeout_ms" => m.prompt_timeout_ms = parse_int(value)?,
                "settle_ms" => m.settle_ms = parse_int(value)?,
                "contact_gap_ms" => m.contact_gap_ms = parse_int(value)?,
                "rx_idle_ms" => m.rx_idle_ms = parse_nonzero(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}
