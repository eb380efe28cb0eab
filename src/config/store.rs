//! Tariff persistence.
//!
//! This module provides the [`TariffStore`] type, which owns the live tariff
//! and the YAML file it is loaded from and written back to.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_yaml::{Mapping, Value};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{
    Percent, TariffConfig, TariffUpdate, check_tariff_amount, normalize_coupon_code,
};

/// Owns the live tariff and its backing file.
///
/// Reads take a snapshot under a shared lock. Updates hold the exclusive lock
/// while the file is rewritten, so concurrent updates are applied one at a
/// time and the last one wins both in memory and on disk.
///
/// # File Format
///
/// ```text
/// base_fare: 6000
/// mid_tier_rate: 1000
/// far_tier_rate: 850
/// global_adjustment: 0.15   # or 15
/// coupons:
///   WELCOME: 10
/// ```
///
/// # Example
///
/// ```no_run
/// use delivery_quote::config::TariffStore;
///
/// # async fn run() {
/// let store = TariffStore::load("./tariff.yaml");
/// let tariff = store.snapshot().await;
/// println!("Base fare: {}", tariff.base_fare);
/// # }
/// ```
#[derive(Debug)]
pub struct TariffStore {
    path: PathBuf,
    config: RwLock<TariffConfig>,
}

impl TariffStore {
    /// Loads the tariff from a YAML file.
    ///
    /// A missing file yields the default tariff. Fields that are missing or
    /// cannot be read as numbers fall back to their defaults, and malformed
    /// coupon entries are skipped. A document that is not valid YAML, or not
    /// a mapping, also yields the default tariff. Loading never fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let config = match fs::read_to_string(path) {
            Ok(content) => parse_tariff(&path_str, &content),
            Err(err) => {
                warn!(path = %path_str, error = %err, "Tariff file not readable, using defaults");
                TariffConfig::default()
            }
        };

        info!(
            path = %path_str,
            base_fare = %config.base_fare,
            mid_tier_rate = %config.mid_tier_rate,
            far_tier_rate = %config.far_tier_rate,
            global_adjustment = %config.global_adjustment,
            coupons = config.coupons.len(),
            "Tariff loaded"
        );

        Self::new(path, config)
    }

    /// Creates a store around an existing tariff without touching the file.
    pub fn new<P: Into<PathBuf>>(path: P, config: TariffConfig) -> Self {
        Self {
            path: path.into(),
            config: RwLock::new(config),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current tariff.
    pub async fn snapshot(&self) -> TariffConfig {
        self.config.read().await.clone()
    }

    /// Applies an update, persists the whole tariff, and returns the result.
    ///
    /// The in-memory tariff only changes once the file has been written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPercent`] for out-of-range percentages,
    /// [`EngineError::InvalidRate`] for out-of-range fares or rates, and
    /// [`EngineError::ConfigWriteError`] if the file cannot be written.
    pub async fn update(&self, update: &TariffUpdate) -> EngineResult<TariffConfig> {
        let mut guard = self.config.write().await;
        let next = guard.with_update(update)?;

        self.persist(&next).await?;
        *guard = next.clone();

        info!(
            path = %self.path.display(),
            base_fare = %next.base_fare,
            mid_tier_rate = %next.mid_tier_rate,
            far_tier_rate = %next.far_tier_rate,
            global_adjustment = %next.global_adjustment,
            coupons = next.coupons.len(),
            "Tariff updated"
        );

        Ok(next)
    }

    /// Writes the tariff to a sibling temp file, then renames it into place.
    async fn persist(&self, config: &TariffConfig) -> EngineResult<()> {
        let path_str = self.path.display().to_string();
        let write_error = |message: String| EngineError::ConfigWriteError {
            path: path_str.clone(),
            message,
        };

        let content = serde_yaml::to_string(config).map_err(|e| write_error(e.to_string()))?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|e| write_error(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| write_error(e.to_string()))
    }
}

/// Parses a tariff document, degrading field by field to the defaults.
fn parse_tariff(path: &str, content: &str) -> TariffConfig {
    let mapping = match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            warn!(path = %path, value = ?other, "Tariff file is not a mapping, using defaults");
            return TariffConfig::default();
        }
        Err(err) => {
            warn!(path = %path, error = %err, "Tariff file is not valid YAML, using defaults");
            return TariffConfig::default();
        }
    };

    let defaults = TariffConfig::default();

    let global_adjustment = read_decimal(&mapping, "global_adjustment")
        .and_then(|value| match Percent::from_operator_value("global_adjustment", value) {
            Ok(percent) => Some(percent),
            Err(err) => {
                warn!(error = %err, "Ignoring global adjustment, using default");
                None
            }
        })
        .unwrap_or(defaults.global_adjustment);

    TariffConfig {
        base_fare: read_amount(&mapping, "base_fare").unwrap_or(defaults.base_fare),
        mid_tier_rate: read_amount(&mapping, "mid_tier_rate").unwrap_or(defaults.mid_tier_rate),
        far_tier_rate: read_amount(&mapping, "far_tier_rate").unwrap_or(defaults.far_tier_rate),
        global_adjustment,
        coupons: read_coupons(&mapping),
    }
}

/// Reads a fare or rate, rejecting values outside the accepted range.
fn read_amount(mapping: &Mapping, key: &str) -> Option<Decimal> {
    let value = read_decimal(mapping, key)?;
    match check_tariff_amount(key, value) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "Out-of-range tariff field, using default");
            None
        }
    }
}

/// Reads a numeric field, logging when a present value is unusable.
fn read_decimal(mapping: &Mapping, key: &str) -> Option<Decimal> {
    let value = mapping.get(key)?;
    let decimal = yaml_decimal(value);
    if decimal.is_none() {
        warn!(field = key, value = ?value, "Malformed tariff field, using default");
    }
    decimal
}

fn read_coupons(mapping: &Mapping) -> BTreeMap<String, Percent> {
    let Some(value) = mapping.get("coupons") else {
        return BTreeMap::new();
    };
    let Value::Mapping(entries) = value else {
        warn!(value = ?value, "Coupon table is not a mapping, ignoring it");
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(code, value)| {
            let code = match code {
                Value::String(code) if !code.trim().is_empty() => normalize_coupon_code(code),
                _ => {
                    warn!(code = ?code, "Skipping coupon with invalid code");
                    return None;
                }
            };
            let percent = yaml_decimal(value)
                .ok_or_else(|| format!("not a number: {:?}", value))
                .and_then(|v| Percent::from_operator_value(&code, v).map_err(|e| e.to_string()));
            match percent {
                Ok(percent) => Some((code, percent)),
                Err(reason) => {
                    warn!(code = %code, reason = %reason, "Skipping malformed coupon");
                    None
                }
            }
        })
        .collect()
}

fn yaml_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
