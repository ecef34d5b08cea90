//! Configuration module for solar-billing-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// How banked credit affects the billed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTreatment {
    /// Credit is tracked for the ledger only; the full consumption is billed.
    #[default]
    LedgerOnly,
    /// Credited kWh are removed from the billed consumption.
    OffsetConsumption,
}

impl CreditTreatment {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditTreatment::LedgerOnly => "ledger_only",
            CreditTreatment::OffsetConsumption => "offset_consumption",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ledger_only" => Some(CreditTreatment::LedgerOnly),
            "offset_consumption" => Some(CreditTreatment::OffsetConsumption),
            _ => None,
        }
    }
}

/// Business settings applied by the invoice calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSettings {
    /// Share of the collected amount booked as margin.
    pub margin_rate: Decimal,
    pub credit_treatment: CreditTreatment,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            margin_rate: Decimal::new(20, 2),
            credit_treatment: CreditTreatment::LedgerOnly,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SolarBillingConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub billing: BillingSettings,
    pub batch: BatchConfig,
}

impl SolarBillingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let mut common = core_config::Config::load()?;
        if let Ok(level) = env::var("LOG_LEVEL") {
            common.log_level = level;
        }

        let defaults = BillingSettings::default();
        let margin_rate = match env::var("BILLING_MARGIN_RATE") {
            Ok(raw) => parse_margin_rate(&raw)?,
            Err(_) => defaults.margin_rate,
        };
        let credit_treatment = match env::var("BILLING_CREDIT_TREATMENT") {
            Ok(raw) => CreditTreatment::parse(&raw).ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "BILLING_CREDIT_TREATMENT must be ledger_only or offset_consumption, got '{}'",
                    raw
                ))
            })?,
            Err(_) => defaults.credit_treatment,
        };

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "solar-billing-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            billing: BillingSettings {
                margin_rate,
                credit_treatment,
            },
            batch: BatchConfig {
                input_path: env::var("BATCH_INPUT_PATH").ok().map(PathBuf::from),
                output_path: env::var("BATCH_OUTPUT_PATH").ok().map(PathBuf::from),
            },
        })
    }
}

fn parse_margin_rate(raw: &str) -> Result<Decimal, AppError> {
    let rate = Decimal::from_str(raw.trim()).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("BILLING_MARGIN_RATE '{}' is not a number: {}", raw, e))
    })?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "BILLING_MARGIN_RATE must be within [0, 1], got {}",
            rate
        )));
    }
    Ok(rate)
}
