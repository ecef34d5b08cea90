//! Solar Billing Service batch entry point.
//!
//! Reads a JSON array of billing requests, computes every invoice and writes
//! the billing run as JSON.

use service_core::error::AppError;
use service_core::observability::init_tracing;
use solar_billing_service::config::SolarBillingConfig;
use solar_billing_service::services::{run_batch, BillingRequest, InvoiceCalculator};
use std::fs;
use std::io::Write;

fn run(config: &SolarBillingConfig) -> Result<(), AppError> {
    let input_path = config.batch.input_path.as_ref().ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!("BATCH_INPUT_PATH is required"))
    })?;

    let raw = fs::read_to_string(input_path)?;
    let requests: Vec<BillingRequest> = serde_json::from_str(&raw)?;
    tracing::info!(path = %input_path.display(), requests = requests.len(), "Billing requests loaded");

    let calculator = InvoiceCalculator::new(config.billing.clone());
    let billing_run = run_batch(&calculator, &requests);
    let output = serde_json::to_string_pretty(&billing_run)?;

    match &config.batch.output_path {
        Some(path) => {
            fs::write(path, output)?;
            tracing::info!(path = %path.display(), "Billing run written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output)?;
        }
    }

    Ok(())
}

fn main() {
    // Load configuration
    let config = match SolarBillingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    init_tracing(
        &config.service_name,
        &config.common.log_level,
        config.common.log_format,
    );

    tracing::info!(
        version = %config.service_version,
        margin_rate = %config.billing.margin_rate,
        credit_treatment = config.billing.credit_treatment.as_str(),
        "Starting solar-billing-service"
    );

    if let Err(e) = run(&config) {
        if e.is_client_error() {
            tracing::warn!(error = %e, "Billing run rejected its input");
        } else {
            tracing::error!(error = %e, "Billing run aborted");
        }
        std::process::exit(e.exit_code());
    }
}
