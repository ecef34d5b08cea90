//! Multi-client billing runs.

use crate::models::{BillingInput, ClientContract, InvoiceResult};
use crate::services::calculator::InvoiceCalculator;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// One client to invoice in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRequest {
    pub contract: ClientContract,
    pub input: BillingInput,
}

/// Billing run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingRunStatus {
    Completed,
    CompletedWithErrors,
}

impl BillingRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingRunStatus::Completed => "completed",
            BillingRunStatus::CompletedWithErrors => "completed_with_errors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BillingOutcome {
    Computed { invoice: InvoiceResult },
    Failed { error: String },
}

/// Per-client result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRunResult {
    pub client_id: i64,
    #[serde(flatten)]
    pub outcome: BillingOutcome,
}

impl BillingRunResult {
    pub fn invoice(&self) -> Option<&InvoiceResult> {
        match &self.outcome {
            BillingOutcome::Computed { invoice } => Some(invoice),
            BillingOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRun {
    pub status: BillingRunStatus,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BillingRunResult>,
}

/// Compute invoices for every request.
///
/// A rejected request is logged and recorded as failed; the run always covers
/// all requests. Computed invoices are rounded for persistence.
#[instrument(skip_all, fields(requests = requests.len()))]
pub fn run_batch(calculator: &InvoiceCalculator, requests: &[BillingRequest]) -> BillingRun {
    let mut succeeded = 0;
    let mut failed = 0;
    let mut results = Vec::with_capacity(requests.len());

    for request in requests {
        let client_id = request.contract.client_id;
        let outcome = match calculator.compute(&request.contract, &request.input) {
            Ok(invoice) => {
                succeeded += 1;
                BillingOutcome::Computed {
                    invoice: invoice.rounded(),
                }
            }
            Err(e) => {
                failed += 1;
                warn!(client_id, error = %e, "Skipping client in billing run");
                BillingOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        results.push(BillingRunResult { client_id, outcome });
    }

    let status = if failed == 0 {
        BillingRunStatus::Completed
    } else {
        BillingRunStatus::CompletedWithErrors
    };

    info!(
        processed = requests.len(),
        succeeded,
        failed,
        status = status.as_str(),
        credit_treatment = calculator.settings().credit_treatment.as_str(),
        "Billing run finished"
    );

    BillingRun {
        status,
        processed: requests.len(),
        succeeded,
        failed,
        results,
    }
}
