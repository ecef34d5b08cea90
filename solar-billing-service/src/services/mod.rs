//! Billing computations for solar-billing-service.

pub mod batch;
pub mod calculator;
pub mod dashboard;
pub mod distribution;
pub mod ledger;
pub mod statement;

pub use batch::{run_batch, BillingOutcome, BillingRequest, BillingRun, BillingRunStatus};
pub use calculator::{compute, implied_discount_percent, injection_rate, InvoiceCalculator};
pub use dashboard::{summarize, DashboardMetrics, InvoiceSummary};
pub use distribution::PlantDistribution;
pub use ledger::{adjustment_delta, InvoiceCreditChange};
pub use statement::build_statement;
