//! Client credit statement models.

use super::{BillingPeriod, InvoiceStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source of a statement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[serde(alias = "geracao")]
    Generation,
    #[serde(alias = "faturamento")]
    Billing,
    #[serde(alias = "ajuste")]
    Adjustment,
}

/// Credit-relevant view of a persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCreditRecord {
    pub invoice_id: i64,
    pub period: BillingPeriod,
    pub credited_kwh: Decimal,
    pub status: InvoiceStatus,
}

/// One credit-affecting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub period: BillingPeriod,
    pub kind: EntryKind,
    /// Positive for additions, negative for deductions.
    pub kwh: Decimal,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
}

/// Client statement, newest entries first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub client_id: i64,
    pub entries: Vec<StatementEntry>,
    pub net_kwh: Decimal,
}
