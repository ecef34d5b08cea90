//! Manual credit adjustment models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of an operator-entered adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditOperation {
    #[serde(alias = "creditar")]
    Credit,
    #[serde(alias = "debitar")]
    Debit,
}

/// Adjustment request as entered by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAdjustment {
    pub operation: CreditOperation,
    /// Unsigned kWh amount, must be positive.
    pub amount: Decimal,
    /// Audit text, opaque to the computation.
    #[serde(default)]
    pub description: String,
}

/// Persisted adjustment, with the signed amount the backend stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub amount_kwh: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
