//! Client contract terms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commercial terms of a client, as held by the backend at billing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContract {
    pub client_id: i64,
    /// Utility tariff in currency per kWh.
    pub original_kwh_rate: Decimal,
    /// Percentage discount off the tariff, 0 to 100.
    pub negotiated_discount_percent: Decimal,
    /// Banked credit carried from prior periods.
    #[serde(default)]
    pub current_credit_balance_kwh: Decimal,
}

impl ClientContract {
    pub fn new(
        client_id: i64,
        original_kwh_rate: Decimal,
        negotiated_discount_percent: Decimal,
    ) -> Self {
        Self {
            client_id,
            original_kwh_rate,
            negotiated_discount_percent,
            current_credit_balance_kwh: Decimal::ZERO,
        }
    }

    pub fn with_credit_balance(mut self, kwh: Decimal) -> Self {
        self.current_credit_balance_kwh = kwh;
        self
    }
}
