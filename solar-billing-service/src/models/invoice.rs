//! Invoice input and result models.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept for currency amounts at the persistence boundary.
pub const CURRENCY_SCALE: u32 = 2;
/// Decimal places kept for per-kWh rates.
pub const RATE_SCALE: u32 = 4;
/// Decimal places kept for energy quantities.
pub const ENERGY_SCALE: u32 = 2;

/// Invoice status. Carried through computations untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    #[serde(alias = "aberto")]
    Open,
    #[serde(alias = "vencido")]
    Overdue,
    #[serde(alias = "pago")]
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Open => "open",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The invoice being edited, as far as credit restoration is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorInvoice {
    #[serde(default)]
    pub invoice_id: Option<i64>,
    /// Credit the invoice consumed when it was last saved.
    pub credited_kwh: Decimal,
}

/// Per-period inputs for one invoicing action (create, edit or clone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInput {
    pub consumption_kwh: Decimal,
    #[serde(default)]
    pub fixed_cost: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub existing_invoice: Option<PriorInvoice>,
}

impl BillingInput {
    pub fn new(consumption_kwh: Decimal, fixed_cost: Decimal) -> Self {
        Self {
            consumption_kwh,
            fixed_cost,
            status: InvoiceStatus::Open,
            existing_invoice: None,
        }
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark this input as an edit of an invoice that consumed `credited_kwh`.
    pub fn editing(mut self, invoice_id: Option<i64>, credited_kwh: Decimal) -> Self {
        self.existing_invoice = Some(PriorInvoice {
            invoice_id,
            credited_kwh,
        });
        self
    }

    /// Credit consumed by the invoice under edit, zero for new invoices.
    pub fn previously_credited_kwh(&self) -> Decimal {
        self.existing_invoice
            .as_ref()
            .map_or(Decimal::ZERO, |prior| prior.credited_kwh)
    }
}

/// Computed invoice fields, handed to the backend for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    /// Per-kWh price after the negotiated discount.
    pub injection_rate: Decimal,
    pub credited_kwh: Decimal,
    pub value_without_discount: Decimal,
    pub total_invoiced: Decimal,
    pub amount_to_collect: Decimal,
    pub discount_amount: Decimal,
    pub margin: Decimal,
    /// Credit left once this invoice's deduction is taken.
    pub credit_balance_after_kwh: Decimal,
    pub status: InvoiceStatus,
}

impl InvoiceResult {
    /// Copy rounded for persistence or display.
    ///
    /// Credited energy is truncated so the stored deduction never exceeds the
    /// credit that was available; the remaining balance keeps the difference.
    /// The discount is taken from the rounded pair it is derived from.
    pub fn rounded(&self) -> Self {
        let credited_kwh = self
            .credited_kwh
            .round_dp_with_strategy(ENERGY_SCALE, RoundingStrategy::ToZero);
        let available_kwh = self.credited_kwh + self.credit_balance_after_kwh;
        let value_without_discount = round(self.value_without_discount, CURRENCY_SCALE);
        let amount_to_collect = round(self.amount_to_collect, CURRENCY_SCALE);

        Self {
            injection_rate: round(self.injection_rate, RATE_SCALE),
            credited_kwh,
            value_without_discount,
            total_invoiced: round(self.total_invoiced, CURRENCY_SCALE),
            amount_to_collect,
            discount_amount: value_without_discount - amount_to_collect,
            margin: round(self.margin, CURRENCY_SCALE),
            credit_balance_after_kwh: available_kwh - credited_kwh,
            status: self.status,
        }
    }
}

pub(crate) fn round(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_accepts_legacy_labels() {
        let status: InvoiceStatus = serde_json::from_str("\"vencido\"").unwrap();
        assert_eq!(status, InvoiceStatus::Overdue);
        let status: InvoiceStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(status, InvoiceStatus::Paid);
        let status: InvoiceStatus = serde_json::from_str("\"aberto\"").unwrap();
        assert_eq!(status, InvoiceStatus::Open);
        assert!(serde_json::from_str::<InvoiceStatus>("\"unknown\"").is_err());
        assert_eq!(serde_json::to_string(&InvoiceStatus::Overdue).unwrap(), "\"overdue\"");
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        assert_eq!(round(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round(dec!(-2.345), 2), dec!(-2.35));
        assert_eq!(round(dec!(1.01995), 4), dec!(1.0200));
    }

    #[test]
    fn test_rounded_never_credits_more_than_available() {
        let result = InvoiceResult {
            injection_rate: dec!(1.02),
            credited_kwh: dec!(0.005),
            value_without_discount: dec!(10.005),
            total_invoiced: dec!(8.5049),
            amount_to_collect: dec!(8.5049),
            discount_amount: dec!(1.5001),
            margin: dec!(1.70098),
            credit_balance_after_kwh: dec!(0),
            status: InvoiceStatus::Open,
        };

        let rounded = result.rounded();

        assert_eq!(rounded.credited_kwh, dec!(0.00));
        assert_eq!(rounded.credit_balance_after_kwh, dec!(0.005));
        assert_eq!(rounded.credited_kwh + rounded.credit_balance_after_kwh, dec!(0.005));
        // 10.01 - 8.50, not round(1.5001)
        assert_eq!(rounded.discount_amount, dec!(1.51));
        assert_eq!(
            rounded.discount_amount,
            rounded.value_without_discount - rounded.amount_to_collect
        );
    }

    #[test]
    fn test_previously_credited_defaults_to_zero() {
        let input = BillingInput::new(dec!(100), dec!(0));
        assert_eq!(input.previously_credited_kwh(), Decimal::ZERO);
        let input = input.editing(Some(9), dec!(40));
        assert_eq!(input.previously_credited_kwh(), dec!(40));
    }

    #[test]
    fn test_billing_input_defaults_from_json() {
        let input: BillingInput = serde_json::from_str(r#"{"consumption_kwh": "120.5"}"#).unwrap();
        assert_eq!(input.consumption_kwh, dec!(120.5));
        assert_eq!(input.fixed_cost, Decimal::ZERO);
        assert_eq!(input.status, InvoiceStatus::Open);
        assert!(input.existing_invoice.is_none());
    }
}
