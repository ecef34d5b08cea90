//! Admin dashboard aggregates.

use crate::models::{round, InvoiceStatus, CURRENCY_SCALE, ENERGY_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields of a persisted invoice the dashboard looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub status: InvoiceStatus,
    pub amount_to_collect: Decimal,
    #[serde(default)]
    pub margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub open_invoices_count: usize,
    pub open_invoices_value: Decimal,
    pub total_generation_kwh: Decimal,
    pub total_margin: Decimal,
}

/// Aggregate invoice and production figures for the admin overview.
///
/// Every invoice that is not paid counts as open, overdue ones included.
pub fn summarize<I>(invoices: &[InvoiceSummary], generation_kwh: I) -> DashboardMetrics
where
    I: IntoIterator<Item = Decimal>,
{
    let open: Vec<&InvoiceSummary> = invoices
        .iter()
        .filter(|inv| inv.status != InvoiceStatus::Paid)
        .collect();

    let open_invoices_value: Decimal = open.iter().map(|inv| inv.amount_to_collect).sum();
    let total_margin: Decimal = invoices.iter().map(|inv| inv.margin).sum();
    let total_generation_kwh: Decimal = generation_kwh.into_iter().sum();

    DashboardMetrics {
        open_invoices_count: open.len(),
        open_invoices_value: round(open_invoices_value, CURRENCY_SCALE),
        total_generation_kwh: round(total_generation_kwh, ENERGY_SCALE),
        total_margin: round(total_margin, CURRENCY_SCALE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(status: InvoiceStatus, amount: Decimal, margin: Decimal) -> InvoiceSummary {
        InvoiceSummary {
            status,
            amount_to_collect: amount,
            margin,
        }
    }

    #[test]
    fn test_summarize_counts_unpaid_as_open() {
        let invoices = vec![
            invoice(InvoiceStatus::Open, dec!(520.00), dec!(104.00)),
            invoice(InvoiceStatus::Overdue, dec!(80.555), dec!(16.11)),
            invoice(InvoiceStatus::Paid, dec!(300.00), dec!(60.00)),
        ];

        let metrics = summarize(&invoices, vec![dec!(1500), dec!(1234.567)]);

        assert_eq!(metrics.open_invoices_count, 2);
        assert_eq!(metrics.open_invoices_value, dec!(600.56));
        assert_eq!(metrics.total_generation_kwh, dec!(2734.57));
        assert_eq!(metrics.total_margin, dec!(180.11));
    }

    #[test]
    fn test_summarize_empty() {
        let metrics = summarize(&[], Vec::<Decimal>::new());
        assert_eq!(metrics.open_invoices_count, 0);
        assert_eq!(metrics.open_invoices_value, Decimal::ZERO);
        assert_eq!(metrics.total_generation_kwh, Decimal::ZERO);
    }
}
