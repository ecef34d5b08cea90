//! Client credit statement assembly.

use crate::error::BillingError;
use crate::models::{
    AdjustmentRecord, BillingPeriod, ClientGeneration, EntryKind, InvoiceCreditRecord, Statement,
    StatementEntry,
};
use crate::services::distribution::share_of;
use rust_decimal::Decimal;
use tracing::debug;

const GENERATION_STATUS: &str = "completed";
const ADJUSTMENT_STATUS: &str = "processed";

/// Merge a client's credit-affecting events into one statement.
///
/// Entries are ordered by period, newest first. Within a period, invoices come
/// before generation, which comes before manual adjustments.
pub fn build_statement(
    client_id: i64,
    invoices: &[InvoiceCreditRecord],
    generation: &[ClientGeneration],
    adjustments: &[AdjustmentRecord],
) -> Result<Statement, BillingError> {
    let mut entries = Vec::with_capacity(invoices.len() + generation.len() + adjustments.len());

    for invoice in invoices {
        entries.push(StatementEntry {
            period: invoice.period,
            kind: EntryKind::Billing,
            kwh: -invoice.credited_kwh,
            description: format!("Invoice #{}", invoice.invoice_id),
            status: invoice.status.to_string(),
            invoice_id: Some(invoice.invoice_id),
        });
    }

    for production in generation {
        entries.push(StatementEntry {
            period: production.period,
            kind: EntryKind::Generation,
            kwh: share_of(production.percentage, production.kwh_generated)?,
            description: format!("Generation - {}", production.plant_name),
            status: GENERATION_STATUS.to_string(),
            invoice_id: None,
        });
    }

    for adjustment in adjustments {
        entries.push(StatementEntry {
            period: BillingPeriod::containing(adjustment.created_at),
            kind: EntryKind::Adjustment,
            kwh: adjustment.amount_kwh,
            description: adjustment.description.clone(),
            status: ADJUSTMENT_STATUS.to_string(),
            invoice_id: None,
        });
    }

    // Stable sort keeps the insertion order for entries of the same period.
    entries.sort_by(|a, b| b.period.cmp(&a.period));

    let net_kwh = entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, entry| acc.checked_add(entry.kwh))
        .ok_or(BillingError::Overflow("statement_net"))?;

    debug!(client_id, entries = entries.len(), net_kwh = %net_kwh, "Statement built");

    Ok(Statement {
        client_id,
        entries,
        net_kwh,
    })
}
