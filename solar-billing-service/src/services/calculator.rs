//! Invoice calculation from contract terms, consumption and banked credit.
//!
//! All figures are carried at full precision. Rounding happens only through
//! [`InvoiceResult::rounded`] when a result leaves the process.

use crate::config::{BillingSettings, CreditTreatment};
use crate::error::BillingError;
use crate::models::{BillingInput, ClientContract, InvoiceResult};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Stateless invoice calculator. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct InvoiceCalculator {
    settings: BillingSettings,
}

impl InvoiceCalculator {
    pub fn new(settings: BillingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BillingSettings {
        &self.settings
    }

    /// Derive the invoice fields for one invoicing action.
    ///
    /// When `input.existing_invoice` is set, the credit that invoice consumed is
    /// restored to the available balance before the new deduction is taken, so
    /// repeated edits never lose credit.
    #[instrument(skip_all, fields(client_id = contract.client_id))]
    pub fn compute(
        &self,
        contract: &ClientContract,
        input: &BillingInput,
    ) -> Result<InvoiceResult, BillingError> {
        let injection_rate = injection_rate(
            contract.original_kwh_rate,
            contract.negotiated_discount_percent,
        )?;
        BillingError::ensure_non_negative(
            "current_credit_balance_kwh",
            contract.current_credit_balance_kwh,
        )?;
        BillingError::ensure_non_negative("consumption_kwh", input.consumption_kwh)?;
        BillingError::ensure_non_negative("fixed_cost", input.fixed_cost)?;

        let previously_credited = input.previously_credited_kwh();
        BillingError::ensure_non_negative("existing_invoice.credited_kwh", previously_credited)?;

        let consumption = input.consumption_kwh;
        let available_credit = add(
            contract.current_credit_balance_kwh,
            previously_credited,
            "available_credit",
        )?;
        let credited_kwh = consumption.min(available_credit);

        let billed_kwh = match self.settings.credit_treatment {
            CreditTreatment::LedgerOnly => consumption,
            CreditTreatment::OffsetConsumption => consumption - credited_kwh,
        };

        let value_without_discount = add(
            mul(consumption, contract.original_kwh_rate, "value_without_discount")?,
            input.fixed_cost,
            "value_without_discount",
        )?;
        let total_invoiced = mul(billed_kwh, injection_rate, "total_invoiced")?;
        let amount_to_collect = add(total_invoiced, input.fixed_cost, "amount_to_collect")?;
        let margin = mul(amount_to_collect, self.settings.margin_rate, "margin")?;

        debug!(
            injection_rate = %injection_rate,
            credited_kwh = %credited_kwh,
            amount_to_collect = %amount_to_collect,
            editing = input.existing_invoice.is_some(),
            "Invoice computed"
        );

        Ok(InvoiceResult {
            injection_rate,
            credited_kwh,
            value_without_discount,
            total_invoiced,
            amount_to_collect,
            discount_amount: value_without_discount - amount_to_collect,
            margin,
            credit_balance_after_kwh: available_credit - credited_kwh,
            status: input.status,
        })
    }
}

/// Compute an invoice with the default settings.
pub fn compute(
    contract: &ClientContract,
    input: &BillingInput,
) -> Result<InvoiceResult, BillingError> {
    InvoiceCalculator::default().compute(contract, input)
}

/// Tariff after the negotiated discount.
pub fn injection_rate(
    original_kwh_rate: Decimal,
    negotiated_discount_percent: Decimal,
) -> Result<Decimal, BillingError> {
    if original_kwh_rate <= Decimal::ZERO {
        return Err(BillingError::InvalidContract(original_kwh_rate));
    }
    if negotiated_discount_percent < Decimal::ZERO
        || negotiated_discount_percent > Decimal::ONE_HUNDRED
    {
        return Err(BillingError::InvalidDiscount(negotiated_discount_percent));
    }

    let factor = Decimal::ONE - negotiated_discount_percent / Decimal::ONE_HUNDRED;
    mul(original_kwh_rate, factor, "injection_rate")
}

/// Discount percentage implied by a stored pair of rates.
///
/// Used to prefill the discount when an existing invoice is edited or cloned.
pub fn implied_discount_percent(
    original_kwh_rate: Decimal,
    injection_rate: Decimal,
) -> Option<Decimal> {
    if original_kwh_rate <= Decimal::ZERO {
        return None;
    }
    let ratio = injection_rate.checked_div(original_kwh_rate)?;
    (Decimal::ONE - ratio).checked_mul(Decimal::ONE_HUNDRED)
}

fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, BillingError> {
    a.checked_mul(b).ok_or(BillingError::Overflow(field))
}

fn add(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, BillingError> {
    a.checked_add(b).ok_or(BillingError::Overflow(field))
}
