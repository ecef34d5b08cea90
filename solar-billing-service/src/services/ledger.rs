//! Credit balance movements: manual adjustments and invoice credit sync.

use crate::error::BillingError;
use crate::models::{BillingInput, CreditAdjustment, CreditOperation, InvoiceResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Signed kWh delta for an operator adjustment.
pub fn adjustment_delta(operation: CreditOperation, amount: Decimal) -> Result<Decimal, BillingError> {
    if amount <= Decimal::ZERO {
        return Err(BillingError::InvalidAmount(amount));
    }
    Ok(match operation {
        CreditOperation::Credit => amount,
        CreditOperation::Debit => -amount,
    })
}

impl CreditAdjustment {
    pub fn delta_kwh(&self) -> Result<Decimal, BillingError> {
        adjustment_delta(self.operation, self.amount)
    }
}

/// Balance after applying a signed delta.
pub fn apply(balance: Decimal, delta: Decimal) -> Result<Decimal, BillingError> {
    balance
        .checked_add(delta)
        .ok_or(BillingError::Overflow("credit_balance"))
}

/// Change to an invoice's consumed credit, as persisted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum InvoiceCreditChange {
    Created { credited_kwh: Decimal },
    Updated { previous_kwh: Decimal, current_kwh: Decimal },
    Deleted { credited_kwh: Decimal },
}

impl InvoiceCreditChange {
    /// The change a computed invoice implies once it is persisted.
    pub fn for_computation(input: &BillingInput, result: &InvoiceResult) -> Self {
        match &input.existing_invoice {
            Some(prior) => InvoiceCreditChange::Updated {
                previous_kwh: prior.credited_kwh,
                current_kwh: result.credited_kwh,
            },
            None => InvoiceCreditChange::Created {
                credited_kwh: result.credited_kwh,
            },
        }
    }

    /// Signed delta to apply to the client's credit balance.
    ///
    /// Creating an invoice consumes its credit, deleting it gives the credit
    /// back, and an update moves the balance by the difference.
    pub fn balance_delta(&self) -> Result<Decimal, BillingError> {
        match *self {
            InvoiceCreditChange::Created { credited_kwh } => {
                BillingError::ensure_non_negative("credited_kwh", credited_kwh)?;
                Ok(-credited_kwh)
            }
            InvoiceCreditChange::Updated {
                previous_kwh,
                current_kwh,
            } => {
                BillingError::ensure_non_negative("previous_kwh", previous_kwh)?;
                BillingError::ensure_non_negative("current_kwh", current_kwh)?;
                Ok(previous_kwh - current_kwh)
            }
            InvoiceCreditChange::Deleted { credited_kwh } => {
                BillingError::ensure_non_negative("credited_kwh", credited_kwh)?;
                Ok(credited_kwh)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_adds_signed_delta() {
        assert_eq!(apply(dec!(100), dec!(-30)).unwrap(), dec!(70));
        assert_eq!(apply(dec!(10), dec!(-30)).unwrap(), dec!(-20));
        assert!(apply(Decimal::MAX, dec!(1)).is_err());
    }

    #[test]
    fn test_adjustment_method_matches_free_function() {
        let adjustment = CreditAdjustment {
            operation: CreditOperation::Debit,
            amount: dec!(12.5),
            description: "meter correction".to_string(),
        };
        assert_eq!(adjustment.delta_kwh().unwrap(), dec!(-12.5));
    }
}
