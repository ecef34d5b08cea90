//! Domain errors for billing computations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Typed failure of a billing computation.
///
/// Every variant is a rejected input. None of them is retryable, and a failed
/// computation never yields a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Invalid contract: kWh rate must be positive, got {0}")]
    InvalidContract(Decimal),

    #[error("Invalid discount: {0}% is outside [0, 100]")]
    InvalidDiscount(Decimal),

    #[error("Invalid amount: adjustment must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Invalid input: {field} must not be negative, got {value}")]
    NegativeQuantity { field: &'static str, value: Decimal },

    #[error("Invalid share for client {client_id}: {percentage}%")]
    InvalidShare { client_id: i64, percentage: Decimal },

    #[error("Plant distribution exceeds 100%: total {0}%")]
    DistributionExceeded(Decimal),

    #[error("Invalid billing period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl BillingError {
    pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), Self> {
        if value < Decimal::ZERO {
            return Err(BillingError::NegativeQuantity { field, value });
        }
        Ok(())
    }
}
