//! Splitting plant generation into client credit.

use crate::error::BillingError;
use crate::models::{CreditAllocation, PlantShare};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Slack, in percentage points, allowed above 100% when validating shares.
pub const DISTRIBUTION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Validated set of client shares for one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDistribution {
    plant_id: i64,
    shares: Vec<PlantShare>,
}

impl PlantDistribution {
    pub fn new(plant_id: i64, shares: Vec<PlantShare>) -> Result<Self, BillingError> {
        let mut total = Decimal::ZERO;
        for share in &shares {
            if share.percentage < Decimal::ZERO {
                return Err(BillingError::InvalidShare {
                    client_id: share.client_id,
                    percentage: share.percentage,
                });
            }
            total = total
                .checked_add(share.percentage)
                .ok_or(BillingError::Overflow("distribution_total"))?;
            if total > Decimal::ONE_HUNDRED + DISTRIBUTION_TOLERANCE {
                return Err(BillingError::DistributionExceeded(total));
            }
        }

        debug!(plant_id, clients = shares.len(), total = %total, "Plant distribution validated");
        Ok(Self { plant_id, shares })
    }

    pub fn plant_id(&self) -> i64 {
        self.plant_id
    }

    pub fn shares(&self) -> &[PlantShare] {
        &self.shares
    }

    pub fn total_percentage(&self) -> Decimal {
        self.shares.iter().map(|s| s.percentage).sum()
    }

    /// Credit each client receives from a new production of `kwh_generated`.
    pub fn allocate(&self, kwh_generated: Decimal) -> Result<Vec<CreditAllocation>, BillingError> {
        BillingError::ensure_non_negative("kwh_generated", kwh_generated)?;
        self.split(kwh_generated)
    }

    /// Credit corrections when a production is edited from `old_kwh` to `new_kwh`.
    pub fn reallocate(
        &self,
        old_kwh: Decimal,
        new_kwh: Decimal,
    ) -> Result<Vec<CreditAllocation>, BillingError> {
        BillingError::ensure_non_negative("old_kwh", old_kwh)?;
        BillingError::ensure_non_negative("new_kwh", new_kwh)?;
        self.split(new_kwh - old_kwh)
    }

    /// Credit to withdraw when a production of `kwh_generated` is deleted.
    pub fn reverse(&self, kwh_generated: Decimal) -> Result<Vec<CreditAllocation>, BillingError> {
        BillingError::ensure_non_negative("kwh_generated", kwh_generated)?;
        self.split(-kwh_generated)
    }

    fn split(&self, kwh: Decimal) -> Result<Vec<CreditAllocation>, BillingError> {
        self.shares
            .iter()
            .map(|share| {
                let kwh = share_of(share.percentage, kwh)?;
                Ok(CreditAllocation {
                    client_id: share.client_id,
                    kwh,
                })
            })
            .collect()
    }
}

/// `percentage` percent of `kwh`.
pub fn share_of(percentage: Decimal, kwh: Decimal) -> Result<Decimal, BillingError> {
    (percentage / Decimal::ONE_HUNDRED)
        .checked_mul(kwh)
        .ok_or(BillingError::Overflow("credit_allocation"))
}
