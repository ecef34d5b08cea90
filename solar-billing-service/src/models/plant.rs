//! Generation plant models.

use super::BillingPeriod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Percentage of a plant's generation credited to one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantShare {
    pub client_id: i64,
    pub percentage: Decimal,
}

/// kWh credited to a client from one production record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAllocation {
    pub client_id: i64,
    pub kwh: Decimal,
}

/// Monthly generation of a plant, seen from one participating client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientGeneration {
    pub plant_id: i64,
    pub plant_name: String,
    pub period: BillingPeriod,
    pub kwh_generated: Decimal,
    /// The client's share of this plant.
    pub percentage: Decimal,
}
