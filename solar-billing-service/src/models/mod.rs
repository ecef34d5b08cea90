//! Domain models for solar-billing-service.

mod adjustment;
mod contract;
mod invoice;
mod period;
mod plant;
mod statement;

pub use adjustment::{AdjustmentRecord, CreditAdjustment, CreditOperation};
pub use contract::ClientContract;
pub use invoice::{
    BillingInput, CURRENCY_SCALE, ENERGY_SCALE, InvoiceResult, InvoiceStatus, PriorInvoice,
    RATE_SCALE,
};
pub use period::BillingPeriod;
pub use plant::{ClientGeneration, CreditAllocation, PlantShare};
pub use statement::{EntryKind, InvoiceCreditRecord, Statement, StatementEntry};

pub(crate) use invoice::round;
