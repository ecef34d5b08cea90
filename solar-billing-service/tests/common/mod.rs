//! Common test utilities for solar-billing-service integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solar_billing_service::models::{BillingInput, ClientContract};
use std::sync::Once;

static INIT: Once = Once::new();

pub const TEST_CLIENT_ID: i64 = 42;

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,solar_billing_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Contract used by the reference scenarios: R$ 1.20/kWh at 15% off.
pub fn reference_contract() -> ClientContract {
    ClientContract::new(TEST_CLIENT_ID, dec!(1.20), dec!(15))
}

pub fn contract_with_credit(credit_kwh: Decimal) -> ClientContract {
    reference_contract().with_credit_balance(credit_kwh)
}

/// 500 kWh with a R$ 10.00 fixed charge.
pub fn reference_input() -> BillingInput {
    BillingInput::new(dec!(500), dec!(10.00))
}
