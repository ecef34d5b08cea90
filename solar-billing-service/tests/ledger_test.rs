//! Credit ledger adjustment and invoice credit sync tests.

mod common;

use common::init_tracing;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solar_billing_service::models::{BillingInput, CreditAdjustment, CreditOperation};
use solar_billing_service::services::ledger::apply;
use solar_billing_service::services::{adjustment_delta, compute, InvoiceCreditChange};
use solar_billing_service::BillingError;

#[test]
fn debit_lowers_and_credit_raises_the_balance() {
    init_tracing();

    assert_eq!(adjustment_delta(CreditOperation::Debit, dec!(50)), Ok(dec!(-50)));
    assert_eq!(adjustment_delta(CreditOperation::Credit, dec!(50)), Ok(dec!(50)));

    let balance = apply(dec!(120), dec!(-50)).unwrap();
    assert_eq!(balance, dec!(70));
}

#[test]
fn non_positive_amounts_are_rejected() {
    assert_eq!(
        adjustment_delta(CreditOperation::Debit, dec!(-5)),
        Err(BillingError::InvalidAmount(dec!(-5)))
    );
    assert_eq!(
        adjustment_delta(CreditOperation::Credit, Decimal::ZERO),
        Err(BillingError::InvalidAmount(Decimal::ZERO))
    );
}

#[test]
fn adjustment_accepts_legacy_operation_labels() {
    let adjustment: CreditAdjustment =
        serde_json::from_str(r#"{"operation": "debitar", "amount": "12.5", "description": "leitura corrigida"}"#)
            .unwrap();

    assert_eq!(adjustment.operation, CreditOperation::Debit);
    assert_eq!(adjustment.delta_kwh(), Ok(dec!(-12.5)));

    let adjustment: CreditAdjustment =
        serde_json::from_str(r#"{"operation": "credit", "amount": "3"}"#).unwrap();
    assert_eq!(adjustment.operation, CreditOperation::Credit);
    assert!(adjustment.description.is_empty());
    assert_eq!(serde_json::to_value(adjustment.operation).unwrap(), "credit");
}

#[test]
fn create_then_delete_restores_the_balance() {
    let created = InvoiceCreditChange::Created { credited_kwh: dec!(180) };
    let deleted = InvoiceCreditChange::Deleted { credited_kwh: dec!(180) };

    let balance = apply(dec!(400), created.balance_delta().unwrap()).unwrap();
    assert_eq!(balance, dec!(220));

    let balance = apply(balance, deleted.balance_delta().unwrap()).unwrap();
    assert_eq!(balance, dec!(400));
}

#[test]
fn update_moves_the_balance_by_the_difference() {
    let change = InvoiceCreditChange::Updated {
        previous_kwh: dec!(200),
        current_kwh: dec!(150),
    };
    assert_eq!(change.balance_delta(), Ok(dec!(50)));

    let change = InvoiceCreditChange::Updated {
        previous_kwh: dec!(100),
        current_kwh: dec!(150),
    };
    assert_eq!(change.balance_delta(), Ok(dec!(-50)));
}

#[test]
fn negative_credited_amounts_are_rejected() {
    let change = InvoiceCreditChange::Deleted { credited_kwh: dec!(-1) };
    assert_eq!(
        change.balance_delta(),
        Err(BillingError::NegativeQuantity {
            field: "credited_kwh",
            value: dec!(-1)
        })
    );
}

#[test]
fn new_invoice_consumes_its_credit() {
    let contract = common::contract_with_credit(dec!(300));
    let input = BillingInput::new(dec!(120), dec!(5));

    let result = compute(&contract, &input).unwrap();
    let change = InvoiceCreditChange::for_computation(&input, &result);

    assert_eq!(change, InvoiceCreditChange::Created { credited_kwh: dec!(120) });
    assert_eq!(
        apply(contract.current_credit_balance_kwh, change.balance_delta().unwrap()).unwrap(),
        result.credit_balance_after_kwh
    );
}

#[test]
fn credit_change_serializes_with_tag() {
    let change = InvoiceCreditChange::Updated {
        previous_kwh: dec!(10),
        current_kwh: dec!(4),
    };
    let json = serde_json::to_value(change).unwrap();

    assert_eq!(json["change"], "updated");
    assert_eq!(json["previous_kwh"], "10");
    assert_eq!(json["current_kwh"], "4");
}
