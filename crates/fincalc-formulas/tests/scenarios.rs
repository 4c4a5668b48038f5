//! Worked scenarios through the public API and the registry.

use approx::assert_relative_eq;
use fincalc_formulas::prelude::*;
use fincalc_formulas::{annuities, bonds, capital_budgeting, firm, stocks, time_value};

// =============================================================================
// IRR
// =============================================================================

#[test]
fn irr_of_one_period_project_is_ten_percent() {
    let outcome = irr(100.0, &[110.0], &IrrConfig::default()).unwrap();

    assert!(outcome.is_converged());
    assert_relative_eq!(outcome.rate().unwrap(), 0.10, epsilon = 1e-4);
}

#[test]
fn irr_without_inflows_reports_no_solution() {
    let outcome = irr(100.0, &[0.0], &IrrConfig::default()).unwrap();

    assert!(!outcome.is_converged());
    assert_eq!(outcome.rate(), None);
    assert_eq!(outcome.iterations(), 1000);
}

#[test]
fn irr_zero_rate_is_not_confused_with_not_found() {
    let outcome = irr(100.0, &[50.0, 50.0], &IrrConfig::default()).unwrap();

    let rate = outcome.rate().unwrap();
    assert!(rate.abs() < 1e-4);
}

#[test]
fn irr_zeroes_npv() {
    let flows = [200.0, 300.0, 400.0, 500.0];
    let rate = irr(1000.0, &flows, &IrrConfig::default())
        .unwrap()
        .rate()
        .unwrap();

    let npv = capital_budgeting::npv(1000.0, rate, &flows).unwrap();
    assert!(npv.abs() < 1e-4);
}

#[test]
fn irr_custom_bracket_misses_root() {
    // True IRR is 10%, outside [0.2, 0.5].
    let config = IrrConfig::default()
        .with_bracket(0.2, 0.5)
        .with_bracket_policy(BracketPolicy::Verify);
    let outcome = irr(100.0, &[110.0], &config).unwrap();

    assert!(matches!(
        outcome,
        IrrOutcome::NotFound {
            reason: NotFoundReason::NoSignChange,
            ..
        }
    ));
}

// =============================================================================
// CLOSED-FORM FORMULAS
// =============================================================================

#[test]
fn growing_perpetuity_requires_rate_above_growth() {
    let err = annuities::pv_perpetuity_growth(100.0, 0.05, 0.06).unwrap_err();
    assert!(matches!(err, FinanceError::Domain { .. }));
}

#[test]
fn zero_coupon_bond_round_trip() {
    let price = bonds::zero_coupon_price(1000.0, 0.05, 10).unwrap();
    assert_relative_eq!(price, 613.91, epsilon = 0.01);

    let ytm = bonds::ytm_zero_coupon(1000.0, 613.91, 10).unwrap();
    assert_relative_eq!(ytm, 0.05, epsilon = 1e-5);
}

#[test]
fn enterprise_value_example() {
    assert_eq!(firm::enterprise_value(500.0, 200.0, 50.0).unwrap(), 650.0);
}

#[test]
fn npv_example() {
    let value = capital_budgeting::npv(1000.0, 0.10, &[500.0, 500.0, 500.0]).unwrap();
    let expected = -1000.0 + 500.0 / 1.1 + 500.0 / 1.1_f64.powi(2) + 500.0 / 1.1_f64.powi(3);

    assert_relative_eq!(value, expected, epsilon = 1e-9);
    assert_relative_eq!(value, 243.43, epsilon = 0.01);
}

#[test]
fn npv_matches_pv_of_full_vector() {
    let flows = [120.0, -30.0, 260.0, 75.0];
    let npv = capital_budgeting::npv(400.0, 0.07, &flows).unwrap();
    let pv = time_value::pv_cashflows(&[-400.0, 120.0, -30.0, 260.0, 75.0], 0.07).unwrap();

    assert_relative_eq!(npv, pv, epsilon = 1e-9);
}

#[test]
fn ddm_terminal_growth_single_dividend() {
    let value = stocks::ddm_terminal_growth(&[2.0], 0.08, 0.0).unwrap();
    assert_relative_eq!(value, 2.0 / 1.08 + (2.0 / 0.08) / 1.08, epsilon = 1e-9);
}

#[test]
fn coupon_bond_at_zero_yield_is_numeric_error() {
    let err = bonds::ytm_coupon_bond(30.0, 1000.0, 0.0, 5).unwrap_err();
    assert!(matches!(err, FinanceError::Numeric { .. }));
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn registry_matches_direct_calls() {
    let params = Params::new()
        .with("cash_flow", 100.0)
        .with("rate", 0.06)
        .with("growth_rate", 0.02)
        .with("periods", 15.0);
    let via_registry = evaluate(FormulaId::PvGrowingAnnuity, &params).unwrap();
    let direct = annuities::pv_growing_annuity(100.0, 0.06, 0.02, 15).unwrap();

    assert_eq!(via_registry, direct);
}

#[test]
fn registry_dividend_model_by_name() {
    let params = Params::new()
        .with_series("dividends", vec![1.0, 1.1, 1.21])
        .with("equity_cost", 0.10);
    let value = evaluate_named("ddm", &params).unwrap();

    assert_relative_eq!(value, 3.0 / 1.1, epsilon = 1e-9);
}

#[test]
fn registry_rejects_negative_period_count() {
    let params = Params::new()
        .with("face_value", 1000.0)
        .with("coupon_rate", 0.05)
        .with("periods", -2.0);
    let err = evaluate(FormulaId::CouponPayment, &params).unwrap_err();

    assert!(err.is_domain());
}

#[test]
fn registry_rejects_non_finite_input() {
    let params = Params::new().with("capex", f64::NAN).with("depreciation", 1.0);
    let err = evaluate(FormulaId::NetInvestment, &params).unwrap_err();

    assert!(err.is_domain());
}

#[test]
fn every_category_has_formulas() {
    for category in Category::all() {
        assert!(category.formulas().next().is_some(), "{category} is empty");
    }
}
