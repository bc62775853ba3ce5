//! Tests for the monthly payback solver

use super::fixtures::{assert_close, base_builder, reference_builder, reference_deal};
use crate::config::IntentBuilder;
use crate::payback::{PAYBACK_HORIZON_MONTHS, monthly_value, payback_months};

#[test]
fn test_reference_deal_pays_back_in_second_month() {
    let inputs = reference_deal();

    // Ramp month 0 runs at a third of steady-state containment and loses money
    assert!(monthly_value(&inputs, 0) < 0.0);
    assert!(monthly_value(&inputs, 0) + monthly_value(&inputs, 1) >= 0.0);
    assert_eq!(payback_months(&inputs), Some(2));
}

#[test]
fn test_month_zero_value() {
    let inputs = reference_deal();
    let calls = 100_000.0 / 12.0;
    let containment = 0.8 / 3.0;

    let baseline = calls * 4.0 * 0.85;
    let automated = calls * 3.0 * containment;
    let handoff = calls * (1.0 - containment);
    let human = calls * 3.0 * (1.0 - containment) + handoff + calls;
    let ai = automated * 0.17 + human * 0.85;

    assert_close(monthly_value(&inputs, 0), baseline - ai);
}

#[test]
fn test_expensive_automation_never_pays_back() {
    let inputs = base_builder()
        .agent_cost(0.5)
        .polyai_cost(1.0)
        .intent(
            IntentBuilder::new("All")
                .share(1.0)
                .minutes(3.0)
                .containment(0.5, 0.9),
        )
        .build()
        .unwrap();

    for month in 0..PAYBACK_HORIZON_MONTHS {
        assert!(monthly_value(&inputs, month) < 0.0);
    }
    assert_eq!(payback_months(&inputs), None);
}

#[test]
fn test_immediate_payback_without_handoff_cost() {
    let inputs = base_builder()
        .intent(
            IntentBuilder::new("All")
                .share(1.0)
                .minutes(3.0)
                .containment(0.5, 0.8),
        )
        .build()
        .unwrap();

    assert_eq!(payback_months(&inputs), Some(1));
}

#[test]
fn test_later_year_months_use_growth_and_inflation() {
    let inputs = reference_builder().build().unwrap();

    let month_12 = monthly_value(&inputs, 12);
    let month_11 = monthly_value(&inputs, 11);
    assert_close(month_12, month_11 * 1.05 * 1.03);
}
