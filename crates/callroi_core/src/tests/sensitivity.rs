//! Tests for tornado sensitivity and scenario analysis

use super::fixtures::{assert_close, base_builder, mixed_deal, reference_deal};
use crate::analysis::{
    Driver, GlobalDriver, TORNADO_SIZE, all_impacts, driver_impact, drivers_for, optimistic,
    pessimistic, scenarios, tornado,
};
use crate::config::IntentBuilder;
use crate::projection::project_npv;

#[test]
fn test_driver_table_lists_intents_then_globals() {
    let labels: Vec<String> = drivers_for(&mixed_deal()).iter().map(Driver::label).collect();
    assert_eq!(
        labels,
        vec![
            "Containment_General",
            "Containment_Orders",
            "Containment_Hours",
            "agent_cost_per_min",
            "polyai_cost_per_min",
            "volume_growth",
            "discount_rate",
        ]
    );
}

#[test]
fn test_tornado_is_bounded_sorted_and_non_negative() {
    for inputs in [reference_deal(), mixed_deal()] {
        let bars = tornado(&inputs);

        assert!(!bars.is_empty());
        assert!(bars.len() <= TORNADO_SIZE);
        assert!(bars.iter().all(|b| b.impact() >= 0.0));
        assert!(bars.windows(2).all(|w| w[0].impact() >= w[1].impact()));
    }
}

#[test]
fn test_tornado_keeps_top_five_of_seven() {
    let inputs = mixed_deal();
    let all = all_impacts(&inputs);
    let bars = tornado(&inputs);

    assert_eq!(all.len(), 7);
    assert_eq!(bars.len(), TORNADO_SIZE);

    let smallest_kept = bars.last().map(|b| b.impact()).unwrap();
    let dropped: Vec<_> = all
        .iter()
        .filter(|entry| !bars.iter().any(|b| b.driver() == entry.driver()))
        .collect();
    assert_eq!(dropped.len(), 2);
    assert!(dropped.iter().all(|d| d.impact() <= smallest_kept));
}

#[test]
fn test_agent_cost_impact_is_half_the_npv_spread() {
    let inputs = reference_deal();
    let driver = Driver::Global(GlobalDriver::AgentCost);

    let high = project_npv(&driver.high(&inputs));
    let low = project_npv(&driver.low(&inputs));

    assert_close(driver.high(&inputs).agent_cost_per_min(), 0.96);
    assert_close(driver.low(&inputs).agent_cost_per_min(), 0.64);
    assert_close(driver_impact(&inputs, &driver), (high - low).abs() / 2.0);
}

#[test]
fn test_containment_swing_is_clamped() {
    let inputs = base_builder()
        .intent(
            IntentBuilder::new("Near")
                .share(1.0)
                .minutes(2.0)
                .containment(0.5, 0.9),
        )
        .build()
        .unwrap();
    let driver = Driver::Containment {
        index: 0,
        name: "Near".to_string(),
    };

    assert_eq!(driver.high(&inputs).intents()[0].containment_m3, 1.0);
    assert_close(driver.low(&inputs).intents()[0].containment_m3, 0.72);
}

#[test]
fn test_equal_impacts_keep_table_order() {
    let twin = |name: &str| {
        IntentBuilder::new(name)
            .share(0.5)
            .minutes(3.0)
            .containment(0.5, 0.8)
            .handoff(1.0)
    };
    let inputs = base_builder()
        .intent(twin("A"))
        .intent(twin("B"))
        .build()
        .unwrap();

    let bars = tornado(&inputs);
    let labels: Vec<&str> = bars.iter().map(|b| b.driver()).collect();
    assert_eq!(
        labels,
        vec![
            "agent_cost_per_min",
            "Containment_A",
            "Containment_B",
            "polyai_cost_per_min",
            "discount_rate",
        ]
    );
}

#[test]
fn test_analysis_leaves_base_inputs_untouched() {
    let inputs = mixed_deal();
    let before = inputs.clone();

    let _ = tornado(&inputs);
    let _ = scenarios(&inputs);

    assert_eq!(inputs, before);
}

#[test]
fn test_scenarios_are_ordered() {
    for inputs in [reference_deal(), mixed_deal()] {
        let npv = scenarios(&inputs);
        assert!(npv.p10 <= npv.p50, "{npv:?}");
        assert!(npv.p50 <= npv.p90, "{npv:?}");
        assert_close(npv.p50, project_npv(&inputs));
    }
}

#[test]
fn test_scenario_perturbations() {
    let inputs = reference_deal();

    let low = pessimistic(&inputs);
    assert_close(low.intents()[0].containment_m3, 0.64);
    assert_close(low.agent_cost_per_min(), 0.88);
    assert_close(low.polyai_cost_per_min(), 0.132);
    assert_close(low.telco_cost_per_min(), 0.05);

    let high = optimistic(&inputs);
    assert_close(high.intents()[0].containment_m3, 0.96);
    assert_close(high.agent_cost_per_min(), 0.72);
    assert_close(high.polyai_cost_per_min(), 0.108);
}
