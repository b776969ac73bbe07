use super::*;

fn row(day: u32, cost: f64) -> ItineraryRow {
    ItineraryRow {
        day,
        activity: "test".to_string(),
        approx_cost_egp: cost,
    }
}

#[test]
fn allocate_pins_exact_caps() {
    let plan = allocate(3000.0, 3);
    assert_eq!(plan.activity_cap_per_day, 600.00);
    assert_eq!(plan.cushion_cap_per_day, 400.00);

    let plan = allocate(6000.0, 3);
    assert_eq!(plan.activity_cap_per_day, 1200.00);
    assert_eq!(plan.cushion_cap_per_day, 800.00);
}

#[test]
fn allocate_rounds_half_away_from_zero() {
    // 100 * 0.4 / 3 = 13.333..., 100 * 0.6 / 3 = 20.0
    let plan = allocate(100.0, 3);
    assert_eq!(plan.activity_cap_per_day, 20.00);
    assert_eq!(plan.cushion_cap_per_day, 13.33);

    // 1001 * 0.6 / 4 = 150.15, 1001 * 0.4 / 4 = 100.1
    let plan = allocate(1001.0, 4);
    assert_eq!(plan.activity_cap_per_day, 150.15);
    assert_eq!(plan.cushion_cap_per_day, 100.10);
}

#[test]
fn allocate_preserves_daily_total_up_to_rounding() {
    for (total, days) in [(3000.0, 3), (5500.0, 7), (123.45, 2), (0.0, 5)] {
        let plan = allocate(total, days);
        let daily = total / f64::from(days);
        let sum = plan.activity_cap_per_day + plan.cushion_cap_per_day;
        assert!(
            (sum - daily).abs() < 0.01,
            "caps {sum} drifted from daily budget {daily}"
        );
    }
}

#[test]
fn allocate_ratio_is_three_to_two_before_rounding() {
    for (total, days) in [(9999.0, 3_u32), (777.7, 5), (42.0, 1)] {
        let activity = total * ACTIVITY_SHARE / f64::from(days);
        let cushion = total * CUSHION_SHARE / f64::from(days);
        assert!((activity / cushion - 1.5).abs() < 1e-9);
    }
}

#[test]
fn zero_days_clamps_to_one() {
    assert_eq!(clamp_days(0), 1);
    assert_eq!(clamp_days(1), 1);
    assert_eq!(clamp_days(14), 14);

    let plan = allocate(1000.0, 0);
    assert_eq!(plan.activity_cap_per_day, 600.00);
    assert_eq!(plan.cushion_cap_per_day, 400.00);
}

#[test]
fn daily_caps_repeat_activity_cap() {
    let plan = allocate(3000.0, 3);
    assert_eq!(plan.daily_caps(3), vec![600.00, 600.00, 600.00]);
    assert_eq!(plan.daily_caps(0), vec![600.00]);
}

#[test]
fn within_budget_is_inclusive() {
    let rows = vec![row(1, 300.0), row(1, 300.0)];
    assert!(within_budget(&rows, 600.0));
    assert!(within_budget(&rows, 600.01));
    assert!(!within_budget(&rows, 599.99));
    assert!(within_budget(&[], 0.0));
}
