//! Per-day budget allocation for a trip.
//!
//! The total trip budget is split 60/40 between an activity cap (entry fees,
//! tours) and a cushion reserved for food and transport. Both caps are
//! per-day figures.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::itinerary::ItineraryRow;

/// Share of the daily budget reserved for activities.
pub const ACTIVITY_SHARE: f64 = 0.6;

/// Share of the daily budget reserved for food and transport incidentals.
pub const CUSHION_SHARE: f64 = 0.4;

/// Per-day budget caps derived from the total trip budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub activity_cap_per_day: f64,
    pub cushion_cap_per_day: f64,
}

impl BudgetPlan {
    /// Daily caps as one entry per trip day, used at the generation boundary.
    #[inline]
    pub fn daily_caps(&self, days: u32) -> Vec<f64> {
        vec![self.activity_cap_per_day; clamp_days(days) as usize]
    }
}

/// Clamp a trip length to at least one day.
///
/// Intentionally a clamp rather than an error: a zero-day request divides
/// the budget as if it were a single day.
#[inline]
pub fn clamp_days(days: u32) -> u32 {
    days.max(1)
}

/// Round to 2 decimal places, half away from zero (`f64::round`).
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split a total trip budget into per-day activity and cushion caps.
///
/// Deterministic, pure. Before rounding, activity:cushion is exactly 3:2
/// and their sum equals `total_budget / days`.
#[inline]
pub fn allocate(total_budget_egp: f64, days: u32) -> BudgetPlan {
    let days = f64::from(clamp_days(days));
    BudgetPlan {
        activity_cap_per_day: round2(total_budget_egp * ACTIVITY_SHARE / days),
        cushion_cap_per_day: round2(total_budget_egp * CUSHION_SHARE / days),
    }
}

/// Whether one day's summed activity costs stay within the cap (inclusive).
#[inline]
pub fn within_budget(rows: &[ItineraryRow], daily_cap: f64) -> bool {
    let total: f64 = rows.iter().map(|row| row.approx_cost_egp).sum();
    total <= daily_cap
}
