//! Itinerary validation, repair, and export.
//!
//! Generation output is loosely structured text. This module parses it
//! against a strict row schema and, on ANY structural failure, discards the
//! whole output in favor of a deterministic fallback plan. There is no
//! row-by-row repair; the result is always predictable.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::budget::{clamp_days, round2, within_budget};
use crate::{PlannerError, Result};

/// Activity used for every day of the fallback plan.
pub const FALLBACK_ACTIVITY: &str = "City walk + local market";

/// Fraction of the daily activity cap assigned to a fallback day.
pub const FALLBACK_COST_RATIO: f64 = 0.8;

const FALLBACK_NOTES: &str = "Fallback plan. Consider adding more places and re-generating.";

/// One scheduled activity in a day-by-day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRow {
    pub day: u32,
    pub activity: String,
    pub approx_cost_egp: f64,
}

/// Outcome of validating (and possibly repairing) generation output.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedPlan {
    pub rows: Vec<ItineraryRow>,
    pub notes: String,
    pub used_fallback: bool,
}

/// Per-day cost summary against the activity cap. Informational only;
/// exceeding the cap is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayCost {
    pub day: u32,
    pub total_cost_egp: f64,
    pub within_cap: bool,
}

/// Parse raw generation output into itinerary rows, or synthesize the
/// deterministic fallback plan.
///
/// Total function: any structural problem (no JSON, missing `itinerary`
/// array, missing field, non-coercible or negative cost) discards the
/// entire output and yields one fallback row per day at
/// `activity_cap * FALLBACK_COST_RATIO`.
#[inline]
pub fn validate_and_repair(raw: &str, days: u32, activity_cap: f64) -> RepairedPlan {
    match parse_rows(raw) {
        Ok((rows, notes)) => RepairedPlan {
            rows,
            notes,
            used_fallback: false,
        },
        Err(e) => {
            warn!("Discarding malformed generation output: {}", e);
            fallback_plan(days, activity_cap)
        }
    }
}

/// The fallback rows bundled with their notice, used both for malformed
/// output and for outright generation failures.
#[inline]
pub fn fallback_plan(days: u32, activity_cap: f64) -> RepairedPlan {
    RepairedPlan {
        rows: fallback_itinerary(days, activity_cap),
        notes: FALLBACK_NOTES.to_string(),
        used_fallback: true,
    }
}

/// The deterministic always-valid plan: one modest day of walking and
/// markets per trip day.
#[inline]
pub fn fallback_itinerary(days: u32, activity_cap: f64) -> Vec<ItineraryRow> {
    (1..=clamp_days(days))
        .map(|day| ItineraryRow {
            day,
            activity: FALLBACK_ACTIVITY.to_string(),
            approx_cost_egp: activity_cap * FALLBACK_COST_RATIO,
        })
        .collect()
}

/// Summarize each day's total cost against the activity cap.
#[inline]
pub fn day_costs(rows: &[ItineraryRow], days: u32, activity_cap: f64) -> Vec<DayCost> {
    (1..=clamp_days(days))
        .map(|day| {
            let day_rows: Vec<ItineraryRow> = rows
                .iter()
                .filter(|row| row.day == day)
                .cloned()
                .collect();
            let total: f64 = day_rows.iter().map(|row| row.approx_cost_egp).sum();
            DayCost {
                day,
                total_cost_egp: round2(total),
                within_cap: within_budget(&day_rows, activity_cap),
            }
        })
        .collect()
}

fn parse_rows(raw: &str) -> Result<(Vec<ItineraryRow>, String)> {
    let value = extract_json(raw)?;

    let entries = value
        .get("itinerary")
        .and_then(Value::as_array)
        .ok_or_else(|| PlannerError::Generation("Output has no itinerary array".to_string()))?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        rows.push(coerce_row(entry)?);
    }

    let notes = value
        .get("notes")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok((rows, notes))
}

/// Pull the first JSON object out of the raw text, tolerating markdown
/// code fences around it.
fn extract_json(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let start = trimmed
        .find('{')
        .ok_or_else(|| PlannerError::Generation("Output contains no JSON object".to_string()))?;
    let end = trimmed
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| PlannerError::Generation("Output contains no JSON object".to_string()))?;

    serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| PlannerError::Generation(format!("Output is not valid JSON: {}", e)))
}

fn coerce_row(entry: &Value) -> Result<ItineraryRow> {
    let object = entry
        .as_object()
        .ok_or_else(|| PlannerError::Generation("Itinerary entry is not an object".to_string()))?;

    let day = coerce_day(object.get("day"))?;

    let activity = object
        .get("activity")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|activity| !activity.is_empty())
        .ok_or_else(|| PlannerError::Generation("Itinerary entry has no activity".to_string()))?
        .to_string();

    let approx_cost_egp = coerce_cost(object.get("approx_cost_egp"))?;

    Ok(ItineraryRow {
        day,
        activity,
        approx_cost_egp,
    })
}

/// Day numbers must be integers >= 1; string-encoded integers are accepted.
fn coerce_day(value: Option<&Value>) -> Result<u32> {
    let day = match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|day| u32::try_from(day).ok()),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    day.filter(|&day| day >= 1)
        .ok_or_else(|| PlannerError::Generation("Itinerary entry has no usable day".to_string()))
}

/// Costs may arrive as numbers or numeric-looking strings; both are rounded
/// to 2 decimals. Anything else (or a negative) is a structural failure.
fn coerce_cost(value: Option<&Value>) -> Result<f64> {
    let cost = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    cost.filter(|cost| cost.is_finite() && *cost >= 0.0)
        .map(round2)
        .ok_or_else(|| PlannerError::Generation("Itinerary entry has no usable cost".to_string()))
}

/// Exported itinerary document. Field order is part of the contract for
/// consumers parsing it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDocument {
    pub destination: String,
    pub days: u32,
    pub budget_egp: f64,
    pub daily_caps: Vec<f64>,
    pub itinerary: Vec<ItineraryRow>,
    pub notes: String,
    pub generated_at: String,
}

impl ItineraryDocument {
    #[inline]
    pub fn new(
        destination: String,
        days: u32,
        budget_egp: f64,
        daily_caps: Vec<f64>,
        itinerary: Vec<ItineraryRow>,
        notes: String,
    ) -> Self {
        Self {
            destination,
            days,
            budget_egp,
            daily_caps,
            itinerary,
            notes,
            generated_at: format_timestamp(Utc::now()),
        }
    }

    #[inline]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PlannerError::Other(anyhow::anyhow!("Failed to serialize itinerary document: {}", e))
        })
    }

    #[inline]
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            PlannerError::Other(anyhow::anyhow!("Failed to parse itinerary document: {}", e))
        })
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
