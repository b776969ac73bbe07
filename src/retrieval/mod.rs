//! Post-retrieval filtering of ranked search hits.


use tracing::debug;

use crate::index::SearchHit;

/// Constraints applied after similarity search.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive exact city match.
    pub city: Option<String>,
    /// Inclusive ceiling on a place's average cost. Records without a cost
    /// carry the 0 default and always pass.
    pub max_avg_cost: Option<f64>,
}

/// Apply city and cost constraints to ranked hits, preserving rank order.
///
/// When the constraints exclude every hit, the original unfiltered list is
/// returned instead — one deliberate fallback step, so the caller always
/// has something plausible to show. There is no progressive relaxation.
#[inline]
pub fn apply_filters<'a>(
    hits: Vec<SearchHit<'a>>,
    criteria: &FilterCriteria,
) -> Vec<SearchHit<'a>> {
    let filtered: Vec<SearchHit<'a>> = hits
        .iter()
        .filter(|hit| matches_criteria(hit, criteria))
        .copied()
        .collect();

    if filtered.is_empty() {
        debug!(
            "Filter excluded all {} hits, falling back to unfiltered results",
            hits.len()
        );
        return hits;
    }

    filtered
}

fn matches_criteria(hit: &SearchHit<'_>, criteria: &FilterCriteria) -> bool {
    if let Some(city) = &criteria.city {
        if !hit.place.city.eq_ignore_ascii_case(city) {
            return false;
        }
    }

    if let Some(ceiling) = criteria.max_avg_cost {
        if hit.place.avg_cost_egp > ceiling {
            return false;
        }
    }

    true
}

/// Query text used when the user gave no themes.
#[inline]
pub fn default_query(destination: &str) -> String {
    format!("top attractions and local experiences in {destination}")
}
