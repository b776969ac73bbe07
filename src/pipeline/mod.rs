//! Trip planning pipeline: catalog + encoder + index wired together.
//!
//! The pipeline is built once per process (catalog load and embedding are
//! the expensive steps) and is immutable afterwards, so a shared handle can
//! be read concurrently without locking.


use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::budget::{self, BudgetPlan, clamp_days};
use crate::catalog::{self, PlaceRecord};
use crate::config::Config;
use crate::embeddings::{EncoderClient, TextEncoder};
use crate::generation::{ItineraryGenerator, PlanRequest};
use crate::index::PlaceIndex;
use crate::itinerary::{self, DayCost, ItineraryRow};
use crate::retrieval::{FilterCriteria, apply_filters, default_query};
use crate::{PlannerError, Result};

/// One user request for a trip plan.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub destination: String,
    pub budget_egp: f64,
    pub days: u32,
    pub themes: Vec<String>,
}

/// Everything the display layer needs for one planned trip.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub candidates: Vec<PlaceRecord>,
    pub budget: BudgetPlan,
    pub itinerary: Vec<ItineraryRow>,
    pub notes: String,
    pub used_fallback: bool,
    pub day_costs: Vec<DayCost>,
}

pub struct TripPipeline {
    encoder: Box<dyn TextEncoder>,
    index: PlaceIndex,
    top_k: usize,
}

impl TripPipeline {
    /// Build the full pipeline from configuration: encoder client, catalog
    /// load, embedding, index construction.
    #[inline]
    pub fn build(config: &Config) -> Result<Self> {
        let encoder = EncoderClient::new(&config.encoder)?;
        let records = catalog::load_catalog(&config.catalog.path)?;
        Self::from_parts(Box::new(encoder), records, config.search.top_k)
    }

    /// Assemble a pipeline from an encoder and already-loaded records.
    #[inline]
    pub fn from_parts(
        encoder: Box<dyn TextEncoder>,
        records: Vec<PlaceRecord>,
        top_k: usize,
    ) -> Result<Self> {
        let texts: Vec<String> = records.iter().map(PlaceRecord::index_text).collect();
        let vectors = encoder.encode(&texts)?;
        let index = PlaceIndex::build(records, vectors)?;

        info!("Pipeline ready: {} places indexed", index.len());

        Ok(Self {
            encoder,
            index,
            top_k,
        })
    }

    #[inline]
    pub fn catalog_size(&self) -> usize {
        self.index.len()
    }

    /// Ranked candidate places for a destination, constrained by a rough
    /// per-day cost ceiling with the single-step filter fallback.
    #[inline]
    pub fn search_places(
        &self,
        destination: &str,
        max_avg_cost: f64,
        query: &str,
    ) -> Result<Vec<PlaceRecord>> {
        let query_text = if query.trim().is_empty() {
            default_query(destination)
        } else {
            query.to_string()
        };

        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.encoder.encode_one(&query_text)?;
        let hits = self.index.search(&query_vector, self.top_k)?;

        let criteria = FilterCriteria {
            city: Some(destination.to_string()),
            max_avg_cost: Some(max_avg_cost),
        };

        Ok(apply_filters(hits, &criteria)
            .into_iter()
            .map(|hit| hit.place.clone())
            .collect())
    }

    /// Run the full planning sequence for one request.
    ///
    /// Retrieval and budget math are local; the generation call goes to the
    /// external service and every failure there is repaired into the
    /// deterministic fallback plan. An empty candidate list (the catalog
    /// has nothing for this destination) short-circuits before generation.
    #[inline]
    pub fn plan_trip(
        &self,
        generator: &dyn ItineraryGenerator,
        request: &TripRequest,
    ) -> Result<TripPlan> {
        let days = clamp_days(request.days);
        let per_day_budget = request.budget_egp / f64::from(days);
        let query = request.themes.join(",");

        let candidates = self.search_places(&request.destination, per_day_budget, &query)?;
        if candidates.is_empty() {
            return Err(PlannerError::NoCandidates {
                destination: request.destination.clone(),
            });
        }

        let budget = budget::allocate(request.budget_egp, days);
        let daily_caps = budget.daily_caps(days);

        let plan_request = PlanRequest::new(
            request.destination.clone(),
            days,
            daily_caps,
            candidates.clone(),
        );

        let repaired = match generator.generate_plan(&plan_request) {
            Ok(raw) => itinerary::validate_and_repair(&raw, days, budget.activity_cap_per_day),
            Err(e) => {
                warn!("Generation failed, using fallback plan: {}", e);
                itinerary::fallback_plan(days, budget.activity_cap_per_day)
            }
        };

        let day_costs = itinerary::day_costs(&repaired.rows, days, budget.activity_cap_per_day);

        Ok(TripPlan {
            candidates,
            budget,
            itinerary: repaired.rows,
            notes: repaired.notes,
            used_fallback: repaired.used_fallback,
            day_costs,
        })
    }
}

static SHARED: RwLock<Option<Arc<TripPipeline>>> = RwLock::new(None);

/// Process-wide pipeline handle, built exactly once and reused across
/// requests. The write lock is the one-time initialization barrier; after
/// publication every caller takes the read path on immutable state.
#[inline]
pub fn shared(config: &Config) -> Result<Arc<TripPipeline>> {
    {
        let published = SHARED.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(pipeline) = published.as_ref() {
            return Ok(Arc::clone(pipeline));
        }
    }

    let mut slot = SHARED.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(pipeline) = slot.as_ref() {
        return Ok(Arc::clone(pipeline));
    }

    let pipeline = Arc::new(TripPipeline::build(config)?);
    *slot = Some(Arc::clone(&pipeline));
    Ok(pipeline)
}

/// Drop the shared pipeline so the next [`shared`] call rebuilds it.
/// Only needed when the catalog source changes; nothing invalidates
/// automatically.
#[inline]
pub fn invalidate_shared() {
    *SHARED.write().unwrap_or_else(PoisonError::into_inner) = None;
}
