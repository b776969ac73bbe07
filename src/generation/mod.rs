//! Boundary to the external text-generation service.
//!
//! The orchestrator hands over the destination, per-day caps, and candidate
//! places; the service returns free-form text that SHOULD contain a JSON
//! itinerary. Conformance is never assumed — the validator repairs whatever
//! comes back. Calls are blocking with a bounded timeout.


use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::catalog::PlaceRecord;
use crate::config::GenerationConfig;
use crate::{PlannerError, Result};

/// Schema hint sent with every request so the model returns parseable rows.
pub const OUTPUT_SCHEMA_HINT: &str = "Return a JSON object with two fields: \
\"itinerary\", a list of rows with \"day\" (integer), \"activity\" (string) \
and \"approx_cost_egp\" (number), and \"notes\", a string with brief notes \
about timing, transport, and local tips.";

/// Structured request forwarded to the generation service.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
    pub destination: String,
    pub days: u32,
    pub daily_caps: Vec<f64>,
    pub candidates: Vec<PlaceRecord>,
    pub output_schema_hint: String,
}

impl PlanRequest {
    #[inline]
    pub fn new(
        destination: String,
        days: u32,
        daily_caps: Vec<f64>,
        candidates: Vec<PlaceRecord>,
    ) -> Self {
        Self {
            destination,
            days,
            daily_caps,
            candidates,
            output_schema_hint: OUTPUT_SCHEMA_HINT.to_string(),
        }
    }
}

/// Anything that can turn a [`PlanRequest`] into raw itinerary text.
///
/// The production implementation is [`GenerationClient`]; tests substitute
/// scripted generators.
pub trait ItineraryGenerator: Send + Sync {
    fn generate_plan(&self, request: &PlanRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    base_url: Url,
    model: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl GenerationClient {
    #[inline]
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let base_url = config
            .service_url()
            .map_err(|e| PlannerError::Generation(format!("Invalid generation URL: {}", e)))?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            model: config.model.clone(),
            agent,
        })
    }

    /// Ping the generation service to check if it's responsive.
    #[inline]
    pub fn ping(&self) -> Result<()> {
        let url = self
            .base_url
            .join("/api/tags")
            .map_err(|e| PlannerError::Generation(format!("Failed to build ping URL: {}", e)))?;

        self.agent
            .get(url.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| {
                PlannerError::Generation(format!("Generation service unreachable: {}", e))
            })?;

        Ok(())
    }
}

impl ItineraryGenerator for GenerationClient {
    #[inline]
    fn generate_plan(&self, request: &PlanRequest) -> Result<String> {
        let prompt = build_prompt(request)?;
        debug!(
            "Requesting plan for {} ({} candidates, {} days)",
            request.destination,
            request.candidates.len(),
            request.days
        );

        let body = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        };

        let url = self.base_url.join("/api/generate").map_err(|e| {
            PlannerError::Generation(format!("Failed to build generation URL: {}", e))
        })?;

        let request_json = serde_json::to_string(&body)
            .map_err(|e| PlannerError::Generation(format!("Failed to serialize request: {}", e)))?;

        let response_text = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .send(&request_json)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| PlannerError::Generation(format!("Generation request failed: {}", e)))?;

        let response: GenerateResponse = serde_json::from_str(&response_text).map_err(|e| {
            PlannerError::Generation(format!("Failed to parse generation response: {}", e))
        })?;

        Ok(response.response)
    }
}

/// Assemble the planner prompt from the structured request.
#[inline]
pub fn build_prompt(request: &PlanRequest) -> Result<String> {
    let caps = request
        .daily_caps
        .iter()
        .map(|cap| format!("{cap:.2}"))
        .join(", ");

    let places_json = serde_json::to_string(&request.candidates)
        .map_err(|e| PlannerError::Generation(format!("Failed to serialize candidates: {}", e)))?;

    Ok(format!(
        "You are a concise travel planner for {destination}. \
Create a realistic day-by-day itinerary for {days} days using the provided places. \
Respect the daily budget caps per day (EGP): {caps}. \
Return only structured data per instructions.\n\n\
{hint}\n\n\
Places:\n{places_json}\n\n\
Rules:\n\
- Prioritize variety (history, culture, food, markets) and best_time.\n\
- Keep each day's total activity costs within or near the daily cap.\n\
- Use approximate costs from input; if missing, estimate modestly.\n\
- Distribute time across morning/afternoon/evening; avoid too many far trips in one day.",
        destination = request.destination,
        days = request.days,
        caps = caps,
        hint = request.output_schema_hint,
        places_json = places_json,
    ))
}
