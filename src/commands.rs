use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use tracing::info;

use crate::PlannerError;
use crate::config::Config;
use crate::embeddings::EncoderClient;
use crate::generation::GenerationClient;
use crate::itinerary::ItineraryDocument;
use crate::pipeline::{self, TripRequest};

/// The dashboard never showed more than nine place cards; the CLI keeps
/// that display cap while retrieval still returns the configured top_k.
const MAX_DISPLAY_CANDIDATES: usize = 9;

fn load_config(catalog_override: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(path) = catalog_override {
        config.catalog.path = path;
    }
    Ok(config)
}

/// Plan a trip: retrieve candidates, allocate the budget, generate and
/// repair an itinerary, and optionally export the result.
#[inline]
pub fn run_plan(
    destination: String,
    budget_egp: f64,
    days: u32,
    themes: Vec<String>,
    catalog_override: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(catalog_override)?;
    let trip_pipeline = pipeline::shared(&config)?;
    let generator =
        GenerationClient::new(&config.generation).context("Failed to initialize generation client")?;

    let request = TripRequest {
        destination: destination.clone(),
        budget_egp,
        days,
        themes,
    };

    let plan = match trip_pipeline.plan_trip(&generator, &request) {
        Ok(plan) => plan,
        Err(PlannerError::NoCandidates { destination }) => {
            println!(
                "{}",
                style(format!(
                    "No places found in the local catalog for {}. Add more data to {}.",
                    destination,
                    config.catalog.path.display()
                ))
                .yellow()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", style("Recommended places").bold().cyan());
    for place in plan.candidates.iter().take(MAX_DISPLAY_CANDIDATES) {
        println!(
            "  {} ({})  EGP {:.0}  best time: {}",
            style(&place.name).bold(),
            place.kind,
            place.avg_cost_egp,
            place.best_time
        );
        println!("    {}", style(&place.description).dim());
        if !place.tags.is_empty() {
            println!("    tags: {}", place.tags.join(", "));
        }
    }

    println!();
    println!("{}", style("Budget").bold().cyan());
    println!(
        "  Activity cap per day: EGP {:.2}",
        plan.budget.activity_cap_per_day
    );
    println!(
        "  Food & transport cushion per day: EGP {:.2}",
        plan.budget.cushion_cap_per_day
    );

    println!();
    println!("{}", style("Itinerary").bold().cyan());
    if plan.used_fallback {
        println!(
            "  {}",
            style("Generation did not return a usable plan; showing the fallback plan.").yellow()
        );
    }
    for row in &plan.itinerary {
        println!(
            "  Day {}: {}  (EGP {:.2})",
            row.day, row.activity, row.approx_cost_egp
        );
    }

    println!();
    for day in &plan.day_costs {
        let marker = if day.within_cap {
            style("within cap").green()
        } else {
            style("over cap").red()
        };
        println!(
            "  Day {}: EGP {:.2} / {:.2}  [{}]",
            day.day, day.total_cost_egp, plan.budget.activity_cap_per_day, marker
        );
    }

    if !plan.notes.is_empty() {
        println!();
        println!("{}", style("Notes").bold().cyan());
        println!("  {}", plan.notes);
    }

    if let Some(path) = output {
        let document = ItineraryDocument::new(
            destination,
            crate::budget::clamp_days(days),
            budget_egp,
            plan.budget.daily_caps(days),
            plan.itinerary.clone(),
            plan.notes.clone(),
        );
        let json = document.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write itinerary to {}", path.display()))?;
        info!("Exported itinerary to {}", path.display());
        println!();
        println!("Itinerary written to {}", style(path.display()).cyan());
    }

    Ok(())
}

/// Search candidate places without generating an itinerary.
#[inline]
pub fn run_search(
    destination: String,
    query: Option<String>,
    max_cost: Option<f64>,
    catalog_override: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(catalog_override)?;
    let trip_pipeline = pipeline::shared(&config)?;

    let candidates = trip_pipeline.search_places(
        &destination,
        max_cost.unwrap_or(f64::INFINITY),
        query.as_deref().unwrap_or_default(),
    )?;

    if candidates.is_empty() {
        println!(
            "{}",
            style(format!(
                "No places found in the local catalog for {}. Add more data to {}.",
                destination,
                config.catalog.path.display()
            ))
            .yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        style(format!("{} places for {}", candidates.len(), destination))
            .bold()
            .cyan()
    );
    for place in &candidates {
        println!(
            "  {} ({})  EGP {:.0}",
            style(&place.name).bold(),
            place.kind,
            place.avg_cost_egp
        );
        println!("    {}", style(&place.description).dim());
    }

    Ok(())
}

/// Show reachability of the external services and catalog statistics.
#[inline]
pub fn show_status() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("{}", style("Tripdex Status").bold().cyan());
    println!();

    match EncoderClient::new(&config.encoder).and_then(|client| client.health_check()) {
        Ok(()) => println!(
            "  Encoder: {} ({} @ {}:{})",
            style("ok").green(),
            config.encoder.model,
            config.encoder.host,
            config.encoder.port
        ),
        Err(e) => println!("  Encoder: {} ({})", style("unavailable").red(), e),
    }

    match GenerationClient::new(&config.generation).and_then(|client| client.ping()) {
        Ok(()) => println!(
            "  Generation: {} ({} @ {}:{})",
            style("ok").green(),
            config.generation.model,
            config.generation.host,
            config.generation.port
        ),
        Err(e) => println!("  Generation: {} ({})", style("unavailable").red(), e),
    }

    match crate::catalog::load_catalog(&config.catalog.path) {
        Ok(records) => {
            let mut cities: Vec<String> = records
                .iter()
                .map(|record| record.city.clone())
                .collect();
            cities.sort();
            cities.dedup();
            println!(
                "  Catalog: {} ({} places, {} cities, {})",
                style("ok").green(),
                records.len(),
                cities.len(),
                config.catalog.path.display()
            );
        }
        Err(e) => println!("  Catalog: {} ({})", style("unavailable").red(), e),
    }

    Ok(())
}
