use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tripdex::Result;
use tripdex::commands::{run_plan, run_search, show_status};
use tripdex::config::{run_interactive_config, show_config};

#[derive(Parser)]
#[command(name = "tripdex")]
#[command(about = "Semantic travel recommendations with budget-bounded itineraries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the encoder, generation service, and catalog
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Recommend places and build a day-by-day itinerary
    Plan {
        /// Destination city, e.g. "Cairo" or "Alexandria"
        destination: String,
        /// Total trip budget in EGP
        #[arg(long)]
        budget: f64,
        /// Trip length in days
        #[arg(long)]
        days: u32,
        /// Preferred theme, repeatable, e.g. --theme history --theme food
        #[arg(long = "theme")]
        themes: Vec<String>,
        /// Override the catalog path from the configuration
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Write the itinerary document to this file as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Search candidate places without generating an itinerary
    Search {
        /// Destination city
        destination: String,
        /// Free-text query or comma-separated themes
        #[arg(long)]
        query: Option<String>,
        /// Skip places whose average cost exceeds this (EGP)
        #[arg(long)]
        max_cost: Option<f64>,
        /// Override the catalog path from the configuration
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show status of the external services and the catalog
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Plan {
            destination,
            budget,
            days,
            themes,
            catalog,
            output,
        } => {
            run_plan(destination, budget, days, themes, catalog, output)?;
        }
        Commands::Search {
            destination,
            query,
            max_cost,
            catalog,
        } => {
            run_search(destination, query, max_cost, catalog)?;
        }
        Commands::Status => {
            show_status()?;
        }
    }

    Ok(())
}
