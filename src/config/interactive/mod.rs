use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};

use super::{Config, EncoderConfig, GenerationConfig};
use crate::embeddings::EncoderClient;

#[inline]
pub fn run_interactive_config() -> Result<()> {
    eprintln!("{}", style("🧭 Tripdex Configuration Setup").bold().cyan());
    eprintln!();

    let mut config = load_existing_config()?;

    eprintln!("{}", style("Encoder Configuration").bold().yellow());
    eprintln!("Configure the embedding service used for place search.");
    eprintln!();
    configure_encoder(&mut config.encoder)?;

    eprintln!();
    eprintln!("{}", style("Generation Configuration").bold().yellow());
    eprintln!("Configure the text-generation service used for itineraries.");
    eprintln!();
    configure_generation(&mut config.generation)?;

    eprintln!();
    let catalog_path: String = Input::new()
        .with_prompt("Catalog path")
        .default(config.catalog.path.display().to_string())
        .interact_text()?;
    config.catalog.path = catalog_path.into();

    eprintln!();
    eprintln!("{}", style("Testing configuration...").yellow());

    if test_encoder_connection(&config.encoder) {
        eprintln!("{}", style("✓ Encoder connection successful!").green());
    } else {
        eprintln!(
            "{}",
            style("⚠ Warning: Could not connect to the encoder service").yellow()
        );
        eprintln!("You can continue, but searches will fail until it is running.");
    }

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_file_path().display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Encoder Settings:").bold().yellow());
    eprintln!("  Host: {}", style(&config.encoder.host).cyan());
    eprintln!("  Port: {}", style(config.encoder.port).cyan());
    eprintln!("  Model: {}", style(&config.encoder.model).cyan());
    eprintln!("  Batch Size: {}", style(config.encoder.batch_size).cyan());
    match config.encoder.service_url() {
        Ok(url) => eprintln!("  URL: {}", style(url).cyan()),
        Err(e) => eprintln!("  URL: {} ({})", style("Invalid").red(), e),
    }

    eprintln!();
    eprintln!("{}", style("Generation Settings:").bold().yellow());
    eprintln!("  Host: {}", style(&config.generation.host).cyan());
    eprintln!("  Port: {}", style(config.generation.port).cyan());
    eprintln!("  Model: {}", style(&config.generation.model).cyan());
    eprintln!(
        "  Timeout: {}s",
        style(config.generation.timeout_seconds).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Catalog Settings:").bold().yellow());
    eprintln!("  Path: {}", style(config.catalog.path.display()).cyan());
    eprintln!("  Top K: {}", style(config.search.top_k).cyan());

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

fn load_existing_config() -> Result<Config> {
    Config::load().map_or_else(
        |_| {
            eprintln!(
                "{}",
                style("No existing configuration found. Using defaults.").yellow()
            );
            let base_dir = Config::config_dir()?;
            Ok(Config {
                base_dir,
                ..Config::default()
            })
        },
        |config| {
            eprintln!("{}", style("Found existing configuration.").green());
            Ok(config)
        },
    )
}

fn select_protocol(current: &str) -> Result<String> {
    let protocols = &["http", "https"];
    let default_index = protocols
        .iter()
        .position(|&p| p == current)
        .unwrap_or(0);

    let protocol_index = Select::new()
        .with_prompt("Protocol")
        .default(default_index)
        .items(protocols)
        .interact()?;

    Ok(protocols[protocol_index].to_string())
}

fn configure_encoder(encoder: &mut EncoderConfig) -> Result<()> {
    encoder.protocol = select_protocol(&encoder.protocol)?;

    encoder.host = Input::new()
        .with_prompt("Encoder host")
        .default(encoder.host.clone())
        .interact_text()?;

    encoder.port = Input::new()
        .with_prompt("Encoder port")
        .default(encoder.port)
        .validate_with(|input: &u16| -> Result<(), &str> {
            if *input == 0 {
                Err("Port must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    encoder.model = Input::new()
        .with_prompt("Embedding model")
        .default(encoder.model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    encoder.batch_size = Input::new()
        .with_prompt("Embedding batch size")
        .default(encoder.batch_size)
        .validate_with(|input: &u32| -> Result<(), &str> {
            if *input == 0 || *input > 1000 {
                Err("Batch size must be between 1 and 1000")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(())
}

fn configure_generation(generation: &mut GenerationConfig) -> Result<()> {
    generation.protocol = select_protocol(&generation.protocol)?;

    generation.host = Input::new()
        .with_prompt("Generation host")
        .default(generation.host.clone())
        .interact_text()?;

    generation.port = Input::new()
        .with_prompt("Generation port")
        .default(generation.port)
        .validate_with(|input: &u16| -> Result<(), &str> {
            if *input == 0 {
                Err("Port must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    generation.model = Input::new()
        .with_prompt("Generation model")
        .default(generation.model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(())
}

fn test_encoder_connection(encoder: &EncoderConfig) -> bool {
    EncoderClient::new(encoder)
        .and_then(|client| client.ping())
        .is_ok()
}
