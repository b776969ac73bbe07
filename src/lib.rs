use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    CatalogLoad(String),

    #[error("Embedding error: {0}")]
    Encoding(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("No places found in the catalog for destination '{destination}'")]
    NoCandidates { destination: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod budget;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod embeddings;
pub mod generation;
pub mod index;
pub mod itinerary;
pub mod pipeline;
pub mod retrieval;
