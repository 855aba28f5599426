//! # Shopspawn
//!
//! Populates generated levels with bonus shop items and settles them when they
//! are hauled out through an extraction point.
//!
//! ## Architecture Overview
//!
//! The crate is a small engine that the host game drives through discrete
//! signals. Everything it needs from the game is reached through the
//! [`Host`] and [`PurchaseRecorder`] traits:
//!
//! - **Catalog**: item definitions, filtering and weighted selection
//! - **Config**: per-category spawn settings and the per-item allow list
//! - **Level**: candidate locations, placements and the host interface
//! - **Engine**: the run context that ties eligibility, spawning, the ledgers
//!   and settlement together
//! - **Simulation**: an in-memory host used by the CLI and the tests
//!
//! ## Initialization Order
//!
//! 1. Construct a [`SpawnEngine`] from a [`SpawnConfig`] and a seed.
//! 2. Call [`SpawnEngine::on_catalog_available`] once the item catalog is loaded.
//! 3. For every level, call [`SpawnEngine::begin_run`], then
//!    [`SpawnEngine::on_environment_ready`] and, whenever an extraction
//!    finishes, [`SpawnEngine::on_extraction_completed`].

pub mod catalog;
pub mod config;
pub mod engine;
pub mod level;
pub mod simulation;

pub use catalog::*;
pub use config::*;
pub use engine::*;
pub use level::*;

pub use simulation::{sample_catalog, SimulatedHost};

/// Core error type for the spawner.
#[derive(thiserror::Error, Debug)]
pub enum SpawnError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration value is out of range or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pass ran before the catalog-available signal
    #[error("Item catalog has not been made available yet")]
    CatalogUnavailable,

    /// Two catalog entries share a name
    #[error("Duplicate item definition: {0}")]
    DuplicateItem(String),

    /// Selection was asked to choose from nothing
    #[error("Cannot select an item from an empty candidate set")]
    EmptySelection,

    /// Operation is not allowed in the current run phase
    #[error("Phase violation: {0}")]
    PhaseViolation(String),

    /// A global logger was already installed
    #[error("Logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Result type used throughout the crate.
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
