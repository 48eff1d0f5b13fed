//! Physio Revenue Simulator - Monte-Carlo revenue model for Swiss physiotherapy practices
//!
//! This library provides:
//! - Swiss physiotherapy tariff tables (canton multipliers, treatments, supplements)
//! - Seeded sampling of synthetic practices
//! - Tariff-based base revenue and stochastic supplement calculation
//! - Grouped revenue summaries and CSV / regression-ready output

pub mod error;
pub mod tariff;
pub mod practice;
pub mod simulation;
pub mod summary;
pub mod export;

// Re-export commonly used types
pub use error::{Result, SimError};
pub use tariff::ReferenceTables;
pub use practice::Practice;
pub use simulation::{SimulationEngine, SimulationParams};
pub use summary::RevenueSummary;
