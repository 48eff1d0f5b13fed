//! Simulation parameters and pipeline driver

mod params;
mod engine;

pub use params::SimulationParams;
pub use engine::SimulationEngine;
