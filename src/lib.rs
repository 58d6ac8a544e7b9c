// Domain layer - lattice, rule and step algorithms
pub mod domain;

// Application layer - engine, scheduling and configuration
pub mod application;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Algorithm, Dimensions, Grid, GridError, Rule};
pub use application::{Camera, Engine, SimConfig, Ticker};
pub use rendering::Renderer;
