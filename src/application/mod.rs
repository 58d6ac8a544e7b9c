mod camera;
mod config;
mod engine;
mod scheduler;

pub use camera::Camera;
pub use config::{CliArgs, ConfigError, ConfigResult, DEFAULT_ALIVE_PROBABILITY, SimConfig};
pub use engine::{Engine, TickReport};
pub use scheduler::{DEFAULT_TICK_INTERVAL, Ticker, TickerError, run_headless};
