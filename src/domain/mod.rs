mod algorithm;
mod error;
mod grid;
mod rules;

pub use algorithm::{Algorithm, step_parallel, step_serial};
pub use error::{GridError, GridResult};
pub use grid::{DEFAULT_WIDTH, Dimensions, Grid};
pub use rules::{MAX_NEIGHBORS, Rule};
