//! Simulation configuration and command-line parsing.

use std::ops::RangeInclusive;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use super::scheduler::{DEFAULT_TICK_INTERVAL, TickerError};
use crate::domain::{Algorithm, Dimensions, GridError, MAX_NEIGHBORS, Rule};

/// Default chance that a cell starts alive
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid rule {0}: ranges must be ascending and at most 26")]
    InvalidRule(Rule),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Ticker(#[from] TickerError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Command-line arguments for a 3D Life run.
#[derive(Debug, Parser)]
#[command(name = "life3d", version, about = "3D Game of Life on a bounded lattice", long_about = None)]
pub struct CliArgs {
    /// Grid dimensions as N for a cube or XxYxZ (for example 10x12x8).
    #[arg(long, value_name = "N|XxYxZ", default_value_t = Dimensions::default())]
    size: Dimensions,
    /// Chance that each cell starts alive, within [0, 1].
    #[arg(
        long,
        value_name = "P",
        default_value_t = DEFAULT_ALIVE_PROBABILITY,
        value_parser = parse_probability
    )]
    density: f64,
    /// Milliseconds between generations.
    #[arg(
        long = "interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_ms: u64,
    /// Neighbor counts that keep a live cell alive, as A-B or A.
    #[arg(long, value_name = "A-B", default_value = "6-9", value_parser = parse_range)]
    survive: RangeInclusive<u8>,
    /// Neighbor counts that bring a dead cell to life, as A-B or A.
    #[arg(long, value_name = "A-B", default_value = "7-9", value_parser = parse_range)]
    birth: RangeInclusive<u8>,
    /// Step implementation: serial or parallel.
    #[arg(long, value_name = "NAME", default_value_t = Algorithm::default())]
    algorithm: Algorithm,
    /// Seed the initial generation for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Print generations to stdout instead of opening a window.
    #[arg(long)]
    headless: bool,
    /// Stop after this many generations (headless only).
    #[arg(long, value_name = "COUNT")]
    generations: Option<u64>,
}

impl CliArgs {
    /// Build and validate the simulation settings these arguments describe
    pub fn into_config(self) -> ConfigResult<SimConfig> {
        let config = SimConfig {
            dimensions: self.size,
            alive_probability: self.density,
            tick_interval: Duration::from_millis(self.interval_ms),
            rule: Rule::new(self.survive, self.birth),
            algorithm: self.algorithm,
            seed: self.seed,
            headless: self.headless,
            generations: self.generations,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Everything needed to build and drive a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub dimensions: Dimensions,
    pub alive_probability: f64,
    pub tick_interval: Duration,
    pub rule: Rule,
    pub algorithm: Algorithm,
    /// Seed for the initial generation; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub headless: bool,
    /// Generation limit for headless runs
    pub generations: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            rule: Rule::default(),
            algorithm: Algorithm::default(),
            seed: None,
            headless: false,
            generations: None,
        }
    }
}

impl SimConfig {
    /// Parse the process arguments, exiting with clap's usage message on error
    pub fn parse() -> ConfigResult<Self> {
        CliArgs::parse().into_config()
    }

    /// Check every field a simulation depends on
    pub fn validate(&self) -> ConfigResult<()> {
        self.dimensions.validate()?;
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(GridError::InvalidProbability(self.alive_probability).into());
        }
        if self.tick_interval.is_zero() {
            return Err(TickerError::InvalidInterval.into());
        }
        if !self.rule.is_valid() {
            return Err(ConfigError::InvalidRule(self.rule.clone()));
        }
        Ok(())
    }
}

fn parse_probability(value: &str) -> Result<f64, String> {
    let probability: f64 = value.trim().parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(format!("{probability} is not within [0, 1]"))
    }
}

/// `6-9`, or a single count such as `4`
fn parse_range(value: &str) -> Result<RangeInclusive<u8>, String> {
    let (lo, hi) = value.split_once('-').unwrap_or((value, value));
    let bound = |part: &str| {
        part.trim()
            .parse::<u8>()
            .map_err(|err| format!("invalid count `{part}`: {err}"))
    };
    let range = bound(lo)?..=bound(hi)?;
    if *range.end() > MAX_NEIGHBORS {
        return Err(format!("counts must be at most {MAX_NEIGHBORS}"));
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<SimConfig, String> {
        let args = CliArgs::try_parse_from(std::iter::once("life3d").chain(args.iter().copied()))
            .map_err(|err| err.to_string())?;
        args.into_config().map_err(|err| err.to_string())
    }

    fn clap_error(args: &[&str]) -> ErrorKind {
        match CliArgs::try_parse_from(std::iter::once("life3d").chain(args.iter().copied())) {
            Ok(args) => panic!("expected a parse error, got {args:?}"),
            Err(err) => err.kind(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.dimensions, Dimensions::cube(15));
        assert_eq!(config.alive_probability, 0.3);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.rule, Rule::new(6..=9, 7..=9));
        assert!(!config.headless);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_full_option_set() {
        let config = parse(&[
            "--size", "10x12x8", "--density", "0.5", "--interval-ms", "250", "--survive", "5-7",
            "--birth", "6", "--algorithm", "serial", "--seed", "42", "--headless",
            "--generations", "12",
        ])
        .unwrap();

        assert_eq!(config.dimensions, Dimensions::new(10, 12, 8));
        assert_eq!(config.alive_probability, 0.5);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.rule, Rule::new(5..=7, 6..=6));
        assert_eq!(config.algorithm, Algorithm::Serial);
        assert_eq!(config.seed, Some(42));
        assert!(config.headless);
        assert_eq!(config.generations, Some(12));
    }

    #[test]
    fn test_cube_size() {
        assert_eq!(parse(&["--size", "7"]).unwrap().dimensions, Dimensions::cube(7));
    }

    #[test]
    fn test_zero_width_rejected() {
        let args = CliArgs::try_parse_from(["life3d", "--size", "0x5x5"]).unwrap();
        assert_eq!(
            args.into_config(),
            Err(ConfigError::Grid(GridError::InvalidDimension { axis: 'x', value: 0 }))
        );
    }

    #[test]
    fn test_overflowing_size_rejected() {
        let args = CliArgs::try_parse_from(["life3d", "--size", "4194304"]).unwrap();
        assert_eq!(
            args.into_config(),
            Err(ConfigError::Grid(GridError::TooLarge(Dimensions::cube(1 << 22))))
        );
    }

    #[test]
    fn test_bad_size_rejected() {
        assert!(parse(&["--size", "-3"]).is_err());
        assert_eq!(clap_error(&["--size", "4x4"]), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_probability_out_of_range() {
        assert_eq!(clap_error(&["--density", "1.2"]), ErrorKind::ValueValidation);
        assert_eq!(clap_error(&["--density", "often"]), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert_eq!(clap_error(&["--interval-ms", "0"]), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_rule_validation() {
        let args = CliArgs::try_parse_from(["life3d", "--survive", "9-6"]).unwrap();
        assert!(matches!(args.into_config(), Err(ConfigError::InvalidRule(_))));
        assert_eq!(clap_error(&["--birth", "7-30"]), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_missing_and_help() {
        assert_eq!(clap_error(&["--wrap"]), ErrorKind::UnknownArgument);
        assert!(parse(&["--seed"]).is_err());
        assert_eq!(clap_error(&["--help"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_algorithm() {
        assert_eq!(clap_error(&["--algorithm", "gpu"]), ErrorKind::ValueValidation);
        let config = parse(&["--algorithm", "PARALLEL"]).unwrap();
        assert_eq!(config.algorithm, Algorithm::Parallel);
    }

    #[test]
    fn test_validate_catches_programmatic_configs() {
        let config = SimConfig {
            tick_interval: Duration::ZERO,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Ticker(TickerError::InvalidInterval)));

        let config = SimConfig {
            alive_probability: -0.1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Grid(GridError::InvalidProbability(-0.1)))
        );
    }
}
