//! Fixed-rate tick production, decoupled from the frame rate.
//!
//! [`Ticker`] never reads a clock itself: callers feed it elapsed time, so a
//! windowed front end can pass frame deltas while tests pass synthetic
//! durations. [`run_headless`] drives a ticker from the wall clock.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use super::{Engine, TickReport};
use crate::domain::GridResult;
use crate::rendering::Renderer;

/// Default time between generations
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("tick interval must be greater than zero")]
    InvalidInterval,
}

/// Accumulates elapsed time and emits at most one tick per poll.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    accumulated: Duration,
    paused: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Result<Self, TickerError> {
        if interval.is_zero() {
            return Err(TickerError::InvalidInterval);
        }
        Ok(Self {
            interval,
            accumulated: Duration::ZERO,
            paused: false,
        })
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    /// Forget any partially accumulated interval
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Time left before the next tick is due
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }

    /// Add `elapsed` and report whether a tick is due.
    ///
    /// Whole intervals beyond the first are dropped rather than queued, so a
    /// stalled host resumes at the normal rate instead of bursting.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.paused {
            return false;
        }

        self.accumulated += elapsed;
        if self.accumulated < self.interval {
            return false;
        }

        self.accumulated -= self.interval;
        if self.accumulated >= self.interval {
            let interval = self.interval.as_nanos();
            let backlog = self.accumulated.as_nanos();
            warn!(dropped = (backlog / interval) as u64, "fell behind, dropping missed ticks");
            self.accumulated = Duration::from_nanos((backlog % interval) as u64);
        }
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            accumulated: Duration::ZERO,
            paused: false,
        }
    }
}

/// Drive `engine` from the wall clock until `generations` ticks have run
/// (forever when `None`). Generation 0 is shown before the first tick.
///
/// Returns the last tick's report, if any tick ran.
pub fn run_headless<R: Renderer + ?Sized>(
    engine: &mut Engine,
    ticker: &mut Ticker,
    renderer: &mut R,
    generations: Option<u64>,
) -> GridResult<Option<TickReport>> {
    info!(
        interval_ms = ticker.interval().as_millis() as u64,
        ?generations,
        "running headless"
    );
    engine.show(renderer);

    let mut last = None;
    let mut ticks = 0;
    let mut previous = Instant::now();
    while generations.is_none_or(|limit| ticks < limit) {
        thread::sleep(ticker.until_next());

        let now = Instant::now();
        let due = ticker.poll(now - previous);
        previous = now;

        if due {
            last = Some(engine.advance(renderer)?);
            ticks += 1;
        }
    }
    Ok(last)
}
