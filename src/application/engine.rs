use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::SimConfig;
use crate::domain::{Algorithm, Dimensions, Grid, GridResult, Rule};
use crate::rendering::Renderer;

/// Outcome of a single `advance()`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub generation: u64,
    pub population: usize,
    pub step_time: Duration,
}

/// Engine owns the two generation buffers and the step protocol.
///
/// `buffers[active]` holds the last computed generation; the other slot is
/// scratch space the next step writes into. Only `step()` flips `active`.
pub struct Engine {
    buffers: [Grid; 2],
    active: usize,
    generation: u64,
    rule: Rule,
    algorithm: Algorithm,
}

impl Engine {
    /// Create an engine with a randomly seeded first generation
    pub fn new<R: Rng>(config: &SimConfig, rng: &mut R) -> GridResult<Self> {
        let mut initial = Grid::dead(config.dimensions)?;
        initial.randomize(config.alive_probability, rng)?;

        info!(
            dims = %config.dimensions,
            population = initial.population(),
            rule = %config.rule,
            algorithm = %config.algorithm,
            "engine created"
        );
        Ok(Self::from_grid(initial, config.rule.clone(), config.algorithm))
    }

    /// Create an engine whose generation 0 is `initial`
    pub fn from_grid(initial: Grid, rule: Rule, algorithm: Algorithm) -> Self {
        let scratch = initial.clone();
        Self {
            buffers: [initial, scratch],
            active: 0,
            generation: 0,
            rule,
            algorithm,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.active().dimensions()
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Slot (0 or 1) currently holding the displayed generation
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The last computed generation
    pub fn active(&self) -> &Grid {
        &self.buffers[self.active]
    }

    /// The scratch buffer; holds the generation before `active()` once at
    /// least one step has run
    pub fn preview(&self) -> &Grid {
        &self.buffers[1 - self.active]
    }

    /// Compute the next generation into the preview buffer and swap roles,
    /// without notifying a renderer
    pub fn step(&mut self) -> GridResult<TickReport> {
        let start = Instant::now();

        let (input, output) = split_roles(&mut self.buffers, self.active);
        self.algorithm.step_into(&self.rule, input, output)?;

        self.active = 1 - self.active;
        self.generation += 1;

        let report = TickReport {
            generation: self.generation,
            population: self.active().population(),
            step_time: start.elapsed(),
        };
        debug!(
            generation = report.generation,
            population = report.population,
            step_ms = report.step_time.as_secs_f32() * 1000.0,
            "advanced"
        );
        Ok(report)
    }

    /// One tick: step, swap, then hand the new generation to `renderer`
    pub fn advance<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> GridResult<TickReport> {
        let report = self.step()?;
        self.show(renderer);
        Ok(report)
    }

    /// Hand the current generation to `renderer` without stepping
    pub fn show<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.display(self.generation, self.active());
    }
}

/// Borrow the active buffer for reading and the other one for writing
fn split_roles(buffers: &mut [Grid; 2], active: usize) -> (&Grid, &mut Grid) {
    let [first, second] = buffers;
    if active == 0 {
        (&*first, second)
    } else {
        (&*second, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Keeps a copy of everything it is shown
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u64, Grid)>,
    }

    impl Renderer for Recorder {
        fn display(&mut self, generation: u64, grid: &Grid) {
            self.frames.push((generation, grid.clone()));
        }
    }

    fn engine_for(initial: Grid) -> Engine {
        Engine::from_grid(initial, Rule::default(), Algorithm::Serial)
    }

    #[test]
    fn test_new_seeds_first_buffer() {
        let config = SimConfig {
            dimensions: Dimensions::cube(20),
            ..SimConfig::default()
        };
        let engine = Engine::new(&config, &mut StdRng::seed_from_u64(4)).unwrap();

        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.active_index(), 0);
        let density = engine.active().population() as f64 / 8000.0;
        assert!((0.25..0.35).contains(&density), "density {density}");
    }

    #[test]
    fn test_new_rejects_zero_width() {
        let config = SimConfig {
            dimensions: Dimensions::new(0, 15, 15),
            ..SimConfig::default()
        };
        let err = Engine::new(&config, &mut StdRng::seed_from_u64(0)).err();
        assert_eq!(err, Some(GridError::InvalidDimension { axis: 'x', value: 0 }));
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let mut engine = engine_for(Grid::dead(Dimensions::cube(3)).unwrap());
        let mut recorder = Recorder::default();

        let report = engine.advance(&mut recorder).unwrap();
        assert_eq!(report.population, 0);
        assert_eq!(engine.active().population(), 0);
    }

    #[test]
    fn test_full_cube_keeps_eight_corners() {
        let mut engine = engine_for(Grid::new(Dimensions::cube(3), true).unwrap());
        let mut recorder = Recorder::default();

        let report = engine.advance(&mut recorder).unwrap();
        assert_eq!(report.population, 8);
        for (i, j, k) in engine.active().iter_alive() {
            assert!([i, j, k].iter().all(|&c| c == 0 || c == 2), "({i}, {j}, {k})");
        }
    }

    #[test]
    fn test_advance_swaps_buffers() {
        let initial = Grid::new(Dimensions::cube(3), true).unwrap();
        let mut engine = engine_for(initial.clone());
        let mut recorder = Recorder::default();

        assert_eq!(engine.active_index(), 0);
        engine.advance(&mut recorder).unwrap();
        assert_eq!(engine.active_index(), 1);
        // Old active content is untouched until reused as the next preview
        assert_eq!(engine.preview(), &initial);
        assert_eq!(engine.active().population(), 8);

        engine.advance(&mut recorder).unwrap();
        assert_eq!(engine.active_index(), 0);
    }

    #[test]
    fn test_renderer_sees_each_generation_once_in_order() {
        let mut grid = Grid::dead(Dimensions::cube(8)).unwrap();
        grid.randomize(0.3, &mut StdRng::seed_from_u64(17)).unwrap();
        let mut engine = engine_for(grid);
        let mut recorder = Recorder::default();

        engine.show(&mut recorder);
        for _ in 0..4 {
            engine.advance(&mut recorder).unwrap();
        }

        let generations: Vec<_> = recorder.frames.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, vec![0, 1, 2, 3, 4]);
        assert_eq!(&recorder.frames[4].1, engine.active());
    }

    #[test]
    fn test_displayed_frame_matches_single_step() {
        let mut grid = Grid::dead(Dimensions::new(6, 7, 5)).unwrap();
        grid.randomize(0.4, &mut StdRng::seed_from_u64(2)).unwrap();
        let mut engine = engine_for(grid.clone());
        let mut recorder = Recorder::default();
        engine.advance(&mut recorder).unwrap();

        let mut expected = Grid::dead(grid.dimensions()).unwrap();
        Algorithm::Serial
            .step_into(&Rule::default(), &grid, &mut expected)
            .unwrap();
        assert_eq!(recorder.frames[0].1, expected);
    }

    #[test]
    fn test_identical_input_identical_output() {
        let mut grid = Grid::dead(Dimensions::cube(10)).unwrap();
        grid.randomize(0.3, &mut StdRng::seed_from_u64(31)).unwrap();

        let mut a = engine_for(grid.clone());
        let mut b = Engine::from_grid(grid, Rule::default(), Algorithm::Parallel);
        for _ in 0..6 {
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.active(), b.active());
        }
        assert_eq!(a.generation(), 6);
    }

    #[test]
    fn test_switching_algorithm_mid_run_keeps_trajectory() {
        let mut grid = Grid::dead(Dimensions::cube(9)).unwrap();
        grid.randomize(0.35, &mut StdRng::seed_from_u64(8)).unwrap();

        let mut reference = engine_for(grid.clone());
        let mut switching = engine_for(grid);
        assert_eq!(switching.rule(), &Rule::default());

        for _ in 0..6 {
            switching.set_algorithm(switching.algorithm().next());
            reference.step().unwrap();
            switching.step().unwrap();
            assert_eq!(reference.active(), switching.active());
        }
        assert_eq!(switching.algorithm(), Algorithm::Serial);
    }
}
