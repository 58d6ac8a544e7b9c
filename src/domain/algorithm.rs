//! Step strategies for advancing the lattice by one generation.
//!
//! Every strategy reads only the input grid and writes every cell of the
//! output grid, so generation N+1 depends on generation N alone.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use super::error::{GridError, GridResult};
use super::{Grid, Rule};

/// Available step implementations. Both produce identical generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// One cell at a time on the calling thread
    Serial,
    /// `i`-slabs of the output written in parallel with rayon
    #[default]
    Parallel,
}

impl Algorithm {
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "serial",
            Algorithm::Parallel => "parallel",
        }
    }

    /// The strategy after this one in `all()`, wrapping around
    pub fn next(self) -> Algorithm {
        match self {
            Algorithm::Serial => Algorithm::Parallel,
            Algorithm::Parallel => Algorithm::Serial,
        }
    }

    /// Write the successor of `input` into `output`
    pub fn step_into(self, rule: &Rule, input: &Grid, output: &mut Grid) -> GridResult<()> {
        match self {
            Algorithm::Serial => step_serial(rule, input, output),
            Algorithm::Parallel => step_parallel(rule, input, output),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown algorithm `{s}` (expected serial or parallel)"))
    }
}

fn check_shapes(input: &Grid, output: &Grid) -> GridResult<()> {
    if input.dimensions() == output.dimensions() {
        Ok(())
    } else {
        Err(GridError::DimensionMismatch {
            input: input.dimensions(),
            output: output.dimensions(),
        })
    }
}

/// Compute one `i`-slab of the next generation
fn step_slab(rule: &Rule, input: &Grid, i: usize, slab: &mut [bool]) {
    let dims = input.dimensions();
    let current = &input.cells()[i * input.slab_len()..(i + 1) * input.slab_len()];
    for j in 0..dims.y {
        for k in 0..dims.z {
            let offset = input.slab_offset(j, k);
            slab[offset] = rule.next_state(current[offset], input.neighbor_count(i, j, k));
        }
    }
}

/// Serial step over every cell
pub fn step_serial(rule: &Rule, input: &Grid, output: &mut Grid) -> GridResult<()> {
    check_shapes(input, output)?;
    let slab_len = input.slab_len();
    output
        .cells_mut()
        .chunks_mut(slab_len)
        .enumerate()
        .for_each(|(i, slab)| step_slab(rule, input, i, slab));
    Ok(())
}

/// Parallel step, one rayon task per `i`-slab of the output
pub fn step_parallel(rule: &Rule, input: &Grid, output: &mut Grid) -> GridResult<()> {
    check_shapes(input, output)?;
    let slab_len = input.slab_len();
    output
        .cells_mut()
        .par_chunks_mut(slab_len)
        .enumerate()
        .for_each(|(i, slab)| step_slab(rule, input, i, slab));
    Ok(())
}
