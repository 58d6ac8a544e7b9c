//! Step throughput benchmark comparing the serial and parallel strategies

use std::time::Instant;

use life3d::domain::GridResult;
use life3d::{Algorithm, Dimensions, Engine, Grid, Rule};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_grid(size: usize) -> GridResult<Grid> {
    let mut grid = Grid::dead(Dimensions::cube(size))?;
    grid.randomize(0.3, &mut StdRng::seed_from_u64(size as u64))?;
    Ok(grid)
}

/// Average milliseconds per generation
fn benchmark(algorithm: Algorithm, size: usize, iterations: u32) -> GridResult<f64> {
    let mut engine = Engine::from_grid(seeded_grid(size)?, Rule::default(), algorithm);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.step()?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> anyhow::Result<()> {
    println!("=== 3D Life Step Benchmark ===\n");

    let sizes = [15, 32, 64, 128, 192];
    let iterations = 10;

    println!(
        "{:>12} {:>12} {:>12} {:>10} {:>14}",
        "Size", "Serial", "Parallel", "Speedup", "Cells/sec"
    );
    println!("{:-<66}", "");

    for size in sizes {
        let serial_ms = benchmark(Algorithm::Serial, size, iterations)?;
        let parallel_ms = benchmark(Algorithm::Parallel, size, iterations)?;
        let cells = (size * size * size) as f64;

        println!(
            "{:>12} {:>10.2}ms {:>10.2}ms {:>9.1}x {:>13.1}M",
            format!("{size}^3"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cells / (parallel_ms / 1000.0) / 1_000_000.0
        );
    }

    Ok(())
}
