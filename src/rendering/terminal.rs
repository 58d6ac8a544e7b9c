use std::io::{self, Write};

use tracing::warn;

use super::Renderer;
use crate::domain::Grid;

const ALIVE: char = '#';
const DEAD: char = '.';

/// Prints each generation as a stack of `i`-slices, one text block per
/// slice with `j` as rows and `k` as columns.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_generation(&mut self, generation: u64, grid: &Grid) -> io::Result<()> {
        let dims = grid.dimensions();
        let cells = grid.cells();
        writeln!(
            self.out,
            "generation {generation}  population {}/{}",
            grid.population(),
            grid.len()
        )?;

        let mut line = String::with_capacity(dims.z);
        for (i, slab) in cells.chunks(grid.slab_len()).enumerate() {
            writeln!(self.out, "i = {i}")?;
            for row in slab.chunks(dims.z) {
                line.clear();
                line.extend(row.iter().map(|&alive| if alive { ALIVE } else { DEAD }));
                writeln!(self.out, "{line}")?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn display(&mut self, generation: u64, grid: &Grid) {
        if let Err(err) = self.write_generation(generation, grid) {
            warn!(%err, generation, "failed to print generation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;

    #[test]
    fn test_prints_slices() {
        let mut grid = Grid::dead(Dimensions::new(2, 2, 3)).unwrap();
        grid.set(0, 0, 2, true).unwrap();
        grid.set(1, 1, 0, true).unwrap();

        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.display(4, &grid);
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        assert_eq!(
            text,
            "generation 4  population 2/12\n\
             i = 0\n..#\n...\n\
             i = 1\n...\n#..\n\n"
        );
    }
}
