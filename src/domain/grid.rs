use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::error::{GridError, GridResult};

/// Edge length used for any axis the caller leaves unspecified.
pub const DEFAULT_WIDTH: usize = 15;

/// Extent of the lattice along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dimensions {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Same extent on all three axes
    pub const fn cube(width: usize) -> Self {
        Self::new(width, width, width)
    }

    /// Reject zero-width axes and lattices whose cell count overflows `usize`
    pub fn validate(self) -> GridResult<Self> {
        for (axis, value) in [('x', self.x), ('y', self.y), ('z', self.z)] {
            if value == 0 {
                return Err(GridError::InvalidDimension { axis, value });
            }
        }
        match self.checked_volume() {
            Some(_) => Ok(self),
            None => Err(GridError::TooLarge(self)),
        }
    }

    /// Total number of cells, or `None` on overflow
    pub const fn checked_volume(self) -> Option<usize> {
        match self.x.checked_mul(self.y) {
            Some(area) => area.checked_mul(self.z),
            None => None,
        }
    }

    /// Total number of cells. Saturates for lattices `validate` rejects.
    pub const fn volume(self) -> usize {
        match self.checked_volume() {
            Some(volume) => volume,
            None => usize::MAX,
        }
    }

    pub const fn contains(self, i: usize, j: usize, k: usize) -> bool {
        i < self.x && j < self.y && k < self.z
    }

    /// Largest of the three extents
    pub fn max_extent(self) -> usize {
        self.x.max(self.y).max(self.z)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::cube(DEFAULT_WIDTH)
    }
}

/// `15` for a cube or `10x12x8` for explicit extents
impl FromStr for Dimensions {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = value
            .split(['x', 'X'])
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|err| format!("invalid extent `{part}`: {err}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [width] => Ok(Self::cube(*width)),
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err("expected format N or XxYxZ".to_owned()),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Dense 3D lattice of boolean cells.
///
/// Cells are stored in a flat vector with `i` as the outermost axis, so an
/// `i`-slab (all cells sharing one `i`) is a contiguous run of
/// `y * z` cells. The parallel step relies on that layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell set to `initial`
    pub fn new(dims: Dimensions, initial: bool) -> GridResult<Self> {
        let dims = dims.validate()?;
        Ok(Self {
            dims,
            cells: vec![initial; dims.volume()],
        })
    }

    /// Create a grid with all cells dead
    pub fn dead(dims: Dimensions) -> GridResult<Self> {
        Self::new(dims, false)
    }

    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of cells (always `x * y * z`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert 3D coordinates to the flat index
    #[inline]
    const fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.dims.y + j) * self.dims.z + k
    }

    fn checked_index(&self, i: usize, j: usize, k: usize) -> GridResult<usize> {
        if self.dims.contains(i, j, k) {
            Ok(self.index(i, j, k))
        } else {
            Err(GridError::OutOfBounds {
                i,
                j,
                k,
                dims: self.dims,
            })
        }
    }

    /// Get cell state at (i, j, k)
    pub fn get(&self, i: usize, j: usize, k: usize) -> GridResult<bool> {
        self.checked_index(i, j, k).map(|idx| self.cells[idx])
    }

    /// Set cell state at (i, j, k)
    pub fn set(&mut self, i: usize, j: usize, k: usize, alive: bool) -> GridResult<()> {
        let idx = self.checked_index(i, j, k)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Set every cell to `alive`
    pub fn fill(&mut self, alive: bool) {
        self.cells.iter_mut().for_each(|cell| *cell = alive);
    }

    /// Independently set each cell alive with the given probability
    pub fn randomize<R: Rng>(&mut self, probability: f64, rng: &mut R) -> GridResult<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = rng.random_bool(probability));
        Ok(())
    }

    /// Count alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Count alive cells in the 3x3x3 block around (i, j, k), excluding the
    /// center. Offsets falling outside the lattice are skipped, not wrapped.
    ///
    /// (i, j, k) must lie inside the lattice; debug builds panic otherwise.
    pub fn neighbor_count(&self, i: usize, j: usize, k: usize) -> u8 {
        debug_assert!(
            self.dims.contains(i, j, k),
            "neighbor_count center ({i}, {j}, {k}) outside {} grid",
            self.dims
        );
        let i_range = i.saturating_sub(1)..=(i + 1).min(self.dims.x - 1);
        let j_range = j.saturating_sub(1)..=(j + 1).min(self.dims.y - 1);
        let k_range = k.saturating_sub(1)..=(k + 1).min(self.dims.z - 1);

        let mut count = 0;
        for ni in i_range {
            for nj in j_range.clone() {
                for nk in k_range.clone() {
                    if (ni, nj, nk) == (i, j, k) {
                        continue;
                    }
                    if self.cells[self.index(ni, nj, nk)] {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Iterate over the coordinates of alive cells, `i` outermost
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let Dimensions { y, z, .. } = self.dims;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(idx, _)| (idx / (y * z), (idx / z) % y, idx % z))
    }

    /// Read-only view of the flat cell storage
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of cells sharing one `i` coordinate
    pub const fn slab_len(&self) -> usize {
        self.dims.y * self.dims.z
    }

    /// Position of (j, k) inside an `i`-slab
    #[inline]
    pub(crate) const fn slab_offset(&self, j: usize, k: usize) -> usize {
        j * self.dims.z + k
    }

    /// Mutable flat storage, for writing a whole generation at once
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}
