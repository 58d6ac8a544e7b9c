use std::fmt;
use std::ops::RangeInclusive;

/// Largest possible neighbor count in a 3x3x3 neighborhood.
pub const MAX_NEIGHBORS: u8 = 26;

/// Survival and birth thresholds for the 3D automaton.
///
/// A living cell survives when its neighbor count falls in `survive`;
/// a dead cell comes alive when the count falls in `birth`. Every other
/// case yields a dead cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub survive: RangeInclusive<u8>,
    pub birth: RangeInclusive<u8>,
}

impl Rule {
    pub const fn new(survive: RangeInclusive<u8>, birth: RangeInclusive<u8>) -> Self {
        Self { survive, birth }
    }

    /// Compute the next state of a cell from its state and neighbor count
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survive.contains(&neighbors)
        } else {
            self.birth.contains(&neighbors)
        }
    }

    /// Both ranges are non-empty and within `0..=26`
    pub fn is_valid(&self) -> bool {
        [&self.survive, &self.birth]
            .iter()
            .all(|r| r.start() <= r.end() && *r.end() <= MAX_NEIGHBORS)
    }
}

/// S6-9/B7-9, the shipped rule
impl Default for Rule {
    fn default() -> Self {
        Self::new(6..=9, 7..=9)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{}-{}/B{}-{}",
            self.survive.start(),
            self.survive.end(),
            self.birth.start(),
            self.birth.end()
        )
    }
}
