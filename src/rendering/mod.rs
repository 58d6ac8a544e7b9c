//! Renderers consume one complete generation per tick.

mod scene;
mod terminal;

pub use scene::{BACKGROUND, SceneRenderer};
pub use terminal::TerminalRenderer;

use crate::domain::Grid;

/// Sink for finished generations.
///
/// `display` is called once per generation, in order. The grid borrow ends
/// when the call returns; a renderer that draws later must keep its own
/// snapshot.
pub trait Renderer {
    fn display(&mut self, generation: u64, grid: &Grid);
}
