use std::time::Duration;

use macroquad::prelude::*;

use super::Renderer;
use crate::application::Camera;
use crate::domain::{Algorithm, Dimensions, Grid, Rule};

pub const BACKGROUND: Color = Color::new(0.94, 0.94, 0.94, 1.0);
/// Dark grey at 25% opacity
const CELL_COLOR: Color = Color::new(0.2, 0.2, 0.2, 0.25);
const CELL_EDGE_COLOR: Color = Color::new(0.2, 0.2, 0.2, 0.45);
const BOUNDS_COLOR: Color = Color::new(0.55, 0.55, 0.6, 1.0);

/// Draws the lattice as unit cubes, one per alive cell.
///
/// `display` snapshots the alive positions so frames can be redrawn at the
/// display rate while generations arrive at the tick rate.
pub struct SceneRenderer {
    dims: Dimensions,
    alive: Vec<Vec3>,
    generation: u64,
    population: usize,
}

impl SceneRenderer {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            alive: Vec::new(),
            generation: 0,
            population: 0,
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn population(&self) -> usize {
        self.population
    }

    /// World positions of the cubes drawn for the last generation
    pub fn alive_positions(&self) -> &[Vec3] {
        &self.alive
    }

    /// Draw the last displayed generation from `camera`'s viewpoint
    pub fn draw(&self, camera: &Camera) {
        set_camera(&Camera3D {
            position: Vec3::from_array(camera.position()),
            target: Vec3::from_array(camera.target),
            up: Vec3::Y,
            ..Default::default()
        });

        let bounds = vec3(self.dims.x as f32, self.dims.y as f32, self.dims.z as f32);
        draw_cube_wires(Vec3::from_array(camera.target), bounds, BOUNDS_COLOR);

        for &position in &self.alive {
            draw_cube(position, Vec3::ONE, None, CELL_COLOR);
            draw_cube_wires(position, Vec3::ONE, CELL_EDGE_COLOR);
        }

        set_default_camera();
    }

    /// Overlay generation, population and run state
    pub fn draw_hud(
        &self,
        paused: bool,
        interval: Duration,
        algorithm: Algorithm,
        rule: &Rule,
    ) {
        let status = if paused { "Paused" } else { "Running" };
        let status_color = if paused {
            Color::from_rgba(200, 120, 0, 255)
        } else {
            Color::from_rgba(0, 140, 70, 255)
        };

        let labels = [
            (format!("Grid: {}", self.dims), 20.0, DARKGRAY),
            (format!("Generation: {}", self.generation), 40.0, BLACK),
            (
                format!("Population: {}/{}", self.population, self.dims.volume()),
                60.0,
                BLACK,
            ),
            (format!("Interval: {} ms", interval.as_millis()), 80.0, DARKGRAY),
            (format!("Rule: {rule}  Algorithm: {algorithm}"), 100.0, DARKGRAY),
            (status.to_owned(), 120.0, status_color),
            (
                "Space: Pause  N: Step  A: Algorithm  Arrows: Orbit  Wheel: Zoom  H: Home  Esc: Quit".to_owned(),
                screen_height() - 12.0,
                GRAY,
            ),
        ];

        labels.iter().for_each(|(text, y, color)| {
            draw_text(text, 12.0, *y, 18.0, *color);
        });
    }
}

impl Renderer for SceneRenderer {
    fn display(&mut self, generation: u64, grid: &Grid) {
        self.alive.clear();
        self.alive.extend(
            grid.iter_alive()
                .map(|(i, j, k)| vec3(i as f32, j as f32, k as f32)),
        );
        self.population = self.alive.len();
        self.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_snapshots_alive_cells() {
        let dims = Dimensions::new(3, 4, 5);
        let mut grid = Grid::dead(dims).unwrap();
        grid.set(2, 3, 4, true).unwrap();
        grid.set(0, 1, 0, true).unwrap();

        let mut scene = SceneRenderer::new(dims);
        scene.display(9, &grid);
        assert_eq!(scene.generation(), 9);
        assert_eq!(scene.population(), 2);
        assert_eq!(
            scene.alive_positions(),
            &[vec3(0.0, 1.0, 0.0), vec3(2.0, 3.0, 4.0)]
        );

        // The snapshot is independent of later writes to the grid
        grid.fill(false);
        assert_eq!(scene.population(), 2);

        scene.display(10, &grid);
        assert!(scene.alive_positions().is_empty());
    }
}
