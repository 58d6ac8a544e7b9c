use macroquad::prelude::*;

use crate::application::{Camera, Ticker};

/// Radians per second of orbit while an arrow key is held
const ORBIT_SPEED: f32 = 1.5;
const ZOOM_FACTOR: f32 = 1.1;

/// What the frame loop should do beyond the regular tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Advance exactly one generation now
    StepOnce,
    /// Switch to the next step algorithm
    SwitchAlgorithm,
    Quit,
}

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(ZOOM_FACTOR);
    } else if wheel < 0.0 {
        camera.zoom_out(ZOOM_FACTOR);
    }
}

/// Orbit with the arrow keys, scaled by frame time
pub fn handle_orbit(camera: &mut Camera, delta_time: f32) {
    let step = ORBIT_SPEED * delta_time;
    let bindings = [
        (KeyCode::Left, -step, 0.0),
        (KeyCode::Right, step, 0.0),
        (KeyCode::Up, 0.0, step),
        (KeyCode::Down, 0.0, -step),
    ];

    bindings
        .iter()
        .filter(|(key, _, _)| is_key_down(*key))
        .for_each(|&(_, d_yaw, d_pitch)| camera.orbit(d_yaw, d_pitch));
}

/// Process keyboard shortcuts
pub fn process_keyboard_input(ticker: &mut Ticker, camera: &mut Camera) -> InputAction {
    if is_key_pressed(KeyCode::Escape) {
        return InputAction::Quit;
    }

    if is_key_pressed(KeyCode::Space) {
        ticker.toggle_paused();
        ticker.reset();
        tracing::info!(paused = ticker.is_paused(), "toggled pause");
    }

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }

    if is_key_pressed(KeyCode::A) {
        return InputAction::SwitchAlgorithm;
    }

    if ticker.is_paused() && is_key_pressed(KeyCode::N) {
        InputAction::StepOnce
    } else {
        InputAction::None
    }
}
