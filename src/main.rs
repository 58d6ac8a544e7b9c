use std::time::Duration;

use anyhow::Context;
use life3d::{
    Camera, Engine, SimConfig, Ticker,
    application::run_headless,
    input::{self, InputAction},
    rendering::{self, SceneRenderer, TerminalRenderer},
};
use macroquad::Window;
use macroquad::prelude::{Conf, clear_background, get_frame_time, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

fn window_conf() -> Conf {
    Conf {
        window_title: "3D Game of Life".to_owned(),
        window_width: 900,
        window_height: 675,
        window_resizable: true,
        sample_count: 4,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("life3d=info".parse()?),
        )
        .init();

    let config = SimConfig::parse().context("invalid arguments")?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut engine = Engine::new(&config, &mut rng).context("failed to create simulation")?;
    let mut ticker = Ticker::new(config.tick_interval)?;

    if config.headless {
        let mut renderer = TerminalRenderer::stdout();
        run_headless(&mut engine, &mut ticker, &mut renderer, config.generations)?;
        return Ok(());
    }

    Window::from_config(window_conf(), run_window(engine, ticker));
    Ok(())
}

/// Frame loop: generations advance on the ticker, frames redraw every vsync
async fn run_window(mut engine: Engine, mut ticker: Ticker) {
    let mut scene = SceneRenderer::new(engine.dimensions());
    let mut camera = Camera::for_grid(engine.dimensions());
    engine.show(&mut scene);
    info!(interval_ms = ticker.interval().as_millis() as u64, "window open");

    loop {
        let delta_time = get_frame_time();

        let action = input::process_keyboard_input(&mut ticker, &mut camera);
        if action == InputAction::Quit {
            break;
        }
        if action == InputAction::SwitchAlgorithm {
            engine.set_algorithm(engine.algorithm().next());
            info!(algorithm = %engine.algorithm(), "switched step algorithm");
        }
        input::handle_zoom(&mut camera);
        input::handle_orbit(&mut camera, delta_time);

        let due = ticker.poll(Duration::from_secs_f32(delta_time));
        if due || action == InputAction::StepOnce {
            if let Err(err) = engine.advance(&mut scene) {
                error!(%err, "step failed, stopping simulation");
                break;
            }
        }

        clear_background(rendering::BACKGROUND);
        scene.draw(&camera);
        scene.draw_hud(ticker.is_paused(), ticker.interval(), engine.algorithm(), engine.rule());

        next_frame().await;
    }
}
