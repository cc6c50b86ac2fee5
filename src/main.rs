//! Parallax Runner: an endless side-scrolling platformer
//!
//! Run right across procedurally generated platforms while the background
//! scrolls in layers. Stomp enemies from above, avoid touching them from the
//! side, and the level keeps building itself ahead of you.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed at build time; the window opens before the config is loaded
const WINDOW_TITLE: &str = "Endless Parallax Platformer";

mod config;
mod world;
mod game;
mod input;

use macroquad::logging::{error, info, warn};
use macroquad::prelude::*;
use config::{GameConfig, WindowSettings, CONFIG_PATH};
use game::{draw_frame, GameEvent, GameState, PlayerSprites};
use input::InputState;

fn window_conf() -> Conf {
    let window = WindowSettings::default();
    Conf {
        window_title: format!("{} v{}", WINDOW_TITLE, VERSION),
        window_width: window.width,
        window_height: window.height,
        window_resizable: false,
        ..Default::default()
    }
}

/// Load `assets/config.ron`, falling back to defaults when it is absent or bad
async fn load_config() -> GameConfig {
    let text = match load_string(CONFIG_PATH).await {
        Ok(text) => text,
        Err(_) => {
            info!("No config at {}, using defaults", CONFIG_PATH);
            return GameConfig::default();
        }
    };
    match GameConfig::from_ron_str(&text) {
        Ok(config) => {
            info!("Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            error!("Bad config {}: {}", CONFIG_PATH, e);
            warn!("Using default config");
            GameConfig::default()
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Jumped { x } => info!("Jump at x={:.0}", x),
        GameEvent::Stomped { count } => info!("Stomped {} enemy(s)", count),
        GameEvent::Damaged { hp_left } => info!("Hit! hp={}", hp_left),
        GameEvent::Restarted { reason, distance } => {
            info!("Run over ({}) at x={:.0}, starting fresh", reason.label(), distance)
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = load_config().await;
    let defaults = WindowSettings::default();
    if (config.window.width, config.window.height) != (defaults.width, defaults.height) {
        request_new_screen_size(config.window.width as f32, config.window.height as f32);
    }

    let seed = config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64);
    info!("Seed {}", seed);

    let sprites = PlayerSprites::load(&config.sprites).await;
    let fps_limit = config.window.fps_limit;
    let mut game = GameState::new(config, seed, sprites.hitbox);
    let mut input = InputState::new();

    info!("=== Parallax Runner v{} ===", VERSION);

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        let frame = input.poll();
        if frame.quit {
            break;
        }

        game.advance(get_frame_time(), &frame);
        let events: Vec<GameEvent> = game.events.drain().collect();
        for event in &events {
            log_event(event);
            if let GameEvent::Restarted { .. } = event {
                info!("Seed {}", game.seed());
            }
        }

        draw_frame(&game, &sprites);

        if let Some(target_frame_time) = fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Native: sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: no thread::sleep, busy wait
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {}
                }
            }
        }

        next_frame().await;
    }
}
