//! Game Module
//!
//! Simulation and drawing for the endless runner.
//!
//! Key pieces:
//! - Body: feet-anchored AABB with axis-separated platform collision
//! - Player / Enemy: controllers built on Body
//! - Runtime: one run of the game, stepped a frame at a time
//! - Renderer: macroquad drawing of a GameState

pub mod body;
pub mod player;
pub mod enemy;
pub mod combat;
pub mod camera;
pub mod parallax;
pub mod event;
pub mod runtime;
pub mod sprites;
pub mod renderer;

pub use event::GameEvent;
pub use runtime::GameState;
pub use sprites::PlayerSprites;
pub use renderer::draw_frame;
