//! World geometry
//!
//! Integer-grid platforms and the procedural generator that keeps the
//! endless level filled ahead of the camera.

mod rect;
mod generator;
mod level;

pub use rect::Rect;
pub use generator::{EnemySpawn, LevelGenerator};
pub use level::Level;
