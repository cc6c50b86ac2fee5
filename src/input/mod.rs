//! Input handling with gamepad support
//!
//! Keyboard and gamepad are polled once per frame and folded into an
//! [`InputFrame`], which is all the simulation ever sees.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard only

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use state::InputState;
