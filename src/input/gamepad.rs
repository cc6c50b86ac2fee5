//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad; every query reports nothing pressed

use macroquad::prelude::Vec2;

// Standard gamepad button indices (Xbox layout, matches the Web Gamepad API)
pub mod button {
    pub const A: u32 = 0;           // ActionDown / South
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use macroquad::logging::warn;

    const BUTTONS: [(GilrsButton, u32); 7] = [
        (GilrsButton::South, button::A),
        (GilrsButton::Select, button::SELECT),
        (GilrsButton::Start, button::START),
        (GilrsButton::DPadUp, button::DPAD_UP),
        (GilrsButton::DPadDown, button::DPAD_DOWN),
        (GilrsButton::DPadLeft, button::DPAD_LEFT),
        (GilrsButton::DPadRight, button::DPAD_RIGHT),
    ];

    pub struct Gamepad {
        /// None when the platform has no gamepad backend
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                buttons: 0,
                last_buttons: 0,
            }
        }

        /// Pump gilrs events and latch this frame's button mask
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                // Events are processed internally by gilrs
                while gilrs.next_event().is_some() {}
            }
            self.last_buttons = self.buttons;
            self.buttons = self.button_mask();
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            BUTTONS
                .iter()
                .filter(|(b, _)| gp.is_pressed(*b))
                .fold(0, |mask, (_, bit)| mask | (1 << bit))
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            mask_down(self.buttons, button)
        }

        pub fn is_button_pressed(&self, button: u32) -> bool {
            mask_pressed(self.buttons, self.last_buttons, button)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Invert Y to match screen space
            apply_deadzone(x, y, self.deadzone)
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Button held in a mask of button bits
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn mask_down(mask: u32, button: u32) -> bool {
    (mask & (1 << button)) != 0
}

/// Button down now but not in the previous poll's mask
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn mask_pressed(mask: u32, last: u32, button: u32) -> bool {
    mask_down(mask, button) && !mask_down(last, button)
}

/// Apply radial deadzone with linear rescaling
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;
