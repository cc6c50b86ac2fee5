//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input, combining
//! them into a unified action-based API.

use macroquad::prelude::*;
use super::gamepad::{button, Gamepad};
use super::{Action, InputFrame};

/// Stick deflection needed to count as a digital direction
const STICK_THRESHOLD: f32 = 0.5;

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Call once per frame; returns this frame's intent
    pub fn poll(&mut self) -> InputFrame {
        self.gamepad.poll();

        InputFrame {
            move_dir: InputFrame::direction(
                self.action_down(Action::MoveLeft),
                self.action_down(Action::MoveRight),
            ),
            look_up: self.action_down(Action::LookUp),
            look_down: self.action_down(Action::LookDown),
            jump: self.action_pressed(Action::Jump),
            restart: self.action_pressed(Action::Restart),
            quit: self.action_pressed(Action::Quit),
        }
    }

    /// Check if action is currently held down
    fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    ///
    /// Only Jump, Restart and Quit are edge-triggered; held actions report false.
    fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            Action::LookUp => is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            Action::LookDown => is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            Action::Jump => is_key_down(KeyCode::Space),
            Action::Restart => is_key_down(KeyCode::R),
            Action::Quit => is_key_down(KeyCode::Escape),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => is_key_pressed(KeyCode::Space),
            Action::Restart => is_key_pressed(KeyCode::R),
            Action::Quit => is_key_pressed(KeyCode::Escape),
            _ => false,
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        let stick = gp.left_stick();

        match action {
            Action::MoveLeft => gp.is_button_down(button::DPAD_LEFT) || stick.x < -STICK_THRESHOLD,
            Action::MoveRight => gp.is_button_down(button::DPAD_RIGHT) || stick.x > STICK_THRESHOLD,
            Action::LookUp => gp.is_button_down(button::DPAD_UP) || stick.y < -STICK_THRESHOLD,
            Action::LookDown => gp.is_button_down(button::DPAD_DOWN) || stick.y > STICK_THRESHOLD,
            Action::Jump => gp.is_button_down(button::A),
            Action::Restart => gp.is_button_down(button::START),
            Action::Quit => gp.is_button_down(button::SELECT),
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let gp = &self.gamepad;

        match action {
            Action::Jump => gp.is_button_pressed(button::A),
            Action::Restart => gp.is_button_pressed(button::START),
            Action::Quit => gp.is_button_pressed(button::SELECT),
            _ => false,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
