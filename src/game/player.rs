//! Player controller
//!
//! Acceleration-based running, one jump from the ground, and a short
//! invulnerability window after taking a hit.

use crate::config::{CombatSettings, MovementSettings};
use crate::input::InputFrame;
use crate::world::Rect;
use super::body::{approach, Body};

/// Which sprite the player shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl Facing {
    pub fn label(&self) -> &'static str {
        match self {
            Facing::Front => "front",
            Facing::Back => "back",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Seconds of invulnerability left
    pub invuln: f32,
    pub hp: i32,
    max_hp: i32,
    /// Feet position to respawn at
    start: (f32, f32),
}

impl Player {
    /// Spawn standing at feet position (x, y) with a `w` x `h` hitbox
    pub fn new(x: f32, y: f32, w: i32, h: i32, max_hp: i32) -> Self {
        Self {
            body: Body::new(x, y, w, h),
            facing: Facing::default(),
            invuln: 0.0,
            hp: max_hp,
            max_hp,
            start: (x, y),
        }
    }

    /// Back to the start with full health and no momentum
    pub fn respawn(&mut self) {
        let (x, y) = self.start;
        self.body.x = x;
        self.body.y = y;
        self.body.vx = 0.0;
        self.body.vy = 0.0;
        self.body.on_ground = false;
        self.facing = Facing::default();
        self.invuln = 0.0;
        self.hp = self.max_hp;
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn tick_invuln(&mut self, dt: f32) {
        if self.invuln > 0.0 {
            self.invuln = (self.invuln - dt).max(0.0);
        }
    }

    /// Steer, face, jump and fall for one frame
    ///
    /// Updates velocity only; the caller moves the body. Returns true if a
    /// jump started this frame.
    pub fn apply_input(&mut self, input: &InputFrame, dt: f32, m: &MovementSettings) -> bool {
        let body = &mut self.body;
        let move_dir = input.move_dir;

        let target_vx = move_dir as f32 * m.move_speed;
        if body.on_ground {
            body.vx = approach(body.vx, target_vx, m.accel_ground * dt);
            if move_dir == 0 {
                body.vx = approach(body.vx, 0.0, m.friction_ground * dt);
                if body.vx.abs() < m.stop_threshold {
                    body.vx = 0.0;
                }
            }
        } else {
            body.vx = approach(body.vx, target_vx, m.accel_air * dt);
        }

        if move_dir < 0 {
            self.facing = Facing::Left;
        } else if move_dir > 0 {
            self.facing = Facing::Right;
        } else if input.look_up && !input.look_down {
            self.facing = Facing::Back;
        } else if input.look_down && !input.look_up {
            self.facing = Facing::Front;
        }

        let jumped = input.jump && body.on_ground;
        if jumped {
            body.vy = m.jump_velocity;
            body.on_ground = false;
        }

        body.apply_gravity(m.gravity, m.max_fall_speed, dt);
        jumped
    }

    /// Take one point of damage with knockback, unless invulnerable
    ///
    /// Knockback pushes against the direction being held (backward when
    /// idle or moving right). Returns true if the hit landed.
    pub fn take_hit(&mut self, move_dir: i32, combat: &CombatSettings) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.hp -= 1;
        self.invuln = combat.invuln_time;
        self.body.vy = combat.knock_vy;
        self.body.vx = if move_dir >= 0 { -combat.knock_vx } else { combat.knock_vx };
        self.body.on_ground = false;
        true
    }
}
