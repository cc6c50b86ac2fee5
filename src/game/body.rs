//! Platformer physics
//!
//! Bodies are feet-anchored boxes: `(x, y)` is the bottom-center point.
//! Movement is resolved one axis at a time against every platform, on the
//! integer pixel grid.

use crate::world::Rect;

/// A moving box that collides with platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Feet X (horizontal center)
    pub x: f32,
    /// Feet Y (bottom edge)
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub w: i32,
    pub h: i32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            w,
            h,
            on_ground: false,
        }
    }

    /// Hitbox in world space
    ///
    /// Uses the same integer half-width as `Rect::center_x`, so
    /// `rect().center_x()` gives back `x` for whole-pixel positions.
    pub fn rect(&self) -> Rect {
        let left = self.x.floor() as i32 - self.w / 2;
        let top = self.y.floor() as i32 - self.h;
        Rect::new(left, top, self.w, self.h)
    }

    /// Add gravity to vertical velocity, capped at terminal speed
    pub fn apply_gravity(&mut self, gravity: f32, max_fall_speed: f32, dt: f32) {
        self.vy = (self.vy + gravity * dt).min(max_fall_speed);
    }
}

/// Move `current` toward `target` by at most `max_delta`, without overshooting
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// Move a body by (dx, dy) pixels and push it out of any platform it enters
///
/// Horizontal first, then vertical. Hitting anything horizontally zeroes
/// `vx`; landing or bumping a ceiling zeroes `vy`. `on_ground` is set only
/// when a downward move was stopped by a platform.
pub fn move_and_collide(body: &mut Body, platforms: &[Rect], dx: f32, dy: f32) {
    let mut r = body.rect();

    // Horizontal
    r.x += dx.round_ties_even() as i32;
    for p in platforms {
        if r.colliderect(p) {
            if dx > 0.0 {
                r.set_right(p.left());
            } else if dx < 0.0 {
                r.set_left(p.right());
            }
            body.vx = 0.0;
        }
    }

    // Vertical
    let step = dy.round_ties_even() as i32;
    r.y += step;
    let mut landed = false;
    for p in platforms {
        if r.colliderect(p) {
            if dy > 0.0 {
                r.set_bottom(p.top());
                body.vy = 0.0;
                landed = true;
            } else if dy < 0.0 {
                r.set_top(p.bottom());
                body.vy = 0.0;
            }
        }
    }

    // A sub-pixel fall still counts as standing when the floor is right below
    if !landed && step == 0 && dy > 0.0 {
        let below = r.translate(0, 1);
        if platforms.iter().any(|p| below.colliderect(p)) {
            body.vy = 0.0;
            landed = true;
        }
    }

    body.x = r.center_x() as f32;
    body.y = r.bottom() as f32;
    body.on_ground = landed;
}
