//! Deadzone camera
//!
//! The camera holds still while the target stays inside a box centered in
//! the view, and scrolls just enough to keep it there once it leaves.

use crate::config::CameraSettings;
use crate::world::Rect;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World X of the view's left edge
    pub x: f32,
    /// World Y of the view's top edge
    pub y: f32,
    pub view_w: i32,
    pub view_h: i32,
    pub world_h: i32,
    /// Deadzone in screen space
    pub deadzone: Rect,
    pub vertical_follow: bool,
}

impl Camera {
    pub fn new(view_w: i32, view_h: i32, world_h: i32, settings: &CameraSettings) -> Self {
        let deadzone = Rect::new(
            (view_w - settings.deadzone_w) / 2,
            (view_h - settings.deadzone_h) / 2,
            settings.deadzone_w,
            settings.deadzone_h,
        );
        let mut camera = Self {
            x: 0.0,
            y: 0.0,
            view_w,
            view_h,
            world_h,
            deadzone,
            vertical_follow: settings.vertical_follow,
        };
        // Runs start on the ground
        camera.y = camera.max_y();
        camera
    }

    /// Scroll toward a target point given in world space
    pub fn update(&mut self, target_x: f32, target_y: f32) {
        let sx = target_x - self.x;
        let left = self.deadzone.left() as f32;
        let right = self.deadzone.right() as f32;
        if sx < left {
            self.x -= left - sx;
        } else if sx > right {
            self.x += sx - right;
        }
        self.x = self.x.max(0.0);

        if self.vertical_follow {
            let sy = target_y - self.y;
            let top = self.deadzone.top() as f32;
            let bottom = self.deadzone.bottom() as f32;
            if sy < top {
                self.y -= top - sy;
            } else if sy > bottom {
                self.y += sy - bottom;
            }
            self.y = self.y.clamp(0.0, self.max_y());
        } else {
            self.y = self.max_y();
        }
    }

    /// Lowest scroll position: view resting on the bottom of the world
    fn max_y(&self) -> f32 {
        (self.world_h - self.view_h).max(0) as f32
    }

    /// Top-left of a world rect in screen coordinates
    pub fn to_screen(&self, r: &Rect) -> (f32, f32) {
        (r.x as f32 - self.x, r.y as f32 - self.y)
    }

    /// Is any part of the rect inside the view horizontally?
    pub fn is_visible(&self, r: &Rect) -> bool {
        let (sx, _) = self.to_screen(r);
        sx + r.w as f32 >= 0.0 && sx <= self.view_w as f32
    }
}
