//! Integer rectangle for level geometry
//!
//! Platforms, hitboxes and the camera deadzone all live on the integer
//! pixel grid. Overlap tests are strict, so rects that only share an edge
//! do not collide (a body standing on a platform touches it but does not
//! overlap it).

/// An axis-aligned rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center X (integer half, rounds toward the left edge)
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Move so the left edge sits at `left`, keeping the size
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`, keeping the size
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Move so the top edge sits at `top`, keeping the size
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move so the bottom edge sits at `bottom`, keeping the size
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Copy offset by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap test. Empty rects never collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Point test, half-open: left/top edges inside, right/bottom outside
    pub fn collidepoint(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
