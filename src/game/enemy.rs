//! Platform enemies
//!
//! Every enemy belongs to the platform it spawned on and never leaves it.

use crate::config::{EnemyBehavior, EnemySettings, MovementSettings};
use crate::world::{EnemySpawn, Rect};
use super::body::{move_and_collide, Body};

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    /// The platform this enemy walks on
    pub platform: Rect,
    pub alive: bool,
    pub behavior: EnemyBehavior,
    speed: f32,
    edge_margin: f32,
}

impl Enemy {
    pub fn new(spawn: &EnemySpawn, settings: &EnemySettings) -> Self {
        let mut body = Body::new(
            spawn.x as f32,
            spawn.platform.top() as f32,
            settings.width,
            settings.height,
        );
        body.vx = settings.speed * spawn.direction as f32;

        Self {
            body,
            platform: spawn.platform,
            alive: true,
            behavior: settings.behavior,
            speed: settings.speed,
            edge_margin: settings.edge_margin,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn update(&mut self, platforms: &[Rect], dt: f32, movement: &MovementSettings) {
        if !self.alive {
            return;
        }
        match self.behavior {
            EnemyBehavior::Patrol => self.update_patrol(dt),
            EnemyBehavior::Walker => self.update_walker(platforms, dt, movement),
        }
    }

    /// Slide between the platform edges, bouncing off each end
    fn update_patrol(&mut self, dt: f32) {
        let body = &mut self.body;
        body.x += body.vx * dt;

        let half_w = body.w as f32 / 2.0;
        let left_bound = self.platform.left() as f32 + half_w;
        let right_bound = self.platform.right() as f32 - half_w;
        if body.x < left_bound {
            body.x = left_bound;
            body.vx = -body.vx;
        } else if body.x > right_bound {
            body.x = right_bound;
            body.vx = -body.vx;
        }
        body.y = self.platform.top() as f32;
    }

    /// Physics-driven walk that turns around when blocked or near an edge
    fn update_walker(&mut self, platforms: &[Rect], dt: f32, movement: &MovementSettings) {
        let mut dir = if self.body.vx >= 0.0 { 1.0 } else { -1.0 };
        self.body.apply_gravity(movement.gravity, movement.max_fall_speed, dt);

        let dx = self.body.vx * dt;
        let dy = self.body.vy * dt;
        let prev_x = self.body.x;
        move_and_collide(&mut self.body, platforms, dx, dy);

        let moved_x = self.body.x - prev_x;
        let feet_x = self.body.x.floor() as i32;
        let off_platform = !self.platform.collidepoint(feet_x, self.platform.top());
        let at_edge = self.body.x < self.platform.left() as f32 + self.edge_margin
            || self.body.x > self.platform.right() as f32 - self.edge_margin;

        if moved_x.abs() < dx.abs() * 0.5 || off_platform || at_edge {
            dir = -dir;
        }

        self.body.vx = self.speed * dir;
        self.body.y = self.platform.top() as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const PLATFORM: Rect = Rect::new(500, 250, 300, 18);

    fn spawn(x: i32, direction: i32) -> EnemySpawn {
        EnemySpawn { platform: PLATFORM, x, direction }
    }

    fn walker_settings() -> EnemySettings {
        EnemySettings { behavior: EnemyBehavior::Walker, ..Default::default() }
    }

    #[test]
    fn test_enemy_stands_on_platform() {
        let enemy = Enemy::new(&spawn(600, 1), &EnemySettings::default());
        let r = enemy.rect();
        assert_eq!(r.bottom(), PLATFORM.top());
        assert_eq!(r.center_x(), 600);
        assert_eq!(enemy.body.vx, 60.0);
    }

    #[test]
    fn test_patrol_bounces_at_edges() {
        let settings = EnemySettings::default();
        let movement = MovementSettings::default();
        let mut enemy = Enemy::new(&spawn(780, 1), &settings);

        for _ in 0..30 {
            enemy.update(&[PLATFORM], DT, &movement);
        }
        assert!(enemy.body.vx < 0.0);
        assert!(enemy.body.x <= 800.0 - 14.0);

        for _ in 0..600 {
            enemy.update(&[PLATFORM], DT, &movement);
            let r = enemy.rect();
            assert!(r.left() >= PLATFORM.left() && r.right() <= PLATFORM.right());
            assert_eq!(r.bottom(), PLATFORM.top());
        }
    }

    #[test]
    fn test_dead_enemy_does_not_move() {
        let movement = MovementSettings::default();
        let mut enemy = Enemy::new(&spawn(600, 1), &EnemySettings::default());
        enemy.alive = false;
        enemy.update(&[PLATFORM], DT, &movement);
        assert_eq!(enemy.body.x, 600.0);
    }

    #[test]
    fn test_walker_stays_on_platform() {
        let movement = MovementSettings::default();
        let mut enemy = Enemy::new(&spawn(650, -1), &walker_settings());

        let mut turned = false;
        for _ in 0..1200 {
            enemy.update(&[PLATFORM], DT, &movement);
            assert!(enemy.body.x >= PLATFORM.left() as f32);
            assert!(enemy.body.x <= PLATFORM.right() as f32);
            assert_eq!(enemy.body.y, PLATFORM.top() as f32);
            turned |= enemy.body.vx > 0.0;
        }
        assert!(turned);
    }

    #[test]
    fn test_walker_makes_progress() {
        let movement = MovementSettings::default();
        let mut enemy = Enemy::new(&spawn(650, 1), &walker_settings());
        for _ in 0..30 {
            enemy.update(&[PLATFORM], DT, &movement);
        }
        assert!(enemy.body.x > 660.0);
    }

    #[test]
    fn test_walker_turns_at_wall() {
        let movement = MovementSettings::default();
        let wall = Rect::new(700, 150, 20, 100);
        let mut enemy = Enemy::new(&spawn(680, 1), &walker_settings());
        for _ in 0..60 {
            enemy.update(&[PLATFORM, wall], DT, &movement);
        }
        assert!(enemy.rect().right() <= wall.left());
        assert!(enemy.body.x < 690.0);
    }
}
