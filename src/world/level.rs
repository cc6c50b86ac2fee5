//! Level state: the ground strip plus the platforms currently in play
//!
//! The level scrolls forever to the right. Content is generated up to a
//! horizon ahead of the camera and dropped once it falls far enough behind.

use crate::config::GameConfig;
use super::{EnemySpawn, LevelGenerator, Rect};

/// Hand-placed platforms near the start: (x, height above ground, width)
const STARTER_PLATFORMS: [(i32, i32, i32); 3] = [
    (160, 80, 260),
    (520, 150, 220),
    (830, 60, 180),
];

#[derive(Debug, Clone)]
pub struct Level {
    /// All solid platforms. Index 0 is always the ground.
    pub platforms: Vec<Rect>,
    /// Top edge of the ground
    pub ground_top: i32,
    /// Right edge of the furthest generated platform
    pub last_x: i32,
    spawn_ahead: i32,
    despawn_behind: i32,
    tile: i32,
}

impl Level {
    /// Ground plus the starter platforms
    pub fn initial(config: &GameConfig) -> Self {
        let g = &config.generation;
        let ground_top = config.ground_top();

        let mut platforms = vec![Rect::new(0, ground_top, g.initial_world_right, g.ground_rows * g.tile)];
        platforms.extend(
            STARTER_PLATFORMS
                .iter()
                .map(|&(x, rise, w)| Rect::new(x, ground_top - rise, w, g.platform_h)),
        );

        let last_x = platforms.iter().map(Rect::right).max().unwrap_or(0);

        Self {
            platforms,
            ground_top,
            last_x,
            spawn_ahead: g.spawn_ahead,
            despawn_behind: g.despawn_behind,
            tile: g.tile,
        }
    }

    pub fn ground(&self) -> &Rect {
        &self.platforms[0]
    }

    /// Is this rect part of the ground (for drawing)?
    pub fn is_ground(&self, rect: &Rect) -> bool {
        rect.y >= self.ground().top()
    }

    /// Roll enemies for the starter platforms
    pub fn starter_enemies(&self, gen: &mut LevelGenerator) -> Vec<EnemySpawn> {
        self.platforms[1..]
            .iter()
            .filter_map(|p| gen.maybe_spawn_enemy(p, self.ground_top))
            .collect()
    }

    /// Generate platforms until content reaches the spawn horizon
    ///
    /// Returns the enemies rolled for the new platforms. The ground is
    /// stretched to the horizon so it never runs out.
    pub fn ensure_content_ahead(&mut self, gen: &mut LevelGenerator, cam_x: f32) -> Vec<EnemySpawn> {
        let target_right = cam_x as i32 + self.spawn_ahead;
        let mut spawns = Vec::new();

        while self.last_x < target_right {
            let p = gen.spawn_next_platform(self.last_x, self.ground_top);
            self.platforms.push(p);
            self.last_x = self.last_x.max(p.right());

            if let Some(spawn) = gen.maybe_spawn_enemy(&p, self.ground_top) {
                spawns.push(spawn);
            }
        }

        let ground = &mut self.platforms[0];
        if ground.right() < target_right {
            ground.w = target_right - ground.x;
        }

        spawns
    }

    /// Left edge of the region still kept alive for a camera position
    pub fn despawn_cutoff(&self, cam_x: f32) -> f32 {
        cam_x - self.despawn_behind as f32
    }

    /// Drop platforms behind the cutoff and slide the ground's left edge forward
    pub fn despawn_behind(&mut self, cam_x: f32) {
        let cutoff = self.despawn_cutoff(cam_x);

        let ground = &mut self.platforms[0];
        if (ground.x as f32) < cutoff {
            let new_left = cutoff as i32;
            let right = ground.right();
            ground.w = (right - new_left).max(self.tile);
            ground.x = new_left;
        }

        let mut index = 0;
        self.platforms.retain(|p| {
            let keep = index == 0 || p.right() as f32 >= cutoff;
            index += 1;
            keep
        });
    }
}
