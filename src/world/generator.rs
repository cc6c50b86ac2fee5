//! Procedural platform and enemy placement
//!
//! All randomness for a run flows through one seeded RNG, so a fixed seed
//! reproduces the same level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::{EnemySettings, GenerationSettings};
use super::Rect;

/// Request to place an enemy on a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    /// Platform the enemy patrols
    pub platform: Rect,
    /// Initial feet X
    pub x: i32,
    /// Initial walking direction (-1 or 1)
    pub direction: i32,
}

pub struct LevelGenerator {
    rng: StdRng,
    settings: GenerationSettings,
    enemy_inset: i32,
}

impl LevelGenerator {
    pub fn new(seed: u64, settings: GenerationSettings, enemy: &EnemySettings) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            settings,
            enemy_inset: enemy.spawn_inset,
        }
    }

    /// Next platform after `last_x`, always above the ground
    pub fn spawn_next_platform(&mut self, last_x: i32, ground_top: i32) -> Rect {
        let s = &self.settings;
        let gap = self.rng.gen_range(s.min_gap..=s.max_gap);
        let w = self.rng.gen_range(s.min_platform_w..=s.max_platform_w);
        let y = self.rng.gen_range(s.min_platform_y..=s.max_platform_y);

        let y = y.min(ground_top - 30);
        Rect::new(last_x + gap, y, w, s.platform_h)
    }

    /// Roll for an enemy on a platform
    ///
    /// Ground-level and narrow platforms never get one.
    pub fn maybe_spawn_enemy(&mut self, platform: &Rect, ground_top: i32) -> Option<EnemySpawn> {
        if platform.y >= ground_top - 2 {
            return None;
        }
        if platform.w < 4 * self.settings.tile {
            return None;
        }
        if self.rng.gen::<f64>() > self.settings.enemy_chance {
            return None;
        }

        let lo = platform.left() + self.enemy_inset;
        let hi = platform.right() - self.enemy_inset;
        let x = if lo <= hi { self.rng.gen_range(lo..=hi) } else { platform.center_x() };
        let direction = if self.rng.gen_bool(0.5) { 1 } else { -1 };

        Some(EnemySpawn { platform: *platform, x, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> LevelGenerator {
        LevelGenerator::new(seed, GenerationSettings::default(), &EnemySettings::default())
    }

    #[test]
    fn test_platforms_stay_in_range() {
        let mut gen = generator(1);
        let s = GenerationSettings::default();
        let ground_top = 396;
        for _ in 0..500 {
            let p = gen.spawn_next_platform(1000, ground_top);
            let gap = p.x - 1000;
            assert!((s.min_gap..=s.max_gap).contains(&gap));
            assert!((s.min_platform_w..=s.max_platform_w).contains(&p.w));
            assert!(p.y >= s.min_platform_y);
            assert!(p.y <= ground_top - 30);
            assert_eq!(p.h, s.platform_h);
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let mut a = generator(99);
        let mut b = generator(99);
        for i in 0..20 {
            assert_eq!(a.spawn_next_platform(i * 100, 396), b.spawn_next_platform(i * 100, 396));
        }
    }

    #[test]
    fn test_no_enemy_on_ground_or_narrow_platform() {
        let mut gen = generator(3);
        let ground = Rect::new(0, 396, 3000, 144);
        let narrow = Rect::new(0, 200, 4 * 48 - 1, 18);
        for _ in 0..100 {
            assert!(gen.maybe_spawn_enemy(&ground, 396).is_none());
            assert!(gen.maybe_spawn_enemy(&narrow, 396).is_none());
        }
    }

    #[test]
    fn test_enemy_spawn_rate_and_placement() {
        let mut gen = generator(5);
        let platform = Rect::new(500, 250, 300, 18);
        let mut spawned = 0;
        for _ in 0..1000 {
            if let Some(spawn) = gen.maybe_spawn_enemy(&platform, 396) {
                spawned += 1;
                assert!(spawn.x >= 530 && spawn.x <= 770);
                assert!(spawn.direction == 1 || spawn.direction == -1);
                assert_eq!(spawn.platform, platform);
            }
        }
        // 60% chance with generous slack
        assert!((500..700).contains(&spawned), "spawned {}", spawned);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut settings = GenerationSettings::default();
        settings.enemy_chance = 0.0;
        let mut gen = LevelGenerator::new(1, settings, &EnemySettings::default());
        let platform = Rect::new(0, 200, 300, 18);
        for _ in 0..100 {
            assert!(gen.maybe_spawn_enemy(&platform, 396).is_none());
        }
    }
}
