//! Game runtime
//!
//! Owns everything in a run and advances it in fixed 1/60 s steps, whatever
//! the display rate. Nothing here touches the window, so whole runs can be
//! simulated in tests.

use crate::config::GameConfig;
use crate::input::InputFrame;
use crate::world::{EnemySpawn, Level, LevelGenerator};
use super::body::move_and_collide;
use super::camera::Camera;
use super::combat::check_player_enemy;
use super::enemy::Enemy;
use super::event::{EventQueue, GameEvent, RestartReason};
use super::player::Player;

/// Length of one simulation step (s)
pub const STEP: f32 = 1.0 / 60.0;

pub struct GameState {
    pub config: GameConfig,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    pub events: EventQueue<GameEvent>,
    generator: LevelGenerator,
    base_seed: u64,
    /// Number of runs started so far; each run gets its own seed
    runs: u64,
    /// Frame time not yet simulated
    accumulator: f32,
    /// Edge inputs seen on frames too short to run a step
    pending_jump: bool,
    pending_restart: bool,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64, hitbox: (i32, i32)) -> Self {
        let (level, generator, enemies, camera) = Self::build_run(&config, seed);
        let (w, h) = hitbox;
        let player = Player::new(
            config.movement.start_x,
            level.ground_top as f32,
            w,
            h,
            config.combat.max_hp,
        );
        Self {
            config,
            level,
            player,
            enemies,
            camera,
            events: EventQueue::new(),
            generator,
            base_seed: seed,
            runs: 1,
            accumulator: 0.0,
            pending_jump: false,
            pending_restart: false,
        }
    }

    fn build_run(config: &GameConfig, seed: u64) -> (Level, LevelGenerator, Vec<Enemy>, Camera) {
        let mut generator = LevelGenerator::new(seed, config.level_generation(), &config.enemy);
        let level = Level::initial(config);
        let enemies = spawn_enemies(&level.starter_enemies(&mut generator), config);

        let camera = Camera::new(config.window.width, config.window.height, config.world_h(), &config.camera);

        (level, generator, enemies, camera)
    }

    /// Seed of the run in progress
    pub fn seed(&self) -> u64 {
        self.base_seed.wrapping_add(self.runs - 1)
    }

    /// Throw away the current run and start a fresh level
    pub fn restart(&mut self, reason: RestartReason) {
        let distance = self.player.body.x;
        let seed = self.base_seed.wrapping_add(self.runs);
        let (level, generator, enemies, camera) = Self::build_run(&self.config, seed);
        self.level = level;
        self.generator = generator;
        self.player.respawn();
        self.enemies = enemies;
        self.camera = camera;
        self.runs += 1;
        self.events.send(GameEvent::Restarted { reason, distance });
    }

    /// Feed one display frame of `frame_dt` seconds
    ///
    /// Runs as many fixed steps as the accumulated time allows, so movement
    /// on the pixel grid is the same at any frame rate. Jump and restart
    /// presses are held until the next step consumes them.
    pub fn advance(&mut self, frame_dt: f32, input: &InputFrame) {
        self.accumulator += frame_dt.clamp(0.0, self.config.window.max_dt);
        self.pending_jump |= input.jump;
        self.pending_restart |= input.restart;

        while self.accumulator >= STEP {
            self.accumulator -= STEP;
            let step_input = InputFrame {
                jump: self.pending_jump,
                restart: self.pending_restart,
                ..*input
            };
            self.pending_jump = false;
            self.pending_restart = false;
            self.update(STEP, &step_input);
        }
    }

    /// Advance one simulation step
    pub fn update(&mut self, dt: f32, input: &InputFrame) {
        let dt = dt.clamp(0.0, self.config.window.max_dt);

        if input.restart {
            self.restart(RestartReason::Requested);
            return;
        }

        let movement = self.config.movement;
        let combat = self.config.combat;

        self.player.tick_invuln(dt);
        if self.player.apply_input(input, dt, &movement) {
            self.events.send(GameEvent::Jumped { x: self.player.body.x });
        }

        let dx = self.player.body.vx * dt;
        let dy = self.player.body.vy * dt;
        move_and_collide(&mut self.player.body, &self.level.platforms, dx, dy);

        for enemy in &mut self.enemies {
            enemy.update(&self.level.platforms, dt, &movement);
        }

        let contact = check_player_enemy(&mut self.player, &mut self.enemies, &combat);
        if contact.stomped > 0 {
            self.events.send(GameEvent::Stomped { count: contact.stomped });
        }
        if contact.damaged && self.player.take_hit(input.move_dir, &combat) {
            self.events.send(GameEvent::Damaged { hp_left: self.player.hp });
            if self.player.is_dead() {
                self.restart(RestartReason::Died);
                return;
            }
        }

        let fall_limit = self.config.world_h() as f32 + self.config.generation.fall_margin;
        if self.player.body.y > fall_limit {
            self.restart(RestartReason::Fell);
            return;
        }

        self.camera.update(self.player.body.x, self.player.body.y);

        let spawns = self.level.ensure_content_ahead(&mut self.generator, self.camera.x);
        self.enemies.extend(spawn_enemies(&spawns, &self.config));

        self.level.despawn_behind(self.camera.x);
        let cutoff = self.level.despawn_cutoff(self.camera.x);
        self.enemies.retain(|e| e.alive && e.rect().right() as f32 >= cutoff);
    }

    /// Debug status line
    pub fn hud_line(&self) -> String {
        let body = &self.player.body;
        format!(
            "x={} cam={} platforms={} enemies={} hp={} vx={:.0} vy={:.0} facing={}",
            body.x as i32,
            self.camera.x as i32,
            self.level.platforms.len(),
            self.enemies.len(),
            self.player.hp,
            body.vx,
            body.vy,
            self.player.facing.label(),
        )
    }
}

fn spawn_enemies(spawns: &[EnemySpawn], config: &GameConfig) -> Vec<Enemy> {
    spawns.iter().map(|s| Enemy::new(s, &config.enemy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyBehavior;
    use crate::world::Rect;

    const DT: f32 = 1.0 / 60.0;
    const HITBOX: (i32, i32) = (16, 53);

    fn game(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), seed, HITBOX)
    }

    fn run(game: &mut GameState, frames: usize, input: InputFrame) {
        for _ in 0..frames {
            game.update(DT, &input);
        }
    }

    fn right() -> InputFrame {
        InputFrame { move_dir: 1, ..Default::default() }
    }

    /// Clear enemies so long runs are not interrupted by hits
    fn peaceful(seed: u64) -> GameState {
        let mut config = GameConfig::default();
        config.generation.enemy_chance = 0.0;
        GameState::new(config, seed, HITBOX)
    }

    fn tall_world(vertical_follow: bool) -> GameState {
        let mut config = GameConfig::default();
        config.generation.enemy_chance = 0.0;
        config.camera.vertical_follow = vertical_follow;
        config.camera.world_h = Some(1080);
        let mut g = GameState::new(config, 1, HITBOX);
        g.enemies.clear();
        g
    }

    #[test]
    fn test_vertical_follow_in_tall_world() {
        let mut g = tall_world(true);
        assert_eq!(g.level.ground_top, 936);
        run(&mut g, 10, InputFrame::default());
        // Standing on the ground, the view rests on the bottom of the world
        assert_eq!(g.camera.y, 540.0);
        assert_eq!(g.player.body.y, 936.0);

        // A high ledge pulls the camera up until the feet reach the deadzone top
        g.level.platforms.push(Rect::new(60, 500, 200, 18));
        g.player.body.y = 500.0;
        g.update(DT, &InputFrame::default());
        assert_eq!(g.player.body.y, 500.0);
        assert_eq!(g.camera.y, 300.0);
        assert_eq!(g.player.body.y - g.camera.y, 200.0);
    }

    #[test]
    fn test_tall_world_without_follow_keeps_bottom_view() {
        let mut g = tall_world(false);
        g.level.platforms.push(Rect::new(60, 500, 200, 18));
        g.player.body.y = 500.0;
        g.update(DT, &InputFrame::default());
        assert_eq!(g.camera.y, 540.0);
    }

    #[test]
    fn test_tall_world_generates_reachable_platforms() {
        let mut g = tall_world(true);
        g.camera.x = 4000.0;
        g.player.body.x = 4400.0;
        g.update(DT, &InputFrame::default());
        let ahead: Vec<_> = g.level.platforms[1..].iter().filter(|p| p.x > 3000).collect();
        assert!(!ahead.is_empty());
        for p in ahead {
            assert!((720..=920).contains(&p.y), "{:?}", p);
        }
    }

    #[test]
    fn test_player_settles_on_ground() {
        let mut g = game(1);
        g.enemies.clear();
        run(&mut g, 30, InputFrame::default());
        assert!(g.player.body.on_ground);
        assert_eq!(g.player.body.y, g.level.ground_top as f32);
        assert_eq!(g.player.body.x, 120.0);
        assert_eq!(g.camera.x, 0.0);
    }

    #[test]
    fn test_jump_and_land() {
        let mut g = game(1);
        g.enemies.clear();
        run(&mut g, 5, InputFrame::default());

        g.update(DT, &InputFrame { jump: true, ..Default::default() });
        assert!(!g.player.body.on_ground);
        assert!(g.events.drain().any(|e| matches!(e, GameEvent::Jumped { .. })));

        let ground = g.level.ground_top as f32;
        let mut peak = ground;
        for _ in 0..120 {
            g.update(DT, &InputFrame::default());
            peak = peak.min(g.player.body.y);
        }
        assert!(ground - peak > 100.0, "jump height {}", ground - peak);
        assert!(g.player.body.on_ground);
        assert_eq!(g.player.body.y, ground);
    }

    #[test]
    fn test_running_scrolls_camera_and_generates() {
        let mut g = peaceful(4);
        // Starter platforms sit in the way; keep hopping while running right
        for frame in 0..60 * 40 {
            let input = InputFrame { move_dir: 1, jump: frame % 20 == 0, ..Default::default() };
            g.update(DT, &input);
        }
        assert!(g.camera.x > 1000.0, "camera at {}", g.camera.x);
        // Player stays inside the deadzone once the camera is moving
        let sx = g.player.body.x - g.camera.x;
        assert!(sx <= 600.0 + 1.0);
        assert!(g.level.last_x as f32 >= g.camera.x + 1399.0);
        assert!(g.level.ground().right() as f32 >= g.camera.x + 1399.0);
        assert!(g.level.ground().x as f32 >= g.camera.x - 501.0);
    }

    #[test]
    fn test_player_blocked_by_platform_side() {
        let mut g = game(1);
        g.enemies.clear();
        g.level.platforms.push(Rect::new(200, g.level.ground_top - 100, 40, 100));
        run(&mut g, 120, right());
        assert!(g.player.rect().right() <= 200);
    }

    #[test]
    fn test_stomp_kills_enemy() {
        let mut g = game(2);
        let platform = Rect::new(300, 300, 300, 18);
        g.level.platforms.push(platform);
        g.enemies = spawn_enemies(&[EnemySpawn { platform, x: 450, direction: 1 }], &g.config);

        // Drop the player onto the enemy from above
        g.player.body.x = 450.0;
        g.player.body.y = 240.0;
        g.player.body.vy = 300.0;
        g.player.body.on_ground = false;
        let mut stomped = false;
        for _ in 0..20 {
            g.update(DT, &InputFrame::default());
            stomped |= g.events.drain().any(|e| matches!(e, GameEvent::Stomped { count: 1 }));
        }
        assert!(stomped);
        assert!(g.enemies.is_empty());
        assert_eq!(g.player.hp, 3);
    }

    #[test]
    fn test_walking_into_enemy_hurts() {
        let mut g = game(2);
        let gt = g.level.ground_top;
        let ground = *g.level.ground();
        g.enemies = spawn_enemies(&[EnemySpawn { platform: ground, x: 160, direction: -1 }], &g.config);
        assert_eq!(g.enemies[0].rect().bottom(), gt);

        let mut hits = 0;
        for _ in 0..30 {
            g.update(DT, &right());
            hits += g.events.drain().filter(|e| matches!(e, GameEvent::Damaged { .. })).count();
        }
        assert_eq!(hits, 1);
        assert_eq!(g.player.hp, 2);
        assert!(g.player.is_invulnerable());
    }

    #[test]
    fn test_death_restarts_run() {
        let mut g = game(3);
        let seed = g.seed();
        g.player.hp = 1;
        let ground = *g.level.ground();
        g.enemies = spawn_enemies(&[EnemySpawn { platform: ground, x: 125, direction: 1 }], &g.config);
        g.camera.x = 50.0;

        g.update(DT, &InputFrame::default());
        let events: Vec<_> = g.events.drain().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Restarted { reason: RestartReason::Died, .. }
        )));
        assert_eq!(g.player.hp, 3);
        assert_eq!(g.player.body.x, 120.0);
        assert_eq!(g.camera.x, 0.0);
        assert_eq!(g.level.platforms.len(), 4);
        assert_ne!(g.seed(), seed);
    }

    #[test]
    fn test_fall_out_of_world_restarts() {
        let mut g = game(3);
        g.level.platforms.truncate(1);
        g.level.platforms[0] = Rect::new(5000, 396, 10, 10);
        run(&mut g, 120, InputFrame::default());
        assert!(g.events.drain().any(|e| matches!(
            e,
            GameEvent::Restarted { reason: RestartReason::Fell, .. }
        )));
        assert!(g.player.body.y <= g.level.ground_top as f32);
    }

    #[test]
    fn test_restart_request() {
        let mut g = game(9);
        run(&mut g, 10, right());
        g.update(DT, &InputFrame { restart: true, ..Default::default() });
        assert_eq!(g.player.body.x, 120.0);
        assert_eq!(g.player.body.vx, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = peaceful(77);
        let mut b = peaceful(77);
        for frame in 0..600 {
            let input = InputFrame { move_dir: 1, jump: frame % 25 == 0, ..Default::default() };
            a.update(DT, &input);
            b.update(DT, &input);
        }
        assert_eq!(a.level.platforms, b.level.platforms);
        assert_eq!(a.player.body, b.player.body);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut g = game(1);
        g.enemies.clear();
        run(&mut g, 5, InputFrame::default());
        g.update(1.0, &right());
        // One clamped step of ground acceleration, not a full second of it
        assert!((g.player.body.vx - 2600.0 / 30.0).abs() < 1.0);
    }

    #[test]
    fn test_hud_line() {
        let g = game(1);
        let hud = g.hud_line();
        assert!(hud.starts_with("x=120 cam=0 platforms=4 enemies="));
        assert!(hud.ends_with("hp=3 vx=0 vy=0 facing=front"));
    }

    #[test]
    fn test_despawn_drops_enemies_behind_cutoff() {
        let mut g = peaceful(6);
        g.enemies.clear();
        let behind = Rect::new(100, 300, 300, 18);
        let ahead = Rect::new(1600, 300, 300, 18);
        g.enemies = spawn_enemies(
            &[
                EnemySpawn { platform: behind, x: 250, direction: 1 },
                EnemySpawn { platform: ahead, x: 1750, direction: 1 },
            ],
            &g.config,
        );
        g.camera.x = 2000.0;
        g.player.body.x = 2400.0;
        g.player.body.on_ground = true;

        g.update(DT, &InputFrame::default());
        // Cutoff is 2000 - 500
        assert_eq!(g.level.despawn_cutoff(g.camera.x), 1500.0);
        assert_eq!(g.enemies.len(), 1);
        assert_eq!(g.enemies[0].platform, ahead);
        assert!(g.enemies[0].alive);
    }

    #[test]
    fn test_walker_moves_at_high_frame_rate() {
        let mut config = GameConfig::default();
        config.generation.enemy_chance = 0.0;
        config.enemy.behavior = EnemyBehavior::Walker;
        let mut g = GameState::new(config, 2, HITBOX);
        let platform = Rect::new(500, 250, 300, 18);
        g.level.platforms.push(platform);
        g.enemies = spawn_enemies(&[EnemySpawn { platform, x: 650, direction: 1 }], &g.config);

        for _ in 0..144 {
            g.advance(1.0 / 144.0, &InputFrame::default());
        }
        let moved = g.enemies[0].body.x - 650.0;
        assert!(moved >= 55.0, "walker moved {}", moved);
    }

    #[test]
    fn test_player_speed_independent_of_frame_rate() {
        let mut fast = peaceful(8);
        let mut slow = peaceful(8);
        fast.enemies.clear();
        slow.enemies.clear();

        for _ in 0..144 {
            fast.advance(1.0 / 144.0, &right());
        }
        for _ in 0..30 {
            slow.advance(1.0 / 30.0, &right());
        }
        let (xf, xs) = (fast.player.body.x, slow.player.body.x);
        assert!(xf - 120.0 > 150.0, "moved {}", xf - 120.0);
        assert!((xf - xs).abs() <= 5.0, "144 fps x={} vs 30 fps x={}", xf, xs);
    }

    #[test]
    fn test_short_frame_keeps_jump_press() {
        let mut g = game(1);
        g.enemies.clear();
        run(&mut g, 5, InputFrame::default());

        // Too short to run a step; the press waits for the next one
        g.advance(0.001, &InputFrame { jump: true, ..Default::default() });
        assert!(g.player.body.on_ground);
        g.advance(DT, &InputFrame::default());
        assert!(g.events.drain().any(|e| matches!(e, GameEvent::Jumped { .. })));
        assert!(!g.player.body.on_ground);
    }
}
