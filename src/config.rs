//! Game configuration
//!
//! All tunables live in one RON file (`assets/config.ron`). Every section is
//! `#[serde(default)]`, so a config file only needs the values it changes:
//!
//! ```ron
//! (
//!     seed: Some(42),
//!     movement: (jump_velocity: -820.0),
//!     enemy: (behavior: Walker),
//! )
//! ```

use serde::{Deserialize, Serialize};

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as the display allows
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// Which way the unflipped side sprite looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SideFacing {
    #[default]
    Left,
    Right,
}

/// How enemies move along their platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Kinematic back-and-forth between the platform edges
    #[default]
    Patrol,
    /// Gravity-driven walker that turns around at walls and edges
    Walker,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
    pub fps_limit: FpsLimit,
    /// Largest simulation step; slower frames run in slow motion instead of tunneling
    pub max_dt: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            fps_limit: FpsLimit::default(),
            max_dt: 1.0 / 30.0,
        }
    }
}

/// Player movement feel (pixels, seconds)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub move_speed: f32,
    pub accel_ground: f32,
    pub accel_air: f32,
    pub friction_ground: f32,
    pub gravity: f32,
    /// Negative is up
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    /// Ground speed below which an idle player snaps to a stop
    pub stop_threshold: f32,
    /// Spawn X (feet); the player starts standing on the ground
    pub start_x: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 260.0,
            accel_ground: 2600.0,
            accel_air: 1500.0,
            friction_ground: 4200.0,
            gravity: 2200.0,
            jump_velocity: -760.0,
            max_fall_speed: 1600.0,
            stop_threshold: 5.0,
            start_x: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub deadzone_w: i32,
    pub deadzone_h: i32,
    /// Follow the player vertically through a world taller than the view.
    /// When off, the view stays on the bottom of the world.
    pub vertical_follow: bool,
    /// World height in pixels; None uses the window height
    pub world_h: Option<i32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            deadzone_w: 240,
            deadzone_h: 140,
            vertical_follow: false,
            world_h: None,
        }
    }
}

/// Procedural level generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub tile: i32,
    pub ground_rows: i32,
    /// Right edge of the ground strip at the start of a run
    pub initial_world_right: i32,
    /// Keep platforms generated this far past the camera's left edge
    pub spawn_ahead: i32,
    /// Remove content this far behind the camera's left edge
    pub despawn_behind: i32,
    pub min_gap: i32,
    pub max_gap: i32,
    pub min_platform_w: i32,
    pub max_platform_w: i32,
    pub platform_h: i32,
    /// Range for a generated platform's top edge
    pub min_platform_y: i32,
    pub max_platform_y: i32,
    /// Probability that an eligible platform gets an enemy
    pub enemy_chance: f64,
    /// How far below the world bottom the player may fall before the run restarts
    pub fall_margin: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let tile = 48;
        Self {
            tile,
            ground_rows: 3,
            initial_world_right: 3000,
            spawn_ahead: 1400,
            despawn_behind: 500,
            min_gap: 170,
            max_gap: 380,
            min_platform_w: 3 * tile,
            max_platform_w: 8 * tile,
            platform_h: 18,
            min_platform_y: 180,
            max_platform_y: 540 - 160,
            enemy_chance: 0.6,
            fall_margin: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub width: i32,
    pub height: i32,
    pub speed: f32,
    pub behavior: EnemyBehavior,
    /// Spawn position is kept this far inside the platform edges
    pub spawn_inset: i32,
    /// Walkers turn around this close to a platform edge
    pub edge_margin: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            width: 28,
            height: 36,
            speed: 60.0,
            behavior: EnemyBehavior::default(),
            spawn_inset: 30,
            edge_margin: 8.0,
        }
    }
}

/// Stomping and taking damage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub max_hp: i32,
    pub stomp_bounce_vy: f32,
    /// Player must be falling faster than this for a contact to count as a stomp
    pub stomp_vy_threshold: f32,
    /// Max overlap between player feet and enemy top for a stomp
    pub stomp_depth: i32,
    pub knock_vx: f32,
    pub knock_vy: f32,
    pub invuln_time: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            max_hp: 3,
            stomp_bounce_vy: -520.0,
            stomp_vy_threshold: 120.0,
            stomp_depth: 14,
            knock_vx: 320.0,
            knock_vy: -420.0,
            invuln_time: 0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSettings {
    /// Directory holding front.png, back.png and side.png
    pub dir: String,
    pub target_height: u32,
    pub side_faces: SideFacing,
    /// Hitbox size as a fraction of the side sprite
    pub hitbox_w_ratio: f32,
    pub hitbox_h_ratio: f32,
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            dir: "assets/sprites/player".to_string(),
            target_height: 56,
            side_faces: SideFacing::default(),
            hitbox_w_ratio: 0.55,
            hitbox_h_ratio: 0.95,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible levels (None = seed from the clock)
    pub seed: Option<u64>,
    pub window: WindowSettings,
    pub movement: MovementSettings,
    pub camera: CameraSettings,
    pub generation: GenerationSettings,
    pub enemy: EnemySettings,
    pub combat: CombatSettings,
    pub sprites: SpriteSettings,
}

impl GameConfig {
    /// Parse and validate a RON config
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Height of the playable world (at least the window height)
    pub fn world_h(&self) -> i32 {
        self.camera.world_h.unwrap_or(self.window.height)
    }

    /// Top edge of the ground strip, at the bottom of the world
    pub fn ground_top(&self) -> i32 {
        self.world_h() - self.generation.ground_rows * self.generation.tile
    }

    /// Generation settings with platform heights moved down to sit above
    /// the ground of a world taller than the window
    pub fn level_generation(&self) -> GenerationSettings {
        let shift = self.world_h() - self.window.height;
        let mut g = self.generation;
        g.min_platform_y += shift;
        g.max_platform_y += shift;
        g
    }

    /// Reject values that would hang generation or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::ValidationError(msg));
        let w = &self.window;
        let g = &self.generation;

        if w.width <= 0 || w.height <= 0 {
            return fail(format!("window size must be positive ({}x{})", w.width, w.height));
        }
        if self.world_h() < w.height {
            return fail(format!("world_h {} is shorter than the window ({})", self.world_h(), w.height));
        }
        if !(w.max_dt > 0.0) {
            return fail(format!("max_dt must be positive ({})", w.max_dt));
        }
        if g.tile <= 0 || g.ground_rows <= 0 || g.platform_h <= 0 {
            return fail("tile, ground_rows and platform_h must be positive".to_string());
        }
        if self.ground_top() <= 0 {
            return fail(format!("ground ({} rows of {}) does not fit in the window", g.ground_rows, g.tile));
        }
        // A zero-width step would never advance the spawn frontier
        if g.min_gap < 0 || g.min_gap > g.max_gap {
            return fail(format!("invalid platform gap range {}..={}", g.min_gap, g.max_gap));
        }
        if g.min_platform_w <= 0 || g.min_platform_w > g.max_platform_w {
            return fail(format!("invalid platform width range {}..={}", g.min_platform_w, g.max_platform_w));
        }
        if g.min_platform_y > g.max_platform_y {
            return fail(format!("invalid platform y range {}..={}", g.min_platform_y, g.max_platform_y));
        }
        if !(0.0..=1.0).contains(&g.enemy_chance) {
            return fail(format!("enemy_chance must be within 0..=1 ({})", g.enemy_chance));
        }
        if self.camera.deadzone_w <= 0 || self.camera.deadzone_w > w.width
            || self.camera.deadzone_h <= 0 || self.camera.deadzone_h > w.height
        {
            return fail("camera deadzone must fit inside the window".to_string());
        }
        if self.enemy.width <= 0 || self.enemy.height <= 0 {
            return fail("enemy size must be positive".to_string());
        }
        if self.combat.max_hp <= 0 {
            return fail(format!("max_hp must be positive ({})", self.combat.max_hp));
        }
        if self.sprites.target_height == 0 {
            return fail("sprite target_height must be positive".to_string());
        }
        Ok(())
    }
}
