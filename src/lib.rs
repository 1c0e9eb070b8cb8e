//! Turtle Invaders - a tick-driven arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, phase machine)
//! - `renderer`: Frame snapshots pushed to an external renderer
//! - `platform`: Clock and input abstractions
//! - `settings`: Data-driven configuration
//! - `sprites`: Opaque sprite tokens with fallbacks

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use settings::Settings;
pub use sprites::SpriteSet;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick interval (~60 Hz)
    pub const TICK_DT: f32 = 0.016;

    /// Playfield bounds, origin at screen center
    pub const BORDER_LEFT: f32 = -380.0;
    pub const BORDER_RIGHT: f32 = 380.0;
    pub const BORDER_TOP: f32 = 280.0;
    pub const BORDER_BOTTOM: f32 = -280.0;

    /// Player defaults
    pub const PLAYER_START_Y: f32 = BORDER_BOTTOM + 40.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Player x stays this far inside the side borders
    pub const PLAYER_EDGE_MARGIN: f32 = 15.0;
    /// Minimum seconds between accepted shots
    pub const FIRE_COOLDOWN_SECS: f64 = 0.18;
    pub const PLAYER_MUZZLE_OFFSET: f32 = 12.0;
    pub const PLAYER_BULLET_SPEED: f32 = 12.0;
    /// Enemy bullet closer than this to the player ends the run
    pub const PLAYER_HIT_RADIUS: f32 = 18.0;

    /// Enemy fleet
    pub const ENEMY_SPACING_X: f32 = 60.0;
    pub const ENEMY_SPACING_Y: f32 = 45.0;
    pub const ENEMY_START_Y: f32 = BORDER_TOP - 100.0;
    pub const ENEMY_DROP: f32 = 30.0;
    pub const ENEMY_DANGER_Y: f32 = BORDER_BOTTOM + 60.0;
    pub const ENEMY_ANIM_PERIOD: u64 = 16;
    pub const ENEMY_FIRE_INTERVAL: u64 = 28;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;
    pub const ENEMY_MUZZLE_OFFSET: f32 = 12.0;
    pub const ENEMY_HIT_RADIUS: f32 = 20.0;
    /// Fleet speed before the first level is configured
    pub const ENEMY_INITIAL_DX: f32 = 2.2;
    pub const FLEET_BASE_SPEED: f32 = 1.8;
    pub const FLEET_SPEED_PER_LEVEL: f32 = 0.6;
    pub const MAX_LEVEL: u32 = 3;

    /// Twin boss encounter
    pub const BOSS_HP: i32 = 15;
    pub const BOSS_SIZE: f32 = 3.5;
    pub const BOSS_SPEED: f32 = 3.0;
    pub const BOSS_START_X: f32 = 140.0;
    pub const BOSS_START_Y: f32 = BORDER_TOP - 120.0;
    /// Bosses turn around this far inside the side borders
    pub const BOSS_EDGE_MARGIN: f32 = 30.0;
    pub const BOSS_DROP: f32 = 20.0;
    pub const BOSS_DANGER_Y: f32 = BORDER_BOTTOM + 80.0;
    pub const BOSS_CONTACT_RADIUS: f32 = 35.0;
    pub const BOSS_HIT_RADIUS: f32 = 48.0;
    pub const BOSS_FIRE_INTERVAL: u64 = 10;
    pub const BOSS_SHOT_SPREAD: f32 = 14.0;
    pub const BOSS_MUZZLE_OFFSET: f32 = 28.0;
    pub const BOSS_BULLET_SPEED: f32 = 8.0;
}

/// Euclidean distance between two playfield points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
