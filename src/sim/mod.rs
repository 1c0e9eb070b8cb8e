//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame, driven from outside
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{FleetStep, step_boss, step_fleet, within};
pub use spawn::{GridLayout, fleet_speed, level_layout};
pub use state::{
    Boss, Difficulty, EndReason, Enemy, GameEvent, GamePhase, GameState, Owner, Player, Projectile,
};
pub use tick::{TickInput, reset_to_menu, start_game, tick};
