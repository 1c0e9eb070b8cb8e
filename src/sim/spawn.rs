//! Spawning and clearing of entities
//!
//! Levels are fixed grids centred on the playfield; the finale is a pair of
//! bosses moving in opposite directions.

use glam::Vec2;

use super::state::{Boss, Enemy, GameEvent, GameState, Owner, Player, Projectile};
use crate::consts::*;

/// Rows and columns of the enemy grid for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

/// Grid size for `level`; levels past the last reuse the last layout
pub fn level_layout(level: u32) -> GridLayout {
    match level {
        0 | 1 => GridLayout { rows: 3, cols: 7 },
        2 => GridLayout { rows: 4, cols: 8 },
        _ => GridLayout { rows: 5, cols: 9 },
    }
}

/// Horizontal fleet speed for `level` at the given difficulty multiplier
pub fn fleet_speed(level: u32, diff_mult: f32) -> f32 {
    let base = FLEET_BASE_SPEED + level.saturating_sub(1) as f32 * FLEET_SPEED_PER_LEVEL;
    base * diff_mult
}

/// Top-left enemy position for a grid with `cols` columns
pub fn grid_origin(cols: u32) -> Vec2 {
    let total_width = cols.saturating_sub(1) as f32 * ENEMY_SPACING_X;
    Vec2::new(-total_width / 2.0, ENEMY_START_Y)
}

/// Place a fresh player ship, dropping any leftover player shots
pub fn spawn_player(state: &mut GameState) {
    clear_projectiles(state);
    state.player = Some(Player::new(Vec2::new(0.0, PLAYER_START_Y)));
}

/// Replace the fleet with the grid for `level` and set the fleet speed
pub fn spawn_level(state: &mut GameState, level: u32) {
    clear_enemies(state);
    clear_projectiles(state);

    let layout = level_layout(level);
    let origin = grid_origin(layout.cols);
    for r in 0..layout.rows {
        for c in 0..layout.cols {
            let id = state.next_entity_id();
            let pos = origin + Vec2::new(c as f32 * ENEMY_SPACING_X, -(r as f32) * ENEMY_SPACING_Y);
            state.enemies.push(Enemy::new(id, pos));
        }
    }

    state.level = level;
    state.enemy_dx = fleet_speed(level, state.diff_mult);
    state.events.push(GameEvent::LevelStarted { level });
    log::info!(
        "Level {}: {}x{} grid, fleet speed {:.2}",
        level,
        layout.rows,
        layout.cols,
        state.enemy_dx
    );
}

/// Clear the field and bring in the twin bosses
pub fn spawn_bosses(state: &mut GameState) {
    clear_enemies(state);
    clear_projectiles(state);
    state.bosses.clear();

    for (slot, sign) in [-1.0f32, 1.0].into_iter().enumerate() {
        let id = state.next_entity_id();
        let pos = Vec2::new(sign * BOSS_START_X, BOSS_START_Y);
        state.bosses.push(Boss::new(id, slot, pos, sign * BOSS_SPEED));
    }
    log::info!("Spawned {} bosses", state.bosses.len());
}

/// Fire a player shot from `pos`
pub fn spawn_player_bullet(state: &mut GameState, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state
        .bullets
        .push(Projectile::new(id, Owner::Player, pos, PLAYER_BULLET_SPEED));
    id
}

/// Fire a downward shot from `pos`
pub fn spawn_enemy_bullet(state: &mut GameState, pos: Vec2, speed: f32) -> u32 {
    let id = state.next_entity_id();
    state
        .enemy_bullets
        .push(Projectile::new(id, Owner::Enemy, pos, speed));
    id
}

/// Hide and drop every fleet member
pub fn clear_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.hide();
    }
    state.enemies.clear();
}

/// Deactivate and drop every projectile
pub fn clear_projectiles(state: &mut GameState) {
    for b in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        b.deactivate();
    }
    state.bullets.clear();
    state.enemy_bullets.clear();
}

/// Remove every entity, including the player and bosses
pub fn cleanup_all(state: &mut GameState) {
    clear_enemies(state);
    clear_projectiles(state);
    state.player = None;
    state.bosses.clear();
}
