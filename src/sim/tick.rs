//! Fixed-interval simulation tick
//!
//! The driver calls [`tick`] once per frame. Exactly one phase routine runs
//! per call; the routines mutate entities, resolve collisions and may move
//! the game to another phase.

use glam::Vec2;
use rand::Rng;

use super::collision::{FleetStep, first_boss_hit, first_enemy_hit, step_boss, step_fleet, within};
use super::spawn::{
    cleanup_all, spawn_bosses, spawn_enemy_bullet, spawn_level, spawn_player, spawn_player_bullet,
};
use super::state::{Difficulty, EndReason, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held
    pub move_left: bool,
    /// Right held
    pub move_right: bool,
    /// Fire request (subject to the cooldown)
    pub fire: bool,
    /// Difficulty chosen from the menu
    pub select_difficulty: Option<Difficulty>,
    /// Back to the menu after a finished run
    pub restart: bool,
    /// Ask the driver to exit
    pub quit: bool,
    /// Let the built-in pilot play, picking this difficulty from the menu
    pub autopilot: Option<Difficulty>,
}

/// Advance the game state by one tick.
///
/// `dt` is the real time since the previous tick in seconds. It only feeds
/// the fire cooldown; every other timer counts ticks.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    if input.quit {
        state.quit_requested = true;
    }

    state.time_ticks += 1;
    state.elapsed_secs += f64::from(dt);

    let input = match input.autopilot {
        Some(difficulty) => autopilot_input(state, input, difficulty),
        None => input.clone(),
    };

    match state.phase {
        GamePhase::Menu => update_menu(state, &input),
        GamePhase::Playing => update_playing(state, &input),
        GamePhase::Boss => update_boss_fight(state, &input),
        GamePhase::Victory | GamePhase::GameOver => update_finished(state, &input),
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn update_menu(state: &mut GameState, input: &TickInput) {
    if let Some(difficulty) = input.select_difficulty {
        start_game(state, difficulty);
    }
}

/// Leave the menu and start level 1
pub fn start_game(state: &mut GameState, difficulty: Difficulty) {
    if state.phase != GamePhase::Menu {
        log::debug!("Ignoring difficulty selection in {:?}", state.phase);
        return;
    }
    log::info!("Starting game on {}", difficulty.as_str());
    state.difficulty = Some(difficulty);
    state.diff_mult = difficulty.speed_multiplier();
    state.end_reason = None;
    spawn_player(state);
    spawn_level(state, 1);
    state.set_phase(GamePhase::Playing);
}

fn update_playing(state: &mut GameState, input: &TickInput) {
    update_player(state, input);
    update_bullets(state);
    update_enemy_bullets(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    update_enemies(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    check_level_progression(state);
}

fn update_boss_fight(state: &mut GameState, input: &TickInput) {
    update_player(state, input);
    update_bullets(state);
    if state.phase != GamePhase::Boss {
        return;
    }
    update_enemy_bullets(state);
    if state.phase != GamePhase::Boss {
        return;
    }
    update_bosses(state);
}

fn update_finished(state: &mut GameState, input: &TickInput) {
    if input.restart {
        reset_to_menu(state);
    }
}

/// Clear every entity and return to the menu
pub fn reset_to_menu(state: &mut GameState) {
    if !state.phase.is_finished() {
        log::debug!("Ignoring restart in {:?}", state.phase);
        return;
    }
    cleanup_all(state);
    state.reset_session();
    state.set_phase(GamePhase::Menu);
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let now = state.elapsed_secs;
    let muzzle = match state.player.as_mut() {
        Some(player) => {
            player.moving_left = input.move_left;
            player.moving_right = input.move_right;
            player.step();
            if input.fire { player.try_fire(now) } else { None }
        }
        None => None,
    };

    if let Some(pos) = muzzle {
        let id = spawn_player_bullet(state, pos);
        state.events.push(GameEvent::PlayerFired { id });
    }
}

/// Move player shots, retire offscreen ones and resolve hits
fn update_bullets(state: &mut GameState) {
    if state.bullets.is_empty() {
        return;
    }

    let bullets = std::mem::take(&mut state.bullets);
    let mut kept = Vec::with_capacity(bullets.len());
    for mut bullet in bullets {
        bullet.advance();
        if bullet.is_offscreen() {
            bullet.deactivate();
            continue;
        }

        let hit = match state.phase {
            GamePhase::Playing => hit_enemy(state, bullet.pos),
            GamePhase::Boss => hit_boss(state, bullet.pos),
            _ => false,
        };
        if hit {
            bullet.deactivate();
        } else {
            kept.push(bullet);
        }
    }
    state.bullets = kept;
    state.enemies.retain(|e| e.alive);

    if state.phase == GamePhase::Boss && state.bosses.is_empty() {
        state.finish(GamePhase::Victory, EndReason::BossesDefeated);
    }
}

fn hit_enemy(state: &mut GameState, pos: Vec2) -> bool {
    let Some(idx) = first_enemy_hit(&state.enemies, pos) else {
        return false;
    };
    let enemy = &mut state.enemies[idx];
    enemy.hide();
    log::debug!("Enemy {} destroyed", enemy.id);
    state.events.push(GameEvent::EnemyDestroyed { id: enemy.id });
    true
}

fn hit_boss(state: &mut GameState, pos: Vec2) -> bool {
    let Some(idx) = first_boss_hit(&state.bosses, pos) else {
        return false;
    };
    let boss = &mut state.bosses[idx];
    boss.hp -= 1;
    let (id, hp) = (boss.id, boss.hp);
    log::debug!("Boss {} hit, hp {}", id, hp);
    state.events.push(GameEvent::BossHit { id, hp });

    if boss.is_dead() {
        state.bosses.remove(idx);
        log::info!("Boss {} destroyed, {} left", id, state.bosses.len());
        state.events.push(GameEvent::BossDestroyed { id });
    }
    true
}

/// Move enemy shots; a shot reaching the player ends the run at once
fn update_enemy_bullets(state: &mut GameState) {
    if state.enemy_bullets.is_empty() {
        return;
    }

    let player_pos = state.player.as_ref().map(|p| p.pos);
    let mut player_hit = false;
    for bullet in &mut state.enemy_bullets {
        bullet.advance();
        if bullet.is_offscreen() {
            bullet.deactivate();
            continue;
        }
        if let Some(pos) = player_pos {
            if within(bullet.pos, pos, PLAYER_HIT_RADIUS) {
                player_hit = true;
                break;
            }
        }
    }
    state.enemy_bullets.retain(|b| b.active);

    if player_hit {
        state.finish(GamePhase::GameOver, EndReason::HitByEnemyFire);
    }
}

fn update_enemies(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }

    let now = state.time_ticks;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.animate(now, ENEMY_ANIM_PERIOD);
    }

    if let FleetStep::Bounced { breached: true } =
        step_fleet(&mut state.enemies, &mut state.enemy_dx)
    {
        state.finish(GamePhase::GameOver, EndReason::EnemiesReachedBottom);
        return;
    }

    if now.is_multiple_of(ENEMY_FIRE_INTERVAL) {
        let shooters: Vec<Vec2> = state.enemies.iter().filter(|e| e.alive).map(|e| e.pos).collect();
        if !shooters.is_empty() {
            let pick = state.rng.random_range(0..shooters.len());
            let muzzle = shooters[pick] - Vec2::new(0.0, ENEMY_MUZZLE_OFFSET);
            let id = spawn_enemy_bullet(state, muzzle, ENEMY_BULLET_SPEED);
            state.events.push(GameEvent::EnemyFired { id });
        }
    }
}

fn check_level_progression(state: &mut GameState) {
    state.enemies.retain(|e| e.alive);
    if !state.enemies.is_empty() {
        return;
    }

    if state.level < MAX_LEVEL {
        let next = state.level + 1;
        spawn_level(state, next);
    } else {
        spawn_bosses(state);
        state.set_phase(GamePhase::Boss);
    }
}

fn update_bosses(state: &mut GameState) {
    if state.bosses.is_empty() {
        return;
    }

    let player_pos = state.player.as_ref().map(|p| p.pos);
    let mut ended = None;
    for boss in &mut state.bosses {
        if step_boss(boss) {
            ended = Some(EndReason::BossReachedPlayerLine);
            break;
        }
        if let Some(pos) = player_pos {
            if within(pos, boss.pos, BOSS_CONTACT_RADIUS) {
                ended = Some(EndReason::BossCollidedWithPlayer);
                break;
            }
        }
    }
    if let Some(reason) = ended {
        state.finish(GamePhase::GameOver, reason);
        return;
    }

    // Each boss fires a symmetric pair
    if state.time_ticks.is_multiple_of(BOSS_FIRE_INTERVAL) {
        let muzzles: Vec<Vec2> = state
            .bosses
            .iter()
            .map(|b| b.pos - Vec2::new(0.0, BOSS_MUZZLE_OFFSET))
            .collect();
        for muzzle in muzzles {
            for offset in [-BOSS_SHOT_SPREAD, BOSS_SHOT_SPREAD] {
                let id =
                    spawn_enemy_bullet(state, muzzle + Vec2::new(offset, 0.0), BOSS_BULLET_SPEED);
                state.events.push(GameEvent::EnemyFired { id });
            }
        }
    }
}

/// Horizontal distance at which an incoming shot makes the pilot dodge
const DODGE_WIDTH: f32 = 26.0;
/// How far above the ship the pilot looks for incoming shots
const DODGE_HEIGHT: f32 = 90.0;

/// Synthesize intents for the built-in pilot
fn autopilot_input(state: &GameState, input: &TickInput, difficulty: Difficulty) -> TickInput {
    let mut input = input.clone();
    match state.phase {
        GamePhase::Menu => input.select_difficulty = Some(difficulty),
        GamePhase::Playing | GamePhase::Boss => {
            let Some(player) = state.player.as_ref() else {
                return input;
            };
            input.fire = true;

            // Dodge the closest shot about to land on us
            let threat = state
                .enemy_bullets
                .iter()
                .filter(|b| {
                    let dy = b.pos.y - player.pos.y;
                    (b.pos.x - player.pos.x).abs() < DODGE_WIDTH && dy > 0.0 && dy < DODGE_HEIGHT
                })
                .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

            let target_x = match threat {
                Some(bullet) if bullet.pos.x >= player.pos.x => {
                    Some(player.pos.x - player.speed * 2.0)
                }
                Some(_) => Some(player.pos.x + player.speed * 2.0),
                None => pilot_target(state, player.pos),
            };

            if let Some(tx) = target_x {
                let dx = tx - player.pos.x;
                input.move_left = dx < -player.speed / 2.0;
                input.move_right = dx > player.speed / 2.0;
            }
        }
        GamePhase::Victory | GamePhase::GameOver => {}
    }
    input
}

/// Where the pilot wants to be: under the lowest enemy, or ahead of a boss
fn pilot_target(state: &GameState, from: Vec2) -> Option<f32> {
    if let Some(enemy) = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| {
            let (da, db) = ((a.pos.x - from.x).abs(), (b.pos.x - from.x).abs());
            a.pos.y.total_cmp(&b.pos.y).then(da.total_cmp(&db))
        })
    {
        return Some(enemy.pos.x + state.enemy_dx);
    }

    state
        .bosses
        .iter()
        .min_by(|a, b| (a.pos.x - from.x).abs().total_cmp(&(b.pos.x - from.x).abs()))
        .map(|boss| {
            // Lead by the boss's travel while our shot climbs
            let flight_ticks = (boss.pos.y - from.y) / PLAYER_BULLET_SPEED;
            boss.pos.x + boss.dx * flight_ticks
        })
}
