//! Frame snapshots
//!
//! A `Frame` is everything a renderer needs after a tick: visible entities,
//! boss health bars, HUD text and the menu/end overlays. Building one is a
//! pure read of the game state.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, Owner};
use crate::sprites::SpriteSet;

/// Heading for sprites facing up the screen (degrees)
pub const HEADING_UP: f32 = 90.0;
/// Heading for sprites facing the player (degrees)
pub const HEADING_DOWN: f32 = 270.0;

/// Width of a boss health bar in playfield units
pub const HEALTH_BAR_WIDTH: f32 = 280.0;

const BOSS_LABELS: [&str; 2] = ["Boss A HP", "Boss B HP"];

/// Kind of drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    Bullet,
    EnemyBullet,
    Enemy,
    Boss,
}

/// One sprite to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    /// Entity ID (0 for the player); visuals for IDs that vanish are released
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub heading: f32,
    pub frame: u8,
    pub tint: &'static str,
    pub sprite: String,
    pub scale: f32,
}

/// A boss health bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthBar {
    pub label: &'static str,
    /// Fill fraction in [0, 1]
    pub ratio: f32,
    /// Filled width in playfield units
    pub fill_width: f32,
}

/// Centered banner text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// Everything the renderer shows for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: GamePhase,
    pub items: Vec<DrawItem>,
    pub boss_bars: Vec<HealthBar>,
    pub hud_text: Option<String>,
    pub overlay: Option<Overlay>,
}

impl Frame {
    /// Project the game state into a frame
    pub fn capture(state: &GameState, sprites: &SpriteSet) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            items: draw_items(state, sprites),
            boss_bars: boss_bars(state),
            hud_text: hud_text(state),
            overlay: overlay(state),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

fn draw_items(state: &GameState, sprites: &SpriteSet) -> Vec<DrawItem> {
    let mut items = Vec::new();

    if let Some(player) = &state.player {
        items.push(DrawItem {
            id: 0,
            kind: EntityKind::Player,
            pos: player.pos,
            heading: HEADING_UP,
            frame: 0,
            tint: "cyan",
            sprite: sprites.player.clone(),
            scale: 1.0,
        });
    }

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        items.push(DrawItem {
            id: enemy.id,
            kind: EntityKind::Enemy,
            pos: enemy.pos,
            heading: HEADING_DOWN,
            frame: enemy.frame,
            tint: "#66ff66",
            sprite: sprites.enemy_frame(enemy.frame).to_string(),
            scale: 1.0,
        });
    }

    for boss in &state.bosses {
        items.push(DrawItem {
            id: boss.id,
            kind: EntityKind::Boss,
            pos: boss.pos,
            heading: HEADING_DOWN,
            frame: 0,
            tint: "#ff5555",
            sprite: sprites.boss.clone(),
            scale: boss.size,
        });
    }

    for shot in state.bullets.iter().chain(&state.enemy_bullets).filter(|b| b.active) {
        let (kind, heading) = match shot.owner {
            Owner::Player => (EntityKind::Bullet, HEADING_UP),
            Owner::Enemy => (EntityKind::EnemyBullet, HEADING_DOWN),
        };
        items.push(DrawItem {
            id: shot.id,
            kind,
            pos: shot.pos,
            heading,
            frame: 0,
            tint: shot.owner.tint(),
            sprite: sprites.bullet.clone(),
            scale: 1.0,
        });
    }

    items
}

/// Health bars, labelled by spawn slot so a dead boss keeps its label free
pub fn boss_bars(state: &GameState) -> Vec<HealthBar> {
    if state.phase != GamePhase::Boss {
        return Vec::new();
    }
    state
        .bosses
        .iter()
        .filter_map(|boss| {
            let label = *BOSS_LABELS.get(boss.slot)?;
            let ratio = boss.hp_ratio();
            Some(HealthBar {
                label,
                ratio,
                fill_width: (HEALTH_BAR_WIDTH * ratio).trunc(),
            })
        })
        .collect()
}

/// "Level {n} | Difficulty: {name}" while a run is in progress
pub fn hud_text(state: &GameState) -> Option<String> {
    if !state.phase.is_combat() {
        return None;
    }
    let difficulty = state.difficulty.map(|d| d.as_str()).unwrap_or("-");
    Some(format!("Level {} | Difficulty: {}", state.level, difficulty))
}

fn overlay(state: &GameState) -> Option<Overlay> {
    match state.phase {
        GamePhase::Menu => Some(Overlay {
            title: "SPACE INVADERS",
            lines: vec![
                "Enhanced MVP".to_string(),
                "Select Difficulty:".to_string(),
                "1) Easy   2) Normal   3) Hard".to_string(),
                "Controls: Left/Right to move, Space to shoot".to_string(),
                "R: menu (after game)   Q: quit".to_string(),
            ],
        }),
        GamePhase::Victory => Some(Overlay {
            title: "VICTORY!",
            lines: vec![
                end_message(state),
                "Press R to return to main menu.".to_string(),
            ],
        }),
        GamePhase::GameOver => Some(Overlay {
            title: "GAME OVER",
            lines: vec![
                end_message(state),
                "Press R to return to main menu.".to_string(),
            ],
        }),
        GamePhase::Playing | GamePhase::Boss => None,
    }
}

fn end_message(state: &GameState) -> String {
    state
        .end_reason
        .map(|r| r.message().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Difficulty, EndReason, TickInput, tick};

    fn started(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(42);
        let input = TickInput {
            select_difficulty: Some(difficulty),
            ..Default::default()
        };
        tick(&mut state, &input, TICK_DT);
        state
    }

    #[test]
    fn test_menu_frame() {
        let state = GameState::new(1);
        let frame = Frame::capture(&state, &SpriteSet::default());
        assert!(frame.items.is_empty());
        assert!(frame.hud_text.is_none());
        let overlay = frame.overlay.unwrap();
        assert_eq!(overlay.title, "SPACE INVADERS");
        assert_eq!(overlay.lines[0], "Enhanced MVP");
        assert_eq!(overlay.lines[1], "Select Difficulty:");
    }

    #[test]
    fn test_playing_frame() {
        let state = started(Difficulty::Hard);
        let frame = Frame::capture(&state, &SpriteSet::default());
        assert_eq!(frame.count(EntityKind::Player), 1);
        assert_eq!(frame.count(EntityKind::Enemy), 21);
        assert_eq!(frame.hud_text.as_deref(), Some("Level 1 | Difficulty: Hard"));
        assert!(frame.overlay.is_none());
        assert!(frame.boss_bars.is_empty());
    }

    #[test]
    fn test_boss_bars_clamped_and_labelled() {
        let mut state = started(Difficulty::Easy);
        state.level = MAX_LEVEL;
        state.enemies.clear();
        tick(&mut state, &TickInput::default(), TICK_DT);
        assert_eq!(state.phase, GamePhase::Boss);

        state.bosses[0].hp = -3;
        state.bosses[1].hp = 5;
        let bars = boss_bars(&state);
        assert_eq!(bars[0].label, "Boss A HP");
        assert_eq!(bars[0].ratio, 0.0);
        assert_eq!(bars[0].fill_width, 0.0);
        assert_eq!(bars[1].label, "Boss B HP");
        assert!((bars[1].ratio - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(bars[1].fill_width, 93.0);

        state.bosses.remove(0);
        assert_eq!(boss_bars(&state)[0].label, "Boss B HP");
    }

    #[test]
    fn test_game_over_overlay_has_reason() {
        let mut state = started(Difficulty::Normal);
        state.finish(GamePhase::GameOver, EndReason::EnemiesReachedBottom);
        let frame = Frame::capture(&state, &SpriteSet::default());
        let overlay = frame.overlay.unwrap();
        assert_eq!(overlay.title, "GAME OVER");
        assert_eq!(overlay.lines[0], "Enemies reached the bottom");
    }

    #[test]
    fn test_enemy_frame_selects_sprite() {
        let mut state = started(Difficulty::Normal);
        state.enemies[0].frame = 1;
        let sprites = SpriteSet {
            enemy_frames: ["a".to_string(), "b".to_string()],
            ..SpriteSet::default()
        };
        let frame = Frame::capture(&state, &sprites);
        let enemy = frame.items.iter().find(|i| i.id == state.enemies[0].id).unwrap();
        assert_eq!(enemy.sprite, "b");
        assert_eq!(enemy.heading, HEADING_DOWN);
    }
}
