use glam::Vec2;

use turtle_invaders::consts::*;
use turtle_invaders::platform::{InputEvent, InputState};
use turtle_invaders::renderer::{EntityKind, Frame};
use turtle_invaders::sim::{Difficulty, EndReason, GameEvent, GamePhase, GameState, TickInput, tick};
use turtle_invaders::sprites::SpriteSet;

fn idle(state: &mut GameState) {
    tick(state, &TickInput::default(), TICK_DT);
}

fn kill_fleet(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.hide();
    }
    idle(state);
}

#[test]
fn full_run_through_all_levels() {
    let mut input = InputState::new();
    let mut state = GameState::new(2024);

    input.apply(InputEvent::SelectDifficulty(Difficulty::Easy));
    tick(&mut state, &input.take_tick_input(), TICK_DT);
    assert_eq!(state.phase, GamePhase::Playing);

    let mut sizes = vec![state.enemies.len()];
    for _ in 0..2 {
        kill_fleet(&mut state);
        sizes.push(state.enemies.len());
    }
    assert_eq!(sizes, vec![21, 32, 45]);
    assert!((state.enemy_dx - 3.0).abs() < 1e-5);

    kill_fleet(&mut state);
    assert_eq!(state.phase, GamePhase::Boss);
    let frame = Frame::capture(&state, &SpriteSet::default());
    assert_eq!(frame.count(EntityKind::Boss), 2);
    assert_eq!(frame.boss_bars.len(), 2);
    assert_eq!(frame.hud_text.as_deref(), Some("Level 3 | Difficulty: Easy"));
}

#[test]
fn fleet_reaching_danger_line_ends_run() {
    let mut state = GameState::new(8);
    tick(
        &mut state,
        &TickInput {
            select_difficulty: Some(Difficulty::Normal),
            ..Default::default()
        },
        TICK_DT,
    );

    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.pos = Vec2::new(BORDER_RIGHT - 1.0 - i as f32, ENEMY_DANGER_Y + 10.0);
    }
    idle(&mut state);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.end_reason, Some(EndReason::EnemiesReachedBottom));

    // Every alive enemy dropped, none left behind
    assert!(state.enemies.iter().all(|e| e.pos.y == ENEMY_DANGER_Y - 20.0));
}

#[test]
fn fleet_bounce_without_breach_keeps_playing() {
    let mut state = GameState::new(8);
    tick(
        &mut state,
        &TickInput {
            select_difficulty: Some(Difficulty::Normal),
            ..Default::default()
        },
        TICK_DT,
    );
    let dx = state.enemy_dx;
    let shift = BORDER_RIGHT - 1.0 - state.enemies.iter().map(|e| e.pos.x).fold(f32::MIN, f32::max);
    for enemy in &mut state.enemies {
        enemy.pos.x += shift;
    }
    let before: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();

    idle(&mut state);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.enemy_dx, -dx);
    for (enemy, old) in state.enemies.iter().zip(&before) {
        assert_eq!(enemy.pos, *old - Vec2::new(0.0, ENEMY_DROP));
    }
}

#[test]
fn boss_crossing_line_ends_run() {
    let mut state = GameState::new(8);
    tick(
        &mut state,
        &TickInput {
            select_difficulty: Some(Difficulty::Hard),
            ..Default::default()
        },
        TICK_DT,
    );
    state.level = MAX_LEVEL;
    kill_fleet(&mut state);
    assert_eq!(state.phase, GamePhase::Boss);
    assert!(state.bullets.is_empty() && state.enemy_bullets.is_empty());

    state.bosses[0].pos = Vec2::new(BORDER_LEFT + BOSS_EDGE_MARGIN + 1.0, BOSS_DANGER_Y + 5.0);
    idle(&mut state);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.end_reason, Some(EndReason::BossReachedPlayerLine));
}

#[test]
fn restart_clears_session() {
    let mut input = InputState::new();
    let mut state = GameState::new(77);

    input.apply(InputEvent::SelectDifficulty(Difficulty::Hard));
    tick(&mut state, &input.take_tick_input(), TICK_DT);
    let pos = state.player.as_ref().unwrap().pos;
    let id = turtle_invaders::sim::spawn::spawn_enemy_bullet(
        &mut state,
        pos + Vec2::new(0.0, 4.0),
        ENEMY_BULLET_SPEED,
    );
    assert!(id > 0);
    tick(&mut state, &input.take_tick_input(), TICK_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    input.apply(InputEvent::Restart);
    tick(&mut state, &input.take_tick_input(), TICK_DT);
    assert_eq!(state.phase, GamePhase::Menu);
    assert!(state.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::GameOver,
        to: GamePhase::Menu,
    }));
    let frame = Frame::capture(&state, &SpriteSet::default());
    assert!(frame.items.is_empty());

    // A fresh session starts from level 1
    input.apply(InputEvent::SelectDifficulty(Difficulty::Easy));
    tick(&mut state, &input.take_tick_input(), TICK_DT);
    assert_eq!(state.level, 1);
    assert_eq!(state.enemies.len(), 21);
    assert_eq!(state.difficulty, Some(Difficulty::Easy));
}

#[test]
fn autopilot_session_terminates() {
    let mut state = GameState::new(31337);
    let input = TickInput {
        autopilot: Some(Difficulty::Easy),
        ..Default::default()
    };
    let mut kills = 0;
    for _ in 0..20_000 {
        tick(&mut state, &input, TICK_DT);
        kills += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count();
        if state.phase.is_finished() {
            break;
        }
    }
    assert!(kills > 0, "autopilot never hit anything");
    assert!(state.phase.is_finished() || state.phase.is_combat());
}
