//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a difficulty selection
    Menu,
    /// Fighting the enemy fleet (levels 1..=3)
    Playing,
    /// Fighting the twin bosses
    Boss,
    /// All bosses destroyed
    Victory,
    /// Run ended
    GameOver,
}

impl GamePhase {
    /// Phases in which the player ship is simulated
    pub fn is_combat(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Boss)
    }

    /// Victory and GameOver only leave via restart
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// Difficulty selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "normal" | "2" => Some(Difficulty::Normal),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Fleet speed multiplier
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Normal => 1.3,
            Difficulty::Hard => 1.7,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    HitByEnemyFire,
    EnemiesReachedBottom,
    BossReachedPlayerLine,
    BossCollidedWithPlayer,
    BossesDefeated,
}

impl EndReason {
    /// Human-readable text shown under the end banner
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::HitByEnemyFire => "Hit by enemy fire",
            EndReason::EnemiesReachedBottom => "Enemies reached the bottom",
            EndReason::BossReachedPlayerLine => "Boss reached the player line",
            EndReason::BossCollidedWithPlayer => "Boss collided with player",
            EndReason::BossesDefeated => "You defeated the boss.",
        }
    }
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelStarted { level: u32 },
    PlayerFired { id: u32 },
    EnemyFired { id: u32 },
    EnemyDestroyed { id: u32 },
    BossHit { id: u32, hp: i32 },
    BossDestroyed { id: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Elapsed seconds of the last accepted shot
    pub last_fire_time: Option<f64>,
    pub fire_cooldown: f64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
            moving_left: false,
            moving_right: false,
            last_fire_time: None,
            fire_cooldown: FIRE_COOLDOWN_SECS,
        }
    }

    /// Net horizontal velocity for the current intents
    pub fn velocity_x(&self) -> f32 {
        match (self.moving_left, self.moving_right) {
            (true, false) => -self.speed,
            (false, true) => self.speed,
            _ => 0.0,
        }
    }

    /// Apply one tick of movement, clamped inside the side borders
    pub fn step(&mut self) {
        let dx = self.velocity_x();
        if dx != 0.0 {
            self.pos.x = super::collision::clamp_x(
                self.pos.x + dx,
                BORDER_LEFT + PLAYER_EDGE_MARGIN,
                BORDER_RIGHT - PLAYER_EDGE_MARGIN,
            );
        }
    }

    /// Try to fire at time `now`; returns the muzzle position if accepted
    pub fn try_fire(&mut self, now: f64) -> Option<Vec2> {
        if let Some(last) = self.last_fire_time {
            if now - last < self.fire_cooldown {
                return None;
            }
        }
        self.last_fire_time = Some(now);
        Some(self.pos + Vec2::new(0.0, PLAYER_MUZZLE_OFFSET))
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    /// Vertical direction of travel
    pub fn direction(&self) -> f32 {
        match self {
            Owner::Player => 1.0,
            Owner::Enemy => -1.0,
        }
    }

    /// Cosmetic tint passed through to the renderer
    pub fn tint(&self) -> &'static str {
        match self {
            Owner::Player => "yellow",
            Owner::Enemy => "#ff6666",
        }
    }
}

/// A bullet, fired by the player (upward) or by an enemy/boss (downward)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Owner,
    pub pos: Vec2,
    /// Units per tick, always positive; direction comes from `owner`
    pub speed: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, owner: Owner, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            owner,
            pos,
            speed,
            active: true,
        }
    }

    pub fn advance(&mut self) {
        if self.active {
            self.pos.y += self.owner.direction() * self.speed;
        }
    }

    /// Past the top border (player shots) or the bottom border (enemy shots)
    pub fn is_offscreen(&self) -> bool {
        match self.owner {
            Owner::Player => self.pos.y > BORDER_TOP,
            Owner::Enemy => self.pos.y < BORDER_BOTTOM,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A fleet member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub alive: bool,
    /// Animation frame, 0 or 1
    pub frame: u8,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            alive: true,
            frame: 0,
        }
    }

    /// Flip the animation frame every `period` ticks
    pub fn animate(&mut self, tick: u64, period: u64) {
        if period > 0 && tick.is_multiple_of(period) {
            self.frame = 1 - self.frame;
        }
    }

    pub fn hide(&mut self) {
        self.alive = false;
    }
}

/// One of the twin bosses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    /// Spawn slot, used for the health bar label
    pub slot: usize,
    pub pos: Vec2,
    pub dx: f32,
    /// May dip below zero until the kill check runs
    pub hp: i32,
    pub hp_max: i32,
    pub size: f32,
}

impl Boss {
    pub fn new(id: u32, slot: usize, pos: Vec2, dx: f32) -> Self {
        Self {
            id,
            slot,
            pos,
            dx,
            hp: BOSS_HP,
            hp_max: BOSS_HP,
            size: BOSS_SIZE,
        }
    }

    /// Health fraction for display, clamped to [0, 1]
    pub fn hp_ratio(&self) -> f32 {
        if self.hp_max <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.hp_max as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for the simulation RNG
    pub seed: u64,
    /// Picks which enemy fires
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based, 0 in the menu)
    pub level: u32,
    pub difficulty: Option<Difficulty>,
    pub diff_mult: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated elapsed seconds, used only for the fire cooldown
    pub elapsed_secs: f64,
    pub player: Option<Player>,
    /// Player shots (sorted by id)
    pub bullets: Vec<Projectile>,
    /// Enemy and boss shots (sorted by id)
    pub enemy_bullets: Vec<Projectile>,
    /// Living fleet members (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Shared horizontal fleet velocity
    pub enemy_dx: f32,
    pub bosses: Vec<Boss>,
    pub end_reason: Option<EndReason>,
    /// Events recorded during the last tick
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game state in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: 0,
            difficulty: None,
            diff_mult: 1.0,
            time_ticks: 0,
            elapsed_secs: 0.0,
            player: None,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_dx: ENEMY_INITIAL_DX,
            bosses: Vec::new(),
            end_reason: None,
            events: Vec::new(),
            quit_requested: false,
            next_id: 1,
        }
    }

    /// Start over from the seed: counters, ids and RNG stream included.
    ///
    /// The phase and a pending quit request survive.
    pub fn reset_session(&mut self) {
        *self = Self {
            phase: self.phase,
            quit_requested: self.quit_requested,
            ..Self::new(self.seed)
        };
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move to `to`, recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// End the run with a reason
    pub fn finish(&mut self, phase: GamePhase, reason: EndReason) {
        log::info!("{:?}: {}", phase, reason.message());
        self.end_reason = Some(reason);
        self.set_phase(phase);
    }

    /// Number of enemies still alive
    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bullets.sort_by_key(|b| b.id);
        self.enemy_bullets.sort_by_key(|b| b.id);
        self.enemies.sort_by_key(|e| e.id);
        self.bosses.sort_by_key(|b| b.id);
    }
}
