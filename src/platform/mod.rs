//! Platform abstraction layer
//!
//! Handles the outside world the simulation depends on:
//! - Time (monotonic clock, manual clock for tests)
//! - Input events folded into per-tick commands

use std::time::Instant;

use crate::sim::{Difficulty, TickInput};

/// Monotonic elapsed-time source
pub trait Clock {
    /// Seconds since the clock started
    fn now(&self) -> f64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

/// Measures the time between ticks
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: f64,
}

impl FrameTimer {
    pub fn new(clock: &impl Clock) -> Self {
        Self { last: clock.now() }
    }

    /// Seconds since the previous call
    pub fn lap(&mut self, clock: &impl Clock) -> f32 {
        let now = clock.now();
        let dt = (now - self.last).max(0.0);
        self.last = now;
        dt as f32
    }
}

/// Discrete input events from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SelectDifficulty(Difficulty),
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    FirePressed,
    Restart,
    Quit,
}

/// Held intents plus one-shot requests waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    fire: bool,
    restart: bool,
    quit: bool,
    select: Option<Difficulty>,
    autopilot: Option<Difficulty>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the built-in pilot on or off
    pub fn set_autopilot(&mut self, difficulty: Option<Difficulty>) {
        self.autopilot = difficulty;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::SelectDifficulty(d) => self.select = Some(d),
            InputEvent::LeftPressed => self.left = true,
            InputEvent::LeftReleased => self.left = false,
            InputEvent::RightPressed => self.right = true,
            InputEvent::RightReleased => self.right = false,
            InputEvent::FirePressed => self.fire = true,
            InputEvent::Restart => self.restart = true,
            InputEvent::Quit => self.quit = true,
        }
    }

    /// Commands for the next tick; one-shot requests are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            fire: std::mem::take(&mut self.fire),
            select_difficulty: self.select.take(),
            restart: std::mem::take(&mut self.restart),
            quit: std::mem::take(&mut self.quit),
            autopilot: self.autopilot,
        }
    }
}
