//! Renderer interface
//!
//! The simulation pushes a [`Frame`] after every tick and never reads
//! anything back. Drawing failures stay inside the renderer.

pub mod frame;

pub use frame::{DrawItem, EntityKind, Frame, HealthBar, Overlay};

use crate::sim::GamePhase;

/// Receives one frame per tick
pub trait Renderer {
    fn present(&mut self, frame: &Frame);
}

/// Headless renderer that reports what it would draw through `log`
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: Option<GamePhase>,
    last_hud: Option<String>,
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;

        if self.last_phase != Some(frame.phase) {
            if let Some(overlay) = &frame.overlay {
                log::info!("[{}] {}", overlay.title, overlay.lines.join(" / "));
            }
            self.last_phase = Some(frame.phase);
        }
        if frame.hud_text != self.last_hud {
            if let Some(hud) = &frame.hud_text {
                log::info!("{}", hud);
            }
            self.last_hud = frame.hud_text.clone();
        }

        for bar in &frame.boss_bars {
            log::trace!("{}: {:.0}%", bar.label, bar.ratio * 100.0);
        }
        log::trace!(
            "tick {}: {} enemies, {} shots, {} bosses",
            frame.tick,
            frame.count(EntityKind::Enemy),
            frame.count(EntityKind::Bullet) + frame.count(EntityKind::EnemyBullet),
            frame.count(EntityKind::Boss)
        );
    }
}
