//! Sprite tokens handed to the renderer
//!
//! The simulation never looks inside these; they are labels the renderer
//! knows how to draw. Real assets are used when present, otherwise a
//! fallback shape name.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One token per drawable entity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub player: String,
    pub bullet: String,
    /// Two-frame enemy animation
    pub enemy_frames: [String; 2],
    pub boss: String,
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self {
            player: "fallback_player".to_string(),
            bullet: "fallback_bullet".to_string(),
            enemy_frames: ["turtle".to_string(), "turtle".to_string()],
            boss: "fallback_boss".to_string(),
        }
    }
}

impl SpriteSet {
    /// Use `<dir>/<name>.gif` for every asset that exists
    pub fn resolve(assets_dir: impl AsRef<Path>) -> Self {
        let dir = assets_dir.as_ref();
        let fallback = Self::default();
        let pick = |file: &str, fallback: String| {
            let path = dir.join(file);
            if path.is_file() {
                path.to_string_lossy().into_owned()
            } else {
                fallback
            }
        };

        let [enemy_a, enemy_b] = fallback.enemy_frames;
        let sprites = Self {
            player: pick("player.gif", fallback.player),
            bullet: pick("bullet.gif", fallback.bullet),
            enemy_frames: [pick("enemy_a.gif", enemy_a), pick("enemy_b.gif", enemy_b)],
            boss: pick("boss.gif", fallback.boss),
        };
        log::debug!("Sprites resolved from {}: {:?}", dir.display(), sprites);
        sprites
    }

    /// Token for an enemy animation frame
    pub fn enemy_frame(&self, frame: u8) -> &str {
        &self.enemy_frames[usize::from(frame & 1)]
    }
}
