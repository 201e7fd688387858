//! Read-only view of the simulation handed to presentation each frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GamePhase, GameState, ObstacleKind, SpawnClock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub anim_frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub bounds: Rect,
}

/// Everything the renderer, HUD and audio need after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerView,
    /// Oldest first
    pub obstacles: Vec<ObstacleView>,
    /// Internal tick-resolution score
    pub score: u64,
    /// Score as shown on the HUD
    pub display_score: u64,
    pub best_score: u64,
    pub speed: f32,
    pub ticks: u64,
    /// Spawner timing, for debug overlays
    pub spawn: SpawnClock,
    pub is_playing: bool,
    pub is_game_over: bool,
}

impl Snapshot {
    pub fn is_idle(&self) -> bool {
        !self.is_playing && !self.is_game_over
    }
}

impl GameState {
    /// Capture the current state for presentation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size,
                on_ground: self.player.on_ground,
                anim_frame: self.player.anim_frame,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    bounds: o.bounds(),
                })
                .collect(),
            score: self.score,
            display_score: self.display_score(),
            best_score: self.best_score,
            speed: self.speed,
            ticks: self.ticks,
            spawn: self.spawn,
            is_playing: self.phase == GamePhase::Playing,
            is_game_over: self.phase == GamePhase::GameOver,
        }
    }
}
