//! Simulation core
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One step per tick, driven from outside
//! - Seeded RNG only
//! - Obstacles iterate oldest first
//! - No rendering, audio or DOM dependencies

pub mod collision;
pub mod physics;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Insets, PLAYER_HITBOX_INSETS, Rect, first_collision, player_hitbox, player_hits};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use spawner::RandomSource;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, SpawnClock};
pub use tick::{TickInput, clamp_elapsed, tick};
