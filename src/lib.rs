//! Dune Dash - A pixel-art endless runner
//!
//! Core modules:
//! - `sim`: Simulation core (physics, obstacle spawning, collisions, game state)
//! - `driver`: Frame clock that steps the simulation once per display refresh
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `audio`: Procedural cue tones for simulation events
//! - `settings`: Player preferences

pub mod audio;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameScheduler, ManualScheduler};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;
    pub const GROUND_HEIGHT: f32 = 40.0;
    /// Y coordinate of the ground line (top of the ground strip)
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Resting y of the player's top edge
    pub const PLAYER_GROUND_CLAMP: f32 = GROUND_Y - PLAYER_HEIGHT;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Upward velocity applied by a jump (pixels/tick)
    pub const JUMP_IMPULSE: f32 = -16.0;

    /// Scroll speed (pixels/tick)
    pub const INITIAL_SPEED: f32 = 4.0;
    pub const SPEED_INCREMENT: f32 = 0.002;
    pub const MAX_SPEED: f32 = 12.0;

    /// Internal score ticks per displayed point
    pub const SCORE_SCALE: u64 = 10;

    /// Obstacle cadence (milliseconds)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const SPAWN_JITTER_MS: f64 = 600.0;
    /// Speed factor shrinks by this much per unit of speed above INITIAL_SPEED
    pub const SPEED_FACTOR_SLOPE: f64 = 0.08;
    pub const MIN_SPEED_FACTOR: f64 = 0.4;

    /// Player hitbox insets (left, right, top, bottom)
    pub const HITBOX_INSET_LEFT: f32 = 6.0;
    pub const HITBOX_INSET_RIGHT: f32 = 8.0;
    pub const HITBOX_INSET_TOP: f32 = 5.0;
    pub const HITBOX_INSET_BOTTOM: f32 = 3.0;

    /// Nominal display refresh (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest frame gap fed to the spawner (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;
}
