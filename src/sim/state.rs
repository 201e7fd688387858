//! Game state and core simulation types
//!
//! The state machine owns everything here; the renderer only ever sees a
//! [`Snapshot`](super::Snapshot) built from it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::physics;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing running yet, waiting for the first start command
    Idle,
    /// Active round
    Playing,
    /// Round ended by a collision, waiting for restart
    GameOver,
}

/// Notifications for fire-and-forget collaborators (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round began (fresh start or restart)
    Started,
    /// Jump impulse applied
    Jumped,
    /// A new obstacle entered at the right edge
    ObstacleSpawned { kind: ObstacleKind },
    /// Player hit an obstacle; carries the displayed score at the moment of impact
    Collided { score: u64 },
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = upward)
    pub vel_y: f32,
    pub on_ground: bool,
    /// Run-cycle counter, presentation only
    pub anim_frame: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_GROUND_CLAMP),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            on_ground: true,
            anim_frame: 0,
        }
    }
}

impl Player {
    /// Full sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Obstacle variants. Purely visual: all kinds behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallCactus,
    TallCactus,
    CactusCluster,
    Rock,
    Log,
    Spikes,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::SmallCactus,
        ObstacleKind::TallCactus,
        ObstacleKind::CactusCluster,
        ObstacleKind::Rock,
        ObstacleKind::Log,
        ObstacleKind::Spikes,
    ];

    /// Preset (width, height) in pixels
    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::SmallCactus => Vec2::new(20.0, 40.0),
            ObstacleKind::TallCactus => Vec2::new(24.0, 58.0),
            ObstacleKind::CactusCluster => Vec2::new(46.0, 42.0),
            ObstacleKind::Rock => Vec2::new(36.0, 26.0),
            ObstacleKind::Log => Vec2::new(52.0, 22.0),
            ObstacleKind::Spikes => Vec2::new(30.0, 18.0),
        }
    }
}

/// A ground obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner; only x changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle at the right edge, resting on the ground line
    pub fn spawn(id: u32, kind: ObstacleKind) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            pos: Vec2::new(CANVAS_WIDTH, GROUND_Y - size.y),
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Fully past the left boundary
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Obstacle cadence bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnClock {
    /// Wall-clock time accumulated since the last spawn (or round start)
    pub since_last_ms: f64,
    /// Threshold drawn at the last spawn; the next obstacle appears once exceeded
    pub threshold_ms: f64,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Internal score, one unit per Playing tick
    pub score: u64,
    /// Scroll speed (pixels/tick)
    pub speed: f32,
    /// Highest displayed score this session
    pub best_score: u64,
    /// Ticks simulated in the current round
    pub ticks: u64,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub spawn: SpawnClock,
    /// Events emitted during the most recent tick or command
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given spawn seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            speed: INITIAL_SPEED,
            best_score: 0,
            ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            spawn: SpawnClock::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score / SCORE_SCALE
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Start or restart a round. No-op while already playing.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }

        self.phase = GamePhase::Playing;
        self.score = 0;
        self.speed = INITIAL_SPEED;
        self.ticks = 0;
        self.player = Player::default();
        self.obstacles.clear();
        self.spawn = SpawnClock::default();
        self.spawn.threshold_ms = super::spawner::spawn_threshold(self.speed, &mut self.rng);
        self.events.push(GameEvent::Started);

        log::info!("Round started (seed {})", self.seed);
        true
    }

    /// Jump command. Accepted only while playing and standing on the ground.
    pub fn jump(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let jumped = physics::try_jump(&mut self.player);
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Terminal transition for the current round
    pub(crate) fn end_round(&mut self) {
        self.phase = GamePhase::GameOver;
        let shown = self.display_score();
        self.best_score = self.best_score.max(shown);
        self.events.push(GameEvent::Collided { score: shown });

        log::info!(
            "Game over: score {} (best {}) after {} ticks at speed {:.2}",
            shown,
            self.best_score,
            self.ticks,
            self.speed
        );
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.is_playing());
        assert!(!state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert!(state.player.on_ground);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_X, PLAYER_GROUND_CLAMP));
    }

    #[test]
    fn test_start_is_noop_while_playing() {
        let mut state = GameState::new(7);
        assert!(state.start());
        state.score = 55;
        assert!(!state.start());
        assert_eq!(state.score, 55);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_jump_ignored_when_not_playing() {
        let mut state = GameState::new(7);
        assert!(!state.jump());
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_obstacle_spawns_on_ground_line() {
        for kind in ObstacleKind::ALL {
            let obstacle = Obstacle::spawn(1, kind);
            assert_eq!(obstacle.pos.x, CANVAS_WIDTH);
            assert_eq!(obstacle.pos.y + obstacle.size.y, GROUND_Y);
            assert_eq!(obstacle.size, kind.size());
        }
    }

    #[test]
    fn test_display_score_truncates() {
        let mut state = GameState::new(3);
        state.score = 219;
        assert_eq!(state.display_score(), 21);
    }

    #[test]
    fn test_end_round_tracks_best() {
        let mut state = GameState::new(3);
        state.start();
        state.score = 420;
        state.end_round();
        assert_eq!(state.best_score, 42);

        state.start();
        state.score = 100;
        state.end_round();
        assert_eq!(state.best_score, 42);
    }
}
