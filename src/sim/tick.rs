//! Per-frame simulation step
//!
//! One call advances the game by exactly one tick, running the components in
//! a fixed order: physics, spawner, collision, then score/speed bookkeeping.

use super::collision::{first_collision, player_hitbox};
use super::physics;
use super::spawner;
use super::state::GameState;
use crate::consts::*;

/// Commands collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up/tap). Ignored unless grounded and playing.
    pub jump: bool,
    /// Start or restart. Ignored while playing.
    pub start: bool,
    /// Demo mode - jump automatically ahead of obstacles
    pub autopilot: bool,
}

/// Ticks of lead the autopilot gives an approaching obstacle before jumping
const AUTOPILOT_LEAD_TICKS: f32 = 9.0;
const AUTOPILOT_LEAD_MARGIN: f32 = 10.0;

/// Sanitize a frame delta: non-finite becomes the nominal frame, the rest is
/// clamped to `[0, MAX_FRAME_MS]`
pub fn clamp_elapsed(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_finite() {
        elapsed_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        FRAME_MS
    }
}

/// Advance the game state by one tick.
///
/// `elapsed_ms` is the wall-clock time since the previous tick; it only feeds
/// the spawn cadence. Physics and scrolling are per-tick.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) {
    state.events.clear();

    if input.start {
        state.start();
    }

    // Idle and GameOver are frozen
    if !state.is_playing() {
        return;
    }

    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        state.jump();
    }

    let elapsed_ms = clamp_elapsed(elapsed_ms);
    state.ticks += 1;

    physics::integrate(&mut state.player);
    spawner::update(state, elapsed_ms);

    if let Some(hit) = first_collision(&state.player, &state.obstacles) {
        log::debug!("Hit {:?} #{} at x={:.1}", hit.kind, hit.id, hit.pos.x);
        state.end_round();
        return;
    }

    state.score += 1;
    state.speed = (state.speed + SPEED_INCREMENT).min(MAX_SPEED);
}

/// Jump when the nearest obstacle ahead is inside a speed-scaled window
fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.on_ground {
        return false;
    }

    let front = player_hitbox(&state.player).right();
    let window = state.speed * AUTOPILOT_LEAD_TICKS + AUTOPILOT_LEAD_MARGIN;

    state
        .obstacles
        .iter()
        .map(|o| o.pos.x - front)
        .filter(|gap| *gap >= 0.0)
        .reduce(f32::min)
        .is_some_and(|gap| gap <= window)
}
