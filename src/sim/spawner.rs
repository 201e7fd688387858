//! Obstacle scrolling, recycling and procedural spawning
//!
//! Cadence is wall-clock based: the spawner accumulates frame time and emits
//! a new obstacle once the threshold drawn at the previous spawn is exceeded.

use rand::{Rng, RngCore};

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind, SpawnClock};
use crate::consts::*;

/// Source of spawn randomness. Production uses the state's seeded `Pcg32`;
/// tests can script exact values.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn unit(&mut self) -> f64;
    /// Uniform index in `0..len` (`len > 0`)
    fn index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Cadence multiplier: 1.0 at the starting speed, shrinking linearly to a floor
pub fn speed_factor(speed: f32) -> f64 {
    let above = (speed - INITIAL_SPEED).max(0.0) as f64;
    (1.0 - above * SPEED_FACTOR_SLOPE).max(MIN_SPEED_FACTOR)
}

/// Draw the wait before the next spawn: `base × factor + jitter`
pub fn spawn_threshold(speed: f32, rng: &mut impl RandomSource) -> f64 {
    BASE_SPAWN_INTERVAL_MS * speed_factor(speed) + rng.unit() * SPAWN_JITTER_MS
}

/// Pick one of the six presets uniformly
pub fn random_kind(rng: &mut impl RandomSource) -> ObstacleKind {
    ObstacleKind::ALL[rng.index(ObstacleKind::ALL.len())]
}

/// Shift every obstacle left by `speed` and drop the ones fully off-screen
pub fn scroll(obstacles: &mut Vec<Obstacle>, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= speed;
    }
    obstacles.retain(|o| !o.is_off_screen());
}

/// Advance the spawn clock by `elapsed_ms`. Returns the kind to spawn, if due,
/// and re-arms the clock with a fresh threshold.
pub fn poll(
    clock: &mut SpawnClock,
    elapsed_ms: f64,
    speed: f32,
    rng: &mut impl RandomSource,
) -> Option<ObstacleKind> {
    clock.since_last_ms += elapsed_ms;
    if clock.since_last_ms <= clock.threshold_ms {
        return None;
    }

    let kind = random_kind(rng);
    clock.since_last_ms = 0.0;
    clock.threshold_ms = spawn_threshold(speed, rng);
    Some(kind)
}

/// Full spawner step for one tick
pub fn update(state: &mut GameState, elapsed_ms: f64) {
    scroll(&mut state.obstacles, state.speed);

    if let Some(kind) = poll(&mut state.spawn, elapsed_ms, state.speed, &mut state.rng) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::spawn(id, kind));
        state.events.push(GameEvent::ObstacleSpawned { kind });
        log::debug!(
            "Spawned {:?} #{} (next in {:.0} ms, {} live)",
            kind,
            id,
            state.spawn.threshold_ms,
            state.obstacles.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Replays fixed samples in order
    struct Scripted {
        units: Vec<f64>,
        indices: Vec<usize>,
    }

    impl RandomSource for Scripted {
        fn unit(&mut self) -> f64 {
            self.units.remove(0)
        }

        fn index(&mut self, len: usize) -> usize {
            self.indices.remove(0) % len
        }
    }

    #[test]
    fn test_speed_factor_shrinks_with_speed() {
        assert_eq!(speed_factor(INITIAL_SPEED), 1.0);
        assert!(speed_factor(6.0) < speed_factor(5.0));
        assert_eq!(speed_factor(MAX_SPEED), MIN_SPEED_FACTOR);
        // Never above 1.0 even if speed were below the start value
        assert_eq!(speed_factor(1.0), 1.0);
    }

    #[test]
    fn test_threshold_bounds() {
        let mut rng = Scripted {
            units: vec![0.0, 0.999_999],
            indices: vec![],
        };
        let low = spawn_threshold(INITIAL_SPEED, &mut rng);
        let high = spawn_threshold(INITIAL_SPEED, &mut rng);
        assert_eq!(low, BASE_SPAWN_INTERVAL_MS);
        assert!(high < BASE_SPAWN_INTERVAL_MS + SPAWN_JITTER_MS);
        assert!(high > low);
    }

    #[test]
    fn test_poll_waits_for_threshold() {
        let mut clock = SpawnClock {
            since_last_ms: 0.0,
            threshold_ms: 100.0,
        };
        let mut rng = Scripted {
            units: vec![0.5],
            indices: vec![3],
        };

        assert_eq!(poll(&mut clock, 60.0, INITIAL_SPEED, &mut rng), None);
        // Exactly reaching the threshold is not enough
        assert_eq!(poll(&mut clock, 40.0, INITIAL_SPEED, &mut rng), None);
        assert_eq!(
            poll(&mut clock, 1.0, INITIAL_SPEED, &mut rng),
            Some(ObstacleKind::Rock)
        );
        assert_eq!(clock.since_last_ms, 0.0);
        assert_eq!(
            clock.threshold_ms,
            BASE_SPAWN_INTERVAL_MS + 0.5 * SPAWN_JITTER_MS
        );
    }

    #[test]
    fn test_scroll_removes_only_when_fully_past_edge() {
        let kind = ObstacleKind::SmallCactus;
        let width = kind.size().x;
        let mut obstacles = vec![Obstacle::spawn(1, kind), Obstacle::spawn(2, kind)];
        obstacles[0].pos.x = -width + 4.5;
        obstacles[1].pos.x = -width + 4.0;

        scroll(&mut obstacles, 4.0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 1);
        assert_eq!(obstacles[0].pos.x + width, 0.5);

        scroll(&mut obstacles, 4.0);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_update_spawns_at_right_edge() {
        let mut state = GameState::new(42);
        state.start();
        state.spawn.threshold_ms = 10.0;

        update(&mut state, 20.0);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.pos.x, CANVAS_WIDTH);
        assert_eq!(obstacle.pos.y + obstacle.size.y, GROUND_Y);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::ObstacleSpawned { .. })
        ));

        // Next tick it scrolls before anything else can spawn
        update(&mut state, 20.0);
        assert_eq!(state.obstacles[0].pos.x, CANVAS_WIDTH - state.speed);
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            state.start();
            for _ in 0..600 {
                update(&mut state, FRAME_MS);
            }
            state
                .obstacles
                .iter()
                .map(|o| (o.kind, o.pos.x))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(1234), run(1234));
    }

    #[test]
    fn test_all_kinds_reachable() {
        let mut rng = rand_pcg::Pcg32::new(0xcafe, 0xf00d);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(random_kind(&mut rng));
        }
        assert_eq!(seen.len(), ObstacleKind::ALL.len());
    }

    proptest! {
        #[test]
        fn prop_scroll_shifts_by_speed(xs in proptest::collection::vec(-100.0f32..900.0, 1..12), speed in 4.0f32..12.0) {
            let mut obstacles: Vec<Obstacle> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    let mut o = Obstacle::spawn(i as u32, ObstacleKind::Log);
                    o.pos.x = x;
                    o
                })
                .collect();
            let before = obstacles.clone();

            scroll(&mut obstacles, speed);

            for old in &before {
                let moved_x = old.pos.x - speed;
                match obstacles.iter().find(|o| o.id == old.id) {
                    Some(o) => {
                        prop_assert_eq!(o.pos.x, moved_x);
                        prop_assert!(o.pos.x + o.size.x > 0.0);
                    }
                    None => {
                        prop_assert!(moved_x + old.size.x <= 0.0);
                    }
                }
            }
        }
    }
}
