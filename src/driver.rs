//! Frame clock
//!
//! Steps the simulation once per display refresh. The actual scheduling
//! primitive (requestAnimationFrame, a test harness) sits behind
//! [`FrameScheduler`] so the stepping logic is the same everywhere.

use crate::consts::FRAME_MS;
use crate::sim::{GameState, TickInput, clamp_elapsed, tick};

/// Something that can call us back on the next frame
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> Self::Handle;

    /// Drop a callback that hasn't fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Drives `tick` from frame callbacks, keeping at most one frame in flight
#[derive(Debug)]
pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    last_time_ms: Option<f64>,
    running: bool,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            last_time_ms: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle of the frame currently scheduled, if any
    pub fn pending(&self) -> Option<S::Handle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin ticking. Calling while already running does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time_ms = None;
        self.pending = Some(self.scheduler.request_frame());
        log::debug!("Frame driver started");
    }

    /// Stop ticking and cancel the scheduled frame. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.running {
            self.running = false;
            log::debug!("Frame driver stopped");
        }
    }

    /// Frame callback. Steps the simulation once, then schedules the next
    /// frame unless the round just ended. Returns whether a tick ran.
    pub fn on_frame(&mut self, now_ms: f64, state: &mut GameState, input: &TickInput) -> bool {
        // The callback that fired is no longer pending
        self.pending = None;
        if !self.running {
            return false;
        }

        let elapsed_ms = match self.last_time_ms {
            Some(last) => clamp_elapsed(now_ms - last),
            None => FRAME_MS,
        };
        self.last_time_ms = Some(now_ms);

        tick(state, input, elapsed_ms);

        if state.is_game_over() {
            self.stop();
        } else {
            self.pending = Some(self.scheduler.request_frame());
        }
        true
    }
}

impl<S: FrameScheduler> Drop for FrameDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler for tests and headless runs: frames fire when the caller says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    queued: Vec<u64>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks requested but not yet fired or cancelled
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Total cancellations seen
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Pop the oldest queued callback, as if the display refreshed
    pub fn fire(&mut self) -> Option<u64> {
        if self.queued.is_empty() {
            None
        } else {
            Some(self.queued.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> u64 {
        self.next_handle += 1;
        self.queued.push(self.next_handle);
        self.next_handle
    }

    fn cancel_frame(&mut self, handle: u64) {
        let before = self.queued.len();
        self.queued.retain(|h| *h != handle);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}

impl FrameDriver<ManualScheduler> {
    /// Fire the next queued frame at `now_ms`. Returns false once nothing is queued.
    pub fn pump(&mut self, now_ms: f64, state: &mut GameState, input: &TickInput) -> bool {
        match self.scheduler.fire() {
            Some(_) => self.on_frame(now_ms, state, input),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_MS;
    use crate::sim::{GamePhase, Obstacle, ObstacleKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scheduler whose queue outlives the driver that owns it
    #[derive(Debug, Default, Clone)]
    struct SharedScheduler {
        inner: Rc<RefCell<ManualScheduler>>,
    }

    impl FrameScheduler for SharedScheduler {
        type Handle = u64;

        fn request_frame(&mut self) -> u64 {
            self.inner.borrow_mut().request_frame()
        }

        fn cancel_frame(&mut self, handle: u64) {
            self.inner.borrow_mut().cancel_frame(handle);
        }
    }

    fn started() -> (FrameDriver<ManualScheduler>, GameState) {
        let mut driver = FrameDriver::new(ManualScheduler::new());
        let mut state = GameState::new(8);
        state.start();
        driver.start();
        (driver, state)
    }

    #[test]
    fn test_one_frame_in_flight() {
        let (mut driver, mut state) = started();
        assert!(driver.is_running());
        assert_eq!(driver.scheduler().queued(), 1);

        // Starting twice doesn't double-schedule
        driver.start();
        assert_eq!(driver.scheduler().queued(), 1);

        let input = TickInput::default();
        for i in 0..10 {
            assert!(driver.pump(i as f64 * FRAME_MS, &mut state, &input));
            assert_eq!(driver.scheduler().queued(), 1);
        }
        assert_eq!(state.ticks, 10);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut driver, mut state) = started();
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().queued(), 0);
        assert_eq!(driver.scheduler().cancelled(), 1);

        driver.stop();
        driver.stop();
        assert_eq!(driver.scheduler().cancelled(), 1);
        assert_eq!(driver.pending(), None);

        // A stale callback arriving after stop does nothing
        assert!(!driver.on_frame(0.0, &mut state, &TickInput::default()));
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_game_over_stops_driver() {
        let (mut driver, mut state) = started();
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::spawn(id, ObstacleKind::Rock);
        obstacle.pos.x = state.player.pos.x;
        state.obstacles.push(obstacle);

        assert!(driver.pump(0.0, &mut state, &TickInput::default()));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().queued(), 0);
        assert!(!driver.pump(FRAME_MS, &mut state, &TickInput::default()));

        // Restart resumes ticking
        let restart = TickInput {
            start: true,
            ..Default::default()
        };
        driver.start();
        assert!(driver.pump(2.0 * FRAME_MS, &mut state, &restart));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(driver.scheduler().queued(), 1);
    }

    #[test]
    fn test_elapsed_time_feeds_spawn_clock() {
        let (mut driver, mut state) = started();
        let input = TickInput::default();

        // First frame uses the nominal frame time
        driver.pump(1000.0, &mut state, &input);
        assert!((state.spawn.since_last_ms - FRAME_MS).abs() < 1e-9);

        driver.pump(1020.0, &mut state, &input);
        assert!((state.spawn.since_last_ms - (FRAME_MS + 20.0)).abs() < 1e-9);

        // Long gaps are clamped
        driver.pump(60_000.0, &mut state, &input);
        assert!((state.spawn.since_last_ms - (FRAME_MS + 20.0 + MAX_FRAME_MS)).abs() < 1e-9);
    }

    #[test]
    fn test_drop_cancels_scheduled_frame() {
        let scheduler = SharedScheduler::default();
        let queue = scheduler.inner.clone();

        let mut driver = FrameDriver::new(scheduler);
        driver.start();
        assert_eq!(queue.borrow().queued(), 1);

        drop(driver);
        assert_eq!(queue.borrow().queued(), 0);
        assert_eq!(queue.borrow().cancelled(), 1);
    }

    #[test]
    fn test_dropping_stopped_driver_cancels_nothing() {
        let scheduler = SharedScheduler::default();
        let queue = scheduler.inner.clone();

        let mut driver = FrameDriver::new(scheduler);
        driver.start();
        driver.stop();
        drop(driver);
        assert_eq!(queue.borrow().queued(), 0);
        assert_eq!(queue.borrow().cancelled(), 1);
    }

    #[test]
    fn test_non_finite_frame_time() {
        let (mut driver, mut state) = started();
        let input = TickInput::default();
        driver.pump(100.0, &mut state, &input);
        driver.pump(f64::NAN, &mut state, &input);
        assert!(state.obstacles.is_empty());
        assert!(state.spawn.since_last_ms.is_finite());
        assert!((state.spawn.since_last_ms - 2.0 * FRAME_MS).abs() < 1e-9);
    }
}
