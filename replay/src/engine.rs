use std::time::{Duration, Instant};

/// One step per second, as the original visualization paced its animation.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(1000);

/// Playback status of the replay engine.
///
/// `Stopped` is the initial state for a freshly loaded trace; `Paused`
/// covers both an explicit pause and normal completion at the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// The sole owner and mutator of the replay position for a loaded trace.
///
/// The engine is bound to the trace's step count and guarantees that
/// `current_step` is always a valid index: every movement goes through a
/// clamp. The cadence is disarmed on every transition away from `Playing`
/// and on `reset`, so no advance from a discarded trace can ever fire into
/// a new one.
///
/// Ticking is cooperative: the UI loop hands the engine the current
/// `Instant` on every frame and the engine decides whether a cadence
/// interval has elapsed. That keeps the machine free of threads and
/// deterministic under test.
#[derive(Debug)]
pub struct ReplayEngine {
    steps: usize,
    current: usize,
    status: PlaybackStatus,
    cadence: Duration,
    last_advance: Option<Instant>,
}

impl ReplayEngine {
    /// Creates an engine for a trace with `steps` steps. A valid trace has
    /// at least one step; a zero count is lifted to one rather than panic.
    pub fn new(steps: usize) -> Self {
        Self::with_cadence(steps, DEFAULT_CADENCE)
    }

    pub fn with_cadence(steps: usize, cadence: Duration) -> Self {
        Self {
            steps: steps.max(1),
            current: 0,
            status: PlaybackStatus::Stopped,
            cadence,
            last_advance: None,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Starts playback. From `Stopped` or `Paused` with room left to
    /// advance this arms the cadence; if the trace is already at its last
    /// step the engine settles in `Paused` without arming anything, so a
    /// single-step trace plays as an immediate no-op.
    pub fn play(&mut self, now: Instant) {
        if self.status == PlaybackStatus::Playing {
            return;
        }
        if self.current < self.steps - 1 {
            self.status = PlaybackStatus::Playing;
            self.last_advance = Some(now);
        } else {
            self.status = PlaybackStatus::Paused;
            self.last_advance = None;
        }
    }

    /// Halts a running cadence, keeping the current position.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
            self.last_advance = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Jumps to the first step. Valid in any state; a running cadence keeps
    /// running from the new position.
    pub fn step_to_start(&mut self) {
        self.current = 0;
    }

    /// Jumps to the last step. Same concurrency behavior as
    /// [`step_to_start`](Self::step_to_start).
    pub fn step_to_end(&mut self) {
        self.current = self.steps - 1;
    }

    /// Moves to `index`, clamped into the valid range. Never fails.
    pub fn seek(&mut self, index: usize) {
        self.current = index.min(self.steps - 1);
    }

    /// Advances playback if a cadence interval has elapsed. Returns the new
    /// step index when the engine advanced, `None` otherwise. Reaching the
    /// last step transitions to `Paused` and disarms the cadence; that is
    /// normal completion, not an error.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        let due = match self.last_advance {
            Some(last) => now.saturating_duration_since(last) >= self.cadence,
            None => false,
        };
        if !due {
            return None;
        }
        if self.current < self.steps - 1 {
            self.current += 1;
            self.last_advance = Some(now);
            Some(self.current)
        } else {
            self.status = PlaybackStatus::Paused;
            self.last_advance = None;
            None
        }
    }

    /// Re-initializes the engine for a new trace: `Stopped`, step 0,
    /// cadence disarmed.
    pub fn reset(&mut self, steps: usize) {
        self.steps = steps.max(1);
        self.current = 0;
        self.status = PlaybackStatus::Stopped;
        self.last_advance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(engine: &ReplayEngine, now: Instant) -> Instant {
        now + engine.cadence() + Duration::from_millis(10)
    }

    #[test]
    fn starts_stopped_at_step_zero() {
        let engine = ReplayEngine::new(5);
        assert_eq!(engine.status(), PlaybackStatus::Stopped);
        assert_eq!(engine.current_step(), 0);
    }

    #[test]
    fn play_arms_the_cadence_and_ticks_advance() {
        let mut engine = ReplayEngine::new(3);
        let t0 = Instant::now();
        engine.play(t0);
        assert!(engine.is_playing());

        // not due yet
        assert_eq!(engine.tick(t0), None);

        let t1 = after(&engine, t0);
        assert_eq!(engine.tick(t1), Some(1));
        let t2 = after(&engine, t1);
        assert_eq!(engine.tick(t2), Some(2));

        // last step reached: the next due tick completes playback
        let t3 = after(&engine, t2);
        assert_eq!(engine.tick(t3), None);
        assert_eq!(engine.status(), PlaybackStatus::Paused);
        assert_eq!(engine.current_step(), 2);

        // no stray advances after completion, however far time moves
        let t4 = after(&engine, t3);
        assert_eq!(engine.tick(t4), None);
        assert_eq!(engine.current_step(), 2);
    }

    #[test]
    fn pause_preserves_position() {
        let mut engine = ReplayEngine::new(4);
        let t0 = Instant::now();
        engine.play(t0);
        let t1 = after(&engine, t0);
        engine.tick(t1);
        engine.pause();
        assert_eq!(engine.status(), PlaybackStatus::Paused);
        assert_eq!(engine.current_step(), 1);

        // paused engines ignore due ticks
        assert_eq!(engine.tick(after(&engine, t1)), None);
    }

    #[test]
    fn pause_is_a_noop_unless_playing() {
        let mut engine = ReplayEngine::new(4);
        engine.pause();
        assert_eq!(engine.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn play_on_last_step_settles_paused_without_cadence() {
        let mut engine = ReplayEngine::new(1);
        let t0 = Instant::now();
        engine.play(t0);
        assert_eq!(engine.status(), PlaybackStatus::Paused);
        assert_eq!(engine.tick(after(&engine, t0)), None);
        assert_eq!(engine.current_step(), 0);
    }

    #[test]
    fn start_and_end_jumps_from_any_state() {
        let mut engine = ReplayEngine::new(10);
        engine.step_to_end();
        assert_eq!(engine.current_step(), 9);
        engine.step_to_start();
        assert_eq!(engine.current_step(), 0);

        let t0 = Instant::now();
        engine.play(t0);
        engine.step_to_end();
        // jumping does not implicitly pause
        assert!(engine.is_playing());
        assert_eq!(engine.current_step(), 9);
        engine.step_to_start();
        assert!(engine.is_playing());
        assert_eq!(engine.current_step(), 0);
    }

    #[test]
    fn seek_clamps_out_of_range_indices() {
        let mut engine = ReplayEngine::new(5);
        for index in [0usize, 3, 4, 5, 100, usize::MAX] {
            engine.seek(index);
            assert!(engine.current_step() <= 4);
        }
        engine.seek(usize::MAX);
        assert_eq!(engine.current_step(), 4);
        engine.seek(0);
        assert_eq!(engine.current_step(), 0);
    }

    #[test]
    fn reset_discards_the_running_cadence() {
        let mut engine = ReplayEngine::new(5);
        let t0 = Instant::now();
        engine.play(t0);
        let t1 = after(&engine, t0);
        engine.tick(t1);

        engine.reset(2);
        assert_eq!(engine.status(), PlaybackStatus::Stopped);
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.step_count(), 2);
        // the old cadence cannot fire into the new trace
        assert_eq!(engine.tick(after(&engine, t1)), None);
    }

    #[test]
    fn zero_step_count_is_lifted_to_one() {
        let mut engine = ReplayEngine::new(0);
        assert_eq!(engine.step_count(), 1);
        engine.seek(10);
        assert_eq!(engine.current_step(), 0);
    }
}
