//! Stepped playback across sets
//!
//! The host feeds elapsed time into `update`; a `PlaybackTimer` accumulates it
//! and fires one tick per interval, like a fixed-timestep game loop. The timer
//! only exists while playing, so dropping it (stop, end of timeline, closing
//! the session) is the cancellation.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TICKS_PER_UPDATE, PLAYBACK_INTERVAL_MS};

/// Playback state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackPhase {
    #[default]
    Stopped,
    Playing,
}

/// Fixed-interval tick source, alive only while playing
#[derive(Debug, Clone)]
pub struct PlaybackTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl PlaybackTimer {
    fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Add elapsed time and return how many whole intervals are now due
    fn accumulate(&mut self, dt_ms: f64) -> u32 {
        // Clamp to avoid a long catch-up after the tab was hidden
        let max_ms = self.interval_ms * MAX_TICKS_PER_UPDATE as f64;
        self.elapsed_ms += dt_ms.clamp(0.0, max_ms);

        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms && due < MAX_TICKS_PER_UPDATE {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }
}

/// Result of a single playback tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// Moved to the given set
    Advanced(usize),
    /// Ran past the last set: stopped and rewound to the first
    Finished,
}

/// Playback driver: owns the phase and the timer, not the set index
#[derive(Debug, Clone)]
pub struct Playback {
    phase: PlaybackPhase,
    timer: Option<PlaybackTimer>,
    interval_ms: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(PLAYBACK_INTERVAL_MS)
    }
}

impl Playback {
    pub fn new(interval_ms: f64) -> Self {
        let interval_ms = if interval_ms.is_finite() && interval_ms > 0.0 {
            interval_ms
        } else {
            log::warn!("Invalid playback interval {interval_ms}, using {PLAYBACK_INTERVAL_MS}ms");
            PLAYBACK_INTERVAL_MS
        };
        Self {
            phase: PlaybackPhase::Stopped,
            timer: None,
            interval_ms,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Start playing. Any running timer is replaced, so at most one exists.
    pub fn play(&mut self) {
        self.timer = Some(PlaybackTimer::new(self.interval_ms));
        self.phase = PlaybackPhase::Playing;
    }

    /// Stop playing and cancel the timer. The current set is kept.
    pub fn stop(&mut self) {
        self.timer = None;
        self.phase = PlaybackPhase::Stopped;
    }

    /// Advance one set. `current` is rewound to 0 when the timeline ends.
    pub fn tick(&mut self, current: &mut usize, frame_count: usize) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        let next = *current + 1;
        if next >= frame_count {
            self.stop();
            *current = 0;
            TickOutcome::Finished
        } else {
            *current = next;
            TickOutcome::Advanced(next)
        }
    }

    /// Feed elapsed host time; fires every tick that came due
    ///
    /// Returns the outcomes in order. Stops early once the timeline finishes.
    pub fn update(&mut self, dt_ms: f64, current: &mut usize, frame_count: usize) -> Vec<TickOutcome> {
        let due = match self.timer.as_mut() {
            Some(timer) => timer.accumulate(dt_ms),
            None => return Vec::new(),
        };

        let mut outcomes = Vec::with_capacity(due as usize);
        for _ in 0..due {
            let outcome = self.tick(current, frame_count);
            outcomes.push(outcome);
            if outcome == TickOutcome::Finished {
                break;
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_to_end_then_rewinds() {
        let mut playback = Playback::default();
        let mut current = 0;
        playback.play();

        assert_eq!(playback.tick(&mut current, 3), TickOutcome::Advanced(1));
        assert_eq!(playback.tick(&mut current, 3), TickOutcome::Advanced(2));
        assert!(playback.is_playing());

        assert_eq!(playback.tick(&mut current, 3), TickOutcome::Finished);
        assert_eq!(playback.phase(), PlaybackPhase::Stopped);
        assert_eq!(current, 0);
        assert!(playback.timer.is_none());
    }

    #[test]
    fn test_stop_keeps_position() {
        let mut playback = Playback::default();
        let mut current = 0;
        playback.play();
        playback.tick(&mut current, 5);
        playback.tick(&mut current, 5);
        playback.stop();

        assert_eq!(current, 2);
        assert_eq!(playback.tick(&mut current, 5), TickOutcome::Idle);
        assert_eq!(current, 2);
        assert!(playback.timer.is_none());
    }

    #[test]
    fn test_play_restarts_timer() {
        let mut playback = Playback::new(100.0);
        let mut current = 0;
        playback.play();
        assert!(playback.update(60.0, &mut current, 4).is_empty());

        // Restarting discards the partial interval
        playback.play();
        assert!(playback.update(60.0, &mut current, 4).is_empty());
        assert_eq!(playback.update(40.0, &mut current, 4), vec![TickOutcome::Advanced(1)]);
    }

    #[test]
    fn test_update_fires_due_ticks() {
        let mut playback = Playback::new(1000.0);
        let mut current = 0;
        playback.play();

        assert!(playback.update(999.0, &mut current, 10).is_empty());
        assert_eq!(playback.update(1.0, &mut current, 10), vec![TickOutcome::Advanced(1)]);
        assert_eq!(
            playback.update(2500.0, &mut current, 10),
            vec![TickOutcome::Advanced(2), TickOutcome::Advanced(3)]
        );
        assert_eq!(current, 3);
    }

    #[test]
    fn test_update_stops_at_end() {
        let mut playback = Playback::new(10.0);
        let mut current = 0;
        playback.play();

        let outcomes = playback.update(50.0, &mut current, 2);
        assert_eq!(outcomes, vec![TickOutcome::Advanced(1), TickOutcome::Finished]);
        assert_eq!(current, 0);
        assert!(!playback.is_playing());
        assert!(playback.update(50.0, &mut current, 2).is_empty());
    }

    #[test]
    fn test_update_caps_catch_up() {
        let mut playback = Playback::new(10.0);
        let mut current = 0;
        playback.play();
        let outcomes = playback.update(1_000_000.0, &mut current, 1000);
        assert_eq!(outcomes.len(), MAX_TICKS_PER_UPDATE as usize);
    }

    #[test]
    fn test_single_set_finishes_on_first_tick() {
        let mut playback = Playback::default();
        let mut current = 0;
        playback.play();
        assert_eq!(playback.tick(&mut current, 1), TickOutcome::Finished);
        assert_eq!(current, 0);
    }

    #[test]
    fn test_invalid_interval_falls_back() {
        assert_eq!(Playback::new(0.0).interval_ms(), PLAYBACK_INTERVAL_MS);
        assert_eq!(Playback::new(f64::NAN).interval_ms(), PLAYBACK_INTERVAL_MS);
        assert_eq!(Playback::new(250.0).interval_ms(), 250.0);
    }
}
