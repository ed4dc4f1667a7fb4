//! Countdown state for the pomodoro widget.
//!
//! The timer is a plain value with no clock of its own: the host calls
//! [`TimerModel::tick`] once per second and reads the derived accessors
//! afterwards. Durations are whole minutes clamped to
//! [`MIN_MINUTES`]..=[`MAX_MINUTES`], so none of the operations can fail.
//!
//! # Basic Usage
//!
//! ```rust
//! use binary_pomodoro::timer::TimerModel;
//!
//! let mut timer = TimerModel::new(1);
//! timer.start();
//! timer.tick();
//!
//! assert_eq!(timer.display_time(), "00:59");
//! assert!(timer.is_running());
//! ```

use std::fmt;

/// Shortest duration the timer accepts, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest duration the timer accepts, in minutes.
pub const MAX_MINUTES: u32 = 60;
/// Duration a fresh timer starts with, in minutes.
pub const DEFAULT_MINUTES: u32 = 5;

/// Which of the three lifecycle states the timer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not running, with time left on the clock (fresh or paused).
    Idle,
    /// Counting down.
    Running,
    /// Remaining time reached zero. Left via [`TimerModel::start`],
    /// [`TimerModel::toggle`] or [`TimerModel::reset`].
    Completed,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// What a single call to [`TimerModel::tick_transition`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer was not running, nothing changed.
    Idle,
    /// One second elapsed and the timer keeps running.
    Counted,
    /// One second elapsed and it was the last one; the timer stopped itself.
    Completed,
}

/// Countdown state: configured duration, time left and the running flag.
///
/// `remaining_seconds` only ever moves down by one per tick while running,
/// and a timer that reaches zero always stops itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerModel {
    minutes: u32,
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32
}

impl TimerModel {
    /// Creates a stopped timer set to `minutes`, clamped to the valid range.
    pub fn new(minutes: i64) -> Self {
        let minutes = clamp_minutes(minutes);
        let total_seconds = minutes * 60;
        Self {
            minutes,
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    /// Sets the duration and refills the clock.
    ///
    /// Values outside [`MIN_MINUTES`]..=[`MAX_MINUTES`] snap to the nearest
    /// bound. The running flag is left alone; callers only change the
    /// duration while the timer is stopped.
    pub fn set_minutes(&mut self, minutes: i64) {
        self.minutes = clamp_minutes(minutes);
        self.total_seconds = self.minutes * 60;
        self.remaining_seconds = self.total_seconds;
    }

    /// Starts or resumes the countdown. A completed timer is refilled first,
    /// so a running timer always has time left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binary_pomodoro::timer::{TimerModel, TimerState};
    ///
    /// let mut timer = TimerModel::new(1);
    /// timer.start();
    /// while timer.tick() {}
    /// assert_eq!(timer.state(), TimerState::Completed);
    ///
    /// timer.start();
    /// assert_eq!(timer.state(), TimerState::Running);
    /// assert_eq!(timer.display_time(), "01:00");
    /// ```
    pub fn start(&mut self) {
        if self.is_complete() {
            self.reset();
        }
        self.running = true;
    }

    /// Pauses the countdown.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Refills the clock and stops.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.running = false;
    }

    /// Play/pause button semantics: a completed timer is reset before it is
    /// started again, otherwise the running flag flips.
    pub fn toggle(&mut self) {
        if self.is_complete() {
            self.reset();
        }
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advances the countdown by one second and returns whether the timer is
    /// still running afterwards.
    pub fn tick(&mut self) -> bool {
        self.tick_transition();
        self.running
    }

    /// Advances the countdown by one second and reports what happened.
    ///
    /// Hosts use this instead of [`tick`](Self::tick) when they need to react
    /// to the moment the countdown finishes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binary_pomodoro::timer::{Tick, TimerModel};
    ///
    /// let mut timer = TimerModel::new(1);
    /// assert_eq!(timer.tick_transition(), Tick::Idle);
    ///
    /// timer.start();
    /// assert_eq!(timer.tick_transition(), Tick::Counted);
    ///
    /// let last = std::iter::repeat_with(|| timer.tick_transition())
    ///     .find(|t| *t != Tick::Counted);
    /// assert_eq!(last, Some(Tick::Completed));
    /// assert!(timer.is_complete());
    /// ```
    pub fn tick_transition(&mut self) -> Tick {
        if !self.running || self.remaining_seconds == 0 {
            return Tick::Idle;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            return Tick::Completed;
        }
        Tick::Counted
    }

    /// Configured duration in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Configured duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Seconds left on the clock.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Whether the countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the clock has run out.
    pub fn is_complete(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// The current lifecycle state.
    pub fn state(&self) -> TimerState {
        if self.is_complete() {
            TimerState::Completed
        } else if self.running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn display_time(&self) -> String {
        let mins = self.remaining_seconds / 60;
        let secs = self.remaining_seconds % 60;
        format!("{:02}:{:02}", mins, secs)
    }

    /// Elapsed share of the duration, from 0.0 to 100.0.
    pub fn progress_percent(&self) -> f64 {
        if self.total_seconds == 0 {
            return 100.0;
        }
        let elapsed = self.total_seconds - self.remaining_seconds;
        elapsed as f64 / self.total_seconds as f64 * 100.0
    }
}

impl Default for TimerModel {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_minutes_and_stopped() {
        let timer = TimerModel::default();

        assert_eq!(timer.minutes(), 5);
        assert_eq!(timer.total_seconds(), 300);
        assert_eq!(timer.remaining_seconds(), 300);
        assert!(!timer.is_running());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_set_minutes_in_range() {
        let mut timer = TimerModel::default();

        for m in 1..=60 {
            timer.set_minutes(m);
            assert_eq!(timer.total_seconds(), m as u32 * 60);
            assert_eq!(timer.remaining_seconds(), timer.total_seconds());
        }
    }

    #[test]
    fn test_set_minutes_clamps_to_bounds() {
        let mut timer = TimerModel::default();

        timer.set_minutes(0);
        assert_eq!(timer.minutes(), 1);
        timer.set_minutes(-20);
        assert_eq!(timer.minutes(), 1);
        timer.set_minutes(61);
        assert_eq!(timer.minutes(), 60);
        timer.set_minutes(i64::MAX);
        assert_eq!(timer.total_seconds(), 3600);
    }

    #[test]
    fn test_set_minutes_keeps_running_flag() {
        let mut timer = TimerModel::new(3);
        timer.start();
        timer.tick();

        timer.set_minutes(4);

        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 240);
    }

    #[test]
    fn test_tick_only_counts_while_running() {
        let mut timer = TimerModel::new(1);

        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 60);

        timer.start();
        for expected in (55..60).rev() {
            assert!(timer.tick());
            assert_eq!(timer.remaining_seconds(), expected);
        }
    }

    #[test]
    fn test_tick_stops_at_zero() {
        let mut timer = TimerModel::new(1);
        timer.start();

        for _ in 0..59 {
            assert_eq!(timer.tick_transition(), Tick::Counted);
        }
        assert_eq!(timer.tick_transition(), Tick::Completed);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert!(timer.is_complete());
        assert_eq!(timer.state(), TimerState::Completed);

        // Further ticks are no-ops and never underflow.
        assert_eq!(timer.tick_transition(), Tick::Idle);
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_start_on_completed_timer_restarts_full_duration() {
        let mut timer = TimerModel::new(1);
        timer.start();
        while timer.tick() {}
        assert_eq!(timer.state(), TimerState::Completed);

        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.tick_transition(), Tick::Counted);
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn test_running_timer_always_has_time_left() {
        let mut timer = TimerModel::new(1);
        for _ in 0..3 {
            timer.start();
            while timer.tick() {
                assert!(timer.remaining_seconds() > 0);
            }
            assert!(!(timer.is_running() && timer.remaining_seconds() == 0));
        }
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut once = TimerModel::new(2);
        once.start();
        once.tick();
        let mut twice = once.clone();

        once.pause();
        twice.pause();
        twice.pause();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = TimerModel::new(2);
        timer.start();
        let snapshot = timer.clone();
        timer.start();
        assert_eq!(timer, snapshot);
    }

    #[test]
    fn test_reset_refills_and_stops() {
        let mut timer = TimerModel::new(2);
        timer.start();
        timer.tick();
        timer.tick();

        timer.reset();

        assert_eq!(timer.remaining_seconds(), 120);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_toggle_flips_running() {
        let mut timer = TimerModel::new(2);

        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_toggle_restarts_completed_timer() {
        let mut timer = TimerModel::new(1);
        timer.start();
        while timer.tick() {}
        assert_eq!(timer.state(), TimerState::Completed);

        timer.toggle();

        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_display_time() {
        let mut timer = TimerModel::new(6);
        timer.remaining_seconds = 305;
        assert_eq!(timer.display_time(), "05:05");

        timer.remaining_seconds = 0;
        assert_eq!(timer.display_time(), "00:00");

        timer.set_minutes(60);
        assert_eq!(timer.display_time(), "60:00");
    }

    #[test]
    fn test_progress_percent() {
        let mut timer = TimerModel::new(5);
        assert_eq!(timer.progress_percent(), 0.0);

        timer.remaining_seconds = 150;
        assert_eq!(timer.progress_percent(), 50.0);

        timer.remaining_seconds = 0;
        assert_eq!(timer.progress_percent(), 100.0);
    }

    #[test]
    fn test_progress_percent_with_zero_total() {
        let timer = TimerModel {
            minutes: 0,
            total_seconds: 0,
            remaining_seconds: 0,
            running: false,
        };
        assert_eq!(timer.progress_percent(), 100.0);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TimerState::Idle.to_string(), "idle");
        assert_eq!(TimerState::Running.to_string(), "running");
        assert_eq!(TimerState::Completed.to_string(), "completed");
    }
}
