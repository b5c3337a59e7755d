use std::fmt;
use std::time::Duration;

use crate::scoring::{round2, score_for};

/// Countdown length for every session, in seconds
pub const COUNTDOWN_SECS: f64 = 10.0;

/// At or below this many seconds the countdown is hidden from the player
pub const MASK_THRESHOLD_SECS: f64 = 5.0;

/// Period of the tick source driving `Session::tick`
pub const TICK_RATE_MS: u64 = 100;

/// Placeholder shown instead of the countdown once it is masked
pub const MASKED_PLACEHOLDER: &str = "???";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Timeout,
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended(EndReason),
}

/// What the host is allowed to show for the countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState {
    Time(f64),
    Masked,
}

impl DisplayState {
    pub fn from_remaining(remaining: f64) -> Self {
        if remaining <= MASK_THRESHOLD_SECS {
            DisplayState::Masked
        } else {
            DisplayState::Time(remaining)
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, DisplayState::Masked)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Time(secs) => write!(f, "Time: {secs:.2}"),
            DisplayState::Masked => f.write_str(MASKED_PLACEHOLDER),
        }
    }
}

/// One countdown-and-hit attempt.
///
/// The host owns the session and forwards its events to it: `start` when the
/// player presses start, `tick` on every timer firing and `register_hit` when
/// the striker touches the bell. Calls made outside a running session are
/// ignored so a late timer or a stray collision can never change the outcome.
#[derive(Debug, Clone)]
pub struct Session {
    remaining: f64,
    score: u32,
    phase: Phase,
    tick_armed: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            remaining: COUNTDOWN_SECS,
            score: 0,
            phase: Phase::Idle,
            tick_armed: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything and arm the tick source
    pub fn start(&mut self) {
        self.remaining = COUNTDOWN_SECS;
        self.score = 0;
        self.phase = Phase::Running;
        self.tick_armed = true;
        tracing::info!(countdown = COUNTDOWN_SECS, "session started");
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// The countdown is kept at two decimals so repeated 0.1s steps land on
    /// exact values. Reaching zero ends the session and disarms the ticker.
    pub fn tick(&mut self, dt: f64) -> DisplayState {
        if !self.is_running() {
            return self.display_state();
        }
        if !dt.is_finite() || dt < 0.0 {
            tracing::debug!(dt, "ignoring tick with an invalid step");
            return self.display_state();
        }

        self.remaining = round2(self.remaining - dt);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.end(EndReason::Timeout);
            tracing::info!("countdown ran out");
        }

        self.display_state()
    }

    /// Score the hit if the session is running. Returns the score when the
    /// hit was accepted, `None` when it was ignored.
    pub fn register_hit(&mut self) -> Option<u32> {
        if !self.is_running() {
            tracing::debug!(phase = ?self.phase, "ignoring hit outside a running session");
            return None;
        }

        self.score = score_for(self.remaining);
        self.end(EndReason::Hit);
        tracing::info!(remaining = self.remaining, score = self.score, "bell hit");

        Some(self.score)
    }

    fn end(&mut self, reason: EndReason) {
        self.phase = Phase::Ended(reason);
        self.tick_armed = false;
    }

    fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::from_remaining(self.remaining)
    }

    pub fn remaining_time(&self) -> f64 {
        self.remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    /// Whether the host should keep delivering ticks
    pub fn is_ticking(&self) -> bool {
        self.tick_armed
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(TICK_RATE_MS)
    }

    /// Seconds advanced by one tick of the tick source
    pub fn tick_secs() -> f64 {
        TICK_RATE_MS as f64 / 1000_f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::MAX_SCORE;
    use assert_matches::assert_matches;

    fn run_ticks(session: &mut Session, n: usize) -> Vec<DisplayState> {
        (0..n).map(|_| session.tick(Session::tick_secs())).collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.remaining_time(), COUNTDOWN_SECS);
        assert_eq!(session.score(), 0);
        assert!(!session.started());
        assert!(!session.ended());
        assert!(!session.is_ticking());
    }

    #[test]
    fn test_start_resets_and_arms_ticker() {
        let mut session = Session::new();
        session.start();

        assert_eq!(session.phase(), Phase::Running);
        assert!(session.started());
        assert!(!session.ended());
        assert!(session.is_ticking());
        assert_eq!(session.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut session = Session::new();

        let display = session.tick(0.1);

        assert_eq!(session.remaining_time(), COUNTDOWN_SECS);
        assert_eq!(display, DisplayState::Time(COUNTDOWN_SECS));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_negative_or_nan_tick_is_ignored() {
        let mut session = Session::new();
        session.start();
        session.tick(0.1);

        for dt in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(session.tick(dt), DisplayState::Time(9.9));
        }

        assert_eq!(session.remaining_time(), 9.9);
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.is_ticking());

        session.tick(0.1);
        assert_eq!(session.remaining_time(), 9.8);
    }

    #[test]
    fn test_hit_before_start_is_ignored() {
        let mut session = Session::new();

        assert_eq!(session.register_hit(), None);
        assert_eq!(session.score(), 0);
        assert!(!session.ended());
    }

    #[test]
    fn test_ticks_accumulate_without_drift() {
        for n in 0..=100usize {
            let mut session = Session::new();
            session.start();
            run_ticks(&mut session, n);

            let expected = round2(COUNTDOWN_SECS - n as f64 * 0.1).max(0.0);
            assert_eq!(session.remaining_time(), expected, "after {n} ticks");
        }
    }

    #[test]
    fn test_display_masked_at_and_below_threshold() {
        let mut session = Session::new();
        session.start();

        for display in run_ticks(&mut session, 100) {
            match display {
                DisplayState::Time(secs) => assert!(secs > MASK_THRESHOLD_SECS),
                DisplayState::Masked => {}
            }
        }

        let mut session = Session::new();
        session.start();
        let displays = run_ticks(&mut session, 50);

        assert_eq!(displays[48], DisplayState::Time(5.1));
        assert_eq!(session.remaining_time(), 5.0);
        assert_eq!(displays[49], DisplayState::Masked);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(DisplayState::Time(10.0).to_string(), "Time: 10.00");
        assert_eq!(DisplayState::Time(7.3).to_string(), "Time: 7.30");
        assert_eq!(DisplayState::Masked.to_string(), "???");
        assert!(DisplayState::from_remaining(5.0).is_masked());
        assert!(!DisplayState::from_remaining(5.01).is_masked());
    }

    #[test]
    fn test_timeout_ends_session() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 100);

        assert_eq!(session.remaining_time(), 0.0);
        assert_eq!(session.phase(), Phase::Ended(EndReason::Timeout));
        assert!(session.ended());
        assert!(!session.is_ticking());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_large_tick_clamps_to_zero() {
        let mut session = Session::new();
        session.start();

        let display = session.tick(25.0);

        assert_eq!(session.remaining_time(), 0.0);
        assert!(display.is_masked());
        assert!(session.ended());
    }

    #[test]
    fn test_tick_after_end_changes_nothing() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 30);
        session.register_hit();

        let remaining = session.remaining_time();
        let score = session.score();
        run_ticks(&mut session, 10);

        assert_eq!(session.remaining_time(), remaining);
        assert_eq!(session.score(), score);
    }

    #[test]
    fn test_hit_at_two_seconds() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 80);
        assert_eq!(session.remaining_time(), 2.0);

        assert_eq!(session.register_hit(), Some(8000));
        assert_eq!(session.phase(), Phase::Ended(EndReason::Hit));
        assert!(!session.is_ticking());
    }

    #[test]
    fn test_hit_on_last_tick_before_zero() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 99);

        assert_eq!(session.register_hit(), Some(MAX_SCORE - 100));
    }

    #[test]
    fn test_second_hit_is_ignored() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 20);

        let first = session.register_hit();
        assert_matches!(first, Some(2000));
        run_ticks(&mut session, 5);

        assert_eq!(session.register_hit(), None);
        assert_eq!(session.score(), 2000);
    }

    #[test]
    fn test_hit_after_timeout_is_ignored() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 100);

        assert_eq!(session.register_hit(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), Phase::Ended(EndReason::Timeout));
    }

    #[test]
    fn test_restart_after_end() {
        let mut session = Session::new();
        session.start();
        run_ticks(&mut session, 50);
        session.register_hit();

        session.start();

        assert_eq!(session.remaining_time(), COUNTDOWN_SECS);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.is_ticking());
    }

    #[test]
    fn test_half_way_hit_scenario() {
        let mut session = Session::new();
        session.start();
        let displays = run_ticks(&mut session, 50);

        assert_eq!(session.remaining_time(), 5.0);
        assert_matches!(displays.last(), Some(DisplayState::Masked));
        assert_eq!(session.register_hit(), Some(5000));
        assert_eq!(session.score(), 5000);
    }
}
