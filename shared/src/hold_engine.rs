//! Hold-to-activate engine - the press-and-hold state machine
//!
//! Converts a sustained gesture into a completion after a fixed dwell time:
//! while a hold session is live, a repeating 50 ms tick advances a 0..=100
//! progress counter, and the 100th tick fulfills the target's wish and clears
//! the session. Releasing early or switching targets resets progress to 0.

use std::time::Duration;

use crate::roster::{CharacterId, Roster};

/// Period of the repeating hold tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Ticks required to fulfill a wish (100 × 50 ms = 5 s of continuous hold).
pub const COMPLETION_TICKS: u8 = 100;

/// Notification published on every session transition.
///
/// The owning view drains these once per frame to trigger one-shot effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldEvent {
    /// A hold session began for `target`.
    Started { target: CharacterId },
    /// The session ended before completion (release, pointer leave, or
    /// target switch); `progress` is the count reached before the reset.
    Broken { target: CharacterId, progress: u8 },
    /// The dwell completed and `target`'s wish is now fulfilled.
    Granted { target: CharacterId },
}

/// Handle for the repeating tick schedule.
///
/// Armed exactly while a session is live. Arming cancels any previous
/// schedule first (the sub-period residue is dropped), so two tick streams
/// can never drive one session.
#[derive(Debug, Default)]
struct TickTimer {
    armed: bool,
    residual: Duration,
}

impl TickTimer {
    fn arm(&mut self) {
        self.armed = true;
        self.residual = Duration::ZERO;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.residual = Duration::ZERO;
    }

    fn accumulate(&mut self, dt: Duration) {
        if self.armed {
            self.residual += dt;
        }
    }

    /// Consume one full period if one has elapsed. Re-checked between ticks
    /// so a disarm mid-batch stops the stream immediately.
    fn consume_period(&mut self) -> bool {
        if self.armed && self.residual >= TICK_PERIOD {
            self.residual -= TICK_PERIOD;
            true
        } else {
            false
        }
    }
}

/// The hold-to-activate state machine.
///
/// At most one session is live at any instant, global to the whole display.
/// The engine surfaces no errors: `begin` on an ineligible or already-held
/// target and `end` with no session are silent no-ops.
#[derive(Debug, Default)]
pub struct HoldEngine {
    target: Option<CharacterId>,
    progress: u8,
    timer: TickTimer,
    events: Vec<HoldEvent>,
}

impl HoldEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a hold session for `target`.
    ///
    /// Re-invocation on the already-held target is a no-op: progress keeps
    /// running and the tick schedule is not restarted. An unknown or
    /// already-fulfilled target leaves everything untouched, including a
    /// session live for someone else. Otherwise any previous session is
    /// discarded (progress and all) and a fresh one starts at 0.
    pub fn begin(&mut self, roster: &Roster, target: CharacterId) {
        if self.target == Some(target) {
            return;
        }
        if !roster.is_eligible(target) {
            return;
        }

        if let Some(prev) = self.target {
            self.events.push(HoldEvent::Broken {
                target: prev,
                progress: self.progress,
            });
        }

        self.target = Some(target);
        self.progress = 0;
        self.timer.arm();
        self.events.push(HoldEvent::Started { target });
    }

    /// End the live session, if any. Idempotent.
    pub fn end(&mut self) {
        if let Some(target) = self.target {
            self.events.push(HoldEvent::Broken {
                target,
                progress: self.progress,
            });
        }
        self.clear_session();
    }

    /// One tick of the repeating timer.
    ///
    /// Advances progress by a single step; the step that reaches
    /// `COMPLETION_TICKS` fulfills the target's wish and then clears the
    /// session exactly as `end` does. A tick with no live session does
    /// nothing.
    pub fn tick(&mut self, roster: &mut Roster) {
        let target = match self.target {
            Some(target) => target,
            None => return,
        };

        self.progress += 1;
        if self.progress >= COMPLETION_TICKS {
            roster.fulfill(target);
            self.events.push(HoldEvent::Granted { target });
            self.clear_session();
        }
    }

    /// Feed a frame's wall-clock delta into the tick schedule, firing one
    /// tick per full elapsed period.
    ///
    /// Time accrues only while a session is live; the remainder below one
    /// period carries to the next frame. A completion mid-batch disarms the
    /// schedule, so the rest of the batch is dropped.
    pub fn advance(&mut self, dt: Duration, roster: &mut Roster) {
        self.timer.accumulate(dt);
        while self.timer.consume_period() {
            self.tick(roster);
        }
    }

    /// Identifier of the held character, if a session is live.
    pub fn active_target(&self) -> Option<CharacterId> {
        self.target
    }

    /// Whether a session is live.
    pub fn is_holding(&self) -> bool {
        self.target.is_some()
    }

    /// Progress (0..=100) as reported for `id`: the live count for the held
    /// character, 0 for everyone else.
    pub fn progress_of(&self, id: CharacterId) -> u8 {
        if self.target == Some(id) {
            self.progress
        } else {
            0
        }
    }

    /// `progress_of` as a 0.0..=1.0 fraction, for proportional-width bars.
    pub fn fraction_of(&self, id: CharacterId) -> f32 {
        f32::from(self.progress_of(id)) / f32::from(COMPLETION_TICKS)
    }

    /// Take the transitions published since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<HoldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset progress, clear the target, and disarm the tick schedule.
    fn clear_session(&mut self) {
        self.target = None;
        self.progress = 0;
        self.timer.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(engine: &mut HoldEngine, roster: &mut Roster, n: u32) {
        for _ in 0..n {
            engine.tick(roster);
        }
    }

    #[test]
    fn test_full_dwell_fulfills_target() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        assert!(engine.is_holding());
        run_ticks(&mut engine, &mut roster, 100);

        assert!(roster.is_fulfilled(1));
        assert_eq!(engine.progress_of(1), 0);
        assert!(!engine.is_holding());
    }

    #[test]
    fn test_early_release_resets_progress() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 30);
        assert_eq!(engine.progress_of(1), 30);

        engine.end();
        assert_eq!(engine.progress_of(1), 0);
        assert!(!roster.is_fulfilled(1));
        assert!(!engine.is_holding());
    }

    #[test]
    fn test_switching_targets_discards_progress() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 40);

        engine.begin(&roster, 2);
        assert_eq!(engine.progress_of(1), 0);
        assert_eq!(engine.progress_of(2), 0);
        assert_eq!(engine.active_target(), Some(2));

        run_ticks(&mut engine, &mut roster, 10);
        assert_eq!(engine.progress_of(2), 10);
        assert_eq!(engine.progress_of(1), 0);
    }

    #[test]
    fn test_rebegin_same_target_keeps_progress() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 25);

        engine.begin(&roster, 1);
        assert_eq!(engine.progress_of(1), 25);
    }

    #[test]
    fn test_rebegin_same_target_does_not_rearm_timer() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        // Half a period accrues, then a duplicate begin arrives. A restart
        // would zero the residual; the second half-period must still finish
        // the first tick.
        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(25), &mut roster);
        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(25), &mut roster);

        assert_eq!(engine.progress_of(1), 1);
    }

    #[test]
    fn test_begin_on_fulfilled_target_is_noop() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();
        roster.fulfill(1);

        engine.begin(&roster, 1);
        assert!(!engine.is_holding());
        assert_eq!(engine.progress_of(1), 0);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_begin_on_unknown_id_is_noop() {
        let roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 42);
        assert!(!engine.is_holding());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_begin_on_ineligible_target_keeps_existing_session() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();
        roster.fulfill(2);

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 10);

        // The violated precondition must not disturb the live session.
        engine.begin(&roster, 2);
        assert_eq!(engine.active_target(), Some(1));
        assert_eq!(engine.progress_of(1), 10);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.end();
        assert!(!engine.is_holding());

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 5);
        engine.end();
        engine.end();
        assert!(!engine.is_holding());
        assert_eq!(engine.progress_of(1), 0);
        assert!(!roster.is_fulfilled(1));
    }

    #[test]
    fn test_at_most_one_nonzero_progress() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 60);
        let nonzero = [1, 2, 3]
            .iter()
            .filter(|&&id| engine.progress_of(id) > 0)
            .count();
        assert_eq!(nonzero, 1);

        engine.begin(&roster, 3);
        run_ticks(&mut engine, &mut roster, 5);
        assert_eq!(engine.progress_of(1), 0);
        assert_eq!(engine.progress_of(2), 0);
        assert_eq!(engine.progress_of(3), 5);
    }

    #[test]
    fn test_scenario_three_characters() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        // Hold A (Luna) for half the dwell.
        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 50);
        assert_eq!(engine.progress_of(1), 50);
        assert_eq!(engine.progress_of(2), 0);
        assert_eq!(engine.progress_of(3), 0);

        // Release: progress gone, nothing fulfilled.
        engine.end();
        assert_eq!(engine.progress_of(1), 0);
        assert!(!roster.is_fulfilled(1));

        // Hold B (Mira) for the full dwell.
        engine.begin(&roster, 2);
        run_ticks(&mut engine, &mut roster, 100);
        assert!(roster.is_fulfilled(2));
        assert_eq!(engine.progress_of(2), 0);
        assert!(!engine.is_holding());

        // The timer is stopped: wall time no longer produces ticks.
        engine.advance(Duration::from_secs(1), &mut roster);
        assert_eq!(engine.progress_of(2), 0);
        assert!(!engine.is_holding());
    }

    #[test]
    fn test_advance_converts_wall_time_to_ticks() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(125), &mut roster);
        assert_eq!(engine.progress_of(1), 2);

        // The 25 ms remainder carries into the next frame.
        engine.advance(Duration::from_millis(25), &mut roster);
        assert_eq!(engine.progress_of(1), 3);
    }

    #[test]
    fn test_advance_without_session_accrues_nothing() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.advance(Duration::from_secs(1), &mut roster);
        assert!(!engine.is_holding());

        // None of that second may count toward a later session.
        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(50), &mut roster);
        assert_eq!(engine.progress_of(1), 1);
    }

    #[test]
    fn test_residual_dropped_across_sessions() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(49), &mut roster);
        engine.end();

        engine.begin(&roster, 1);
        engine.advance(Duration::from_millis(49), &mut roster);
        assert_eq!(engine.progress_of(1), 0);
        engine.advance(Duration::from_millis(1), &mut roster);
        assert_eq!(engine.progress_of(1), 1);
    }

    #[test]
    fn test_completion_stops_the_batch() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        run_ticks(&mut engine, &mut roster, 99);

        // One period completes the dwell; the other nine in this frame's
        // delta must be dropped with the disarmed schedule.
        engine.advance(Duration::from_millis(500), &mut roster);
        assert!(roster.is_fulfilled(1));
        assert!(!engine.is_holding());

        engine.begin(&roster, 2);
        engine.advance(Duration::from_millis(50), &mut roster);
        assert_eq!(engine.progress_of(2), 1);
    }

    #[test]
    fn test_event_stream_order() {
        let mut roster = Roster::new();
        let mut engine = HoldEngine::new();

        engine.begin(&roster, 1);
        assert_eq!(engine.drain_events(), vec![HoldEvent::Started { target: 1 }]);

        run_ticks(&mut engine, &mut roster, 100);
        assert_eq!(engine.drain_events(), vec![HoldEvent::Granted { target: 1 }]);

        engine.begin(&roster, 2);
        run_ticks(&mut engine, &mut roster, 12);
        engine.begin(&roster, 3);
        engine.end();
        assert_eq!(
            engine.drain_events(),
            vec![
                HoldEvent::Started { target: 2 },
                HoldEvent::Broken {
                    target: 2,
                    progress: 12
                },
                HoldEvent::Started { target: 3 },
                HoldEvent::Broken {
                    target: 3,
                    progress: 0
                },
            ]
        );

        // A drain with nothing new yields nothing.
        assert!(engine.drain_events().is_empty());
    }
}
