//! List refresh transitions
//!
//! A two-phase visual effect bracketing a content swap: the visible list
//! animates out, the content is swapped, the new list animates back in.
//! Modeled as an explicit state machine driven by per-frame ticks;
//! starting a new transition mid-flight abandons the running one and
//! re-enters the out phase (cancel-and-restart).

use app_core::AnimationKind;
use std::time::{Duration, Instant};

/// Horizontal distance, in points, the list travels in a slide.
const SLIDE_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AnimatingOut(Instant),
    AnimatingIn(Instant),
}

/// Emitted by [`ListTransition::tick`] exactly once per run, at the
/// boundary between the two phases. The owner swaps list content on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Swap,
}

/// Two-phase transition state for one list instance.
pub struct ListTransition {
    kind: AnimationKind,
    duration: Duration,
    phase: Phase,
}

impl ListTransition {
    pub fn new() -> Self {
        Self {
            kind: AnimationKind::Fade,
            duration: Duration::from_millis(200),
            phase: Phase::Idle,
        }
    }

    pub fn configure(&mut self, kind: AnimationKind, duration_ms: u64) {
        self.kind = kind;
        self.duration = Duration::from_millis(duration_ms.max(1));
    }

    /// Start the out phase.
    ///
    /// Returns `false` for kind `None`, meaning no bracket runs and the
    /// caller should swap immediately. If a transition is already in
    /// flight it is abandoned and a fresh out phase begins.
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.kind == AnimationKind::None {
            self.phase = Phase::Idle;
            return false;
        }

        if self.phase != Phase::Idle {
            tracing::debug!("Restarting in-flight list transition");
        }
        self.phase = Phase::AnimatingOut(now);
        true
    }

    /// Advance the state machine. Returns `Some(Swap)` exactly when the
    /// out phase completes.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionEvent> {
        match self.phase {
            Phase::Idle => None,
            Phase::AnimatingOut(started) => {
                if now.saturating_duration_since(started) >= self.duration {
                    self.phase = Phase::AnimatingIn(now);
                    Some(TransitionEvent::Swap)
                } else {
                    None
                }
            }
            Phase::AnimatingIn(started) => {
                if now.saturating_duration_since(started) >= self.duration {
                    self.phase = Phase::Idle;
                }
                None
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// List opacity for the current frame (1.0 outside a fade).
    pub fn opacity(&self, now: Instant) -> f32 {
        if self.kind != AnimationKind::Fade {
            return 1.0;
        }

        match self.phase {
            Phase::Idle => 1.0,
            Phase::AnimatingOut(started) => 1.0 - ease_in_out_quad(self.progress(started, now)),
            Phase::AnimatingIn(started) => ease_in_out_quad(self.progress(started, now)),
        }
    }

    /// Horizontal list offset for the current frame (0.0 outside a slide).
    pub fn offset(&self, now: Instant) -> f32 {
        if self.kind != AnimationKind::Slide {
            return 0.0;
        }

        match self.phase {
            Phase::Idle => 0.0,
            // Out: drift right and away; in: re-enter from the left.
            Phase::AnimatingOut(started) => {
                SLIDE_DISTANCE * ease_in_out_quad(self.progress(started, now))
            }
            Phase::AnimatingIn(started) => {
                -SLIDE_DISTANCE * (1.0 - ease_in_out_quad(self.progress(started, now)))
            }
        }
    }

    fn progress(&self, started: Instant, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

impl Default for ListTransition {
    fn default() -> Self {
        Self::new()
    }
}

fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_kind_none_swaps_immediately() {
        let mut transition = ListTransition::new();
        transition.configure(AnimationKind::None, 200);

        let now = Instant::now();
        assert!(!transition.begin(now));
        assert!(!transition.is_active());
        assert_eq!(transition.tick(now), None);
    }

    #[test]
    fn test_fade_sequence() {
        let mut transition = ListTransition::new();
        transition.configure(AnimationKind::Fade, 200);

        let t0 = Instant::now();
        assert!(transition.begin(t0));
        assert!(transition.is_active());

        // Mid out phase: partially faded, no swap yet.
        assert_eq!(transition.tick(t0 + ms(100)), None);
        let opacity = transition.opacity(t0 + ms(100));
        assert!(opacity > 0.0 && opacity < 1.0);

        // Out phase completes: exactly one swap event, fully hidden.
        assert_eq!(transition.tick(t0 + ms(200)), Some(TransitionEvent::Swap));
        assert_eq!(transition.opacity(t0 + ms(200)), 0.0);

        // In phase completes: idle again, fully visible.
        assert_eq!(transition.tick(t0 + ms(400)), None);
        assert!(!transition.is_active());
        assert_eq!(transition.opacity(t0 + ms(400)), 1.0);
    }

    #[test]
    fn test_slide_offsets() {
        let mut transition = ListTransition::new();
        transition.configure(AnimationKind::Slide, 200);

        let t0 = Instant::now();
        transition.begin(t0);

        assert_eq!(transition.offset(t0), 0.0);
        assert_eq!(transition.opacity(t0 + ms(100)), 1.0);

        transition.tick(t0 + ms(200));
        // In phase starts offscreen left and comes home.
        assert_eq!(transition.offset(t0 + ms(200)), -SLIDE_DISTANCE);
        transition.tick(t0 + ms(400));
        assert_eq!(transition.offset(t0 + ms(400)), 0.0);
    }

    #[test]
    fn test_restart_mid_flight_defers_swap() {
        let mut transition = ListTransition::new();
        transition.configure(AnimationKind::Fade, 200);

        let t0 = Instant::now();
        transition.begin(t0);
        assert_eq!(transition.tick(t0 + ms(100)), None);

        // Restart half way through: the old run's deadline no longer
        // produces a swap.
        transition.begin(t0 + ms(100));
        assert_eq!(transition.tick(t0 + ms(200)), None);
        assert_eq!(
            transition.tick(t0 + ms(300)),
            Some(TransitionEvent::Swap)
        );
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < f32::EPSILON);
    }
}
