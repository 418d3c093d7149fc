//! Lesson demo playback state
//!
//! The animation loop calls [`DemoState::frame`] once per scheduler callback.
//! Simulated time only advances while playing, and only once the wall-clock
//! throttle gate opens; every callback still redraws so control changes show
//! up immediately even while paused.

use super::kinematics::DemoKind;
use crate::consts::*;

/// Event emitted for the progress boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    /// The demo body reached the ground for the first time this run
    LessonCompleted { reward: u32 },
}

/// Playback state for the motion-demo canvas
#[derive(Debug, Clone)]
pub struct DemoState {
    pub selected: DemoKind,
    pub is_playing: bool,
    /// Simulated seconds; only the throttled advance and reset may write this
    pub time: f32,
    last_advance_ms: f64,
    completed: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoState {
    pub fn new() -> Self {
        Self {
            selected: DemoKind::FreeFall,
            is_playing: false,
            time: 0.0,
            last_advance_ms: 0.0,
            completed: false,
        }
    }

    /// One scheduler callback. Returns true if simulated time advanced
    /// (the caller redraws either way).
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.is_playing {
            return false;
        }
        if now_ms - self.last_advance_ms < DEMO_ADVANCE_INTERVAL_MS {
            return false;
        }
        self.time += DEMO_TIME_STEP;
        self.last_advance_ms = now_ms;
        true
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Stop playback and rewind. Selected demo is untouched; the completion
    /// latch re-arms so replaying the lesson can earn progress again.
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.time = 0.0;
        self.completed = false;
    }

    /// Switch demos, restarting the clock so the new demo begins from t=0.
    pub fn set_demo(&mut self, kind: DemoKind) {
        if kind != self.selected {
            self.selected = kind;
            self.time = 0.0;
            self.completed = false;
        }
    }

    /// Report that the evaluated body has landed. Fires the completion
    /// event exactly once per run, and only while actually playing.
    pub fn mark_landed(&mut self) -> Option<DemoEvent> {
        if self.completed || !self.is_playing {
            return None;
        }
        self.completed = true;
        log::info!("{} demo completed at t={:.2}s", self.selected.as_str(), self.time);
        Some(DemoEvent::LessonCompleted {
            reward: LESSON_REWARD,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_frozen_while_paused() {
        let mut demo = DemoState::new();
        assert!(!demo.frame(0.0));
        assert!(!demo.frame(1000.0));
        assert_eq!(demo.time, 0.0);
    }

    #[test]
    fn test_throttle_gate() {
        let mut demo = DemoState::new();
        demo.toggle_play();

        assert!(demo.frame(200.0));
        assert_eq!(demo.time, DEMO_TIME_STEP);

        // Within the 100ms window: redraw-only pass, no advance
        assert!(!demo.frame(250.0));
        assert_eq!(demo.time, DEMO_TIME_STEP);

        assert!(demo.frame(320.0));
        assert!((demo.time - 2.0 * DEMO_TIME_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_reset_semantics() {
        let mut demo = DemoState::new();
        demo.set_demo(DemoKind::Projectile);
        demo.toggle_play();
        demo.frame(500.0);
        assert!(demo.time > 0.0);

        demo.reset();
        assert_eq!(demo.selected, DemoKind::Projectile);
        assert!(!demo.is_playing);
        assert_eq!(demo.time, 0.0);
    }

    #[test]
    fn test_completion_fires_once() {
        let mut demo = DemoState::new();
        demo.toggle_play();
        assert!(demo.mark_landed().is_some());
        assert!(demo.mark_landed().is_none());

        // Reset re-arms the latch
        demo.reset();
        demo.toggle_play();
        assert!(demo.mark_landed().is_some());
    }

    #[test]
    fn test_no_completion_while_paused() {
        let mut demo = DemoState::new();
        assert!(demo.mark_landed().is_none());
    }

    #[test]
    fn test_set_demo_restarts_clock() {
        let mut demo = DemoState::new();
        demo.toggle_play();
        demo.frame(200.0);
        demo.set_demo(DemoKind::Uniform);
        assert_eq!(demo.time, 0.0);
        // Re-selecting the current demo is a no-op
        demo.frame(400.0);
        demo.set_demo(DemoKind::Uniform);
        assert!(demo.time > 0.0);
    }
}
