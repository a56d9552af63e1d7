//! Prompt session state
//!
//! Everything mutable about one session lives in `PromptState`. The page
//! never mutates it directly; it feeds `TickInput`s through `tick` and
//! applies the events that come back.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::confetti::ParticleField;
use super::dodge::{DodgeGeometry, DodgePlacer, Placement};
use super::progression::{ProgressionTracker, VisualSnapshot};
use crate::consts::CONFETTI_PARTICLES;

/// Complete session state
#[derive(Debug, Clone)]
pub struct PromptState {
    rng: Pcg32,
    pub tracker: ProgressionTracker,
    pub placer: DodgePlacer,
    pub confetti: ParticleField,
    /// Current confetti canvas size (CSS pixels)
    pub canvas: Vec2,
    /// Particles per confetti run (0 disables confetti)
    pub confetti_particles: usize,
}

impl PromptState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tracker: ProgressionTracker::new(),
            placer: DodgePlacer::new(),
            confetti: ParticleField::new(),
            canvas: Vec2::ZERO,
            confetti_particles: CONFETTI_PARTICLES,
        }
    }

    pub fn with_confetti_particles(mut self, count: usize) -> Self {
        self.confetti_particles = count;
        self
    }

    /// A relocation is still settling at `now_ms`
    pub fn is_dodge_active(&self, now_ms: f64) -> bool {
        self.placer.is_in_flight(now_ms)
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Track the canvas size; a live confetti run picks up the new wrap bounds
    pub fn set_canvas(&mut self, width: f32, height: f32) {
        self.canvas = Vec2::new(width, height);
        self.confetti.resize(self.canvas);
    }

    pub fn on_reject(&mut self) -> Option<VisualSnapshot> {
        self.tracker.on_reject()
    }

    /// Dodge if eligible and no relocation is in flight
    pub fn on_proximity(&mut self, now_ms: f64, geometry: &DodgeGeometry) -> Option<Placement> {
        if !self.tracker.dodge_eligible() {
            return None;
        }
        self.placer.try_dodge(now_ms, geometry, &mut self.rng)
    }

    /// First call locks the tracker and starts confetti.
    /// Returns the confetti generation when a run started.
    pub fn on_accept(&mut self) -> Option<u64> {
        if !self.tracker.on_accept() {
            return None;
        }
        if self
            .confetti
            .start(self.canvas, self.confetti_particles, &mut self.rng)
        {
            Some(self.confetti.generation())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DODGE_SETTLE_MS;
    use crate::sim::Rect;

    fn geometry() -> DodgeGeometry {
        DodgeGeometry {
            button: Rect::new(520.0, 380.0, 100.0, 40.0),
            target: Rect::new(400.0, 380.0, 100.0, 40.0),
            viewport: Rect::viewport(1024.0, 768.0),
        }
    }

    #[test]
    fn test_dodge_eligibility_progression() {
        let mut state = PromptState::new(1);
        for _ in 0..4 {
            state.on_reject();
        }
        assert!(!state.tracker.dodge_eligible());
        state.on_reject();
        assert!(state.tracker.dodge_eligible());
        state.on_accept();
        assert!(!state.tracker.dodge_eligible());
    }

    #[test]
    fn test_proximity_ignored_before_threshold() {
        let mut state = PromptState::new(2);
        for _ in 0..4 {
            state.on_reject();
        }
        assert!(state.on_proximity(0.0, &geometry()).is_none());
        assert!(!state.is_dodge_active(0.0));
    }

    #[test]
    fn test_proximity_dodges_after_threshold() {
        let mut state = PromptState::new(3);
        for _ in 0..5 {
            state.on_reject();
        }
        assert!(state.on_proximity(0.0, &geometry()).is_some());
        assert!(state.is_dodge_active(0.0));
    }

    #[test]
    fn test_dodge_active_expires_without_tick() {
        let mut state = PromptState::new(9);
        for _ in 0..5 {
            state.on_reject();
        }
        assert!(state.on_proximity(1000.0, &geometry()).is_some());
        assert!(state.is_dodge_active(1000.0 + DODGE_SETTLE_MS - 1.0));
        assert!(!state.is_dodge_active(1000.0 + DODGE_SETTLE_MS));
    }

    #[test]
    fn test_no_dodge_after_accept() {
        let mut state = PromptState::new(4);
        for _ in 0..8 {
            state.on_reject();
        }
        state.set_canvas(800.0, 600.0);
        state.on_accept();
        assert!(state.on_proximity(0.0, &geometry()).is_none());
    }

    #[test]
    fn test_accept_starts_single_run() {
        let mut state = PromptState::new(5);
        state.set_canvas(800.0, 600.0);
        assert!(state.on_accept().is_some());
        assert!(state.on_accept().is_none());
        assert_eq!(state.confetti.runs_started(), 1);
    }

    #[test]
    fn test_accept_without_canvas_still_locks() {
        let mut state = PromptState::new(6);
        assert!(state.on_accept().is_none());
        assert!(state.tracker.is_accepted());
        assert!(state.on_reject().is_none());
    }

    #[test]
    fn test_same_seed_same_placement() {
        let mut a = PromptState::new(77);
        let mut b = PromptState::new(77);
        for _ in 0..5 {
            a.on_reject();
            b.on_reject();
        }
        let pa = a.on_proximity(0.0, &geometry()).unwrap();
        let pb = b.on_proximity(0.0, &geometry()).unwrap();
        assert_eq!(pa.pos, pb.pos);
    }
}
