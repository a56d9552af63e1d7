//! Rejection counter and the visuals derived from it
//!
//! Everything the page styles after a "No" is a pure function of the
//! rejection count, so the tracker holds nothing else.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::messages::MESSAGE_COUNT;

/// Pulse cadence of the "Yes" button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PulseTier {
    /// Stylesheet default cadence
    #[default]
    Calm,
    Urgent,
    Frantic,
}

impl PulseTier {
    /// Animation duration override in seconds (`None` keeps the stylesheet value)
    pub fn duration_secs(&self) -> Option<f32> {
        match self {
            PulseTier::Calm => None,
            PulseTier::Urgent => Some(1.0),
            PulseTier::Frantic => Some(0.6),
        }
    }
}

/// Derived visuals, applied by the page after every rejection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSnapshot {
    pub rejection_count: u32,
    pub message_index: usize,
    pub accept_scale: f32,
    pub reject_scale: f32,
    pub reject_opacity: f32,
    pub pulse_tier: PulseTier,
    /// (horizontal, vertical) padding of the "Yes" button
    pub padding_px: (f32, f32),
    pub font_size_px: f32,
    pub dodge_eligible: bool,
}

impl VisualSnapshot {
    pub fn for_count(n: u32) -> Self {
        Self {
            rejection_count: n,
            message_index: message_index(n),
            accept_scale: accept_scale(n),
            reject_scale: reject_scale(n),
            reject_opacity: reject_opacity(n),
            pulse_tier: pulse_tier(n),
            padding_px: padding_px(n),
            font_size_px: font_size_px(n),
            dodge_eligible: dodge_eligible(n),
        }
    }
}

pub fn message_index(n: u32) -> usize {
    (n as usize).min(MESSAGE_COUNT - 1)
}

/// Superlinear growth of the "Yes" button; exactly 1 at n = 0
pub fn accept_scale(n: u32) -> f32 {
    let n = n as f32;
    1.0 + ACCEPT_GROWTH_LINEAR * n + ACCEPT_GROWTH_CURVE * n.powf(ACCEPT_GROWTH_EXPONENT)
}

pub fn reject_scale(n: u32) -> f32 {
    (1.0 - REJECT_SHRINK_PER_CLICK * n as f32).max(REJECT_MIN_SCALE)
}

pub fn reject_opacity(n: u32) -> f32 {
    (1.0 - REJECT_FADE_PER_CLICK * n as f32).max(REJECT_MIN_OPACITY)
}

pub fn dodge_eligible(n: u32) -> bool {
    n >= DODGE_THRESHOLD
}

/// Step function, no interpolation between tiers
pub fn pulse_tier(n: u32) -> PulseTier {
    if n >= FRANTIC_PULSE_THRESHOLD {
        PulseTier::Frantic
    } else if n >= URGENT_PULSE_THRESHOLD {
        PulseTier::Urgent
    } else {
        PulseTier::Calm
    }
}

pub fn padding_px(n: u32) -> (f32, f32) {
    let n = n as f32;
    (
        BASE_PADDING_H + PADDING_H_PER_CLICK * n,
        BASE_PADDING_V + PADDING_V_PER_CLICK * n,
    )
}

pub fn font_size_px(n: u32) -> f32 {
    (BASE_FONT_SIZE + FONT_SIZE_PER_CLICK * n as f32).min(MAX_FONT_SIZE)
}

/// Monotonic rejection counter with a terminal accept lock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionTracker {
    rejection_count: u32,
    accepted: bool,
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejection_count(&self) -> u32 {
        self.rejection_count
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn dodge_eligible(&self) -> bool {
        !self.accepted && dodge_eligible(self.rejection_count)
    }

    /// Current visuals without changing anything
    pub fn snapshot(&self) -> VisualSnapshot {
        VisualSnapshot::for_count(self.rejection_count)
    }

    /// Register a "No". Ignored once accepted.
    pub fn on_reject(&mut self) -> Option<VisualSnapshot> {
        if self.accepted {
            log::debug!("Rejection ignored, prompt already accepted");
            return None;
        }
        self.rejection_count = self.rejection_count.saturating_add(1);
        Some(self.snapshot())
    }

    /// Register a "Yes". Returns true only for the first call.
    pub fn on_accept(&mut self) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        log::info!("Accepted after {} rejections", self.rejection_count);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_snapshot_is_neutral() {
        let snap = ProgressionTracker::new().snapshot();
        assert_eq!(snap.message_index, 0);
        assert_eq!(snap.accept_scale, 1.0);
        assert_eq!(snap.reject_scale, 1.0);
        assert_eq!(snap.reject_opacity, 1.0);
        assert_eq!(snap.pulse_tier, PulseTier::Calm);
        assert_eq!(snap.padding_px, (40.0, 16.0));
        assert_eq!(snap.font_size_px, 18.0);
        assert!(!snap.dodge_eligible);
    }

    #[test]
    fn test_five_rejections() {
        let mut tracker = ProgressionTracker::new();
        let mut snap = None;
        for _ in 0..5 {
            snap = tracker.on_reject();
        }
        let snap = snap.unwrap();
        assert_eq!(snap.rejection_count, 5);
        assert!((snap.reject_scale - 0.885).abs() < 1e-5);
        // 1 + 0.6 + 0.005 * 5^1.3
        assert!((snap.accept_scale - 1.6405).abs() < 1e-3);
        assert!(snap.dodge_eligible);
        assert!(tracker.dodge_eligible());
    }

    #[test]
    fn test_thirty_rejections() {
        let mut tracker = ProgressionTracker::new();
        for _ in 0..30 {
            tracker.on_reject();
        }
        let snap = tracker.snapshot();
        assert_eq!(snap.message_index, 30);
        assert!((snap.reject_scale - 0.31).abs() < 1e-5);
        assert!((snap.reject_opacity - 0.4).abs() < 1e-6);
        assert_eq!(snap.font_size_px, 33.0);
        assert_eq!(snap.pulse_tier, PulseTier::Frantic);
    }

    #[test]
    fn test_pulse_tier_steps() {
        assert_eq!(pulse_tier(14), PulseTier::Calm);
        assert_eq!(pulse_tier(15), PulseTier::Urgent);
        assert_eq!(pulse_tier(24), PulseTier::Urgent);
        assert_eq!(pulse_tier(25), PulseTier::Frantic);
        assert_eq!(PulseTier::Urgent.duration_secs(), Some(1.0));
        assert_eq!(PulseTier::Frantic.duration_secs(), Some(0.6));
        assert_eq!(PulseTier::Calm.duration_secs(), None);
    }

    #[test]
    fn test_font_size_caps() {
        assert_eq!(font_size_px(36), 36.0);
        assert_eq!(font_size_px(100), 36.0);
    }

    #[test]
    fn test_accept_locks_rejections() {
        let mut tracker = ProgressionTracker::new();
        tracker.on_reject();
        tracker.on_reject();
        assert!(tracker.on_accept());
        assert!(!tracker.on_accept());
        assert_eq!(tracker.on_reject(), None);
        assert_eq!(tracker.rejection_count(), 2);
        assert!(tracker.is_accepted());
    }

    #[test]
    fn test_accepted_tracker_not_dodge_eligible() {
        let mut tracker = ProgressionTracker::new();
        for _ in 0..6 {
            tracker.on_reject();
        }
        tracker.on_accept();
        assert!(!tracker.dodge_eligible());
    }

    proptest! {
        #[test]
        fn prop_reject_scale_floor_and_monotone(n in 0u32..100_000) {
            prop_assert!(reject_scale(n) >= REJECT_MIN_SCALE);
            prop_assert!(reject_scale(n + 1) <= reject_scale(n));
            prop_assert!(reject_opacity(n) >= REJECT_MIN_OPACITY);
            prop_assert!(reject_opacity(n + 1) <= reject_opacity(n));
        }

        #[test]
        fn prop_accept_scale_strictly_increasing(n in 0u32..100_000) {
            prop_assert!(accept_scale(n) >= 1.0);
            prop_assert!(accept_scale(n + 1) > accept_scale(n));
        }

        #[test]
        fn prop_message_index_clamped(n in 0u32..1_000_000) {
            let idx = message_index(n);
            prop_assert_eq!(idx, (n as usize).min(MESSAGE_COUNT - 1));
            prop_assert!(idx < MESSAGE_COUNT);
        }

        #[test]
        fn prop_accept_is_terminal(before in 0usize..40, after in 0usize..40) {
            let mut tracker = ProgressionTracker::new();
            for _ in 0..before {
                tracker.on_reject();
            }
            tracker.on_accept();
            for _ in 0..after {
                prop_assert!(tracker.on_reject().is_none());
            }
            prop_assert_eq!(tracker.rejection_count(), before as u32);
            prop_assert!(tracker.is_accepted());
        }
    }
}
