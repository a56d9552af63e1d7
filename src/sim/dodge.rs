//! Relocating the "No" button away from the "Yes" button
//!
//! Placement is rejection sampling with an attempt cap: draw a position
//! uniformly inside the viewport margins, reject it if the button would land
//! on the padded "Yes" button, and give up after a fixed number of draws by
//! keeping the last candidate. Work per dodge is bounded even when the "Yes"
//! button has grown to cover most of the screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Geometry captured at the moment of a proximity event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgeGeometry {
    /// The evading ("No") button
    pub button: Rect,
    /// The button to keep clear of ("Yes")
    pub target: Rect,
    /// Viewport bounds
    pub viewport: Rect,
}

/// Result of one placement computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// New top-left corner of the button
    pub pos: Vec2,
    /// Number of candidates drawn
    pub attempts: u32,
    /// True when every candidate collided and the last one was kept
    pub exhausted: bool,
}

/// Inclusive sampling bounds for the button's top-left corner on one axis
///
/// The upper bound never drops below the margin, so a viewport narrower than
/// the button collapses the interval to the single point `margin`.
pub fn sampling_range(viewport_extent: f32, button_extent: f32, margin: f32) -> (f32, f32) {
    let hi = (viewport_extent - button_extent - margin).max(margin);
    (margin, hi)
}

/// Whether a button at `pos` would touch the target grown by `pad`
pub fn collides(pos: Vec2, size: Vec2, target: &Rect, pad: f32) -> bool {
    Rect::at(pos, size).overlaps(&target.expanded(pad))
}

/// Rejection-sample a new position for `geometry.button`
pub fn compute_placement<R: Rng + ?Sized>(geometry: &DodgeGeometry, rng: &mut R) -> Placement {
    let size = geometry.button.size();
    let (x_lo, x_hi) = sampling_range(geometry.viewport.width, size.x, DODGE_MARGIN);
    let (y_lo, y_hi) = sampling_range(geometry.viewport.height, size.y, DODGE_MARGIN);
    let origin = geometry.viewport.origin();

    let mut attempts = 0;
    loop {
        let pos = origin
            + Vec2::new(
                rng.random_range(x_lo..=x_hi),
                rng.random_range(y_lo..=y_hi),
            );
        attempts += 1;

        if !collides(pos, size, &geometry.target, DODGE_TARGET_PADDING) {
            return Placement {
                pos,
                attempts,
                exhausted: false,
            };
        }
        if attempts >= DODGE_MAX_ATTEMPTS {
            log::debug!(
                "Dodge gave up after {} attempts, keeping colliding candidate ({:.0}, {:.0})",
                attempts,
                pos.x,
                pos.y
            );
            return Placement {
                pos,
                attempts,
                exhausted: true,
            };
        }
    }
}

/// Placement plus the re-entrancy guard around an in-flight relocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DodgePlacer {
    /// Time (ms) at which the current relocation settles
    settle_at: Option<f64>,
    /// Relocations performed this session
    dodges: u32,
}

impl DodgePlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A relocation is still animating at `now_ms`
    pub fn is_in_flight(&self, now_ms: f64) -> bool {
        self.settle_at.is_some_and(|deadline| now_ms < deadline)
    }

    pub fn dodge_count(&self) -> u32 {
        self.dodges
    }

    /// Clear the guard once its settle window has passed
    pub fn settle(&mut self, now_ms: f64) {
        if let Some(deadline) = self.settle_at {
            if now_ms >= deadline {
                self.settle_at = None;
            }
        }
    }

    /// Relocate unless a previous relocation is still in flight
    pub fn try_dodge<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        geometry: &DodgeGeometry,
        rng: &mut R,
    ) -> Option<Placement> {
        self.settle(now_ms);
        if self.is_in_flight(now_ms) {
            return None;
        }

        let placement = compute_placement(geometry, rng);
        self.settle_at = Some(now_ms + DODGE_SETTLE_MS);
        self.dodges += 1;
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn desktop_geometry() -> DodgeGeometry {
        DodgeGeometry {
            button: Rect::new(520.0, 380.0, 100.0, 40.0),
            target: Rect::new(400.0, 380.0, 100.0, 40.0),
            viewport: Rect::viewport(1000.0, 800.0),
        }
    }

    #[test]
    fn test_sampling_range_normal() {
        assert_eq!(sampling_range(1000.0, 100.0, 20.0), (20.0, 880.0));
    }

    #[test]
    fn test_sampling_range_degenerate() {
        // Viewport narrower than the button plus margins
        assert_eq!(sampling_range(100.0, 90.0, 20.0), (20.0, 20.0));
        assert_eq!(sampling_range(0.0, 90.0, 20.0), (20.0, 20.0));
    }

    #[test]
    fn test_collides_with_padding() {
        let target = Rect::new(100.0, 100.0, 50.0, 50.0);
        let size = Vec2::new(10.0, 10.0);
        // 15px right of the target: inside the 20px padding
        assert!(collides(Vec2::new(165.0, 120.0), size, &target, 20.0));
        // 25px right of the target: clear
        assert!(!collides(Vec2::new(175.0, 120.0), size, &target, 20.0));
    }

    #[test]
    fn test_placement_avoids_target() {
        let geometry = desktop_geometry();
        let mut rng = Pcg32::seed_from_u64(7);
        let placement = compute_placement(&geometry, &mut rng);
        assert!(!placement.exhausted);
        assert!(!collides(
            placement.pos,
            geometry.button.size(),
            &geometry.target,
            DODGE_TARGET_PADDING
        ));
    }

    #[test]
    fn test_exhausted_when_target_covers_viewport() {
        let geometry = DodgeGeometry {
            button: Rect::new(0.0, 0.0, 60.0, 30.0),
            target: Rect::new(0.0, 0.0, 400.0, 300.0),
            viewport: Rect::viewport(400.0, 300.0),
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let placement = compute_placement(&geometry, &mut rng);
        assert!(placement.exhausted);
        assert_eq!(placement.attempts, DODGE_MAX_ATTEMPTS);
    }

    #[test]
    fn test_tiny_viewport_collapses_to_margin() {
        let geometry = DodgeGeometry {
            button: Rect::new(0.0, 0.0, 120.0, 50.0),
            target: Rect::new(500.0, 500.0, 10.0, 10.0),
            viewport: Rect::viewport(100.0, 60.0),
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let placement = compute_placement(&geometry, &mut rng);
        assert_eq!(placement.pos, Vec2::new(DODGE_MARGIN, DODGE_MARGIN));
        assert_eq!(placement.attempts, 1);
    }

    #[test]
    fn test_small_target_found_within_cap_across_seeds() {
        // Target is well under 10% of the sampling domain
        let geometry = desktop_geometry();
        for seed in 0..2000 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let placement = compute_placement(&geometry, &mut rng);
            assert!(!placement.exhausted, "seed {} exhausted", seed);
        }
    }

    #[test]
    fn test_guard_suppresses_until_settled() {
        let geometry = desktop_geometry();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut placer = DodgePlacer::new();

        assert!(placer.try_dodge(1000.0, &geometry, &mut rng).is_some());
        assert!(placer.is_in_flight(1000.0));
        assert!(placer.try_dodge(1100.0, &geometry, &mut rng).is_none());
        assert!(placer.try_dodge(1299.0, &geometry, &mut rng).is_none());
        assert!(placer.try_dodge(1300.0, &geometry, &mut rng).is_some());
        assert_eq!(placer.dodge_count(), 2);
    }

    #[test]
    fn test_settle_clears_guard() {
        let geometry = desktop_geometry();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut placer = DodgePlacer::new();
        placer.try_dodge(0.0, &geometry, &mut rng);
        placer.settle(100.0);
        assert!(placer.is_in_flight(100.0));
        // The window expires on its own, before anything calls settle
        assert!(!placer.is_in_flight(DODGE_SETTLE_MS));
        placer.settle(DODGE_SETTLE_MS);
        assert!(!placer.is_in_flight(0.0));
    }

    proptest! {
        #[test]
        fn prop_placement_within_bounds(
            seed in any::<u64>(),
            vw in 0.0f32..2000.0,
            vh in 0.0f32..2000.0,
            bw in 1.0f32..300.0,
            bh in 1.0f32..120.0,
            tx in 0.0f32..2000.0,
            ty in 0.0f32..2000.0,
            tw in 0.0f32..1500.0,
            th in 0.0f32..1500.0,
        ) {
            let geometry = DodgeGeometry {
                button: Rect::new(0.0, 0.0, bw, bh),
                target: Rect::new(tx, ty, tw, th),
                viewport: Rect::viewport(vw, vh),
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let placement = compute_placement(&geometry, &mut rng);

            let (x_lo, x_hi) = sampling_range(vw, bw, DODGE_MARGIN);
            let (y_lo, y_hi) = sampling_range(vh, bh, DODGE_MARGIN);
            prop_assert!(placement.pos.x >= x_lo && placement.pos.x <= x_hi);
            prop_assert!(placement.pos.y >= y_lo && placement.pos.y <= y_hi);
            prop_assert!(placement.attempts >= 1 && placement.attempts <= DODGE_MAX_ATTEMPTS);
        }
    }
}
