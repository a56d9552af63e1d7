//! Input dispatch
//!
//! The page collects pointer/keyboard events into a `TickInput` and hands it
//! to `tick`, which runs the pure state transitions and reports what changed.

use super::dodge::{DodgeGeometry, Placement};
use super::progression::VisualSnapshot;
use super::state::PromptState;

/// Input events for one dispatch
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// "No" was clicked
    pub reject: bool,
    /// "Yes" was clicked (or Enter pressed on it)
    pub accept: bool,
    /// Pointer entered / touch started on "No", with the geometry at that moment
    pub proximity: Option<DodgeGeometry>,
}

/// Changes the page must apply
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// Restyle buttons and swap the subtitle
    Visuals(VisualSnapshot),
    /// Move "No" to a new position
    Relocate(Placement),
    /// Show the celebration overlay
    Accepted { rejections: u32 },
    /// Schedule frames for this confetti generation
    ConfettiStarted { generation: u64 },
}

/// Apply one batch of input at time `now_ms`
///
/// Within a batch the rejection is applied first, then the dodge, then the
/// acceptance, so a "No" and a "Yes" landing together both count.
pub fn tick(state: &mut PromptState, input: &TickInput, now_ms: f64) -> Vec<PromptEvent> {
    let mut events = Vec::new();

    state.placer.settle(now_ms);

    if input.reject {
        if let Some(snapshot) = state.on_reject() {
            log::debug!(
                "Rejection {} -> message {}, yes x{:.3}, no x{:.3}",
                snapshot.rejection_count,
                snapshot.message_index,
                snapshot.accept_scale,
                snapshot.reject_scale
            );
            events.push(PromptEvent::Visuals(snapshot));
        }
    }

    if let Some(geometry) = input.proximity.as_ref() {
        if let Some(placement) = state.on_proximity(now_ms, geometry) {
            events.push(PromptEvent::Relocate(placement));
        }
    }

    if input.accept && !state.tracker.is_accepted() {
        let generation = state.on_accept();
        events.push(PromptEvent::Accepted {
            rejections: state.tracker.rejection_count(),
        });
        if let Some(generation) = generation {
            events.push(PromptEvent::ConfettiStarted { generation });
        }
    }

    events
}
