//! Deterministic prompt simulation
//!
//! All prompt logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Time enters as an explicit `now_ms`, never read from a clock
//! - No DOM, canvas, or platform dependencies

pub mod confetti;
pub mod dodge;
pub mod progression;
pub mod rect;
pub mod state;
pub mod tick;

pub use confetti::{
    ConfettiRun, FieldFrame, Frame, PALETTE, Particle, ParticleField, ParticleSnapshot, Shape,
    color_hex,
};
pub use dodge::{DodgeGeometry, DodgePlacer, Placement, compute_placement};
pub use progression::{ProgressionTracker, PulseTier, VisualSnapshot};
pub use rect::Rect;
pub use state::PromptState;
pub use tick::{PromptEvent, TickInput, tick};
