//! Be Mine - an evasive Yes/No prompt
//!
//! Core modules:
//! - `sim`: Deterministic prompt simulation (progression, dodging, confetti)
//! - `messages`: Escalating persuasion lines shown under the question
//! - `celebration`: Celebration GIF lookup and fallbacks
//! - `hearts`: Decorative floating hearts
//! - `settings`: Page-supplied configuration
//! - `renderer`: Canvas 2D drawing of confetti frames (wasm only)

pub mod celebration;
pub mod hearts;
pub mod messages;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Prompt tuning constants
pub mod consts {
    /// Rejections needed before the "No" button starts dodging
    pub const DODGE_THRESHOLD: u32 = 5;
    /// Rejection counts that speed up the "Yes" pulse
    pub const URGENT_PULSE_THRESHOLD: u32 = 15;
    pub const FRANTIC_PULSE_THRESHOLD: u32 = 25;

    /// "Yes" growth: 1 + linear * n + curve * n^exponent
    pub const ACCEPT_GROWTH_LINEAR: f32 = 0.12;
    pub const ACCEPT_GROWTH_CURVE: f32 = 0.005;
    pub const ACCEPT_GROWTH_EXPONENT: f32 = 1.3;

    /// "No" shrink per rejection, floor-clamped so it stays tappable
    pub const REJECT_SHRINK_PER_CLICK: f32 = 0.023;
    pub const REJECT_MIN_SCALE: f32 = 0.3;
    pub const REJECT_FADE_PER_CLICK: f32 = 0.02;
    pub const REJECT_MIN_OPACITY: f32 = 0.4;

    /// "Yes" padding and font growth (CSS pixels)
    pub const BASE_PADDING_H: f32 = 40.0;
    pub const BASE_PADDING_V: f32 = 16.0;
    pub const PADDING_H_PER_CLICK: f32 = 1.5;
    pub const PADDING_V_PER_CLICK: f32 = 0.5;
    pub const BASE_FONT_SIZE: f32 = 18.0;
    pub const FONT_SIZE_PER_CLICK: f32 = 0.5;
    pub const MAX_FONT_SIZE: f32 = 36.0;

    /// Dodge placement
    pub const DODGE_MARGIN: f32 = 20.0;
    pub const DODGE_TARGET_PADDING: f32 = 20.0;
    pub const DODGE_MAX_ATTEMPTS: u32 = 20;
    /// Re-entrancy window after a relocation (matches the CSS transition)
    pub const DODGE_SETTLE_MS: f64 = 300.0;
    /// Touch-start on a dodging button still counts as a "No" after this delay
    pub const TOUCH_REJECT_DELAY_MS: i32 = 100;

    /// Confetti
    pub const CONFETTI_PARTICLES: usize = 120;
    pub const CONFETTI_MAX_FRAMES: u32 = 600; // ~10 seconds at 60fps
    pub const CONFETTI_GRAVITY: f32 = 0.05;
    pub const CONFETTI_AIR_DRAG: f32 = 0.99;
    /// Fraction of the run after which particles start fading
    pub const CONFETTI_FADE_START: f32 = 0.7;
    pub const CONFETTI_FADE_RATE: f32 = 0.98;
    pub const CONFETTI_WRAP_MARGIN: f32 = 20.0;
    /// Delay between the overlay appearing and the first confetti frame
    pub const CONFETTI_DELAY_MS: i32 = 200;

    /// Subtitle cross-fade timings
    pub const SUBTITLE_FADE_OUT_MS: i32 = 250;
    pub const SUBTITLE_FADE_IN_MS: i32 = 300;
}
