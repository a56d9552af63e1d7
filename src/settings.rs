//! Prompt settings
//!
//! Supplied by the page as an inline JSON block
//! (`<script id="promptConfig" type="application/json">`). Nothing is
//! written back; every reload starts from the page's configuration.

use serde::{Deserialize, Serialize};

use crate::consts::CONFETTI_PARTICLES;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Confetti particles for this preset
    pub fn confetti_particles(&self) -> usize {
        match self {
            QualityPreset::Low => CONFETTI_PARTICLES / 2,
            QualityPreset::Medium => CONFETTI_PARTICLES,
            QualityPreset::High => CONFETTI_PARTICLES * 2,
        }
    }

    /// Number of decorative floating hearts
    pub fn floating_hearts(&self) -> usize {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 15,
            QualityPreset::High => 24,
        }
    }
}

/// Celebration GIF lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GifSettings {
    /// Giphy API key; `None` skips the search and uses the fallback list
    pub api_key: Option<String>,
    /// Search phrase
    pub query: String,
    /// Results to request
    pub limit: u32,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            api_key: Some("GlVGYHkr3WSBnllca54iNt0yFbjz7L65".to_string()), // Giphy public beta key
            query: "happy valentines day love hearts".to_string(),
            limit: 10,
        }
    }
}

/// Prompt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Effects quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Confetti burst on "Yes"
    pub confetti: bool,
    /// Floating hearts background
    pub floating_hearts: bool,

    // === Accessibility ===
    /// Reduced motion (no confetti, no floating hearts)
    pub reduced_motion: bool,

    // === Determinism ===
    /// Fixed RNG seed; the page clock is used when absent
    pub seed: Option<u64>,

    pub gif: GifSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            confetti: true,
            floating_hearts: true,

            reduced_motion: false,

            seed: None,

            gif: GifSettings::default(),
        }
    }
}

impl Settings {
    /// Parse the page's JSON block
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective confetti particle count (respects reduced_motion)
    pub fn confetti_particles(&self) -> usize {
        if !self.confetti || self.reduced_motion {
            0
        } else {
            self.quality.confetti_particles()
        }
    }

    /// Effective floating heart count (respects reduced_motion)
    pub fn floating_hearts(&self) -> usize {
        if !self.floating_hearts || self.reduced_motion {
            0
        } else {
            self.quality.floating_hearts()
        }
    }

    /// Id of the inline configuration element
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "promptConfig";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed #{}: {}", Self::CONFIG_ELEMENT_ID, e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native: `BE_MINE_CONFIG` may hold the same JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(json) = std::env::var("BE_MINE_CONFIG") else {
            return Self::default();
        };
        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed BE_MINE_CONFIG: {}", e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.confetti_particles(), 120);
        assert_eq!(settings.floating_hearts(), 15);
        assert_eq!(settings.gif.limit, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"quality": "high", "seed": 7}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.confetti);
        assert_eq!(settings.confetti_particles(), 240);
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.confetti_particles(), 0);
        assert_eq!(settings.floating_hearts(), 0);
    }

    #[test]
    fn test_gif_without_key() {
        let settings = Settings::from_json(r#"{"gif": {"api_key": null}}"#).unwrap();
        assert!(settings.gif.api_key.is_none());
        assert_eq!(settings.gif.limit, 10);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{quality: ").is_err());
    }

    #[test]
    fn test_low_preset_counts() {
        let settings = Settings::from_json(r#"{"quality": "low"}"#).unwrap();
        assert_eq!(settings.quality.as_str(), "Low");
        assert_eq!(settings.confetti_particles(), 60);
        assert_eq!(settings.floating_hearts(), 8);
    }
}
