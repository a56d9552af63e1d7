//! Floating hearts background
//!
//! Purely decorative: each heart is a CSS-animated span, so all that is
//! computed here is where it starts and how it moves.

use rand::Rng;
use rand::seq::IndexedRandom;

const GLYPHS: [&str; 7] = ["💕", "💗", "💖", "♥", "💓", "🩷", "🤍"];

/// One heart's inline style parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    pub glyph: &'static str,
    /// Horizontal start, percent of the container width
    pub left_pct: f32,
    pub font_size_px: f32,
    pub duration_secs: f32,
    pub delay_secs: f32,
}

impl FloatingHeart {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            glyph: GLYPHS.choose(rng).copied().unwrap_or(GLYPHS[0]),
            left_pct: rng.random::<f32>() * 100.0,
            font_size_px: 12.0 + rng.random::<f32>() * 20.0,
            duration_secs: 8.0 + rng.random::<f32>() * 12.0,
            delay_secs: rng.random::<f32>() * 10.0,
        }
    }

    /// Inline `style` attribute value
    pub fn style(&self) -> String {
        format!(
            "left: {:.2}%; font-size: {:.1}px; animation-duration: {:.2}s; animation-delay: {:.2}s;",
            self.left_pct, self.font_size_px, self.duration_secs, self.delay_secs
        )
    }
}

/// Generate `count` hearts
pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<FloatingHeart> {
    (0..count).map(|_| FloatingHeart::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scatter_ranges() {
        let mut rng = Pcg32::seed_from_u64(14);
        let hearts = scatter(15, &mut rng);
        assert_eq!(hearts.len(), 15);
        for heart in &hearts {
            assert!(GLYPHS.contains(&heart.glyph));
            assert!((0.0..=100.0).contains(&heart.left_pct));
            assert!((12.0..=32.0).contains(&heart.font_size_px));
            assert!((8.0..=20.0).contains(&heart.duration_secs));
            assert!((0.0..=10.0).contains(&heart.delay_secs));
        }
    }

    #[test]
    fn test_style() {
        let heart = FloatingHeart {
            glyph: "♥",
            left_pct: 12.5,
            font_size_px: 20.0,
            duration_secs: 9.0,
            delay_secs: 1.25,
        };
        assert_eq!(
            heart.style(),
            "left: 12.50%; font-size: 20.0px; animation-duration: 9.00s; animation-delay: 1.25s;"
        );
    }
}
