//! Confetti particle simulation
//!
//! A run is a finite sequence of frames: all particles are spawned in one
//! batch, each frame yields what should be drawn and then advances physics
//! by one step, and after `max_frames` frames the run is over. Drawing lives
//! in the renderer; nothing here knows about a canvas context.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Confetti colours, indexed by `Particle::color`
pub const PALETTE: [&str; 7] = [
    "#E8395A", "#FFB6C8", "#FF6B8A", "#FFD700", "#FFFFFF", "#FF69B4", "#FF1493",
];

/// Palette entry for a colour index
pub fn color_hex(color: u8) -> &'static str {
    PALETTE[color as usize % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rect,
    Circle,
}

/// A single piece of confetti
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, unbounded
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    pub opacity: f32,
    /// (w, h); circles use `w` as diameter
    pub size: Vec2,
    pub color: u8, // Index into PALETTE
    pub shape: Shape,
}

impl Particle {
    /// Spawn above the visible area so the burst falls in
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, canvas: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * canvas.x,
                -10.0 - rng.random::<f32>() * canvas.y * 0.5,
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                2.0 + rng.random::<f32>() * 4.0,
            ),
            rotation: rng.random::<f32>() * 360.0,
            rotation_speed: (rng.random::<f32>() - 0.5) * 10.0,
            opacity: 0.7 + rng.random::<f32>() * 0.3,
            size: Vec2::new(
                4.0 + rng.random::<f32>() * 8.0,
                4.0 + rng.random::<f32>() * 8.0,
            ),
            color: rng.random_range(0..PALETTE.len() as u8),
            shape: if rng.random_bool(0.5) {
                Shape::Rect
            } else {
                Shape::Circle
            },
        }
    }

    /// Advance one frame
    pub fn step(&mut self, fading: bool, canvas_width: f32) {
        self.pos += self.vel;
        self.rotation += self.rotation_speed;
        self.vel.y += CONFETTI_GRAVITY;
        self.vel.x *= CONFETTI_AIR_DRAG;

        if fading {
            self.opacity *= CONFETTI_FADE_RATE;
        }

        // Wrap horizontally, teleporting to just outside the opposite edge
        if self.pos.x < -CONFETTI_WRAP_MARGIN {
            self.pos.x = canvas_width + CONFETTI_WRAP_MARGIN;
        }
        if self.pos.x > canvas_width + CONFETTI_WRAP_MARGIN {
            self.pos.x = -CONFETTI_WRAP_MARGIN;
        }
    }

    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            pos: self.pos,
            rotation_deg: self.rotation,
            opacity: self.opacity,
            color: self.color,
            shape: self.shape,
            size: self.size,
        }
    }
}

/// What the renderer needs to draw one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub pos: Vec2,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub color: u8,
    pub shape: Shape,
    pub size: Vec2,
}

/// One frame of a run
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u32,
    pub particles: Vec<ParticleSnapshot>,
}

/// Whether a canvas size can host a run
pub fn valid_canvas(canvas: Vec2) -> bool {
    canvas.is_finite() && canvas.x > 0.0 && canvas.y > 0.0
}

/// A single confetti run: exactly `max_frames` frames, then `None`
#[derive(Debug, Clone)]
pub struct ConfettiRun {
    particles: Vec<Particle>,
    canvas: Vec2,
    frame: u32,
    max_frames: u32,
}

impl ConfettiRun {
    /// Spawn a fresh batch. `None` for an unusable canvas.
    pub fn new<R: Rng + ?Sized>(
        canvas: Vec2,
        count: usize,
        max_frames: u32,
        rng: &mut R,
    ) -> Option<Self> {
        if !valid_canvas(canvas) {
            return None;
        }
        let particles = (0..count).map(|_| Particle::spawn(rng, canvas)).collect();
        Some(Self {
            particles,
            canvas,
            frame: 0,
            max_frames,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn max_frames(&self) -> u32 {
        self.max_frames
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.max_frames
    }

    /// Frame index after which particles fade
    pub fn fade_start(&self) -> f32 {
        self.max_frames as f32 * CONFETTI_FADE_START
    }

    /// Change wrap bounds without restarting
    pub fn resize(&mut self, canvas: Vec2) {
        if valid_canvas(canvas) {
            self.canvas = canvas;
        }
    }
}

impl Iterator for ConfettiRun {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.is_finished() {
            return None;
        }

        let frame = Frame {
            index: self.frame,
            particles: self.particles.iter().map(Particle::snapshot).collect(),
        };

        let fading = self.frame as f32 > self.fade_start();
        for particle in &mut self.particles {
            particle.step(fading, self.canvas.x);
        }
        self.frame += 1;

        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.max_frames.saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}

/// Outcome of asking the field for its next frame
#[derive(Debug, Clone)]
pub enum FieldFrame {
    Draw(Frame),
    /// The run just ended; clear the canvas
    Clear,
    /// Nothing running
    Idle,
}

/// Owner of at most one confetti run
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    run: Option<ConfettiRun>,
    /// Bumped on every start/cancel so stale frame callbacks can bail out
    generation: u64,
    runs_started: u32,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn run(&self) -> Option<&ConfettiRun> {
        self.run.as_ref()
    }

    /// Start a fresh run, replacing any run still in progress.
    /// Returns false (and changes nothing) for an unusable canvas or no particles.
    pub fn start<R: Rng + ?Sized>(&mut self, canvas: Vec2, count: usize, rng: &mut R) -> bool {
        if count == 0 {
            log::debug!("Confetti skipped: no particles requested");
            return false;
        }
        let Some(run) = ConfettiRun::new(canvas, count, CONFETTI_MAX_FRAMES, rng) else {
            log::warn!("Confetti skipped: invalid canvas {}x{}", canvas.x, canvas.y);
            return false;
        };

        if self.cancel() {
            log::debug!("Replacing confetti run still in progress");
        }
        self.generation += 1;
        self.runs_started += 1;
        self.run = Some(run);
        log::info!(
            "Confetti started: {} particles on {}x{} (generation {})",
            count,
            canvas.x,
            canvas.y,
            self.generation
        );
        true
    }

    /// Drop the current run. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        if self.run.take().is_some() {
            self.generation += 1;
            true
        } else {
            false
        }
    }

    pub fn resize(&mut self, canvas: Vec2) {
        if let Some(run) = self.run.as_mut() {
            run.resize(canvas);
        }
    }

    pub fn next_frame(&mut self) -> FieldFrame {
        let Some(run) = self.run.as_mut() else {
            return FieldFrame::Idle;
        };
        match run.next() {
            Some(frame) => FieldFrame::Draw(frame),
            None => {
                self.run = None;
                log::debug!("Confetti finished (generation {})", self.generation);
                FieldFrame::Clear
            }
        }
    }
}
