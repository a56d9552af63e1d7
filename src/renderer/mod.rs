//! Canvas 2D rendering module
//!
//! Draws confetti frames produced by `sim::confetti`. Nothing here feeds back
//! into the simulation.

pub mod canvas;

pub use canvas::ConfettiCanvas;
