//! Confetti drawing on a `<canvas>` element

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{Frame, ParticleSnapshot, Shape, color_hex};

/// Canvas plus its 2D context
pub struct ConfettiCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ConfettiCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the given size (CSS pixels)
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn clear(&self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    /// Clear and draw one frame
    pub fn draw(&self, frame: &Frame) -> Result<(), JsValue> {
        self.clear();
        for particle in &frame.particles {
            self.draw_particle(particle)?;
        }
        Ok(())
    }

    fn draw_particle(&self, p: &ParticleSnapshot) -> Result<(), JsValue> {
        self.ctx.save();
        let result = self.paint(p);
        self.ctx.restore();
        result
    }

    fn paint(&self, p: &ParticleSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.translate(p.pos.x as f64, p.pos.y as f64)?;
        ctx.rotate(p.rotation_deg as f64 * PI / 180.0)?;
        ctx.set_global_alpha(p.opacity as f64);
        ctx.set_fill_style_str(color_hex(p.color));

        let (w, h) = (p.size.x as f64, p.size.y as f64);
        match p.shape {
            Shape::Rect => ctx.fill_rect(-w / 2.0, -h / 2.0, w, h),
            Shape::Circle => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, w / 2.0, 0.0, PI * 2.0)?;
                ctx.fill();
            }
        }
        Ok(())
    }
}
