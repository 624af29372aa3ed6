//! HTML canvas 2D surface

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use crate::renderer::{Color, Surface, colors};

/// CSS `rgba()` string for a colour
fn css_color(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// Draws into a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        self.ctx.close_path();
    }

    fn with_transform(&self, translate: Vec2, rotation: f32, draw: impl FnOnce(&Self)) {
        self.ctx.save();
        let placed = self
            .ctx
            .translate(translate.x as f64, translate.y as f64)
            .and_then(|_| self.ctx.rotate(rotation as f64));
        match placed {
            Ok(()) => draw(self),
            Err(e) => log::warn!("Canvas transform failed: {:?}", e),
        }
        self.ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str(&css_color(colors::BACKGROUND));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], translate: Vec2, rotation: f32, color: Color) {
        self.with_transform(translate, rotation, |s| {
            s.trace(points);
            s.ctx.set_stroke_style_str(&css_color(color));
            s.ctx.stroke();
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], translate: Vec2, color: Color) {
        self.with_transform(translate, 0.0, |s| {
            s.trace(points);
            s.ctx.set_fill_style_str(&css_color(color));
            s.ctx.fill();
        });
    }
}
