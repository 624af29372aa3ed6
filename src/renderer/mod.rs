//! Rendering boundary
//!
//! The simulation decides what is drawn and where; a [`Surface`] does the
//! actual drawing. [`draw_frame`] issues one clear followed by one primitive
//! per live entity.

pub mod shapes;

use glam::Vec2;

use crate::consts::PROJECTILE_RADIUS;
use crate::sim::{Asteroid, GameState, PowerUp, Projectile, SHIP_COLOR_CYCLE, Ship};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;
    use crate::sim::SHIP_COLOR_CYCLE;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const SHIP: Color = [1.0, 1.0, 1.0, 1.0];
    pub const ASTEROID: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PROJECTILE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const POWER_UP: Color = [1.0, 1.0, 0.0, 1.0];
    /// Hull colours cycled while invincible
    pub const INVINCIBLE_CYCLE: [Color; SHIP_COLOR_CYCLE] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, 1.0],
    ];
}

/// A drawing target
pub trait Surface {
    /// Fill the whole screen with the background colour
    fn clear(&mut self);
    /// Closed outline, rotated about the origin then translated
    fn stroke_polygon(&mut self, points: &[Vec2], translate: Vec2, rotation: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Filled polygon (used for the power-up star)
    fn fill_polygon(&mut self, points: &[Vec2], translate: Vec2, color: Color);
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    StrokePolygon {
        points: Vec<Vec2>,
        translate: Vec2,
        rotation: f32,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillPolygon {
        points: Vec<Vec2>,
        translate: Vec2,
        color: Color,
    },
}

/// Surface that records commands instead of drawing (headless runs, tests)
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], translate: Vec2, rotation: f32, color: Color) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            translate,
            rotation,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], translate: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            translate,
            color,
        });
    }
}

/// Something that knows how to draw itself
pub trait Render {
    fn render(&self, surface: &mut dyn Surface);
}

impl Render for Ship {
    fn render(&self, surface: &mut dyn Surface) {
        let color = if self.invincible {
            colors::INVINCIBLE_CYCLE[self.color_slot() % SHIP_COLOR_CYCLE]
        } else {
            colors::SHIP
        };
        surface.stroke_polygon(&shapes::ship_hull(self.radius), self.pos, self.rotation, color);
    }
}

impl Render for Asteroid {
    fn render(&self, surface: &mut dyn Surface) {
        surface.stroke_polygon(self.vertices(), self.pos, self.rotation, colors::ASTEROID);
    }
}

impl Render for Projectile {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, PROJECTILE_RADIUS, colors::PROJECTILE);
    }
}

impl Render for PowerUp {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_polygon(&shapes::star(self.visual_radius()), self.pos, colors::POWER_UP);
    }
}

/// Draw one frame: clear, ship, power-ups, projectiles, asteroids
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear();
    state.ship.render(surface);
    for power_up in &state.power_ups {
        power_up.render(surface);
    }
    for projectile in &state.projectiles {
        projectile.render(surface);
    }
    for asteroid in &state.asteroids {
        asteroid.render(surface);
    }
}
