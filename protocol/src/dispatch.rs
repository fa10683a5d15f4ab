//! Maps decoded commands onto a renderer.

use scalar::Rgb888;

use crate::command::Command;

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Drawing surface that commands are applied to.
///
/// Colors arrive expanded to 24 bits. Layers are created on first draw.
pub trait Renderer {
    /// Removes every layer.
    fn clear_screen(&mut self);

    /// Removes one layer. Clearing a missing layer is a no-op.
    fn clear_layer(&mut self, layer: u8);

    fn draw_point(&mut self, layer: u8, at: Point, color: Rgb888, thickness: u16);

    fn draw_line(&mut self, layer: u8, from: Point, to: Point, color: Rgb888, width: u16);

    fn draw_rectangle(&mut self, layer: u8, corner: Point, opposite: Point, color: Rgb888, width: u16);

    fn draw_circle(&mut self, layer: u8, center: Point, radius: u16, color: Rgb888, width: u16);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn clear_screen(&mut self) {
        (**self).clear_screen();
    }

    fn clear_layer(&mut self, layer: u8) {
        (**self).clear_layer(layer);
    }

    fn draw_point(&mut self, layer: u8, at: Point, color: Rgb888, thickness: u16) {
        (**self).draw_point(layer, at, color, thickness);
    }

    fn draw_line(&mut self, layer: u8, from: Point, to: Point, color: Rgb888, width: u16) {
        (**self).draw_line(layer, from, to, color, width);
    }

    fn draw_rectangle(&mut self, layer: u8, corner: Point, opposite: Point, color: Rgb888, width: u16) {
        (**self).draw_rectangle(layer, corner, opposite, color, width);
    }

    fn draw_circle(&mut self, layer: u8, center: Point, radius: u16, color: Rgb888, width: u16) {
        (**self).draw_circle(layer, center, radius, color, width);
    }
}

/// Performs the one renderer call that `command` stands for.
pub fn apply<R: Renderer + ?Sized>(command: &Command, renderer: &mut R) {
    match *command {
        Command::ClearScreen => renderer.clear_screen(),
        Command::ClearLayer { layer } => renderer.clear_layer(layer),
        Command::DrawPoint {
            x,
            y,
            layer,
            color,
            thickness,
        } => renderer.draw_point(layer, Point::new(x, y), color.to_full_color(), thickness),
        Command::DrawLine {
            x1,
            y1,
            x2,
            y2,
            layer,
            color,
            width,
        } => renderer.draw_line(
            layer,
            Point::new(x1, y1),
            Point::new(x2, y2),
            color.to_full_color(),
            width,
        ),
        Command::DrawRectangle {
            x1,
            y1,
            x2,
            y2,
            layer,
            color,
            width,
        } => renderer.draw_rectangle(
            layer,
            Point::new(x1, y1),
            Point::new(x2, y2),
            color.to_full_color(),
            width,
        ),
        Command::DrawCircle {
            x,
            y,
            r,
            layer,
            color,
            width,
        } => renderer.draw_circle(layer, Point::new(x, y), r, color.to_full_color(), width),
    }
}
