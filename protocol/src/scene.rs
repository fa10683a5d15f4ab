//! Headless layered display list.

use std::collections::BTreeMap;

use scalar::Rgb888;

use crate::dispatch::{Point, Renderer};

/// One drawn primitive with its expanded color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum Shape {
    Point {
        at: Point,
        color: Rgb888,
        thickness: u16,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb888,
        width: u16,
    },
    Rectangle {
        corner: Point,
        opposite: Point,
        color: Rgb888,
        width: u16,
    },
    Circle {
        center: Point,
        radius: u16,
        color: Rgb888,
        width: u16,
    },
}

impl Shape {
    #[must_use]
    pub const fn color(&self) -> Rgb888 {
        match *self {
            Self::Point { color, .. }
            | Self::Line { color, .. }
            | Self::Rectangle { color, .. }
            | Self::Circle { color, .. } => color,
        }
    }
}

/// Owned snapshot of one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    pub id: u8,
    pub shapes: Vec<Shape>,
}

/// Display list grouped by layer.
///
/// Draws append to their layer, creating it on demand. Layers composite in
/// ascending id order, so higher layers paint over lower ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    layers: BTreeMap<u8, Vec<Shape>>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of shapes across all layers.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Shapes on one layer, in draw order.
    #[must_use]
    pub fn layer(&self, id: u8) -> Option<&[Shape]> {
        self.layers.get(&id).map(Vec::as_slice)
    }

    /// Layers in composition order.
    pub fn layers(&self) -> impl Iterator<Item = (u8, &[Shape])> + '_ {
        self.layers
            .iter()
            .map(|(&id, shapes)| (id, shapes.as_slice()))
    }

    /// Shapes in paint order: bottom layer first, draw order within a layer.
    pub fn composited(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.layers.values().flatten()
    }

    #[must_use]
    pub fn to_layers(&self) -> Vec<Layer> {
        self.layers()
            .map(|(id, shapes)| Layer {
                id,
                shapes: shapes.to_vec(),
            })
            .collect()
    }

    fn push(&mut self, layer: u8, shape: Shape) {
        self.layers.entry(layer).or_default().push(shape);
    }
}

impl Renderer for Scene {
    fn clear_screen(&mut self) {
        self.layers.clear();
    }

    fn clear_layer(&mut self, layer: u8) {
        self.layers.remove(&layer);
    }

    fn draw_point(&mut self, layer: u8, at: Point, color: Rgb888, thickness: u16) {
        self.push(
            layer,
            Shape::Point {
                at,
                color,
                thickness,
            },
        );
    }

    fn draw_line(&mut self, layer: u8, from: Point, to: Point, color: Rgb888, width: u16) {
        self.push(
            layer,
            Shape::Line {
                from,
                to,
                color,
                width,
            },
        );
    }

    fn draw_rectangle(&mut self, layer: u8, corner: Point, opposite: Point, color: Rgb888, width: u16) {
        self.push(
            layer,
            Shape::Rectangle {
                corner,
                opposite,
                color,
                width,
            },
        );
    }

    fn draw_circle(&mut self, layer: u8, center: Point, radius: u16, color: Rgb888, width: u16) {
        self.push(
            layer,
            Shape::Circle {
                center,
                radius,
                color,
                width,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::dispatch::apply;
    use scalar::Rgb332;

    fn scene_from(commands: &[Command]) -> Scene {
        let mut scene = Scene::new();
        for command in commands {
            apply(command, &mut scene);
        }
        scene
    }

    #[test]
    fn new_scene_is_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.shape_count(), 0);
        assert!(scene.layer(0).is_none());
    }

    #[test]
    fn draw_creates_layer() {
        let scene = scene_from(&[Command::point(1, 1, 5)]);
        assert_eq!(scene.layer_count(), 1);
        assert_eq!(scene.layer(5).map(<[Shape]>::len), Some(1));
    }

    #[test]
    fn layers_composite_in_ascending_order() {
        let scene = scene_from(&[
            Command::point(0, 0, 9).with_color(Rgb332::RED),
            Command::point(0, 0, 2).with_color(Rgb332::GREEN),
            Command::point(0, 0, 5).with_color(Rgb332::BLUE),
        ]);
        let ids: Vec<u8> = scene.layers().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 5, 9]);

        let colors: Vec<Rgb888> = scene.composited().map(Shape::color).collect();
        assert_eq!(
            colors,
            vec![
                Rgb332::GREEN.to_full_color(),
                Rgb332::BLUE.to_full_color(),
                Rgb332::RED.to_full_color(),
            ]
        );
    }

    #[test]
    fn clear_layer_removes_only_that_layer() {
        let scene = scene_from(&[
            Command::point(0, 0, 1),
            Command::line(0, 0, 1, 1, 2),
            Command::ClearLayer { layer: 1 },
            Command::ClearLayer { layer: 42 },
        ]);
        assert!(scene.layer(1).is_none());
        assert_eq!(scene.layer(2).map(<[Shape]>::len), Some(1));
    }

    #[test]
    fn clear_screen_removes_everything() {
        let mut scene = scene_from(&[Command::point(0, 0, 1), Command::circle(5, 5, 2, 3)]);
        apply(&Command::ClearScreen, &mut scene);
        assert!(scene.is_empty());

        apply(&Command::point(0, 0, 1), &mut scene);
        assert_eq!(scene.shape_count(), 1);
    }

    #[test]
    fn draw_order_within_layer() {
        let scene = scene_from(&[
            Command::rectangle(0, 0, 10, 10, 0).with_width(3),
            Command::circle(5, 5, 4, 0),
        ]);
        let shapes = scene.layer(0).unwrap();
        assert!(matches!(shapes[0], Shape::Rectangle { width: 3, .. }));
        assert!(matches!(shapes[1], Shape::Circle { radius: 4, .. }));
    }

    #[test]
    fn to_layers_snapshot() {
        let scene = scene_from(&[Command::point(7, 8, 3)]);
        assert_eq!(
            scene.to_layers(),
            vec![Layer {
                id: 3,
                shapes: vec![Shape::Point {
                    at: Point::new(7, 8),
                    color: Rgb888::default(),
                    thickness: 1,
                }],
            }]
        );
    }
}
