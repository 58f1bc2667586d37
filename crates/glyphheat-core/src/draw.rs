//! Draw operations and the buffered scene backends replay.

use crate::canvas::{GradientBar, TextCell, TitleSpec};
use crate::Size;
use serde::{Deserialize, Serialize};

/// A single drawing primitive of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    /// Figure title
    Title(TitleSpec),
    /// Glyph on a colored cell
    Cell(TextCell),
    /// Colorbar strip
    GradientBar(GradientBar),
}

/// A surface's worth of draw operations, in submission order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    size: Size,
    ops: Vec<DrawOp>,
}

impl Scene {
    /// Create an empty scene of `size` figure pixels.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Append an operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Text cells in submission order.
    pub fn cells(&self) -> impl Iterator<Item = &TextCell> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// The title, if one was set (last one wins).
    #[must_use]
    pub fn title(&self) -> Option<&TitleSpec> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Title(title) => Some(title),
            _ => None,
        })
    }

    /// Colorbars in submission order.
    pub fn gradient_bars(&self) -> impl Iterator<Item = &GradientBar> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::GradientBar(bar) => Some(bar),
            _ => None,
        })
    }

    /// Number of text rows (highest row index + 1).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.cells().map(|c| c.row + 1).max().unwrap_or(0)
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FontSpec;
    use crate::{Color, Rect};

    fn cell(glyph: char, row: usize, column: usize) -> TextCell {
        TextCell {
            glyph,
            row,
            column,
            bounds: Rect::new(column as f32 * 10.0, row as f32 * 20.0, 10.0, 20.0),
            baseline: row as f32 * 20.0 + 12.0,
            background: Color::WHITE,
            foreground: Color::BLACK,
            font: FontSpec::new("monospace", 12.0),
        }
    }

    #[test]
    fn test_scene_new_is_empty() {
        let scene = Scene::new(Size::new(100.0, 50.0));
        assert!(scene.is_empty());
        assert_eq!(scene.size(), Size::new(100.0, 50.0));
        assert_eq!(scene.row_count(), 0);
        assert!(scene.title().is_none());
    }

    #[test]
    fn test_scene_filters_by_kind() {
        let mut scene = Scene::new(Size::new(100.0, 50.0));
        scene.push(DrawOp::Title(TitleSpec {
            text: "t".into(),
            anchor_x: 50.0,
            top: 5.0,
            font: FontSpec::new("monospace", 14.0),
        }));
        scene.push(DrawOp::Cell(cell('a', 0, 0)));
        scene.push(DrawOp::Cell(cell('b', 1, 0)));

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.cells().count(), 2);
        assert_eq!(scene.row_count(), 2);
        assert_eq!(scene.title().map(|t| t.text.as_str()), Some("t"));
        assert_eq!(scene.gradient_bars().count(), 0);
    }

    #[test]
    fn test_scene_serializes() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.push(DrawOp::Cell(cell('x', 0, 0)));
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }
}
