//! A canvas that records every call it receives.

use crate::canvas::{Canvas, CanvasError, GradientBar, TextCell, TitleSpec};
use crate::draw::{DrawOp, Scene};
use crate::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One call made on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasCall {
    /// `create_surface`
    CreateSurface(Size),
    /// Any drawing call
    Draw(DrawOp),
    /// `show`
    Show,
    /// `save_to_file`
    Save(PathBuf),
    /// `release`
    Release,
}

/// A Canvas implementation that records calls instead of drawing.
///
/// This is useful for:
/// - Testing (verify what was painted and that surfaces get released)
/// - Diffing (compare two renders of the same figure)
///
/// `fail_show` and `fail_save` make the corresponding calls return an error
/// after being recorded.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<CanvasCall>,
    scene: Option<Scene>,
    last_scene: Option<Scene>,
    /// Make `show` fail.
    pub fail_show: bool,
    /// Make `save_to_file` fail.
    pub fail_save: bool,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in order.
    #[must_use]
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Take ownership of the recorded calls, clearing the log.
    pub fn take_calls(&mut self) -> Vec<CanvasCall> {
        std::mem::take(&mut self.calls)
    }

    /// The scene of the most recently released surface.
    #[must_use]
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    /// Whether a surface is currently allocated.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.scene.is_some()
    }

    /// Number of `release` calls seen.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Release))
            .count()
    }

    fn draw(&mut self, op: DrawOp) -> Result<(), CanvasError> {
        let scene = self.scene.as_mut().ok_or(CanvasError::NoSurface)?;
        scene.push(op.clone());
        self.calls.push(CanvasCall::Draw(op));
        Ok(())
    }
}

impl Canvas for RecordingCanvas {
    fn create_surface(&mut self, size: Size) -> Result<(), CanvasError> {
        self.scene = Some(Scene::new(size));
        self.calls.push(CanvasCall::CreateSurface(size));
        Ok(())
    }

    fn place_text_cell(&mut self, cell: &TextCell) -> Result<(), CanvasError> {
        self.draw(DrawOp::Cell(cell.clone()))
    }

    fn draw_gradient_bar(&mut self, bar: &GradientBar) -> Result<(), CanvasError> {
        self.draw(DrawOp::GradientBar(bar.clone()))
    }

    fn set_title(&mut self, title: &TitleSpec) -> Result<(), CanvasError> {
        self.draw(DrawOp::Title(title.clone()))
    }

    fn show(&mut self) -> Result<(), CanvasError> {
        self.calls.push(CanvasCall::Show);
        if self.fail_show {
            return Err(CanvasError::Unsupported("show disabled on this canvas"));
        }
        Ok(())
    }

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError> {
        self.calls.push(CanvasCall::Save(path.to_path_buf()));
        if self.fail_save {
            return Err(CanvasError::Backend(format!(
                "refusing to write {}",
                path.display()
            )));
        }
        Ok(())
    }

    fn release(&mut self) {
        if let Some(scene) = self.scene.take() {
            self.last_scene = Some(scene);
        }
        self.calls.push(CanvasCall::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{FontSpec, SurfaceGuard};
    use crate::{Color, Rect};

    fn title() -> TitleSpec {
        TitleSpec {
            text: "hello".into(),
            anchor_x: 10.0,
            top: 1.0,
            font: FontSpec::new("monospace", 16.0),
        }
    }

    #[test]
    fn test_recording_canvas_new() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.calls().is_empty());
        assert!(!canvas.has_surface());
        assert!(canvas.last_scene().is_none());
    }

    #[test]
    fn test_draw_without_surface_fails() {
        let mut canvas = RecordingCanvas::new();
        let err = canvas.set_title(&title()).unwrap_err();
        assert!(matches!(err, CanvasError::NoSurface));
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn test_lifecycle_is_recorded() {
        let mut canvas = RecordingCanvas::new();
        canvas.create_surface(Size::new(20.0, 10.0)).unwrap();
        canvas.set_title(&title()).unwrap();
        canvas
            .place_text_cell(&TextCell {
                glyph: 'q',
                row: 0,
                column: 0,
                bounds: Rect::new(0.0, 0.0, 5.0, 5.0),
                baseline: 3.0,
                background: Color::RED,
                foreground: Color::BLACK,
                font: FontSpec::new("monospace", 12.0),
            })
            .unwrap();
        canvas.save_to_file(Path::new("out.png")).unwrap();
        canvas.release();

        let calls = canvas.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0], CanvasCall::CreateSurface(Size::new(20.0, 10.0)));
        assert!(matches!(calls[1], CanvasCall::Draw(DrawOp::Title(_))));
        assert!(matches!(calls[2], CanvasCall::Draw(DrawOp::Cell(_))));
        assert_eq!(calls[3], CanvasCall::Save(PathBuf::from("out.png")));
        assert_eq!(calls[4], CanvasCall::Release);

        let scene = canvas.last_scene().unwrap();
        assert_eq!(scene.len(), 2);
        assert!(!canvas.has_surface());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut guard = SurfaceGuard::acquire(&mut canvas, Size::new(1.0, 1.0)).unwrap();
            guard.set_title(&title()).unwrap();
            assert!(guard.has_surface());
        }
        assert_eq!(canvas.release_count(), 1);
        assert!(!canvas.has_surface());
    }

    #[test]
    fn test_guard_releases_after_failed_save() {
        let mut canvas = RecordingCanvas {
            fail_save: true,
            ..RecordingCanvas::default()
        };
        let result = (|| {
            let mut guard = SurfaceGuard::acquire(&mut canvas, Size::new(1.0, 1.0))?;
            guard.save_to_file(Path::new("nope.png"))
        })();
        assert!(result.is_err());
        assert_eq!(canvas.release_count(), 1);
        assert_eq!(canvas.calls().last(), Some(&CanvasCall::Release));
    }

    #[test]
    fn test_take_calls_clears_log() {
        let mut canvas = RecordingCanvas::new();
        canvas.release();
        assert_eq!(canvas.take_calls(), vec![CanvasCall::Release]);
        assert!(canvas.calls().is_empty());
    }
}
