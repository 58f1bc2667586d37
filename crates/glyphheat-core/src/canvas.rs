//! The canvas capability a backend implements to receive a figure.
//!
//! A figure is drawn in a fixed sequence: the surface is created, the title,
//! text cells and colorbar are placed, the figure is shown or saved, and the
//! surface is released. [`SurfaceGuard`] ties the release to scope so it runs
//! on every exit path.

use crate::{Color, Rect, Size};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Errors raised by canvas backends.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The drawing backend reported a failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend does not support this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A draw call arrived before `create_surface`.
    #[error("no surface: create_surface must be called first")]
    NoSurface,
}

/// Font used for glyphs and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
}

impl FontSpec {
    /// Create a font spec.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// One glyph on a colored cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    /// The glyph
    pub glyph: char,
    /// Row index, top row first
    pub row: usize,
    /// Column index within the row
    pub column: usize,
    /// Cell box in figure pixels
    pub bounds: Rect,
    /// Glyph baseline y in figure pixels
    pub baseline: f32,
    /// Background fill and border color
    pub background: Color,
    /// Glyph color
    pub foreground: Color,
    /// Glyph font
    pub font: FontSpec,
}

/// A colorbar tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position along the bar as a fraction of its width
    pub offset: f32,
    /// Label text
    pub label: String,
}

/// Horizontal gradient strip with tick labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBar {
    /// Strip box in figure pixels
    pub bounds: Rect,
    /// Gradient colors, left to right, one slab each
    pub samples: Vec<Color>,
    /// Ticks drawn under the strip
    pub ticks: Vec<Tick>,
    /// Tick label font
    pub font: FontSpec,
}

/// Figure title, horizontally centered on `anchor_x`, top edge at `top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSpec {
    /// Title text
    pub text: String,
    /// Horizontal center in figure pixels
    pub anchor_x: f32,
    /// Top edge in figure pixels
    pub top: f32,
    /// Title font
    pub font: FontSpec,
}

/// Drawing surface capability.
///
/// Backends may buffer everything until `show` or `save_to_file`.
pub trait Canvas {
    /// Allocate a surface of `size` figure pixels, discarding any previous one.
    fn create_surface(&mut self, size: Size) -> Result<(), CanvasError>;

    /// Place one glyph on its colored cell.
    fn place_text_cell(&mut self, cell: &TextCell) -> Result<(), CanvasError>;

    /// Draw a colorbar.
    fn draw_gradient_bar(&mut self, bar: &GradientBar) -> Result<(), CanvasError>;

    /// Draw the figure title.
    fn set_title(&mut self, title: &TitleSpec) -> Result<(), CanvasError>;

    /// Display the surface.
    fn show(&mut self) -> Result<(), CanvasError>;

    /// Write the surface to `path`.
    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError>;

    /// Free the surface. Must be safe to call more than once.
    fn release(&mut self);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn create_surface(&mut self, size: Size) -> Result<(), CanvasError> {
        (**self).create_surface(size)
    }

    fn place_text_cell(&mut self, cell: &TextCell) -> Result<(), CanvasError> {
        (**self).place_text_cell(cell)
    }

    fn draw_gradient_bar(&mut self, bar: &GradientBar) -> Result<(), CanvasError> {
        (**self).draw_gradient_bar(bar)
    }

    fn set_title(&mut self, title: &TitleSpec) -> Result<(), CanvasError> {
        (**self).set_title(title)
    }

    fn show(&mut self) -> Result<(), CanvasError> {
        (**self).show()
    }

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError> {
        (**self).save_to_file(path)
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Scoped surface: created on [`SurfaceGuard::acquire`], released on drop.
pub struct SurfaceGuard<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> SurfaceGuard<'a, C> {
    /// Create a surface on `canvas` and guard its release.
    ///
    /// If creation fails the canvas is released before the error returns.
    pub fn acquire(canvas: &'a mut C, size: Size) -> Result<Self, CanvasError> {
        if let Err(e) = canvas.create_surface(size) {
            canvas.release();
            return Err(e);
        }
        tracing::trace!(width = size.width, height = size.height, "surface acquired");
        Ok(Self { canvas })
    }
}

impl<C: Canvas + ?Sized> Deref for SurfaceGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for SurfaceGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for SurfaceGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.release();
        tracing::trace!("surface released");
    }
}
