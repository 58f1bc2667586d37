//! File output through plotters.
//!
//! The scene is buffered until `save_to_file`, then replayed onto an SVG or
//! bitmap backend picked from the file extension.

use glyphheat_core::{Canvas, CanvasError, Color, GradientBar, Scene, TextCell, TitleSpec};
use glyphheat_core::{DrawOp, FontSpec, Rect, Size};
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontFamily, RGBAColor, RGBColor, TextStyle, BLACK};
use std::path::{Path, PathBuf};

/// Extension used when the output path has none.
pub const DEFAULT_EXTENSION: &str = "png";

/// Length of colorbar tick marks in pixels.
const TICK_LENGTH: i32 = 4;

/// Output format chosen from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Vector output via `SVGBackend`
    Svg,
    /// Raster output via `BitMapBackend` (PNG, JPEG, BMP by extension)
    Bitmap,
}

impl FileFormat {
    /// Pick the format for `path`, case-insensitively.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Bitmap,
        }
    }
}

/// Append [`DEFAULT_EXTENSION`] to a path without an extension.
#[must_use]
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Canvas that writes figures to image files with plotters.
#[derive(Debug, Default)]
pub struct PlottersCanvas {
    scene: Option<Scene>,
}

impl PlottersCanvas {
    /// Create a canvas with no surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scene_mut(&mut self) -> Result<&mut Scene, CanvasError> {
        self.scene.as_mut().ok_or(CanvasError::NoSurface)
    }
}

impl Canvas for PlottersCanvas {
    fn create_surface(&mut self, size: Size) -> Result<(), CanvasError> {
        self.scene = Some(Scene::new(size));
        Ok(())
    }

    fn place_text_cell(&mut self, cell: &TextCell) -> Result<(), CanvasError> {
        self.scene_mut()?.push(DrawOp::Cell(cell.clone()));
        Ok(())
    }

    fn draw_gradient_bar(&mut self, bar: &GradientBar) -> Result<(), CanvasError> {
        self.scene_mut()?.push(DrawOp::GradientBar(bar.clone()));
        Ok(())
    }

    fn set_title(&mut self, title: &TitleSpec) -> Result<(), CanvasError> {
        self.scene_mut()?.push(DrawOp::Title(title.clone()));
        Ok(())
    }

    fn show(&mut self) -> Result<(), CanvasError> {
        Err(CanvasError::Unsupported(
            "plotters canvas only writes files; display with a terminal canvas",
        ))
    }

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError> {
        let scene = self.scene.as_ref().ok_or(CanvasError::NoSurface)?;
        let path = with_default_extension(path);
        let dims = scene.size().to_pixels();

        match FileFormat::for_path(&path) {
            FileFormat::Svg => {
                let root = SVGBackend::new(&path, dims).into_drawing_area();
                paint(&root, scene)?;
                root.present().map_err(backend_error)?;
            }
            FileFormat::Bitmap => {
                let root = BitMapBackend::new(&path, dims).into_drawing_area();
                paint(&root, scene)?;
                root.present().map_err(backend_error)?;
            }
        }
        tracing::debug!(path = %path.display(), width = dims.0, height = dims.1, "figure written");
        Ok(())
    }

    fn release(&mut self) {
        self.scene = None;
    }
}

fn backend_error(e: impl std::fmt::Display) -> CanvasError {
    CanvasError::Backend(e.to_string())
}

fn rgba(color: Color) -> RGBAColor {
    let [r, g, b] = color.to_rgb8();
    RGBAColor(r, g, b, f64::from(color.a))
}

fn rgb(color: Color) -> RGBColor {
    let [r, g, b] = color.to_rgb8();
    RGBColor(r, g, b)
}

fn corners(rect: Rect) -> [(i32, i32); 2] {
    [
        (rect.x.round() as i32, rect.y.round() as i32),
        (rect.right().round() as i32, rect.bottom().round() as i32),
    ]
}

fn paint<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> Result<(), CanvasError> {
    root.fill(&plotters::style::WHITE).map_err(backend_error)?;

    for op in scene.ops() {
        match op {
            DrawOp::Title(title) => draw_title(root, title)?,
            DrawOp::Cell(cell) => draw_cell(root, cell)?,
            DrawOp::GradientBar(bar) => draw_gradient_bar(root, bar)?,
        }
    }
    Ok(())
}

fn draw_title<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &TitleSpec,
) -> Result<(), CanvasError> {
    let position = (title.anchor_x.round() as i32, title.top.round() as i32);
    draw_label(
        root,
        &title.text,
        position,
        &title.font,
        Pos::new(HPos::Center, VPos::Top),
        &BLACK,
    )
}

fn draw_cell<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    cell: &TextCell,
) -> Result<(), CanvasError> {
    let box_color = rgba(cell.background);
    let bounds = corners(cell.bounds);
    root.draw(&Rectangle::new(bounds, box_color.filled()))
        .map_err(backend_error)?;
    root.draw(&Rectangle::new(bounds, box_color.stroke_width(1)))
        .map_err(backend_error)?;

    if cell.glyph.is_control() || cell.glyph.is_whitespace() {
        return Ok(());
    }
    let glyph_color = rgb(cell.foreground);
    draw_label(
        root,
        &cell.glyph.to_string(),
        glyph_anchor(cell),
        &cell.font,
        Pos::new(HPos::Center, VPos::Bottom),
        &glyph_color,
    )
}

/// Horizontal center of the cell on the glyph baseline.
fn glyph_anchor(cell: &TextCell) -> (i32, i32) {
    let center = cell.bounds.center();
    (center.x.round() as i32, cell.baseline.round() as i32)
}

fn draw_gradient_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bar: &GradientBar,
) -> Result<(), CanvasError> {
    let bounds = bar.bounds;
    let slab = bounds.width / bar.samples.len().max(1) as f32;

    for (i, sample) in bar.samples.iter().enumerate() {
        let left = bounds.x + slab * i as f32;
        let rect = Rect::new(left, bounds.y, slab, bounds.height);
        // Round both edges so neighbouring slabs share a pixel column.
        let [(x0, y0), _] = corners(rect);
        let x1 = (left + slab).round() as i32;
        let y1 = bounds.bottom().round() as i32;
        root.draw(&Rectangle::new([(x0, y0), (x1.max(x0 + 1), y1)], rgb(*sample).filled()))
            .map_err(backend_error)?;
    }
    root.draw(&Rectangle::new(corners(bounds), BLACK.stroke_width(1)))
        .map_err(backend_error)?;

    let bottom = bounds.bottom().round() as i32;
    for tick in &bar.ticks {
        let x = (bounds.x + tick.offset * bounds.width).round() as i32;
        root.draw(&PathElement::new(
            vec![(x, bottom), (x, bottom + TICK_LENGTH)],
            BLACK.stroke_width(1),
        ))
        .map_err(backend_error)?;
        draw_label(
            root,
            &tick.label,
            (x, bottom + TICK_LENGTH + 1),
            &bar.font,
            Pos::new(HPos::Center, VPos::Top),
            &BLACK,
        )?;
    }
    Ok(())
}

/// Draw text in the requested family, falling back to the generic monospace
/// family when the system cannot provide it. Text is skipped when neither
/// family can be loaded.
fn draw_label<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    position: (i32, i32),
    font: &FontSpec,
    anchor: Pos,
    color: &RGBColor,
) -> Result<(), CanvasError> {
    let family = FontFamily::from(font.family.as_str());
    let requested = root.draw(&Text::new(
        text,
        position,
        text_style(family, font.size, anchor, color),
    ));
    if let Err(e) = requested {
        tracing::warn!(family = %font.family, error = %e, "font unavailable, using monospace");
        let fallback = text_style(FontFamily::Monospace, font.size, anchor, color);
        if let Err(e) = root.draw(&Text::new(text, position, fallback)) {
            // No usable system font: keep the colored cells, drop the text.
            tracing::warn!(error = %e, text, "text skipped");
        }
    }
    Ok(())
}

fn text_style<'a>(
    family: FontFamily<'a>,
    size: f32,
    anchor: Pos,
    color: &'a RGBColor,
) -> TextStyle<'a> {
    TextStyle::from((family, f64::from(size)))
        .pos(anchor)
        .color(color)
}
