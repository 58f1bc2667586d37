//! Colored text figures.
//!
//! A [`ColoredText`] pairs every character of a text with a value in
//! `[-1, 1]`. Construction wraps the text into rows and computes the figure
//! geometry once; rendering turns that into canvas calls.

use crate::config::RenderConfig;
use crate::error::GlyphError;
use crate::plotters_canvas::PlottersCanvas;
use glyphheat_core::colormap::{normalize, Colormap, ColormapKind, LinearSegmented};
use glyphheat_core::{Canvas, CanvasError, Color, FontSpec, GradientBar, Rect, Size};
use glyphheat_core::{SurfaceGuard, TextCell, Tick, TitleSpec};
use glyphheat_layout::{points_to_pixels, split_rows, RowChunk, TextLayout};
use glyphheat_terminal::TerminalCanvas;
use std::path::Path;

/// Font family used for glyphs unless configured otherwise.
pub const DEFAULT_FONT: &str = "Source Code Pro";

/// Opacity of cell backgrounds.
pub const CELL_ALPHA: f32 = 0.8;

/// Number of color samples across the colorbar.
pub const COLORBAR_SAMPLES: usize = 101;

/// Sample positions of the colorbar ticks.
pub const COLORBAR_TICKS: [usize; 5] = [0, 25, 50, 75, 100];

/// Point size of colorbar tick labels.
const TICK_LABEL_POINTS: f64 = 10.0;

/// How much larger the title is than the glyphs, in points.
const TITLE_EXTRA_POINTS: f64 = 2.0;

/// Font family of the title and tick labels.
const LABEL_FONT: &str = "sans-serif";

/// A text with one diverging-colormap value per character.
#[derive(Debug, Clone)]
pub struct ColoredText {
    text: String,
    values: Vec<f64>,
    fontname: String,
    colormap_kind: ColormapKind,
    colormap: LinearSegmented,
    cell_alpha: f32,
    layout: TextLayout,
    rows: Vec<RowChunk>,
}

impl ColoredText {
    /// Create a figure with the default font, colormap and colorbar.
    ///
    /// # Errors
    ///
    /// [`GlyphError::ShapeMismatch`] when `values` does not hold exactly one
    /// entry per character, checked before any geometry; otherwise any
    /// [`GlyphError::Layout`] from the layout.
    pub fn new(
        text: impl Into<String>,
        values: &[f64],
        width: f64,
        fontsize: f64,
    ) -> Result<Self, GlyphError> {
        Self::builder(text, values)
            .width(width)
            .fontsize(fontsize)
            .build()
    }

    /// Create a figure from a [`RenderConfig`].
    pub fn with_config(
        text: impl Into<String>,
        values: &[f64],
        config: &RenderConfig,
    ) -> Result<Self, GlyphError> {
        Self::builder(text, values).config(config.clone()).build()
    }

    /// Start a builder with default parameters.
    pub fn builder(text: impl Into<String>, values: &[f64]) -> ColoredTextBuilder {
        ColoredTextBuilder {
            text: text.into(),
            values: values.to_vec(),
            config: RenderConfig::default(),
        }
    }

    /// The original text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Values mapped into `[0, 1]`.
    #[must_use]
    pub fn normalized_values(&self) -> &[f64] {
        &self.values
    }

    /// The computed geometry.
    #[must_use]
    pub const fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Wrapped rows, top first.
    #[must_use]
    pub fn rows(&self) -> &[RowChunk] {
        &self.rows
    }

    /// Glyph font family.
    #[must_use]
    pub fn fontname(&self) -> &str {
        &self.fontname
    }

    /// Selected colormap.
    #[must_use]
    pub const fn colormap(&self) -> ColormapKind {
        self.colormap_kind
    }

    /// Whether the colorbar is drawn.
    #[must_use]
    pub const fn disp_colorbar(&self) -> bool {
        self.layout.disp_colorbar
    }

    /// Figure size in pixels.
    #[must_use]
    pub fn figure_size(&self) -> Size {
        let (width, height) = self.layout.figure_pixels();
        Size::new(width as f32, height as f32)
    }

    /// Rectangle of the text axes in figure pixels.
    #[must_use]
    pub fn text_area(&self) -> Rect {
        let [left, bottom, width, height] = self.layout.text_axes();
        Rect::from_fractions(
            self.figure_size(),
            left as f32,
            bottom as f32,
            width as f32,
            height as f32,
        )
    }

    /// Title placed top-center, slightly larger than the glyphs.
    #[must_use]
    pub fn title_spec(&self, title: &str) -> TitleSpec {
        let size = self.figure_size();
        TitleSpec {
            text: title.to_string(),
            anchor_x: size.width * 0.5,
            top: (1.0 - self.layout.title_y) as f32 * size.height,
            font: FontSpec::new(
                LABEL_FONT,
                points_to_pixels(self.layout.fontsize + TITLE_EXTRA_POINTS) as f32,
            ),
        }
    }

    /// One cell per character, row by row.
    #[must_use]
    pub fn cells(&self) -> Vec<TextCell> {
        let area = self.text_area();
        let font = FontSpec::new(&self.fontname, self.layout.glyph_pixels() as f32);
        let cell_width = (self.layout.char_width_fraction * f64::from(area.width)) as f32;
        let cell_height = (self.layout.char_height_fraction * f64::from(area.height)) as f32;

        let mut cells = Vec::with_capacity(self.layout.char_count);
        for (row, chunk) in self.rows.iter().enumerate() {
            let top = area.y + (1.0 - self.layout.row_top(row)) as f32 * area.height;
            let baseline = area.y + (1.0 - self.layout.row_baseline(row)) as f32 * area.height;
            for (column, (glyph, value)) in chunk.cells().enumerate() {
                let left = area.x + self.layout.cell_left(column) as f32 * area.width;
                cells.push(TextCell {
                    glyph,
                    row,
                    column,
                    bounds: Rect::new(left, top, cell_width, cell_height),
                    baseline,
                    background: self.cell_color(value),
                    foreground: Color::BLACK,
                    font: font.clone(),
                });
            }
        }
        cells
    }

    /// Colorbar legend, when enabled.
    #[must_use]
    pub fn colorbar(&self) -> Option<GradientBar> {
        let [left, bottom, width, height] = self.layout.colorbar_axes()?;
        let bounds = Rect::from_fractions(
            self.figure_size(),
            left as f32,
            bottom as f32,
            width as f32,
            height as f32,
        );

        let ticks = COLORBAR_TICKS
            .iter()
            .map(|&raw| Tick {
                offset: (raw as f32 + 0.5) / COLORBAR_SAMPLES as f32,
                label: tick_label(raw),
            })
            .collect();
        Some(GradientBar {
            bounds,
            samples: self.colormap.gradient(COLORBAR_SAMPLES),
            ticks,
            font: FontSpec::new(LABEL_FONT, points_to_pixels(TICK_LABEL_POINTS) as f32),
        })
    }

    /// Issue every drawing call of the figure on a canvas that already has a
    /// surface.
    pub fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        title: Option<&str>,
    ) -> Result<(), CanvasError> {
        if let Some(title) = title {
            canvas.set_title(&self.title_spec(title))?;
        }
        for cell in self.cells() {
            canvas.place_text_cell(&cell)?;
        }
        if let Some(bar) = self.colorbar() {
            canvas.draw_gradient_bar(&bar)?;
        }
        Ok(())
    }

    /// Render onto `canvas`, saving to `output` or showing when `None`.
    ///
    /// The surface is released on every path, including errors.
    pub fn render_with<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        title: Option<&str>,
        output: Option<&Path>,
    ) -> Result<(), GlyphError> {
        let mut surface = SurfaceGuard::acquire(canvas, self.figure_size())?;
        self.draw(&mut *surface, title)?;
        match output {
            Some(path) => surface.save_to_file(path)?,
            None => surface.show()?,
        }
        tracing::debug!(
            chars = self.layout.char_count,
            rows = self.rows.len(),
            output = ?output,
            "figure rendered"
        );
        Ok(())
    }

    /// Render to an image file, or to the terminal when `output` is `None`.
    pub fn render(&self, title: Option<&str>, output: Option<&Path>) -> Result<(), GlyphError> {
        match output {
            Some(path) => self.render_with(&mut PlottersCanvas::new(), title, Some(path)),
            None => self.render_with(&mut TerminalCanvas::stdout(), title, None),
        }
    }

    fn cell_color(&self, value: f64) -> Color {
        self.colormap.map(value).with_alpha(self.cell_alpha)
    }
}

/// Label of the colorbar tick at sample `raw`, in value units.
fn tick_label(raw: usize) -> String {
    let half = (COLORBAR_SAMPLES - 1) as f64 / 2.0;
    format!("{:?}", (raw as f64 - half) / half)
}

/// Builder for [`ColoredText`].
#[derive(Debug, Clone)]
pub struct ColoredTextBuilder {
    text: String,
    values: Vec<f64>,
    config: RenderConfig,
}

impl ColoredTextBuilder {
    /// Replace every parameter with `config`.
    #[must_use]
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Figure width in pixels.
    #[must_use]
    pub const fn width(mut self, width: f64) -> Self {
        self.config.width = width;
        self
    }

    /// Glyph size in points.
    #[must_use]
    pub const fn fontsize(mut self, fontsize: f64) -> Self {
        self.config.fontsize = fontsize;
        self
    }

    /// Glyph font family.
    #[must_use]
    pub fn fontname(mut self, fontname: impl Into<String>) -> Self {
        self.config.fontname = fontname.into();
        self
    }

    /// Draw the colorbar legend.
    #[must_use]
    pub const fn colorbar(mut self, colorbar: bool) -> Self {
        self.config.colorbar = colorbar;
        self
    }

    /// Diverging colormap.
    #[must_use]
    pub const fn colormap(mut self, colormap: ColormapKind) -> Self {
        self.config.colormap = colormap;
        self
    }

    /// Opacity of cell backgrounds.
    #[must_use]
    pub const fn cell_alpha(mut self, alpha: f32) -> Self {
        self.config.cell_alpha = alpha;
        self
    }

    /// Validate the input and compute the figure.
    pub fn build(self) -> Result<ColoredText, GlyphError> {
        let Self {
            text,
            values,
            config,
        } = self;

        let text_len = text.chars().count();
        if text_len != values.len() {
            return Err(GlyphError::ShapeMismatch {
                text_len,
                values_len: values.len(),
            });
        }
        let layout =
            TextLayout::compute(text_len, config.width, config.fontsize, config.colorbar)?;
        config.validate()?;

        let values: Vec<f64> = values.iter().copied().map(normalize).collect();
        let rows = split_rows(&text, &values, layout.chars_per_line);

        Ok(ColoredText {
            text,
            values,
            fontname: config.fontname,
            colormap_kind: config.colormap,
            colormap: config.colormap.build(),
            cell_alpha: config.cell_alpha,
            layout,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphheat_core::{CanvasCall, DrawOp, RecordingCanvas};
    use glyphheat_layout::LayoutError;
    use std::path::PathBuf;

    fn digits(n: usize) -> String {
        (0..n).map(|i| char::from(b'0' + (i % 10) as u8)).collect()
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| if n == 1 { 0.0 } else { -1.0 + 2.0 * i as f64 / (n - 1) as f64 })
            .collect()
    }

    #[test]
    fn test_scenario_1080_14() {
        let figure = ColoredText::new("hello", &[-1.0, -0.5, 0.0, 0.5, 1.0], 1080.0, 14.0).unwrap();
        let layout = figure.layout();
        assert_eq!(layout.chars_per_line.get(), 72);
        assert_eq!(layout.line_count, 1);
        assert!((layout.text_height - 26.6).abs() < 1e-9);
        assert_eq!(figure.rows().len(), 1);
        assert_eq!(figure.rows()[0].text, "hello");
        assert_eq!(figure.normalized_values(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_shape_mismatch_precedes_layout() {
        // width 0 would fail the layout, but the shape check comes first
        let err = ColoredText::new("abc", &[0.0, 0.0], 0.0, 14.0).unwrap_err();
        assert!(matches!(
            err,
            GlyphError::ShapeMismatch {
                text_len: 3,
                values_len: 2
            }
        ));
    }

    #[test]
    fn test_shape_counts_characters_not_bytes() {
        let figure = ColoredText::new("héllo", &[0.0; 5], 1080.0, 14.0);
        assert!(figure.is_ok());
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = ColoredText::new("", &[], 1080.0, 14.0).unwrap_err();
        assert!(matches!(err, GlyphError::Layout(LayoutError::EmptyText)));
    }

    #[test]
    fn test_degenerate_layout_rejected() {
        let err = ColoredText::new("ab", &[0.0, 0.0], 20.0, 14.0).unwrap_err();
        assert!(matches!(
            err,
            GlyphError::Layout(LayoutError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_tick_labels() {
        let figure = ColoredText::new("x", &[0.0], 1080.0, 14.0).unwrap();
        let bar = figure.colorbar().unwrap();
        let labels: Vec<&str> = bar.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["-1.0", "-0.5", "0.0", "0.5", "1.0"]);
        assert_eq!(bar.samples.len(), COLORBAR_SAMPLES);
        let offsets: Vec<f32> = bar.ticks.iter().map(|t| t.offset).collect();
        assert!((offsets[0] - 0.5 / 101.0).abs() < 1e-6);
        assert!((offsets[1] - 25.5 / 101.0).abs() < 1e-6);
        assert!((offsets[2] - 0.5).abs() < 1e-6);
        assert!((offsets[4] - 100.5 / 101.0).abs() < 1e-6);
    }

    #[test]
    fn test_colorbar_geometry() {
        let figure = ColoredText::new(digits(10), &ramp(10), 1080.0, 14.0).unwrap();
        let bar = figure.colorbar().unwrap();
        let height = figure.figure_size().height;
        assert!((bar.bounds.height - 20.0).abs() < 1e-3);
        assert!((bar.bounds.bottom() - (height - 20.0)).abs() < 1e-3);
        assert!((bar.bounds.x - 0.02 * 1080.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_colorbar() {
        let figure = ColoredText::builder("abc", &[0.0; 3])
            .colorbar(false)
            .build()
            .unwrap();
        assert!(figure.colorbar().is_none());
        let mut canvas = RecordingCanvas::new();
        figure.render_with(&mut canvas, None, None).unwrap();
        let scene = canvas.last_scene().unwrap();
        assert_eq!(scene.gradient_bars().count(), 0);
        assert!(scene.title().is_none());
    }

    #[test]
    fn test_cells_follow_rows() {
        let figure = ColoredText::new(digits(100), &ramp(100), 1080.0, 14.0).unwrap();
        let cells = figure.cells();
        assert_eq!(cells.len(), 100);
        assert_eq!(cells[71].row, 0);
        assert_eq!(cells[72].row, 1);
        assert_eq!(cells[72].column, 0);
        assert!(cells[72].bounds.y > cells[0].bounds.y);
        assert!((cells[1].bounds.x - cells[0].bounds.x - cells[0].bounds.width).abs() < 1e-3);
        assert!((cells[0].bounds.height - 26.6).abs() < 1e-3);
    }

    #[test]
    fn test_cell_colors() {
        let figure = ColoredText::new("abc", &[-1.0, 0.0, 1.0], 1080.0, 14.0).unwrap();
        let cells = figure.cells();
        let blue = cells[0].background;
        let red = cells[2].background;
        assert!(blue.b > 0.99 && blue.r < 0.01);
        assert!(red.r > 0.99 && red.b < 0.01);
        assert!(cells.iter().all(|c| (c.background.a - CELL_ALPHA).abs() < 1e-6));
        assert!(cells.iter().all(|c| c.font.family == DEFAULT_FONT));
    }

    #[test]
    fn test_nan_value_is_dark_cell() {
        let figure = ColoredText::new("ab", &[f64::NAN, 0.0], 1080.0, 14.0).unwrap();
        let background = figure.cells()[0].background;
        assert_eq!(background.to_rgb8(), [0, 0, 0]);
        assert!((background.a - CELL_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn test_glyph_baseline_within_cell() {
        let figure = ColoredText::new(digits(100), &ramp(100), 1080.0, 14.0).unwrap();
        let cells = figure.cells();
        for cell in [&cells[0], &cells[72]] {
            // 0.6 of a 26.6 px row below the row top
            assert!((cell.baseline - cell.bounds.y - 15.96).abs() < 1e-2);
        }
        assert!((cells[72].baseline - cells[0].baseline - 26.6).abs() < 1e-2);
    }

    #[test]
    fn test_title_spec() {
        let figure = ColoredText::new("abc", &[0.0; 3], 1080.0, 14.0).unwrap();
        let title = figure.title_spec("n:3");
        assert!((title.anchor_x - 540.0).abs() < 1e-3);
        assert!((title.top - 10.0).abs() < 1e-3);
        assert!((title.font.size - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_render_call_sequence() {
        let figure = ColoredText::new("hello", &[-1.0, -0.5, 0.0, 0.5, 1.0], 1080.0, 14.0).unwrap();
        let mut canvas = RecordingCanvas::new();
        let out = PathBuf::from("figure.png");
        figure.render_with(&mut canvas, Some("hi"), Some(&out)).unwrap();

        let calls = canvas.calls();
        assert!(matches!(calls[0], CanvasCall::CreateSurface(_)));
        assert!(matches!(calls[1], CanvasCall::Draw(DrawOp::Title(_))));
        assert!(matches!(
            calls[calls.len() - 3],
            CanvasCall::Draw(DrawOp::GradientBar(_))
        ));
        assert_eq!(calls[calls.len() - 2], CanvasCall::Save(out));
        assert_eq!(calls[calls.len() - 1], CanvasCall::Release);
        assert_eq!(canvas.last_scene().unwrap().cells().count(), 5);
        assert!(!canvas.has_surface());
    }

    #[test]
    fn test_render_without_output_shows() {
        let figure = ColoredText::new("a", &[0.0], 540.0, 10.0).unwrap();
        let mut canvas = RecordingCanvas::new();
        figure.render_with(&mut canvas, None, None).unwrap();
        assert!(canvas.calls().contains(&CanvasCall::Show));
        assert_eq!(canvas.release_count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let figure = ColoredText::new(digits(375), &ramp(375), 540.0, 18.0).unwrap();
        let mut canvas = RecordingCanvas::new();
        figure.render_with(&mut canvas, Some("t"), None).unwrap();
        let first = canvas.take_calls();
        figure.render_with(&mut canvas, Some("t"), None).unwrap();
        assert_eq!(first, canvas.take_calls());
    }

    #[test]
    fn test_release_on_save_failure() {
        let figure = ColoredText::new("abc", &[0.0; 3], 1080.0, 14.0).unwrap();
        let mut canvas = RecordingCanvas::default();
        canvas.fail_save = true;
        let err = figure
            .render_with(&mut canvas, None, Some(Path::new("x.png")))
            .unwrap_err();
        assert!(matches!(err, GlyphError::Canvas(CanvasError::Backend(_))));
        assert_eq!(canvas.release_count(), 1);
        assert!(!canvas.has_surface());
    }

    #[test]
    fn test_release_on_show_failure() {
        let figure = ColoredText::new("abc", &[0.0; 3], 1080.0, 14.0).unwrap();
        let mut canvas = RecordingCanvas::default();
        canvas.fail_show = true;
        assert!(figure.render_with(&mut canvas, None, None).is_err());
        assert_eq!(canvas.release_count(), 1);
    }

    #[test]
    fn test_builder_overrides() {
        let figure = ColoredText::builder("ab", &[0.0, 0.0])
            .width(540.0)
            .fontsize(10.0)
            .fontname("DejaVu Sans Mono")
            .colormap(ColormapKind::Seismic)
            .build()
            .unwrap();
        assert_eq!(figure.fontname(), "DejaVu Sans Mono");
        assert_eq!(figure.colormap(), ColormapKind::Seismic);
        assert_eq!(figure.layout().chars_per_line.get(), 50);
    }

    #[test]
    fn test_builder_rejects_bad_alpha() {
        let err = ColoredText::builder("ab", &[0.0, 0.0])
            .cell_alpha(2.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, GlyphError::Config(_)));
    }

    #[test]
    fn test_with_config() {
        let config = RenderConfig {
            width: 540.0,
            colorbar: false,
            ..RenderConfig::default()
        };
        let figure = ColoredText::with_config("abc", &[0.0; 3], &config).unwrap();
        assert!(!figure.disp_colorbar());
        assert!((figure.figure_size().width - 540.0).abs() < 1e-3);
    }
}
