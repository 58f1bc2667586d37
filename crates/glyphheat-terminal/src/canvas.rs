//! Terminal canvas: shows a figure as colored character cells.
//!
//! Each text cell becomes one terminal cell whose background is the cell color
//! composited over white paper. The colorbar becomes a row of colored blanks
//! spanning the grid, followed by a row of tick labels. The title is centered
//! above the grid.

use crate::color::ColorMode;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use glyphheat_core::{Canvas, CanvasError, Color, GradientBar, Scene, TextCell, TitleSpec};
use glyphheat_core::{DrawOp, Size};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use unicode_width::UnicodeWidthChar;

/// Canvas that writes figures to a terminal (or any writer) with ANSI colors.
pub struct TerminalCanvas<W: Write> {
    out: W,
    color_mode: ColorMode,
    paper: Color,
    scene: Option<Scene>,
}

impl TerminalCanvas<Stdout> {
    /// Canvas on standard output with detected color support.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalCanvas<W> {
    /// Create a canvas writing to `out`, detecting color support from the
    /// environment.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color_mode: ColorMode::detect(),
            paper: Color::WHITE,
            scene: None,
        }
    }

    /// Use a specific color mode.
    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn scene_mut(&mut self) -> Result<&mut Scene, CanvasError> {
        self.scene.as_mut().ok_or(CanvasError::NoSurface)
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
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
        let scene = self.scene.as_ref().ok_or(CanvasError::NoSurface)?;
        let painter = Painter {
            mode: self.color_mode,
            paper: self.paper,
        };
        painter.paint(&mut self.out, scene)?;
        self.out.flush()?;
        Ok(())
    }

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError> {
        let scene = self.scene.as_ref().ok_or(CanvasError::NoSurface)?;
        let painter = Painter {
            mode: self.color_mode,
            paper: self.paper,
        };
        let mut file = BufWriter::new(File::create(path)?);
        painter.paint(&mut file, scene)?;
        file.flush()?;
        tracing::debug!(path = %path.display(), "terminal figure written");
        Ok(())
    }

    fn release(&mut self) {
        self.scene = None;
    }
}

struct Painter {
    mode: ColorMode,
    paper: Color,
}

impl Painter {
    fn paint(&self, out: &mut impl Write, scene: &Scene) -> io::Result<()> {
        let mut rows: Vec<Vec<&TextCell>> = vec![Vec::new(); scene.row_count()];
        for cell in scene.cells() {
            rows[cell.row].push(cell);
        }
        for row in &mut rows {
            row.sort_by_key(|c| c.column);
        }
        let grid_width = rows
            .iter()
            .filter_map(|r| r.last().map(|c| c.column + 1))
            .max()
            .unwrap_or(0);

        if let Some(title) = scene.title() {
            let len = title.text.chars().count();
            let pad = grid_width.saturating_sub(len) / 2;
            writeln!(out, "{:pad$}{}", "", title.text)?;
        }

        for row in &rows {
            let mut column = 0;
            for cell in row {
                // Gaps in a row are left as paper.
                while column < cell.column {
                    write!(out, " ")?;
                    column += 1;
                }
                self.cell(out, cell)?;
                column += 1;
            }
            queue!(out, ResetColor)?;
            writeln!(out)?;
        }

        for bar in scene.gradient_bars() {
            self.gradient_bar(out, bar, grid_width.max(bar.ticks.len() * 5))?;
        }
        Ok(())
    }

    fn cell(&self, out: &mut impl Write, cell: &TextCell) -> io::Result<()> {
        let background = cell.background.over(&self.paper);
        self.set_colors(out, Some(cell.foreground), Some(background))?;
        queue!(out, Print(visible_glyph(cell.glyph)))
    }

    fn gradient_bar(&self, out: &mut impl Write, bar: &GradientBar, width: usize) -> io::Result<()> {
        if bar.samples.is_empty() || width == 0 {
            return Ok(());
        }
        for i in 0..width {
            let sample = bar.samples[i * bar.samples.len() / width];
            self.set_colors(out, None, Some(sample.over(&self.paper)))?;
            queue!(out, Print(' '))?;
        }
        queue!(out, ResetColor)?;
        writeln!(out)?;

        let mut labels = vec![' '; width];
        for tick in &bar.ticks {
            let len = tick.label.chars().count();
            let center = (tick.offset.clamp(0.0, 1.0) * (width - 1) as f32).round() as usize;
            let start = center.saturating_sub(len / 2).min(width.saturating_sub(len));
            for (slot, ch) in labels.iter_mut().skip(start).zip(tick.label.chars()) {
                *slot = ch;
            }
        }
        let line: String = labels.into_iter().collect();
        writeln!(out, "{}", line.trim_end())
    }

    fn set_colors(
        &self,
        out: &mut impl Write,
        foreground: Option<Color>,
        background: Option<Color>,
    ) -> io::Result<()> {
        if let Some(fg) = foreground.and_then(|c| self.mode.to_crossterm(c)) {
            queue!(out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = background.and_then(|c| self.mode.to_crossterm(c)) {
            queue!(out, SetBackgroundColor(bg))?;
        }
        Ok(())
    }
}

/// A single-column stand-in for glyphs that would break the grid.
fn visible_glyph(glyph: char) -> char {
    match glyph {
        '\n' => '↵',
        '\t' => '⇥',
        c if c.width() == Some(1) => c,
        _ => '·',
    }
}
