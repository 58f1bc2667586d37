//! Figure geometry for a monospace character grid.
//!
//! All quantities are in figure pixels at [`FIGURE_DPI`] unless noted, and
//! fractions are proportions of the figure (or of the text axes) measured
//! from the bottom-left corner.
//!
//! The font metrics are a fixed-aspect approximation of a monospace face:
//! a cell is `fontsize` wide and `1.9 * fontsize` tall. Margins are calibrated
//! for a 1080 wide figure at fontsize 14; other combinations are close but
//! margins may not line up exactly.

use crate::LayoutError;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Cell width as a multiple of the font size.
pub const FONT_WIDTH_RATIO: f64 = 1.0;
/// Cell height as a multiple of the font size.
pub const FONT_HEIGHT_RATIO: f64 = 1.9;
/// Share of the figure width usable for text.
pub const TEXT_WIDTH_RATIO: f64 = 0.95;
/// Height of the colorbar band as a multiple of the cell height.
pub const COLORBAR_BAND_RATIO: f64 = 0.7;
/// Vertical margin added to the text area when a colorbar is drawn.
pub const COLORBAR_MARGIN: f64 = 50.0;
/// Vertical margin added to the text area without a colorbar.
pub const PLAIN_MARGIN: f64 = 30.0;
/// Distance of the colorbar from the bottom edge.
pub const COLORBAR_OFFSET: f64 = 20.0;
/// Distance of the title from the top edge.
pub const TITLE_OFFSET: f64 = 10.0;
/// Pixels per inch of the figure.
pub const FIGURE_DPI: f64 = 90.0;
/// Points per inch, for converting font sizes to pixels.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Left edge of the text and colorbar axes, as a figure fraction.
pub const AXES_LEFT: f64 = 0.02;
/// Width of the text and colorbar axes, as a figure fraction.
pub const AXES_WIDTH: f64 = 0.97;
/// Horizontal inset of the first glyph, as a text axes fraction.
pub const CELL_INSET: f64 = 0.01;
/// Baseline position inside a row, as a share of the cell height from the top.
pub const BASELINE_RATIO: f64 = 0.6;

/// Eagerly computed geometry of one figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayout {
    /// Number of characters laid out
    pub char_count: usize,
    /// Requested figure width
    pub width: f64,
    /// Requested font size (points)
    pub fontsize: f64,
    /// Whether space is reserved for a colorbar
    pub disp_colorbar: bool,
    /// Cell width
    pub font_width: f64,
    /// Cell height
    pub font_height: f64,
    /// Usable text width
    pub text_width: f64,
    /// Characters per row
    pub chars_per_line: NonZeroUsize,
    /// Number of rows
    pub line_count: usize,
    /// Height of the rows alone
    pub text_height: f64,
    /// Extra height reserved for the colorbar (0 without one)
    pub colorbar_band: f64,
    /// Height of the text axes: rows plus colorbar band
    pub text_area_height: f64,
    /// Total figure height
    pub figure_height: f64,
    /// Bottom of the text axes (and colorbar height), figure fraction
    pub text_bottom: f64,
    /// Height of the text axes, figure fraction
    pub text_fraction: f64,
    /// Title position, figure fraction from the bottom
    pub title_y: f64,
    /// Width of one cell, text axes fraction
    pub char_width_fraction: f64,
    /// Height of one cell, text axes fraction
    pub char_height_fraction: f64,
}

impl TextLayout {
    /// Compute the layout for `char_count` glyphs.
    ///
    /// # Errors
    ///
    /// Fails on empty text, on a width or font size that is not finite and
    /// positive, and when the width cannot hold at least one glyph per line.
    pub fn compute(
        char_count: usize,
        width: f64,
        fontsize: f64,
        disp_colorbar: bool,
    ) -> Result<Self, LayoutError> {
        check_positive("width", width)?;
        check_positive("fontsize", fontsize)?;
        if char_count == 0 {
            return Err(LayoutError::EmptyText);
        }

        let font_width = FONT_WIDTH_RATIO * fontsize;
        let font_height = FONT_HEIGHT_RATIO * font_width;
        let text_width = TEXT_WIDTH_RATIO * width;

        let per_line = (text_width / font_width).floor() as i64 - 1;
        let chars_per_line = usize::try_from(per_line)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(LayoutError::Degenerate {
                width,
                fontsize,
                chars_per_line: per_line,
            })?;

        let line_count = char_count.div_ceil(chars_per_line.get());
        let text_height = line_count as f64 * font_height;

        let (colorbar_band, margin) = if disp_colorbar {
            (COLORBAR_BAND_RATIO * font_height, COLORBAR_MARGIN)
        } else {
            (0.0, PLAIN_MARGIN)
        };
        let text_area_height = text_height + colorbar_band;
        let figure_height = text_area_height + margin;
        let text_bottom = if disp_colorbar {
            COLORBAR_OFFSET / figure_height
        } else {
            0.0
        };

        let layout = Self {
            char_count,
            width,
            fontsize,
            disp_colorbar,
            font_width,
            font_height,
            text_width,
            chars_per_line,
            line_count,
            text_height,
            colorbar_band,
            text_area_height,
            figure_height,
            text_bottom,
            text_fraction: text_area_height / figure_height,
            title_y: 1.0 - TITLE_OFFSET / figure_height,
            char_width_fraction: font_width / text_width,
            char_height_fraction: font_height / text_area_height,
        };
        tracing::debug!(
            char_count,
            chars_per_line = layout.chars_per_line.get(),
            line_count,
            figure_height,
            "layout computed"
        );
        Ok(layout)
    }

    /// Figure size in pixels `(width, height)`.
    #[must_use]
    pub fn figure_pixels(&self) -> (f64, f64) {
        (self.width, self.figure_height)
    }

    /// Physical figure size in inches `(width, height)`.
    #[must_use]
    pub fn figure_inches(&self) -> (f64, f64) {
        (self.width / FIGURE_DPI, self.figure_height / FIGURE_DPI)
    }

    /// Text axes as `[left, bottom, width, height]` figure fractions.
    #[must_use]
    pub fn text_axes(&self) -> [f64; 4] {
        [AXES_LEFT, self.text_bottom, AXES_WIDTH, self.text_fraction]
    }

    /// Colorbar axes as `[left, bottom, width, height]` figure fractions.
    #[must_use]
    pub fn colorbar_axes(&self) -> Option<[f64; 4]> {
        self.disp_colorbar
            .then(|| [AXES_LEFT, self.text_bottom, AXES_WIDTH, self.text_bottom])
    }

    /// Left edge of column `column`, as a text axes fraction.
    #[must_use]
    pub fn cell_left(&self, column: usize) -> f64 {
        (column as f64).mul_add(self.char_width_fraction, CELL_INSET)
    }

    /// Top edge of row `row`, as a text axes fraction from the bottom.
    #[must_use]
    pub fn row_top(&self, row: usize) -> f64 {
        1.0 - row as f64 * self.char_height_fraction
    }

    /// Glyph baseline of row `row`, as a text axes fraction from the bottom.
    #[must_use]
    pub fn row_baseline(&self, row: usize) -> f64 {
        1.0 - (row as f64 + BASELINE_RATIO) * self.char_height_fraction
    }

    /// Glyph size in pixels for the layout's point size.
    #[must_use]
    pub fn glyph_pixels(&self) -> f64 {
        points_to_pixels(self.fontsize)
    }
}

/// Convert a point size to figure pixels.
#[must_use]
pub fn points_to_pixels(points: f64) -> f64 {
    points * FIGURE_DPI / POINTS_PER_INCH
}

fn check_positive(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter { name, value })
    }
}
