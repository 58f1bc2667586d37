//! Layout engine for glyphheat.
//!
//! Turns a character count, a figure width and a font size into the geometry
//! of a monospace character grid ([`TextLayout`]), and wraps a text/value pair
//! into rows that fit it ([`split_rows`]).

mod error;
mod layout;
mod split;

pub use error::LayoutError;
pub use layout::{
    points_to_pixels, TextLayout, AXES_LEFT, AXES_WIDTH, BASELINE_RATIO, CELL_INSET,
    COLORBAR_BAND_RATIO, COLORBAR_MARGIN, COLORBAR_OFFSET, FIGURE_DPI, FONT_HEIGHT_RATIO,
    FONT_WIDTH_RATIO, PLAIN_MARGIN, POINTS_PER_INCH, TEXT_WIDTH_RATIO, TITLE_OFFSET,
};
pub use split::{split_rows, RowChunk};
