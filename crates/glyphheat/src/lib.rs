//! glyphheat: text colored by per-character values.
//!
//! Each character of a text is drawn on a cell whose background comes from a
//! diverging colormap, with an optional colorbar and title. Figures are
//! written to PNG/SVG files or shown in the terminal.
//!
//! ```no_run
//! use glyphheat::ColoredText;
//! use std::path::Path;
//!
//! let values = [-1.0, -0.5, 0.0, 0.5, 1.0];
//! let figure = ColoredText::new("hello", &values, 1080.0, 14.0)?;
//! figure.render(Some("attention"), Some(Path::new("hello.png")))?;
//! # Ok::<(), glyphheat::GlyphError>(())
//! ```

mod colored_text;
mod config;
mod error;
mod plotters_canvas;

pub use colored_text::{
    ColoredText, ColoredTextBuilder, CELL_ALPHA, COLORBAR_SAMPLES, COLORBAR_TICKS, DEFAULT_FONT,
};
pub use config::RenderConfig;
pub use error::GlyphError;
pub use plotters_canvas::{with_default_extension, FileFormat, PlottersCanvas, DEFAULT_EXTENSION};

pub use glyphheat_core::colormap::{denormalize, normalize, Colormap, ColormapKind};
pub use glyphheat_core::{Canvas, CanvasError, RecordingCanvas};
pub use glyphheat_layout::{LayoutError, RowChunk, TextLayout};
pub use glyphheat_terminal::{ColorMode, TerminalCanvas};
