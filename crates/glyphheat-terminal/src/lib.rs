//! Terminal backend for glyphheat.
//!
//! [`TerminalCanvas`] implements the [`glyphheat_core::Canvas`] capability by
//! printing the figure as a grid of ANSI-colored character cells, so a figure
//! can be shown without a window system.

mod canvas;
mod color;

pub use canvas::TerminalCanvas;
pub use color::ColorMode;
