//! Core types and traits for glyphheat.
//!
//! This crate provides the foundational types used throughout glyphheat:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Diverging colormaps and value normalization: [`colormap`]
//! - The drawing capability backends implement: [`Canvas`]
//! - A call-recording canvas for tests and diffing: [`RecordingCanvas`]

mod canvas;
mod color;
pub mod colormap;
mod draw;
mod geometry;
mod recording;

pub use canvas::{
    Canvas, CanvasError, FontSpec, GradientBar, SurfaceGuard, TextCell, Tick, TitleSpec,
};
pub use color::Color;
pub use colormap::{denormalize, normalize, Colormap, ColormapKind, LinearSegmented};
pub use draw::{DrawOp, Scene};
pub use geometry::{Point, Rect, Size};
pub use recording::{CanvasCall, RecordingCanvas};
