//! Error types for glyphheat.

use glyphheat_core::CanvasError;
use glyphheat_layout::LayoutError;
use thiserror::Error;

/// Errors from building or rendering a colored text figure.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// Text and values differ in length.
    #[error("shape mismatch: text has {text_len} characters but {values_len} values were given")]
    ShapeMismatch {
        /// Characters in the text
        text_len: usize,
        /// Number of values
        values_len: usize,
    },

    /// The layout could not be computed.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The canvas backend failed.
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// IO error reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = GlyphError::ShapeMismatch {
            text_len: 5,
            values_len: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("shape mismatch"));
        assert!(msg.contains("5 characters"));
        assert!(msg.contains("4 values"));
    }

    #[test]
    fn test_layout_error_from() {
        let err: GlyphError = LayoutError::EmptyText.into();
        assert!(matches!(err, GlyphError::Layout(LayoutError::EmptyText)));
        assert!(err.to_string().contains("empty text"));
    }

    #[test]
    fn test_canvas_error_from() {
        let err: GlyphError = CanvasError::NoSurface.into();
        assert!(err.to_string().starts_with("canvas error"));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err = GlyphError::from(io);
        assert!(err.to_string().contains("missing.yaml"));
    }
}
