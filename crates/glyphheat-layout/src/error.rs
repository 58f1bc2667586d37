//! Error types for glyphheat-layout.

use thiserror::Error;

/// Reasons a text layout cannot be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// There is nothing to lay out.
    #[error("cannot lay out empty text")]
    EmptyText,

    /// A size parameter is zero, negative or not finite.
    #[error("invalid {name}: {value} (must be finite and positive)")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// The width is too small for even one glyph per line at this font size.
    #[error(
        "degenerate layout: width {width} fits {chars_per_line} characters per line at fontsize {fontsize}"
    )]
    Degenerate {
        /// Requested figure width
        width: f64,
        /// Requested font size
        fontsize: f64,
        /// Computed characters per line (< 1)
        chars_per_line: i64,
    },
}
