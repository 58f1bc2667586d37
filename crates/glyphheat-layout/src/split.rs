//! Line wrapping of a text/value pair into fixed-width rows.

use serde::Serialize;
use std::num::NonZeroUsize;

/// One row's characters and their paired values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowChunk {
    /// Row text
    pub text: String,
    /// One value per character of `text`
    pub values: Vec<f64>,
}

impl RowChunk {
    /// Number of characters in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row is empty. Rows produced by [`split_rows`] never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Characters paired with their values.
    pub fn cells(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.text.chars().zip(self.values.iter().copied())
    }
}

/// Split `text` and `values` into consecutive rows of `per_line` characters.
///
/// Every row but the last is full; the last holds the remainder, or a full
/// row when the length divides evenly. Characters are Unicode scalar values.
/// `values` must hold one entry per character.
#[must_use]
pub fn split_rows(text: &str, values: &[f64], per_line: NonZeroUsize) -> Vec<RowChunk> {
    let chars: Vec<char> = text.chars().collect();
    debug_assert_eq!(chars.len(), values.len(), "one value per character");

    chars
        .chunks(per_line.get())
        .zip(values.chunks(per_line.get()))
        .map(|(text, values)| RowChunk {
            text: text.iter().collect(),
            values: values.to_vec(),
        })
        .collect()
}
