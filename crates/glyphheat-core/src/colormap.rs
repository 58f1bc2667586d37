//! Diverging colormaps and value normalization.
//!
//! Values live in `[-1, 1]`; colormaps take the normalized scalar `(v + 1) / 2`
//! in `[0, 1]`. Lookups are quantized through a lookup table the way classic
//! plotting colormaps are: `index = floor(t * N)`, with `t == 1` folded into
//! the last entry and anything outside `[0, 1]` clamped to the end colors.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default lookup table size.
pub const LUT_SIZE: usize = 256;

/// Rescale a value from `[-1, 1]` to `[0, 1]`.
///
/// Out-of-range inputs are passed through unclamped.
#[must_use]
pub fn normalize(v: f64) -> f64 {
    (v + 1.0) / 2.0
}

/// Inverse of [`normalize`].
#[must_use]
pub fn denormalize(t: f64) -> f64 {
    t.mul_add(2.0, -1.0)
}

/// Maps a normalized scalar to a color.
pub trait Colormap {
    /// Name the colormap is registered under.
    fn name(&self) -> &str;

    /// Color for a normalized scalar.
    fn map(&self, t: f64) -> Color;

    /// `samples` evenly spaced colors across `[0, 1]`, endpoints included.
    fn gradient(&self, samples: usize) -> Vec<Color> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.map(0.0)],
            n => (0..n)
                .map(|i| self.map(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

/// Colormap interpolated linearly between evenly spaced anchor colors.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSegmented {
    name: String,
    lut: Vec<Color>,
    bad: Color,
}

impl LinearSegmented {
    /// Build a colormap from evenly spaced anchors with a `lut_size` table.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two anchors or a zero-sized table are given.
    #[must_use]
    pub fn from_anchors(name: impl Into<String>, anchors: &[Color], lut_size: usize) -> Self {
        assert!(anchors.len() >= 2, "colormap needs at least two anchors");
        assert!(lut_size > 0, "colormap lookup table cannot be empty");

        let segments = (anchors.len() - 1) as f64;
        let lut = (0..lut_size)
            .map(|i| {
                let x = if lut_size == 1 {
                    0.0
                } else {
                    i as f64 / (lut_size - 1) as f64
                };
                let pos = x * segments;
                let k = (pos.floor() as usize).min(anchors.len() - 2);
                let local = (pos - k as f64) as f32;
                anchors[k].lerp(&anchors[k + 1], local)
            })
            .collect();

        Self {
            name: name.into(),
            lut,
            bad: Color::TRANSPARENT,
        }
    }

    /// Blue-white-red.
    #[must_use]
    pub fn bwr() -> Self {
        Self::from_anchors("bwr", &[Color::BLUE, Color::WHITE, Color::RED], LUT_SIZE)
    }

    /// Dark blue, blue, white, red, dark red.
    #[must_use]
    pub fn seismic() -> Self {
        Self::from_anchors(
            "seismic",
            &[
                Color::rgb(0.0, 0.0, 0.3),
                Color::BLUE,
                Color::WHITE,
                Color::RED,
                Color::rgb(0.5, 0.0, 0.0),
            ],
            LUT_SIZE,
        )
    }

    /// ColorBrewer RdBu reversed, so negative values are blue.
    #[must_use]
    pub fn rdbu_r() -> Self {
        const RDBU: [[f32; 3]; 11] = [
            [0.403_921_57, 0.0, 0.121_568_63],
            [0.698_039_2, 0.094_117_65, 0.168_627_46],
            [0.839_215_7, 0.376_470_6, 0.301_960_8],
            [0.956_862_76, 0.647_058_8, 0.509_803_9],
            [0.992_156_86, 0.858_823_5, 0.780_392_2],
            [0.968_627_5, 0.968_627_5, 0.968_627_5],
            [0.819_607_85, 0.898_039_2, 0.941_176_5],
            [0.572_549_03, 0.772_549_03, 0.870_588_2],
            [0.262_745_1, 0.576_470_6, 0.764_705_9],
            [0.129_411_77, 0.4, 0.674_509_8],
            [0.019_607_844, 0.188_235_3, 0.380_392_16],
        ];
        let anchors: Vec<Color> = RDBU
            .iter()
            .rev()
            .map(|&[r, g, b]| Color::rgb(r, g, b))
            .collect();
        Self::from_anchors("RdBu_r", &anchors, LUT_SIZE)
    }

    /// Number of lookup table entries.
    #[must_use]
    pub fn lut_size(&self) -> usize {
        self.lut.len()
    }

    fn index(&self, t: f64) -> usize {
        let n = self.lut.len();
        let scaled = t * n as f64;
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(n - 1)
        }
    }
}

impl Colormap for LinearSegmented {
    fn name(&self) -> &str {
        &self.name
    }

    fn map(&self, t: f64) -> Color {
        if t.is_nan() {
            return self.bad;
        }
        self.lut[self.index(t)]
    }
}

/// Registered diverging colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColormapKind {
    /// Blue-white-red
    #[default]
    Bwr,
    /// Seismic (darker ends than bwr)
    Seismic,
    /// Reversed ColorBrewer red-blue
    #[serde(rename = "rdbu_r")]
    RdBuR,
}

impl ColormapKind {
    /// All registered kinds.
    pub const ALL: [Self; 3] = [Self::Bwr, Self::Seismic, Self::RdBuR];

    /// Build the lookup table for this kind.
    #[must_use]
    pub fn build(self) -> LinearSegmented {
        match self {
            Self::Bwr => LinearSegmented::bwr(),
            Self::Seismic => LinearSegmented::seismic(),
            Self::RdBuR => LinearSegmented::rdbu_r(),
        }
    }

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bwr => "bwr",
            Self::Seismic => "seismic",
            Self::RdBuR => "rdbu_r",
        }
    }
}

impl fmt::Display for ColormapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown colormap name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown colormap '{0}' (expected one of: bwr, seismic, rdbu_r)")]
pub struct UnknownColormap(pub String);

impl FromStr for ColormapKind {
    type Err = UnknownColormap;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColormap(s.to_string()))
    }
}
