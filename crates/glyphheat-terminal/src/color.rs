//! Color mode detection and conversion for terminals.

use crossterm::style::Color as CrosstermColor;
use glyphheat_core::Color;

/// Terminal color capability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit true color (COLORTERM=truecolor or 24bit).
    #[default]
    TrueColor,
    /// 256 color palette.
    Color256,
    /// 16 ANSI colors.
    Color16,
    /// Monochrome (no color).
    Mono,
}

/// The 16 ANSI colors with their usual xterm RGB values.
const ANSI16: [(CrosstermColor, [u8; 3]); 16] = [
    (CrosstermColor::Black, [0, 0, 0]),
    (CrosstermColor::DarkRed, [205, 0, 0]),
    (CrosstermColor::DarkGreen, [0, 205, 0]),
    (CrosstermColor::DarkYellow, [205, 205, 0]),
    (CrosstermColor::DarkBlue, [0, 0, 238]),
    (CrosstermColor::DarkMagenta, [205, 0, 205]),
    (CrosstermColor::DarkCyan, [0, 205, 205]),
    (CrosstermColor::Grey, [229, 229, 229]),
    (CrosstermColor::DarkGrey, [127, 127, 127]),
    (CrosstermColor::Red, [255, 0, 0]),
    (CrosstermColor::Green, [0, 255, 0]),
    (CrosstermColor::Yellow, [255, 255, 0]),
    (CrosstermColor::Blue, [92, 92, 255]),
    (CrosstermColor::Magenta, [255, 0, 255]),
    (CrosstermColor::Cyan, [0, 255, 255]),
    (CrosstermColor::White, [255, 255, 255]),
];

impl ColorMode {
    /// Auto-detect terminal color capabilities.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Detect color mode from environment variable values.
    #[must_use]
    pub fn detect_with_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }

        match term {
            Some(t) if t.contains("256color") => Self::Color256,
            Some("dumb") | None => Self::Mono,
            Some(_) => Self::Color16,
        }
    }

    /// Convert an opaque color to the closest color this mode can show.
    ///
    /// Returns `None` in monochrome mode, where no color is emitted at all.
    #[must_use]
    pub fn to_crossterm(self, color: Color) -> Option<CrosstermColor> {
        let [r, g, b] = color.to_rgb8();
        match self {
            Self::TrueColor => Some(CrosstermColor::Rgb { r, g, b }),
            Self::Color256 => Some(CrosstermColor::AnsiValue(rgb_to_256(r, g, b))),
            Self::Color16 => Some(rgb_to_16(r, g, b)),
            Self::Mono => None,
        }
    }
}

/// Index into the xterm 256-color palette.
fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + ((r - 8) / 10).min(23),
        };
    }

    // 6x6x6 cube, 16-231
    let level = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Nearest ANSI color by squared RGB distance.
fn rgb_to_16(r: u8, g: u8, b: u8) -> CrosstermColor {
    let distance = |[pr, pg, pb]: [u8; 3]| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(r, pr) + d(g, pg) + d(b, pb)
    };
    ANSI16
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map_or(CrosstermColor::White, |(color, _)| *color)
}
