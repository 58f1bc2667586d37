//! Render configuration loaded from YAML.
//!
//! ```yaml
//! width: 1080
//! fontsize: 14
//! fontname: Source Code Pro
//! colorbar: true
//! colormap: bwr
//! cell_alpha: 0.8
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use crate::error::GlyphError;
use glyphheat_core::ColormapKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Figure parameters shared by the library and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Figure width in pixels
    pub width: f64,
    /// Glyph size in points
    pub fontsize: f64,
    /// Font family for glyphs
    pub fontname: String,
    /// Draw the colorbar legend
    pub colorbar: bool,
    /// Diverging colormap
    pub colormap: ColormapKind,
    /// Opacity of cell backgrounds
    pub cell_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            fontsize: 14.0,
            fontname: crate::colored_text::DEFAULT_FONT.to_string(),
            colorbar: true,
            colormap: ColormapKind::default(),
            cell_alpha: crate::colored_text::CELL_ALPHA,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::Config`] on malformed YAML or invalid values.
    pub fn from_yaml(yaml: &str) -> Result<Self, GlyphError> {
        let config: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| GlyphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, GlyphError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, GlyphError> {
        serde_yaml_ng::to_string(self).map_err(|e| GlyphError::Config(e.to_string()))
    }

    /// Check values the layout does not cover.
    ///
    /// Width and font size are checked again, with the exact failing value,
    /// when the layout is computed.
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.fontname.trim().is_empty() {
            return Err(GlyphError::Config("fontname must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.cell_alpha) {
            return Err(GlyphError::Config(format!(
                "cell_alpha must be within [0, 1], got {}",
                self.cell_alpha
            )));
        }
        for (name, value) in [("width", self.width), ("fontsize", self.fontsize)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GlyphError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 1080.0);
        assert_eq!(config.fontsize, 14.0);
        assert_eq!(config.fontname, "Source Code Pro");
        assert!(config.colorbar);
        assert_eq!(config.colormap, ColormapKind::Bwr);
        assert!((config.cell_alpha - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RenderConfig::from_yaml("width: 540\ncolorbar: false\n").unwrap();
        assert_eq!(config.width, 540.0);
        assert!(!config.colorbar);
        assert_eq!(config.fontsize, 14.0);
    }

    #[test]
    fn test_colormap_by_name() {
        let config = RenderConfig::from_yaml("colormap: seismic").unwrap();
        assert_eq!(config.colormap, ColormapKind::Seismic);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RenderConfig::from_yaml("widht: 540").unwrap_err();
        assert!(matches!(err, GlyphError::Config(_)));
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let err = RenderConfig::from_yaml("cell_alpha: 1.5").unwrap_err();
        assert!(err.to_string().contains("cell_alpha"));
    }

    #[test]
    fn test_negative_width_rejected() {
        let err = RenderConfig::from_yaml("width: -10").unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = RenderConfig {
            fontsize: 18.0,
            colormap: ColormapKind::RdBuR,
            ..RenderConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(RenderConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RenderConfig::load(Path::new("/nonexistent/glyphheat.yaml")).unwrap_err();
        assert!(matches!(err, GlyphError::Io(_)));
    }
}
