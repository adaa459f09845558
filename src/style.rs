//! Marker style database - colors per hit type, shapes per pitch type
//!
//! Styles live in a TOML file so scorers can retheme markers without a
//! rebuild. Missing or broken files fall back to the built-in defaults.

use bevy::prelude::*;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::observation::{HitType, PitchType};

/// Path to the marker styles file
pub const STYLES_FILE: &str = "config/marker_styles.toml";

/// Marker color for hit type labels missing from the table
pub const FALLBACK_COLOR: [u8; 3] = [128, 128, 128];

/// Shape name for pitch type labels missing from the table
pub const FALLBACK_SHAPE: &str = "disc";

/// Lookup tables mapping record labels to marker appearance
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyles {
    /// Hit type label -> marker RGB
    pub colors: BTreeMap<String, [u8; 3]>,
    /// Pitch type label -> shape name understood by the glyph renderer
    pub shapes: BTreeMap<String, String>,
}

impl Default for MarkerStyles {
    fn default() -> Self {
        Self::defaults()
    }
}

impl MarkerStyles {
    /// Built-in style tables
    pub fn defaults() -> Self {
        let mut colors = BTreeMap::new();
        for (hit, rgb) in [
            (HitType::Grounder, [0, 128, 0]),
            (HitType::Fly, [0, 0, 255]),
            (HitType::Liner, [255, 0, 0]),
            (HitType::Strikeout, [0, 0, 0]),
            (HitType::Walk, [128, 0, 128]),
        ] {
            colors.insert(hit.label().to_string(), rgb);
        }

        let mut shapes = BTreeMap::new();
        for (pitch, shape) in [
            (PitchType::Straight, "disc"),
            (PitchType::Curve, "square"),
            (PitchType::Slider, "triangle"),
            (PitchType::Fork, "diamond"),
            // No star glyph exists yet, so this renders as a disc
            (PitchType::Changeup, "star"),
            (PitchType::Other, "disc"),
        ] {
            shapes.insert(pitch.label().to_string(), shape.to_string());
        }

        Self { colors, shapes }
    }

    /// Load styles from file, creating a default file if it doesn't exist
    pub fn load_or_create(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("Styles file not found, creating default: {}", path);
            let defaults = Self::defaults();
            if let Err(e) = defaults.write_to_file(path) {
                warn!("Failed to write default styles file: {}", e);
            }
            return defaults;
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(styles) => {
                    info!("Loaded marker styles from {}", path);
                    styles
                }
                Err(e) => {
                    warn!("{}, using defaults", e);
                    Self::defaults()
                }
            },
            Err(e) => {
                warn!("Failed to read styles from {}: {}, using defaults", path, e);
                Self::defaults()
            }
        }
    }

    /// Parse styles from TOML
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid styles TOML: {}", e))
    }

    /// Write styles to file
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = String::new();
        content.push_str("# Marker styles\n");
        content.push_str("# =============\n");
        content.push_str("#\n");
        content.push_str("# [colors] maps a hit type label to a marker RGB triple (0-255).\n");
        content.push_str("# [shapes] maps a pitch type label to a shape name:\n");
        content.push_str("#   disc, square, triangle, diamond\n");
        content.push_str("# Unknown shape names draw as a disc; unlisted labels get gray discs.\n");
        content.push_str("\n");
        content.push_str(&toml);
        fs::write(path, content)
    }

    /// Marker color for a hit type label (gray for unknown labels)
    pub fn color_for(&self, hit_label: &str) -> Rgba<u8> {
        let rgb = self
            .colors
            .get(hit_label)
            .copied()
            .unwrap_or(FALLBACK_COLOR);
        Rgba([rgb[0], rgb[1], rgb[2], 255])
    }

    /// Shape name for a pitch type label ("disc" for unknown labels)
    pub fn shape_for(&self, pitch_label: &str) -> &str {
        self.shapes
            .get(pitch_label)
            .map(|s| s.as_str())
            .unwrap_or(FALLBACK_SHAPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphKind;

    #[test]
    fn test_defaults_cover_every_label() {
        let styles = MarkerStyles::defaults();
        for hit in HitType::ALL {
            assert!(styles.colors.contains_key(hit.label()), "{}", hit.label());
        }
        for pitch in PitchType::ALL {
            assert!(
                styles.shapes.contains_key(pitch.label()),
                "{}",
                pitch.label()
            );
        }
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let styles = MarkerStyles::defaults();
        assert_eq!(styles.color_for("バント"), Rgba([128, 128, 128, 255]));
        assert_eq!(styles.shape_for("ナックル"), "disc");
    }

    #[test]
    fn test_default_colors_match_scorebook_scheme() {
        let styles = MarkerStyles::defaults();
        assert_eq!(styles.color_for("ゴロ"), Rgba([0, 128, 0, 255]));
        assert_eq!(styles.color_for("フライ"), Rgba([0, 0, 255, 255]));
        assert_eq!(styles.color_for("ライナー"), Rgba([255, 0, 0, 255]));
        assert_eq!(styles.color_for("三振"), Rgba([0, 0, 0, 255]));
        assert_eq!(styles.color_for("四死球"), Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn test_changeup_shape_is_unimplemented_star() {
        // The default table names a shape the renderer doesn't have;
        // it draws as a disc via the fallback
        let styles = MarkerStyles::defaults();
        assert_eq!(styles.shape_for("チェンジアップ"), "star");
        assert_eq!(GlyphKind::from_label("star"), None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let styles = MarkerStyles::defaults();
        let toml = toml::to_string_pretty(&styles).unwrap();
        let parsed = MarkerStyles::parse(&toml).unwrap();
        assert_eq!(parsed, styles);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(MarkerStyles::parse("colors = 3").is_err());
    }
}
