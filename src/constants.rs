//! Fixed values for the spray chart tool
//!
//! Layout, image, and count domains are defined here for easy tweaking.

use bevy::prelude::*;

// =============================================================================
// FIELD IMAGE
// =============================================================================

pub const IMAGE_SIZE: u32 = 750; // Field diagram is resized to IMAGE_SIZE x IMAGE_SIZE
pub const MARKER_SIZE: u32 = 15; // Glyph bounding box edge in pixels

/// Default field diagram path (generate one with the generate_sample bin)
pub const DEFAULT_FIELD_IMAGE: &str = "assets/baseballfield.png";

// =============================================================================
// WINDOW LAYOUT
// =============================================================================

pub const PANEL_WIDTH: f32 = 360.0; // Entry panel strip on the left edge
pub const WINDOW_WIDTH: f32 = PANEL_WIDTH + IMAGE_SIZE as f32;
pub const WINDOW_HEIGHT: f32 = IMAGE_SIZE as f32;

/// Field sprite center in world units (the panel shifts the field right)
pub const FIELD_OFFSET_X: f32 = PANEL_WIDTH / 2.0;

// =============================================================================
// TEXT/UI COLORS
// =============================================================================

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8); // Bone white/cream
pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.65, 0.55); // Aged parchment
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4); // Gold/amber

// =============================================================================
// COUNT DOMAINS
// =============================================================================

pub const MAX_BALLS: u8 = 3; // Ball count cycles 0..=3
pub const MAX_STRIKES: u8 = 2; // Strike count cycles 0..=2

// =============================================================================
// DATA FILES
// =============================================================================

/// Suffix that marks a generated data file (excluded from roster discovery)
pub const DATA_SUFFIX: &str = "_data.csv";
