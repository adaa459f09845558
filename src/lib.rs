//! Spraychart - batted-ball location entry and charting
//!
//! This crate provides the observation model, CSV sinks, glyph renderer,
//! and the form systems, organized into modules.

pub mod constants;
pub mod field;
pub mod form;
pub mod glyph;
pub mod observation;
pub mod roster;
pub mod roster_watcher;
pub mod settings;
pub mod sink;
pub mod style;

pub use constants::*;
pub use field::{clamp_to_field, field_diagram, load_field_image};
pub use glyph::{GlyphKind, draw_glyph, draw_glyph_kind};
pub use observation::{HitType, Observation, PitchType};
pub use roster::{Roster, RosterDatabase};
pub use roster_watcher::{RosterWatcher, check_roster_changes};
pub use settings::{AppSettings, CurrentSettings, SETTINGS_FILE, save_settings_system};
pub use sink::{DATA_HEADER, EXPORT_HEADER, ExportBundle, append_observation, data_file_for};
pub use style::{MarkerStyles, STYLES_FILE};
