//! Roster directory auto-rescan
//!
//! Polls the data directory every few seconds and re-discovers roster
//! files when its mtime changes (files added, renamed, or removed).

use bevy::prelude::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::form::FormState;
use crate::roster::RosterDatabase;
use crate::settings::CurrentSettings;

/// How often to check the data directory (seconds)
const CHECK_INTERVAL: f32 = 5.0;

/// Tracks the data directory's modification time
#[derive(Resource)]
pub struct RosterWatcher {
    /// Time since last check
    pub timer: f32,
    /// Last known modification time
    pub dir_mtime: Option<SystemTime>,
}

impl RosterWatcher {
    /// Start watching with the directory's current state, so the first
    /// poll doesn't report a change
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            timer: 0.0,
            dir_mtime: get_mtime(dir),
        }
    }
}

/// Get directory modification time, or None if it doesn't exist
fn get_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Re-discover rosters when the data directory changes
pub fn check_roster_changes(
    time: Res<Time>,
    mut watcher: ResMut<RosterWatcher>,
    settings: Res<CurrentSettings>,
    mut rosters: ResMut<RosterDatabase>,
    mut form: ResMut<FormState>,
) {
    watcher.timer += time.delta_secs();
    if watcher.timer < CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    let dir = Path::new(&settings.settings.data_dir);
    let new_mtime = get_mtime(dir);
    if new_mtime == watcher.dir_mtime {
        return;
    }
    watcher.dir_mtime = new_mtime;

    *rosters = RosterDatabase::discover(dir);
    info!(
        "Rescanned rosters: {} file(s) in {}",
        rosters.len(),
        dir.display()
    );
    form.on_rosters_changed(&rosters);
}
