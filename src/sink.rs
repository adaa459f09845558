//! CSV sinks for recorded observations
//!
//! Two outputs: the per-roster data file that grows by append, and an
//! in-memory session bundle written out on demand as a named export.
//! Data files are UTF-8; the cp932 codepage applies to roster input only.

use bevy::prelude::*;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::constants::DATA_SUFFIX;
use crate::observation::Observation;

/// Column order of per-roster data files
pub const DATA_HEADER: [&str; 7] = [
    "player_name",
    "balls",
    "strikes",
    "pitch_type",
    "hit_type",
    "x_coord",
    "y_coord",
];

/// Column order of session export files (adds the team column)
pub const EXPORT_HEADER: [&str; 8] = [
    "team_name",
    "player_name",
    "balls",
    "strikes",
    "pitch_type",
    "hit_type",
    "x_coord",
    "y_coord",
];

/// Data file that belongs to a roster file: `<stem>_data.csv` next to it
pub fn data_file_for(roster_path: &Path) -> PathBuf {
    let stem = roster_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("roster");
    roster_path.with_file_name(format!("{}{}", stem, DATA_SUFFIX))
}

/// Append one observation to a data file. The header is written exactly
/// once, when the file is created by this call.
pub fn append_observation(path: &Path, obs: &Observation) -> csv::Result<()> {
    let is_new = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = csv::Writer::from_writer(file);
    if is_new {
        writer.write_record(DATA_HEADER)?;
    }
    writer.write_record(obs.data_record())?;
    writer.flush()?;
    Ok(())
}

/// In-memory buffer of one session's observations for a roster.
/// Written out as a whole file, the desktop stand-in for a browser
/// download.
#[derive(Resource, Debug, Clone, Default)]
pub struct ExportBundle {
    session_id: String,
    team: String,
    observations: Vec<Observation>,
}

impl ExportBundle {
    /// Start a fresh bundle for a team (clears previously buffered rows)
    pub fn start_session(&mut self, team: &str) {
        self.session_id = Uuid::new_v4().to_string();
        self.team = team.to_string();
        self.observations.clear();
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn push(&mut self, obs: Observation) {
        self.observations.push(obs);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Export file name, `<player>_<hit_type>_data.csv`, derived from the
    /// most recent row
    pub fn suggested_file_name(&self) -> Option<String> {
        self.observations
            .last()
            .map(|obs| format!("{}_{}{}", obs.player, obs.hit.label(), DATA_SUFFIX))
    }

    /// Write the bundle to `dir` under the suggested name.
    /// Returns the written path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, String> {
        let Some(name) = self.suggested_file_name() else {
            return Err("Nothing recorded this session".to_string());
        };

        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

        let path = dir.join(name);
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;

        writer
            .write_record(EXPORT_HEADER)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        for obs in &self.observations {
            writer
                .write_record(obs.export_record())
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        }
        writer
            .flush()
            .map_err(|e| format!("Failed to flush {}: {}", path.display(), e))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{HitType, PitchType};
    use std::fs;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spraychart_sink_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> Observation {
        Observation {
            team: "A.csv".to_string(),
            player: "Taro".to_string(),
            balls: 1,
            strikes: 2,
            pitch: PitchType::Straight,
            hit: HitType::Fly,
            x: 100,
            y: 200,
        }
    }

    #[test]
    fn test_data_file_name_from_roster() {
        assert_eq!(
            data_file_for(Path::new("teams/A.csv")),
            PathBuf::from("teams/A_data.csv")
        );
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let dir = temp_dir();
        let path = dir.join("A_data.csv");

        append_observation(&path, &sample()).unwrap();
        append_observation(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "player_name,balls,strikes,pitch_type,hit_type,x_coord,y_coord"
        );
        assert_eq!(lines[1], "Taro,1,2,ストレート,フライ,100,200");
        assert_eq!(lines[2], lines[1]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_bundle_rows_and_name() {
        let dir = temp_dir();
        let mut bundle = ExportBundle::default();
        bundle.start_session("A.csv");
        bundle.push(sample());

        assert_eq!(
            bundle.suggested_file_name().as_deref(),
            Some("Taro_フライ_data.csv")
        );

        let path = bundle.write_to(&dir).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "team_name,player_name,balls,strikes,pitch_type,hit_type,x_coord,y_coord"
        );
        assert_eq!(lines[1], "A.csv,Taro,1,2,ストレート,フライ,100,200");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_empty_bundle_is_an_error() {
        let dir = temp_dir();
        let bundle = ExportBundle::default();
        assert!(bundle.write_to(&dir).is_err());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_new_session_replaces_buffer() {
        let mut bundle = ExportBundle::default();
        bundle.start_session("A.csv");
        bundle.push(sample());
        let first_id = bundle.session_id().to_string();

        bundle.start_session("B.csv");
        assert!(bundle.is_empty());
        assert_eq!(bundle.team(), "B.csv");
        assert_ne!(bundle.session_id(), first_id);
    }
}
