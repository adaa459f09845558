//! Team roster discovery and loading
//!
//! Rosters are plain CSV files in the data directory, one player per row
//! with the name in the first column. Scorebook exports write them as
//! cp932, so bytes are decoded as Shift_JIS before parsing.

use bevy::prelude::*;
use encoding_rs::SHIFT_JIS;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DATA_SUFFIX;

/// One loaded team roster
#[derive(Debug, Clone)]
pub struct Roster {
    /// Roster file name, used as the team label in exports
    pub team: String,
    pub path: PathBuf,
    /// Player names in file order
    pub players: Vec<String>,
}

impl Roster {
    /// Load a roster file: decode cp932 bytes, take the first CSV column.
    /// Rows with an empty first field are skipped; there is no header row.
    pub fn load(path: &Path) -> Result<Roster, String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let (text, _, had_errors) = SHIFT_JIS.decode(&bytes);
        if had_errors {
            return Err(format!("{} is not valid cp932", path.display()));
        }

        let mut players = Vec::new();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        for record in reader.records() {
            let record =
                record.map_err(|e| format!("Bad roster row in {}: {}", path.display(), e))?;
            if let Some(name) = record.get(0) {
                let name = name.trim();
                if !name.is_empty() {
                    players.push(name.to_string());
                }
            }
        }

        let team = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Roster {
            team,
            path: path.to_path_buf(),
            players,
        })
    }
}

/// Candidate roster files found in the data directory
#[derive(Resource, Debug, Clone, Default)]
pub struct RosterDatabase {
    pub files: Vec<PathBuf>,
}

impl RosterDatabase {
    /// List roster candidates: `*.csv` entries minus generated `_data.csv`
    /// files, sorted by name. Unreadable directories yield an empty
    /// database plus a warning.
    pub fn discover(dir: &Path) -> Self {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read roster directory {}: {}", dir.display(), e);
                return Self::default();
            }
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.ends_with(".csv") && !name.ends_with(DATA_SUFFIX) {
                files.push(path);
            }
        }
        files.sort();

        Self { files }
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File name of the roster at `index`
    pub fn team_name(&self, index: usize) -> Option<&str> {
        self.files
            .get(index)
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spraychart_roster_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_discover_excludes_data_files_and_sorts() {
        let dir = temp_dir();
        fs::write(dir.join("B.csv"), "Jiro\n").unwrap();
        fs::write(dir.join("A.csv"), "Taro\n").unwrap();
        fs::write(dir.join("A_data.csv"), "header\n").unwrap();
        fs::write(dir.join("notes.txt"), "not a roster\n").unwrap();

        let db = RosterDatabase::discover(&dir);
        let names: Vec<&str> = (0..db.len()).filter_map(|i| db.team_name(i)).collect();
        assert_eq!(names, ["A.csv", "B.csv"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = std::env::temp_dir().join(format!("spraychart_missing_{}", Uuid::new_v4()));
        let db = RosterDatabase::discover(&dir);
        assert!(db.is_empty());
    }

    #[test]
    fn test_load_preserves_file_order() {
        let dir = temp_dir();
        let path = dir.join("A.csv");
        fs::write(&path, "Taro\nJiro\n").unwrap();

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.team, "A.csv");
        assert_eq!(roster.players, ["Taro", "Jiro"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_decodes_cp932_first_column() {
        let dir = temp_dir();
        let path = dir.join("giants.csv");
        let (bytes, _, _) = SHIFT_JIS.encode("田中,内野手\n山田,外野手\n");
        fs::write(&path, &bytes).unwrap();

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.players, ["田中", "山田"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_malformed_bytes() {
        let dir = temp_dir();
        let path = dir.join("broken.csv");
        // 0x82 opens a double-byte sequence; 0x39 is not a valid trail byte
        fs::write(&path, [b'T', b'a', 0x82, 0x39, b'\n']).unwrap();

        assert!(Roster::load(&path).is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_skips_blank_first_fields() {
        let dir = temp_dir();
        let path = dir.join("A.csv");
        fs::write(&path, "Taro\n,benched\nJiro\n").unwrap();

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.players, ["Taro", "Jiro"]);

        fs::remove_dir_all(&dir).ok();
    }
}
