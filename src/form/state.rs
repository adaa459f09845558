//! Entry form state and selection logic
//!
//! Everything the window shows is derived from this one resource, so
//! every interaction boils down to mutating it and letting the panel and
//! preview systems redraw.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::constants::{MAX_BALLS, MAX_STRIKES};
use crate::observation::{HitType, Observation, PitchType};
use crate::roster::{Roster, RosterDatabase};

/// Rows of the entry form, in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Team,
    Player,
    Balls,
    Strikes,
    Pitch,
    Hit,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Team,
        FormField::Player,
        FormField::Balls,
        FormField::Strikes,
        FormField::Pitch,
        FormField::Hit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Team => "Team",
            FormField::Player => "Player",
            FormField::Balls => "Balls",
            FormField::Strikes => "Strikes",
            FormField::Pitch => "Pitch",
            FormField::Hit => "Hit",
        }
    }
}

/// State of the entry form
#[derive(Resource, Debug, Clone)]
pub struct FormState {
    /// Which form row is selected for adjustment
    pub selected_row: usize,
    /// Index into the roster database
    pub team_index: Option<usize>,
    /// File name of the selected roster (empty = none)
    pub team_name: String,
    pub roster_path: Option<PathBuf>,
    /// Players of the selected roster, in file order
    pub players: Vec<String>,
    pub player_index: Option<usize>,
    pub balls: u8,
    pub strikes: u8,
    pub pitch_index: usize,
    pub hit_index: usize,
    /// Last click on the field, in image coordinates
    pub pending_click: Option<(u32, u32)>,
    /// One-line feedback shown under the form rows
    pub status: String,
    pub saved_count: u32,
    /// Set when the preview texture must be recomposed
    pub preview_dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            selected_row: 0,
            team_index: None,
            team_name: String::new(),
            roster_path: None,
            players: Vec::new(),
            player_index: None,
            balls: 0,
            strikes: 0,
            pitch_index: 0,
            hit_index: 0,
            pending_click: None,
            status: "Select a team, click the field, press Enter".to_string(),
            saved_count: 0,
            preview_dirty: true,
        }
    }
}

impl FormState {
    pub fn selected_field(&self) -> FormField {
        FormField::ALL[self.selected_row]
    }

    /// Move row selection up (-1) or down (+1), wrapping
    pub fn select_row(&mut self, delta: i32) {
        let n = FormField::ALL.len() as i32;
        self.selected_row = (self.selected_row as i32 + delta).rem_euclid(n) as usize;
    }

    /// Cycle the selected row's value left (-1) or right (+1)
    pub fn cycle_value(&mut self, delta: i32, rosters: &RosterDatabase) {
        match self.selected_field() {
            FormField::Team => self.cycle_team(delta, rosters),
            FormField::Player => {
                self.player_index = cycle_option(self.player_index, delta, self.players.len());
            }
            FormField::Balls => self.balls = cycle_count(self.balls, delta, MAX_BALLS),
            FormField::Strikes => self.strikes = cycle_count(self.strikes, delta, MAX_STRIKES),
            FormField::Pitch => {
                self.pitch_index = cycle_index(self.pitch_index, delta, PitchType::ALL.len());
                self.preview_dirty = true;
            }
            FormField::Hit => {
                self.hit_index = cycle_index(self.hit_index, delta, HitType::ALL.len());
                self.preview_dirty = true;
            }
        }
    }

    fn cycle_team(&mut self, delta: i32, rosters: &RosterDatabase) {
        if rosters.is_empty() {
            self.set_team(None, rosters);
            self.status = "No roster files found".to_string();
            return;
        }
        let next = cycle_option(self.team_index, delta, rosters.len());
        self.set_team(next, rosters);
    }

    /// Select a team by index and load its roster. Load failures keep the
    /// app running with an empty player list and an error status.
    pub fn set_team(&mut self, index: Option<usize>, rosters: &RosterDatabase) {
        self.team_index = index;
        self.team_name.clear();
        self.roster_path = None;
        self.players.clear();
        self.player_index = None;

        let Some(i) = index else {
            return;
        };
        let Some(path) = rosters.get(i) else {
            self.team_index = None;
            return;
        };

        match Roster::load(path) {
            Ok(roster) => {
                self.status = format!("Loaded {} ({} players)", roster.team, roster.players.len());
                self.team_name = roster.team;
                self.players = roster.players;
                self.roster_path = Some(path.clone());
                if !self.players.is_empty() {
                    self.player_index = Some(0);
                }
            }
            Err(e) => {
                warn!("{}", e);
                self.status = e;
            }
        }
    }

    /// Re-point the team selection after the roster list changed: follow
    /// the same file if it still exists, else fall back to the first.
    pub fn on_rosters_changed(&mut self, rosters: &RosterDatabase) {
        let Some(path) = self.roster_path.clone() else {
            return;
        };
        match rosters.files.iter().position(|p| *p == path) {
            Some(i) => self.team_index = Some(i),
            None => {
                let next = if rosters.is_empty() { None } else { Some(0) };
                self.set_team(next, rosters);
            }
        }
    }

    pub fn pitch(&self) -> PitchType {
        PitchType::ALL[self.pitch_index]
    }

    pub fn hit(&self) -> HitType {
        HitType::ALL[self.hit_index]
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_index
            .and_then(|i| self.players.get(i))
            .map(|s| s.as_str())
    }

    /// Value text for a form row
    pub fn value_text(&self, field: FormField) -> String {
        match field {
            FormField::Team => {
                if self.team_name.is_empty() {
                    "---".to_string()
                } else {
                    self.team_name.clone()
                }
            }
            FormField::Player => self.player_name().unwrap_or("---").to_string(),
            FormField::Balls => self.balls.to_string(),
            FormField::Strikes => self.strikes.to_string(),
            FormField::Pitch => self.pitch().name().to_string(),
            FormField::Hit => self.hit().name().to_string(),
        }
    }

    /// Record a click at image coordinates
    pub fn set_click(&mut self, x: u32, y: u32) {
        self.pending_click = Some((x, y));
        self.preview_dirty = true;
    }

    pub fn clear_click(&mut self) {
        self.pending_click = None;
        self.preview_dirty = true;
    }

    /// Build the observation for the pending state, or say what's missing
    pub fn build_observation(&self) -> Result<Observation, String> {
        if self.team_name.is_empty() {
            return Err("Select a team first".to_string());
        }
        let Some(player) = self.player_name() else {
            return Err("Select a player first".to_string());
        };
        let Some((x, y)) = self.pending_click else {
            return Err("Click the field to mark the ball location".to_string());
        };

        Ok(Observation {
            team: self.team_name.clone(),
            player: player.to_string(),
            balls: self.balls,
            strikes: self.strikes,
            pitch: self.pitch(),
            hit: self.hit(),
            x,
            y,
        })
    }
}

/// Cycle an optional selection through `len` entries; None enters at the
/// first entry going right, the last going left
fn cycle_option(current: Option<usize>, delta: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = len as i32;
    let next = match current {
        Some(i) => (i as i32 + delta).rem_euclid(n),
        None if delta >= 0 => 0,
        None => n - 1,
    };
    Some(next as usize)
}

fn cycle_index(current: usize, delta: i32, len: usize) -> usize {
    let n = len as i32;
    (current as i32 + delta).rem_euclid(n) as usize
}

fn cycle_count(current: u8, delta: i32, max: u8) -> u8 {
    let n = max as i32 + 1;
    (current as i32 + delta).rem_euclid(n) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(names: &[&str]) -> RosterDatabase {
        RosterDatabase {
            files: names.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn test_row_selection_wraps_both_ways() {
        let mut form = FormState::default();
        form.select_row(-1);
        assert_eq!(form.selected_field(), FormField::Hit);
        form.select_row(1);
        assert_eq!(form.selected_field(), FormField::Team);
    }

    #[test]
    fn test_ball_and_strike_counts_wrap_in_domain() {
        let mut form = FormState::default();
        form.selected_row = 2; // Balls
        for expected in [1, 2, 3, 0] {
            form.cycle_value(1, &db(&[]));
            assert_eq!(form.balls, expected);
        }

        form.selected_row = 3; // Strikes
        form.cycle_value(-1, &db(&[]));
        assert_eq!(form.strikes, 2);
    }

    #[test]
    fn test_pitch_cycling_marks_preview_dirty() {
        let mut form = FormState::default();
        form.preview_dirty = false;
        form.selected_row = 4; // Pitch
        form.cycle_value(1, &db(&[]));
        assert_eq!(form.pitch(), PitchType::Curve);
        assert!(form.preview_dirty);
    }

    #[test]
    fn test_team_cycling_with_no_rosters_reports_status() {
        let mut form = FormState::default();
        form.cycle_value(1, &db(&[]));
        assert_eq!(form.team_index, None);
        assert_eq!(form.status, "No roster files found");
    }

    #[test]
    fn test_build_observation_names_the_missing_piece() {
        let mut form = FormState::default();
        assert!(form.build_observation().unwrap_err().contains("team"));

        form.team_name = "A.csv".to_string();
        form.players = vec!["Taro".to_string()];
        assert!(form.build_observation().unwrap_err().contains("player"));

        form.player_index = Some(0);
        assert!(form.build_observation().unwrap_err().contains("Click"));

        form.set_click(100, 200);
        let obs = form.build_observation().unwrap();
        assert_eq!((obs.x, obs.y), (100, 200));
        assert_eq!(obs.team, "A.csv");
        assert_eq!(obs.player, "Taro");
    }

    #[test]
    fn test_value_text_uses_placeholders_until_selected() {
        let form = FormState::default();
        assert_eq!(form.value_text(FormField::Team), "---");
        assert_eq!(form.value_text(FormField::Player), "---");
        assert_eq!(form.value_text(FormField::Balls), "0");
        assert_eq!(form.value_text(FormField::Pitch), "Straight");
    }

    #[test]
    fn test_roster_change_follows_the_selected_file() {
        let mut form = FormState::default();
        form.team_index = Some(1);
        form.team_name = "B.csv".to_string();
        form.roster_path = Some(PathBuf::from("B.csv"));

        form.on_rosters_changed(&db(&["A.csv", "AA.csv", "B.csv"]));
        assert_eq!(form.team_index, Some(2));
        assert_eq!(form.team_name, "B.csv");
    }

    #[test]
    fn test_roster_change_drops_selection_when_everything_is_gone() {
        let mut form = FormState::default();
        form.team_index = Some(0);
        form.team_name = "A.csv".to_string();
        form.roster_path = Some(PathBuf::from("A.csv"));

        form.on_rosters_changed(&db(&[]));
        assert_eq!(form.team_index, None);
        assert!(form.team_name.is_empty());
    }

    #[test]
    fn test_player_cycle_enters_list_from_either_end() {
        let mut form = FormState::default();
        form.players = vec!["Taro".to_string(), "Jiro".to_string()];
        form.selected_row = 1; // Player

        form.cycle_value(-1, &db(&[]));
        assert_eq!(form.player_name(), Some("Jiro"));
        form.cycle_value(1, &db(&[]));
        assert_eq!(form.player_name(), Some("Taro"));
    }
}
