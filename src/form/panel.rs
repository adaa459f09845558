//! Entry panel UI components and systems

use bevy::prelude::*;
use std::path::Path;

use crate::constants::*;
use crate::form::state::{FormField, FormState};
use crate::roster::RosterDatabase;
use crate::settings::CurrentSettings;
use crate::sink::{self, ExportBundle};

/// Entry panel container component
#[derive(Component)]
pub struct EntryPanel;

/// Form row component with index into `FormField::ALL`
#[derive(Component)]
pub struct FormRow(pub usize);

/// Status line under the form rows
#[derive(Component)]
pub struct StatusText;

/// Keyboard handling for the entry form
pub fn form_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    rosters: Res<RosterDatabase>,
    mut form: ResMut<FormState>,
    mut bundle: ResMut<ExportBundle>,
    mut settings: ResMut<CurrentSettings>,
) {
    // Up/Down to select a form row
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        form.select_row(-1);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        form.select_row(1);
    }

    // Left/Right to cycle the row's value
    let team_before = form.team_name.clone();
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        form.cycle_value(-1, &rosters);
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        form.cycle_value(1, &rosters);
    }
    if form.team_name != team_before {
        settings.settings.last_team = form.team_name.clone();
        settings.mark_dirty();
    }

    // C clears the pending mark
    if keyboard.just_pressed(KeyCode::KeyC) {
        form.clear_click();
        form.status = "Cleared pending mark".to_string();
    }

    // Enter saves, E exports the session buffer
    if keyboard.just_pressed(KeyCode::Enter) {
        save_pending(&mut form, &mut bundle);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        export_session(&mut form, &bundle, &settings);
    }
}

/// Append the pending observation to the roster's data file and buffer it
/// for export. Incomplete forms warn and skip the save.
fn save_pending(form: &mut FormState, bundle: &mut ExportBundle) {
    let obs = match form.build_observation() {
        Ok(obs) => obs,
        Err(msg) => {
            warn!("Not saved: {}", msg);
            form.status = msg;
            return;
        }
    };
    let Some(roster_path) = form.roster_path.clone() else {
        form.status = "Select a team first".to_string();
        return;
    };

    let data_file = sink::data_file_for(&roster_path);
    if let Err(e) = sink::append_observation(&data_file, &obs) {
        warn!("Failed to append to {}: {}", data_file.display(), e);
        form.status = format!("Save failed: {}", e);
        return;
    }

    // The session buffer follows the team being recorded
    if bundle.team() != obs.team {
        bundle.start_session(&obs.team);
    }
    bundle.push(obs.clone());

    form.saved_count += 1;
    form.status = format!(
        "Saved {} {} at ({}, {}) [{} this session]",
        obs.player,
        obs.hit.name(),
        obs.x,
        obs.y,
        bundle.len()
    );
    info!("Appended observation to {}", data_file.display());
}

fn export_session(form: &mut FormState, bundle: &ExportBundle, settings: &CurrentSettings) {
    match bundle.write_to(Path::new(&settings.settings.export_dir)) {
        Ok(path) => {
            form.status = format!("Exported {} row(s) to {}", bundle.len(), path.display());
            info!("{}", form.status);
        }
        Err(msg) => {
            warn!("Export failed: {}", msg);
            form.status = format!("Export failed: {}", msg);
        }
    }
}

/// Refresh the panel rows and status line from the form state
pub fn update_form_panel(
    form: Res<FormState>,
    mut rows: Query<(&mut Text, &mut TextColor, &FormRow)>,
    mut status: Query<&mut Text, (With<StatusText>, Without<FormRow>)>,
) {
    for (mut text, mut color, row) in &mut rows {
        let field = FormField::ALL[row.0];
        text.0 = format!("{}: {}", field.label(), form.value_text(field));

        color.0 = if row.0 == form.selected_row {
            Color::srgb(1.0, 1.0, 0.0) // Yellow for selected
        } else {
            TEXT_PRIMARY
        };
    }

    if let Ok(mut text) = status.single_mut() {
        let mark = match form.pending_click {
            Some((x, y)) => format!("({}, {})", x, y),
            None => "none".to_string(),
        };
        text.0 = format!(
            "Mark: {} | Saved: {}\n{}",
            mark, form.saved_count, form.status
        );
    }
}

/// Spawn the entry panel on the left edge of the window
pub fn spawn_entry_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Px(PANEL_WIDTH),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.08, 0.09, 0.1, 0.95)),
            EntryPanel,
        ))
        .with_children(|parent| {
            // Title and key hints
            parent.spawn((
                Text::new("Batted Ball Entry"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_ACCENT),
            ));
            parent.spawn((
                Text::new("Up/Down: row | Left/Right: change"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent.spawn((
                Text::new("Click field: mark | Enter: save"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent.spawn((
                Text::new("E: export session | C: clear mark"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));

            // One row per form field
            for (i, field) in FormField::ALL.iter().enumerate() {
                parent.spawn((
                    Text::new(format!("{}: ---", field.label())),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(TEXT_PRIMARY),
                    FormRow(i),
                ));
            }

            parent.spawn((
                Text::new("Mark: none | Saved: 0"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
                StatusText,
            ));
        });
}
