//! Spraychart - batted-ball location entry
//!
//! Main entry point: app setup and system registration.

use bevy::{camera::ScalingMode, prelude::*};
use spraychart::{
    CurrentSettings, ExportBundle, MarkerStyles, RosterDatabase, RosterWatcher, STYLES_FILE,
    check_roster_changes, constants::*, form, form::FormState, load_field_image,
    save_settings_system,
};
use std::path::Path;
use std::process;

fn main() {
    // Load persistent settings (uses defaults if file doesn't exist)
    let current_settings = CurrentSettings::default();

    // Save settings on first run to ensure file exists
    if let Err(e) = current_settings.settings.save() {
        warn!("Failed to save initial settings: {}", e);
    }

    // Load marker styles (creates default file if missing)
    let styles = MarkerStyles::load_or_create(STYLES_FILE);

    // Scan the data directory for roster files
    let data_dir = current_settings.settings.data_dir.clone();
    let rosters = RosterDatabase::discover(Path::new(&data_dir));

    // Field backdrop must exist before the window opens
    let field_img = match load_field_image(Path::new(&current_settings.settings.field_image)) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("Generate a demo field with: cargo run --bin generate_sample");
            process::exit(1);
        }
    };

    // Restore the last selected team, or fall back to the first roster
    let mut form_state = FormState::default();
    let last_team = current_settings.settings.last_team.clone();
    if !rosters.is_empty() {
        let start_index = (0..rosters.len())
            .find(|&i| rosters.team_name(i) == Some(last_team.as_str()))
            .unwrap_or(0);
        form_state.set_team(Some(start_index), &rosters);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                // Set scale_factor_override to 1.0 so cursor positions map
                // directly to field pixels on HiDPI displays
                resolution: bevy::window::WindowResolution::new(
                    WINDOW_WIDTH as u32,
                    WINDOW_HEIGHT as u32,
                )
                .with_scale_factor_override(1.0),
                title: "Spray Chart Entry".into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.10)))
        .insert_resource(current_settings)
        .insert_resource(styles)
        .insert_resource(rosters)
        .insert_resource(form_state)
        .insert_resource(form::FieldImage(field_img))
        .insert_resource(RosterWatcher::for_dir(Path::new(&data_dir)))
        .init_resource::<ExportBundle>()
        .add_systems(Startup, setup)
        // Input, click capture, preview, and panel refresh run in order
        .add_systems(
            Update,
            (
                form::form_input,
                form::field_click,
                form::update_preview,
                form::update_form_panel,
            )
                .chain(),
        )
        .add_systems(Update, (check_roster_changes, save_settings_system))
        .run();
}

/// Setup the camera, field sprite, and entry panel
fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>, field: Res<form::FieldImage>) {
    // Camera - orthographic, shows the full field height
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: WINDOW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    // Field sprite sits right of the entry panel
    let handle = images.add(form::field_texture(&field.0));
    commands.spawn((
        Sprite {
            image: handle.clone(),
            custom_size: Some(Vec2::splat(IMAGE_SIZE as f32)),
            ..default()
        },
        Transform::from_xyz(FIELD_OFFSET_X, 0.0, 0.0),
        form::FieldSprite,
    ));
    commands.insert_resource(form::PreviewHandle(handle));

    form::spawn_entry_panel(&mut commands);
}
