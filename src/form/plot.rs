//! Field display and click preview
//!
//! The field sprite shows a composed texture: the base diagram plus one
//! glyph at the pending click. Every interaction that changes the glyph
//! marks the form dirty and this module recomposes from scratch.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use image::{DynamicImage, RgbaImage};

use crate::constants::{MARKER_SIZE, PANEL_WIDTH};
use crate::field::clamp_to_field;
use crate::form::state::FormState;
use crate::glyph::draw_glyph;
use crate::style::MarkerStyles;

/// Base field image all previews start from
#[derive(Resource)]
pub struct FieldImage(pub RgbaImage);

/// Handle of the texture the field sprite displays
#[derive(Resource)]
pub struct PreviewHandle(pub Handle<Image>);

/// Field sprite marker component
#[derive(Component)]
pub struct FieldSprite;

/// Build a Bevy texture from a composed field image
pub fn field_texture(img: &RgbaImage) -> Image {
    Image::from_dynamic(
        DynamicImage::ImageRgba8(img.clone()),
        true,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Map a left click inside the field region onto image coordinates.
/// Clicks on the panel strip are ignored; coordinates are clamped into
/// the field's pixel grid.
pub fn field_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut form: ResMut<FormState>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    // Cursor is in logical pixels with the origin at the top-left, which
    // matches image coordinates once the panel strip is subtracted
    if cursor.x < PANEL_WIDTH {
        return;
    }
    let (x, y) = clamp_to_field((cursor.x - PANEL_WIDTH) as i32, cursor.y as i32);
    form.set_click(x, y);
    form.status = format!("Marked ({}, {})", x, y);
}

/// Recompose the preview texture when the form changed
pub fn update_preview(
    mut form: ResMut<FormState>,
    field: Res<FieldImage>,
    styles: Res<MarkerStyles>,
    preview: Res<PreviewHandle>,
    mut images: ResMut<Assets<Image>>,
) {
    if !form.preview_dirty {
        return;
    }
    form.preview_dirty = false;

    let mut composed = field.0.clone();
    if let Some((x, y)) = form.pending_click {
        let color = styles.color_for(form.hit().label());
        let shape = styles.shape_for(form.pitch().label());
        draw_glyph(&mut composed, shape, x as i32, y as i32, MARKER_SIZE, color);
    }

    if let Some(image) = images.get_mut(&preview.0) {
        *image = field_texture(&composed);
    }
}
