//! Field image handling
//!
//! The diagram every observation is plotted against. Source images of any
//! size are resized to 750x750 so click coordinates and stored coordinates
//! share one pixel grid.

use image::{Rgba, RgbaImage, imageops::FilterType};
use imageproc::drawing::{
    draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_ellipse_mut, draw_line_segment_mut,
    draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::path::Path;

use crate::constants::IMAGE_SIZE;

// Diagram colors
const GRASS: Rgba<u8> = Rgba([86, 125, 70, 255]);
const DIRT: Rgba<u8> = Rgba([193, 154, 107, 255]);
const LINE: Rgba<u8> = Rgba([235, 235, 235, 255]);

// Home plate position in the generated diagram
const HOME_X: i32 = 375;
const HOME_Y: i32 = 640;

/// Load the field diagram and resize it to the display size
pub fn load_field_image(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open field image {}: {}", path.display(), e))?;
    Ok(img
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom)
        .to_rgba8())
}

/// Clamp capture coordinates into the field's pixel grid
pub fn clamp_to_field(x: i32, y: i32) -> (u32, u32) {
    let max = IMAGE_SIZE as i32 - 1;
    (x.clamp(0, max) as u32, y.clamp(0, max) as u32)
}

/// Draw a plain field diagram: grass, dirt infield, foul lines, bases.
/// Stands in when no photographed diagram is available.
pub fn field_diagram() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(IMAGE_SIZE, IMAGE_SIZE, GRASS);

    // Dirt infield diamond: home, first, second, third
    let diamond = [
        Point::new(HOME_X, HOME_Y),
        Point::new(HOME_X + 160, HOME_Y - 160),
        Point::new(HOME_X, HOME_Y - 320),
        Point::new(HOME_X - 160, HOME_Y - 160),
    ];
    draw_polygon_mut(&mut img, &diamond, DIRT);

    // Inner grass square
    let inner = [
        Point::new(HOME_X, HOME_Y - 40),
        Point::new(HOME_X + 120, HOME_Y - 160),
        Point::new(HOME_X, HOME_Y - 280),
        Point::new(HOME_X - 120, HOME_Y - 160),
    ];
    draw_polygon_mut(&mut img, &inner, GRASS);

    // Pitcher's mound
    draw_filled_ellipse_mut(&mut img, (HOME_X, HOME_Y - 120), 16, 16, DIRT);

    // Outfield fence arc, centered on home (off-canvas parts are clipped)
    draw_hollow_ellipse_mut(&mut img, (HOME_X, HOME_Y), 540, 540, LINE);

    // Foul lines from home toward the outfield corners
    draw_line_segment_mut(
        &mut img,
        (HOME_X as f32, HOME_Y as f32),
        (1.0, (HOME_Y - 374) as f32),
        LINE,
    );
    draw_line_segment_mut(
        &mut img,
        (HOME_X as f32, HOME_Y as f32),
        ((IMAGE_SIZE - 1) as f32, (HOME_Y - 374) as f32),
        LINE,
    );

    // Bases and home plate
    for (bx, by) in [
        (HOME_X, HOME_Y),
        (HOME_X + 160, HOME_Y - 160),
        (HOME_X, HOME_Y - 320),
        (HOME_X - 160, HOME_Y - 160),
    ] {
        draw_filled_rect_mut(&mut img, Rect::at(bx - 7, by - 7).of_size(14, 14), LINE);
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_clamp_keeps_in_bounds_coordinates() {
        assert_eq!(clamp_to_field(100, 200), (100, 200));
        assert_eq!(clamp_to_field(0, 749), (0, 749));
    }

    #[test]
    fn test_clamp_pulls_outliers_to_the_edge() {
        assert_eq!(clamp_to_field(-5, 800), (0, 749));
        assert_eq!(clamp_to_field(750, -1), (749, 0));
    }

    #[test]
    fn test_diagram_dimensions_and_background() {
        let img = field_diagram();
        assert_eq!(img.dimensions(), (IMAGE_SIZE, IMAGE_SIZE));
        assert_eq!(*img.get_pixel(0, 749), GRASS);
        // Home plate is painted
        assert_eq!(*img.get_pixel(HOME_X as u32, HOME_Y as u32), LINE);
    }

    #[test]
    fn test_load_resizes_to_display_size() {
        let path = std::env::temp_dir().join(format!("spraychart_field_{}.png", Uuid::new_v4()));
        RgbaImage::from_pixel(100, 80, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = load_field_image(&path).unwrap();
        assert_eq!(img.dimensions(), (IMAGE_SIZE, IMAGE_SIZE));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("spraychart_nope_{}.png", Uuid::new_v4()));
        assert!(load_field_image(&path).is_err());
    }
}
