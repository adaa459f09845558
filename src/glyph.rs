//! Marker glyph rendering
//!
//! Draws the filled shapes that mark batted-ball locations on the field
//! image. Shape names come from the styles table, so the renderer accepts
//! any string and falls back to a disc for names it does not know.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Marker shapes the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Disc,
    Square,
    Triangle,
    Diamond,
}

impl GlyphKind {
    /// Parse a shape name from the styles table.
    /// Unknown names get None; callers then fall back to a disc.
    pub fn from_label(label: &str) -> Option<GlyphKind> {
        match label {
            "disc" | "circle" | "ellipse" => Some(GlyphKind::Disc),
            "square" | "rectangle" => Some(GlyphKind::Square),
            "triangle" => Some(GlyphKind::Triangle),
            "diamond" => Some(GlyphKind::Diamond),
            _ => None,
        }
    }
}

/// Draw a marker of `size` (bounding box edge) centered at `(cx, cy)`.
/// Unrecognized shape names draw as a disc. Parts outside the canvas are
/// clipped, so any center coordinate is safe.
pub fn draw_glyph(img: &mut RgbaImage, kind: &str, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    let kind = GlyphKind::from_label(kind).unwrap_or(GlyphKind::Disc);
    draw_glyph_kind(img, kind, cx, cy, size, color);
}

/// Draw a known glyph kind. Sizes below 2 are bumped up so every shape
/// stays drawable (polygons need distinct corner points).
pub fn draw_glyph_kind(
    img: &mut RgbaImage,
    kind: GlyphKind,
    cx: i32,
    cy: i32,
    size: u32,
    color: Rgba<u8>,
) {
    let h = (size.max(2) / 2) as i32;

    match kind {
        GlyphKind::Disc => {
            draw_filled_ellipse_mut(img, (cx, cy), h, h, color);
        }
        GlyphKind::Square => {
            let edge = (2 * h + 1) as u32;
            draw_filled_rect_mut(img, Rect::at(cx - h, cy - h).of_size(edge, edge), color);
        }
        GlyphKind::Triangle => {
            // Apex up, flat base
            let points = [
                Point::new(cx, cy - h),
                Point::new(cx - h, cy + h),
                Point::new(cx + h, cy + h),
            ];
            draw_polygon_mut(img, &points, color);
        }
        GlyphKind::Diamond => {
            let points = [
                Point::new(cx, cy - h),
                Point::new(cx + h, cy),
                Point::new(cx, cy + h),
                Point::new(cx - h, cy),
            ];
            draw_polygon_mut(img, &points, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const INK: Rgba<u8> = Rgba([200, 0, 0, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, BG)
    }

    #[test]
    fn test_glyphs_stay_within_half_size_of_center() {
        let (cx, cy, size) = (32i32, 32i32, 15u32);
        let h = (size / 2) as i32;

        for kind in ["disc", "square", "triangle", "diamond"] {
            let mut img = canvas();
            let mut painted = 0;
            draw_glyph(&mut img, kind, cx, cy, size, INK);
            for (x, y, pixel) in img.enumerate_pixels() {
                if *pixel != BG {
                    painted += 1;
                    let (x, y) = (x as i32, y as i32);
                    assert!(
                        x >= cx - h && x <= cx + h && y >= cy - h && y <= cy + h,
                        "{} painted ({}, {}) outside bounds",
                        kind,
                        x,
                        y
                    );
                }
            }
            assert!(painted > 0, "{} painted nothing", kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_pixel_identical_to_disc() {
        let mut star = canvas();
        let mut disc = canvas();
        draw_glyph(&mut star, "star", 32, 32, 15, INK);
        draw_glyph(&mut disc, "disc", 32, 32, 15, INK);
        assert_eq!(star.as_raw(), disc.as_raw());
    }

    #[test]
    fn test_degenerate_sizes_still_draw() {
        for size in [0u32, 1, 2] {
            for kind in ["disc", "square", "triangle", "diamond"] {
                let mut img = canvas();
                draw_glyph(&mut img, kind, 32, 32, size, INK);
                let painted = img.pixels().filter(|p| **p != BG).count();
                assert!(painted > 0, "{} at size {} painted nothing", kind, size);
            }
        }
    }

    #[test]
    fn test_off_canvas_centers_are_clipped() {
        let mut img = canvas();
        draw_glyph(&mut img, "square", -100, -100, 15, INK);
        draw_glyph(&mut img, "diamond", 200, 200, 15, INK);
        assert!(img.pixels().all(|p| *p == BG));
    }

    #[test]
    fn test_shape_name_aliases() {
        assert_eq!(GlyphKind::from_label("ellipse"), Some(GlyphKind::Disc));
        assert_eq!(GlyphKind::from_label("rectangle"), Some(GlyphKind::Square));
        assert_eq!(GlyphKind::from_label("star"), None);
        assert_eq!(GlyphKind::from_label(""), None);
    }
}
