//! Spray chart renderer
//!
//! Reads observation CSV files (direct-append or export format), plots
//! every batted ball onto the field image, and writes one chart PNG plus
//! a counts summary per input file.
//!
//! Usage:
//!   cargo run --bin chart -- A_data.csv
//!   cargo run --bin chart -- A_data.csv B_data.csv
//!   cargo run --bin chart -- --player Taro A_data.csv
//!   cargo run --bin chart -- --field assets/baseballfield.png A_data.csv
//!
//! Outputs land next to each input as:
//!   <stem>_chart.png
//!   <stem>_counts.txt

use ab_glyph::{FontVec, PxScale};
use chrono::Local;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use spraychart::constants::{DEFAULT_FIELD_IMAGE, MARKER_SIZE};
use spraychart::{
    HitType, MarkerStyles, PitchType, STYLES_FILE, draw_glyph, field_diagram, load_field_image,
};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

/// Fonts tried for the legend text, first readable one wins
const FONT_PATHS: [&str; 3] = [
    "assets/fonts/NotoSansJP-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

struct ChartConfig {
    field: Option<PathBuf>,
    player_filter: Option<String>,
    files: Vec<PathBuf>,
    show_help: bool,
}

fn parse_args() -> ChartConfig {
    let mut field = None;
    let mut player_filter = None;
    let mut files = Vec::new();
    let mut show_help = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--field" => {
                if let Some(value) = args.next() {
                    field = Some(PathBuf::from(value));
                }
            }
            "--player" => {
                if let Some(value) = args.next() {
                    player_filter = Some(value);
                }
            }
            "--help" | "-h" => show_help = true,
            _ => files.push(PathBuf::from(arg)),
        }
    }

    ChartConfig {
        field,
        player_filter,
        files,
        show_help,
    }
}

fn print_help() {
    println!(
        r#"Spray Chart Renderer - Plot observation CSVs onto the field

USAGE:
    cargo run --bin chart -- <DATA_FILE>... [OPTIONS]

ARGUMENTS:
    DATA_FILE           Observation CSV (direct-append or export format)

OPTIONS:
    --player <NAME>     Only plot observations for one player
    --field <FILE>      Field image to plot on (default: assets/baseballfield.png)
    --help, -h          Show this help

EXAMPLES:
    # Chart a whole team file
    cargo run --bin chart -- A_data.csv

    # Chart one player across two files
    cargo run --bin chart -- --player Taro A_data.csv B_data.csv
"#
    );
}

/// One plotted observation
struct DataRow {
    player: String,
    pitch: String,
    hit: String,
    x: u32,
    y: u32,
}

/// Parse an observation CSV. Export files carry a leading team_name
/// column, so the field offset is detected from the header row.
fn read_data_file(path: &Path) -> Result<Vec<DataRow>, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    let headers = reader
        .headers()
        .map_err(|e| format!("Bad header in {}: {}", path.display(), e))?
        .clone();
    let offset = if headers.get(0) == Some("team_name") {
        1
    } else {
        0
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Bad row in {}: {}", path.display(), e))?;
        let get = |i: usize| record.get(offset + i).unwrap_or("").trim().to_string();
        let x: u32 = get(5)
            .parse()
            .map_err(|_| format!("Bad x_coord in {}", path.display()))?;
        let y: u32 = get(6)
            .parse()
            .map_err(|_| format!("Bad y_coord in {}", path.display()))?;
        rows.push(DataRow {
            player: get(0),
            pitch: get(3),
            hit: get(4),
            x,
            y,
        });
    }
    Ok(rows)
}

fn load_legend_font() -> Option<FontVec> {
    for path in FONT_PATHS {
        if let Ok(data) = fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}

/// Legend box in the top-left corner: one row per hit type present
fn draw_legend(
    img: &mut RgbaImage,
    hit_counts: &BTreeMap<String, u32>,
    styles: &MarkerStyles,
    font: Option<&FontVec>,
) {
    const ROW_H: i32 = 22;
    const PAD: i32 = 10;
    let box_w = 170u32;
    let box_h = (PAD * 2 + ROW_H * hit_counts.len() as i32) as u32;
    draw_filled_rect_mut(
        img,
        Rect::at(8, 8).of_size(box_w, box_h),
        Rgba([30, 30, 35, 255]),
    );

    let scale = PxScale::from(16.0);
    let text_color = Rgba([220u8, 220u8, 220u8, 255u8]);
    for (i, (label, count)) in hit_counts.iter().enumerate() {
        let y = 8 + PAD + i as i32 * ROW_H;
        let color = styles.color_for(label);
        draw_glyph(img, "disc", 8 + PAD + 7, y + 8, MARKER_SIZE, color);
        if let Some(font) = font {
            let name = HitType::from_label(label).map(|h| h.name()).unwrap_or("other");
            let line = format!("{} {}", name, count);
            draw_text_mut(img, text_color, 8 + PAD + 22, y, scale, font, &line);
        }
    }
}

fn counts_report(
    path: &Path,
    total: usize,
    hit_counts: &BTreeMap<String, u32>,
    pitch_counts: &BTreeMap<String, u32>,
    config: &ChartConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spray chart counts for {}", path.display());
    let _ = writeln!(out, "Generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    if let Some(player) = &config.player_filter {
        let _ = writeln!(out, "Player filter: {}", player);
    }
    let _ = writeln!(out, "Total observations: {}", total);

    let _ = writeln!(out);
    let _ = writeln!(out, "By hit type:");
    for (label, count) in hit_counts {
        match HitType::from_label(label) {
            Some(hit) => {
                let _ = writeln!(out, "  {} ({}): {}", label, hit.name(), count);
            }
            None => {
                let _ = writeln!(out, "  {}: {}", label, count);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "By pitch type:");
    for (label, count) in pitch_counts {
        match PitchType::from_label(label) {
            Some(pitch) => {
                let _ = writeln!(out, "  {} ({}): {}", label, pitch.name(), count);
            }
            None => {
                let _ = writeln!(out, "  {}: {}", label, count);
            }
        }
    }

    out
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    path.with_file_name(format!("{}{}", stem, suffix))
}

fn render_chart(
    path: &Path,
    base: &RgbaImage,
    styles: &MarkerStyles,
    config: &ChartConfig,
    font: Option<&FontVec>,
) -> Result<(PathBuf, usize), String> {
    let mut rows = read_data_file(path)?;
    if let Some(player) = &config.player_filter {
        rows.retain(|r| &r.player == player);
    }
    if rows.is_empty() {
        return Err("no matching observations".to_string());
    }

    let mut img = base.clone();
    let mut hit_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut pitch_counts: BTreeMap<String, u32> = BTreeMap::new();
    for row in &rows {
        let shape = styles.shape_for(&row.pitch);
        let color = styles.color_for(&row.hit);
        draw_glyph(&mut img, shape, row.x as i32, row.y as i32, MARKER_SIZE, color);
        *hit_counts.entry(row.hit.clone()).or_insert(0) += 1;
        *pitch_counts.entry(row.pitch.clone()).or_insert(0) += 1;
    }

    draw_legend(&mut img, &hit_counts, styles, font);

    let chart_path = sibling(path, "_chart.png");
    img.save(&chart_path)
        .map_err(|e| format!("Failed to save {}: {}", chart_path.display(), e))?;

    let counts_path = sibling(path, "_counts.txt");
    let report = counts_report(path, rows.len(), &hit_counts, &pitch_counts, config);
    fs::write(&counts_path, report)
        .map_err(|e| format!("Failed to write {}: {}", counts_path.display(), e))?;

    Ok((chart_path, rows.len()))
}

fn main() {
    let config = parse_args();
    if config.show_help {
        print_help();
        return;
    }
    if config.files.is_empty() {
        eprintln!("No input files given.");
        eprintln!("Usage: cargo run --bin chart -- <data.csv> [more.csv ...]");
        std::process::exit(1);
    }

    let styles = MarkerStyles::load_or_create(STYLES_FILE);

    // Field backdrop: explicit path must load, the default falls back to
    // a drawn diagram so charts render on a bare checkout
    let base = match &config.field {
        Some(path) => match load_field_image(path) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        },
        None => load_field_image(Path::new(DEFAULT_FIELD_IMAGE)).unwrap_or_else(|_| field_diagram()),
    };

    let font = load_legend_font();
    if font.is_none() {
        println!("No legend font found, charts get glyph samples only");
    }

    for path in &config.files {
        match render_chart(path, &base, &styles, &config, font.as_ref()) {
            Ok((chart_path, count)) => {
                println!("Wrote {} ({} observations)", chart_path.display(), count);
            }
            Err(e) => eprintln!("Skipping {}: {}", path.display(), e),
        }
    }
}
