//! Sample data generator
//!
//! Creates everything the entry app needs on a bare checkout: the field
//! backdrop PNG, a cp932 demo roster, and optionally random observation
//! rows appended through the real CSV sink.
//!
//! Usage:
//!   cargo run --bin generate_sample
//!   cargo run --bin generate_sample -- --rows 50

use encoding_rs::SHIFT_JIS;
use rand::Rng;
use spraychart::constants::DEFAULT_FIELD_IMAGE;
use spraychart::{
    HitType, Observation, PitchType, append_observation, data_file_for, field_diagram,
};
use std::fs;
use std::path::Path;

const DEMO_ROSTER: &str = "demo.csv";

/// Demo roster rows: name, position (written as cp932 like scorebook exports)
const DEMO_PLAYERS: [(&str, &str); 9] = [
    ("佐藤", "投手"),
    ("鈴木", "捕手"),
    ("高橋", "一塁手"),
    ("田中", "二塁手"),
    ("伊藤", "三塁手"),
    ("渡辺", "遊撃手"),
    ("山本", "左翼手"),
    ("中村", "中堅手"),
    ("小林", "右翼手"),
];

fn parse_rows() -> usize {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--rows")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Random field coordinates that look plausible for the hit type
fn random_point(rng: &mut impl Rng, hit: HitType) -> (u32, u32) {
    match hit {
        HitType::Grounder => (rng.gen_range(200..550), rng.gen_range(380..620)),
        HitType::Fly | HitType::Liner => (rng.gen_range(60..690), rng.gen_range(80..400)),
        HitType::Strikeout | HitType::Walk => (rng.gen_range(350..400), rng.gen_range(600..650)),
    }
}

fn main() {
    // Field backdrop
    let field_path = Path::new(DEFAULT_FIELD_IMAGE);
    if let Some(parent) = field_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create assets directory");
    }
    field_diagram()
        .save(field_path)
        .expect("Failed to save field image");
    println!("Created {}", field_path.display());

    // Demo roster, cp932 encoded like real scorebook exports
    let mut roster_text = String::new();
    for (name, position) in DEMO_PLAYERS {
        roster_text.push_str(name);
        roster_text.push(',');
        roster_text.push_str(position);
        roster_text.push('\n');
    }
    let (bytes, _, _) = SHIFT_JIS.encode(&roster_text);
    fs::write(DEMO_ROSTER, &bytes).expect("Failed to write demo roster");
    println!("Created {} ({} players)", DEMO_ROSTER, DEMO_PLAYERS.len());

    // Optional random observations through the real sink
    let rows = parse_rows();
    if rows == 0 {
        return;
    }

    let data_path = data_file_for(Path::new(DEMO_ROSTER));
    let mut rng = rand::thread_rng();
    for _ in 0..rows {
        let (name, _) = DEMO_PLAYERS[rng.gen_range(0..DEMO_PLAYERS.len())];
        let pitch = PitchType::ALL[rng.gen_range(0..PitchType::ALL.len())];
        let hit = HitType::ALL[rng.gen_range(0..HitType::ALL.len())];
        let (x, y) = random_point(&mut rng, hit);
        let obs = Observation {
            team: DEMO_ROSTER.to_string(),
            player: name.to_string(),
            balls: rng.gen_range(0..=3),
            strikes: rng.gen_range(0..=2),
            pitch,
            hit,
            x,
            y,
        };
        append_observation(&data_path, &obs).expect("Failed to append observation");
    }
    println!("Appended {} rows to {}", rows, data_path.display());
}
