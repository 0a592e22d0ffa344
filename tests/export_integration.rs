//! Export surface tests: files on disk, config JSON shape, bundle layout.

use image::{Rgba, RgbaImage};
use std::fs::File;
use std::io::Read;

use spritecut::animation::AnimationType;
use spritecut::directions::RowLayout;
use spritecut::export::{write_bundle, AnimationConfig};
use spritecut::extract::extract;
use spritecut::frame::Frame;
use spritecut::output::{frame_output_path, save_png};
use spritecut::partition::PartitionDescriptor;
use spritecut::spritesheet::assemble;

fn frames(count: usize, size: u32) -> Vec<Frame> {
    (0..count)
        .map(|i| {
            Frame::new(
                RgbaImage::from_pixel(size, size, Rgba([i as u8, 0, 0, 255])),
                0,
                0,
            )
        })
        .collect()
}

#[test]
fn config_json_matches_engine_contract() {
    let frames = frames(48, 12);
    let sheet = assemble(&frames, Some(6));

    let mut config = AnimationConfig::new();
    config.add_sheet("walk", "walk.png", &sheet);
    config.add_animation(AnimationType::Walk, "walk", &sheet, RowLayout::EightDirection);

    let json = config.to_json(true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let sheet_entry = &value["sheets"]["walk"];
    assert_eq!(sheet_entry["path"], "walk.png");
    assert_eq!(sheet_entry["columns"], 6);
    assert_eq!(sheet_entry["rows"], 8);
    assert_eq!(sheet_entry["frameWidth"], 12);
    assert_eq!(sheet_entry["frameHeight"], 12);

    let walk = &value["animations"]["walk"];
    assert_eq!(walk["down"]["startFrame"], 0);
    assert_eq!(walk["left"]["startFrame"], 12);
    assert_eq!(walk["down-right"]["startFrame"], 42);
    assert_eq!(walk["down"]["frameDuration"], 100);
    assert_eq!(walk["down"]["loop"], true);
    assert_eq!(walk["down"]["sheet"], "walk");
}

#[test]
fn config_file_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/config.json");

    let frames = frames(4, 8);
    let sheet = assemble(&frames, Some(4));
    let mut config = AnimationConfig::new();
    config.add_sheet("hurt", "hurt.png", &sheet);
    config.add_animation(AnimationType::Hurt, "hurt", &sheet, RowLayout::Unlabeled);

    config.write(&path, true).unwrap();

    let mut json = String::new();
    File::open(&path).unwrap().read_to_string(&mut json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["animations"]["hurt"]["frameCount"], 4);
    assert_eq!(value["animations"]["hurt"]["loop"], false);
}

#[test]
fn sliced_frames_write_with_deterministic_names() {
    let dir = tempfile::tempdir().unwrap();
    let source = RgbaImage::from_pixel(16, 16, Rgba([5, 5, 5, 255]));
    let result = extract(&source, PartitionDescriptor::UniformGrid { columns: 2, rows: 2 });

    for (i, frame) in result.frames.iter().enumerate() {
        save_png(&frame.pixels, &frame_output_path(dir.path(), "hero", i)).unwrap();
    }

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["hero_000.png", "hero_001.png", "hero_002.png", "hero_003.png"]
    );
}

#[test]
fn bundle_holds_one_entry_per_sheet_plus_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("character.zip");

    let walk_sheet = assemble(&frames(8, 4), Some(4));
    let idle_sheet = assemble(&frames(8, 4), Some(4));

    let mut config = AnimationConfig::new();
    config.add_sheet("walk", "walk.png", &walk_sheet);
    config.add_sheet("idle", "idle.png", &idle_sheet);

    write_bundle(
        &[
            ("walk".to_string(), &walk_sheet.image),
            ("idle".to_string(), &idle_sheet.image),
        ],
        &config,
        &path,
    )
    .unwrap();

    let mut archive = zip_archive(&path);
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["walk.png", "idle.png", "config.json"]);
}

fn zip_archive(path: &std::path::Path) -> zip::ZipArchive<File> {
    zip::ZipArchive::new(File::open(path).unwrap()).unwrap()
}
