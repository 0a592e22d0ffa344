//! Bundle packaging - one ZIP with every exported sheet plus the config
//!
//! Entry naming is deterministic: `{sheet}.png` per raster and
//! `config.json` for the animation config, so repeated exports of the same
//! input produce the same archive layout.

use image::RgbaImage;
use log::debug;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::export::{AnimationConfig, Result};

/// Encode a raster as PNG bytes in memory.
fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Write a download bundle: one PNG entry per sheet plus `config.json`.
///
/// Sheets are written in the order given, so the archive layout follows the
/// export order deterministically.
pub fn write_bundle(
    sheets: &[(String, &RgbaImage)],
    config: &AnimationConfig,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, image) in sheets {
        let entry = format!("{}.png", name);
        archive.start_file(&entry, options)?;
        archive.write_all(&encode_png(image)?)?;
        debug!("bundled {} ({}x{})", entry, image.width(), image.height());
    }

    archive.start_file("config.json", options)?;
    archive.write_all(config.to_json(true)?.as_bytes())?;

    archive.finish()?;
    Ok(())
}
