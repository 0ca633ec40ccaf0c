//! Lossless persistence of canvases.

use crate::canvas::Canvas;
use crate::config::Encoding;
use crate::error::Result;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `canvas` to `path` in `encoding`. Both encodings are lossless.
///
/// The writer is flushed before returning, so a full disk or a failed write
/// surfaces as an error here instead of being lost on drop.
pub fn save(canvas: &Canvas, path: &Path, encoding: Encoding) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let (width, height) = canvas.dimensions();
    match encoding {
        Encoding::Png => PngEncoder::new(&mut w).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        )?,
        Encoding::WebpLossless => WebPEncoder::new_lossless(&mut w).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        )?,
    }
    w.flush()?;
    Ok(())
}
