use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::PhotostripResult;
use crate::render::frame::FrameRGBA;

/// Encode as straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> PhotostripResult<Vec<u8>> {
    let img = frame.to_rgba_image()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Download name for a strip exported at `timestamp_ms` (Unix epoch milliseconds).
pub fn suggested_file_name(timestamp_ms: i64) -> String {
    format!("photobooth-{timestamp_ms}.png")
}

/// [`suggested_file_name`] for the current time.
pub fn suggested_file_name_now() -> String {
    suggested_file_name(chrono::Utc::now().timestamp_millis())
}

/// Write `frame` to `path`, creating parent directories.
#[tracing::instrument(skip(frame), fields(path = %path.display()))]
pub fn save_png(frame: &FrameRGBA, path: &Path) -> PhotostripResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Save under [`suggested_file_name_now`] inside `dir` and return the path.
pub fn save_png_in_dir(frame: &FrameRGBA, dir: &Path) -> PhotostripResult<PathBuf> {
    let path = dir.join(suggested_file_name_now());
    save_png(frame, &path)?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
