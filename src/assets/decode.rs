use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::fonts::build_fontdb;
use crate::assets::store::{PreparedImage, PreparedSvg};
use crate::foundation::error::PhotostripResult;
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode a raster image (PNG, JPEG, GIF, WebP, ...) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotostripResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes. Relative `href`s resolve against `resources_dir`.
///
/// `<text>` is shaped with system fonts plus fonts found in `resources_dir` and its `fonts/`
/// subdirectory.
pub fn parse_svg(bytes: &[u8], resources_dir: Option<&Path>) -> PhotostripResult<PreparedSvg> {
    let font_dirs: Vec<&Path> = resources_dir.into_iter().collect();
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: build_fontdb(&font_dirs),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// True when the bytes look like SVG markup rather than a binary raster format.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
