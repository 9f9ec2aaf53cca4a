use std::sync::Arc;

use crate::assets::store::PreparedImage;
use crate::foundation::error::{PhotostripError, PhotostripResult};

const MAX_DIM: u32 = 16_384;

/// Rasterize `tree` stretched to exactly `width`×`height`, premultiplied RGBA8.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PhotostripResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(PhotostripError::validation(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let size = tree.size();
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(size.width()) || !valid(size.height()) {
        return Err(PhotostripError::validation("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PhotostripError::validation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Rasterize at draw size so vector stickers stay sharp when enlarged.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> PhotostripResult<PreparedImage> {
    let rgba8_premul = rasterize_svg_to_premul_rgba8(tree, width, height)?;
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
