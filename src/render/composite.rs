use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(
            u16::from(src[i]),
            mul_div255_u16(u16::from(dst[i]), inv),
        );
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PhotostripResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PhotostripError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Draw a premultiplied `src_w`×`src_h` buffer with its top-left corner at (`x`, `y`).
///
/// The part outside `dst` is clipped; placement may be fully off-canvas.
pub fn blit_over(
    dst: &mut FrameRGBA,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i64,
    y: i64,
) -> PhotostripResult<()> {
    if !dst.premultiplied {
        return Err(PhotostripError::validation(
            "blit_over expects a premultiplied destination",
        ));
    }
    let expected = (src_w as usize) * (src_h as usize) * 4;
    if src.len() != expected {
        return Err(PhotostripError::validation(format!(
            "blit source length {} does not match {src_w}x{src_h}",
            src.len()
        )));
    }

    let dw = i64::from(dst.width);
    let dh = i64::from(dst.height);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src_w)).min(dw);
    let y1 = (y + i64::from(src_h)).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let row_px = (x1 - x0) as usize;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let sx = (x0 - x) as usize;
        let s_start = (sy * src_w as usize + sx) * 4;
        let d_start = ((dy as usize) * (dst.width as usize) + x0 as usize) * 4;
        over_in_place(
            &mut dst.data[d_start..d_start + row_px * 4],
            &src[s_start..s_start + row_px * 4],
        )?;
    }
    Ok(())
}

/// Resample an RGBA8 buffer to `w`×`h` (bilinear), straight or premultiplied alike.
///
/// Returns a plain copy when the size already matches.
pub fn resize_rgba8(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    w: u32,
    h: u32,
) -> PhotostripResult<Vec<u8>> {
    if src_w == w && src_h == h {
        return Ok(src.to_vec());
    }
    let img = image::RgbaImage::from_raw(src_w, src_h, src.to_vec())
        .ok_or_else(|| PhotostripError::validation("resize source length mismatch"))?;
    Ok(image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle).into_raw())
}

fn add_sat_u8(a: u16, b: u16) -> u8 {
    (a + b).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
