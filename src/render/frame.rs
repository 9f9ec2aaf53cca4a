use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered RGBA8 frame.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether RGB channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied frame filled with `color`.
    pub fn filled(size: PixelSize, color: Rgba8) -> Self {
        let px = color.to_premul();
        let mut data = Vec::with_capacity(size.rgba8_len());
        for _ in 0..size.area() {
            data.extend_from_slice(&px);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        }
    }

    pub fn size(&self) -> PhotostripResult<PixelSize> {
        PixelSize::new(self.width, self.height)
    }

    /// Pixel bytes as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Pixel converted to straight alpha.
    pub fn pixel_straight(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let mut px = self.pixel(x, y)?;
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut px);
        }
        Some(px)
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    pub fn to_rgba_image(&self) -> PhotostripResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| PhotostripError::validation("frame buffer length mismatch"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
