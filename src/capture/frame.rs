use std::sync::Arc;

use image::{RgbaImage, imageops};

use crate::foundation::core::PixelSize;
use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Borrowed snapshot of a live camera frame (straight RGBA8, row-major).
#[derive(Clone, Copy, Debug)]
pub struct SourceFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba8: &'a [u8],
}

impl<'a> SourceFrame<'a> {
    pub fn new(width: u32, height: u32, rgba8: &'a [u8]) -> PhotostripResult<Self> {
        let frame = Self {
            width,
            height,
            rgba8,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn size(&self) -> PhotostripResult<PixelSize> {
        PixelSize::new(self.width, self.height)
    }

    fn validate(&self) -> PhotostripResult<()> {
        let size = self.size()?;
        if self.rgba8.len() != size.rgba8_len() {
            return Err(PhotostripError::validation(format!(
                "source frame byte len {} does not match {}x{} rgba8",
                self.rgba8.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Owned camera frame, as handed out by a [`crate::FrameSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedFrame {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

impl OwnedFrame {
    pub fn as_source(&self) -> PhotostripResult<SourceFrame<'_>> {
        SourceFrame::new(self.width, self.height, &self.rgba8)
    }
}

impl From<RgbaImage> for OwnedFrame {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: img.into_raw(),
        }
    }
}

/// One captured photo. Immutable once created; clones share the pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedStill {
    size: PixelSize,
    rgba8: Arc<[u8]>,
}

impl CapturedStill {
    /// Wrap an existing straight RGBA8 buffer of exactly `size`.
    pub fn from_rgba8(size: PixelSize, rgba8: Vec<u8>) -> PhotostripResult<Self> {
        if rgba8.len() != size.rgba8_len() {
            return Err(PhotostripError::validation(format!(
                "still byte len {} does not match {}x{} rgba8",
                rgba8.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self {
            size,
            rgba8: rgba8.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        Some([
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ])
    }

    /// Copy out as an `image` buffer (the still itself stays untouched).
    pub fn to_rgba_image(&self) -> PhotostripResult<RgbaImage> {
        RgbaImage::from_raw(self.size.width, self.size.height, self.rgba8.to_vec())
            .ok_or_else(|| PhotostripError::validation("still buffer does not match its size"))
    }

    /// A new still flipped about the vertical center axis.
    pub fn mirrored(&self) -> PhotostripResult<Self> {
        let mut img = self.to_rgba_image()?;
        imageops::flip_horizontal_in_place(&mut img);
        Self::from_rgba8(self.size, img.into_raw())
    }
}

/// How a source frame is scaled into the fixed-aspect target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Uniformly scale until the target is fully covered; overflow is cropped evenly.
    #[default]
    Cover,
    /// Uniformly scale until the source fits inside; uncovered bands stay transparent.
    Contain,
}

/// Placement of the scaled source inside the target, in target pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FitRect {
    /// Compute where a `source`-sized frame lands inside `target`.
    ///
    /// Aspect ratios are compared by cross-multiplication and every derived length is a single
    /// `(a * b) / c` over integers, so equal-aspect inputs place exactly with no crop.
    pub fn compute(source: PixelSize, target: PixelSize, fit: FitMode) -> Self {
        let (sw, sh) = (u64::from(source.width), u64::from(source.height));
        let (tw, th) = (u64::from(target.width), u64::from(target.height));
        let source_wider = sw * th > tw * sh;

        let fit_height = || {
            let width = (th * sw) as f64 / sh as f64;
            FitRect {
                x: (tw as f64 - width) / 2.0,
                y: 0.0,
                width,
                height: th as f64,
            }
        };
        let fit_width = || {
            let height = (tw * sh) as f64 / sw as f64;
            FitRect {
                x: 0.0,
                y: (th as f64 - height) / 2.0,
                width: tw as f64,
                height,
            }
        };

        match (fit, source_wider) {
            (FitMode::Cover, true) | (FitMode::Contain, false) => fit_height(),
            (FitMode::Cover, false) | (FitMode::Contain, true) => fit_width(),
        }
    }

    /// Snap to whole pixels.
    ///
    /// Cover floors offsets and ceils lengths so the snapped rectangle still covers the target;
    /// contain rounds both.
    pub fn to_pixels(self, fit: FitMode) -> PixelPlacement {
        match fit {
            FitMode::Cover => PixelPlacement {
                x: self.x.floor() as i64,
                y: self.y.floor() as i64,
                width: (self.width.ceil() as u32).max(1),
                height: (self.height.ceil() as u32).max(1),
            },
            FitMode::Contain => PixelPlacement {
                x: self.x.round() as i64,
                y: self.y.round() as i64,
                width: (self.width.round() as u32).max(1),
                height: (self.height.round() as u32).max(1),
            },
        }
    }
}

/// Integer placement of the scaled source; offsets may be negative (cropped overflow).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Capture geometry: target still size, fit policy and mirroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub width: u32,
    pub height: u32,
    pub fit: FitMode,
    pub mirrored: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            width: 720,
            height: 540,
            fit: FitMode::Cover,
            mirrored: false,
        }
    }
}

impl CaptureSettings {
    pub fn target(&self) -> PhotostripResult<PixelSize> {
        PixelSize::new(self.width, self.height)
    }
}

/// Convert a live frame of any aspect ratio into a still of exactly `target` pixels.
#[tracing::instrument(skip(source), fields(src_w = source.width, src_h = source.height))]
pub fn capture(
    source: &SourceFrame<'_>,
    target: PixelSize,
    mirrored: bool,
    fit: FitMode,
) -> PhotostripResult<CapturedStill> {
    source.validate()?;
    let src_size = source.size()?;
    let placement = FitRect::compute(src_size, target, fit).to_pixels(fit);
    tracing::debug!(?placement, "capture placement");

    let src_img = RgbaImage::from_raw(source.width, source.height, source.rgba8.to_vec())
        .ok_or_else(|| PhotostripError::validation("source frame does not match its size"))?;
    let scaled = if placement.width == source.width && placement.height == source.height {
        src_img
    } else {
        imageops::resize(
            &src_img,
            placement.width,
            placement.height,
            imageops::FilterType::Triangle,
        )
    };

    // Uncovered pixels stay fully transparent.
    let mut canvas = RgbaImage::new(target.width, target.height);
    imageops::replace(&mut canvas, &scaled, placement.x, placement.y);

    if mirrored {
        imageops::flip_horizontal_in_place(&mut canvas);
    }

    CapturedStill::from_rgba8(target, canvas.into_raw())
}

/// [`capture`] with [`FitMode::Cover`].
pub fn capture_cover(
    source: &SourceFrame<'_>,
    target: PixelSize,
    mirrored: bool,
) -> PhotostripResult<CapturedStill> {
    capture(source, target, mirrored, FitMode::Cover)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/frame.rs"]
mod tests;
