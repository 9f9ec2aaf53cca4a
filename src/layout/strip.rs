use crate::editor::state::EditorState;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Vertical strip geometry in output pixels.
///
/// Photos stack top to bottom at `margin_x`, separated by `photo_spacing`. Enabled stamps follow
/// the last photo, each reserving `stamp_advance` pixels of which `stamp_box_height` hold the
/// centered text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StripLayout {
    pub photo_width: u32,
    pub photo_height: u32,
    pub margin_x: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub photo_spacing: u32,
    pub stamp_box_height: u32,
    pub stamp_advance: u32,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            photo_width: 240,
            photo_height: 180,
            margin_x: 16,
            margin_top: 16,
            margin_bottom: 16,
            photo_spacing: 8,
            stamp_box_height: 40,
            stamp_advance: 48,
        }
    }
}

/// Axis-aligned pixel rectangle on the strip canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SlotRect {
    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StampKind {
    Date,
    Watermark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampSlot {
    pub kind: StampKind,
    pub rect: SlotRect,
}

impl StripLayout {
    pub fn validate(&self) -> PhotostripResult<()> {
        if self.photo_width == 0 || self.photo_height == 0 {
            return Err(PhotostripError::validation(
                "layout photo_width and photo_height must be > 0",
            ));
        }
        if self.stamp_box_height > self.stamp_advance {
            return Err(PhotostripError::validation(
                "layout stamp_box_height must be <= stamp_advance",
            ));
        }
        self.canvas_size(1, 2).map(|_| ())
    }

    pub fn photo_size(&self) -> PhotostripResult<PixelSize> {
        PixelSize::new(self.photo_width, self.photo_height)
    }

    /// Canvas size for `photos` stills and `stamps` enabled stamps.
    pub fn canvas_size(&self, photos: usize, stamps: u32) -> PhotostripResult<PixelSize> {
        let overflow = || PhotostripError::validation("strip dimensions overflow u32");
        let n = u32::try_from(photos).map_err(|_| overflow())?;
        if n == 0 {
            return Err(PhotostripError::validation("a strip needs at least one photo"));
        }

        let width = self
            .margin_x
            .checked_mul(2)
            .and_then(|m| m.checked_add(self.photo_width))
            .ok_or_else(overflow)?;
        let height = self
            .photo_height
            .checked_mul(n)
            .and_then(|h| h.checked_add(self.photo_spacing.checked_mul(n - 1)?))
            .and_then(|h| h.checked_add(self.margin_top))
            .and_then(|h| h.checked_add(self.margin_bottom))
            .and_then(|h| h.checked_add(self.stamp_advance.checked_mul(stamps)?))
            .ok_or_else(overflow)?;
        PixelSize::new(width, height)
    }

    /// Canvas size for the stamps `editor` enables.
    pub fn canvas_size_for(&self, photos: usize, editor: &EditorState) -> PhotostripResult<PixelSize> {
        self.canvas_size(photos, editor.stamp_count())
    }

    /// Photo rectangles, top to bottom. Call after [`StripLayout::canvas_size`] succeeded.
    pub fn photo_slots(&self, photos: usize) -> Vec<SlotRect> {
        let pitch = self.photo_height + self.photo_spacing;
        (0..photos as u32)
            .map(|i| SlotRect {
                x: self.margin_x,
                y: self.margin_top + i * pitch,
                width: self.photo_width,
                height: self.photo_height,
            })
            .collect()
    }

    /// Stamp boxes in draw order: date first, then watermark.
    pub fn stamp_slots(&self, photos: usize, editor: &EditorState) -> Vec<StampSlot> {
        let mut cursor = self.margin_top + photos as u32 * (self.photo_height + self.photo_spacing);
        let mut out = Vec::with_capacity(2);
        let kinds = [
            (editor.show_date, StampKind::Date),
            (editor.show_watermark, StampKind::Watermark),
        ];
        for (enabled, kind) in kinds {
            if !enabled {
                continue;
            }
            out.push(StampSlot {
                kind,
                rect: SlotRect {
                    x: self.margin_x,
                    y: cursor,
                    width: self.photo_width,
                    height: self.stamp_box_height,
                },
            });
            cursor += self.stamp_advance;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/strip.rs"]
mod tests;
