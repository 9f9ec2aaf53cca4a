use std::fmt;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Unique sticker identifier, assigned in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct StickerId(pub u64);

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sticker-{}", self.0)
    }
}

/// A placed sticker. Position and size are in layout pixels and may lie outside the strip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sticker {
    pub id: StickerId,
    /// Image source reference, resolved by [`crate::PreparedStickerStore`].
    pub source: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement defaults for new stickers and the shrink floor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StickerDefaults {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub min_size: f64,
}

impl Default for StickerDefaults {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 60.0,
            height: 60.0,
            min_size: 5.0,
        }
    }
}

impl StickerDefaults {
    pub const ENLARGE_FACTOR: f64 = 1.2;
    pub const SHRINK_FACTOR: f64 = 0.8;

    pub fn validate(&self) -> PhotostripResult<()> {
        let finite = [self.x, self.y, self.width, self.height, self.min_size]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(PhotostripError::validation(
                "sticker defaults must be finite",
            ));
        }
        if self.min_size <= 0.0 {
            return Err(PhotostripError::validation(
                "sticker min_size must be > 0",
            ));
        }
        if self.width < self.min_size || self.height < self.min_size {
            return Err(PhotostripError::validation(
                "default sticker size must be >= min_size",
            ));
        }
        Ok(())
    }
}

/// Result of [`StickerModel::resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Both dimensions were scaled.
    Resized,
    /// The new size would fall below the minimum (or the factor was unusable); nothing changed.
    Rejected,
    /// No sticker with that id.
    NotFound,
}

/// Ordered sticker list. Order is z-order: later stickers draw on top.
#[derive(Clone, Debug, Default)]
pub struct StickerModel {
    defaults: StickerDefaults,
    stickers: Vec<Sticker>,
    next_id: u64,
}

impl StickerModel {
    pub fn new(defaults: StickerDefaults) -> Self {
        Self {
            defaults,
            stickers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn defaults(&self) -> &StickerDefaults {
        &self.defaults
    }

    /// Place a new sticker at the default position and size, on top of all others.
    pub fn add(&mut self, source: impl Into<String>) -> &Sticker {
        let id = StickerId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        let d = self.defaults;
        let idx = self.stickers.len();
        self.stickers.push(Sticker {
            id,
            source: source.into(),
            x: d.x,
            y: d.y,
            width: d.width,
            height: d.height,
        });
        tracing::debug!(%id, "sticker added");
        &self.stickers[idx]
    }

    /// Remove a sticker; `None` when it does not exist.
    pub fn remove(&mut self, id: StickerId) -> Option<Sticker> {
        let idx = self.position(id)?;
        Some(self.stickers.remove(idx))
    }

    /// Scale width and height together by `scale`.
    pub fn resize(&mut self, id: StickerId, scale: f64) -> ResizeOutcome {
        let min = self.defaults.min_size;
        let Some(sticker) = self.get_mut(id) else {
            return ResizeOutcome::NotFound;
        };
        if !scale.is_finite() || scale <= 0.0 {
            return ResizeOutcome::Rejected;
        }
        let width = sticker.width * scale;
        let height = sticker.height * scale;
        if !width.is_finite() || !height.is_finite() || width < min || height < min {
            return ResizeOutcome::Rejected;
        }
        sticker.width = width;
        sticker.height = height;
        ResizeOutcome::Resized
    }

    pub fn enlarge(&mut self, id: StickerId) -> ResizeOutcome {
        self.resize(id, StickerDefaults::ENLARGE_FACTOR)
    }

    pub fn shrink(&mut self, id: StickerId) -> ResizeOutcome {
        self.resize(id, StickerDefaults::SHRINK_FACTOR)
    }

    /// Set both dimensions directly, under the same bounds as [`StickerModel::resize`].
    pub fn set_size(&mut self, id: StickerId, width: f64, height: f64) -> ResizeOutcome {
        let min = self.defaults.min_size;
        let Some(sticker) = self.get_mut(id) else {
            return ResizeOutcome::NotFound;
        };
        if !width.is_finite() || !height.is_finite() || width < min || height < min {
            return ResizeOutcome::Rejected;
        }
        sticker.width = width;
        sticker.height = height;
        ResizeOutcome::Resized
    }

    /// Set the absolute position. Coordinates are not clamped to the strip.
    ///
    /// Returns `false` for unknown ids and non-finite coordinates.
    pub fn move_to(&mut self, id: StickerId, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match self.get_mut(id) {
            Some(s) => {
                s.x = x;
                s.y = y;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: StickerId) -> Option<&mut Sticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    fn position(&self, id: StickerId) -> Option<usize> {
        self.stickers.iter().position(|s| s.id == id)
    }

    /// Stickers in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.stickers.iter()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Drop all stickers. Ids keep increasing.
    pub fn clear(&mut self) {
        self.stickers.clear();
    }

    /// Owned copy for rendering.
    pub fn snapshot(&self) -> Vec<Sticker> {
        self.stickers.clone()
    }
}

/// Pointer-drag adapter: turns pointer positions into [`StickerModel::move_to`] calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct StickerDrag {
    active: Option<(StickerId, Point)>,
}

impl StickerDrag {
    /// Start dragging `id` from `pointer`. Returns `false` if the sticker does not exist.
    pub fn begin(&mut self, model: &StickerModel, id: StickerId, pointer: Point) -> bool {
        if model.get(id).is_none() {
            self.active = None;
            return false;
        }
        self.active = Some((id, pointer));
        true
    }

    /// Move the dragged sticker by the pointer delta since the last event.
    pub fn update(&mut self, model: &mut StickerModel, pointer: Point) -> bool {
        let Some((id, last)) = self.active else {
            return false;
        };
        let delta: Vec2 = pointer - last;
        let Some(s) = model.get(id) else {
            self.active = None;
            return false;
        };
        let (x, y) = (s.x + delta.x, s.y + delta.y);
        self.active = Some((id, pointer));
        model.move_to(id, x, y)
    }

    pub fn end(&mut self) -> Option<StickerId> {
        self.active.take().map(|(id, _)| id)
    }

    pub fn active(&self) -> Option<StickerId> {
        self.active.map(|(id, _)| id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/stickers.rs"]
mod tests;
