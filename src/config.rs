use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::fonts::{build_fontdb, select_stamp_font};
use crate::assets::text::StampFont;
use crate::capture::frame::CaptureSettings;
use crate::editor::state::EditorState;
use crate::editor::stickers::StickerDefaults;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::layout::strip::StripLayout;

/// Appearance of the date and watermark stamps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StampStyle {
    /// Regular face for both stamps. Without it a serif system face is used.
    pub font_path: Option<PathBuf>,
    /// Optional dedicated bold face for the watermark.
    pub bold_font_path: Option<PathBuf>,
    pub date_size_px: f32,
    pub watermark_size_px: f32,
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub color: String,
    pub watermark_text: String,
    /// chrono strftime pattern.
    pub date_format: String,
}

impl Default for StampStyle {
    fn default() -> Self {
        Self {
            font_path: None,
            bold_font_path: None,
            date_size_px: 16.0,
            watermark_size_px: 24.0,
            color: "#333333".to_string(),
            watermark_text: "Photobooth".to_string(),
            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl StampStyle {
    pub fn validate(&self) -> PhotostripResult<()> {
        for (name, v) in [
            ("date_size_px", self.date_size_px),
            ("watermark_size_px", self.watermark_size_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(PhotostripError::validation(format!(
                    "stamp {name} must be finite and > 0"
                )));
            }
        }
        self.text_color()?;
        let has_error = chrono::format::StrftimeItems::new(&self.date_format)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if has_error {
            return Err(PhotostripError::validation(format!(
                "invalid stamp date_format '{}'",
                self.date_format
            )));
        }
        if self.bold_font_path.is_some() && self.font_path.is_none() {
            return Err(PhotostripError::validation(
                "stamp bold_font_path requires font_path",
            ));
        }
        Ok(())
    }

    pub fn text_color(&self) -> PhotostripResult<Rgba8> {
        Rgba8::parse_hex(&self.color)
    }

    /// Load the configured fonts. Relative paths resolve against `base_dir`.
    ///
    /// Without `font_path` the face comes from the system fonts plus fonts in `base_dir` and
    /// `base_dir/fonts`, serif first. `None` only when no face is installed at all.
    pub fn load_font(&self, base_dir: &Path) -> PhotostripResult<Option<StampFont>> {
        let Some(regular) = &self.font_path else {
            let db = build_fontdb(&[base_dir]);
            let font = select_stamp_font(&db);
            if font.is_none() {
                tracing::warn!(faces = db.len(), "no usable stamp font found");
            }
            return Ok(font);
        };
        let regular = base_dir.join(regular);
        let bold = self.bold_font_path.as_ref().map(|p| base_dir.join(p));
        StampFont::load(&regular, bold.as_deref()).map(Some)
    }
}

/// Top-level booth configuration (JSON).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    pub capture: CaptureSettings,
    pub required_photos: usize,
    pub layout: StripLayout,
    pub stickers: StickerDefaults,
    pub stamp: StampStyle,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            capture: CaptureSettings::default(),
            required_photos: 3,
            layout: StripLayout::default(),
            stickers: StickerDefaults::default(),
            stamp: StampStyle::default(),
        }
    }
}

impl BoothConfig {
    pub fn validate(&self) -> PhotostripResult<()> {
        self.capture.target()?;
        if self.required_photos == 0 {
            return Err(PhotostripError::validation("required_photos must be >= 1"));
        }
        self.layout.validate()?;
        self.layout.canvas_size(self.required_photos, 2)?;
        self.stickers.validate()?;
        self.stamp.validate()?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> PhotostripResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> PhotostripResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// A sticker placement inside a [`StripRequest`]. Missing fields take the configured defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerPlacement {
    pub source: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Offline strip job: camera frames, edits, and stickers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripRequest {
    /// Raw camera frames, one per photo, in order.
    pub frames: Vec<PathBuf>,
    #[serde(default)]
    pub editor: EditorState,
    #[serde(default)]
    pub stickers: Vec<StickerPlacement>,
    /// Root for sticker sources; defaults to the request file's directory.
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
}

impl StripRequest {
    pub fn from_json_path(path: &Path) -> PhotostripResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read strip request '{}'", path.display()))?;
        let req: Self = serde_json::from_str(&s)?;
        Ok(req.resolve_paths(path.parent().unwrap_or_else(|| Path::new("."))))
    }

    /// Make relative frame paths and the asset root absolute under `base_dir`.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        for f in &mut self.frames {
            if f.is_relative() {
                *f = base_dir.join(&*f);
            }
        }
        self.asset_root = Some(match self.asset_root.take() {
            Some(root) if root.is_relative() => base_dir.join(root),
            Some(root) => root,
            None => base_dir.to_path_buf(),
        });
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
