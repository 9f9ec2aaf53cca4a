//! Photostrip is the core of a photobooth: it captures stills from a camera feed, lets a user
//! decorate them, and renders the final vertical photostrip as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: a live camera frame of any aspect is cover-fit into a fixed-size still
//!    ([`capture`]), optionally mirrored. [`CameraSession`] releases the [`FrameSource`] on every
//!    exit path.
//! 2. **Edit**: a [`BoothSession`] collects the stills and holds the [`EditorState`] (background,
//!    color filter, date and watermark stamps) and the [`StickerModel`].
//! 3. **Compose**: [`compose`] renders an owned [`ComposeInput`] snapshot: background, filtered
//!    photos, stamps, then stickers in draw order.
//! 4. **Export**: [`encode_png`] / [`save_png`] write the strip as straight-alpha PNG.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO in the composer**: sticker images are loaded up front into a
//!   [`PreparedStickerStore`]; a sticker that is not there is skipped, not fatal.
//! - **Premultiplied RGBA8** internally; stills and exported PNGs are straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod capture;
mod config;
mod editor;
mod export;
mod filter;
mod foundation;
mod layout;
mod render;

pub use assets::decode::{decode_image, looks_like_svg, parse_svg};
pub use assets::fonts::{build_fontdb, select_stamp_font};
pub use assets::store::{
    PreparedImage, PreparedSticker, PreparedStickerStore, PreparedSvg, normalize_rel_path,
    resolve_sticker_source,
};
pub use assets::svg_raster::{rasterize_svg, rasterize_svg_to_premul_rgba8};
pub use assets::text::{FontFace, StampFont, TextBrushRgba8, TextLayoutEngine};
pub use capture::camera::{CameraSession, FrameSource, ReplaySource, capture_sequence};
pub use capture::frame::{
    CaptureSettings, CapturedStill, FitMode, FitRect, OwnedFrame, PixelPlacement, SourceFrame,
    capture, capture_cover,
};
pub use config::{BoothConfig, StampStyle, StickerPlacement, StripRequest};
pub use editor::session::{BoothSession, Stage};
pub use editor::state::{BackgroundColor, EditorAction, EditorState};
pub use editor::stickers::{
    ResizeOutcome, Sticker, StickerDefaults, StickerDrag, StickerId, StickerModel,
};
pub use export::png::{
    encode_png, save_png, save_png_in_dir, suggested_file_name, suggested_file_name_now,
};
pub use filter::color::{FilterKind, apply_filter, apply_filter_in_place};
pub use foundation::core::{PixelSize, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{PhotostripError, PhotostripResult};
pub use layout::strip::{SlotRect, StampKind, StampSlot, StripLayout};
pub use render::composer::{ComposeInput, FinalComposition, SkippedSticker, compose};
pub use render::composite::{blit_over, over, over_in_place, resize_rgba8};
pub use render::frame::FrameRGBA;
pub use render::stamp::{StampRenderer, StampText};
