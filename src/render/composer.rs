use crate::assets::store::{PreparedSticker, PreparedStickerStore};
use crate::assets::svg_raster::rasterize_svg;
use crate::assets::text::StampFont;
use crate::capture::frame::CapturedStill;
use crate::config::StampStyle;
use crate::editor::state::EditorState;
use crate::editor::stickers::{Sticker, StickerId};
use crate::filter::color::apply_filter_in_place;
use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::layout::strip::{SlotRect, StampKind, StripLayout};
use crate::render::composite::{blit_over, resize_rgba8};
use crate::render::frame::FrameRGBA;
use crate::render::stamp::{StampRenderer, StampText};

const MAX_STICKER_DIM: u32 = 16_384;

/// Everything needed to render one strip, detached from the live session.
#[derive(Clone, Debug)]
pub struct ComposeInput {
    /// Stills in capture order.
    pub stills: Vec<CapturedStill>,
    pub editor: EditorState,
    /// Stickers in draw order.
    pub stickers: Vec<Sticker>,
    pub required_photos: usize,
}

/// A sticker left out of the strip.
#[derive(Debug)]
pub struct SkippedSticker {
    pub id: StickerId,
    pub error: PhotostripError,
}

/// Rendered strip plus the stickers and stamps that could not be drawn.
#[derive(Debug)]
pub struct FinalComposition {
    /// Premultiplied RGBA8, sized by the layout.
    pub frame: FrameRGBA,
    pub skipped: Vec<SkippedSticker>,
    /// Enabled stamps left blank because no font was available. Their space is still reserved.
    pub skipped_stamps: Vec<StampKind>,
}

/// Render the final strip: background, filtered photos, stamps, then stickers on top.
///
/// Sticker failures do not abort the render; they are returned in
/// [`FinalComposition::skipped`].
#[tracing::instrument(
    skip_all,
    fields(photos = input.stills.len(), stickers = input.stickers.len(), filter = %input.editor.filter)
)]
pub fn compose(
    input: &ComposeInput,
    layout: &StripLayout,
    stickers: &PreparedStickerStore,
    stamps: &StampStyle,
    font: Option<&StampFont>,
) -> PhotostripResult<FinalComposition> {
    if input.stills.len() != input.required_photos {
        return Err(PhotostripError::incomplete(
            input.required_photos,
            input.stills.len(),
        ));
    }
    let n = input.stills.len();
    let editor = &input.editor;

    let canvas = layout.canvas_size_for(n, editor)?;
    let mut frame = FrameRGBA::filled(canvas, editor.background.resolve());
    tracing::debug!(width = canvas.width, height = canvas.height, "strip canvas");

    for (still, slot) in input.stills.iter().zip(layout.photo_slots(n)) {
        draw_photo(&mut frame, still, &slot, editor)?;
    }

    let skipped_stamps = draw_stamps(&mut frame, layout, n, editor, stamps, font)?;

    let mut skipped = Vec::new();
    for sticker in &input.stickers {
        if let Err(error) = draw_sticker(&mut frame, sticker, stickers) {
            if !error.is_recoverable_locally() {
                return Err(error);
            }
            tracing::warn!(id = %sticker.id, source = %sticker.source, %error, "sticker skipped");
            skipped.push(SkippedSticker {
                id: sticker.id,
                error,
            });
        }
    }

    Ok(FinalComposition {
        frame,
        skipped,
        skipped_stamps,
    })
}

fn draw_photo(
    frame: &mut FrameRGBA,
    still: &CapturedStill,
    slot: &SlotRect,
    editor: &EditorState,
) -> PhotostripResult<()> {
    // Filters operate on straight alpha.
    let mut px = resize_rgba8(
        still.as_rgba8(),
        still.width(),
        still.height(),
        slot.width,
        slot.height,
    )?;
    apply_filter_in_place(&mut px, editor.filter)?;
    premultiply_rgba8_in_place(&mut px);
    blit_over(
        frame,
        &px,
        slot.width,
        slot.height,
        i64::from(slot.x),
        i64::from(slot.y),
    )
}

fn draw_stamps(
    frame: &mut FrameRGBA,
    layout: &StripLayout,
    photos: usize,
    editor: &EditorState,
    style: &StampStyle,
    font: Option<&StampFont>,
) -> PhotostripResult<Vec<StampKind>> {
    let slots = layout.stamp_slots(photos, editor);
    let Some(font) = font else {
        if !slots.is_empty() {
            tracing::warn!(stamps = slots.len(), "no stamp font available, stamp text skipped");
        }
        return Ok(slots.iter().map(|s| s.kind).collect());
    };

    let color = style.text_color()?;
    let mut renderer = StampRenderer::new();
    for slot in slots {
        let date_text;
        let (text, size_px, bold) = match slot.kind {
            StampKind::Date => {
                date_text = editor.date_text(&style.date_format)?;
                (date_text.as_str(), style.date_size_px, false)
            }
            StampKind::Watermark => (style.watermark_text.as_str(), style.watermark_size_px, true),
        };
        renderer.draw(
            frame,
            &slot.rect,
            StampText {
                text,
                face: font.face(bold),
                size_px,
                color,
                bold,
            },
        )?;
    }
    Ok(Vec::new())
}

/// Whole-pixel draw geometry: fractional parts are dropped.
fn sticker_rect(sticker: &Sticker) -> PhotostripResult<Option<(i64, i64, u32, u32)>> {
    let too_large = || {
        PhotostripError::sticker(
            &sticker.source,
            format!(
                "draw size {}x{} exceeds {MAX_STICKER_DIM}",
                sticker.width, sticker.height
            ),
        )
    };
    let fields = [sticker.x, sticker.y, sticker.width, sticker.height];
    if fields.iter().any(|v| !v.is_finite()) {
        return Err(PhotostripError::sticker(
            &sticker.source,
            "non-finite position or size",
        ));
    }
    let w = sticker.width.trunc();
    let h = sticker.height.trunc();
    if w < 1.0 || h < 1.0 {
        return Ok(None);
    }
    if w > f64::from(MAX_STICKER_DIM) || h > f64::from(MAX_STICKER_DIM) {
        return Err(too_large());
    }
    Ok(Some((
        sticker.x.trunc() as i64,
        sticker.y.trunc() as i64,
        w as u32,
        h as u32,
    )))
}

fn draw_sticker(
    frame: &mut FrameRGBA,
    sticker: &Sticker,
    store: &PreparedStickerStore,
) -> PhotostripResult<()> {
    let prepared = store.get(&sticker.source)?;
    let Some((x, y, w, h)) = sticker_rect(sticker)? else {
        return Ok(());
    };

    let px = match prepared {
        PreparedSticker::Image(img) => {
            resize_rgba8(&img.rgba8_premul, img.width, img.height, w, h)
        }
        PreparedSticker::Svg(svg) => {
            rasterize_svg(&svg.tree, w, h).map(|img| img.rgba8_premul.as_ref().clone())
        }
    }
    .map_err(|e| PhotostripError::sticker(&sticker.source, e.to_string()))?;

    blit_over(frame, &px, w, h, x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composer.rs"]
mod tests;
