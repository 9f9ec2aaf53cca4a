use crate::assets::text::{FontFace, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::layout::strip::SlotRect;
use crate::render::composite::over_in_place;
use crate::render::frame::FrameRGBA;

/// Text run to draw centered in a stamp box.
#[derive(Clone, Copy, Debug)]
pub struct StampText<'a> {
    pub text: &'a str,
    pub face: &'a FontFace,
    pub size_px: f32,
    pub color: Rgba8,
    pub bold: bool,
}

/// Draws stamp text onto a premultiplied frame with `vello_cpu`.
#[derive(Default)]
pub struct StampRenderer {
    engine: TextLayoutEngine,
}

impl StampRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center `stamp` horizontally and vertically on `slot`.
    #[tracing::instrument(skip_all, fields(text = stamp.text, size_px = stamp.size_px))]
    pub fn draw(
        &mut self,
        dst: &mut FrameRGBA,
        slot: &SlotRect,
        stamp: StampText<'_>,
    ) -> PhotostripResult<()> {
        if !dst.premultiplied {
            return Err(PhotostripError::validation(
                "stamp rendering expects a premultiplied destination",
            ));
        }
        if stamp.text.trim().is_empty() {
            return Ok(());
        }
        let w: u16 = dst
            .width
            .try_into()
            .map_err(|_| PhotostripError::validation("strip width exceeds u16"))?;
        let h: u16 = dst
            .height
            .try_into()
            .map_err(|_| PhotostripError::validation("strip height exceeds u16"))?;

        let layout = self.engine.layout_plain(
            stamp.text,
            &stamp.face.bytes,
            stamp.size_px,
            TextBrushRgba8::from(stamp.color),
            stamp.bold,
        )?;

        let origin_x = slot.center_x() - f64::from(layout.width()) / 2.0;
        let origin_y = slot.center_y() - f64::from(layout.height()) / 2.0;
        tracing::debug!(origin_x, origin_y, width = layout.width(), "stamp placed");

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(stamp.face.bytes.as_ref().clone()),
            0,
        );
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Absolute pen x and baseline y within the layout box.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        over_in_place(&mut dst.data, pixmap.data_as_u8_slice())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stamp.rs"]
mod tests;
