use super::*;
use crate::foundation::core::PixelSize;

fn face() -> FontFace {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fonts/DejaVuSans.ttf");
    FontFace::load(&path).unwrap()
}

fn dark_pixels_in(frame: &FrameRGBA, rows: std::ops::Range<u32>) -> usize {
    let mut n = 0;
    for y in rows {
        for x in 0..frame.width {
            let p = frame.pixel(x, y).unwrap();
            if p[0] < 200 {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn text_lands_inside_its_slot() {
    let face = face();
    let mut frame = FrameRGBA::filled(PixelSize::new(272, 100).unwrap(), Rgba8::WHITE);
    let slot = SlotRect {
        x: 16,
        y: 30,
        width: 240,
        height: 40,
    };
    let mut r = StampRenderer::new();
    r.draw(
        &mut frame,
        &slot,
        StampText {
            text: "Photobooth",
            face: &face,
            size_px: 24.0,
            color: Rgba8::opaque(0x33, 0x33, 0x33),
            bold: true,
        },
    )
    .unwrap();

    assert!(dark_pixels_in(&frame, 30..70) > 20);
    assert_eq!(dark_pixels_in(&frame, 0..25), 0);
    assert_eq!(dark_pixels_in(&frame, 75..100), 0);

    // Roughly centered: ink on both halves.
    let left = (0..136).any(|x| (30..70).any(|y| frame.pixel(x, y).unwrap()[0] < 200));
    let right = (136..272).any(|x| (30..70).any(|y| frame.pixel(x, y).unwrap()[0] < 200));
    assert!(left && right);
    assert!(frame.data.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn empty_text_draws_nothing() {
    let face = face();
    let mut frame = FrameRGBA::filled(PixelSize::new(10, 10).unwrap(), Rgba8::WHITE);
    let before = frame.clone();
    let slot = SlotRect {
        x: 0,
        y: 0,
        width: 10,
        height: 10,
    };
    StampRenderer::new()
        .draw(
            &mut frame,
            &slot,
            StampText {
                text: "  ",
                face: &face,
                size_px: 16.0,
                color: Rgba8::BLACK,
                bold: false,
            },
        )
        .unwrap();
    assert_eq!(frame, before);
}
