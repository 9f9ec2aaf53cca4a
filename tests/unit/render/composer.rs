use std::io::Cursor;

use chrono::NaiveDate;

use super::*;
use crate::editor::state::BackgroundColor;
use crate::filter::color::FilterKind;
use crate::foundation::core::PixelSize;

fn small_layout() -> StripLayout {
    StripLayout {
        photo_width: 8,
        photo_height: 6,
        margin_x: 2,
        margin_top: 2,
        margin_bottom: 2,
        photo_spacing: 1,
        stamp_box_height: 4,
        stamp_advance: 5,
    }
}

fn still(rgb: [u8; 3]) -> CapturedStill {
    let size = PixelSize::new(16, 12).unwrap();
    let px = [rgb[0], rgb[1], rgb[2], 255];
    CapturedStill::from_rgba8(size, px.repeat(size.area())).unwrap()
}

fn editor() -> EditorState {
    EditorState::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
}

fn input(stills: Vec<CapturedStill>, editor: EditorState, stickers: Vec<Sticker>) -> ComposeInput {
    ComposeInput {
        stills,
        editor,
        stickers,
        required_photos: 3,
    }
}

fn sticker(id: u64, source: &str, x: f64, y: f64, w: f64, h: f64) -> Sticker {
    Sticker {
        id: StickerId(id),
        source: source.to_string(),
        x,
        y,
        width: w,
        height: h,
    }
}

fn png(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn run(input: &ComposeInput, store: &PreparedStickerStore) -> FinalComposition {
    compose(input, &small_layout(), store, &StampStyle::default(), None).unwrap()
}

#[test]
fn wrong_still_count_is_incomplete_session() {
    let i = input(vec![still([1, 1, 1]), still([2, 2, 2])], editor(), vec![]);
    let err = compose(
        &i,
        &small_layout(),
        &PreparedStickerStore::default(),
        &StampStyle::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PhotostripError::IncompleteSession {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn photos_fill_their_slots_over_background() {
    let mut e = editor();
    e.background = BackgroundColor::Black;
    let i = input(
        vec![still([255, 0, 0]), still([0, 255, 0]), still([0, 0, 255])],
        e,
        vec![],
    );
    let out = run(&i, &PreparedStickerStore::default());
    let f = &out.frame;
    // 2*2 + 8 wide, 2 + 3*6 + 2*1 + 2 tall.
    assert_eq!((f.width, f.height), (12, 24));
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(9, 7), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(5, 8), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(5, 9), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(5, 16), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(11, 16), Some([0, 0, 0, 255]));
}

#[test]
fn filter_applies_to_photos_only() {
    let mut e = editor();
    e.filter = FilterKind::Cold;
    e.background = BackgroundColor::Custom("#FF0000".to_string());
    let i = input(vec![still([255, 0, 0]); 3], e, vec![]);
    let out = run(&i, &PreparedStickerStore::default());
    assert_eq!(out.frame.pixel(4, 4), Some([229, 0, 0, 255]));
    assert_eq!(out.frame.pixel(0, 0), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_background_keeps_margins_clear() {
    let mut e = editor();
    e.background = BackgroundColor::Transparent;
    let i = input(vec![still([9, 9, 9]); 3], e, vec![]);
    let out = run(&i, &PreparedStickerStore::default());
    assert_eq!(out.frame.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(out.frame.pixel(2, 2).unwrap()[3], 255);
}

#[test]
fn stamps_reserve_space_without_font() {
    let mut e = editor();
    e.show_date = true;
    e.show_watermark = true;
    let i = input(vec![still([9, 9, 9]); 3], e, vec![]);
    let out = run(&i, &PreparedStickerStore::default());
    assert_eq!(out.frame.height, 24 + 10);
    assert!(out.skipped.is_empty());
    assert_eq!(
        out.skipped_stamps,
        vec![StampKind::Date, StampKind::Watermark]
    );
}

#[test]
fn stamps_draw_with_font_and_report_nothing_skipped() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts");
    let font = StampFont::load(&dir.join("DejaVuSans.ttf"), None).unwrap();
    let mut e = editor();
    e.background = BackgroundColor::White;
    e.show_watermark = true;
    let i = input(vec![still([255, 255, 255]); 3], e, vec![]);
    let layout = StripLayout {
        photo_width: 120,
        stamp_box_height: 30,
        stamp_advance: 34,
        ..small_layout()
    };
    let out = compose(
        &i,
        &layout,
        &PreparedStickerStore::default(),
        &StampStyle::default(),
        Some(&font),
    )
    .unwrap();
    assert!(out.skipped_stamps.is_empty());

    let slot = layout.stamp_slots(3, &i.editor)[0].rect;
    let inked = (slot.y..slot.y + slot.height)
        .flat_map(|y| (0..out.frame.width).map(move |x| (x, y)))
        .filter(|&(x, y)| out.frame.pixel(x, y).unwrap()[0] < 160)
        .count();
    assert!(inked > 0);
}

#[test]
fn no_stamps_enabled_reports_nothing_skipped() {
    let i = input(vec![still([9, 9, 9]); 3], editor(), vec![]);
    let out = run(&i, &PreparedStickerStore::default());
    assert!(out.skipped_stamps.is_empty());
}

#[test]
fn stickers_draw_in_list_order_and_truncate() {
    let mut store = PreparedStickerStore::default();
    store.insert_bytes("red", &png([255, 0, 0, 255])).unwrap();
    store.insert_bytes("blue", &png([0, 0, 255, 255])).unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![
            sticker(1, "red", 1.9, 1.9, 4.7, 4.2),
            sticker(2, "blue", 3.0, 3.0, 2.0, 2.0),
        ],
    );
    let out = run(&i, &store);
    assert!(out.skipped.is_empty());
    let f = &out.frame;
    assert_eq!(f.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(4, 4), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(4, 1), Some([255, 0, 0, 255]));
    // 1 + 4 = 5 is the first column past the red sticker.
    assert_eq!(f.pixel(5, 1), Some([255, 255, 255, 255]));
}

#[test]
fn stickers_may_hang_off_the_canvas() {
    let mut store = PreparedStickerStore::default();
    store.insert_bytes("red", &png([255, 0, 0, 255])).unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![
            sticker(1, "red", -2.0, -2.0, 3.0, 3.0),
            sticker(2, "red", 500.0, 500.0, 60.0, 60.0),
        ],
    );
    let out = run(&i, &store);
    assert!(out.skipped.is_empty());
    assert_eq!(out.frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(out.frame.pixel(1, 1), Some([255, 255, 255, 255]));
}

#[test]
fn unprepared_sticker_is_skipped_and_rest_renders() {
    let mut store = PreparedStickerStore::default();
    store.insert_bytes("red", &png([255, 0, 0, 255])).unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![
            sticker(1, "missing", 0.0, 0.0, 4.0, 4.0),
            sticker(2, "red", 6.0, 6.0, 2.0, 2.0),
        ],
    );
    let out = run(&i, &store);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].id, StickerId(1));
    assert!(matches!(
        out.skipped[0].error,
        PhotostripError::StickerResource { .. }
    ));
    assert_eq!(out.frame.pixel(6, 6), Some([255, 0, 0, 255]));
    assert_eq!(out.frame.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn sub_pixel_sticker_draws_nothing() {
    let mut store = PreparedStickerStore::default();
    store.insert_bytes("red", &png([255, 0, 0, 255])).unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![sticker(1, "red", 0.0, 0.0, 0.5, 10.0)],
    );
    let out = run(&i, &store);
    assert!(out.skipped.is_empty());
    assert_eq!(out.frame.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn svg_sticker_is_rasterized_at_draw_size() {
    let mut store = PreparedStickerStore::default();
    store
        .insert_bytes(
            "box.svg",
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><rect width="1" height="1" fill="#00ff00"/></svg>"##,
        )
        .unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![sticker(1, "box.svg", 0.0, 0.0, 6.0, 6.0)],
    );
    let out = run(&i, &store);
    assert_eq!(out.frame.pixel(3, 3), Some([0, 255, 0, 255]));
    assert_eq!(out.frame.pixel(6, 6), Some([255, 255, 255, 255]));
}

#[test]
fn oversize_sticker_is_skipped() {
    let mut store = PreparedStickerStore::default();
    store.insert_bytes("red", &png([255, 0, 0, 255])).unwrap();
    let i = input(
        vec![still([255, 255, 255]); 3],
        editor(),
        vec![sticker(1, "red", 0.0, 0.0, 1e9, 1e9)],
    );
    let out = run(&i, &store);
    assert_eq!(out.skipped.len(), 1);
}

#[test]
fn compose_is_pure_over_snapshot() {
    let i = input(vec![still([10, 20, 30]); 3], editor(), vec![]);
    let a = run(&i, &PreparedStickerStore::default());
    let b = run(&i, &PreparedStickerStore::default());
    assert_eq!(a.frame, b.frame);
}
