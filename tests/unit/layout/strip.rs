use chrono::NaiveDate;

use super::*;

fn editor(show_date: bool, show_watermark: bool) -> EditorState {
    let mut e = EditorState::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    e.show_date = show_date;
    e.show_watermark = show_watermark;
    e
}

#[test]
fn default_canvas_for_three_photos() {
    let l = StripLayout::default();
    assert_eq!(l.canvas_size(3, 0).unwrap(), PixelSize::new(272, 588).unwrap());
    assert_eq!(l.canvas_size(3, 1).unwrap(), PixelSize::new(272, 636).unwrap());
    assert_eq!(
        l.canvas_size_for(3, &editor(true, true)).unwrap(),
        PixelSize::new(272, 684).unwrap()
    );
}

#[test]
fn zero_photos_is_rejected() {
    assert!(StripLayout::default().canvas_size(0, 0).is_err());
}

#[test]
fn overflow_is_an_error_not_a_panic() {
    let l = StripLayout {
        photo_height: u32::MAX / 2,
        ..StripLayout::default()
    };
    assert!(l.canvas_size(3, 0).is_err());
}

#[test]
fn photo_slots_stack_with_spacing() {
    let slots = StripLayout::default().photo_slots(3);
    let ys: Vec<u32> = slots.iter().map(|s| s.y).collect();
    assert_eq!(ys, vec![16, 204, 392]);
    assert!(slots.iter().all(|s| s.x == 16 && s.width == 240 && s.height == 180));
}

#[test]
fn stamp_slots_follow_photos_in_order() {
    let l = StripLayout::default();
    assert!(l.stamp_slots(3, &editor(false, false)).is_empty());

    let both = l.stamp_slots(3, &editor(true, true));
    assert_eq!(both.len(), 2);
    assert_eq!(both[0].kind, StampKind::Date);
    assert_eq!(both[0].rect.y, 580);
    assert_eq!(both[1].kind, StampKind::Watermark);
    assert_eq!(both[1].rect.y, 628);
    assert_eq!(both[1].rect.center_x(), 136.0);
    assert_eq!(both[1].rect.center_y(), 648.0);

    let only_mark = l.stamp_slots(3, &editor(false, true));
    assert_eq!(only_mark[0].kind, StampKind::Watermark);
    assert_eq!(only_mark[0].rect.y, 580);
}

#[test]
fn validate_rules() {
    assert!(StripLayout::default().validate().is_ok());
    let bad = StripLayout {
        photo_width: 0,
        ..StripLayout::default()
    };
    assert!(bad.validate().is_err());
    let bad = StripLayout {
        stamp_box_height: 60,
        ..StripLayout::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn serde_fills_defaults() {
    let l: StripLayout = serde_json::from_str(r#"{"photo_width": 300}"#).unwrap();
    assert_eq!(l.photo_width, 300);
    assert_eq!(l.photo_height, 180);
}
