use super::*;

#[test]
fn filled_frame_stores_premultiplied_color() {
    let size = PixelSize::new(3, 2).unwrap();
    let f = FrameRGBA::filled(size, Rgba8::new(200, 100, 0, 128));
    assert!(f.premultiplied);
    assert_eq!(f.data.len(), size.rgba8_len());
    assert_eq!(f.pixel(2, 1), Some([100, 50, 0, 128]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn straight_conversion_recovers_opaque_and_transparent() {
    let size = PixelSize::new(1, 1).unwrap();
    let f = FrameRGBA::filled(size, Rgba8::opaque(10, 20, 30));
    assert_eq!(f.pixel_straight(0, 0), Some([10, 20, 30, 255]));

    let t = FrameRGBA::filled(size, Rgba8::TRANSPARENT);
    assert_eq!(t.to_straight_rgba8(), vec![0, 0, 0, 0]);
}

#[test]
fn to_rgba_image_has_frame_dimensions() {
    let f = FrameRGBA::filled(PixelSize::new(4, 5).unwrap(), Rgba8::WHITE);
    let img = f.to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (4, 5));
    assert_eq!(img.get_pixel(3, 4).0, [255, 255, 255, 255]);
}
