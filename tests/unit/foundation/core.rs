use super::*;

#[test]
fn pixel_size_rejects_zero_dimensions() {
    assert!(PixelSize::new(0, 10).is_err());
    assert!(PixelSize::new(10, 0).is_err());
    let s = PixelSize::new(720, 540).unwrap();
    assert_eq!(s.rgba8_len(), 720 * 540 * 4);
    assert!((s.aspect() - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(
        Rgba8::parse_hex("#FEF6E4").unwrap(),
        Rgba8::opaque(0xfe, 0xf6, 0xe4)
    );
    assert_eq!(
        Rgba8::parse_hex("ffffff00").unwrap(),
        Rgba8::new(255, 255, 255, 0)
    );
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}

#[test]
fn hex_formatting_matches_parse() {
    let c = Rgba8::opaque(0xd3, 0xe4, 0xfd);
    assert_eq!(c.to_hex(), "#D3E4FD");
    assert_eq!(Rgba8::parse_hex(&c.to_hex()).unwrap(), c);
    assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
}

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
    assert_eq!(
        Rgba8::new(100, 50, 200, 128).to_premul(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}
