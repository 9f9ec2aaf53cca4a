use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "photostrip_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

const SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn sticker_sources_are_root_relative() {
    assert_eq!(
        resolve_sticker_source("/stickers/star.png").unwrap(),
        "stickers/star.png"
    );
    assert_eq!(resolve_sticker_source("star.png").unwrap(), "star.png");
    assert!(resolve_sticker_source("https://example.com/a.png").is_err());
    assert!(resolve_sticker_source("data:image/png;base64,AAAA").is_err());
    assert!(resolve_sticker_source("/stickers/../../etc/passwd").is_err());
}

#[test]
fn prepare_loads_raster_and_svg_and_records_failures() {
    let tmp = temp_dir("store_prepare");
    std::fs::create_dir_all(tmp.join("stickers")).unwrap();
    std::fs::write(tmp.join("stickers/dot.png"), png_bytes([1, 2, 3, 255])).unwrap();
    std::fs::write(tmp.join("stickers/box.svg"), SVG).unwrap();
    std::fs::write(tmp.join("stickers/broken.png"), b"nope").unwrap();

    let store = PreparedStickerStore::prepare(
        [
            "/stickers/dot.png",
            "/stickers/box.svg",
            "/stickers/broken.png",
            "/stickers/missing.png",
            "/stickers/dot.png",
        ],
        &tmp,
    );

    assert_eq!(store.len(), 2);
    assert!(matches!(
        store.get("/stickers/dot.png").unwrap(),
        PreparedSticker::Image(PreparedImage { width: 1, height: 1, .. })
    ));
    assert!(matches!(
        store.get("/stickers/box.svg").unwrap(),
        PreparedSticker::Svg(_)
    ));

    let failed: Vec<&str> = store.failures().map(|(s, _)| s).collect();
    assert_eq!(failed, vec!["/stickers/broken.png", "/stickers/missing.png"]);

    let err = store.get("/stickers/missing.png").unwrap_err();
    assert!(err.is_recoverable_locally());
    assert!(matches!(
        err,
        PhotostripError::StickerResource { ref source_ref, .. } if source_ref == "/stickers/missing.png"
    ));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn unknown_source_is_a_sticker_error() {
    let store = PreparedStickerStore::new(".");
    let err = store.get("/stickers/never.png").unwrap_err();
    assert!(err.to_string().contains("image not prepared"));
}

#[test]
fn insert_bytes_sniffs_format_and_clears_failures() {
    let mut store = PreparedStickerStore::prepare(["upload-1"], "/nonexistent-root");
    assert_eq!(store.failures().count(), 1);

    store.insert_bytes("upload-1", SVG).unwrap();
    assert!(matches!(store.get("upload-1").unwrap(), PreparedSticker::Svg(_)));
    assert_eq!(store.failures().count(), 0);

    store.insert_bytes("upload-2", &png_bytes([9, 9, 9, 255])).unwrap();
    assert!(matches!(
        store.get("upload-2").unwrap(),
        PreparedSticker::Image(_)
    ));

    let err = store.insert_bytes("upload-3", b"garbage").unwrap_err();
    assert!(matches!(err, PhotostripError::StickerResource { .. }));
}
