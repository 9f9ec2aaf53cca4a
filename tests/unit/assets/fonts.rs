use super::*;

fn test_fonts_db() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts");
    load_fonts_from_dir(&mut db, &dir);
    db
}

#[test]
fn empty_database_has_no_stamp_font() {
    let db = fontdb::Database::new();
    assert!(select_stamp_font(&db).is_none());
}

#[test]
fn load_fonts_from_dir_ignores_missing_dir() {
    let mut db = fontdb::Database::new();
    load_fonts_from_dir(&mut db, Path::new("/definitely/not/here"));
    assert_eq!(db.len(), 0);
}

#[test]
fn generic_families_bind_to_loaded_faces() {
    let mut db = test_fonts_db();
    assert_eq!(db.len(), 2);
    bind_generic_families(&mut db);
    // No serif face is loaded, so serif falls through to the sans list.
    assert_eq!(db.family_name(&fontdb::Family::Serif), "DejaVu Sans");
    assert_eq!(db.family_name(&fontdb::Family::SansSerif), "DejaVu Sans");
}

#[test]
fn stamp_font_picks_regular_and_real_bold() {
    let mut db = test_fonts_db();
    bind_generic_families(&mut db);
    let font = select_stamp_font(&db).unwrap();
    assert_eq!(font.regular.family, "DejaVu Sans");
    let bold = font.bold.as_ref().unwrap();
    assert_ne!(bold.bytes, font.regular.bytes);
    assert!(std::ptr::eq(font.face(true), bold));
}

#[test]
fn stamp_font_without_bold_face_has_none() {
    let mut db = fontdb::Database::new();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    db.load_font_file(&path).unwrap();
    let font = select_stamp_font(&db).unwrap();
    assert!(font.bold.is_none());
}
