use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::assets::text::{FontFace, StampFont};

/// Families tried for stamp text when no font file is configured, serif first.
const STAMP_FAMILIES: &[fontdb::Family<'static>] = &[
    fontdb::Family::Name("Calistoga"),
    fontdb::Family::Serif,
    fontdb::Family::SansSerif,
];

const SERIF_FALLBACKS: &[&str] = &["DejaVu Serif", "Liberation Serif", "Noto Serif"];
const SANS_FALLBACKS: &[&str] = &["DejaVu Sans", "Liberation Sans", "Noto Sans"];

/// System fonts plus any TTF/OTF/TTC files found in `dirs` (and their `fonts/` subdirectories).
///
/// The generic `serif` and `sans-serif` families are bound to families that are actually loaded.
pub fn build_fontdb(dirs: &[&Path]) -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    for dir in dirs {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }
    bind_generic_families(&mut db);
    tracing::debug!(faces = db.len(), "font database loaded");
    Arc::new(db)
}

/// Point `serif` and `sans-serif` at loaded families when their defaults are missing.
pub fn bind_generic_families(db: &mut fontdb::Database) {
    let serif = db.family_name(&fontdb::Family::Serif).to_string();
    let sans = db.family_name(&fontdb::Family::SansSerif).to_string();
    let serif = first_present(db, &serif, SERIF_FALLBACKS, SANS_FALLBACKS);
    let sans = first_present(db, &sans, SANS_FALLBACKS, SERIF_FALLBACKS);
    if let Some(name) = serif {
        db.set_serif_family(name);
    }
    if let Some(name) = sans {
        db.set_sans_serif_family(name);
    }
}

fn first_present(
    db: &fontdb::Database,
    current: &str,
    preferred: &[&str],
    secondary: &[&str],
) -> Option<String> {
    std::iter::once(current)
        .chain(preferred.iter().copied())
        .chain(secondary.iter().copied())
        .find(|name| has_family(db, name))
        .map(str::to_string)
        .or_else(|| {
            db.faces()
                .find_map(|f| f.families.first())
                .map(|(name, _)| name.clone())
        })
}

fn has_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|f| f.families.iter().any(|(n, _)| n == name))
}

/// Load every font file directly inside `dir`. Unreadable files are ignored.
pub fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(error) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), %error, "font file skipped");
        }
    }
}

/// Pick stamp faces from `db`: the first available family of a serif-first list, else any face.
///
/// The bold face is only returned when the chosen family has a real bold weight. `None` when the
/// database holds no usable face at all.
pub fn select_stamp_font(db: &fontdb::Database) -> Option<StampFont> {
    let regular_id = db
        .query(&fontdb::Query {
            families: STAMP_FAMILIES,
            weight: fontdb::Weight::NORMAL,
            ..Default::default()
        })
        .filter(|id| db.face(*id).is_some_and(|f| f.index == 0))
        .or_else(|| db.faces().find(|f| f.index == 0).map(|f| f.id))?;
    let regular = face_from_db(db, regular_id)?;

    let family = db.face(regular_id)?.families.first()?.0.clone();
    let bold = db
        .query(&fontdb::Query {
            families: &[fontdb::Family::Name(&family)],
            weight: fontdb::Weight::BOLD,
            ..Default::default()
        })
        .filter(|id| *id != regular_id)
        .filter(|id| {
            db.face(*id)
                .is_some_and(|f| f.index == 0 && f.weight.0 >= 600)
        })
        .and_then(|id| face_from_db(db, id));

    tracing::debug!(
        family = %regular.family,
        bold = bold.is_some(),
        "stamp font resolved from font database"
    );
    Some(StampFont::new(regular, bold))
}

fn face_from_db(db: &fontdb::Database, id: fontdb::ID) -> Option<FontFace> {
    let bytes = db.with_face_data(id, |data, _| data.to_vec())?;
    FontFace::from_bytes(bytes).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
