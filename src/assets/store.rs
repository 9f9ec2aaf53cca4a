use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::assets::decode as assets_decode;
use crate::foundation::error::{PhotostripError, PhotostripResult};

#[derive(Clone, Debug)]
/// Raster sticker in premultiplied RGBA8 form.
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Vector sticker, rasterized at draw size.
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

#[derive(Clone, Debug)]
pub enum PreparedSticker {
    Image(PreparedImage),
    Svg(PreparedSvg),
}

/// Sticker images resolved before composition.
///
/// All file IO and decoding happens here so that composing a strip stays IO-free. A source that
/// could not be prepared is remembered together with the reason and reported as a
/// [`PhotostripError::StickerResource`] when the composer asks for it.
#[derive(Clone, Debug, Default)]
pub struct PreparedStickerStore {
    root: PathBuf,
    by_source: HashMap<String, PreparedSticker>,
    failures: BTreeMap<String, String>,
}

impl PreparedStickerStore {
    /// Empty store resolving relative sources against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load every distinct source under `root`. Failures are recorded, never returned.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn prepare<'a>(
        sources: impl IntoIterator<Item = &'a str>,
        root: impl AsRef<Path>,
    ) -> Self {
        let mut out = Self::new(root.as_ref());
        for source in sources {
            if out.contains(source) || out.failures.contains_key(source) {
                continue;
            }
            if let Err(err) = out.load(source) {
                tracing::warn!(source, %err, "sticker not prepared");
                out.failures.insert(source.to_string(), err.to_string());
            }
        }
        out
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and decode one source from disk, replacing any earlier entry.
    pub fn load(&mut self, source: &str) -> PhotostripResult<()> {
        let norm = resolve_sticker_source(source)?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read sticker bytes from '{}'", path.display()))?;
        let resources_dir = path.parent().map(Path::to_path_buf);
        let prepared = decode_sticker(&norm, &bytes, resources_dir.as_deref())?;
        self.failures.remove(source);
        self.by_source.insert(source.to_string(), prepared);
        Ok(())
    }

    /// Register already-fetched bytes under `source` (for uploads and tests).
    pub fn insert_bytes(&mut self, source: &str, bytes: &[u8]) -> PhotostripResult<()> {
        let prepared = decode_sticker(source, bytes, None)
            .map_err(|e| PhotostripError::sticker(source, e.to_string()))?;
        self.failures.remove(source);
        self.by_source.insert(source.to_string(), prepared);
        Ok(())
    }

    pub fn insert(&mut self, source: impl Into<String>, prepared: PreparedSticker) {
        let source = source.into();
        self.failures.remove(&source);
        self.by_source.insert(source, prepared);
    }

    pub fn contains(&self, source: &str) -> bool {
        self.by_source.contains_key(source)
    }

    /// Look up a prepared sticker.
    pub fn get(&self, source: &str) -> PhotostripResult<&PreparedSticker> {
        if let Some(p) = self.by_source.get(source) {
            return Ok(p);
        }
        let reason = self
            .failures
            .get(source)
            .map(String::as_str)
            .unwrap_or("image not prepared");
        Err(PhotostripError::sticker(source, reason))
    }

    /// Sources that failed to prepare, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.failures.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

fn decode_sticker(
    name: &str,
    bytes: &[u8],
    resources_dir: Option<&Path>,
) -> PhotostripResult<PreparedSticker> {
    let is_svg = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
        || assets_decode::looks_like_svg(bytes);
    if is_svg {
        Ok(PreparedSticker::Svg(assets_decode::parse_svg(
            bytes,
            resources_dir,
        )?))
    } else {
        Ok(PreparedSticker::Image(assets_decode::decode_image(bytes)?))
    }
}

/// Map a sticker source to a path below the asset root.
///
/// Sources are site paths such as `/stickers/star.png`; the leading `/` denotes the asset root.
/// Remote URLs are rejected.
pub fn resolve_sticker_source(source: &str) -> PhotostripResult<String> {
    if source.contains("://") || source.starts_with("data:") {
        return Err(PhotostripError::validation(format!(
            "sticker source '{source}' is not a local path"
        )));
    }
    normalize_rel_path(source.trim_start_matches(['/', '\\']))
}

/// Normalize and validate a root-relative asset path.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths and parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PhotostripResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PhotostripError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PhotostripError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PhotostripError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PhotostripError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
