use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Per-pixel color filter applied to every photo of a strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Identity.
    #[default]
    None,
    /// Arithmetic mean of r, g, b written to all three channels.
    BlackAndWhite,
    /// Classic sepia tone matrix.
    Sepia,
    /// Red up 10%, blue down 10%.
    Warm,
    /// Red down 10%, blue up 10%.
    Cold,
    /// Red and blue channels swapped.
    Cool,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::None,
        FilterKind::BlackAndWhite,
        FilterKind::Sepia,
        FilterKind::Warm,
        FilterKind::Cold,
        FilterKind::Cool,
    ];

    /// Stable identifier used in edit requests (`black-and-white`, `sepia`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::BlackAndWhite => "black-and-white",
            FilterKind::Sepia => "sepia",
            FilterKind::Warm => "warm",
            FilterKind::Cold => "cold",
            FilterKind::Cool => "cool",
        }
    }

    pub fn is_identity(self) -> bool {
        self == FilterKind::None
    }

    /// Transform one straight-alpha pixel. Alpha is passed through untouched.
    pub fn map_pixel(self, px: [u8; 4]) -> [u8; 4] {
        let [r8, g8, b8, a] = px;
        let (r, g, b) = (f64::from(r8), f64::from(g8), f64::from(b8));
        match self {
            FilterKind::None => px,
            FilterKind::BlackAndWhite => {
                let avg = channel((r + g + b) / 3.0);
                [avg, avg, avg, a]
            }
            FilterKind::Sepia => [
                channel(r * 0.393 + g * 0.769 + b * 0.189),
                channel(r * 0.349 + g * 0.686 + b * 0.168),
                channel(r * 0.272 + g * 0.534 + b * 0.131),
                a,
            ],
            FilterKind::Warm => [channel(r * 1.1), g8, channel(b * 0.9), a],
            FilterKind::Cold => [channel(r * 0.9), g8, channel(b * 1.1), a],
            FilterKind::Cool => [b8, g8, r8, a],
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = PhotostripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| PhotostripError::validation(format!("unknown filter '{s}'")))
    }
}

// Clamp to the byte range, then truncate toward zero: 255 * 0.9 gives 229, never a rounded 230.
fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Apply `filter` to a straight-alpha RGBA8 buffer.
///
/// [`FilterKind::None`] borrows the input back unchanged; every other filter returns a new
/// buffer. Each output pixel depends only on the same input pixel.
pub fn apply_filter(rgba8: &[u8], filter: FilterKind) -> PhotostripResult<Cow<'_, [u8]>> {
    check_rgba8_len(rgba8.len())?;
    if filter.is_identity() {
        return Ok(Cow::Borrowed(rgba8));
    }
    let mut out = rgba8.to_vec();
    map_pixels(&mut out, filter);
    Ok(Cow::Owned(out))
}

/// In-place variant of [`apply_filter`] for working copies the caller already owns.
pub fn apply_filter_in_place(rgba8: &mut [u8], filter: FilterKind) -> PhotostripResult<()> {
    check_rgba8_len(rgba8.len())?;
    if !filter.is_identity() {
        map_pixels(rgba8, filter);
    }
    Ok(())
}

fn map_pixels(rgba8: &mut [u8], filter: FilterKind) {
    for px in rgba8.chunks_exact_mut(4) {
        let out = filter.map_pixel([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

fn check_rgba8_len(len: usize) -> PhotostripResult<()> {
    if !len.is_multiple_of(4) {
        return Err(PhotostripError::validation(format!(
            "rgba8 buffer length {len} is not a multiple of 4"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filter/color.rs"]
mod tests;
