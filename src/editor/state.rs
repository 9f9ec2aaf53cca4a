use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::filter::color::FilterKind;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Strip background: a named swatch, or any other value passed through as a literal color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundColor {
    #[default]
    White,
    Black,
    Cream,
    LightBlue,
    LightGreen,
    LightPink,
    /// No fill: the background stays alpha 0.
    Transparent,
    /// Unrecognized identifier, interpreted as `#RRGGBB` / `#RRGGBBAA`.
    Custom(String),
}

impl BackgroundColor {
    /// Identifier as used by swatch pickers and edit requests.
    pub fn id(&self) -> &str {
        match self {
            BackgroundColor::White => "white",
            BackgroundColor::Black => "black",
            BackgroundColor::Cream => "cream",
            BackgroundColor::LightBlue => "lightblue",
            BackgroundColor::LightGreen => "lightgreen",
            BackgroundColor::LightPink => "lightpink",
            BackgroundColor::Transparent => "transparent",
            BackgroundColor::Custom(s) => s,
        }
    }

    /// The color value the identifier maps to (`#FFFFFF`, `transparent`, or the literal).
    pub fn css_value(&self) -> String {
        match self.swatch() {
            Some(c) => c.to_hex(),
            None => self.id().to_string(),
        }
    }

    fn swatch(&self) -> Option<Rgba8> {
        match self {
            BackgroundColor::White => Some(Rgba8::opaque(0xFF, 0xFF, 0xFF)),
            BackgroundColor::Black => Some(Rgba8::opaque(0x00, 0x00, 0x00)),
            BackgroundColor::Cream => Some(Rgba8::opaque(0xFE, 0xF6, 0xE4)),
            BackgroundColor::LightBlue => Some(Rgba8::opaque(0xD3, 0xE4, 0xFD)),
            BackgroundColor::LightGreen => Some(Rgba8::opaque(0xF2, 0xFC, 0xE2)),
            BackgroundColor::LightPink => Some(Rgba8::opaque(0xFF, 0xDE, 0xE2)),
            BackgroundColor::Transparent | BackgroundColor::Custom(_) => None,
        }
    }

    /// Fill color for the strip canvas.
    ///
    /// An unparsable custom value is ignored in favour of opaque black, the initial fill style of
    /// a fresh canvas.
    pub fn resolve(&self) -> Rgba8 {
        if let Some(c) = self.swatch() {
            return c;
        }
        match self {
            BackgroundColor::Custom(raw) => match Rgba8::parse_hex(raw) {
                Ok(c) => c,
                Err(err) => {
                    tracing::warn!(color = %raw, %err, "unrecognized background color, using black");
                    Rgba8::BLACK
                }
            },
            _ => Rgba8::TRANSPARENT,
        }
    }
}

impl From<String> for BackgroundColor {
    fn from(s: String) -> Self {
        match s.trim() {
            "white" => BackgroundColor::White,
            "black" => BackgroundColor::Black,
            "cream" => BackgroundColor::Cream,
            "lightblue" => BackgroundColor::LightBlue,
            "lightgreen" => BackgroundColor::LightGreen,
            "lightpink" => BackgroundColor::LightPink,
            "transparent" => BackgroundColor::Transparent,
            other => BackgroundColor::Custom(other.to_string()),
        }
    }
}

impl From<&str> for BackgroundColor {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<BackgroundColor> for String {
    fn from(c: BackgroundColor) -> Self {
        c.id().to_string()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Decoration choices for the strip. Lives for one capture session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditorState {
    #[serde(default)]
    pub background: BackgroundColor,
    #[serde(default)]
    pub filter: FilterKind,
    #[serde(default)]
    pub show_date: bool,
    #[serde(default)]
    pub show_watermark: bool,
    #[serde(default = "today")]
    pub date: NaiveDate,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(today())
    }
}

/// A single user edit, as produced by an input adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    SetBackground(BackgroundColor),
    SetFilter(FilterKind),
    SetShowDate(bool),
    SetShowWatermark(bool),
    SetDate(NaiveDate),
}

impl EditorState {
    /// Defaults (white, no filter, no stamps) dated `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            background: BackgroundColor::default(),
            filter: FilterKind::None,
            show_date: false,
            show_watermark: false,
            date,
        }
    }

    /// Transition to the next state.
    #[must_use]
    pub fn apply(self, action: EditorAction) -> Self {
        match action {
            EditorAction::SetBackground(background) => Self { background, ..self },
            EditorAction::SetFilter(filter) => Self { filter, ..self },
            EditorAction::SetShowDate(show_date) => Self { show_date, ..self },
            EditorAction::SetShowWatermark(show_watermark) => Self {
                show_watermark,
                ..self
            },
            EditorAction::SetDate(date) => Self { date, ..self },
        }
    }

    /// Long date text, `"%B %-d, %Y"` by default ("January 5, 2024").
    pub fn date_text(&self, format: &str) -> PhotostripResult<String> {
        let mut out = String::new();
        write!(out, "{}", self.date.format(format))
            .map_err(|_| PhotostripError::validation(format!("invalid date format '{format}'")))?;
        Ok(out)
    }

    /// Number of stamps that reserve space below the photos.
    pub fn stamp_count(&self) -> u32 {
        u32::from(self.show_date) + u32::from(self.show_watermark)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
