use crate::capture::frame::CapturedStill;
use crate::editor::state::{EditorAction, EditorState};
use crate::editor::stickers::{StickerDefaults, StickerModel};
use crate::foundation::error::{PhotostripError, PhotostripResult};
use crate::render::composer::ComposeInput;

/// Photobooth screens, in navigation order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Start,
    Preview,
    Edit,
    Download,
}

/// State for one run of the booth: captured stills, edits, and stickers.
#[derive(Clone, Debug)]
pub struct BoothSession {
    stage: Stage,
    required_photos: usize,
    stills: Vec<CapturedStill>,
    editor: EditorState,
    stickers: StickerModel,
}

impl BoothSession {
    pub fn new(required_photos: usize, sticker_defaults: StickerDefaults) -> PhotostripResult<Self> {
        if required_photos == 0 {
            return Err(PhotostripError::validation("required_photos must be >= 1"));
        }
        Ok(Self {
            stage: Stage::Start,
            required_photos,
            stills: Vec::with_capacity(required_photos),
            editor: EditorState::default(),
            stickers: StickerModel::new(sticker_defaults),
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn required_photos(&self) -> usize {
        self.required_photos
    }

    pub fn stills(&self) -> &[CapturedStill] {
        &self.stills
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn stickers(&self) -> &StickerModel {
        &self.stickers
    }

    pub fn stickers_mut(&mut self) -> &mut StickerModel {
        &mut self.stickers
    }

    /// Show the live preview. Allowed from every stage except `Preview` itself.
    pub fn start_camera(&mut self) -> PhotostripResult<()> {
        if self.stage == Stage::Preview {
            return Err(PhotostripError::validation("camera preview already active"));
        }
        self.stage = Stage::Preview;
        Ok(())
    }

    /// Start a fresh capture run: clears stills and resets edits.
    pub fn begin_capture(&mut self) -> PhotostripResult<()> {
        if self.stage != Stage::Preview {
            return Err(PhotostripError::validation(format!(
                "capture requires the preview stage, current stage is {:?}",
                self.stage
            )));
        }
        self.reset_contents();
        Ok(())
    }

    /// Append a still. Returns how many stills are held now.
    ///
    /// Reaching the required count moves the session to `Edit`.
    pub fn record_still(&mut self, still: CapturedStill) -> PhotostripResult<usize> {
        if self.stage != Stage::Preview {
            return Err(PhotostripError::validation(format!(
                "stills can only be recorded during preview, current stage is {:?}",
                self.stage
            )));
        }
        if self.stills.len() >= self.required_photos {
            return Err(PhotostripError::validation(format!(
                "session already holds {} photos",
                self.required_photos
            )));
        }
        self.stills.push(still);
        let n = self.stills.len();
        tracing::debug!(taken = n, required = self.required_photos, "still recorded");
        if n == self.required_photos {
            self.stage = Stage::Edit;
        }
        Ok(n)
    }

    pub fn apply(&mut self, action: EditorAction) {
        self.editor = std::mem::take(&mut self.editor).apply(action);
    }

    /// Owned copy of everything the composer needs.
    pub fn snapshot(&self) -> PhotostripResult<ComposeInput> {
        if self.stills.len() != self.required_photos {
            return Err(PhotostripError::incomplete(
                self.required_photos,
                self.stills.len(),
            ));
        }
        Ok(ComposeInput {
            stills: self.stills.clone(),
            editor: self.editor.clone(),
            stickers: self.stickers.snapshot(),
            required_photos: self.required_photos,
        })
    }

    /// Edit -> Download. Needs the full set of stills.
    pub fn proceed_to_export(&mut self) -> PhotostripResult<()> {
        if self.stage != Stage::Edit {
            return Err(PhotostripError::validation(format!(
                "export requires the edit stage, current stage is {:?}",
                self.stage
            )));
        }
        if self.stills.len() != self.required_photos {
            return Err(PhotostripError::incomplete(
                self.required_photos,
                self.stills.len(),
            ));
        }
        self.stage = Stage::Download;
        Ok(())
    }

    /// Discard stills and edits and return to the preview.
    pub fn retake(&mut self) {
        self.reset_contents();
        self.stage = Stage::Preview;
    }

    /// Discard everything and return to the start screen.
    pub fn restart(&mut self) {
        self.reset_contents();
        self.stage = Stage::Start;
    }

    fn reset_contents(&mut self) {
        self.stills.clear();
        self.stickers.clear();
        self.editor = EditorState::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
