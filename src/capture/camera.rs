//! Camera collaborator seam.
//!
//! The core never controls a real camera. It only needs a readable current frame, and it must
//! release whatever it opened on every exit path. [`CameraSession`] owns that discipline.

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::capture::frame::{CaptureSettings, CapturedStill, OwnedFrame, capture};
use crate::foundation::error::{PhotostripError, PhotostripResult};

/// A live frame provider (webcam, replayed files, test doubles).
pub trait FrameSource {
    /// Acquire the device. Failure is surfaced as [`PhotostripError::CameraAccess`].
    fn open(&mut self) -> PhotostripResult<()>;

    /// Snapshot the frame currently on screen.
    fn current_frame(&mut self) -> PhotostripResult<OwnedFrame>;

    /// Stop all tracks. Must be safe to call on a source that never opened.
    fn release(&mut self);
}

/// Scoped camera acquisition. The source is released when the session is dropped.
pub struct CameraSession<'a, S: FrameSource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: FrameSource + ?Sized> CameraSession<'a, S> {
    pub fn open(source: &'a mut S) -> PhotostripResult<Self> {
        if let Err(err) = source.open() {
            source.release();
            return Err(match err {
                PhotostripError::CameraAccess(_) => err,
                other => PhotostripError::camera(other.to_string()),
            });
        }
        tracing::debug!("camera session opened");
        Ok(Self { source })
    }

    pub fn snapshot(&mut self) -> PhotostripResult<OwnedFrame> {
        self.source.current_frame()
    }

    /// Snapshot the current frame and run it through [`capture`].
    pub fn capture_still(&mut self, settings: &CaptureSettings) -> PhotostripResult<CapturedStill> {
        let frame = self.snapshot()?;
        capture(
            &frame.as_source()?,
            settings.target()?,
            settings.mirrored,
            settings.fit,
        )
    }
}

impl<S: FrameSource + ?Sized> Drop for CameraSession<'_, S> {
    fn drop(&mut self) {
        self.source.release();
        tracing::debug!("camera session released");
    }
}

/// Open `source`, take `count` stills in order, and release the source whatever happens.
#[tracing::instrument(skip(source, settings))]
pub fn capture_sequence<S: FrameSource + ?Sized>(
    source: &mut S,
    settings: &CaptureSettings,
    count: usize,
) -> PhotostripResult<Vec<CapturedStill>> {
    let mut session = CameraSession::open(source)?;
    let mut stills = Vec::with_capacity(count);
    for shot in 0..count {
        stills.push(session.capture_still(settings)?);
        tracing::debug!(shot = shot + 1, count, "still captured");
    }
    Ok(stills)
}

/// A [`FrameSource`] that replays decoded images, one per snapshot.
///
/// After the last image it keeps returning the last one, like a frozen feed.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    frames: Vec<RgbaImage>,
    next: usize,
    opened: bool,
}

impl ReplaySource {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames,
            next: 0,
            opened: false,
        }
    }

    /// Decode each path into a frame.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> PhotostripResult<Self> {
        let mut frames = Vec::with_capacity(paths.len());
        for p in paths {
            let p = p.as_ref();
            let img = image::open(p)
                .with_context(|| format!("decode camera frame '{}'", p.display()))?;
            frames.push(img.to_rgba8());
        }
        Ok(Self::new(frames))
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }
}

impl FrameSource for ReplaySource {
    fn open(&mut self) -> PhotostripResult<()> {
        if self.frames.is_empty() {
            return Err(PhotostripError::camera("no frames available"));
        }
        self.opened = true;
        self.next = 0;
        Ok(())
    }

    fn current_frame(&mut self) -> PhotostripResult<OwnedFrame> {
        if !self.opened {
            return Err(PhotostripError::camera("camera is not started"));
        }
        let idx = self.next.min(self.frames.len() - 1);
        self.next = self.next.saturating_add(1);
        Ok(OwnedFrame::from(self.frames[idx].clone()))
    }

    fn release(&mut self) {
        self.opened = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
