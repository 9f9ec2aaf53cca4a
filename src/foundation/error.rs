/// Convenience result type used across photostrip.
pub type PhotostripResult<T> = Result<T, PhotostripError>;

/// Top-level error taxonomy used by capture, editing and composition APIs.
///
/// A sticker resize below the minimum size is not an error; it is reported as
/// [`crate::ResizeOutcome::Rejected`].
#[derive(thiserror::Error, Debug)]
pub enum PhotostripError {
    /// Camera source unavailable or permission denied. Recoverable by retrying.
    #[error("camera access error: {0}")]
    CameraAccess(String),

    /// Composition attempted with a photo count other than the required one.
    #[error("incomplete session: expected {expected} photos, got {actual}")]
    IncompleteSession {
        /// Required number of stills.
        expected: usize,
        /// Number of stills actually present.
        actual: usize,
    },

    /// A sticker image source failed to resolve. Composition continues without it.
    #[error("sticker resource error for '{source_ref}': {reason}")]
    StickerResource {
        /// The sticker's image source reference.
        source_ref: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// Invalid user-provided input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotostripError {
    /// Build a [`PhotostripError::CameraAccess`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::CameraAccess(msg.into())
    }

    /// Build a [`PhotostripError::IncompleteSession`] value.
    pub fn incomplete(expected: usize, actual: usize) -> Self {
        Self::IncompleteSession { expected, actual }
    }

    /// Build a [`PhotostripError::StickerResource`] value.
    pub fn sticker(source_ref: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StickerResource {
            source_ref: source_ref.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PhotostripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotostripError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the failure only degrades output instead of halting the current operation.
    pub fn is_recoverable_locally(&self) -> bool {
        matches!(self, Self::StickerResource { .. })
    }
}

impl From<serde_json::Error> for PhotostripError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
