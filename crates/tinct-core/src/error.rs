/// Errors produced by the core engine.
///
/// Numeric degeneracies never surface here; only structural problems with
/// the data handed to the engine do.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid pixel buffer: {reason}")]
    InvalidBuffer { reason: String },
    #[error("HSI plane length mismatch: expected {expected}, got {actual}")]
    PlaneMismatch { expected: usize, actual: usize },
    #[error("no image loaded in session")]
    NoImageLoaded,
    #[error("failed to parse presets: {0}")]
    PresetParse(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid_buffer(reason: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
