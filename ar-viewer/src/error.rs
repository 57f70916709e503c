/// Result alias carrying the viewer's [`ArViewerError`].
pub type Result<T> = std::result::Result<T, ArViewerError>;

/// Failures surfaced by the platform bridge and the loading pipeline.
///
/// None of these are fatal: callers log them and leave the viewer in an
/// inert state (scanning forever, or an unplaced scene).
#[derive(Debug, thiserror::Error)]
pub enum ArViewerError {
    #[error("hit-test source request {request_id} was rejected: {reason}")]
    HitTestSourceRejected { request_id: u32, reason: String },

    #[error("viewer manifest `{path}` failed to load: {reason}")]
    ManifestLoad { path: String, reason: String },

    #[error("scene `{path}` failed to load: {reason}")]
    SceneLoad { path: String, reason: String },

    #[error("malformed platform message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("pose matrix contains non-finite values")]
    NonFinitePose,
}
