// ── Error type ───────────────────────────────────────────────────────────────

/// Everything that can go wrong while handling a simplify request.
///
/// All variants are caught at the handler boundary and turned into a
/// `{"status": "error", "message": ...}` envelope with HTTP 200; none of them
/// is allowed to escape as a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum SimplifyError {
    #[error("API Key missing.")]
    MissingApiKey,
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    MalformedOutput(String),
}
