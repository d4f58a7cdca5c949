use thiserror::Error;

/// Fatal rendering failures. Everything else (missing logo, missing fonts,
/// malformed numeric fields) degrades to a fallback and never reaches here.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to initialize drawing surface: {0}")]
    Canvas(String),

    #[error("failed to finalize document: {0}")]
    Finalize(String),
}
