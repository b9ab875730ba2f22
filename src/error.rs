//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the lookaround crate.
///
/// The look controller itself never fails; these cover everything around
/// it (GPU setup, option files, window and surface plumbing).
#[derive(Debug)]
pub enum LookError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// A render surface refused a listener or could not be found.
    Surface(String),
}

impl fmt::Display for LookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for LookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for LookError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for LookError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = LookError::from(std::io::Error::other("disk gone"));
        assert_eq!(err.to_string(), "I/O error: disk gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn message_variants_have_no_source() {
        let err = LookError::Surface("no canvas".into());
        assert_eq!(err.to_string(), "surface error: no canvas");
        assert!(err.source().is_none());
    }
}
