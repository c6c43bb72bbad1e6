//! Crate-level error types.

use std::fmt;

use crate::font::FontError;
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the ripplenav crate.
#[derive(Debug)]
pub enum NavError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Font-outline file failed to load or validate.
    Font(FontError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Font(e) => write!(f, "font load error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Font(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for NavError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<FontError> for NavError {
    fn from(e: FontError) -> Self {
        Self::Font(e)
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
