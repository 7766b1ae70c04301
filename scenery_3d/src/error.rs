//! Error types for the Scenery3D framework
//!
//! Most invalid inputs are recovered locally (unknown names on unregister are
//! no-ops, messages to unknown recipients are queued, out-of-viewport picks
//! return no hits). The variants below are the cases surfaced to callers.

use std::fmt;

/// Result type for Scenery3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Scenery3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No scene object is registered under this name
    UnknownObject(String),

    /// A coordinate transform or pick was requested with no active camera
    NoActiveCamera,

    /// A raster coordinate lies outside the viewport
    OutOfViewport {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    /// The named object is registered but cannot act as a camera
    NotACamera(String),

    /// Mesh data handed to the pick geometry is malformed
    InvalidGeometry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownObject(name) => write!(f, "Unknown scene object: {}", name),
            Error::NoActiveCamera => write!(f, "No active camera"),
            Error::OutOfViewport { x, y, width, height } => write!(
                f,
                "Raster coordinate ({}, {}) is outside the {}x{} viewport",
                x, y, width, height
            ),
            Error::NotACamera(name) => write!(f, "Scene object is not a camera: {}", name),
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`], logging it at ERROR severity with file:line.
///
/// ```ignore
/// return Err(engine_err!("scenery3d::SceneManager", Error::NoActiveCamera));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $error:expr) => {{
        let error: $crate::scenery3d::Error = $error;
        $crate::engine_error!($source, "{}", error);
        error
    }};
}

/// Log an [`Error`] and return it from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $error:expr) => {
        return Err($crate::engine_err!($source, $error))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
