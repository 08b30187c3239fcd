//! Error types for folio operations.
//!
//! Rendering itself never fails; only reading sources and serializing
//! results can.

use thiserror::Error;

/// Errors that can occur while loading a source or writing results.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(any(feature = "cli", feature = "wasm"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
