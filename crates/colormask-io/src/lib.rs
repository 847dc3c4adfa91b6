#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// directory scanning utilities.
pub mod dir;

/// Error types for the io module.
pub mod error;

/// high-level image reading functions.
pub mod functional;

/// png encoding and decoding.
pub mod png;

/// webcam capture (V4L2), enabled with the `v4l` feature.
#[cfg(feature = "v4l")]
pub mod webcam;

pub use crate::error::IoError;
