//! Error types for the `mediagate` crate.
//!
//! [`MediaGateError`] covers two failure tiers. Policy failures
//! ([`MediaGateError::Rejected`]) carry the specific rule-naming reason
//! and mean "file rejected", not "something broke". Everything else is
//! an infrastructure failure — surfaced to end users as a single
//! generic diagnostic (see [`MediaGateError::diagnostic`]) and fatal to
//! the current operation.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

use crate::rational::RationalTime;

/// The unified error type for all `mediagate` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MediaGateError {
    /// The media file could not be opened.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MediaSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file failed ingestion policy validation. This is the
    /// recoverable-by-design tier: the reason is user-facing wording
    /// produced by [`crate::IngestPolicy`].
    #[error("{reason}")]
    Rejected {
        /// The rule-naming rejection reason.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A packet could not be read from the container.
    #[error("Failed to read packet: {0}")]
    PacketRead(String),

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecode(String),

    /// The packet stream was exhausted before any frame's window
    /// reached the requested timestamp.
    #[error("No frame covers the requested timestamp {target}")]
    FrameNotFound {
        /// The requested timestamp, in seconds.
        target: RationalTime,
    },

    /// The selected frame could not be converted or written as PNG.
    #[error("Failed to encode PNG output: {0}")]
    PngEncode(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate during frame conversion.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),
}

impl MediaGateError {
    /// The single diagnostic line shown to end users.
    ///
    /// Policy rejections keep their specific wording; every
    /// infrastructure failure deliberately collapses to one generic
    /// line so callers cannot fingerprint internals from the output.
    pub fn diagnostic(&self) -> String {
        match self {
            MediaGateError::Rejected { reason } => reason.clone(),
            _ => "Couldn't read file".to_string(),
        }
    }
}

impl From<FfmpegError> for MediaGateError {
    fn from(error: FfmpegError) -> Self {
        MediaGateError::Ffmpeg(error.to_string())
    }
}
