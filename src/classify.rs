//! Stream classification and format allowlists.
//!
//! [`classify`] maps a [`StreamDescriptor`] to its [`StreamKind`] and
//! checks the stream's pixel or sample format against the fixed
//! allowlists used by the supported containers. The functions here are
//! pure and never abort — callers decide what an `Unknown` kind or an
//! unaccepted format means.

use std::ffi::CStr;

use ffmpeg_next::{format::Pixel, format::Sample, media};
use ffmpeg_sys_next::{
    AVPixelFormat, AVSampleFormat, av_get_pix_fmt_name, av_get_sample_fmt_name,
};

use crate::metadata::StreamDescriptor;

/// The broad category of a demuxed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    /// Tolerated by validation but otherwise ignored.
    Subtitle,
    /// Anything the ingestion policy has no business accepting.
    Unknown,
}

/// Result of classifying one stream.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub kind: StreamKind,
    /// Whether the stream's pixel/sample format is on the allowlist.
    /// Always `true` for subtitle and unknown streams, where no format
    /// check applies.
    pub format_accepted: bool,
}

/// Classify a stream and check its format against the allowlists.
pub fn classify(stream: &StreamDescriptor) -> Classification {
    match stream.medium {
        media::Type::Video => Classification {
            kind: StreamKind::Video,
            format_accepted: stream
                .pixel_format
                .is_some_and(pixel_format_allowed),
        },
        media::Type::Audio => Classification {
            kind: StreamKind::Audio,
            format_accepted: stream
                .sample_format
                .is_some_and(sample_format_allowed),
        },
        media::Type::Subtitle => Classification {
            kind: StreamKind::Subtitle,
            format_accepted: true,
        },
        _ => Classification {
            kind: StreamKind::Unknown,
            format_accepted: true,
        },
    }
}

/// Whether a pixel format is accepted for ingestion.
///
/// A closed set: the planar/packed YUV layouts (including the JPEG
/// full-range variants) plus the RGB, palette, and gray formats the
/// supported containers produce. Endian-specific members stand in for
/// the native-endian aliases (`RGB32`, `RGB48`, `GRAY10`, …).
pub fn pixel_format_allowed(format: Pixel) -> bool {
    matches!(
        format,
        // Still image formats
        Pixel::YA8
            | Pixel::YA16BE
            | Pixel::YA16LE
            | Pixel::GRAY8
            | Pixel::GRAY10BE
            | Pixel::GRAY10LE
            | Pixel::GRAY12BE
            | Pixel::GRAY12LE
            | Pixel::PAL8
            | Pixel::RGB8
            | Pixel::RGB24
            | Pixel::ARGB
            | Pixel::BGRA
            | Pixel::RGB48BE
            | Pixel::RGB48LE
            | Pixel::RGBA
            | Pixel::YUVJ420P
            | Pixel::YUVJ422P
            | Pixel::YUVJ444P
            | Pixel::YUVJ440P
            // Video frame formats
            | Pixel::YUV420P
            | Pixel::YUV420P10LE
            | Pixel::YUV422P
            | Pixel::YUV422P10LE
            | Pixel::YUV444P
            | Pixel::YUV440P
            | Pixel::YUV444P10LE
            | Pixel::YUV420P12LE
            | Pixel::YUV422P12LE
            | Pixel::YUV444P12LE
    )
}

/// Whether an audio sample format is accepted for ingestion: signed
/// 16/32-bit integer or 32-bit float, packed or planar.
pub fn sample_format_allowed(format: Sample) -> bool {
    matches!(
        format,
        Sample::I16(_) | Sample::I32(_) | Sample::F32(_)
    )
}

/// FFmpeg's name for a pixel format, for diagnostics (e.g. `"nv12"`).
pub(crate) fn pixel_format_name(format: Pixel) -> String {
    let name = unsafe { av_get_pix_fmt_name(AVPixelFormat::from(format)) };
    if name.is_null() {
        format!("{format:?}")
    } else {
        unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned()
    }
}

/// FFmpeg's name for a sample format, for diagnostics (e.g. `"fltp"`).
pub(crate) fn sample_format_name(format: Sample) -> String {
    let name = unsafe { av_get_sample_fmt_name(AVSampleFormat::from(format)) };
    if name.is_null() {
        format!("{format:?}")
    } else {
        unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned()
    }
}
