//! Stream descriptors and inspection summaries.
//!
//! A [`StreamDescriptor`] is snapshotted per demuxed stream when a file
//! is opened and is immutable afterwards. [`MediaSummary`] is the result
//! of a full inspection pass (see [`crate::probe`]).

use ffmpeg_next::{codec, format::Pixel, format::Sample, media};

use crate::rational::RationalTime;

/// Raw metadata for a single demuxed stream.
///
/// Built from the container's codec parameters without instantiating a
/// decoder, so streams with undecodable codecs can still be classified
/// and rejected by policy.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    /// Position of the stream within the container.
    pub index: usize,
    /// The demuxer's codec type for this stream.
    pub medium: media::Type,
    /// Codec identifier.
    pub codec: codec::Id,
    /// Pixel format; populated for video streams only.
    pub pixel_format: Option<Pixel>,
    /// Sample format; populated for audio streams only.
    pub sample_format: Option<Sample>,
    /// Frame width in pixels (zero or negative in malformed files).
    pub width: i32,
    /// Frame height in pixels (zero or negative in malformed files).
    pub height: i32,
    /// Scale factor converting this stream's tick units into seconds.
    pub time_base: RationalTime,
    /// The stream's declared start offset in its own tick units, when
    /// the container declares one.
    pub start_time_ticks: Option<i64>,
}

impl StreamDescriptor {
    /// A video stream descriptor with no start offset.
    pub fn video(
        index: usize,
        codec: codec::Id,
        pixel_format: Pixel,
        width: i32,
        height: i32,
        time_base: RationalTime,
    ) -> Self {
        Self {
            index,
            medium: media::Type::Video,
            codec,
            pixel_format: Some(pixel_format),
            sample_format: None,
            width,
            height,
            time_base,
            start_time_ticks: None,
        }
    }

    /// An audio stream descriptor with no start offset.
    pub fn audio(
        index: usize,
        codec: codec::Id,
        sample_format: Sample,
        time_base: RationalTime,
    ) -> Self {
        Self {
            index,
            medium: media::Type::Audio,
            codec,
            pixel_format: None,
            sample_format: Some(sample_format),
            width: 0,
            height: 0,
            time_base,
            start_time_ticks: None,
        }
    }
}

/// Summary of an accepted media file.
///
/// Produced by [`crate::probe::probe`] after validation and a full
/// packet scan.
#[derive(Debug, Clone)]
#[must_use]
pub struct MediaSummary {
    /// Size of the container file in bytes.
    pub file_size: u64,
    /// Number of demuxed video packets (one per coded frame).
    pub video_frames: u64,
    /// Video width in pixels.
    pub width: i32,
    /// Video height in pixels.
    pub height: i32,
    /// Total presentation duration in seconds, exact.
    pub duration: RationalTime,
}

impl MediaSummary {
    /// The single-line plain-text form:
    /// `<size> <frames> <width> <height> <durationNum> <durationDen>`.
    pub fn stat_line(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.file_size,
            self.video_frames,
            self.width,
            self.height,
            self.duration.numerator(),
            self.duration.denominator(),
        )
    }
}
