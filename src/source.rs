//! The demux collaborator.
//!
//! [`MediaSource`] wraps an FFmpeg input context: it opens a file,
//! snapshots one [`StreamDescriptor`] per stream, and exposes the raw
//! packet stream as [`PacketTiming`] values. Descriptors are read from
//! the container's codec parameters without instantiating decoders, so
//! a file carrying an undecodable codec still classifies and can be
//! rejected by policy instead of failing to open.

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    format::{self, Pixel, Sample, context::Input, stream::Stream},
    media,
};
use ffmpeg_sys_next::{AV_NOPTS_VALUE, AVPixelFormat, AVSampleFormat};

use crate::duration::PacketTiming;
use crate::error::MediaGateError;
use crate::metadata::StreamDescriptor;
use crate::rational::RationalTime;

/// An opened media container.
///
/// # Example
///
/// ```no_run
/// use mediagate::{IngestPolicy, MediaSource};
///
/// let source = MediaSource::open("upload.webm")?;
/// let verdict = IngestPolicy::default()
///     .validate_streams(source.streams(), source.container_name());
/// # Ok::<(), mediagate::MediaGateError>(())
/// ```
pub struct MediaSource {
    pub(crate) input: Input,
    streams: Vec<StreamDescriptor>,
    container_name: String,
    path: PathBuf,
}

impl MediaSource {
    /// Open a media file and snapshot its stream metadata.
    ///
    /// Initialises FFmpeg (idempotent) and silences its internal
    /// stderr logging; Rust-side diagnostics go through the `log`
    /// crate instead.
    ///
    /// # Errors
    ///
    /// Returns [`MediaGateError::FileOpen`] when the file cannot be
    /// opened or recognised as a media container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MediaGateError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening media file: {}", path.display());

        ffmpeg_next::init().map_err(|error| MediaGateError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input = format::input(&path).map_err(|error| MediaGateError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;

        let container_name = input.format().name().to_string();
        let streams: Vec<StreamDescriptor> =
            input.streams().map(|stream| describe(&stream)).collect();

        log::debug!(
            "Opened {} container with {} stream(s)",
            container_name,
            streams.len()
        );

        Ok(Self {
            input,
            streams,
            container_name,
            path,
        })
    }

    /// The per-stream metadata snapshot, in container order.
    pub fn streams(&self) -> &[StreamDescriptor] {
        &self.streams
    }

    /// The demuxer name reported by FFmpeg, e.g. `"matroska,webm"`.
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the first video stream, if any.
    pub fn video_stream_index(&self) -> Option<usize> {
        self.streams
            .iter()
            .find(|stream| stream.medium == media::Type::Video)
            .map(|stream| stream.index)
    }

    /// Best-effort seek to the beginning of the file. Containers that
    /// cannot seek leave the read position unchanged; no error is
    /// surfaced.
    pub fn seek_to_start(&mut self) {
        if let Err(error) = self.input.seek(0, ..0) {
            log::debug!("Best-effort seek to start failed: {error}");
        }
    }

    /// Iterate the timing fields of every remaining packet without
    /// decoding.
    pub fn packet_timings(&mut self) -> PacketTimings<'_> {
        PacketTimings {
            input: &mut self.input,
            done: false,
        }
    }
}

/// A lazy iterator over demuxed packet timings.
///
/// End-of-stream terminates the iterator; read failures yield one
/// `Err` and then terminate.
pub struct PacketTimings<'a> {
    input: &'a mut Input,
    done: bool,
}

impl Iterator for PacketTimings<'_> {
    type Item = Result<PacketTiming, MediaGateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut packet = Packet::empty();
        match packet.read(self.input) {
            Ok(()) => Some(Ok(PacketTiming {
                stream_index: packet.stream() as usize,
                pts: packet.pts(),
                duration: packet.duration(),
            })),
            Err(FfmpegError::Eof) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(MediaGateError::PacketRead(error.to_string())))
            }
        }
    }
}

/// Snapshot one stream's codec parameters into a descriptor.
fn describe(stream: &Stream) -> StreamDescriptor {
    let parameters = stream.parameters();
    let medium = parameters.medium();
    // Width, height, and format are not exposed through the safe
    // Parameters API; read the codec parameter struct directly.
    let raw = unsafe { *parameters.as_ptr() };

    let pixel_format =
        (medium == media::Type::Video).then(|| pixel_from_raw(raw.format));
    let sample_format =
        (medium == media::Type::Audio).then(|| sample_from_raw(raw.format));

    let start_time = stream.start_time();

    StreamDescriptor {
        index: stream.index(),
        medium,
        codec: parameters.id(),
        pixel_format,
        sample_format,
        width: raw.width,
        height: raw.height,
        time_base: time_base_of(stream.time_base()),
        start_time_ticks: (start_time != AV_NOPTS_VALUE).then_some(start_time),
    }
}

/// Convert an FFmpeg time base, falling back to the conventional
/// 1/90000 for streams that declare none.
pub(crate) fn time_base_of(time_base: Rational) -> RationalTime {
    if time_base.denominator() > 0 {
        RationalTime::new(time_base.numerator() as i64, time_base.denominator() as i64)
    } else {
        RationalTime::new(1, 90_000)
    }
}

/// Map a raw codec-parameter format value to a pixel format.
///
/// The value originates from libavformat; anything outside the enum
/// range maps to [`Pixel::None`] so malformed files cannot produce an
/// invalid enum.
fn pixel_from_raw(value: i32) -> Pixel {
    if value < 0 || value >= AVPixelFormat::AV_PIX_FMT_NB as i32 {
        return Pixel::None;
    }
    Pixel::from(unsafe { std::mem::transmute::<i32, AVPixelFormat>(value) })
}

/// Map a raw codec-parameter format value to a sample format.
fn sample_from_raw(value: i32) -> Sample {
    if value < 0 || value >= AVSampleFormat::AV_SAMPLE_FMT_NB as i32 {
        return Sample::None;
    }
    Sample::from(unsafe { std::mem::transmute::<i32, AVSampleFormat>(value) })
}
