//! Thumbnail frame selection and rendering.
//!
//! The `thumb` pipeline: validate the container against the ingestion
//! policy, then decode the lone video stream sequentially until a frame
//! window qualifies for the requested timestamp (see [`crate::select`]),
//! scale that one frame to RGBA, and hand it to the PNG writer. Audio
//! and subtitle packets are skipped without decoding. There is no
//! seeking ahead of the target: packets are pulled strictly in order.

use std::path::Path;

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use ffmpeg_sys_next::EAGAIN;

use crate::error::MediaGateError;
use crate::png;
use crate::policy::IngestPolicy;
use crate::rational::RationalTime;
use crate::select::FrameWindow;
use crate::source::MediaSource;

/// Render a thumbnail for the frame covering `target` seconds.
///
/// Validates the file against `policy`, selects the first frame whose
/// window qualifies for `target`, and writes it to `output` as a PNG.
///
/// # Errors
///
/// [`MediaGateError::Rejected`] when the file fails policy validation,
/// [`MediaGateError::FrameNotFound`] when the stream ends before any
/// frame qualifies, or an infrastructure error from opening, reading,
/// decoding, or encoding.
///
/// # Example
///
/// ```no_run
/// use mediagate::{IngestPolicy, RationalTime, render_thumbnail};
///
/// let target = RationalTime::approximate(12.5, i32::MAX as i64).unwrap();
/// render_thumbnail("upload.webm", target, "thumb.png", &IngestPolicy::default())?;
/// # Ok::<(), mediagate::MediaGateError>(())
/// ```
pub fn render_thumbnail<P, Q>(
    input: P,
    target: RationalTime,
    output: Q,
    policy: &IngestPolicy,
) -> Result<(), MediaGateError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut source = MediaSource::open(input)?;
    policy
        .validate_streams(source.streams(), source.container_name())
        .into_result()?;

    let frame = decode_first_qualifying(&mut source, target)?;
    png::write_rgba_frame(&frame, output.as_ref())
}

/// Decode video frames in presentation order and return the first one
/// whose window qualifies for `target`, scaled to RGBA.
fn decode_first_qualifying(
    source: &mut MediaSource,
    target: RationalTime,
) -> Result<VideoFrame, MediaGateError> {
    let video_index = source
        .video_stream_index()
        .ok_or(MediaGateError::NoVideoStream)?;
    let time_base = source
        .streams()
        .iter()
        .find(|stream| stream.index == video_index)
        .map(|stream| stream.time_base)
        .ok_or(MediaGateError::NoVideoStream)?;

    let parameters = source
        .input
        .stream(video_index)
        .ok_or(MediaGateError::NoVideoStream)?
        .parameters();
    let mut decoder = CodecContext::from_parameters(parameters)?
        .decoder()
        .video()
        .map_err(|error| MediaGateError::VideoDecode(error.to_string()))?;

    let mut scaler = ScalingContext::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        Pixel::RGBA,
        decoder.width(),
        decoder.height(),
        ScalingFlags::BILINEAR,
    )?;

    let mut decoded = VideoFrame::empty();

    loop {
        let mut packet = Packet::empty();
        match packet.read(&mut source.input) {
            Ok(()) => {}
            Err(FfmpegError::Eof) => break,
            Err(error) => return Err(MediaGateError::PacketRead(error.to_string())),
        }

        if packet.stream() as usize != video_index {
            continue;
        }

        // The window comes from the packet's own timestamps; a packet
        // without a PTS has no window and can never qualify, but its
        // data still feeds the decoder.
        let window = packet.pts().map(|pts| {
            FrameWindow::from_packet_ticks(pts, packet.duration(), time_base, video_index)
        });

        decoder
            .send_packet(&packet)
            .map_err(|error| MediaGateError::VideoDecode(error.to_string()))?;

        match decoder.receive_frame(&mut decoded) {
            Ok(()) => {}
            // Needs more input: keep pulling packets.
            Err(FfmpegError::Other { errno: EAGAIN }) => continue,
            Err(error) => return Err(MediaGateError::VideoDecode(error.to_string())),
        }

        let Some(window) = window else {
            continue;
        };

        if window.qualifies(target) {
            log::debug!(
                "Selected frame with window [{}, {}) for target {}",
                window.start,
                window.end,
                target
            );
            let mut rgba = VideoFrame::empty();
            scaler.run(&decoded, &mut rgba)?;
            return Ok(rgba);
        }
    }

    Err(MediaGateError::FrameNotFound { target })
}
