//! Media file inspection.
//!
//! The `stat` pipeline: validate the container against the ingestion
//! policy, replay the full packet stream once through the
//! [`DurationAccumulator`](crate::DurationAccumulator) while counting
//! video packets, validate the resulting duration, and return a
//! [`MediaSummary`].

use std::fs;
use std::path::Path;

use crate::duration::DurationAccumulator;
use crate::error::MediaGateError;
use crate::metadata::MediaSummary;
use crate::policy::IngestPolicy;
use crate::source::MediaSource;

/// Inspect a media file and return its summary.
///
/// # Errors
///
/// [`MediaGateError::Rejected`] when the file fails stream or duration
/// validation, or an infrastructure error from opening or reading.
///
/// # Example
///
/// ```no_run
/// use mediagate::{IngestPolicy, probe};
///
/// let summary = probe("upload.webm", &IngestPolicy::default())?;
/// println!("{}", summary.stat_line());
/// # Ok::<(), mediagate::MediaGateError>(())
/// ```
pub fn probe<P: AsRef<Path>>(
    path: P,
    policy: &IngestPolicy,
) -> Result<MediaSummary, MediaGateError> {
    probe_with_progress(path, policy, |_| {})
}

/// Like [`probe`], invoking `on_packet` with the running packet count
/// as the scan progresses.
///
/// The scan reads every packet in the file — a pathological container
/// with an enormous number of packets is read in full — so callers
/// driving a terminal can surface liveness through the hook.
pub fn probe_with_progress<P, F>(
    path: P,
    policy: &IngestPolicy,
    mut on_packet: F,
) -> Result<MediaSummary, MediaGateError>
where
    P: AsRef<Path>,
    F: FnMut(u64),
{
    let path = path.as_ref();
    let file_size = fs::metadata(path)?.len();

    let mut source = MediaSource::open(path)?;
    policy
        .validate_streams(source.streams(), source.container_name())
        .into_result()?;

    let video_index = source
        .video_stream_index()
        .ok_or(MediaGateError::NoVideoStream)?;
    let (width, height) = source
        .streams()
        .iter()
        .find(|stream| stream.index == video_index)
        .map(|stream| (stream.width, stream.height))
        .ok_or(MediaGateError::NoVideoStream)?;

    let mut accumulator =
        DurationAccumulator::new(source.streams().iter().map(Into::into).collect());

    source.seek_to_start();

    let mut video_frames = 0_u64;
    let mut scanned = 0_u64;
    for packet in source.packet_timings() {
        let packet = packet?;
        accumulator.observe(&packet);
        if packet.stream_index == video_index {
            video_frames += 1;
        }
        scanned += 1;
        on_packet(scanned);
    }

    let duration = accumulator.total();
    policy.validate_duration(duration).into_result()?;

    log::debug!(
        "Probed {}: {} packet(s), {} video frame(s), duration {}",
        path.display(),
        scanned,
        video_frames,
        duration
    );

    Ok(MediaSummary {
        file_size,
        video_frames,
        width,
        height,
        duration,
    })
}
