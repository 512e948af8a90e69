//! Total-duration accumulation over a packet stream.
//!
//! One pass over every demuxed packet, keeping the maximum presentation
//! end time across all streams. Comparisons happen in converted
//! absolute time — exact rationals, each packet's tick count scaled by
//! its own stream's time base — so a stream with coarse ticks cannot
//! lose to one with fine ticks. Summing per-stream durations would
//! misreport files with gaps or out-of-order packets; the cross-stream
//! maximum always yields the true presentation end.

use crate::metadata::StreamDescriptor;
use crate::rational::RationalTime;

/// Timing properties of one stream, as needed by the accumulator.
#[derive(Debug, Clone, Copy)]
pub struct StreamTiming {
    /// Scale factor from the stream's ticks to seconds.
    pub time_base: RationalTime,
    /// Declared start offset in ticks; `None` when unknown (treated
    /// as zero).
    pub start_time_ticks: Option<i64>,
}

impl From<&StreamDescriptor> for StreamTiming {
    fn from(stream: &StreamDescriptor) -> Self {
        Self {
            time_base: stream.time_base,
            start_time_ticks: stream.start_time_ticks,
        }
    }
}

/// Timing fields of one demuxed packet.
#[derive(Debug, Clone, Copy)]
pub struct PacketTiming {
    /// Index of the stream the packet belongs to.
    pub stream_index: usize,
    /// Presentation timestamp in the stream's ticks; `None` when the
    /// container does not declare one.
    pub pts: Option<i64>,
    /// Packet duration in the stream's ticks.
    pub duration: i64,
}

/// Single-pass duration accumulator.
///
/// Feed every packet to [`observe`](DurationAccumulator::observe), then
/// read [`total`](DurationAccumulator::total). An empty packet stream
/// yields exactly zero.
///
/// # Example
///
/// ```
/// use mediagate::{DurationAccumulator, PacketTiming, RationalTime, StreamTiming};
///
/// let streams = vec![StreamTiming {
///     time_base: RationalTime::new(1, 1000),
///     start_time_ticks: None,
/// }];
/// let mut accumulator = DurationAccumulator::new(streams);
/// accumulator.observe(&PacketTiming { stream_index: 0, pts: Some(4000), duration: 1000 });
/// assert_eq!(accumulator.total(), RationalTime::new(5, 1));
/// ```
#[derive(Debug)]
pub struct DurationAccumulator {
    streams: Vec<StreamTiming>,
    /// Converted absolute end time of the winning packet so far.
    best_end: RationalTime,
    /// `(stream index, end ticks)` of the winning packet.
    winner: Option<(usize, i64)>,
}

impl DurationAccumulator {
    pub fn new(streams: Vec<StreamTiming>) -> Self {
        Self {
            streams,
            best_end: RationalTime::ZERO,
            winner: None,
        }
    }

    /// Record one packet.
    ///
    /// Packets without a presentation timestamp, and packets naming a
    /// stream index outside the declared stream list, are ignored.
    pub fn observe(&mut self, packet: &PacketTiming) {
        let Some(pts) = packet.pts else {
            return;
        };
        let Some(timing) = self.streams.get(packet.stream_index) else {
            return;
        };

        let end_ticks = pts.saturating_add(packet.duration);
        let end = RationalTime::from_ticks(end_ticks) * timing.time_base;
        if end > self.best_end {
            self.best_end = end;
            self.winner = Some((packet.stream_index, end_ticks));
        }
    }

    /// The accumulated total duration in seconds.
    ///
    /// The winning packet's end ticks, less its stream's declared start
    /// offset, scaled by that stream's time base. Zero when no observed
    /// packet advanced past time zero.
    pub fn total(&self) -> RationalTime {
        let Some((stream_index, end_ticks)) = self.winner else {
            return RationalTime::ZERO;
        };
        // The winner was bounds-checked in observe().
        let timing = &self.streams[stream_index];
        let start_ticks = timing.start_time_ticks.unwrap_or(0);
        (RationalTime::from_ticks(end_ticks) - RationalTime::from_ticks(start_ticks))
            * timing.time_base
    }
}
