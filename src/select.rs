//! Frame windows and the frame-selection rule.
//!
//! Every decoded frame is valid for a half-open time interval — its
//! window. The selection rule is eager: scanning frames in presentation
//! order, the first frame whose window either starts at or after the
//! target, or straddles it, wins and the scan halts. This is not a
//! nearest-frame search; a later frame straddling the target more
//! tightly is never considered.

use crate::rational::RationalTime;

/// The half-open time interval `[start, end)` during which a decoded
/// frame is the one to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWindow {
    pub start: RationalTime,
    pub end: RationalTime,
    /// Index of the stream the frame came from.
    pub stream_index: usize,
}

impl FrameWindow {
    /// Build a window from packet timing fields.
    ///
    /// Only the time-base *denominator* scales the ticks; a non-unit
    /// numerator is ignored, matching the tool this crate replaces.
    /// For the common `1/N` video time bases the two are identical.
    pub fn from_packet_ticks(
        pts: i64,
        duration: i64,
        time_base: RationalTime,
        stream_index: usize,
    ) -> Self {
        let scale = time_base.denominator();
        Self {
            start: RationalTime::new(pts, scale),
            end: RationalTime::new(pts.saturating_add(duration), scale),
            stream_index,
        }
    }

    /// Whether the target instant falls inside the window. The end is
    /// exclusive: a frame whose window ends exactly at the target does
    /// not contain it — the next frame starts there.
    pub fn contains(&self, target: RationalTime) -> bool {
        self.start <= target && target < self.end
    }

    /// The selection test: the window starts at/after the target, or
    /// contains it.
    pub fn qualifies(&self, target: RationalTime) -> bool {
        self.start >= target || self.contains(target)
    }
}

/// Return the first frame whose window qualifies for the target, or
/// `None` when the sequence is exhausted without a match.
pub fn select_first<T>(
    frames: impl IntoIterator<Item = (T, FrameWindow)>,
    target: RationalTime,
) -> Option<T> {
    frames
        .into_iter()
        .find(|(_, window)| window.qualifies(target))
        .map(|(frame, _)| frame)
}
