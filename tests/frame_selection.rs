//! Frame window and selection tests.

use mediagate::{FrameWindow, RationalTime, select_first};

/// Three consecutive frames with windows [0,5), [5,10), [10,15) in
/// whole seconds.
fn consecutive_frames() -> Vec<(&'static str, FrameWindow)> {
    let time_base = RationalTime::new(1, 1);
    vec![
        ("a", FrameWindow::from_packet_ticks(0, 5, time_base, 0)),
        ("b", FrameWindow::from_packet_ticks(5, 5, time_base, 0)),
        ("c", FrameWindow::from_packet_ticks(10, 5, time_base, 0)),
    ]
}

#[test]
fn target_inside_a_window_selects_the_straddling_frame() {
    let selected = select_first(consecutive_frames(), RationalTime::new(7, 1));
    assert_eq!(selected, Some("b"));
}

#[test]
fn target_at_a_window_boundary_selects_the_frame_starting_there() {
    // Start-at-target triggers an immediate match; the preceding
    // frame's window is half-open and ends at the boundary.
    let selected = select_first(consecutive_frames(), RationalTime::new(5, 1));
    assert_eq!(selected, Some("b"));
}

#[test]
fn target_at_zero_selects_the_first_frame() {
    let selected = select_first(consecutive_frames(), RationalTime::ZERO);
    assert_eq!(selected, Some("a"));
}

#[test]
fn target_past_the_last_window_selects_nothing() {
    assert_eq!(
        select_first(consecutive_frames(), RationalTime::new(16, 1)),
        None
    );
    // The last window is half-open, so its exact end also misses.
    assert_eq!(
        select_first(consecutive_frames(), RationalTime::new(15, 1)),
        None
    );
}

#[test]
fn selection_is_eager_not_nearest() {
    // A gap between windows: the first frame starting after the target
    // wins even though no frame straddles it.
    let time_base = RationalTime::new(1, 1);
    let frames = vec![
        ("early", FrameWindow::from_packet_ticks(0, 2, time_base, 0)),
        ("late", FrameWindow::from_packet_ticks(10, 10, time_base, 0)),
    ];
    assert_eq!(select_first(frames, RationalTime::new(9, 1)), Some("late"));
}

#[test]
fn non_monotonic_frames_match_in_decode_order() {
    // The scan never looks ahead: the first qualifying frame in
    // decode order wins even when a later frame would straddle the
    // target more tightly.
    let time_base = RationalTime::new(1, 1);
    let frames = vec![
        ("first", FrameWindow::from_packet_ticks(10, 5, time_base, 0)),
        ("second", FrameWindow::from_packet_ticks(0, 5, time_base, 0)),
    ];
    assert_eq!(select_first(frames, RationalTime::new(3, 1)), Some("first"));
}

#[test]
fn empty_sequences_select_nothing() {
    let frames: Vec<((), FrameWindow)> = Vec::new();
    assert_eq!(select_first(frames, RationalTime::ZERO), None);
}

#[test]
fn fractional_targets_compare_exactly() {
    let time_base = RationalTime::new(1, 1000);
    let frames = vec![
        ("a", FrameWindow::from_packet_ticks(0, 40, time_base, 0)),
        ("b", FrameWindow::from_packet_ticks(40, 40, time_base, 0)),
    ];
    // 1/25 of a second = 40 ticks at 1/1000: exactly the boundary.
    let target = RationalTime::new(1, 25);
    assert_eq!(select_first(frames, target), Some("b"));
}

#[test]
fn window_scales_by_denominator_only() {
    // Deliberately preserved behavior: a 3/1000 time base still scales
    // packet ticks by 1/1000 — the numerator is ignored, so windows
    // for non-unit numerators are misscaled relative to wall-clock
    // time (500 ticks of 3/1000 are really 3/2 seconds). This test
    // pins the quirk; do not "fix" it silently.
    let time_base = RationalTime::new(3, 1000);
    let window = FrameWindow::from_packet_ticks(500, 500, time_base, 0);
    assert_eq!(window.start, RationalTime::new(1, 2));
    assert_eq!(window.end, RationalTime::new(1, 1));
}

#[test]
fn window_containment_is_half_open() {
    let time_base = RationalTime::new(1, 1);
    let window = FrameWindow::from_packet_ticks(5, 5, time_base, 0);

    assert!(window.contains(RationalTime::new(5, 1)));
    assert!(window.contains(RationalTime::new(19, 2)));
    assert!(!window.contains(RationalTime::new(10, 1)));
    assert!(!window.contains(RationalTime::new(4, 1)));

    assert!(window.qualifies(RationalTime::new(3, 1)));
    assert!(window.qualifies(RationalTime::new(5, 1)));
    assert!(!window.qualifies(RationalTime::new(11, 1)));
}
