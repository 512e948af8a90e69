//! Duration accumulator tests.

use mediagate::{DurationAccumulator, PacketTiming, RationalTime, StreamTiming};

fn stream(numerator: i64, denominator: i64) -> StreamTiming {
    StreamTiming {
        time_base: RationalTime::new(numerator, denominator),
        start_time_ticks: None,
    }
}

fn packet(stream_index: usize, pts: i64, duration: i64) -> PacketTiming {
    PacketTiming {
        stream_index,
        pts: Some(pts),
        duration,
    }
}

#[test]
fn empty_packet_stream_has_zero_duration() {
    let accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    assert_eq!(accumulator.total(), RationalTime::ZERO);
}

#[test]
fn single_stream_duration_is_the_last_packet_end() {
    let mut accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    accumulator.observe(&packet(0, 0, 1000));
    accumulator.observe(&packet(0, 1000, 1000));
    accumulator.observe(&packet(0, 4000, 1000));
    assert_eq!(accumulator.total(), RationalTime::new(5, 1));
}

#[test]
fn winner_is_chosen_in_converted_time_not_raw_ticks() {
    // Stream 0 ends at 360000 ticks of 1/90000 = 4 seconds.
    // Stream 1 ends at 45 ticks of 1/10 = 4.5 seconds.
    // A raw tick comparison would crown stream 0; converted time must
    // crown stream 1.
    let streams = vec![stream(1, 90_000), stream(1, 10)];

    let mut accumulator = DurationAccumulator::new(streams.clone());
    accumulator.observe(&packet(0, 350_000, 10_000));
    accumulator.observe(&packet(1, 40, 5));
    assert_eq!(accumulator.total(), RationalTime::new(9, 2));

    // Arrival order must not matter.
    let mut reversed = DurationAccumulator::new(streams);
    reversed.observe(&packet(1, 40, 5));
    reversed.observe(&packet(0, 350_000, 10_000));
    assert_eq!(reversed.total(), RationalTime::new(9, 2));
}

#[test]
fn out_of_order_packets_within_a_stream_keep_the_maximum() {
    let mut accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    accumulator.observe(&packet(0, 9000, 1000));
    accumulator.observe(&packet(0, 2000, 1000));
    accumulator.observe(&packet(0, 5000, 1000));
    assert_eq!(accumulator.total(), RationalTime::new(10, 1));
}

#[test]
fn winning_stream_start_offset_is_subtracted() {
    let streams = vec![StreamTiming {
        time_base: RationalTime::new(1, 1000),
        start_time_ticks: Some(500),
    }];
    let mut accumulator = DurationAccumulator::new(streams);
    accumulator.observe(&packet(0, 3000, 500));
    assert_eq!(accumulator.total(), RationalTime::new(3, 1));
}

#[test]
fn packets_without_pts_are_ignored() {
    let mut accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    accumulator.observe(&PacketTiming {
        stream_index: 0,
        pts: None,
        duration: 1_000_000,
    });
    assert_eq!(accumulator.total(), RationalTime::ZERO);

    accumulator.observe(&packet(0, 1000, 1000));
    assert_eq!(accumulator.total(), RationalTime::new(2, 1));
}

#[test]
fn packets_for_undeclared_streams_are_ignored() {
    let mut accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    accumulator.observe(&packet(7, 5000, 1000));
    assert_eq!(accumulator.total(), RationalTime::ZERO);
}

#[test]
fn packets_ending_before_time_zero_never_win() {
    let mut accumulator = DurationAccumulator::new(vec![stream(1, 1000)]);
    accumulator.observe(&packet(0, -5000, 1000));
    assert_eq!(accumulator.total(), RationalTime::ZERO);
}
