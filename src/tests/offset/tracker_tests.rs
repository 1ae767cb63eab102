use crate::offset::{NO_OFFSET, OffsetTracker};
use crate::source::LineSourceBuilder;
use crate::tests::support::FakeBuilder;

fn tracker(count: usize) -> OffsetTracker {
    let source = FakeBuilder::new(count)
        .build(Box::new(std::io::empty()))
        .expect("fake build");
    OffsetTracker::new(source)
}

#[test]
fn fresh_tracker_has_no_offset() {
    let t = tracker(3);
    assert_eq!(t.current_offset(), NO_OFFSET);
}

#[test]
fn offset_is_reads_minus_one() {
    for n in 0..8usize {
        let mut t = tracker(10);
        for _ in 0..n {
            assert!(t.next().unwrap().is_some());
        }
        assert_eq!(t.current_offset(), n as i64 - 1, "after {n} reads");
    }
}

#[test]
fn exhaustion_does_not_advance_offset() {
    let mut t = tracker(2);
    assert_eq!(t.next().unwrap().unwrap().text, "R0");
    assert_eq!(t.next().unwrap().unwrap().text, "R1");
    assert!(t.next().unwrap().is_none());
    assert!(t.next().unwrap().is_none());
    assert_eq!(t.current_offset(), 1);
}

#[test]
fn empty_source_stays_at_no_offset() {
    let mut t = tracker(0);
    assert!(t.next().unwrap().is_none());
    assert_eq!(t.current_offset(), NO_OFFSET);
}

#[test]
fn failed_read_does_not_advance_offset() {
    let source = FakeBuilder::new(3)
        .failing_at(1)
        .build(Box::new(std::io::empty()))
        .unwrap();
    let mut t = OffsetTracker::new(source);

    assert!(t.next().unwrap().is_some());
    assert!(t.next().is_err());
    assert_eq!(t.current_offset(), 0);

    assert_eq!(t.next().unwrap().unwrap().text, "R1");
    assert_eq!(t.current_offset(), 1);
}

#[test]
fn close_reaches_the_source() {
    let builder = FakeBuilder::new(1);
    let mut t = OffsetTracker::new(builder.build(Box::new(std::io::empty())).unwrap());
    t.close().unwrap();
    assert_eq!(builder.closes(), 1);
}
