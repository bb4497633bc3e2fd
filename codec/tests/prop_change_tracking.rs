use codec::{ChangeFrameList, Tick};
use proptest::prelude::*;

const FIELDS: usize = 8;

/// Random batches of (field indices, tick increment); ticks are made
/// monotonic by accumulating the increments.
fn record_batches() -> impl Strategy<Value = Vec<(Vec<u16>, u32)>> {
    prop::collection::vec(
        (prop::collection::vec(0u16..FIELDS as u16, 0..4), 1u32..10),
        0..16,
    )
}

fn replay(batches: &[(Vec<u16>, u32)], origin: u32) -> (ChangeFrameList, u32) {
    let mut list = ChangeFrameList::new(FIELDS, Tick::new(origin));
    let mut tick = origin;
    for (fields, advance) in batches {
        tick += advance;
        list.record_changes(fields, Tick::new(tick));
    }
    (list, tick)
}

proptest! {
    /// `changed_since(t1)` is a superset of `changed_since(t2)` for t1 < t2.
    #[test]
    fn prop_changed_since_is_monotone(batches in record_batches(), origin in 1u32..5) {
        let (list, last_tick) = replay(&batches, origin);

        for t1 in 0..=last_tick {
            for t2 in t1..=last_tick {
                let early = list.changed_since(Tick::new(t1));
                let late = list.changed_since(Tick::new(t2));
                for index in &late {
                    prop_assert!(early.contains(index), "t1={t1} t2={t2} index={index}");
                }
            }
        }
    }

    /// Nothing is reported changed at or after the final recorded tick.
    #[test]
    fn prop_nothing_changes_after_last_tick(batches in record_batches(), origin in 1u32..5) {
        let (list, last_tick) = replay(&batches, origin);
        prop_assert!(list.changed_since(Tick::new(last_tick)).is_empty());
        prop_assert!(list.changed_since(Tick::new(last_tick + 1)).is_empty());
    }

    /// Every field is reported changed relative to any tick before the
    /// origin; history never forgets a field entirely.
    #[test]
    fn prop_origin_marks_everything_changed(batches in record_batches(), origin in 1u32..5) {
        let (list, _) = replay(&batches, origin);
        let all = list.changed_since(Tick::new(origin - 1));
        prop_assert_eq!(all.len(), FIELDS);
    }

    /// A recorded field is reported changed for every query tick below its
    /// recording tick.
    #[test]
    fn prop_recorded_fields_are_visible(batches in record_batches(), origin in 1u32..5) {
        let (list, _) = replay(&batches, origin);
        let mut tick = origin;
        for (fields, advance) in &batches {
            tick += advance;
            for field in fields {
                let changed = list.changed_since(Tick::new(tick - 1));
                prop_assert!(changed.contains(field), "field {field} at tick {tick}");
            }
        }
    }
}
