use std::collections::HashMap;

use coursereg::collections::{BoundedFifoQueue, BoundedUniqueSequence, CollectionError};
use coursereg::course::{conflicts, CourseRoll, RollError, WAITLIST_CAPACITY};
use coursereg::{
    Course, CourseKey, EnrollmentStatus, MeetingPattern, Schedule, ScheduledCourse, UserId,
};
use proptest::prelude::*;

const DAY_LETTERS: [char; 5] = ['M', 'T', 'W', 'H', 'F'];

fn hhmm(minutes: u16) -> u16 {
    (minutes / 60) * 100 + minutes % 60
}

fn days_from_mask(mask: u8) -> String {
    DAY_LETTERS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect()
}

fn weekly(mask: u8, a: u16, b: u16) -> MeetingPattern {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    MeetingPattern::new(&days_from_mask(mask), hhmm(start), hhmm(end)).unwrap()
}

fn arb_weekly() -> impl Strategy<Value = MeetingPattern> {
    (1u8..32, 0u16..1440, 0u16..1440).prop_map(|(mask, a, b)| weekly(mask, a, b))
}

fn arb_meeting() -> impl Strategy<Value = MeetingPattern> {
    prop_oneof![
        1 => Just(MeetingPattern::Arranged),
        4 => arb_weekly(),
    ]
}

fn student(i: usize) -> UserId {
    UserId::parse(&format!("student{i}")).unwrap()
}

fn entry(meeting: MeetingPattern) -> ScheduledCourse {
    Course::new("CSC216", "Software Development Fundamentals", "001", 3, None, 10, meeting)
        .unwrap()
        .entry()
}

proptest! {
    #[test]
    fn test_fresh_roll_is_empty(cap in 10usize..=250) {
        let roll = CourseRoll::new(cap, CourseKey::parse("CSC216", "001").unwrap()).unwrap();
        prop_assert_eq!(roll.open_seats(), cap as i64);
        prop_assert_eq!(roll.waitlist_len(), 0);
        prop_assert_eq!(roll.enrollment_cap(), cap);
    }

    #[test]
    fn test_cap_outside_range_rejected(cap in prop_oneof![0usize..10, 251usize..1000]) {
        let result = CourseRoll::new(cap, CourseKey::parse("CSC216", "001").unwrap());
        let is_invalid_capacity = matches!(result, Err(RollError::InvalidCapacity { .. }));
        prop_assert!(is_invalid_capacity);
    }

    #[test]
    fn test_fill_then_waitlist_in_order(cap in 10usize..=40) {
        let mut roll = CourseRoll::new(cap, CourseKey::parse("CSC216", "001").unwrap()).unwrap();
        for i in 0..cap {
            prop_assert_eq!(roll.enroll(&student(i)).unwrap(), EnrollmentStatus::Enrolled);
        }
        for i in cap..cap + WAITLIST_CAPACITY {
            prop_assert_eq!(roll.enroll(&student(i)).unwrap(), EnrollmentStatus::Waitlisted);
        }
        let overflow = student(cap + WAITLIST_CAPACITY);
        prop_assert!(!roll.can_enroll(&overflow));
        let rejected = matches!(roll.enroll(&overflow), Err(RollError::CannotEnroll { .. }));
        prop_assert!(rejected);

        let waitlist: Vec<UserId> = roll.waitlist().cloned().collect();
        let expected: Vec<UserId> = (cap..cap + WAITLIST_CAPACITY).map(student).collect();
        prop_assert_eq!(waitlist, expected);
        prop_assert_eq!(roll.open_seats(), 0);
    }

    #[test]
    fn test_drop_promotes_fifo_head(cap in 10usize..=40, dropped in 0usize..10) {
        let mut roll = CourseRoll::new(cap, CourseKey::parse("CSC216", "001").unwrap()).unwrap();
        let mut schedules: HashMap<UserId, Schedule> = HashMap::new();
        let course = entry(MeetingPattern::Arranged);
        for i in 0..cap + 3 {
            roll.enroll(&student(i)).unwrap();
            schedules.insert(student(i), Schedule::new());
        }

        roll.drop_student(&student(dropped), &course, &mut schedules).unwrap();
        prop_assert!(roll.is_enrolled(&student(cap)));
        prop_assert!(schedules[&student(cap)].contains(course.key()));
        let waitlist: Vec<UserId> = roll.waitlist().cloned().collect();
        prop_assert_eq!(waitlist, vec![student(cap + 1), student(cap + 2)]);
        prop_assert_eq!(roll.roster().len(), cap);
        prop_assert_eq!(roll.open_seats(), 0);
    }

    #[test]
    fn test_drops_never_idle_a_seat_while_students_wait(
        cap in 10usize..=20,
        missing in prop::collection::hash_set(0usize..40, 0..8),
        drops in prop::collection::vec(0usize..40, 1..15),
    ) {
        let mut roll = CourseRoll::new(cap, CourseKey::parse("CSC216", "001").unwrap()).unwrap();
        let mut schedules: HashMap<UserId, Schedule> = HashMap::new();
        let course = entry(MeetingPattern::Arranged);
        for i in 0..cap + WAITLIST_CAPACITY {
            roll.enroll(&student(i)).unwrap();
            if !missing.contains(&i) {
                schedules.insert(student(i), Schedule::new());
            }
        }

        for i in drops {
            roll.drop_student(&student(i), &course, &mut schedules).unwrap();
            if roll.waitlist_len() > 0 {
                prop_assert_eq!(roll.open_seats(), 0);
            }
            prop_assert!(roll.roster().len() + roll.waitlist_len() <= cap + WAITLIST_CAPACITY);
            for id in roll.waitlist() {
                prop_assert!(!roll.is_enrolled(id));
            }
        }
    }

    #[test]
    fn test_conflict_is_symmetric(a in arb_meeting(), b in arb_meeting()) {
        prop_assert_eq!(conflicts(&a, &b), conflicts(&b, &a));
    }

    #[test]
    fn test_conflict_matches_interval_overlap(
        mask_a in 1u8..32,
        mask_b in 1u8..32,
        times in (0u16..1440, 0u16..1440, 0u16..1440, 0u16..1440),
    ) {
        let a = weekly(mask_a, times.0, times.1);
        let b = weekly(mask_b, times.2, times.3);
        let expected = mask_a & mask_b != 0
            && a.start_time() <= b.end_time()
            && b.start_time() <= a.end_time();
        prop_assert_eq!(conflicts(&a, &b), expected);
    }

    #[test]
    fn test_disjoint_days_never_conflict(mask in 1u8..31, times in (0u16..1440, 0u16..1440, 0u16..1440, 0u16..1440)) {
        let a = weekly(mask, times.0, times.1);
        let b = weekly(!mask & 0b11111, times.2, times.3);
        prop_assert!(!conflicts(&a, &b));
    }

    #[test]
    fn test_arranged_never_conflicts(other in arb_meeting()) {
        prop_assert!(!conflicts(&MeetingPattern::Arranged, &other));
    }

    #[test]
    fn test_schedule_add_then_remove(meeting in arb_meeting()) {
        let mut schedule = Schedule::new();
        let course = entry(meeting);
        prop_assert!(schedule.can_add(&course));
        schedule.try_add(course.clone()).unwrap();
        prop_assert!(schedule.contains(course.key()));
        prop_assert_eq!(schedule.total_credits(), 3);
        prop_assert!(!schedule.can_add(&course));
        prop_assert!(schedule.remove(course.key()));
        prop_assert!(schedule.is_empty());
        prop_assert_eq!(schedule.total_credits(), 0);
    }

    #[test]
    fn test_sequence_bounded_and_unique(capacity in 0usize..20, values in prop::collection::hash_set(0u32..1000, 0..30)) {
        let mut seq = BoundedUniqueSequence::new(capacity);
        for value in &values {
            let was_full = seq.is_full();
            match seq.push(*value) {
                Ok(()) => prop_assert!(!was_full),
                Err(e) => prop_assert_eq!(e, CollectionError::CapacityExceeded { capacity }),
            }
        }
        prop_assert_eq!(seq.len(), values.len().min(capacity));
        if let Some(first) = seq.get(0).copied() {
            let duplicate = seq.push(first);
            prop_assert!(duplicate.is_err());
        }
    }

    #[test]
    fn test_queue_is_fifo(values in prop::collection::vec(any::<u16>(), 0..10)) {
        let mut queue = BoundedFifoQueue::new(10);
        for value in &values {
            queue.enqueue(*value).unwrap();
        }
        let mut drained = Vec::new();
        while let Ok(value) = queue.dequeue() {
            drained.push(value);
        }
        prop_assert_eq!(drained, values);
        prop_assert_eq!(queue.dequeue(), Err(CollectionError::Empty));
    }
}
