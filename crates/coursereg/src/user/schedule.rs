//! A student's conflict-free set of courses.

use serde::Serialize;

use super::error::ScheduleError;
use crate::course::{conflicts, Activity, CourseKey, CourseSummary, MeetingPattern};

/// Title given to new and reset schedules.
pub const DEFAULT_TITLE: &str = "My Schedule";

/// Source of live open-seat counts for schedule rows.
pub trait SeatLookup {
    fn open_seats(&self, course: &CourseKey) -> Option<i64>;
}

/// A course as recorded on a schedule.
///
/// Holds the course's identity and footprint, not the course itself; the
/// catalog keeps ownership of the course and its roll. Built only from a
/// validated course through [`Course::entry`](crate::course::Course::entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledCourse {
    key: CourseKey,
    title: String,
    meeting: MeetingPattern,
    credits: u8,
}

impl ScheduledCourse {
    pub(crate) fn new(key: CourseKey, title: String, meeting: MeetingPattern, credits: u8) -> Self {
        Self {
            key,
            title,
            meeting,
            credits,
        }
    }

    pub fn key(&self) -> &CourseKey {
        &self.key
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }
}

impl Activity for ScheduledCourse {
    fn title(&self) -> &str {
        &self.title
    }

    fn meeting(&self) -> &MeetingPattern {
        &self.meeting
    }
}

/// Ordered set of courses where no two entries conflict or share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    title: String,
    courses: Vec<ScheduledCourse>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            courses: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renames the schedule. Any text is accepted, including an empty string.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Checks `course` against every entry without changing anything.
    ///
    /// Each entry is checked for a time conflict first, then for a shared
    /// course name.
    pub fn check(&self, course: &ScheduledCourse) -> Result<(), ScheduleError> {
        for existing in &self.courses {
            if conflicts(&course.meeting, &existing.meeting) {
                return Err(ScheduleError::Conflict {
                    existing: existing.key.clone(),
                });
            }
            if course.key.name == existing.key.name {
                return Err(ScheduleError::DuplicateCourse {
                    name: course.key.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn can_add(&self, course: &ScheduledCourse) -> bool {
        self.check(course).is_ok()
    }

    /// Appends `course` once the whole schedule has been checked.
    ///
    /// # Returns
    /// * `Ok(())` - The course was added
    /// * `Err(ScheduleError)` - The schedule is unchanged
    pub fn try_add(&mut self, course: ScheduledCourse) -> Result<(), ScheduleError> {
        self.check(&course)?;
        self.courses.push(course);
        Ok(())
    }

    /// Removes the entry with the same name and section as `course`.
    pub fn remove(&mut self, course: &CourseKey) -> bool {
        match self.courses.iter().position(|entry| &entry.key == course) {
            Some(index) => {
                self.courses.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the schedule and restores the default title.
    pub fn reset(&mut self) {
        self.courses.clear();
        self.title = DEFAULT_TITLE.to_string();
    }

    pub fn contains(&self, course: &CourseKey) -> bool {
        self.courses.iter().any(|entry| &entry.key == course)
    }

    pub fn total_credits(&self) -> u32 {
        self.courses.iter().map(|entry| u32::from(entry.credits)).sum()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Keys of the scheduled courses, in the order they were added.
    pub fn course_keys(&self) -> impl Iterator<Item = &CourseKey> {
        self.courses.iter().map(|entry| &entry.key)
    }

    /// Display rows for every entry, in schedule order.
    pub fn entries<S: SeatLookup + ?Sized>(&self, seats: &S) -> Vec<CourseSummary> {
        self.courses
            .iter()
            .map(|entry| CourseSummary {
                name: entry.key.name.to_string(),
                section: entry.key.section.to_string(),
                title: entry.title.clone(),
                meeting: entry.meeting.meeting_string(),
                open_seats: seats.open_seats(&entry.key),
            })
            .collect()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}
