//! Courses, their meeting footprints and enrollment rolls.

mod error;
mod meeting;
mod name;
mod roll;

pub use error::{CourseError, RollError};
pub use meeting::{
    conflicts, Activity, MeetingPattern, MeetingRecord, WeeklyMeeting, Weekday, ARRANGED_CODE,
};
pub use name::{CourseKey, CourseName, Section};
pub use roll::{
    CourseRoll, DropOutcome, EnrollmentStatus, PromotionBlock, Promotions, ScheduleLookup,
    SkippedPromotion, MAX_ENROLLMENT, MIN_ENROLLMENT, WAITLIST_CAPACITY,
};

use serde::{Deserialize, Serialize};

use crate::user::{ScheduledCourse, UserId};

/// Fewest credit hours a course may carry.
pub const MIN_CREDITS: u8 = 1;
/// Most credit hours a course may carry.
pub const MAX_CREDITS: u8 = 5;

/// A course offering with its own enrollment roll.
///
/// Identity, title, credits and meeting pattern are fixed at construction;
/// only the roll changes afterwards.
#[derive(Debug, Clone)]
pub struct Course {
    key: CourseKey,
    title: String,
    credits: u8,
    instructor_id: Option<String>,
    meeting: MeetingPattern,
    roll: CourseRoll,
}

impl Course {
    /// Builds a validated course with an empty roll.
    ///
    /// # Arguments
    /// * `name` - Course name, e.g. `CSC216`
    /// * `title` - Non-empty title
    /// * `section` - Three digit section
    /// * `credits` - `MIN_CREDITS..=MAX_CREDITS`
    /// * `instructor_id` - Instructor, if one is assigned
    /// * `enrollment_cap` - Roster size for the roll
    /// * `meeting` - Validated meeting pattern
    ///
    /// # Returns
    /// * `Ok(Course)` - The new course
    /// * `Err(CourseError)` - The first validation failure
    pub fn new(
        name: &str,
        title: &str,
        section: &str,
        credits: u8,
        instructor_id: Option<&str>,
        enrollment_cap: usize,
        meeting: MeetingPattern,
    ) -> Result<Self, CourseError> {
        if title.is_empty() {
            return Err(CourseError::InvalidTitle);
        }
        let key = CourseKey::parse(name, section)?;
        if !(MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
            return Err(CourseError::InvalidCredits {
                credits,
                min: MIN_CREDITS,
                max: MAX_CREDITS,
            });
        }
        let instructor_id = match instructor_id {
            Some("") => return Err(CourseError::InvalidInstructor),
            other => other.map(str::to_string),
        };
        let roll = CourseRoll::new(enrollment_cap, key.clone())?;

        Ok(Self {
            key,
            title: title.to_string(),
            credits,
            instructor_id,
            meeting,
            roll,
        })
    }

    pub fn key(&self) -> &CourseKey {
        &self.key
    }

    pub fn name(&self) -> &CourseName {
        &self.key.name
    }

    pub fn section(&self) -> &Section {
        &self.key.section
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }

    pub fn instructor_id(&self) -> Option<&str> {
        self.instructor_id.as_deref()
    }

    pub fn roll(&self) -> &CourseRoll {
        &self.roll
    }

    pub fn roll_mut(&mut self) -> &mut CourseRoll {
        &mut self.roll
    }

    /// Two courses are duplicates when name and section match.
    pub fn is_duplicate(&self, other: &Course) -> bool {
        self.key == other.key
    }

    /// Snapshot of this course for a student's schedule.
    pub fn entry(&self) -> ScheduledCourse {
        ScheduledCourse::new(
            self.key.clone(),
            self.title.clone(),
            self.meeting.clone(),
            self.credits,
        )
    }

    /// Row shown to users browsing the catalog or a schedule.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            name: self.key.name.to_string(),
            section: self.key.section.to_string(),
            title: self.title.clone(),
            meeting: self.meeting.meeting_string(),
            open_seats: Some(self.roll.open_seats()),
        }
    }

    /// Drops `student` from this course's roll, promoting from the waitlist.
    ///
    /// See [`CourseRoll::drop_student`].
    pub fn drop_student<L>(
        &mut self,
        student: &UserId,
        schedules: &mut L,
    ) -> Result<DropOutcome, RollError>
    where
        L: ScheduleLookup + ?Sized,
    {
        let entry = self.entry();
        self.roll.drop_student(student, &entry, schedules)
    }

    /// Fills open seats from the waitlist, e.g. after the cap was raised.
    ///
    /// See [`CourseRoll::promote_waitlisted`].
    pub fn promote_waitlisted<L>(&mut self, schedules: &mut L) -> Promotions
    where
        L: ScheduleLookup + ?Sized,
    {
        let entry = self.entry();
        self.roll.promote_waitlisted(&entry, schedules)
    }
}

impl Activity for Course {
    fn title(&self) -> &str {
        &self.title
    }

    fn meeting(&self) -> &MeetingPattern {
        &self.meeting
    }
}

/// Display row for a course: name, section, title, meeting and open seats.
///
/// `open_seats` is `None` when the course is no longer in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub name: String,
    pub section: String,
    pub title: String,
    pub meeting: String,
    pub open_seats: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mw() -> MeetingPattern {
        MeetingPattern::new("MW", 1330, 1445).unwrap()
    }

    #[test]
    fn test_new_course() {
        let c = Course::new("CSC216", "Software Development Fundamentals", "001", 3, Some("sesmith5"), 10, mw()).unwrap();
        assert_eq!(c.name().as_str(), "CSC216");
        assert_eq!(c.section().as_str(), "001");
        assert_eq!(c.credits(), 3);
        assert_eq!(c.instructor_id(), Some("sesmith5"));
        assert_eq!(c.roll().open_seats(), 10);
        assert_eq!(c.roll().course(), c.key());
    }

    #[test]
    fn test_invalid_courses() {
        assert_eq!(
            Course::new("CSC216", "", "001", 3, None, 10, mw()).unwrap_err(),
            CourseError::InvalidTitle
        );
        assert!(matches!(
            Course::new("CS", "Title", "001", 3, None, 10, mw()),
            Err(CourseError::InvalidName { .. })
        ));
        assert!(matches!(
            Course::new("CSC216", "Title", "1", 3, None, 10, mw()),
            Err(CourseError::InvalidSection { .. })
        ));
        assert!(matches!(
            Course::new("CSC216", "Title", "001", 6, None, 10, mw()),
            Err(CourseError::InvalidCredits { credits: 6, .. })
        ));
        assert!(matches!(
            Course::new("CSC216", "Title", "001", 0, None, 10, mw()),
            Err(CourseError::InvalidCredits { .. })
        ));
        assert_eq!(
            Course::new("CSC216", "Title", "001", 3, Some(""), 10, mw()).unwrap_err(),
            CourseError::InvalidInstructor
        );
        assert!(matches!(
            Course::new("CSC216", "Title", "001", 3, None, 9, mw()),
            Err(CourseError::Roll(RollError::InvalidCapacity { .. }))
        ));
    }

    #[test]
    fn test_summary() {
        let c = Course::new("CSC216", "Software Development Fundamentals", "001", 3, None, 10, mw()).unwrap();
        let summary = c.summary();
        assert_eq!(summary.meeting, "MW 1:30PM-2:45PM");
        assert_eq!(summary.open_seats, Some(10));
    }

    #[test]
    fn test_duplicate_by_name_and_section() {
        let a = Course::new("CSC216", "A", "001", 3, None, 10, mw()).unwrap();
        let b = Course::new("CSC216", "B", "001", 4, None, 20, MeetingPattern::Arranged).unwrap();
        let c = Course::new("CSC216", "A", "002", 3, None, 10, mw()).unwrap();
        assert!(a.is_duplicate(&b));
        assert!(!a.is_duplicate(&c));
    }

    #[test]
    fn test_course_conflicts() {
        let a = Course::new("CSC216", "A", "001", 3, None, 10, mw()).unwrap();
        let b = Course::new("MA241", "B", "001", 4, None, 10, MeetingPattern::new("W", 1445, 1600).unwrap()).unwrap();
        assert!(a.conflicts_with(&b));
        let arranged = Course::new("CSC216", "A", "601", 3, None, 10, MeetingPattern::Arranged).unwrap();
        assert!(!a.conflicts_with(&arranged));
        assert!(a.conflicts_with(&a.entry()));
    }

    #[test]
    fn test_entry_carries_validated_footprint() {
        let c = Course::new("CSC216", "Software Development Fundamentals", "001", 3, None, 10, mw()).unwrap();
        let entry = c.entry();
        assert_eq!(entry.key(), c.key());
        assert_eq!(entry.credits(), 3);
        assert_eq!(entry.title(), "Software Development Fundamentals");
        assert_eq!(entry.meeting(), &mw());
    }
}
