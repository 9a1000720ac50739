//! The set of course offerings, keyed by name and section.

use std::collections::BTreeMap;

use tracing::debug;

use crate::course::{Course, CourseKey, CourseSummary};
use crate::user::SeatLookup;

/// Course offerings in name/section order.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: BTreeMap<CourseKey, Course>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `course` unless one with the same name and section exists.
    ///
    /// # Returns
    /// * `true` - The course was added
    /// * `false` - A duplicate was already present; the catalog is unchanged
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(course.key()) {
            debug!(course = %course.key(), "Rejected duplicate catalog entry");
            return false;
        }
        debug!(course = %course.key(), "Added course to catalog");
        self.courses.insert(course.key().clone(), course);
        true
    }

    pub fn remove_course(&mut self, key: &CourseKey) -> Option<Course> {
        self.courses.remove(key)
    }

    pub fn get(&self, key: &CourseKey) -> Option<&Course> {
        self.courses.get(key)
    }

    pub fn get_mut(&mut self, key: &CourseKey) -> Option<&mut Course> {
        self.courses.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Course> {
        self.courses.values_mut()
    }

    /// Display rows for every course, in catalog order.
    pub fn summaries(&self) -> Vec<CourseSummary> {
        self.courses.values().map(Course::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn clear(&mut self) {
        self.courses.clear();
    }
}

impl SeatLookup for CourseCatalog {
    fn open_seats(&self, course: &CourseKey) -> Option<i64> {
        self.courses.get(course).map(|c| c.roll().open_seats())
    }
}
