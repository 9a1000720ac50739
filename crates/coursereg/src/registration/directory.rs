//! Student and faculty directories.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::error::RegistrationError;
use crate::course::ScheduleLookup;
use crate::user::{
    Faculty, PasswordHash, Schedule, Student, UserError, UserId, UserProfile, MAX_COURSES,
    MAX_CREDITS, MIN_COURSES, MIN_CREDITS,
};

/// Anything stored in a [`Directory`].
pub trait Member {
    fn profile(&self) -> &UserProfile;
}

impl Member for Student {
    fn profile(&self) -> &UserProfile {
        Student::profile(self)
    }
}

impl Member for Faculty {
    fn profile(&self) -> &UserProfile {
        Faculty::profile(self)
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub first_name: String,
    pub last_name: String,
    pub id: String,
}

/// Users keyed by id.
#[derive(Debug, Clone)]
pub struct Directory<U> {
    members: BTreeMap<UserId, U>,
}

pub type StudentDirectory = Directory<Student>;
pub type FacultyDirectory = Directory<Faculty>;

impl<U: Member> Directory<U> {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Inserts an already-built member.
    pub fn insert(&mut self, member: U) -> Result<(), RegistrationError> {
        let id = member.profile().id().clone();
        if self.members.contains_key(&id) {
            return Err(RegistrationError::DuplicateId { id });
        }
        self.members.insert(id, member);
        Ok(())
    }

    /// Removes a member without touching any course roll.
    ///
    /// Outside the crate, removal goes through
    /// [`RegistrationContext::remove_student`](super::RegistrationContext::remove_student)
    /// so rolls never hold an id with no directory entry.
    pub(crate) fn remove(&mut self, id: &UserId) -> Option<U> {
        self.members.remove(id)
    }

    pub fn get(&self, id: &UserId) -> Option<&U> {
        self.members.get(id)
    }

    pub fn get_mut(&mut self, id: &UserId) -> Option<&mut U> {
        self.members.get_mut(id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.members.contains_key(id)
    }

    /// Rows sorted by last name, first name, then id.
    pub fn listing(&self) -> Vec<DirectoryEntry> {
        let mut members: Vec<&U> = self.members.values().collect();
        members.sort_by(|a, b| a.profile().sort_key().cmp(&b.profile().sort_key()));
        members
            .into_iter()
            .map(|m| DirectoryEntry {
                first_name: m.profile().first_name().to_string(),
                last_name: m.profile().last_name().to_string(),
                id: m.profile().id().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}

impl<U: Member> Default for Directory<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes `password` after checking it matches `repeat_password`.
fn hash_matching(password: &str, repeat_password: &str) -> Result<PasswordHash, UserError> {
    if password.is_empty() || repeat_password.is_empty() {
        return Err(UserError::InvalidPassword);
    }
    let hash = PasswordHash::from_plaintext(password)?;
    if !hash.verify(repeat_password) {
        return Err(UserError::PasswordMismatch);
    }
    Ok(hash)
}

impl Directory<Student> {
    /// Registers a new student.
    ///
    /// A `max_credits` outside the permitted range falls back to the default
    /// of 18 rather than failing.
    #[allow(clippy::too_many_arguments)]
    pub fn add_student(
        &mut self,
        first_name: &str,
        last_name: &str,
        id: &str,
        email: &str,
        password: &str,
        repeat_password: &str,
        max_credits: u8,
    ) -> Result<(), RegistrationError> {
        let hash = hash_matching(password, repeat_password)?;
        let profile = UserProfile::new(first_name, last_name, id, email, hash)?;
        if self.contains(profile.id()) {
            return Err(RegistrationError::DuplicateId {
                id: profile.id().clone(),
            });
        }
        let max_credits = if (MIN_CREDITS..=MAX_CREDITS).contains(&max_credits) {
            max_credits
        } else {
            MAX_CREDITS
        };
        let student = Student::new(profile, max_credits)?;
        info!(student = %student.id(), max_credits, "Added student to directory");
        self.insert(student)
    }
}

impl Directory<Faculty> {
    /// Registers a new faculty member.
    ///
    /// A `max_courses` outside the permitted range falls back to 3.
    #[allow(clippy::too_many_arguments)]
    pub fn add_faculty(
        &mut self,
        first_name: &str,
        last_name: &str,
        id: &str,
        email: &str,
        password: &str,
        repeat_password: &str,
        max_courses: u8,
    ) -> Result<(), RegistrationError> {
        let hash = hash_matching(password, repeat_password)?;
        let profile = UserProfile::new(first_name, last_name, id, email, hash)?;
        if self.contains(profile.id()) {
            return Err(RegistrationError::DuplicateId {
                id: profile.id().clone(),
            });
        }
        let max_courses = if (MIN_COURSES..=MAX_COURSES).contains(&max_courses) {
            max_courses
        } else {
            MAX_COURSES
        };
        let faculty = Faculty::new(profile, max_courses)?;
        info!(faculty = %faculty.id(), max_courses, "Added faculty to directory");
        self.insert(faculty)
    }
}

impl ScheduleLookup for Directory<Student> {
    fn schedule_mut(&mut self, student: &UserId) -> Option<&mut Schedule> {
        self.members.get_mut(student).map(Student::schedule_mut)
    }
}
