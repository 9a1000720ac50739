//! Error types for users and their schedules.

use thiserror::Error;

use crate::course::{CourseKey, CourseName};

/// Validation failures for student and faculty records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid first name")]
    InvalidFirstName,

    #[error("Invalid last name")]
    InvalidLastName,

    #[error("Invalid id")]
    InvalidId,

    /// Email must contain `@` followed later by a `.`
    #[error("Invalid email: {email:?}")]
    InvalidEmail { email: String },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid max credits {credits} (expected {min}-{max})")]
    InvalidMaxCredits { credits: u8, min: u8, max: u8 },

    #[error("Invalid max courses {courses} (expected {min}-{max})")]
    InvalidMaxCourses { courses: u8, min: u8, max: u8 },
}

/// Reasons a schedule refuses a course.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The course overlaps an existing entry
    #[error("The course cannot be added due to a conflict with {existing}")]
    Conflict { existing: CourseKey },

    /// A course with the same name is already scheduled
    #[error("You are already enrolled in {name}")]
    DuplicateCourse { name: CourseName },

    /// Adding the course would exceed the student's credit limit
    #[error("Adding {credits} credits would exceed the limit of {max_credits}")]
    CreditLimit { credits: u32, max_credits: u8 },
}
