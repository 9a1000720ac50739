//! Error types for course construction and course rolls.

use thiserror::Error;

use crate::collections::CollectionError;
use crate::user::ScheduleError;

/// Validation failures raised while building a [`Course`](super::Course).
///
/// A course that fails any check is never constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CourseError {
    #[error("Invalid title")]
    InvalidTitle,

    /// Course name does not match letters + 3 digits + optional suffix
    #[error("Invalid course name: {name:?}")]
    InvalidName { name: String },

    /// Section is not exactly three digits
    #[error("Invalid section: {section:?}")]
    InvalidSection { section: String },

    #[error("Invalid credits: {credits} (expected {min}-{max})")]
    InvalidCredits { credits: u8, min: u8, max: u8 },

    #[error("Invalid instructor id")]
    InvalidInstructor,

    /// Meeting days or times failed validation
    #[error("Invalid meeting days and times: {reason}")]
    InvalidMeeting { reason: String },

    #[error(transparent)]
    Roll(#[from] RollError),
}

impl CourseError {
    pub(crate) fn meeting(reason: impl Into<String>) -> Self {
        CourseError::InvalidMeeting {
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`CourseRoll`](super::CourseRoll).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RollError {
    /// Enrollment cap outside the permitted range
    #[error("Invalid enrollment capacity {requested} (expected {min}-{max})")]
    InvalidCapacity {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// Enrollment cap would drop below the number of enrolled students
    #[error("Enrollment capacity {requested} cannot be less than roll size {roster_len}")]
    CapacityBelowRosterSize { requested: usize, roster_len: usize },

    /// Student is already enrolled or waitlisted, or the course and its
    /// waitlist are both full
    #[error("Student {student} cannot be enrolled")]
    CannotEnroll { student: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl RollError {
    /// Returns true if the error is an admission rejection rather than a
    /// misconfiguration.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RollError::CannotEnroll { .. })
    }
}
