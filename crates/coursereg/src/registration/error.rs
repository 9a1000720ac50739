//! Error types for registration operations.

use thiserror::Error;

use crate::course::{CourseError, CourseKey, RollError};
use crate::user::{ScheduleError, UserError, UserId};

/// Errors that can occur while running registration operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// No one is logged in, or the current user's role cannot do this
    #[error("Illegal action: {action}")]
    IllegalAction { action: &'static str },

    /// Login attempted for an id nobody owns
    #[error("User {id} doesn't exist")]
    UnknownUser { id: String },

    #[error("Course {key} is not in the catalog")]
    UnknownCourse { key: CourseKey },

    /// Another user already has this id
    #[error("Id {id} is already taken")]
    DuplicateId { id: UserId },

    /// The configuration file could not be read or parsed
    #[error("Config error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Course(#[from] CourseError),

    #[error(transparent)]
    Roll(#[from] RollError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    User(#[from] UserError),
}

impl RegistrationError {
    /// Returns true if the request was turned away by an admission rule
    /// (schedule conflict, duplicate course, credit limit or a full roll).
    pub fn is_rejection(&self) -> bool {
        match self {
            RegistrationError::Schedule(_) => true,
            RegistrationError::Roll(e) => e.is_rejection(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for RegistrationError {
    fn from(err: std::io::Error) -> Self {
        RegistrationError::Config {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RegistrationError {
    fn from(err: serde_json::Error) -> Self {
        RegistrationError::Config {
            message: err.to_string(),
        }
    }
}
