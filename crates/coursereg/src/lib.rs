//! Course enrollment admission engine.
//!
//! Courses own a capacity-bounded roster and a fixed-size waitlist, students
//! own a conflict-free schedule, and a [`RegistrationContext`] ties the
//! catalog and directories to the logged-in session.

pub mod collections;
pub mod course;
pub mod registration;
pub mod user;

pub use course::{Course, CourseKey, CourseRoll, DropOutcome, EnrollmentStatus, MeetingPattern};
pub use registration::{RegistrarConfig, RegistrationContext, RegistrationError};
pub use user::{Schedule, ScheduledCourse, Student, UserId};
