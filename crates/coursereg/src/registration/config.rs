/// Configuration for the registrar account and the starting catalog
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::RegistrationError;
use crate::course::{Course, CourseError, MeetingPattern};

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarConfig {
    pub registrar: RegistrarAccount,
    #[serde(default)]
    pub courses: Vec<CourseSeed>,
}

/// Credentials for the registrar login
///
/// The password is plaintext in the file and hashed as soon as it is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarAccount {
    pub first: String,
    pub last: String,
    pub id: String,
    pub email: String,
    pub password: String,
}

/// A course to place in the catalog at start-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSeed {
    pub name: String,
    pub title: String,
    pub section: String,
    pub credits: u8,
    #[serde(default)]
    pub instructor_id: Option<String>,
    pub enrollment_cap: usize,
    pub meeting_days: String,
    #[serde(default)]
    pub start_time: u16,
    #[serde(default)]
    pub end_time: u16,
}

impl CourseSeed {
    /// Validates the seed and builds the course.
    pub fn build(&self) -> Result<Course, CourseError> {
        let meeting = MeetingPattern::new(&self.meeting_days, self.start_time, self.end_time)?;
        Course::new(
            &self.name,
            &self.title,
            &self.section,
            self.credits,
            self.instructor_id.as_deref(),
            self.enrollment_cap,
            meeting,
        )
    }
}

impl RegistrarConfig {
    /// Loads the configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(RegistrarConfig)` - Parsed configuration
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, RegistrationError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses the configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, RegistrationError> {
        Ok(serde_json::from_str(content)?)
    }
}
