//! Course identity: validated names, sections and the combined key.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::CourseError;

// 1-4 letter prefix, exactly 3 digits, optional 1 letter suffix (e.g. "CSC216", "E115", "CSC216A")
static COURSE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,4}[0-9]{3}[A-Za-z]?$").unwrap());

const SECTION_LENGTH: usize = 3;

/// A validated course name such as `CSC216`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    pub fn parse(name: &str) -> Result<Self, CourseError> {
        if COURSE_NAME_REGEX.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(CourseError::InvalidName {
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A three digit section number such as `001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Section(String);

impl Section {
    pub fn parse(section: &str) -> Result<Self, CourseError> {
        if section.len() == SECTION_LENGTH && section.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(section.to_string()))
        } else {
            Err(CourseError::InvalidSection {
                section: section.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Section {
    type Error = CourseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Section> for String {
    fn from(value: Section) -> Self {
        value.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a course offering: name plus section.
///
/// Ordering is by name, then section, which is the catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseKey {
    pub name: CourseName,
    pub section: Section,
}

impl CourseKey {
    pub fn new(name: CourseName, section: Section) -> Self {
        Self { name, section }
    }

    /// Parses both parts of a key from raw strings.
    pub fn parse(name: &str, section: &str) -> Result<Self, CourseError> {
        Ok(Self {
            name: CourseName::parse(name)?,
            section: Section::parse(section)?,
        })
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.section)
    }
}
