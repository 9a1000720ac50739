//! Students, faculty and the profile data they share.

mod credentials;
mod error;
mod schedule;

pub use credentials::PasswordHash;
pub use error::{ScheduleError, UserError};
pub use schedule::{Schedule, ScheduledCourse, SeatLookup, DEFAULT_TITLE};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default and upper bound for a student's credit load.
pub const MAX_CREDITS: u8 = 18;
/// Lower bound for a student's credit load.
pub const MIN_CREDITS: u8 = 3;
/// Default and upper bound for a faculty member's teaching load.
pub const MAX_COURSES: u8 = 3;
/// Lower bound for a faculty member's teaching load.
pub const MIN_COURSES: u8 = 1;

/// Unique login id for a student, faculty member or registrar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(id: &str) -> Result<Self, UserError> {
        if id.is_empty() {
            return Err(UserError::InvalidId);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name, id, email and password shared by every kind of user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    first_name: String,
    last_name: String,
    id: UserId,
    email: String,
    password: PasswordHash,
}

impl UserProfile {
    pub fn new(
        first_name: &str,
        last_name: &str,
        id: &str,
        email: &str,
        password: PasswordHash,
    ) -> Result<Self, UserError> {
        if first_name.is_empty() {
            return Err(UserError::InvalidFirstName);
        }
        if last_name.is_empty() {
            return Err(UserError::InvalidLastName);
        }
        let id = UserId::parse(id)?;
        validate_email(email)?;

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            id,
            email: email.to_string(),
            password,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), UserError> {
        validate_email(email)?;
        self.email = email.to_string();
        Ok(())
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn set_password(&mut self, password: PasswordHash) {
        self.password = password;
    }

    /// Directory ordering: last name, first name, then id.
    pub(crate) fn sort_key(&self) -> (&str, &str, &UserId) {
        (&self.last_name, &self.first_name, &self.id)
    }
}

fn validate_email(email: &str) -> Result<(), UserError> {
    let invalid = || UserError::InvalidEmail {
        email: email.to_string(),
    };
    let at = email.find('@').ok_or_else(invalid)?;
    let last_dot = email.rfind('.').ok_or_else(invalid)?;
    if last_dot < at {
        return Err(invalid());
    }
    Ok(())
}

/// A student with a credit limit and their own schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    profile: UserProfile,
    max_credits: u8,
    schedule: Schedule,
}

impl Student {
    /// Creates a student with an empty schedule.
    ///
    /// # Arguments
    /// * `profile` - Validated profile
    /// * `max_credits` - `MIN_CREDITS..=MAX_CREDITS`
    pub fn new(profile: UserProfile, max_credits: u8) -> Result<Self, UserError> {
        check_max_credits(max_credits)?;
        Ok(Self {
            profile,
            max_credits,
            schedule: Schedule::new(),
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn id(&self) -> &UserId {
        self.profile.id()
    }

    pub fn max_credits(&self) -> u8 {
        self.max_credits
    }

    pub fn set_max_credits(&mut self, max_credits: u8) -> Result<(), UserError> {
        check_max_credits(max_credits)?;
        self.max_credits = max_credits;
        Ok(())
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// Checks the credit limit, then the schedule's conflict and duplicate rules.
    pub fn check_add(&self, course: &ScheduledCourse) -> Result<(), ScheduleError> {
        let credits = self.schedule.total_credits() + u32::from(course.credits());
        if credits > u32::from(self.max_credits) {
            return Err(ScheduleError::CreditLimit {
                credits,
                max_credits: self.max_credits,
            });
        }
        self.schedule.check(course)
    }

    pub fn can_add(&self, course: &ScheduledCourse) -> bool {
        self.check_add(course).is_ok()
    }
}

fn check_max_credits(max_credits: u8) -> Result<(), UserError> {
    if !(MIN_CREDITS..=MAX_CREDITS).contains(&max_credits) {
        return Err(UserError::InvalidMaxCredits {
            credits: max_credits,
            min: MIN_CREDITS,
            max: MAX_CREDITS,
        });
    }
    Ok(())
}

/// A faculty member with a teaching load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faculty {
    profile: UserProfile,
    max_courses: u8,
}

impl Faculty {
    pub fn new(profile: UserProfile, max_courses: u8) -> Result<Self, UserError> {
        check_max_courses(max_courses)?;
        Ok(Self {
            profile,
            max_courses,
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn id(&self) -> &UserId {
        self.profile.id()
    }

    pub fn max_courses(&self) -> u8 {
        self.max_courses
    }

    pub fn set_max_courses(&mut self, max_courses: u8) -> Result<(), UserError> {
        check_max_courses(max_courses)?;
        self.max_courses = max_courses;
        Ok(())
    }
}

fn check_max_courses(max_courses: u8) -> Result<(), UserError> {
    if !(MIN_COURSES..=MAX_COURSES).contains(&max_courses) {
        return Err(UserError::InvalidMaxCourses {
            courses: max_courses,
            min: MIN_COURSES,
            max: MAX_COURSES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseKey, MeetingPattern};

    fn profile(first: &str, last: &str, id: &str) -> UserProfile {
        UserProfile::new(
            first,
            last,
            id,
            "email@ncsu.edu",
            PasswordHash::from_plaintext("pw").unwrap(),
        )
        .unwrap()
    }

    fn entry(name: &str, days: &str, start: u16, end: u16, credits: u8) -> ScheduledCourse {
        ScheduledCourse::new(
            CourseKey::parse(name, "001").unwrap(),
            "Title".to_string(),
            MeetingPattern::new(days, start, end).unwrap(),
            credits,
        )
    }

    #[test]
    fn test_profile_validation() {
        let pw = PasswordHash::from_plaintext("pw").unwrap();
        assert_eq!(
            UserProfile::new("", "Last", "id", "a@b.com", pw.clone()),
            Err(UserError::InvalidFirstName)
        );
        assert_eq!(
            UserProfile::new("First", "", "id", "a@b.com", pw.clone()),
            Err(UserError::InvalidLastName)
        );
        assert_eq!(
            UserProfile::new("First", "Last", "", "a@b.com", pw.clone()),
            Err(UserError::InvalidId)
        );
        for email in ["", "ab.com", "a@bcom", "a.b@com"] {
            assert!(
                matches!(
                    UserProfile::new("First", "Last", "id", email, pw.clone()),
                    Err(UserError::InvalidEmail { .. })
                ),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_student_max_credits() {
        assert!(Student::new(profile("a", "b", "ab"), 3).is_ok());
        assert!(Student::new(profile("a", "b", "ab"), 18).is_ok());
        assert!(matches!(
            Student::new(profile("a", "b", "ab"), 2),
            Err(UserError::InvalidMaxCredits { .. })
        ));
        assert!(matches!(
            Student::new(profile("a", "b", "ab"), 19),
            Err(UserError::InvalidMaxCredits { .. })
        ));
    }

    #[test]
    fn test_student_can_add_respects_credit_limit() {
        let mut s = Student::new(profile("a", "b", "ab"), 6).unwrap();
        let csc216 = entry("CSC216", "MW", 1330, 1445, 3);
        assert!(s.can_add(&csc216));
        s.schedule_mut().try_add(csc216).unwrap();
        assert_eq!(s.schedule().total_credits(), 3);

        let ma241 = entry("MA241", "TH", 800, 915, 4);
        assert_eq!(
            s.check_add(&ma241),
            Err(ScheduleError::CreditLimit {
                credits: 7,
                max_credits: 6
            })
        );
        assert!(s.can_add(&entry("E115", "F", 800, 900, 3)));
    }

    #[test]
    fn test_student_can_add_checks_schedule() {
        let mut s = Student::new(profile("a", "b", "ab"), MAX_CREDITS).unwrap();
        s.schedule_mut()
            .try_add(entry("CSC216", "MW", 1330, 1445, 3))
            .unwrap();
        assert!(!s.can_add(&entry("MA241", "W", 1400, 1500, 4)));
        assert!(!s.can_add(&entry("CSC216", "F", 800, 900, 3)));
    }

    #[test]
    fn test_faculty_max_courses() {
        assert!(Faculty::new(profile("a", "b", "ab"), 1).is_ok());
        assert!(Faculty::new(profile("a", "b", "ab"), 3).is_ok());
        assert!(Faculty::new(profile("a", "b", "ab"), 0).is_err());
        let mut f = Faculty::new(profile("a", "b", "ab"), 2).unwrap();
        assert!(f.set_max_courses(4).is_err());
        assert_eq!(f.max_courses(), 2);
    }

    #[test]
    fn test_user_id_serde() {
        let id: UserId = serde_json::from_str("\"sesmith5\"").unwrap();
        assert_eq!(id.as_str(), "sesmith5");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
