//! Registration context: catalog, directories and the logged-in session.
//!
//! There is exactly one [`RegistrationContext`] per running system. It is
//! built from a [`RegistrarConfig`] and passed around explicitly.

mod catalog;
mod config;
mod directory;
mod error;
mod session;

pub use catalog::CourseCatalog;
pub use config::{CourseSeed, RegistrarAccount, RegistrarConfig};
pub use directory::{Directory, DirectoryEntry, FacultyDirectory, Member, StudentDirectory};
pub use error::RegistrationError;
pub use session::{Role, Session};

use tracing::{debug, info, warn};

use crate::course::{CourseKey, EnrollmentStatus, RollError};
use crate::user::{Faculty, PasswordHash, Student, UserId, UserProfile};

/// Everything a registration session operates on.
#[derive(Debug)]
pub struct RegistrationContext {
    catalog: CourseCatalog,
    students: StudentDirectory,
    faculty: FacultyDirectory,
    registrar: UserProfile,
    session: Option<Session>,
}

impl RegistrationContext {
    /// Builds the context from configuration.
    ///
    /// The registrar password is hashed here. Seed courses that fail
    /// validation abort construction; duplicate seeds are skipped.
    ///
    /// # Arguments
    /// * `config` - Registrar account and starting catalog
    ///
    /// # Returns
    /// * `Ok(RegistrationContext)` - Nobody is logged in yet
    /// * `Err` - If the registrar account or a seed course is invalid
    pub fn new(config: &RegistrarConfig) -> Result<Self, RegistrationError> {
        let account = &config.registrar;
        let registrar = UserProfile::new(
            &account.first,
            &account.last,
            &account.id,
            &account.email,
            PasswordHash::from_plaintext(&account.password)?,
        )?;

        let mut catalog = CourseCatalog::new();
        for seed in &config.courses {
            let course = seed.build()?;
            let key = course.key().clone();
            if !catalog.add_course(course) {
                warn!(course = %key, "Skipping duplicate seed course");
            }
        }

        info!(
            registrar = %registrar.id(),
            courses = catalog.len(),
            "Registration context ready"
        );

        Ok(Self {
            catalog,
            students: StudentDirectory::new(),
            faculty: FacultyDirectory::new(),
            registrar,
            session: None,
        })
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CourseCatalog {
        &mut self.catalog
    }

    pub fn students(&self) -> &StudentDirectory {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut StudentDirectory {
        &mut self.students
    }

    pub fn faculty(&self) -> &FacultyDirectory {
        &self.faculty
    }

    pub fn faculty_mut(&mut self) -> &mut FacultyDirectory {
        &mut self.faculty
    }

    pub fn registrar(&self) -> &UserProfile {
        &self.registrar
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.session.as_ref().map(Session::user)
    }

    /// Logs a user in.
    ///
    /// # Returns
    /// * `Ok(true)` - The session started
    /// * `Ok(false)` - Someone is already logged in, or the password is wrong
    /// * `Err(RegistrationError::UnknownUser)` - No account has this id
    pub fn login(&mut self, id: &str, password: &str) -> Result<bool, RegistrationError> {
        if let Some(session) = &self.session {
            debug!(
                current = %session.user(),
                requested = id,
                "Login refused, a session is already active"
            );
            return Ok(false);
        }

        let Some((profile, role)) = self.find_account(id) else {
            warn!(user = id, "Login for unknown user");
            return Err(RegistrationError::UnknownUser { id: id.to_string() });
        };

        if !profile.password().verify(password) {
            warn!(user = id, ?role, "Login rejected, wrong password");
            return Ok(false);
        }

        let session = Session::new(profile.id().clone(), role);
        info!(
            user = %session.user(),
            ?role,
            correlation_id = %session.correlation_id(),
            "User logged in"
        );
        self.session = Some(session);
        Ok(true)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                user = %session.user(),
                correlation_id = %session.correlation_id(),
                "User logged out"
            );
        }
    }

    fn find_account(&self, id: &str) -> Option<(&UserProfile, Role)> {
        if self.registrar.id().as_str() == id {
            return Some((&self.registrar, Role::Registrar));
        }
        let id = UserId::parse(id).ok()?;
        if let Some(student) = self.students.get(&id) {
            return Some((student.profile(), Role::Student));
        }
        self.faculty
            .get(&id)
            .map(|faculty| (faculty.profile(), Role::Faculty))
    }

    /// Returns a copy of the session if a student is logged in.
    fn student_session(&self, action: &'static str) -> Result<Session, RegistrationError> {
        match &self.session {
            Some(session) if session.role() == Role::Student => Ok(session.clone()),
            _ => Err(RegistrationError::IllegalAction { action }),
        }
    }

    /// Enrolls the logged-in student in `key`.
    ///
    /// The student's credit limit and schedule are checked before the roll
    /// is touched, so a rejected request leaves the roll unchanged. A
    /// waitlisted student still gets the course on their schedule.
    ///
    /// # Returns
    /// * `Ok(EnrollmentStatus)` - Enrolled or waitlisted
    /// * `Err` - No student logged in, unknown course, or an admission rule
    ///   turned the request away (see [`RegistrationError::is_rejection`])
    pub fn enroll_student_in_course(
        &mut self,
        key: &CourseKey,
    ) -> Result<EnrollmentStatus, RegistrationError> {
        let session = self.student_session("enroll")?;
        let user = session.user();

        let course = self
            .catalog
            .get_mut(key)
            .ok_or_else(|| RegistrationError::UnknownCourse { key: key.clone() })?;
        let student = self
            .students
            .get_mut(user)
            .ok_or_else(|| RegistrationError::UnknownUser { id: user.to_string() })?;

        let entry = course.entry();
        student.check_add(&entry)?;
        if !course.roll().can_enroll(user) {
            return Err(RollError::CannotEnroll {
                student: user.to_string(),
            }
            .into());
        }

        student.schedule_mut().try_add(entry)?;
        let status = match course.roll_mut().enroll(user) {
            Ok(status) => status,
            Err(e) => {
                student.schedule_mut().remove(key);
                return Err(e.into());
            }
        };

        info!(
            course = %key,
            student = %user,
            ?status,
            correlation_id = %session.correlation_id(),
            "Registration accepted"
        );
        Ok(status)
    }

    /// Drops the logged-in student from `key`.
    ///
    /// A freed seat goes to the head of the waitlist, whose schedule is
    /// updated in the same step.
    ///
    /// # Returns
    /// * `Ok(true)` - The course was removed from the student's schedule
    /// * `Ok(false)` - The course was not on the student's schedule
    pub fn drop_student_from_course(&mut self, key: &CourseKey) -> Result<bool, RegistrationError> {
        let session = self.student_session("drop")?;
        let user = session.user();

        let course = self
            .catalog
            .get_mut(key)
            .ok_or_else(|| RegistrationError::UnknownCourse { key: key.clone() })?;
        let outcome = course.drop_student(user, &mut self.students)?;

        let student = self
            .students
            .get_mut(user)
            .ok_or_else(|| RegistrationError::UnknownUser { id: user.to_string() })?;
        let removed = student.schedule_mut().remove(key);

        info!(
            course = %key,
            student = %user,
            ?outcome,
            correlation_id = %session.correlation_id(),
            "Drop processed"
        );
        Ok(removed)
    }

    /// Drops the logged-in student from every scheduled course, then resets
    /// their schedule.
    pub fn reset_schedule(&mut self) -> Result<(), RegistrationError> {
        let session = self.student_session("reset schedule")?;
        let user = session.user();

        let keys: Vec<CourseKey> = self
            .students
            .get(user)
            .ok_or_else(|| RegistrationError::UnknownUser { id: user.to_string() })?
            .schedule()
            .course_keys()
            .cloned()
            .collect();

        for key in &keys {
            match self.catalog.get_mut(key) {
                Some(course) => {
                    course.drop_student(user, &mut self.students)?;
                }
                None => debug!(course = %key, "Scheduled course no longer in catalog"),
            }
        }

        if let Some(student) = self.students.get_mut(user) {
            student.schedule_mut().reset();
        }
        info!(
            student = %user,
            dropped = keys.len(),
            correlation_id = %session.correlation_id(),
            "Schedule reset"
        );
        Ok(())
    }

    /// Removes a student from the directory after dropping them from every
    /// roster and waitlist in the catalog.
    ///
    /// Seats they free are filled from each course's waitlist. Ends the
    /// session if the student was logged in.
    ///
    /// # Returns
    /// * `Ok(Student)` - The removed student
    /// * `Err(RegistrationError::UnknownUser)` - No student has this id
    pub fn remove_student(&mut self, id: &UserId) -> Result<Student, RegistrationError> {
        if !self.students.contains(id) {
            return Err(RegistrationError::UnknownUser { id: id.to_string() });
        }

        let mut dropped = 0;
        for course in self.catalog.iter_mut() {
            let outcome = course.drop_student(id, &mut self.students)?;
            if outcome.removed() {
                debug!(course = %course.key(), student = %id, ?outcome, "Dropped removed student");
                dropped += 1;
            }
        }

        if self.current_user() == Some(id) {
            self.logout();
        }
        let student = self
            .students
            .remove(id)
            .ok_or_else(|| RegistrationError::UnknownUser { id: id.to_string() })?;
        info!(student = %id, dropped, "Removed student from directory");
        Ok(student)
    }

    /// Removes a faculty member from the directory.
    pub fn remove_faculty(&mut self, id: &UserId) -> Result<Faculty, RegistrationError> {
        if self.current_user() == Some(id) {
            self.logout();
        }
        let faculty = self
            .faculty
            .remove(id)
            .ok_or_else(|| RegistrationError::UnknownUser { id: id.to_string() })?;
        info!(faculty = %id, "Removed faculty from directory");
        Ok(faculty)
    }

    /// Empties the catalog and both directories and ends the session.
    pub fn clear_data(&mut self) {
        self.catalog.clear();
        self.students.clear();
        self.faculty.clear();
        self.logout();
        info!("Registration data cleared");
    }
}
