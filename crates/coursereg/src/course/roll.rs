//! Roster and waitlist for a single course.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::RollError;
use super::name::CourseKey;
use crate::collections::{BoundedFifoQueue, BoundedUniqueSequence, CollectionError};
use crate::user::{Schedule, ScheduleError, ScheduledCourse, UserId};

/// Smallest permitted enrollment cap.
pub const MIN_ENROLLMENT: usize = 10;
/// Largest permitted enrollment cap.
pub const MAX_ENROLLMENT: usize = 250;
/// Fixed waitlist size, independent of the enrollment cap.
pub const WAITLIST_CAPACITY: usize = 10;

/// Where a student landed after a successful [`CourseRoll::enroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnrollmentStatus {
    Enrolled,
    Waitlisted,
}

/// Why a waitlisted student could not be moved into a freed seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionBlock {
    /// The student has no schedule to update
    UnknownStudent,
    /// The student's schedule no longer accepts the course
    ScheduleRejected(ScheduleError),
    /// The roster refused the student
    RosterRejected(CollectionError),
}

/// A waitlisted student removed from the waitlist because they could not
/// take a freed seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPromotion {
    pub student: UserId,
    pub reason: PromotionBlock,
}

/// Students moved off the waitlist while filling open seats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Promotions {
    /// Took a seat, in waitlist order
    pub promoted: Vec<UserId>,
    /// Left the waitlist without a seat, in waitlist order
    pub skipped: Vec<SkippedPromotion>,
}

/// Result of [`CourseRoll::drop_student`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The student was neither enrolled nor waitlisted
    NotOnRoll,
    /// The student left the roster; the freed seat went to the waitlist
    Dropped(Promotions),
    /// The student left the waitlist
    LeftWaitlist,
}

impl DropOutcome {
    /// Returns true if the student was removed from the roll in any way.
    pub fn removed(&self) -> bool {
        !matches!(self, DropOutcome::NotOnRoll)
    }

    /// Students who took the freed seat.
    pub fn promoted(&self) -> &[UserId] {
        match self {
            DropOutcome::Dropped(promotions) => &promotions.promoted,
            _ => &[],
        }
    }
}

/// Gives the roll access to a promoted student's schedule.
///
/// Promotion moves a student into the roster and records the course on their
/// schedule in one step, so the roll borrows both mutably for the duration.
pub trait ScheduleLookup {
    fn schedule_mut(&mut self, student: &UserId) -> Option<&mut Schedule>;
}

impl ScheduleLookup for HashMap<UserId, Schedule> {
    fn schedule_mut(&mut self, student: &UserId) -> Option<&mut Schedule> {
        self.get_mut(student)
    }
}

/// Capacity-bounded roster plus a fixed-size FIFO waitlist for one course.
///
/// Invariants:
/// - `roster.len() <= enrollment_cap`
/// - `waitlist.len() <= WAITLIST_CAPACITY`
/// - no student appears twice, in either list or across both
#[derive(Debug, Clone)]
pub struct CourseRoll {
    course: CourseKey,
    enrollment_cap: usize,
    roster: BoundedUniqueSequence<UserId>,
    waitlist: BoundedFifoQueue<UserId>,
}

impl CourseRoll {
    /// Creates an empty roll.
    ///
    /// # Arguments
    /// * `enrollment_cap` - Roster size, `MIN_ENROLLMENT..=MAX_ENROLLMENT`
    /// * `course` - Key of the owning course
    pub fn new(enrollment_cap: usize, course: CourseKey) -> Result<Self, RollError> {
        check_cap(enrollment_cap)?;
        Ok(Self {
            course,
            enrollment_cap,
            roster: BoundedUniqueSequence::new(enrollment_cap),
            waitlist: BoundedFifoQueue::new(WAITLIST_CAPACITY),
        })
    }

    pub fn course(&self) -> &CourseKey {
        &self.course
    }

    pub fn enrollment_cap(&self) -> usize {
        self.enrollment_cap
    }

    /// Changes the enrollment cap and resizes the roster to match.
    pub fn set_enrollment_cap(&mut self, enrollment_cap: usize) -> Result<(), RollError> {
        check_cap(enrollment_cap)?;
        if enrollment_cap < self.roster.len() {
            return Err(RollError::CapacityBelowRosterSize {
                requested: enrollment_cap,
                roster_len: self.roster.len(),
            });
        }
        self.roster.set_capacity(enrollment_cap)?;
        self.enrollment_cap = enrollment_cap;
        debug!(course = %self.course, enrollment_cap, "Updated enrollment cap");
        Ok(())
    }

    /// Seats left on the roster.
    pub fn open_seats(&self) -> i64 {
        self.enrollment_cap as i64 - self.roster.len() as i64
    }

    pub fn waitlist_len(&self) -> usize {
        self.waitlist.len()
    }

    pub fn roster(&self) -> &[UserId] {
        self.roster.as_slice()
    }

    /// Waitlisted students, head first.
    pub fn waitlist(&self) -> impl Iterator<Item = &UserId> {
        self.waitlist.iter()
    }

    pub fn is_enrolled(&self, student: &UserId) -> bool {
        self.roster.contains(student)
    }

    pub fn is_waitlisted(&self, student: &UserId) -> bool {
        self.waitlist.contains(student)
    }

    /// Returns true if `student` could be enrolled or waitlisted right now.
    pub fn can_enroll(&self, student: &UserId) -> bool {
        if self.waitlist.contains(student) {
            return false;
        }
        if self.roster.len() + self.waitlist.len() >= self.enrollment_cap + WAITLIST_CAPACITY {
            return false;
        }
        if self.routes_to_waitlist() && self.waitlist.is_full() {
            return false;
        }
        !self.roster.contains(student)
    }

    /// New students queue behind anyone already waiting, even when a seat is
    /// open after a cap increase.
    fn routes_to_waitlist(&self) -> bool {
        self.roster.len() == self.enrollment_cap || !self.waitlist.is_empty()
    }

    /// Enrolls `student`, or waitlists them when every seat is taken.
    ///
    /// # Returns
    /// * `Ok(EnrollmentStatus)` - Whether the student got a seat or a waitlist slot
    /// * `Err(RollError::CannotEnroll)` - If [`can_enroll`](Self::can_enroll) is false
    pub fn enroll(&mut self, student: &UserId) -> Result<EnrollmentStatus, RollError> {
        if !self.can_enroll(student) {
            return Err(RollError::CannotEnroll {
                student: student.to_string(),
            });
        }

        if self.routes_to_waitlist() {
            self.waitlist.enqueue(student.clone())?;
            info!(
                course = %self.course,
                student = %student,
                position = self.waitlist.len(),
                "Student waitlisted"
            );
            Ok(EnrollmentStatus::Waitlisted)
        } else {
            self.roster.push(student.clone())?;
            info!(course = %self.course, student = %student, "Student enrolled");
            Ok(EnrollmentStatus::Enrolled)
        }
    }

    /// Removes `student` from the roster or the waitlist.
    ///
    /// When a roster seat frees up it is offered to the waitlist in order,
    /// and `course` is recorded on the promoted student's schedule through
    /// `schedules`. See [`promote_waitlisted`](Self::promote_waitlisted).
    ///
    /// # Arguments
    /// * `student` - Student leaving the course
    /// * `course` - Schedule entry for this roll's course
    /// * `schedules` - Schedules of waitlisted students
    pub fn drop_student<L>(
        &mut self,
        student: &UserId,
        course: &ScheduledCourse,
        schedules: &mut L,
    ) -> Result<DropOutcome, RollError>
    where
        L: ScheduleLookup + ?Sized,
    {
        if let Some(index) = self.roster.index_of(student) {
            self.roster.remove_at(index)?;
            info!(course = %self.course, student = %student, "Student dropped from roster");
            return Ok(DropOutcome::Dropped(self.promote_waitlisted(course, schedules)));
        }

        if self.waitlist.remove_first(student).is_some() {
            info!(course = %self.course, student = %student, "Student left waitlist");
            return Ok(DropOutcome::LeftWaitlist);
        }

        debug!(course = %self.course, student = %student, "Drop ignored, student not on roll");
        Ok(DropOutcome::NotOnRoll)
    }

    /// Moves waitlisted students into open seats, head first.
    ///
    /// A head that cannot be placed (no schedule, or the schedule rejects the
    /// course) is taken off the waitlist and reported as skipped, and the seat
    /// is offered to the next in line. On return either every seat is taken
    /// or the waitlist is empty.
    pub fn promote_waitlisted<L>(&mut self, course: &ScheduledCourse, schedules: &mut L) -> Promotions
    where
        L: ScheduleLookup + ?Sized,
    {
        let mut promotions = Promotions::default();
        while self.roster.len() < self.enrollment_cap {
            let Ok(candidate) = self.waitlist.dequeue() else {
                break;
            };
            match self.place(&candidate, course, schedules) {
                Ok(()) => {
                    info!(course = %self.course, student = %candidate, "Promoted student from waitlist");
                    promotions.promoted.push(candidate);
                }
                Err(reason) => {
                    warn!(
                        course = %self.course,
                        student = %candidate,
                        ?reason,
                        "Waitlisted student skipped, cannot take the seat"
                    );
                    promotions.skipped.push(SkippedPromotion {
                        student: candidate,
                        reason,
                    });
                }
            }
        }
        promotions
    }

    /// Seats `candidate` and records the course on their schedule, or
    /// changes neither.
    fn place<L>(
        &mut self,
        candidate: &UserId,
        course: &ScheduledCourse,
        schedules: &mut L,
    ) -> Result<(), PromotionBlock>
    where
        L: ScheduleLookup + ?Sized,
    {
        let schedule = schedules
            .schedule_mut(candidate)
            .ok_or(PromotionBlock::UnknownStudent)?;

        // Registration records the course on a waitlisted student's schedule
        // up front, so it is usually already present.
        let needs_entry = !schedule.contains(course.key());
        if needs_entry {
            schedule.check(course).map_err(PromotionBlock::ScheduleRejected)?;
        }

        self.roster
            .push(candidate.clone())
            .map_err(PromotionBlock::RosterRejected)?;

        if needs_entry {
            if let Err(e) = schedule.try_add(course.clone()) {
                warn!(course = %self.course, student = %candidate, error = %e, "Schedule update failed after promotion");
            }
        }
        Ok(())
    }
}

fn check_cap(enrollment_cap: usize) -> Result<(), RollError> {
    if !(MIN_ENROLLMENT..=MAX_ENROLLMENT).contains(&enrollment_cap) {
        return Err(RollError::InvalidCapacity {
            requested: enrollment_cap,
            min: MIN_ENROLLMENT,
            max: MAX_ENROLLMENT,
        });
    }
    Ok(())
}
