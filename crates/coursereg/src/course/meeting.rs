//! Meeting footprints and the time-conflict predicate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CourseError;

const UPPER_HOUR: u16 = 24;
const UPPER_MINUTE: u16 = 60;

/// Marker used for arranged meetings in day codes.
pub const ARRANGED_CODE: &str = "A";

/// A teaching day, written with a single letter (`H` is Thursday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'H' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'H',
            Weekday::Friday => 'F',
        }
    }
}

/// When an activity meets.
///
/// Days and times only ever change together through [`MeetingPattern::new`],
/// so an arranged pattern can never carry a time range. Deserialization goes
/// through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MeetingRecord", into = "MeetingRecord")]
pub enum MeetingPattern {
    /// No fixed meeting time
    Arranged,
    /// Meets on fixed days at a fixed time
    Weekly(WeeklyMeeting),
}

/// Validated days and time range of a weekly meeting.
///
/// Fields are private; the only way to build one is [`MeetingPattern::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyMeeting {
    days: Vec<Weekday>,
    start: u16,
    end: u16,
}

impl WeeklyMeeting {
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Start time as `HHMM` on a 24 hour clock.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// End time as `HHMM` on a 24 hour clock, never before the start.
    pub fn end(&self) -> u16 {
        self.end
    }

    fn shares_day_with(&self, other: &WeeklyMeeting) -> bool {
        self.days.iter().any(|day| other.days.contains(day))
    }
}

/// Unvalidated day code and times, as written in config and records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub days: String,
    #[serde(default)]
    pub start: u16,
    #[serde(default)]
    pub end: u16,
}

impl TryFrom<MeetingRecord> for MeetingPattern {
    type Error = CourseError;

    fn try_from(record: MeetingRecord) -> Result<Self, Self::Error> {
        MeetingPattern::new(&record.days, record.start, record.end)
    }
}

impl From<MeetingPattern> for MeetingRecord {
    fn from(pattern: MeetingPattern) -> Self {
        MeetingRecord {
            days: pattern.days_code(),
            start: pattern.start_time(),
            end: pattern.end_time(),
        }
    }
}

impl MeetingPattern {
    /// Validates a day code and time range.
    ///
    /// # Arguments
    /// * `days` - `"A"` for arranged, otherwise distinct letters from `MTWHF`
    /// * `start` - Start time as `HHMM`; must be 0 when arranged
    /// * `end` - End time as `HHMM`; must be 0 when arranged, otherwise `>= start`
    ///
    /// # Returns
    /// * `Ok(MeetingPattern)` - The validated pattern
    /// * `Err(CourseError::InvalidMeeting)` - If any part is malformed
    pub fn new(days: &str, start: u16, end: u16) -> Result<Self, CourseError> {
        if days.is_empty() {
            return Err(CourseError::meeting("no meeting days"));
        }

        if days == ARRANGED_CODE {
            if start != 0 || end != 0 {
                return Err(CourseError::meeting("arranged meetings cannot have times"));
            }
            return Ok(MeetingPattern::Arranged);
        }

        let mut parsed: Vec<Weekday> = Vec::with_capacity(days.len());
        for letter in days.chars() {
            let day = Weekday::from_letter(letter)
                .ok_or_else(|| CourseError::meeting(format!("unknown day {letter:?}")))?;
            if parsed.contains(&day) {
                return Err(CourseError::meeting(format!("day {letter:?} repeated")));
            }
            parsed.push(day);
        }

        if end < start {
            return Err(CourseError::meeting("end time before start time"));
        }
        validate_clock(start)?;
        validate_clock(end)?;

        Ok(MeetingPattern::Weekly(WeeklyMeeting {
            days: parsed,
            start,
            end,
        }))
    }

    pub fn is_arranged(&self) -> bool {
        matches!(self, MeetingPattern::Arranged)
    }

    /// Day code as written in records, e.g. `"MW"` or `"A"`.
    pub fn days_code(&self) -> String {
        match self {
            MeetingPattern::Arranged => ARRANGED_CODE.to_string(),
            MeetingPattern::Weekly(weekly) => weekly.days.iter().map(|d| d.letter()).collect(),
        }
    }

    pub fn start_time(&self) -> u16 {
        match self {
            MeetingPattern::Arranged => 0,
            MeetingPattern::Weekly(weekly) => weekly.start,
        }
    }

    pub fn end_time(&self) -> u16 {
        match self {
            MeetingPattern::Arranged => 0,
            MeetingPattern::Weekly(weekly) => weekly.end,
        }
    }

    /// Human-readable form such as `"MW 1:30PM-2:45PM"` or `"Arranged"`.
    pub fn meeting_string(&self) -> String {
        self.to_string()
    }

    pub fn conflicts_with(&self, other: &MeetingPattern) -> bool {
        conflicts(self, other)
    }
}

impl fmt::Display for MeetingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingPattern::Arranged => f.write_str("Arranged"),
            MeetingPattern::Weekly(weekly) => write!(
                f,
                "{} {}-{}",
                self.days_code(),
                twelve_hour(weekly.start),
                twelve_hour(weekly.end)
            ),
        }
    }
}

fn validate_clock(time: u16) -> Result<(), CourseError> {
    if time / 100 >= UPPER_HOUR {
        return Err(CourseError::meeting(format!("hour out of range in {time}")));
    }
    if time % 100 >= UPPER_MINUTE {
        return Err(CourseError::meeting(format!("minute out of range in {time}")));
    }
    Ok(())
}

fn twelve_hour(time: u16) -> String {
    let hour = time / 100;
    let minute = time % 100;
    let (display_hour, suffix) = match hour {
        0 => (12, "AM"),
        12 => (12, "PM"),
        h if h > 12 => (h - 12, "PM"),
        h => (h, "AM"),
    };
    format!("{display_hour}:{minute:02}{suffix}")
}

/// Decides whether two meeting patterns overlap.
///
/// Arranged patterns never conflict. Otherwise the patterns must share a day,
/// and `a` must neither lie strictly before `b` nor strictly after it. Ranges
/// that merely touch (`a` ends at the minute `b` starts) are a conflict.
pub fn conflicts(a: &MeetingPattern, b: &MeetingPattern) -> bool {
    let (MeetingPattern::Weekly(a), MeetingPattern::Weekly(b)) = (a, b) else {
        return false;
    };

    if !a.shares_day_with(b) {
        return false;
    }
    if a.start < b.start && a.end < b.start {
        return false;
    }
    if a.start > b.end && a.end > b.end {
        return false;
    }
    true
}

/// Anything with a title and a meeting footprint.
pub trait Activity {
    fn title(&self) -> &str;

    fn meeting(&self) -> &MeetingPattern;

    fn conflicts_with<A: Activity + ?Sized>(&self, other: &A) -> bool
    where
        Self: Sized,
    {
        conflicts(self.meeting(), other.meeting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly(days: &str, start: u16, end: u16) -> MeetingPattern {
        MeetingPattern::new(days, start, end).unwrap()
    }

    #[test]
    fn test_arranged_requires_zero_times() {
        assert_eq!(MeetingPattern::new("A", 0, 0), Ok(MeetingPattern::Arranged));
        assert!(MeetingPattern::new("A", 1330, 1445).is_err());
        assert!(MeetingPattern::new("A", 0, 1445).is_err());
    }

    #[test]
    fn test_invalid_days() {
        assert!(MeetingPattern::new("", 1330, 1445).is_err());
        assert!(MeetingPattern::new("MM", 1330, 1445).is_err());
        assert!(MeetingPattern::new("MA", 1330, 1445).is_err());
        assert!(MeetingPattern::new("MS", 1330, 1445).is_err());
    }

    #[test]
    fn test_invalid_times() {
        assert!(MeetingPattern::new("MW", 1445, 1330).is_err());
        assert!(MeetingPattern::new("MW", 2400, 2400).is_err());
        assert!(MeetingPattern::new("MW", 1360, 1400).is_err());
        assert!(MeetingPattern::new("MW", 1300, 1375).is_err());
        assert!(MeetingPattern::new("MW", 0, 2359).is_ok());
    }

    #[test]
    fn test_meeting_string() {
        assert_eq!(weekly("MW", 1330, 1445).meeting_string(), "MW 1:30PM-2:45PM");
        assert_eq!(weekly("TH", 0, 1205).meeting_string(), "TH 12:00AM-12:05PM");
        assert_eq!(weekly("F", 905, 1150).meeting_string(), "F 9:05AM-11:50AM");
        assert_eq!(MeetingPattern::Arranged.meeting_string(), "Arranged");
    }

    #[test]
    fn test_days_code_keeps_input_order() {
        assert_eq!(weekly("WM", 800, 900).days_code(), "WM");
        assert_eq!(MeetingPattern::Arranged.days_code(), "A");
    }

    #[test]
    fn test_disjoint_days_never_conflict() {
        let a = weekly("MW", 1330, 1445);
        let b = weekly("TH", 1330, 1445);
        assert!(!conflicts(&a, &b));
        assert!(!conflicts(&b, &a));
    }

    #[test]
    fn test_arranged_never_conflicts() {
        let a = weekly("MTWHF", 0, 2359);
        assert!(!conflicts(&a, &MeetingPattern::Arranged));
        assert!(!conflicts(&MeetingPattern::Arranged, &MeetingPattern::Arranged));
    }

    #[test]
    fn test_touching_boundary_conflicts() {
        let a = weekly("MW", 1330, 1445);
        let b = weekly("W", 1445, 1530);
        assert!(conflicts(&a, &b));
        assert!(conflicts(&b, &a));
    }

    #[test]
    fn test_strictly_before_does_not_conflict() {
        let a = weekly("MW", 1330, 1444);
        let b = weekly("W", 1445, 1530);
        assert!(!conflicts(&a, &b));
        assert!(!conflicts(&b, &a));
    }

    #[test]
    fn test_overlap_and_containment_conflict() {
        let a = weekly("MW", 1330, 1445);
        assert!(conflicts(&a, &weekly("M", 1400, 1500)));
        assert!(conflicts(&a, &weekly("M", 1345, 1400)));
        assert!(conflicts(&a, &weekly("M", 1200, 1600)));
        assert!(conflicts(&a, &a.clone()));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MeetingPattern =
            serde_json::from_str(r#"{"days":"MW","start":1330,"end":1445}"#).unwrap();
        assert_eq!(ok, weekly("MW", 1330, 1445));
        let arranged: MeetingPattern = serde_json::from_str(r#"{"days":"A"}"#).unwrap();
        assert!(arranged.is_arranged());

        for bad in [
            r#"{"days":"","start":9999,"end":0}"#,
            r#"{"days":"MM","start":1200,"end":1300}"#,
            r#"{"days":"M","start":2500,"end":100}"#,
            r#"{"days":"A","start":800,"end":900}"#,
        ] {
            assert!(
                serde_json::from_str::<MeetingPattern>(bad).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_serialize_round_trips_through_record() {
        let pattern = weekly("TH", 905, 1020);
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, r#"{"days":"TH","start":905,"end":1020}"#);
        assert_eq!(serde_json::from_str::<MeetingPattern>(&json).unwrap(), pattern);
    }

    #[test]
    fn test_weekly_accessors() {
        let MeetingPattern::Weekly(meeting) = weekly("WM", 800, 915) else {
            panic!("expected a weekly meeting");
        };
        assert_eq!(meeting.days(), &[Weekday::Wednesday, Weekday::Monday]);
        assert_eq!(meeting.start(), 800);
        assert_eq!(meeting.end(), 915);
    }
}
