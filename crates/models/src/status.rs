use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Lowest grade a student can receive
pub const MIN_GRADE: f64 = 0.0;
/// Highest grade a student can receive
pub const MAX_GRADE: f64 = 20.0;
/// Grades at or above this value pass
pub const PASSING_GRADE: f64 = 9.5;

/// Rejected grade value, outside of `MIN_GRADE..=MAX_GRADE`
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("grade {0} must be between 0 and 20")]
pub struct GradeOutOfRange(pub f64);

/// Checks that a grade value is within the allowed scale
pub fn validate_grade(value: f64) -> Result<f64, GradeOutOfRange> {
    if (MIN_GRADE..=MAX_GRADE).contains(&value) {
        Ok(value)
    } else {
        Err(GradeOutOfRange(value))
    }
}

/// Pass/fail outcome of a single grade or of a grade average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradeStatus {
    Passed,
    Failed,
}

impl GradeStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= PASSING_GRADE {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

impl Display for GradeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Outcome of an attendance check, either for one subject or across all of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Passed,
    Failed,
    /// The subject has no scheduled classes, so no ratio can be computed
    #[serde(rename = "No classes available")]
    NoClassesAvailable,
}

impl AttendanceStatus {
    /// Per-subject rule: failing requires strictly more than 20% of the classes missed.
    pub fn for_subject(total_absences: u64, total_classes: i64) -> Self {
        if total_classes == 0 {
            return Self::NoClassesAvailable;
        }

        // absences > total * 0.2
        if i128::from(total_absences) * 5 > i128::from(total_classes) {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    /// Overall rule: missing 30% or more of all owed classes fails.
    ///
    /// Unlike the per-subject rule this comparison is inclusive, and there is no
    /// zero-classes short circuit: a student with nothing owed and nothing
    /// recorded sits exactly on the threshold.
    pub fn overall(total_absences: u64, total_classes: i64) -> Self {
        // absences >= total * 0.3
        if i128::from(total_absences) * 10 >= i128::from(total_classes) * 3 {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::NoClassesAvailable => "No classes available",
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Presence flag of a single attendance row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    /// A row with a non-empty description records a presence
    pub fn from_description(description: Option<&str>) -> Self {
        match description {
            Some(text) if !text.is_empty() => Self::Present,
            _ => Self::Absent,
        }
    }
}

impl Display for Presence {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Present => write!(f, "Present"),
            Self::Absent => write!(f, "Absent"),
        }
    }
}

/// Arithmetic mean of the given grade values, or 0 when there are none
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_status_boundary() {
        assert_eq!(GradeStatus::from_value(9.5), GradeStatus::Passed);
        assert_eq!(GradeStatus::from_value(9.49), GradeStatus::Failed);
        assert_eq!(GradeStatus::from_value(20.0), GradeStatus::Passed);
        assert_eq!(GradeStatus::from_value(0.0), GradeStatus::Failed);
    }

    #[test]
    fn test_validate_grade() {
        assert_eq!(validate_grade(0.0), Ok(0.0));
        assert_eq!(validate_grade(20.0), Ok(20.0));
        assert_eq!(validate_grade(12.75), Ok(12.75));
        assert_eq!(validate_grade(-0.5), Err(GradeOutOfRange(-0.5)));
        assert_eq!(validate_grade(20.01), Err(GradeOutOfRange(20.01)));
        assert!(validate_grade(f64::NAN).is_err());
    }

    #[test]
    fn test_subject_attendance_over_limit() {
        // 9 > 30 * 0.2
        assert_eq!(AttendanceStatus::for_subject(9, 30), AttendanceStatus::Failed);
        assert_eq!(AttendanceStatus::for_subject(6, 30), AttendanceStatus::Passed);
        assert_eq!(AttendanceStatus::for_subject(7, 30), AttendanceStatus::Failed);
    }

    #[test]
    fn test_subject_attendance_boundary_is_exclusive() {
        assert_eq!(AttendanceStatus::for_subject(5, 25), AttendanceStatus::Passed);
        assert_eq!(AttendanceStatus::for_subject(6, 25), AttendanceStatus::Failed);
    }

    #[test]
    fn test_subject_without_classes() {
        assert_eq!(
            AttendanceStatus::for_subject(0, 0),
            AttendanceStatus::NoClassesAvailable
        );
        assert_eq!(
            AttendanceStatus::for_subject(12, 0),
            AttendanceStatus::NoClassesAvailable
        );
        assert_eq!(
            AttendanceStatus::for_subject(3, 0).to_string(),
            "No classes available"
        );
    }

    #[test]
    fn test_negative_class_total_fails() {
        assert_eq!(AttendanceStatus::for_subject(0, -4), AttendanceStatus::Failed);
        assert_eq!(AttendanceStatus::for_subject(2, -1), AttendanceStatus::Failed);
    }

    #[test]
    fn test_overall_attendance_boundary_is_inclusive() {
        // 55 * 0.3 = 16.5
        assert_eq!(AttendanceStatus::overall(16, 55), AttendanceStatus::Passed);
        assert_eq!(AttendanceStatus::overall(17, 55), AttendanceStatus::Failed);

        // 10 * 0.3 = 3, exactly on the threshold
        assert_eq!(AttendanceStatus::overall(3, 10), AttendanceStatus::Failed);
        assert_eq!(AttendanceStatus::overall(2, 10), AttendanceStatus::Passed);
    }

    #[test]
    fn test_overall_attendance_with_nothing_owed() {
        assert_eq!(AttendanceStatus::overall(0, 0), AttendanceStatus::Failed);
    }

    #[test]
    fn test_presence_from_description() {
        assert_eq!(Presence::from_description(Some("on time")), Presence::Present);
        assert_eq!(Presence::from_description(Some("")), Presence::Absent);
        assert_eq!(Presence::from_description(None), Presence::Absent);
    }

    #[test]
    fn test_average() {
        let avg = average(&[8.0, 9.5, 12.0]);
        assert!((avg - 9.833_333).abs() < 1e-5);
        assert_eq!(GradeStatus::from_value(avg), GradeStatus::Passed);

        let avg = average(&[8.0, 9.0]);
        assert_eq!(avg, 8.5);
        assert_eq!(GradeStatus::from_value(avg), GradeStatus::Failed);

        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_status_serializes_as_variant_name() {
        assert_eq!(
            serde_json::to_string(&GradeStatus::Passed).unwrap(),
            "\"Passed\""
        );
    }
}
