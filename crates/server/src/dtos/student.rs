use crate::dtos::{record::AttendanceResponse, round_grade};
use chrono::NaiveDateTime;
use database::{
    entities::{grades, subjects},
    services::{
        attendance::{AttendanceReport, OverallAttendance, SubjectAttendance},
        grade::{GradeReport, SubjectGrade},
    },
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub total_classes: i32,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(subject: subjects::Model) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
            description: subject.description,
            credits: subject.credits,
            total_classes: subject.total_classes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectAttendanceResponse {
    pub subject_id: i32,
    pub subject_name: String,
    pub total_absences: u64,
    pub total_classes: i32,
    pub can_record_more: bool,
    /// "Passed", "Failed" or "No classes available"
    pub status: String,
    /// Recorded rows, oldest first
    pub records: Vec<AttendanceResponse>,
}

impl From<SubjectAttendance> for SubjectAttendanceResponse {
    fn from(attendance: SubjectAttendance) -> Self {
        Self {
            subject_id: attendance.subject_id,
            subject_name: attendance.subject_name,
            total_absences: attendance.total_absences,
            total_classes: attendance.total_classes,
            can_record_more: attendance.can_record_more,
            status: attendance.status.to_string(),
            records: attendance.records.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverallAttendanceResponse {
    pub total_classes: i64,
    pub total_absences: u64,
    pub status: String,
}

impl From<OverallAttendance> for OverallAttendanceResponse {
    fn from(overall: OverallAttendance) -> Self {
        Self {
            total_classes: overall.total_classes,
            total_absences: overall.total_absences,
            status: overall.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceReportResponse {
    pub student_id: i32,
    pub student_name: String,
    pub overall: OverallAttendanceResponse,
    pub subjects: Vec<SubjectAttendanceResponse>,
}

impl From<AttendanceReport> for AttendanceReportResponse {
    fn from(report: AttendanceReport) -> Self {
        Self {
            student_id: report.student_id,
            student_name: report.student_name,
            overall: report.overall.into(),
            subjects: report.subjects.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub value: f64,
    pub evaluation_date: NaiveDateTime,
    pub status: String,
}

impl From<grades::Model> for GradeResponse {
    fn from(grade: grades::Model) -> Self {
        Self {
            status: grade.status().to_string(),
            id: grade.id,
            student_id: grade.student_id,
            subject_id: grade.subject_id,
            value: round_grade(grade.value),
            evaluation_date: grade.evaluation_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectGradeResponse {
    pub subject_id: i32,
    pub subject_name: String,
    pub credits: i32,
    pub grade: Option<GradeResponse>,
    pub status: Option<String>,
}

impl From<SubjectGrade> for SubjectGradeResponse {
    fn from(subject: SubjectGrade) -> Self {
        Self {
            subject_id: subject.subject_id,
            subject_name: subject.subject_name,
            credits: subject.credits,
            grade: subject.grade.map(Into::into),
            status: subject.status.map(|status| status.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeReportResponse {
    pub student_id: i32,
    pub student_name: String,
    pub subjects: Vec<SubjectGradeResponse>,
    pub average: f64,
    pub status: String,
}

impl From<GradeReport> for GradeReportResponse {
    fn from(report: GradeReport) -> Self {
        Self {
            student_id: report.student_id,
            student_name: report.student_name,
            subjects: report.subjects.into_iter().map(Into::into).collect(),
            average: round_grade(report.average),
            status: report.status.to_string(),
        }
    }
}

/// The grade displayed for one subject, absent until the subject is graded
#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectGradeLookupResponse {
    pub student_id: i32,
    pub subject_id: i32,
    pub grade: Option<GradeResponse>,
}
