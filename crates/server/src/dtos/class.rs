use crate::dtos::{round_grade, student::OverallAttendanceResponse};
use chrono::NaiveDate;
use database::{
    entities::{school_classes, students},
    services::{attendance::StudentAttendanceSummary, grade::StudentGradeSummary},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolClassResponse {
    pub id: i32,
    pub class_name: String,
    pub course_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<school_classes::Model> for SchoolClassResponse {
    fn from(class: school_classes::Model) -> Self {
        Self {
            id: class.id,
            class_name: class.class_name,
            course_id: class.course_id,
            start_date: class.start_date,
            end_date: class.end_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub enrollment_date: Option<NaiveDate>,
    pub school_class_id: Option<i32>,
}

impl From<students::Model> for StudentResponse {
    fn from(student: students::Model) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            status: student.status.to_string(),
            enrollment_date: student.enrollment_date,
            school_class_id: student.school_class_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAttendanceSummaryResponse {
    pub student_id: i32,
    pub student_name: String,
    pub overall: OverallAttendanceResponse,
}

impl From<StudentAttendanceSummary> for StudentAttendanceSummaryResponse {
    fn from(summary: StudentAttendanceSummary) -> Self {
        Self {
            student_id: summary.student_id,
            student_name: summary.student_name,
            overall: summary.overall.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentGradeSummaryResponse {
    pub student_id: i32,
    pub student_name: String,
    pub average: f64,
    pub status: String,
}

impl From<StudentGradeSummary> for StudentGradeSummaryResponse {
    fn from(summary: StudentGradeSummary) -> Self {
        Self {
            student_id: summary.student_id,
            student_name: summary.student_name,
            average: round_grade(summary.average),
            status: summary.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::student_status::StudentStatus;

    #[test]
    fn test_student_response_leaves_out_login() {
        let response = StudentResponse::from(students::Model {
            id: 4,
            user_id: Some("oidc|ana".to_string()),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 16),
            status: StudentStatus::Active,
            school_class_id: Some(2),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "Active");
        assert_eq!(json["school_class_id"], 2);
        assert!(json.get("user_id").is_none());
    }
}
