use chrono::NaiveDateTime;
use database::{
    entities::attendances,
    services::records::{AttendanceChanges, GradeChanges, NewAttendance, NewGrade},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewGradeRequest {
    pub student_id: i32,
    pub subject_id: i32,
    /// Between 0 and 20
    pub value: f64,
    pub evaluation_date: NaiveDateTime,
}

impl From<NewGradeRequest> for NewGrade {
    fn from(request: NewGradeRequest) -> Self {
        Self {
            student_id: request.student_id,
            subject_id: request.subject_id,
            value: request.value,
            evaluation_date: request.evaluation_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeChangesRequest {
    pub value: f64,
    pub evaluation_date: NaiveDateTime,
}

impl From<GradeChangesRequest> for GradeChanges {
    fn from(request: GradeChangesRequest) -> Self {
        Self {
            value: request.value,
            evaluation_date: request.evaluation_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewAttendanceRequest {
    pub student_id: i32,
    pub subject_id: i32,
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

impl From<NewAttendanceRequest> for NewAttendance {
    fn from(request: NewAttendanceRequest) -> Self {
        Self {
            student_id: request.student_id,
            subject_id: request.subject_id,
            date: request.date,
            description: request.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceChangesRequest {
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

impl From<AttendanceChangesRequest> for AttendanceChanges {
    fn from(request: AttendanceChangesRequest) -> Self {
        Self {
            date: request.date,
            description: request.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceResponse {
    pub id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    /// "Present" or "Absent". Every row counts towards the absence totals.
    pub presence: String,
}

impl From<attendances::Model> for AttendanceResponse {
    fn from(attendance: attendances::Model) -> Self {
        Self {
            presence: attendance.presence().to_string(),
            id: attendance.id,
            student_id: attendance.student_id,
            subject_id: attendance.subject_id,
            date: attendance.date,
            description: attendance.description,
        }
    }
}
