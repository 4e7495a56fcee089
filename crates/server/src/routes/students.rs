use crate::{
    dtos::{
        class::StudentResponse,
        student::{
            AttendanceReportResponse, GradeReportResponse, SubjectAttendanceResponse,
            SubjectGradeLookupResponse, SubjectResponse,
        },
    },
    routes::{auth::Caller, error_status},
};
use axum::{Extension, Json, Router, extract::Path, http::StatusCode, routing::get};
use database::services::{
    attendance::AttendanceService, enrollment::EnrollmentService, grade::GradeService,
    student::StudentService,
};
use models::access::AccessContext;
use sea_orm::DatabaseConnection;

pub fn router() -> Router {
    Router::new()
        .route("/students/{id}", get(get_student))
        .route("/students/{id}/subjects", get(get_student_subjects))
        .route("/students/{id}/attendance", get(get_student_attendance))
        .route(
            "/students/{id}/attendance/{subject_id}",
            get(get_subject_attendance),
        )
        .route("/students/{id}/grades", get(get_student_grades))
        .route("/students/{id}/grades/{subject_id}", get(get_subject_grade))
        .route("/me/attendance", get(get_my_attendance))
        .route("/me/grades", get(get_my_grades))
}

/// Get a student's profile
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, StatusCode> {
    let student = StudentService::get_student(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(student.into()))
}

/// Get the subjects a student is enrolled in through their class and course
#[utoipa::path(
    get,
    path = "/students/{id}/subjects",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Enrolled subjects, empty when unassigned", body = Vec<SubjectResponse>),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student_subjects(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SubjectResponse>>, StatusCode> {
    let subjects = EnrollmentService::resolve_subjects(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

/// Get overall and per-subject attendance of a student
#[utoipa::path(
    get,
    path = "/students/{id}/attendance",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Attendance report", body = AttendanceReportResponse),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<AttendanceReportResponse>, StatusCode> {
    attendance_report(&db, &access, id).await
}

/// Get attendance of a student in one subject
#[utoipa::path(
    get,
    path = "/students/{id}/attendance/{subject_id}",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject attendance", body = SubjectAttendanceResponse),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student or subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_subject_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path((id, subject_id)): Path<(i32, i32)>,
) -> Result<Json<SubjectAttendanceResponse>, StatusCode> {
    let attendance = AttendanceService::subject_attendance_status(&db, &access, id, subject_id)
        .await
        .map_err(error_status)?;

    Ok(Json(attendance.into()))
}

/// Get the displayed grade per enrolled subject and the overall average
#[utoipa::path(
    get,
    path = "/students/{id}/grades",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Grade report", body = GradeReportResponse),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student_grades(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<GradeReportResponse>, StatusCode> {
    grade_report(&db, &access, id).await
}

/// Get the grade shown for a student in one subject
#[utoipa::path(
    get,
    path = "/students/{id}/grades/{subject_id}",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Latest grade, null when not graded yet", body = SubjectGradeLookupResponse),
        (status = 403, description = "Caller may not view this student"),
        (status = 404, description = "Student or subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_subject_grade(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path((id, subject_id)): Path<(i32, i32)>,
) -> Result<Json<SubjectGradeLookupResponse>, StatusCode> {
    let grade = GradeService::subject_grade(&db, &access, id, subject_id)
        .await
        .map_err(error_status)?;

    Ok(Json(SubjectGradeLookupResponse {
        student_id: id,
        subject_id,
        grade: grade.map(Into::into),
    }))
}

/// Attendance report of the authenticated student
#[utoipa::path(
    get,
    path = "/me/attendance",
    responses(
        (status = 200, description = "Attendance report", body = AttendanceReportResponse),
        (status = 404, description = "Caller is not linked to a student record"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_my_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
) -> Result<Json<AttendanceReportResponse>, StatusCode> {
    let id = access.student_id.ok_or(StatusCode::NOT_FOUND)?;
    attendance_report(&db, &access, id).await
}

/// Grade report of the authenticated student
#[utoipa::path(
    get,
    path = "/me/grades",
    responses(
        (status = 200, description = "Grade report", body = GradeReportResponse),
        (status = 404, description = "Caller is not linked to a student record"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_my_grades(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
) -> Result<Json<GradeReportResponse>, StatusCode> {
    let id = access.student_id.ok_or(StatusCode::NOT_FOUND)?;
    grade_report(&db, &access, id).await
}

async fn attendance_report(
    db: &DatabaseConnection,
    access: &AccessContext,
    student_id: i32,
) -> Result<Json<AttendanceReportResponse>, StatusCode> {
    let report = AttendanceService::attendance_report(db, access, student_id)
        .await
        .map_err(error_status)?;

    Ok(Json(report.into()))
}

async fn grade_report(
    db: &DatabaseConnection,
    access: &AccessContext,
    student_id: i32,
) -> Result<Json<GradeReportResponse>, StatusCode> {
    let report = GradeService::grade_report(db, access, student_id)
        .await
        .map_err(error_status)?;

    Ok(Json(report.into()))
}
