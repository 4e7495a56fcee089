use crate::{
    dtos::class::{
        SchoolClassResponse, StudentAttendanceSummaryResponse, StudentGradeSummaryResponse,
        StudentResponse,
    },
    routes::{auth::Caller, error_status},
};
use axum::{Extension, Json, Router, extract::Path, http::StatusCode, routing::get};
use database::services::{
    attendance::AttendanceService, grade::GradeService, school_class::SchoolClassService,
};
use sea_orm::DatabaseConnection;

pub fn router() -> Router {
    Router::new()
        .route("/classes/available", get(get_available_classes))
        .route("/classes/{id}/students", get(get_class_students))
        .route("/classes/{id}/attendance", get(get_class_attendance))
        .route("/classes/{id}/grades", get(get_class_grades))
}

/// List school classes that are not yet following a course
#[utoipa::path(
    get,
    path = "/classes/available",
    responses(
        (status = 200, description = "Classes without a course", body = Vec<SchoolClassResponse>),
        (status = 403, description = "Staff only"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Classes"
)]
pub async fn get_available_classes(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
) -> Result<Json<Vec<SchoolClassResponse>>, StatusCode> {
    let classes = SchoolClassService::available_classes(&db, &access)
        .await
        .map_err(error_status)?;

    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

/// List the students of a school class
#[utoipa::path(
    get,
    path = "/classes/{id}/students",
    params(
        ("id" = i32, Path, description = "School class ID")
    ),
    responses(
        (status = 200, description = "Students ordered by name", body = Vec<StudentResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "School class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Classes"
)]
pub async fn get_class_students(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, StatusCode> {
    let students = SchoolClassService::students_in_class(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Overall attendance of every student in a school class
#[utoipa::path(
    get,
    path = "/classes/{id}/attendance",
    params(
        ("id" = i32, Path, description = "School class ID")
    ),
    responses(
        (status = 200, description = "One row per student", body = Vec<StudentAttendanceSummaryResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "School class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Classes"
)]
pub async fn get_class_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentAttendanceSummaryResponse>>, StatusCode> {
    let rows = AttendanceService::class_overview(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Grade average of every student in a school class
#[utoipa::path(
    get,
    path = "/classes/{id}/grades",
    params(
        ("id" = i32, Path, description = "School class ID")
    ),
    responses(
        (status = 200, description = "One row per student", body = Vec<StudentGradeSummaryResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "School class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Classes"
)]
pub async fn get_class_grades(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentGradeSummaryResponse>>, StatusCode> {
    let rows = GradeService::class_overview(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
