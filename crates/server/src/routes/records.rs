use crate::{
    dtos::{
        record::{
            AttendanceChangesRequest, AttendanceResponse, GradeChangesRequest,
            NewAttendanceRequest, NewGradeRequest,
        },
        student::GradeResponse,
    },
    routes::{auth::Caller, error_status},
};
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{post, put},
};
use database::services::records::RecordService;
use sea_orm::DatabaseConnection;

pub fn router() -> Router {
    Router::new()
        .route("/grades", post(create_grade))
        .route("/grades/{id}", put(update_grade).delete(delete_grade))
        .route("/attendances", post(create_attendance))
        .route(
            "/attendances/{id}",
            put(update_attendance).delete(delete_attendance),
        )
}

/// Record a grade
#[utoipa::path(
    post,
    path = "/grades",
    request_body = NewGradeRequest,
    responses(
        (status = 201, description = "Grade recorded", body = GradeResponse),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Student or subject not found"),
        (status = 422, description = "Grade outside 0..=20")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn create_grade(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Json(request): Json<NewGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), StatusCode> {
    let grade = RecordService::add_grade(&db, &access, request.into())
        .await
        .map_err(error_status)?;

    Ok((StatusCode::CREATED, Json(grade.into())))
}

/// Change the value or date of a grade
#[utoipa::path(
    put,
    path = "/grades/{id}",
    params(
        ("id" = i32, Path, description = "Grade ID")
    ),
    request_body = GradeChangesRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Grade not found"),
        (status = 422, description = "Grade outside 0..=20")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn update_grade(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
    Json(request): Json<GradeChangesRequest>,
) -> Result<Json<GradeResponse>, StatusCode> {
    let grade = RecordService::update_grade(&db, &access, id, request.into())
        .await
        .map_err(error_status)?;

    Ok(Json(grade.into()))
}

/// Delete a grade
#[utoipa::path(
    delete,
    path = "/grades/{id}",
    params(
        ("id" = i32, Path, description = "Grade ID")
    ),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Grade not found")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn delete_grade(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    RecordService::delete_grade(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record an attendance row for a student in a subject
#[utoipa::path(
    post,
    path = "/attendances",
    request_body = NewAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Student or subject not found"),
        (status = 409, description = "Subject already has as many rows as classes")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn create_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Json(request): Json<NewAttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceResponse>), StatusCode> {
    let attendance = RecordService::add_attendance(&db, &access, request.into())
        .await
        .map_err(error_status)?;

    Ok((StatusCode::CREATED, Json(attendance.into())))
}

/// Change the date or description of an attendance row
#[utoipa::path(
    put,
    path = "/attendances/{id}",
    params(
        ("id" = i32, Path, description = "Attendance ID")
    ),
    request_body = AttendanceChangesRequest,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceResponse),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Attendance not found")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn update_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
    Json(request): Json<AttendanceChangesRequest>,
) -> Result<Json<AttendanceResponse>, StatusCode> {
    let attendance = RecordService::update_attendance(&db, &access, id, request.into())
        .await
        .map_err(error_status)?;

    Ok(Json(attendance.into()))
}

/// Delete an attendance row
#[utoipa::path(
    delete,
    path = "/attendances/{id}",
    params(
        ("id" = i32, Path, description = "Attendance ID")
    ),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Attendance not found")
    ),
    security(("jwt" = [])),
    tag = "Records"
)]
pub async fn delete_attendance(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    RecordService::delete_attendance(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(StatusCode::NO_CONTENT)
}
