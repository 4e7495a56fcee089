use crate::{
    dtos::{class::SchoolClassResponse, student::SubjectResponse},
    routes::{auth::Caller, error_status},
};
use axum::{Extension, Json, Router, extract::Path, http::StatusCode, routing::get};
use database::services::teacher::TeacherService;
use sea_orm::DatabaseConnection;

pub fn router() -> Router {
    Router::new()
        .route("/teachers/{id}/subjects", get(get_teacher_subjects))
        .route("/teachers/{id}/classes", get(get_teacher_classes))
}

/// Subjects a teacher teaches
#[utoipa::path(
    get,
    path = "/teachers/{id}/subjects",
    params(
        ("id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Assigned subjects", body = Vec<SubjectResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Teacher not found")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_subjects(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SubjectResponse>>, StatusCode> {
    let subjects = TeacherService::subjects_for_teacher(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

/// School classes a teacher is assigned to
#[utoipa::path(
    get,
    path = "/teachers/{id}/classes",
    params(
        ("id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Assigned classes", body = Vec<SchoolClassResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Teacher not found")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_classes(
    Extension(db): Extension<DatabaseConnection>,
    Caller(access): Caller,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SchoolClassResponse>>, StatusCode> {
    let classes = TeacherService::classes_for_teacher(&db, &access, id)
        .await
        .map_err(error_status)?;

    Ok(Json(classes.into_iter().map(Into::into).collect()))
}
