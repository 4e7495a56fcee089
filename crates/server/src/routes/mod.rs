use axum::http::StatusCode;
use database::error::ServiceError;
use log::{error, warn};

pub mod auth;
pub mod classes;
pub mod health;
pub mod records;
pub mod root;
pub mod students;
pub mod teachers;

/// Maps a service failure onto the response status
pub fn error_status(err: ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Forbidden(denied) => {
            warn!("{denied}");
            StatusCode::FORBIDDEN
        }
        ServiceError::InvalidGrade(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::AttendanceLimitReached { .. } => StatusCode::CONFLICT,
        ServiceError::Db(err) => {
            error!("Database error: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
