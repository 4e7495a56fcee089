use models::access::AccessDenied;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("grade {0} must be between 0 and 20")]
    InvalidGrade(f64),

    #[error(
        "student {student_id} already has {total_classes} attendance records for subject {subject_id}"
    )]
    AttendanceLimitReached {
        student_id: i32,
        subject_id: i32,
        total_classes: i32,
    },

    #[error("Database error occurred")]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<models::status::GradeOutOfRange> for ServiceError {
    fn from(err: models::status::GradeOutOfRange) -> Self {
        Self::InvalidGrade(err.0)
    }
}
