use crate::{
    entities::{students, subjects},
    error::ServiceError,
};
use models::access::{AccessContext, Capability};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct StudentService;

impl StudentService {
    /// Get a single student the caller is allowed to see
    pub async fn get_student(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<students::Model, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        Self::find_student(db, student_id).await
    }

    /// Look up the student linked to an identity-provider subject
    pub async fn find_by_user_id(
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub(crate) async fn find_student(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<students::Model, ServiceError> {
        students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", student_id))
    }

    pub(crate) async fn find_subject(
        db: &DatabaseConnection,
        subject_id: i32,
    ) -> Result<subjects::Model, ServiceError> {
        subjects::Entity::find_by_id(subject_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("subject", subject_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures;

    #[tokio::test]
    async fn test_find_by_user_id() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let id = fixtures::insert_student(db, "Ana", "Silva", None).await;
        fixtures::link_user(db, id, "oidc|ana").await;

        let found = StudentService::find_by_user_id(db, "oidc|ana").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(id));

        let missing = StudentService::find_by_user_id(db, "oidc|nobody")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_student_checks_access_then_existence() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let id = fixtures::insert_student(db, "Ana", "Silva", None).await;

        let own = AccessContext::student("ana", id);
        let student = StudentService::get_student(db, &own, id).await.unwrap();
        assert_eq!(student.full_name(), "Ana Silva");

        let other = AccessContext::student("rui", id + 1);
        assert!(matches!(
            StudentService::get_student(db, &other, id).await,
            Err(ServiceError::Forbidden(_))
        ));

        assert!(matches!(
            StudentService::get_student(db, &fixtures::admin(), 999).await,
            Err(ServiceError::NotFound { entity: "student", id: 999 })
        ));
    }
}
