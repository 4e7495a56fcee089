use crate::{
    entities::{school_classes, subjects, teacher_school_classes, teacher_subjects, teachers},
    error::ServiceError,
};
use models::access::{AccessContext, Capability};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct TeacherService;

impl TeacherService {
    /// Subjects the teacher is assigned to teach
    pub async fn subjects_for_teacher(
        db: &DatabaseConnection,
        access: &AccessContext,
        teacher_id: i32,
    ) -> Result<Vec<subjects::Model>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;
        Self::find_teacher(db, teacher_id).await?;

        let subjects = teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .order_by_asc(teacher_subjects::Column::SubjectId)
            .find_also_related(subjects::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, subject)| subject)
            .collect();

        Ok(subjects)
    }

    /// School classes the teacher is assigned to
    pub async fn classes_for_teacher(
        db: &DatabaseConnection,
        access: &AccessContext,
        teacher_id: i32,
    ) -> Result<Vec<school_classes::Model>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;
        Self::find_teacher(db, teacher_id).await?;

        let classes = teacher_school_classes::Entity::find()
            .filter(teacher_school_classes::Column::TeacherId.eq(teacher_id))
            .order_by_asc(teacher_school_classes::Column::SchoolClassId)
            .find_also_related(school_classes::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, class)| class)
            .collect();

        Ok(classes)
    }

    async fn find_teacher(
        db: &DatabaseConnection,
        teacher_id: i32,
    ) -> Result<teachers::Model, ServiceError> {
        teachers::Entity::find_by_id(teacher_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures;

    #[tokio::test]
    async fn test_teacher_links() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let admin = fixtures::admin();

        let databases = fixtures::insert_subject(db, "Databases", 30).await;
        let networks = fixtures::insert_subject(db, "Networks", 25).await;
        fixtures::insert_subject(db, "Drawing", 10).await;
        let class = fixtures::insert_class(db, "TPSI-01", None).await;
        fixtures::insert_class(db, "TPSI-02", None).await;

        let teacher = fixtures::insert_teacher(db, "Marta", "Reis").await;
        fixtures::link_teacher_subject(db, teacher, networks).await;
        fixtures::link_teacher_subject(db, teacher, databases).await;
        fixtures::link_teacher_class(db, teacher, class).await;

        let subjects = TeacherService::subjects_for_teacher(db, &admin, teacher)
            .await
            .unwrap();
        let ids: Vec<i32> = subjects.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![databases, networks]);

        let classes = TeacherService::classes_for_teacher(db, &admin, teacher)
            .await
            .unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_name, "TPSI-01");
    }

    #[tokio::test]
    async fn test_teacher_without_links() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let teacher = fixtures::insert_teacher(db, "Marta", "Reis").await;

        let subjects = TeacherService::subjects_for_teacher(db, &fixtures::admin(), teacher)
            .await
            .unwrap();
        assert!(subjects.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_teacher() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;

        let result = TeacherService::classes_for_teacher(db, &fixtures::admin(), 9).await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound { entity: "teacher", id: 9 })
        ));
    }

    #[tokio::test]
    async fn test_students_cannot_list_teacher_links() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let teacher = fixtures::insert_teacher(db, "Marta", "Reis").await;

        let result =
            TeacherService::subjects_for_teacher(db, &AccessContext::student("kid", 1), teacher)
                .await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }
}
