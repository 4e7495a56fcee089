use crate::{
    entities::{school_classes, students},
    error::ServiceError,
};
use models::access::{AccessContext, Capability};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct SchoolClassService;

impl SchoolClassService {
    /// Classes that have no course yet and can be assigned to one
    pub async fn available_classes(
        db: &DatabaseConnection,
        access: &AccessContext,
    ) -> Result<Vec<school_classes::Model>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;

        let classes = school_classes::Entity::find()
            .filter(school_classes::Column::CourseId.is_null())
            .order_by_asc(school_classes::Column::ClassName)
            .all(db)
            .await?;

        Ok(classes)
    }

    pub async fn students_in_class(
        db: &DatabaseConnection,
        access: &AccessContext,
        class_id: i32,
    ) -> Result<Vec<students::Model>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;
        Self::class_students(db, class_id).await
    }

    pub(crate) async fn class_students(
        db: &DatabaseConnection,
        class_id: i32,
    ) -> Result<Vec<students::Model>, ServiceError> {
        if school_classes::Entity::find_by_id(class_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("school class", class_id));
        }

        let students = students::Entity::find()
            .filter(students::Column::SchoolClassId.eq(class_id))
            .order_by_asc(students::Column::LastName)
            .order_by_asc(students::Column::FirstName)
            .all(db)
            .await?;

        Ok(students)
    }
}
