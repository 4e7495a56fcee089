use crate::{
    entities::{course_subjects, school_classes, students, subjects},
    error::ServiceError,
    services::student::StudentService,
};
use log::debug;
use models::access::{AccessContext, Capability};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct EnrollmentService;

impl EnrollmentService {
    /// Subjects a student is accountable for, following
    /// student → school class → course → course_subjects → subject.
    ///
    /// A student without a class, or whose class has no course, is simply not
    /// enrolled in anything yet and gets an empty list.
    pub async fn resolve_subjects(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<Vec<subjects::Model>, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        let student = StudentService::find_student(db, student_id).await?;
        Ok(Self::subjects_for(db, &student).await?)
    }

    pub(crate) async fn subjects_for(
        db: &DatabaseConnection,
        student: &students::Model,
    ) -> Result<Vec<subjects::Model>, DbErr> {
        let Some(class_id) = student.school_class_id else {
            debug!("Student {} has no school class", student.id);
            return Ok(vec![]);
        };

        let course_id = school_classes::Entity::find_by_id(class_id)
            .one(db)
            .await?
            .and_then(|class| class.course_id);

        let Some(course_id) = course_id else {
            debug!("School class {class_id} of student {} has no course", student.id);
            return Ok(vec![]);
        };

        let subjects = course_subjects::Entity::find()
            .filter(course_subjects::Column::CourseId.eq(course_id))
            .order_by_asc(course_subjects::Column::SubjectId)
            .find_also_related(subjects::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, subject)| subject)
            .collect();

        Ok(subjects)
    }
}
