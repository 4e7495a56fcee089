use crate::{
    entities::{attendances, grades, students, subjects},
    error::ServiceError,
};
use chrono::NaiveDateTime;
use log::info;
use models::{
    access::{AccessContext, Capability},
    status::validate_grade,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

/// A grade to record for one (student, subject) pair
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i32,
    pub subject_id: i32,
    pub value: f64,
    pub evaluation_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct GradeChanges {
    pub value: f64,
    pub evaluation_date: NaiveDateTime,
}

/// An attendance row to record for one (student, subject) pair
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i32,
    pub subject_id: i32,
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AttendanceChanges {
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

/// Writes to grades and attendance. Only staff may call these.
pub struct RecordService;

impl RecordService {
    pub async fn add_grade(
        db: &DatabaseConnection,
        access: &AccessContext,
        grade: NewGrade,
    ) -> Result<grades::Model, ServiceError> {
        access.check(Capability::ManageRecords)?;
        let value = validate_grade(grade.value)?;
        ensure_exists::<students::Entity, _>(db, "student", grade.student_id).await?;
        ensure_exists::<subjects::Entity, _>(db, "subject", grade.subject_id).await?;

        let model = grades::ActiveModel {
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id),
            value: Set(value),
            evaluation_date: Set(grade.evaluation_date),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Recorded grade {} for student {} in subject {}",
            model.id, model.student_id, model.subject_id
        );
        Ok(model)
    }

    pub async fn update_grade(
        db: &DatabaseConnection,
        access: &AccessContext,
        grade_id: i32,
        changes: GradeChanges,
    ) -> Result<grades::Model, ServiceError> {
        access.check(Capability::ManageRecords)?;
        let value = validate_grade(changes.value)?;

        let grade = grades::Entity::find_by_id(grade_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("grade", grade_id))?;

        let mut active: grades::ActiveModel = grade.into();
        active.value = Set(value);
        active.evaluation_date = Set(changes.evaluation_date);
        Ok(active.update(db).await?)
    }

    pub async fn delete_grade(
        db: &DatabaseConnection,
        access: &AccessContext,
        grade_id: i32,
    ) -> Result<(), ServiceError> {
        access.check(Capability::ManageRecords)?;

        let grade = grades::Entity::find_by_id(grade_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("grade", grade_id))?;
        grade.delete(db).await?;

        info!("Deleted grade {grade_id}");
        Ok(())
    }

    /// Records an attendance row, refusing once the pair already has as many
    /// rows as the subject has classes
    pub async fn add_attendance(
        db: &DatabaseConnection,
        access: &AccessContext,
        attendance: NewAttendance,
    ) -> Result<attendances::Model, ServiceError> {
        access.check(Capability::ManageRecords)?;

        let txn = db.begin().await?;
        ensure_exists::<students::Entity, _>(&txn, "student", attendance.student_id).await?;
        let subject = subjects::Entity::find_by_id(attendance.subject_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("subject", attendance.subject_id))?;

        let recorded = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(attendance.student_id))
            .filter(attendances::Column::SubjectId.eq(attendance.subject_id))
            .count(&txn)
            .await?;

        if recorded >= u64::try_from(subject.total_classes).unwrap_or(0) {
            return Err(ServiceError::AttendanceLimitReached {
                student_id: attendance.student_id,
                subject_id: attendance.subject_id,
                total_classes: subject.total_classes,
            });
        }

        let model = attendances::ActiveModel {
            student_id: Set(attendance.student_id),
            subject_id: Set(attendance.subject_id),
            date: Set(attendance.date),
            description: Set(attendance.description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Recorded attendance {} for student {} in subject {} ({}/{})",
            model.id,
            model.student_id,
            model.subject_id,
            recorded + 1,
            subject.total_classes
        );
        Ok(model)
    }

    pub async fn update_attendance(
        db: &DatabaseConnection,
        access: &AccessContext,
        attendance_id: i32,
        changes: AttendanceChanges,
    ) -> Result<attendances::Model, ServiceError> {
        access.check(Capability::ManageRecords)?;

        let attendance = attendances::Entity::find_by_id(attendance_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("attendance", attendance_id))?;

        let mut active: attendances::ActiveModel = attendance.into();
        active.date = Set(changes.date);
        active.description = Set(changes.description);
        Ok(active.update(db).await?)
    }

    pub async fn delete_attendance(
        db: &DatabaseConnection,
        access: &AccessContext,
        attendance_id: i32,
    ) -> Result<(), ServiceError> {
        access.check(Capability::ManageRecords)?;

        let attendance = attendances::Entity::find_by_id(attendance_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("attendance", attendance_id))?;
        attendance.delete(db).await?;

        info!("Deleted attendance {attendance_id}");
        Ok(())
    }
}

async fn ensure_exists<E, C>(db: &C, entity: &'static str, id: i32) -> Result<(), ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: sea_orm::PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    if E::find_by_id(id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(entity, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{attendance::AttendanceService, fixtures};
    use models::status::AttendanceStatus;

    fn new_grade(student_id: i32, subject_id: i32, value: f64) -> NewGrade {
        NewGrade {
            student_id,
            subject_id,
            value,
            evaluation_date: fixtures::day(1),
        }
    }

    fn new_attendance(student_id: i32, subject_id: i32) -> NewAttendance {
        NewAttendance {
            student_id,
            subject_id,
            date: fixtures::day(1),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_add_update_delete_grade() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let admin = fixtures::admin();
        let subject = fixtures::insert_subject(db, "Databases", 30).await;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;

        let grade = RecordService::add_grade(db, &admin, new_grade(student, subject, 9.0))
            .await
            .unwrap();
        assert_eq!(grade.value, 9.0);

        let changes = GradeChanges {
            value: 9.5,
            evaluation_date: fixtures::day(4),
        };
        let updated = RecordService::update_grade(db, &admin, grade.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.value, 9.5);
        assert_eq!(updated.evaluation_date, fixtures::day(4));

        RecordService::delete_grade(db, &admin, grade.id).await.unwrap();
        assert!(matches!(
            RecordService::delete_grade(db, &admin, grade.id).await,
            Err(ServiceError::NotFound { entity: "grade", .. })
        ));
    }

    #[tokio::test]
    async fn test_grade_out_of_scale_is_rejected() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let subject = fixtures::insert_subject(db, "Databases", 30).await;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;

        let result =
            RecordService::add_grade(db, &fixtures::admin(), new_grade(student, subject, 20.5)).await;
        assert!(matches!(result, Err(ServiceError::InvalidGrade(v)) if v == 20.5));
    }

    #[tokio::test]
    async fn test_grade_for_unknown_subject() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;

        let result =
            RecordService::add_grade(db, &fixtures::admin(), new_grade(student, 77, 10.0)).await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound { entity: "subject", id: 77 })
        ));
    }

    #[tokio::test]
    async fn test_students_cannot_write_records() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let subject = fixtures::insert_subject(db, "Databases", 30).await;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;
        let ana = AccessContext::student("ana", student);

        assert!(matches!(
            RecordService::add_grade(db, &ana, new_grade(student, subject, 20.0)).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            RecordService::add_attendance(db, &ana, new_attendance(student, subject)).await,
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_attendance_stops_at_total_classes() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let admin = fixtures::admin();
        let subject = fixtures::insert_subject(db, "Workshop", 2).await;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;

        for _ in 0..2 {
            RecordService::add_attendance(db, &admin, new_attendance(student, subject))
                .await
                .unwrap();
        }

        let result = RecordService::add_attendance(db, &admin, new_attendance(student, subject)).await;
        assert!(matches!(
            result,
            Err(ServiceError::AttendanceLimitReached { total_classes: 2, .. })
        ));

        let status = AttendanceService::subject_attendance_status(db, &admin, student, subject)
            .await
            .unwrap();
        assert_eq!(status.total_absences, 2);
        assert!(!status.can_record_more);
        assert_eq!(status.status, AttendanceStatus::Failed);
    }

    #[tokio::test]
    async fn test_update_and_delete_attendance() {
        let test_db = fixtures::setup().await;
        let db = &test_db.db;
        let admin = fixtures::admin();
        let subject = fixtures::insert_subject(db, "Databases", 30).await;
        let student = fixtures::insert_student(db, "Ana", "Silva", None).await;

        let row = RecordService::add_attendance(db, &admin, new_attendance(student, subject))
            .await
            .unwrap();
        assert_eq!(row.presence(), models::status::Presence::Absent);

        let changes = AttendanceChanges {
            date: fixtures::day(2),
            description: Some("arrived late".to_string()),
        };
        let updated = RecordService::update_attendance(db, &admin, row.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.presence(), models::status::Presence::Present);

        RecordService::delete_attendance(db, &admin, row.id).await.unwrap();
        let status = AttendanceService::subject_attendance_status(db, &admin, student, subject)
            .await
            .unwrap();
        assert_eq!(status.total_absences, 0);
    }
}
