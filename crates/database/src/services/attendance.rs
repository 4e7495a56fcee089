use crate::{
    entities::{attendances, students, subjects},
    error::ServiceError,
    services::{
        enrollment::EnrollmentService, school_class::SchoolClassService, student::StudentService,
    },
};
use futures::future::try_join_all;
use log::debug;
use models::{
    access::{AccessContext, Capability},
    status::AttendanceStatus,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// Attendance figures of one student in one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAttendance {
    pub subject_id: i32,
    pub subject_name: String,
    /// Every recorded row for the pair, whatever its presence flag
    pub total_absences: u64,
    pub total_classes: i32,
    pub can_record_more: bool,
    pub status: AttendanceStatus,
    /// The recorded rows, oldest first
    pub records: Vec<attendances::Model>,
}

impl SubjectAttendance {
    fn new(subject: &subjects::Model, records: Vec<attendances::Model>) -> Self {
        let recorded = records.len() as u64;
        Self {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            total_absences: recorded,
            total_classes: subject.total_classes,
            can_record_more: recorded < u64::try_from(subject.total_classes).unwrap_or(0),
            status: AttendanceStatus::for_subject(recorded, i64::from(subject.total_classes)),
            records,
        }
    }
}

/// Attendance figures of one student across every subject they are enrolled in
#[derive(Debug, Clone, PartialEq)]
pub struct OverallAttendance {
    pub total_classes: i64,
    pub total_absences: u64,
    pub status: AttendanceStatus,
}

impl OverallAttendance {
    fn new(total_classes: i64, total_absences: u64) -> Self {
        Self {
            total_classes,
            total_absences,
            status: AttendanceStatus::overall(total_absences, total_classes),
        }
    }
}

/// Everything a student's attendance page shows
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceReport {
    pub student_id: i32,
    pub student_name: String,
    pub overall: OverallAttendance,
    pub subjects: Vec<SubjectAttendance>,
}

/// One row of a class-wide attendance listing
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAttendanceSummary {
    pub student_id: i32,
    pub student_name: String,
    pub overall: OverallAttendance,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Total number of class sessions a student is expected to attend
    pub async fn total_classes_owed(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<i64, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        let student = StudentService::find_student(db, student_id).await?;
        Ok(Self::classes_owed(db, &student).await?)
    }

    pub async fn subject_attendance_status(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
        subject_id: i32,
    ) -> Result<SubjectAttendance, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        StudentService::find_student(db, student_id).await?;
        let subject = StudentService::find_subject(db, subject_id).await?;

        let records = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(student_id))
            .filter(attendances::Column::SubjectId.eq(subject_id))
            .order_by_asc(attendances::Column::Date)
            .order_by_asc(attendances::Column::Id)
            .all(db)
            .await?;

        Ok(SubjectAttendance::new(&subject, records))
    }

    pub async fn overall_attendance_status(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<OverallAttendance, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        let student = StudentService::find_student(db, student_id).await?;
        Ok(Self::overall_for(db, &student).await?)
    }

    /// Overall figures plus one entry per enrolled subject
    pub async fn attendance_report(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<AttendanceReport, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        let student = StudentService::find_student(db, student_id).await?;
        let subjects = EnrollmentService::subjects_for(db, &student).await?;

        let records = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(student_id))
            .order_by_asc(attendances::Column::Date)
            .order_by_asc(attendances::Column::Id)
            .all(db)
            .await?;

        // Rows for subjects outside the current enrollment still count overall
        let total_absences = records.len() as u64;
        let mut records_by_subject: HashMap<i32, Vec<attendances::Model>> = HashMap::new();
        for record in records {
            records_by_subject
                .entry(record.subject_id)
                .or_default()
                .push(record);
        }

        let total_classes = subjects.iter().map(|s| i64::from(s.total_classes)).sum();
        let subject_rows = subjects
            .iter()
            .map(|subject| {
                let records = records_by_subject.remove(&subject.id).unwrap_or_default();
                SubjectAttendance::new(subject, records)
            })
            .collect();

        Ok(AttendanceReport {
            student_id,
            student_name: student.full_name(),
            overall: OverallAttendance::new(total_classes, total_absences),
            subjects: subject_rows,
        })
    }

    /// Overall attendance of every student in a school class
    pub async fn class_overview(
        db: &DatabaseConnection,
        access: &AccessContext,
        class_id: i32,
    ) -> Result<Vec<StudentAttendanceSummary>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;
        let students = SchoolClassService::class_students(db, class_id).await?;
        debug!(
            "Computing attendance for {} students of class {class_id}",
            students.len()
        );

        let summaries = students.into_iter().map(|student| async move {
            let overall = Self::overall_for(db, &student).await?;
            Ok::<_, DbErr>(StudentAttendanceSummary {
                student_id: student.id,
                student_name: student.full_name(),
                overall,
            })
        });

        Ok(try_join_all(summaries).await?)
    }

    async fn classes_owed(db: &DatabaseConnection, student: &students::Model) -> Result<i64, DbErr> {
        let subjects = EnrollmentService::subjects_for(db, student).await?;
        Ok(subjects.iter().map(|s| i64::from(s.total_classes)).sum())
    }

    async fn overall_for(
        db: &DatabaseConnection,
        student: &students::Model,
    ) -> Result<OverallAttendance, DbErr> {
        let total_classes = Self::classes_owed(db, student).await?;

        // Rows for subjects outside the current enrollment still count
        let total_absences = attendances::Entity::find()
            .filter(attendances::Column::StudentId.eq(student.id))
            .count(db)
            .await?;

        Ok(OverallAttendance::new(total_classes, total_absences))
    }
}
