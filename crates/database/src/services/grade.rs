use crate::{
    entities::{grades, students},
    error::ServiceError,
    services::{
        enrollment::EnrollmentService, school_class::SchoolClassService, student::StudentService,
    },
};
use futures::future::try_join_all;
use log::debug;
use models::{
    access::{AccessContext, Capability},
    status::{self, GradeStatus},
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

/// A subject a student is enrolled in, with the grade shown for it
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectGrade {
    pub subject_id: i32,
    pub subject_name: String,
    pub credits: i32,
    pub grade: Option<grades::Model>,
    /// `None` until the subject has been graded
    pub status: Option<GradeStatus>,
}

/// Everything a student's grades page shows
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub student_id: i32,
    pub student_name: String,
    pub subjects: Vec<SubjectGrade>,
    pub average: f64,
    pub status: GradeStatus,
}

/// One row of a class-wide grade listing
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGradeSummary {
    pub student_id: i32,
    pub student_name: String,
    pub average: f64,
    pub status: GradeStatus,
}

pub struct GradeService;

impl GradeService {
    /// The grade displayed for a (student, subject) pair.
    ///
    /// Several grades may exist for the same pair; the most recent evaluation
    /// wins, and the highest id breaks ties between evaluations on the same date.
    pub async fn subject_grade(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
        subject_id: i32,
    ) -> Result<Option<grades::Model>, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        StudentService::find_student(db, student_id).await?;
        StudentService::find_subject(db, subject_id).await?;

        let grade = grades::Entity::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .filter(grades::Column::SubjectId.eq(subject_id))
            .order_by_desc(grades::Column::EvaluationDate)
            .order_by_desc(grades::Column::Id)
            .one(db)
            .await?;

        Ok(grade)
    }

    /// Mean of every grade the student holds, in any subject. 0 without grades.
    pub async fn overall_grade_average(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<f64, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        StudentService::find_student(db, student_id).await?;
        Ok(Self::average_for(db, student_id).await?)
    }

    pub async fn overall_grade_status(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<GradeStatus, ServiceError> {
        let average = Self::overall_grade_average(db, access, student_id).await?;
        Ok(GradeStatus::from_value(average))
    }

    /// Enrolled subjects with their displayed grade, plus the overall average
    pub async fn grade_report(
        db: &DatabaseConnection,
        access: &AccessContext,
        student_id: i32,
    ) -> Result<GradeReport, ServiceError> {
        access.check(Capability::ViewStudentRecords(student_id))?;
        let student = StudentService::find_student(db, student_id).await?;
        let subjects = EnrollmentService::subjects_for(db, &student).await?;

        let grades = grades::Entity::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .all(db)
            .await?;

        let values: Vec<f64> = grades.iter().map(|g| g.value).collect();
        let average = status::average(&values);

        let mut latest_by_subject: HashMap<i32, grades::Model> = HashMap::new();
        for grade in grades {
            let is_newer = latest_by_subject
                .get(&grade.subject_id)
                .is_none_or(|current| {
                    (grade.evaluation_date, grade.id) > (current.evaluation_date, current.id)
                });
            if is_newer {
                latest_by_subject.insert(grade.subject_id, grade);
            }
        }

        let subject_grades = subjects
            .into_iter()
            .map(|subject| {
                let grade = latest_by_subject.remove(&subject.id);
                SubjectGrade {
                    subject_id: subject.id,
                    subject_name: subject.name,
                    credits: subject.credits,
                    status: grade.as_ref().map(grades::Model::status),
                    grade,
                }
            })
            .collect();

        Ok(GradeReport {
            student_id,
            student_name: student.full_name(),
            subjects: subject_grades,
            average,
            status: GradeStatus::from_value(average),
        })
    }

    /// Grade average of every student in a school class
    pub async fn class_overview(
        db: &DatabaseConnection,
        access: &AccessContext,
        class_id: i32,
    ) -> Result<Vec<StudentGradeSummary>, ServiceError> {
        access.check(Capability::ViewClassRecords)?;
        let students = SchoolClassService::class_students(db, class_id).await?;
        debug!(
            "Computing grade averages for {} students of class {class_id}",
            students.len()
        );

        let summaries = students
            .into_iter()
            .map(|student| async move { Self::summary_for(db, student).await });

        Ok(try_join_all(summaries).await?)
    }

    async fn summary_for(
        db: &DatabaseConnection,
        student: students::Model,
    ) -> Result<StudentGradeSummary, DbErr> {
        let average = Self::average_for(db, student.id).await?;
        Ok(StudentGradeSummary {
            student_id: student.id,
            student_name: student.full_name(),
            average,
            status: GradeStatus::from_value(average),
        })
    }

    async fn average_for(db: &DatabaseConnection, student_id: i32) -> Result<f64, DbErr> {
        let values: Vec<f64> = grades::Entity::find()
            .select_only()
            .column(grades::Column::Value)
            .filter(grades::Column::StudentId.eq(student_id))
            .into_tuple::<f64>()
            .all(db)
            .await?;

        Ok(status::average(&values))
    }
}
