//! Test database and row builders shared by the service tests

use crate::{
    db::create_connection,
    entities::{
        attendances, course_subjects, courses, grades, school_classes, students, subjects,
        teacher_school_classes, teacher_subjects, teachers,
    },
};
use chrono::{NaiveDate, NaiveDateTime};
use migration::{Migrator, MigratorTrait};
use models::{
    access::{AccessContext, Role},
    student_status::StudentStatus,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use tempfile::TempDir;

pub(crate) struct TestDb {
    pub(crate) db: DatabaseConnection,
    // Holds the sqlite file until the test ends
    _dir: TempDir,
}

pub(crate) async fn setup() -> TestDb {
    let dir = TempDir::with_prefix("school-records-db").unwrap();
    let path = dir.path().join("db.sqlite");
    let url = format!("sqlite://{}?mode=rwc", path.to_str().unwrap());

    let db = create_connection(&url).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    TestDb { db, _dir: dir }
}

pub(crate) fn admin() -> AccessContext {
    AccessContext::staff("admin", Role::Admin)
}

pub(crate) fn day(n: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, n)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub(crate) async fn insert_course(db: &DatabaseConnection, name: &str) -> i32 {
    courses::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        duration: Set(40),
        is_active: Set(true),
        created_at: Set(day(1)),
        updated_at: Set(day(1)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn insert_subject(db: &DatabaseConnection, name: &str, total_classes: i32) -> i32 {
    subjects::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        credits: Set(6),
        total_classes: Set(total_classes),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn link_subject(db: &DatabaseConnection, course_id: i32, subject_id: i32) {
    course_subjects::Entity::insert(course_subjects::ActiveModel {
        course_id: Set(course_id),
        subject_id: Set(subject_id),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

pub(crate) async fn insert_class(
    db: &DatabaseConnection,
    class_name: &str,
    course_id: Option<i32>,
) -> i32 {
    school_classes::ActiveModel {
        class_name: Set(class_name.to_string()),
        course_id: Set(course_id),
        start_date: Set(None),
        end_date: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn insert_student(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    school_class_id: Option<i32>,
) -> i32 {
    students::ActiveModel {
        user_id: Set(None),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        enrollment_date: Set(None),
        status: Set(StudentStatus::Active),
        school_class_id: Set(school_class_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn link_user(db: &DatabaseConnection, student_id: i32, user_id: &str) {
    let student = students::Entity::find_by_id(student_id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: students::ActiveModel = student.into();
    active.user_id = Set(Some(user_id.to_string()));
    active.update(db).await.unwrap();
}

pub(crate) async fn class_of(db: &DatabaseConnection, student_id: i32) -> i32 {
    students::Entity::find_by_id(student_id)
        .one(db)
        .await
        .unwrap()
        .and_then(|student| student.school_class_id)
        .unwrap()
}

pub(crate) async fn insert_teacher(db: &DatabaseConnection, first_name: &str, last_name: &str) -> i32 {
    teachers::ActiveModel {
        user_id: Set(None),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        hire_date: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn link_teacher_subject(db: &DatabaseConnection, teacher_id: i32, subject_id: i32) {
    teacher_subjects::Entity::insert(teacher_subjects::ActiveModel {
        teacher_id: Set(teacher_id),
        subject_id: Set(subject_id),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

pub(crate) async fn link_teacher_class(db: &DatabaseConnection, teacher_id: i32, class_id: i32) {
    teacher_school_classes::Entity::insert(teacher_school_classes::ActiveModel {
        teacher_id: Set(teacher_id),
        school_class_id: Set(class_id),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

pub(crate) async fn insert_attendance(
    db: &DatabaseConnection,
    student_id: i32,
    subject_id: i32,
    description: Option<&str>,
) {
    insert_attendance_on(db, student_id, subject_id, day(1), description).await;
}

pub(crate) async fn insert_attendance_on(
    db: &DatabaseConnection,
    student_id: i32,
    subject_id: i32,
    date: NaiveDateTime,
    description: Option<&str>,
) -> i32 {
    attendances::ActiveModel {
        student_id: Set(student_id),
        subject_id: Set(subject_id),
        date: Set(date),
        description: Set(description.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Inserts `count` plain absences for the pair, ignoring the subject's class limit
pub(crate) async fn insert_attendances(
    db: &DatabaseConnection,
    student_id: i32,
    subject_id: i32,
    count: usize,
) {
    for _ in 0..count {
        insert_attendance(db, student_id, subject_id, None).await;
    }
}

pub(crate) async fn insert_grade(
    db: &DatabaseConnection,
    student_id: i32,
    subject_id: i32,
    value: f64,
    evaluation_date: NaiveDateTime,
) -> i32 {
    grades::ActiveModel {
        student_id: Set(student_id),
        subject_id: Set(subject_id),
        value: Set(value),
        evaluation_date: Set(evaluation_date),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}
